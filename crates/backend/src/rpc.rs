//! JSON-lines wire format
//!
//! One JSON object per line in each direction:
//! ```text
//! -> {"id":7,"method":"search_profiles","params":["ivan"]}
//! <- {"id":7,"result":[...]}
//! <- {"id":8,"error":"profile not found"}
//! ```

use crate::{BackendError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Remote operations, by wire name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GeneratePreview,
    CreateProfile,
    UpdateProfile,
    RecoverProfile,
    DeleteProfile,
    SearchProfiles,
    GetProfileById,
    GetProfilesCount,
    GetAvailableFonts,
    GetAvailablePatterns,
    GetTemplates,
    SaveTemplate,
    LoadTemplate,
    DeleteTemplate,
    PreviewTemplate,
    Get30DaysDate,
}

impl Method {
    pub const ALL: [Method; 16] = [
        Method::GeneratePreview,
        Method::CreateProfile,
        Method::UpdateProfile,
        Method::RecoverProfile,
        Method::DeleteProfile,
        Method::SearchProfiles,
        Method::GetProfileById,
        Method::GetProfilesCount,
        Method::GetAvailableFonts,
        Method::GetAvailablePatterns,
        Method::GetTemplates,
        Method::SaveTemplate,
        Method::LoadTemplate,
        Method::DeleteTemplate,
        Method::PreviewTemplate,
        Method::Get30DaysDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Method::GeneratePreview => "generate_preview",
            Method::CreateProfile => "create_profile",
            Method::UpdateProfile => "update_profile",
            Method::RecoverProfile => "recover_profile",
            Method::DeleteProfile => "delete_profile",
            Method::SearchProfiles => "search_profiles",
            Method::GetProfileById => "get_profile_by_id",
            Method::GetProfilesCount => "get_profiles_count",
            Method::GetAvailableFonts => "get_available_fonts",
            Method::GetAvailablePatterns => "get_available_patterns",
            Method::GetTemplates => "get_templates",
            Method::SaveTemplate => "save_template",
            Method::LoadTemplate => "load_template",
            Method::DeleteTemplate => "delete_template",
            Method::PreviewTemplate => "preview_template",
            Method::Get30DaysDate => "get_30_days_date",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| BackendError::UnknownMethod(s.to_string()))
    }
}

/// Client -> backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: u64,
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
}

/// Backend -> client
///
/// `result` may legitimately be `null` (e.g. a profile lookup miss), so
/// success is decided by the absence of `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: u64,
    #[serde(default)]
    pub result: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok(id: u64, result: Value) -> Self {
        Self {
            id,
            result,
            error: None,
        }
    }

    pub fn err(id: u64, error: impl Into<String>) -> Self {
        Self {
            id,
            result: Value::Null,
            error: Some(error.into()),
        }
    }

    /// Convert into the typed result or a `Remote` error
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        match self.error {
            Some(error) => Err(BackendError::Remote(error)),
            None => Ok(serde_json::from_value(self.result)?),
        }
    }
}

/// Serialize a message as a single newline-terminated line
pub fn encode_line<T: Serialize>(message: &T) -> Result<Vec<u8>> {
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    Ok(line)
}

/// Extract positional parameter `index`
pub fn param<T: DeserializeOwned>(method: Method, params: &[Value], index: usize) -> Result<T> {
    let value = params.get(index).ok_or_else(|| BackendError::InvalidParams {
        method: method.to_string(),
        reason: format!("missing parameter {}", index),
    })?;

    serde_json::from_value(value.clone()).map_err(|e| BackendError::InvalidParams {
        method: method.to_string(),
        reason: e.to_string(),
    })
}
