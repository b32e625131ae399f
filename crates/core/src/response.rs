//! Backend response shapes

use serde::{Deserialize, Serialize};

/// Result of `generate_preview` / `preview_template`
///
/// On the wire this is either `{"image_data": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreviewResponse {
    Image { image_data: String },
    Failed { error: String },
}

impl PreviewResponse {
    pub fn image(image_data: impl Into<String>) -> Self {
        PreviewResponse::Image {
            image_data: image_data.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        PreviewResponse::Failed {
            error: error.into(),
        }
    }

    pub fn image_data(&self) -> Option<&str> {
        match self {
            PreviewResponse::Image { image_data } => Some(image_data),
            PreviewResponse::Failed { .. } => None,
        }
    }
}

/// Result of create / update / recover / delete
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    /// Assigned id (create only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn created(user_id: impl Into<String>) -> Self {
        Self {
            success: true,
            user_id: Some(user_id.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            user_id: None,
            error: Some(error.into()),
        }
    }

    /// Error text for a failed response
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("unknown error")
    }
}
