//! Profile payloads and stored profile records

use crate::photo::PhotoFile;
use serde::{Deserialize, Serialize};

/// Template id meaning "use the backend's built-in template"
pub const DEFAULT_TEMPLATE: &str = "default";

/// Current values of one form's fields
///
/// This is what a field reader hands to the preview pipeline and to the
/// submit actions. Recover forms only populate the style fields and `user_id`;
/// the identity fields are taken from the stored profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    /// Profile id (edit and recover forms only)
    pub user_id: Option<String>,
    pub full_name: String,
    pub organization: String,
    pub department: String,
    /// Expiration as typed, `DD.MM.YYYY` or empty
    pub expiration_date: String,
    pub convert_photo_to_bw: bool,
    pub convert_pattern_to_bw: bool,
    /// Selected template id
    pub template_name: String,
    /// Selected photo, if any
    pub photo: Option<PhotoFile>,
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self {
            user_id: None,
            full_name: String::new(),
            organization: String::new(),
            department: String::new(),
            expiration_date: String::new(),
            convert_photo_to_bw: true,
            convert_pattern_to_bw: false,
            template_name: DEFAULT_TEMPLATE.to_string(),
            photo: None,
        }
    }
}

/// The `profileData` payload shared by create / update / recover / preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileData {
    /// Only sent by update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub expiration_date: String,
    #[serde(default = "default_true")]
    pub convert_photo_to_bw: bool,
    #[serde(default)]
    pub convert_pattern_to_bw: bool,
    #[serde(default)]
    pub template_name: String,
    /// Photo as a data URI; omitted when no photo is selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_base64: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for ProfileData {
    fn default() -> Self {
        Self::from_snapshot(&FormSnapshot::default())
    }
}

impl ProfileData {
    /// Assemble the payload used by create and preview
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        Self {
            user_id: None,
            full_name: snapshot.full_name.clone(),
            organization: snapshot.organization.clone(),
            department: snapshot.department.clone(),
            expiration_date: snapshot.expiration_date.clone(),
            convert_photo_to_bw: snapshot.convert_photo_to_bw,
            convert_pattern_to_bw: snapshot.convert_pattern_to_bw,
            template_name: snapshot.template_name.clone(),
            photo_base64: snapshot.photo.as_ref().map(PhotoFile::to_data_uri),
        }
    }

    /// Assemble the update payload (carries the profile id)
    pub fn for_update(snapshot: &FormSnapshot) -> Self {
        Self {
            user_id: snapshot.user_id.clone(),
            ..Self::from_snapshot(snapshot)
        }
    }

    /// Assemble the recover payload: style flags, template and photo only
    pub fn style_only(snapshot: &FormSnapshot) -> Self {
        Self {
            user_id: None,
            full_name: String::new(),
            organization: String::new(),
            department: String::new(),
            expiration_date: String::new(),
            convert_photo_to_bw: snapshot.convert_photo_to_bw,
            convert_pattern_to_bw: snapshot.convert_pattern_to_bw,
            template_name: snapshot.template_name.clone(),
            photo_base64: snapshot.photo.as_ref().map(PhotoFile::to_data_uri),
        }
    }

    /// Whether the template field names a user template
    pub fn custom_template(&self) -> Option<&str> {
        match self.template_name.as_str() {
            "" | DEFAULT_TEMPLATE => None,
            name => Some(name),
        }
    }
}

/// A stored profile as returned by search / lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(rename = "ID")]
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub is_temporary: bool,
}
