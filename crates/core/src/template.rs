//! Card template records

use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_SIZE: u32 = 18;
pub const DEFAULT_DATA_FONT_SIZE: u32 = 16;

/// A saved card template
///
/// `pattern`, `font` and `data_font` are bare file names as offered by
/// `get_available_patterns` / `get_available_fonts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub name: String,
    pub pattern: String,
    pub font: String,
    /// Font for the data lines; falls back to `font` when empty
    #[serde(default)]
    pub data_font: String,
    #[serde(default = "default_font_size")]
    pub font_size_normal: u32,
    #[serde(default = "default_data_font_size")]
    pub data_font_size_normal: u32,
    #[serde(default = "default_true")]
    pub convert_photo_to_bw: bool,
    #[serde(default)]
    pub convert_pattern_to_bw: bool,
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

fn default_data_font_size() -> u32 {
    DEFAULT_DATA_FONT_SIZE
}

fn default_true() -> bool {
    true
}

impl TemplateRecord {
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        font: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            font: font.into(),
            data_font: String::new(),
            font_size_normal: DEFAULT_FONT_SIZE,
            data_font_size_normal: DEFAULT_DATA_FONT_SIZE,
            convert_photo_to_bw: true,
            convert_pattern_to_bw: false,
        }
    }

    /// Font used for data lines
    pub fn effective_data_font(&self) -> &str {
        if self.data_font.is_empty() {
            &self.font
        } else {
            &self.data_font
        }
    }
}
