//! In-memory backend
//!
//! Keeps profiles and templates in memory and follows the real backend's
//! rules for ids, validation, search and templates. Previews are placeholder
//! SVG cards, not rendered badges.

use crate::{Backend, Result};
use async_trait::async_trait;
use badge_core::dates::{self, TIMESTAMP_FORMAT};
use badge_core::photo::encode_data_uri;
use badge_core::profile::DEFAULT_TEMPLATE;
use badge_core::{ActionResponse, PreviewResponse, ProfileData, ProfileRecord, TemplateRecord};
use chrono::NaiveDate;
use parking_lot::RwLock;
use rand::Rng;
use tracing::{debug, info};

const ID_LEN: usize = 8;
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_FONT: &str = "Cormorant-Bold.ttf";
pub const DEFAULT_PATTERN: &str = "sys.bmp";

#[derive(Default)]
struct State {
    /// Insertion order; expiration dates stored as `YYYY-MM-DD`
    profiles: Vec<ProfileRecord>,
    /// Insertion order, unique by name
    templates: Vec<TemplateRecord>,
}

/// Backend that lives entirely in memory
pub struct LoopbackBackend {
    state: RwLock<State>,
    fonts: Vec<String>,
    patterns: Vec<String>,
}

impl Default for LoopbackBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopbackBackend {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            fonts: vec![DEFAULT_FONT.to_string()],
            patterns: vec![DEFAULT_PATTERN.to_string()],
        }
    }

    pub fn with_fonts(mut self, fonts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fonts = fonts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// The built-in template used for the `default` pseudo-name
    pub fn default_template() -> TemplateRecord {
        let mut template = TemplateRecord::new(DEFAULT_TEMPLATE, DEFAULT_PATTERN, DEFAULT_FONT);
        template.data_font = DEFAULT_FONT.to_string();
        template
    }

    /// Remove profiles whose expiration date lies before `today`
    ///
    /// Returns the number of profiles removed.
    pub fn purge_expired(&self, today: NaiveDate) -> usize {
        let mut state = self.state.write();
        let before = state.profiles.len();
        state.profiles.retain(|p| match &p.expiration_date {
            Some(date) => !dates::is_date_expired(date, today),
            None => true,
        });

        let removed = before - state.profiles.len();
        if removed > 0 {
            info!("Purged {} expired profiles", removed);
        }
        removed
    }

    fn generate_id(profiles: &[ProfileRecord]) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id: String = (0..ID_LEN)
                .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
                .collect();
            if !profiles.iter().any(|p| p.id == id) {
                return id;
            }
        }
    }

    /// Validate name and expiration; returns the storage-format expiration
    fn validate(data: &ProfileData) -> std::result::Result<Option<String>, String> {
        if data.full_name.is_empty() {
            return Err("full name is required".to_string());
        }

        if data.expiration_date.is_empty() {
            return Ok(None);
        }

        dates::format_storage_date(&data.expiration_date)
            .map(Some)
            .map_err(|_| "invalid date format, use DD.MM.YYYY".to_string())
    }

    fn find_template(&self, name: &str) -> Option<TemplateRecord> {
        if name == DEFAULT_TEMPLATE {
            return Some(Self::default_template());
        }
        self.state.read().templates.iter().find(|t| t.name == name).cloned()
    }

    /// Profile as presented to the UI (display-format expiration)
    fn present(record: &ProfileRecord) -> ProfileRecord {
        let mut record = record.clone();
        record.expiration_date = record.expiration_date.map(|d| dates::format_display_date(&d));
        record
    }
}

#[async_trait]
impl Backend for LoopbackBackend {
    async fn generate_preview(&self, data: &ProfileData) -> Result<PreviewResponse> {
        if data.full_name.is_empty() {
            return Ok(PreviewResponse::failed("full name is required"));
        }

        let template = data
            .custom_template()
            .and_then(|name| self.find_template(name))
            .unwrap_or_else(Self::default_template);

        let mut lines = vec![
            data.full_name.clone(),
            data.organization.clone(),
            data.department.clone(),
        ];
        if !data.expiration_date.is_empty() {
            lines.push(format!("valid until {}", data.expiration_date));
        }

        debug!("Rendering preview for '{}' with template '{}'", data.full_name, template.name);
        Ok(PreviewResponse::image(placeholder_card(
            "PREVIEW01",
            &lines,
            &template,
            data.photo_base64.is_some(),
        )))
    }

    async fn create_profile(&self, data: &ProfileData) -> Result<ActionResponse> {
        let expiration = match Self::validate(data) {
            Ok(expiration) => expiration,
            Err(e) => return Ok(ActionResponse::failed(e)),
        };

        let mut state = self.state.write();
        let id = Self::generate_id(&state.profiles);
        let now = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

        state.profiles.push(ProfileRecord {
            id: id.clone(),
            full_name: data.full_name.clone(),
            organization: data.organization.clone(),
            department: data.department.clone(),
            created_at: now.clone(),
            updated_at: Some(now),
            is_temporary: expiration.is_some(),
            expiration_date: expiration,
        });

        info!("Created profile {}", id);
        Ok(ActionResponse::created(id))
    }

    async fn update_profile(&self, data: &ProfileData) -> Result<ActionResponse> {
        let expiration = match Self::validate(data) {
            Ok(expiration) => expiration,
            Err(e) => return Ok(ActionResponse::failed(e)),
        };

        let Some(user_id) = data.user_id.as_deref() else {
            return Ok(ActionResponse::failed("profile id is required"));
        };

        let mut state = self.state.write();
        let Some(profile) = state.profiles.iter_mut().find(|p| p.id == user_id) else {
            return Ok(ActionResponse::failed("profile not found"));
        };

        profile.full_name = data.full_name.clone();
        profile.organization = data.organization.clone();
        profile.department = data.department.clone();
        profile.updated_at = Some(chrono::Local::now().format(TIMESTAMP_FORMAT).to_string());
        profile.is_temporary = expiration.is_some();
        profile.expiration_date = expiration;

        info!("Updated profile {}", user_id);
        Ok(ActionResponse::ok())
    }

    async fn recover_profile(&self, user_id: &str, _data: &ProfileData) -> Result<ActionResponse> {
        if !self.state.read().profiles.iter().any(|p| p.id == user_id) {
            return Ok(ActionResponse::failed("profile not found"));
        }

        info!("Recovered profile {}", user_id);
        Ok(ActionResponse::ok())
    }

    async fn delete_profile(&self, user_id: &str) -> Result<ActionResponse> {
        let mut state = self.state.write();
        let before = state.profiles.len();
        state.profiles.retain(|p| p.id != user_id);

        if state.profiles.len() == before {
            return Ok(ActionResponse::failed("profile not found"));
        }

        info!("Deleted profile {}", user_id);
        Ok(ActionResponse::ok())
    }

    async fn search_profiles(&self, term: &str) -> Result<Vec<ProfileRecord>> {
        let state = self.state.read();

        if term.trim().is_empty() {
            return Ok(state.profiles.iter().map(Self::present).collect());
        }

        let needle = term.to_lowercase();
        Ok(state
            .profiles
            .iter()
            .filter(|p| {
                p.id.eq_ignore_ascii_case(term) || p.full_name.to_lowercase().contains(&needle)
            })
            .map(Self::present)
            .collect())
    }

    async fn get_profile_by_id(&self, user_id: &str) -> Result<Option<ProfileRecord>> {
        let state = self.state.read();
        Ok(state.profiles.iter().find(|p| p.id == user_id).map(|p| {
            let mut record = Self::present(p);
            record.created_at = dates::format_display_date(&record.created_at);
            record
        }))
    }

    async fn get_profiles_count(&self) -> Result<u64> {
        Ok(self.state.read().profiles.len() as u64)
    }

    async fn get_available_fonts(&self) -> Result<Vec<String>> {
        Ok(self.fonts.clone())
    }

    async fn get_available_patterns(&self) -> Result<Vec<String>> {
        Ok(self.patterns.clone())
    }

    async fn get_templates(&self) -> Result<Vec<TemplateRecord>> {
        Ok(self.state.read().templates.clone())
    }

    async fn save_template(&self, template: &TemplateRecord) -> Result<bool> {
        if template.name.is_empty() || template.name == DEFAULT_TEMPLATE {
            return Ok(false);
        }

        let mut template = template.clone();
        if template.data_font.is_empty() {
            template.data_font = template.font.clone();
        }

        let mut state = self.state.write();
        match state.templates.iter_mut().find(|t| t.name == template.name) {
            Some(existing) => *existing = template,
            None => state.templates.push(template),
        }
        Ok(true)
    }

    async fn load_template(&self, name: &str) -> Result<Option<TemplateRecord>> {
        Ok(self.find_template(name))
    }

    async fn delete_template(&self, name: &str) -> Result<bool> {
        let mut state = self.state.write();
        let before = state.templates.len();
        state.templates.retain(|t| t.name != name);
        Ok(state.templates.len() != before)
    }

    async fn preview_template(&self, name: &str) -> Result<PreviewResponse> {
        let Some(template) = self.find_template(name) else {
            return Ok(PreviewResponse::failed(format!("template not found: {}", name)));
        };

        let lines = [
            "Ivanov Ivan Ivanovich".to_string(),
            "Example LLC".to_string(),
            "Development".to_string(),
            "valid until 31.12.2025".to_string(),
        ];
        Ok(PreviewResponse::image(placeholder_card("TEMPLATE01", &lines, &template, false)))
    }

    async fn get_30_days_date(&self) -> Result<String> {
        Ok(dates::thirty_days_from(dates::today()))
    }
}

/// Minimal SVG card listing the text lines a real render would draw
fn placeholder_card(
    id: &str,
    lines: &[String],
    template: &TemplateRecord,
    with_photo: bool,
) -> String {
    let fill = if template.convert_pattern_to_bw { "#ddd" } else { "#e8f0ff" };
    let mut svg = String::from(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="250">"#,
    );
    svg.push_str(&format!(r#"<rect width="400" height="250" fill="{}"/>"#, fill));

    if with_photo {
        svg.push_str(r##"<rect x="290" y="20" width="90" height="110" fill="#999"/>"##);
    }

    svg.push_str(&format!(
        r#"<text x="20" y="40" font-family="{}" font-size="{}">{}</text>"#,
        xml_escape(&template.font),
        template.font_size_normal,
        xml_escape(id)
    ));

    for (i, line) in lines.iter().filter(|l| !l.is_empty()).enumerate() {
        svg.push_str(&format!(
            r#"<text x="20" y="{}" font-family="{}" font-size="{}">{}</text>"#,
            80 + i * 30,
            xml_escape(template.effective_data_font()),
            template.data_font_size_normal,
            xml_escape(line)
        ));
    }
    svg.push_str("</svg>");

    encode_data_uri("image/svg+xml", svg.as_bytes())
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
