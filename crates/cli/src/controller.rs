//! UI actions
//!
//! The controller owns the form store, the preview panes and the notification
//! banner, and implements every user action against a [`Backend`]. Actions
//! never return backend errors: failures of explicit actions end up on the
//! banner, preview failures only in the log.

use crate::config::UiConfig;
use crate::events::{wire_auto_preview, EventRouter};
use crate::forms::{FieldValue, FormField, FormState, FormStore};
use crate::notify::{Notifier, Severity};
use crate::pane::PreviewPane;
use crate::table::{self, ProfileRow};
use anyhow::Result;
use backend::{Backend, BackendError};
use badge_core::dates::{self, format_display_date};
use badge_core::profile::DEFAULT_TEMPLATE;
use badge_core::template::{DEFAULT_DATA_FONT_SIZE, DEFAULT_FONT_SIZE};
use badge_core::{FormContext, PreviewResponse, ProfileData, TemplateRecord};
use parking_lot::Mutex;
use preview::{FieldReader, PreviewPipeline, PreviewScheduler, PreviewSurface};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What the screens currently show besides the forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub fonts: Vec<String>,
    pub patterns: Vec<String>,
    pub templates: Vec<TemplateRecord>,
    /// Options of the three template selects, `default` first
    pub template_options: Vec<String>,
    pub profiles: Vec<ProfileRow>,
    pub profiles_count: u64,
    pub search_term: String,
    /// Template loaded into the template editor
    pub template_editor: Option<TemplateRecord>,
    pub template_preview: Option<String>,
    /// Edit or recover modal, when open
    pub open_modal: Option<FormContext>,
}

pub struct Controller {
    backend: Arc<dyn Backend>,
    forms: Arc<FormStore>,
    pane: Arc<PreviewPane>,
    scheduler: Arc<PreviewScheduler>,
    router: EventRouter,
    notifier: Notifier,
    ui: UiConfig,
    view: Mutex<View>,
}

impl Controller {
    pub fn new(backend: Arc<dyn Backend>, ui: UiConfig) -> Self {
        let forms = Arc::new(FormStore::new());
        let pane = Arc::new(PreviewPane::new());
        let pipeline = Arc::new(PreviewPipeline::new(
            Arc::clone(&backend),
            forms.clone(),
            pane.clone(),
        ));
        let scheduler = Arc::new(PreviewScheduler::new(pipeline));

        let router = EventRouter::new();
        wire_auto_preview(&router, &scheduler);

        Self {
            backend,
            forms,
            pane,
            scheduler,
            router,
            notifier: Notifier::new(ui.notice_auto_hide()),
            ui,
            view: Mutex::new(View::default()),
        }
    }

    pub fn forms(&self) -> &FormStore {
        &self.forms
    }

    pub fn pane(&self) -> &PreviewPane {
        &self.pane
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn scheduler(&self) -> &PreviewScheduler {
        &self.scheduler
    }

    pub fn view(&self) -> View {
        self.view.lock().clone()
    }

    /// Type into / toggle a field and fire its event
    pub fn input(&self, field_id: &str, value: FieldValue) -> Result<()> {
        let (_, field) = self.forms.set(field_id, value)?;
        self.router.dispatch(field_id, field.event());
        Ok(())
    }

    /// Load catalogs and counts, then preview the create form
    pub async fn initialize(&self) {
        self.load_available_fonts().await;
        self.load_available_patterns().await;
        self.load_templates().await;
        self.update_profiles_count().await;
        self.schedule_after(FormContext::Create, self.ui.initial_preview_delay());
        info!("UI initialized");
    }

    fn schedule_after(&self, context: FormContext, delay: Duration) {
        let scheduler = Arc::clone(&self.scheduler);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            scheduler.schedule(context);
        });
    }

    fn report(&self, action: &str, err: impl std::fmt::Display) {
        self.notifier.show(format!("{}: {}", action, err), Severity::Danger);
    }

    /// Fill the form's expiration date with today + 30 days
    pub async fn set_30_days(&self, context: FormContext) -> Option<String> {
        let date = match self.backend.get_30_days_date().await {
            Ok(date) => date,
            Err(e) => {
                self.report("Failed to compute expiration date", e);
                return None;
            }
        };

        let id = FormField::ExpirationDate.id(context);
        if let Err(e) = self.input(&id, FieldValue::Text(date.clone())) {
            warn!("Cannot set expiration date: {}", e);
            return None;
        }
        Some(date)
    }

    // Profiles

    pub async fn create_profile(&self) -> Option<String> {
        let snapshot = match self.forms.read(FormContext::Create).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.report("Failed to create profile", e);
                return None;
            }
        };
        if snapshot.full_name.is_empty() {
            self.notifier.show("Full name is required", Severity::Warning);
            return None;
        }

        match self.backend.create_profile(&ProfileData::from_snapshot(&snapshot)).await {
            Ok(response) if response.success => {
                let user_id = response.user_id.unwrap_or_default();
                self.notifier
                    .show(format!("Profile created, ID: {}", user_id), Severity::Success);
                self.scheduler.cancel(FormContext::Create);
                self.forms.reset(FormContext::Create);
                self.pane.hide(FormContext::Create);
                self.update_profiles_count().await;
                Some(user_id)
            }
            Ok(response) => {
                self.report("Failed to create profile", response.error_message());
                None
            }
            Err(e) => {
                self.report("Failed to create profile", e);
                None
            }
        }
    }

    /// Open the edit modal for a stored profile
    pub async fn open_edit(&self, user_id: &str) -> bool {
        let Some(profile) = self.lookup(user_id).await else {
            return false;
        };

        self.forms.fill(
            FormContext::Edit,
            FormState {
                user_id: Some(profile.id),
                full_name: profile.full_name,
                organization: profile.organization,
                department: profile.department,
                expiration_date: profile
                    .expiration_date
                    .map(|d| format_display_date(&d))
                    .unwrap_or_default(),
                ..FormState::default()
            },
        );
        self.view.lock().open_modal = Some(FormContext::Edit);
        self.schedule_after(FormContext::Edit, self.ui.modal_preview_delay());
        true
    }

    /// Open the recover modal for a stored profile
    pub async fn open_recover(&self, user_id: &str) -> bool {
        let Some(profile) = self.lookup(user_id).await else {
            return false;
        };

        self.forms.fill(
            FormContext::Recover,
            FormState {
                user_id: Some(profile.id),
                ..FormState::default()
            },
        );
        self.view.lock().open_modal = Some(FormContext::Recover);
        self.schedule_after(FormContext::Recover, self.ui.modal_preview_delay());
        true
    }

    async fn lookup(&self, user_id: &str) -> Option<badge_core::ProfileRecord> {
        match self.backend.get_profile_by_id(user_id).await {
            Ok(Some(profile)) => Some(profile),
            Ok(None) => {
                self.notifier.show("Profile not found", Severity::Danger);
                None
            }
            Err(e) => {
                self.report("Failed to load profile", e);
                None
            }
        }
    }

    fn close_modal(&self, context: FormContext) {
        self.scheduler.cancel(context);
        self.pane.hide(context);
        let mut view = self.view.lock();
        if view.open_modal == Some(context) {
            view.open_modal = None;
        }
    }

    pub async fn update_profile(&self) -> bool {
        let snapshot = match self.forms.read(FormContext::Edit).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.report("Failed to update profile", e);
                return false;
            }
        };
        if snapshot.full_name.is_empty() {
            self.notifier.show("Full name is required", Severity::Warning);
            return false;
        }
        if snapshot.user_id.is_none() {
            self.notifier.show("No profile selected", Severity::Warning);
            return false;
        }

        match self.backend.update_profile(&ProfileData::for_update(&snapshot)).await {
            Ok(response) if response.success => {
                self.notifier.show("Profile updated", Severity::Success);
                self.close_modal(FormContext::Edit);
                self.load_all_profiles().await;
                true
            }
            Ok(response) => {
                self.report("Failed to update profile", response.error_message());
                false
            }
            Err(e) => {
                self.report("Failed to update profile", e);
                false
            }
        }
    }

    /// Re-issue the card of the profile in the recover modal
    pub async fn recover_profile(&self) -> bool {
        let snapshot = match self.forms.read(FormContext::Recover).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.report("Failed to recover profile", e);
                return false;
            }
        };
        let Some(user_id) = snapshot.user_id.clone() else {
            self.notifier.show("No profile selected", Severity::Warning);
            return false;
        };

        match self
            .backend
            .recover_profile(&user_id, &ProfileData::style_only(&snapshot))
            .await
        {
            Ok(response) if response.success => {
                self.notifier.show("Profile recovered", Severity::Success);
                self.close_modal(FormContext::Recover);
                self.load_all_profiles().await;
                true
            }
            Ok(response) => {
                self.report("Failed to recover profile", response.error_message());
                false
            }
            Err(e) => {
                self.report("Failed to recover profile", e);
                false
            }
        }
    }

    /// Delete a profile once the user confirmed
    pub async fn delete_profile(&self, user_id: &str, confirmed: bool) -> bool {
        if !confirmed {
            debug!("Deletion of {} not confirmed", user_id);
            return false;
        }

        match self.backend.delete_profile(user_id).await {
            Ok(response) if response.success => {
                self.notifier.show("Profile deleted", Severity::Success);
                self.load_all_profiles().await;
                true
            }
            Ok(response) => {
                self.report("Failed to delete profile", response.error_message());
                false
            }
            Err(e) => {
                self.report("Failed to delete profile", e);
                false
            }
        }
    }

    pub async fn search_profiles(&self, term: &str) -> Vec<ProfileRow> {
        self.view.lock().search_term = term.to_string();
        self.fetch_profiles(term).await
    }

    pub async fn clear_search(&self) -> Vec<ProfileRow> {
        self.view.lock().search_term.clear();
        self.load_all_profiles().await
    }

    pub async fn load_all_profiles(&self) -> Vec<ProfileRow> {
        let rows = self.fetch_profiles("").await;
        self.update_profiles_count().await;
        rows
    }

    async fn fetch_profiles(&self, term: &str) -> Vec<ProfileRow> {
        match self.backend.search_profiles(term).await {
            Ok(records) => {
                let rows = table::rows(&records, dates::today());
                self.view.lock().profiles = rows.clone();
                rows
            }
            Err(e) => {
                self.report("Failed to load profiles", e);
                Vec::new()
            }
        }
    }

    pub async fn update_profiles_count(&self) -> Option<u64> {
        match self.backend.get_profiles_count().await {
            Ok(count) => {
                self.view.lock().profiles_count = count;
                Some(count)
            }
            Err(e) => {
                warn!("Failed to count profiles: {}", e);
                None
            }
        }
    }

    // Catalogs and templates

    pub async fn load_available_fonts(&self) -> Vec<String> {
        let fonts = self.catalog("fonts", self.backend.get_available_fonts().await);
        self.view.lock().fonts = fonts.clone();
        fonts
    }

    pub async fn load_available_patterns(&self) -> Vec<String> {
        let patterns = self.catalog("patterns", self.backend.get_available_patterns().await);
        self.view.lock().patterns = patterns.clone();
        patterns
    }

    fn catalog(&self, what: &str, result: Result<Vec<String>, BackendError>) -> Vec<String> {
        result.unwrap_or_else(|e| {
            warn!("Failed to load {}: {}", what, e);
            Vec::new()
        })
    }

    /// Refresh the template list and every template select
    pub async fn load_templates(&self) -> Vec<TemplateRecord> {
        let templates = match self.backend.get_templates().await {
            Ok(templates) => templates,
            Err(e) => {
                self.report("Failed to load templates", e);
                return Vec::new();
            }
        };

        let mut options = vec![DEFAULT_TEMPLATE.to_string()];
        options.extend(templates.iter().map(|t| t.name.clone()));

        let mut view = self.view.lock();
        view.templates = templates.clone();
        view.template_options = options;
        templates
    }

    pub async fn save_template(&self, mut template: TemplateRecord) -> bool {
        if template.name.is_empty() || template.pattern.is_empty() || template.font.is_empty() {
            self.notifier.show("Fill in all required fields", Severity::Warning);
            return false;
        }
        if template.data_font.is_empty() {
            template.data_font = template.font.clone();
        }
        if template.font_size_normal == 0 {
            template.font_size_normal = DEFAULT_FONT_SIZE;
        }
        if template.data_font_size_normal == 0 {
            template.data_font_size_normal = DEFAULT_DATA_FONT_SIZE;
        }

        match self.backend.save_template(&template).await {
            Ok(true) => {
                self.notifier.show("Template saved", Severity::Success);
                self.view.lock().template_editor = None;
                self.load_templates().await;
                true
            }
            Ok(false) => {
                self.notifier.show("Failed to save template", Severity::Danger);
                false
            }
            Err(e) => {
                self.report("Failed to save template", e);
                false
            }
        }
    }

    /// Load a template into the editor
    pub async fn load_template_settings(&self, name: &str) -> Option<TemplateRecord> {
        match self.backend.load_template(name).await {
            Ok(Some(template)) => {
                self.notifier
                    .show(format!("Template \"{}\" loaded", template.name), Severity::Success);
                self.view.lock().template_editor = Some(template.clone());
                Some(template)
            }
            Ok(None) => {
                debug!("Template {} not found", name);
                None
            }
            Err(e) => {
                self.report("Failed to load template", e);
                None
            }
        }
    }

    pub async fn delete_template(&self, name: &str, confirmed: bool) -> bool {
        if !confirmed {
            debug!("Deletion of template {} not confirmed", name);
            return false;
        }

        match self.backend.delete_template(name).await {
            Ok(true) => {
                self.notifier.show("Template deleted", Severity::Success);
                self.load_templates().await;
                true
            }
            Ok(false) => {
                self.notifier.show("Failed to delete template", Severity::Danger);
                false
            }
            Err(e) => {
                self.report("Failed to delete template", e);
                false
            }
        }
    }

    /// Render a sample card for a stored template
    ///
    /// Like form previews, failures are logged only.
    pub async fn preview_template(&self, name: &str) -> Option<String> {
        match self.backend.preview_template(name).await {
            Ok(PreviewResponse::Image { image_data }) => {
                self.view.lock().template_preview = Some(image_data.clone());
                Some(image_data)
            }
            Ok(PreviewResponse::Failed { error }) => {
                warn!("Template preview rejected by backend: {}", error);
                None
            }
            Err(e) => {
                warn!("Template preview failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notice;
    use backend::{LoopbackBackend, RpcClient};
    use badge_core::photo::decode_data_uri;
    use tokio::time::sleep;

    fn controller() -> (Arc<LoopbackBackend>, Controller) {
        let backend = Arc::new(
            LoopbackBackend::new()
                .with_fonts(["Cormorant-Bold.ttf", "PTSans-Regular.ttf"])
                .with_patterns(["sys.bmp", "waves.bmp"]),
        );
        let controller = Controller::new(backend.clone(), UiConfig::default());
        (backend, controller)
    }

    fn last_notice(controller: &Controller) -> Notice {
        controller.notifier().current().unwrap()
    }

    /// SVG source of a loopback preview image
    fn card_text(image: &str) -> String {
        let (mime, bytes) = decode_data_uri(image).unwrap();
        assert_eq!(mime, "image/svg+xml");
        String::from_utf8(bytes).unwrap()
    }

    fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_initialize_loads_catalogs_and_previews_create_form() {
        let (_, controller) = controller();
        controller.forms().set("full-name", text("Ivan Petrov")).unwrap();

        controller.initialize().await;

        let view = controller.view();
        assert_eq!(view.fonts, vec!["Cormorant-Bold.ttf", "PTSans-Regular.ttf"]);
        assert_eq!(view.patterns, vec!["sys.bmp", "waves.bmp"]);
        assert_eq!(view.template_options, vec!["default"]);
        assert_eq!(view.profiles_count, 0);

        // 500ms initial delay, then the 300ms debounce window
        sleep(Duration::from_millis(700)).await;
        assert!(controller.pane().image(FormContext::Create).is_none());

        sleep(Duration::from_millis(200)).await;
        let image = controller.pane().image(FormContext::Create).unwrap();
        assert!(card_text(&image).contains("Ivan Petrov"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_triggers_debounced_preview() {
        let (_, controller) = controller();

        controller.input("full-name", text("I")).unwrap();
        sleep(Duration::from_millis(100)).await;
        controller.input("full-name", text("Iv")).unwrap();
        sleep(Duration::from_millis(100)).await;
        controller.input("organization", text("Acme")).unwrap();
        sleep(Duration::from_millis(200)).await;
        assert!(controller.pane().image(FormContext::Create).is_none());

        sleep(Duration::from_millis(200)).await;
        let image = controller.pane().image(FormContext::Create).unwrap();
        assert!(card_text(&image).contains("Acme"));

        // Clearing the name hides the preview again
        controller.input("full-name", text("")).unwrap();
        sleep(Duration::from_millis(400)).await;
        assert!(controller.pane().image(FormContext::Create).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_name_hides_preview_with_missing_photo() {
        let (_, controller) = controller();
        let dir = tempfile::tempdir().unwrap();

        controller.input("full-name", text("Ivan")).unwrap();
        sleep(Duration::from_millis(400)).await;
        assert!(controller.pane().image(FormContext::Create).is_some());

        let missing = dir.path().join("gone.png");
        controller.input("photo", FieldValue::File(Some(missing))).unwrap();
        controller.input("full-name", text("")).unwrap();
        sleep(Duration::from_millis(400)).await;

        assert!(controller.pane().image(FormContext::Create).is_none());
    }

    #[tokio::test]
    async fn test_create_requires_full_name() {
        let (backend, controller) = controller();

        assert_eq!(controller.create_profile().await, None);

        let notice = last_notice(&controller);
        assert_eq!(notice.severity, Severity::Warning);
        assert_eq!(backend.get_profiles_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_profile_resets_form() {
        let (backend, controller) = controller();
        controller.forms().set("full-name", text("Ivan Petrov")).unwrap();
        controller.forms().set("expiration-date", text("31.12.2030")).unwrap();
        controller.pane().show(FormContext::Create, "data:image/png;base64,AA==");

        let user_id = controller.create_profile().await.unwrap();

        assert_eq!(user_id.len(), 8);
        let notice = last_notice(&controller);
        assert_eq!(notice.severity, Severity::Success);
        assert!(notice.message.contains(&user_id));
        assert_eq!(controller.forms().get(FormContext::Create), FormState::default());
        assert!(controller.pane().image(FormContext::Create).is_none());
        assert_eq!(controller.view().profiles_count, 1);

        let stored = backend.get_profile_by_id(&user_id).await.unwrap().unwrap();
        assert!(stored.is_temporary);
    }

    #[tokio::test]
    async fn test_create_rejected_by_backend_shows_danger() {
        let (_, controller) = controller();
        controller.forms().set("full-name", text("Ivan")).unwrap();
        controller.forms().set("expiration-date", text("2030/12/31")).unwrap();

        assert_eq!(controller.create_profile().await, None);
        let notice = last_notice(&controller);
        assert_eq!(notice.severity, Severity::Danger);
        assert!(notice.message.contains("invalid date format"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_flow() {
        let (backend, controller) = controller();
        controller.forms().set("full-name", text("Ivan Petrov")).unwrap();
        controller.forms().set("expiration-date", text("01.02.2031")).unwrap();
        let user_id = controller.create_profile().await.unwrap();

        assert!(controller.open_edit(&user_id).await);
        let form = controller.forms().get(FormContext::Edit);
        assert_eq!(form.user_id.as_deref(), Some(user_id.as_str()));
        assert_eq!(form.full_name, "Ivan Petrov");
        assert_eq!(form.expiration_date, "01.02.2031");
        assert_eq!(controller.view().open_modal, Some(FormContext::Edit));

        // Modal preview: 100ms delay plus the debounce window
        sleep(Duration::from_millis(450)).await;
        assert!(controller.pane().image(FormContext::Edit).is_some());

        controller.input("edit-full-name", text("Ivan Sidorov")).unwrap();
        assert!(controller.update_profile().await);

        assert_eq!(controller.view().open_modal, None);
        let stored = backend.get_profile_by_id(&user_id).await.unwrap().unwrap();
        assert_eq!(stored.full_name, "Ivan Sidorov");
        assert_eq!(controller.view().profiles[0].full_name, "Ivan Sidorov");
    }

    #[tokio::test]
    async fn test_open_unknown_profile() {
        let (_, controller) = controller();

        assert!(!controller.open_edit("NOPE0000").await);
        assert!(!controller.open_recover("NOPE0000").await);

        let notice = last_notice(&controller);
        assert_eq!(notice.severity, Severity::Danger);
        assert_eq!(notice.message, "Profile not found");
    }

    #[tokio::test]
    async fn test_recover_flow() {
        let (_, controller) = controller();
        controller.forms().set("full-name", text("Maria")).unwrap();
        let user_id = controller.create_profile().await.unwrap();

        assert!(controller.open_recover(&user_id).await);
        controller.forms().set("recover-convert-pattern-bw", FieldValue::Checked(true)).unwrap();

        assert!(controller.recover_profile().await);
        assert_eq!(last_notice(&controller).message, "Profile recovered");
        assert_eq!(controller.view().open_modal, None);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (backend, controller) = controller();
        controller.forms().set("full-name", text("Ivan")).unwrap();
        let user_id = controller.create_profile().await.unwrap();

        assert!(!controller.delete_profile(&user_id, false).await);
        assert_eq!(backend.get_profiles_count().await.unwrap(), 1);

        assert!(controller.delete_profile(&user_id, true).await);
        assert_eq!(backend.get_profiles_count().await.unwrap(), 0);
        assert_eq!(controller.view().profiles_count, 0);
        assert!(controller.view().profiles.is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_matches_load_all() {
        let (_, controller) = controller();
        for name in ["Ivan Petrov", "Maria Ivanova", "Oleg"] {
            controller.forms().set("full-name", text(name)).unwrap();
            controller.create_profile().await.unwrap();
        }

        let all = controller.load_all_profiles().await;
        assert_eq!(all.len(), 3);
        assert_eq!(controller.search_profiles("").await, all);

        let matches = controller.search_profiles("ivan").await;
        assert_eq!(matches.len(), 2);
        assert_eq!(controller.view().search_term, "ivan");

        assert_eq!(controller.clear_search().await, all);
        assert_eq!(controller.view().search_term, "");
    }

    #[tokio::test]
    async fn test_template_lifecycle() {
        let (_, controller) = controller();

        let incomplete = TemplateRecord::new("night", "", "Cormorant-Bold.ttf");
        assert!(!controller.save_template(incomplete).await);
        assert_eq!(last_notice(&controller).severity, Severity::Warning);

        let template = TemplateRecord::new("night", "waves.bmp", "Cormorant-Bold.ttf");
        assert!(controller.save_template(template).await);
        assert_eq!(controller.view().template_options, vec!["default", "night"]);

        let loaded = controller.load_template_settings("night").await.unwrap();
        assert_eq!(loaded.data_font, "Cormorant-Bold.ttf");
        assert_eq!(controller.view().template_editor, Some(loaded));

        let image = controller.preview_template("night").await.unwrap();
        assert!(card_text(&image).contains("TEMPLATE01"));
        assert_eq!(controller.preview_template("missing").await, None);

        assert!(!controller.delete_template("night", false).await);
        assert!(controller.delete_template("night", true).await);
        assert_eq!(controller.view().template_options, vec!["default"]);
    }

    #[tokio::test]
    async fn test_set_30_days() {
        let (_, controller) = controller();

        let date = controller.set_30_days(FormContext::Create).await.unwrap();
        assert_eq!(date, dates::thirty_days_from(dates::today()));
        assert_eq!(controller.forms().get(FormContext::Create).expiration_date, date);

        // The recover form has no expiration field
        assert_eq!(controller.set_30_days(FormContext::Recover).await, None);
    }

    #[tokio::test]
    async fn test_transport_errors_become_notices() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = Arc::new(RpcClient::new(addr.to_string()));
        let controller = Controller::new(backend, UiConfig::default());
        controller.forms().set("full-name", text("Ivan")).unwrap();

        assert_eq!(controller.create_profile().await, None);
        let notice = last_notice(&controller);
        assert_eq!(notice.severity, Severity::Danger);
        assert!(notice.message.starts_with("Failed to create profile"));

        assert!(controller.load_all_profiles().await.is_empty());
    }
}
