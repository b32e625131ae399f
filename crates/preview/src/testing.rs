//! Test doubles for the preview pipeline

use crate::surface::{FieldReader, PreviewSurface};
use crate::PreviewError;
use async_trait::async_trait;
use backend::{Backend, BackendError, LoopbackBackend};
use badge_core::{
    ActionResponse, FormContext, FormSnapshot, PhotoFile, PreviewResponse, ProfileData,
    ProfileRecord, TemplateRecord,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

/// Loopback backend with scripted previews
///
/// Previews answer `image_for(full_name)` after an optional queued delay,
/// and every preview payload is recorded.
pub struct ScriptedBackend {
    inner: LoopbackBackend,
    requests: Mutex<Vec<ProfileData>>,
    delays: Mutex<VecDeque<Duration>>,
    reject: Mutex<Option<String>>,
    offline: Mutex<bool>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            inner: LoopbackBackend::new(),
            requests: Mutex::new(Vec::new()),
            delays: Mutex::new(VecDeque::new()),
            reject: Mutex::new(None),
            offline: Mutex::new(false),
        }
    }

    pub fn image_for(full_name: &str) -> String {
        format!("data:text/plain,{}", full_name)
    }

    pub fn preview_requests(&self) -> Vec<ProfileData> {
        self.requests.lock().clone()
    }

    pub fn push_delay(&self, delay: Duration) {
        self.delays.lock().push_back(delay);
    }

    pub fn reject_with(&self, error: &str) {
        *self.reject.lock() = Some(error.to_string());
    }

    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock() = offline;
    }

    pub async fn seed_profile(&self, name: &str, organization: &str, expiration: &str) -> String {
        let data = ProfileData {
            full_name: name.to_string(),
            organization: organization.to_string(),
            expiration_date: expiration.to_string(),
            ..ProfileData::default()
        };
        self.inner
            .create_profile(&data)
            .await
            .unwrap()
            .user_id
            .unwrap()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn generate_preview(&self, data: &ProfileData) -> backend::Result<PreviewResponse> {
        if *self.offline.lock() {
            return Err(BackendError::Closed);
        }

        self.requests.lock().push(data.clone());
        let delay = self.delays.lock().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reject = self.reject.lock().clone();
        Ok(match reject {
            Some(error) => PreviewResponse::failed(error),
            None => PreviewResponse::image(Self::image_for(&data.full_name)),
        })
    }

    async fn create_profile(&self, data: &ProfileData) -> backend::Result<ActionResponse> {
        self.inner.create_profile(data).await
    }

    async fn update_profile(&self, data: &ProfileData) -> backend::Result<ActionResponse> {
        self.inner.update_profile(data).await
    }

    async fn recover_profile(
        &self,
        user_id: &str,
        data: &ProfileData,
    ) -> backend::Result<ActionResponse> {
        self.inner.recover_profile(user_id, data).await
    }

    async fn delete_profile(&self, user_id: &str) -> backend::Result<ActionResponse> {
        self.inner.delete_profile(user_id).await
    }

    async fn search_profiles(&self, term: &str) -> backend::Result<Vec<ProfileRecord>> {
        self.inner.search_profiles(term).await
    }

    async fn get_profile_by_id(&self, user_id: &str) -> backend::Result<Option<ProfileRecord>> {
        if *self.offline.lock() {
            return Err(BackendError::Closed);
        }
        self.inner.get_profile_by_id(user_id).await
    }

    async fn get_profiles_count(&self) -> backend::Result<u64> {
        self.inner.get_profiles_count().await
    }

    async fn get_available_fonts(&self) -> backend::Result<Vec<String>> {
        self.inner.get_available_fonts().await
    }

    async fn get_available_patterns(&self) -> backend::Result<Vec<String>> {
        self.inner.get_available_patterns().await
    }

    async fn get_templates(&self) -> backend::Result<Vec<TemplateRecord>> {
        self.inner.get_templates().await
    }

    async fn save_template(&self, template: &TemplateRecord) -> backend::Result<bool> {
        self.inner.save_template(template).await
    }

    async fn load_template(&self, name: &str) -> backend::Result<Option<TemplateRecord>> {
        self.inner.load_template(name).await
    }

    async fn delete_template(&self, name: &str) -> backend::Result<bool> {
        self.inner.delete_template(name).await
    }

    async fn preview_template(&self, name: &str) -> backend::Result<PreviewResponse> {
        self.inner.preview_template(name).await
    }

    async fn get_30_days_date(&self) -> backend::Result<String> {
        self.inner.get_30_days_date().await
    }
}

/// Field reader over fixed snapshots
pub struct StaticReader {
    forms: Mutex<HashMap<FormContext, FormSnapshot>>,
    broken_photos: Mutex<HashSet<FormContext>>,
}

impl StaticReader {
    pub fn new() -> Self {
        Self {
            forms: Mutex::new(HashMap::new()),
            broken_photos: Mutex::new(HashSet::new()),
        }
    }

    pub fn set(&self, context: FormContext, snapshot: FormSnapshot) {
        self.forms.lock().insert(context, snapshot);
    }

    /// Make the context's photo fail to load
    pub fn break_photo(&self, context: FormContext) {
        self.broken_photos.lock().insert(context);
    }

    fn snapshot(&self, context: FormContext) -> Result<FormSnapshot, PreviewError> {
        self.forms
            .lock()
            .get(&context)
            .cloned()
            .ok_or(PreviewError::UnknownForm(context))
    }
}

#[async_trait]
impl FieldReader for StaticReader {
    async fn read_fields(&self, context: FormContext) -> Result<FormSnapshot, PreviewError> {
        let mut snapshot = self.snapshot(context)?;
        snapshot.photo = None;
        Ok(snapshot)
    }

    async fn read_photo(&self, context: FormContext) -> Result<Option<PhotoFile>, PreviewError> {
        if self.broken_photos.lock().contains(&context) {
            return Err(badge_core::Error::PhotoRead {
                path: format!("{}-photo.png", context).into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .into());
        }
        Ok(self.snapshot(context)?.photo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Shown(FormContext, String),
    Hidden(FormContext),
}

/// Surface that records what it was asked to do
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().clone()
    }
}

impl PreviewSurface for RecordingSurface {
    fn show(&self, context: FormContext, image_data: &str) {
        self.events
            .lock()
            .push(SurfaceEvent::Shown(context, image_data.to_string()));
    }

    fn hide(&self, context: FormContext) {
        self.events.lock().push(SurfaceEvent::Hidden(context));
    }
}
