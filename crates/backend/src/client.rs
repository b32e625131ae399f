//! RPC client for the backend process

use crate::rpc::{encode_line, Method, Request, Response};
use crate::{Backend, BackendError, Result};
use async_trait::async_trait;
use badge_core::{ActionResponse, PreviewResponse, ProfileData, ProfileRecord, TemplateRecord};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

/// Backend reached over a JSON-lines TCP connection
///
/// The connection is opened lazily and reused. Requests are sent one at a
/// time; a failed exchange drops the connection and the next call reconnects.
/// Calls are never retried. The timeout bounds the whole call, including
/// waiting for an earlier call to release the connection.
pub struct RpcClient {
    addr: String,
    timeout: Duration,
    conn: Mutex<Option<Connection>>,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: DEFAULT_TIMEOUT,
            conn: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Call a remote method and decode its result
    pub async fn call<T: DeserializeOwned>(&self, method: Method, params: Vec<Value>) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = Request {
            id,
            method: method.as_str().to_string(),
            params,
        };

        // The timeout covers queueing behind other calls as well as the exchange
        let deadline = Instant::now() + self.timeout;
        let Ok(mut conn) = tokio::time::timeout_at(deadline, self.conn.lock()).await else {
            warn!("{} timed out waiting for the connection", method);
            return Err(BackendError::Timeout(self.timeout));
        };

        let exchange = tokio::time::timeout_at(
            deadline,
            Self::exchange(&self.addr, &mut *conn, &request),
        );
        let response = match exchange.await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                *conn = None;
                warn!("{} failed: {}", method, e);
                return Err(e);
            }
            Err(_) => {
                *conn = None;
                warn!("{} timed out after {:?}", method, self.timeout);
                return Err(BackendError::Timeout(self.timeout));
            }
        };

        if response.id != id {
            *conn = None;
            return Err(BackendError::IdMismatch {
                expected: id,
                got: response.id,
            });
        }

        debug!("{} -> ok (id {})", method, id);
        response.into_result()
    }

    async fn exchange(
        addr: &str,
        conn: &mut Option<Connection>,
        request: &Request,
    ) -> Result<Response> {
        if conn.is_none() {
            let stream = TcpStream::connect(addr).await?;
            stream.set_nodelay(true)?;
            let (read, write) = stream.into_split();
            debug!("Connected to backend at {}", addr);
            *conn = Some(Connection {
                reader: BufReader::new(read),
                writer: write,
            });
        }

        let Some(connection) = conn.as_mut() else {
            return Err(BackendError::Closed);
        };

        connection.writer.write_all(&encode_line(request)?).await?;
        connection.writer.flush().await?;

        let mut line = String::new();
        if connection.reader.read_line(&mut line).await? == 0 {
            return Err(BackendError::Closed);
        }

        Ok(serde_json::from_str(line.trim_end())?)
    }
}

#[async_trait]
impl Backend for RpcClient {
    async fn generate_preview(&self, data: &ProfileData) -> Result<PreviewResponse> {
        self.call(Method::GeneratePreview, vec![serde_json::to_value(data)?]).await
    }

    async fn create_profile(&self, data: &ProfileData) -> Result<ActionResponse> {
        self.call(Method::CreateProfile, vec![serde_json::to_value(data)?]).await
    }

    async fn update_profile(&self, data: &ProfileData) -> Result<ActionResponse> {
        self.call(Method::UpdateProfile, vec![serde_json::to_value(data)?]).await
    }

    async fn recover_profile(&self, user_id: &str, data: &ProfileData) -> Result<ActionResponse> {
        self.call(Method::RecoverProfile, vec![json!(user_id), serde_json::to_value(data)?])
            .await
    }

    async fn delete_profile(&self, user_id: &str) -> Result<ActionResponse> {
        self.call(Method::DeleteProfile, vec![json!(user_id)]).await
    }

    async fn search_profiles(&self, term: &str) -> Result<Vec<ProfileRecord>> {
        self.call(Method::SearchProfiles, vec![json!(term)]).await
    }

    async fn get_profile_by_id(&self, user_id: &str) -> Result<Option<ProfileRecord>> {
        self.call(Method::GetProfileById, vec![json!(user_id)]).await
    }

    async fn get_profiles_count(&self) -> Result<u64> {
        self.call(Method::GetProfilesCount, Vec::new()).await
    }

    async fn get_available_fonts(&self) -> Result<Vec<String>> {
        self.call(Method::GetAvailableFonts, Vec::new()).await
    }

    async fn get_available_patterns(&self) -> Result<Vec<String>> {
        self.call(Method::GetAvailablePatterns, Vec::new()).await
    }

    async fn get_templates(&self) -> Result<Vec<TemplateRecord>> {
        self.call(Method::GetTemplates, Vec::new()).await
    }

    async fn save_template(&self, template: &TemplateRecord) -> Result<bool> {
        self.call(Method::SaveTemplate, vec![serde_json::to_value(template)?]).await
    }

    async fn load_template(&self, name: &str) -> Result<Option<TemplateRecord>> {
        self.call(Method::LoadTemplate, vec![json!(name)]).await
    }

    async fn delete_template(&self, name: &str) -> Result<bool> {
        self.call(Method::DeleteTemplate, vec![json!(name)]).await
    }

    async fn preview_template(&self, name: &str) -> Result<PreviewResponse> {
        self.call(Method::PreviewTemplate, vec![json!(name)]).await
    }

    async fn get_30_days_date(&self) -> Result<String> {
        self.call(Method::Get30DaysDate, Vec::new()).await
    }
}
