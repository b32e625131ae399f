//! RPC server exposing a `Backend` over JSON lines

use crate::rpc::{encode_line, param, Method, Request, Response};
use crate::{Backend, BackendError, Result};
use badge_core::{ProfileData, TemplateRecord};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

/// Serves one backend to any number of clients
pub struct RpcServer {
    listener: TcpListener,
    backend: Arc<dyn Backend>,
}

impl RpcServer {
    /// Bind to `addr` (use port 0 for an ephemeral port)
    pub async fn bind(addr: &str, backend: Arc<dyn Backend>) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, backend })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the task is dropped
    pub async fn serve(self) -> Result<()> {
        info!("Backend listening on {}", self.local_addr()?);

        loop {
            let (stream, peer) = self.listener.accept().await?;
            let backend = Arc::clone(&self.backend);

            tokio::spawn(async move {
                debug!("Client connected: {}", peer);
                if let Err(e) = handle_connection(stream, backend).await {
                    warn!("Connection {} ended with error: {}", peer, e);
                } else {
                    debug!("Client disconnected: {}", peer);
                }
            });
        }
    }
}

async fn handle_connection(stream: TcpStream, backend: Arc<dyn Backend>) -> Result<()> {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let id = request.id;
                match dispatch(backend.as_ref(), &request.method, request.params).await {
                    Ok(result) => Response::ok(id, result),
                    Err(e) => {
                        warn!("{} failed: {}", request.method, e);
                        Response::err(id, e.to_string())
                    }
                }
            }
            // No id to answer to; report against id 0 and keep the connection
            Err(e) => Response::err(0, BackendError::from(e).to_string()),
        };

        write.write_all(&encode_line(&response)?).await?;
    }

    Ok(())
}

/// Route one request to the backend and serialize its result
pub async fn dispatch(backend: &dyn Backend, method: &str, params: Vec<Value>) -> Result<Value> {
    let method: Method = method.parse()?;

    let value = match method {
        Method::GeneratePreview => {
            let data: ProfileData = param(method, &params, 0)?;
            serde_json::to_value(backend.generate_preview(&data).await?)?
        }
        Method::CreateProfile => {
            let data: ProfileData = param(method, &params, 0)?;
            serde_json::to_value(backend.create_profile(&data).await?)?
        }
        Method::UpdateProfile => {
            let data: ProfileData = param(method, &params, 0)?;
            serde_json::to_value(backend.update_profile(&data).await?)?
        }
        Method::RecoverProfile => {
            let user_id: String = param(method, &params, 0)?;
            // The profile payload is optional for recover
            let data: ProfileData = match params.get(1) {
                Some(Value::Null) | None => ProfileData::default(),
                Some(_) => param(method, &params, 1)?,
            };
            serde_json::to_value(backend.recover_profile(&user_id, &data).await?)?
        }
        Method::DeleteProfile => {
            let user_id: String = param(method, &params, 0)?;
            serde_json::to_value(backend.delete_profile(&user_id).await?)?
        }
        Method::SearchProfiles => {
            let term: String = param(method, &params, 0)?;
            serde_json::to_value(backend.search_profiles(&term).await?)?
        }
        Method::GetProfileById => {
            let user_id: String = param(method, &params, 0)?;
            serde_json::to_value(backend.get_profile_by_id(&user_id).await?)?
        }
        Method::GetProfilesCount => serde_json::to_value(backend.get_profiles_count().await?)?,
        Method::GetAvailableFonts => serde_json::to_value(backend.get_available_fonts().await?)?,
        Method::GetAvailablePatterns => {
            serde_json::to_value(backend.get_available_patterns().await?)?
        }
        Method::GetTemplates => serde_json::to_value(backend.get_templates().await?)?,
        Method::SaveTemplate => {
            let template: TemplateRecord = param(method, &params, 0)?;
            serde_json::to_value(backend.save_template(&template).await?)?
        }
        Method::LoadTemplate => {
            let name: String = param(method, &params, 0)?;
            serde_json::to_value(backend.load_template(&name).await?)?
        }
        Method::DeleteTemplate => {
            let name: String = param(method, &params, 0)?;
            serde_json::to_value(backend.delete_template(&name).await?)?
        }
        Method::PreviewTemplate => {
            let name: String = param(method, &params, 0)?;
            serde_json::to_value(backend.preview_template(&name).await?)?
        }
        Method::Get30DaysDate => serde_json::to_value(backend.get_30_days_date().await?)?,
    };

    Ok(value)
}
