//! Common utilities for integration tests

pub mod cli;

use backend::{LoopbackBackend, RpcServer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::runtime::Runtime;

/// An in-memory backend served over RPC plus a config file pointing at it
pub struct TestBackend {
    _runtime: Runtime,
    dir: TempDir,
    config_path: PathBuf,
    pub addr: String,
}

impl TestBackend {
    pub fn start() -> anyhow::Result<Self> {
        let runtime = Runtime::new()?;
        let backend = Arc::new(LoopbackBackend::new());

        let server = runtime.block_on(RpcServer::bind("127.0.0.1:0", backend))?;
        let addr = server.local_addr()?.to_string();
        runtime.spawn(server.serve());

        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("config.toml");
        write_config(&config_path, &addr)?;

        Ok(Self {
            _runtime: runtime,
            dir,
            config_path,
            addr,
        })
    }

    pub fn config(&self) -> &Path {
        &self.config_path
    }

    /// Scratch directory for files the test creates
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

pub fn write_config(path: &Path, addr: &str) -> anyhow::Result<()> {
    let config = format!(
        "[backend]\naddress = \"{}\"\nrequest_timeout_ms = 5000\n\n[log]\nlevel = \"warn\"\n",
        addr
    );
    std::fs::write(path, config)?;
    Ok(())
}
