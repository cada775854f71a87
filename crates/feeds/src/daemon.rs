//! Wallet daemon queries through its command-line client.

use crate::command::{program_name, run_command};
use crate::error::{FeedError, FeedResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use stake_core::{StakingInfo, WalletInfo};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

/// Source of wallet and staking status.
#[async_trait]
pub trait WalletSource: Send + Sync {
    /// `getwalletinfo`
    async fn wallet_info(&self) -> FeedResult<WalletInfo>;

    /// `getstakinginfo`
    async fn staking_info(&self) -> FeedResult<StakingInfo>;

    /// Name used when reporting failures to the operator.
    fn name(&self) -> String;
}

/// Queries a running daemon by invoking its CLI binary, e.g. `qtum-cli getwalletinfo`.
#[derive(Debug, Clone)]
pub struct DaemonCli {
    program: PathBuf,
}

impl DaemonCli {
    pub const DEFAULT_CLI: &'static str = "qtum-cli";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate the CLI under a daemon install prefix: `<prefix>/bin/qtum-cli`.
    pub fn from_install_path(prefix: impl AsRef<Path>) -> Self {
        Self::new(prefix.as_ref().join("bin").join(Self::DEFAULT_CLI))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    async fn query<T: DeserializeOwned>(&self, method: &str) -> FeedResult<T> {
        let stdout = run_command(&self.program, &[method]).await?;
        serde_json::from_str(&stdout).map_err(|e| {
            FeedError::ParseError(format!("{} {}: {}", program_name(&self.program), method, e))
        })
    }
}

#[async_trait]
impl WalletSource for DaemonCli {
    async fn wallet_info(&self) -> FeedResult<WalletInfo> {
        self.query("getwalletinfo").await
    }

    async fn staking_info(&self) -> FeedResult<StakingInfo> {
        self.query("getstakinginfo").await
    }

    fn name(&self) -> String {
        program_name(&self.program)
    }
}

/// Mock wallet source for testing. `None` answers fail like an unreachable daemon.
#[derive(Debug, Default)]
pub struct MockWalletSource {
    wallet: Option<WalletInfo>,
    staking: Option<StakingInfo>,
    queries: AtomicU32,
}

impl MockWalletSource {
    pub fn new(wallet: WalletInfo, staking: StakingInfo) -> Self {
        Self {
            wallet: Some(wallet),
            staking: Some(staking),
            queries: AtomicU32::new(0),
        }
    }

    /// A source whose every query fails.
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn without_staking_info(mut self) -> Self {
        self.staking = None;
        self
    }

    /// Number of queries answered or failed so far.
    pub fn query_count(&self) -> u32 {
        self.queries.load(Ordering::SeqCst)
    }

    fn unreachable_error(method: &str) -> FeedError {
        FeedError::NonZeroExit {
            command: format!("mock-cli {}", method),
            status: "1".to_string(),
            stderr: "error: couldn't connect to server".to_string(),
        }
    }
}

#[async_trait]
impl WalletSource for MockWalletSource {
    async fn wallet_info(&self) -> FeedResult<WalletInfo> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.wallet
            .clone()
            .ok_or_else(|| Self::unreachable_error("getwalletinfo"))
    }

    async fn staking_info(&self) -> FeedResult<StakingInfo> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.staking
            .clone()
            .ok_or_else(|| Self::unreachable_error("getstakinginfo"))
    }

    fn name(&self) -> String {
        "mock-cli".to_string()
    }
}
