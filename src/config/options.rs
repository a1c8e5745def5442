// src/config/options.rs
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// Basic-auth pair for the portal. The password never shows up in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self { user: user.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalOptions {
    pub list_url: String,
    pub update_url: String,
    pub timeout: Duration,
    pub credentials: Credentials,
}

impl PortalOptions {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            list_url: s!(TARGET_LIST_URL),
            update_url: s!(UPDATE_OBSERVERS_URL),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            credentials,
        }
    }
}

/// Where a successful fetch gets written. Either, neither or both.
/// The history file doubles as the fallback source when the portal is down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncOptions {
    pub out: Option<PathBuf>,
    pub history: Option<PathBuf>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            out: None,
            history: Some(PathBuf::from(STORE_DIR).join(HISTORY_FILE)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Mode {
    Add,
    Remove,
}

impl Mode {
    pub fn form_field(self) -> &'static str {
        match self {
            Mode::Add => ADD_OBSERVER_FIELD,
            Mode::Remove => DEL_OBSERVER_FIELD,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Add => write!(f, "add"),
            Mode::Remove => write!(f, "remove"),
        }
    }
}

/// What to do when one target in a batch fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Stop at the first failure; later targets are not submitted.
    #[default]
    FailFast,
    /// Record the failure and carry on with the next target.
    ContinueOnError,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateOptions {
    pub mode: Mode,
    pub observer_id: String,
    pub targets: Vec<String>,
    pub policy: BatchPolicy,
}

impl UpdateOptions {
    pub fn new(mode: Mode, observer_id: impl Into<String>, targets: Vec<String>) -> Self {
        Self {
            mode,
            observer_id: observer_id.into(),
            targets,
            policy: BatchPolicy::default(),
        }
    }
}
