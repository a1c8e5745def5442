// src/lib.rs
//! Keep a microlensing target catalogue in step with its coordination portal.
//!
//! - [`sync::collect_targets`] fetches the target list (or falls back to the
//!   last snapshot) and persists it.
//! - [`observers::update_observer_list`] adds or removes an observer on a
//!   batch of targets.
//!
//! Both talk to the portal through [`crate::core::net::Transport`].

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod log;
pub mod names;
pub mod observers;
pub mod progress;
pub mod specs;
pub mod store;
pub mod sync;
pub mod target;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::options::{BatchPolicy, Credentials, Mode, PortalOptions, SyncOptions, UpdateOptions};
pub use error::SyncError;
pub use names::NameCodec;
pub use sync::{Source, SyncReport};
pub use target::{Catalogue, Field, FieldKind, FieldValue, Target};
