// src/specs/mod.rs
//! # Page “specs”
//!
//! One module per portal page. Each one encodes *where the data lives in the
//! HTML* and *how to pull it out* of the response lines, using the
//! line-oriented helpers in `core::html`. No markup tree is ever built.
//!
//! ## What lives here
//! - **Pure parsing** of response lines that a `Transport` already fetched.
//! - **Light shaping** into small result types (`TargetListBundle`, a
//!   confirmation string).
//!
//! ## What does **not** live here
//! - **Fetching, fallback and persistence** – `sync` and `observers` decide when
//!   to ask the portal and `store` writes the results.
//!
//! ## Current specs
//! - `target_list` – the target table between the START/END markers.
//! - `observer_response` – the confirmation line the update form answers with.
//!
//! Both are testable offline against captured pages.
//!
//! In short: **`specs` knows how to read the pages.**
pub mod observer_response;
pub mod target_list;
