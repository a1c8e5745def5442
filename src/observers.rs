// src/observers.rs
//! Add or remove one observer on a batch of targets through the portal's
//! update form.
//!
//! One login check, then one POST per target, strictly in input order. Every
//! outcome (confirmation, failure, odd response) is one diagnostic line.

use tracing::{debug, info, warn};

use crate::config::options::{BatchPolicy, PortalOptions, UpdateOptions};
use crate::core::net::Transport;
use crate::error::SyncError;
use crate::names::NameCodec;
use crate::progress::Progress;
use crate::specs::observer_response;

/// Form value the portal expects: `OGLE-2017-BLG-1234_LCO`.
pub fn mutation_key(long_name: &str, observer_id: &str) -> String {
    join!(long_name, "_", observer_id)
}

pub fn update_observer_list(
    transport: &mut dyn Transport,
    portal: &PortalOptions,
    update: &UpdateOptions,
    codec: &NameCodec,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<String> {
    let mut diagnostics: Vec<String> = Vec::new();
    let observer = update.observer_id.trim();
    if observer.is_empty() {
        diag!(diagnostics, "{}", SyncError::Usage(s!("an observer id is required")));
        return diagnostics;
    }

    let credentials = &portal.credentials;
    if let Err(e) = transport.request(&portal.update_url, credentials, None) {
        diag!(diagnostics, "{}", SyncError::Authentication(e));
        return diagnostics;
    }
    diag!(diagnostics, "Logged into target portal as {}", credentials.user);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(update.targets.len());
    }
    info!(
        "{} observer {observer} for {} target(s), {:?}",
        update.mode,
        update.targets.len(),
        update.policy
    );

    for name in &update.targets {
        let outcome = submit_one(transport, portal, update, codec, name, observer);
        match outcome {
            Ok(line) => {
                diag!(diagnostics, "{line}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(name);
                }
            }
            Err(e) => {
                warn!("{name}: {e}");
                diag!(diagnostics, "{e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(name);
                }
                if update.policy == BatchPolicy::FailFast {
                    debug!("stopping batch after failure on {name}");
                    break;
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    diagnostics
}

/// One target's submission. `Ok` carries the line to report, which may be the
/// unexpected-output message: the portal answered, so the batch goes on.
fn submit_one(
    transport: &mut dyn Transport,
    portal: &PortalOptions,
    update: &UpdateOptions,
    codec: &NameCodec,
    name: &str,
    observer: &str,
) -> Result<String, SyncError> {
    let long = codec
        .canonical_long(name.trim())
        .ok_or_else(|| SyncError::UnrecognizedTargetName(s!(name)))?;

    let key = mutation_key(&long, observer);
    debug!("{} = {key}", update.mode.form_field());
    let form = [(update.mode.form_field(), key)];

    let page = transport
        .request(&portal.update_url, &portal.credentials, Some(&form))
        .map_err(|source| SyncError::Submission { target: long.clone(), source })?;

    Ok(match observer_response::confirmation(&page) {
        Some(text) => text,
        None => {
            warn!("{long}: no confirmation in {} line(s) of response", page.len());
            SyncError::UnrecognizedObserverResponse.to_string()
        }
    })
}
