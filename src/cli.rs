// src/cli.rs
//! Command-line front end.
//!
//! Without `--target-id` the run synchronizes the catalogue; with
//! `--target-id`, `--observer-id` and `--mode` it updates observer lists.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use tracing::info;

use crate::config::consts::{EVENT_NUMBER_LEN, REQUEST_TIMEOUT_SECS, TARGET_LIST_URL, UPDATE_OBSERVERS_URL};
use crate::config::options::{BatchPolicy, Credentials, Mode, PortalOptions, SyncOptions, UpdateOptions};
use crate::core::net::HttpTransport;
use crate::names::NameCodec;
use crate::progress::Progress;
use crate::sync::{self, Source};
use crate::{log, observers, store};

#[derive(Debug, Parser)]
#[command(name = "mulens_sync", version)]
#[command(about = "Sync the microlensing target list and manage observer lists on the portal")]
pub struct Args {
    /// Portal user name (prompted for when missing)
    #[arg(short = 'u', long, env = "MULENS_USER")]
    pub user: Option<String>,

    /// Portal password (prompted for when missing)
    #[arg(short = 'p', long = "pass", env = "MULENS_PASS", hide_env_values = true)]
    pub pass: Option<String>,

    /// Also write the catalogue to this file
    #[arg(short = 'o', long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Last-known-good snapshot; written after a fetch, read when the portal is down
    /// [default: .store/target_history.txt]
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,

    /// Neither write nor fall back to the history file
    #[arg(long, conflicts_with = "history")]
    pub no_history: bool,

    /// Print only the catalogue, no diagnostics or progress
    #[arg(long)]
    pub catalogue_only: bool,

    /// Target to update, short (OB171234) or long (OGLE-2017-BLG-1234) form; repeatable
    #[arg(short = 't', long = "target-id", value_name = "NAME", requires_all = ["observer_id", "mode"])]
    pub target_ids: Vec<String>,

    /// Observer to add to or remove from each target
    #[arg(long, value_name = "ID", requires_all = ["target_ids", "mode"])]
    pub observer_id: Option<String>,

    #[arg(long, value_enum, ignore_case = true, requires_all = ["target_ids", "observer_id"])]
    pub mode: Option<Mode>,

    /// Keep submitting after a target fails
    #[arg(long)]
    pub keep_going: bool,

    /// Digits in the event number of short names
    #[arg(long, value_name = "N", default_value_t = EVENT_NUMBER_LEN)]
    pub event_digits: usize,

    #[arg(long, value_name = "URL", default_value = TARGET_LIST_URL)]
    pub list_url: String,

    #[arg(long, value_name = "URL", default_value = UPDATE_OBSERVERS_URL)]
    pub update_url: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Debug-level entries in the log file
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            out: self.out.clone(),
            history: if self.no_history {
                None
            } else {
                self.history.clone().or(SyncOptions::default().history)
            },
        }
    }

    fn portal_options(&self, credentials: Credentials) -> PortalOptions {
        let mut portal = PortalOptions::new(credentials);
        portal.list_url = self.list_url.clone();
        portal.update_url = self.update_url.clone();
        portal.timeout = std::time::Duration::from_secs(self.timeout);
        portal
    }

    fn update_options(&self) -> Option<UpdateOptions> {
        let mode = self.mode?;
        let observer = self.observer_id.as_deref()?;
        let mut update = UpdateOptions::new(mode, observer, self.target_ids.clone());
        if self.keep_going {
            update.policy = BatchPolicy::ContinueOnError;
        }
        Some(update)
    }
}

pub fn run(args: Args) -> Result<()> {
    if let Err(e) = log::init(&store::debug_log_path(), args.verbose) {
        eprintln!("Warning: logging disabled ({e})");
    }
    info!("mulens_sync {} starting", env!("CARGO_PKG_VERSION"));

    let credentials = resolve_credentials(args.user.clone(), args.pass.clone())?;
    let portal = args.portal_options(credentials);
    let codec = NameCodec::new(args.event_digits);
    let mut transport = HttpTransport::new(portal.timeout)?;

    let mut console = ConsoleProgress::default();
    let progress: Option<&mut dyn Progress> = if args.catalogue_only { None } else { Some(&mut console) };

    match args.update_options() {
        Some(update) => {
            let lines = observers::update_observer_list(&mut transport, &portal, &update, &codec, progress);
            for line in lines {
                println!("{line}");
            }
        }
        None => {
            let options = args.sync_options();
            let report = sync::collect_targets(&mut transport, &portal, &options, &codec, progress);
            if !args.catalogue_only {
                for line in &report.diagnostics {
                    eprintln!("{line}");
                }
            }
            if prints_catalogue(&options, args.catalogue_only, &report.source) {
                print!("{}", store::render_snapshot(&report.headers, &report.catalogue));
            }
        }
    }
    Ok(())
}

/// `--out` only receives online results, so anything else still goes to stdout.
fn prints_catalogue(options: &SyncOptions, catalogue_only: bool, source: &Source) -> bool {
    catalogue_only || options.out.is_none() || *source != Source::Online
}

fn resolve_credentials(user: Option<String>, pass: Option<String>) -> Result<Credentials> {
    let theme = ColorfulTheme::default();
    let user = match user {
        Some(u) => u,
        None => Input::<String>::with_theme(&theme).with_prompt("Username").interact_text()?,
    };
    let password = match pass {
        Some(p) => p,
        None => Password::with_theme(&theme).with_prompt("Password").interact()?,
    };
    Ok(Credentials::new(user, password))
}

/// Per-target progress on stderr; stdout is kept for results.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    seen: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.seen = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, name: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {name}", self.seen, self.total);
    }

    fn item_failed(&mut self, name: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {name} failed", self.seen, self.total);
    }
}
