// tests/sync_fallback.rs
mod common;

use std::fs;

use common::{target_page, ScriptedTransport, ROW_MB, ROW_OB};
use mulens_sync::core::net::NetError;
use mulens_sync::sync::{collect_targets, Source};
use mulens_sync::{Credentials, NameCodec, PortalOptions, SyncOptions};

fn portal() -> PortalOptions {
    let mut portal = PortalOptions::new(Credentials::new("rstreet", "pw"));
    portal.list_url = "http://portal.test/list.cgi".into();
    portal
}

const HISTORY: &str = "\
# Name RA Dec A_0
OB171234 17:50:31.2 -29:43:12 1.52 7912.3 23.4 17.2 0.5 0.0 24.0 high medium 3 LCO:uFUN
MB180042 18:01:02.3 -27:11:40 3.1 8200.1 12.0 16.1 1.2 17.0 6.0 low low 1
KB190007 17:59:00.0 -28:00:00 2.0 8650.5 40.0 18.3 0.1 none 48.0 none low 2 X
";

#[test]
fn online_success_persists_to_out_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("targets.txt");
    let history = dir.path().join(".store").join("target_history.txt");
    fs::create_dir_all(history.parent().unwrap()).unwrap();
    fs::write(&history, "stale contents that must go\n").unwrap();

    let mut transport = ScriptedTransport::new().ok(&[]).ok(&target_page(&[ROW_OB, ROW_MB]));
    let options = SyncOptions { out: Some(out.clone()), history: Some(history.clone()) };
    let report = collect_targets(&mut transport, &portal(), &options, &NameCodec::default(), None);

    assert_eq!(report.source, Source::Online);
    assert_eq!(report.catalogue.keys().collect::<Vec<_>>(), vec!["MB180042", "OB171234"]);
    assert_eq!(report.headers, vec!["Name RA Dec A_0"]);
    assert_eq!(
        report.diagnostics,
        vec!["Logged into target portal as rstreet", "source: online"]
    );

    // GET login check, then an (empty) POST for the list
    assert_eq!(transport.sent.len(), 2);
    assert!(transport.sent[0].form.is_none());
    assert_eq!(transport.sent[1].form, Some(vec![]));
    assert!(transport.sent.iter().all(|s| s.url == "http://portal.test/list.cgi"));

    let expected = "\
# Name RA Dec A_0
MB180042 18:01:02.3 -27:11:40 3.1 8200.1 12.0 16.1 1.2 17.0 6.0 low low 1
OB171234 17:50:31.2 -29:43:12 1.52 7912.3 23.4 17.2 0.5 0.0 24.0 high medium 3 LCO:uFUN
";
    assert_eq!(fs::read_to_string(&out).unwrap(), expected);
    assert_eq!(fs::read_to_string(&history).unwrap(), expected);
}

#[test]
fn remote_failure_reads_history() {
    let dir = tempfile::tempdir().unwrap();
    let history = dir.path().join("history.txt");
    fs::write(&history, HISTORY).unwrap();

    let mut transport = ScriptedTransport::new()
        .ok(&[])
        .fail(NetError::Status("500 Internal Server Error".into()));
    let options = SyncOptions { out: None, history: Some(history.clone()) };
    let report = collect_targets(&mut transport, &portal(), &options, &NameCodec::default(), None);

    assert_eq!(report.source, Source::History(history.clone()));
    assert_eq!(report.catalogue.len(), 3);
    assert_eq!(report.headers, vec!["Name RA Dec A_0"]);
    assert_eq!(
        report.diagnostics,
        vec![
            "Logged into target portal as rstreet".to_string(),
            "Problem requesting target list: HTTP 500 Internal Server Error".to_string(),
            format!("source: {}", history.display()),
        ]
    );

    // fallback data is delivered as read and not written back
    assert_eq!(fs::read_to_string(&history).unwrap(), HISTORY);
}

#[test]
fn auth_failure_with_missing_history_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let history = dir.path().join("missing.txt");

    let mut transport = ScriptedTransport::new().fail(NetError::Unreachable("connection refused".into()));
    let options = SyncOptions { out: None, history: Some(history.clone()) };
    let report = collect_targets(&mut transport, &portal(), &options, &NameCodec::default(), None);

    assert!(report.catalogue.is_empty());
    assert_eq!(report.source, Source::Unavailable);
    assert_eq!(transport.sent.len(), 1, "no list request after a failed login");
    assert_eq!(report.diagnostics.len(), 2);
    assert_eq!(report.diagnostics[0], "Problem logging into target portal: connection refused");
    assert!(report.diagnostics[1].contains("missing.txt"), "{:?}", report.diagnostics);
}

#[test]
fn remote_failure_without_history_is_empty() {
    let mut transport = ScriptedTransport::new().fail(NetError::Unreachable("dns".into()));
    let options = SyncOptions { out: None, history: None };
    let report = collect_targets(&mut transport, &portal(), &options, &NameCodec::default(), None);

    assert!(report.catalogue.is_empty());
    assert!(report.headers.is_empty());
    assert_eq!(report.diagnostics, vec!["Problem logging into target portal: dns"]);
}

#[test]
fn bad_rows_are_reported_and_the_rest_kept() {
    let broken = "<tr><td>OB179999</td><td>17:00:00</td><td>-29:00:00</td></tr>";
    let mut transport = ScriptedTransport::new().ok(&[]).ok(&target_page(&[ROW_OB, broken, ROW_MB]));
    let options = SyncOptions { out: None, history: None };
    let report = collect_targets(&mut transport, &portal(), &options, &NameCodec::default(), None);

    assert_eq!(report.catalogue.len(), 2);
    assert_eq!(report.diagnostics.len(), 3);
    assert!(report.diagnostics[1].starts_with("row parse error (line "), "{:?}", report.diagnostics);
    assert_eq!(report.diagnostics[2], "source: online");
}
