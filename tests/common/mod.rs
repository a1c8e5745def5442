// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::VecDeque;

use mulens_sync::config::options::Credentials;
use mulens_sync::core::net::{NetError, Transport};

/// One request as the portal would have seen it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub url: String,
    pub user: String,
    /// `None` for a GET.
    pub form: Option<Vec<(String, String)>>,
}

/// Plays back queued responses in order and records every request.
/// Runs out → `Unreachable`.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: VecDeque<Result<Vec<String>, NetError>>,
    pub sent: Vec<Sent>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, lines: &[&str]) -> Self {
        self.replies.push_back(Ok(lines.iter().map(|l| l.to_string()).collect()));
        self
    }

    pub fn fail(mut self, err: NetError) -> Self {
        self.replies.push_back(Err(err));
        self
    }

    pub fn posts(&self) -> Vec<&Sent> {
        self.sent.iter().filter(|s| s.form.is_some()).collect()
    }
}

impl Transport for ScriptedTransport {
    fn request(
        &mut self,
        url: &str,
        credentials: &Credentials,
        form: Option<&[(&str, String)]>,
    ) -> Result<Vec<String>, NetError> {
        self.sent.push(Sent {
            url: url.to_string(),
            user: credentials.user.clone(),
            form: form.map(|f| f.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()),
        });
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(NetError::Unreachable("script exhausted".into())))
    }
}

pub const ROW_OB: &str = r#"<tr><td><a href="target.cgi?n=OB171234">OB171234</a></td><td>17:50:31.2</td><td>-29:43:12</td><td>1.52</td><td>7912.3</td><td>23.4</td><td>17.2</td><td>0.5</td><td>None</td><td>24.0</td><td>high</td><td>medium</td><td>3</td><td>LCO<br>uFUN</td></tr>"#;
pub const ROW_MB: &str = r#"<tr><td><a href="target.cgi?n=MB180042">MB180042</a></td><td>18:01:02.3</td><td>-27:11:40</td><td>3.1</td><td>8200.1</td><td>12.0</td><td>16.1</td><td>1.2</td><td>17.0</td><td>6.0</td><td>low</td><td>low</td><td>1</td><td></td></tr>"#;

/// A target list page with `rows` between the markers.
pub fn target_page<'a>(rows: &[&'a str]) -> Vec<&'a str> {
    let mut page = vec![
        "<html><body><table><tr><td>",
        "<!-- START TARGET LIST -->",
        "<table>",
        "<tr><th>Name</th><th>RA</th><th>Dec</th>",
        "<th>A<sub>0</sub></th></tr>",
    ];
    page.extend_from_slice(rows);
    page.push("</table>");
    page.push("<!-- END TARGET LIST -->");
    page.push("</td></tr></table></body></html>");
    page
}

pub fn confirmation_page(text: &str) -> Vec<String> {
    vec![
        "<html><body>".to_string(),
        format!(r#"<h3 style="color:green">{text}</h3>"#),
        "</body></html>".to_string(),
    ]
}
