// src/core/net.rs
// One basic-auth request per call, no cookies, no retries.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::options::Credentials;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("{0}")]
    Unreachable(String),
    #[error("HTTP {0}")]
    Status(String),
    #[error("unreadable response body: {0}")]
    Body(String),
}

/// The portal as the core sees it: send one request, get the page back as lines.
///
/// `form: None` is a plain GET (used to check the credentials);
/// `Some(fields)` POSTs them url-encoded, even when empty.
pub trait Transport {
    fn request(
        &mut self,
        url: &str,
        credentials: &Credentials,
        form: Option<&[(&str, String)]>,
    ) -> Result<Vec<String>, NetError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, NetError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mulens_sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NetError::Unreachable(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn request(
        &mut self,
        url: &str,
        credentials: &Credentials,
        form: Option<&[(&str, String)]>,
    ) -> Result<Vec<String>, NetError> {
        let builder = match form {
            None => {
                debug!("GET {url}");
                self.client.get(url)
            }
            Some(fields) => {
                debug!("POST {url} ({} field(s))", fields.len());
                self.client.post(url).form(fields)
            }
        };

        let resp = builder
            .basic_auth(&credentials.user, Some(&credentials.password))
            .send()
            .map_err(|e| NetError::Unreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NetError::Status(status.to_string()));
        }

        let body = resp.text().map_err(|e| NetError::Body(e.to_string()))?;
        Ok(split_lines(&body))
    }
}

pub fn split_lines(body: &str) -> Vec<String> {
    body.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_drops_crlf() {
        let lines = split_lines("<html>\r\n<body>\r\n</html>");
        assert_eq!(lines, vec!["<html>", "<body>", "</html>"]);
    }

    #[test]
    fn status_error_reads_like_a_reason() {
        let e = NetError::Status(s!("401 Unauthorized"));
        assert_eq!(e.to_string(), "HTTP 401 Unauthorized");
    }
}
