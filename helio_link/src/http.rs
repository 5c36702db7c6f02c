//! Blocking HTTP client for the polling path.

use crate::error::{LinkError, Result};
use helio_traits::HttpGet;
use std::time::Duration;

/// Thin wrapper over a shared `reqwest::blocking::Client`.
///
/// The per-request timeout comes from the caller so a config reload does
/// not require rebuilding the client.
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| LinkError::Http(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpGet for HttpClient {
    fn get(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let resp = match self.client.get(url).timeout(timeout).send() {
            Ok(r) => r,
            Err(e) => return Err(Box::new(LinkError::Http(e.to_string()))),
        };
        let status = resp.status();
        if !status.is_success() {
            return Err(Box::new(LinkError::Status(status.as_u16())));
        }
        match resp.text() {
            Ok(body) => Ok(body),
            Err(e) => Err(Box::new(LinkError::Http(e.to_string()))),
        }
    }
}
