use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum HelioError {
    #[error("open failed: {0}")]
    Open(String),
    #[error("link error: {0}")]
    Link(String),
    #[error("line is not valid utf-8: {0}")]
    Decode(String),
    #[error("malformed payload: {0}")]
    Payload(String),
    #[error("no ARP entry for {0}")]
    ArpMiss(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("invalid state: {0}")]
    State(String),
    #[error("timeout waiting for device")]
    Timeout,
}

/// Map a boxed adapter error to a typed `HelioError`, with precise handling
/// for `helio_link` errors when the `link-errors` feature is on.
pub fn classify_link_error(e: &(dyn std::error::Error + 'static)) -> HelioError {
    #[cfg(feature = "link-errors")]
    if let Some(le) = e.downcast_ref::<helio_link::LinkError>() {
        use helio_link::LinkError;
        return match le {
            LinkError::Open { port, reason } => HelioError::Open(format!("{port}: {reason}")),
            LinkError::Decode(s) => HelioError::Decode(s.clone()),
            LinkError::Http(s) => HelioError::Http(s.clone()),
            LinkError::Status(code) => HelioError::Http(format!("status {code}")),
            LinkError::Command { command, reason } => {
                HelioError::Link(format!("{command}: {reason}"))
            }
            LinkError::Io(io) => HelioError::Link(io.to_string()),
        };
    }
    let s = e.to_string();
    if s.to_lowercase().contains("timeout") {
        HelioError::Timeout
    } else {
        HelioError::Link(s)
    }
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
