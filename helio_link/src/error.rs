use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("open {port}: {reason}")]
    Open { port: String, reason: String },
    #[error("line is not valid utf-8: {0}")]
    Decode(String),
    #[error("{command} failed: {reason}")]
    Command { command: String, reason: String },
    #[error("http: {0}")]
    Http(String),
    #[error("http status {0}")]
    Status(u16),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LinkError>;
