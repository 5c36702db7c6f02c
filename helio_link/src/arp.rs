//! Host ARP table access via the platform `arp` utility.

use crate::error::LinkError;
use helio_traits::ArpScan;
use std::process::Command;

/// Runs `arp -a` and returns its stdout verbatim.
///
/// The listing format is platform-specific; matching and address extraction
/// happen in `helio_core::net`, this adapter only captures the text.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemArpTable;

impl SystemArpTable {
    pub fn new() -> Self {
        Self
    }
}

impl ArpScan for SystemArpTable {
    fn table(&mut self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let out = Command::new("arp").arg("-a").output().map_err(|e| {
            Box::new(LinkError::Command {
                command: "arp -a".to_string(),
                reason: e.to_string(),
            }) as Box<dyn std::error::Error + Send + Sync>
        })?;
        if !out.status.success() {
            return Err(Box::new(LinkError::Command {
                command: "arp -a".to_string(),
                reason: format!("exited with {}", out.status),
            }));
        }
        // Tooling output may carry odd bytes on some platforms; a lossy view
        // is fine since we only substring-match it.
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}
