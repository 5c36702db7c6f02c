//! `From` implementations bridging `helio_config` types to `helio_core` types.

use crate::poller::PollerCfg;
use std::time::Duration;

impl From<&helio_config::Network> for PollerCfg {
    fn from(c: &helio_config::Network) -> Self {
        Self {
            interval: Duration::from_millis(c.poll_ms),
            http_timeout: Duration::from_millis(c.http_timeout_ms),
            data_path: c.data_path.clone(),
        }
    }
}
