//! MAC → IPv4 resolution over ARP listing text.

use helio_config::MacAddr;
use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

#[allow(clippy::expect_used)]
fn ipv4_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("hard-coded pattern"))
}

/// Scan an ARP listing for the line carrying `mac` and pull the first
/// dotted-quad out of it.
///
/// Matching is case-insensitive and separator-agnostic (`-` and `:` MACs
/// compare equal, Windows prints dashes). The first matching line decides:
/// if it carries no parsable quad, resolution fails rather than scanning on.
pub fn resolve_ipv4(table: &str, mac: &MacAddr) -> Option<Ipv4Addr> {
    let needle = mac.normalized();
    for line in table.lines() {
        let hay = line.to_ascii_lowercase().replace('-', ":");
        if !hay.contains(&needle) {
            continue;
        }
        let hit = ipv4_re().find(line)?;
        return hit.as_str().parse().ok();
    }
    None
}
