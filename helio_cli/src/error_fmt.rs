//! Human-readable error descriptions and structured JSON error formatting.

use helio_core::HelioError;

/// Stable kind name for structured output.
pub fn kind_name(e: &HelioError) -> &'static str {
    match e {
        HelioError::Open(_) => "Open",
        HelioError::Link(_) => "Link",
        HelioError::Decode(_) => "Decode",
        HelioError::Payload(_) => "Payload",
        HelioError::ArpMiss(_) => "ArpMiss",
        HelioError::Http(_) => "Http",
        HelioError::State(_) => "State",
        HelioError::Timeout => "Timeout",
    }
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(he) = err.downcast_ref::<HelioError>() {
        return match he {
            HelioError::Open(detail) => format!(
                "What happened: The serial port could not be opened ({detail}).\nLikely causes: Wrong device path, the port is held by another program, or missing permissions.\nHow to fix: Run `helio_cli ports` to list devices, close other serial monitors, and check group membership (dialout on Linux)."
            ),
            HelioError::Decode(detail) => format!(
                "What happened: The device sent a line that is not valid UTF-8 ({detail}).\nLikely causes: Baud-rate mismatch scrambling bytes, or line noise.\nHow to fix: Match --baud to the tracker firmware setting and reconnect."
            ),
            HelioError::Payload(detail) => format!(
                "What happened: A payload was not valid JSON ({detail}).\nLikely causes: Firmware debug output interleaved with telemetry, or a truncated line.\nHow to fix: Nothing on this side; the displayed values keep their previous state."
            ),
            HelioError::ArpMiss(mac) => format!(
                "What happened: No ARP entry found for {mac}.\nLikely causes: The tracker is offline, on a different network segment, or has not talked recently.\nHow to fix: Verify the MAC in the config, and ping the device once so the ARP cache learns it."
            ),
            HelioError::Http(detail) => format!(
                "What happened: The telemetry request failed ({detail}).\nLikely causes: Device rebooting, wrong endpoint path, or a firewall in between.\nHow to fix: Nothing immediate; the next poll tick retries from scratch. Check [network].data_path if it persists."
            ),
            HelioError::State(detail) => format!(
                "What happened: Invalid acquisition state ({detail}).\nLikely causes: One acquisition path is already running.\nHow to fix: Stop the active path before starting the other."
            ),
            HelioError::Timeout => "What happened: The device did not answer within the timeout.\nLikely causes: Device powered off or wiring issue.\nHow to fix: Check power and cabling; consider raising the timeout in the config.".to_string(),
            HelioError::Link(detail) => format!(
                "What happened: The device link failed ({detail}).\nLikely causes: Cable unplugged or the adapter vanished.\nHow to fix: Reconnect the device and start the acquisition again."
            ),
        };
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("serial.baud") {
        return format!(
            "What happened: Unsupported baud rate.\nHow to fix: Pick one of the supported rates. Original: {msg}"
        );
    }
    if lower.contains("mac") && (lower.contains("octet") || lower.contains("6")) {
        return format!(
            "What happened: The MAC address did not parse.\nHow to fix: Use six two-digit hex octets, `:` or `-` separated. Original: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Map HelioError kinds (if present) to stable exit codes; other errors return 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(he) = err.downcast_ref::<HelioError>() {
        return match he {
            HelioError::State(_) => 2,
            HelioError::Open(_) => 3,
            HelioError::Decode(_) => 4,
            HelioError::ArpMiss(_) | HelioError::Http(_) => 5,
            HelioError::Timeout => 6,
            _ => 1,
        };
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = err
        .downcast_ref::<HelioError>()
        .map_or("Error", kind_name);
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}
