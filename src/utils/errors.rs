//! User-Friendly Error Formatting
//!
//! Provides user-friendly error messages with troubleshooting hints
//! for common error scenarios.

use std::fmt::Write;

/// Format error for user consumption
///
/// Takes technical error and produces user-friendly message with
/// troubleshooting steps and context.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    // Header
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        &mut output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(&mut output).ok();

    // Analyze error and provide context
    let error_msg = format!("{:#}", error);

    match classify(&error_msg) {
        ErrorKind::Refused => format_refused_error(&mut output),
        ErrorKind::Network => format_network_error(&mut output),
        ErrorKind::Config => format_config_error(&mut output),
        ErrorKind::Generic => format_generic_error(&mut output),
    }

    // Technical details
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Technical Details:").ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{}", error_msg).ok();
    writeln!(&mut output).ok();

    // Footer with help
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Need Help?").ok();
    writeln!(
        &mut output,
        "  - Run with --verbose for detailed logs: mqtt-pointer -vv"
    )
    .ok();
    writeln!(
        &mut output,
        "  - Point at another broker: mqtt-pointer --broker <host> --port <port>"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();

    output
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    Refused,
    Network,
    Config,
    Generic,
}

fn classify(error_msg: &str) -> ErrorKind {
    let lower = error_msg.to_lowercase();

    if lower.contains("connection refused") && lower.contains("return code") {
        ErrorKind::Refused
    } else if lower.contains("connection refused")
        || lower.contains("timeout")
        || lower.contains("i/o")
        || lower.contains("network")
        || lower.contains("broker")
    {
        ErrorKind::Network
    } else if lower.contains("config") {
        ErrorKind::Config
    } else {
        ErrorKind::Generic
    }
}

fn format_refused_error(output: &mut String) {
    writeln!(output, "Broker Rejected the Connection").ok();
    writeln!(output).ok();
    writeln!(
        output,
        "The broker answered, but refused the MQTT CONNECT request."
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Broker requires authentication").ok();
    writeln!(
        output,
        "     → Check the broker's allow_anonymous / password settings"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  2. Client id rejected").ok();
    writeln!(
        output,
        "     → Remove broker.client_id from the config to use a generated id"
    )
    .ok();
}

fn format_network_error(output: &mut String) {
    writeln!(output, "Broker Unreachable").ok();
    writeln!(output).ok();
    writeln!(output, "Could not open a connection to the MQTT broker.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Broker is not running").ok();
    writeln!(output, "     → Run: systemctl status mosquitto").ok();
    writeln!(output, "     → Or start one: mosquitto -p 1883").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Wrong address or port").ok();
    writeln!(
        output,
        "     → Check broker.host / broker.port in the config file"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  3. Firewall blocking the port").ok();
    writeln!(output, "     → Check: nc -zv <host> 1883").ok();
}

fn format_config_error(output: &mut String) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "The configuration is invalid.").ok();
    writeln!(output).ok();
    writeln!(output, "Check:").ok();
    writeln!(output, "  - TOML syntax of the config file").ok();
    writeln!(output, "  - qos is 0, 1 or 2").ok();
    writeln!(output, "  - publish_topic contains no '+' or '#' wildcards").ok();
    writeln!(output, "  - keep_alive_secs is at least 5").ok();
}

fn format_generic_error(output: &mut String) {
    writeln!(output, "Application Error").ok();
    writeln!(output).ok();
    writeln!(output, "mqtt-pointer stopped because of an unexpected error.").ok();
}
