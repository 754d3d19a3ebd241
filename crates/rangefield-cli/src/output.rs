//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use rangefield::RangeError;
use serde::Serialize;
use std::io::IsTerminal;

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(std::io::stdout().is_terminal()),
    }
}

/// Print a value as JSON
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}

/// Format an error for display, tagged with its code when it is a range error
pub fn format_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<RangeError>() {
        Some(range_error) => {
            let diag = range_error.to_diagnostic();
            let header = format!("{}[{}]:", diag.severity, diag.code);
            let mut out = format!("{} {:#}", header.red().bold(), error);
            if let Some(help) = diag.help {
                out.push_str(&format!("\n  {} {}", "help:".cyan(), help));
            }
            out
        }
        None => format!("{} {:#}", "Error:".red().bold(), error),
    }
}
