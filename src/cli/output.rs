//! CLI output formatting utilities

use colored::Colorize;
use std::path::Path;

use crate::config::{ConfigWarning, LoadMode};
use crate::portainer::ApiResponse;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "Error:".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "Warning:".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print the startup banner
pub fn banner(now: chrono::DateTime<chrono::Local>, dir: &Path) {
    println!(
        "Running on {} at {}",
        now.format("%Y-%m-%d %H:%M:%S").to_string().bright_cyan(),
        dir.display().to_string().bright_cyan()
    );
}

/// Report how the environment was assembled
pub fn load_mode(mode: &LoadMode, path: &Path) {
    match mode {
        LoadMode::Local => warn(&format!(
            "Found {}. {}",
            path.display(),
            "Running in local mode.".yellow()
        )),
        LoadMode::Container => println!(
            "No {} file found. {}",
            path.display(),
            "Running in container mode.".red()
        ),
        LoadMode::Degraded(e) => warn(&format!(
            "{}. {}",
            e,
            "Running in container mode.".red()
        )),
    }
}

/// Report a defaulted optional variable
pub fn config_warning(warning: &ConfigWarning) {
    warn(&format!("Missing environment variable: '{}'", warning.var));
    println!(
        "Since this variable is not required, the script will continue without it. Defaulting to {}",
        warning.default
    );
}

/// Status line of an API call: "OK" on 200, the raw body otherwise
pub fn status_line(response: &ApiResponse) -> String {
    let detail = if response.is_ok() {
        "OK"
    } else {
        response.body.as_str()
    };
    format!("\t({}, {})", response.status.as_u16(), detail)
}

/// Attached-networks summary line
pub fn networks_line(container: &str, networks: &[&str]) -> String {
    format!(
        "{} networks found for container: {}: {}",
        networks.len().to_string().magenta(),
        container.magenta(),
        networks.join(", ")
    )
}
