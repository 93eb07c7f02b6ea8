//! Tongue mobility self-assessment wizard.
//!
//! A desktop application that walks through a fixed sequence of instruction
//! and webcam capture screens, crops each photo on-device, and renders a
//! comparison report that can be exported as an image. Nothing leaves the
//! machine.

// Hide console window on Windows for GUI mode
#![cfg_attr(windows, windows_subsystem = "windows")]

mod camera;
mod config;
mod crop;
mod export;
mod gui;
mod paths;
mod wizard;

use anyhow::{anyhow, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("tongue_check.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}", location, msg);
        eprintln!("{}", log_msg);
        log(&log_msg);
    }));

    // Ensure output directories exist
    paths::ensure_directories()?;

    // Load configuration
    config::init_config();

    log("Starting assessment wizard...");
    match gui::run_gui() {
        Ok(()) => {
            log("Wizard exited normally");
            Ok(())
        }
        Err(e) => {
            log(&format!("GUI error: {}", e));
            Err(anyhow!("GUI error: {}", e))
        }
    }
}
