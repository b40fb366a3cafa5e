#![deny(missing_docs)]
//! Shared logging utilities for the results workspace.
//!
//! This crate provides the `results_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every message is tagged
//! with the content-update cycle that was current on the logging thread, so the
//! interleaving of superseded and live cycles can be read back from a log.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the current content-update cycle.
    static CYCLE: Cell<u64> = const { Cell::new(0) };
}

/// Sets the content-update cycle for the current thread.
/// The controller calls this after every dispatched message.
pub fn set_cycle(cycle: u64) {
    CYCLE.with(|v| v.set(cycle));
}

/// Retrieves the content-update cycle for the current thread.
/// Returns 0 before the first cycle has started.
pub fn current_cycle() -> u64 {
    CYCLE.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current cycle.
#[macro_export]
macro_rules! results_trace {
    ($($arg:tt)*) => {{
        log::trace!("[cycle {}] {}", $crate::current_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current cycle.
#[macro_export]
macro_rules! results_debug {
    ($($arg:tt)*) => {{
        log::debug!("[cycle {}] {}", $crate::current_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current cycle.
#[macro_export]
macro_rules! results_info {
    ($($arg:tt)*) => {{
        log::info!("[cycle {}] {}", $crate::current_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current cycle.
#[macro_export]
macro_rules! results_warn {
    ($($arg:tt)*) => {{
        log::warn!("[cycle {}] {}", $crate::current_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current cycle.
#[macro_export]
macro_rules! results_error {
    ($($arg:tt)*) => {{
        log::error!("[cycle {}] {}", $crate::current_cycle(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already own the global logger.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
