//! FILENAME: app/src/logging.rs
// PURPOSE: Category-tagged logging for the application layer.
// CONTEXT: Messages go to the `log` facade with the category as target, so
// the host picks the logger and can filter by category ("SESSION", "PIVOT",
// "CHART", "EXPORT").

use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// SEQUENCED LOG LINES
// ============================================================================

/// Global sequence counter so interleaved lines can be re-ordered.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Maps the single-letter level used by the macros onto `log::Level`.
pub fn level_for(level: &str) -> log::Level {
    match level {
        "E" => log::Level::Error,
        "W" => log::Level::Warn,
        "I" => log::Level::Info,
        "T" => log::Level::Trace,
        _ => log::Level::Debug,
    }
}

/// Formats one log line body: `[seq] message`.
pub fn format_line(seq: u64, message: &str) -> String {
    format!("[{}] {}", seq, message)
}

pub fn write_log(level: &str, category: &str, message: &str) {
    let level = level_for(level);
    if log::log_enabled!(target: category, level) {
        log::log!(target: category, level, "{}", format_line(next_seq(), message));
    }
}

pub fn write_log_enter(level: &str, category: &str, func_name: &str, params: &str) {
    if params.is_empty() {
        write_log(level, category, &format!("ENTER {}", func_name));
    } else {
        write_log(level, category, &format!("ENTER {} | {}", func_name, params));
    }
}

pub fn write_log_exit(level: &str, category: &str, func_name: &str, result: &str) {
    if result.is_empty() {
        write_log(level, category, &format!("EXIT {}", func_name));
    } else {
        write_log(level, category, &format!("EXIT {} | {}", func_name, result));
    }
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("D", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("I", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("W", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("E", $cat, &format!($($arg)*))
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter("D", $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter("D", $cat, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit("D", $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit("D", $cat, $func, &format!($($arg)*))
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_info;`
pub use log_debug;
pub use log_info;
pub use log_warn;
pub use log_error;
pub use log_enter;
pub use log_exit;
