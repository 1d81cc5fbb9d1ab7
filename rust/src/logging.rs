//! Verbosity-gated diagnostics for the planning engine.
//!
//! Everything goes to stderr and nothing is printed at the default level, so
//! callers that want a silent core simply leave verbosity at 0.
//! - 0: SILENT
//! - 1: CHANGES (dates assigned, durations rescaled, chains injected)
//! - 2: CHECKS (queue releases, dropped dependency titles, view filtering)
//! - 3: DEBUG (per-task scoring terms, in-degree tables)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Whether a message at `level` should be emitted for `verbosity`.
#[inline]
pub fn enabled(verbosity: u8, level: u8) -> bool {
    level != VERBOSITY_SILENT && verbosity >= level
}

/// Log at CHANGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $crate::logging::enabled($verbosity, $crate::logging::VERBOSITY_CHANGES) {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $crate::logging::enabled($verbosity, $crate::logging::VERBOSITY_CHECKS) {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $crate::logging::enabled($verbosity, $crate::logging::VERBOSITY_DEBUG) {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_cumulative() {
        assert!(!enabled(VERBOSITY_SILENT, VERBOSITY_CHANGES));
        assert!(enabled(VERBOSITY_CHANGES, VERBOSITY_CHANGES));
        assert!(!enabled(VERBOSITY_CHANGES, VERBOSITY_CHECKS));
        assert!(enabled(VERBOSITY_DEBUG, VERBOSITY_CHECKS));
        assert!(!enabled(VERBOSITY_DEBUG, VERBOSITY_SILENT));
    }

    #[test]
    fn test_log_macros_expand() {
        let verbosity = VERBOSITY_SILENT;
        log_changes!(verbosity, "dated {}", "a");
        log_checks!(verbosity, "released {}", "b");
        log_debug!(verbosity, "score {}", 138);
    }
}
