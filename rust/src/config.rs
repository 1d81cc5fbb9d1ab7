//! Configuration types for scheduling and plan normalization.

/// Configuration for the dependency scheduler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchedulingConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
}

impl SchedulingConfig {
    pub fn with_verbosity(verbosity: u8) -> Self {
        Self { verbosity }
    }
}

/// Configuration for turning drafts into a schedulable batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Window used by the heuristic templates when the goal names no timeframe.
    pub default_window_days: u32,
    /// Fall back to keyword templates when the draft source yields nothing.
    pub allow_heuristic_fallback: bool,
    /// Chain tasks in input order when no draft declared a dependency.
    pub chain_when_unlinked: bool,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_window_days: 7,
            allow_heuristic_fallback: true,
            chain_when_unlinked: true,
            verbosity: 0,
        }
    }
}

pub const ENV_ALLOW_FALLBACK: &str = "GOALPLAN_ALLOW_FALLBACK";
pub const ENV_DEFAULT_WINDOW_DAYS: &str = "GOALPLAN_DEFAULT_WINDOW_DAYS";
pub const ENV_VERBOSITY: &str = "GOALPLAN_VERBOSITY";

impl PlannerConfig {
    /// Build from process environment, keeping defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// Fallback stays enabled unless the value is literally `false`
    /// (case-insensitive); the window is floored at one day.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let allow_heuristic_fallback = lookup(ENV_ALLOW_FALLBACK)
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(defaults.allow_heuristic_fallback);
        let default_window_days = lookup(ENV_DEFAULT_WINDOW_DAYS)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .map(|d| d.max(1))
            .unwrap_or(defaults.default_window_days);
        let verbosity = lookup(ENV_VERBOSITY)
            .and_then(|v| v.trim().parse::<u8>().ok())
            .unwrap_or(defaults.verbosity);

        Self {
            default_window_days,
            allow_heuristic_fallback,
            verbosity,
            ..defaults
        }
    }

    pub fn scheduling(&self) -> SchedulingConfig {
        SchedulingConfig::with_verbosity(self.verbosity)
    }
}
