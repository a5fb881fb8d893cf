//! Property-test run profile.
//!
//! Every proptest suite in the workspace reads its case count and fork mode
//! through [`ProptestRunProfile`] so CI can scale the suites with a single
//! pair of environment variables.

use std::env;

/// Environment variable overriding the number of proptest cases.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable toggling proptest process forking.
pub const REACHGRAPH_PBT_FORK_ENV_KEY: &str = "REACHGRAPH_PBT_FORK";

/// Resolved proptest settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads overrides from the environment, keeping the supplied defaults
    /// for unset or malformed values.
    ///
    /// # Examples
    ///
    /// ```
    /// use reachgraph_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(REACHGRAPH_PBT_FORK_ENV_KEY, default_fork, parse_switch),
        }
    }

    /// Cases to run per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether each case runs in a forked subprocess.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T>(key: &'static str, default: T, parse: fn(&str) -> Result<T, String>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring malformed property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("not a case count: {error}")),
    }
}

fn parse_switch(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected true/false, 1/0, yes/no or on/off".to_owned()),
    }
}
