//! Configuration health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};

/// Loads each shipped profile and the environment-selected one
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    pub fn new() -> Self {
        Self::with_profiles(vec!["debug", "release"])
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads and validates configuration profiles and environment overrides")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failures = 0;

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => details.push(format!(
                    "  ✓ {profile}: ui_scale {} at {} fps",
                    config.input.ui_scale, config.input.frame_rate
                )),
                Err(e) => {
                    failures += 1;
                    details.push(format!("  ✗ {profile}: {e}"));
                }
            }
        }

        let from_env = AppConfig::load_from_env();
        match &from_env {
            Ok(config) => details.push(format!("  ✓ environment: profile '{}'", config.profile)),
            Err(e) => details.push(format!("  ⚠ environment: {e}")),
        }

        let details = details.join("\n");
        if failures > 0 {
            CheckResult::fail(format!("{failures} profile(s) failed to load")).with_details(details)
        } else if from_env.is_err() {
            CheckResult::warn("Environment configuration rejected").with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details)
        }
    }
}
