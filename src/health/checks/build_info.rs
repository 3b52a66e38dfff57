//! Build information health check

use crate::build_info::BuildInfo;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that build metadata was embedded
#[derive(Default)]
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates embedded build metadata (rustc, target, timestamp)")
    }

    fn check(&self) -> CheckResult {
        let info = BuildInfo::current();
        let details = info
            .to_string()
            .lines()
            .map(|line| format!("  {line}"))
            .collect::<Vec<_>>()
            .join("\n");

        let missing = info.missing_fields();
        if missing.is_empty() {
            CheckResult::pass("Build metadata embedded").with_details(details)
        } else {
            CheckResult::warn(format!("Missing build metadata: {}", missing.join(", ")))
                .with_details(details)
        }
    }
}
