//! Preflight Check System
//!
//! Verifies the environment before the service starts accepting requests:
//! writable directories, both olog documents present, and their YAML
//! well-formed. No assumptions - everything is verified. Semantic
//! validation (value membership, completeness) happens in the catalog
//! loader; preflight only establishes that loading can be attempted.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::catalog::{AESTHETIC_FILENAME, INTENTIONALITY_FILENAME};

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }
}

/// Complete preflight check report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub ready_to_start: bool,
    pub summary: String,
}

/// Performs all preflight checks and returns a comprehensive report.
pub fn run_preflight_checks(ologs_dir: &Path, logs_dir: &Path) -> PreflightReport {
    info!("🔍 Running preflight checks");

    let checks = vec![
        check_logs_dir(logs_dir),
        check_olog_file(ologs_dir, AESTHETIC_FILENAME, "aesthetic_olog"),
        check_olog_file(ologs_dir, INTENTIONALITY_FILENAME, "intentionality_olog"),
    ];

    let all_passed = checks.iter().all(|c| c.passed);
    let critical_passed = checks
        .iter()
        .filter(|c| is_critical_check(&c.name))
        .all(|c| c.passed);

    let summary = if all_passed {
        "All checks passed. Service ready.".to_string()
    } else if critical_passed {
        "Some non-critical checks failed. Service can start with warnings.".to_string()
    } else {
        "Critical checks failed. Service cannot start.".to_string()
    };

    for check in &checks {
        if check.passed {
            info!("  ✅ {}: {}", check.name, check.message);
        } else {
            warn!("  ❌ {}: {}", check.name, check.message);
            if let Some(details) = &check.details {
                warn!("      Details: {}", details);
            }
        }
    }
    info!("Summary: {}", summary);

    PreflightReport {
        all_passed,
        checks,
        ready_to_start: critical_passed,
        summary,
    }
}

fn is_critical_check(name: &str) -> bool {
    matches!(name, "aesthetic_olog" | "intentionality_olog")
}

// --- Individual Checks ---

fn check_logs_dir(logs_dir: &Path) -> CheckResult {
    if logs_dir.is_dir() {
        return CheckResult::pass("logs_dir", "Logs directory exists");
    }
    match std::fs::create_dir_all(logs_dir) {
        Ok(_) => CheckResult::pass("logs_dir", "Created logs directory"),
        Err(e) => CheckResult::fail(
            "logs_dir",
            "Cannot create logs directory",
            Some(format!("{}: {}", logs_dir.display(), e)),
        ),
    }
}

fn check_olog_file(ologs_dir: &Path, filename: &str, check_name: &str) -> CheckResult {
    let path = ologs_dir.join(filename);

    if !path.exists() {
        return CheckResult::fail(
            check_name,
            "Olog document not found",
            Some(format!("Expected at: {}", path.display())),
        );
    }

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            return CheckResult::fail(
                check_name,
                "Cannot read olog document",
                Some(e.to_string()),
            )
        }
    };

    match serde_yaml::from_str::<serde_yaml::Value>(&text) {
        Ok(doc) => {
            if doc.get("olog").is_some() {
                CheckResult::pass(
                    check_name,
                    &format!("{} parsed OK ({} bytes)", filename, text.len()),
                )
            } else {
                CheckResult::fail(
                    check_name,
                    "Document has no top-level 'olog' key",
                    Some(filename.to_string()),
                )
            }
        }
        Err(e) => CheckResult::fail(check_name, "YAML parse failed", Some(e.to_string())),
    }
}
