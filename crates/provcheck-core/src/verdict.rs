//! Pass/fail predicates.
//!
//! The batch report and the folder watcher judge a run differently: the batch
//! report expects exactly [`EXPECTED_TEST_CASES`] executed and passed, the
//! watcher only requires every executed case to have passed.

use std::fmt;

/// Number of test cases a complete provisioning run executes.
pub const EXPECTED_TEST_CASES: i64 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_bool(pass: bool) -> Self {
        if pass {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        self == Self::Pass
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// "Total Test" column of the batch report.
pub fn batch_tests_verdict(total: Option<i64>, passed: Option<i64>) -> Verdict {
    Verdict::from_bool(total == Some(EXPECTED_TEST_CASES) && passed == Some(EXPECTED_TEST_CASES))
}

/// "Provision Device Number" column of the batch report. Case-sensitive.
pub fn device_verdict(device_number: Option<&str>, folder_name: &str) -> Verdict {
    Verdict::from_bool(device_number == Some(folder_name))
}

/// Label used in the device column: `Pass`, not `PASS`.
pub fn device_column_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Pass => "Pass",
        Verdict::Fail => "FAIL",
    }
}

/// Verdict used by the folder watcher.
pub fn watch_verdict(total: i64, passed: i64) -> Verdict {
    Verdict::from_bool(total == passed)
}
