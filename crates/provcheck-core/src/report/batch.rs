use std::fs;
use std::path::{Path, PathBuf};

use globset::Glob;

use crate::errors::ReportError;
use crate::record::{Coercion, ResultRecord};
use crate::verdict::{batch_tests_verdict, device_verdict, Verdict};

/// Folder names produced by the provisioning station.
pub const BATCH_FOLDER_PATTERN: &str = "Aikri-85X-50LS-16-*";

const RESULT_FILE_SUFFIX: &str = "_Test_Result.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderCandidate {
    pub path: PathBuf,
    pub name: String,
}

impl FolderCandidate {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    /// `<folder>/<folder name>_Test_Result.csv`
    pub fn expected_result_file(&self) -> PathBuf {
        self.path.join(format!("{}{}", self.name, RESULT_FILE_SUFFIX))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    MissingResultFile,
    Evaluated { tests: Verdict, device: Verdict },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub folder: String,
    pub status: RowStatus,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub root: PathBuf,
    pub rows: Vec<SummaryRow>,
}

impl BatchReport {
    pub fn render(&self) -> String {
        super::table::render_table(&self.rows)
    }
}

/// Directories directly under `root` whose name matches `pattern`, sorted.
pub fn discover_candidates(
    root: &Path,
    pattern: &str,
) -> Result<Vec<FolderCandidate>, ReportError> {
    if !root.is_dir() {
        return Err(ReportError::InvalidRoot {
            path: root.to_path_buf(),
        });
    }

    let matcher = Glob::new(pattern)
        .map_err(|source| ReportError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    let io_err = |source| ReportError::Io {
        path: root.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !matcher.is_match(Path::new(&entry.file_name())) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            candidates.push(FolderCandidate::new(path));
        }
    }
    candidates.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(candidates)
}

/// Judge a single folder. An unreadable result file is logged and counts as
/// an absent record, which fails both columns.
pub fn evaluate_candidate(candidate: &FolderCandidate) -> SummaryRow {
    let result_file = candidate.expected_result_file();
    if !result_file.is_file() {
        return SummaryRow {
            folder: candidate.name.clone(),
            status: RowStatus::MissingResultFile,
        };
    }

    let record = match ResultRecord::from_path(&result_file, Coercion::Numeric) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::error!(path = %e.path().display(), "Error reading result file: {e}");
            None
        }
    };

    let (total, passed, device) = match &record {
        Some(r) => (r.total_test_cases(), r.passed(), r.device_number()),
        None => (None, None, None),
    };

    SummaryRow {
        folder: candidate.name.clone(),
        status: RowStatus::Evaluated {
            tests: batch_tests_verdict(total, passed),
            device: device_verdict(device, &candidate.name),
        },
    }
}

pub fn run_batch(root: &Path, pattern: &str) -> Result<BatchReport, ReportError> {
    let candidates = discover_candidates(root, pattern)?;
    if candidates.is_empty() {
        return Err(ReportError::NoMatchingFolders {
            root: root.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    tracing::debug!(root = %root.display(), count = candidates.len(), "evaluating folders");
    let rows = candidates.iter().map(evaluate_candidate).collect();
    Ok(BatchReport {
        root: root.to_path_buf(),
        rows,
    })
}
