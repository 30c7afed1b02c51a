//! Batch summary over a directory of provisioning result folders.

pub mod batch;
pub mod table;

pub use batch::{
    discover_candidates, evaluate_candidate, run_batch, BatchReport, FolderCandidate, RowStatus,
    SummaryRow, BATCH_FOLDER_PATTERN,
};
pub use table::render_table;
