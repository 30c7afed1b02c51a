//! Process exit codes for the `provcheck` binary.

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1; // Bad input: invalid root, no matching folders, config errors
pub const INTERNAL_ERROR: i32 = 2; // Anything unexpected that escaped a command
