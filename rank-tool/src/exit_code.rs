/// The command succeeded.
pub const NO_ERROR: i32 = 0;
/// The command finished, but some queries were skipped or the inputs have problems.
pub const NON_FATAL_ERROR: i32 = 1;
/// The command failed.
pub const FATAL_ERROR: i32 = 2;
