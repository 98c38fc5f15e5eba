//! BPEL Console command-line tools.
//!
//! Each command writes its report to a caller-supplied writer so the
//! binary and the tests share one code path.

pub mod commands;
