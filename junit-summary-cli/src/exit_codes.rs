// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `junit-summary` failures.
///
/// Invalid command-line arguments are reported by clap with exit code 2. Unknown/unexpected
/// failures will always result in exit code 1.
pub enum SummaryExitCode {}

impl SummaryExitCode {
    /// No errors occurred and the report page was written.
    pub const OK: i32 = 0;

    /// The input could not be read as a JUnit report.
    pub const PARSE_ERROR: i32 = 97;

    /// Writing the report page to stdout or to a file produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
