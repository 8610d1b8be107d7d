// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::report::Report;
use indexmap::IndexMap;

/// Aggregate counters for a report.
///
/// The four raw counters are copied verbatim from the [`Report`]. The number of passed tests is
/// derived from them and is not clamped: if the counters are inconsistent (for example, more
/// failures than tests), [`passed`](Self::passed) goes negative. Use
/// [`is_consistent`](Self::is_consistent) to detect that case.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    total: usize,
    skipped: usize,
    failed: usize,
    errored: usize,
}

impl Outcome {
    /// Creates a new `Outcome` from the report's counters.
    pub fn new(report: &Report) -> Self {
        Self::from_counts(report.tests, report.skipped, report.failures, report.errors)
    }

    /// Creates a new `Outcome` from raw counters.
    pub fn from_counts(total: usize, skipped: usize, failed: usize, errored: usize) -> Self {
        Self {
            total,
            skipped,
            failed,
            errored,
        }
    }

    /// Returns the total number of tests.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of skipped tests.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the number of failed tests.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Returns the number of errored tests.
    pub fn errored(&self) -> usize {
        self.errored
    }

    /// Returns the number of passed tests: total minus skipped, failed and errored.
    ///
    /// Results beyond the range of `i64` saturate to `i64::MIN` or `i64::MAX`.
    pub fn passed(&self) -> i64 {
        let passed = self.total as i128
            - self.skipped as i128
            - self.failed as i128
            - self.errored as i128;
        i64::try_from(passed).unwrap_or(if passed < 0 { i64::MIN } else { i64::MAX })
    }

    /// Returns true if the counters add up, i.e. [`passed`](Self::passed) is not negative.
    pub fn is_consistent(&self) -> bool {
        self.passed() >= 0
    }

    /// Returns all five counters keyed by name, in the order `total`, `skipped`, `failed`,
    /// `errored`, `passed`.
    pub fn as_map(&self) -> IndexMap<&'static str, i64> {
        IndexMap::from([
            ("total", to_i64(self.total)),
            ("skipped", to_i64(self.skipped)),
            ("failed", to_i64(self.failed)),
            ("errored", to_i64(self.errored)),
            ("passed", self.passed()),
        ])
    }
}

fn to_i64(count: usize) -> i64 {
    // Counts come from parsed documents and can't realistically exceed i64::MAX.
    i64::try_from(count).unwrap_or(i64::MAX)
}
