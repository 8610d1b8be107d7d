// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only views over a parsed [`Report`].
//!
//! Views borrow from the report and wrap child records lazily: a [`TestsuiteView`] is only
//! created when the iterator over a [`TestsuitesView`] yields it, and likewise for cases.
//! Every call to `iter` starts a fresh traversal, so a view can be walked any number of times.

use crate::report::{Report, Testcase, TestcaseStatus, Testsuite};
use std::{fmt, iter::FusedIterator, slice};

/// The pass/fail status of a single testcase.
///
/// This is a binary classification: failures, errors and skips are all reported as `Failed`.
/// The finer distinction is only available through the report's counters, or through
/// [`TestcaseView::result`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CaseStatus {
    /// No result element was attached to the testcase.
    Passed,

    /// A `failure`, `error` or `skipped` element was attached to the testcase.
    Failed,
}

impl CaseStatus {
    /// Returns the display string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            CaseStatus::Passed => "Passed",
            CaseStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A view over a single testcase.
#[derive(Copy, Clone, Debug)]
pub struct TestcaseView<'a> {
    case: &'a Testcase,
}

impl<'a> TestcaseView<'a> {
    /// Creates a new view over a testcase.
    pub fn new(case: &'a Testcase) -> Self {
        Self { case }
    }

    /// Returns `Failed` if the testcase carries a result element, `Passed` otherwise.
    pub fn status(&self) -> CaseStatus {
        if self.case.status.has_result() {
            CaseStatus::Failed
        } else {
            CaseStatus::Passed
        }
    }

    /// Returns the name of the testcase.
    ///
    /// With `suite_prefix` set, the name is qualified as `classname:name`. Cases without a
    /// classname always use the bare name.
    pub fn name(&self, suite_prefix: bool) -> String {
        match (&self.case.classname, suite_prefix) {
            (Some(classname), true) => format!("{}:{}", classname, self.case.name),
            _ => self.case.name.clone(),
        }
    }

    /// Returns the classname of the testcase, if any.
    pub fn classname(&self) -> Option<&'a str> {
        self.case.classname.as_deref()
    }

    /// Returns the full status of the testcase, as read from the report.
    pub fn result(&self) -> &'a TestcaseStatus {
        &self.case.status
    }
}

/// A view over a single testsuite.
#[derive(Copy, Clone, Debug)]
pub struct TestsuiteView<'a> {
    suite: &'a Testsuite,
}

impl<'a> TestsuiteView<'a> {
    /// Creates a new view over a testsuite.
    pub fn new(suite: &'a Testsuite) -> Self {
        Self { suite }
    }

    /// Returns the name of the testsuite.
    pub fn name(&self) -> &'a str {
        &self.suite.name
    }

    /// Returns the number of testcases in the testsuite.
    pub fn len(&self) -> usize {
        self.suite.testcases.len()
    }

    /// Returns true if the testsuite has no testcases.
    pub fn is_empty(&self) -> bool {
        self.suite.testcases.is_empty()
    }

    /// Returns an iterator over the testcases, in document order.
    pub fn iter(&self) -> Testcases<'a> {
        Testcases {
            inner: self.suite.testcases.iter(),
        }
    }
}

impl<'a> IntoIterator for &TestsuiteView<'a> {
    type Item = TestcaseView<'a>;
    type IntoIter = Testcases<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for TestsuiteView<'a> {
    type Item = TestcaseView<'a>;
    type IntoIter = Testcases<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the testcases in a [`TestsuiteView`].
///
/// Created by [`TestsuiteView::iter`].
#[derive(Clone, Debug)]
pub struct Testcases<'a> {
    inner: slice::Iter<'a, Testcase>,
}

impl<'a> Iterator for Testcases<'a> {
    type Item = TestcaseView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(TestcaseView::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Testcases<'_> {}
impl FusedIterator for Testcases<'_> {}

/// A view over all the testsuites in a report.
#[derive(Copy, Clone, Debug)]
pub struct TestsuitesView<'a> {
    report: &'a Report,
}

impl<'a> TestsuitesView<'a> {
    /// Creates a new view over a report.
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    /// Returns the name of the report.
    pub fn name(&self) -> &'a str {
        &self.report.name
    }

    /// Returns the number of testsuites in the report.
    pub fn len(&self) -> usize {
        self.report.testsuites.len()
    }

    /// Returns true if the report has no testsuites.
    pub fn is_empty(&self) -> bool {
        self.report.testsuites.is_empty()
    }

    /// Returns an iterator over the testsuites, in document order.
    pub fn iter(&self) -> Testsuites<'a> {
        Testsuites {
            inner: self.report.testsuites.iter(),
        }
    }
}

impl<'a> IntoIterator for &TestsuitesView<'a> {
    type Item = TestsuiteView<'a>;
    type IntoIter = Testsuites<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for TestsuitesView<'a> {
    type Item = TestsuiteView<'a>;
    type IntoIter = Testsuites<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the testsuites in a [`TestsuitesView`].
///
/// Created by [`TestsuitesView::iter`].
#[derive(Clone, Debug)]
pub struct Testsuites<'a> {
    inner: slice::Iter<'a, Testsuite>,
}

impl<'a> Iterator for Testsuites<'a> {
    type Item = TestsuiteView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(TestsuiteView::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Testsuites<'_> {}
impl FusedIterator for Testsuites<'_> {}
