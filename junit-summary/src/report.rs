// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::ParseError, parse::parse_report};
use indexmap::map::IndexMap;
use std::{io, str::FromStr};

/// The root element of a JUnit report, as read from XML.
///
/// A `Report` is the parsed form that every view in this crate borrows from. It is never
/// modified once parsing completes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// The name of this report.
    ///
    /// Taken from the `name` attribute of the root element, or the empty string if absent.
    pub name: String,

    /// The total number of tests from all testsuites.
    pub tests: usize,

    /// The total number of skipped tests from all testsuites.
    pub skipped: usize,

    /// The total number of failures from all testsuites.
    pub failures: usize,

    /// The total number of errors from all testsuites.
    pub errors: usize,

    /// The test suites contained in this report, in document order.
    pub testsuites: Vec<Testsuite>,
}

impl Report {
    /// Creates a new, empty `Report` with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Reads a report from JUnit XML.
    pub fn parse(reader: impl io::BufRead) -> Result<Self, ParseError> {
        parse_report(reader)
    }

    /// Adds a new testsuite and updates the aggregate counts.
    ///
    /// When building a report by hand, use of this method is recommended over adding to
    /// `self.testsuites` directly.
    pub fn add_testsuite(&mut self, testsuite: Testsuite) -> &mut Self {
        self.tests = self.tests.saturating_add(testsuite.tests);
        self.skipped = self.skipped.saturating_add(testsuite.skipped);
        self.failures = self.failures.saturating_add(testsuite.failures);
        self.errors = self.errors.saturating_add(testsuite.errors);
        self.testsuites.push(testsuite);
        self
    }

    /// Adds several testsuites and updates the aggregate counts.
    pub fn add_testsuites(&mut self, testsuites: impl IntoIterator<Item = Testsuite>) -> &mut Self {
        for testsuite in testsuites {
            self.add_testsuite(testsuite);
        }
        self
    }
}

impl FromStr for Report {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.as_bytes())
    }
}

/// Represents a single testsuite.
///
/// A `Testsuite` groups together several `Testcase` instances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Testsuite {
    /// The name of this testsuite.
    pub name: String,

    /// The total number of tests in this testsuite.
    pub tests: usize,

    /// The total number of skipped (or disabled) tests in this testsuite.
    pub skipped: usize,

    /// The total number of tests in this suite that errored.
    ///
    /// An "error" is usually some sort of *unexpected* issue in a test.
    pub errors: usize,

    /// The total number of tests in this suite that failed.
    ///
    /// A "failure" is usually some sort of *expected* issue in a test.
    pub failures: usize,

    /// The testcases that form this testsuite.
    pub testcases: Vec<Testcase>,

    /// Other attributes set on the element, such as "hostname" or "package".
    pub extra: IndexMap<String, String>,
}

impl Testsuite {
    /// Creates a new `Testsuite`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a testcase to this testsuite and updates the counts.
    ///
    /// When building a report by hand, use of this method is recommended over adding to
    /// `self.testcases` directly.
    pub fn add_testcase(&mut self, testcase: Testcase) -> &mut Self {
        self.tests += 1;
        match &testcase.status {
            TestcaseStatus::Success => {}
            TestcaseStatus::NonSuccess { kind, .. } => match kind {
                NonSuccessKind::Failure => self.failures += 1,
                NonSuccessKind::Error => self.errors += 1,
            },
            TestcaseStatus::Skipped { .. } => self.skipped += 1,
        }
        self.testcases.push(testcase);
        self
    }

    /// Adds several testcases to this testsuite and updates the counts.
    pub fn add_testcases(&mut self, testcases: impl IntoIterator<Item = Testcase>) -> &mut Self {
        for testcase in testcases {
            self.add_testcase(testcase);
        }
        self
    }
}

/// Represents a single testcase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct Testcase {
    /// The name of the testcase.
    pub name: String,

    /// The "classname" of the testcase.
    ///
    /// Typically, this represents the fully qualified path to the test. In other words,
    /// `classname` + `name` together should uniquely identify and locate a test.
    pub classname: Option<String>,

    /// The status of this test.
    pub status: TestcaseStatus,

    /// Other attributes set on the element, such as "file" or "line".
    pub extra: IndexMap<String, String>,
}

impl Testcase {
    /// Creates a new testcase.
    pub fn new(name: impl Into<String>, status: TestcaseStatus) -> Self {
        Self {
            name: name.into(),
            classname: None,
            status,
            extra: IndexMap::new(),
        }
    }

    /// Sets the classname of the test.
    pub fn set_classname(&mut self, classname: impl Into<String>) -> &mut Self {
        self.classname = Some(classname.into());
        self
    }
}

/// Represents the success or failure of a testcase.
///
/// Anything other than `Success` corresponds to a result element (`failure`, `error` or
/// `skipped`) nested inside the `testcase` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestcaseStatus {
    /// This testcase passed.
    Success,

    /// This testcase did not pass.
    NonSuccess {
        /// Whether this testcase failed in an expected way (failure) or an unexpected way (error).
        kind: NonSuccessKind,

        /// The failure message.
        message: Option<String>,

        /// The "type" of failure that occurred.
        ty: Option<String>,

        /// The description of the failure.
        ///
        /// This is read from the text node of the element.
        description: Option<String>,
    },

    /// This testcase was not run.
    Skipped {
        /// The skip message.
        message: Option<String>,

        /// The "type" of skip that occurred.
        ty: Option<String>,

        /// The description of the skip.
        ///
        /// This is read from the text node of the element.
        description: Option<String>,
    },
}

impl TestcaseStatus {
    /// Creates a new `TestcaseStatus` that represents a successful test.
    pub fn success() -> Self {
        TestcaseStatus::Success
    }

    /// Creates a new `TestcaseStatus` that represents an unsuccessful test.
    pub fn non_success(kind: NonSuccessKind) -> Self {
        TestcaseStatus::NonSuccess {
            kind,
            message: None,
            ty: None,
            description: None,
        }
    }

    /// Creates a new `TestcaseStatus` that represents a skipped test.
    pub fn skipped() -> Self {
        TestcaseStatus::Skipped {
            message: None,
            ty: None,
            description: None,
        }
    }

    /// Returns true if a result element was attached to the testcase.
    pub fn has_result(&self) -> bool {
        !matches!(self, TestcaseStatus::Success)
    }

    /// Sets the message. No-op if this is a success case.
    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        let message_mut = match self {
            TestcaseStatus::Success => return self,
            TestcaseStatus::NonSuccess { message, .. } => message,
            TestcaseStatus::Skipped { message, .. } => message,
        };
        *message_mut = Some(message.into());
        self
    }

    /// Sets the type. No-op if this is a success case.
    pub fn set_type(&mut self, ty: impl Into<String>) -> &mut Self {
        let ty_mut = match self {
            TestcaseStatus::Success => return self,
            TestcaseStatus::NonSuccess { ty, .. } => ty,
            TestcaseStatus::Skipped { ty, .. } => ty,
        };
        *ty_mut = Some(ty.into());
        self
    }

    /// Sets the description (text node). No-op if this is a success case.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        let description_mut = match self {
            TestcaseStatus::Success => return self,
            TestcaseStatus::NonSuccess { description, .. } => description,
            TestcaseStatus::Skipped { description, .. } => description,
        };
        *description_mut = Some(description.into());
        self
    }
}

/// The kind of non-success a testcase reported.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NonSuccessKind {
    /// This is an expected failure. Read from a `failure` element.
    Failure,

    /// This is an unexpected error. Read from an `error` element.
    Error,
}
