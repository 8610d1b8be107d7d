// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::ParseError, outcome::Outcome, report::Report, views::TestsuitesView};
use camino::{Utf8Path, Utf8PathBuf};
use std::{
    io::{self, BufReader},
    sync::Arc,
};

/// A parsed test result document.
///
/// This is what a [`ReportPage`](crate::ReportPage) is built from.
pub trait TestDocument {
    /// Returns the identifying name of the document.
    fn name(&self) -> &str;

    /// Returns the aggregate outcome of the document.
    fn outcome(&self) -> &Outcome;

    /// Returns a view over the testsuites in the document.
    fn testsuites(&self) -> TestsuitesView<'_>;
}

impl<T: TestDocument + ?Sized> TestDocument for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn outcome(&self) -> &Outcome {
        (**self).outcome()
    }

    fn testsuites(&self) -> TestsuitesView<'_> {
        (**self).testsuites()
    }
}

impl<T: TestDocument + ?Sized> TestDocument for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn outcome(&self) -> &Outcome {
        (**self).outcome()
    }

    fn testsuites(&self) -> TestsuitesView<'_> {
        (**self).testsuites()
    }
}

/// A [`TestDocument`] backed by a parsed JUnit [`Report`].
///
/// The document's name is the `name` attribute of the report's root element. The outcome is
/// computed once, at construction.
#[derive(Clone, Debug)]
pub struct JunitDocument {
    report: Report,
    outcome: Outcome,
}

impl JunitDocument {
    /// Creates a new document from a parsed report.
    pub fn new(report: Report) -> Self {
        let outcome = Outcome::new(&report);
        Self { report, outcome }
    }

    /// Reads and parses a document from JUnit XML.
    pub fn from_reader(reader: impl io::BufRead) -> Result<Self, ParseError> {
        Report::parse(reader).map(Self::new)
    }

    /// Reads and parses the JUnit XML file at `path`.
    pub fn from_path(path: impl AsRef<Utf8Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let file =
            fs_err::File::open(path.as_std_path()).map_err(|err| ParseError::read(path, err))?;
        Self::from_reader(BufReader::new(file)).map_err(|err| match err {
            // An I/O failure in the middle of reading is reported as a read error against the
            // path.
            ParseError::Xml(quick_xml::Error::Io(io_err)) => {
                let io_err = Arc::try_unwrap(io_err)
                    .unwrap_or_else(|shared| io::Error::new(shared.kind(), shared));
                ParseError::read(path, io_err)
            }
            other => other,
        })
    }

    /// Returns the underlying report.
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Consumes `self`, returning the underlying report.
    pub fn into_report(self) -> Report {
        self.report
    }
}

impl TestDocument for JunitDocument {
    fn name(&self) -> &str {
        &self.report.name
    }

    fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    fn testsuites(&self) -> TestsuitesView<'_> {
        TestsuitesView::new(&self.report)
    }
}

/// A [`TestDocument`] that reports the path it was read from as its name.
///
/// The outcome and testsuites are forwarded unchanged to the inner document. For reports
/// produced by test runners, the file path is usually more useful to readers than the root
/// element's `name` attribute, which is often empty or a fixed string like "pytest".
#[derive(Clone, Debug)]
pub struct FileDocument<D = JunitDocument> {
    path: Utf8PathBuf,
    inner: D,
}

impl FileDocument<JunitDocument> {
    /// Reads and parses the JUnit XML file at `path`.
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Self, ParseError> {
        let path = path.into();
        let inner = JunitDocument::from_path(&path)?;
        Ok(Self { path, inner })
    }
}

impl<D: TestDocument> FileDocument<D> {
    /// Wraps an existing document, renaming it to `path`.
    pub fn new(path: impl Into<Utf8PathBuf>, inner: D) -> Self {
        Self {
            path: path.into(),
            inner,
        }
    }

    /// Returns the path this document is named after.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the inner document.
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: TestDocument> TestDocument for FileDocument<D> {
    fn name(&self) -> &str {
        self.path.as_str()
    }

    fn outcome(&self) -> &Outcome {
        self.inner.outcome()
    }

    fn testsuites(&self) -> TestsuitesView<'_> {
        self.inner.testsuites()
    }
}
