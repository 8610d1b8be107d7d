// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while reading JUnit reports.

use camino::Utf8PathBuf;
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// An error that occurs while reading a [`Report`](crate::Report).
///
/// Returned by [`Report::parse`](crate::Report::parse) and by the document constructors. A
/// malformed report stays malformed, so callers should not retry on this error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The report file could not be read.
    ///
    /// The underlying error already names the path.
    #[error("failed to read JUnit report")]
    Read {
        /// The path that was being read.
        path: Utf8PathBuf,

        /// The underlying I/O error.
        #[source]
        err: std::io::Error,
    },

    /// The input is not well-formed XML.
    #[error("JUnit report is not well-formed XML")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be read.
    #[error("malformed attribute in JUnit report")]
    Attribute(#[from] AttrError),

    /// A counter attribute such as `tests` is not a non-negative integer.
    #[error("`{attribute}` attribute on <{element}> is not a count: `{value}`")]
    InvalidCount {
        /// The element carrying the attribute.
        element: String,

        /// The attribute name.
        attribute: &'static str,

        /// The value that failed to parse.
        value: String,
    },

    /// The root element is neither `testsuites` nor `testsuite`.
    #[error("unexpected root element <{element}> (expected <testsuites> or <testsuite>)")]
    UnexpectedRoot {
        /// The name of the root element.
        element: String,
    },

    /// A known element appeared somewhere it cannot be interpreted.
    #[error("<{element}> is not allowed inside <{parent}>")]
    UnexpectedElement {
        /// The misplaced element.
        element: String,

        /// The element it was found in.
        parent: String,
    },

    /// The input contained no root element at all.
    #[error("JUnit report has no root element")]
    NoRootElement,
}

impl ParseError {
    pub(crate) fn read(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            err,
        }
    }
}
