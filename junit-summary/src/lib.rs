// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read JUnit reports and summarize them as a short report page.
//!
//! A JUnit XML file is parsed into a [`Report`], wrapped in a [`TestDocument`] and rendered by a
//! [`ReportPage`]:
//!
//! ```no_run
//! use junit_summary::{FileDocument, ReportPage};
//!
//! # fn main() -> Result<(), junit_summary::ParseError> {
//! let document = FileDocument::open("target/junit.xml")?;
//! let mut page = ReportPage::new(&document);
//! let guard = page.enter();
//! println!("{}", guard.content());
//! # Ok(())
//! # }
//! ```
//!
//! This crate logs through [`tracing`] but never installs a subscriber; that is left to the
//! caller.

#![warn(missing_docs)]

mod document;
mod errors;
mod outcome;
mod page;
mod parse;
mod report;
mod views;

pub use document::*;
pub use errors::*;
pub use outcome::*;
pub use page::*;
pub use report::*;
pub use views::*;
