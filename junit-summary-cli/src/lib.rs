// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summarize a JUnit XML report as a short report page.
//!
//! This crate contains the implementation of the `junit-summary` binary. For the library that
//! reads reports and renders pages, see the `junit-summary` crate.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod exit_codes;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
pub use exit_codes::SummaryExitCode;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter, StderrStyles};
