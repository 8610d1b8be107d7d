// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{SummaryExitCode, output::NO_HEADING_TARGET, output::StderrStyles};
use camino::Utf8PathBuf;
use junit_summary::ParseError;
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that junit-summary knows how to report.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("failed to parse JUnit report")]
    ParseError {
        path: Utf8PathBuf,
        #[source]
        err: ParseError,
    },
    #[error("failed to write report page to `{path}`")]
    WriteOutputError {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to write report page to stdout")]
    WriteStdoutError {
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    pub(crate) fn parse_error(path: impl Into<Utf8PathBuf>, err: ParseError) -> Self {
        Self::ParseError {
            path: path.into(),
            err,
        }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::ParseError { .. } => SummaryExitCode::PARSE_ERROR,
            Self::WriteOutputError { .. } | Self::WriteStdoutError { .. } => {
                SummaryExitCode::WRITE_OUTPUT_ERROR
            }
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::ParseError {
                err: ParseError::Read { err, .. },
                ..
            } => {
                tracing::error!("failed to read JUnit report");
                Some(err as &dyn Error)
            }
            Self::ParseError { path, err } => {
                tracing::error!(
                    "failed to parse `{}` as a JUnit report",
                    path.style(styles.bold)
                );
                Some(err as &dyn Error)
            }
            Self::WriteOutputError { path, err } => {
                tracing::error!("failed to write report page to `{}`", path.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::WriteStdoutError { err } => {
                tracing::error!(
                    "failed to write report page to {}",
                    "stdout".style(styles.warning_text)
                );
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            tracing::error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
