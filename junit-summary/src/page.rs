// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The rendered report page.

use crate::document::TestDocument;
use std::ops::Deref;
use swrite::{SWrite, swriteln};

/// Options controlling what a [`ReportPage`] renders.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Append a block per testsuite listing every testcase and its status.
    pub details: bool,

    /// In the per-testsuite block, qualify testcase names as `classname:name`.
    pub suite_prefix: bool,
}

/// A test report page built from a [`TestDocument`].
///
/// The page's content only exists while a [`PageGuard`] returned by [`enter`](Self::enter) is
/// alive. The content is built on entry and cleared when the guard is dropped, including when
/// unwinding from a panic, so every acquisition starts from a clean buffer.
///
/// The page looks like:
///
/// ```text
/// <h1>Test report:</h1>
/// Total: 10
/// Passed: 7
/// Failed: 2
/// Skipped: 1
/// Errored: 0
/// ```
#[derive(Debug)]
pub struct ReportPage<'d, D: ?Sized> {
    document: &'d D,
    options: PageOptions,
    content: String,
}

impl<'d, D: TestDocument + ?Sized> ReportPage<'d, D> {
    /// Creates a new page over `document` with default options.
    pub fn new(document: &'d D) -> Self {
        Self::with_options(document, PageOptions::default())
    }

    /// Creates a new page over `document`.
    pub fn with_options(document: &'d D, options: PageOptions) -> Self {
        Self {
            document,
            options,
            content: String::new(),
        }
    }

    /// Returns the options used to render this page.
    pub fn options(&self) -> PageOptions {
        self.options
    }

    /// Returns the current content: empty unless a guard from [`enter`](Self::enter) has been
    /// leaked.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Builds the page content and returns a guard that exposes it.
    ///
    /// If the content has already been built (because an earlier guard was leaked), it is
    /// reused as-is.
    pub fn enter(&mut self) -> PageGuard<'_, 'd, D> {
        if self.content.is_empty() {
            let content = self.build();
            self.content = content;
        }
        PageGuard { page: self }
    }

    /// Runs `f` with the page content, clearing it afterwards.
    pub fn with_content<R>(&mut self, f: impl FnOnce(&str) -> R) -> R {
        let guard = self.enter();
        f(guard.content())
    }

    /// Returns the summary table: a title line followed by one line per counter.
    pub fn build_results_table(&self) -> String {
        tracing::info!("collecting statistics from `{}`", self.document.name());

        let outcome = self.document.outcome();
        if !outcome.is_consistent() {
            tracing::warn!(
                "counters in `{}` are inconsistent: {} skipped, {} failed and {} errored \
                 out of {} total",
                self.document.name(),
                outcome.skipped(),
                outcome.failed(),
                outcome.errored(),
                outcome.total(),
            );
        }

        let mut out = String::new();
        swriteln!(out, "<h1>Test report:</h1>");
        swriteln!(out, "Total: {}", outcome.total());
        swriteln!(out, "Passed: {}", outcome.passed());
        swriteln!(out, "Failed: {}", outcome.failed());
        swriteln!(out, "Skipped: {}", outcome.skipped());
        swriteln!(out, "Errored: {}", outcome.errored());
        out
    }

    /// Returns one block per testsuite listing each testcase with its status.
    pub fn build_details(&self) -> String {
        let mut out = String::new();
        for suite in self.document.testsuites() {
            swriteln!(out, "<h2>{}</h2>", suite.name());
            for case in suite {
                swriteln!(
                    out,
                    "{}: {}",
                    case.name(self.options.suite_prefix),
                    case.status()
                );
            }
        }
        out
    }

    fn build(&self) -> String {
        let mut content = self.build_results_table();
        if self.options.details {
            content.push_str(&self.build_details());
        }
        content
    }
}

/// The content of a [`ReportPage`] for the duration of one acquisition.
///
/// Created by [`ReportPage::enter`]. Dropping the guard clears the page.
#[derive(Debug)]
pub struct PageGuard<'p, 'd, D: ?Sized> {
    page: &'p mut ReportPage<'d, D>,
}

impl<D: ?Sized> PageGuard<'_, '_, D> {
    /// Returns the page content.
    pub fn content(&self) -> &str {
        &self.page.content
    }
}

impl<D: ?Sized> Deref for PageGuard<'_, '_, D> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.page.content
    }
}

impl<D: ?Sized> Drop for PageGuard<'_, '_, D> {
    fn drop(&mut self) {
        self.page.content.clear();
    }
}
