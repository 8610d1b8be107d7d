// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, Result, SummaryExitCode,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::Utf8PathBuf;
use clap::Parser;
use junit_summary::{FileDocument, PageOptions, ReportPage};
use std::io::Write;

/// Summarize a JUnit XML report as a short report page.
///
/// The page lists the total, passed, failed, skipped and errored test counts. With `--details`,
/// it is followed by one block per test suite listing every test case and whether it passed.
#[derive(Debug, Parser)]
#[command(
    version,
    name = "junit-summary",
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct JunitSummaryApp {
    /// Path to the JUnit XML report
    #[arg(value_name = "PATH")]
    path: Utf8PathBuf,

    /// Append per-suite and per-case results to the page
    #[arg(long, env = "JUNIT_SUMMARY_DETAILS")]
    details: bool,

    /// Render test case names as `classname:name` in the details
    #[arg(long, requires = "details")]
    suite_prefix: bool,

    /// Write the page to FILE instead of stdout
    #[arg(long, short, value_name = "FILE")]
    output: Option<Utf8PathBuf>,

    #[clap(flatten)]
    output_opts: OutputOpts,
}

impl JunitSummaryApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output_opts.init()
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self, output_writer: &mut OutputWriter) -> Result<i32> {
        let document = FileDocument::open(&self.path)
            .map_err(|err| ExpectedError::parse_error(&self.path, err))?;
        tracing::debug!(
            "read {} testsuites from `{}`",
            document.inner().report().testsuites.len(),
            self.path,
        );

        let options = PageOptions {
            details: self.details,
            suite_prefix: self.suite_prefix,
        };
        let mut page = ReportPage::with_options(&document, options);
        let guard = page.enter();

        match &self.output {
            Some(path) => {
                fs_err::write(path, guard.content()).map_err(|err| {
                    ExpectedError::WriteOutputError {
                        path: path.clone(),
                        err,
                    }
                })?;
                tracing::debug!("wrote report page to `{path}`");
            }
            None => {
                let mut writer = output_writer.stdout_writer();
                writer
                    .write_all(guard.content().as_bytes())
                    .and_then(|()| writer.flush())
                    .map_err(|err| ExpectedError::WriteStdoutError { err })?;
            }
        }

        Ok(SummaryExitCode::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::Utf8TempDir;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    static REPORT: &str = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <testsuites name="ci" tests="3" failures="1" errors="0" skipped="0">
            <testsuite name="unit" tests="3" failures="1" errors="0" skipped="0">
                <testcase classname="math" name="adds"/>
                <testcase classname="math" name="subtracts">
                    <failure message="off by one">assert 1 == 2</failure>
                </testcase>
                <testcase classname="strings" name="concatenates"/>
            </testsuite>
        </testsuites>
    "#};

    fn write_report(dir: &Utf8TempDir) -> Utf8PathBuf {
        let path = dir.path().join("junit.xml");
        fs_err::write(&path, REPORT).expect("writing report succeeds");
        path
    }

    fn run(args: &[&str]) -> (Result<i32>, String) {
        let app = JunitSummaryApp::try_parse_from(args).expect("arguments are valid");
        let mut writer = OutputWriter::Test { stdout: Vec::new() };
        let result = app.exec(&mut writer);
        let OutputWriter::Test { stdout } = writer else {
            unreachable!("writer was created as a test writer")
        };
        (result, String::from_utf8(stdout).expect("stdout is UTF-8"))
    }

    #[test]
    fn parse_arguments() {
        let app = JunitSummaryApp::try_parse_from([
            "junit-summary",
            "--details",
            "--suite-prefix",
            "-o",
            "page.txt",
            "report.xml",
        ])
        .expect("arguments are valid");
        assert!(app.details);
        assert!(app.suite_prefix);
        assert_eq!(app.output.as_deref(), Some("page.txt".as_ref()));
        assert_eq!(app.path, "report.xml");

        JunitSummaryApp::try_parse_from(["junit-summary"]).expect_err("path is required");
        JunitSummaryApp::try_parse_from(["junit-summary", "--suite-prefix", "report.xml"])
            .expect_err("--suite-prefix requires --details");
    }

    #[test]
    fn summary_to_stdout() {
        let dir = Utf8TempDir::new().expect("creating temp dir succeeds");
        let path = write_report(&dir);

        let (result, stdout) = run(&["junit-summary", path.as_str()]);
        assert_eq!(result.expect("exec succeeds"), SummaryExitCode::OK);
        assert_eq!(
            stdout,
            indoc! {"
                <h1>Test report:</h1>
                Total: 3
                Passed: 2
                Failed: 1
                Skipped: 0
                Errored: 0
            "}
        );
    }

    #[test]
    fn details_to_file() {
        let dir = Utf8TempDir::new().expect("creating temp dir succeeds");
        let path = write_report(&dir);
        let output = dir.path().join("page.txt");

        let (result, stdout) = run(&[
            "junit-summary",
            "--details",
            "--suite-prefix",
            "--output",
            output.as_str(),
            path.as_str(),
        ]);
        assert_eq!(result.expect("exec succeeds"), SummaryExitCode::OK);
        assert_eq!(stdout, "", "nothing is written to stdout");

        let page = fs_err::read_to_string(&output).expect("output file exists");
        assert_eq!(
            page,
            indoc! {"
                <h1>Test report:</h1>
                Total: 3
                Passed: 2
                Failed: 1
                Skipped: 0
                Errored: 0
                <h2>unit</h2>
                math:adds: Passed
                math:subtracts: Failed
                strings:concatenates: Passed
            "}
        );
    }

    #[test]
    fn missing_report() {
        let dir = Utf8TempDir::new().expect("creating temp dir succeeds");
        let path = dir.path().join("missing.xml");

        let (result, stdout) = run(&["junit-summary", path.as_str()]);
        let err = result.expect_err("missing file fails");
        assert!(
            matches!(
                &err,
                ExpectedError::ParseError {
                    err: junit_summary::ParseError::Read { .. },
                    ..
                }
            ),
            "unexpected error: {err:?}"
        );
        assert_eq!(err.process_exit_code(), SummaryExitCode::PARSE_ERROR);
        assert_eq!(stdout, "");
    }

    #[test]
    fn malformed_report() {
        let dir = Utf8TempDir::new().expect("creating temp dir succeeds");
        let path = dir.path().join("bad.xml");
        fs_err::write(&path, "<testsuites><testsuite></testsuites>").expect("write succeeds");

        let (result, _) = run(&["junit-summary", path.as_str()]);
        let err = result.expect_err("malformed file fails");
        assert_eq!(err.process_exit_code(), SummaryExitCode::PARSE_ERROR);
    }

    #[test]
    fn unwritable_output() {
        let dir = Utf8TempDir::new().expect("creating temp dir succeeds");
        let path = write_report(&dir);
        let output = dir.path().join("no-such-dir").join("page.txt");

        let (result, _) = run(&["junit-summary", "-o", output.as_str(), path.as_str()]);
        let err = result.expect_err("writing into a missing directory fails");
        assert_eq!(err.process_exit_code(), SummaryExitCode::WRITE_OUTPUT_ERROR);
    }
}
