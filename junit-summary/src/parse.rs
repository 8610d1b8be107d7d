// Copyright (c) The junit-summary Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read a `Report` from JUnit XML.
//!
//! The reader is deliberately lenient: unknown elements are skipped along with their children,
//! and counters missing from `testsuites`/`testsuite` are derived from the cases that were read.
//! It never checks the document against a schema.

use crate::{
    errors::ParseError,
    report::{NonSuccessKind, Report, Testcase, TestcaseStatus, Testsuite},
};
use indexmap::IndexMap;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use std::io;

static TESTSUITES_TAG: &[u8] = b"testsuites";
static TESTSUITE_TAG: &[u8] = b"testsuite";
static TESTCASE_TAG: &[u8] = b"testcase";
static FAILURE_TAG: &[u8] = b"failure";
static ERROR_TAG: &[u8] = b"error";
static SKIPPED_TAG: &[u8] = b"skipped";

static NAME_ATTR: &str = "name";
static CLASSNAME_ATTR: &str = "classname";
static MESSAGE_ATTR: &str = "message";
static TYPE_ATTR: &str = "type";
static TESTS_ATTR: &str = "tests";
static FAILURES_ATTR: &str = "failures";
static ERRORS_ATTR: &str = "errors";
static SKIPPED_ATTR: &str = "skipped";
static DISABLED_ATTR: &str = "disabled";

pub(crate) fn parse_report(reader: impl io::BufRead) -> Result<Report, ParseError> {
    let mut reader = Reader::from_reader(reader);
    reader.config_mut().trim_text(true);

    let mut parser = ReportParser::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) => parser.open(&e)?,
            Event::Empty(e) => {
                parser.open(&e)?;
                parser.close();
            }
            Event::End(_) => parser.close(),
            Event::Text(e) => parser.text(&e.unescape()?),
            Event::CData(e) => parser.text(&String::from_utf8_lossy(&e)),
            _ => {}
        }
        buf.clear();
    }

    parser.finish()
}

/// Counters declared as attributes on a `testsuites` or `testsuite` element.
#[derive(Copy, Clone, Debug, Default)]
struct DeclaredCounts {
    tests: Option<usize>,
    failures: Option<usize>,
    errors: Option<usize>,
    skipped: Option<usize>,
}

impl DeclaredCounts {
    fn take_from(
        element: &str,
        attributes: &mut IndexMap<String, String>,
    ) -> Result<Self, ParseError> {
        let skipped = match take_count(element, attributes, SKIPPED_ATTR)? {
            Some(skipped) => Some(skipped),
            None => take_count(element, attributes, DISABLED_ATTR)?,
        };
        Ok(Self {
            tests: take_count(element, attributes, TESTS_ATTR)?,
            failures: take_count(element, attributes, FAILURES_ATTR)?,
            errors: take_count(element, attributes, ERRORS_ATTR)?,
            skipped,
        })
    }
}

/// An element that is currently open.
#[derive(Debug)]
enum Frame {
    Testsuites,
    Testsuite {
        index: usize,
        declared: DeclaredCounts,
    },
    Testcase {
        suite: usize,
    },
    Result {
        suite: usize,
        text: String,
    },
    // Anything else, e.g. `properties` or `system-out`. Children are skipped as well.
    Skip,
}

impl Frame {
    fn tag(&self) -> &'static str {
        match self {
            Frame::Testsuites => "testsuites",
            Frame::Testsuite { .. } => "testsuite",
            Frame::Testcase { .. } => "testcase",
            Frame::Result { .. } => "result",
            Frame::Skip => "unknown",
        }
    }
}

#[derive(Debug, Default)]
struct ReportParser {
    report: Option<Report>,
    root_declared: Option<DeclaredCounts>,
    stack: Vec<Frame>,
}

impl ReportParser {
    fn open(&mut self, e: &BytesStart<'_>) -> Result<(), ParseError> {
        let element = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let local_name = e.local_name();

        let frame = match (self.stack.last(), &self.report) {
            (None, Some(_)) => {
                // A second root element. quick-xml doesn't reject these, so skip it.
                Frame::Skip
            }
            (None, None) => match local_name.as_ref() {
                tag if tag == TESTSUITES_TAG => {
                    let mut attributes = attributes(e)?;
                    let declared = DeclaredCounts::take_from(&element, &mut attributes)?;
                    let name = attributes.shift_remove(NAME_ATTR).unwrap_or_default();
                    self.report = Some(Report::new(name));
                    self.root_declared = Some(declared);
                    Frame::Testsuites
                }
                tag if tag == TESTSUITE_TAG => {
                    // A bare testsuite root: the report takes its name and counters from it.
                    let attributes = attributes(e)?;
                    let name = attributes.get(NAME_ATTR).cloned().unwrap_or_default();
                    self.report = Some(Report::new(name));
                    self.open_testsuite(&element, attributes)?
                }
                _ => return Err(ParseError::UnexpectedRoot { element }),
            },
            (Some(Frame::Skip | Frame::Result { .. }), _) => Frame::Skip,
            (Some(parent), _) => match local_name.as_ref() {
                tag if tag == TESTSUITES_TAG => {
                    return Err(unexpected(element, parent));
                }
                tag if tag == TESTSUITE_TAG => match parent {
                    Frame::Testsuites | Frame::Testsuite { .. } => {
                        self.open_testsuite(&element, attributes(e)?)?
                    }
                    _ => return Err(unexpected(element, parent)),
                },
                tag if tag == TESTCASE_TAG => match parent {
                    Frame::Testsuite { index, .. } => {
                        let index = *index;
                        self.open_testcase(index, attributes(e)?)
                    }
                    _ => return Err(unexpected(element, parent)),
                },
                tag if tag == FAILURE_TAG || tag == ERROR_TAG || tag == SKIPPED_TAG => {
                    match parent {
                        Frame::Testcase { suite } => {
                            let suite = *suite;
                            let status = result_status(tag, attributes(e)?);
                            self.set_last_status(suite, status);
                            Frame::Result {
                                suite,
                                text: String::new(),
                            }
                        }
                        // e.g. a suite-level <error> written by some runners.
                        _ => Frame::Skip,
                    }
                }
                _ => Frame::Skip,
            },
        };

        self.stack.push(frame);
        Ok(())
    }

    fn open_testsuite(
        &mut self,
        element: &str,
        mut attributes: IndexMap<String, String>,
    ) -> Result<Frame, ParseError> {
        let declared = DeclaredCounts::take_from(element, &mut attributes)?;
        let name = attributes.shift_remove(NAME_ATTR).unwrap_or_default();

        let mut testsuite = Testsuite::new(name);
        testsuite.extra = attributes;

        let report = self.report_mut();
        let index = report.testsuites.len();
        report.testsuites.push(testsuite);
        Ok(Frame::Testsuite { index, declared })
    }

    fn open_testcase(&mut self, suite: usize, mut attributes: IndexMap<String, String>) -> Frame {
        let name = attributes.shift_remove(NAME_ATTR).unwrap_or_default();
        let mut testcase = Testcase::new(name, TestcaseStatus::success());
        if let Some(classname) = attributes.shift_remove(CLASSNAME_ATTR) {
            testcase.set_classname(classname);
        }
        testcase.extra = attributes;

        self.report_mut().testsuites[suite].testcases.push(testcase);
        Frame::Testcase { suite }
    }

    fn set_last_status(&mut self, suite: usize, status: TestcaseStatus) {
        if let Some(testcase) = self.report_mut().testsuites[suite].testcases.last_mut() {
            testcase.status = status;
        }
    }

    fn text(&mut self, value: &str) {
        if let Some(Frame::Result { text, .. }) = self.stack.last_mut() {
            text.push_str(value);
        }
    }

    fn close(&mut self) {
        match self.stack.pop() {
            Some(Frame::Testsuite { index, declared }) => {
                finish_testsuite(&mut self.report_mut().testsuites[index], declared);
            }
            Some(Frame::Result { suite, text }) if !text.is_empty() => {
                if let Some(testcase) = self.report_mut().testsuites[suite].testcases.last_mut() {
                    testcase.status.set_description(text);
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Result<Report, ParseError> {
        let mut report = self.report.ok_or(ParseError::NoRootElement)?;

        match self.root_declared {
            Some(declared) => {
                let sum = |f: fn(&Testsuite) -> usize| -> usize {
                    report
                        .testsuites
                        .iter()
                        .fold(0usize, |acc, suite| acc.saturating_add(f(suite)))
                };
                let tests = declared.tests.unwrap_or_else(|| sum(|s| s.tests));
                let failures = declared.failures.unwrap_or_else(|| sum(|s| s.failures));
                let errors = declared.errors.unwrap_or_else(|| sum(|s| s.errors));
                let skipped = declared.skipped.unwrap_or_else(|| sum(|s| s.skipped));
                report.tests = tests;
                report.failures = failures;
                report.errors = errors;
                report.skipped = skipped;
            }
            None => {
                // Bare testsuite root. Nested suites are listed but the root suite's counters
                // already describe the whole document.
                if let Some(root) = report.testsuites.first() {
                    report.tests = root.tests;
                    report.failures = root.failures;
                    report.errors = root.errors;
                    report.skipped = root.skipped;
                }
            }
        }

        Ok(report)
    }

    fn report_mut(&mut self) -> &mut Report {
        // Frames other than the root are only pushed after the report is created.
        self.report.get_or_insert_with(Report::default)
    }
}

fn finish_testsuite(testsuite: &mut Testsuite, declared: DeclaredCounts) {
    let mut counted = Testsuite::new("");
    counted.add_testcases(testsuite.testcases.iter().cloned());

    testsuite.tests = declared.tests.unwrap_or(counted.tests);
    testsuite.failures = declared.failures.unwrap_or(counted.failures);
    testsuite.errors = declared.errors.unwrap_or(counted.errors);
    testsuite.skipped = declared.skipped.unwrap_or(counted.skipped);
}

fn result_status(tag: &[u8], mut attributes: IndexMap<String, String>) -> TestcaseStatus {
    let mut status = if tag == SKIPPED_TAG {
        TestcaseStatus::skipped()
    } else if tag == FAILURE_TAG {
        TestcaseStatus::non_success(NonSuccessKind::Failure)
    } else {
        TestcaseStatus::non_success(NonSuccessKind::Error)
    };

    if let Some(message) = attributes.shift_remove(MESSAGE_ATTR) {
        status.set_message(message);
    }
    if let Some(ty) = attributes.shift_remove(TYPE_ATTR) {
        status.set_type(ty);
    }
    status
}

fn attributes(e: &BytesStart<'_>) -> Result<IndexMap<String, String>, ParseError> {
    let mut map = IndexMap::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        map.insert(key, value);
    }
    Ok(map)
}

fn take_count(
    element: &str,
    attributes: &mut IndexMap<String, String>,
    attribute: &'static str,
) -> Result<Option<usize>, ParseError> {
    match attributes.shift_remove(attribute) {
        Some(value) => match value.trim().parse() {
            Ok(count) => Ok(Some(count)),
            Err(_) => Err(ParseError::InvalidCount {
                element: element.to_owned(),
                attribute,
                value,
            }),
        },
        None => Ok(None),
    }
}

fn unexpected(element: String, parent: &Frame) -> ParseError {
    ParseError::UnexpectedElement {
        element,
        parent: parent.tag().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn parse_testsuites_root() {
        let report: Report = indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <testsuites name="my-test-run" tests="4" failures="1" errors="1" skipped="1">
                <testsuite name="pytest" tests="4" failures="1" errors="1" skipped="1" hostname="ci-7">
                    <properties>
                        <property name="env" value="FOOBAR"/>
                    </properties>
                    <testcase classname="pkg.Mod" name="test_ok" time="0.001"/>
                    <testcase classname="pkg.Mod" name="test_x">
                        <failure message="assert 1 == 2" type="AssertionError">assert 1 == 2
            where 1 = f()</failure>
                    </testcase>
                    <testcase classname="pkg.Mod" name="test_err">
                        <error message="fixture blew up"/>
                        <system-out>some output</system-out>
                    </testcase>
                    <testcase classname="pkg.Other" name="test_skip">
                        <skipped message="not on this platform"/>
                    </testcase>
                </testsuite>
            </testsuites>
        "#}
        .parse()
        .expect("report parses");

        assert_eq!(report.name, "my-test-run");
        assert_eq!(
            (report.tests, report.failures, report.errors, report.skipped),
            (4, 1, 1, 1)
        );
        assert_eq!(report.testsuites.len(), 1);

        let suite = &report.testsuites[0];
        assert_eq!(suite.name, "pytest");
        assert_eq!(suite.extra.get("hostname").map(String::as_str), Some("ci-7"));

        let names: Vec<_> = suite.testcases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["test_ok", "test_x", "test_err", "test_skip"]);

        let ok = &suite.testcases[0];
        assert_eq!(ok.classname.as_deref(), Some("pkg.Mod"));
        assert_eq!(ok.status, TestcaseStatus::Success);
        assert_eq!(ok.extra.get("time").map(String::as_str), Some("0.001"));

        assert_eq!(
            suite.testcases[1].status,
            TestcaseStatus::NonSuccess {
                kind: NonSuccessKind::Failure,
                message: Some("assert 1 == 2".to_owned()),
                ty: Some("AssertionError".to_owned()),
                description: Some("assert 1 == 2\nwhere 1 = f()".to_owned()),
            }
        );
        assert_eq!(
            suite.testcases[2].status,
            TestcaseStatus::NonSuccess {
                kind: NonSuccessKind::Error,
                message: Some("fixture blew up".to_owned()),
                ty: None,
                description: None,
            }
        );
        assert_eq!(
            suite.testcases[3].status,
            TestcaseStatus::Skipped {
                message: Some("not on this platform".to_owned()),
                ty: None,
                description: None,
            }
        );
    }

    #[test]
    fn parse_bare_testsuite_root() {
        let report: Report = indoc! {r#"
            <testsuite name="pytest" tests="10" failures="2" errors="0" skipped="1">
                <testcase classname="a" name="one"/>
            </testsuite>
        "#}
        .parse()
        .expect("report parses");

        assert_eq!(report.name, "pytest");
        assert_eq!(
            (report.tests, report.failures, report.errors, report.skipped),
            (10, 2, 0, 1)
        );
        assert_eq!(report.testsuites.len(), 1);
        assert_eq!(report.testsuites[0].testcases.len(), 1);
    }

    #[test]
    fn missing_counters_are_derived() {
        let report: Report = indoc! {r#"
            <testsuites>
                <testsuite name="first">
                    <testcase name="a"/>
                    <testcase name="b"><failure/></testcase>
                </testsuite>
                <testsuite name="second" tests="3">
                    <testcase name="c"><skipped/></testcase>
                    <testcase name="d"><error>boom</error></testcase>
                </testsuite>
            </testsuites>
        "#}
        .parse()
        .expect("report parses");

        assert_eq!(report.name, "");
        assert_eq!(report.testsuites[0].tests, 2);
        assert_eq!(report.testsuites[0].failures, 1);
        // Declared counters win over counted ones.
        assert_eq!(report.testsuites[1].tests, 3);
        assert_eq!(report.testsuites[1].skipped, 1);
        assert_eq!(report.testsuites[1].errors, 1);
        assert_eq!(
            (report.tests, report.failures, report.errors, report.skipped),
            (5, 1, 1, 1)
        );
    }

    #[test]
    fn derived_counters_saturate() {
        let report: Report = indoc! {r#"
            <testsuites>
                <testsuite name="huge" tests="18446744073709551615"/>
                <testsuite name="one" tests="1"/>
            </testsuites>
        "#}
        .parse()
        .expect("report parses");

        assert_eq!(report.tests, usize::MAX);
        assert_eq!(report.testsuites[1].tests, 1);
    }

    #[test]
    fn nested_testsuites_keep_document_order() {
        let report: Report = indoc! {r#"
            <testsuites tests="2">
                <testsuite name="outer">
                    <testsuite name="inner">
                        <testcase name="deep"/>
                    </testsuite>
                    <testcase name="shallow"/>
                </testsuite>
            </testsuites>
        "#}
        .parse()
        .expect("report parses");

        let names: Vec<_> = report.testsuites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["outer", "inner"]);
        assert_eq!(report.testsuites[0].testcases[0].name, "shallow");
        assert_eq!(report.testsuites[1].testcases[0].name, "deep");
    }

    #[test]
    fn empty_testsuites() {
        let report: Report = r#"<testsuites name="empty"/>"#.parse().expect("report parses");
        assert_eq!(report, Report::new("empty"));
    }

    #[test]
    fn cdata_description() {
        let report: Report = indoc! {r#"
            <testsuite name="s">
                <testcase name="t"><failure><![CDATA[x < y]]></failure></testcase>
            </testsuite>
        "#}
        .parse()
        .expect("report parses");

        let status = &report.testsuites[0].testcases[0].status;
        assert!(matches!(
            status,
            TestcaseStatus::NonSuccess { description: Some(d), .. } if d == "x < y"
        ));
    }

    #[test_case("" ; "empty input")]
    #[test_case("<?xml version=\"1.0\"?>" ; "declaration only")]
    fn no_root_element(input: &str) {
        let err = input.parse::<Report>().expect_err("parse fails");
        assert!(matches!(err, ParseError::NoRootElement), "{err:?}");
    }

    #[test_case(r#"<html><body/></html>"#, "html" ; "html root")]
    #[test_case(r#"<testcase name="x"/>"#, "testcase" ; "testcase root")]
    fn unexpected_root(input: &str, expected: &str) {
        let err = input.parse::<Report>().expect_err("parse fails");
        match err {
            ParseError::UnexpectedRoot { element } => assert_eq!(element, expected),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn testcase_outside_testsuite() {
        let err = r#"<testsuites><testcase name="x"/></testsuites>"#
            .parse::<Report>()
            .expect_err("parse fails");
        match err {
            ParseError::UnexpectedElement { element, parent } => {
                assert_eq!(element, "testcase");
                assert_eq!(parent, "testsuites");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test_case(r#"<testsuites tests="many"/>"#, "tests", "many" ; "non-numeric")]
    #[test_case(r#"<testsuites failures="-1"/>"#, "failures", "-1" ; "negative")]
    #[test_case(r#"<testsuite errors="1.5"/>"#, "errors", "1.5" ; "fractional")]
    fn invalid_count(input: &str, expected_attribute: &str, expected_value: &str) {
        let err = input.parse::<Report>().expect_err("parse fails");
        match err {
            ParseError::InvalidCount {
                attribute, value, ..
            } => {
                assert_eq!(attribute, expected_attribute);
                assert_eq!(value, expected_value);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn mismatched_tags() {
        let err = r#"<testsuites><testsuite></testsuites>"#
            .parse::<Report>()
            .expect_err("parse fails");
        assert!(matches!(err, ParseError::Xml(_)), "{err:?}");
    }
}
