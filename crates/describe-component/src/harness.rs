//! In-crate test hosts.
//!
//! [`Spec`] is a nested describe/it runner and [`FlatSpec`] is a flat
//! `test`-style runner. Both implement [`Adapter`], so a suite factory can
//! register component suites on them, and both run their tests with
//! [`RunConfig`] into [`SuiteResults`].

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::describe::{Adapter, Hook};
use crate::result::DescribeResult;

/// Outcome of a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test was skipped after an earlier failure in fail-fast mode
    Skipped,
}

impl TestStatus {
    /// Check if status is passing
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if status is failing
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Result of running a single test
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Full test name
    pub name: String,
    /// Test status
    pub status: TestStatus,
    /// Error message if failed
    pub error: Option<String>,
    /// Test duration, hooks included
    pub duration: Duration,
}

impl TestResult {
    /// Create a passing test result
    #[must_use]
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Passed,
            error: None,
            duration: Duration::ZERO,
        }
    }

    /// Create a failing test result
    #[must_use]
    pub fn fail(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Failed,
            error: Some(error.into()),
            duration: Duration::ZERO,
        }
    }

    /// Create a skipped test result
    #[must_use]
    pub fn skip(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Skipped,
            error: None,
            duration: Duration::ZERO,
        }
    }

    /// Set duration
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the test passed
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.status.is_passed()
    }
}

/// Results from running a host's tests
#[derive(Debug, Clone)]
pub struct SuiteResults {
    /// Suite name
    pub suite_name: String,
    /// Individual test results, in registration order
    pub results: Vec<TestResult>,
    /// Total duration
    pub duration: Duration,
}

impl SuiteResults {
    /// Check that no test failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.results.iter().any(|r| r.status.is_failed())
    }

    /// Count passed tests
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.count(TestStatus::Passed)
    }

    /// Count failed tests
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(TestStatus::Failed)
    }

    /// Count skipped tests
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(TestStatus::Skipped)
    }

    /// Get total test count
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Get failed tests
    #[must_use]
    pub fn failures(&self) -> Vec<&TestResult> {
        self.results.iter().filter(|r| r.status.is_failed()).collect()
    }

    /// Look up a result by full test name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.name == name)
    }

    fn count(&self, status: TestStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

impl fmt::Display for SuiteResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            let mark = match result.status {
                TestStatus::Passed => "ok",
                TestStatus::Failed => "FAILED",
                TestStatus::Skipped => "skipped",
            };
            writeln!(f, "{} ... {mark}", result.name)?;
            if let Some(error) = &result.error {
                writeln!(f, "    {error}")?;
            }
        }
        write!(
            f,
            "{}: {} passed; {} failed; {} skipped; finished in {:.2?}",
            self.suite_name,
            self.passed_count(),
            self.failed_count(),
            self.skipped_count(),
            self.duration
        )
    }
}

const ROOT: usize = 0;

struct Group {
    name: Option<String>,
    parent: Option<usize>,
    before: Vec<Hook>,
    after: Vec<Hook>,
}

impl Group {
    fn new(name: Option<String>, parent: Option<usize>) -> Self {
        Self {
            name,
            parent,
            before: Vec::new(),
            after: Vec::new(),
        }
    }
}

struct TestEntry {
    group: usize,
    name: String,
    body: Hook,
}

/// Groups form a tree through parent indices; index 0 is the file scope.
struct Registry {
    groups: Vec<Group>,
    tests: Vec<TestEntry>,
    current: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            groups: vec![Group::new(None, None)],
            tests: Vec::new(),
            current: ROOT,
        }
    }
}

impl Registry {
    /// Group indices from the file scope down to `group`.
    fn chain(&self, group: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut cursor = Some(group);
        while let Some(index) = cursor {
            chain.push(index);
            cursor = self.groups[index].parent;
        }
        chain.reverse();
        chain
    }

    fn full_name(&self, chain: &[usize], test: &str) -> String {
        chain
            .iter()
            .filter_map(|&g| self.groups[g].name.as_deref())
            .chain(std::iter::once(test))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Puts the group cursor back when a `describe` body returns or unwinds.
struct CursorRestore<'a> {
    registry: &'a RefCell<Registry>,
    previous: usize,
}

impl Drop for CursorRestore<'_> {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.registry.try_borrow_mut() {
            registry.current = self.previous;
        }
    }
}

/// Nested describe/it host.
///
/// ```
/// use describe_component::{RunConfig, Spec};
///
/// let spec = Spec::new("math");
/// spec.describe("addition", || {
///     spec.it("adds", || {
///         assert_eq!(1 + 1, 2);
///         Ok(())
///     });
/// });
/// let results = spec.run(&RunConfig::default());
/// assert_eq!(results.get("addition adds").map(|r| r.passed()), Some(true));
/// ```
pub struct Spec {
    name: String,
    registry: RefCell<Registry>,
}

impl Spec {
    /// Create an empty host
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: RefCell::new(Registry::default()),
        }
    }

    /// Host name, used as the suite name in results
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open a group and run `body` inside it.
    pub fn describe(&self, name: &str, body: impl FnOnce()) {
        let previous = {
            let mut registry = self.registry.borrow_mut();
            let parent = registry.current;
            registry.groups.push(Group::new(Some(name.to_string()), Some(parent)));
            let index = registry.groups.len() - 1;
            std::mem::replace(&mut registry.current, index)
        };
        let _restore = CursorRestore {
            registry: &self.registry,
            previous,
        };
        body();
    }

    /// Register a test in the current group.
    pub fn it(&self, name: impl Into<String>, body: impl FnMut() -> DescribeResult<()> + 'static) {
        let mut registry = self.registry.borrow_mut();
        let group = registry.current;
        registry.tests.push(TestEntry {
            group,
            name: name.into(),
            body: Box::new(body),
        });
    }

    /// Run `hook` before each test of the current group and its subgroups.
    pub fn before_each(&self, hook: impl FnMut() -> DescribeResult<()> + 'static) {
        let mut registry = self.registry.borrow_mut();
        let group = registry.current;
        registry.groups[group].before.push(Box::new(hook));
    }

    /// Run `hook` after each test of the current group and its subgroups.
    pub fn after_each(&self, hook: impl FnMut() -> DescribeResult<()> + 'static) {
        let mut registry = self.registry.borrow_mut();
        let group = registry.current;
        registry.groups[group].after.push(Box::new(hook));
    }

    /// Number of registered tests
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.registry.borrow().tests.len()
    }

    /// Run every registered test in registration order.
    ///
    /// Tests excluded by the filter are left out of the results. Tests and
    /// hooks stay registered, so a host can be run more than once.
    ///
    /// # Panics
    ///
    /// With `catch_panics` off, the first panic from a hook or test body is
    /// resumed once that test's `after_each` hooks have run. Later tests do
    /// not run.
    #[must_use]
    pub fn run(&self, config: &RunConfig) -> SuiteResults {
        let start = Instant::now();
        // Hooks may call back into the host; hold no borrow while they run.
        let mut registry = std::mem::take(&mut *self.registry.borrow_mut());
        let (results, unwind) = run_registry(&mut registry, config);
        *self.registry.borrow_mut() = registry;
        if let Some(payload) = unwind {
            panic::resume_unwind(payload);
        }

        let results = SuiteResults {
            suite_name: self.name.clone(),
            results,
            duration: start.elapsed(),
        };
        info!(
            suite = %results.suite_name,
            passed = results.passed_count(),
            failed = results.failed_count(),
            skipped = results.skipped_count(),
            "suite finished"
        );
        results
    }
}

impl Adapter for Spec {
    fn describe(&self, name: &str, body: Box<dyn FnOnce() + '_>) {
        Self::describe(self, name, body);
    }

    fn before_each(&self, hook: Hook) {
        Self::before_each(self, hook);
    }

    fn after_each(&self, hook: Hook) {
        Self::after_each(self, hook);
    }

    fn before_each_name(&self) -> &str {
        "before_each"
    }
}

impl fmt::Debug for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spec")
            .field("name", &self.name)
            .field("tests", &self.test_count())
            .finish_non_exhaustive()
    }
}

/// Flat host without nested groups.
///
/// `describe` runs its body straight away and hooks apply to every test in
/// the host.
pub struct FlatSpec {
    inner: Spec,
}

impl FlatSpec {
    /// Create an empty host
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Spec::new(name),
        }
    }

    /// Register a test.
    pub fn test(&self, name: impl Into<String>, body: impl FnMut() -> DescribeResult<()> + 'static) {
        self.inner.it(name, body);
    }

    /// Run `hook` before every test.
    pub fn before_each(&self, hook: impl FnMut() -> DescribeResult<()> + 'static) {
        self.inner.before_each(hook);
    }

    /// Run `hook` after every test.
    pub fn after_each(&self, hook: impl FnMut() -> DescribeResult<()> + 'static) {
        self.inner.after_each(hook);
    }

    /// Number of registered tests
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.inner.test_count()
    }

    /// Run every registered test in registration order.
    #[must_use]
    pub fn run(&self, config: &RunConfig) -> SuiteResults {
        self.inner.run(config)
    }
}

impl Adapter for FlatSpec {
    fn describe(&self, name: &str, body: Box<dyn FnOnce() + '_>) {
        debug!(suite = name, "registering suite at file scope");
        body();
    }

    fn before_each(&self, hook: Hook) {
        self.inner.before_each(hook);
    }

    fn after_each(&self, hook: Hook) {
        self.inner.after_each(hook);
    }

    fn before_each_name(&self) -> &str {
        "test.before_each"
    }
}

impl fmt::Debug for FlatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatSpec")
            .field("name", &self.inner.name)
            .field("tests", &self.test_count())
            .finish_non_exhaustive()
    }
}

type Payload = Box<dyn Any + Send>;

enum Failure {
    Error(String),
    Panic(Payload),
}

/// Runs the planned tests. The payload of an uncaught panic comes back
/// alongside the results so the caller can restore state before resuming.
fn run_registry(registry: &mut Registry, config: &RunConfig) -> (Vec<TestResult>, Option<Payload>) {
    let plan: Vec<(usize, Vec<usize>, String)> = registry
        .tests
        .iter()
        .enumerate()
        .map(|(index, test)| {
            let chain = registry.chain(test.group);
            let full_name = registry.full_name(&chain, &test.name);
            (index, chain, full_name)
        })
        .filter(|(_, _, full_name)| config.selects(full_name))
        .collect();

    let Registry { groups, tests, .. } = registry;
    let mut results = Vec::with_capacity(plan.len());
    let mut stopped = false;
    let mut unwind: Option<Payload> = None;

    for (index, chain, full_name) in plan {
        if stopped {
            results.push(TestResult::skip(full_name));
            continue;
        }

        let start = Instant::now();
        let mut failure: Option<String> = None;
        let mut settle = |outcome: Failure| match outcome {
            Failure::Error(message) => message,
            Failure::Panic(payload) => {
                let message = panic_message(payload.as_ref());
                if !config.catch_panics && unwind.is_none() {
                    unwind = Some(payload);
                }
                message
            }
        };

        'before: for &group in &chain {
            for hook in &mut groups[group].before {
                if let Err(outcome) = invoke(hook) {
                    let e = settle(outcome);
                    failure = Some(format!("before_each hook failed: {e}"));
                    break 'before;
                }
            }
        }

        if failure.is_none() {
            if let Err(outcome) = invoke(&mut tests[index].body) {
                failure = Some(settle(outcome));
            }
        }

        for &group in chain.iter().rev() {
            for hook in &mut groups[group].after {
                if let Err(outcome) = invoke(hook) {
                    let e = settle(outcome);
                    warn!(test = %full_name, error = %e, "after_each hook failed");
                    failure.get_or_insert_with(|| format!("after_each hook failed: {e}"));
                }
            }
        }

        let result = match failure {
            None => TestResult::pass(&full_name),
            Some(error) => {
                debug!(test = %full_name, %error, "test failed");
                stopped = config.fail_fast;
                TestResult::fail(&full_name, error)
            }
        };
        results.push(result.with_duration(start.elapsed()));

        if unwind.is_some() {
            warn!(test = %full_name, "resuming panic after after_each hooks");
            break;
        }
    }

    (results, unwind)
}

/// Run a hook or test body, always catching a panic so the after hooks run.
fn invoke(hook: &mut Hook) -> Result<(), Failure> {
    match panic::catch_unwind(AssertUnwindSafe(|| hook())) {
        Ok(outcome) => outcome.map_err(|e| Failure::Error(e.to_string())),
        Err(payload) => Err(Failure::Panic(payload)),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::result::DescribeError;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn logger(log: &Log, entry: &str) -> impl FnMut() -> DescribeResult<()> + 'static {
        let log = Rc::clone(log);
        let entry = entry.to_string();
        move || {
            log.borrow_mut().push(entry.clone());
            Ok(())
        }
    }

    mod result_tests {
        use super::*;

        #[test]
        fn test_counts_and_failures() {
            let results = SuiteResults {
                suite_name: "s".to_string(),
                results: vec![
                    TestResult::pass("a"),
                    TestResult::fail("b", "boom"),
                    TestResult::skip("c"),
                ],
                duration: Duration::ZERO,
            };
            assert_eq!(results.total(), 3);
            assert_eq!(results.passed_count(), 1);
            assert_eq!(results.failed_count(), 1);
            assert_eq!(results.skipped_count(), 1);
            assert!(!results.all_passed());
            assert_eq!(results.failures()[0].name, "b");
        }

        #[test]
        fn test_display_summary() {
            let results = SuiteResults {
                suite_name: "widgets".to_string(),
                results: vec![TestResult::pass("a"), TestResult::fail("b", "boom")],
                duration: Duration::ZERO,
            };
            let text = results.to_string();
            assert!(text.contains("a ... ok"));
            assert!(text.contains("b ... FAILED\n    boom"));
            assert!(text.contains("widgets: 1 passed; 1 failed; 0 skipped"));
        }
    }

    mod spec_tests {
        use super::*;

        #[test]
        fn test_full_names_join_groups() {
            let spec = Spec::new("names");
            spec.it("top", || Ok(()));
            spec.describe("Outer", || {
                spec.describe("Inner", || {
                    spec.it("deep", || Ok(()));
                });
                spec.it("shallow", || Ok(()));
            });

            let results = spec.run(&RunConfig::default());
            let names: Vec<_> = results.results.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["top", "Outer Inner deep", "Outer shallow"]);
            assert!(results.all_passed());
        }

        #[test]
        fn test_hook_order() {
            let log: Log = Rc::default();
            let spec = Spec::new("order");
            spec.before_each(logger(&log, "before root"));
            spec.after_each(logger(&log, "after root"));
            spec.describe("group", || {
                spec.before_each(logger(&log, "before group"));
                spec.after_each(logger(&log, "after group"));
                spec.it("test", logger(&log, "body"));
            });

            let _ = spec.run(&RunConfig::default());
            assert_eq!(
                *log.borrow(),
                vec!["before root", "before group", "body", "after group", "after root"]
            );
        }

        #[test]
        fn test_sibling_group_hooks_do_not_leak() {
            let log: Log = Rc::default();
            let spec = Spec::new("siblings");
            spec.describe("a", || {
                spec.before_each(logger(&log, "before a"));
                spec.it("one", logger(&log, "a one"));
            });
            spec.describe("b", || {
                spec.it("two", logger(&log, "b two"));
            });

            let _ = spec.run(&RunConfig::default());
            assert_eq!(*log.borrow(), vec!["before a", "a one", "b two"]);
        }

        #[test]
        fn test_after_hooks_run_when_body_fails() {
            let log: Log = Rc::default();
            let spec = Spec::new("failures");
            spec.after_each(logger(&log, "after"));
            spec.it("errors", || Err(DescribeError::hook("nope")));
            spec.it("panics", || panic!("kaboom"));

            let results = spec.run(&RunConfig::default());
            assert_eq!(results.failed_count(), 2);
            assert_eq!(*log.borrow(), vec!["after", "after"]);
            assert_eq!(
                results.get("errors").unwrap().error.as_deref(),
                Some("Hook failed: nope")
            );
            assert_eq!(
                results.get("panics").unwrap().error.as_deref(),
                Some("panicked: kaboom")
            );
        }

        #[test]
        fn test_failed_before_hook_skips_body_but_runs_after() {
            let log: Log = Rc::default();
            let spec = Spec::new("before failure");
            spec.before_each(|| Err(DescribeError::hook("setup")));
            spec.after_each(logger(&log, "after"));
            spec.it("never", logger(&log, "body"));

            let results = spec.run(&RunConfig::default());
            assert_eq!(*log.borrow(), vec!["after"]);
            let error = results.get("never").unwrap().error.clone().unwrap();
            assert!(error.starts_with("before_each hook failed"));
        }

        #[test]
        fn test_failure_isolated_to_its_test() {
            let spec = Spec::new("isolation");
            spec.it("bad", || Err(DescribeError::hook("bad")));
            spec.it("good", || Ok(()));

            let results = spec.run(&RunConfig::default());
            assert!(results.get("good").unwrap().passed());
            assert_eq!(results.passed_count(), 1);
        }

        #[test]
        fn test_fail_fast_skips_rest() {
            let spec = Spec::new("fail fast");
            spec.it("first", || Err(DescribeError::hook("stop")));
            spec.it("second", || Ok(()));
            spec.it("third", || Ok(()));

            let results = spec.run(&RunConfig::default().with_fail_fast());
            assert_eq!(results.failed_count(), 1);
            assert_eq!(results.skipped_count(), 2);
            assert_eq!(results.get("third").unwrap().status, TestStatus::Skipped);
        }

        #[test]
        fn test_filter() {
            let spec = Spec::new("filter");
            spec.describe("Button", || {
                spec.it("clicks", || Ok(()));
            });
            spec.describe("Toggle", || {
                spec.it("flips", || Ok(()));
            });

            let results = spec.run(&RunConfig::default().with_filter("Toggle"));
            assert_eq!(results.total(), 1);
            assert_eq!(results.results[0].name, "Toggle flips");
        }

        #[test]
        fn test_run_twice() {
            let log: Log = Rc::default();
            let spec = Spec::new("rerun");
            spec.it("once", logger(&log, "body"));
            assert_eq!(spec.run(&RunConfig::default()).passed_count(), 1);
            assert_eq!(spec.run(&RunConfig::default()).passed_count(), 1);
            assert_eq!(log.borrow().len(), 2);
        }

        #[test]
        fn test_uncaught_panic_runs_after_hooks_then_resumes() {
            let log: Log = Rc::default();
            let spec = Spec::new("uncaught");
            spec.after_each(logger(&log, "after"));
            spec.it("panics", || panic!("kaboom"));
            spec.it("fine", logger(&log, "fine"));

            let config = RunConfig::default().with_catch_panics(false);
            let payload = panic::catch_unwind(AssertUnwindSafe(|| spec.run(&config))).unwrap_err();
            assert_eq!(panic_message(payload.as_ref()), "panicked: kaboom");
            assert_eq!(*log.borrow(), vec!["after"]);
            assert_eq!(spec.test_count(), 2);
        }

        #[test]
        fn test_uncaught_before_hook_panic_still_runs_after_hooks() {
            let log: Log = Rc::default();
            let spec = Spec::new("uncaught before");
            spec.before_each(|| panic!("setup"));
            spec.after_each(logger(&log, "after"));
            spec.it("never", logger(&log, "body"));

            let config = RunConfig::default().with_catch_panics(false);
            assert!(panic::catch_unwind(AssertUnwindSafe(|| spec.run(&config))).is_err());
            assert_eq!(*log.borrow(), vec!["after"]);

            let results = spec.run(&RunConfig::default());
            assert_eq!(
                results.get("never").unwrap().error.as_deref(),
                Some("before_each hook failed: panicked: setup")
            );
        }

        #[test]
        fn test_describe_restores_group_after_panic() {
            let spec = Spec::new("cursor");
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                spec.describe("Broken", || panic!("bad suite body"));
            }));
            assert!(outcome.is_err());
            spec.it("top", || Ok(()));

            let results = spec.run(&RunConfig::default());
            assert_eq!(results.results[0].name, "top");
        }

        #[test]
        fn test_adapter_describe_groups() {
            let spec = Spec::new("adapter");
            Adapter::describe(
                &spec,
                "Widget",
                Box::new(|| {
                    spec.it("works", || Ok(()));
                }),
            );
            assert_eq!(Adapter::before_each_name(&spec), "before_each");
            let results = spec.run(&RunConfig::default());
            assert_eq!(results.results[0].name, "Widget works");
        }
    }

    mod flat_spec_tests {
        use super::*;

        #[test]
        fn test_describe_does_not_group() {
            let flat = FlatSpec::new("flat");
            Adapter::describe(
                &flat,
                "Widget",
                Box::new(|| {
                    flat.test("works", || Ok(()));
                }),
            );
            let results = flat.run(&RunConfig::default());
            assert_eq!(results.results[0].name, "works");
            assert_eq!(Adapter::before_each_name(&flat), "test.before_each");
        }

        #[test]
        fn test_hooks_apply_to_every_test() {
            let log: Log = Rc::default();
            let flat = FlatSpec::new("flat hooks");
            flat.before_each(logger(&log, "before"));
            flat.test("a", logger(&log, "a"));
            flat.test("b", logger(&log, "b"));
            flat.after_each(logger(&log, "after"));

            let _ = flat.run(&RunConfig::default());
            assert_eq!(
                *log.borrow(),
                vec!["before", "a", "after", "before", "b", "after"]
            );
        }
    }
}
