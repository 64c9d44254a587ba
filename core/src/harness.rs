#![deny(missing_docs)]

//! # In-Process Harness
//!
//! A [`TestBackend`] that records the registered tree and later executes it
//! on the caller's async runtime.
//!
//! Execution is sequential on a single task: entries run depth-first in
//! registration order, and each non-skipped entry first awaits every hook of
//! its enclosing groups (outermost first). A failing or panicking check only
//! fails its own entry.

use std::any::Any;
use std::env;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;

use crate::backend::TestBackend;
use crate::report::{CaseOutcome, CaseStatus, RunReport};
use crate::surface::{CaseFailure, Check, CheckResult, Hook};

/// Environment variable read by [`HarnessConfig::from_env`].
pub const FILTER_ENV: &str = "TODOS_SUITE_FILTER";

/// Harness settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Only entries whose full name contains this substring run.
    pub filter: Option<String>,
}

impl HarnessConfig {
    /// Reads the filter from `TODOS_SUITE_FILTER`; unset or blank means no filter.
    pub fn from_env() -> Self {
        let filter = env::var(FILTER_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Self { filter }
    }

    fn selects(&self, full_name: &str) -> bool {
        self.filter
            .as_deref()
            .map_or(true, |needle| full_name.contains(needle))
    }
}

enum Entry {
    Test(Check),
    Skip,
}

enum Node {
    Group(Group),
    Entry { name: String, entry: Entry },
}

#[derive(Default)]
struct Group {
    name: String,
    hooks: Vec<Hook>,
    children: Vec<Node>,
}

/// A flattened entry, ready to run.
struct Planned {
    groups: Vec<String>,
    hooks: Vec<Hook>,
    name: String,
    entry: Entry,
}

/// Records registrations, then runs them.
pub struct Harness {
    config: HarnessConfig,
    // stack[0] is the unnamed root.
    stack: Vec<Group>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(HarnessConfig::default())
    }
}

impl Harness {
    /// Creates an empty harness.
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            stack: vec![Group::default()],
        }
    }

    /// Number of registered entries (tests and skips).
    pub fn len(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|n| match n {
                    Node::Group(g) => count(&g.children),
                    Node::Entry { .. } => 1,
                })
                .sum()
        }
        self.stack.iter().map(|g| count(&g.children)).sum()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn current(&mut self) -> &mut Group {
        // The root frame is never popped.
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Executes every registered entry and collects the outcomes.
    pub async fn run(mut self) -> RunReport {
        while self.stack.len() > 1 {
            tracing::warn!("closing unbalanced group before run");
            self.close_group();
        }
        let root = self.stack.remove(0);

        let mut plan = Vec::new();
        flatten(root, &[], &[], &mut plan);

        let mut report = RunReport::default();
        for planned in plan {
            let outcome = execute(&self.config, planned).await;
            report.outcomes.push(outcome);
        }

        tracing::info!(
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            filtered = report.filtered(),
            "suite finished"
        );
        report
    }
}

impl TestBackend for Harness {
    fn open_group(&mut self, name: &str) {
        self.stack.push(Group {
            name: name.to_string(),
            ..Group::default()
        });
    }

    fn close_group(&mut self) {
        if self.stack.len() == 1 {
            tracing::warn!("close_group without an open group");
            return;
        }
        if let Some(group) = self.stack.pop() {
            self.current().children.push(Node::Group(group));
        }
    }

    fn before_each(&mut self, hook: Hook) {
        self.current().hooks.push(hook);
    }

    fn test(&mut self, name: String, check: Check) {
        self.current().children.push(Node::Entry {
            name,
            entry: Entry::Test(check),
        });
    }

    fn skip(&mut self, name: String) {
        self.current().children.push(Node::Entry {
            name,
            entry: Entry::Skip,
        });
    }
}

fn flatten(group: Group, groups: &[String], hooks: &[Hook], out: &mut Vec<Planned>) {
    let mut hooks = hooks.to_vec();
    hooks.extend(group.hooks);

    for node in group.children {
        match node {
            Node::Group(child) => {
                let mut names = groups.to_vec();
                names.push(child.name.clone());
                flatten(child, &names, &hooks, out);
            }
            Node::Entry { name, entry } => out.push(Planned {
                groups: groups.to_vec(),
                hooks: hooks.clone(),
                name,
                entry,
            }),
        }
    }
}

async fn execute(config: &HarnessConfig, planned: Planned) -> CaseOutcome {
    let Planned {
        groups,
        hooks,
        name,
        entry,
    } = planned;
    let mut outcome = CaseOutcome {
        groups,
        name,
        status: CaseStatus::Skipped,
        elapsed_ms: 0,
    };
    let full_name = outcome.full_name();

    let check = match entry {
        Entry::Skip => {
            tracing::info!(test = %full_name, "skipped");
            return outcome;
        }
        Entry::Test(check) => check,
    };

    if !config.selects(&full_name) {
        outcome.status = CaseStatus::Filtered;
        return outcome;
    }

    let started = Instant::now();
    let result = run_case(&hooks, check).await;
    outcome.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    outcome.status = match result {
        Ok(()) => {
            tracing::info!(test = %full_name, elapsed_ms = outcome.elapsed_ms, "ok");
            CaseStatus::Passed
        }
        Err(failure) => {
            tracing::warn!(test = %full_name, error = %failure, "FAILED");
            CaseStatus::Failed {
                message: failure.message().to_string(),
            }
        }
    };
    outcome
}

async fn run_case(hooks: &[Hook], check: Check) -> CheckResult {
    for hook in hooks {
        let hook = hook.clone();
        guarded(async move { hook().await })
            .await
            .map_err(|e| CaseFailure::msg(format!("setup hook failed: {}", e)))?;
    }
    guarded(async move { check().await }).await
}

/// Awaits `fut`, turning a panic into a failure.
async fn guarded(fut: impl std::future::Future<Output = CheckResult>) -> CheckResult {
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(CaseFailure::msg(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::LocalBoxFuture;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn check(f: impl FnOnce() -> CheckResult + 'static) -> Check {
        Box::new(move || async move { f() }.boxed_local())
    }

    fn hook(f: impl Fn() -> CheckResult + 'static) -> Hook {
        let f = Rc::new(f);
        Rc::new(move || -> LocalBoxFuture<'static, CheckResult> {
            let f = Rc::clone(&f);
            async move { f() }.boxed_local()
        })
    }

    #[test]
    fn test_runs_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut harness = Harness::default();

        harness.open_group("/todos/");
        for label in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            harness.test(
                label.to_string(),
                check(move || {
                    log.borrow_mut().push(label);
                    Ok(())
                }),
            );
        }
        harness.close_group();
        assert_eq!(harness.len(), 3);

        let report = block_on(harness.run());
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(report.passed(), 3);
        assert_eq!(report.outcomes[0].groups, vec!["/todos/".to_string()]);
    }

    #[test]
    fn test_failure_is_isolated() {
        let mut harness = Harness::default();
        harness.test("err".into(), check(|| Err(CaseFailure::msg("bad status"))));
        harness.test("panic".into(), check(|| panic!("assertion exploded")));
        harness.test("fine".into(), check(|| Ok(())));

        let report = block_on(harness.run());
        assert_eq!(report.failed(), 2);
        assert_eq!(report.passed(), 1);
        assert_eq!(
            report.outcomes[0].status,
            CaseStatus::Failed {
                message: "bad status".into()
            }
        );
        assert_eq!(
            report.outcomes[1].status,
            CaseStatus::Failed {
                message: "panicked: assertion exploded".into()
            }
        );
    }

    #[test]
    fn test_skip_never_invokes() {
        let mut harness = Harness::default();
        harness.skip("later".into());
        let report = block_on(harness.run());
        assert_eq!(report.skipped(), 1);
        assert!(report.is_success());
    }

    #[test]
    fn test_hooks_run_outermost_first_for_nested_entries() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut harness = Harness::default();

        let outer_log = Rc::clone(&log);
        harness.open_group("/todos/");
        harness.before_each(hook(move || {
            outer_log.borrow_mut().push("outer".to_string());
            Ok(())
        }));
        harness.open_group("GET");
        let inner_log = Rc::clone(&log);
        harness.before_each(hook(move || {
            inner_log.borrow_mut().push("inner".to_string());
            Ok(())
        }));
        let case_log = Rc::clone(&log);
        harness.test(
            "[GET] ".into(),
            check(move || {
                case_log.borrow_mut().push("case".to_string());
                Ok(())
            }),
        );
        harness.close_group();
        harness.open_group("POST");
        // The GET hook does not leak into sibling groups.
        let post_log = Rc::clone(&log);
        harness.test(
            "[POST] ".into(),
            check(move || {
                post_log.borrow_mut().push("post".to_string());
                Ok(())
            }),
        );
        harness.close_group();
        harness.close_group();

        block_on(harness.run());
        assert_eq!(
            *log.borrow(),
            vec!["outer", "inner", "case", "outer", "post"]
        );
    }

    #[test]
    fn test_failing_hook_fails_case_without_running_it() {
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let mut harness = Harness::default();
        harness.before_each(hook(|| Err(CaseFailure::msg("no fixture"))));
        harness.test(
            "x".into(),
            check(move || {
                flag.set(true);
                Ok(())
            }),
        );

        let report = block_on(harness.run());
        assert!(!ran.get());
        assert_eq!(
            report.outcomes[0].status,
            CaseStatus::Failed {
                message: "setup hook failed: no fixture".into()
            }
        );
    }

    #[test]
    fn test_filter_excludes_non_matching() {
        let mut harness = Harness::new(HarnessConfig {
            filter: Some("[POST]".into()),
        });
        harness.open_group("/todos/");
        harness.test("[GET] ".into(), check(|| panic!("must not run")));
        harness.test("[POST] ".into(), check(|| Ok(())));
        harness.close_group();

        let report = block_on(harness.run());
        assert_eq!(report.filtered(), 1);
        assert_eq!(report.passed(), 1);
        assert!(report.is_success());
    }

    #[test]
    fn test_unbalanced_groups_are_closed() {
        let mut harness = Harness::default();
        harness.close_group();
        harness.open_group("/todos/");
        harness.test("t".into(), check(|| Ok(())));

        let report = block_on(harness.run());
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].full_name(), "/todos/ t");
    }

    #[test]
    fn test_config_from_env() {
        env::set_var(FILTER_ENV, "  [GET]  ");
        assert_eq!(HarnessConfig::from_env().filter.as_deref(), Some("[GET]"));
        env::set_var(FILTER_ENV, " ");
        assert_eq!(HarnessConfig::from_env().filter, None);
        env::remove_var(FILTER_ENV);
    }
}
