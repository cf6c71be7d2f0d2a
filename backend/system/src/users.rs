use std::cell::RefCell;
use std::collections::HashMap;

use cronlint_core::UserLookup;
use tracing::debug;

use crate::probe::{Probe, ProbeOutcome};

/// Account lookup backed by `id <name>`.
///
/// Answers are cached for the lifetime of the value. Anything other than a
/// clean non-zero exit from `id` counts as "exists".
pub struct SystemUsers<'p> {
    probe: &'p Probe,
    cache: RefCell<HashMap<String, bool>>,
}

impl<'p> SystemUsers<'p> {
    pub fn new(probe: &'p Probe) -> Self {
        Self { probe, cache: RefCell::new(HashMap::new()) }
    }

    fn lookup(&self, name: &str) -> bool {
        if cfg!(not(unix)) {
            return true;
        }
        match self.probe.run("id", &[name]) {
            ProbeOutcome::Completed(out) => out.success(),
            other => {
                debug!(user = name, outcome = ?other, "user lookup inconclusive, assuming it exists");
                true
            }
        }
    }
}

impl UserLookup for SystemUsers<'_> {
    fn exists(&self, name: &str) -> bool {
        if name == "root" {
            return true;
        }
        if let Some(&known) = self.cache.borrow().get(name) {
            return known;
        }
        let exists = self.lookup(name);
        self.cache.borrow_mut().insert(name.to_string(), exists);
        exists
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn root_never_shells_out() {
        let probe = Probe::new(Duration::from_secs(5)).unwrap();
        let users = SystemUsers::new(&probe);
        assert!(users.exists("root"));
        assert!(users.cache.borrow().is_empty());
    }

    #[test]
    fn answers_are_cached() {
        let probe = Probe::new(Duration::from_secs(5)).unwrap();
        let users = SystemUsers::new(&probe);
        let first = users.exists("cronlint_no_such_account");
        let second = users.exists("cronlint_no_such_account");
        assert_eq!(first, second);
        assert_eq!(users.cache.borrow().len(), 1);
    }
}
