//! Shared test doubles.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use netsim_state::{MemoryStore, StateStore};
use netsim_types::{Defect, Result, StateError, UserError};
use serde_json::Value;

use crate::action::Action;
use crate::diagnostics::Diagnostics;

/// A memory store whose `n`th write (1-based, counting `set` and `remove`)
/// fails with [`StateError::Unavailable`]. Earlier writes stay applied.
#[derive(Debug)]
pub struct FlakyStore {
    inner: MemoryStore,
    writes: Cell<usize>,
    fail_on: usize,
}

impl FlakyStore {
    pub fn failing_on_write(n: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            writes: Cell::new(0),
            fail_on: n,
        }
    }

    fn count_write(&self) -> Result<()> {
        let n = self.writes.get() + 1;
        self.writes.set(n);
        if n == self.fail_on {
            return Err(StateError::Unavailable(format!("injected failure on write {n}")).into());
        }
        Ok(())
    }
}

impl StateStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.count_write()?;
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.count_write()?;
        self.inner.remove(key)
    }
}

/// One report received by [`CapturingDiagnostics`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Command(Action, Vec<String>),
    Rejected(String, UserError),
    Defect(Defect),
    State(String),
}

/// Records every report. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct CapturingDiagnostics {
    events: Rc<RefCell<Vec<Event>>>,
}

impl CapturingDiagnostics {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl Diagnostics for CapturingDiagnostics {
    fn command(&self, action: Action, args: &[&str]) {
        let args = args.iter().map(|a| a.to_string()).collect();
        self.events.borrow_mut().push(Event::Command(action, args));
    }

    fn rejected(&self, line: &str, error: &UserError) {
        self.events
            .borrow_mut()
            .push(Event::Rejected(line.to_string(), error.clone()));
    }

    fn defect(&self, error: &Defect) {
        self.events.borrow_mut().push(Event::Defect(error.clone()));
    }

    fn state_failure(&self, error: &StateError) {
        self.events.borrow_mut().push(Event::State(error.to_string()));
    }
}
