use std::cell::Cell;
use std::rc::Rc;

/// Hands out generation tickets so only the newest request may publish its
/// result. Older requests still run to completion; their results are dropped.
#[derive(Clone, Default)]
pub struct RequestGuard {
    generation: Rc<Cell<u64>>,
}

#[derive(Clone)]
pub struct Ticket {
    generation: Rc<Cell<u64>>,
    issued: u64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every ticket issued before.
    pub fn begin(&self) -> Ticket {
        let issued = self.generation.get() + 1;
        self.generation.set(issued);
        Ticket {
            generation: self.generation.clone(),
            issued,
        }
    }

    /// Supersedes outstanding tickets without starting a request, e.g. when
    /// the owning component unmounts.
    pub fn invalidate(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.generation.get() == self.issued
    }

    /// Runs `apply` only while this ticket is still the newest one.
    pub fn apply<T>(&self, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_current() {
            apply(value);
            true
        } else {
            log::debug!("dropping stale response (generation {})", self.issued);
            false
        }
    }
}
