//! Process-wide session: the single owner of the bearer token.
//!
//! Everything that needs the token asks the session; nothing reads storage
//! directly. Components that care about login/logout subscribe and get
//! notified on every transition.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::TOKEN_STORAGE_KEY;
use crate::storage::{LocalStorageStore, MemoryStore, TokenStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

type Listener = Rc<dyn Fn(SessionState)>;

#[derive(Default)]
struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Listener)>>,
}

#[derive(Clone)]
pub struct Session {
    store: Rc<dyn TokenStore>,
    listeners: Rc<Listeners>,
}

impl Session {
    pub fn new(store: Rc<dyn TokenStore>) -> Self {
        Session {
            store,
            listeners: Rc::new(Listeners::default()),
        }
    }

    /// Session backed by browser local storage, or by memory when the
    /// browser refuses storage access.
    pub fn from_browser() -> Self {
        match LocalStorageStore::open(TOKEN_STORAGE_KEY) {
            Some(store) => Session::new(Rc::new(store)),
            None => {
                log::warn!("local storage unavailable, session will not survive a reload");
                Session::new(Rc::new(MemoryStore::default()))
            }
        }
    }

    pub fn current_token(&self) -> Option<String> {
        self.store.get()
    }

    pub fn state(&self) -> SessionState {
        if self.current_token().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Stores a freshly issued token and moves to `Authenticated`.
    pub fn login(&self, token: &str) -> SessionState {
        self.store.set(token);
        log::info!("session authenticated");
        self.notify()
    }

    /// Drops the token whatever the prior state was.
    pub fn logout(&self) -> SessionState {
        self.store.remove();
        log::info!("session closed");
        self.notify()
    }

    /// Registers `listener` until the returned handle is dropped.
    pub fn subscribe(&self, listener: impl Fn(SessionState) + 'static) -> Subscription {
        let id = self.listeners.next_id.get();
        self.listeners.next_id.set(id + 1);
        self.listeners
            .entries
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    fn notify(&self) -> SessionState {
        let state = self.state();
        // Snapshot first: a listener may subscribe or unsubscribe while running.
        let listeners: Vec<Listener> = self
            .listeners
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(state);
        }
        state
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.listeners, &other.listeners)
    }
}

pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .entries
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
