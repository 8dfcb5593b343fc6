use std::ops::Deref;
use std::rc::Rc;

use yew::Reducible;

use crate::models::{Finance, Task};

/// Anything listed by server id.
pub trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for Task {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Finance {
    fn key(&self) -> i64 {
        self.id
    }
}

pub enum ListAction<T> {
    /// A fresh list from the server.
    Loaded(Vec<T>),
    /// A mutated entity; ignored when the current list does not hold it.
    Replace(T),
    Remove(i64),
}

/// Rendered list. Mutation results are applied to whatever list is current
/// when they land, not to the one that was on screen when they were issued.
#[derive(Debug, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState { items: Vec::new() }
    }
}

impl<T> Deref for ListState<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: Keyed + Clone> Reducible for ListState<T> {
    type Action = ListAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let items = match action {
            ListAction::Loaded(items) => items,
            ListAction::Replace(updated) => {
                if !self.items.iter().any(|item| item.key() == updated.key()) {
                    return self;
                }
                self.items
                    .iter()
                    .map(|item| {
                        if item.key() == updated.key() {
                            updated.clone()
                        } else {
                            item.clone()
                        }
                    })
                    .collect()
            }
            ListAction::Remove(id) => self
                .items
                .iter()
                .filter(|item| item.key() != id)
                .cloned()
                .collect(),
        };
        Rc::new(ListState { items })
    }
}
