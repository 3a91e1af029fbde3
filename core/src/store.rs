// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Observable view-model stores.
//!
//! A store owns one [`Observable`] state. Actions run on the tokio runtime
//! and return their [`JoinHandle`](tokio::task::JoinHandle) right away;
//! callers await the handle when they need the settled state, or subscribe
//! to follow every change. Actions of one store run one at a time in the
//! order they were issued.

mod crud;
mod profile;
mod session;

use std::any::Any;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

pub use crate::store::crud::{
    CrudMessages, CrudRepository, CrudState, CrudStore, Entity, EventStore, UserStore,
};
pub use crate::store::profile::{ProfileState, ProfileStore};
pub use crate::store::session::{SessionState, SessionStore};

/// A value that notifies subscribers whenever it changes.
#[derive(Debug)]
pub struct Observable<S> {
    tx: watch::Sender<S>,
}

impl<S: Clone + PartialEq> Observable<S> {
    /// Creates an observable holding `initial`.
    pub fn new(initial: S) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Receiver that sees every later change.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// A copy of the current value.
    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Applies `f` to the value. Subscribers are woken only if the value
    /// actually changed; the return value tells whether it did.
    pub fn update(&self, f: impl FnOnce(&mut S)) -> bool {
        self.tx.send_if_modified(|state| {
            let before = state.clone();
            f(state);
            *state != before
        })
    }
}

/// A value that is fetched asynchronously.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Loadable<T> {
    /// Nothing requested yet, or nothing to load.
    #[default]
    NotLoaded,
    /// A request is in flight.
    Loading,
    /// The value arrived.
    Loaded(T),
    /// The request failed with this message.
    Failed(String),
}

impl<T> Loadable<T> {
    /// The loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(a) => Some(a),
            _ => None,
        }
    }

    /// Mutable access to the loaded value, if any.
    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Loaded(a) => Some(a),
            _ => None,
        }
    }
}

/// Runs spawned actions strictly in the order they were issued.
///
/// Each action waits for the one issued before it. A panicking action still
/// releases its successor because its completion sender is dropped.
#[derive(Debug, Default)]
struct Sequencer {
    tail: Mutex<Option<oneshot::Receiver<()>>>,
}

impl Sequencer {
    fn spawn<F>(&self, action: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (done, next) = oneshot::channel();
        let prev = self
            .tail
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(next);

        tokio::spawn(async move {
            if let Some(prev) = prev {
                let _ = prev.await;
            }
            action.await;
            let _ = done.send(());
        })
    }
}

/// Best-effort text of a caught panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected failure".to_string()
    }
}
