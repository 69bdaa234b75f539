//! View State Primitives
//!
//! Load state shared by every page, and the generation guard that keeps
//! late responses from overwriting newer state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Loading / ready / error state of a page.
///
/// `Loading` keeps the previous snapshot so a refresh never blanks a
/// page that already had data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading { previous: Option<T> },
    Ready(T),
    Error(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading { previous: None }
    }
}

impl<T: Clone> LoadState<T> {
    /// Enter `Loading`, carrying forward any visible data
    pub fn begin_loading(&self) -> Self {
        LoadState::Loading {
            previous: self.visible().cloned(),
        }
    }
}

impl<T> LoadState<T> {
    /// Data to show right now (ready data, or the stale snapshot while loading)
    pub fn visible(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            LoadState::Loading { previous } => previous.as_ref(),
            LoadState::Error(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Generation counter with a disposal flag.
///
/// A ticket is issued when a fetch starts and checked before its result
/// is committed. Starting a newer fetch or disposing the view
/// invalidates every outstanding ticket.
#[derive(Debug, Default)]
pub struct FetchGuard {
    generation: AtomicU64,
    disposed: AtomicBool,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation; `None` once disposed
    pub fn issue(&self) -> Option<Ticket> {
        if self.is_disposed() {
            return None;
        }
        Some(Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1))
    }

    /// Whether a result for `ticket` may still be committed
    pub fn is_current(&self, ticket: Ticket) -> bool {
        !self.is_disposed() && self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidate all tickets for good. Returns `false` if already disposed.
    pub fn dispose(&self) -> bool {
        !self.disposed.swap(true, Ordering::SeqCst)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}
