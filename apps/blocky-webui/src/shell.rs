use crate::view::{self, ViewNode};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Handed out by [`Shell::begin`]; only the newest ticket may touch the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// The page a view renders into: the `main` region, pushed history entries and
/// user notifications.
#[derive(Default)]
pub struct Shell {
    generation: AtomicU64,
    main: Mutex<Vec<ViewNode>>,
    history: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new render; every earlier ticket goes stale.
    pub fn begin(&self) -> Ticket {
        let main = lock(&self.main);
        let ticket = Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        drop(main);
        ticket
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Applies `f` to the render target if `ticket` is still the newest render.
    /// Returns false when the update was discarded.
    pub fn update(&self, ticket: Ticket, f: impl FnOnce(&mut Vec<ViewNode>)) -> bool {
        let mut main = lock(&self.main);
        if !self.is_current(ticket) {
            tracing::debug!("Discarding stale render #{}", ticket.0);
            return false;
        }
        f(&mut main);
        true
    }

    pub fn push_history(&self, url: String) {
        tracing::debug!("history.pushState {}", url);
        lock(&self.history).push(url);
    }

    /// Blocking notification for the user.
    pub fn notify(&self, message: String) {
        tracing::warn!("{}", message);
        lock(&self.notices).push(message);
    }

    #[cfg(test)]
    pub fn main(&self) -> Vec<ViewNode> {
        lock(&self.main).clone()
    }

    pub fn main_html(&self) -> String {
        view::render_all(&lock(&self.main))
    }

    pub fn history(&self) -> Vec<String> {
        lock(&self.history).clone()
    }

    pub fn notices(&self) -> Vec<String> {
        lock(&self.notices).clone()
    }
}
