use crate::api_client::Backend;
use crate::shell::Shell;
use crate::views::{frontpage, search};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Frontpage,
    Search,
}

impl Action {
    fn lookup(name: &str) -> Self {
        match name {
            "search" => Action::Search,
            // frontpage, and anything we do not know
            _ => Action::Frontpage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub action: Action,
    pub params: String,
}

/// Splits `?action:params`. The action is the run of leading lowercase letters;
/// params are everything after the colon that follows it, percent-decoded.
pub fn parse(query: &str) -> Route {
    let query = query.strip_prefix('?').unwrap_or(query);
    let split = query
        .find(|c: char| !c.is_ascii_lowercase())
        .unwrap_or(query.len());
    let (name, rest) = query.split_at(split);
    let raw = rest.strip_prefix(':').unwrap_or(rest);
    let params = urlencoding::decode(raw)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| raw.to_string());

    Route {
        action: Action::lookup(name),
        params,
    }
}

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct Router {
    backend: Arc<dyn Backend>,
    clock: Clock,
}

impl Router {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_clock(backend, Arc::new(Utc::now))
    }

    pub fn with_clock(backend: Arc<dyn Backend>, clock: Clock) -> Self {
        Self { backend, clock }
    }

    pub async fn dispatch(&self, shell: &Shell, query: &str, is_history_replay: bool) {
        let route = parse(query);
        info!(
            "Dispatching {:?} (params={:?}, replay={})",
            route.action, route.params, is_history_replay
        );

        let now = (self.clock)();
        match route.action {
            Action::Frontpage => frontpage::render_frontpage(shell, self.backend.as_ref(), now).await,
            Action::Search => {
                search::render_search(
                    shell,
                    self.backend.as_ref(),
                    now,
                    &route.params,
                    is_history_replay,
                )
                .await
            }
        }
    }

    /// Back/forward navigation restores `query` without pushing history again.
    pub async fn pop_state(&self, shell: &Shell, query: &str) {
        self.dispatch(shell, query, true).await
    }
}
