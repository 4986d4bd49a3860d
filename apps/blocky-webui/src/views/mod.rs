pub mod frontpage;
pub mod search;

use crate::api_client::ApiError;
use crate::reltime;
use crate::shell::{Shell, Ticket};
use crate::table::{empty_cell, identifier_cell, text_cell, Column};
use crate::view::{self, ViewNode};
use blocky_shared::api::BlockEntry;
use chrono::{DateTime, Utc};

pub const NEVER: &str = "Never";

/// Allow and block entries share one column layout.
pub fn list_columns(now: DateTime<Utc>) -> Vec<Column<BlockEntry>> {
    vec![
        Column::new("Source IP", 300, |e: &BlockEntry| identifier_cell(&e.ip)),
        Column::new("Added", 120, move |e: &BlockEntry| {
            text_cell(&reltime::from_now(e.timestamp, now))
        }),
        Column::new("Expires", 120, move |e: &BlockEntry| {
            text_cell(&expiry_text(e.expires, now))
        }),
        Column::new("Reason", 500, |e: &BlockEntry| text_cell(&e.reason)),
        Column::new("Actions", 100, |_: &BlockEntry| empty_cell()),
    ]
}

pub fn expiry_text(expires: i64, now: DateTime<Utc>) -> String {
    if expires > 0 {
        reltime::from_now(expires, now)
    } else {
        NEVER.to_string()
    }
}

pub fn newest_first(entry: &BlockEntry) -> i64 {
    entry.timestamp
}

/// Raises the notification and swaps `placeholder` (or everything after the heading
/// when there is none) for an inline error message.
fn show_error(shell: &Shell, ticket: Ticket, what: &str, err: &ApiError, placeholder: Option<&ViewNode>) {
    shell.update(ticket, |main| {
        shell.notify(err.to_string());
        let message = view::p(format!("Could not load {}: {}", what, err));
        match placeholder.and_then(|p| main.iter().position(|n| n == p)) {
            Some(at) => main[at] = message,
            None => {
                main.truncate(1);
                main.push(message);
            }
        }
    });
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::api_client::{ApiError, Backend, Verb};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    pub const NOW: i64 = 1_700_000_000;

    pub fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(NOW, 0).unwrap()
    }

    pub fn block_entries(n: usize) -> Value {
        Value::Array(
            (0..n)
                .map(|i| {
                    json!({
                        "ip": format!("192.0.2.{}", i),
                        "timestamp": NOW - 3600 - i as i64 * 60,
                        "expires": if i % 2 == 0 { 0 } else { NOW + 86400 },
                        "reason": format!("reason {}", i),
                    })
                })
                .collect(),
        )
    }

    /// Canned responses keyed by path; records every call it sees.
    #[derive(Default)]
    pub struct StubBackend {
        pub all: Option<Value>,
        pub search: Option<Value>,
        pub failure: Option<ApiError>,
        pub calls: Mutex<Vec<(Verb, String, Option<Value>)>>,
    }

    #[async_trait]
    impl Backend for StubBackend {
        async fn request(&self, verb: Verb, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
            self.calls.lock().unwrap().push((verb, path.to_string(), body));
            if let Some(err) = &self.failure {
                return Err(err.clone());
            }
            let canned = match path {
                "all" => self.all.clone(),
                "search" => self.search.clone(),
                _ => None,
            };
            canned.ok_or_else(|| ApiError::Status {
                code: 404,
                reason: "Not Found".to_string(),
            })
        }
    }
}
