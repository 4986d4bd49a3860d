use super::{list_columns, newest_first, show_error};
use crate::api_client::Backend;
use crate::format::pretty_count;
use crate::shell::Shell;
use crate::table::{empty_cell, identifier_cell, render_table, text_cell, Column, Order};
use crate::view::{self, ViewNode};
use blocky_shared::api::{IptablesEntry, SearchResult};
use chrono::{DateTime, Utc};
use tracing::info;

const SEARCHING: &str = "Searching, please wait...";
const NO_RESULTS: &str = "No results found...";
const SEARCH_HINT: &str = "Use the search bar in the top left corner for now...";

/// Address-bar query for a search, as pushed onto the history.
pub fn search_url(target: &str) -> String {
    format!("?search:{}", urlencoding::encode(target))
}

/// Text of the first `/* ... */` comment in an iptables extension string, or the
/// whole string when it carries no comment.
pub fn comment_reason(extensions: &str) -> String {
    extensions
        .split_once("/*")
        .and_then(|(_, rest)| rest.split_once("*/"))
        .map(|(comment, _)| comment.trim())
        .filter(|comment| !comment.is_empty())
        .unwrap_or(extensions)
        .to_string()
}

fn iptables_columns() -> Vec<Column<IptablesEntry>> {
    vec![
        Column::new("Source IP", 300, |e: &IptablesEntry| identifier_cell(&e.source)),
        Column::new("Host", 200, |e: &IptablesEntry| text_cell(&e.hostname)),
        Column::new("Chain", 100, |e: &IptablesEntry| text_cell(&e.chain)),
        Column::new("Reason", 450, |e: &IptablesEntry| {
            text_cell(&comment_reason(&e.extensions))
        }),
        Column::new("Actions", 100, |_: &IptablesEntry| empty_cell()),
    ]
}

fn result_sections(results: &SearchResult, now: DateTime<Utc>) -> Vec<ViewNode> {
    vec![
        view::h2(format!("Allow list results ({})", pretty_count(results.allow.len()))),
        render_table(
            &results.allow,
            &list_columns(now),
            Order::Descending(newest_first),
            NO_RESULTS,
        ),
        view::h2(format!("Block list results ({})", pretty_count(results.block.len()))),
        render_table(
            &results.block,
            &list_columns(now),
            Order::Descending(newest_first),
            NO_RESULTS,
        ),
        view::h2(format!(
            "Local iptables results ({})",
            pretty_count(results.iptables.len())
        )),
        // Firewall rules carry no timestamp; keep the order the API reports them in.
        render_table(&results.iptables, &iptables_columns(), Order::Natural, NO_RESULTS),
    ]
}

/// Allow, block and firewall matches for `target`. A history replay must not push
/// another history entry.
pub async fn render_search(
    shell: &Shell,
    backend: &dyn Backend,
    now: DateTime<Utc>,
    target: &str,
    is_history_replay: bool,
) {
    if !is_history_replay {
        shell.push_history(search_url(target));
    }

    let ticket = shell.begin();
    let placeholder = view::p(SEARCHING);
    shell.update(ticket, |main| {
        main.clear();
        main.push(view::h1(format!("Search results for {}:", target)));
        main.push(placeholder.clone());
    });

    if target.is_empty() {
        shell.update(ticket, |main| {
            remove_node(main, &placeholder);
            main.push(view::p(SEARCH_HINT));
        });
        return;
    }

    info!("Searching for {}", target);
    let results = match backend.search(target).await {
        Ok(results) => results,
        Err(e) => {
            show_error(shell, ticket, "search results", &e, Some(&placeholder));
            return;
        }
    };

    let sections = result_sections(&results, now);
    shell.update(ticket, |main| {
        remove_node(main, &placeholder);
        main.extend(sections);
    });
}

fn remove_node(main: &mut Vec<ViewNode>, node: &ViewNode) {
    if let Some(at) = main.iter().position(|n| n == node) {
        main.remove(at);
    }
}
