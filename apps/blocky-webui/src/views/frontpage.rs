use super::{list_columns, newest_first, show_error};
use crate::api_client::Backend;
use crate::format::pretty_count;
use crate::shell::Shell;
use crate::table::{render_table, Order};
use crate::view;
use chrono::{DateTime, Utc};
use tracing::info;

const TITLE: &str = "Recent activity";
const NO_ACTIVITY: &str = "No activity found...";

/// Most recent block entries across the whole block list.
pub async fn render_frontpage(shell: &Shell, backend: &dyn Backend, now: DateTime<Utc>) {
    let ticket = shell.begin();
    info!("Rendering front page");

    let feed = match backend.fetch_activity().await {
        Ok(feed) => feed,
        Err(e) => {
            shell.update(ticket, |main| {
                main.clear();
                main.push(view::h1(TITLE));
            });
            show_error(shell, ticket, "recent activity", &e, None);
            return;
        }
    };

    let heading = view::h1(format!(
        "{} ({} blocks in total)",
        TITLE,
        pretty_count(feed.block.len())
    ));
    let table = render_table(
        &feed.block,
        &list_columns(now),
        Order::Descending(newest_first),
        NO_ACTIVITY,
    );

    shell.update(ticket, |main| {
        main.clear();
        main.push(heading);
        main.push(table);
    });
}
