use crate::view::{self, Style, ViewNode};

/// Data rows shown before a table is cut off. The row after the cap is still shown
/// as the cutoff marker, so a long list renders `ROW_CAP + 1` rows.
pub const ROW_CAP: usize = 25;

pub type Extract<T> = Box<dyn Fn(&T) -> ViewNode + Send + Sync>;

pub struct Column<T> {
    pub label: &'static str,
    pub width_px: u32,
    pub extract: Extract<T>,
}

impl<T> Column<T> {
    pub fn new(
        label: &'static str,
        width_px: u32,
        extract: impl Fn(&T) -> ViewNode + Send + Sync + 'static,
    ) -> Self {
        Self {
            label,
            width_px,
            extract: Box::new(extract),
        }
    }
}

pub enum Order<T> {
    /// Newest first by the given key; ties keep their incoming order.
    Descending(fn(&T) -> i64),
    /// As delivered by the API.
    Natural,
}

pub fn render_table<T>(
    records: &[T],
    columns: &[Column<T>],
    order: Order<T>,
    empty_text: &str,
) -> ViewNode {
    let mut sorted: Vec<&T> = records.iter().collect();
    if let Order::Descending(key) = order {
        sorted.sort_by(|a, b| key(b).cmp(&key(a)));
    }

    let mut table = view::table().with_style(Style {
        fixed_layout: true,
        ..Style::default()
    });

    let mut header = view::tr();
    for column in columns {
        header.append(view::th(column.label, Some(column.width_px)));
    }
    table.append(header);

    let mut shown = 0;
    for record in sorted {
        let mut row = view::tr();
        for column in columns {
            row.append((column.extract)(record));
        }
        table.append(row);
        shown += 1;
        if shown > ROW_CAP && records.len() > ROW_CAP {
            break;
        }
    }

    if shown == 0 {
        let mut row = view::tr();
        row.append(view::td(empty_text).with_style(Style {
            colspan: Some(columns.len().max(1)),
            ..Style::default()
        }));
        table.append(row);
    }

    table
}

/// Cell for an address or network; long identifiers get a smaller font.
pub fn identifier_cell(text: &str) -> ViewNode {
    view::td(text).with_style(Style {
        monospace: true,
        small_font: text.chars().count() > 16,
        ..Style::default()
    })
}

pub fn text_cell(text: &str) -> ViewNode {
    view::td(text)
}

pub fn empty_cell() -> ViewNode {
    view::td("")
}
