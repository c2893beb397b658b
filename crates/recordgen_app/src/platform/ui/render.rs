use std::fmt::Write as _;

use recordgen_core::{AppViewModel, ExportStatus, RecordRowView};

use super::constants::*;
use super::layout::Viewport;

pub fn render(view: &AppViewModel, viewport: &Viewport) -> String {
    let mut out = String::new();

    let seed_label = match (view.seed.is_empty(), view.random_seed_active) {
        (true, _) => "(none)".to_string(),
        (false, true) => format!("{} (random)", view.seed),
        (false, false) => view.seed.clone(),
    };
    let _ = writeln!(
        out,
        "Region: {} | Errors per record: {} | Seed: {} | Rows: {}",
        view.region, view.error_count, seed_label, view.row_count
    );

    let _ = writeln!(
        out,
        "{:>w0$} {:<w1$} {:<w2$} {:<w3$} {:<w4$}",
        "#",
        "Identifier",
        "Name",
        "Address",
        "Phone",
        w0 = COL_NUMBER,
        w1 = COL_IDENTIFIER,
        w2 = COL_NAME,
        w3 = COL_ADDRESS,
        w4 = COL_PHONE,
    );
    let width = COL_NUMBER + COL_IDENTIFIER + COL_NAME + COL_ADDRESS + COL_PHONE + 4;
    let _ = writeln!(out, "{}", "-".repeat(width));

    for row in &view.rows[viewport.visible_rows(view.rows.len())] {
        let _ = writeln!(out, "{}", format_row(row));
    }

    if view.is_loading {
        let _ = writeln!(out, "{STATUS_LOADING}");
    } else if !view.has_more {
        let _ = writeln!(out, "{STATUS_EXHAUSTED}");
    }
    if let Some(error) = &view.last_error {
        let _ = writeln!(out, "Last fetch failed: {error} (scroll or `more` to retry)");
    }
    if let Some(error) = &view.input_error {
        let _ = writeln!(out, "Input: {error}");
    }
    match &view.last_export {
        Some(ExportStatus::Written { path, rows }) => {
            let _ = writeln!(out, "Exported {rows} rows to {path}");
        }
        Some(ExportStatus::Failed(message)) => {
            let _ = writeln!(out, "Export failed: {message}");
        }
        None => {}
    }
    if !view.export_enabled {
        let _ = writeln!(out, "Export unavailable: no rows loaded");
    }

    out
}

fn format_row(row: &RecordRowView) -> String {
    let record = &row.record;
    format!(
        "{:>w0$} {:<w1$.w1$} {:<w2$.w2$} {:<w3$.w3$} {:<w4$.w4$}",
        row.number,
        record.identifier,
        record.name,
        record.address,
        record.phone,
        w0 = COL_NUMBER,
        w1 = COL_IDENTIFIER,
        w2 = COL_NAME,
        w3 = COL_ADDRESS,
        w4 = COL_PHONE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordgen_core::Record;

    fn view_with_rows(count: usize) -> AppViewModel {
        let rows = (0..count)
            .map(|i| RecordRowView {
                number: i + 1,
                record: Record::new(format!("id-{i}"), "Name", "Street", "555"),
            })
            .collect::<Vec<_>>();
        AppViewModel {
            row_count: rows.len(),
            export_enabled: !rows.is_empty(),
            rows,
            has_more: true,
            ..AppViewModel::default()
        }
    }

    #[test]
    fn renders_numbered_rows_in_viewport() {
        let view = view_with_rows(30);
        let mut viewport = Viewport::new(4);
        viewport.scroll_by(12, view.row_count);

        let text = render(&view, &viewport);

        assert!(text.contains("id-10"));
        assert!(text.contains("id-13"));
        assert!(!text.contains("id-9 "));
        assert!(!text.contains("id-14"));
        assert!(text.contains("   11 id-10"));
    }

    #[test]
    fn shows_loading_and_exhausted_status() {
        let mut view = view_with_rows(3);
        view.is_loading = true;
        let viewport = Viewport::new(10);
        assert!(render(&view, &viewport).contains(STATUS_LOADING));

        view.is_loading = false;
        view.has_more = false;
        let text = render(&view, &viewport);
        assert!(text.contains(STATUS_EXHAUSTED));
        assert!(!text.contains(STATUS_LOADING));
    }

    #[test]
    fn empty_table_disables_export() {
        let view = view_with_rows(0);
        let text = render(&view, &Viewport::new(10));
        assert!(text.contains("Export unavailable"));
        assert!(text.contains("Seed: (none)"));
    }
}
