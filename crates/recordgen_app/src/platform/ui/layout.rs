use recordgen_core::ViewportGeometry;

use super::constants::HEADER_LINES;

/// Scroll position of the terminal table, in lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    rows: usize,
}

impl Viewport {
    pub fn new(rows: usize) -> Self {
        Self {
            offset: 0,
            rows: rows.max(1),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Moves the viewport, clamped so it never passes the end of the content.
    pub fn scroll_by(&mut self, delta: i64, row_count: usize) {
        let max_offset = content_lines(row_count).saturating_sub(self.rows);
        let target = if delta.is_negative() {
            self.offset.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.offset = target.min(max_offset);
    }

    pub fn geometry(&self, row_count: usize) -> ViewportGeometry {
        ViewportGeometry {
            content_bottom: content_lines(row_count) as f64,
            viewport_bottom: (self.offset + self.rows) as f64,
        }
    }

    /// Indices of the data rows currently on screen.
    pub fn visible_rows(&self, row_count: usize) -> std::ops::Range<usize> {
        let start = self.offset.saturating_sub(HEADER_LINES).min(row_count);
        let end = (self.offset + self.rows)
            .saturating_sub(HEADER_LINES)
            .min(row_count);
        start..end
    }
}

fn content_lines(row_count: usize) -> usize {
    HEADER_LINES + row_count
}
