//! Click-aware building blocks shared by every screen.
//!
//! - [`TabBar`]: one row of labels (room navigation), each its own target.
//! - [`ClickableList`]: lines where some rows are buttons.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

struct Tab {
    label: String,
    style: Style,
    action_id: u16,
}

/// Horizontal labels separated by `separator`. Click targets follow the
/// rendered text widths.
pub struct TabBar<'a> {
    tabs: Vec<Tab>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push(Tab {
            label: label.into(),
            style,
            action_id,
        });
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// The tab row plus `(display_width, action_id)` for each label.
    fn layout_row(&self) -> (Line<'a>, Vec<(u16, u16)>) {
        let divider = Span::styled(self.separator, Style::default().fg(Color::DarkGray));
        let mut spans = Vec::with_capacity(self.tabs.len() * 2);
        let mut widths = Vec::with_capacity(self.tabs.len());
        for tab in &self.tabs {
            if !spans.is_empty() {
                spans.push(divider.clone());
            }
            let cell = Span::styled(format!(" {} ", tab.label), tab.style);
            widths.push((cell.width() as u16, tab.action_id));
            spans.push(cell);
        }
        (Line::from(spans), widths)
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let (row, widths) = self.layout_row();
        let separator_width = Span::raw(self.separator).width() as u16;
        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));

        let mut paragraph = Paragraph::new(row);
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        f.render_widget(paragraph, area);

        // columns from the inner rect, rows from the outer one so taps on
        // the border still land
        cs.register_tab_targets(
            &widths,
            separator_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with the action IDs of the clickable ones.
///
/// Targets are bound to line indices, so inserting a line above a button
/// moves its target with it.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for every clickable line.
    ///
    /// `top_offset`/`bottom_offset` are the rows taken by borders. Lines are
    /// assumed not to wrap.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row >= content_end {
                continue;
            }
            cs.add_row_target(area, row, action_id);
        }
    }
}
