//! Input normalisation and click hit-testing.
//!
//! Keyboard, mouse and touch all end up as an [`InputEvent`]. Clicks are
//! resolved against the targets registered during the last render, so a
//! game never sees pixels, only semantic action IDs.

use ratzilla::ratatui::layout::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key.
    Key(char),
    /// A tap on a registered target, identified by its action ID.
    Click(u16),
    Enter,
    Backspace,
    Escape,
}

/// A region that triggers an action when tapped.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cell coordinates.
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared between the render loop (which registers targets) and the mouse
/// handler (which hit-tests them).
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Full-width target on one row of `area`. Rows outside the area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Targets for a horizontal row of labels.
    ///
    /// `widths` holds `(display_width, action_id)` per label. Each target
    /// covers its label plus half of each neighbouring separator; the first
    /// and last stretch to the edges of `total_width`.
    pub fn register_tab_targets(
        &mut self,
        widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for i in 0..n {
            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };
            let right = if i == n - 1 {
                total_width
            } else {
                let end = starts[i] + widths[i].0;
                end + (starts[i + 1] - end) / 2
            };
            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), widths[i].1);
            }
        }
    }

    /// Action under a cell. Later targets sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }
}

pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Map a pixel offset inside the grid container to a cell index along one
/// axis. `None` outside the grid or for a degenerate grid.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    if cell >= cells {
        None
    } else {
        Some(cell)
    }
}
