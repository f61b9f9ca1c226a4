//! Virtualized list window computation
//!
//! A genre row can hold hundreds of shows, but only the cards inside the
//! viewport (plus a symmetric overscan margin) are materialized; the rest
//! contribute spacer width so the row scrolls like it were fully laid
//! out. Scrolling recomputes the window from the new offset.

/// Fixed card width in pixels; used both for spacer sizing and for
/// computing how many cards fit the viewport.
pub const ITEM_WIDTH: u32 = 188;

/// Extra items materialized on each side of the visible range.
pub const OVERSCAN: usize = 5;

/// The materialized slice of a virtualized row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualWindow {
    /// Index of the first materialized item
    pub start: usize,
    /// One past the last materialized item
    pub end: usize,
    /// Spacer width covering the items before `start`
    pub leading_px: u32,
    /// Spacer width covering the items after `end`
    pub trailing_px: u32,
    /// Total scrollable width of the row
    pub total_px: u32,
}

impl VirtualWindow {
    /// Number of materialized items.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when nothing is materialized.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Computes the materialized window for a row of `item_count` cards,
/// given the viewport width and the horizontal scroll offset.
pub fn visible_window(
    item_count: usize,
    viewport_width: u32,
    scroll_offset: u32,
    overscan: usize,
) -> VirtualWindow {
    let total_px = item_count as u32 * ITEM_WIDTH;
    if item_count == 0 {
        return VirtualWindow {
            start: 0,
            end: 0,
            leading_px: 0,
            trailing_px: 0,
            total_px: 0,
        };
    }

    let first = (scroll_offset / ITEM_WIDTH) as usize;
    // Index of the item under the viewport's last pixel.
    let last = ((scroll_offset + viewport_width).saturating_sub(1) / ITEM_WIDTH) as usize;

    let start = first.saturating_sub(overscan).min(item_count);
    let end = (last + 1 + overscan).min(item_count);
    let start = start.min(end);

    VirtualWindow {
        start,
        end,
        leading_px: start as u32 * ITEM_WIDTH,
        trailing_px: (item_count - end) as u32 * ITEM_WIDTH,
        total_px,
    }
}
