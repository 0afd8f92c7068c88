use ratatui::layout::Rect;

use crate::config::{FRAME_WIDTH, HEIGHT};

/// Playfield coordinates to frame-buffer cells. Row 0 is the top border, so
/// the field starts one row down; columns line up one to one.
pub fn field_to_screen(x: f64, y: f64) -> (i32, i32) {
    (x.floor() as i32, y.floor() as i32 + 1)
}

/// Column at which `text` starts when centered across the frame.
pub fn centered_col(text: &str) -> i32 {
    let len = text.chars().count();
    (FRAME_WIDTH.saturating_sub(len) / 2) as i32
}

pub fn centered_rect(width: u16, height: u16, cols: u16, rows: u16) -> Rect {
    let actual_width = width.min(cols);
    let actual_height = height.min(rows);
    Rect::new(
        (cols - actual_width) / 2,
        (rows - actual_height) / 2,
        actual_width,
        actual_height,
    )
}

/// Folds any y back into `[0, HEIGHT - 1]` as if it had bounced off the top
/// and bottom walls as many times as needed.
pub fn reflect_into_field(y: f64) -> f64 {
    let max = HEIGHT - 1.0;
    let period = 2.0 * max;
    let folded = y.rem_euclid(period);
    if folded > max {
        period - folded
    } else {
        folded
    }
}
