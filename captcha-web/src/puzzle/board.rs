//! Board geometry: where grid slots sit in normalized viewport space
//!
//! The board is a square of `board_fraction * min(width, height)` pixels,
//! centred in the viewport. Distances are aspect-corrected so a normalized
//! radius is the same on-screen length horizontally and vertically.

use super::tile::Slot;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardGeometry {
    pub width: f32,
    pub height: f32,
    pub rows: usize,
    pub cols: usize,
    pub board_fraction: f32,
}

impl BoardGeometry {
    pub fn new(width: f32, height: f32, rows: usize, cols: usize, board_fraction: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            rows: rows.max(1),
            cols: cols.max(1),
            board_fraction,
        }
    }

    /// height / width, applied to y deltas
    pub fn aspect(&self) -> f32 {
        self.height / self.width
    }

    /// Side of one cell in pixels
    pub fn cell_size_px(&self) -> f32 {
        self.board_fraction * self.width.min(self.height) / self.rows.max(self.cols) as f32
    }

    /// Slot centre in normalized coordinates
    pub fn slot_center(&self, (row, col): Slot) -> (f32, f32) {
        let board = self.board_fraction * self.width.min(self.height);
        let cell = self.cell_size_px();
        let start_x = (self.width - board) / 2.0;
        let start_y = (self.height - board) / 2.0;
        (
            (start_x + col as f32 * cell + cell / 2.0) / self.width,
            (start_y + row as f32 * cell + cell / 2.0) / self.height,
        )
    }

    pub fn distance(&self, a: (f32, f32), b: (f32, f32)) -> f32 {
        let dx = a.0 - b.0;
        let dy = (a.1 - b.1) * self.aspect();
        (dx * dx + dy * dy).sqrt()
    }

    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| (r, c)))
    }

    /// Nearest slot to `pos` strictly within `max_distance`
    pub fn nearest_slot(&self, pos: (f32, f32), max_distance: f32) -> Option<Slot> {
        let mut best: Option<(Slot, f32)> = None;
        for slot in self.slots() {
            let d = self.distance(pos, self.slot_center(slot));
            if d < max_distance && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((slot, d));
            }
        }
        best.map(|(slot, _)| slot)
    }
}
