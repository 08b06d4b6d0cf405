//! Puzzle tile: fixed target cell plus mutable placement and grab state

use crate::physics::is_upright;
use crate::pose::HandId;

/// Grid cell (row, col)
pub type Slot = (usize, usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub id: usize,
    pub target_row: usize,
    pub target_col: usize,

    /// Centre in normalized viewport coordinates
    pub x: f32,
    pub y: f32,
    /// Radians, unbounded
    pub rotation: f32,

    pub locked: bool,
    /// Slot the tile is locked into, `None` while free
    pub snapped: Option<Slot>,

    pub grabbed_by: Option<HandId>,
    /// gesture angle − tile rotation at grab time
    pub grab_angle_offset: f32,
}

impl Tile {
    pub fn new(id: usize, target_row: usize, target_col: usize, x: f32, y: f32, rotation: f32) -> Self {
        Self {
            id,
            target_row,
            target_col,
            x,
            y,
            rotation,
            locked: false,
            snapped: None,
            grabbed_by: None,
            grab_angle_offset: 0.0,
        }
    }

    pub fn target(&self) -> Slot {
        (self.target_row, self.target_col)
    }

    /// Locked, in its own slot, and upright within `epsilon`
    pub fn is_correct(&self, epsilon: f32) -> bool {
        self.locked && self.snapped == Some(self.target()) && is_upright(self.rotation, epsilon)
    }

    /// Snapped row, or -1 when free (matches the flat snapshot layout)
    pub fn snapped_row(&self) -> i32 {
        self.snapped.map_or(-1, |(r, _)| r as i32)
    }

    pub fn snapped_col(&self) -> i32 {
        self.snapped.map_or(-1, |(_, c)| c as i32)
    }

    pub fn unlock(&mut self) {
        self.locked = false;
        self.snapped = None;
    }

    pub(crate) fn lock_at(&mut self, slot: Slot, center: (f32, f32), rotation: f32) {
        self.locked = true;
        self.snapped = Some(slot);
        self.x = center.0;
        self.y = center.1;
        self.rotation = rotation;
        self.grabbed_by = None;
    }
}
