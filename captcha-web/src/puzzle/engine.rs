//! Puzzle engine - pinch to grab, drag to move/rotate, release to snap
//!
//! Per frame and per hand:
//! - pinching + holding  → drag the held tile (smoothed) and rotate it
//! - pinching + empty    → grab the nearest free, not-yet-correct tile
//! - released + holding  → drop the tile and try to snap it into the grid
//!
//! Completion is re-derived from live tile state every frame.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::board::BoardGeometry;
use super::config::PuzzleConfig;
use super::tile::{Slot, Tile};
use crate::physics::quantize_right_angle;
use crate::pose::{HandId, HandPose};

/// Result of a snap attempt on a released tile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapOutcome {
    /// Tile was already correct; nothing changed
    AlreadyCorrect,
    /// Tile is still held by a hand
    Held,
    /// Rotation too far from a multiple of 90°
    RotationRejected,
    /// No slot within snap distance
    NoSlot,
    /// Nearest slot holds a correct tile, which cannot be displaced
    BlockedByCorrect { slot: Slot },
    /// Tile locked into `slot`; `evicted` is the id of a displaced occupant
    Locked { slot: Slot, correct: bool, evicted: Option<usize> },
}

pub struct PuzzleEngine {
    config: PuzzleConfig,
    board: BoardGeometry,
    tiles: Vec<Tile>,
    errors: u32,
    completed: bool,
    /// Frames since each holding hand was last seen
    missing_frames: BTreeMap<HandId, u32>,
    rng: StdRng,
}

impl PuzzleEngine {
    /// Build the grid and scatter tiles at random positions and rotations
    pub fn new(config: PuzzleConfig, width: f32, height: f32, seed: u64) -> Self {
        let board = BoardGeometry::new(width, height, config.rows, config.cols, config.board_fraction);
        let mut rng = StdRng::seed_from_u64(seed);

        let lo = config.scatter_margin;
        let hi = 1.0 - config.scatter_margin;
        let mut tiles = Vec::with_capacity(board.rows * board.cols);
        for (id, (row, col)) in board.slots().enumerate() {
            let x = uniform(&mut rng, lo, hi);
            let y = uniform(&mut rng, lo, hi);
            let rotation = uniform(&mut rng, 0.0, TAU);
            tiles.push(Tile::new(id, row, col, x, y, rotation));
        }

        debug!("puzzle created: {}x{} tiles", board.rows, board.cols);

        Self {
            config,
            board,
            tiles,
            errors: 0,
            completed: false,
            missing_frames: BTreeMap::new(),
            rng,
        }
    }

    /// Process one frame of hand poses.
    ///
    /// Returns true exactly once: on the frame all tiles first become
    /// correct at the same time.
    pub fn step(&mut self, poses: &[HandPose]) -> bool {
        self.release_orphaned_grabs(poses);

        for pose in poses {
            self.process_hand(pose);
        }

        if !self.completed && self.is_solved() {
            self.completed = true;
            info!("puzzle solved with {} errors", self.errors);
            return true;
        }
        false
    }

    /// Every tile correct right now
    pub fn is_solved(&self) -> bool {
        let eps = self.config.correct_epsilon;
        self.tiles.iter().all(|t| t.is_correct(eps))
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Incorrect locks so far (relocks count again)
    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn board(&self) -> &BoardGeometry {
        &self.board
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn correct_count(&self) -> usize {
        let eps = self.config.correct_epsilon;
        self.tiles.iter().filter(|t| t.is_correct(eps)).count()
    }

    // ========================================================================
    // PER-HAND GESTURE HANDLING
    // ========================================================================

    fn process_hand(&mut self, pose: &HandPose) {
        let pinching = pose.pinch_distance() < self.config.pinch_threshold;
        let held = self.tiles.iter().position(|t| t.grabbed_by == Some(pose.id));

        match (pinching, held) {
            (true, Some(index)) => self.drag(index, pose),
            (true, None) => self.try_grab(pose),
            (false, Some(index)) => {
                self.tiles[index].grabbed_by = None;
                self.missing_frames.remove(&pose.id);
                let outcome = self.snap(index);
                debug!("tile {} released: {:?}", self.tiles[index].id, outcome);
            }
            (false, None) => {}
        }
    }

    fn drag(&mut self, index: usize, pose: &HandPose) {
        let (mx, my) = pose.pinch_midpoint();
        let angle = pose.gesture_angle();
        let s = self.config.drag_smoothing;

        let tile = &mut self.tiles[index];
        tile.x = (tile.x + (mx - tile.x) * s).clamp(0.0, 1.0);
        tile.y = (tile.y + (my - tile.y) * s).clamp(0.0, 1.0);
        tile.rotation = angle - tile.grab_angle_offset;
    }

    fn try_grab(&mut self, pose: &HandPose) {
        let mid = pose.pinch_midpoint();
        let eps = self.config.correct_epsilon;

        let mut closest: Option<(usize, f32)> = None;
        for (i, tile) in self.tiles.iter().enumerate() {
            if tile.grabbed_by.is_some() || tile.is_correct(eps) {
                continue;
            }
            let d = self.board.distance((tile.x, tile.y), mid);
            if d < self.config.grab_radius && closest.map_or(true, |(_, best)| d < best) {
                closest = Some((i, d));
            }
        }

        if let Some((index, _)) = closest {
            let angle = pose.gesture_angle();
            let tile = &mut self.tiles[index];
            tile.grabbed_by = Some(pose.id);
            tile.unlock();
            tile.grab_angle_offset = angle - tile.rotation;
            debug!("tile {} grabbed by hand {}", tile.id, pose.id.0);
        }
    }

    /// Drop grabs whose hand has been missing for too long, without snapping
    fn release_orphaned_grabs(&mut self, poses: &[HandPose]) {
        let Some(limit) = self.config.orphan_grab_frames else {
            return;
        };

        for tile in self.tiles.iter_mut() {
            let Some(holder) = tile.grabbed_by else {
                continue;
            };
            if poses.iter().any(|p| p.id == holder) {
                self.missing_frames.remove(&holder);
                continue;
            }
            let missing = self.missing_frames.entry(holder).or_insert(0);
            *missing += 1;
            if *missing >= limit {
                tile.grabbed_by = None;
                self.missing_frames.remove(&holder);
                debug!("tile {} dropped: hand {} lost", tile.id, holder.0);
            }
        }
    }

    // ========================================================================
    // SNAPPING
    // ========================================================================

    /// Attempt to lock a released tile into the grid.
    ///
    /// Re-running on a correct tile changes nothing.
    pub fn check_snap(&mut self, tile_id: usize) -> Option<SnapOutcome> {
        let index = self.tiles.iter().position(|t| t.id == tile_id)?;
        Some(self.snap(index))
    }

    fn snap(&mut self, index: usize) -> SnapOutcome {
        let eps = self.config.correct_epsilon;
        let tile = &self.tiles[index];

        if tile.is_correct(eps) {
            return SnapOutcome::AlreadyCorrect;
        }
        if tile.grabbed_by.is_some() {
            return SnapOutcome::Held;
        }

        let (quantized, deviation) = quantize_right_angle(tile.rotation);
        if deviation > self.config.snap_rotation {
            return SnapOutcome::RotationRejected;
        }

        let Some(slot) = self.board.nearest_slot((tile.x, tile.y), self.config.snap_distance) else {
            return SnapOutcome::NoSlot;
        };

        let tile_id = tile.id;
        let occupant = self
            .tiles
            .iter()
            .position(|o| o.id != tile_id && o.locked && o.snapped == Some(slot));

        let mut evicted = None;
        if let Some(j) = occupant {
            if self.tiles[j].is_correct(eps) {
                return SnapOutcome::BlockedByCorrect { slot };
            }
            self.evict(j);
            evicted = Some(self.tiles[j].id);
        }

        let center = self.board.slot_center(slot);
        let tile = &mut self.tiles[index];
        tile.lock_at(slot, center, quantized);
        let correct = tile.is_correct(eps);

        if !correct {
            self.errors += 1;
            info!("tile {} locked into wrong slot {:?}, errors: {}", tile_id, slot, self.errors);
        }

        SnapOutcome::Locked { slot, correct, evicted }
    }

    /// Unlock an incorrect occupant and kick it so it must be re-placed
    fn evict(&mut self, index: usize) {
        let jitter = self.config.eviction_jitter;
        let spin = self.config.eviction_spin;
        let dx = (self.rng.gen::<f32>() - 0.5) * jitter;
        let dy = (self.rng.gen::<f32>() - 0.5) * jitter;
        let dr = (self.rng.gen::<f32>() - 0.5) * spin;

        let tile = &mut self.tiles[index];
        tile.unlock();
        tile.x = (tile.x + dx).clamp(0.0, 1.0);
        tile.y = (tile.y + dy).clamp(0.0, 1.0);
        tile.rotation += dr;
        debug!("tile {} evicted", tile.id);
    }
}

fn uniform(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        (lo + hi) * 0.5
    }
}
