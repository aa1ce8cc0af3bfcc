//! Decorative audio visualizer state.
//!
//! Purely cosmetic, like the 90s skins it imitates: bars chase fresh random
//! targets while music plays and decay toward zero otherwise. Heights are
//! normalized to `0.0..=1.0`; the UI scales them to the widget area.

use rand::RngExt;

/// Easing factor toward the random target per animation frame.
const EASE: f32 = 0.3;
/// Multiplicative decay per frame while not playing.
const DECAY: f32 = 0.85;
/// Targets are drawn from `0.3..=1.0` of this fraction of full scale.
const TARGET_SCALE: f32 = 0.8;

pub struct Visualizer {
    heights: Vec<f32>,
}

impl Visualizer {
    pub fn new(bars: usize) -> Self {
        Self {
            heights: vec![0.0; bars.max(1)],
        }
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Advance one animation frame: chase random targets while `playing`,
    /// decay otherwise.
    pub fn step(&mut self, playing: bool) {
        if playing {
            let mut rng = rand::rng();
            for h in &mut self.heights {
                let target: f32 = rng.random_range(0.3..=1.0) * TARGET_SCALE;
                *h += (target - *h) * EASE;
            }
        } else {
            for h in &mut self.heights {
                *h *= DECAY;
            }
        }
    }

    /// Drop all bars to zero, as on stop.
    pub fn reset(&mut self) {
        self.heights.fill(0.0);
    }
}
