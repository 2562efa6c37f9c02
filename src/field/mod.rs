pub mod diagnostics;
mod grid;
mod panels;
mod params;
pub mod tower;

pub use panels::{generate_panels, PanelField, CANDIDATE_COUNT};
pub use params::{FrameParams, Resolution};
pub use tower::{generate_tower, TowerFrame, TOWER_HEIGHT};

use crate::state::RenderableArrays;

/// Rebuild every array the renderer needs from a parameter snapshot.
///
/// Pure: the result depends only on `params`, and `params.resolution` does
/// not influence the arrays.
pub fn compute_frame(params: FrameParams) -> RenderableArrays {
    let tower = generate_tower(params.twist, params.velocity);
    let panels = generate_panels(params.velocity, params.strength);
    log::debug!(
        "frame: v={} twist={:.3} strength={} -> {} flow samples, {} panels",
        params.velocity,
        params.twist,
        params.strength,
        tower.flow.len(),
        panels.panels.len(),
    );
    RenderableArrays { params, tower, panels }
}

/// Memoizes the most recent frame keyed on the exact parameter bits.
#[derive(Default)]
pub struct FrameCache {
    last: Option<RenderableArrays>,
    hits: usize,
    misses: usize,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the frame for `params`, recomputing only when the key changed.
    pub fn get(&mut self, params: FrameParams) -> &RenderableArrays {
        let fresh = match &self.last {
            Some(frame) => frame.params.cache_key() != params.cache_key(),
            None => true,
        };
        if fresh {
            self.misses += 1;
            self.last = Some(compute_frame(params));
        } else {
            self.hits += 1;
        }
        self.last.get_or_insert_with(|| compute_frame(params))
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
