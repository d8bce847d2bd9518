use crate::constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use serde::{Deserialize, Serialize};

/// View onto the grid, measured in tile units. The engine only uses it to
/// turn screen positions into tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub center: [f32; 2],
    zoom: f32,
}

impl Camera {
    pub fn new(center: [f32; 2]) -> Self {
        Self { center, zoom: 1.0 }
    }

    /// Camera centred on a `width` x `height` grid.
    pub fn centered_on(width: u32, height: u32) -> Self {
        Self::new([width as f32 * 0.5, height as f32 * 0.5])
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        };
    }

    /// On-screen size of one tile, never below one pixel.
    pub fn tile_size(&self) -> f32 {
        (TILE_SIZE * self.zoom).max(1.0)
    }

    /// Tile coordinate under `screen_pos` for a viewport of `screen_size`
    /// pixels. The result is not wrapped or bounds-checked.
    pub fn screen_to_tile(&self, screen_pos: [f32; 2], screen_size: [f32; 2]) -> (i32, i32) {
        let tile_size = self.tile_size();
        let x = self.center[0] - (screen_size[0] * 0.5 - screen_pos[0]) / tile_size;
        let y = self.center[1] - (screen_size[1] * 0.5 - screen_pos[1]) / tile_size;
        (x.floor() as i32, y.floor() as i32)
    }
}
