//! The particle field: a grid of points displaced by a traveling wave.
//!
//! A [`ParticleField`] owns its parameters and the point cloud generated from
//! them. Points are laid out row-major on the `y = 0` plane:
//!
//! ```text
//! index i = z * width + x   ->   position (x * spread, 0, z * spread)
//! ```
//!
//! Changing `width`, `height` or `spread` schedules a rebuild that replaces
//! the whole cloud. Every other parameter is read live by the displacement
//! program and never touches the points.
//!
//! # Example
//!
//! ```ignore
//! let mut scene = Scene::new();
//! let mut field = ParticleField::new(WaveParams::new(2, 1, 10.0));
//! field.attach(&mut scene);
//!
//! assert!(field.set_width(3));
//! assert!(field.sync_scene(&mut scene)); // cloud rebuilt with 3 points
//! assert!(!field.sync_scene(&mut scene)); // nothing pending
//! ```

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::displacement::DisplacementInputs;
use crate::params::{ParamsDiff, WaveParams};
use crate::scene::Scene;

/// Scene node name of a field's point cloud.
pub const NODE_NAME: &str = "wave_points";

/// One grid point as laid out in the vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GridPoint {
    /// Undisplaced grid position.
    pub position: [f32; 3],
    /// Displacement flag attribute; always 0 on upload, the shader derives
    /// the real flag per frame.
    pub displaced: u32,
}

/// An immutable generation of grid points.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    /// Incremented on every rebuild of the owning field.
    pub generation: u64,
    pub points: Vec<GridPoint>,
}

impl PointCloud {
    pub fn new(generation: u64, width: u32, height: u32, spread: f32) -> Self {
        Self {
            generation,
            points: grid_points(width, height, spread),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}

/// Largest grid [`grid_points`] will build (1 GiB of vertex data).
pub const MAX_POINTS: u64 = 1 << 26;

/// Generate a `width * height` grid in row-major order.
///
/// Grids over [`MAX_POINTS`], or too large to allocate, come back empty.
pub fn grid_points(width: u32, height: u32, spread: f32) -> Vec<GridPoint> {
    let count = u64::from(width) * u64::from(height);
    if count > MAX_POINTS {
        tracing::warn!(width, height, max = MAX_POINTS, "grid too large, building no points");
        return Vec::new();
    }

    let mut points = Vec::new();
    if points.try_reserve_exact(count as usize).is_err() {
        tracing::warn!(width, height, "failed to allocate grid, building no points");
        return Vec::new();
    }
    for z in 0..height {
        for x in 0..width {
            points.push(GridPoint {
                position: [x as f32 * spread, 0.0, z as f32 * spread],
                displaced: 0,
            });
        }
    }
    points
}

/// A parametrized grid of particles.
#[derive(Debug)]
pub struct ParticleField {
    params: WaveParams,
    cloud: Arc<PointCloud>,
    /// Some parameter changed since the last sync.
    dirty: bool,
    /// A shape parameter changed since the last rebuild.
    shape_dirty: bool,
}

impl ParticleField {
    /// Create a field and its first point cloud.
    pub fn new(params: WaveParams) -> Self {
        let cloud = Arc::new(PointCloud::new(
            0,
            params.width,
            params.height,
            params.spread,
        ));
        Self {
            params,
            cloud,
            dirty: false,
            shape_dirty: false,
        }
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn width(&self) -> u32 {
        self.params.width
    }

    pub fn height(&self) -> u32 {
        self.params.height
    }

    pub fn spread(&self) -> f32 {
        self.params.spread
    }

    /// Current point cloud.
    pub fn points(&self) -> &Arc<PointCloud> {
        &self.cloud
    }

    /// A parameter changed and has not been synced yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The grid shape changed and the cloud is stale.
    pub fn needs_rebuild(&self) -> bool {
        self.shape_dirty
    }

    /// World-space centre of the undisplaced grid.
    pub fn center(&self) -> Vec3 {
        let spread = self.params.spread;
        Vec3::new(
            spread * self.params.width as f32 / 2.0,
            0.0,
            spread * self.params.height as f32 / 2.0,
        )
    }

    // ========== Setters ==========

    pub fn set_width(&mut self, width: u32) -> bool {
        let changed = replace_if_changed(&mut self.params.width, width);
        self.mark(changed, true)
    }

    pub fn set_height(&mut self, height: u32) -> bool {
        let changed = replace_if_changed(&mut self.params.height, height);
        self.mark(changed, true)
    }

    pub fn set_spread(&mut self, spread: f32) -> bool {
        let changed = replace_if_changed(&mut self.params.spread, spread);
        self.mark(changed, true)
    }

    pub fn set_frequency(&mut self, frequency: f32) -> bool {
        let changed = replace_if_changed(&mut self.params.frequency, frequency);
        self.mark(changed, false)
    }

    pub fn set_amplitude(&mut self, amplitude: f32) -> bool {
        let changed = replace_if_changed(&mut self.params.amplitude, amplitude);
        self.mark(changed, false)
    }

    pub fn set_radius(&mut self, radius: f32) -> bool {
        let changed = replace_if_changed(&mut self.params.radius, radius);
        self.mark(changed, false)
    }

    pub fn set_strength(&mut self, strength: f32) -> bool {
        let changed = replace_if_changed(&mut self.params.strength, strength);
        self.mark(changed, false)
    }

    fn mark(&mut self, changed: bool, shape: bool) -> bool {
        if changed {
            self.dirty = true;
            self.shape_dirty |= shape;
        }
        changed
    }

    /// Apply a full parameter bundle through the setters.
    ///
    /// Returns what changed relative to the previous values.
    pub fn apply(&mut self, params: &WaveParams) -> ParamsDiff {
        let diff = self.params.diff(params);
        if diff.is_empty() {
            return diff;
        }

        self.set_frequency(params.frequency);
        self.set_amplitude(params.amplitude);
        self.set_width(params.width);
        self.set_height(params.height);
        self.set_spread(params.spread);
        self.set_radius(params.radius);
        self.set_strength(params.strength);
        diff
    }

    // ========== Rebuild ==========

    /// Replace the point cloud with a fresh one built from the current shape.
    pub fn rebuild(&mut self) {
        let generation = self.cloud.generation + 1;
        self.cloud = Arc::new(PointCloud::new(
            generation,
            self.params.width,
            self.params.height,
            self.params.spread,
        ));
        self.dirty = false;
        self.shape_dirty = false;
    }

    /// Insert the current cloud into `scene`.
    pub fn attach(&self, scene: &mut Scene) {
        scene.add(NODE_NAME, self.cloud.clone());
    }

    /// Materialize pending changes.
    ///
    /// On a pending shape change the cloud is rebuilt and the scene node is
    /// swapped for the new one; returns `true`. Pending live changes need no
    /// scene work, they only clear the dirty flag. Otherwise a no-op.
    pub fn sync_scene(&mut self, scene: &mut Scene) -> bool {
        if !self.dirty {
            return false;
        }
        if !self.shape_dirty {
            self.dirty = false;
            return false;
        }

        scene.remove(NODE_NAME);
        self.rebuild();
        self.attach(scene);
        true
    }

    /// Live inputs for the displacement program at `time`.
    pub fn inputs(&self, time: f32, pointer: Vec3) -> DisplacementInputs {
        DisplacementInputs {
            time,
            frequency: self.params.frequency,
            amplitude: self.params.amplitude,
            pointer,
            radius: self.params.radius,
            strength: self.params.strength,
        }
    }
}

/// Store `value` in `slot` if it differs; NaN always differs.
fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot != value {
        *slot = value;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn positions(cloud: &PointCloud) -> Vec<[f32; 3]> {
        cloud.points.iter().map(|p| p.position).collect()
    }

    #[test]
    fn test_grid_layout_row_major() {
        let points = grid_points(3, 2, 2.5);
        assert_eq!(
            points.iter().map(|p| p.position).collect::<Vec<_>>(),
            vec![
                [0.0, 0.0, 0.0],
                [2.5, 0.0, 0.0],
                [5.0, 0.0, 0.0],
                [0.0, 0.0, 2.5],
                [2.5, 0.0, 2.5],
                [5.0, 0.0, 2.5],
            ]
        );
        assert!(points.iter().all(|p| p.displaced == 0));
    }

    #[test]
    fn test_oversized_grid_is_empty() {
        assert!(grid_points(u32::MAX, 100, 1.0).is_empty());
        assert!(grid_points(1 << 14, (1 << 12) + 1, 1.0).is_empty());
        assert_eq!(grid_points(1, 1, 1.0).len(), 1);
    }

    #[test]
    fn test_grid_layout_random_shapes() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let width = rng.gen_range(1..40);
            let height = rng.gen_range(1..40);
            let spread = rng.gen_range(0.5..20.0_f32);
            let points = grid_points(width, height, spread);
            assert_eq!(points.len(), (width * height) as usize);

            let x = rng.gen_range(0..width);
            let z = rng.gen_range(0..height);
            let i = (z * width + x) as usize;
            assert_eq!(
                points[i].position,
                [x as f32 * spread, 0.0, z as f32 * spread]
            );
        }
    }

    #[test]
    fn test_empty_grid() {
        assert!(grid_points(0, 10, 1.0).is_empty());
        assert!(grid_points(10, 0, 1.0).is_empty());
    }

    #[test]
    fn test_new_field_is_clean() {
        let field = ParticleField::new(WaveParams::new(4, 5, 1.0));
        assert!(!field.is_dirty());
        assert!(!field.needs_rebuild());
        assert_eq!(field.points().len(), 20);
        assert_eq!(field.points().generation, 0);
    }

    #[test]
    fn test_setter_same_value() {
        let params = WaveParams::new(4, 5, 1.0);
        let mut field = ParticleField::new(params);
        assert!(!field.set_width(4));
        assert!(!field.set_height(5));
        assert!(!field.set_spread(1.0));
        assert!(!field.set_frequency(params.frequency));
        assert!(!field.set_amplitude(params.amplitude));
        assert!(!field.set_radius(params.radius));
        assert!(!field.set_strength(params.strength));
        assert!(!field.is_dirty());
    }

    #[test]
    fn test_shape_setter_schedules_rebuild() {
        let mut field = ParticleField::new(WaveParams::new(4, 5, 1.0));
        assert!(field.set_spread(2.0));
        assert!(field.is_dirty());
        assert!(field.needs_rebuild());
        assert_eq!(field.spread(), 2.0);
    }

    #[test]
    fn test_live_setter_marks_dirty_without_rebuild() {
        let mut field = ParticleField::new(WaveParams::new(4, 5, 1.0));
        assert!(field.set_amplitude(3.0));
        assert!(field.is_dirty());
        assert!(!field.needs_rebuild());

        let mut scene = Scene::new();
        field.attach(&mut scene);
        let before = field.points().clone();
        assert!(!field.sync_scene(&mut scene));
        assert!(!field.is_dirty());
        assert!(Arc::ptr_eq(field.points(), &before));
        assert_eq!(field.inputs(0.0, Vec3::ZERO).amplitude, 3.0);
    }

    #[test]
    fn test_nan_setter_always_changes() {
        let mut field = ParticleField::new(WaveParams::default());
        assert!(field.set_frequency(f32::NAN));
        assert!(field.set_frequency(f32::NAN));
        assert!(field.params().frequency.is_nan());
    }

    #[test]
    fn test_negative_values_accepted() {
        let mut field = ParticleField::new(WaveParams::default());
        assert!(field.set_radius(-5.0));
        assert!(field.set_spread(-1.0));
        assert_eq!(field.params().radius, -5.0);

        let mut scene = Scene::new();
        assert!(field.sync_scene(&mut scene));
        assert_eq!(field.points().points[1].position, [-1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_width_change_scenario() {
        let mut scene = Scene::new();
        let mut field = ParticleField::new(WaveParams::new(2, 1, 10.0));
        field.attach(&mut scene);
        assert_eq!(positions(field.points()), vec![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]);

        assert!(field.set_width(3));
        assert!(field.is_dirty());

        assert!(field.sync_scene(&mut scene));
        assert!(!field.is_dirty());
        assert_eq!(
            positions(field.points()),
            vec![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [20.0, 0.0, 0.0]]
        );
        assert_eq!(scene.len(), 1);
        assert!(Arc::ptr_eq(scene.get(NODE_NAME).unwrap(), field.points()));

        let current = field.points().clone();
        assert!(!field.sync_scene(&mut scene));
        assert!(Arc::ptr_eq(field.points(), &current));
        assert!(Arc::ptr_eq(scene.get(NODE_NAME).unwrap(), &current));
    }

    #[test]
    fn test_rebuild_bumps_generation() {
        let mut field = ParticleField::new(WaveParams::new(2, 2, 1.0));
        field.set_height(3);
        field.rebuild();
        assert_eq!(field.points().generation, 1);
        assert_eq!(field.points().len(), 6);
        assert!(!field.needs_rebuild());
    }

    #[test]
    fn test_apply_reports_diff() {
        let mut field = ParticleField::new(WaveParams::new(2, 2, 1.0));
        let unchanged = *field.params();
        assert!(field.apply(&unchanged).is_empty());
        assert!(!field.is_dirty());

        let next = WaveParams {
            height: 4,
            amplitude: 0.0,
            ..unchanged
        };
        let diff = field.apply(&next);
        assert!(diff.shape_changed);
        assert_eq!(diff.live.len(), 1);
        assert_eq!(field.params(), &next);
        assert!(field.needs_rebuild());
    }

    #[test]
    fn test_center() {
        let field = ParticleField::new(WaveParams::new(10, 20, 2.0));
        assert_eq!(field.center(), Vec3::new(10.0, 0.0, 20.0));
    }

    #[test]
    fn test_point_bytes_match_layout() {
        let cloud = PointCloud::new(0, 3, 3, 1.0);
        assert_eq!(std::mem::size_of::<GridPoint>(), 16);
        assert_eq!(cloud.as_bytes().len(), 9 * 16);
    }
}
