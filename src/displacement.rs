//! The per-point displacement program, on the CPU.
//!
//! This is the reference version of what `vs_main` in [`crate::shader`] does
//! on the GPU. Each point is displaced independently:
//!
//! 1. A traveling wave moves the point along X and lifts it along Y.
//! 2. If the waved point lies within `radius` of the pointer, it is pushed
//!    away from the pointer in the XZ plane by `(radius - dist) * strength`.
//!
//! The repulsion uses a hard step, not a smooth falloff, and the returned
//! `in_range` flag drives the tint of repelled points.

use glam::Vec3;
use rayon::prelude::*;

use crate::field::GridPoint;

/// Live inputs of the displacement program (the shader's uniforms).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacementInputs {
    pub time: f32,
    pub frequency: f32,
    pub amplitude: f32,
    /// World-space pointer position, the repulsion centre.
    pub pointer: Vec3,
    pub radius: f32,
    pub strength: f32,
}

/// Output of the displacement program for one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displaced {
    pub position: Vec3,
    /// The point was within the repulsion radius.
    pub in_range: bool,
}

/// Displace a single grid point.
///
/// `origin` is the point's position in the undisplaced grid (`y` is ignored,
/// grid points live on `y = 0`).
///
/// A pointer exactly on the waved point gives `dist = 0` and a NaN direction;
/// this is not guarded, the point degenerates like it does on the GPU.
pub fn displace(origin: Vec3, inputs: &DisplacementInputs) -> Displaced {
    let DisplacementInputs {
        time,
        frequency,
        amplitude,
        pointer,
        radius,
        strength,
    } = *inputs;

    let mut x = origin.x + amplitude * ((origin.x + time) * frequency).cos();
    let y = amplitude * ((origin.z + time) * frequency).sin();
    let mut z = origin.z;

    let seg = Vec3::new(x, pointer.y, z) - pointer;
    let dist = seg.length();
    let dir = seg / dist;

    let in_range = dist <= radius;
    let force = if in_range { (radius - dist) * strength } else { 0.0 };
    x += dir.x * force;
    z += dir.z * force;

    Displaced {
        position: Vec3::new(x, y, z),
        in_range,
    }
}

/// Displace every point in parallel. Output order matches `points`.
pub fn displace_all(points: &[GridPoint], inputs: &DisplacementInputs) -> Vec<Displaced> {
    points
        .par_iter()
        .map(|p| displace(Vec3::from(p.position), inputs))
        .collect()
}

/// Render colour of a point: white when untouched, green when repelled.
pub fn displaced_color(in_range: bool) -> Vec3 {
    let d = if in_range { 1.0 } else { 0.0 };
    Vec3::new(1.0 - d, 1.0, 1.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::grid_points;

    fn inputs() -> DisplacementInputs {
        DisplacementInputs {
            time: 0.0,
            frequency: 0.3,
            amplitude: 1.2,
            pointer: Vec3::new(1000.0, 0.0, 1000.0),
            radius: 10.0,
            strength: 1.0,
        }
    }

    #[test]
    fn test_zero_amplitude_is_identity_out_of_range() {
        let inputs = DisplacementInputs {
            amplitude: 0.0,
            frequency: 0.7,
            ..inputs()
        };
        for origin in [Vec3::ZERO, Vec3::new(10.0, 0.0, 30.0), Vec3::new(-4.5, 0.0, 2.25)] {
            let out = displace(origin, &inputs);
            assert_eq!(out.position, origin);
            assert!(!out.in_range);
        }
    }

    #[test]
    fn test_wave_terms() {
        let inputs = DisplacementInputs {
            time: 0.5,
            ..inputs()
        };
        let origin = Vec3::new(2.0, 0.0, 3.0);
        let out = displace(origin, &inputs);

        let expected_x = 2.0 + 1.2 * ((2.0_f32 + 0.5) * 0.3).cos();
        let expected_y = 1.2 * ((3.0_f32 + 0.5) * 0.3).sin();
        assert!((out.position.x - expected_x).abs() < 1e-5);
        assert!((out.position.y - expected_y).abs() < 1e-5);
        assert_eq!(out.position.z, 3.0);
    }

    #[test]
    fn test_out_of_range_matches_wave_only() {
        let far = inputs();
        let origin = Vec3::new(5.0, 0.0, 5.0);
        let waved = displace(
            origin,
            &DisplacementInputs {
                radius: -1.0,
                ..far
            },
        );
        let out = displace(origin, &far);
        assert!(!out.in_range);
        assert_eq!(out.position, waved.position);
    }

    #[test]
    fn test_in_range_pushes_away_from_pointer() {
        let inputs = DisplacementInputs {
            amplitude: 0.0,
            pointer: Vec3::new(0.0, 0.0, 0.0),
            radius: 10.0,
            strength: 1.0,
            ..inputs()
        };
        let out = displace(Vec3::new(4.0, 0.0, 0.0), &inputs);
        assert!(out.in_range);
        // Pushed along +X by (10 - 4) * 1.
        assert!((out.position.x - 10.0).abs() < 1e-5);
        assert_eq!(out.position.z, 0.0);
    }

    #[test]
    fn test_repulsion_ignores_pointer_height() {
        let base = DisplacementInputs {
            amplitude: 0.0,
            pointer: Vec3::new(0.0, 0.0, 0.0),
            radius: 5.0,
            strength: 2.0,
            ..inputs()
        };
        let raised = DisplacementInputs {
            pointer: Vec3::new(0.0, 50.0, 0.0),
            ..base
        };
        let origin = Vec3::new(0.0, 0.0, 3.0);
        assert_eq!(displace(origin, &base), displace(origin, &raised));
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let inputs = DisplacementInputs {
            amplitude: 0.0,
            pointer: Vec3::ZERO,
            radius: 3.0,
            strength: 1.0,
            ..inputs()
        };
        let out = displace(Vec3::new(3.0, 0.0, 0.0), &inputs);
        assert!(out.in_range);
        // Force is zero exactly on the boundary.
        assert_eq!(out.position, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_pointer_on_point_degenerates_to_nan() {
        let inputs = DisplacementInputs {
            amplitude: 0.0,
            pointer: Vec3::new(2.0, 0.0, 2.0),
            ..inputs()
        };
        let out = displace(Vec3::new(2.0, 0.0, 2.0), &inputs);
        assert!(out.in_range);
        assert!(out.position.x.is_nan());
        assert_eq!(out.position.y, 0.0);
    }

    #[test]
    fn test_displace_all_preserves_order() {
        let points = grid_points(4, 3, 2.0);
        let inputs = DisplacementInputs {
            pointer: Vec3::new(0.0, 0.0, 0.0),
            radius: 3.0,
            ..inputs()
        };
        let parallel = displace_all(&points, &inputs);
        assert_eq!(parallel.len(), points.len());
        for (p, out) in points.iter().zip(&parallel) {
            assert_eq!(*out, displace(Vec3::from(p.position), &inputs));
        }
    }

    #[test]
    fn test_displaced_color() {
        assert_eq!(displaced_color(false), Vec3::ONE);
        assert_eq!(displaced_color(true), Vec3::new(0.0, 1.0, 0.0));
    }
}
