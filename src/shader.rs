//! WGSL displacement program and its uniform block.
//!
//! The vertex stage runs the same algorithm as [`crate::displacement::displace`]
//! once per grid point. Points are drawn as instanced screen-aligned quads of
//! `point_size` pixels; one instance per grid point, six vertices per quad.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

use crate::displacement::DisplacementInputs;

/// Size of each rendered point in physical pixels.
pub const POINT_SIZE: f32 = 2.0;

/// Uniform block shared by both shader stages.
///
/// Field order and padding match `struct Uniforms` in [`WAVE_SHADER`].
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct WaveUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub pointer: [f32; 3],
    pub time: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub radius: f32,
    pub repel_strength: f32,
    pub viewport: [f32; 2],
    pub point_size: f32,
    pub _padding: f32,
}

impl WaveUniforms {
    pub fn new(view_proj: Mat4, inputs: &DisplacementInputs, viewport: Vec2) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            pointer: inputs.pointer.to_array(),
            time: inputs.time,
            amplitude: inputs.amplitude,
            frequency: inputs.frequency,
            radius: inputs.radius,
            repel_strength: inputs.strength,
            viewport: viewport.to_array(),
            point_size: POINT_SIZE,
            _padding: 0.0,
        }
    }
}

pub const WAVE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    pointer: vec3<f32>,
    time: f32,
    amplitude: f32,
    frequency: f32,
    radius: f32,
    repel_strength: f32,
    viewport: vec2<f32>,
    point_size: f32,
    _padding: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) is_displaced: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) position: vec3<f32>,
    @location(1) displaced: u32,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    var x = position.x + uniforms.amplitude * cos((position.x + uniforms.time) * uniforms.frequency);
    let y = uniforms.amplitude * sin((position.z + uniforms.time) * uniforms.frequency);
    var z = position.z;

    let seg = vec3<f32>(x, uniforms.pointer.y, z) - uniforms.pointer;
    let dist = length(seg);
    let dir = seg / dist;
    let in_range = step(dist, uniforms.radius);
    let force = in_range * (uniforms.radius - dist) * uniforms.repel_strength;
    x += dir.x * force;
    z += dir.z * force;

    var clip_pos = uniforms.view_proj * vec4<f32>(x, y, z, 1.0);
    let half_size = uniforms.point_size / uniforms.viewport;
    let quad_pos = quad_vertices[vertex_index];
    clip_pos.x += quad_pos.x * half_size.x * clip_pos.w;
    clip_pos.y += quad_pos.y * half_size.y * clip_pos.w;

    var out: VertexOutput;
    out.clip_position = clip_pos;
    out.is_displaced = max(in_range, f32(displaced));
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let d = in.is_displaced;
    return vec4<f32>(1.0 - d, 1.0, 1.0 - d, 1.0);
}
"#;
