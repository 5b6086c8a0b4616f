/// WGSL shader for scene meshes: ambient + lambert lighting, base color
/// texture with uv tiling, PCF shadow lookup. Unlit materials skip the
/// lighting term via the per-mesh `lit` flag.
pub const MESH_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_view_proj: mat4x4<f32>,
    // xyz: direction toward the light, w: ambient intensity
    light_dir: vec4<f32>,
    // rgb: directional light color, w: directional intensity
    light_color: vec4<f32>,
    // x: shadows enabled
    params: vec4<f32>,
};

struct MeshUniforms {
    model: mat4x4<f32>,
    color: vec4<f32>,
    // xy: uv repeat, z: lit, w: receive shadow
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var shadow_map: texture_depth_2d;
@group(1) @binding(1)
var shadow_sampler: sampler_comparison;

@group(2) @binding(0)
var<uniform> mesh: MeshUniforms;
@group(2) @binding(1)
var base_texture: texture_2d<f32>;
@group(2) @binding(2)
var base_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) shadow_pos: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = mesh.model * vec4<f32>(vertex.position, 1.0);
    let light_clip = globals.light_view_proj * world_pos;

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_normal = normalize((mesh.model * vec4<f32>(vertex.normal, 0.0)).xyz);
    out.uv = vertex.uv * mesh.params.xy;
    // Orthographic light projection, so w is 1: map xy to texture space.
    out.shadow_pos = vec3<f32>(
        light_clip.xy * vec2<f32>(0.5, -0.5) + vec2<f32>(0.5, 0.5),
        light_clip.z,
    );
    return out;
}

fn shadow_factor(pos: vec3<f32>) -> f32 {
    if (pos.z > 1.0 || pos.z < 0.0) {
        return 1.0;
    }
    let bias = 0.002;
    let texel = 1.0 / vec2<f32>(textureDimensions(shadow_map));
    var sum = 0.0;
    // 3x3 percentage-closer filter.
    for (var dy = -1; dy <= 1; dy = dy + 1) {
        for (var dx = -1; dx <= 1; dx = dx + 1) {
            let offset = vec2<f32>(f32(dx), f32(dy)) * texel;
            sum = sum + textureSampleCompare(
                shadow_map, shadow_sampler, pos.xy + offset, pos.z - bias);
        }
    }
    return sum / 9.0;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(base_texture, base_sampler, in.uv);
    var color = mesh.color.rgb * texel.rgb;

    let lit = mesh.params.z;
    if (lit > 0.5) {
        var shadow = 1.0;
        if (mesh.params.w > 0.5 && globals.params.x > 0.5) {
            shadow = shadow_factor(in.shadow_pos);
        }
        // Double-sided surfaces light whichever face we see.
        let diffuse = abs(dot(in.world_normal, globals.light_dir.xyz));
        let ambient = globals.light_dir.w;
        let lighting = ambient + diffuse * globals.light_color.w * shadow;
        color = color * globals.light_color.rgb * min(lighting, 1.0);
    }
    return vec4<f32>(color, 1.0);
}
"#;

/// Depth-only WGSL shader for the directional shadow pass.
pub const SHADOW_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_view_proj: mat4x4<f32>,
    light_dir: vec4<f32>,
    light_color: vec4<f32>,
    params: vec4<f32>,
};

struct MeshUniforms {
    model: mat4x4<f32>,
    color: vec4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var<uniform> mesh: MeshUniforms;

@vertex
fn vs_shadow(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return globals.light_view_proj * mesh.model * vec4<f32>(position, 1.0);
}
"#;
