/// WGSL shader for instanced scene meshes (rings and craft) with
/// per-instance model matrix and material.
pub const SCENE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) shininess: f32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) shininess: f32,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    out.shininess = instance.shininess;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let light_dir = normalize(vec3<f32>(-0.4, 0.8, 0.4));
    let ambient = 0.2;
    let diffuse = max(dot(in.world_normal, light_dir), 0.0);
    let half_dir = normalize(light_dir + vec3<f32>(0.0, 0.0, 1.0));
    let specular = pow(max(dot(in.world_normal, half_dir), 0.0), in.shininess);
    let lighting = ambient + diffuse * 0.7;
    let rgb = in.color.rgb * lighting + vec3<f32>(specular * 0.3);
    return vec4<f32>(rgb, in.color.a);
}
"#;

/// WGSL shader for the corridor floor strip. Lines sink toward the clear
/// color with distance so the far end of the course reads as depth
/// instead of clutter.
pub const FLOOR_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct FloorVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct FloorOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) eye_depth: f32,
};

@vertex
fn vs_floor(vertex: FloorVertex) -> FloorOutput {
    var out: FloorOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.eye_depth = out.clip_position.w;
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_floor(in: FloorOutput) -> @location(0) vec4<f32> {
    let horizon = vec3<f32>(0.1, 0.1, 0.15);
    let fade = clamp(1.0 - in.eye_depth / 130.0, 0.0, 1.0);
    return vec4<f32>(mix(horizon, in.color.rgb, fade), in.color.a);
}
"#;
