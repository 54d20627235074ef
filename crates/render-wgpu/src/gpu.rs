use crate::camera::SceneCamera;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use ringrun_common::{CRAFT_MESH, Pose, RING_MESH, SceneEntity};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
    shininess: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FloorVertex {
    position: [f32; 3],
    color: [f32; 4],
}

/// Torus radii matching the course's passable opening: the hole axis is Z,
/// so an identity-posed ring is flown through along -Z.
const RING_MAJOR_RADIUS: f32 = 1.0;
const RING_MINOR_RADIUS: f32 = 0.08;

/// The craft sits a hundredth of a unit in front of the camera, so its
/// mesh has to be of the same order of magnitude.
const CRAFT_LENGTH: f32 = 0.004;
const CRAFT_SPAN: f32 = 0.002;
const CRAFT_KEEL: f32 = 0.001;

/// The floor strip sits below the rings and runs the length of the
/// corridor; its center lane marks the course axis.
const FLOOR_Y: f32 = -4.0;
const FLOOR_DEPTH: f32 = 130.0;
const FLOOR_HALF_WIDTH: f32 = 12.0;

/// Generate torus vertices and indices. Parameterized over the tube (v)
/// and the ring (u); the ring circle lies in the XY plane.
fn torus_mesh(major_segments: u16, minor_segments: u16) -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let tau = std::f32::consts::TAU;

    for i in 0..=major_segments {
        let u = i as f32 / major_segments as f32 * tau;
        let (su, cu) = u.sin_cos();
        for j in 0..=minor_segments {
            let v = j as f32 / minor_segments as f32 * tau;
            let (sv, cv) = v.sin_cos();
            let r = RING_MAJOR_RADIUS + RING_MINOR_RADIUS * cv;
            vertices.push(Vertex {
                position: [r * cu, r * su, RING_MINOR_RADIUS * sv],
                normal: [cv * cu, cv * su, sv],
            });
        }
    }

    let ring = minor_segments + 1;
    for i in 0..major_segments {
        for j in 0..minor_segments {
            let a = i * ring + j;
            let b = a + ring;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    (vertices, indices)
}

/// Generate the craft dart: a flat-shaded tetrahedron pointing down -Z.
fn dart_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let nose = [0.0, 0.0, -CRAFT_LENGTH];
    let left = [-CRAFT_SPAN, 0.0, CRAFT_LENGTH];
    let right = [CRAFT_SPAN, 0.0, CRAFT_LENGTH];
    let keel = [0.0, -CRAFT_KEEL, CRAFT_LENGTH];

    let faces: [([f32; 3], [f32; 3], [f32; 3]); 4] = [
        (nose, left, right),  // top
        (nose, keel, left),   // port keel
        (nose, right, keel),  // starboard keel
        (left, keel, right),  // tail
    ];

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for (a, b, c) in faces {
        let va = glam::Vec3::from(a);
        let normal = (glam::Vec3::from(b) - va)
            .cross(glam::Vec3::from(c) - va)
            .normalize()
            .to_array();
        let base = vertices.len() as u16;
        for p in [a, b, c] {
            vertices.push(Vertex {
                position: p,
                normal,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
    (vertices, indices)
}

/// Generate the floor strip: lanes running down the corridor plus cross
/// rungs. The center lane is brighter so lateral drift is readable.
fn floor_mesh(spacing: f32) -> Vec<FloorVertex> {
    let mut verts = Vec::new();
    let lane = [0.25, 0.3, 0.38, 1.0];
    let axis = [0.5, 0.6, 0.75, 1.0];
    let half_lanes = (FLOOR_HALF_WIDTH / spacing) as i32;
    let rungs = (FLOOR_DEPTH / spacing) as i32;

    for i in -half_lanes..=half_lanes {
        let x = i as f32 * spacing;
        let color = if i == 0 { axis } else { lane };
        verts.push(FloorVertex {
            position: [x, FLOOR_Y, spacing],
            color,
        });
        verts.push(FloorVertex {
            position: [x, FLOOR_Y, -FLOOR_DEPTH],
            color,
        });
    }
    for i in 0..=rungs {
        let z = -(i as f32) * spacing;
        verts.push(FloorVertex {
            position: [-FLOOR_HALF_WIDTH, FLOOR_Y, z],
            color: lane,
        });
        verts.push(FloorVertex {
            position: [FLOOR_HALF_WIDTH, FLOOR_Y, z],
            color: lane,
        });
    }
    verts
}

struct MeshBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    instances: wgpu::Buffer,
    max_instances: u32,
}

impl MeshBuffers {
    fn new(
        device: &wgpu::Device,
        label: &str,
        mesh: (Vec<Vertex>, Vec<u16>),
        max_instances: u32,
    ) -> Self {
        let (verts, indices) = mesh;
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertex_buffer")),
            contents: bytemuck::cast_slice(&verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_count = indices.len() as u32;
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_index_buffer")),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label}_instance_buffer")),
            size: (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            vertices,
            indices,
            index_count,
            instances,
            max_instances,
        }
    }
}

/// wgpu-based scene renderer.
pub struct WgpuRenderer {
    scene_pipeline: wgpu::RenderPipeline,
    floor_pipeline: wgpu::RenderPipeline,
    pipeline_layout: wgpu::PipelineLayout,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    ring_mesh: MeshBuffers,
    craft_mesh: MeshBuffers,
    floor_vertex_buffer: wgpu::Buffer,
    floor_vertex_count: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let (scene_pipeline, floor_pipeline) =
            Self::create_pipelines(device, &pipeline_layout, surface_format);

        let ring_mesh = MeshBuffers::new(device, "ring", torus_mesh(32, 12), 64);
        let craft_mesh = MeshBuffers::new(device, "craft", dart_mesh(), 8);

        let floor_verts = floor_mesh(2.0);
        let floor_vertex_count = floor_verts.len() as u32;
        let floor_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("floor_vertex_buffer"),
            contents: bytemuck::cast_slice(&floor_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            scene_pipeline,
            floor_pipeline,
            pipeline_layout,
            uniform_buffer,
            uniform_bind_group,
            ring_mesh,
            craft_mesh,
            floor_vertex_buffer,
            floor_vertex_count,
            depth_texture,
            surface_format,
        }
    }

    fn create_pipelines(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        surface_format: wgpu::TextureFormat,
    ) -> (wgpu::RenderPipeline, wgpu::RenderPipeline) {
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let scene_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Tori are closed but the dart is a thin shell seen from
                // both sides; skip culling for the whole scene pass.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let floor_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("floor_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::FLOOR_SHADER.into()),
        });

        let floor_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("floor_pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &floor_shader,
                entry_point: Some("vs_floor"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<FloorVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &floor_shader,
                entry_point: Some("fs_floor"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        (scene_pipeline, floor_pipeline)
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Recreate the render pipelines from the built-in shader sources.
    /// Side-channel command; independent of the run state.
    pub fn rebuild_pipelines(&mut self, device: &wgpu::Device) {
        let (scene, floor) =
            Self::create_pipelines(device, &self.pipeline_layout, self.surface_format);
        self.scene_pipeline = scene;
        self.floor_pipeline = floor;
        tracing::info!("render pipelines rebuilt");
    }

    /// Render one frame: floor strip, ring course, craft.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        camera: &SceneCamera,
        eye: &Pose,
        scene: &[SceneEntity],
    ) {
        let vp = camera.view_projection(eye);
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: vp.to_cols_array_2d(),
            }),
        );

        // Split the ordered scene into per-mesh instance lists.
        let mut ring_instances: Vec<InstanceData> = Vec::new();
        let mut craft_instances: Vec<InstanceData> = Vec::new();
        for entity in scene {
            let bucket = match entity.binding.mesh {
                RING_MESH => &mut ring_instances,
                CRAFT_MESH => &mut craft_instances,
                other => {
                    tracing::warn!(?other, "unknown mesh handle, skipping");
                    continue;
                }
            };
            let model =
                Mat4::from_rotation_translation(entity.pose.rotation, entity.pose.position);
            let cols = model.to_cols_array_2d();
            bucket.push(InstanceData {
                model_0: cols[0],
                model_1: cols[1],
                model_2: cols[2],
                model_3: cols[3],
                color: entity.binding.material.color,
                shininess: entity.binding.material.shininess,
            });
        }
        ring_instances.truncate(self.ring_mesh.max_instances as usize);
        craft_instances.truncate(self.craft_mesh.max_instances as usize);

        if !ring_instances.is_empty() {
            queue.write_buffer(
                &self.ring_mesh.instances,
                0,
                bytemuck::cast_slice(&ring_instances),
            );
        }
        if !craft_instances.is_empty() {
            queue.write_buffer(
                &self.craft_mesh.instances,
                0,
                bytemuck::cast_slice(&craft_instances),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.15,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.floor_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.floor_vertex_buffer.slice(..));
            pass.draw(0..self.floor_vertex_count, 0..1);

            pass.set_pipeline(&self.scene_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            for (mesh, instances) in [
                (&self.ring_mesh, &ring_instances),
                (&self.craft_mesh, &craft_instances),
            ] {
                if instances.is_empty() {
                    continue;
                }
                pass.set_vertex_buffer(0, mesh.vertices.slice(..));
                pass.set_vertex_buffer(1, mesh.instances.slice(..));
                pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..mesh.index_count, 0, 0..instances.len() as u32);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torus_mesh_is_well_formed() {
        let (verts, indices) = torus_mesh(32, 12);
        assert_eq!(verts.len(), 33 * 13);
        assert_eq!(indices.len() as usize, 32 * 12 * 6);
        assert!(indices.iter().all(|&i| (i as usize) < verts.len()));
        // Normals are unit length.
        for v in &verts {
            let n = glam::Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_opening_matches_pass_extent() {
        let (verts, _) = torus_mesh(32, 12);
        // No vertex intrudes into the passable opening.
        for v in &verts {
            let lateral = (v.position[0] * v.position[0] + v.position[1] * v.position[1]).sqrt();
            assert!(lateral >= RING_MAJOR_RADIUS - RING_MINOR_RADIUS - 1e-4);
        }
    }

    #[test]
    fn floor_strip_spans_the_corridor() {
        let verts = floor_mesh(2.0);
        assert!(!verts.is_empty());
        assert!(verts.iter().all(|v| v.position[1] == FLOOR_Y));
        let deepest = verts
            .iter()
            .map(|v| v.position[2])
            .fold(f32::INFINITY, f32::min);
        assert!(deepest <= -FLOOR_DEPTH + 1e-4);
        // The course-axis lane stands out from the others.
        let lane_color = verts[0].color;
        assert!(
            verts
                .iter()
                .any(|v| v.position[0] == 0.0 && v.color != lane_color)
        );
    }

    #[test]
    fn dart_mesh_is_tiny_and_indexed() {
        let (verts, indices) = dart_mesh();
        assert_eq!(indices.len(), 12);
        for v in &verts {
            let p = glam::Vec3::from(v.position);
            assert!(p.length() < 0.01);
        }
    }
}
