//! Uploading [Meshes](Mesh) to [wgpu] buffers.

use wgpu::util::DeviceExt;

use crate::{Mesh, MeshIndex, Vertex};

/// Index types which a GPU can read from an index buffer.
pub trait GpuIndex: MeshIndex {
    const FORMAT: wgpu::IndexFormat;
}

impl GpuIndex for u16 {
    const FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint16;
}

impl GpuIndex for u32 {
    const FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;
}

impl Vertex {
    /// Shader location of the position attribute.
    pub const POSITION_LOCATION: wgpu::ShaderLocation = 0;
    /// Shader location of the normal attribute.
    pub const NORMAL_LOCATION: wgpu::ShaderLocation = 1;

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: Self::POSITION_OFFSET as wgpu::BufferAddress,
            shader_location: Self::POSITION_LOCATION,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: Self::NORMAL_OFFSET as wgpu::BufferAddress,
            shader_location: Self::NORMAL_LOCATION,
        },
    ];

    /// The layout of a vertex buffer holding [Vertices](Vertex), for use in a render pipeline.
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A [Mesh] resident in GPU memory.
///
/// Owns its buffers; they're freed when this is dropped.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

impl GpuMesh {
    /// Copy a mesh into new vertex and index buffers.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip(device, mesh),
            fields(vertices = mesh.vertex_count(), indices = mesh.index_count())
        )
    )]
    pub fn upload<Idx: GpuIndex>(device: &wgpu::Device, mesh: &Mesh<Idx>, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vertices")),
            contents: mesh.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} indices")),
            contents: mesh.index_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            // draw calls can't address more than u32::MAX indices
            index_count: mesh.index_count().min(u32::MAX as usize) as u32,
            index_format: Idx::FORMAT,
        }
    }
}
