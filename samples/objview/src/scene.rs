//! Objects loaded from OBJ files, laid out side by side.

use std::path::{Path, PathBuf};

use nalgebra::{Translation3, Vector3};
use weldmesh::{
    de::obj::{self, ObjError, ObjOptions},
    gpu::GpuMesh,
    Mesh,
};

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("couldn't read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ObjError,
    },
    #[error("couldn't build a mesh from {path:?}: {source}")]
    Build {
        path: PathBuf,
        #[source]
        source: weldmesh::Error,
    },
}

/// Places objects at evenly spaced points along an axis, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub spacing: f32,
    pub axis: Vector3<f32>,
}

impl Layout {
    /// Translation of the `i`th of `n` objects.
    pub fn translation(&self, i: usize, n: usize) -> Translation3<f32> {
        let step = i as f32 - n.saturating_sub(1) as f32 / 2.0;
        Translation3::from(self.axis * (step * self.spacing))
    }
}

#[derive(Debug)]
pub struct SceneObject {
    pub name: String,
    pub source: PathBuf,
    pub mesh: Mesh,
    pub translation: Translation3<f32>,
    /// Present once the mesh has been uploaded.
    pub gpu: Option<GpuMesh>,
}

#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Load each file as one object, merging the models it contains.
    pub fn load(
        paths: &[PathBuf],
        layout: &Layout,
        opts: &ObjOptions,
    ) -> Result<Self, SceneError> {
        let objects = paths
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let mesh = load_mesh(path, opts)?;
                Ok(SceneObject {
                    name: object_name(path),
                    source: path.clone(),
                    mesh,
                    translation: layout.translation(i, paths.len()),
                    gpu: None,
                })
            })
            .collect::<Result<_, SceneError>>()?;
        Ok(Self { objects })
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Upload every object which isn't resident yet.
    pub fn upload(&mut self, device: &wgpu::Device) {
        for object in self.objects.iter_mut().filter(|o| o.gpu.is_none()) {
            object.gpu = Some(GpuMesh::upload(device, &object.mesh, &object.name));
        }
    }
}

#[tracing::instrument(skip(opts))]
fn load_mesh(path: &Path, opts: &ObjOptions) -> Result<Mesh, SceneError> {
    let raw = obj::load(path, opts).map_err(|source| SceneError::Read {
        path: path.to_owned(),
        source,
    })?;
    Mesh::build(&raw).map_err(|source| SceneError::Build {
        path: path.to_owned(),
        source,
    })
}

fn object_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
