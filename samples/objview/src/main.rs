use std::process::ExitCode;

use clap::Parser;
use weldmesh::de::obj::ObjOptions;

use crate::{
    cli::{initialize_tracing, Cli},
    scene::{Layout, Scene, SceneError},
    upload::{GpuError, Headless},
};

mod cli;
mod scene;
mod upload;

#[cfg(all(feature = "jemalloc", not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let layout = Layout {
        spacing: cli.spacing,
        axis: cli.axis,
    };
    let opts = ObjOptions {
        triangulate: !cli.keep_polygons,
    };
    let mut scene = Scene::load(&cli.files, &layout, &opts)?;

    for object in scene.objects() {
        let mesh = &object.mesh;
        tracing::info!(
            name = object.name.as_str(),
            source = %object.source.display(),
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            bounds = ?mesh.bounds(),
            translation = ?object.translation.vector.as_slice(),
            "built mesh"
        );
    }

    if cli.upload {
        let gpu = pollster::block_on(Headless::new())?;
        scene.upload(&gpu.device);
        gpu.flush();
        let bytes: usize = scene
            .objects()
            .iter()
            .map(|o| o.mesh.vertex_bytes().len() + o.mesh.index_bytes().len())
            .sum();
        tracing::info!(objects = scene.objects().len(), bytes, "uploaded scene");
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_filter, cli.log_format);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "objview failed");
            ExitCode::FAILURE
        }
    }
}
