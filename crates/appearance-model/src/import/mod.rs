use std::path::Path;

use anyhow::{bail, Result};

use crate::{post_process, PostProcessSteps, Scene};

mod gltf_import;
mod obj_import;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Gltf,
    Obj,
}

impl ImportFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "gltf" | "glb" => Some(Self::Gltf),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }
}

/// Reads the model at `path` and runs the requested post-processing on it.
pub fn import_file(path: &Path, steps: PostProcessSteps) -> Result<Scene> {
    appearance_profiling::profile_function!();

    if !path.is_file() {
        bail!("Unable to open file \"{}\".", path.display());
    }

    let Some(format) = ImportFormat::from_path(path) else {
        bail!(
            "No suitable reader found for the file format of file \"{}\".",
            path.display()
        );
    };

    log::info!("Importing {} as {:?}", path.display(), format);

    let mut scene = match format {
        ImportFormat::Gltf => gltf_import::load(path)?,
        ImportFormat::Obj => obj_import::load(path)?,
    };

    post_process::apply(&mut scene, steps);

    log::info!(
        "Imported {} nodes, {} materials, {} meshes, {} animations",
        scene.num_nodes(),
        scene.materials.len(),
        scene.meshes.len(),
        scene.animations.len()
    );

    Ok(scene)
}
