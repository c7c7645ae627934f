use std::{
    io::{self, Write},
    path::Path,
};

use appearance_model::{import::import_file, PostProcessSteps, Scene};

/// Post-processing every dump runs with.
pub const DUMP_STEPS: PostProcessSteps = PostProcessSteps::FLIP_UVS
    .union(PostProcessSteps::JOIN_IDENTICAL_VERTICES)
    .union(PostProcessSteps::TRIANGULATE)
    .union(PostProcessSteps::FIND_INVALID_DATA)
    .union(PostProcessSteps::IMPROVE_CACHE_LOCALITY)
    .union(PostProcessSteps::FIND_DEGENERATES)
    .union(PostProcessSteps::OPTIMIZE_MESHES)
    .union(PostProcessSteps::REMOVE_REDUNDANT_MATERIALS);

/// Imports `path`. A failed import is written to `out` as a single line and
/// yields `None`.
pub fn load_scene(path: &Path, out: &mut impl Write) -> io::Result<Option<Scene>> {
    match import_file(path, DUMP_STEPS) {
        Ok(scene) => Ok(Some(scene)),
        Err(err) => {
            log::debug!("Import of {} failed: {:?}", path.display(), err);
            writeln!(out, "{:#}", err)?;
            Ok(None)
        }
    }
}
