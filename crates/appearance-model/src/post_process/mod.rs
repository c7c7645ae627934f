use bitflags::bitflags;

use crate::Scene;

mod cache_locality;
mod degenerates;
mod flip_uvs;
mod invalid_data;
mod join_vertices;
mod optimize_meshes;
mod redundant_materials;
mod triangulate;

bitflags! {
    /// Processing applied to a scene after it has been read.
    #[repr(C)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PostProcessSteps: u32 {
        const JOIN_IDENTICAL_VERTICES = 1 << 0;
        const TRIANGULATE = 1 << 1;
        const IMPROVE_CACHE_LOCALITY = 1 << 2;
        const REMOVE_REDUNDANT_MATERIALS = 1 << 3;
        const FIND_DEGENERATES = 1 << 4;
        const FIND_INVALID_DATA = 1 << 5;
        const OPTIMIZE_MESHES = 1 << 6;
        const FLIP_UVS = 1 << 7;
    }
}

/// Runs every requested step on `scene`, in a fixed order.
pub fn apply(scene: &mut Scene, steps: PostProcessSteps) {
    appearance_profiling::profile_function!();

    if steps.contains(PostProcessSteps::REMOVE_REDUNDANT_MATERIALS) {
        redundant_materials::run(scene);
    }
    if steps.contains(PostProcessSteps::TRIANGULATE) {
        triangulate::run(scene);
    }
    if steps.contains(PostProcessSteps::FIND_DEGENERATES) {
        degenerates::run(scene);
    }
    if steps.contains(PostProcessSteps::FIND_INVALID_DATA) {
        invalid_data::run(scene);
    }
    if steps.contains(PostProcessSteps::OPTIMIZE_MESHES) {
        optimize_meshes::run(scene);
    }
    if steps.contains(PostProcessSteps::FLIP_UVS) {
        flip_uvs::run(scene);
    }
    if steps.contains(PostProcessSteps::JOIN_IDENTICAL_VERTICES) {
        join_vertices::run(scene);
    }
    if steps.contains(PostProcessSteps::IMPROVE_CACHE_LOCALITY) {
        cache_locality::run(scene);
    }
}
