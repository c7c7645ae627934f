use crate::Scene;

pub(super) fn run(scene: &mut Scene) {
    appearance_profiling::profile_function!();

    for mesh in &mut scene.meshes {
        for channel in &mut mesh.tex_coords {
            for coord in &mut channel.coords {
                coord.y = 1.0 - coord.y;
            }
        }
    }
}
