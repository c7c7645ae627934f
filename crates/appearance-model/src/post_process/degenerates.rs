use glam::Vec3;

use crate::Scene;

/// Removes lines and triangles with two corners at the same position.
pub(super) fn run(scene: &mut Scene) {
    appearance_profiling::profile_function!();

    for mesh in &mut scene.meshes {
        let positions = &mesh.positions;
        let before = mesh.faces.len();
        mesh.faces.retain(|face| !is_degenerate(positions, face));

        let removed = before - mesh.faces.len();
        if removed > 0 {
            log::debug!("Removed {} degenerate faces from mesh '{}'", removed, mesh.name);
        }
    }
}

fn is_degenerate(positions: &[Vec3], face: &[u32]) -> bool {
    for (i, &a) in face.iter().enumerate() {
        for &b in &face[i + 1..] {
            if a == b {
                return true;
            }
            match (positions.get(a as usize), positions.get(b as usize)) {
                (Some(pa), Some(pb)) if pa == pb => return true,
                _ => {}
            }
        }
    }
    false
}
