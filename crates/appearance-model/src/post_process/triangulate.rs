use crate::{Face, Scene};

/// Splits polygons into triangle fans. Points, lines and triangles pass
/// through unchanged.
pub(super) fn run(scene: &mut Scene) {
    appearance_profiling::profile_function!();

    for mesh in &mut scene.meshes {
        if mesh.faces.iter().all(|face| face.len() <= 3) {
            continue;
        }

        let mut faces: Vec<Face> = Vec::with_capacity(mesh.faces.len() * 2);
        for face in mesh.faces.drain(..) {
            if face.len() <= 3 {
                faces.push(face);
                continue;
            }

            for i in 1..face.len() - 1 {
                faces.push(vec![face[0], face[i], face[i + 1]]);
            }
        }

        log::debug!("Triangulated mesh '{}' into {} faces", mesh.name, faces.len());
        mesh.faces = faces;
    }
}
