use std::collections::VecDeque;

use crate::{Face, Mesh, Scene};

/// Reorders the triangles of each triangle mesh so that faces sharing a
/// vertex are emitted close together.
pub(super) fn run(scene: &mut Scene) {
    appearance_profiling::profile_function!();

    for mesh in &mut scene.meshes {
        if mesh.faces.len() > 2 && mesh.is_triangle_list() {
            reorder_faces(mesh);
        }
    }
}

fn reorder_faces(mesh: &mut Mesh) {
    let mut vertex_faces: Vec<Vec<usize>> = vec![Vec::new(); mesh.positions.len()];
    for (face_index, face) in mesh.faces.iter().enumerate() {
        for &vertex in face {
            if let Some(faces) = vertex_faces.get_mut(vertex as usize) {
                faces.push(face_index);
            }
        }
    }

    let face_count = mesh.faces.len();
    let mut emitted = vec![false; face_count];
    let mut order = Vec::with_capacity(face_count);
    let mut queue = VecDeque::new();

    for seed in 0..face_count {
        if emitted[seed] {
            continue;
        }
        emitted[seed] = true;
        queue.push_back(seed);

        while let Some(face_index) = queue.pop_front() {
            order.push(face_index);
            for &vertex in &mesh.faces[face_index] {
                let Some(neighbours) = vertex_faces.get(vertex as usize) else {
                    continue;
                };
                for &neighbour in neighbours {
                    if !emitted[neighbour] {
                        emitted[neighbour] = true;
                        queue.push_back(neighbour);
                    }
                }
            }
        }
    }

    let mut faces: Vec<Option<Face>> = mesh.faces.drain(..).map(Some).collect();
    mesh.faces = order
        .into_iter()
        .filter_map(|face_index| faces[face_index].take())
        .collect();
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::SceneNode;

    #[test]
    fn groups_connected_faces() {
        let mut scene = Scene::new(SceneNode::new("root"));
        scene.meshes.push(Mesh {
            positions: vec![Vec3::ZERO; 9],
            faces: vec![vec![0, 1, 2], vec![6, 7, 8], vec![2, 3, 4], vec![4, 5, 0]],
            ..Default::default()
        });

        run(&mut scene);

        assert_eq!(
            scene.meshes[0].faces,
            vec![vec![0, 1, 2], vec![4, 5, 0], vec![2, 3, 4], vec![6, 7, 8]]
        );
    }
}
