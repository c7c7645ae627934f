use std::collections::HashMap;

use glam::{Vec3, Vec4};

use crate::{Mesh, Scene};

/// Collapses vertices that agree on every attribute, including bone weights.
pub(super) fn run(scene: &mut Scene) {
    appearance_profiling::profile_function!();

    for mesh in &mut scene.meshes {
        let before = mesh.num_vertices();
        join_mesh(mesh);
        if mesh.num_vertices() != before {
            log::debug!(
                "Joined vertices of mesh '{}': {} -> {}",
                mesh.name,
                before,
                mesh.num_vertices()
            );
        }
    }
}

fn join_mesh(mesh: &mut Mesh) {
    let vertex_count = mesh.positions.len();

    let mut vertex_weights: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
    for (bone_index, bone) in mesh.bones.iter().enumerate() {
        for weight in &bone.weights {
            if let Some(weights) = vertex_weights.get_mut(weight.vertex as usize) {
                weights.push(bone_index as u32);
                weights.push(weight.weight.to_bits());
            }
        }
    }

    let mut unique: HashMap<Vec<u32>, u32> = HashMap::with_capacity(vertex_count);
    let mut kept: Vec<usize> = Vec::with_capacity(vertex_count);
    let mut remap: Vec<u32> = Vec::with_capacity(vertex_count);
    for vertex in 0..vertex_count {
        let key = vertex_key(mesh, vertex, &vertex_weights[vertex]);
        let index = *unique.entry(key).or_insert_with(|| {
            kept.push(vertex);
            (kept.len() - 1) as u32
        });
        remap.push(index);
    }

    if kept.len() == vertex_count {
        return;
    }

    mesh.positions = gather(&mesh.positions, &kept);
    mesh.normals = gather(&mesh.normals, &kept);
    for channel in &mut mesh.tex_coords {
        channel.coords = gather(&channel.coords, &kept);
    }
    for channel in &mut mesh.colors {
        *channel = gather(channel, &kept);
    }

    for face in &mut mesh.faces {
        for index in face.iter_mut() {
            if let Some(&new_index) = remap.get(*index as usize) {
                *index = new_index;
            }
        }
    }

    for bone in &mut mesh.bones {
        bone.weights.retain_mut(|weight| {
            let old_index = weight.vertex as usize;
            match remap.get(old_index) {
                Some(&new_index) if kept[new_index as usize] == old_index => {
                    weight.vertex = new_index;
                    true
                }
                _ => false,
            }
        });
    }
}

fn vertex_key(mesh: &Mesh, vertex: usize, weights: &[u32]) -> Vec<u32> {
    let mut key = Vec::with_capacity(16 + weights.len());
    push_vec3(&mut key, mesh.positions.get(vertex));
    push_vec3(&mut key, mesh.normals.get(vertex));
    for channel in &mesh.tex_coords {
        push_vec3(&mut key, channel.coords.get(vertex));
    }
    for channel in &mesh.colors {
        push_vec4(&mut key, channel.get(vertex));
    }
    key.extend_from_slice(weights);
    key
}

fn push_vec3(key: &mut Vec<u32>, value: Option<&Vec3>) {
    if let Some(value) = value {
        key.extend_from_slice(&bytemuck::cast::<Vec3, [u32; 3]>(*value));
    }
}

fn push_vec4(key: &mut Vec<u32>, value: Option<&Vec4>) {
    if let Some(value) = value {
        key.extend_from_slice(&bytemuck::cast::<Vec4, [u32; 4]>(*value));
    }
}

fn gather<T: Copy>(values: &[T], kept: &[usize]) -> Vec<T> {
    kept.iter()
        .filter_map(|&index| values.get(index).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::{Bone, SceneNode, TexCoordChannel, VertexWeight};

    fn split_quad() -> Mesh {
        Mesh {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::ZERO, Vec3::ONE, Vec3::Y],
            normals: vec![Vec3::Z; 6],
            tex_coords: vec![TexCoordChannel::uv([
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [0.0, 0.0],
                [1.0, 1.0],
                [0.0, 1.0],
            ])],
            faces: vec![vec![0, 1, 2], vec![3, 4, 5]],
            ..Default::default()
        }
    }

    #[test]
    fn joins_shared_corners() {
        let mut scene = Scene::new(SceneNode::new("root"));
        scene.meshes.push(split_quad());

        run(&mut scene);

        let mesh = &scene.meshes[0];
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_normals(), 4);
        assert_eq!(mesh.tex_coords[0].coords.len(), 4);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2], vec![0, 2, 3]]);
    }

    #[test]
    fn differing_attributes_prevent_joining() {
        let mut mesh = split_quad();
        mesh.tex_coords[0].coords[3] = Vec3::new(0.5, 0.5, 0.0);
        mesh.bones.push(Bone {
            name: "spine".to_owned(),
            offset: Mat4::IDENTITY,
            weights: vec![
                VertexWeight {
                    vertex: 2,
                    weight: 1.0,
                },
                VertexWeight {
                    vertex: 4,
                    weight: 0.5,
                },
            ],
        });

        let mut scene = Scene::new(SceneNode::new("root"));
        scene.meshes.push(mesh);
        run(&mut scene);

        let mesh = &scene.meshes[0];
        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.bones[0].weights.len(), 2);
    }

    #[test]
    fn bone_weights_follow_joined_vertices() {
        let mut mesh = split_quad();
        mesh.bones.push(Bone {
            name: "spine".to_owned(),
            offset: Mat4::IDENTITY,
            weights: vec![
                VertexWeight {
                    vertex: 0,
                    weight: 1.0,
                },
                VertexWeight {
                    vertex: 3,
                    weight: 1.0,
                },
                VertexWeight {
                    vertex: 5,
                    weight: 0.25,
                },
            ],
        });

        let mut scene = Scene::new(SceneNode::new("root"));
        scene.meshes.push(mesh);
        run(&mut scene);

        let weights = &scene.meshes[0].bones[0].weights;
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].vertex, 0);
        assert_eq!(weights[1].vertex, 3);
    }
}
