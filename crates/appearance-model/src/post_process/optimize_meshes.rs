use crate::{Mesh, Scene};

const MAX_MERGED_VERTICES: usize = 1_000_000;

/// Merges meshes attached to the same node when they share a material and
/// vertex layout. Meshes that are instanced, skinned or mix primitive types
/// are left alone.
pub(super) fn run(scene: &mut Scene) {
    appearance_profiling::profile_function!();

    let instance_counts = scene.mesh_instance_counts();
    let original_len = scene.meshes.len();
    let mut slots: Vec<Option<Mesh>> = std::mem::take(&mut scene.meshes)
        .into_iter()
        .map(Some)
        .collect();
    let mut remap: Vec<Option<u32>> = vec![None; original_len];
    let mut meshes: Vec<Mesh> = Vec::with_capacity(original_len);

    scene.root.for_each_mut(&mut |node| {
        let mut node_meshes = Vec::with_capacity(node.meshes.len());
        let mut merge_targets: Vec<usize> = Vec::new();

        for &index in &node.meshes {
            let slot = index as usize;
            if slot >= original_len {
                node_meshes.push(index);
                continue;
            }
            if let Some(new_index) = remap[slot] {
                node_meshes.push(new_index);
                continue;
            }
            let Some(mesh) = slots[slot].take() else {
                continue;
            };

            let mergeable = instance_counts[slot] == 1 && mesh.bones.is_empty();
            if mergeable {
                let target = merge_targets
                    .iter()
                    .copied()
                    .find(|&target| can_merge(&meshes[target], &mesh));
                if let Some(target) = target {
                    meshes[target].append(&mesh);
                    remap[slot] = Some(target as u32);
                    continue;
                }
            }

            let new_index = meshes.len();
            if mergeable {
                merge_targets.push(new_index);
            }
            remap[slot] = Some(new_index as u32);
            node_meshes.push(new_index as u32);
            meshes.push(mesh);
        }

        node.meshes = node_meshes;
    });

    // Meshes no node references keep their relative order at the end.
    meshes.extend(slots.into_iter().flatten());

    if meshes.len() != original_len {
        log::debug!("Merged {} meshes into {}", original_len, meshes.len());
    }
    scene.meshes = meshes;
}

fn can_merge(target: &Mesh, mesh: &Mesh) -> bool {
    target.has_same_layout(mesh)
        && face_arity(target).is_some()
        && face_arity(target) == face_arity(mesh)
        && target.num_vertices() + mesh.num_vertices() <= MAX_MERGED_VERTICES
}

fn face_arity(mesh: &Mesh) -> Option<usize> {
    let first = mesh.faces.first()?.len();
    mesh.faces
        .iter()
        .all(|face| face.len() == first)
        .then_some(first)
}
