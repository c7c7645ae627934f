use crate::{Animation, Mesh, Scene};

/// Strips vertex data that carries no information and collapses constant
/// animation tracks.
pub(super) fn run(scene: &mut Scene) {
    appearance_profiling::profile_function!();

    for mesh in &mut scene.meshes {
        process_mesh(mesh);
    }
    for animation in &mut scene.animations {
        process_animation(animation);
    }
}

fn process_mesh(mesh: &mut Mesh) {
    if mesh
        .normals
        .iter()
        .any(|normal| !normal.is_finite() || normal.length_squared() == 0.0)
    {
        log::debug!("Mesh '{}' has invalid normals, removing them", mesh.name);
        mesh.normals.clear();
    }

    let name = &mesh.name;
    mesh.tex_coords.retain(|channel| {
        let invalid = channel.coords.iter().any(|coord| !coord.is_finite())
            || (channel.coords.len() > 1
                && channel.coords.iter().all(|coord| *coord == channel.coords[0]));
        if invalid {
            log::debug!("Mesh '{}' has a constant or invalid uv channel, removing it", name);
        }
        !invalid
    });
}

fn process_animation(animation: &mut Animation) {
    for channel in &mut animation.channels {
        if is_constant(&channel.position_keys, |key| key.value) {
            channel.position_keys.truncate(1);
        }
        if is_constant(&channel.rotation_keys, |key| key.value) {
            channel.rotation_keys.truncate(1);
        }
        if is_constant(&channel.scaling_keys, |key| key.value) {
            channel.scaling_keys.truncate(1);
        }
    }
}

fn is_constant<K, V: PartialEq>(keys: &[K], value: impl Fn(&K) -> V) -> bool {
    match keys.split_first() {
        Some((first, rest)) if !rest.is_empty() => {
            let first = value(first);
            rest.iter().all(|key| value(key) == first)
        }
        _ => false,
    }
}
