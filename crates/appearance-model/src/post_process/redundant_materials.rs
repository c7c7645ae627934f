use crate::{Material, Scene};

/// Drops materials no mesh uses and folds materials that only differ by name
/// into the first occurrence.
pub(super) fn run(scene: &mut Scene) {
    appearance_profiling::profile_function!();

    if scene.materials.is_empty() {
        return;
    }

    let drop_unreferenced = !scene.meshes.is_empty();
    let mut referenced = vec![!drop_unreferenced; scene.materials.len()];
    for mesh in &scene.meshes {
        if let Some(referenced) = referenced.get_mut(mesh.material_index as usize) {
            *referenced = true;
        }
    }

    let original_len = scene.materials.len();
    let mut remap = vec![None; original_len];
    let mut kept: Vec<Material> = Vec::with_capacity(original_len);
    for (index, material) in scene.materials.drain(..).enumerate() {
        if !referenced[index] {
            continue;
        }

        match kept.iter().position(|k| k.is_redundant_with(&material)) {
            Some(existing) => remap[index] = Some(existing as u32),
            None => {
                remap[index] = Some(kept.len() as u32);
                kept.push(material);
            }
        }
    }

    for mesh in &mut scene.meshes {
        if let Some(Some(index)) = remap.get(mesh.material_index as usize) {
            mesh.material_index = *index;
        }
    }

    if kept.len() != original_len {
        log::debug!(
            "Removed {} redundant or unreferenced materials",
            original_len - kept.len()
        );
    }
    scene.materials = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaterialTexture, Mesh, SceneNode, TextureType};

    fn mesh(material_index: u32) -> Mesh {
        Mesh {
            material_index,
            ..Default::default()
        }
    }

    #[test]
    fn merges_duplicates_and_drops_unused() {
        let mut scene = Scene::new(SceneNode::new("root"));
        let mut textured = Material::named("textured");
        textured
            .textures
            .push(MaterialTexture::new(TextureType::Diffuse, "a.png"));
        scene.materials = vec![
            Material::named("plain"),
            textured,
            Material::named("plain copy"),
            Material::named("unused"),
        ];
        scene.meshes = vec![mesh(2), mesh(1), mesh(0)];

        run(&mut scene);

        let names: Vec<_> = scene.materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["plain", "textured"]);
        let indices: Vec<_> = scene.meshes.iter().map(|m| m.material_index).collect();
        assert_eq!(indices, [0, 1, 0]);
    }

    #[test]
    fn keeps_materials_of_mesh_less_scenes() {
        let mut scene = Scene::new(SceneNode::new("root"));
        scene.materials = vec![Material::named("a"), Material::named("b")];
        run(&mut scene);
        assert_eq!(scene.materials.len(), 1);
    }
}
