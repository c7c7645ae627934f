use std::path::Path;

use anyhow::Result;
use glam::{Vec3, Vec4};

use crate::{
    Face, Material, MaterialTexture, Mesh, Scene, SceneNode, TexCoordChannel, TextureType,
};

/// Loads an OBJ file. Every object or group becomes one mesh hanging off its
/// own child of a root node named after the file.
pub(super) fn load(path: &Path) -> Result<Scene> {
    appearance_profiling::profile_function!();

    let load_options = tobj::LoadOptions {
        single_index: true,
        triangulate: false,
        ..Default::default()
    };

    let (models, obj_materials) = tobj::load_obj(path, &load_options)?;
    let obj_materials = obj_materials.unwrap_or_else(|err| {
        log::warn!(
            "Failed to load material library for {}: {}",
            path.display(),
            err
        );
        Vec::new()
    });

    let mut materials: Vec<Material> = obj_materials.iter().map(process_material).collect();
    let default_material = if models
        .iter()
        .any(|model| !matches!(model.mesh.material_id, Some(id) if id < obj_materials.len()))
    {
        materials.push(Material::named(Material::DEFAULT_NAME));
        materials.len() - 1
    } else {
        0
    };

    let root_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut root = SceneNode::new(root_name);

    let mut meshes = Vec::with_capacity(models.len());
    for model in &models {
        let material_index = match model.mesh.material_id {
            Some(id) if id < obj_materials.len() => id,
            _ => default_material,
        };

        let mut node = SceneNode::new(model.name.clone());
        node.meshes.push(meshes.len() as u32);
        root.children.push(node);

        meshes.push(process_mesh(model, material_index as u32));
    }

    Ok(Scene {
        root,
        materials,
        meshes,
        animations: Vec::new(),
    })
}

fn process_mesh(model: &tobj::Model, material_index: u32) -> Mesh {
    let mesh = &model.mesh;

    let positions = mesh
        .positions
        .chunks_exact(3)
        .map(Vec3::from_slice)
        .collect();
    let normals = mesh
        .normals
        .chunks_exact(3)
        .map(Vec3::from_slice)
        .collect();

    let mut tex_coords = Vec::new();
    if !mesh.texcoords.is_empty() {
        tex_coords.push(TexCoordChannel::uv(
            mesh.texcoords.chunks_exact(2).map(|uv| [uv[0], uv[1]]),
        ));
    }

    let mut colors = Vec::new();
    if !mesh.vertex_color.is_empty() {
        colors.push(
            mesh.vertex_color
                .chunks_exact(3)
                .map(|rgb| Vec4::new(rgb[0], rgb[1], rgb[2], 1.0))
                .collect(),
        );
    }

    Mesh {
        name: model.name.clone(),
        material_index,
        positions,
        normals,
        tex_coords,
        colors,
        faces: split_faces(&mesh.indices, &mesh.face_arities),
        bones: Vec::new(),
    }
}

/// An empty arity list means every face is a triangle.
fn split_faces(indices: &[u32], face_arities: &[u32]) -> Vec<Face> {
    if face_arities.is_empty() {
        return indices.chunks_exact(3).map(<[u32]>::to_vec).collect();
    }

    let mut faces = Vec::with_capacity(face_arities.len());
    let mut start = 0;
    for &arity in face_arities {
        let end = start + arity as usize;
        let Some(face) = indices.get(start..end) else {
            break;
        };
        faces.push(face.to_vec());
        start = end;
    }
    faces
}

fn process_material(material: &tobj::Material) -> Material {
    let diffuse = material.diffuse.unwrap_or([1.0; 3]);

    let mut result = Material {
        name: material.name.clone(),
        color: Vec4::new(
            diffuse[0],
            diffuse[1],
            diffuse[2],
            material.dissolve.unwrap_or(1.0),
        ),
        specular: material.specular.map(Vec3::from).unwrap_or(Vec3::ZERO),
        shininess: material.shininess.unwrap_or(0.0),
        ..Default::default()
    };

    let slots = [
        (TextureType::Diffuse, &material.diffuse_texture),
        (TextureType::Ambient, &material.ambient_texture),
        (TextureType::Specular, &material.specular_texture),
        (TextureType::Normals, &material.normal_texture),
        (TextureType::Shininess, &material.shininess_texture),
        (TextureType::Opacity, &material.dissolve_texture),
    ];
    for (ty, texture) in slots {
        if let Some(path) = texture {
            result.textures.push(MaterialTexture::new(ty, path.as_str()));
        }
    }

    result
}
