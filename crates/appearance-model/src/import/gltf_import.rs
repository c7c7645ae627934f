use std::{
    collections::{HashMap, HashSet},
    fs,
    ops::Range,
    path::Path,
};

use anyhow::{bail, Result};
use glam::{Mat4, Quat, Vec3, Vec4};
use gltf::{
    animation::{util::ReadOutputs, Interpolation, Property},
    mesh::Mode,
    Gltf,
};

use crate::{
    Animation, Bone, Face, Material, MaterialTexture, Mesh, NodeAnimation, QuatKey, Scene,
    SceneNode, TexCoordChannel, TextureType, VectorKey, VertexWeight,
};

/// Key times are stored in milliseconds.
const TICKS_PER_SECOND: f64 = 1000.0;

struct Skin {
    joint_names: Vec<String>,
    inverse_bind_matrices: Vec<Mat4>,
}

pub(super) fn load(path: &Path) -> Result<Scene> {
    appearance_profiling::profile_function!();

    let data = fs::read(path)?;
    let Gltf { document, blob } = Gltf::from_slice(&data)?;
    let buffers = gltf::import_buffers(&document, path.parent(), blob)?;

    let mut materials: Vec<Material> = document.materials().map(|m| process_material(&m)).collect();
    let needs_default_material = document
        .meshes()
        .any(|mesh| mesh.primitives().any(|p| p.material().index().is_none()));
    let default_material = if needs_default_material {
        materials.push(Material::named(Material::DEFAULT_NAME));
        Some(materials.len() - 1)
    } else {
        None
    };

    let skins: Vec<Skin> = document
        .skins()
        .map(|skin| {
            let reader = skin.reader(|buffer| Some(&buffers[buffer.index()]));
            Skin {
                joint_names: skin.joints().map(|joint| node_name(&joint)).collect(),
                inverse_bind_matrices: reader
                    .read_inverse_bind_matrices()
                    .map(|iter| iter.map(|m| Mat4::from_cols_array_2d(&m)).collect())
                    .unwrap_or_default(),
            }
        })
        .collect();

    // A mesh is bound to the skin of the first node instancing it.
    let mut mesh_skins: HashMap<usize, usize> = HashMap::new();
    for node in document.nodes() {
        if let (Some(mesh), Some(skin)) = (node.mesh(), node.skin()) {
            mesh_skins.entry(mesh.index()).or_insert(skin.index());
        }
    }

    let mut meshes = Vec::new();
    let mut mesh_ranges: Vec<Range<u32>> = Vec::with_capacity(document.meshes().len());
    for mesh in document.meshes() {
        let skin = mesh_skins
            .get(&mesh.index())
            .and_then(|&skin| skins.get(skin));
        let start = meshes.len() as u32;
        let primitive_count = mesh.primitives().count();
        for primitive in mesh.primitives() {
            let name = mesh_name(&mesh, primitive.index(), primitive_count);
            meshes.push(process_primitive(
                name,
                &primitive,
                &buffers,
                default_material,
                skin,
            )?);
        }
        mesh_ranges.push(start..meshes.len() as u32);
    }

    let Some(scene) = document
        .default_scene()
        .or_else(|| document.scenes().next())
    else {
        bail!("glTF file contains no scene");
    };

    let mut roots = process_node_tree(scene.nodes(), &mesh_ranges)?;
    let root = if roots.len() == 1 {
        roots.swap_remove(0)
    } else {
        let mut root = SceneNode::new("ROOT");
        root.children = roots;
        root
    };

    let animations = document
        .animations()
        .map(|animation| process_animation(&animation, &buffers))
        .collect();

    Ok(Scene {
        root,
        materials,
        meshes,
        animations,
    })
}

fn node_name(node: &gltf::Node) -> String {
    node.name()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("node_{}", node.index()))
}

fn mesh_name(mesh: &gltf::Mesh, primitive: usize, primitive_count: usize) -> String {
    let name = mesh
        .name()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("mesh_{}", mesh.index()));
    if primitive_count > 1 {
        format!("{}-{}", name, primitive)
    } else {
        name
    }
}

fn process_node(node: &gltf::Node, mesh_ranges: &[Range<u32>]) -> SceneNode {
    let mut scene_node = SceneNode::new(node_name(node));
    scene_node.transform = Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(range) = node.mesh().and_then(|mesh| mesh_ranges.get(mesh.index())) {
        scene_node.meshes.extend(range.clone());
    }
    scene_node
}

/// Builds the owned node tree below `roots` with an explicit stack. Nodes are
/// laid out in pre-order first, then every node is moved into its parent from
/// the back, so children are complete before their parent is taken.
fn process_node_tree<'a>(
    roots: impl Iterator<Item = gltf::Node<'a>>,
    mesh_ranges: &[Range<u32>],
) -> Result<Vec<SceneNode>> {
    appearance_profiling::profile_function!();

    let mut visited = HashSet::new();
    let mut nodes: Vec<Option<SceneNode>> = Vec::new();
    let mut parents: Vec<Option<usize>> = Vec::new();

    let mut stack: Vec<(gltf::Node<'a>, Option<usize>)> =
        roots.map(|node| (node, None)).collect();
    stack.reverse();

    while let Some((node, parent)) = stack.pop() {
        if !visited.insert(node.index()) {
            bail!(
                "glTF node hierarchy is not a tree (node {} revisited)",
                node.index()
            );
        }

        let slot = nodes.len();
        nodes.push(Some(process_node(&node, mesh_ranges)));
        parents.push(parent);

        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, Some(slot))));
    }

    let mut tree = Vec::new();
    for slot in (0..nodes.len()).rev() {
        let Some(mut node) = nodes[slot].take() else {
            continue;
        };
        node.children.reverse();
        match parents[slot] {
            Some(parent) => {
                if let Some(Some(parent)) = nodes.get_mut(parent) {
                    parent.children.push(node);
                }
            }
            None => tree.push(node),
        }
    }
    tree.reverse();
    Ok(tree)
}

fn process_primitive(
    name: String,
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    default_material: Option<usize>,
    skin: Option<&Skin>,
) -> Result<Mesh> {
    appearance_profiling::profile_function!();

    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let Some(positions) = reader.read_positions() else {
        bail!("Mesh '{}' has no vertex positions", name);
    };
    let positions: Vec<Vec3> = positions.map(Vec3::from).collect();

    let normals = reader
        .read_normals()
        .map(|normals| normals.map(Vec3::from).collect())
        .unwrap_or_default();

    let mut tex_coords = Vec::new();
    while let Some(coords) = reader.read_tex_coords(tex_coords.len() as u32) {
        tex_coords.push(TexCoordChannel::uv(coords.into_f32()));
    }

    let mut colors = Vec::new();
    while let Some(channel) = reader.read_colors(colors.len() as u32) {
        colors.push(channel.into_rgba_f32().map(Vec4::from).collect());
    }

    let indices: Vec<u32> = reader
        .read_indices()
        .map(|indices| indices.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    let mut bones = Vec::new();
    if let Some(skin) = skin {
        bones = skin
            .joint_names
            .iter()
            .enumerate()
            .map(|(joint, name)| Bone {
                name: name.clone(),
                offset: skin
                    .inverse_bind_matrices
                    .get(joint)
                    .copied()
                    .unwrap_or(Mat4::IDENTITY),
                weights: Vec::new(),
            })
            .collect::<Vec<_>>();

        let mut set = 0;
        while let (Some(joints), Some(weights)) = (reader.read_joints(set), reader.read_weights(set))
        {
            for (vertex, (joints, weights)) in joints.into_u16().zip(weights.into_f32()).enumerate() {
                for (joint, weight) in joints.into_iter().zip(weights) {
                    if weight <= 0.0 {
                        continue;
                    }
                    if let Some(bone) = bones.get_mut(joint as usize) {
                        bone.weights.push(VertexWeight {
                            vertex: vertex as u32,
                            weight,
                        });
                    }
                }
            }
            set += 1;
        }
    }

    let material_index = primitive
        .material()
        .index()
        .or(default_material)
        .unwrap_or_default() as u32;

    Ok(Mesh {
        name,
        material_index,
        positions,
        normals,
        tex_coords,
        colors,
        faces: build_faces(primitive.mode(), &indices),
        bones,
    })
}

fn build_faces(mode: Mode, indices: &[u32]) -> Vec<Face> {
    match mode {
        Mode::Points => indices.iter().map(|&i| vec![i]).collect(),
        Mode::Lines => indices.chunks_exact(2).map(<[u32]>::to_vec).collect(),
        Mode::LineStrip => indices.windows(2).map(<[u32]>::to_vec).collect(),
        Mode::LineLoop => {
            let mut faces: Vec<Face> = indices.windows(2).map(<[u32]>::to_vec).collect();
            if let (true, Some(&first), Some(&last)) =
                (indices.len() > 2, indices.first(), indices.last())
            {
                faces.push(vec![last, first]);
            }
            faces
        }
        Mode::Triangles => indices.chunks_exact(3).map(<[u32]>::to_vec).collect(),
        Mode::TriangleStrip => (0..indices.len().saturating_sub(2))
            .map(|i| {
                // Every other triangle is flipped to keep the winding.
                if i % 2 == 0 {
                    vec![indices[i], indices[i + 1], indices[i + 2]]
                } else {
                    vec![indices[i + 1], indices[i], indices[i + 2]]
                }
            })
            .collect(),
        Mode::TriangleFan => (1..indices.len().saturating_sub(1))
            .map(|i| vec![indices[0], indices[i], indices[i + 1]])
            .collect(),
    }
}

fn process_material(material: &gltf::Material) -> Material {
    let pbr = material.pbr_metallic_roughness();

    let mut result = Material {
        name: material
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("material_{}", material.index().unwrap_or_default())),
        textures: Vec::new(),
        color: Vec4::from(pbr.base_color_factor()),
        metallic: pbr.metallic_factor(),
        roughness: pbr.roughness_factor(),
        emission: Vec3::from(material.emissive_factor())
            * material.emissive_strength().unwrap_or(1.0),
        specular: Vec3::ZERO,
        shininess: 0.0,
        alpha_cutoff: material.alpha_cutoff().unwrap_or(0.5),
        double_sided: material.double_sided(),
    };

    let mut add_texture = |ty: TextureType, texture: gltf::Texture| {
        result
            .textures
            .push(MaterialTexture::new(ty, texture_path(&texture)));
    };

    if let Some(info) = pbr.base_color_texture() {
        add_texture(TextureType::Diffuse, info.texture());
        add_texture(TextureType::BaseColor, info.texture());
    }
    if let Some(info) = pbr.metallic_roughness_texture() {
        add_texture(TextureType::Metalness, info.texture());
        add_texture(TextureType::DiffuseRoughness, info.texture());
    }
    if let Some(normal) = material.normal_texture() {
        add_texture(TextureType::Normals, normal.texture());
    }
    if let Some(occlusion) = material.occlusion_texture() {
        add_texture(TextureType::Lightmap, occlusion.texture());
    }
    if let Some(info) = material.emissive_texture() {
        add_texture(TextureType::Emissive, info.texture());
    }
    if let Some(info) = material
        .transmission()
        .and_then(|transmission| transmission.transmission_texture())
    {
        add_texture(TextureType::Transmission, info.texture());
    }
    if let Some(specular) = material.specular() {
        if let Some(info) = specular.specular_texture() {
            add_texture(TextureType::Specular, info.texture());
        }
        if let Some(info) = specular.specular_color_texture() {
            add_texture(TextureType::Specular, info.texture());
        }
        result.specular =
            Vec3::from(specular.specular_color_factor()) * specular.specular_factor();
    }

    result
}

/// Embedded images are referenced as `*<image index>`.
fn texture_path(texture: &gltf::Texture) -> String {
    let image = texture.source();
    match image.source() {
        gltf::image::Source::Uri { uri, .. } => uri.to_owned(),
        gltf::image::Source::View { .. } => format!("*{}", image.index()),
    }
}

fn process_animation(animation: &gltf::Animation, buffers: &[gltf::buffer::Data]) -> Animation {
    appearance_profiling::profile_function!();

    let mut channels: Vec<NodeAnimation> = Vec::new();
    let mut rest_poses: Vec<([f32; 3], [f32; 4], [f32; 3])> = Vec::new();
    let mut channel_by_node: HashMap<usize, usize> = HashMap::new();

    for channel in animation.channels() {
        let target = channel.target();
        if target.property() == Property::MorphTargetWeights {
            continue;
        }

        let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));
        let (Some(inputs), Some(outputs)) = (reader.read_inputs(), reader.read_outputs()) else {
            continue;
        };
        let times: Vec<f64> = inputs.map(|t| t as f64 * TICKS_PER_SECOND).collect();
        let cubic = channel.sampler().interpolation() == Interpolation::CubicSpline;

        let node = target.node();
        let slot = *channel_by_node.entry(node.index()).or_insert_with(|| {
            channels.push(NodeAnimation::new(node_name(&node)));
            rest_poses.push(node.transform().decomposed());
            channels.len() - 1
        });
        let node_animation = &mut channels[slot];

        match outputs {
            ReadOutputs::Translations(values) => {
                node_animation.position_keys = keyframe_values(values.map(Vec3::from), cubic)
                    .into_iter()
                    .zip(&times)
                    .map(|(value, &time)| VectorKey { time, value })
                    .collect();
            }
            ReadOutputs::Rotations(values) => {
                node_animation.rotation_keys =
                    keyframe_values(values.into_f32().map(Quat::from_array), cubic)
                        .into_iter()
                        .zip(&times)
                        .map(|(value, &time)| QuatKey { time, value })
                        .collect();
            }
            ReadOutputs::Scales(values) => {
                node_animation.scaling_keys = keyframe_values(values.map(Vec3::from), cubic)
                    .into_iter()
                    .zip(&times)
                    .map(|(value, &time)| VectorKey { time, value })
                    .collect();
            }
            ReadOutputs::MorphTargetWeights(_) => {}
        }
    }

    for (channel, (translation, rotation, scale)) in channels.iter_mut().zip(rest_poses) {
        if channel.position_keys.is_empty() {
            channel.position_keys.push(VectorKey {
                time: 0.0,
                value: Vec3::from(translation),
            });
        }
        if channel.rotation_keys.is_empty() {
            channel.rotation_keys.push(QuatKey {
                time: 0.0,
                value: Quat::from_array(rotation),
            });
        }
        if channel.scaling_keys.is_empty() {
            channel.scaling_keys.push(VectorKey {
                time: 0.0,
                value: Vec3::from(scale),
            });
        }
    }

    Animation {
        name: animation.name().unwrap_or_default().to_owned(),
        duration: channels
            .iter()
            .map(NodeAnimation::end_time)
            .fold(0.0, f64::max),
        ticks_per_second: TICKS_PER_SECOND,
        channels,
    }
}

/// Cubic spline outputs store an in-tangent, value and out-tangent per key.
fn keyframe_values<T>(values: impl Iterator<Item = T>, cubic: bool) -> Vec<T> {
    if cubic {
        values.skip(1).step_by(3).collect()
    } else {
        values.collect()
    }
}
