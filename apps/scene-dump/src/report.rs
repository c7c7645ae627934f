use std::io::{self, Write};

use appearance_model::{Animation, Material, Mesh, SceneNode};

pub fn write_node_details(nodes: &[&SceneNode], out: &mut impl Write) -> io::Result<()> {
    for node in nodes {
        writeln!(out, "{}", node.name)?;
        writeln!(out, "  transform: {}", node.transform)?;
        writeln!(out, "  nChilds: {}", node.children.len())?;
        write!(out, "  nMeshes: {} : ", node.meshes.len())?;
        for mesh in &node.meshes {
            write!(out, "#{} ", mesh)?;
        }
        writeln!(out, "\n\n")?;
    }
    Ok(())
}

pub fn write_materials(materials: &[Material], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n==== Materials ====\n\n")?;

    for (i, material) in materials.iter().enumerate() {
        writeln!(out, "Material #{} name: {}", i, material.name)?;
        for texture in &material.textures {
            writeln!(out, "  Texture {} {}  ", texture.ty, texture.path)?;
        }
    }
    Ok(())
}

/// Counts come straight from the mesh, nothing is cross-checked.
pub fn write_meshes(meshes: &[Mesh], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n==== Meshes ====\n\n")?;

    for (i, mesh) in meshes.iter().enumerate() {
        writeln!(out, "Mesh #{} name: {}", i, mesh.name)?;
        writeln!(out, "  vertices: {}", mesh.num_vertices())?;
        writeln!(out, "  normals: {}", mesh.num_normals())?;
        writeln!(out, "  faces: {}", mesh.num_faces())?;
        writeln!(out, "  uv:")?;
        for channel in &mesh.tex_coords {
            writeln!(out, "    type: {}D", channel.components)?;
            writeln!(out, "    elements: {}", channel.coords.len())?;
        }
        writeln!(out, "  vertexColorChannelCount: {}", mesh.num_color_channels())?;
        writeln!(out, "  bones: {}", mesh.num_bones())?;
    }
    Ok(())
}

/// Channels are printed by node name only, whether or not such a node exists.
pub fn write_animations(animations: &[Animation], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n==== Anim data ====\n\n")?;

    for (i, animation) in animations.iter().enumerate() {
        writeln!(out, "Anim #{} #{}", i, animation.name)?;
        writeln!(
            out,
            "  Duration: {} / {} sec.",
            animation.duration, animation.ticks_per_second
        )?;
        writeln!(out, "  Node Channels: {}", animation.channels.len())?;

        for channel in &animation.channels {
            writeln!(out, "  Channel {}", channel.node_name)?;
            writeln!(out, "    Position Keys: {}", channel.position_keys.len())?;
            writeln!(out, "    Rotation Keys: {}", channel.rotation_keys.len())?;
            writeln!(out, "    Scaling  Keys: {}", channel.scaling_keys.len())?;
        }
    }
    Ok(())
}
