use std::{
    collections::HashMap,
    io::{self, Write},
};

use appearance_model::{Scene, SceneNode};

/// Walks the tree depth-first, pre-order, writing one tab-indented line per
/// node. Returns the nodes in the order they were written.
pub fn flatten_nodes<'a>(
    root: &'a SceneNode,
    out: &mut impl Write,
) -> io::Result<Vec<&'a SceneNode>> {
    let mut nodes = Vec::new();
    let mut stack = vec![(root, 0)];

    while let Some((node, depth)) = stack.pop() {
        writeln!(out, "{}{}", "\t".repeat(depth), node.name)?;
        nodes.push(node);

        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    Ok(nodes)
}

/// Resolves node names, as used by animation channels, to nodes.
pub struct NodeLookup<'a> {
    by_name: HashMap<&'a str, &'a SceneNode>,
}

impl<'a> NodeLookup<'a> {
    /// The first node wins when names collide.
    pub fn new(nodes: &[&'a SceneNode]) -> Self {
        let mut by_name = HashMap::with_capacity(nodes.len());
        for node in nodes {
            if by_name.contains_key(node.name.as_str()) {
                log::warn!("Node name '{}' is not unique", node.name);
                continue;
            }
            by_name.insert(node.name.as_str(), *node);
        }

        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a SceneNode> {
        self.by_name.get(name).copied()
    }
}

/// Reports references the importer left dangling. Only logs, the dump itself
/// prints whatever the scene holds.
pub fn log_unresolved_references(scene: &Scene, nodes: &[&SceneNode]) {
    for node in nodes {
        for &mesh in &node.meshes {
            if mesh as usize >= scene.meshes.len() {
                log::warn!(
                    "Node '{}' references mesh #{} but the scene has {} meshes",
                    node.name,
                    mesh,
                    scene.meshes.len()
                );
            }
        }
    }

    let lookup = NodeLookup::new(nodes);
    for animation in &scene.animations {
        for channel in &animation.channels {
            if lookup.get(&channel.node_name).is_none() {
                log::warn!(
                    "Animation '{}' targets unknown node '{}'",
                    animation.name,
                    channel.node_name
                );
            }
        }
    }
}
