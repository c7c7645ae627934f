use glam::Mat4;

pub use animation::{Animation, NodeAnimation, QuatKey, VectorKey};
pub use material::{Material, MaterialTexture, TextureType};
pub use mesh::{Bone, Face, Mesh, TexCoordChannel, VertexWeight};
pub use post_process::PostProcessSteps;

pub mod animation;
pub mod import;
pub mod material;
pub mod mesh;
pub mod post_process;

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,

    pub transform: Mat4,
    pub children: Vec<SceneNode>,

    /// Indices into [`Scene::meshes`].
    pub meshes: Vec<u32>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            children: Vec::new(),
            meshes: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        let mut len = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            len += 1;
            stack.extend(node.children.iter());
        }
        len
    }

    pub(crate) fn for_each_mut(&mut self, f: &mut impl FnMut(&mut SceneNode)) {
        f(self);
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }
}

/// An imported scene. Owns every node, material, mesh and animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub root: SceneNode,
    pub materials: Vec<Material>,
    pub meshes: Vec<Mesh>,
    pub animations: Vec<Animation>,
}

impl Scene {
    pub fn new(root: SceneNode) -> Self {
        Self {
            root,
            materials: Vec::new(),
            meshes: Vec::new(),
            animations: Vec::new(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.root.subtree_len()
    }

    /// How many nodes reference each mesh.
    pub fn mesh_instance_counts(&self) -> Vec<u32> {
        let mut counts = vec![0; self.meshes.len()];
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            for &mesh in &node.meshes {
                if let Some(count) = counts.get_mut(mesh as usize) {
                    *count += 1;
                }
            }
            stack.extend(node.children.iter());
        }
        counts
    }
}
