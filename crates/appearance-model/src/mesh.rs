use glam::{Mat4, Vec3, Vec4};

/// Indices into the owning mesh's vertex arrays. One index is a point, two a
/// line, three a triangle, more a polygon.
pub type Face = Vec<u32>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TexCoordChannel {
    /// 2 for UV, 3 for UVW.
    pub components: u32,
    pub coords: Vec<Vec3>,
}

impl TexCoordChannel {
    pub fn uv(coords: impl IntoIterator<Item = [f32; 2]>) -> Self {
        Self {
            components: 2,
            coords: coords
                .into_iter()
                .map(|[u, v]| Vec3::new(u, v, 0.0))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexWeight {
    pub vertex: u32,
    pub weight: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    pub offset: Mat4,
    pub weights: Vec<VertexWeight>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub material_index: u32,

    pub positions: Vec<Vec3>,
    /// Empty, or one per position.
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<TexCoordChannel>,
    pub colors: Vec<Vec<Vec4>>,
    pub faces: Vec<Face>,
    pub bones: Vec<Bone>,
}

impl Mesh {
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    pub fn num_normals(&self) -> usize {
        self.normals.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn num_tex_coord_channels(&self) -> usize {
        self.tex_coords.len()
    }

    pub fn num_color_channels(&self) -> usize {
        self.colors.len()
    }

    pub fn num_bones(&self) -> usize {
        self.bones.len()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn is_triangle_list(&self) -> bool {
        self.faces.iter().all(|face| face.len() == 3)
    }

    /// Meshes with the same layout can be concatenated without losing data.
    pub fn has_same_layout(&self, other: &Mesh) -> bool {
        self.material_index == other.material_index
            && self.has_normals() == other.has_normals()
            && self.colors.len() == other.colors.len()
            && self.tex_coords.len() == other.tex_coords.len()
            && self
                .tex_coords
                .iter()
                .zip(&other.tex_coords)
                .all(|(a, b)| a.components == b.components)
    }

    /// Appends `other`'s vertices and faces. Both meshes must share a layout
    /// and carry no bones.
    pub fn append(&mut self, other: &Mesh) {
        debug_assert!(self.has_same_layout(other));
        debug_assert!(self.bones.is_empty() && other.bones.is_empty());

        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        for (channel, other_channel) in self.tex_coords.iter_mut().zip(&other.tex_coords) {
            channel.coords.extend_from_slice(&other_channel.coords);
        }
        for (channel, other_channel) in self.colors.iter_mut().zip(&other.colors) {
            channel.extend_from_slice(other_channel);
        }
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| face.iter().map(|index| index + offset).collect::<Face>()),
        );
    }
}
