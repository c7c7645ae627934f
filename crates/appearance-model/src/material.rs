use std::fmt;

use glam::{Vec3, Vec4};

/// Semantic slot a texture is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureType {
    Diffuse,
    Specular,
    Ambient,
    Emissive,
    Height,
    Normals,
    Shininess,
    Opacity,
    Lightmap,
    BaseColor,
    Metalness,
    DiffuseRoughness,
    Transmission,
    Unknown,
}

impl fmt::Display for TextureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTexture {
    pub ty: TextureType,
    pub path: String,
}

impl MaterialTexture {
    pub fn new(ty: TextureType, path: impl Into<String>) -> Self {
        Self {
            ty,
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub textures: Vec<MaterialTexture>,

    pub color: Vec4,
    pub metallic: f32,
    pub roughness: f32,
    pub emission: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    pub alpha_cutoff: f32,
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            name: String::new(),
            textures: Vec::new(),
            color: Vec4::ONE,
            metallic: 1.0,
            roughness: 1.0,
            emission: Vec3::ZERO,
            specular: Vec3::ZERO,
            shininess: 0.0,
            alpha_cutoff: 0.5,
            double_sided: false,
        }
    }
}

impl Material {
    pub const DEFAULT_NAME: &'static str = "DefaultMaterial";

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Equal in every property except the name.
    pub fn is_redundant_with(&self, other: &Material) -> bool {
        self.textures == other.textures
            && self.color == other.color
            && self.metallic == other.metallic
            && self.roughness == other.roughness
            && self.emission == other.emission
            && self.specular == other.specular
            && self.shininess == other.shininess
            && self.alpha_cutoff == other.alpha_cutoff
            && self.double_sided == other.double_sided
    }
}
