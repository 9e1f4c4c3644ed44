//! Lighting parameters and per-draw uniform packing.
//!
//! The shader carries several lighting functions with identical signatures.
//! Which one runs is chosen per draw by [`LightingModel::index`], written into
//! the draw uniform. The pipeline is shared; only the uniform differs.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::camera::Camera;

/// Selectable lighting function.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum LightingModel {
    /// Ambient + diffuse + specular.
    #[default]
    Phong,
    /// Lambert diffuse only.
    DiffuseOnly,
}

impl LightingModel {
    pub const ALL: [LightingModel; 2] = [LightingModel::Phong, LightingModel::DiffuseOnly];

    /// Value the shader switches on. Must match `shade()` in `lighting.wgsl`.
    #[inline]
    pub const fn index(self) -> u32 {
        match self {
            LightingModel::Phong => 0,
            LightingModel::DiffuseOnly => 1,
        }
    }

    #[inline]
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.index() == index)
    }

    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            LightingModel::Phong => LightingModel::DiffuseOnly,
            LightingModel::DiffuseOnly => LightingModel::Phong,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            LightingModel::Phong => "phong",
            LightingModel::DiffuseOnly => "diffuse-only",
        }
    }
}

impl fmt::Display for LightingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Point light in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 5.0),
            intensity: Vec3::ONE,
        }
    }
}

/// Surface reflectance.
///
/// `diffuse` is multiplied with the vertex color in the shader.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::ONE,
            specular: Vec3::splat(0.8),
            shininess: 100.0,
        }
    }
}

/// Uniform block for one draw (304 bytes, WGSL uniform layout):
///
///  offset   0  model           mat4x4<f32>
///  offset  64  view_proj       mat4x4<f32>
///  offset 128  normal_matrix   mat4x4<f32>  (inverse-transpose of model)
///  offset 192  light_position  vec4<f32>
///  offset 208  light_intensity vec4<f32>
///  offset 224  ka              vec4<f32>
///  offset 240  kd              vec4<f32>
///  offset 256  ks_shininess    vec4<f32>    (.w = shininess)
///  offset 272  camera_position vec4<f32>
///  offset 288  lighting        vec4<u32>    (.x = LightingModel::index)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub light_position: [f32; 4],
    pub light_intensity: [f32; 4],
    pub ka: [f32; 4],
    pub kd: [f32; 4],
    pub ks_shininess: [f32; 4],
    pub camera_position: [f32; 4],
    pub lighting: [u32; 4],
}

impl DrawUniform {
    pub fn new(
        model: Mat4,
        camera: &Camera,
        aspect: f32,
        light: &Light,
        material: &Material,
        lighting: LightingModel,
    ) -> Self {
        let inverse = (model.determinant() != 0.0)
            .then(|| model.inverse())
            .filter(|m| m.is_finite());
        let normal_matrix = match inverse {
            Some(inverse) => inverse.transpose(),
            None => {
                log::warn!("singular model matrix; lighting with untransformed normals");
                Mat4::IDENTITY
            }
        };

        Self {
            model: model.to_cols_array_2d(),
            view_proj: camera.view_proj(aspect).to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            light_position: light.position.extend(1.0).to_array(),
            light_intensity: light.intensity.extend(1.0).to_array(),
            ka: material.ambient.extend(0.0).to_array(),
            kd: material.diffuse.extend(0.0).to_array(),
            ks_shininess: material.specular.extend(material.shininess).to_array(),
            camera_position: camera.eye.extend(1.0).to_array(),
            lighting: [lighting.index(), 0, 0, 0],
        }
    }

    #[inline]
    pub fn lighting_model(&self) -> Option<LightingModel> {
        LightingModel::from_index(self.lighting[0])
    }
}
