use crate::canvas::Color;

/// Phong reflection coefficients and the base color of a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// The ambient reflection of this surface.
    pub ambient: f32,

    /// The diffuse reflection of this surface.
    pub diffuse: f32,

    /// The specular reflection of this surface.
    pub specular: f32,

    /// The shininess of the surface, used as the specular exponent.
    pub shininess: f32,

    /// The base color of the surface.
    pub color: Color,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            color: Color::white(),
        }
    }
}

impl Material {
    pub fn new(ambient: f32, diffuse: f32, specular: f32, shininess: f32) -> Self {
        Material {
            ambient,
            diffuse,
            specular,
            shininess,
            color: Color::white(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}
