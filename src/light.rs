use nalgebra::Point3;

use crate::canvas::Color;

/// Squared distances below this are clamped, so a point sitting on a light stays finite.
pub const MIN_DISTANCE_SQUARED: f32 = 1e-6;

/// A point light.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    intensity: f32,
    pub color: Color,
}

impl Light {
    pub fn new(position: Point3<f32>, intensity: f32, color: Color) -> Self {
        Self {
            position,
            intensity: intensity.max(0.),
            color,
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Set the intensity, which is never negative.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.max(0.);
    }

    /// The light's intensity at `point`, falling off with the square of the distance.
    pub fn inverse_square_law(&self, point: &Point3<f32>) -> f32 {
        let distance_squared = (self.position - point).norm_squared();
        self.intensity / distance_squared.max(MIN_DISTANCE_SQUARED)
    }
}
