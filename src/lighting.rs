use nalgebra::Point3;

use crate::{camera::Camera, canvas::Color, light::Light, math, shape::Shape};

/// The Phong intensity of `light` at `point`, attenuated by the inverse square law and clamped to
/// `[0, 1]`. `point` must lie on `shape`.
///
/// Surfaces facing away from the light, or grazed by it, receive nothing, not even the ambient term. The specular
/// term mirrors the direction to the light about the normal and compares it against the direction
/// from the camera to the point.
pub fn intensity(shape: &dyn Shape, light: &Light, camera: &Camera, point: &Point3<f32>) -> f32 {
    // direction to the light
    let lightv = match math::direction(light.position - point) {
        Some(lightv) => lightv,
        None => return 0.,
    };

    let normal = shape.normal_at(point);
    let angle = normal.dot(lightv.as_ref());

    if angle <= 0. {
        return 0.;
    }

    let material = shape.material();

    let reflectv = math::mirror(&lightv, &normal);
    let specular = math::direction(point - camera.position).map_or(0., |viewv| {
        // a negative base is clamped before exponentiation
        let specular_angle = reflectv.dot(viewv.as_ref()).max(0.);
        specular_angle.powf(material.shininess)
    });

    let base = material.ambient + material.diffuse * angle + material.specular * specular;

    (base * light.inverse_square_law(point)).clamp(0., 1.)
}

/// The color contributed by `light` at `point`: the surface color blended with the light color,
/// scaled by [`intensity`].
pub fn shade(shape: &dyn Shape, light: &Light, camera: &Camera, point: &Point3<f32>) -> Color {
    shape.material().color.blend(&light.color) * intensity(shape, light, camera, point)
}
