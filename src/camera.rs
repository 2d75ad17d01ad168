use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

use crate::{math, ray::Ray};

/// A pinhole camera looking along `direction`, with `+y` as the world up.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    direction: Unit<Vector3<f32>>,

    /// The width in pixels of the viewport.
    width: u32,

    /// The height in pixels of the viewport.
    height: u32,

    /// Vertical field of view, in degrees.
    fov: f32,
}

/// The orthonormal frame of a [`Camera`].
#[derive(Debug, Clone)]
pub struct Basis {
    pub forward: Unit<Vector3<f32>>,
    pub right: Unit<Vector3<f32>>,
    pub up: Unit<Vector3<f32>>,
}

impl Camera {
    pub fn new(
        position: Point3<f32>,
        direction: Vector3<f32>,
        width: u32,
        height: u32,
        fov: f32,
    ) -> Self {
        Self {
            position,
            direction: math::direction(direction).unwrap_or_else(Vector3::z_axis),
            width,
            height,
            fov,
        }
    }

    pub fn direction(&self) -> &Unit<Vector3<f32>> {
        &self.direction
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    /// Compute the aspect ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// The camera frame. When looking straight up or down, `+x` is used as the right vector.
    pub fn basis(&self) -> Basis {
        let forward = self.direction;
        let right =
            math::direction(Vector3::y().cross(forward.as_ref())).unwrap_or_else(Vector3::x_axis);
        let up = Unit::new_normalize(forward.cross(right.as_ref()));
        Basis { forward, right, up }
    }

    /// Generate the ray through the center of pixel `(x, y)`, where `(0, 0)` is the top-left
    /// pixel. Returns `None` for pixels outside of the viewport.
    pub fn shoot_ray(&self, x: u32, y: u32, max_distance: f32) -> Option<Ray> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let Basis { forward, right, up } = self.basis();
        let half_height = (math::deg_to_rad(self.fov) / 2.).tan();
        let half_width = half_height * self.aspect_ratio();

        let u = (2. * (x as f32 + 0.5) / self.width as f32 - 1.) * half_width;
        let v = (1. - 2. * (y as f32 + 0.5) / self.height as f32) * half_height;

        let direction = Unit::new_normalize(forward.as_ref() + right.scale(u) + up.scale(v));
        Some(Ray::new(self.position, direction, max_distance))
    }

    /// Move the camera by `offset`, given in the camera frame as `(right, up, forward)`.
    pub fn translate(&mut self, offset: &Vector3<f32>) {
        let Basis { forward, right, up } = self.basis();
        self.position += right.scale(offset.x) + up.scale(offset.y) + forward.scale(offset.z);
    }

    /// Turn the view direction by `yaw` around the world up and `pitch` around the camera right,
    /// both in radians. Pitch that would bring the view within `min_pole_angle` of straight up or
    /// down is ignored.
    pub fn rotate(&mut self, yaw: f32, pitch: f32, min_pole_angle: f32) {
        let right = self.basis().right;
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw)
            * UnitQuaternion::from_axis_angle(&right, pitch);
        let turned = rotation * self.direction;

        let pole = turned.angle(&Vector3::y()).min(turned.angle(&-Vector3::y()));
        if pitch == 0. || pole >= min_pole_angle {
            self.direction = turned;
        } else {
            self.direction =
                UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw) * self.direction;
        }
    }
}
