use nalgebra::{Point3, Unit, Vector3};

use crate::{material::Material, math, ray::Ray};

/// Rays starting closer than this to a surface don't intersect it.
const MIN_DIST: f32 = 1e-4;

/// Geometry that can be shaded.
pub trait Shape: Send + Sync + std::fmt::Debug {
    /// The first point along `ray` that lies on the surface, within the ray's length.
    fn intersection(&self, ray: &Ray) -> Option<Point3<f32>>;

    /// The outward facing normal at a point on the surface.
    fn normal_at(&self, point: &Point3<f32>) -> Unit<Vector3<f32>>;

    fn material(&self) -> &Material;
}

#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3<f32>,
    radius: f32,
    material: Material,
}

impl Sphere {
    pub fn new(radius: f32, center: Point3<f32>) -> Self {
        Self {
            center,
            radius,
            material: Material::default(),
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

impl Shape for Sphere {
    fn intersection(&self, ray: &Ray) -> Option<Point3<f32>> {
        // Solve |o + td - c|^2 = r^2 for t, with |d| = 1.
        let oc = ray.position - self.center;
        let half_b = oc.dot(ray.direction.as_ref());
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - c;

        if discriminant < 0. {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -half_b - root;
        let far = -half_b + root;

        // When the ray starts inside the sphere, the far root is the first hit.
        let t = if near >= MIN_DIST { near } else { far };

        if t < MIN_DIST || t > ray.length {
            None
        } else {
            Some(ray.at(t))
        }
    }

    fn normal_at(&self, point: &Point3<f32>) -> Unit<Vector3<f32>> {
        math::direction(point - self.center).unwrap_or_else(Vector3::z_axis)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
