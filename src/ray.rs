use nalgebra::{Point3, Unit, Vector3};

#[derive(Debug, Clone)]
pub struct Ray {
    pub position: Point3<f32>,
    pub direction: Unit<Vector3<f32>>,

    /// Intersections further than this along `direction` are ignored.
    pub length: f32,
}

impl Ray {
    /// Construct a new ray.
    pub fn new(position: Point3<f32>, direction: Unit<Vector3<f32>>, length: f32) -> Ray {
        Ray {
            position,
            direction,
            length,
        }
    }

    /// The point `t` units along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.position + self.direction.scale(t)
    }
}

#[test]
fn test_ray_at() {
    let ray = Ray::new(
        Point3::new(0., 0., 0.),
        Unit::new_normalize(Vector3::new(0., 0., 1.)),
        10.,
    );
    assert_eq!(Point3::new(0., 0., 2.5), ray.at(2.5));
}
