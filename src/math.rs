use nalgebra::{Unit, Vector3};

/// Reflect `vec` through `normal`.
pub fn reflect(vec: &Unit<Vector3<f32>>, normal: &Unit<Vector3<f32>>) -> Unit<Vector3<f32>> {
    Unit::new_unchecked(vec.as_ref() - normal.as_ref() * 2. * vec.dot(normal))
}

/// Mirror `vec` about the axis `normal`: a half turn of `vec` around `normal`. For a vector pointing
/// away from a surface this yields the mirrored vector on the other side of the normal, which is
/// the negation of [`reflect`].
pub fn mirror(vec: &Unit<Vector3<f32>>, normal: &Unit<Vector3<f32>>) -> Unit<Vector3<f32>> {
    Unit::new_unchecked(normal.as_ref() * 2. * vec.dot(normal) - vec.as_ref())
}

/// Normalize `vec`, returning `None` when it is too short to have a direction.
#[inline]
pub fn direction(vec: Vector3<f32>) -> Option<Unit<Vector3<f32>>> {
    Unit::try_new(vec, f32::EPSILON)
}

#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    (deg / 180.) * std::f32::consts::PI
}

#[test]
fn test_deg_to_rad() {
    assert_eq!(std::f32::consts::PI, deg_to_rad(180.));
}

#[test]
fn test_mirror_is_half_turn() {
    use approx::assert_abs_diff_eq;
    use nalgebra::UnitQuaternion;

    let normal = Unit::new_normalize(Vector3::new(0., 1., 0.));
    let vec = Unit::new_normalize(Vector3::new(1., 1., 0.));

    let rotated = UnitQuaternion::from_axis_angle(&normal, std::f32::consts::PI) * vec.as_ref();
    let mirrored = mirror(&vec, &normal);

    assert_abs_diff_eq!(rotated, *mirrored.as_ref(), epsilon = 1e-6);
    assert_abs_diff_eq!(*mirrored.as_ref(), -reflect(&vec, &normal).into_inner(), epsilon = 1e-6);
}

#[test]
fn test_direction_rejects_zero() {
    assert!(direction(Vector3::zeros()).is_none());
    assert!(direction(Vector3::new(0., 0., 2.)).is_some());
}
