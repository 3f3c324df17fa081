use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, PI};
use crate::models::{Quaternion, Vector3};

#[test]
fn test_identity_rotation_leaves_vector_unchanged() {
    let v = Vector3::new(1.0, -2.0, 3.0);
    assert_eq!(Quaternion::identity().rotate(v), v);
    assert_eq!(Quaternion::default(), Quaternion::identity());
}

#[test]
fn test_from_axis_angle_rotates_about_axis() {
    let q = Quaternion::from_axis_angle(Vector3::new(0.0, 1.0, 0.0), FRAC_PI_2);
    let rotated = q.rotate(Vector3::new(1.0, 0.0, 0.0));
    assert_abs_diff_eq!(rotated, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);

    // Unnormalized axis is accepted
    let q2 = Quaternion::from_axis_angle(Vector3::new(0.0, 5.0, 0.0), FRAC_PI_2);
    assert_abs_diff_eq!(q, q2, epsilon = 1e-6);
}

#[test]
fn test_from_axis_angle_zero_axis_is_identity() {
    assert_eq!(Quaternion::from_axis_angle(Vector3::zero(), PI), Quaternion::identity());
}

#[test]
fn test_rotate_inverse_undoes_rotate() {
    let q = Quaternion::from_axis_angle(Vector3::new(1.0, 1.0, 0.0), 0.7);
    let v = Vector3::new(0.2, -3.0, 1.1);
    assert_abs_diff_eq!(q.rotate_inverse(q.rotate(v)), v, epsilon = 1e-5);
}

#[test]
fn test_multiply_composes_rotations() {
    let z90 = Quaternion::from_axis_angle(Vector3::new(0.0, 0.0, 1.0), FRAC_PI_2);
    let z180 = z90 * z90;
    let rotated = z180.rotate(Vector3::new(1.0, 0.0, 0.0));
    assert_abs_diff_eq!(rotated, Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_invert_and_conjugate() {
    let q = Quaternion::new(0.5, 0.5, -0.5, 0.5);
    let mut inverted = q;
    inverted.invert();
    assert_eq!(inverted, q.conjugate());
    assert_abs_diff_eq!(q * q.conjugate(), Quaternion::identity(), epsilon = 1e-6);
}

#[test]
fn test_normalize_zero_becomes_identity() {
    let mut q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
    q.normalize();
    assert_eq!(q, Quaternion::identity());
}

#[test]
fn test_normalize_scales_to_unit() {
    let q = Quaternion::new(2.0, 0.0, 0.0, 2.0).normalized();
    assert_relative_eq!(q.magnitude(), 1.0, epsilon = 1e-6);
}

#[test]
fn test_add_scaled_vector_keeps_unit_norm_after_normalize() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut q = Quaternion::identity();
    for _ in 0..1000 {
        let omega = Vector3::new(
            rng.random_range(-20.0..20.0),
            rng.random_range(-20.0..20.0),
            rng.random_range(-20.0..20.0),
        );
        q.add_scaled_vector(omega, 1.0 / 240.0);
        q.normalize();
        assert_relative_eq!(q.magnitude(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_add_scaled_vector_small_step_approximates_rotation() {
    let omega = Vector3::new(0.0, 1.0, 0.0);
    let mut q = Quaternion::identity();
    for _ in 0..1000 {
        q.add_scaled_vector(omega, 0.001);
        q.normalize();
    }
    // One radian about Y
    let expected = Quaternion::from_axis_angle(Vector3::new(0.0, 1.0, 0.0), 1.0);
    assert_abs_diff_eq!(q, expected, epsilon = 1e-3);
}
