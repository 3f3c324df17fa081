use crate::assert_float_eq;
use crate::models::{box_corners, cylinder_sample_points, Shape, ShapeKind, Vector3};
use crate::utils::{PhysicsError, CYLINDER_SAMPLE_COUNT};

#[test]
fn test_constructors_store_half_sizes() {
    assert_eq!(
        Shape::new_cuboid(2.0, 4.0, 6.0),
        Shape::Box { half_extents: Vector3::new(1.0, 2.0, 3.0) }
    );
    assert_eq!(
        Shape::new_cylinder(0.5, 3.0),
        Shape::Cylinder { radius: 0.5, half_height: 1.5 }
    );
    assert_eq!(Shape::new_sphere(1.0).kind(), ShapeKind::Sphere);
}

#[test]
fn test_validate_rejects_degenerate_dimensions() {
    assert!(Shape::new_sphere(1.0).validate().is_ok());
    assert!(matches!(Shape::new_sphere(0.0).validate(), Err(PhysicsError::InvalidDimension(_))));
    assert!(Shape::new_sphere(f32::NAN).validate().is_err());
    assert!(Shape::new_cuboid(1.0, 1.0, f32::INFINITY).validate().is_err());
    assert!(Shape::new_cylinder(1.0, 0.0).validate().is_err());
    assert!(Shape::new_cylinder(-1.0, 1.0).validate().is_err());
}

#[test]
fn test_sphere_inertia() {
    let tensor = Shape::new_sphere(2.0).inertia_tensor(5.0);
    // 0.4 * 5 * 4
    assert_float_eq(tensor.data[0], 8.0, 1e-5, None);
    assert_float_eq(tensor.data[4], 8.0, 1e-5, None);
    assert_float_eq(tensor.data[8], 8.0, 1e-5, None);

    let inverse = Shape::new_sphere(2.0).inverse_inertia_tensor(5.0);
    assert_float_eq(inverse.data[0], 0.125, 1e-6, None);
}

#[test]
fn test_box_inertia() {
    let tensor = Shape::new_cuboid(1.0, 2.0, 3.0).inertia_tensor(12.0);
    assert_float_eq(tensor.data[0], 4.0 + 9.0, 1e-5, Some("x axis"));
    assert_float_eq(tensor.data[4], 1.0 + 9.0, 1e-5, Some("y axis"));
    assert_float_eq(tensor.data[8], 1.0 + 4.0, 1e-5, Some("z axis"));
}

#[test]
fn test_cylinder_inertia() {
    let tensor = Shape::new_cylinder(1.0, 2.0).inertia_tensor(6.0);
    assert_float_eq(tensor.data[4], 3.0, 1e-5, Some("axial"));
    // 6/12 * (3 + 4)
    assert_float_eq(tensor.data[0], 3.5, 1e-5, Some("transverse x"));
    assert_float_eq(tensor.data[8], 3.5, 1e-5, Some("transverse z"));
}

#[test]
fn test_default_restitution_by_kind() {
    assert_float_eq(Shape::new_sphere(1.0).default_restitution(), 0.7, 1e-6, None);
    assert_float_eq(Shape::new_cuboid(1.0, 1.0, 1.0).default_restitution(), 0.5, 1e-6, None);
    assert_float_eq(Shape::new_cylinder(1.0, 1.0).default_restitution(), 0.5, 1e-6, None);
}

#[test]
fn test_box_corners_are_distinct_vertices() {
    let half = Vector3::new(1.0, 2.0, 3.0);
    let corners = box_corners(half);
    for (i, a) in corners.iter().enumerate() {
        assert_eq!(a.x.abs(), 1.0);
        assert_eq!(a.y.abs(), 2.0);
        assert_eq!(a.z.abs(), 3.0);
        for b in corners.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_cylinder_samples_lie_on_surface() {
    let samples = cylinder_sample_points(2.0, 0.5);
    assert_eq!(samples.len(), CYLINDER_SAMPLE_COUNT);

    for rim in &samples[..CYLINDER_SAMPLE_COUNT - 2] {
        assert_float_eq((rim.x * rim.x + rim.z * rim.z).sqrt(), 2.0, 1e-5, Some("rim radius"));
        assert_float_eq(rim.y.abs(), 0.5, 1e-6, Some("rim height"));
    }
    assert_eq!(samples[CYLINDER_SAMPLE_COUNT - 2], Vector3::new(0.0, 0.5, 0.0));
    assert_eq!(samples[CYLINDER_SAMPLE_COUNT - 1], Vector3::new(0.0, -0.5, 0.0));
}
