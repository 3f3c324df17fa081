use crate::models::{Matrix3, Vector3};
use crate::utils::{
    PhysicsError, CYLINDER_RIM_SEGMENTS, CYLINDER_SAMPLE_COUNT, DEFAULT_BOX_RESTITUTION,
    DEFAULT_CYLINDER_RESTITUTION, DEFAULT_SPHERE_RESTITUTION,
};
use std::f32::consts::TAU;

/// Discriminant of a [`Shape`], used to pick collision routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    Sphere,
    Box,
    Cylinder,
}

/// Geometry of a rigid body. The ground plane is not a shape; it is a height
/// in the world configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Sphere with a radius
    Sphere { radius: f32 },
    /// Box stored as half of its (width, height, depth)
    Box { half_extents: Vector3 },
    /// Cylinder with its axis along local Y
    Cylinder { radius: f32, half_height: f32 },
}

impl Shape {
    /// Creates a new sphere with the given radius
    pub fn new_sphere(radius: f32) -> Self {
        Shape::Sphere { radius }
    }

    /// Creates a new box with the given full dimensions (width, height, depth)
    pub fn new_cuboid(width: f32, height: f32, depth: f32) -> Self {
        Shape::Box {
            half_extents: Vector3::new(width / 2.0, height / 2.0, depth / 2.0),
        }
    }

    /// Creates a new cylinder with the given radius and full height
    pub fn new_cylinder(radius: f32, height: f32) -> Self {
        Shape::Cylinder {
            radius,
            half_height: height / 2.0,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere { .. } => ShapeKind::Sphere,
            Shape::Box { .. } => ShapeKind::Box,
            Shape::Cylinder { .. } => ShapeKind::Cylinder,
        }
    }

    /// Checks that every dimension is finite and strictly positive.
    ///
    /// # Example
    /// ```
    /// use rs_rigid::models::Shape;
    ///
    /// assert!(Shape::new_sphere(0.5).validate().is_ok());
    /// assert!(Shape::new_cuboid(1.0, -1.0, 1.0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), PhysicsError> {
        fn check(value: f32, what: &str) -> Result<(), PhysicsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(PhysicsError::InvalidDimension(format!("{} = {}", what, value)))
            }
        }

        match self {
            Shape::Sphere { radius } => check(*radius, "sphere radius"),
            Shape::Box { half_extents } => {
                check(half_extents.x, "box half width")?;
                check(half_extents.y, "box half height")?;
                check(half_extents.z, "box half depth")
            }
            Shape::Cylinder { radius, half_height } => {
                check(*radius, "cylinder radius")?;
                check(*half_height, "cylinder half height")
            }
        }
    }

    /// Diagonal inertia tensor of a solid body of this shape about its center.
    pub fn inertia_tensor(&self, mass: f32) -> Matrix3 {
        match self {
            Shape::Sphere { radius } => {
                let coeff = 0.4 * mass * radius * radius;
                Matrix3::from_diagonal(coeff, coeff, coeff)
            }
            Shape::Box { half_extents } => {
                let full = *half_extents * 2.0;
                let ex2 = full.x * full.x;
                let ey2 = full.y * full.y;
                let ez2 = full.z * full.z;
                let factor = mass / 12.0;
                Matrix3::from_diagonal(factor * (ey2 + ez2), factor * (ex2 + ez2), factor * (ex2 + ey2))
            }
            Shape::Cylinder { radius, half_height } => {
                let r2 = radius * radius;
                let h = half_height * 2.0;
                let iy = 0.5 * mass * r2;
                let ixz = mass / 12.0 * (3.0 * r2 + h * h);
                Matrix3::from_diagonal(ixz, iy, ixz)
            }
        }
    }

    /// Inverse of [`Shape::inertia_tensor`]; the identity if the tensor is singular.
    pub fn inverse_inertia_tensor(&self, mass: f32) -> Matrix3 {
        let mut inverse = Matrix3::identity();
        inverse.set_inverse(&self.inertia_tensor(mass));
        inverse
    }

    /// Restitution a body of this shape starts with.
    pub fn default_restitution(&self) -> f32 {
        match self {
            Shape::Sphere { .. } => DEFAULT_SPHERE_RESTITUTION,
            Shape::Box { .. } => DEFAULT_BOX_RESTITUTION,
            Shape::Cylinder { .. } => DEFAULT_CYLINDER_RESTITUTION,
        }
    }
}

/// The eight corners of a box in its local frame.
pub fn box_corners(half_extents: Vector3) -> [Vector3; 8] {
    let h = half_extents;
    [
        Vector3::new(h.x, h.y, h.z),
        Vector3::new(-h.x, h.y, h.z),
        Vector3::new(h.x, -h.y, h.z),
        Vector3::new(-h.x, -h.y, h.z),
        Vector3::new(h.x, h.y, -h.z),
        Vector3::new(-h.x, h.y, -h.z),
        Vector3::new(h.x, -h.y, -h.z),
        Vector3::new(-h.x, -h.y, -h.z),
    ]
}

/// Surface samples of a cylinder in its local frame: evenly spaced points on
/// the top and bottom rims followed by the two cap centers.
pub fn cylinder_sample_points(radius: f32, half_height: f32) -> [Vector3; CYLINDER_SAMPLE_COUNT] {
    let mut points = [Vector3::zero(); CYLINDER_SAMPLE_COUNT];
    let step = TAU / CYLINDER_RIM_SEGMENTS as f32;
    for i in 0..CYLINDER_RIM_SEGMENTS {
        let angle = i as f32 * step;
        let x = angle.cos() * radius;
        let z = angle.sin() * radius;
        points[2 * i] = Vector3::new(x, half_height, z);
        points[2 * i + 1] = Vector3::new(x, -half_height, z);
    }
    points[CYLINDER_SAMPLE_COUNT - 2] = Vector3::new(0.0, half_height, 0.0);
    points[CYLINDER_SAMPLE_COUNT - 1] = Vector3::new(0.0, -half_height, 0.0);
    points
}
