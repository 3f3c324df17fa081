use crate::models::{pair_mut, RigidBody, Vector3};
use crate::utils::{PhysicsError, CONSTRAINT_VELOCITY_DAMPING};

/// A positional constraint between bodies of a world, addressed by index.
pub trait Constraint {
    /// Moves the constrained bodies toward satisfying the constraint.
    fn resolve(&self, bodies: &mut [RigidBody]) -> Result<(), PhysicsError>;

    /// Current violation of the constraint, or `None` if an index is out of range.
    fn calculate_error(&self, bodies: &[RigidBody]) -> Option<f32>;
}

/// Keeps two anchor points, one on each body, a fixed distance apart.
///
/// Anchors are offsets in each body's local frame. Resolution is a single
/// mass-weighted position projection; it is not part of the stepping loop
/// and must be invoked by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceConstraint {
    pub body_a: usize,
    pub body_b: usize,
    pub anchor_a: Vector3,
    pub anchor_b: Vector3,
    pub length: f32,
}

impl DistanceConstraint {
    /// Joins the centers of mass of two bodies.
    pub fn new(body_a: usize, body_b: usize, length: f32) -> Self {
        Self::with_anchors(body_a, body_b, Vector3::zero(), Vector3::zero(), length)
    }

    pub fn with_anchors(body_a: usize, body_b: usize, anchor_a: Vector3, anchor_b: Vector3, length: f32) -> Self {
        DistanceConstraint { body_a, body_b, anchor_a, anchor_b, length }
    }

    fn world_anchors(&self, a: &RigidBody, b: &RigidBody) -> (Vector3, Vector3) {
        (a.to_world(self.anchor_a), b.to_world(self.anchor_b))
    }

    /// Projects the two bodies so the anchors sit `length` apart.
    ///
    /// Only awake bodies with finite mass move, and each moved body has its
    /// velocity scaled by [`CONSTRAINT_VELOCITY_DAMPING`]. Nothing happens when
    /// the anchors coincide, the error is already zero, or both bodies are static.
    ///
    /// # Example
    /// ```
    /// use rs_rigid::constraints::DistanceConstraint;
    /// use rs_rigid::models::{RigidBody, Shape, Vector3};
    /// use rs_rigid::utils::DEFAULT_SIMULATION_CONFIG;
    ///
    /// let config = DEFAULT_SIMULATION_CONFIG;
    /// let mut a = RigidBody::new(Shape::new_sphere(0.5), Vector3::new(-2.0, 0.0, 0.0), 1.0, &config);
    /// let mut b = RigidBody::new(Shape::new_sphere(0.5), Vector3::new(2.0, 0.0, 0.0), 1.0, &config);
    ///
    /// DistanceConstraint::new(0, 1, 2.0).resolve_bodies(&mut a, &mut b);
    /// assert!((a.position.x + 1.0).abs() < 1e-5);
    /// assert!((b.position.x - 1.0).abs() < 1e-5);
    /// ```
    pub fn resolve_bodies(&self, a: &mut RigidBody, b: &mut RigidBody) {
        let (world_a, world_b) = self.world_anchors(a, b);
        let delta = world_a - world_b;
        let current = delta.magnitude();
        if current == 0.0 {
            return;
        }

        let error = current - self.length;
        if error == 0.0 {
            return;
        }

        let inverse_mass_sum = a.inverse_mass + b.inverse_mass;
        if inverse_mass_sum == 0.0 {
            return;
        }

        let correction = delta * (error / current / inverse_mass_sum);

        if a.has_finite_mass() && a.is_awake() {
            a.position -= correction * a.inverse_mass;
            a.velocity *= CONSTRAINT_VELOCITY_DAMPING;
        }
        if b.has_finite_mass() && b.is_awake() {
            b.position += correction * b.inverse_mass;
            b.velocity *= CONSTRAINT_VELOCITY_DAMPING;
        }
    }

    /// Signed difference between the current anchor distance and the rest length.
    pub fn error_between(&self, a: &RigidBody, b: &RigidBody) -> f32 {
        let (world_a, world_b) = self.world_anchors(a, b);
        (world_a - world_b).magnitude() - self.length
    }
}

impl Constraint for DistanceConstraint {
    fn resolve(&self, bodies: &mut [RigidBody]) -> Result<(), PhysicsError> {
        if self.body_a == self.body_b {
            return Err(PhysicsError::InvalidConstraint);
        }
        let count = bodies.len();
        for index in [self.body_a, self.body_b] {
            if index >= count {
                return Err(PhysicsError::BodyIndexOutOfRange { index, count });
            }
        }

        let (a, b) = pair_mut(bodies, self.body_a, self.body_b).ok_or(PhysicsError::InvalidConstraint)?;
        self.resolve_bodies(a, b);
        Ok(())
    }

    fn calculate_error(&self, bodies: &[RigidBody]) -> Option<f32> {
        let a = bodies.get(self.body_a)?;
        let b = bodies.get(self.body_b)?;
        Some(self.error_between(a, b).abs())
    }
}
