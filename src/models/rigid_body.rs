use crate::models::{Matrix3, Quaternion, Shape, ShapeKind, Vector3};
use crate::utils::{SimulationConfig, DEFAULT_FRICTION};

/// A simulated body: one shape plus its linear, angular and sleep state.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub position: Vector3,
    pub velocity: Vector3,
    pub orientation: Quaternion,
    pub angular_velocity: Vector3,
    /// Force accumulated since the last integration
    pub force_accum: Vector3,
    /// Torque accumulated since the last integration
    pub torque_accum: Vector3,
    /// Zero marks an immovable body
    pub inverse_mass: f32,
    /// Inverse inertia tensor in the body's local frame
    pub inverse_inertia_tensor: Matrix3,
    /// Inverse inertia tensor in world space, refreshed every substep
    pub inverse_inertia_tensor_world: Matrix3,
    pub damping: f32,
    pub angular_damping: f32,
    pub restitution: f32,
    pub friction: f32,
    /// Running average of squared speeds used by the sleep heuristic
    pub motion: f32,
    pub sleep_epsilon: f32,
    is_awake: bool,
    shape: Shape,
}

/// Snapshot of a body's pose handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransform {
    pub position: Vector3,
    pub orientation: Quaternion,
    pub is_awake: bool,
}

impl RigidBody {
    /// Creates a body at `position`. A mass of zero or less makes the body
    /// static: it has zero inverse mass, an identity inverse inertia tensor and
    /// starts asleep.
    ///
    /// # Example
    /// ```
    /// use rs_rigid::models::{RigidBody, Shape, Vector3};
    /// use rs_rigid::utils::DEFAULT_SIMULATION_CONFIG;
    ///
    /// let body = RigidBody::new(Shape::new_sphere(1.0), Vector3::new(0.0, 5.0, 0.0), 2.0, &DEFAULT_SIMULATION_CONFIG);
    /// assert_eq!(body.inverse_mass, 0.5);
    /// assert!(body.is_awake());
    ///
    /// let ground = RigidBody::new(Shape::new_cuboid(10.0, 1.0, 10.0), Vector3::zero(), 0.0, &DEFAULT_SIMULATION_CONFIG);
    /// assert!(!ground.has_finite_mass());
    /// assert!(!ground.is_awake());
    /// ```
    pub fn new(shape: Shape, position: Vector3, mass: f32, config: &SimulationConfig) -> Self {
        let (inverse_mass, inverse_inertia_tensor, is_awake) = if mass > 0.0 {
            (1.0 / mass, shape.inverse_inertia_tensor(mass), true)
        } else {
            (0.0, Matrix3::identity(), false)
        };

        RigidBody {
            position,
            velocity: Vector3::zero(),
            orientation: Quaternion::identity(),
            angular_velocity: Vector3::zero(),
            force_accum: Vector3::zero(),
            torque_accum: Vector3::zero(),
            inverse_mass,
            inverse_inertia_tensor,
            inverse_inertia_tensor_world: inverse_inertia_tensor,
            damping: config.linear_damping,
            angular_damping: config.angular_damping,
            restitution: shape.default_restitution(),
            friction: DEFAULT_FRICTION,
            motion: 2.0 * config.sleep_epsilon,
            sleep_epsilon: config.sleep_epsilon,
            is_awake,
            shape,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn has_finite_mass(&self) -> bool {
        self.inverse_mass > 0.0
    }

    pub fn is_awake(&self) -> bool {
        self.is_awake
    }

    /// Wakes or puts the body to sleep.
    ///
    /// Waking resets the motion average to twice the sleep threshold so the
    /// body is not put straight back to sleep; sleeping zeroes both
    /// velocities. Static bodies are never woken.
    pub fn set_awake(&mut self, awake: bool) {
        if !self.has_finite_mass() {
            return;
        }
        if awake {
            self.is_awake = true;
            self.motion = 2.0 * self.sleep_epsilon;
        } else {
            self.is_awake = false;
            self.velocity = Vector3::zero();
            self.angular_velocity = Vector3::zero();
        }
    }

    /// Adds a force through the center of mass for the next integration and wakes the body.
    /// Static bodies ignore forces.
    pub fn add_force(&mut self, force: Vector3) {
        if !self.has_finite_mass() {
            return;
        }
        self.force_accum += force;
        self.set_awake(true);
    }

    /// Adds a torque for the next integration and wakes the body.
    pub fn add_torque(&mut self, torque: Vector3) {
        if !self.has_finite_mass() {
            return;
        }
        self.torque_accum += torque;
        self.set_awake(true);
    }

    /// Adds a force applied at a world-space point, which also produces a torque.
    pub fn add_force_at_point(&mut self, force: Vector3, point: Vector3) {
        if !self.has_finite_mass() {
            return;
        }
        let arm = point - self.position;
        self.force_accum += force;
        self.torque_accum += arm.cross(&force);
        self.set_awake(true);
    }

    /// Recomputes the world-space inverse inertia tensor as `R · I⁻¹ · Rᵀ`.
    pub fn update_world_inertia_tensor(&mut self) {
        if !self.has_finite_mass() {
            return;
        }
        let rotation = Matrix3::from_quaternion(&self.orientation);
        self.inverse_inertia_tensor_world = rotation * self.inverse_inertia_tensor * rotation.transpose();
    }

    /// Advances the body by `dt` seconds. Sleeping and static bodies are left untouched.
    pub fn integrate(&mut self, dt: f32) {
        if !self.is_awake || !self.has_finite_mass() {
            return;
        }

        let linear_acceleration = self.force_accum * self.inverse_mass;
        let angular_acceleration = self.inverse_inertia_tensor_world * self.torque_accum;

        self.velocity += linear_acceleration * dt;
        self.angular_velocity += angular_acceleration * dt;
        self.position += self.velocity * dt;

        self.orientation.add_scaled_vector(self.angular_velocity, dt);
        self.orientation.normalize();

        self.velocity *= self.damping.powf(dt);
        self.angular_velocity *= self.angular_damping.powf(dt);

        self.clear_accumulators();
    }

    pub fn clear_accumulators(&mut self) {
        self.force_accum = Vector3::zero();
        self.torque_accum = Vector3::zero();
    }

    /// Updates the motion average for this frame and puts the body to sleep
    /// once it drops below the threshold. Returns `true` if the body fell asleep.
    pub fn update_sleep_state(&mut self, bias: f32) -> bool {
        if !self.is_awake || !self.has_finite_mass() {
            return false;
        }

        let current_motion = self.velocity.magnitude_squared() + self.angular_velocity.magnitude_squared();
        self.motion = bias * self.motion + (1.0 - bias) * current_motion;

        if self.motion < self.sleep_epsilon {
            self.set_awake(false);
            return true;
        }
        if self.motion > 10.0 * self.sleep_epsilon {
            self.motion = 10.0 * self.sleep_epsilon;
        }
        false
    }

    /// Velocity of the material point at offset `r` from the center of mass.
    pub fn point_velocity(&self, r: Vector3) -> Vector3 {
        self.velocity + self.angular_velocity.cross(&r)
    }

    /// Converts a world-space point into this body's local frame.
    pub fn to_local(&self, world_point: Vector3) -> Vector3 {
        self.orientation.rotate_inverse(world_point - self.position)
    }

    /// Converts a point in this body's local frame into world space.
    pub fn to_world(&self, local_point: Vector3) -> Vector3 {
        self.position + self.orientation.rotate(local_point)
    }

    pub fn transform(&self) -> BodyTransform {
        BodyTransform {
            position: self.position,
            orientation: self.orientation,
            is_awake: self.is_awake,
        }
    }
}

/// Borrows two distinct bodies mutably at once. Returns `None` if the indices
/// are equal or either is out of range.
pub(crate) fn pair_mut(bodies: &mut [RigidBody], a: usize, b: usize) -> Option<(&mut RigidBody, &mut RigidBody)> {
    if a == b || a >= bodies.len() || b >= bodies.len() {
        return None;
    }
    if a < b {
        let (head, tail) = bodies.split_at_mut(b);
        Some((&mut head[a], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(a);
        Some((&mut tail[0], &mut head[b]))
    }
}
