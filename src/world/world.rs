use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::interactions::{check_floor, check_pair, resolve_contact};
use crate::models::{BodyRef, BodyTransform, FromCoordinates, RigidBody, Shape, Vector3};
use crate::utils::{PhysicsError, SimulationConfig};
#[cfg(feature = "constraints")]
use crate::constraints::Constraint;

/// Owns every body of a simulation and advances them frame by frame.
///
/// Bodies are addressed by the index returned when they were added. Indices
/// stay valid until [`World::reset`].
#[derive(Debug, Clone, Default)]
pub struct World {
    bodies: Vec<RigidBody>,
    config: SimulationConfig,
}

impl World {
    /// Creates an empty world with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_rigid::world::World;
    ///
    /// let world = World::new();
    /// assert_eq!(world.body_count(), 0);
    /// assert_eq!(world.gravity(), -9.81);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty world with a custom configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Gravity, ground height, substep count, sleep and contact tuning
    ///
    /// # Returns
    ///
    /// * `Err(PhysicsError::InvalidConfiguration)` if `config` fails validation
    pub fn with_config(config: SimulationConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(World { bodies: Vec::new(), config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Adds a body of any shape and returns its index.
    ///
    /// # Arguments
    ///
    /// * `position` - World-space center of the body
    /// * `shape` - Geometry; every dimension must be finite and positive
    /// * `mass` - Mass in kilograms; zero or less makes the body static
    ///
    /// # Returns
    ///
    /// * `Ok(index)` - Index of the new body
    /// * `Err(PhysicsError::InvalidDimension)` - If the shape is degenerate
    /// * `Err(PhysicsError::InvalidMass)` - If the mass is NaN or infinite
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_rigid::models::{Shape, Vector3};
    /// use rs_rigid::world::World;
    ///
    /// let mut world = World::new();
    /// let ground = world.add_body(Vector3::zero(), Shape::new_cuboid(20.0, 1.0, 20.0), 0.0).unwrap();
    /// assert!(!world.body(ground).unwrap().has_finite_mass());
    /// assert!(world.add_body(Vector3::zero(), Shape::new_sphere(0.0), 1.0).is_err());
    /// ```
    pub fn add_body(&mut self, position: Vector3, shape: Shape, mass: f32) -> Result<usize, PhysicsError> {
        shape.validate()?;
        if !mass.is_finite() {
            return Err(PhysicsError::InvalidMass);
        }
        if !position.is_finite() {
            return Err(PhysicsError::InvalidConfiguration("body position must be finite".to_string()));
        }

        let index = self.bodies.len();
        self.bodies.push(RigidBody::new(shape, position, mass, &self.config));
        debug!("Added {:?} body {} at {:?} with mass {}", shape.kind(), index, position, mass);
        Ok(index)
    }

    /// Adds a sphere centered at `position`.
    pub fn add_sphere(&mut self, position: (f32, f32, f32), radius: f32, mass: f32) -> Result<usize, PhysicsError> {
        self.add_body(Vector3::from_coord(position), Shape::new_sphere(radius), mass)
    }

    /// Adds a box with full edge lengths `(width, height, depth)`.
    pub fn add_box(
        &mut self,
        position: (f32, f32, f32),
        dimensions: (f32, f32, f32),
        mass: f32,
    ) -> Result<usize, PhysicsError> {
        let (width, height, depth) = dimensions;
        self.add_body(Vector3::from_coord(position), Shape::new_cuboid(width, height, depth), mass)
    }

    /// Adds a cylinder whose axis is the world Y axis, with full `height`.
    pub fn add_cylinder(
        &mut self,
        position: (f32, f32, f32),
        radius: f32,
        height: f32,
        mass: f32,
    ) -> Result<usize, PhysicsError> {
        self.add_body(Vector3::from_coord(position), Shape::new_cylinder(radius, height), mass)
    }

    pub fn gravity(&self) -> f32 {
        self.config.gravity
    }

    /// Sets the vertical gravity acceleration.
    pub fn set_gravity(&mut self, gravity: f32) -> Result<(), PhysicsError> {
        if !gravity.is_finite() {
            return Err(PhysicsError::InvalidConfiguration("gravity must be finite".to_string()));
        }
        self.config.gravity = gravity;
        Ok(())
    }

    /// Moves the ground plane to height `ground_level`.
    pub fn set_ground_level(&mut self, ground_level: f32) -> Result<(), PhysicsError> {
        if !ground_level.is_finite() {
            return Err(PhysicsError::InvalidConfiguration("ground level must be finite".to_string()));
        }
        self.config.ground_level = ground_level;
        Ok(())
    }

    /// Overwrites the restitution of every existing body.
    ///
    /// # Errors
    /// `PhysicsError::InvalidCoefficient` if `restitution` is outside `[0, 1]`.
    pub fn set_restitution(&mut self, restitution: f32) -> Result<(), PhysicsError> {
        if !(0.0..=1.0).contains(&restitution) {
            return Err(PhysicsError::InvalidCoefficient);
        }
        self.bodies.iter_mut().for_each(|body| body.restitution = restitution);
        Ok(())
    }

    /// Overwrites the friction coefficient of every existing body.
    ///
    /// # Errors
    /// `PhysicsError::InvalidCoefficient` if `friction` is negative or not finite.
    pub fn set_friction(&mut self, friction: f32) -> Result<(), PhysicsError> {
        if !friction.is_finite() || friction < 0.0 {
            return Err(PhysicsError::InvalidCoefficient);
        }
        self.bodies.iter_mut().for_each(|body| body.friction = friction);
        Ok(())
    }

    fn checked_body_mut(&mut self, index: usize) -> Result<&mut RigidBody, PhysicsError> {
        let count = self.bodies.len();
        self.bodies
            .get_mut(index)
            .ok_or(PhysicsError::BodyIndexOutOfRange { index, count })
    }

    /// Replaces the linear velocity of a body and wakes it. Static bodies keep
    /// their zero velocity.
    pub fn set_velocity(&mut self, index: usize, velocity: (f32, f32, f32)) -> Result<(), PhysicsError> {
        let body = self.checked_body_mut(index)?;
        if !body.has_finite_mass() {
            debug!("Ignoring velocity for static body {}", index);
            return Ok(());
        }
        body.set_awake(true);
        body.velocity = Vector3::from_coord(velocity);
        Ok(())
    }

    /// Adds a force through the body's center of mass for the next substep.
    pub fn apply_force(&mut self, index: usize, force: (f32, f32, f32)) -> Result<(), PhysicsError> {
        self.checked_body_mut(index)?.add_force(Vector3::from_coord(force));
        Ok(())
    }

    /// Adds a torque to the body for the next substep.
    pub fn apply_torque(&mut self, index: usize, torque: (f32, f32, f32)) -> Result<(), PhysicsError> {
        self.checked_body_mut(index)?.add_torque(Vector3::from_coord(torque));
        Ok(())
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body(&self, index: usize) -> Option<&RigidBody> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut RigidBody> {
        self.bodies.get_mut(index)
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Position, orientation and awake flag of a body, or `None` if `index` is out of range.
    pub fn body_transform(&self, index: usize) -> Option<BodyTransform> {
        self.bodies.get(index).map(RigidBody::transform)
    }

    /// Removes every body. The configuration is kept.
    pub fn reset(&mut self) {
        debug!("Resetting world with {} bodies", self.bodies.len());
        self.bodies.clear();
    }

    /// Applies a constraint to this world's bodies.
    ///
    /// # Errors
    /// `PhysicsError::BodyIndexOutOfRange` or `PhysicsError::InvalidConstraint`
    /// when the constraint does not name two distinct bodies of this world.
    #[cfg(feature = "constraints")]
    pub fn resolve_constraint<C: Constraint + ?Sized>(&mut self, constraint: &C) -> Result<(), PhysicsError> {
        constraint.resolve(&mut self.bodies)
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// The sleep heuristic runs once, then the frame is split into
    /// `config.substeps` equal substeps. Each substep integrates every awake
    /// body, resolves floor contacts for every movable body and then every
    /// unordered pair of bodies in insertion order. A sleeping body resting on
    /// the floor only receives positional correction, so it settles within the
    /// penetration slop without being woken.
    ///
    /// # Errors
    /// `PhysicsError::InvalidTime` if `dt` is negative or not finite; the world is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_rigid::world::World;
    ///
    /// let mut world = World::new();
    /// let ball = world.add_sphere((0.0, 5.0, 0.0), 0.5, 1.0).unwrap();
    /// world.step(1.0 / 60.0).unwrap();
    /// assert!(world.body_transform(ball).unwrap().position.y < 5.0);
    /// assert!(world.step(-1.0).is_err());
    /// ```
    pub fn step(&mut self, dt: f32) -> Result<(), PhysicsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidTime);
        }

        self.update_sleep_states();

        let sub_dt = self.config.substep_duration(dt);
        for _ in 0..self.config.substeps {
            self.integrate_bodies(sub_dt);
            self.resolve_floor_contacts();
            self.resolve_body_contacts();
        }
        Ok(())
    }

    fn update_sleep_states(&mut self) {
        let bias = self.config.sleep_bias;
        for (index, body) in self.bodies.iter_mut().enumerate() {
            if body.update_sleep_state(bias) {
                trace!("Body {} fell asleep at {:?}", index, body.position);
            }
        }
    }

    fn integrate_bodies(&mut self, dt: f32) {
        let gravity = Vector3::new(0.0, self.config.gravity, 0.0) * dt;
        let advance = |body: &mut RigidBody| {
            body.update_world_inertia_tensor();
            if body.is_awake() && body.has_finite_mass() {
                body.velocity += gravity;
                body.integrate(dt);
            }
        };

        #[cfg(feature = "parallel")]
        self.bodies.par_iter_mut().for_each(advance);
        #[cfg(not(feature = "parallel"))]
        self.bodies.iter_mut().for_each(advance);
    }

    fn resolve_floor_contacts(&mut self) {
        let plane_y = self.config.ground_level;
        for index in 0..self.bodies.len() {
            let body = &self.bodies[index];
            if !body.has_finite_mass() {
                continue;
            }
            if let Some(contact) = check_floor(BodyRef::new(index, body), plane_y) {
                resolve_contact(&mut self.bodies, &contact, &self.config.contact);
            }
        }
    }

    fn resolve_body_contacts(&mut self) {
        let count = self.bodies.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if !a.is_awake() && !b.is_awake() {
                    continue;
                }
                let Some(contact) = check_pair(BodyRef::new(i, a), BodyRef::new(j, b)) else {
                    continue;
                };

                for index in [i, j] {
                    let body = &mut self.bodies[index];
                    if !body.is_awake() && body.has_finite_mass() {
                        body.set_awake(true);
                        trace!("Body {} woken by contact", index);
                    }
                }
                resolve_contact(&mut self.bodies, &contact, &self.config.contact);
            }
        }
    }
}
