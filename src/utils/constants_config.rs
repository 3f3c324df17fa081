// src/utils/constants_config.rs
use crate::utils::{
    DEFAULT_CONTACT_SETTINGS,
    DEFAULT_SIMULATION_CONFIG,
    errors::PhysicsError
};

/// Tuning constants for the contact resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSettings {
    /// Approach speeds below this resolve with zero restitution (resting contact).
    pub restitution_velocity_threshold: f32,
    /// Tangential speeds at or below this skip the friction impulse.
    pub friction_velocity_epsilon: f32,
    /// Fraction of the penetration removed by positional correction each pass.
    pub correction_percent: f32,
    /// Penetration left unresolved to keep resting contacts from jittering.
    pub penetration_slop: f32,
}

impl Default for ContactSettings {
    fn default() -> Self {
        DEFAULT_CONTACT_SETTINGS
    }
}

/// Global parameters of a simulated world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Vertical component of gravity; the horizontal components are always zero.
    pub gravity: f32,
    /// Height of the static ground plane.
    pub ground_level: f32,
    /// Number of substeps each call to `World::step` is divided into.
    pub substeps: u32,
    /// Motion threshold below which a body is put to sleep.
    pub sleep_epsilon: f32,
    /// Weight of the previous motion value in the running average.
    pub sleep_bias: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub contact: ContactSettings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONFIG
    }
}

impl SimulationConfig {
    pub fn new(
        gravity: Option<f32>,
        ground_level: Option<f32>,
        substeps: Option<u32>,
        sleep_epsilon: Option<f32>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONFIG;
        Self {
            gravity: gravity.unwrap_or(default.gravity),
            ground_level: ground_level.unwrap_or(default.ground_level),
            substeps: substeps.unwrap_or(default.substeps),
            sleep_epsilon: sleep_epsilon.unwrap_or(default.sleep_epsilon),
            ..default
        }
    }

    /// Checks that every parameter is usable by the stepping loop.
    ///
    /// # Errors
    /// Returns `PhysicsError::InvalidConfiguration` naming the first offending field.
    ///
    /// # Example
    /// ```
    /// use rs_rigid::utils::SimulationConfig;
    ///
    /// let config = SimulationConfig::new(None, None, Some(0), None);
    /// assert!(config.validate().is_err());
    /// assert!(SimulationConfig::default().validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfiguration("gravity must be finite".to_string()));
        }
        if !self.ground_level.is_finite() {
            return Err(PhysicsError::InvalidConfiguration("ground level must be finite".to_string()));
        }
        if self.substeps == 0 {
            return Err(PhysicsError::InvalidConfiguration("substeps must be at least 1".to_string()));
        }
        if !(self.sleep_epsilon >= 0.0) || !self.sleep_epsilon.is_finite() {
            return Err(PhysicsError::InvalidConfiguration("sleep epsilon must be non-negative".to_string()));
        }
        if !(0.0..=1.0).contains(&self.sleep_bias) {
            return Err(PhysicsError::InvalidConfiguration("sleep bias must lie in [0, 1]".to_string()));
        }
        if !(0.0..=1.0).contains(&self.linear_damping) || !(0.0..=1.0).contains(&self.angular_damping) {
            return Err(PhysicsError::InvalidConfiguration("damping must lie in [0, 1]".to_string()));
        }
        let contact = &self.contact;
        if !(0.0..=1.0).contains(&contact.correction_percent) {
            return Err(PhysicsError::InvalidConfiguration("correction percent must lie in [0, 1]".to_string()));
        }
        if !(contact.penetration_slop >= 0.0)
            || !(contact.friction_velocity_epsilon >= 0.0)
            || !(contact.restitution_velocity_threshold >= 0.0)
        {
            return Err(PhysicsError::InvalidConfiguration("contact tolerances must be non-negative".to_string()));
        }
        Ok(())
    }

    /// Duration of one substep for a frame of length `dt`.
    pub fn substep_duration(&self, dt: f32) -> f32 {
        dt / self.substeps as f32
    }
}
