use crate::utils;

/// Height of the implicit ground plane used when none is configured.
pub const DEFAULT_GROUND_LEVEL: f32 = 0.0;

pub const DEFAULT_LINEAR_DAMPING: f32 = 0.99;
pub const DEFAULT_ANGULAR_DAMPING: f32 = 0.5;
pub const DEFAULT_FRICTION: f32 = 0.5;
pub const DEFAULT_SPHERE_RESTITUTION: f32 = 0.7;
pub const DEFAULT_BOX_RESTITUTION: f32 = 0.5;
pub const DEFAULT_CYLINDER_RESTITUTION: f32 = 0.5;

/// Velocity scale applied to a body each time a distance constraint moves it.
pub const CONSTRAINT_VELOCITY_DAMPING: f32 = 0.99;

/// Number of segments sampled around each cylinder rim.
pub const CYLINDER_RIM_SEGMENTS: usize = 16;
/// Rim samples on both circles plus the two cap centers.
pub const CYLINDER_SAMPLE_COUNT: usize = CYLINDER_RIM_SEGMENTS * 2 + 2;

pub const DEFAULT_CONTACT_SETTINGS: utils::ContactSettings = utils::ContactSettings {
    restitution_velocity_threshold: 2.0,
    friction_velocity_epsilon: 0.001,
    correction_percent: 0.8,
    penetration_slop: 0.01,
};

pub const DEFAULT_SIMULATION_CONFIG: utils::SimulationConfig = utils::SimulationConfig {
    gravity: -9.81,
    ground_level: DEFAULT_GROUND_LEVEL,
    substeps: 4,
    sleep_epsilon: 0.3,
    sleep_bias: 0.96,
    linear_damping: DEFAULT_LINEAR_DAMPING,
    angular_damping: DEFAULT_ANGULAR_DAMPING,
    contact: DEFAULT_CONTACT_SETTINGS,
};
