mod collision_detection;
mod contact_resolution;

pub use collision_detection::*;
pub use contact_resolution::*;
