#[cfg(feature = "constraints")]
mod distance_constraint;
#[cfg(feature = "constraints")]
pub use distance_constraint::*;
