mod coordinates;
mod vector3;
mod quaternion;
mod matrix3;
mod shape;
mod rigid_body;
mod contact;

pub use coordinates::*;
pub use vector3::*;
pub use quaternion::*;
pub use matrix3::*;
pub use shape::*;
pub use rigid_body::{BodyTransform, RigidBody};
pub(crate) use rigid_body::pair_mut;
pub use contact::*;

#[cfg(test)]
mod quaternion_tests;
#[cfg(test)]
mod shape_tests;
