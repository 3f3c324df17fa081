mod world;

pub use world::*;

#[cfg(test)]
mod world_tests;
