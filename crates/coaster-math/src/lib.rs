pub mod frame;
pub mod wrap;

pub use glam::{DMat3, DVec3};

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
