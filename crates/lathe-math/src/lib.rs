pub mod aabb;
pub mod transform;

pub use glam::{DVec2, DVec3, DMat4};
pub use aabb::Aabb3;
pub use transform::Transform;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector3 = DVec3;
