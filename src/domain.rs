//! The domain module encapsulates the core business logic. It defines the `Craft` and
//! `DebrisField` entities, along with the rules governing their interactions.
//!
//! By minimizing hard dependencies, this module ensures the business logic remains adaptable and
//! independent of specific implementation details.

mod basis;
mod collision;
mod craft;
mod field;

pub use basis::{Angle, Point3, Spherical};
pub use collision::{BoundingSphere, HasCollision};
pub use craft::{Craft, CraftConfig, CraftError, Direction};
pub use field::{Debris, DebrisField, DebrisId, FieldError, Quadrant};
