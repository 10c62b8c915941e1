//! Core module - identity, session state and workshop progression

pub mod accumulator;
pub mod entity;
pub mod identity;
pub mod session;
pub mod workshop;

pub use accumulator::{Accumulator, Validate, ValidationErrors};
pub use entity::{Entity, Importance};
pub use identity::{EntityId, EntityPrefix, IdParseError};
pub use session::Session;
pub use workshop::{workshop, Workshop, WorkshopProgress, WORKSHOPS, WORKSHOP_COUNT};
