//! Common types shared by all catalog entities

pub mod entity_id;
pub mod lenient;

pub use entity_id::EntityId;
