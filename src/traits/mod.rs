//! Trait definitions for Hoopla resources.
//!
//! [`Resource`] and [`Writable`] are declared by each resource kind; the
//! operation traits are implemented for every kind that qualifies.

mod delete;
mod owned;
mod related;
mod reload;
mod resource;
mod save;

pub use delete::Delete;
pub use owned::HasOwner;
pub use related::Related;
pub use reload::Reload;
pub use resource::{Resource, Writable};
pub use save::Save;
