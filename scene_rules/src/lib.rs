//! # Scene Rules
//!
//! The world model shared by the encounter controller and its collaborators:
//! character state, experience bookkeeping, locations and the connection graph
//! between them. This crate holds data and lookups only; it makes no narrative
//! decisions.

pub mod entities;
pub mod error;
pub mod mechanics;
pub mod scene;

pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use scene::*;
