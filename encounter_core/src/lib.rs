//! # Encounter Core
//!
//! The training yard controller. It interfaces with `scene_rules`, decides
//! which actions a character sees at a location, gates the once-per-day master
//! challenge and folds the result of a finished combat back into navigation.
//!
//! ## Core Components
//!
//! - **resolver**: Rebuilds grouped navigation actions from the connection graph
//! - **masters**: Level-bracketed master table and selector
//! - **gate**: Eligibility state machine for the daily challenge
//! - **yard**: Turn handler for the training yard scene
//! - **outcome**: Reconciles a concluded combat with gate state and navigation
//!
//! ## Design Philosophy
//!
//! - **Synchronous**: a turn runs to completion; combat is a call plus a later continuation
//! - **Read-only world**: the connection graph is never mutated here
//! - **Typed intents**: sub-actions are a closed enum, not a parameter map

pub mod action;
pub mod combat;
pub mod config;
pub mod error;
pub mod events;
pub mod gate;
pub mod masters;
pub mod outcome;
pub mod resolver;
pub mod view;
pub mod yard;

pub use action::*;
pub use combat::*;
pub use config::*;
pub use error::*;
pub use events::*;
pub use gate::*;
pub use masters::*;
pub use outcome::*;
pub use resolver::*;
pub use view::*;
pub use yard::*;
