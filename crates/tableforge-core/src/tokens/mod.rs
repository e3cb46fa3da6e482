//! Token lifecycle and selection.
//!
//! [`TokenRegistry`] owns the live tokens and the selection; [`TokenMut`]
//! drives a single token through its pointer gestures.

pub mod registry;
pub mod token;

pub use registry::TokenRegistry;
pub use token::{DropOutcome, TokenMut, TokenSnapshot};
