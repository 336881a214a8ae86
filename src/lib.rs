//! AI-assisted tooling for game asset work
//!
//! Turns panel inputs (uploaded images, style choices, search queries) into
//! prompts for a hosted generative model and unwraps the image or text it
//! returns.

pub mod ai;
pub mod error;
pub mod media;
pub mod models;
pub mod prompts;
pub mod studio;

pub use error::{Error, Result};
