//! Shared foundation for the supportcrew workspace: configuration loading,
//! the policy document, and final-answer postprocessing.

pub mod config;
pub mod extract;
pub mod policy;

pub use extract::extract_final_answer;
pub use policy::{PolicyDocument, PolicyError};
