//! Prompt construction for the hosted text and image models

pub mod template;

pub use template::{ImageSpec, PromptTemplate};
