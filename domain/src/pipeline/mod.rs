//! Generation pipeline state.
//!
//! - [`state::PipelinePhase`] — where a run is
//! - [`state::PipelineSnapshot`] — what callers observe

pub mod state;

pub use state::{PipelinePhase, PipelineSnapshot, PipelineStatus};
