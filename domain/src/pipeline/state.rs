//! Observable state of a generation run

use crate::package::entities::TourPackage;
use serde::Serialize;

/// Coarse status exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PipelineStatus::Idle => "idle",
            PipelineStatus::Loading => "loading",
            PipelineStatus::Ready => "ready",
            PipelineStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phase of a generation run
///
/// `Idle → GeneratingText → GeneratingImages → Ready`, or
/// `GeneratingText → Failed`. Image failures never lead to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    #[default]
    Idle,
    GeneratingText,
    GeneratingImages,
    Ready,
    Failed,
}

impl PipelinePhase {
    pub fn as_str(&self) -> &str {
        match self {
            PipelinePhase::Idle => "idle",
            PipelinePhase::GeneratingText => "generating_text",
            PipelinePhase::GeneratingImages => "generating_images",
            PipelinePhase::Ready => "ready",
            PipelinePhase::Failed => "failed",
        }
    }

    pub fn status(&self) -> PipelineStatus {
        match self {
            PipelinePhase::Idle => PipelineStatus::Idle,
            PipelinePhase::GeneratingText | PipelinePhase::GeneratingImages => {
                PipelineStatus::Loading
            }
            PipelinePhase::Ready => PipelineStatus::Ready,
            PipelinePhase::Failed => PipelineStatus::Failed,
        }
    }

    /// Label shown while the phase is in progress
    pub fn loading_label(&self) -> &'static str {
        match self {
            PipelinePhase::GeneratingText => "Crafting Your Itinerary...",
            PipelinePhase::GeneratingImages => "Generating breathtaking visuals...",
            _ => "",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelinePhase::Ready | PipelinePhase::Failed)
    }
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a caller can observe at any point of a run
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSnapshot {
    /// Run that produced this state; 0 before the first submission
    pub run_id: u64,
    pub phase: PipelinePhase,
    pub status: PipelineStatus,
    pub loading_label: String,
    /// Text-only while images are generating, merged once ready
    pub package: Option<TourPackage>,
    pub error_message: Option<String>,
}

impl PipelineSnapshot {
    /// State after a new submission: loading, package and error cleared
    pub fn started(run_id: u64) -> Self {
        Self::in_phase(run_id, PipelinePhase::GeneratingText, None)
    }

    pub fn in_phase(run_id: u64, phase: PipelinePhase, package: Option<TourPackage>) -> Self {
        Self {
            run_id,
            phase,
            status: phase.status(),
            loading_label: phase.loading_label().to_string(),
            package,
            error_message: None,
        }
    }

    pub fn ready(run_id: u64, package: TourPackage) -> Self {
        Self::in_phase(run_id, PipelinePhase::Ready, Some(package))
    }

    pub fn failed(run_id: u64, message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Self::in_phase(run_id, PipelinePhase::Failed, None)
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == PipelineStatus::Loading
    }
}
