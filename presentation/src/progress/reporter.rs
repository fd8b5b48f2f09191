//! Progress reporting for pipeline runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use tourgen_application::PipelineObserver;
use tourgen_domain::{PipelinePhase, PipelineSnapshot, PriceAudit};

/// Reports progress during a run with a spinner and a per-day image bar
pub struct ProgressReporter {
    multi: MultiProgress,
    spinner: Mutex<Option<ProgressBar>>,
    image_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            spinner: Mutex::new(None),
            image_bar: Mutex::new(None),
        }
    }

    fn image_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, label: &str) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Itinerary");
        pb.set_message(label.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Some(previous) = self.spinner.lock().unwrap().replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn finish_spinner(&self, message: String) {
        if let Some(pb) = self.spinner.lock().unwrap().take() {
            pb.finish_with_message(message);
        }
    }

    fn start_images(&self, snapshot: &PipelineSnapshot) {
        let days = snapshot
            .package
            .as_ref()
            .map(|package| package.days.len())
            .unwrap_or_default();

        let pb = self.multi.add(ProgressBar::new(days as u64));
        pb.set_style(Self::image_style());
        pb.set_prefix("Visuals");
        pb.set_message(snapshot.loading_label.clone());

        *self.image_bar.lock().unwrap() = Some(pb);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineObserver for ProgressReporter {
    fn on_phase_change(&self, snapshot: &PipelineSnapshot) {
        match snapshot.phase {
            PipelinePhase::Idle => {}
            PipelinePhase::GeneratingText => self.start_spinner(&snapshot.loading_label),
            PipelinePhase::GeneratingImages => {
                self.finish_spinner(format!("{}", "Itinerary ready".green()));
                self.start_images(snapshot);
            }
            PipelinePhase::Ready => {
                self.finish_spinner(format!("{}", "Itinerary ready".green()));
                if let Some(pb) = self.image_bar.lock().unwrap().take() {
                    pb.finish_with_message(format!("{}", "Visuals complete!".green()));
                }
            }
            PipelinePhase::Failed => {
                if let Some(pb) = self.spinner.lock().unwrap().take() {
                    pb.abandon_with_message(format!("{}", "Generation failed".red()));
                }
                if let Some(pb) = self.image_bar.lock().unwrap().take() {
                    pb.abandon();
                }
            }
        }
    }

    fn on_image_complete(&self, day: u32, success: bool) {
        if let Some(pb) = self.image_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} day {}", "v".green(), day)
            } else {
                format!("{} day {}", "x".red(), day)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_price_audit(&self, audit: &PriceAudit) {
        if !audit.is_consistent() {
            let _ = self
                .multi
                .println(format!("{} {}", "!".yellow().bold(), audit));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl PipelineObserver for SimpleProgress {
    fn on_phase_change(&self, snapshot: &PipelineSnapshot) {
        match snapshot.phase {
            PipelinePhase::GeneratingText | PipelinePhase::GeneratingImages => {
                eprintln!("{} {}", "->".cyan(), snapshot.loading_label.bold());
            }
            PipelinePhase::Ready => eprintln!("{} {}", "v".green(), "Ready"),
            PipelinePhase::Failed => eprintln!("{} {}", "x".red(), "Failed"),
            PipelinePhase::Idle => {}
        }
    }

    fn on_image_complete(&self, day: u32, success: bool) {
        if success {
            eprintln!("  {} day {}", "v".green(), day);
        } else {
            eprintln!("  {} day {} (placeholder)", "x".red(), day);
        }
    }

    fn on_price_audit(&self, audit: &PriceAudit) {
        if !audit.is_consistent() {
            eprintln!("  {} {}", "!".yellow(), audit);
        }
    }
}
