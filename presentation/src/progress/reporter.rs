//! Progress reporting for bulk delivery

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use quorum_application::DeliveryProgressNotifier;
use quorum_domain::DeliveryResult;
use std::sync::Mutex;

/// Reports delivery progress with one progress bar per batch
pub struct ProgressReporter {
    multi: MultiProgress,
    batch_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            batch_bar: Mutex::new(None),
        }
    }

    fn batch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryProgressNotifier for ProgressReporter {
    fn on_batch_start(&self, batch: usize, total_batches: usize, size: usize) {
        let pb = self.multi.add(ProgressBar::new(size as u64));
        pb.set_style(Self::batch_style());
        pb.set_prefix(format!("Batch {}/{}", batch, total_batches));
        pb.set_message("Sending...");

        if let Ok(mut slot) = self.batch_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_recipient_complete(&self, result: &DeliveryResult) {
        if let Ok(slot) = self.batch_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if result.success {
                format!("{} {}", "v".green(), result.email)
            } else {
                format!("{} {}", "x".red(), result.email)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_batch_complete(&self, batch: usize) {
        if let Ok(mut slot) = self.batch_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} complete!", format!("Batch {}", batch).green()));
        }
    }

    fn on_retry(&self, recipient_id: &str, attempt: u32, error: &str) {
        if let Ok(slot) = self.batch_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(format!(
                "{} {} retry {} ({})",
                "~".yellow(),
                recipient_id,
                attempt,
                error
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DeliveryProgressNotifier for SimpleProgress {
    fn on_batch_start(&self, batch: usize, total_batches: usize, size: usize) {
        println!(
            "{} {} ({} recipients)",
            "->".cyan(),
            format!("Batch {}/{}", batch, total_batches).bold(),
            size
        );
    }

    fn on_recipient_complete(&self, result: &DeliveryResult) {
        if result.success {
            println!("  {} {}", "v".green(), result.email);
        } else {
            println!(
                "  {} {} (failed: {})",
                "x".red(),
                result.email,
                result.error.as_deref().unwrap_or("unknown")
            );
        }
    }

    fn on_batch_complete(&self, _batch: usize) {
        println!();
    }

    fn on_retry(&self, recipient_id: &str, attempt: u32, error: &str) {
        println!(
            "  {} {} retry {} ({})",
            "~".yellow(),
            recipient_id,
            attempt,
            error
        );
    }
}
