// Import required dependencies
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::time::{Duration, Instant};

// Metrics tracking structures
#[derive(Debug)]
pub struct ProcessingMetrics {
    start_time: Instant,
    files_processed: usize,
    bytes_processed: u64,
}

impl ProcessingMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            files_processed: 0,
            bytes_processed: 0,
        }
    }

    pub fn increment_files(&mut self) {
        self.files_processed += 1;
    }

    pub fn add_bytes(&mut self, count: u64) {
        self.bytes_processed += count;
    }

    pub fn files_processed(&self) -> usize {
        self.files_processed
    }

    pub fn bytes_processed(&self) -> u64 {
        self.bytes_processed
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ProcessingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-batch progress bar plus the counters behind the final summary line
pub struct ProgressTracker {
    operation: &'static str,
    bar: ProgressBar,
    metrics: ProcessingMetrics,
}

impl ProgressTracker {
    /// Create a tracker for `total_files` entries.
    ///
    /// When `visible` is false the bar is hidden but metrics are still kept.
    pub fn new(operation: &'static str, total_files: usize, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(total_files as u64)
        } else {
            ProgressBar::hidden()
        };

        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        bar.set_message(operation);

        Self {
            operation,
            bar,
            metrics: ProcessingMetrics::new(),
        }
    }

    /// Record one finished entry
    pub fn file_done(&mut self, name: &str, bytes: u64) {
        self.metrics.increment_files();
        self.metrics.add_bytes(bytes);

        self.bar.inc(1);
        self.bar
            .set_message(format!("{} {} ({})", self.operation, name, format_bytes(bytes)));
    }

    /// Close the bar and log the batch summary
    pub fn finish(&self) {
        let summary = format!(
            "{} finished in {:.2}s | Files: {} | Data: {}",
            self.operation,
            self.metrics.elapsed().as_secs_f64(),
            self.metrics.files_processed(),
            format_bytes(self.metrics.bytes_processed())
        );
        self.bar.finish_with_message(summary.clone());
        info!("{}", summary);
    }

    /// Drop the bar without a summary, used when a batch aborts
    pub fn abandon(&self) {
        self.bar.abandon();
    }

    pub fn metrics(&self) -> &ProcessingMetrics {
        &self.metrics
    }
}

/// Format bytes in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes = bytes as f64;
    let i = (bytes.log10() / 1000_f64.log10()).floor() as usize;
    let i = i.min(UNITS.len() - 1);

    let size = bytes / (1000_f64.powi(i as i32));

    if i == 0 {
        format!("{} {}", bytes as u64, UNITS[i])
    } else {
        format!("{:.1} {}", size, UNITS[i])
    }
}
