//! Stage progress and timing.
//!
//! [`StageProgress`] wraps an `indicatif` progress bar when the `progress` feature is
//! enabled, and degrades to a plain stage timer otherwise. It is shared by reference
//! between rayon workers, so every method takes `&self`.
//!
//! ```rust, no_run
//! use planetary_parade::progress::StageProgress;
//!
//! let progress = StageProgress::new(365, "altitudes");
//! for _ in 0..365 {
//!     // ... sample one day ...
//!     progress.inc();
//! }
//! let elapsed = progress.finish();
//! ```

use std::time::{Duration, Instant};

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

pub struct StageProgress {
    stage: &'static str,
    started: Instant,
    #[cfg(feature = "progress")]
    bar: ProgressBar,
}

impl StageProgress {
    pub fn new(len: usize, stage: &'static str) -> Self {
        #[cfg(feature = "progress")]
        let bar = {
            let bar = ProgressBar::new(len.max(1) as u64);
            let style = ProgressStyle::with_template(
                "{msg:>10} {bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | {per_sec} | ETA {eta_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style);
            bar.set_message(stage);
            bar.enable_steady_tick(Duration::from_millis(200));
            bar
        };
        #[cfg(not(feature = "progress"))]
        let _ = len;

        StageProgress {
            stage,
            started: Instant::now(),
            #[cfg(feature = "progress")]
            bar,
        }
    }

    #[inline]
    pub fn inc(&self) {
        #[cfg(feature = "progress")]
        self.bar.inc(1);
    }

    /// Clear the bar and log the stage duration.
    pub fn finish(self) -> Duration {
        #[cfg(feature = "progress")]
        self.bar.finish_and_clear();

        let elapsed = self.started.elapsed();
        log::info!("{} done in {}", self.stage, fmt_dur(elapsed));
        elapsed
    }
}

/// Human-readable duration: `"253µs"`, `"42ms"` or `"3.14s"` depending on the scale.
#[inline]
pub fn fmt_dur(d: Duration) -> String {
    let us = d.as_micros();
    if us < 1_000 {
        format!("{us}µs")
    } else {
        let ms = d.as_millis();
        if ms < 1_000 {
            format!("{ms}ms")
        } else {
            let s = d.as_secs_f32();
            format!("{s:.2}s")
        }
    }
}
