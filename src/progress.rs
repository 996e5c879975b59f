use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};

/// How per-file progress is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProgressMode {
    /// Animated progress bar.
    Bar,
    /// One counter line per completed file.
    Plain,
}

/// Sink for batch progress: completion ticks plus log lines that must not
/// corrupt whatever is being drawn.
pub trait ProgressSink: Send + Sync {
    fn advance(&self);
    fn println(&self, msg: &str);
    fn finish(&self);
}

pub fn make_sink(mode: ProgressMode, total: u64) -> Arc<dyn ProgressSink> {
    match mode {
        ProgressMode::Bar => Arc::new(BarSink::new(total)),
        ProgressMode::Plain => Arc::new(PlainSink::new(total)),
    }
}

struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner} Transcribing [{bar:40}] {pos}/{len} ({elapsed})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
        );
        Self { bar }
    }
}

impl ProgressSink for BarSink {
    fn advance(&self) {
        self.bar.inc(1);
    }

    fn println(&self, msg: &str) {
        self.bar.println(msg);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

struct PlainSink {
    done: AtomicU64,
    total: u64,
}

impl PlainSink {
    fn new(total: u64) -> Self {
        Self {
            done: AtomicU64::new(0),
            total,
        }
    }
}

impl ProgressSink for PlainSink {
    fn advance(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        eprintln!("[{}/{}]", done, self.total);
    }

    fn println(&self, msg: &str) {
        eprintln!("{msg}");
    }

    fn finish(&self) {}
}
