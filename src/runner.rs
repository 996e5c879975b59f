use std::sync::Arc;
use std::time::{Duration, Instant};

use log::warn;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::clients::{TranscribeService, Transcript, TranscriptionError};
use crate::progress::ProgressSink;
use crate::report;
use crate::scan::WorkItem;

/// Accounting for one processed file. Audio and cost stay zero when the
/// file failed; wall time is charged either way.
#[derive(Debug, Default, Clone, Copy)]
struct FileOutcome {
    elapsed: Duration,
    audio_secs: f64,
    cost_usd: f64,
}

/// Totals over a whole batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub files: usize,
    pub total_elapsed: Duration,
    pub total_audio_secs: f64,
    pub total_cost_usd: f64,
}

/// Fan the work items out over `concurrency` parallel uploads and sum up
/// the results. Individual failures are reported through the sink and do
/// not abort the batch.
pub async fn run_batch(
    service: Arc<dyn TranscribeService>,
    items: Vec<WorkItem>,
    concurrency: usize,
    rate_per_min: f64,
    sink: Arc<dyn ProgressSink>,
) -> RunSummary {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    let files = items.len();
    for item in items {
        let semaphore = Arc::clone(&semaphore);
        let service = Arc::clone(&service);
        let sink = Arc::clone(&sink);
        tasks.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                // only happens if the semaphore is closed, which it never is
                return FileOutcome::default();
            };
            process_item(service.as_ref(), &item, rate_per_min, sink.as_ref()).await
        });
    }

    let mut summary = RunSummary {
        files,
        ..Default::default()
    };
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => {
                summary.total_elapsed += outcome.elapsed;
                summary.total_audio_secs += outcome.audio_secs;
                summary.total_cost_usd += outcome.cost_usd;
            }
            Err(e) => warn!("Transcription task panicked: {e}"),
        }
    }
    sink.finish();

    summary
}

async fn process_item(
    service: &dyn TranscribeService,
    item: &WorkItem,
    rate_per_min: f64,
    sink: &dyn ProgressSink,
) -> FileOutcome {
    let start = Instant::now();
    let name = item
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| item.input.display().to_string());

    let outcome = match transcribe_and_write(service, item).await {
        Ok(transcript) => {
            let elapsed = start.elapsed();
            let cost = report::cost_usd(transcript.duration_secs, rate_per_min);
            sink.println(&report::file_line(
                &name,
                transcript.duration_secs,
                elapsed,
                cost,
            ));
            FileOutcome {
                elapsed,
                audio_secs: transcript.duration_secs,
                cost_usd: cost,
            }
        }
        Err(e) => {
            sink.println(&report::error_line(&name, &e));
            FileOutcome {
                elapsed: start.elapsed(),
                ..Default::default()
            }
        }
    };
    sink.advance();

    outcome
}

async fn transcribe_and_write(
    service: &dyn TranscribeService,
    item: &WorkItem,
) -> Result<Transcript, TranscriptionError> {
    let transcript = service.transcribe(&item.input).await?;
    tokio::fs::write(&item.output, &transcript.text).await?;
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::scan::collect_pending;

    struct RecordingSink {
        lines: Mutex<Vec<String>>,
        ticks: AtomicUsize,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                lines: Mutex::new(Vec::new()),
                ticks: AtomicUsize::new(0),
            }
        }
    }

    impl ProgressSink for RecordingSink {
        fn advance(&self) {
            self.ticks.fetch_add(1, Ordering::SeqCst);
        }

        fn println(&self, msg: &str) {
            self.lines.lock().unwrap().push(msg.to_string());
        }

        fn finish(&self) {}
    }

    struct FakeService {
        duration_secs: f64,
        fail_on: Option<&'static str>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FakeService {
        fn new(duration_secs: f64) -> Self {
            Self {
                duration_secs,
                fail_on: None,
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }

        fn failing_on(mut self, name: &'static str) -> Self {
            self.fail_on = Some(name);
            self
        }
    }

    #[async_trait]
    impl TranscribeService for FakeService {
        async fn transcribe(&self, audio_path: &Path) -> Result<Transcript, TranscriptionError> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let name = audio_path.file_name().unwrap().to_str().unwrap();
            if self.fail_on == Some(name) {
                return Err(TranscriptionError::ApiError("simulated outage".to_string()));
            }
            Ok(Transcript {
                text: format!("transcript of {name}"),
                duration_secs: self.duration_secs,
            })
        }
    }

    fn seed_inputs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                std::fs::write(&path, b"audio").unwrap();
                path
            })
            .collect()
    }

    #[tokio::test]
    async fn batch_writes_outputs_and_sums_results() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        seed_inputs(input.path(), &["a.mp3", "b.mp3", "c.mp3"]);
        let items = collect_pending(input.path(), output.path(), 50).unwrap();

        let sink = Arc::new(RecordingSink::new());
        let summary = run_batch(
            Arc::new(FakeService::new(120.0)),
            items,
            2,
            0.0043,
            sink.clone(),
        )
        .await;

        assert_eq!(summary.files, 3);
        assert!((summary.total_audio_secs - 360.0).abs() < 1e-9);
        assert!((summary.total_cost_usd - 3.0 * report::cost_usd(120.0, 0.0043)).abs() < 1e-9);
        assert_eq!(sink.ticks.load(Ordering::SeqCst), 3);

        for name in ["a.txt", "b.txt", "c.txt"] {
            let text = std::fs::read_to_string(output.path().join(name)).unwrap();
            assert!(text.starts_with("transcript of "));
        }
    }

    #[tokio::test]
    async fn failed_item_reports_error_and_keeps_going() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        seed_inputs(input.path(), &["bad.mp3", "good.mp3"]);
        let items = collect_pending(input.path(), output.path(), 50).unwrap();

        let sink = Arc::new(RecordingSink::new());
        let summary = run_batch(
            Arc::new(FakeService::new(60.0).failing_on("bad.mp3")),
            items,
            4,
            0.0043,
            sink.clone(),
        )
        .await;

        // only the good file contributes audio and cost
        assert!((summary.total_audio_secs - 60.0).abs() < 1e-9);
        assert!(summary.total_elapsed > Duration::ZERO);
        assert_eq!(sink.ticks.load(Ordering::SeqCst), 2);
        assert!(output.path().join("good.txt").exists());
        assert!(!output.path().join("bad.txt").exists());

        let lines = sink.lines.lock().unwrap();
        assert!(lines
            .iter()
            .any(|line| line.starts_with("[ERROR] bad.mp3:")));
    }

    #[tokio::test]
    async fn concurrency_is_bounded_by_the_semaphore() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        seed_inputs(
            input.path(),
            &["a.mp3", "b.mp3", "c.mp3", "d.mp3", "e.mp3", "f.mp3"],
        );
        let items = collect_pending(input.path(), output.path(), 50).unwrap();

        let service = Arc::new(FakeService::new(10.0));
        let sink = Arc::new(RecordingSink::new());
        run_batch(service.clone(), items, 2, 0.0043, sink).await;

        assert!(service.max_in_flight.load(Ordering::SeqCst) <= 2);
    }
}
