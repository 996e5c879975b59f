use std::io;
use std::path::{Path, PathBuf};

/// Extensions (lowercase, without dot) accepted as audio input.
pub const AUDIO_EXTS: [&str; 8] = ["mp3", "wav", "m4a", "aac", "flac", "ogg", "wma", "webm"];

/// One file to transcribe and where its transcript goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Collect up to `batch` pending work items from `input_dir`, in sorted
/// file-name order. Files whose transcript already exists in `output_dir`
/// are skipped, which is the only idempotence mechanism this tool has.
pub fn collect_pending(
    input_dir: &Path,
    output_dir: &Path,
    batch: usize,
) -> io::Result<Vec<WorkItem>> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(input_dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    let mut queue = Vec::new();
    for path in entries {
        if queue.len() >= batch {
            break;
        }
        if !is_audio_file(&path) {
            continue;
        }
        // with_extension replaces only the final extension, so
        // "interview.part1.mp3" becomes "interview.part1.txt"
        let Some(name) = path.with_extension("txt").file_name().map(ToOwned::to_owned) else {
            continue;
        };
        let target = output_dir.join(name);
        if target.exists() {
            continue;
        }
        queue.push(WorkItem {
            input: path,
            output: target,
        });
    }

    Ok(queue)
}

fn is_audio_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
