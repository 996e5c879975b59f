use std::fmt;
use std::time::Duration;

/// Max characters of file name to show in per-file log line
const NAME_WIDTH: usize = 55;

/// Estimated USD cost for a stretch of audio at a per-minute rate.
pub fn cost_usd(duration_secs: f64, rate_per_min: f64) -> f64 {
    duration_secs / 60.0 * rate_per_min
}

/// Per-file result line: name padded to a fixed width, then audio minutes,
/// wall time, and estimated cost.
pub fn file_line(name: &str, audio_secs: f64, elapsed: Duration, cost: f64) -> String {
    format!(
        "✔︎ {} | {:6.2} min | {:6.1} s | ${:7.4}",
        pad_name(name),
        audio_secs / 60.0,
        elapsed.as_secs_f64(),
        cost
    )
}

pub fn error_line(name: &str, err: impl fmt::Display) -> String {
    format!("[ERROR] {name}: {err}")
}

pub fn summary_line(files: usize, audio_secs: f64, elapsed: Duration, cost: f64) -> String {
    format!(
        "Processed {} files | {:.2} min audio | elapsed {:.1}s | cost ${:.4}",
        files,
        audio_secs / 60.0,
        elapsed.as_secs_f64(),
        cost
    )
}

fn pad_name(name: &str) -> String {
    let mut display: String = if name.chars().count() > NAME_WIDTH {
        let mut cut: String = name.chars().take(NAME_WIDTH - 1).collect();
        cut.push('…');
        cut
    } else {
        name.to_string()
    };

    let shown = display.chars().count();
    for _ in shown..NAME_WIDTH {
        display.push(' ');
    }
    display
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_is_per_minute() {
        assert!((cost_usd(120.0, 0.0043) - 0.0086).abs() < 1e-9);
        assert_eq!(cost_usd(0.0, 0.0043), 0.0);
    }

    #[test]
    fn short_names_are_padded_to_width() {
        let padded = pad_name("clip.mp3");
        assert_eq!(padded.chars().count(), NAME_WIDTH);
        assert!(padded.starts_with("clip.mp3"));
    }

    #[test]
    fn long_names_are_cut_with_ellipsis() {
        let name = "x".repeat(80);
        let padded = pad_name(&name);
        assert_eq!(padded.chars().count(), NAME_WIDTH);
        assert!(padded.ends_with('…'));
    }

    #[test]
    fn truncation_respects_multibyte_names() {
        let name = "日本語の長い録音ファイル名".repeat(10);
        let padded = pad_name(&name);
        assert_eq!(padded.chars().count(), NAME_WIDTH);
    }

    #[test]
    fn file_line_formats_columns() {
        let line = file_line("clip.mp3", 90.0, Duration::from_secs_f64(12.34), 0.0065);
        assert!(line.starts_with("✔︎ clip.mp3"));
        assert!(line.contains("  1.50 min"));
        assert!(line.contains("  12.3 s"));
        assert!(line.contains("$ 0.0065"));
    }

    #[test]
    fn summary_line_totals() {
        let line = summary_line(3, 360.0, Duration::from_secs_f64(45.67), 0.0258);
        assert_eq!(line, "Processed 3 files | 6.00 min audio | elapsed 45.7s | cost $0.0258");
    }

    #[test]
    fn error_line_names_the_file() {
        assert_eq!(
            error_line("clip.mp3", "API returned status 429"),
            "[ERROR] clip.mp3: API returned status 429"
        );
    }
}
