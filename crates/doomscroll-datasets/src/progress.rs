//! CLI progress rendering for preparer stages.
//!
//! Presentation only. Picks an indicatif bar on a terminal and plain
//! carriage-return lines otherwise (CI logs, pipes).

use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress display for one stage (collecting captions, downloading clips).
pub struct CliProgressPrinter {
    inner: ProgressRender,
}

enum ProgressRender {
    Fancy(FancyProgress),
    Plain(PlainProgress),
    Hidden,
}

impl CliProgressPrinter {
    /// Create a printer for `label`, auto-detecting terminal capability.
    pub fn new(label: &str) -> Self {
        let inner = if io::stdout().is_terminal() {
            ProgressRender::Fancy(FancyProgress::new(label))
        } else {
            ProgressRender::Plain(PlainProgress::new(label))
        };
        Self { inner }
    }

    /// A printer that renders nothing.
    pub const fn hidden() -> Self {
        Self {
            inner: ProgressRender::Hidden,
        }
    }

    /// `new(label)` when `show` is set, otherwise [`Self::hidden`].
    pub fn visible_if(show: bool, label: &str) -> Self {
        if show { Self::new(label) } else { Self::hidden() }
    }

    /// Update position against `total` (`0` when the total is unknown).
    pub fn update(&mut self, done: u64, total: u64) {
        match &mut self.inner {
            ProgressRender::Fancy(inner) => inner.update(done, total),
            ProgressRender::Plain(inner) => inner.update(done, total),
            ProgressRender::Hidden => {}
        }
    }

    /// Show success/fail counters next to the bar.
    pub fn set_counts(&mut self, success: usize, fail: usize) {
        let suffix = format!("success={success} fail={fail}");
        match &mut self.inner {
            ProgressRender::Fancy(inner) => inner.bar.set_message(suffix),
            ProgressRender::Plain(inner) => inner.suffix = Some(suffix),
            ProgressRender::Hidden => {}
        }
    }

    /// Finish and clear the progress display.
    pub fn finish(&mut self) {
        match &mut self.inner {
            ProgressRender::Fancy(inner) => inner.finish(),
            ProgressRender::Plain(inner) => inner.finish(),
            ProgressRender::Hidden => {}
        }
    }
}

// ============================================================================
// Fancy Terminal Progress (indicatif)
// ============================================================================

struct FancyProgress {
    bar: ProgressBar,
    saw_length: bool,
}

impl FancyProgress {
    fn new(label: &str) -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        bar.set_style(Self::spinner_style());
        bar.set_prefix(format_label(label));
        bar.enable_steady_tick(Duration::from_millis(120));
        Self {
            bar,
            saw_length: false,
        }
    }

    fn update(&mut self, done: u64, total: u64) {
        if total == 0 {
            self.bar.set_position(done);
            return;
        }

        if !self.saw_length {
            self.bar.set_style(Self::bar_style());
            self.saw_length = true;
        }
        if self.bar.length() != Some(total) {
            self.bar.set_length(total);
        }
        self.bar.set_position(done.min(total));
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{prefix} {spinner} {pos} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{prefix} {bar:28.cyan/blue} {pos:>6}/{len:6} ({percent:>3}%) ETA {eta} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

// ============================================================================
// Plain Progress (non-terminal)
// ============================================================================

struct PlainProgress {
    label: String,
    suffix: Option<String>,
    last_emit: Option<Instant>,
    last_line_len: usize,
    printed: bool,
}

impl PlainProgress {
    fn new(label: &str) -> Self {
        Self {
            label: format_label(label),
            suffix: None,
            last_emit: None,
            last_line_len: 0,
            printed: false,
        }
    }

    fn update(&mut self, done: u64, total: u64) {
        const MIN_INTERVAL: Duration = Duration::from_millis(250);
        let now = Instant::now();
        let finished = total > 0 && done >= total;
        if let Some(last) = self.last_emit {
            if !finished && now.duration_since(last) < MIN_INTERVAL {
                return;
            }
        }
        self.last_emit = Some(now);

        let line = plain_line(&self.label, done, total, self.suffix.as_deref());
        let pad = self.last_line_len.saturating_sub(line.len());
        print!("\r{line}{}", " ".repeat(pad));
        io::stdout().flush().ok();

        self.last_line_len = line.len();
        self.printed = true;
    }

    fn finish(&mut self) {
        if self.printed {
            println!();
            self.printed = false;
            self.last_line_len = 0;
        }
    }
}

fn plain_line(label: &str, done: u64, total: u64, suffix: Option<&str>) -> String {
    use std::fmt::Write;

    let mut line = String::from(label);
    if total > 0 {
        #[allow(clippy::cast_precision_loss)]
        let percent = (done.min(total) as f64 / total as f64) * 100.0;
        let _ = write!(line, ": {done}/{total} ({percent:5.1}%)");
    } else {
        let _ = write!(line, ": {done}");
    }
    if let Some(suffix) = suffix {
        let _ = write!(line, " [{suffix}]");
    }
    line
}

fn format_label(raw: &str) -> String {
    const MAX_LABEL: usize = 40;
    if raw.chars().count() <= MAX_LABEL {
        return raw.to_string();
    }
    let mut buf: String = raw.chars().take(MAX_LABEL - 1).collect();
    buf.push('…');
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_with_total_and_counts() {
        let line = plain_line("Downloading clips", 25, 100, Some("success=25 fail=4"));
        assert_eq!(
            line,
            "Downloading clips: 25/100 ( 25.0%) [success=25 fail=4]"
        );
    }

    #[test]
    fn test_plain_line_without_total() {
        assert_eq!(plain_line("Collecting captions", 7, 0, None), "Collecting captions: 7");
    }

    #[test]
    fn test_format_label_truncates_long() {
        let result = format_label(&"a".repeat(50));
        assert_eq!(result.chars().count(), 40);
        assert!(result.ends_with('…'));
    }

    #[test]
    fn test_hidden_printer_accepts_updates() {
        let mut printer = CliProgressPrinter::hidden();
        printer.update(3, 10);
        printer.set_counts(3, 0);
        printer.finish();
    }
}
