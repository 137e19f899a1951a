//! Terminal rendering of the feed.

use std::io;

use console::{Term, style};
use doomscroll_core::FeedSession;

const CAPTION_WIDTH: usize = 100;

/// Lines printed when a video becomes current.
pub fn header_lines(session: &FeedSession, profile: Option<&str>) -> Vec<String> {
    let state = session.current();
    let position = format!("{}/{}", session.current_index() + 1, session.len());
    let kind = if state.is_ad { "  [AD]" } else { "" };

    let mut lines = vec![
        String::new(),
        format!("── {position} ── {}{kind}", state.video.stem()),
    ];
    if let Some(handle) = profile {
        lines.push(format!("   @{handle}"));
    }
    match state.video.caption() {
        Some(caption) if !caption.is_empty() => {
            for line in caption.lines().take(3) {
                lines.push(format!("   {}", truncate(line, CAPTION_WIDTH)));
            }
        }
        _ => lines.push("   (no caption)".to_string()),
    }
    if let Some(product) = session.current_product() {
        lines.push(format!("   [o] {}: {}", product.cta_text, product.name));
    }
    lines
}

/// The live status line of the current video.
pub fn status_line(session: &FeedSession, seconds: f64) -> String {
    let reaction = session.current().reaction;
    format!(
        "   watched {seconds:5.1}s   {} like   {} share",
        if reaction.heart { '♥' } else { '♡' },
        if reaction.share { '↗' } else { '·' },
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Writes the feed to stdout.
pub struct FeedView {
    term: Term,
    profile: Option<String>,
    visible: bool,
}

impl FeedView {
    pub fn new(profile: Option<&str>) -> Self {
        Self {
            term: Term::stdout(),
            profile: profile.map(str::to_string),
            visible: true,
        }
    }

    /// A view that renders nothing.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::new(None)
        }
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn message(&self, text: &str) {
        self.write_lines(&[text.to_string()]);
    }

    pub fn header(&self, session: &FeedSession) {
        self.write_lines(&header_lines(session, self.profile()));
    }

    pub fn status(&self, session: &FeedSession, seconds: f64) {
        if !self.visible {
            return;
        }
        let line = status_line(session, seconds);
        let result = if self.term.is_term() {
            self.term
                .clear_line()
                .and_then(|()| self.term.write_str(&style(line).dim().to_string()))
        } else {
            Ok(())
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "Failed to draw status line");
        }
    }

    fn write_lines(&self, lines: &[String]) {
        if !self.visible {
            return;
        }
        if let Err(e) = self.try_write_lines(lines) {
            tracing::debug!(error = %e, "Failed to draw feed");
        }
    }

    fn try_write_lines(&self, lines: &[String]) -> io::Result<()> {
        if self.term.is_term() {
            self.term.clear_line()?;
        }
        // The input thread keeps the terminal in raw mode, so lines end with \r\n
        for line in lines {
            self.term.write_str(line)?;
            self.term.write_str("\r\n")?;
        }
        self.term.flush()
    }
}
