//! Presentation-side collaborators of the engine.
//!
//! The engine never reaches into a screen. After each operation it calls
//! into one value implementing [`Frontend`], which is the union of three
//! narrow traits: where the text goes, which operator key is lit, and who
//! owns the error-reset timer.

use std::time::Duration;

use crate::core::Operator;

/// Receives the rendered display text
pub trait DisplaySink {
    /// Show `text` in place of the current display contents
    fn render(&mut self, text: &str);

    /// Switch the error styling on or off
    fn set_error_style(&mut self, error: bool);
}

/// Marks the active operator key
pub trait OperatorHighlight {
    /// Highlight `op`, or remove every highlight when `None`
    fn highlight(&mut self, op: Option<Operator>);
}

/// One-shot timer owned by the presentation layer.
///
/// When a scheduled reset elapses the owner calls
/// [`Engine::reset_after_error`](crate::core::Engine::reset_after_error).
/// Nothing in the engine depends on the timer ever firing.
pub trait ResetTimer {
    /// Arrange for the engine to be reset after `after`
    fn schedule_reset(&mut self, after: Duration);

    /// Drop a pending reset, if any
    fn cancel_reset(&mut self);
}

/// Everything the engine needs from its surroundings
pub trait Frontend: DisplaySink + OperatorHighlight + ResetTimer {}

impl<T: DisplaySink + OperatorHighlight + ResetTimer> Frontend for T {}

/// A single rendered display state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Display text
    pub text: String,
    /// Whether error styling was on
    pub error: bool,
}

/// In-memory frontend that keeps every rendered frame.
///
/// Used by the headless driver, the CLI replay command and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingFrontend {
    frames: Vec<Frame>,
    error_style: bool,
    highlighted: Option<Operator>,
    pending_reset: Option<Duration>,
    resets_scheduled: usize,
}

impl RecordingFrontend {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames in render order
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The most recent display text
    #[must_use]
    pub fn text(&self) -> &str {
        self.frames.last().map_or("", |f| f.text.as_str())
    }

    /// Whether error styling is currently on
    #[must_use]
    pub fn is_error_style(&self) -> bool {
        self.error_style
    }

    /// The highlighted operator
    #[must_use]
    pub fn highlighted(&self) -> Option<Operator> {
        self.highlighted
    }

    /// Delay of the pending reset, if one is scheduled
    #[must_use]
    pub fn pending_reset(&self) -> Option<Duration> {
        self.pending_reset
    }

    /// Number of resets ever scheduled
    #[must_use]
    pub fn resets_scheduled(&self) -> usize {
        self.resets_scheduled
    }

    /// Takes the pending reset, returning true if there was one
    pub fn take_pending_reset(&mut self) -> bool {
        self.pending_reset.take().is_some()
    }

    /// Forgets recorded frames
    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }
}

impl DisplaySink for RecordingFrontend {
    fn render(&mut self, text: &str) {
        self.frames.push(Frame {
            text: text.to_string(),
            error: self.error_style,
        });
    }

    fn set_error_style(&mut self, error: bool) {
        self.error_style = error;
        if let Some(last) = self.frames.last_mut() {
            last.error = error;
        }
    }
}

impl OperatorHighlight for RecordingFrontend {
    fn highlight(&mut self, op: Option<Operator>) {
        self.highlighted = op;
    }
}

impl ResetTimer for RecordingFrontend {
    fn schedule_reset(&mut self, after: Duration) {
        self.pending_reset = Some(after);
        self.resets_scheduled += 1;
    }

    fn cancel_reset(&mut self) {
        self.pending_reset = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_frontend_new() {
        let fe = RecordingFrontend::new();
        assert!(fe.frames().is_empty());
        assert_eq!(fe.text(), "");
        assert!(!fe.is_error_style());
        assert_eq!(fe.highlighted(), None);
        assert_eq!(fe.pending_reset(), None);
    }

    #[test]
    fn test_render_records_frames() {
        let mut fe = RecordingFrontend::new();
        fe.render("1");
        fe.render("12");
        assert_eq!(fe.frames().len(), 2);
        assert_eq!(fe.text(), "12");
    }

    #[test]
    fn test_error_style_applies_to_last_frame() {
        let mut fe = RecordingFrontend::new();
        fe.render("Error");
        fe.set_error_style(true);
        assert_eq!(
            fe.frames().last(),
            Some(&Frame {
                text: "Error".into(),
                error: true
            })
        );
        fe.set_error_style(false);
        fe.render("0");
        assert!(!fe.frames()[1].error);
    }

    #[test]
    fn test_highlight() {
        let mut fe = RecordingFrontend::new();
        fe.highlight(Some(Operator::Add));
        assert_eq!(fe.highlighted(), Some(Operator::Add));
        fe.highlight(None);
        assert_eq!(fe.highlighted(), None);
    }

    #[test]
    fn test_reset_schedule_and_cancel() {
        let mut fe = RecordingFrontend::new();
        fe.schedule_reset(Duration::from_secs(2));
        assert_eq!(fe.pending_reset(), Some(Duration::from_secs(2)));
        assert_eq!(fe.resets_scheduled(), 1);
        fe.cancel_reset();
        assert_eq!(fe.pending_reset(), None);
        assert!(!fe.take_pending_reset());
    }

    #[test]
    fn test_take_pending_reset() {
        let mut fe = RecordingFrontend::new();
        fe.schedule_reset(Duration::from_millis(10));
        assert!(fe.take_pending_reset());
        assert!(!fe.take_pending_reset());
    }

    #[test]
    fn test_clear_frames() {
        let mut fe = RecordingFrontend::new();
        fe.render("5");
        fe.clear_frames();
        assert!(fe.frames().is_empty());
    }
}
