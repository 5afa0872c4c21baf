//! Toast notifications that expire on the event loop tick.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::form::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

/// Queue of visible toasts; the newest is shown.
#[derive(Debug, Clone)]
pub struct Notifier {
    toasts: VecDeque<Toast>,
    default_timeout: Duration,
}

impl Notifier {
    pub fn new(default_timeout_secs: u64) -> Self {
        Self {
            toasts: VecDeque::new(),
            default_timeout: Duration::from_secs(default_timeout_secs),
        }
    }

    fn push(&mut self, message: &str, kind: ToastKind, timeout: Duration) {
        self.toasts.push_back(Toast {
            message: message.to_string(),
            kind,
            expires_at: Instant::now() + timeout,
        });
    }

    /// Drops every toast whose deadline is at or before `now`.
    pub fn expire(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Returns the most recent live toast.
    pub fn current(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    /// Time until the next toast expires, for the event poll timeout.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.toasts
            .iter()
            .map(|t| t.expires_at.saturating_duration_since(now))
            .min()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notify for Notifier {
    fn success(&mut self, message: &str) {
        let timeout = self.default_timeout;
        self.push(message, ToastKind::Success, timeout);
    }

    fn error(&mut self, message: &str, timeout_secs: u64) {
        self.push(message, ToastKind::Error, Duration::from_secs(timeout_secs));
    }
}

/// Renders the current toast right-aligned in `area`.
#[mutants::skip]
pub fn draw_notification(notifier: &Notifier, frame: &mut Frame, area: Rect) {
    let Some(toast) = notifier.current() else {
        return;
    };
    let style = match toast.kind {
        ToastKind::Success => Style::default().fg(Color::Black).bg(Color::Green),
        ToastKind::Error => Style::default().fg(Color::White).bg(Color::Red),
    };
    let paragraph = Paragraph::new(format!(" {} ", toast.message))
        .style(style)
        .alignment(Alignment::Right);
    frame.render_widget(paragraph, area);
}
