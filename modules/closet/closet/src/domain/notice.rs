//! Transient user-facing messages.
//!
//! A notice is visible until its time-to-live elapses or a newer notice
//! replaces it. Callers pass the current instant explicitly.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A step could not be left; the draft is unchanged.
    Validation,
    /// Saving failed; the draft is kept for a retry.
    Failure,
    /// The outfit pair already exists.
    Duplicate,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    message: String,
    issued_at: Instant,
}

impl Notice {
    #[must_use]
    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn issued_at(&self) -> Instant {
        self.issued_at
    }
}

/// Single-slot holder for the most recent notice.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    ttl: Duration,
    current: Option<Notice>,
}

impl NoticeBoard {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    /// Replace whatever is showing with a new notice issued at `now`.
    pub fn post_at(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        now: Instant,
    ) -> &Notice {
        self.current.insert(Notice {
            kind,
            message: message.into(),
            issued_at: now,
        })
    }

    pub fn post(&mut self, kind: NoticeKind, message: impl Into<String>) -> &Notice {
        self.post_at(kind, message, Instant::now())
    }

    /// The notice still visible at `now`, if any.
    #[must_use]
    pub fn active_at(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.issued_at) < self.ttl)
    }

    /// The most recent notice regardless of expiry.
    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_expires_after_ttl() {
        let mut board = NoticeBoard::new(Duration::from_secs(3));
        let t0 = Instant::now();
        board.post_at(NoticeKind::Validation, "Please upload an image.", t0);

        assert!(board.active_at(t0).is_some());
        assert!(board.active_at(t0 + Duration::from_millis(2_999)).is_some());
        assert!(board.active_at(t0 + Duration::from_secs(3)).is_none());
        assert!(board.latest().is_some());
    }

    #[test]
    fn newer_notice_supersedes_and_restarts_the_clock() {
        let mut board = NoticeBoard::new(Duration::from_secs(3));
        let t0 = Instant::now();
        board.post_at(NoticeKind::Validation, "first", t0);
        board.post_at(NoticeKind::Failure, "second", t0 + Duration::from_secs(2));

        let active = board.active_at(t0 + Duration::from_secs(4)).unwrap();
        assert_eq!(active.message(), "second");
        assert_eq!(active.kind(), NoticeKind::Failure);
    }

    #[test]
    fn dismiss_clears_the_slot() {
        let mut board = NoticeBoard::new(Duration::from_secs(3));
        board.post(NoticeKind::Success, "Saved");
        board.dismiss();
        assert!(board.latest().is_none());
    }
}
