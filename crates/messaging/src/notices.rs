//! Request-scoped transient notices.
//!
//! Local and staging deployments run with external delivery switched off.
//! So that notification content is still visible there, adapters queue the
//! rendered message as a notice against the active request instead of
//! sending it; whatever serves the request drains the queue into the
//! response.

use std::sync::{Arc, Mutex};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A single user-facing notice.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub body: String,
}

/// Cheaply clonable notice queue shared across the adapters of one request.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    inner: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an informational notice.
    pub fn info(&self, body: impl Into<String>) {
        self.push(NoticeLevel::Info, body.into());
    }

    /// Queue a warning notice.
    pub fn warning(&self, body: impl Into<String>) {
        self.push(NoticeLevel::Warning, body.into());
    }

    fn push(&self, level: NoticeLevel, body: String) {
        let mut notices = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        notices.push(Notice { level, body });
    }

    /// Take every queued notice, leaving the queue empty.
    pub fn drain(&self) -> Vec<Notice> {
        let mut notices = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *notices)
    }

    pub fn is_empty(&self) -> bool {
        let notices = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        notices.is_empty()
    }
}
