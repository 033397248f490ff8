//! Transient user-visible notice (toast) state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards post the "not authorized" notice here when a signed-in user
//! is bounced off a route their role may not open.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

pub const NOT_AUTHORIZED_MESSAGE: &str = "You are not authorized to view that page.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Monotonic id so a delayed dismiss only clears its own notice.
    pub id: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    pub current: Option<Notice>,
    next_id: u64,
}

impl NoticeState {
    /// Replace the current notice; returns its id.
    pub fn show(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.current = Some(Notice { kind, message: message.into(), id: self.next_id });
        self.next_id
    }

    pub fn not_authorized(&mut self) -> u64 {
        self.show(NoticeKind::Warning, NOT_AUTHORIZED_MESSAGE)
    }

    /// Clear the notice only if it is still `id`.
    pub fn dismiss(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
        }
    }
}
