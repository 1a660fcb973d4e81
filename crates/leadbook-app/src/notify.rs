// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

pub trait Notifier {
    fn notify(&mut self, toast: Toast);

    fn success(&mut self, message: &str) {
        self.notify(Toast {
            level: ToastLevel::Success,
            message: message.to_owned(),
        });
    }

    fn error(&mut self, message: &str) {
        self.notify(Toast {
            level: ToastLevel::Error,
            message: message.to_owned(),
        });
    }
}

/// Collects toasts until the frontend drains them into its status line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ToastQueue {
    pending: Vec<Toast>,
}

impl ToastQueue {
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.pending)
    }

    pub fn last(&self) -> Option<&Toast> {
        self.pending.last()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, toast: Toast) {
        self.pending.push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::{Notifier, ToastLevel, ToastQueue};

    #[test]
    fn drain_returns_toasts_in_order_and_empties_queue() {
        let mut queue = ToastQueue::default();
        queue.success("Contact added");
        queue.error("Failed to delete contact");
        assert_eq!(queue.last().map(|toast| toast.level), Some(ToastLevel::Error));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "Contact added");
        assert!(queue.is_empty());
    }
}
