use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default lifetime of a toast before it auto-dismisses.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(2500);

/// A transient, non-blocking, auto-dismissing user message.
///
/// Used for every "native function needed for ..." degradation path;
/// toasts never block and never require acknowledgement.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Toast {
    /// Creates a toast with the default TTL.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_ttl(message, DEFAULT_TOAST_TTL)
    }

    /// Creates a toast with an explicit TTL.
    pub fn with_ttl(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Returns `true` if this toast has exceeded its TTL at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= self.ttl
    }

    /// Returns `true` if this toast has exceeded its TTL.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// A bounded queue of toasts that auto-evicts expired entries.
#[derive(Debug)]
pub struct ToastQueue {
    items: VecDeque<Toast>,
    capacity: usize,
}

impl ToastQueue {
    /// Creates a new queue with the given maximum capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a toast, evicting expired entries first.
    /// If still at capacity after eviction, the oldest entry is removed.
    pub fn push(&mut self, toast: Toast) {
        self.evict_expired(Instant::now());
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(toast);
    }

    /// Returns all currently visible (non-expired) toasts.
    pub fn visible(&mut self) -> Vec<&Toast> {
        self.evict_expired(Instant::now());
        self.items.iter().collect()
    }

    /// Returns the number of toasts currently queued (including expired).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn evict_expired(&mut self, now: Instant) {
        self.items.retain(|t| !t.is_expired_at(now));
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_toast_is_visible() {
        let mut queue = ToastQueue::default();
        queue.push(Toast::new("Native function needed to browse storage."));
        let visible = queue.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(
            visible[0].message,
            "Native function needed to browse storage."
        );
    }

    #[test]
    fn expired_toast_is_evicted() {
        let mut queue = ToastQueue::default();
        queue.push(Toast::with_ttl("gone", Duration::ZERO));
        assert!(queue.visible().is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn expiry_is_relative_to_now() {
        let toast = Toast::new("msg");
        assert!(!toast.is_expired_at(toast.created_at));
        assert!(toast.is_expired_at(toast.created_at + DEFAULT_TOAST_TTL));
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut queue = ToastQueue::new(2);
        queue.push(Toast::new("first"));
        queue.push(Toast::new("second"));
        queue.push(Toast::new("third"));
        let visible = queue.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].message, "second");
        assert_eq!(visible[1].message, "third");
    }
}
