//! Per-channel advisory locks for lifecycle-mutating operations.
//!
//! Discord delivers component interactions concurrently, so two confirmed
//! closes (or a close racing a claim) can target the same channel at once.
//! Holding the channel's lock for the duration of a mutation serializes them;
//! a second caller gets `None` back immediately and reports the ticket busy
//! instead of queueing.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

/// Advisory lock set keyed by ticket channel id.
///
/// Cloning is cheap and shares the underlying set.
#[derive(Clone, Default)]
pub struct ChannelLocks {
    held: Arc<Mutex<HashSet<u64>>>,
}

impl ChannelLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to acquire the lock for a channel.
    ///
    /// Non-blocking: if the channel is already locked the caller should treat
    /// the ticket as busy rather than wait.
    ///
    /// # Arguments
    /// - `channel_id` - Discord's unique identifier for the ticket channel
    ///
    /// # Returns
    /// - `Some(ChannelLockGuard)` - Lock acquired, released on drop
    /// - `None` - Another operation holds the lock
    pub fn try_acquire(&self, channel_id: u64) -> Option<ChannelLockGuard> {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());

        if held.insert(channel_id) {
            Some(ChannelLockGuard {
                held: self.held.clone(),
                channel_id,
            })
        } else {
            None
        }
    }
}

/// Guard releasing the channel lock when dropped.
pub struct ChannelLockGuard {
    held: Arc<Mutex<HashSet<u64>>>,
    channel_id: u64,
}

impl Drop for ChannelLockGuard {
    fn drop(&mut self) {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        held.remove(&self.channel_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A held lock blocks a second acquisition until dropped.
    #[test]
    fn second_acquire_fails_until_release() {
        let locks = ChannelLocks::new();

        let guard = locks.try_acquire(100).unwrap();
        assert!(locks.try_acquire(100).is_none());

        drop(guard);
        assert!(locks.try_acquire(100).is_some());
    }

    /// Locks on different channels are independent.
    #[test]
    fn channels_are_independent() {
        let locks = ChannelLocks::new();

        let _first = locks.try_acquire(100).unwrap();
        assert!(locks.try_acquire(101).is_some());
    }

    /// Clones share the same lock set.
    #[test]
    fn clones_share_state() {
        let locks = ChannelLocks::new();
        let cloned = locks.clone();

        let _guard = locks.try_acquire(100).unwrap();
        assert!(cloned.try_acquire(100).is_none());
    }
}
