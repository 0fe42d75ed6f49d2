//! Bounded history of recent episode rewards.

use std::collections::VecDeque;

/// Last `capacity` episode rewards, for progress monitoring only.
///
/// Uses a FIFO strategy: when full, the oldest reward is dropped.
#[derive(Clone, Debug)]
pub struct RollingRewardWindow {
    rewards: VecDeque<f64>,
    capacity: usize,
    sum: f64,
}

impl RollingRewardWindow {
    /// Create an empty window.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Window capacity must be positive");
        Self {
            rewards: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
        }
    }

    /// Record an episode reward, evicting the oldest if full.
    pub fn push(&mut self, reward: f64) {
        if self.rewards.len() >= self.capacity {
            if let Some(old) = self.rewards.pop_front() {
                self.sum -= old;
            }
        }
        self.rewards.push_back(reward);
        self.sum += reward;
    }

    /// Number of rewards held.
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    /// Check if the window is empty.
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Check if the window holds `capacity` rewards.
    pub fn is_full(&self) -> bool {
        self.rewards.len() >= self.capacity
    }

    /// Mean of the rewards held, `None` when empty.
    pub fn average(&self) -> Option<f64> {
        if self.rewards.is_empty() {
            None
        } else {
            Some(self.sum / self.rewards.len() as f64)
        }
    }
}
