//! Notices raised by commands, shown and dismissed by the UI.

use std::{any::Any, collections::VecDeque};

use linkup_states::{State, state_assign_impl};
use log::{info, warn};

use crate::error::{AdminError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    /// Set for notices produced from an [`AdminError`].
    pub error: Option<ErrorKind>,
}

/// Bounded queue of notices. The oldest is dropped once `capacity` is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notices {
    items: VecDeque<Notice>,
    capacity: usize,
    next_id: u64,
}

impl Default for Notices {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl Notices {
    pub const DEFAULT_CAPACITY: usize = 5;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_id: 0,
        }
    }

    fn push(&mut self, level: NoticeLevel, message: String, error: Option<ErrorKind>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(Notice {
            id,
            level,
            message,
            error,
        });
        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Info, message.into(), None)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        let message = message.into();
        info!("{message}");
        self.push(NoticeLevel::Success, message, None)
    }

    pub fn error(&mut self, err: &AdminError) -> u64 {
        warn!("{err}");
        self.push(NoticeLevel::Error, err.to_string(), Some(err.kind()))
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|notice| notice.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl State for Notices {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
