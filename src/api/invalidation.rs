use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::render::Renderer;

use super::GanttEngine;

/// What made the next frame necessary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    General,
    Data,
    Viewport,
    Transform,
    Rows,
    Selection,
    Style,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::General => 1 << 0,
            Self::Data => 1 << 1,
            Self::Viewport => 1 << 2,
            Self::Transform => 1 << 3,
            Self::Rows => 1 << 4,
            Self::Selection => 1 << 5,
            Self::Style => 1 << 6,
        }
    }
}

/// Set of pending invalidation topics, cleared by each render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvalidationMask {
    bits: u8,
}

impl InvalidationMask {
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn with(self, topic: InvalidationTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    pub fn insert(&mut self, topic: InvalidationTopic) {
        self.bits |= topic.bit();
    }

    #[must_use]
    pub const fn contains(self, topic: InvalidationTopic) -> bool {
        self.bits & topic.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }
}

impl<R: Renderer> GanttEngine<R> {
    /// Marks the next `render_if_needed` call as necessary.
    pub fn invalidate(&mut self) {
        self.invalidate_topic(InvalidationTopic::General);
    }

    pub(super) fn invalidate_topic(&mut self, topic: InvalidationTopic) {
        trace!(?topic, "invalidate");
        self.core.runtime.pending_invalidation.insert(topic);
    }

    #[must_use]
    pub fn has_pending_invalidation(&self) -> bool {
        !self.core.runtime.pending_invalidation.is_empty()
    }

    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationMask {
        self.core.runtime.pending_invalidation
    }

    pub fn clear_pending_invalidation(&mut self) {
        self.core.runtime.pending_invalidation = InvalidationMask::empty();
    }
}
