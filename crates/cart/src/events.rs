//! UI event surface.
//!
//! The store emits abstract events; a presentation layer (the
//! [`crate::ui::UiAdapter`], or a test double) decides what they look
//! like. This keeps cart state and persistence free of any rendering
//! concern.

use std::sync::Mutex;
use std::time::Duration;

/// An abstract UI side effect emitted by cart operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A mutating operation was attempted while unauthenticated. The
    /// prompt offers navigation to login/signup and must be dismissible
    /// without touching cart state.
    ShowLoginPrompt,
    /// Transient message, auto-dismissed by the presentation layer.
    ShowNotification {
        /// Human-readable message text.
        message: String,
    },
    /// Update the visible cart counter; hidden when the count is 0.
    RefreshBadge {
        /// Sum of quantities across the persisted cart.
        count: u32,
    },
}

/// Receiver for UI events.
///
/// `emit` delivers immediately; `emit_after` schedules delivery after a
/// delay (the simulated checkout redirect uses this). How - and whether -
/// the delay is realized is up to the implementation; the default falls
/// back to immediate delivery, which is what test doubles usually want.
pub trait EventSink: Send + Sync {
    /// Deliver an event now.
    fn emit(&self, event: UiEvent);

    /// Deliver an event after `delay`.
    fn emit_after(&self, delay: Duration, event: UiEvent) {
        let _ = delay;
        self.emit(event);
    }
}

/// One event as seen by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    /// The event itself.
    pub event: UiEvent,
    /// The requested delay, `None` for immediate delivery.
    pub delay: Option<Duration>,
}

/// Test double that records every event instead of presenting it.
#[derive(Debug, Default)]
pub struct RecordingSink {
    recorded: Mutex<Vec<RecordedEvent>>,
}

impl RecordingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, in emission order.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked.
    #[must_use]
    pub fn recorded(&self) -> Vec<RecordedEvent> {
        self.recorded
            .lock()
            .expect("recording sink lock poisoned")
            .clone()
    }

    /// Events only, dropping the delay markers.
    #[must_use]
    pub fn events(&self) -> Vec<UiEvent> {
        self.recorded().into_iter().map(|r| r.event).collect()
    }

    /// How many login prompts were requested.
    #[must_use]
    pub fn login_prompts(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, UiEvent::ShowLoginPrompt))
            .count()
    }

    /// The most recent badge count, if any badge refresh was emitted.
    #[must_use]
    pub fn last_badge_count(&self) -> Option<u32> {
        self.events().into_iter().rev().find_map(|e| match e {
            UiEvent::RefreshBadge { count } => Some(count),
            _ => None,
        })
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: UiEvent) {
        self.recorded
            .lock()
            .expect("recording sink lock poisoned")
            .push(RecordedEvent { event, delay: None });
    }

    fn emit_after(&self, delay: Duration, event: UiEvent) {
        self.recorded
            .lock()
            .expect("recording sink lock poisoned")
            .push(RecordedEvent {
                event,
                delay: Some(delay),
            });
    }
}
