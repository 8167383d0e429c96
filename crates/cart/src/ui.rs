//! Presentation adapter over the UI event surface.
//!
//! Models the visible widgets as plain state: the login prompt (shown or
//! hidden), the stack of visible notifications, and the badge count.
//! Rendering is tracing output here; the state accessors exist so the
//! surrounding program (and tests) can inspect what is on screen.
//!
//! Timers are owned, not fire-and-forget: every scheduled task's handle
//! is retained and aborted when the adapter is torn down, so nothing
//! fires into a dismantled UI.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::events::{EventSink, UiEvent};

/// How long a notification stays visible before auto-dismissing.
const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

/// Login prompt visibility.
///
/// `Shown -> Hidden` only on explicit dismissal; a second show request
/// while already shown is a no-op, so prompts never stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptState {
    Hidden,
    Shown,
}

/// Presentation layer for cart UI events.
///
/// Cheaply cloneable; clones share the same widget state and timer set.
/// Requires a tokio runtime for the notification and deferred-delivery
/// timers.
#[derive(Clone)]
pub struct UiAdapter {
    inner: Arc<AdapterInner>,
}

struct AdapterInner {
    // Weak self-reference so timer tasks never keep the adapter alive.
    weak: Weak<AdapterInner>,
    prompt: Mutex<PromptState>,
    notifications: Mutex<Vec<String>>,
    badge: Mutex<Option<u32>>,
    timers: Mutex<Vec<JoinHandle<()>>>,
}

impl UiAdapter {
    /// Create an adapter with nothing on screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new_cyclic(|weak| AdapterInner {
                weak: weak.clone(),
                prompt: Mutex::new(PromptState::Hidden),
                notifications: Mutex::new(Vec::new()),
                badge: Mutex::new(None),
                timers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Whether the login prompt is currently shown.
    #[must_use]
    pub fn prompt_shown(&self) -> bool {
        *self.inner.prompt.lock().expect("prompt lock poisoned") == PromptState::Shown
    }

    /// Dismiss the login prompt (close button, click outside, or
    /// navigation away). Never touches cart state.
    pub fn dismiss_prompt(&self) {
        let mut prompt = self.inner.prompt.lock().expect("prompt lock poisoned");
        if *prompt == PromptState::Shown {
            *prompt = PromptState::Hidden;
            info!("login prompt dismissed");
        }
    }

    /// Messages currently visible, oldest first.
    #[must_use]
    pub fn active_notifications(&self) -> Vec<String> {
        self.inner
            .notifications
            .lock()
            .expect("notifications lock poisoned")
            .clone()
    }

    /// The badge count, `None` when the badge is hidden.
    #[must_use]
    pub fn badge(&self) -> Option<u32> {
        *self.inner.badge.lock().expect("badge lock poisoned")
    }

    /// Cancel every pending timer. Called automatically on teardown.
    pub fn shutdown(&self) {
        self.inner.abort_timers();
    }
}

impl Default for UiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for UiAdapter {
    fn emit(&self, event: UiEvent) {
        self.inner.present(event);
    }

    fn emit_after(&self, delay: Duration, event: UiEvent) {
        let weak = self.inner.weak.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.present(event);
            }
        });
        self.inner.retain(handle);
    }
}

impl AdapterInner {
    fn present(&self, event: UiEvent) {
        match event {
            UiEvent::ShowLoginPrompt => {
                let mut prompt = self.prompt.lock().expect("prompt lock poisoned");
                if *prompt == PromptState::Shown {
                    debug!("login prompt already shown, ignoring");
                    return;
                }
                *prompt = PromptState::Shown;
                info!("Login required: log in or sign up to add items to your cart");
            }
            UiEvent::ShowNotification { message } => {
                info!("{message}");
                self.notifications
                    .lock()
                    .expect("notifications lock poisoned")
                    .push(message.clone());
                self.schedule_dismiss(message);
            }
            UiEvent::RefreshBadge { count } => {
                let mut badge = self.badge.lock().expect("badge lock poisoned");
                *badge = if count == 0 { None } else { Some(count) };
                debug!(count, "badge refreshed");
            }
        }
    }

    fn schedule_dismiss(&self, message: String) {
        let weak = self.weak.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(NOTIFICATION_DURATION).await;
            if let Some(inner) = weak.upgrade() {
                let mut notifications = inner
                    .notifications
                    .lock()
                    .expect("notifications lock poisoned");
                if let Some(pos) = notifications.iter().position(|m| *m == message) {
                    notifications.remove(pos);
                    debug!("notification dismissed");
                }
            }
        });
        self.retain(handle);
    }

    /// Keep a timer handle, pruning any that already finished.
    fn retain(&self, handle: JoinHandle<()>) {
        let mut timers = self.timers.lock().expect("timers lock poisoned");
        timers.retain(|h| !h.is_finished());
        timers.push(handle);
    }

    fn abort_timers(&self) {
        let mut timers = self.timers.lock().expect("timers lock poisoned");
        for handle in timers.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for AdapterInner {
    fn drop(&mut self) {
        self.abort_timers();
    }
}
