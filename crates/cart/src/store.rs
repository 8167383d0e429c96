//! The cart store: login-gated mutation over injected key-value storage.
//!
//! Every operation is a full read-modify-write against the store - the
//! in-memory cart is a transient copy, never cached across calls. The
//! sole mutation path is [`CartStore::persist_cart`], which writes the
//! whole cart and refreshes the badge from what was just persisted.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use tangerine_core::{CartLineItem, LineItemIdGenerator, Price, UserProfile};

use crate::error::Result;
use crate::events::{EventSink, UiEvent};
use crate::keys;
use crate::storage::KeyValueStore;

/// Delay before the simulated checkout-redirect notice fires.
pub const CHECKOUT_REDIRECT_DELAY: Duration = Duration::from_secs(1);

/// Result of a mutating cart operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The cart was mutated and persisted.
    Accepted,
    /// The operation was refused; the cart is untouched.
    Rejected(RejectReason),
}

/// Why a mutating operation was refused.
///
/// A rejection is a business outcome, not an error: the login prompt has
/// already been shown by the time the caller sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The session flag says the user is not authenticated.
    LoginRequired,
}

/// Login-gated cart over an injected [`KeyValueStore`] and [`EventSink`].
pub struct CartStore<S> {
    storage: S,
    events: Arc<dyn EventSink>,
    ids: LineItemIdGenerator,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store over the given storage and event sink.
    #[must_use]
    pub fn new(storage: S, events: Arc<dyn EventSink>) -> Self {
        Self {
            storage,
            events,
            ids: LineItemIdGenerator::new(),
        }
    }

    /// Create a store with an explicit ID generator (for tests).
    #[must_use]
    pub fn with_id_generator(
        storage: S,
        events: Arc<dyn EventSink>,
        ids: LineItemIdGenerator,
    ) -> Self {
        Self {
            storage,
            events,
            ids,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Whether the session flag marks the user as authenticated.
    ///
    /// True only when the flag holds exactly the marker value; absence or
    /// any other value reads as not authenticated. No side effects.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the store cannot be read.
    pub fn is_authenticated(&self) -> Result<bool> {
        let flag = self.storage.get(keys::USER_LOGGED_IN)?;
        Ok(flag.as_deref() == Some(keys::LOGGED_IN_MARKER))
    }

    /// The persisted user profile, if a readable one exists.
    ///
    /// Malformed data is treated as absent, not as an error.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the store cannot be read.
    pub fn current_user(&self) -> Result<Option<UserProfile>> {
        let Some(raw) = self.storage.get(keys::USER_DATA)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                debug!("unreadable user profile, treating as absent: {e}");
                Ok(None)
            }
        }
    }

    /// The persisted cart, empty if absent or unreadable.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the store cannot be read.
    pub fn load_cart(&self) -> Result<Vec<CartLineItem>> {
        let Some(raw) = self.storage.get(keys::CART_ITEMS)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("unreadable persisted cart, treating as empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Sum of quantities across the persisted cart.
    ///
    /// Recomputed from storage on every call so the badge can never
    /// drift from persisted state.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the store cannot be read.
    pub fn cart_count(&self) -> Result<u32> {
        Ok(self.load_cart()?.iter().map(|item| item.quantity).sum())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Persist the full cart, then refresh the badge.
    ///
    /// This is the sole mutation path; `add_item` and `order_now` both
    /// end here. The badge count is re-read from storage rather than
    /// taken from `items`, matching what any later `cart_count` returns.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the write fails (nothing is then
    /// durably recorded) or `CartError::Serialization` if the cart cannot
    /// be encoded.
    #[instrument(skip(self, items), fields(len = items.len()))]
    pub fn persist_cart(&self, items: &[CartLineItem]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.storage.set(keys::CART_ITEMS, &raw)?;

        let count = self.cart_count()?;
        self.events.emit(UiEvent::RefreshBadge { count });
        Ok(())
    }

    /// Add one unit of a product to the cart.
    ///
    /// Unauthenticated attempts show the login prompt and return
    /// [`AddOutcome::Rejected`] without touching the cart. Otherwise the
    /// item merges by exact name: an existing line gets its quantity
    /// bumped (price, image and timestamp stay frozen at first-add
    /// values); a new line starts at quantity 1 with a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the store cannot be read or
    /// written; the cart is unchanged in that case.
    #[instrument(skip(self, price, image))]
    pub fn add_item(
        &self,
        name: &str,
        price: Price,
        image: Option<String>,
    ) -> Result<AddOutcome> {
        if !self.is_authenticated()? {
            debug!("rejecting cart mutation: not authenticated");
            self.events.emit(UiEvent::ShowLoginPrompt);
            return Ok(AddOutcome::Rejected(RejectReason::LoginRequired));
        }

        let mut items = self.load_cart()?;
        let message = if let Some(existing) = items.iter_mut().find(|item| item.name == name) {
            existing.quantity += 1;
            debug!(quantity = existing.quantity, "merged into existing line");
            format!("{name} quantity updated in cart!")
        } else {
            items.push(CartLineItem::new(self.ids.next_id(), name, price, image));
            debug!("added new line");
            format!("{name} added to cart!")
        };

        self.events.emit(UiEvent::ShowNotification { message });
        self.persist_cart(&items)?;
        Ok(AddOutcome::Accepted)
    }

    /// Add a product and schedule the simulated checkout redirect.
    ///
    /// Delegates to [`Self::add_item`]; a rejection returns immediately
    /// (the login prompt has already been shown). On acceptance a
    /// deferred notification is scheduled after a fixed delay - a
    /// presentation effect only, with no cart mutation of its own.
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_item`].
    #[instrument(skip(self, price))]
    pub fn order_now(&self, name: &str, price: Price) -> Result<AddOutcome> {
        let outcome = self.add_item(name, price, None)?;
        if let AddOutcome::Rejected(reason) = outcome {
            return Ok(AddOutcome::Rejected(reason));
        }

        self.events.emit_after(
            CHECKOUT_REDIRECT_DELAY,
            UiEvent::ShowNotification {
                message: format!("{name} added to cart! Redirecting to checkout..."),
            },
        );
        Ok(outcome)
    }

    // =========================================================================
    // Session flag (external auth flow's writes, exposed for the harness)
    // =========================================================================

    /// Record an authenticated session with the given profile.
    ///
    /// This is the write the external auth flow performs; cart
    /// operations themselves only ever read the flag.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the store cannot be written.
    #[instrument(skip(self, profile), fields(first_name = %profile.first_name))]
    pub fn log_in(&self, profile: &UserProfile) -> Result<()> {
        let raw = serde_json::to_string(profile)?;
        self.storage.set(keys::USER_LOGGED_IN, keys::LOGGED_IN_MARKER)?;
        self.storage.set(keys::USER_DATA, &raw)?;
        info!("session marked authenticated");
        Ok(())
    }

    /// Clear the session flag and profile. The cart itself is kept.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the store cannot be written.
    #[instrument(skip(self))]
    pub fn log_out(&self) -> Result<()> {
        self.storage.remove(keys::USER_LOGGED_IN)?;
        self.storage.remove(keys::USER_DATA)?;
        info!("session cleared");
        Ok(())
    }

    // =========================================================================
    // Init hook
    // =========================================================================

    /// Page-load hook: refresh the badge and greet a known user.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the store cannot be read.
    pub fn bootstrap(&self) -> Result<()> {
        let count = self.cart_count()?;
        self.events.emit(UiEvent::RefreshBadge { count });

        if self.is_authenticated()?
            && let Some(profile) = self.current_user()?
        {
            info!("Welcome back, {}!", profile.first_name);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tangerine_core::LineItemIdGenerator;

    use super::*;
    use crate::error::CartError;
    use crate::events::RecordingSink;
    use crate::storage::{MemoryStore, StorageError};

    fn store() -> (CartStore<MemoryStore>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let store = CartStore::with_id_generator(
            MemoryStore::new(),
            sink.clone(),
            LineItemIdGenerator::with_seed(1),
        );
        (store, sink)
    }

    fn authed_store() -> (CartStore<MemoryStore>, Arc<RecordingSink>) {
        let (store, sink) = store();
        store.log_in(&UserProfile::new("Ada")).unwrap();
        (store, sink)
    }

    fn price(cents: i64) -> Price {
        Price::from_cents(cents)
    }

    #[test]
    fn test_absent_flag_is_not_authenticated() {
        let (store, _) = store();
        assert!(!store.is_authenticated().unwrap());
    }

    #[test]
    fn test_only_exact_marker_authenticates() {
        let (store, _) = store();
        for value in ["TRUE", "True", "1", "yes", ""] {
            store.storage.set(keys::USER_LOGGED_IN, value).unwrap();
            assert!(!store.is_authenticated().unwrap(), "{value:?}");
        }
        store.storage.set(keys::USER_LOGGED_IN, "true").unwrap();
        assert!(store.is_authenticated().unwrap());
    }

    #[test]
    fn test_add_new_item_appends_with_quantity_one() {
        let (store, _) = authed_store();

        let outcome = store.add_item("Burger", price(599), None).unwrap();
        assert_eq!(outcome, AddOutcome::Accepted);

        let items = store.load_cart().unwrap();
        assert_eq!(items.len(), 1);
        let burger = items.first().unwrap();
        assert_eq!(burger.name, "Burger");
        assert_eq!(burger.price, price(599));
        assert_eq!(burger.quantity, 1);
        assert_eq!(store.cart_count().unwrap(), 1);
    }

    #[test]
    fn test_repeat_add_merges_and_freezes_first_add_fields() {
        let (store, _) = authed_store();
        store
            .add_item("Burger", price(599), Some("burger.png".to_owned()))
            .unwrap();
        let first = store.load_cart().unwrap().first().unwrap().clone();

        // Repeat add with a different price: the snapshot must win.
        store.add_item("Burger", price(799), None).unwrap();

        let items = store.load_cart().unwrap();
        assert_eq!(items.len(), 1);
        let burger = items.first().unwrap();
        assert_eq!(burger.quantity, 2);
        assert_eq!(burger.price, first.price);
        assert_eq!(burger.image, first.image);
        assert_eq!(burger.added_at, first.added_at);
        assert_eq!(burger.id, first.id);
        assert_eq!(store.cart_count().unwrap(), 2);
    }

    #[test]
    fn test_merge_is_case_sensitive() {
        let (store, _) = authed_store();
        store.add_item("Burger", price(599), None).unwrap();
        store.add_item("burger", price(599), None).unwrap();
        assert_eq!(store.load_cart().unwrap().len(), 2);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let (store, _) = authed_store();
        store.add_item("Burger", price(599), None).unwrap();
        store.add_item("Pizza", price(999), None).unwrap();
        store.add_item("Burger", price(599), None).unwrap();

        let names: Vec<_> = store
            .load_cart()
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, ["Burger", "Pizza"]);
    }

    #[test]
    fn test_unauthenticated_add_is_rejected_without_mutation() {
        let (store, sink) = store();

        let outcome = store.add_item("Burger", price(599), None).unwrap();
        assert_eq!(
            outcome,
            AddOutcome::Rejected(RejectReason::LoginRequired)
        );
        assert!(store.load_cart().unwrap().is_empty());
        assert_eq!(sink.login_prompts(), 1);
        // No notification and no badge refresh were emitted.
        assert_eq!(sink.events(), vec![UiEvent::ShowLoginPrompt]);
    }

    #[test]
    fn test_unauthenticated_add_leaves_existing_cart_alone() {
        let (store, _) = authed_store();
        store.add_item("Burger", price(599), None).unwrap();
        let before = store.load_cart().unwrap();

        store.log_out().unwrap();
        let outcome = store.add_item("Pizza", price(999), None).unwrap();
        assert_eq!(
            outcome,
            AddOutcome::Rejected(RejectReason::LoginRequired)
        );
        assert_eq!(store.load_cart().unwrap(), before);
    }

    #[test]
    fn test_persist_then_load_round_trips() {
        let (store, _) = authed_store();
        store
            .add_item("Burger", price(599), Some("burger.png".to_owned()))
            .unwrap();
        store.add_item("Pizza", price(999), None).unwrap();
        let items = store.load_cart().unwrap();

        store.persist_cart(&items).unwrap();
        assert_eq!(store.load_cart().unwrap(), items);
    }

    #[test]
    fn test_malformed_cart_loads_as_empty() {
        let (store, _) = authed_store();
        store.storage.set(keys::CART_ITEMS, "{not json").unwrap();
        assert!(store.load_cart().unwrap().is_empty());
        assert_eq!(store.cart_count().unwrap(), 0);
    }

    #[test]
    fn test_malformed_profile_reads_as_absent() {
        let (store, _) = store();
        store.storage.set(keys::USER_DATA, "42").unwrap();
        assert_eq!(store.current_user().unwrap(), None);
    }

    #[test]
    fn test_badge_refresh_follows_every_mutation() {
        let (store, sink) = authed_store();
        store.add_item("Burger", price(599), None).unwrap();
        store.add_item("Burger", price(599), None).unwrap();
        assert_eq!(sink.last_badge_count(), Some(2));
    }

    #[test]
    fn test_notification_text_distinguishes_add_from_merge() {
        let (store, sink) = authed_store();
        store.add_item("Burger", price(599), None).unwrap();
        store.add_item("Burger", price(599), None).unwrap();

        let messages: Vec<_> = sink
            .events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::ShowNotification { message } => Some(message),
                _ => None,
            })
            .collect();
        assert_eq!(
            messages,
            [
                "Burger added to cart!",
                "Burger quantity updated in cart!"
            ]
        );
    }

    #[test]
    fn test_order_now_adds_and_schedules_deferred_notice() {
        let (store, sink) = authed_store();

        let outcome = store.order_now("Pizza", price(999)).unwrap();
        assert_eq!(outcome, AddOutcome::Accepted);

        let items = store.load_cart().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().name, "Pizza");
        assert_eq!(items.first().unwrap().quantity, 1);

        let deferred: Vec<_> = sink
            .recorded()
            .into_iter()
            .filter(|r| r.delay.is_some())
            .collect();
        assert_eq!(deferred.len(), 1);
        assert_eq!(deferred.first().unwrap().delay, Some(CHECKOUT_REDIRECT_DELAY));
        assert!(matches!(
            &deferred.first().unwrap().event,
            UiEvent::ShowNotification { message }
                if message == "Pizza added to cart! Redirecting to checkout..."
        ));
    }

    #[test]
    fn test_order_now_rejected_schedules_nothing() {
        let (store, sink) = store();
        let outcome = store.order_now("Pizza", price(999)).unwrap();
        assert_eq!(
            outcome,
            AddOutcome::Rejected(RejectReason::LoginRequired)
        );
        assert!(sink.recorded().iter().all(|r| r.delay.is_none()));
        assert_eq!(sink.login_prompts(), 1);
    }

    #[test]
    fn test_bootstrap_refreshes_badge() {
        let (store, _) = authed_store();
        store.add_item("Burger", price(599), None).unwrap();

        let fresh_sink = Arc::new(RecordingSink::new());
        let reopened = CartStore::new(store.storage, fresh_sink.clone() as Arc<dyn EventSink>);
        reopened.bootstrap().unwrap();
        assert_eq!(fresh_sink.last_badge_count(), Some(1));
    }

    #[test]
    fn test_log_in_then_out_round_trips_profile() {
        let (store, _) = store();
        let profile = UserProfile::new("Ada");
        store.log_in(&profile).unwrap();
        assert!(store.is_authenticated().unwrap());
        assert_eq!(store.current_user().unwrap(), Some(profile));

        store.log_out().unwrap();
        assert!(!store.is_authenticated().unwrap());
        assert_eq!(store.current_user().unwrap(), None);
    }

    #[test]
    fn test_storage_failure_surfaces_as_error() {
        struct BrokenStore;
        impl KeyValueStore for BrokenStore {
            fn get(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
                Err(StorageError::Unavailable("storage disabled".to_owned()))
            }
            fn set(&self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
                Err(StorageError::Unavailable("storage disabled".to_owned()))
            }
            fn remove(&self, _key: &str) -> std::result::Result<(), StorageError> {
                Err(StorageError::Unavailable("storage disabled".to_owned()))
            }
        }

        let sink = Arc::new(RecordingSink::new());
        let store = CartStore::new(BrokenStore, sink as Arc<dyn EventSink>);
        let err = store.add_item("Burger", price(599), None).unwrap_err();
        assert!(matches!(err, CartError::Storage(_)));
    }
}
