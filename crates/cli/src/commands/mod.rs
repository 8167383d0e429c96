//! CLI command implementations.

use std::sync::Arc;

use tangerine_cart::{CartStore, JsonFileStore, UiAdapter};

use crate::config::CliConfig;

pub mod cart;
pub mod session;

/// Shared wiring for every command: a file-backed store presenting
/// through the console UI adapter.
pub struct Context {
    /// The cart store over the state file.
    pub store: CartStore<JsonFileStore>,
    /// Presentation layer the store emits into.
    pub ui: UiAdapter,
}

impl Context {
    /// Build the store and adapter from configuration.
    #[must_use]
    pub fn new(config: &CliConfig) -> Self {
        let ui = UiAdapter::new();
        let store = CartStore::new(
            JsonFileStore::new(&config.state_path),
            Arc::new(ui.clone()),
        );
        Self { store, ui }
    }
}
