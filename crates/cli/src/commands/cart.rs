//! Cart commands: add, order, show, count.

use std::time::Duration;

use rust_decimal::Decimal;

use tangerine_cart::{AddOutcome, CartError, CHECKOUT_REDIRECT_DELAY};
use tangerine_core::Price;

use super::Context;

/// Add one unit of a product to the cart.
///
/// # Errors
///
/// Returns `CartError` if the state file cannot be read or written.
pub fn add(
    ctx: &Context,
    name: &str,
    price: Decimal,
    image: Option<String>,
) -> Result<(), CartError> {
    let outcome = ctx.store.add_item(name, Price::new(price), image)?;
    report(ctx, outcome);
    Ok(())
}

/// Add a product and wait out the simulated checkout redirect.
///
/// # Errors
///
/// Returns `CartError` if the state file cannot be read or written.
pub async fn order(ctx: &Context, name: &str, price: Decimal) -> Result<(), CartError> {
    let outcome = ctx.store.order_now(name, Price::new(price))?;
    if outcome == AddOutcome::Accepted {
        // Give the deferred checkout notice time to present itself.
        tokio::time::sleep(CHECKOUT_REDIRECT_DELAY + Duration::from_millis(100)).await;
    }
    report(ctx, outcome);
    Ok(())
}

/// List the cart contents.
///
/// # Errors
///
/// Returns `CartError` if the state file cannot be read.
pub fn show(ctx: &Context) -> Result<(), CartError> {
    let items = ctx.store.load_cart()?;
    #[allow(clippy::print_stdout)]
    {
        if items.is_empty() {
            println!("Your cart is empty.");
        } else {
            for item in &items {
                println!(
                    "{:>3} x {}  @ {}  = {}",
                    item.quantity,
                    item.name,
                    item.price,
                    item.line_total()
                );
            }
            println!("Total items: {}", ctx.store.cart_count()?);
        }
    }
    Ok(())
}

/// Print the badge count.
///
/// # Errors
///
/// Returns `CartError` if the state file cannot be read.
pub fn count(ctx: &Context) -> Result<(), CartError> {
    let count = ctx.store.cart_count()?;
    #[allow(clippy::print_stdout)]
    {
        println!("{count}");
    }
    Ok(())
}

fn report(ctx: &Context, outcome: AddOutcome) {
    if let AddOutcome::Rejected(reason) = outcome {
        tracing::warn!(?reason, "cart unchanged");
        // The prompt is on screen; in a browser it stays until dismissed.
        // A CLI run ends here, which counts as navigating away.
        ctx.ui.dismiss_prompt();
    }
}
