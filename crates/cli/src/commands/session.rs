//! Session commands: login, logout, whoami.
//!
//! These stand in for the external auth flow, which in the browser writes
//! the session flag and profile from its own pages. There is no
//! credential check anywhere - the flag marks the user as "considered
//! logged in", nothing more.

use tangerine_cart::CartError;
use tangerine_core::UserProfile;

use super::Context;

/// Mark the session authenticated with the given display name.
///
/// # Errors
///
/// Returns `CartError` if the state file cannot be written.
pub fn login(ctx: &Context, name: &str, email: Option<String>) -> Result<(), CartError> {
    let mut profile = UserProfile::new(name);
    profile.email = email;
    ctx.store.log_in(&profile)?;
    #[allow(clippy::print_stdout)]
    {
        println!("Logged in as {}.", profile.first_name);
    }
    Ok(())
}

/// Clear the session flag and profile; the cart is kept.
///
/// # Errors
///
/// Returns `CartError` if the state file cannot be written.
pub fn logout(ctx: &Context) -> Result<(), CartError> {
    ctx.store.log_out()?;
    #[allow(clippy::print_stdout)]
    {
        println!("Logged out.");
    }
    Ok(())
}

/// Print the current profile, if the session has one.
///
/// # Errors
///
/// Returns `CartError` if the state file cannot be read.
pub fn whoami(ctx: &Context) -> Result<(), CartError> {
    let user = if ctx.store.is_authenticated()? {
        ctx.store.current_user()?
    } else {
        None
    };

    #[allow(clippy::print_stdout)]
    {
        match user {
            Some(profile) => match profile.email {
                Some(email) => println!("{} <{email}>", profile.first_name),
                None => println!("{}", profile.first_name),
            },
            None => println!("Not logged in."),
        }
    }
    Ok(())
}
