use envgate_core::{EnvgateError, EnvgateResult, IdentityBackend, SelectionStore};
use tracing::info;

use crate::commands::Context;
use crate::output::format_success;

/// Execute the logout command. The stored selection belongs to the session
/// and is cleared with it.
pub async fn execute(ctx: &Context) -> EnvgateResult<()> {
    let signed_in = ctx.sign_in().await?;

    if !ctx.backends.identity.logout().await {
        return Err(EnvgateError::auth("Sign-out was not acknowledged by the server"));
    }
    ctx.store.clear()?;

    info!("Signed out {}", signed_in.user.email);
    println!("{}", format_success("Signed out"));
    Ok(())
}
