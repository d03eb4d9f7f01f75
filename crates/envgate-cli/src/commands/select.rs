use envgate_core::{CatalogSession, EnvgateResult, Event};

use crate::commands::{drive, load_catalog, require_environment, Context};
use crate::output::format_success;

/// Execute the select command: store the selection and hand off to the
/// builder
pub async fn execute(ctx: &Context, name: String) -> EnvgateResult<()> {
    let signed_in = ctx.sign_in().await?;
    let handoff = ctx.handoff();
    let session = CatalogSession::new(&ctx.backends.directory, &handoff);

    let mut catalog = load_catalog(&session, signed_in.selection).await?;
    require_environment(&catalog, &name)?;

    let label = catalog
        .find(&name)
        .map(|env| env.label().to_string())
        .unwrap_or_else(|| name.clone());
    drive(&session, &mut catalog, Event::Select(name)).await?;

    println!("{}", format_success(&format!("Switched to {}", label)));
    Ok(())
}
