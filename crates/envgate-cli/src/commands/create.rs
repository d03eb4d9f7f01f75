use envgate_core::{CatalogSession, EnvgateResult, Event};
use tracing::info;

use crate::commands::{dialog_error, drive, load_catalog, Context};
use crate::output::format_success;

/// Execute the create command. The fresh environment becomes the selection
/// and is handed off to the builder.
pub async fn execute(ctx: &Context, display_name: String, description: Option<String>) -> EnvgateResult<()> {
    let signed_in = ctx.sign_in().await?;
    let handoff = ctx.handoff();
    let session = CatalogSession::new(&ctx.backends.directory, &handoff);

    // The loaded list backs the duplicate-name check
    let mut catalog = load_catalog(&session, signed_in.selection).await?;

    drive(&session, &mut catalog, Event::OpenCreate).await?;
    drive(&session, &mut catalog, Event::EditDisplayName(display_name)).await?;
    if let Some(description) = description {
        drive(&session, &mut catalog, Event::EditDescription(description)).await?;
    }
    let url = drive(&session, &mut catalog, Event::Submit).await?;

    if let Some(error) = dialog_error(&catalog) {
        return Err(error);
    }

    let name = catalog.selection().unwrap_or_default();
    println!("{}", format_success(&format!("Created environment {}", name)));
    if let Some(url) = url {
        info!("Builder opened at {}", url);
    }

    Ok(())
}
