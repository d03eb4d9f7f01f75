use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use envgate_core::{CatalogSession, EnvgateError, EnvgateResult, Event};

use crate::commands::{dialog_error, drive, load_catalog, require_environment, Context};
use crate::output::{format_info, format_success};

/// Execute the delete command
pub async fn execute(ctx: &Context, name: String, yes: bool) -> EnvgateResult<()> {
    let signed_in = ctx.sign_in().await?;
    let handoff = ctx.handoff();
    let session = CatalogSession::new(&ctx.backends.directory, &handoff);

    let mut catalog = load_catalog(&session, signed_in.selection).await?;
    require_environment(&catalog, &name)?;

    if !yes && !confirm_delete(&name)? {
        println!("{}", format_info("Delete cancelled"));
        return Ok(());
    }

    drive(&session, &mut catalog, Event::OpenEdit(name.clone())).await?;
    drive(&session, &mut catalog, Event::Delete).await?;

    if let Some(error) = dialog_error(&catalog) {
        return Err(error);
    }

    println!("{}", format_success(&format!("Deleted environment {}", name)));
    Ok(())
}

pub(crate) fn confirm_delete(name: &str) -> EnvgateResult<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete environment {}? This cannot be undone", name))
        .default(false)
        .interact()
        .map_err(|e| EnvgateError::other(format!("Prompt failed: {}", e)))
}
