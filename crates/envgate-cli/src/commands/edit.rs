use envgate_core::{CatalogSession, EnvgateError, EnvgateResult, Event};

use crate::commands::{dialog_error, drive, load_catalog, require_environment, Context};
use crate::output::format_success;

/// Execute the edit command. Fields left out keep their current values.
pub async fn execute(
    ctx: &Context,
    name: String,
    display_name: Option<String>,
    description: Option<String>,
) -> EnvgateResult<()> {
    if display_name.is_none() && description.is_none() {
        return Err(EnvgateError::validation(
            "Nothing to change, pass --display-name or --description",
        ));
    }

    let signed_in = ctx.sign_in().await?;
    let handoff = ctx.handoff();
    let session = CatalogSession::new(&ctx.backends.directory, &handoff);

    let mut catalog = load_catalog(&session, signed_in.selection).await?;
    require_environment(&catalog, &name)?;

    drive(&session, &mut catalog, Event::OpenEdit(name.clone())).await?;
    if let Some(display_name) = display_name {
        drive(&session, &mut catalog, Event::EditDisplayName(display_name)).await?;
    }
    if let Some(description) = description {
        drive(&session, &mut catalog, Event::EditDescription(description)).await?;
    }
    drive(&session, &mut catalog, Event::Submit).await?;

    if let Some(error) = dialog_error(&catalog) {
        return Err(error);
    }

    let label = catalog.find(&name).map(|env| env.label().to_string()).unwrap_or(name);
    println!("{}", format_success(&format!("Updated environment {}", label)));
    Ok(())
}
