use envgate_core::{CatalogSession, EnvgateResult, Event};
use tracing::debug;

use crate::commands::{drive, load_catalog, Context};
use crate::output::{format_environment, format_info};

/// Execute the list command
pub async fn execute(ctx: &Context, search: Option<String>) -> EnvgateResult<()> {
    let signed_in = ctx.sign_in().await?;
    let handoff = ctx.handoff();
    let session = CatalogSession::new(&ctx.backends.directory, &handoff);

    let mut catalog = load_catalog(&session, signed_in.selection).await?;
    if let Some(query) = search {
        drive(&session, &mut catalog, Event::Search(query)).await?;
    }

    let visible = catalog.visible();
    debug!(
        "Showing {} of {} environment(s)",
        visible.len(),
        catalog.environments().len()
    );

    if catalog.environments().is_empty() {
        println!("{}", format_info("No environments yet. Create one with `envgate create <name>`"));
        return Ok(());
    }
    if visible.is_empty() {
        println!(
            "{}",
            format_info(&format!("No environments match \"{}\"", catalog.search().trim()))
        );
        return Ok(());
    }

    println!("Environments:");
    for env in visible {
        println!("{}", format_environment(env, catalog.is_selected(env)));
    }

    Ok(())
}
