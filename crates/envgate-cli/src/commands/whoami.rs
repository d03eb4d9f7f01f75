use envgate_core::EnvgateResult;

use crate::commands::Context;
use crate::output::{format_info, format_user};

/// Execute the whoami command
pub async fn execute(ctx: &Context) -> EnvgateResult<()> {
    let signed_in = ctx.sign_in().await?;

    println!("{}", format_user(&signed_in.user));
    match signed_in.selection {
        Some(name) => println!("{}", format_info(&format!("Current environment: {}", name))),
        None => println!("{}", format_info("No environment selected")),
    }

    Ok(())
}
