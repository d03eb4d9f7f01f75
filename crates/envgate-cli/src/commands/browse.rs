//! Interactive catalog: pick, search, create and edit environments from a
//! terminal menu. Every user action is an event fed to the catalog reducer.

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use url::Url;

use envgate_core::catalog::Dialog;
use envgate_core::{Catalog, CatalogSession, DialogMode, EnvgateError, EnvgateResult, Event, ListPhase};

use crate::commands::delete::confirm_delete;
use crate::commands::{drive, Context};
use crate::output::{format_error, format_info, format_success, format_user};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Search,
    Create,
    Edit,
    Refresh,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 5] = [
        MenuAction::Search,
        MenuAction::Create,
        MenuAction::Edit,
        MenuAction::Refresh,
        MenuAction::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuAction::Search => "Search...",
            MenuAction::Create => "New environment...",
            MenuAction::Edit => "Edit environment...",
            MenuAction::Refresh => "Refresh",
            MenuAction::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogAction {
    Save,
    Delete,
    Cancel,
}

impl DialogAction {
    fn for_dialog(dialog: &Dialog) -> Vec<DialogAction> {
        if dialog.is_edit() {
            vec![DialogAction::Save, DialogAction::Delete, DialogAction::Cancel]
        } else {
            vec![DialogAction::Save, DialogAction::Cancel]
        }
    }

    fn label(self) -> &'static str {
        match self {
            DialogAction::Save => "Save",
            DialogAction::Delete => "Delete",
            DialogAction::Cancel => "Cancel",
        }
    }
}

fn prompt_error(e: dialoguer::Error) -> EnvgateError {
    EnvgateError::other(format!("Prompt failed: {}", e))
}

fn menu_row(catalog: &Catalog, name: &str, label: &str) -> String {
    let marker = if catalog.selection() == Some(name) { "*" } else { " " };
    format!("{} {} {}", marker, label, style(format!("({})", name)).dim())
}

/// Execute the browse command
pub async fn execute(ctx: &Context) -> EnvgateResult<()> {
    let signed_in = ctx.sign_in().await?;
    println!("{}", format_user(&signed_in.user));

    let handoff = ctx.handoff();
    let session = CatalogSession::new(&ctx.backends.directory, &handoff);
    let theme = ColorfulTheme::default();

    let mut catalog = Catalog::new(signed_in.selection);
    drive(&session, &mut catalog, Event::Mount).await?;

    loop {
        if let ListPhase::Failed(message) = catalog.phase() {
            eprintln!("{}", format_error(message));
            let retry = Confirm::with_theme(&theme)
                .with_prompt("Retry?")
                .default(true)
                .interact()
                .map_err(prompt_error)?;
            if !retry {
                return Ok(());
            }
            drive(&session, &mut catalog, Event::Retry).await?;
            continue;
        }

        let visible: Vec<(String, String)> = catalog
            .visible()
            .into_iter()
            .map(|env| (env.name.clone(), env.label().to_string()))
            .collect();

        let mut items: Vec<String> = visible
            .iter()
            .map(|(name, label)| menu_row(&catalog, name, label))
            .collect();
        items.extend(MenuAction::ALL.iter().map(|action| action.label().to_string()));

        let prompt = if catalog.search().trim().is_empty() {
            format!("Environments ({})", catalog.environments().len())
        } else {
            format!(
                "Environments matching \"{}\" ({} of {})",
                catalog.search().trim(),
                visible.len(),
                catalog.environments().len()
            )
        };

        let choice = Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        if let Some((name, label)) = visible.get(choice) {
            if drive(&session, &mut catalog, Event::Select(name.clone())).await?.is_some() {
                println!("{}", format_success(&format!("Switched to {}", label)));
                return Ok(());
            }
            continue;
        }

        match MenuAction::ALL[choice - visible.len()] {
            MenuAction::Search => {
                let query: String = Input::with_theme(&theme)
                    .with_prompt("Search")
                    .with_initial_text(catalog.search().to_string())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_error)?;
                drive(&session, &mut catalog, Event::Search(query)).await?;
            }
            MenuAction::Create => {
                drive(&session, &mut catalog, Event::OpenCreate).await?;
                if let Some(url) = run_dialog(&session, &mut catalog, &theme).await? {
                    println!("{}", format_success(&format!("Created environment, opened {}", url)));
                    return Ok(());
                }
            }
            MenuAction::Edit => {
                if visible.is_empty() {
                    println!("{}", format_info("Nothing to edit"));
                    continue;
                }
                let labels: Vec<String> = visible
                    .iter()
                    .map(|(name, label)| menu_row(&catalog, name, label))
                    .collect();
                let index = Select::with_theme(&theme)
                    .with_prompt("Edit which environment?")
                    .items(&labels)
                    .default(0)
                    .interact()
                    .map_err(prompt_error)?;
                drive(&session, &mut catalog, Event::OpenEdit(visible[index].0.clone())).await?;
                run_dialog(&session, &mut catalog, &theme).await?;
            }
            MenuAction::Refresh => {
                drive(&session, &mut catalog, Event::Retry).await?;
            }
            MenuAction::Quit => return Ok(()),
        }
    }
}

/// Prompt for the dialog fields until the dialog closes. Returns the handoff
/// URL when saving created an environment.
async fn run_dialog(
    session: &CatalogSession<'_>,
    catalog: &mut Catalog,
    theme: &ColorfulTheme,
) -> EnvgateResult<Option<Url>> {
    while let Some(dialog) = catalog.dialog().as_open().cloned() {
        if let Some(message) = &dialog.validation_error {
            eprintln!("{}", format_error(message));
        }

        let display_name: String = Input::with_theme(theme)
            .with_prompt("Name")
            .with_initial_text(dialog.draft.display_name.clone())
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        drive(session, catalog, Event::EditDisplayName(display_name)).await?;

        let description: String = Input::with_theme(theme)
            .with_prompt("Description")
            .with_initial_text(dialog.draft.description.clone())
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        drive(session, catalog, Event::EditDescription(description)).await?;

        let actions = DialogAction::for_dialog(&dialog);
        let labels: Vec<&str> = actions.iter().map(|action| action.label()).collect();
        let index = Select::with_theme(theme)
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match actions[index] {
            DialogAction::Save => {
                if let Some(url) = drive(session, catalog, Event::Submit).await? {
                    return Ok(Some(url));
                }
            }
            DialogAction::Delete => {
                let name = match &dialog.mode {
                    DialogMode::Edit(env) => env.name.clone(),
                    DialogMode::Create => continue,
                };
                if confirm_delete(&name)? {
                    drive(session, catalog, Event::Delete).await?;
                }
            }
            DialogAction::Cancel => {
                drive(session, catalog, Event::Cancel).await?;
            }
        }
    }
    Ok(None)
}
