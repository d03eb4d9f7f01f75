//! Output formatting utilities for CLI

use console::style;
use envgate_core::{ComponentCategory, Environment, User};

/// Disable styling when `NO_COLOR` is set to a non-empty value
pub fn init_colors() {
    if std::env::var_os("NO_COLOR").map_or(false, |v| !v.is_empty()) {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

/// Format an environment for display. The selected environment is marked
/// with `*`.
pub fn format_environment(env: &Environment, selected: bool) -> String {
    let marker = if selected {
        style("*").green().bold().to_string()
    } else {
        " ".to_string()
    };

    let mut line = format!(
        "{} {} {}",
        marker,
        style(env.label()).bold(),
        style(format!("({})", env.name)).dim()
    );

    if !env.description().is_empty() {
        line.push_str(&format!("\n    {}", env.description()));
    }

    let components = format_components(env);
    if !components.is_empty() {
        line.push_str(&format!("\n    {}", components));
    }

    line
}

/// Per-category component counts, e.g. `UI 2  Logic 1`
pub fn format_components(env: &Environment) -> String {
    ComponentCategory::DISPLAYED
        .iter()
        .filter_map(|category| {
            let count = env.component_count(category);
            (count > 0).then(|| format!("{} {}", style(category).cyan(), count))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Format the signed-in user
pub fn format_user(user: &User) -> String {
    format!(
        "{} {} {}",
        style(format!("[{}]", user.initials())).magenta().bold(),
        user.display_name(),
        style(format!("<{}>", user.email)).dim()
    )
}

/// Format an error message
pub fn format_error(msg: &str) -> String {
    style(format!("Error: {}", msg)).red().to_string()
}

/// Format a success message
pub fn format_success(msg: &str) -> String {
    style(msg).green().to_string()
}

/// Format an info message
pub fn format_info(msg: &str) -> String {
    style(msg).blue().to_string()
}
