//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::{AccountInfo, Role};
use crate::routing::{Route, View};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn role_color(role: Role) -> Color {
    match role {
        Role::Admin => Color::Red,
        Role::Manager => Color::Yellow,
        Role::Member => Color::Green,
    }
}

/// Format a role as a colored string
pub fn format_role(role: Role) -> String {
    match role {
        Role::Admin => role.as_str().red().to_string(),
        Role::Manager => role.as_str().yellow().to_string(),
        Role::Member => role.as_str().green().to_string(),
    }
}

/// Print a table of accounts
pub fn print_account_table(accounts: &[AccountInfo]) {
    if accounts.is_empty() {
        info("No accounts configured");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Email").fg(Color::Cyan),
            Cell::new("Role").fg(Color::Cyan),
        ]);

    for account in accounts {
        table.add_row(vec![
            Cell::new(&account.name),
            Cell::new(&account.email),
            Cell::new(account.role).fg(role_color(account.role)),
        ]);
    }

    println!("{table}");
}

/// Print the signed-in principal
pub fn print_principal(account: &AccountInfo) {
    println!("{}", "Signed in".bold().underline());
    println!();
    println!("  {} {}", "Name:".bold(), account.name);
    println!("  {} {}", "Email:".bold(), account.email);
    println!("  {} {}", "Role:".bold(), format_role(account.role));
}

/// Print where a path resolved to
pub fn print_navigation(requested: &str, route: Route, view: View) {
    if requested == route.path() {
        println!("{} {}", route.path().cyan(), view.to_string().bold());
    } else {
        println!(
            "{} → {} {}",
            requested,
            route.path().cyan(),
            view.to_string().bold()
        );
    }
}
