//! CLI command implementations

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Password};
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::{AccountInfo, CredentialDirectory, LoginRequest, SessionManager};
use crate::cli::{
    info, print_account_table, print_navigation, print_principal, success, warn, OutputFormat,
};
use crate::config::{self, Config};
use crate::routing::{LoginFlow, LoginOutcome, Navigator};
use crate::storage::FileStore;

/// Initialize a new flicknroll.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("flicknroll.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created flicknroll.toml");
    info("Run 'flicknroll login --email <email>' to sign in");

    Ok(())
}

/// Sign in with email and password
pub async fn login(config_path: Option<PathBuf>, email: &str, password: Option<String>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let sessions = start_session(&config).await;
    let flow = LoginFlow::new(&sessions);

    if flow.on_enter().is_some() {
        if let Some(current) = sessions.current_principal() {
            info(&format!("Already signed in as {}", current.email));
        }
    }

    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    let request = LoginRequest::new(email, password);
    match flow.submit(&request).await {
        LoginOutcome::Redirect(route) => {
            let navigator = Navigator::new(config.routes.clone());
            let (route, view) = navigator.resolve(route.path(), sessions.current_principal().as_ref());
            success(&format!("Signed in as {}", email));
            print_navigation(route.path(), route, view);
            Ok(())
        }
        LoginOutcome::Error(message) => anyhow::bail!(message),
    }
}

/// Sign out and remove the stored session
pub async fn logout(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let sessions = start_session(&config).await;

    let was_signed_in = sessions.is_authenticated();
    sessions.logout().await;

    if was_signed_in {
        success("Signed out");
    } else {
        info("No active session");
    }
    Ok(())
}

/// Show the signed-in principal
pub async fn whoami(config_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let sessions = start_session(&config).await;

    let Some(principal) = sessions.current_principal() else {
        info("Not signed in. Run 'flicknroll login --email <email>'");
        return Ok(());
    };

    let account = AccountInfo::from(principal);
    match format {
        OutputFormat::Table => print_principal(&account),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&account)?),
    }
    Ok(())
}

/// Resolve a path against the route table for the current session
pub async fn open(config_path: Option<PathBuf>, path: &str, format: OutputFormat) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let sessions = start_session(&config).await;
    let navigator = Navigator::new(config.routes.clone());

    let (route, view) = navigator.resolve(path, sessions.current_principal().as_ref());

    match format {
        OutputFormat::Table => print_navigation(path, route, view),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "requested": path,
                "route": route.path(),
                "view": view,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

/// List the accounts that can sign in
pub async fn accounts(format: OutputFormat) -> Result<()> {
    let accounts: Vec<AccountInfo> = CredentialDirectory::new()
        .accounts()
        .into_iter()
        .map(AccountInfo::from)
        .collect();

    match format {
        OutputFormat::Table => print_account_table(&accounts),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&accounts)?),
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    }
    .map_err(|e| anyhow::anyhow!("{}", e))
}

/// Build the session manager and run the startup restore
async fn start_session(config: &Config) -> SessionManager<FileStore> {
    let store = FileStore::new(&config.session.store_path);
    let sessions = SessionManager::new(store, config.session.clone());
    sessions.restore().await;
    sessions
}
