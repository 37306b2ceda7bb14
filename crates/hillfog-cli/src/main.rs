//! `hillfog` - command-line client for the Hillfog legacy backend

mod cli;
mod commands;
mod logging;
mod settings;

use anyhow::Result;
use clap::Parser;
use hillfog_client::{FileSessionStore, HillfogClient, SessionStore};
use std::sync::Arc;

use crate::cli::{Cli, Command};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_format, cli.verbose)?;

    let settings = Settings::load()?.with_base_url(cli.base_url.clone());
    tracing::debug!("Using backend at {}", settings.base_url);

    let client = HillfogClient::new(settings.client_config())?;
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&settings.session_dir));

    // Logout has nothing to authenticate; every other command logs in first
    // when credentials are supplied.
    if !matches!(cli.command, Command::Logout) {
        if let (Some(account), Some(password)) = (&cli.account, &cli.password) {
            client.auth(store.clone()).login(account, password).await?;
        }
    }

    let value = commands::run(&cli.command, &client, store).await?;
    println!("{}", commands::render(&value, cli.output)?);
    Ok(())
}
