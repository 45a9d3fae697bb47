mod cli;
mod login;
mod output;
mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use vc_account::AccountClient;
use vc_auth::{FileSessionStore, RiotAuthConfig, SessionStore};
use vc_config::{ConfigManager, UserConfig};

use cli::{Cli, Commands};
use output::print_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let manager = match &cli.config_dir {
        Some(dir) => ConfigManager::new(dir),
        None => ConfigManager::from_project_dirs()?,
    };
    let store = FileSessionStore::new(manager.dir())
        .await
        .context("Failed to open the session store")?;

    if cli.command == Some(Commands::Logout) {
        store.clear().await?;
        output::print_success("Saved session removed");
        return Ok(());
    }

    let mut user = match manager.load().await? {
        Some(user) if prompt::confirm_saved_login(&user.username)? => user,
        _ => replace_login(&manager, &store).await?,
    };

    let mut auth_config = RiotAuthConfig::riot_client();
    if let Some(proxy) = cli.proxy.clone() {
        auth_config = auth_config.with_proxy(proxy);
    }

    let mut relogin = cli.relogin;
    let session = loop {
        if let Some(region) = cli.region {
            user.region = region;
        }

        match login::establish_session(auth_config.clone(), &user, &store, relogin).await {
            Ok(session) => break session,
            Err(e) if login::credentials_rejected(&e) => {
                print_error(&format!("{e:#}"));
                user = replace_login(&manager, &store).await?;
                relogin = false;
            }
            Err(e) => return Err(e),
        }
    };
    let account = AccountClient::new(&session, user.region)?;

    match cli.command {
        Some(command) => run_command(&account, command).await,
        None => menu(&account).await,
    }
}

/// Prompt for new login details, save them and forget any session of the old account
async fn replace_login(manager: &ConfigManager, store: &FileSessionStore) -> Result<UserConfig> {
    let user = prompt::ask_user_config()?;
    manager.save(&user).await?;
    store.clear().await?;
    Ok(user)
}

async fn run_command(account: &AccountClient, command: Commands) -> Result<()> {
    match command {
        Commands::Store => output::print_store(&account.store().await?),
        Commands::Wallet => output::print_wallet(&account.wallet().await?),
        Commands::Rank => output::print_rank(&account.competitive_summary().await?),
        Commands::Logout => {}
    }
    Ok(())
}

async fn menu(account: &AccountClient) -> Result<()> {
    loop {
        println!();
        println!(
            "{}  {}  {}  {}",
            "[1] Store".cyan(),
            "[2] Wallet".cyan(),
            "[3] Rank".cyan(),
            "[q] Quit".cyan()
        );

        let command = match prompt::read_line("> ")?.as_str() {
            "1" | "store" => Commands::Store,
            "2" | "wallet" => Commands::Wallet,
            "3" | "rank" => Commands::Rank,
            "q" | "quit" | "exit" => return Ok(()),
            other => {
                print_error(&format!("Unknown choice '{other}'"));
                continue;
            }
        };

        // A failed query shouldn't end the session
        if let Err(e) = run_command(account, command).await {
            print_error(&format!("{e:#}"));
        }
    }
}
