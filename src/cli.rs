use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;
use vc_config::Region;

#[derive(Parser)]
#[command(name = "valocli")]
#[command(about = "Check your VALORANT store, wallet and rank from the terminal")]
#[command(version)]
pub struct Cli {
    /// Run a single query and exit instead of opening the menu
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the config and session files
    #[arg(long, global = true, env = "VALOCLI_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Account region (na, eu, ap, kr); overrides the saved config
    #[arg(short, long, global = true, env = "VALOCLI_REGION")]
    pub region: Option<Region>,

    /// Send all Riot traffic through this proxy
    #[arg(long, global = true, env = "VALOCLI_PROXY")]
    pub proxy: Option<Url>,

    /// Ignore any saved session and log in again
    #[arg(long, global = true)]
    pub relogin: bool,

    /// Log filter, e.g. `debug` or `vc_auth=trace`
    #[arg(long, global = true, env = "VALOCLI_LOG", default_value = "warn")]
    pub log: String,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Daily offers, featured bundles, night market and accessories
    Store,
    /// Currency balances
    Wallet,
    /// Competitive rank for the current act
    Rank,
    /// Forget the saved session
    Logout,
}
