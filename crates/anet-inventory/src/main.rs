mod app;
mod commands;
mod output;

use anet_cloud::{CacheStore, RefreshOptions, ResourceKind};
use anet_cloud_atlantic::{AnetConfig, AtlanticNetProvider};
use anet_config::SettingsLayer;
use app::{RunContext, View};
use clap::{Args, Parser};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "anet_inventory", version)]
#[command(
    about = "Produce an Ansible Inventory file based on Atlantic.Net credentials",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    view: ViewArgs,

    /// Pretty-print results
    #[arg(short, long)]
    pretty: bool,

    /// Path to the cache files (default: .)
    #[arg(long = "cache-path", value_name = "CACHE_PATH")]
    cache_path: Option<PathBuf>,

    /// Maximum age of the cached items in seconds (default: 0)
    #[arg(long = "cache-max_age", value_name = "CACHE_MAX_AGE")]
    cache_max_age: Option<u64>,

    /// Only use data from the cache
    #[arg(long)]
    force_cache: bool,

    /// Force refresh of cache by making API requests to Atlantic.Net
    #[arg(short, long)]
    refresh_cache: bool,

    /// Display ANET_PUBLIC_KEY and ANET_PRIVATE_KEY
    #[arg(short, long)]
    env: bool,

    /// Atlantic.Net Public Key
    #[arg(short = 'a', long = "public_key", value_name = "ANET_PUBLIC_KEY")]
    public_key: Option<String>,

    /// Atlantic.Net Private Key
    #[arg(short = 'b', long = "private_key", value_name = "ANET_PRIVATE_KEY")]
    private_key: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct ViewArgs {
    /// List all active Cloudservers as Ansible inventory (default)
    #[arg(long)]
    list: bool,

    /// Get all Ansible inventory variables about a specific Cloudserver
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// List all Atlantic.Net information as JSON
    #[arg(long)]
    all: bool,

    /// List Cloudservers as JSON
    #[arg(short, long)]
    cloudservers: bool,

    /// List Images as JSON
    #[arg(long)]
    images: bool,

    /// List Plans as JSON
    #[arg(long)]
    plans: bool,

    /// List SSH keys as JSON
    #[arg(long = "ssh-keys")]
    ssh_keys: bool,
}

impl ViewArgs {
    fn view(&self) -> View {
        if self.cloudservers {
            View::Resource(ResourceKind::Cloudservers)
        } else if self.images {
            View::Resource(ResourceKind::Images)
        } else if self.plans {
            View::Resource(ResourceKind::Plans)
        } else if self.ssh_keys {
            View::Resource(ResourceKind::SshKeys)
        } else if self.all {
            View::All
        } else if let Some(host) = &self.host {
            View::Host(host.clone())
        } else {
            View::List
        }
    }
}

impl Cli {
    fn settings_layer(&self) -> SettingsLayer {
        SettingsLayer {
            public_key: self.public_key.clone(),
            private_key: self.private_key.clone(),
            cache_path: self.cache_path.clone(),
            cache_max_age: self.cache_max_age,
            group_variables: None,
        }
    }
}

fn init_tracing(verbose: bool) {
    // stdout carries the JSON document, so logs go to stderr
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = anet_config::load_settings(cli.settings_layer())?;

    // --env only needs the credentials
    if cli.env {
        commands::env::handle(&settings.credentials);
        return Ok(());
    }

    let provider = AtlanticNetProvider::new(AnetConfig::new(
        settings.credentials.public_key.clone(),
        settings.credentials.private_key.clone(),
    ));
    let cache = CacheStore::new(&settings.cache_path);
    let ctx = RunContext {
        cache_max_age: settings.cache_max_age(),
        options: RefreshOptions {
            force_cache: cli.force_cache,
            refresh_cache: cli.refresh_cache,
        },
        group_variables: &settings.group_variables,
    };

    let json_data = app::execute(&provider, &cache, &cli.view.view(), ctx).await?;

    println!("{}", output::render(&json_data, cli.pretty)?);
    Ok(())
}

// One request at a time, so a single-threaded runtime is enough
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
