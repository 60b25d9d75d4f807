use std::time::Duration;

use clap::{Parser, Subcommand};
use copilot_cli::{commands, CliAuthMode};
use copilot_core::ActiveAccount;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the startup sequence against a backend and print where it lands
    Boot {
        #[arg(long, env = "COPILOT_BACKEND_URL", default_value = copilot_config::DEFAULT_BACKEND_URL)]
        backend_url: String,
        #[arg(long, env = "COPILOT_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,
        #[arg(long, value_enum, default_value_t = CliAuthMode::None)]
        auth_mode: CliAuthMode,
        #[arg(
            long,
            env = "COPILOT_USERNAME",
            requires = "local_account_id",
            requires = "tenant_id"
        )]
        username: Option<String>,
        #[arg(
            long,
            env = "COPILOT_ACCOUNT_ID",
            requires = "username",
            requires = "tenant_id"
        )]
        local_account_id: Option<String>,
        #[arg(
            long,
            env = "COPILOT_TENANT_ID",
            requires = "username",
            requires = "local_account_id"
        )]
        tenant_id: Option<String>,
        #[arg(
            long,
            requires = "username",
            help = "Display name (defaults to the username)"
        )]
        name: Option<String>,
        #[arg(long)]
        dark_mode: bool,
        #[arg(long, help = "Enable the plugin gallery")]
        plugins: bool,
        #[arg(long, default_value_t = copilot_config::DEFAULT_PROBE_INTERVAL.as_millis() as u64)]
        probe_interval_ms: u64,
        #[arg(long, default_value_t = copilot_config::DEFAULT_BOOT_TIMEOUT.as_secs())]
        timeout_secs: u64,
    },
    /// Print the theme for a conversation path
    Theme {
        #[arg(long, default_value = copilot_config::DEFAULT_CONVERSATION_PATH)]
        path: String,
        #[arg(long)]
        dark: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Boot {
            backend_url,
            access_token,
            auth_mode,
            username,
            local_account_id,
            tenant_id,
            name,
            dark_mode,
            plugins,
            probe_interval_ms,
            timeout_secs,
        } => {
            let account = match (username, local_account_id, tenant_id) {
                (Some(username), Some(local_account_id), Some(tenant_id)) => Some(ActiveAccount {
                    local_account_id,
                    tenant_id,
                    username,
                    name,
                }),
                _ => None,
            };
            let opts = commands::BootOptions {
                backend_url,
                access_token,
                auth_mode: auth_mode.into(),
                account,
                dark_mode,
                plugins,
                probe_interval: copilot_config::clamp_probe_interval(Duration::from_millis(
                    probe_interval_ms,
                )),
                timeout: Duration::from_secs(timeout_secs),
                lookup_grace: copilot_config::LOOKUP_GRACE,
            };
            commands::cmd_boot(opts).await?;
        }
        Commands::Theme { path, dark } => commands::cmd_theme(&path, dark)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn account_flags_are_all_or_nothing() {
        let partial = [
            vec!["--local-account-id", "oid", "--tenant-id", "tid"],
            vec!["--username", "a@example.com", "--tenant-id", "tid"],
            vec!["--username", "a@example.com", "--local-account-id", "oid"],
            vec!["--name", "Ada"],
        ];
        for flags in partial {
            let args = ["copilot-cli", "boot"].into_iter().chain(flags.iter().copied());
            assert!(Cli::try_parse_from(args).is_err(), "accepted {flags:?}");
        }

        let full = Cli::try_parse_from([
            "copilot-cli",
            "boot",
            "--username",
            "a@example.com",
            "--local-account-id",
            "oid",
            "--tenant-id",
            "tid",
        ]);
        assert!(full.is_ok());
    }
}
