mod api;
mod cli;
mod config;
mod download;
mod error;
mod indices;
mod logging;
mod models;
mod query;
mod routes;
mod view;

use clap::Parser;
use cli::{App, Cli, MenuEntry};
use config::AppConfig;
use error::Result;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match AppConfig::from_env()
        .and_then(|c| c.with_overrides(cli.api_url.as_deref(), cli.offline))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            return Err(e);
        },
    };

    // Held until exit so buffered file logs are flushed.
    let _log_guard = logging::init(&config);
    info!("Starting climate portal client against {}", config.api_url);

    let app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {:?}", e);
            eprintln!("Error: failed to initialize application: {}", e);
            return Err(e);
        },
    };
    let ctx = *app.render_context();

    if let Some(command) = cli.command {
        if let Err(e) = app.run(command).await {
            error!("Command execution failed: {:?}", e);
            eprintln!("{}", ctx.error(&format!("Error: {}", e)));
            return Err(e);
        }
        return Ok(());
    }

    println!("{}", ctx.heading("Welcome to the Climate Information Portal!"));

    loop {
        let entry = cli::prompt_menu()?;
        if entry == MenuEntry::Exit {
            println!("{}", ctx.success("Goodbye!"));
            break;
        }

        let command = match cli::prompt_command(entry) {
            Ok(Some(command)) => command,
            Ok(None) => break,
            Err(e) => {
                println!("{} {}", ctx.error("Failed to get input:"), e);
                continue;
            },
        };

        println!("\n---\n");
        if let Err(e) = app.run(command).await {
            error!("Command execution failed: {:?}", e);
            println!("{}", ctx.error(&format!("Error: {}", e)));
        }
        println!("\n---\n");
    }

    Ok(())
}
