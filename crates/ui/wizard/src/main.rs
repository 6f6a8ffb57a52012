mod action;
mod app;
mod cli;
mod components;
mod config;
mod errors;
mod state;
mod tui;

use ::app::{AppBuilder, Application};
use clap::Parser;
use color_eyre::{Result, eyre::eyre};
use provisioning::Registry;

use crate::cli::{Cli, Cmd};
use crate::config::Config;

struct CnfWizard;

impl Application for CnfWizard {
    const APP_ID: &'static str = "cnf_wizard";
}

#[tokio::main]
async fn main() -> Result<()> {
    errors::init()?;
    let cli = Cli::parse();

    match cli.cmd.unwrap_or_default() {
        Cmd::Fields => print_fields(&Registry::cisco_8945()),
        Cmd::Run => {
            let version = env!("CARGO_PKG_VERSION");
            let context = AppBuilder::<CnfWizard>::new(version)
                .map_err(|e| eyre!(e))?
                .build();
            let config = Config::new(context.path_context(), &cli)?;
            let mut app = crate::app::App::new(config, context.version());
            app.run().await?;
        }
    }
    Ok(())
}

fn print_fields(registry: &Registry) {
    for (_, field) in registry.iter() {
        if field.is_header() {
            println!("\n{}", field.label());
            continue;
        }
        let marker = if field.is_required() { "*" } else { " " };
        println!("{marker} {:<30} {}", field.label(), field.key());
        for (index, choice) in field.options().iter().enumerate() {
            let current = if Some(index) == field.selected_index() { ">" } else { " " };
            println!("      {current} {:<40} {}", choice.label, choice.value);
        }
    }
}
