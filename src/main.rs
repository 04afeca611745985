use anyhow::Result;
use clap::Parser;
use cloudsim::utils::logger;
use cloudsim::{CliCommand, CliConfig, ServiceCatalog, SessionController};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

fn main() -> Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("Starting cloudsim CLI");

    let catalog = match &config.catalog {
        Some(path) => ServiceCatalog::from_file(path),
        None => ServiceCatalog::builtin(),
    };
    let catalog = match catalog {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            tracing::error!("Catalog failed to load: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    match config.command {
        CliCommand::List => {
            println!("{:<16} {:<42} {}", "SERVICE", "NAME", "COMMANDS");
            for service in catalog.list_services() {
                println!(
                    "{:<16} {:<42} {}",
                    service.id,
                    service.display_name,
                    service.commands.len()
                );
            }
        }
        CliCommand::Commands { service } => {
            let definition = match catalog.get_service(&service) {
                Ok(definition) => definition,
                Err(e) => {
                    tracing::warn!("Service lookup failed: {}", e);
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            };
            println!("{} commands:", definition.display_name);
            for command in &definition.commands {
                println!("  {:<24} [{:?}]", command.name, command.response_kind);
            }
        }
        CliCommand::Exec { service, command } => {
            let mut session = SessionController::new(catalog);
            let output = session
                .open_service(&service)
                .and_then(|_| session.execute_command(&command));
            match output {
                Ok(output) => println!("{}", output.to_display_string()),
                Err(e) => {
                    tracing::warn!("Execution failed: {}", e);
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            }
        }
        CliCommand::Shell => run_shell(catalog)?,
    }

    Ok(())
}

/// Interactive loop over one session. `close` models the escape trigger a
/// hosting UI would route to the controller.
fn run_shell(catalog: Arc<ServiceCatalog>) -> Result<()> {
    let mut session = SessionController::new(catalog);
    let stdin = io::stdin();

    println!("cloudsim interactive shell. Type 'help' for commands.");
    loop {
        match session.open_service_id() {
            Some(service) => print!("cloudsim:{}> ", service),
            None => print!("cloudsim> "),
        }
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            continue;
        };
        let argument = parts.next();

        match (verb, argument) {
            ("help", _) => {
                println!("  services          list the simulated services");
                println!("  open <service>    open a service panel");
                println!("  run <command>     execute a command of the open service");
                println!("  history           show this panel's command history");
                println!("  close             close the panel (escape)");
                println!("  exit              leave the shell");
            }
            ("services", _) => {
                for service in session.catalog().list_services() {
                    println!("  {:<16} {}", service.id, service.display_name);
                }
            }
            ("open", Some(id)) => match session.open_service(id) {
                Ok(()) => {
                    let names: Vec<&str> = session
                        .open_service_def()
                        .map(|d| d.command_names())
                        .unwrap_or_default();
                    println!("Opened {}. Commands: {}", id, names.join(", "));
                }
                Err(e) => eprintln!("❌ {}", e),
            },
            ("run", Some(name)) => match session.execute_command(name) {
                Ok(output) => println!("{}", output.to_display_string()),
                Err(e) => eprintln!("❌ {}", e),
            },
            ("history", _) => {
                for entry in session.history() {
                    println!("  {} {}", entry.executed_at, entry.command);
                }
            }
            ("close", _) => {
                session.close_service();
                println!("Returned to catalog view.");
            }
            ("exit", _) | ("quit", _) => break,
            ("open", None) => eprintln!("❌ Usage: open <service>"),
            ("run", None) => eprintln!("❌ Usage: run <command>"),
            (other, _) => eprintln!("❌ Unknown input '{}'; type 'help'", other),
        }
    }

    Ok(())
}
