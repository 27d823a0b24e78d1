//! Binary entry point.
//!
//! Parses arguments, loads and validates configuration against the city
//! registry, then hands off to the server's accept loop. Every failure here
//! is a startup failure: once the listener is up, request handling has no
//! fatal paths.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use cityclock::args::{self, CliAction};
use cityclock::config::Config;
use cityclock::registry::CityRegistry;
use cityclock::server::Server;
use cityclock::time_source::RealTimeSource;
use cityclock::{log_block_start, log_end, log_error, log_indented, log_pipe, log_version};

fn main() {
    let (debug_enabled, config_dir, listen, port) = match args::parse_args() {
        CliAction::Run {
            debug_enabled,
            config_dir,
            listen,
            port,
        } => (debug_enabled, config_dir, listen, port),
        CliAction::ShowHelp => {
            args::display_help();
            return;
        }
        CliAction::ShowVersion => {
            args::display_version();
            return;
        }
        CliAction::InvalidOption(message) => {
            eprintln!("Error: {message}");
            eprintln!();
            args::display_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(debug_enabled, config_dir.as_deref(), listen, port) {
        log_pipe!();
        log_error!("{e:#}");
        log_end!();
        std::process::exit(1);
    }
}

fn run(
    debug_enabled: bool,
    config_dir: Option<&str>,
    listen: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    log_version!();

    log_block_start!("Loading city registry...");
    let registry = Arc::new(CityRegistry::load()?);
    log_indented!("{} cities, all zone ids resolved", registry.len());

    log_block_start!("Loading configuration...");
    let mut config = Config::load(config_dir.map(Path::new))?;
    if let Some(listen) = listen {
        config.listen = listen;
    }
    if let Some(port) = port {
        config.port = port;
    }
    config.validate(&registry)?;
    log_indented!("bind: {}", config.bind_address());
    log_indented!("main city: {}", config.main_city);

    let server = Server::new(registry, config, Arc::new(RealTimeSource), debug_enabled);
    server.run()?;

    log_end!();
    Ok(())
}
