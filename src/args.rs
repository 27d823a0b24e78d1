//! Command-line argument parsing.
//!
//! The surface is small: binding overrides, a config directory override, a
//! debug flag, and help/version. Unknown options are reported rather than
//! ignored so typos do not silently run with defaults.

/// Parsed command-line arguments and their intended action.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the server with these settings.
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        /// `--listen` override for the config file's bind address.
        listen: Option<String>,
        /// `--port` override for the config file's bind port.
        port: Option<u16>,
    },
    /// Print usage and exit.
    ShowHelp,
    /// Print the version and exit.
    ShowVersion,
    /// An option could not be parsed; holds the message to show.
    InvalidOption(String),
}

/// Parse process arguments (skipping the binary name).
pub fn parse_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse(&args)
}

/// Parse an argument slice into an action.
pub fn parse(args: &[String]) -> CliAction {
    let mut debug_enabled = false;
    let mut config_dir = None;
    let mut listen = None;
    let mut port = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return CliAction::ShowHelp,
            "-V" | "--version" => return CliAction::ShowVersion,
            "-d" | "--debug" => debug_enabled = true,
            "--config" => match iter.next() {
                Some(dir) => config_dir = Some(dir.clone()),
                None => return CliAction::InvalidOption("--config requires a directory".into()),
            },
            "--listen" => match iter.next() {
                Some(addr) => listen = Some(addr.clone()),
                None => return CliAction::InvalidOption("--listen requires an address".into()),
            },
            "--port" => match iter.next().map(|p| p.parse::<u16>()) {
                Some(Ok(p)) if p > 0 => port = Some(p),
                Some(_) => {
                    return CliAction::InvalidOption("--port requires a number in 1-65535".into());
                }
                None => return CliAction::InvalidOption("--port requires a number".into()),
            },
            other => {
                return CliAction::InvalidOption(format!("Unknown option: {other}"));
            }
        }
    }

    CliAction::Run {
        debug_enabled,
        config_dir,
        listen,
        port,
    }
}

/// Print usage information.
pub fn display_help() {
    println!("cityclock v{}", env!("CARGO_PKG_VERSION"));
    println!("World clock web service");
    println!();
    println!("Usage: cityclock [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --debug          Log each handled request");
    println!("      --config <DIR>   Read cityclock.toml from DIR");
    println!("      --listen <ADDR>  Bind address (overrides config)");
    println!("      --port <PORT>    Bind port (overrides config)");
    println!("  -h, --help           Print help");
    println!("  -V, --version        Print version");
}

/// Print the version string.
pub fn display_version() {
    println!("cityclock v{}", env!("CARGO_PKG_VERSION"));
}
