//! RepoLens - AI-assisted GitHub repository analysis gateway
//!
//! Entry point: resolves configuration from the command line, config files and
//! environment, then hands off to the HTTP server.
//!
//! ```text
//! repolens [--config <path>] [--host <addr>] [--port <port>]
//! repolens --print-config
//! ```

use repolens_core::config::{load_config, sample_config};
use std::path::PathBuf;

/// Command-line arguments
#[derive(Debug, Default, PartialEq)]
struct Args {
    /// Explicit configuration file
    config: Option<PathBuf>,
    /// Override for `server.host`
    host: Option<String>,
    /// Override for `server.port`
    port: Option<u16>,
    /// Print a sample configuration and exit
    print_config: bool,
    /// Print usage and exit
    help: bool,
}

impl Args {
    /// Parse command-line arguments
    fn parse() -> anyhow::Result<Self> {
        Self::parse_from(std::env::args().skip(1))
    }

    fn parse_from(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    parsed.config = Some(PathBuf::from(required(&arg, args.next())?));
                }
                "--host" => {
                    parsed.host = Some(required(&arg, args.next())?);
                }
                "--port" | "-p" => {
                    let value = required(&arg, args.next())?;
                    parsed.port = Some(
                        value
                            .parse()
                            .map_err(|_| anyhow::anyhow!("Invalid port: {}", value))?,
                    );
                }
                "--print-config" => parsed.print_config = true,
                "--help" | "-h" => parsed.help = true,
                other => anyhow::bail!("Unknown argument: {}", other),
            }
        }

        Ok(parsed)
    }
}

fn required(flag: &str, value: Option<String>) -> anyhow::Result<String> {
    value.ok_or_else(|| anyhow::anyhow!("{} requires a value", flag))
}

fn print_usage() {
    println!("RepoLens {}", repolens_core::version());
    println!();
    println!("Usage: repolens [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>   Configuration file (default: ./.repolens.toml)");
    println!("      --host <ADDR>     Bind address");
    println!("  -p, --port <PORT>     Bind port");
    println!("      --print-config    Print a sample configuration and exit");
    println!("  -h, --help            Show this help");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse()?;

    if args.help {
        print_usage();
        return Ok(());
    }

    if args.print_config {
        print!("{}", sample_config());
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    let mut config = load_config(args.config.as_deref(), &cwd)?;

    // Command line wins over file and environment
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    repolens_server::launch(config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> anyhow::Result<Args> {
        Args::parse_from(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&["-c", "gw.toml", "--host", "127.0.0.1", "--port", "8080"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("gw.toml")));
        assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn test_bad_port() {
        assert!(parse(&["--port", "http"]).is_err());
    }

    #[test]
    fn test_missing_value() {
        let err = parse(&["--config"]).unwrap_err();
        assert_eq!(err.to_string(), "--config requires a value");
    }

    #[test]
    fn test_unknown_flag() {
        assert!(parse(&["--verbose"]).is_err());
    }
}
