use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "trellis",
    about = "Trellis: handle resolution, breadcrumbs and themes for a repository hierarchy",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Server configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Content fixture, overriding the config's `content_fixture`
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Show where a /handle/... path forwards to
    Resolve(ResolveArgs),
    /// Show the breadcrumb trail for an object
    Crumbs(CrumbsArgs),
    /// Show the theme an object is rendered with
    Theme(ThemeArgs),
    /// Load the config and fixture and report problems
    CheckConfig(CheckConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Listen address, overriding the config's `bind_addr`
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Request path, e.g. /handle/1234/5678/edit
    pub path: String,
}

#[derive(Args)]
pub struct CrumbsArgs {
    /// Object handle, e.g. 1234/5678
    pub handle: String,
    /// Trailing request path after the handle
    #[arg(long, default_value = "")]
    pub residual: String,
}

#[derive(Args)]
pub struct ThemeArgs {
    pub handle: String,
    #[arg(long, default_value = "")]
    pub residual: String,
}

#[derive(Args)]
pub struct CheckConfigArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["trellis", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_serve_defaults() {
        let cli = Cli::try_parse_from(["trellis", "serve"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert!(args.bind.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_resolve() {
        let cli = Cli::try_parse_from(["trellis", "resolve", "/handle/10/abc/edit"]).unwrap();
        if let Command::Resolve(args) = cli.command {
            assert_eq!(args.path, "/handle/10/abc/edit");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_crumbs_with_residual() {
        let cli = Cli::try_parse_from(["trellis", "crumbs", "10/abc", "--residual", "submit"]).unwrap();
        if let Command::Crumbs(args) = cli.command {
            assert_eq!(args.handle, "10/abc");
            assert_eq!(args.residual, "submit");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_theme() {
        let cli = Cli::try_parse_from(["trellis", "theme", "10/xyz"]).unwrap();
        assert!(matches!(cli.command, Command::Theme(_)));
    }

    #[test]
    fn parse_check_config_with_globals() {
        let cli = Cli::try_parse_from([
            "trellis",
            "check-config",
            "--config",
            "trellis.toml",
            "--fixture",
            "content.toml",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::CheckConfig(_)));
        assert_eq!(cli.config, Some(PathBuf::from("trellis.toml")));
        assert_eq!(cli.fixture, Some(PathBuf::from("content.toml")));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["trellis", "--verbose", "check-config"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["trellis", "--format", "json", "theme", "10/xyz"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["trellis"]).is_err());
    }
}
