//! CLI argument parsing and command definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line client for the Quill content backend.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the settings file.
    #[arg(short, long, env = "QUILL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Path to the credential file.
    #[arg(long, env = "QUILL_CREDENTIALS", global = true)]
    pub credentials: Option<PathBuf>,

    /// Backend base URL, overriding the settings file.
    #[arg(long, env = "QUILL_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert JSON keys from snake_case to camelCase.
    Normalize(ConvertArgs),

    /// Convert JSON keys from camelCase to snake_case.
    Denormalize(ConvertArgs),

    /// GET a backend path and print the normalized response.
    Get {
        /// Path below the base URL, e.g. `posts/42`.
        path: String,
    },

    /// Store a bearer token for later requests.
    Login {
        /// The access token.
        #[arg(long)]
        token: String,

        /// Lifetime of the token in seconds.
        #[arg(long)]
        expires_in: Option<i64>,
    },

    /// Forget the stored token.
    Logout,

    /// Start a Git content sync, or show the latest run.
    Sync {
        /// Show the latest run instead of starting one.
        #[arg(long)]
        status: bool,
    },
}

/// Arguments shared by the conversion commands.
#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Input file; reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Fail when two keys convert to the same name.
    #[arg(long)]
    pub strict: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_normalize() {
        let args = CliArgs::try_parse_from(["quill", "normalize", "in.json", "--strict"]).unwrap();
        let Command::Normalize(convert) = args.command else {
            panic!("expected normalize");
        };
        assert_eq!(convert.file, Some(PathBuf::from("in.json")));
        assert!(convert.strict);
    }

    #[test]
    fn test_parse_login_with_globals() {
        let args = CliArgs::try_parse_from([
            "quill",
            "login",
            "--token",
            "abc",
            "--expires-in",
            "60",
            "-v",
            "--base-url",
            "http://cms.test",
        ])
        .unwrap();

        assert!(args.verbose);
        assert_eq!(args.base_url.as_deref(), Some("http://cms.test"));
        let Command::Login { token, expires_in } = args.command else {
            panic!("expected login");
        };
        assert_eq!(token, "abc");
        assert_eq!(expires_in, Some(60));
    }

    #[test]
    fn test_login_requires_token() {
        assert!(CliArgs::try_parse_from(["quill", "login"]).is_err());
    }
}
