//! Command-line argument parsing for the kai CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Arguments of `kai generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    pub client_id: String,
    pub request: String,
    pub format: Option<String>,
    pub platform: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Decode an SSE capture from a file, or stdin when `path` is `None`
    Decode { path: Option<PathBuf>, stats: bool },
    /// Call the content agent and stream the answer
    Generate(GenerateArgs),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("Missing value for {0}")]
    MissingValue(&'static str),

    #[error("Missing required option {0}")]
    MissingOption(&'static str),
}

/// Usage text printed by `kai --help` and on argument errors.
pub const USAGE: &str = "\
Usage:
  kai decode [PATH] [--stats]
  kai generate --client-id ID --request TEXT [--format FORMAT] [--platform PLATFORM]
  kai --version | --help

Environment (generate):
  KAI_API_BASE_URL, KAI_API_KEY, KAI_ACCESS_TOKEN, KAI_CONTENT_AGENT_PATH (optional)";

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use kai::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["kai".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);

    let Some(first) = args.next() else {
        return Ok(CliCommand::Help);
    };

    match first.as_str() {
        "--version" | "-V" => Ok(CliCommand::Version),
        "--help" | "-h" | "help" => Ok(CliCommand::Help),
        "decode" => parse_decode(args),
        "generate" => parse_generate(args),
        other => Err(ArgsError::UnknownCommand(other.to_string())),
    }
}

fn parse_decode<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut path = None;
    let mut stats = false;

    for arg in args {
        if arg == "--stats" {
            stats = true;
        } else if arg.starts_with("--") || path.is_some() {
            return Err(ArgsError::UnexpectedArgument(arg));
        } else if arg != "-" {
            // "-" reads stdin, same as no path
            path = Some(PathBuf::from(arg));
        }
    }

    Ok(CliCommand::Decode { path, stats })
}

fn parse_generate<I>(mut args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut client_id = None;
    let mut request = None;
    let mut format = None;
    let mut platform = None;

    while let Some(arg) = args.next() {
        let (slot, name) = match arg.as_str() {
            "--client-id" => (&mut client_id, "--client-id"),
            "--request" => (&mut request, "--request"),
            "--format" => (&mut format, "--format"),
            "--platform" => (&mut platform, "--platform"),
            _ => return Err(ArgsError::UnexpectedArgument(arg)),
        };
        *slot = Some(args.next().ok_or(ArgsError::MissingValue(name))?);
    }

    Ok(CliCommand::Generate(GenerateArgs {
        client_id: client_id.ok_or(ArgsError::MissingOption("--client-id"))?,
        request: request.ok_or(ArgsError::MissingOption("--request"))?,
        format,
        platform,
    }))
}
