//! CLI module for kai.
//!
//! - Argument parsing
//! - `decode`: replay a captured SSE response from a file or stdin
//! - `generate`: call the content agent and stream its answer to stdout
//!
//! # Usage
//!
//! ```ignore
//! use kai::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command).await?;
//! ```

pub mod args;

pub use args::{parse_args, ArgsError, CliCommand, GenerateArgs, USAGE};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::agent::{ContentAgentClient, ContentAgentRequest};
use crate::config::AgentConfig;
use crate::sse::{ParseOptions, StreamAccumulator, StreamSummary};

/// Version reported by `kai --version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the user's access token for `generate`.
pub const ENV_ACCESS_TOKEN: &str = "KAI_ACCESS_TOKEN";

/// Read size for `decode`.
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Run a parsed CLI command.
pub async fn run_cli_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("kai {}", VERSION);
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Decode { path, stats } => run_decode(path.as_deref(), stats).await,
        CliCommand::Generate(args) => run_generate(args).await,
    }
}

/// Decode everything `reader` yields as one SSE delta stream.
pub async fn decode_reader<R>(mut reader: R) -> std::io::Result<StreamSummary>
where
    R: AsyncRead + Unpin,
{
    let mut accumulator = StreamAccumulator::new(ParseOptions::new());
    let mut buf = vec![0u8; READ_CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        accumulator.push_chunk(&buf[..n]);
    }

    Ok(accumulator.finish())
}

/// `kai decode`: print the text assembled from a captured stream.
pub async fn run_decode(path: Option<&Path>, stats: bool) -> Result<()> {
    let summary = match path {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .wrap_err_with(|| format!("Failed to open {}", path.display()))?;
            decode_reader(file).await?
        }
        None => decode_reader(tokio::io::stdin()).await?,
    };

    println!("{}", summary.content);

    if stats {
        eprintln!(
            "fragments={} dropped_lines={} lines={}",
            summary.fragments, summary.dropped_lines, summary.lines
        );
    }

    Ok(())
}

/// `kai generate`: stream a content agent answer to stdout.
pub async fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = AgentConfig::from_env()?;
    let access_token = std::env::var(ENV_ACCESS_TOKEN)
        .map_err(|_| eyre!("Missing environment variable {}", ENV_ACCESS_TOKEN))?;

    let client = ContentAgentClient::new(config)?;

    let mut request = ContentAgentRequest::new(args.client_id, args.request);
    request.format = args.format;
    request.platform = args.platform;

    let options = ParseOptions::new().with_on_progress(|fragment| {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout only loses the echo; the decode keeps going
        let _ = stdout.write_all(fragment.as_bytes());
        let _ = stdout.flush();
    });

    client
        .generate(&request, &access_token, Some(options))
        .await
        .map_err(|err| eyre!("{} ({}): {}", err.user_message(), err.error_code(), err))?;

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decode_reader_from_bytes() {
        let input: &[u8] = b"data: {\"choices\":[{\"delta\":{\"content\":\"hi\"}}]}\n\ndata: [DONE]\n";
        let summary = decode_reader(input).await.unwrap();
        assert_eq!(summary.content, "hi");
        assert_eq!(summary.fragments, 1);
    }

    #[tokio::test]
    async fn test_decode_reader_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.sse");
        let mut body = String::new();
        for word in ["one", " two", " three"] {
            body.push_str(&format!(
                "data: {}\n\n",
                serde_json::json!({"choices": [{"delta": {"content": word}}]})
            ));
        }
        body.push_str("data: {broken\n");
        std::fs::write(&path, body).unwrap();

        let file = tokio::fs::File::open(&path).await.unwrap();
        let summary = decode_reader(file).await.unwrap();
        assert_eq!(summary.content, "one two three");
        assert_eq!(summary.dropped_lines, 1);
    }

    #[tokio::test]
    async fn test_run_decode_missing_file() {
        let result = run_decode(Some(Path::new("/nonexistent/kai/capture.sse")), false).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_version_and_help() {
        assert!(run_cli_command(CliCommand::Version).await.is_ok());
        assert!(run_cli_command(CliCommand::Help).await.is_ok());
    }
}
