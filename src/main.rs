use color_eyre::Result;
use kai::cli::{parse_args, run_cli_command, USAGE};
use kai::logging::{init_subscriber, DEFAULT_FILTER};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_subscriber(DEFAULT_FILTER);

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    run_cli_command(command).await
}
