mod commands;
mod terminal;

use commands::{CommandLine, verify};
use reflector_common::config::Config;
use reflector_common::info;
use terminal::{logging, print};
use tracing::error;

const INTERRUPT_EXIT_CODE: i32 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let interrupt = tokio::spawn(tokio::signal::ctrl_c());

    logging::init_logging();
    print::banner();

    if !commands.qos() {
        info!("Starting Reflector Client in non-qos mode...");
    }

    let cfg = Config::default();
    let code: i32 = tokio::select! {
        code = run(&commands, &cfg) => code?,
        Ok(Ok(())) = interrupt => {
            print::print("");
            print::print("Exiting Reflector Client...");
            INTERRUPT_EXIT_CODE
        }
    };

    std::process::exit(code);
}

async fn run(commands: &CommandLine, cfg: &Config) -> anyhow::Result<i32> {
    let request = match commands.request().await {
        Ok(request) => request,
        Err(e) => {
            error!("{e}");
            error!("Run with --help to see the accepted options");
            print::end_of_program();
            return Ok(e.exit_code());
        }
    };

    let results = verify::verify(&request, cfg).await?;
    Ok(commands::completed_exit_code(&results))
}
