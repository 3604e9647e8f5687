use std::process::ExitCode;
use storefront_cli::{command, logging, run, Invocation};

#[tokio::main]
async fn main() -> ExitCode {
    let matches = command().get_matches();
    let invocation = match Invocation::from_matches(&matches) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(2);
        }
    };

    if let Err(e) = logging::init(invocation.global.log_json) {
        eprintln!("warning: {e}");
    }

    match run(&invocation).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
