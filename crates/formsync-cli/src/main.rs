use formsync_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    match Cli::run_from_args().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("formsync error: {:#}", err);
            std::process::exit(2);
        }
    }
}
