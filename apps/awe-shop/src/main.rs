//! # AWE Shop
//!
//! Terminal storefront for AWE Electronics.
//!
//! ```text
//! awe-shop [--config PATH]
//!
//!   --config, -c PATH   read settings from PATH instead of the platform
//!                       config file
//!   --help, -h          print usage
//!
//!   AWE_DATA_DIR, AWE_STORE_NAME, AWE_MAX_LOGIN_ATTEMPTS and AWE_LOG
//!   override the file; RUST_LOG overrides AWE_LOG.
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "Usage: awe-shop [--config PATH]

Options:
  -c, --config PATH   Read settings from PATH
  -h, --help          Print this help";

fn main() -> ExitCode {
    let mut config_path: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--config needs a path\n\n{}", USAGE);
                    return ExitCode::from(2);
                }
            },
            "-h" | "--help" => {
                println!("{}", USAGE);
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("Unknown argument: {}\n\n{}", other, USAGE);
                return ExitCode::from(2);
            }
        }
    }

    match awe_shop::run(config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Storefront stopped");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
