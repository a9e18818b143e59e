//! # AWE Shop Library
//!
//! The terminal storefront. `main.rs` only parses arguments and calls
//! [`run`]; everything else lives here so whole sessions can be scripted
//! from tests through [`run_with`].
//!
//! ## Module Organization
//! ```text
//! awe_shop/
//! ├── lib.rs          ◄─── You are here (startup & logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── storefront.toml + AWE_* overrides
//! │   └── session.rs  ◄─── Catalogue, cart, accounts, persistence
//! ├── menu/
//! │   ├── mod.rs      ◄─── Welcome, login, signup, main menu
//! │   ├── browse.rs   ◄─── Category / price / search listings
//! │   ├── cart.rs     ◄─── Cart edits and checkout
//! │   └── admin.rs    ◄─── Catalogue management
//! ├── auth.rs         ◄─── Accounts and Argon2 password hashes
//! ├── prompt.rs       ◄─── Line-oriented terminal I/O
//! └── error.rs        ◄─── AppError
//! ```
//!
//! ## Startup
//! ```text
//! AppConfig::load ──► init_tracing ──► Session::open ──► menu::run
//!                                      (seeds the        (until Exit or
//!                                       catalogue)        end of input)
//! ```

pub mod auth;
pub mod error;
pub mod menu;
pub mod prompt;
pub mod state;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use error::AppResult;
use prompt::Prompter;
use state::{AppConfig, Session};

/// Runs the storefront on stdin/stdout.
///
/// `config_path` is an explicit `--config` file; without one the platform
/// config file is used when it exists.
pub fn run(config_path: Option<PathBuf>) -> AppResult<()> {
    let config = AppConfig::load(config_path)?;
    init_tracing(&config.log_filter);
    info!(
        data_dir = %config.data_dir.display(),
        store = %config.store_name,
        "Configuration loaded"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(config, stdin.lock(), stdout.lock())
}

/// Runs one storefront session over any input and output.
pub fn run_with<R: BufRead, W: Write>(config: AppConfig, input: R, output: W) -> AppResult<()> {
    let mut session = Session::open(config)?;
    let mut io = Prompter::new(input, output);
    menu::run(&mut session, &mut io)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with the menus.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=awe_core=trace` - Show trace for one crate only
/// - Default: `default_filter` (the config's `log_filter`)
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
