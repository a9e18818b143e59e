//! # State Module
//!
//! Everything the shell holds between keystrokes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐        ┌──────────────────────────────────────┐  │
//! │  │    AppConfig     │ ─────► │              Session                 │  │
//! │  │                  │        │                                      │  │
//! │  │  data_dir        │        │  FileStore   (data_dir)              │  │
//! │  │  store_name      │        │  Catalogue   (loaded / seeded)       │  │
//! │  │  login attempts  │        │  Cart        (loaded / empty)        │  │
//! │  │  log_filter      │        │  Accounts    (users.json)            │  │
//! │  └──────────────────┘        │  user        (signed-in name)        │  │
//! │                              └──────────────────────────────────────┘  │
//! │                                                                         │
//! │  Single-threaded: the session is borrowed `&mut` by whichever menu is  │
//! │  running, so no locking is needed.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{AppConfig, CONFIG_FILE};
pub use session::Session;
