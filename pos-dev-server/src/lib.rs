//! POS Dev Server - local menu service
//!
//! Serves the menu API the terminal synchronizes against during
//! development. Data lives in memory, initialised from the seed menu.
//!
//! # Module structure
//!
//! ```text
//! pos-dev-server/src/
//! ├── core/          # config, state, errors, server loop
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging
//! ```

pub mod api;
pub mod core;
pub mod utils;

pub use api::build_router;
pub use crate::core::{Config, Server, ServerError, ServerState};
pub use utils::logger::init_logger_with_file;

/// Load `.env`, read [`Config`] from the environment and install the logger
pub fn setup_environment() -> Config {
    // .env first so it can feed Config::from_env
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
