//! # Pagecraft Client
//!
//! HTTP implementation of [`pagecraft_editor::PageApi`] plus the on-disk
//! client configuration.
//!
//! ```rust,ignore
//! let config = ClientConfig::load(&std::env::current_dir()?)?;
//! let api = Arc::new(HttpPageApi::new(&config)?);
//! let coordinator = PageCoordinator::new(api);
//! ```

mod config;
mod error;
mod http;

pub use config::{ClientConfig, DEFAULT_CONFIG_NAME, ENV_API_TOKEN, ENV_API_URL};
pub use error::ClientError;
pub use http::HttpPageApi;
