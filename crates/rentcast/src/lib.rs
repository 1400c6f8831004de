//! RentCast API bridge: client, tool catalog, and MCP server handler.
//!
//! # Overview
//!
//! - **ApiKey**: the validated credential (32 hex characters).
//! - **RentcastClient**: one authenticated GET per call against a fixed base URL.
//! - **catalog**: the fixed set of tools, their argument schemas, and the
//!   mapping from arguments to endpoint paths and query strings.
//! - **RentcastTools**: the [`rmcp::ServerHandler`] tying the two together.
//!   Serve it with `rmcp::ServiceExt::serve` over `rmcp::transport::stdio()`.
//!
//! # Example
//!
//! ```no_run
//! use rentcast::{ApiKey, RentcastClient, RentcastTools};
//!
//! # async fn example() -> rentcast::Result<()> {
//! let key = ApiKey::parse("0123456789abcdef0123456789abcdef")?;
//! let tools = RentcastTools::new(RentcastClient::builder(key).build()?);
//!
//! let mut args = serde_json::Map::new();
//! args.insert("zip_code".into(), "78244".into());
//! let stats = tools.invoke("get_market_statistics", &args).await?;
//! println!("{stats}");
//! # Ok(())
//! # }
//! ```

mod api_key;
pub mod catalog;
mod client;
mod error;
mod tools;

pub use api_key::{API_KEY_LEN, ApiKey};
pub use client::{
    API_KEY_HEADER, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, RentcastClient, RentcastClientBuilder,
};
pub use error::{Error, Result};
pub use tools::{RentcastTools, SERVER_NAME};
