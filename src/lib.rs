//! graph-teams - Microsoft Graph client for Teams resources
//!
//! Chats and messages, calls and call records, online meetings, presence and
//! Viva employee experience, over the Graph v1.0 REST API.
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use graph_teams::{GraphClient, ODataQuery};
//!
//! let client = GraphClient::from_stored_credentials().await?;
//! let chats = client.chats().list_chats(&ODataQuery::new().top(10)).await?;
//! println!("{}", chats);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;

pub use api::{GraphClient, GraphClientBuilder, ODataQuery};
pub use error::{Error, Result};
