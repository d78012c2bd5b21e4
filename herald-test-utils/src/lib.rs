//! Herald Test Utils
//!
//! Shared testing utilities for the herald command handlers. Handlers talk to Discord only
//! through `herald_core::DiscordApi`, so tests substitute [`RecordingApi`], which records
//! every outbound call and can be told to fail, and pair it with an in-memory SQLite
//! database.
//!
//! # Usage
//!
//! ```rust,ignore
//! use herald_test_utils::{RecordingApi, fixture};
//!
//! #[tokio::test]
//! async fn bans_member() -> anyhow::Result<()> {
//!     let api = RecordingApi::new().shared();
//!     let ctx = fixture::context(api.clone()).await?;
//!     // run a handler against `ctx`, then inspect `api.calls().await`
//!     Ok(())
//! }
//! ```

pub mod fixture;
pub mod recording;

pub use recording::{Call, RecordingApi};
