//! # Database access
//!
//! Everything here is gated behind the `server` feature so WASM builds never
//! pull in SQLx.
//!
//! - [`get_pool`] — lazy process-wide [`sqlx::PgPool`], sized from
//!   [`ServerConfig`](crate::config::ServerConfig).
//! - [`users`] — accounts, credentials and parent/child links.
//! - [`settings`] — the `app_settings` flags (admin bootstrap).
//! - [`progress`] — exercise completions.
//!
//! Query helpers take any [`sqlx::PgExecutor`] so callers can run them on the
//! pool or inside a transaction.

#[cfg(feature = "server")]
mod pool;
#[cfg(feature = "server")]
pub mod progress;
#[cfg(feature = "server")]
pub mod settings;
#[cfg(feature = "server")]
pub mod users;

#[cfg(feature = "server")]
pub use pool::get_pool;
