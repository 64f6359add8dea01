//! # roster-github
//!
//! Team membership client for the code-hosting platform.
//!
//! - [`client`] — the [`TeamClient`] trait the engine reconciles against
//! - [`rest`] — GitHub REST implementation with full pagination
//! - [`error`] — [`GithubError`] with `{status, message}` classification

pub mod client;
pub mod error;
pub mod rest;

pub use client::TeamClient;
pub use error::GithubError;
pub use rest::GithubRestClient;
