//! # Avatask - gamified task tracker client
//!
//! A command-line client for the avatar productivity service: complete
//! tasks, earn experience points, level up and watch your avatar react.
//!
//! ## Features
//!
//! - **Session Store**: mirrors user, tasks and avatar state from the server
//! - **Task Management**: create, complete and delete tasks
//! - **Progression**: XP and levels exactly as the server reports them
//! - **Avatar**: mood-colored 3D scene description with per-tier motion
//! - **Interactive Mode**: a prompt-driven loop over a single session
//!
//! ## Usage
//!
//! ```rust,no_run
//! use avatask::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
