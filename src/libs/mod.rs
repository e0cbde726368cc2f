//! Core library modules for the avatask client.
//!
//! ## Features
//!
//! - **Session**: the state store, the cached user identity and configuration
//! - **Progression**: tasks, users and level progress as reported by the server
//! - **Presentation**: the avatar scene, the task form and terminal views
//! - **Messaging**: centralized user-facing text and output macros
//!
//! ## Usage
//!
//! ```rust
//! use avatask::libs::form::TaskForm;
//! use avatask::libs::progress::progress_within_level;
//!
//! let form = TaskForm::new("Write report", "", "not a number");
//! assert_eq!(form.xp_reward(), 10);
//! assert_eq!(progress_within_level(105), 5);
//! ```

pub mod avatar;
pub mod config;
pub mod data_storage;
pub mod form;
pub mod identity;
pub mod messages;
pub mod progress;
pub mod store;
pub mod task;
pub mod user;
pub mod view;
