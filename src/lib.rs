//! # postdeck - Terminal Blog Listing Browser
//!
//! Loads a static collection of blog posts once and lets the reader narrow it down
//! with free-text search and a category selector, page through the result four
//! cards at a time, toggle a light/dark theme and jump back to the top.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`store`] - Post records and the one-shot loader
//! - [`listing`] - Filtering, pagination and category options
//! - [`preferences`] - Theme mode and the persisted preference store
//! - [`render`] - Render instructions, view formatting and the terminal front end
//! - [`input`] - Key bindings and terminal event collection
//! - [`app`] - The listing controller and the application loop

// Core modules
pub mod config;
pub mod error;
pub mod listing;
pub mod preferences;
pub mod store;

// Front end
pub mod input;
pub mod render;

// Orchestration
pub mod app;

// Re-export commonly used types for convenience
pub use error::{PostdeckError, Result};

// Public API surface for external usage
pub use app::{Application, ControllerSettings, ListingController};
pub use config::Config;
pub use listing::{filter_posts, paginate, Page};
pub use preferences::{PreferenceStore, ThemeMode};
pub use store::{Post, PostSource, PostStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
