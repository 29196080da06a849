//! Async Rust client for the Hugging Face Inference API.
//!
//! hugface wraps the hosted Inference API's text, vision, and audio tasks in
//! typed async methods built around one shared request layer: fixed-interval
//! retry while a model is still loading, and pre-flight model/task validation
//! against the Hub. Every failure surfaces as one typed error.
//!
//! # Key concepts
//!
//! - **[`InferenceClient`](client::InferenceClient)**: the entry point,
//!   built from an API token plus an optional
//!   [`ClientConfig`](config::ClientConfig) (endpoints, default models,
//!   retry policy).
//! - **Facades**: [`Nlp`](nlp::Nlp), [`Vision`](vision::Vision), and
//!   [`Audio`](audio::Audio) expose one method per task. Text tasks take
//!   strings; vision and audio tasks take file paths or URLs.
//! - **[`Frame`](frame::Frame)**: a minimal column table. Every task has a
//!   `*_in_frame` form that runs the task once per row and appends a
//!   `predictions` column.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use hugface::client::InferenceClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InferenceClient::new("hf_...")?;
//!
//! let sentiment = client
//!     .nlp()
//!     .text_classification("I like you. I love you.", None, None)
//!     .await?;
//! println!("{sentiment}");
//!
//! let transcript = client
//!     .audio()
//!     .speech_recognition("clips/sample.flac", None)
//!     .await?;
//! println!("{transcript}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod audio;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod frame;
mod hub;
pub mod nlp;
pub mod transport;
pub mod vision;

#[cfg(test)]
mod mock;
