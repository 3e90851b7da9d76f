//! Video reference resolution pipeline
//!
//! Turns a user-supplied reference into a [`VideoCatalog`]: extract the
//! canonical [`VideoId`], ask the provider's player endpoint for the full
//! catalog, and fall back to oEmbed metadata with synthetic formats when
//! that fails.
//!
//! ## Key Components
//!
//! - [`extract`] - Reference to identifier normalization
//! - [`CatalogResolver`] - One resolution stage
//! - [`PlayerResolver`] - Primary stage (full metadata and encodings)
//! - [`OembedResolver`] - Fallback stage (reduced metadata, fixed formats)
//! - [`Orchestrator`] - Primary then fallback, single result
//!
//! ## Example
//!
//! ```rust,ignore
//! use vidresolve::resolve::Orchestrator;
//!
//! let orchestrator = Orchestrator::from_config(&config, metrics)?;
//! let catalog = orchestrator.resolve("https://youtu.be/dQw4w9WgXcQ").await?;
//! ```

mod extract;
mod http;
mod innertube;
mod oembed;
mod orchestrator;
mod traits;
mod types;

pub use extract::extract;
pub use http::{HttpConfig, UpstreamClient, UpstreamError};
pub use innertube::{AUDIO_ONLY_LABEL, PlayerResolver};
pub use oembed::{OembedResolver, synthetic_formats};
pub use orchestrator::Orchestrator;
pub use traits::{CatalogResolver, ResolutionError, ResolutionFailure};
pub use types::{CatalogSource, StreamFormat, VIDEO_ID_LEN, VideoCatalog, VideoId};
