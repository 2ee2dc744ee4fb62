//! # wikibot-core
//!
//! Async client core for the MediaWiki Action API — immutable sessions,
//! recursive result accumulation, and lazy continuation streaming.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wikibot_core::{Params, Session, SessionOptions};
//!
//! # async fn run() -> wikibot_core::WikiResult<()> {
//! let session = Session::new(
//!     "https://en.wikipedia.org/w/api.php",
//!     SessionOptions::default(),
//! )?;
//!
//! // One round trip; the response body folds into the session result.
//! let session = session
//!     .get(Params::new().add("action", "query").add("meta", "siteinfo"))
//!     .await?;
//! println!("{}", session.result());
//!
//! // Server-driven pagination as a pull-based stream.
//! let mut stream = session.stream(
//!     Params::new()
//!         .add("action", "query")
//!         .add("list", "allpages")
//!         .add("aplimit", "max"),
//! );
//! while let Some(chunk) = stream.next().await {
//!     println!("{}", chunk?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into these modules:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`params`] | Parameter model: scalars, pipe-joined lists, omission, `format=json` defaulting |
//! | [`cookie`] | `Set-Cookie` parsing and newest-first cookie accumulation |
//! | [`merge`] | Recursive merge of JSON result trees with loud conflicts |
//! | [`transport`] | Transport seam and the `reqwest`-backed HTTP implementation |
//! | [`session`] | Immutable session value; `get`/`post`/`authenticate` round trips |
//! | [`stream`] | Pull-based continuation streaming over paginated queries |
//! | [`error`] | Error types with thiserror: Config, Http, Transport, Auth, MergeConflict |
//!
//! Sessions are values, not state holders: every operation consumes its
//! input session and returns a fresh one, so independent lineages never
//! share mutable state and a single lineage is sequential by ownership.

pub mod cookie;
pub mod error;
pub mod merge;
pub mod params;
pub mod session;
pub mod stream;
pub mod transport;

pub use error::{WikiError, WikiResult};
pub use params::{ParamValue, Params, WireParams};
pub use session::{Session, SessionOptions};
pub use stream::QueryStream;
pub use transport::{
    HttpTransport, Method, Payload, Transport, TransportRequest, TransportResponse,
};
