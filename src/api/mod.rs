//! HTTP API for text analysis
//!
//! Provides:
//! - `POST /analyze/text` full analysis (cached)
//! - `POST /detect/language` language only
//! - `POST /analyze/semantic` structural metrics only
//! - `GET /health` liveness and cache statistics
//!
//! The analysis routes are also mounted under `/api/nlp`.

pub mod errors;
pub mod extract;
pub mod server;

pub use extract::ValidatedText;
pub use server::{ApiServer, ApiServerConfig};
