//! symptora-web: HTTP surface for Symptora.
//! Provides:
//!   - Dialogue-platform fulfillment webhook (`POST /webhook`)
//!   - SMS gateway endpoint with TwiML replies (`POST /sms`)
//!   - Health probe and cache administration

pub mod fulfillment;
pub mod handlers;
pub mod render;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::{AppState, SharedState};
