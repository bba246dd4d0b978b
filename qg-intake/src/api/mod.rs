//! HTTP API handlers for qg-intake

pub mod health;
pub mod waitlist;

pub use health::health_routes;
pub use waitlist::{submit_waitlist, waitlist_routes};
