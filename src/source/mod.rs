//! Occupancy data source
//!
//! The booking site only answers the occupancy endpoint for a browser-like
//! session, so fetching is a two-step dance: load the landing page for the
//! anti-forgery cookie, then replay it on the AJAX call.

mod client;

use serde_json::Value;

use crate::error::FetchError;

pub(crate) use client::SessionClient;

/// Anything that can produce one occupancy payload
pub(crate) trait OccupancySource {
    /// Fetch the current payload, returned verbatim
    fn fetch_occupancy(&self) -> Result<Value, FetchError>;
}
