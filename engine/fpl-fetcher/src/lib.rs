//! FPL Fetcher and What-If Service
//!
//! Fetches a manager's gameweek from the fantasy API, maps the loosely typed
//! payloads into the engine's strict records, and answers what-if requests
//! with points and estimated rank deltas.

pub mod cli;
pub mod config;
pub mod fetcher;
pub mod models;
pub mod service;

pub use config::{FetcherConfig, FplApiConfig};
pub use fetcher::{build_snapshot, FplFetcher};
pub use models::*;
pub use service::{WhatIfRequest, WhatIfResponse, WhatIfService};
