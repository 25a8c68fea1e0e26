//! The Blue Alliance (TBA) read API, v3.

mod client;
mod models;

pub use client::{DEFAULT_BASE_URL, TbaClient, TbaSettings};
pub use models::*;
