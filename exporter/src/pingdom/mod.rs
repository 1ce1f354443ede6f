//! Pingdom REST API integration.

mod client;
mod wire;

pub use client::{PingdomClient, PingdomError};
