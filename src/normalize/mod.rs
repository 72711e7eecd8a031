//! Normalization of upstream JSON into the gateway's result types.

pub mod news;
pub mod weather;
