mod client;
mod contract;

pub use client::GateClient;
pub use contract::{Gate, GateError, Override, OverrideRequest};
