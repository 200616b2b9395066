pub mod config;
pub mod gate;
pub mod processor;
pub mod rest;
pub mod rules;
pub mod store;
