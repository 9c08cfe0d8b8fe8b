//! Library exports for seolma-client, shared between the binary and tests.

pub mod api;
pub mod cart;
pub mod codes;
pub mod config;
pub mod gateway;
pub mod list;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod session;
pub mod startup;
pub mod state;
pub mod utils;
pub mod validation;
