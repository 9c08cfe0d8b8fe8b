// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod logging;
pub mod services;
pub mod storage;
pub mod types;

pub use logging::*;
pub use services::*;
pub use storage::*;
pub use types::*;
