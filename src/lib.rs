pub mod bridge;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod heading;
pub mod location;
pub mod output;
pub mod platform;
pub mod source;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use bridge::{HostCallback, LocationModule, TrackingState};
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
