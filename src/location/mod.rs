pub mod fix;
pub mod provider;
pub mod tracker;

pub use fix::PositionFix;
pub use provider::{Provider, select_provider};
pub use tracker::{LocationEvent, LocationTracker};
