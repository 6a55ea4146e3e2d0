mod motion;

pub use motion::{SessionConfig, SimulatedSource, generate_session};
