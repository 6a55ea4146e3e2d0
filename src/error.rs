use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    #[error("Sensor registration failed: {0}")]
    SensorRegistration(String),

    #[error("Location provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Location services disconnected: {0}")]
    Disconnected(String),

    #[error("Invalid position fix: {0}")]
    InvalidFix(String),

    #[error("Event sink error: {0}")]
    EventSink(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session line {line}: {message}")]
    Session { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, BridgeError>;
