//! Error types for the planner.

use thiserror::Error;

use crate::park::ParkId;

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Request-level validation failures.
///
/// Every variant is raised before any distance computation starts, so a
/// caller never sees a partially computed result alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or a non-finite value.
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Itinerary requested with zero parks.
    #[error("no parks given")]
    EmptyParkSet,

    /// The same park listed twice in one request or snapshot.
    #[error("duplicate park id: {0}")]
    DuplicateParkId(ParkId),

    /// Identifier not present in the current catalog snapshot.
    #[error("unknown park id: {0}")]
    UnknownParkId(ParkId),

    /// Negative or non-finite search radius.
    #[error("invalid radius: {0} km")]
    InvalidRadius(f64),
}

/// Stable error codes for the HTTP layer.
/// Range: 20xxx for planner errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidCoordinate = 20001,
    EmptyParkSet = 20002,
    DuplicateParkId = 20003,
    UnknownParkId = 20004,
    InvalidRadius = 20005,
}

impl EngineError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::InvalidCoordinate { .. } => ErrorCode::InvalidCoordinate,
            EngineError::EmptyParkSet => ErrorCode::EmptyParkSet,
            EngineError::DuplicateParkId(_) => ErrorCode::DuplicateParkId,
            EngineError::UnknownParkId(_) => ErrorCode::UnknownParkId,
            EngineError::InvalidRadius(_) => ErrorCode::InvalidRadius,
        }
    }
}
