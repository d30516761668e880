use thiserror::Error;

/// Input validation failures.
///
/// A physically undefined result (sun below the horizon, surface facing away
/// from the sun) is never reported through this type; it is carried as an
/// unvalued [`crate::Angular`] instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("radians ({radians}) and degrees ({degrees}) both given but don't agree")]
    InconsistentAngle { radians: f64, degrees: f64 },

    #[error("{0} must be a valued angle")]
    UnvaluedInput(&'static str),

    #[error("expected a full date and time, got {0:?}")]
    NotATimestamp(String),
}

pub type Result<T> = std::result::Result<T, Error>;
