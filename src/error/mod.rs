use thiserror::Error;
use trigger_hal::HalError;

pub const EXIT_USAGE: i32 = 1;
pub const EXIT_INVALID_ARGUMENT: i32 = 2;
pub const EXIT_HARDWARE: i32 = 3;

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("missing base address")]
    Usage,
    #[error("invalid base address `{token}`: {reason}")]
    InvalidBaseAddress { token: String, reason: String },
    #[error("invalid pin `{0}`: expected a decimal number")]
    InvalidPin(String),
    #[error("pin {0} out of range 1-16")]
    PinOutOfRange(String),
    #[error(transparent)]
    Hal(#[from] HalError),
}

impl TriggerError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage => EXIT_USAGE,
            Self::InvalidBaseAddress { .. } | Self::InvalidPin(_) | Self::PinOutOfRange(_) => {
                EXIT_INVALID_ARGUMENT
            }
            Self::Hal(_) => EXIT_HARDWARE,
        }
    }
}
