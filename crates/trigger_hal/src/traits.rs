use thiserror::Error;

#[derive(Debug, Error)]
pub enum HalError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("unsupported platform: {0}")]
    Unsupported(String),
    #[error("write to port {port:#06x} failed: {source}")]
    PortWrite {
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("write to port {port:#06x} attempted without I/O privilege")]
    NotPrivileged { port: u16 },
}

pub trait PortBackend {
    /// Raise the process to a level where direct port writes are allowed.
    fn acquire_privilege(&mut self) -> Result<(), HalError>;
    /// Drop back to unprivileged I/O.
    fn release_privilege(&mut self) -> Result<(), HalError>;
    /// Write one byte to an I/O port.
    fn write_byte(&mut self, port: u16, value: u8) -> Result<(), HalError>;
}

impl PortBackend for Box<dyn PortBackend> {
    fn acquire_privilege(&mut self) -> Result<(), HalError> {
        (**self).acquire_privilege()
    }
    fn release_privilege(&mut self) -> Result<(), HalError> {
        (**self).release_privilege()
    }
    fn write_byte(&mut self, port: u16, value: u8) -> Result<(), HalError> {
        (**self).write_byte(port, value)
    }
}
