use crate::traits::{HalError, PortBackend};

/// A single recorded port write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortWrite {
    pub port: u16,
    pub value: u8,
}

/// In-memory backend that records writes in issue order.
pub struct SimBackend {
    writes: Vec<PortWrite>,
    privileged: bool,
    acquire_count: u32,
    release_count: u32,
    fail_port: Option<u16>,
    deny_privilege: bool,
}

impl SimBackend {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            privileged: false,
            acquire_count: 0,
            release_count: 0,
            fail_port: None,
            deny_privilege: false,
        }
    }

    /// Make every write to `port` fail with an I/O error.
    pub fn fail_writes_to(&mut self, port: u16) {
        self.fail_port = Some(port);
    }

    /// Make `acquire_privilege` fail, as an unprivileged process would.
    pub fn deny_privilege(&mut self) {
        self.deny_privilege = true;
    }

    pub fn writes(&self) -> &[PortWrite] {
        &self.writes
    }

    /// Last value written to `port`, if any.
    pub fn last_value(&self, port: u16) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.port == port)
            .map(|w| w.value)
    }

    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    pub fn acquire_count(&self) -> u32 {
        self.acquire_count
    }

    pub fn release_count(&self) -> u32 {
        self.release_count
    }
}

impl Default for SimBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PortBackend for SimBackend {
    fn acquire_privilege(&mut self) -> Result<(), HalError> {
        if self.deny_privilege {
            return Err(HalError::PermissionDenied(
                "simulated privilege denial".into(),
            ));
        }
        self.acquire_count += 1;
        self.privileged = true;
        Ok(())
    }

    fn release_privilege(&mut self) -> Result<(), HalError> {
        self.release_count += 1;
        self.privileged = false;
        Ok(())
    }

    fn write_byte(&mut self, port: u16, value: u8) -> Result<(), HalError> {
        if !self.privileged {
            return Err(HalError::NotPrivileged { port });
        }
        if self.fail_port == Some(port) {
            return Err(HalError::PortWrite {
                port,
                source: std::io::Error::other("simulated bus error"),
            });
        }
        self.writes.push(PortWrite { port, value });
        Ok(())
    }
}
