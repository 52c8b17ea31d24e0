//! Scoped I/O privilege.
//!
//! Port writes are only reachable through a live `PrivilegeGuard`, and the
//! guard gives the privilege back exactly once: explicitly via `release`, or
//! on drop when an error unwinds the caller early.

use crate::traits::{HalError, PortBackend};

pub struct PrivilegeGuard<'a, B: PortBackend + ?Sized> {
    backend: &'a mut B,
    held: bool,
}

impl<'a, B: PortBackend + ?Sized> PrivilegeGuard<'a, B> {
    pub fn acquire(backend: &'a mut B) -> Result<Self, HalError> {
        backend.acquire_privilege()?;
        log::debug!("I/O privilege acquired");
        Ok(Self {
            backend,
            held: true,
        })
    }

    pub fn write_byte(&mut self, port: u16, value: u8) -> Result<(), HalError> {
        log::debug!("outb port={port:#06x} value={value:#04x}");
        self.backend.write_byte(port, value)
    }

    /// Release the privilege and report failure to the caller.
    pub fn release(mut self) -> Result<(), HalError> {
        self.held = false;
        let result = self.backend.release_privilege();
        if result.is_ok() {
            log::debug!("I/O privilege released");
        }
        result
    }
}

impl<B: PortBackend + ?Sized> Drop for PrivilegeGuard<'_, B> {
    fn drop(&mut self) {
        if !self.held {
            return;
        }
        self.held = false;
        match self.backend.release_privilege() {
            Ok(()) => log::debug!("I/O privilege released on early exit"),
            Err(e) => log::warn!("failed to release I/O privilege: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBackend;

    #[test]
    fn explicit_release_happens_once() {
        let mut sim = SimBackend::new();
        {
            let mut guard = PrivilegeGuard::acquire(&mut sim).unwrap();
            guard.write_byte(0x300, 0x01).unwrap();
            guard.release().unwrap();
        }
        assert_eq!(sim.acquire_count(), 1);
        assert_eq!(sim.release_count(), 1);
        assert!(!sim.is_privileged());
    }

    #[test]
    fn drop_releases_after_failed_write() {
        let mut sim = SimBackend::new();
        sim.fail_writes_to(0x300);
        {
            let mut guard = PrivilegeGuard::acquire(&mut sim).unwrap();
            assert!(guard.write_byte(0x300, 0x01).is_err());
        }
        assert_eq!(sim.release_count(), 1);
        assert!(!sim.is_privileged());
    }

    #[test]
    fn failed_acquire_releases_nothing() {
        let mut sim = SimBackend::new();
        sim.deny_privilege();
        assert!(PrivilegeGuard::acquire(&mut sim).is_err());
        assert_eq!(sim.release_count(), 0);
    }

    #[test]
    fn works_through_boxed_backend() {
        let mut boxed: Box<dyn PortBackend> = Box::new(SimBackend::new());
        let mut guard = PrivilegeGuard::acquire(&mut boxed).unwrap();
        guard.write_byte(0x300, 0x01).unwrap();
        guard.release().unwrap();
    }
}
