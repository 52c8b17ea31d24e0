//! Direct x86 port I/O for Linux user space.
//!
//! `iopl(3)` lifts the whole 64K port space into reach of the process (the
//! card's PCI base is usually above the 0x3ff ceiling of `ioperm`), and
//! `iopl(0)` drops it again. This needs root or `CAP_SYS_RAWIO`.

use crate::traits::{HalError, PortBackend};

#[derive(Debug, Default)]
pub struct IoPortBackend {
    privileged: bool,
}

impl IoPortBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(all(target_os = "linux", target_env = "gnu", target_arch = "x86_64"))]
mod raw {
    use crate::traits::HalError;

    pub fn set_iopl(level: libc::c_int) -> Result<(), HalError> {
        let rc = unsafe { libc::iopl(level) };
        if rc == 0 {
            Ok(())
        } else {
            Err(HalError::PermissionDenied(format!(
                "iopl({level}): {}",
                std::io::Error::last_os_error()
            )))
        }
    }

    /// # Safety
    /// The caller must hold I/O privilege and `port` must belong to a device
    /// that tolerates the write.
    pub unsafe fn outb(port: u16, value: u8) {
        unsafe {
            core::arch::asm!(
                "out dx, al",
                in("dx") port,
                in("al") value,
                options(nostack, preserves_flags)
            );
        }
    }
}

#[cfg(all(target_os = "linux", target_env = "gnu", target_arch = "x86_64"))]
impl PortBackend for IoPortBackend {
    fn acquire_privilege(&mut self) -> Result<(), HalError> {
        raw::set_iopl(3)?;
        self.privileged = true;
        Ok(())
    }

    fn release_privilege(&mut self) -> Result<(), HalError> {
        self.privileged = false;
        raw::set_iopl(0)
    }

    fn write_byte(&mut self, port: u16, value: u8) -> Result<(), HalError> {
        if !self.privileged {
            return Err(HalError::NotPrivileged { port });
        }
        unsafe { raw::outb(port, value) };
        Ok(())
    }
}

#[cfg(not(all(target_os = "linux", target_env = "gnu", target_arch = "x86_64")))]
impl PortBackend for IoPortBackend {
    fn acquire_privilege(&mut self) -> Result<(), HalError> {
        Err(HalError::Unsupported(
            "direct port I/O requires Linux on x86_64".into(),
        ))
    }

    fn release_privilege(&mut self) -> Result<(), HalError> {
        self.privileged = false;
        Ok(())
    }

    fn write_byte(&mut self, port: u16, _value: u8) -> Result<(), HalError> {
        Err(HalError::NotPrivileged { port })
    }
}
