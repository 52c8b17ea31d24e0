//! Hardware boundary for the settrigger utility.
//!
//! A `PortBackend` performs byte-wide writes into the x86 I/O port space.
//! `IoPortBackend` talks to real hardware, `SimBackend` records writes for tests.
//! Port access always goes through a `PrivilegeGuard`.

pub mod config;
pub mod ioport;
pub mod privilege;
pub mod sim;
pub mod traits;

pub use config::CardLayout;
pub use ioport::IoPortBackend;
pub use privilege::PrivilegeGuard;
pub use sim::{PortWrite, SimBackend};
pub use traits::{HalError, PortBackend};
