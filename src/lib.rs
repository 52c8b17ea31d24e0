//! Set trigger lines on a 24-bit digital I/O card through direct port writes.
//!
//! `settrigger <base_addr_hex> [pin]...` drives the listed pins (1-16) high
//! and every other trigger line low.

pub mod args;
pub mod error;
pub mod trigger;

use error::TriggerError;
use trigger::TriggerWord;
use trigger_hal::{CardLayout, PortBackend, PrivilegeGuard};

/// Parse `args` (without the program name) and write the trigger word.
///
/// Arguments are validated before privilege is requested. Once acquired, the
/// privilege is released on every path out of this function.
pub fn run<I, S, B>(
    args: I,
    backend: &mut B,
    layout: &CardLayout,
) -> Result<TriggerWord, TriggerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    B: PortBackend + ?Sized,
{
    let invocation = args::parse_args(args, layout)?;
    let word = TriggerWord::from_pins(&invocation.pins);

    let mut guard = PrivilegeGuard::acquire(backend)?;
    trigger::apply(&mut guard, &invocation.ports, layout, word)?;
    guard.release()?;

    log::info!(
        "trigger word {:#06x} written at base {:#x} (A={:#04x} B={:#04x})",
        word.as_u16(),
        invocation.base,
        word.port_a,
        word.port_b
    );
    Ok(word)
}
