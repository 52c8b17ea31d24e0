//! Pin-to-port mapping and the register write sequence.
//!
//! Pins 1-8 drive bits 0-7 of Port A, pins 9-16 drive bits 0-7 of Port B.
//! The card is wired so that these 16 lines feed the trigger input of the
//! acquisition device.

use trigger_hal::{CardLayout, HalError, PortBackend, PrivilegeGuard};

pub const PIN_MIN: u8 = 1;
pub const PIN_MAX: u8 = 16;

/// A trigger line number in `PIN_MIN..=PIN_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pin(u8);

impl Pin {
    pub fn new(number: u8) -> Option<Self> {
        (PIN_MIN..=PIN_MAX).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

/// The two output bytes carrying the 16-bit trigger word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerWord {
    pub port_a: u8,
    pub port_b: u8,
}

impl TriggerWord {
    pub fn from_pins<'a>(pins: impl IntoIterator<Item = &'a Pin>) -> Self {
        let mut word = Self::default();
        for pin in pins {
            word.set(*pin);
        }
        word
    }

    pub fn set(&mut self, pin: Pin) {
        let n = pin.number();
        if n <= 8 {
            self.port_a |= 1 << (n - 1);
        } else {
            self.port_b |= 1 << (n - 9);
        }
    }

    pub fn as_u16(self) -> u16 {
        u16::from_le_bytes([self.port_a, self.port_b])
    }
}

/// Absolute port addresses for one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMap {
    pub data_a: u16,
    pub data_b: u16,
    pub control: u16,
}

impl PortMap {
    /// Returns `None` if any register would fall outside the 16-bit port space.
    pub fn new(base: u16, layout: &CardLayout) -> Option<Self> {
        Some(Self {
            data_a: base.checked_add(layout.port_a_offset)?,
            data_b: base.checked_add(layout.port_b_offset)?,
            control: base.checked_add(layout.control_offset)?,
        })
    }
}

/// Put the card in output mode, then write Port A followed by Port B.
///
/// The two data writes are separate bus cycles; a device sampling the lines
/// between them sees the new low byte with the old high byte.
pub fn apply<B: PortBackend + ?Sized>(
    guard: &mut PrivilegeGuard<'_, B>,
    ports: &PortMap,
    layout: &CardLayout,
    word: TriggerWord,
) -> Result<(), HalError> {
    guard.write_byte(ports.control, layout.control_word)?;
    guard.write_byte(ports.data_a, word.port_a)?;
    guard.write_byte(ports.data_b, word.port_b)?;
    Ok(())
}
