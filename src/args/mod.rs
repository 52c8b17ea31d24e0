use crate::error::TriggerError;
use crate::trigger::{Pin, PortMap};
use std::ffi::OsString;
use trigger_hal::CardLayout;

/// A fully validated command line: `<base_addr_hex> [pin]...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub base: u16,
    pub ports: PortMap,
    pub pins: Vec<Pin>,
}

/// Parse the arguments that follow the program name.
///
/// Nothing here touches hardware, so every rejection happens before I/O
/// privilege is requested.
pub fn parse_args<I, S>(args: I, layout: &CardLayout) -> Result<Invocation, TriggerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    let base_token = args.next().ok_or(TriggerError::Usage)?;
    let base_token = base_token.as_ref();
    let base = parse_base_address(base_token)?;
    let ports = PortMap::new(base, layout).ok_or_else(|| TriggerError::InvalidBaseAddress {
        token: base_token.to_string(),
        reason: format!(
            "registers must fit below 0x10000 (max {:#x})",
            u16::MAX - layout.span()
        ),
    })?;
    let pins = args
        .map(|token| parse_pin(token.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Invocation { base, ports, pins })
}

/// Convert raw OS arguments to strings, rejecting tokens that are not UTF-8.
///
/// The first token is the base address, the rest are pins.
pub fn decode_args<I>(args: I) -> Result<Vec<String>, TriggerError>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, token)| {
            token.into_string().map_err(|raw| {
                let lossy = raw.to_string_lossy().into_owned();
                if i == 0 {
                    TriggerError::InvalidBaseAddress {
                        token: lossy,
                        reason: "not valid UTF-8".into(),
                    }
                } else {
                    TriggerError::InvalidPin(lossy)
                }
            })
        })
        .collect()
}

/// Hexadecimal base address; a `0x` prefix is tolerated but not required.
///
/// Only the 16-bit port space is checked here; `parse_args` also makes sure
/// every register of the card fits.
pub fn parse_base_address(token: &str) -> Result<u16, TriggerError> {
    let invalid = |reason: &str| TriggerError::InvalidBaseAddress {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid("expected hexadecimal digits"));
    }

    u16::from_str_radix(digits, 16).map_err(|_| invalid("outside the 16-bit port space"))
}

/// Decimal pin number in `PIN_MIN..=PIN_MAX`.
pub fn parse_pin(token: &str) -> Result<Pin, TriggerError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TriggerError::InvalidPin(token.to_string()));
    }
    token
        .parse::<u8>()
        .ok()
        .and_then(Pin::new)
        .ok_or_else(|| TriggerError::PinOutOfRange(token.to_string()))
}
