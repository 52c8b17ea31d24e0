use serde::Deserialize;

/// Register layout of a 24-bit digital I/O card, relative to its base address.
///
/// The defaults describe the PCI-DIO-24: Port A at +0, Port B at +1 and the
/// control register at +3, programmed with `0x80` (all port groups output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CardLayout {
    #[serde(default = "default_port_a_offset")]
    pub port_a_offset: u16,
    #[serde(default = "default_port_b_offset")]
    pub port_b_offset: u16,
    #[serde(default = "default_control_offset")]
    pub control_offset: u16,
    #[serde(default = "default_control_word")]
    pub control_word: u8,
}

fn default_port_a_offset() -> u16 {
    0
}
fn default_port_b_offset() -> u16 {
    1
}
fn default_control_offset() -> u16 {
    3
}
fn default_control_word() -> u8 {
    0x80
}

impl Default for CardLayout {
    fn default() -> Self {
        Self {
            port_a_offset: default_port_a_offset(),
            port_b_offset: default_port_b_offset(),
            control_offset: default_control_offset(),
            control_word: default_control_word(),
        }
    }
}

impl CardLayout {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Largest register offset used by this layout.
    pub fn span(&self) -> u16 {
        self.port_a_offset
            .max(self.port_b_offset)
            .max(self.control_offset)
    }
}
