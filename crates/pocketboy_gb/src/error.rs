use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The fetched byte is one of the holes in the opcode table. On hardware
    /// this hard-locks the CPU; we hand it back to the embedding application.
    #[error("unimplemented instruction 0x{opcode:02X} at 0x{addr:04X}")]
    UnknownOpcode { opcode: u8, addr: u16 },

    #[error("button index {0} out of range (expected 0..8)")]
    ButtonOutOfRange(usize),

    #[error("ROM image is {len} bytes, too small to hold a cartridge header")]
    RomTooSmall { len: usize },

    #[error("ROM image is {len} bytes; only 32 KiB images without bank switching are supported")]
    RomTooLarge { len: usize },

    #[error("ROM header logo does not match the boot signature")]
    BadLogo,
}
