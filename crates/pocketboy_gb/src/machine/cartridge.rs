use crate::{Error, Result};

/// Logo bitmap every cartridge carries at 0x0104..0x0134.
pub const NINTENDO_LOGO: [u8; 48] = [
    0xCE, 0xED, 0x66, 0x66, 0xCC, 0x0D, 0x00, 0x0B, 0x03, 0x73, 0x00, 0x83, 0x00, 0x0C, 0x00, 0x0D,
    0x00, 0x08, 0x11, 0x1F, 0x88, 0x89, 0x00, 0x0E, 0xDC, 0xCC, 0x6E, 0xE6, 0xDD, 0xDD, 0xD9, 0x99,
    0xBB, 0xBB, 0x67, 0x63, 0x6E, 0x0E, 0xEC, 0xCC, 0xDD, 0xDC, 0x99, 0x9F, 0xBB, 0xB9, 0x33, 0x3E,
];

const LOGO_START: usize = 0x0104;
const TITLE_START: usize = 0x0134;
const TITLE_END: usize = 0x0144;
const CART_TYPE: usize = 0x0147;
const HEADER_CHECKSUM: usize = 0x014D;
/// Smallest image that still holds a complete header.
const HEADER_END: usize = 0x0150;
/// Largest image that fits 0x0000..0x7FFF without a mapper.
const MAX_ROM_SIZE: usize = 0x8000;

/// A validated ROM image.
///
/// Only mapper-less 32 KiB images are accepted; anything that fails the
/// checks is rejected before a byte reaches the bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cartridge {
    rom: Vec<u8>,
    title: String,
}

impl Cartridge {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_END {
            return Err(Error::RomTooSmall { len: bytes.len() });
        }
        if bytes.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge { len: bytes.len() });
        }
        if bytes[LOGO_START..LOGO_START + NINTENDO_LOGO.len()] != NINTENDO_LOGO {
            return Err(Error::BadLogo);
        }

        let title = parse_title(&bytes[TITLE_START..TITLE_END]);

        let expected = bytes[HEADER_CHECKSUM];
        let actual = header_checksum(bytes);
        if expected != actual {
            log::warn!(
                "header checksum mismatch: header says 0x{:02X}, computed 0x{:02X}",
                expected,
                actual
            );
        }

        let cart_type = bytes[CART_TYPE];
        if cart_type != 0x00 {
            log::warn!(
                "cartridge type 0x{:02X} declares a mapper; running it as ROM only",
                cart_type
            );
        }

        log::info!("loaded \"{}\" ({} bytes)", title, bytes.len());

        Ok(Self {
            rom: bytes.to_vec(),
            title,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    pub fn cart_type(&self) -> u8 {
        self.rom[CART_TYPE]
    }

    pub fn header_checksum_ok(&self) -> bool {
        self.rom[HEADER_CHECKSUM] == header_checksum(&self.rom)
    }
}

/// Upper-case ASCII title, cut at the first NUL.
fn parse_title(raw: &[u8]) -> String {
    raw.iter()
        .take_while(|&&b| b != 0)
        .filter(|b| b.is_ascii_graphic() || **b == b' ')
        .map(|&b| b as char)
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// x = x - byte - 1 over 0x0134..=0x014C.
fn header_checksum(rom: &[u8]) -> u8 {
    rom[TITLE_START..HEADER_CHECKSUM]
        .iter()
        .fold(0u8, |x, &b| x.wrapping_sub(b).wrapping_sub(1))
}
