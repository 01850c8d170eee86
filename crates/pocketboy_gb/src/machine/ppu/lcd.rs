use bitflags::bitflags;

bitflags! {
    /// LCD control register (0xFF40).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Lcdc: u8 {
        const BG_ENABLE = 1 << 0;
        const OBJ_ENABLE = 1 << 1;
        /// 8x16 sprites instead of 8x8.
        const OBJ_SIZE_16 = 1 << 2;
        /// Background tile map at 0x9C00 instead of 0x9800.
        const BG_MAP_9C00 = 1 << 3;
        /// Unsigned tile numbers from 0x8000 instead of signed from 0x9000.
        const TILE_DATA_8000 = 1 << 4;
        const WINDOW_ENABLE = 1 << 5;
        /// Window tile map at 0x9C00 instead of 0x9800.
        const WINDOW_MAP_9C00 = 1 << 6;
        const LCD_ENABLE = 1 << 7;
    }
}

bitflags! {
    /// LCD status register (0xFF41).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Stat: u8 {
        const MODE_LOW = 1 << 0;
        const MODE_HIGH = 1 << 1;
        /// LY == LYC.
        const COINCIDENCE = 1 << 2;
        const HBLANK_INT = 1 << 3;
        const VBLANK_INT = 1 << 4;
        const OAM_INT = 1 << 5;
        const LYC_INT = 1 << 6;

        const MODE_MASK = Self::MODE_LOW.bits() | Self::MODE_HIGH.bits();
    }
}

bitflags! {
    /// Sprite attribute byte (OAM entry byte 3).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SpriteAttributes: u8 {
        const PALETTE_OBP1 = 1 << 4;
        const FLIP_X = 1 << 5;
        const FLIP_Y = 1 << 6;
        /// Hide behind non-zero background pixels.
        const BEHIND_BG = 1 << 7;
    }
}

/// PPU modes, valued as reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    #[default]
    OamScan = 2,
    Transfer = 3,
}

impl Mode {
    /// Cycles spent in this mode on a visible line. V-Blank is counted per
    /// line.
    pub const fn cycles(self) -> u32 {
        match self {
            Mode::OamScan => 80,
            Mode::Transfer => 172,
            Mode::HBlank => 204,
            Mode::VBlank => 456,
        }
    }

    /// STAT interrupt-select bit for this mode; pixel transfer has none.
    pub fn interrupt_select(self) -> Stat {
        match self {
            Mode::HBlank => Stat::HBLANK_INT,
            Mode::VBlank => Stat::VBLANK_INT,
            Mode::OamScan => Stat::OAM_INT,
            Mode::Transfer => Stat::empty(),
        }
    }
}
