use super::{Lcdc, Ppu, SpriteAttributes};
use crate::machine::frame::Row;
use crate::machine::{MemoryBus, BGP, LCDC, OBP0, OBP1, SCX, SCY, WX, WY};
use crate::SCREEN_WIDTH;

const OAM: u16 = 0xFE00;
const OAM_ENTRIES: u16 = 40;
const MAX_SPRITES_PER_LINE: usize = 10;

/// One OAM entry that covers the current line.
#[derive(Clone, Copy, Debug)]
struct Sprite {
    oam_index: u8,
    /// Screen position of the left/top edge.
    x: i16,
    y: i16,
    tile: u8,
    attrs: SpriteAttributes,
}

/// A sprite pixel that won the per-pixel priority contest.
#[derive(Clone, Copy)]
struct SpritePixel {
    color: u8,
    attrs: SpriteAttributes,
}

impl Ppu {
    /// Compose the current line from background, window and sprites.
    pub(super) fn render_scanline(&mut self, bus: &MemoryBus) {
        let ly = self.scanline;
        let lcdc = Lcdc::from_bits_retain(bus.peek(LCDC));

        // Raw background/window colour indices, needed for sprite priority.
        let mut bg_colors = [0u8; SCREEN_WIDTH];
        let mut row: Row = [0; SCREEN_WIDTH];

        if lcdc.contains(Lcdc::BG_ENABLE) {
            render_background(bus, lcdc, ly, &mut bg_colors);
            if lcdc.contains(Lcdc::WINDOW_ENABLE) {
                self.render_window(bus, lcdc, ly, &mut bg_colors);
            }

            let bgp = bus.peek(BGP);
            for (shade, &color) in row.iter_mut().zip(bg_colors.iter()) {
                *shade = palette_shade(bgp, color);
            }
        }

        if lcdc.contains(Lcdc::OBJ_ENABLE) {
            render_sprites(bus, lcdc, ly, &bg_colors, &mut row);
        }

        self.frame.set_row(ly as usize, &row);
    }

    /// Overlay the window on `out` from WX-7 rightward once LY has reached
    /// WY. The window has its own line counter, so it resumes where it left
    /// off if it was hidden for some lines.
    fn render_window(&mut self, bus: &MemoryBus, lcdc: Lcdc, ly: u8, out: &mut [u8; SCREEN_WIDTH]) {
        let wy = bus.peek(WY);
        let wx = bus.peek(WX) as i16 - 7;
        if ly < wy || wx >= SCREEN_WIDTH as i16 {
            return;
        }

        let map_base: u16 = if lcdc.contains(Lcdc::WINDOW_MAP_9C00) {
            0x9C00
        } else {
            0x9800
        };
        let win_y = self.window_line;

        for x in wx.max(0)..SCREEN_WIDTH as i16 {
            let win_x = (x - wx) as u8;
            out[x as usize] = tile_map_pixel(bus, lcdc, map_base, win_x, win_y);
        }
        self.window_line = self.window_line.wrapping_add(1);
    }
}

fn render_background(bus: &MemoryBus, lcdc: Lcdc, ly: u8, out: &mut [u8; SCREEN_WIDTH]) {
    let map_base: u16 = if lcdc.contains(Lcdc::BG_MAP_9C00) {
        0x9C00
    } else {
        0x9800
    };
    let scx = bus.peek(SCX);
    let bg_y = ly.wrapping_add(bus.peek(SCY));

    for (x, color) in out.iter_mut().enumerate() {
        let bg_x = (x as u8).wrapping_add(scx);
        *color = tile_map_pixel(bus, lcdc, map_base, bg_x, bg_y);
    }
}

/// Colour index at (`x`, `y`) in the 256x256 plane described by the tile map
/// at `map_base`.
fn tile_map_pixel(bus: &MemoryBus, lcdc: Lcdc, map_base: u16, x: u8, y: u8) -> u8 {
    let tile_x = (x / 8) as u16;
    let tile_y = (y / 8) as u16;
    let tile_index = bus.peek(map_base + tile_y * 32 + tile_x);

    let tile_base = tile_data_addr(lcdc, tile_index);
    let (lo, hi) = tile_row(bus, tile_base, (y & 7) as u16);
    tile_pixel(lo, hi, x & 7)
}

/// Start of a background/window tile's data.
#[inline]
fn tile_data_addr(lcdc: Lcdc, tile_index: u8) -> u16 {
    if lcdc.contains(Lcdc::TILE_DATA_8000) {
        0x8000 + (tile_index as u16) * 16
    } else {
        // Signed index around 0x9000.
        0x9000u16.wrapping_add_signed((tile_index as i8 as i16) * 16)
    }
}

/// The two bit planes of one 8-pixel tile row.
#[inline]
fn tile_row(bus: &MemoryBus, tile_base: u16, fine_y: u16) -> (u8, u8) {
    let addr = tile_base.wrapping_add(fine_y * 2);
    (bus.peek(addr), bus.peek(addr.wrapping_add(1)))
}

/// Colour index of column `fine_x` (0 = leftmost) in a tile row.
#[inline]
fn tile_pixel(lo: u8, hi: u8, fine_x: u8) -> u8 {
    let bit = 7 - fine_x;
    (((hi >> bit) & 0x01) << 1) | ((lo >> bit) & 0x01)
}

#[inline]
fn palette_shade(palette: u8, color: u8) -> u8 {
    (palette >> (color * 2)) & 0x03
}

/// Up to ten sprites covering `ly`, in OAM order.
fn sprites_on_line(bus: &MemoryBus, ly: u8, height: i16) -> Vec<Sprite> {
    let line = ly as i16;
    let mut sprites = Vec::with_capacity(MAX_SPRITES_PER_LINE);
    for i in 0..OAM_ENTRIES {
        let base = OAM + i * 4;
        let y = bus.peek(base) as i16 - 16;
        if line < y || line >= y + height {
            continue;
        }
        sprites.push(Sprite {
            oam_index: i as u8,
            x: bus.peek(base + 1) as i16 - 8,
            y,
            tile: bus.peek(base + 2),
            attrs: SpriteAttributes::from_bits_retain(bus.peek(base + 3)),
        });
        if sprites.len() == MAX_SPRITES_PER_LINE {
            break;
        }
    }
    sprites
}

fn render_sprites(
    bus: &MemoryBus,
    lcdc: Lcdc,
    ly: u8,
    bg_colors: &[u8; SCREEN_WIDTH],
    row: &mut Row,
) {
    let height: i16 = if lcdc.contains(Lcdc::OBJ_SIZE_16) { 16 } else { 8 };
    let mut sprites = sprites_on_line(bus, ly, height);
    // Smaller X first; ties go to the lower OAM index.
    sprites.sort_by_key(|s| (s.x, s.oam_index));

    // Each pixel takes the first opaque sprite pixel in priority order.
    let mut winners: [Option<SpritePixel>; SCREEN_WIDTH] = [None; SCREEN_WIDTH];
    for sprite in &sprites {
        let mut tile = sprite.tile;
        if height == 16 {
            tile &= 0xFE;
        }

        let mut fine_y = ly as i16 - sprite.y;
        if sprite.attrs.contains(SpriteAttributes::FLIP_Y) {
            fine_y = height - 1 - fine_y;
        }
        let tile_base = 0x8000 + (tile as u16) * 16;
        let (lo, hi) = tile_row(bus, tile_base, fine_y as u16);

        for col in 0..8i16 {
            let screen_x = sprite.x + col;
            if !(0..SCREEN_WIDTH as i16).contains(&screen_x) {
                continue;
            }
            let slot = &mut winners[screen_x as usize];
            if slot.is_some() {
                continue;
            }

            let fine_x = if sprite.attrs.contains(SpriteAttributes::FLIP_X) {
                7 - col
            } else {
                col
            };
            let color = tile_pixel(lo, hi, fine_x as u8);
            // Colour 0 is transparent.
            if color != 0 {
                *slot = Some(SpritePixel {
                    color,
                    attrs: sprite.attrs,
                });
            }
        }
    }

    let obp0 = bus.peek(OBP0);
    let obp1 = bus.peek(OBP1);
    for (x, winner) in winners.iter().enumerate() {
        let Some(pixel) = winner else {
            continue;
        };
        if pixel.attrs.contains(SpriteAttributes::BEHIND_BG) && bg_colors[x] != 0 {
            continue;
        }
        let palette = if pixel.attrs.contains(SpriteAttributes::PALETTE_OBP1) {
            obp1
        } else {
            obp0
        };
        row[x] = palette_shade(palette, pixel.color);
    }
}
