use std::fmt;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// One row of shades.
pub type Row = [u8; SCREEN_WIDTH];

/// The 160x144 LCD as 2-bit shades, 0 (lightest) to 3 (darkest).
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: Box<[Row; SCREEN_HEIGHT]>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            rows: Box::new([[0; SCREEN_WIDTH]; SCREEN_HEIGHT]),
        }
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &SCREEN_WIDTH)
            .field("height", &SCREEN_HEIGHT)
            .finish_non_exhaustive()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shade at column `x`, row `y`. Out-of-range coordinates read 0.
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }

    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub(crate) fn set_row(&mut self, y: usize, row: &Row) {
        if let Some(dst) = self.rows.get_mut(y) {
            dst.copy_from_slice(row);
        }
    }

    /// Packed 8-bit RGB, three bytes per pixel, using the DMG grey ramp.
    pub fn to_rgb24(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SCREEN_WIDTH * SCREEN_HEIGHT * 3);
        for &shade in self.rows.iter().flatten() {
            let grey = shade_to_grey(shade);
            out.extend_from_slice(&[grey, grey, grey]);
        }
        out
    }

    /// One character per pixel, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((SCREEN_WIDTH + 1) * SCREEN_HEIGHT);
        for row in self.rows.iter() {
            out.extend(row.iter().map(|&shade| shade_to_char(shade)));
            out.push('\n');
        }
        out
    }
}

#[inline]
fn shade_to_grey(shade: u8) -> u8 {
    match shade & 0x03 {
        0 => 0xFF,
        1 => 0xAA,
        2 => 0x55,
        _ => 0x00,
    }
}

#[inline]
fn shade_to_char(shade: u8) -> char {
    match shade & 0x03 {
        0 => ' ',
        1 => '.',
        2 => '+',
        _ => '#',
    }
}
