//! Movement offsets for each piece type
//!
//! Offsets are `(Δfile, Δrank)` pairs seen from the first player (Black), where
//! moving toward rank 1 is `Δrank = -1`. Sliders are described as rays of up to
//! 8 steps; the caller truncates them at the board edge and at blocking pieces.
//! These tables only list candidate directions and say nothing about legality.

use super::{Color, PieceType};

/// A direction and how many times it may be repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ray {
    pub file: i8,
    pub rank: i8,
    pub max_steps: u8,
}

/// Longest possible slide on a 9x9 board
pub const MAX_SLIDE: u8 = 8;

const fn step(file: i8, rank: i8) -> Ray {
    Ray { file, rank, max_steps: 1 }
}

const fn slide(file: i8, rank: i8) -> Ray {
    Ray { file, rank, max_steps: MAX_SLIDE }
}

const PAWN: [Ray; 1] = [step(0, -1)];
const LANCE: [Ray; 1] = [slide(0, -1)];
const KNIGHT: [Ray; 2] = [step(-1, -2), step(1, -2)];
const SILVER: [Ray; 5] = [step(-1, -1), step(0, -1), step(1, -1), step(-1, 1), step(1, 1)];
const GOLD: [Ray; 6] = [
    step(-1, -1),
    step(0, -1),
    step(1, -1),
    step(-1, 0),
    step(1, 0),
    step(0, 1),
];
const KING: [Ray; 8] = [
    step(-1, -1),
    step(0, -1),
    step(1, -1),
    step(-1, 0),
    step(1, 0),
    step(-1, 1),
    step(0, 1),
    step(1, 1),
];
const BISHOP: [Ray; 4] = [slide(-1, -1), slide(1, -1), slide(-1, 1), slide(1, 1)];
const ROOK: [Ray; 4] = [slide(0, -1), slide(-1, 0), slide(1, 0), slide(0, 1)];
const HORSE: [Ray; 8] = [
    slide(-1, -1),
    slide(1, -1),
    slide(-1, 1),
    slide(1, 1),
    step(0, -1),
    step(-1, 0),
    step(1, 0),
    step(0, 1),
];
const DRAGON: [Ray; 8] = [
    slide(0, -1),
    slide(-1, 0),
    slide(1, 0),
    slide(0, 1),
    step(-1, -1),
    step(1, -1),
    step(-1, 1),
    step(1, 1),
];

/// Rays for a piece type from Black's perspective
pub const fn rays(pt: PieceType) -> &'static [Ray] {
    match pt {
        PieceType::Pawn => &PAWN,
        PieceType::Lance => &LANCE,
        PieceType::Knight => &KNIGHT,
        PieceType::Silver => &SILVER,
        PieceType::Gold
        | PieceType::ProPawn
        | PieceType::ProLance
        | PieceType::ProKnight
        | PieceType::ProSilver => &GOLD,
        PieceType::King => &KING,
        PieceType::Bishop => &BISHOP,
        PieceType::Rook => &ROOK,
        PieceType::Horse => &HORSE,
        PieceType::Dragon => &DRAGON,
    }
}

impl Ray {
    /// The same direction seen from `color` (White mirrors both axes)
    #[inline]
    pub const fn relative(self, color: Color) -> Ray {
        match color {
            Color::Black => self,
            Color::White => Ray { file: -self.file, rank: -self.rank, max_steps: self.max_steps },
        }
    }

    /// Offsets along the ray: `(file * k, rank * k)` for `k = 1..=max_steps`
    pub fn offsets(self) -> impl Iterator<Item = (i8, i8)> {
        (1..=self.max_steps as i8).map(move |k| (self.file * k, self.rank * k))
    }
}

/// All candidate offsets for `pt` owned by `color`, sliders expanded to 8 steps
pub fn offsets(pt: PieceType, color: Color) -> impl Iterator<Item = (i8, i8)> {
    rays(pt).iter().flat_map(move |ray| ray.relative(color).offsets())
}
