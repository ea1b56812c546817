//! Precomputed leaper tables (C7): king, knight, and pawn-capture attacks,
//! one dense 64-entry array each, built once from [`crate::rays`]'s leaper
//! generators.
//!
//! Grounded on the teacher engine's `KNIGHT_MOVES`/`KING_MOVES`/
//! `PAWN_ATTACKS` statics in its move generator, which are likewise built by
//! running a per-square generator across the whole board once at program
//! startup and handed out from a `Lazy` thereafter.

use std::convert::TryFrom;

use once_cell::sync::Lazy;

use super::rays::{king_leaper, knight_leaper, pawn_leaper};
use super::{Bitboard, Color, Square};

static KING_TABLE: Lazy<[Bitboard; 64]> = Lazy::new(|| build_table(king_leaper));
static KNIGHT_TABLE: Lazy<[Bitboard; 64]> = Lazy::new(|| build_table(knight_leaper));
static WHITE_PAWN_TABLE: Lazy<[Bitboard; 64]> =
    Lazy::new(|| build_table(|sq| pawn_leaper(Color::White, sq)));
static BLACK_PAWN_TABLE: Lazy<[Bitboard; 64]> =
    Lazy::new(|| build_table(|sq| pawn_leaper(Color::Black, sq)));

fn build_table(f: impl Fn(Square) -> Bitboard) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for (i, slot) in table.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let sq = Square::try_from(i as u8).unwrap();
        *slot = f(sq);
    }
    table
}

/// King attacks from `sq`, occupancy-independent (I3).
#[inline(always)]
#[must_use]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_TABLE[sq as usize]
}

/// Knight attacks from `sq`, occupancy-independent (I3).
#[inline(always)]
#[must_use]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_TABLE[sq as usize]
}

/// Pawn capture attacks from `sq` for `color`, occupancy-independent (I3).
/// Quiet pushes are out of scope (§4.3).
#[inline(always)]
#[must_use]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_TABLE[sq as usize],
        Color::Black => BLACK_PAWN_TABLE[sq as usize],
    }
}
