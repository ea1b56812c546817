/*
  magicboard, a magic-bitboard attack oracle for 8x8 chess.

  This program is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  This program is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! `magicboard` computes attack sets for every 8x8 chess piece kind via
//! magic bitboards: an O(1), allocation-free lookup after a one-time
//! initialization pass. It answers "what can a piece on this square see
//! given this occupancy" and nothing about legality, check, castling
//! rights, or any other board-state concept — those live one layer up, in
//! whatever consumes this oracle.
//!
//! Call [`init_engine_tables`] once at start-up, then use the six query
//! functions ([`rook_attacks`], [`bishop_attacks`], [`queen_attacks`],
//! [`king_attacks`], [`knight_attacks`], [`pawn_attacks`]) from anywhere.

mod bits;
mod bitboard;
pub use bitboard::Bitboard;

mod color;
pub use color::Color;

mod direction;

mod error;
pub use error::TableInitError;

mod geometry;

mod leapers;

mod magic;
pub use magic::{rook_relevant_mask, bishop_relevant_mask, BISHOP_BITS, ROOK_BITS};

mod occupancy;

mod piece;
pub use piece::Piece;

mod rays;

mod square;
pub use square::Square;

mod state;
pub use state::{
    EngineTableOptions, EngineTables, LeapersReady, MagicsReady, MasksReady, Ready, Uninitialized,
};

use once_cell::sync::OnceCell;

static TABLES: OnceCell<EngineTables<Ready>> = OnceCell::new();

/// Build the leaper tables, relevant-occupancy masks, and magic attack
/// tables, and install the result as the process-wide singleton the six
/// query functions read from.
///
/// Calling this more than once is not an error: later calls are ignored and
/// the tables from the first successful call remain in effect, matching
/// `OnceCell`'s own semantics. This mirrors the "initialize once, query from
/// anywhere" usage pattern described for the ambient engine this crate is
/// meant to sit inside of.
///
/// # Errors
/// Returns [`TableInitError::PrecomputedMagicInvalid`] if a compiled-in
/// magic constant fails verification against the reference ray generator.
/// This is the only failure mode; an exhausted randomized search falls back
/// to the compiled-in magic for that square instead of failing (§7).
pub fn init_engine_tables(options: EngineTableOptions) -> Result<(), TableInitError> {
    if TABLES.get().is_some() {
        return Ok(());
    }
    let built = EngineTables::new()
        .with_leapers()
        .with_masks()
        .with_magics(options)?
        .finish();
    // ignore the race: if another thread beat us to it, its tables win and
    // are equivalent in every observable way (same options would yield the
    // same tables; different options racing each other is a caller error).
    let _ = TABLES.set(built);
    Ok(())
}

fn tables() -> &'static EngineTables<Ready> {
    TABLES
        .get()
        .expect("init_engine_tables must be called before any query")
}

/// Rook attacks from `sq` given `occupancy` (every piece on the board,
/// friend or foe — the caller subtracts friendly-occupied squares itself).
#[must_use]
pub fn rook_attacks(occupancy: Bitboard, sq: Square) -> Bitboard {
    tables().rook_attacks(occupancy, sq)
}

/// Bishop attacks from `sq` given `occupancy`.
#[must_use]
pub fn bishop_attacks(occupancy: Bitboard, sq: Square) -> Bitboard {
    tables().bishop_attacks(occupancy, sq)
}

/// Queen attacks from `sq` given `occupancy`: the union of rook and bishop
/// attacks from the same square (P5).
#[must_use]
pub fn queen_attacks(occupancy: Bitboard, sq: Square) -> Bitboard {
    tables().queen_attacks(occupancy, sq)
}

/// King attacks from `sq`. Occupancy-independent (I3); castling is out of
/// scope.
#[must_use]
pub fn king_attacks(sq: Square) -> Bitboard {
    tables().king_attacks(sq)
}

/// Knight attacks from `sq`. Occupancy-independent (I3).
#[must_use]
pub fn knight_attacks(sq: Square) -> Bitboard {
    tables().knight_attacks(sq)
}

/// Pawn capture attacks from `sq` for `color`. Occupancy-independent (I3);
/// quiet pushes and double pushes are out of scope.
#[must_use]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    tables().pawn_attacks(color, sq)
}

/// Render `b` as an 8x8 ASCII grid (rank 8 on top, file a on the left),
/// followed by its popcount and LSB index, for ad-hoc debugging.
pub fn print_bitboard(b: Bitboard) {
    println!("{b}");
    println!("popcount: {}", b.len());
    println!("lsb index: {}", b.lsb_index());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ensure_init() {
        init_engine_tables(EngineTableOptions::default()).expect("precomputed magics must verify");
    }

    #[test]
    fn public_api_rook_e4_empty_board() {
        ensure_init();
        assert_eq!(
            rook_attacks(Bitboard::EMPTY, Square::E4),
            Bitboard::new(0x0010_1010_EF10_1010)
        );
    }

    #[test]
    fn public_api_queen_is_rook_union_bishop() {
        ensure_init();
        let occ = Bitboard::from(Square::D5) | Bitboard::from(Square::B4);
        let expected = rook_attacks(occ, Square::D4) | bishop_attacks(occ, Square::D4);
        assert_eq!(queen_attacks(occ, Square::D4), expected);
    }

    #[test]
    fn public_api_king_and_knight_and_pawn() {
        ensure_init();
        assert_eq!(king_attacks(Square::A1).len(), 3);
        assert_eq!(knight_attacks(Square::B1).len(), 3);
        let attacks = pawn_attacks(Color::White, Square::E4);
        assert!(attacks.contains(Square::D5) && attacks.contains(Square::F5));
    }

    #[test]
    fn init_engine_tables_is_idempotent() {
        ensure_init();
        ensure_init();
    }
}
