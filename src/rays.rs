//! The reference generator (C3): ground-truth attack sets computed by
//! walking rays one square at a time, and the single-step leaper generators
//! built directly from the wrap-guarded shifts in [`crate::geometry`].
//!
//! `ray_walk` is deliberately simple and slow relative to a magic-table
//! lookup — that's the point. It is both the oracle of correctness the
//! magic search is built to match (I1) and the on-the-fly fallback used
//! while populating the attack tables (§4.3), so its own correctness has to
//! be obvious by inspection rather than by being fast.

use super::direction::Direction;
use super::geometry;
use super::{Bitboard, Color, Square};

/// Walk every ray in `dirs` from `sq`, stopping at (and including) the
/// first square set in `occupancy`, or at the board edge if none is hit.
pub fn ray_walk(dirs: &[Direction], sq: Square, occupancy: Bitboard) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    for dir in dirs {
        let mut current = sq;
        for _ in 0..7 {
            if !is_single_step(current, *dir) {
                break;
            }
            current = current + *dir;
            result.insert(current);
            if occupancy.contains(current) {
                break;
            }
        }
    }
    result
}

/// Ground-truth rook attacks from `sq` given `occupancy`.
pub fn rook_ray_walk(sq: Square, occupancy: Bitboard) -> Bitboard {
    ray_walk(&Direction::ROOK_DIRECTIONS, sq, occupancy)
}

/// Ground-truth bishop attacks from `sq` given `occupancy`.
pub fn bishop_ray_walk(sq: Square, occupancy: Bitboard) -> Bitboard {
    ray_walk(&Direction::BISHOP_DIRECTIONS, sq, occupancy)
}

/// Ground-truth queen attacks from `sq` given `occupancy`: the union of the
/// rook and bishop rays (P5 is exactly this identity, re-derived at the
/// table level rather than assumed).
pub fn queen_ray_walk(sq: Square, occupancy: Bitboard) -> Bitboard {
    rook_ray_walk(sq, occupancy) | bishop_ray_walk(sq, occupancy)
}

/// Whether stepping from `sq` in direction `dir` lands on an adjacent square
/// rather than wrapping around a rank edge. Ray-walking uses `Square`
/// arithmetic (which silently wraps modulo 64) rather than the bitboard
/// shifts in `geometry`, so this Chebyshev-distance check is what keeps a
/// ray from "teleporting" across the board the way an unguarded `Square +
/// Direction` chain would.
fn is_single_step(sq: Square, dir: Direction) -> bool {
    sq.chebyshev_to(sq + dir) <= 1
}

/// King attacks from `sq`: the square shifted by each of the 8
/// cardinal/diagonal directions, wrap-guarded, unioned. Occupancy-independent.
pub fn king_leaper(sq: Square) -> Bitboard {
    let b = Bitboard::from(sq);
    geometry::north(b)
        | geometry::south(b)
        | geometry::east(b)
        | geometry::west(b)
        | geometry::north_east(b)
        | geometry::north_west(b)
        | geometry::south_east(b)
        | geometry::south_west(b)
}

/// Knight attacks from `sq`: the square shifted by each of the 8 knight
/// offsets, wrap-guarded, unioned. Occupancy-independent.
pub fn knight_leaper(sq: Square) -> Bitboard {
    let b = Bitboard::from(sq);
    geometry::nne(b)
        | geometry::nnw(b)
        | geometry::nee(b)
        | geometry::nww(b)
        | geometry::sse(b)
        | geometry::ssw(b)
        | geometry::see(b)
        | geometry::sww(b)
}

/// Pawn capture attacks from `sq` for `color`: NW/NE for white, SW/SE for
/// black. Quiet pushes and double pushes are out of scope — this returns
/// captures only, per §4.3.
pub fn pawn_leaper(color: Color, sq: Square) -> Bitboard {
    let b = Bitboard::from(sq);
    match color {
        Color::White => geometry::north_west(b) | geometry::north_east(b),
        Color::Black => geometry::south_west(b) | geometry::south_east(b),
    }
}
