//! The occupancy enumerator (C4): a bijection between `[0, 2^k)` and the
//! `2^k` subsets of a k-bit mask.
//!
//! Historical note (§9): one revision of the source this spec was distilled
//! from reused its mask-bit-position loop variable as if it were a board
//! index, mixing the two. The loop variable below (`count`, counted from
//! the LSB of `mask`) is only ever used to pick the `index` bit that gates
//! whether the *next* occupier bit gets included — it never stands in for a
//! board square directly. [`crate::magic`]'s P2 masking test exercises this.

use super::Bitboard;

/// Given a mask with popcount k, produce the `index`-th of its `2^k`
/// subsets: the subset whose j-th set bit (counted from the mask's LSB) is
/// included iff bit j of `index` is set.
///
/// `index` must be less than `2^mask.len()`; out-of-range bits of `index`
/// are simply never consulted, so this never panics.
pub fn index_to_occupancy(index: usize, mask: Bitboard) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    let num_points = mask.len();
    let mut remaining_mask = mask;

    for count in 0..num_points {
        let shift_size = remaining_mask.trailing_zeros();
        let occupier = Bitboard::new(1u64 << shift_size);
        remaining_mask &= !occupier;
        if (index & (1 << count)) != 0 {
            result |= occupier;
        }
    }

    result
}
