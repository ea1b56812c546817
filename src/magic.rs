//! Magic bitboards (C5 + C6): per-square relevant-occupancy masks, the
//! randomized magic-number search, and the dense attack tables the search
//! populates.
//!
//! Grounded on the teacher engine's own `magic.rs` (the `SquareAttacks`
//! layout, the saved magic/relevant-bit constants, `index_to_occupancy`) and
//! on its `wizard.rs` magic-search binary (the parallel `xorshift64` search
//! loop, seeded per worker). The precomputed magic/relevant-bit constants
//! below are carried over verbatim, since they are canonical, reproducible
//! numbers rather than anything tied to the teacher's own identity.

use super::error::{MagicSearchExhausted, TableInitError};
use super::occupancy::index_to_occupancy;
use super::rays::{bishop_ray_walk, rook_ray_walk};
use super::{Bitboard, Piece, Square};

use std::convert::TryFrom;
use std::thread;

/// The number of bits used to express the magic lookup for a rook at each
/// square.
pub const ROOK_BITS: [u8; 64] = [
    12, 11, 11, 11, 11, 11, 11, 12, // rank 1
    11, 10, 10, 10, 10, 10, 10, 11, // 2
    11, 10, 10, 10, 10, 10, 10, 11, // 3
    11, 10, 10, 10, 10, 10, 10, 11, // 4
    11, 10, 10, 10, 10, 10, 10, 11, // 5
    11, 10, 10, 10, 10, 10, 10, 11, // 6
    10, 9, 9, 9, 9, 9, 9, 10, // 7
    11, 10, 10, 10, 10, 11, 10, 11, // 8
];

/// The number of bits used to express the magic lookup for a bishop at each
/// square.
pub const BISHOP_BITS: [u8; 64] = [
    5, 4, 5, 5, 5, 5, 4, 5, // rank 1
    4, 4, 5, 5, 5, 5, 4, 4, // 2
    4, 4, 7, 7, 7, 7, 4, 4, // 3
    5, 5, 7, 9, 9, 7, 5, 5, // 4
    5, 5, 7, 9, 9, 7, 5, 5, // 5
    4, 4, 7, 7, 7, 7, 4, 4, // 6
    4, 4, 5, 5, 5, 5, 4, 4, // 7
    5, 4, 5, 5, 5, 5, 4, 5, // 8
];

/// Compiled-in, vetted magic multipliers for the rook, one per square.
/// Canonical and reproducible; any build may ship these verbatim.
pub const SAVED_ROOK_MAGICS: [Bitboard; 64] = [
    Bitboard::new(0x4080_0020_4000_1480),
    Bitboard::new(0x0040_0010_0140_2000),
    Bitboard::new(0x0300_2000_1810_4100),
    Bitboard::new(0x2100_0409_0110_0120),
    Bitboard::new(0x8a00_0600_0408_2070),
    Bitboard::new(0x0080_0144_0002_0080),
    Bitboard::new(0x1100_2500_208a_0004),
    Bitboard::new(0x0900_0042_2201_8100),
    Bitboard::new(0x0208_8002_28c0_0081),
    Bitboard::new(0x2280_4010_0340_2000),
    Bitboard::new(0x0008_8010_0020_0184),
    Bitboard::new(0x0001_0020_1000_0900),
    Bitboard::new(0x0182_0006_0010_6008),
    Bitboard::new(0x2058_8004_0080_0200),
    Bitboard::new(0x0004_8002_0080_0900),
    Bitboard::new(0x052d_0012_0040_a100),
    Bitboard::new(0x0540_0880_0080_24c1),
    Bitboard::new(0x2000_8480_4002_2000),
    Bitboard::new(0x0400_4100_1100_6000),
    Bitboard::new(0x0040_a100_3001_0108),
    Bitboard::new(0x1204_8080_0800_0402),
    Bitboard::new(0x0802_8080_0400_2201),
    Bitboard::new(0x1002_8080_5200_0500),
    Bitboard::new(0x0004_0a00_2112_4184),
    Bitboard::new(0x0640_0128_8008_8040),
    Bitboard::new(0x8410_4000_8020_008a),
    Bitboard::new(0x0400_2008_8010_0080),
    Bitboard::new(0x2001_0121_0009_1004),
    Bitboard::new(0x1200_0d01_0008_0010),
    Bitboard::new(0x6004_0004_0120_1008),
    Bitboard::new(0x7500_aa04_0008_4110),
    Bitboard::new(0x0100_0052_0004_0981),
    Bitboard::new(0x0040_8040_0280_0020),
    Bitboard::new(0x0470_0020_0640_0240),
    Bitboard::new(0x0001_2000_8080_1000),
    Bitboard::new(0x0000_0812_0200_2040),
    Bitboard::new(0x00c0_8044_0080_0800),
    Bitboard::new(0x9000_800a_0080_0400),
    Bitboard::new(0x0001_0004_0100_0600),
    Bitboard::new(0x0042_1088_ca00_2401),
    Bitboard::new(0x0000_c000_228d_8000),
    Bitboard::new(0x6410_0420_1440_4001),
    Bitboard::new(0x1002_0040_8226_0014),
    Bitboard::new(0x206a_0088_11c2_0021),
    Bitboard::new(0x0002_0018_1022_0024),
    Bitboard::new(0x2001_0200_0400_8080),
    Bitboard::new(0x1000_0801_100c_001a),
    Bitboard::new(0x0048_0082_5402_0011),
    Bitboard::new(0x48FF_FE99_FECF_AA00),
    Bitboard::new(0x48FF_FE99_FECF_AA00),
    Bitboard::new(0x497F_FFAD_FF9C_2E00),
    Bitboard::new(0x613F_FFDD_FFCE_9200),
    Bitboard::new(0xffff_ffe9_ffe7_ce00),
    Bitboard::new(0xffff_fff5_fff3_e600),
    Bitboard::new(0x0003_ff95_e5e6_a4c0),
    Bitboard::new(0x510F_FFF5_F63C_96A0),
    Bitboard::new(0xEBFF_FFB9_FF9F_C526),
    Bitboard::new(0x61FF_FEDD_FEED_AEAE),
    Bitboard::new(0x53BF_FFED_FFDE_B1A2),
    Bitboard::new(0x127F_FFB9_FFDF_B5F6),
    Bitboard::new(0x411F_FFDD_FFDB_F4D6),
    Bitboard::new(0x0822_0024_0810_4502),
    Bitboard::new(0x0003_ffef_27ee_be74),
    Bitboard::new(0x7645_FFFE_CBFE_A79E),
];

/// Compiled-in, vetted magic multipliers for the bishop, one per square.
pub const SAVED_BISHOP_MAGICS: [Bitboard; 64] = [
    Bitboard::new(0xffed_f9fd_7cfc_ffff),
    Bitboard::new(0xfc09_6285_4a77_f576),
    Bitboard::new(0x0012_2808_c102_a004),
    Bitboard::new(0x2851_2400_8240_0440),
    Bitboard::new(0x0011_1040_1100_0202),
    Bitboard::new(0x0008_2208_2000_0010),
    Bitboard::new(0xfc0a_66c6_4a7e_f576),
    Bitboard::new(0x7ffd_fdfc_bd79_ffff),
    Bitboard::new(0xfc08_46a6_4a34_fff6),
    Bitboard::new(0xfc08_7a87_4a3c_f7f6),
    Bitboard::new(0x0009_8802_0420_a000),
    Bitboard::new(0x8000_4404_0080_8200),
    Bitboard::new(0x208c_8450_c001_3407),
    Bitboard::new(0x1980_1105_2010_8030),
    Bitboard::new(0xfc08_64ae_59b4_ff76),
    Bitboard::new(0x3c08_60af_4b35_ff76),
    Bitboard::new(0x73C0_1AF5_6CF4_CFFB),
    Bitboard::new(0x41A0_1CFA_D64A_AFFC),
    Bitboard::new(0x0604_0002_04a2_0202),
    Bitboard::new(0x0002_8208_0602_4000),
    Bitboard::new(0x008a_0024_2201_0201),
    Bitboard::new(0x2082_0040_8801_0802),
    Bitboard::new(0x7c0c_028f_5b34_ff76),
    Bitboard::new(0xfc0a_028e_5ab4_df76),
    Bitboard::new(0x0810_0420_d104_1080),
    Bitboard::new(0x0904_5100_0210_0100),
    Bitboard::new(0x0202_2808_0406_4403),
    Bitboard::new(0x004c_0040_0c03_0082),
    Bitboard::new(0x0602_0010_0200_5011),
    Bitboard::new(0x7209_0200_c108_9000),
    Bitboard::new(0x4211_4104_2400_8805),
    Bitboard::new(0x0002_8484_2126_0804),
    Bitboard::new(0xc001_0412_1121_2004),
    Bitboard::new(0x0208_0188_0004_4800),
    Bitboard::new(0x0080_2064_1058_0800),
    Bitboard::new(0x0000_2011_0008_0084),
    Bitboard::new(0x0208_0034_0009_4100),
    Bitboard::new(0x2190_4102_0000_4058),
    Bitboard::new(0x0188_8214_0180_8080),
    Bitboard::new(0x2006_0a02_0000_c4c0),
    Bitboard::new(0xDCEF_D9B5_4BFC_C09F),
    Bitboard::new(0xF95F_FA76_5AFD_602B),
    Bitboard::new(0x200a_1041_1000_2040),
    Bitboard::new(0x0800_000c_0831_0c00),
    Bitboard::new(0x0218_0401_0a01_0400),
    Bitboard::new(0x1092_2004_0022_4100),
    Bitboard::new(0x43ff_9a5c_f4ca_0c01),
    Bitboard::new(0x4BFF_CD8E_7C58_7601),
    Bitboard::new(0xfc0f_f286_5334_f576),
    Bitboard::new(0xfc0b_f6ce_5924_f576),
    Bitboard::new(0x8052_2060_8c30_0001),
    Bitboard::new(0x2084_1050_4202_0400),
    Bitboard::new(0xe018_8010_2206_0220),
    Bitboard::new(0x0001_1220_4901_0200),
    Bitboard::new(0xc3ff_b7dc_36ca_8c89),
    Bitboard::new(0xc3ff_8a54_f4ca_2c89),
    Bitboard::new(0xffff_fcfc_fd79_edff),
    Bitboard::new(0xfc08_63fc_cb14_7576),
    Bitboard::new(0x40a0_0400_6213_3000),
    Bitboard::new(0x0142_0280_0084_0400),
    Bitboard::new(0x0009_0900_1006_1200),
    Bitboard::new(0x0800_8445_2810_0308),
    Bitboard::new(0xfc08_7e8e_4bb2_f736),
    Bitboard::new(0x43ff_9e4e_f4ca_2c89),
];

/// Quick-reject heuristic mask: the rank-8 *high* byte, not the low byte.
/// Flagged explicitly in the design notes (§9) because one historical
/// revision of the source used the low-byte `0xFF` here by mistake, which
/// silently defeats the heuristic (it tests whether the multiply spread
/// bits into the *bottom* byte rather than the top one the shift actually
/// keeps).
const RANK_8_HIGH_BYTE: u64 = 0xFF00_0000_0000_0000;

/// Create the relevant-occupancy mask for a rook on `sq`: the rank/file
/// cross, minus both end squares of each arm (I4 — edges are terminal
/// regardless of occupancy, so they never affect the attack set and are
/// excluded from the mask).
pub fn rook_relevant_mask(sq: Square) -> Bitboard {
    let index = sq as i8;
    let row_mask = Bitboard::new(0x7E << (8 * (index / 8)));
    let col_mask = Bitboard::new(0x0001_0101_0101_0100 << (index % 8));
    (row_mask ^ col_mask) & !Bitboard::from(sq)
}

/// Create the relevant-occupancy mask for a bishop on `sq`: its two
/// diagonals, minus the board's outer ring (the diagonals always terminate
/// there regardless of occupancy).
pub fn bishop_relevant_mask(sq: Square) -> Bitboard {
    const RING_MASK: Bitboard = Bitboard::new(0xFF81_8181_8181_81FF);
    Bitboard::diags(sq) & !RING_MASK
}

#[inline(always)]
fn magic_key(occupancy: Bitboard, magic: Bitboard, shift: u8) -> usize {
    usize::from((occupancy * magic) >> shift)
}

/// A small-state xorshift64 PRNG, seeded explicitly so the magic search is
/// reproducible given a fixed seed (§4.5, §9 — "one documented small-state
/// generator ... seeded from an explicit parameter").
struct Xorshift64(u64);

impl Xorshift64 {
    fn new(seed: u64) -> Self {
        // xorshift is undefined at an all-zero state; nudge it off zero.
        Xorshift64(if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed })
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// A 64-bit candidate drawn from a sparse distribution: the AND of three
    /// independent draws, empirically ~8 set bits and strongly biased
    /// toward working magics (§4.5).
    fn sparse_candidate(&mut self) -> Bitboard {
        Bitboard::new(self.next_u64() & self.next_u64() & self.next_u64())
    }
}

/// Mix the caller's seed with a piece tag and square index into a
/// per-(piece, square) search seed, so every one of the 128 independent
/// searches gets its own deterministic stream from a single `rng_seed`.
fn worker_seed(base_seed: u64, is_rook: bool, sq: Square) -> u64 {
    let tag: u64 = if is_rook { 0xA5A5_A5A5_A5A5_A5A5 } else { 0x5A5A_5A5A_5A5A_5A5A };
    base_seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(tag)
        .wrapping_add((sq as u64 + 1).wrapping_mul(0xBF58_476D_1CE4_E5B9))
}

/// A fully populated magic entry for one square: the mask it was built
/// against, the winning magic, the shift, and the dense attack table it
/// indexes into.
#[derive(Clone, Debug)]
pub struct SquareAttacks {
    mask: Bitboard,
    magic: Bitboard,
    attacks: Vec<Bitboard>,
    shift: u8,
}

impl SquareAttacks {
    fn empty() -> SquareAttacks {
        SquareAttacks {
            mask: Bitboard::EMPTY,
            magic: Bitboard::EMPTY,
            attacks: Vec::new(),
            shift: 0,
        }
    }

    #[inline(always)]
    fn get(&self, occupancy: Bitboard) -> Bitboard {
        let key = magic_key(occupancy & self.mask, self.magic, self.shift);
        // SAFETY: key < self.attacks.len() because it was produced by the
        // same masking/shift the table was populated with.
        unsafe { *self.attacks.get_unchecked(key) }
    }
}

/// The complete magic table for both sliding pieces.
#[derive(Clone, Debug)]
pub struct AttacksTable {
    rook: [SquareAttacks; 64],
    bishop: [SquareAttacks; 64],
}

/// Outcome of building a table for one piece kind: the table plus whether
/// the randomized search had to fall back to a precomputed magic anywhere.
struct BuildOutcome {
    table: [SquareAttacks; 64],
    used_fallback: bool,
}

impl AttacksTable {
    #[inline(always)]
    pub fn rook_attacks(&self, occupancy: Bitboard, sq: Square) -> Bitboard {
        self.rook[sq as usize].get(occupancy)
    }

    #[inline(always)]
    pub fn bishop_attacks(&self, occupancy: Bitboard, sq: Square) -> Bitboard {
        self.bishop[sq as usize].get(occupancy)
    }

    /// Build the full table per `options` (see [`crate::EngineTableOptions`]).
    /// Returns the table plus whether the randomized search exhausted its
    /// retry ceiling anywhere and had to fall back to a precomputed magic.
    pub(crate) fn build(
        use_precomputed_magics: bool,
        magic_retry_ceiling: u64,
        rng_seed: Option<u64>,
    ) -> Result<(AttacksTable, bool), TableInitError> {
        let seed = rng_seed.unwrap_or(0x5EED_u64);
        let rook_outcome = build_table(true, use_precomputed_magics, magic_retry_ceiling, seed)?;
        let bishop_outcome = build_table(false, use_precomputed_magics, magic_retry_ceiling, seed)?;
        let used_fallback = rook_outcome.used_fallback || bishop_outcome.used_fallback;
        Ok((
            AttacksTable {
                rook: rook_outcome.table,
                bishop: bishop_outcome.table,
            },
            used_fallback,
        ))
    }
}

fn new_uninit_table() -> [SquareAttacks; 64] {
    [(); 64].map(|_| SquareAttacks::empty())
}

fn relevant_mask(is_rook: bool, sq: Square) -> Bitboard {
    if is_rook {
        rook_relevant_mask(sq)
    } else {
        bishop_relevant_mask(sq)
    }
}

fn relevant_bits(is_rook: bool, sq: Square) -> u8 {
    if is_rook {
        ROOK_BITS[sq as usize]
    } else {
        BISHOP_BITS[sq as usize]
    }
}

fn saved_magic(is_rook: bool, sq: Square) -> Bitboard {
    if is_rook {
        SAVED_ROOK_MAGICS[sq as usize]
    } else {
        SAVED_BISHOP_MAGICS[sq as usize]
    }
}

fn reference_attacks(is_rook: bool, sq: Square, occupancy: Bitboard) -> Bitboard {
    if is_rook {
        rook_ray_walk(sq, occupancy)
    } else {
        bishop_ray_walk(sq, occupancy)
    }
}

/// Populate `table[idx] = ref` for every enumerated occupancy of `mask`
/// under `magic`/`shift` (C6), or report the first colliding index if
/// `magic` does not hash injectively over the mask's subsets (I2).
fn try_populate(
    mask: Bitboard,
    magic: Bitboard,
    shift: u8,
    is_rook: bool,
    sq: Square,
) -> Option<Vec<Bitboard>> {
    let num_points = mask.len();
    let mut table = vec![Bitboard::EMPTY; 1usize << (64 - shift)];
    let mut written = vec![false; table.len()];

    for i in 0..(1usize << num_points) {
        let occupancy = index_to_occupancy(i, mask);
        let attack = reference_attacks(is_rook, sq, occupancy);
        let key = magic_key(occupancy, magic, shift);
        if !written[key] {
            table[key] = attack;
            written[key] = true;
        } else if table[key] != attack {
            // Real collision, not the constructive kind (I2): this magic
            // does not work.
            return None;
        }
    }

    Some(table)
}

/// Run the randomized search for one (piece, square) pair, trying up to
/// `retry_ceiling` candidates.
fn search_magic(
    is_rook: bool,
    sq: Square,
    retry_ceiling: u64,
    seed: u64,
) -> Option<(Bitboard, Vec<Bitboard>)> {
    let mask = relevant_mask(is_rook, sq);
    let shift = 64 - relevant_bits(is_rook, sq);
    let mut rng = Xorshift64::new(worker_seed(seed, is_rook, sq));

    for _ in 0..retry_ceiling {
        let candidate = rng.sparse_candidate();
        // Quick reject: the multiply should spread enough bits into the
        // rank-8 high byte to be a plausible hash.
        let spread = ((mask * candidate).as_u64() & RANK_8_HIGH_BYTE).count_ones();
        if spread < 6 {
            continue;
        }
        if let Some(table) = try_populate(mask, candidate, shift, is_rook, sq) {
            return Some((candidate, table));
        }
    }

    None
}

/// Build the attack table for one piece kind across all 64 squares,
/// dispatching the per-square work to a scoped thread pool (§5: the search
/// is embarrassingly parallel across squares and writes only its own slot).
fn build_table(
    is_rook: bool,
    use_precomputed_magics: bool,
    magic_retry_ceiling: u64,
    seed: u64,
) -> Result<BuildOutcome, TableInitError> {
    let mut table = new_uninit_table();

    let results: Vec<Result<(Bitboard, Vec<Bitboard>), MagicSearchExhausted>> = thread::scope(|scope| {
        let handles: Vec<_> = (0u8..64)
            .map(|i| {
                scope.spawn(move || {
                    let sq = Square::try_from(i).unwrap();
                    build_square(is_rook, sq, use_precomputed_magics, magic_retry_ceiling, seed)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut used_fallback = false;
    for (i, result) in results.into_iter().enumerate() {
        let sq = Square::try_from(i as u8).unwrap();
        let (magic, attacks) = match result {
            Ok(pair) => pair,
            Err(MagicSearchExhausted { piece, square }) => {
                eprintln!(
                    "magic search exhausted its retry ceiling for {piece} at {square}; falling back to the precomputed magic"
                );
                used_fallback = true;
                let magic = saved_magic(is_rook, square);
                let mask = relevant_mask(is_rook, square);
                let shift = 64 - relevant_bits(is_rook, square);
                match try_populate(mask, magic, shift, is_rook, square) {
                    Some(attacks) => (magic, attacks),
                    None => {
                        return Err(TableInitError::PrecomputedMagicInvalid { piece, square });
                    }
                }
            }
        };

        table[sq as usize] = SquareAttacks {
            mask: relevant_mask(is_rook, sq),
            magic,
            attacks,
            shift: 64 - relevant_bits(is_rook, sq),
        };
    }

    Ok(BuildOutcome {
        table,
        used_fallback,
    })
}

/// Resolve the magic for a single square: either verify and use the
/// precomputed constant, or run the randomized search and fall back to the
/// constant on exhaustion.
fn build_square(
    is_rook: bool,
    sq: Square,
    use_precomputed_magics: bool,
    magic_retry_ceiling: u64,
    seed: u64,
) -> Result<(Bitboard, Vec<Bitboard>), MagicSearchExhausted> {
    let piece = if is_rook { Piece::Rook } else { Piece::Bishop };

    if use_precomputed_magics {
        let magic = saved_magic(is_rook, sq);
        let mask = relevant_mask(is_rook, sq);
        let shift = 64 - relevant_bits(is_rook, sq);
        return match try_populate(mask, magic, shift, is_rook, sq) {
            Some(attacks) => Ok((magic, attacks)),
            // A precomputed magic should never fail verification; if it
            // does, treat it the same as an exhausted search so the caller
            // gets one uniform fatal-error path (PrecomputedMagicInvalid)
            // once both avenues are closed.
            None => Err(MagicSearchExhausted { piece, square: sq }),
        };
    }

    match search_magic(is_rook, sq, magic_retry_ceiling, seed) {
        Some(pair) => Ok(pair),
        None => Err(MagicSearchExhausted { piece, square: sq }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_reject_constant_is_not_the_historical_low_byte_bug() {
        assert_eq!(RANK_8_HIGH_BYTE, 0xFF00_0000_0000_0000);
        assert_ne!(RANK_8_HIGH_BYTE, 0xFF);
    }

    #[test]
    fn rook_mask_matches_known_values() {
        assert_eq!(
            rook_relevant_mask(Square::A1),
            Bitboard::new(0x0001_0101_0101_017E)
        );
        assert_eq!(
            rook_relevant_mask(Square::E1),
            Bitboard::new(0x0010_1010_1010_106E)
        );
    }

    #[test]
    fn bishop_mask_matches_known_values() {
        assert_eq!(
            bishop_relevant_mask(Square::A1),
            Bitboard::new(0x0040_2010_0804_0200)
        );
    }

    #[test]
    fn precomputed_magics_load_without_collisions() {
        let (table, used_fallback) =
            AttacksTable::build(true, 1 << 20, Some(42)).expect("precomputed magics must verify");
        assert!(!used_fallback);

        // spot-check against the worked scenario: rook e4, empty board.
        let attacks = table.rook_attacks(Bitboard::EMPTY, Square::E4);
        assert_eq!(attacks, Bitboard::new(0x0010_1010_EF10_1010));
    }

    #[test]
    fn bishop_attacks_blocked_scenarios() {
        let (table, _) = AttacksTable::build(true, 1 << 20, Some(7)).unwrap();
        let occupancies = [
            Bitboard::new(0x0000_0000_0000_0201),
            Bitboard::new(0x0102_0000_0000_0000),
        ];
        let squares = [Square::A1, Square::A8];
        let expected = [
            Bitboard::new(0x0000_0000_0000_0200),
            Bitboard::new(0x0002_0000_0000_0000),
        ];
        for i in 0..2 {
            assert_eq!(table.bishop_attacks(occupancies[i], squares[i]), expected[i]);
        }
    }

    #[test]
    fn searched_magics_agree_with_reference_for_a_small_square_set() {
        // Full 64-square search is exercised by the fuzz/property tests in
        // tests/; here we just confirm the search path itself (not the
        // precomputed fallback) can find a working magic for a square with
        // a small table.
        let sq = Square::A1;
        let found = search_magic(true, sq, 1 << 22, 1234);
        assert!(found.is_some());
    }

    #[test]
    fn fuzz_magic_attacks_agree_with_ray_walk_p1() {
        // P1: for 10,000 random (piece, square, blockers) triples, the
        // magic-table lookup must agree bit-exactly with the reference ray
        // generator. This is the fundamental correctness test for the whole
        // magic-search pipeline; everything else is a special case of it.
        let (table, used_fallback) =
            AttacksTable::build(true, 1 << 20, Some(0xC0FF_EE)).expect("precomputed magics must verify");
        assert!(!used_fallback);

        let rng = fastrand::Rng::with_seed(0xBEEF_0000_u64);
        for _ in 0..10_000 {
            let sq = Square::try_from(rng.u8(0..64)).unwrap();
            let occupancy = Bitboard::new(rng.u64(..));
            let is_rook = rng.bool();

            let expected = reference_attacks(is_rook, sq, occupancy);
            let actual = if is_rook {
                table.rook_attacks(occupancy, sq)
            } else {
                table.bishop_attacks(occupancy, sq)
            };
            assert_eq!(
                actual, expected,
                "disagreement for is_rook={is_rook} sq={sq} occupancy={occupancy:?}"
            );
        }
    }

    #[test]
    fn p2_masking_ignores_bits_outside_the_relevant_mask() {
        let (table, _) =
            AttacksTable::build(true, 1 << 20, Some(42)).expect("precomputed magics must verify");
        let rng = fastrand::Rng::with_seed(7);

        for _ in 0..2_000 {
            let sq = Square::try_from(rng.u8(0..64)).unwrap();
            let is_rook = rng.bool();
            let mask = relevant_mask(is_rook, sq);
            let noise = Bitboard::new(rng.u64(..)) & !mask;
            let masked_only = Bitboard::new(rng.u64(..)) & mask;

            let with_noise = if is_rook {
                table.rook_attacks(masked_only | noise, sq)
            } else {
                table.bishop_attacks(masked_only | noise, sq)
            };
            let without_noise = if is_rook {
                table.rook_attacks(masked_only, sq)
            } else {
                table.bishop_attacks(masked_only, sq)
            };
            assert_eq!(with_noise, without_noise);
        }
    }
}
