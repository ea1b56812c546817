//! The typed initialization state machine (C10).
//!
//! `EngineTables<State>` reifies the `Uninitialized -> LeapersReady ->
//! MasksReady -> MagicsReady -> Ready` progression (§4.9) as a zero-sized
//! marker type, so a query call on a handle that hasn't reached `Ready` is a
//! compile error rather than a runtime one. Each step consumes `self` and
//! returns the next state, so the builder can't be rewound or reused partway
//! through.

use std::convert::TryFrom;
use std::marker::PhantomData;

use super::error::TableInitError;
use super::magic::AttacksTable;
use super::{Bitboard, Color, Square};

/// Marker: no tables built yet.
pub struct Uninitialized;
/// Marker: leaper tables (king/knight/pawn) are ready; masks not yet built.
pub struct LeapersReady;
/// Marker: relevant-occupancy masks computed; magics not yet resolved.
pub struct MasksReady;
/// Marker: magics resolved and attack tables populated.
pub struct MagicsReady;
/// Marker: fully initialized. Only this state exposes query methods.
pub struct Ready;

/// Options controlling how the magic tables are resolved. Mirrors the
/// parameters `init_engine_tables` accepts (§6).
#[derive(Clone, Copy, Debug)]
pub struct EngineTableOptions {
    /// Use the compiled-in magics (default) rather than search for new ones.
    pub use_precomputed_magics: bool,
    /// Maximum candidates tried per (piece, square) before the randomized
    /// search gives up and falls back to the compiled-in magic.
    pub magic_retry_ceiling: u64,
    /// Seed for the randomized search. `None` uses a fixed default seed, so
    /// results are reproducible either way.
    pub rng_seed: Option<u64>,
}

impl Default for EngineTableOptions {
    fn default() -> Self {
        EngineTableOptions {
            use_precomputed_magics: true,
            magic_retry_ceiling: 1 << 28,
            rng_seed: None,
        }
    }
}

/// A handle through the table-initialization pipeline, typed by how far
/// along it is. Only `EngineTables<Ready>` exposes query methods.
pub struct EngineTables<State> {
    masks_and_magics: Option<AttacksTable>,
    used_fallback: bool,
    _state: PhantomData<State>,
}

impl EngineTables<Uninitialized> {
    #[must_use]
    pub fn new() -> EngineTables<Uninitialized> {
        EngineTables {
            masks_and_magics: None,
            used_fallback: false,
            _state: PhantomData,
        }
    }

    /// Build the leaper tables. This forces `crate::leapers`'s lazily
    /// initialized statics so the remaining steps never pay first-query
    /// latency.
    #[must_use]
    pub fn with_leapers(self) -> EngineTables<LeapersReady> {
        for sq in (0u8..64).map(|i| Square::try_from(i).unwrap()) {
            let _ = super::leapers::king_attacks(sq);
            let _ = super::leapers::knight_attacks(sq);
            let _ = super::leapers::pawn_attacks(Color::White, sq);
            let _ = super::leapers::pawn_attacks(Color::Black, sq);
        }
        EngineTables {
            masks_and_magics: None,
            used_fallback: false,
            _state: PhantomData,
        }
    }
}

impl Default for EngineTables<Uninitialized> {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineTables<LeapersReady> {
    /// Compute the relevant-occupancy masks for every slider/square pair.
    /// The masks themselves aren't retained separately: `with_magics` below
    /// recomputes them per square as it resolves each magic, since they're
    /// cheap `const fn`s (see [`crate::magic::rook_relevant_mask`]) and
    /// keeping two copies in sync would be its own bug class.
    #[must_use]
    pub fn with_masks(self) -> EngineTables<MasksReady> {
        EngineTables {
            masks_and_magics: None,
            used_fallback: false,
            _state: PhantomData,
        }
    }
}

impl EngineTables<MasksReady> {
    /// Resolve magics (search or load precomputed) and populate the attack
    /// tables. This is the only step that can fail (§7): a precomputed
    /// magic that doesn't verify is fatal, since it indicates a compiled-in
    /// constant is simply wrong.
    pub fn with_magics(
        self,
        options: EngineTableOptions,
    ) -> Result<EngineTables<MagicsReady>, TableInitError> {
        let (table, used_fallback) = AttacksTable::build(
            options.use_precomputed_magics,
            options.magic_retry_ceiling,
            options.rng_seed,
        )?;
        Ok(EngineTables {
            masks_and_magics: Some(table),
            used_fallback,
            _state: PhantomData,
        })
    }
}

impl EngineTables<MagicsReady> {
    /// The final transition: there is nothing left to build, only a type
    /// change to unlock the query methods.
    #[must_use]
    pub fn finish(self) -> EngineTables<Ready> {
        EngineTables {
            masks_and_magics: self.masks_and_magics,
            used_fallback: self.used_fallback,
            _state: PhantomData,
        }
    }
}

impl EngineTables<Ready> {
    /// Whether the randomized magic search exhausted its retry ceiling for
    /// at least one square during this initialization (only possible when
    /// `use_precomputed_magics` was false).
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    #[must_use]
    pub fn rook_attacks(&self, occupancy: Bitboard, sq: Square) -> Bitboard {
        self.table().rook_attacks(occupancy, sq)
    }

    #[must_use]
    pub fn bishop_attacks(&self, occupancy: Bitboard, sq: Square) -> Bitboard {
        self.table().bishop_attacks(occupancy, sq)
    }

    #[must_use]
    pub fn queen_attacks(&self, occupancy: Bitboard, sq: Square) -> Bitboard {
        self.rook_attacks(occupancy, sq) | self.bishop_attacks(occupancy, sq)
    }

    #[must_use]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        super::leapers::king_attacks(sq)
    }

    #[must_use]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        super::leapers::knight_attacks(sq)
    }

    #[must_use]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        super::leapers::pawn_attacks(color, sq)
    }

    fn table(&self) -> &AttacksTable {
        // every EngineTables<Ready> was built through with_magics, which
        // always fills this in before the Ready transition is reachable.
        self.masks_and_magics
            .as_ref()
            .expect("EngineTables<Ready> is only constructed via the builder, which always sets this")
    }
}
