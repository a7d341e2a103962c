//! ARX mixing primitive and passphrase seed generation.
//!
//! ```text
//! engine          (HashState + canonical compression round)
//!     ↑ wrapped by
//! round           (MixingRound strategy: canonical / unrolled)
//!     ↑ injected into
//! seed_generator  (absorb → harden → expand)
//! ```

pub mod engine;
pub mod round;
pub mod seed_generator;

pub use engine::{HashState, INITIAL_STATE};
pub use round::{CanonicalRound, EngineKind, MixingRound, UnrolledRound};
pub use seed_generator::{generate_seed, Seed, SeedGenerator};
