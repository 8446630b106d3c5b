//! Challenge lifecycle boundary.
//!
//! The service layer creates a challenge, hands the tiles to the client,
//! and later verifies a submission against the stored picture. Storage is
//! an injected capability keyed by an opaque token; the core never holds
//! a global session map.

pub mod manager;
pub mod store;

pub use manager::ChallengeManager;
pub use store::{ChallengeStore, MemoryStore, StoredChallenge};
