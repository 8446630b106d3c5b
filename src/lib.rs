//! Library definitions.
//!
//! Exports the puzzle data model, the three scrambling schemes, the
//! recomposer, the solver, and the challenge boundary used by a service
//! layer to create and verify CAPTCHA challenges.

pub mod challenge;
pub mod config;
pub mod protocol;
pub mod puzzle;
pub mod scramble;
pub mod solve;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use challenge::{ChallengeManager, ChallengeStore, MemoryStore, StoredChallenge};
pub use config::{CaptchaError, Config, Result};
pub use protocol::{
    SolutionCodeRequest, SolutionCodeResponse, SolutionRequest, SolutionResponse, TilesResponse,
};
pub use puzzle::{Picture, Tile};
pub use scramble::{Scheme, scramble};
pub use solve::{Solution, solve, verify};
