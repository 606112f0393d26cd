//! Versioned save encoding.
//!
//! A save is a JSON envelope around the full game state. The version
//! field gates decoding so an incompatible save fails loudly instead of
//! producing a half-restored game.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::state::GameState;

pub const SAVE_VERSION: u32 = 1;
pub const SAVE_KEY: &str = "forensic_detective_save";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("corrupt save data: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("unsupported save version {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    /// Unix timestamp of the save, informational only.
    pub saved_at: u64,
    pub state: GameState,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Serialize the state into a save payload.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] if serialization fails.
pub fn encode_save(state: &GameState) -> Result<String, StoreError> {
    let envelope = serde_json::json!({
        "version": SAVE_VERSION,
        "saved_at": unix_now(),
        "state": state,
    });
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode a save payload back into a playable state.
///
/// The restored state is rehydrated: the timer is stopped and the RNG
/// reseeded. Nothing is mutated on failure.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] for malformed JSON and
/// [`StoreError::UnsupportedVersion`] for an unknown version field.
pub fn decode_save(payload: &str) -> Result<GameState, StoreError> {
    let envelope: SaveFile = serde_json::from_str(payload)?;
    if envelope.version != SAVE_VERSION {
        return Err(StoreError::UnsupportedVersion(envelope.version));
    }
    let mut state = envelope.state;
    state.rehydrate();
    Ok(state)
}
