//! Core game logic for Forensic Detective.
//!
//! A single-player investigation game: a murder at the Graves mansion,
//! a pool of suspects, and a forensic lab. The crate owns the phase
//! state machine, procedural crime scenes, test simulations, scoring,
//! the round timer, and versioned saves. It is platform agnostic; hosts
//! provide storage and drive the timer.

pub mod characters;
mod constants;
pub mod lab;
pub mod phase;
pub mod scene;
pub mod scoring;
pub mod state;
pub mod store;
pub mod timer;

pub use characters::{BloodType, Character, Enzyme, Locus, suspect_pool, victim_template};
pub use lab::{Agglutination, CertaintyLevel, TestData, TestKind, TestResult};
pub use phase::TimerExpiry;
pub use scene::{EvidenceItem, EvidenceKind, EvidenceQuality, MANSION_ROOMS, Room, Sample, Scene};
pub use scoring::{
    ConclusionEval, FinalScore, Grade, InterpretationEval, MethodologyArea, MethodologyReview,
    RoundScore, calculate_final_score, calculate_round_score, evaluate_conclusion,
    evaluate_interpretation, letter_grade, methodology_review,
};
pub use state::{
    Difficulty, DifficultyConfig, EvidenceLogEntry, GamePhase, GameState, RoundRecord,
    SuspectAssessment,
};
pub use store::{SAVE_KEY, SAVE_VERSION, SaveFile, StoreError, decode_save, encode_save};
pub use timer::{TimerState, TimerTick};

use thiserror::Error;

/// Rule violations surfaced to the host. These are player-visible
/// conditions, not bugs; anything unexpected is an `anyhow` error at
/// the engine boundary instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("a case needs 4 to 6 suspects, got {count}")]
    InvalidSuspectCount { count: usize },
    #[error("unknown suspect: {0}")]
    UnknownSuspect(String),
    #[error("no active crime scene")]
    NoScene,
    #[error("no evidence item at index {0}")]
    InvalidEvidenceIndex(usize),
    #[error("evidence item {0} was already collected")]
    AlreadyCollected(usize),
    #[error("no swabs remaining this round")]
    NoSwabsRemaining,
    #[error("collect at least one sample before entering the lab")]
    NoSamples,
    #[error("no test slots remaining this round")]
    NoTestsRemaining,
    #[error("no collected sample at index {0}")]
    InvalidSampleIndex(usize),
    #[error("no test result at index {0}")]
    InvalidResultIndex(usize),
    #[error("interpretation text is empty")]
    EmptyInterpretation,
    #[error("result {0} already has an interpretation")]
    InterpretationAlreadySet(usize),
    #[error("too few suspects remain; an accusation is required")]
    AccusationRequired,
}

/// Host-provided persistence for save payloads.
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist `payload` under `key`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the write fails.
    fn write(&self, key: &str, payload: &str) -> Result<(), Self::Error>;

    /// Read the payload stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the read fails.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Remove the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the delete fails.
    fn delete(&self, key: &str) -> Result<(), Self::Error>;
}

/// Game facade owning a storage backend. Hosts hold one of these plus
/// a [`GameState`] and call through for persistence.
pub struct GameEngine<S: GameStorage> {
    storage: S,
}

impl<S: GameStorage> GameEngine<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Create a fresh game on the title screen.
    #[must_use]
    pub fn new_game(&self, seed: u64) -> GameState {
        GameState::new(seed)
    }

    /// Write the current game to storage.
    ///
    /// # Errors
    ///
    /// Fails when encoding fails or the backend rejects the write.
    pub fn save_game(&self, state: &GameState) -> anyhow::Result<()> {
        let payload = store::encode_save(state)?;
        self.storage.write(store::SAVE_KEY, &payload)?;
        Ok(())
    }

    /// Load the saved game, if one exists.
    ///
    /// # Errors
    ///
    /// Fails when the backend read fails or the save is corrupt or of
    /// an unsupported version.
    pub fn load_game(&self) -> anyhow::Result<Option<GameState>> {
        let Some(payload) = self.storage.read(store::SAVE_KEY)? else {
            return Ok(None);
        };
        Ok(Some(store::decode_save(&payload)?))
    }

    /// Whether a save exists, without decoding it.
    ///
    /// # Errors
    ///
    /// Fails when the backend read fails.
    pub fn has_save(&self) -> anyhow::Result<bool> {
        Ok(self.storage.read(store::SAVE_KEY)?.is_some())
    }

    /// Remove the saved game.
    ///
    /// # Errors
    ///
    /// Fails when the backend delete fails.
    pub fn delete_save(&self) -> anyhow::Result<()> {
        self.storage.delete(store::SAVE_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::GameStorage;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    /// In-memory storage double shared across clones.
    #[derive(Default, Clone)]
    pub struct MemoryStorage {
        entries: Rc<RefCell<HashMap<String, String>>>,
    }

    impl GameStorage for MemoryStorage {
        type Error = Infallible;

        fn write(&self, key: &str, payload: &str) -> Result<(), Self::Error> {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), payload.to_string());
            Ok(())
        }

        fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn delete(&self, key: &str) -> Result<(), Self::Error> {
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::MemoryStorage;
    use super::*;

    #[test]
    fn engine_saves_loads_and_deletes() {
        let engine = GameEngine::new(MemoryStorage::default());
        let mut state = engine.new_game(12);
        state
            .start_case(
                &["ted_bundy", "jack_the_ripper", "charles_manson", "aileen_wuornos"],
                Difficulty::Medium,
            )
            .unwrap();

        assert!(!engine.has_save().unwrap());
        engine.save_game(&state).unwrap();
        assert!(engine.has_save().unwrap());

        let restored = engine.load_game().unwrap().expect("save present");
        assert_eq!(restored.killer_id, state.killer_id);
        assert_eq!(restored.phase, GamePhase::Intro);

        engine.delete_save().unwrap();
        assert!(engine.load_game().unwrap().is_none());
    }

    #[test]
    fn corrupt_save_surfaces_an_error() {
        let storage = MemoryStorage::default();
        storage.write(SAVE_KEY, "{broken").unwrap();
        let engine = GameEngine::new(storage);
        assert!(engine.load_game().is_err());
    }
}
