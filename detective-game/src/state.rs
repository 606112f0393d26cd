//! Central game state and phase definitions.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::characters::Character;
use crate::constants::MAX_ROUNDS;
use crate::lab::TestResult;
use crate::scene::{Sample, Scene};
use crate::scoring::RoundScore;
use crate::timer::TimerState;

/// Difficulty setting chosen during setup. Drives the round timer,
/// per-round resources, and the evidence quality distribution.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Fixed tuning bundle for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub label: &'static str,
    pub description: &'static str,
    pub timer_seconds: u32,
    pub swabs_per_round: u32,
    pub tests_per_round: u32,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    #[must_use]
    pub const fn config(self) -> &'static DifficultyConfig {
        match self {
            Self::Easy => &DifficultyConfig {
                label: "Easy",
                description: "Generous timer, clear evidence, more resources",
                timer_seconds: 300,
                swabs_per_round: 6,
                tests_per_round: 5,
            },
            Self::Medium => &DifficultyConfig {
                label: "Medium",
                description: "Moderate timer, some degradation, standard resources",
                timer_seconds: 200,
                swabs_per_round: 4,
                tests_per_round: 3,
            },
            Self::Hard => &DifficultyConfig {
                label: "Hard",
                description: "Short timer, degraded samples, limited resources",
                timer_seconds: 120,
                swabs_per_round: 3,
                tests_per_round: 2,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(()),
        }
    }
}

/// Screens of the investigation loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Title,
    Setup,
    Intro,
    Scene,
    Lab,
    CaseBoard,
    RoundEnd,
    Accusation,
    GameOver,
}

impl GamePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Setup => "setup",
            Self::Intro => "intro",
            Self::Scene => "scene",
            Self::Lab => "lab",
            Self::CaseBoard => "case_board",
            Self::RoundEnd => "round_end",
            Self::Accusation => "accusation",
            Self::GameOver => "game_over",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GamePhase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "setup" => Ok(Self::Setup),
            "intro" => Ok(Self::Intro),
            "scene" => Ok(Self::Scene),
            "lab" => Ok(Self::Lab),
            "case_board" => Ok(Self::CaseBoard),
            "round_end" => Ok(Self::RoundEnd),
            "accusation" => Ok(Self::Accusation),
            "game_over" => Ok(Self::GameOver),
            _ => Err(()),
        }
    }
}

/// Player's working notes on a suspect, shown on the case board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspectAssessment {
    pub suspicion: u8,
    pub notes: String,
}

impl Default for SuspectAssessment {
    fn default() -> Self {
        Self {
            suspicion: 50,
            notes: String::new(),
        }
    }
}

/// Entry in the chain-of-custody audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceLogEntry {
    pub action: String,
    pub round: u32,
    pub label: String,
    pub declared_kind: String,
    pub actual_kind: String,
    pub location: String,
    pub contaminated: bool,
    pub custody: u8,
}

/// Outcome summary for a completed round, kept for the end-of-game recap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub room: String,
    pub total: i32,
    pub max_possible: i32,
    pub samples_collected: usize,
    pub tests_run: usize,
}

/// Full game state. Serializable except for the RNG, which is reseeded
/// from `seed` when a save is rehydrated.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub round: u32,
    pub max_rounds: u32,
    pub seed: u64,

    pub victim: Option<Character>,
    pub suspects: Vec<Character>,
    pub killer_id: Option<String>,
    pub dead_order: Vec<String>,

    pub scene: Option<Scene>,
    pub collected_samples: Vec<Sample>,
    pub swabs_remaining: u32,
    pub gloves_on: bool,
    pub contamination_events: u32,

    pub tests_remaining: u32,
    pub test_results: Vec<TestResult>,
    pub control_tests_total: u32,

    pub suspect_notes: BTreeMap<String, SuspectAssessment>,
    pub current_conclusion: String,

    pub accusation_made: bool,
    pub accused_id: Option<String>,

    pub total_score: i32,
    pub round_scored: bool,
    pub round_scores: Vec<RoundScore>,
    pub round_history: Vec<RoundRecord>,

    pub timer: TimerState,
    pub logs: Vec<String>,
    pub evidence_log: Vec<EvidenceLogEntry>,
    pub evidence_seq: u32,

    pub game_started: bool,
    pub game_over: bool,

    #[serde(skip)]
    pub rng: Option<ChaCha20Rng>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Title,
            difficulty: Difficulty::Medium,
            round: 1,
            max_rounds: MAX_ROUNDS,
            seed: 0,
            victim: None,
            suspects: Vec::new(),
            killer_id: None,
            dead_order: Vec::new(),
            scene: None,
            collected_samples: Vec::new(),
            swabs_remaining: 0,
            gloves_on: false,
            contamination_events: 0,
            tests_remaining: 0,
            test_results: Vec::new(),
            control_tests_total: 0,
            suspect_notes: BTreeMap::new(),
            current_conclusion: String::new(),
            accusation_made: false,
            accused_id: None,
            total_score: 0,
            round_scored: false,
            round_scores: Vec::new(),
            round_history: Vec::new(),
            timer: TimerState::default(),
            logs: Vec::new(),
            evidence_log: Vec::new(),
            evidence_seq: 0,
            game_started: false,
            game_over: false,
            rng: None,
        }
    }
}

impl GameState {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Some(ChaCha20Rng::seed_from_u64(seed)),
            ..Self::default()
        }
    }

    /// Take the RNG out for a borrow-free roll; callers put it back via
    /// `state.rng = Some(rng)` before returning.
    #[must_use]
    pub fn take_rng(&mut self) -> ChaCha20Rng {
        self.rng
            .take()
            .unwrap_or_else(|| ChaCha20Rng::seed_from_u64(self.seed))
    }

    /// Suspects still alive, in roster order.
    #[must_use]
    pub fn alive_suspects(&self) -> Vec<&Character> {
        self.suspects.iter().filter(|s| s.alive).collect()
    }

    #[must_use]
    pub fn character_by_id(&self, id: &str) -> Option<&Character> {
        if let Some(victim) = &self.victim
            && victim.id == id
        {
            return Some(victim);
        }
        self.suspects.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn killer(&self) -> Option<&Character> {
        self.suspects.iter().find(|s| s.is_killer)
    }

    /// Clear everything round-scoped; roster, scores, and history persist.
    pub fn reset_round_state(&mut self) {
        let config = self.difficulty.config();
        self.scene = None;
        self.collected_samples.clear();
        self.swabs_remaining = config.swabs_per_round;
        self.gloves_on = false;
        self.contamination_events = 0;
        self.tests_remaining = config.tests_per_round;
        self.test_results.clear();
        self.current_conclusion.clear();
        self.round_scored = false;
    }

    /// Wipe to a fresh pre-setup state, preserving the seed and the
    /// RNG stream.
    pub fn reset_game_state(&mut self) {
        let seed = self.seed;
        let rng = self.rng.take();
        *self = Self::new(seed);
        if let Some(rng) = rng {
            self.rng = Some(rng);
        }
    }

    /// Update the case board notes and suspicion slider for a suspect.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::GameError::UnknownSuspect`] for an id not on
    /// the roster.
    pub fn update_suspect_assessment(
        &mut self,
        suspect_id: &str,
        suspicion: u8,
        notes: &str,
    ) -> Result<(), crate::GameError> {
        let Some(assessment) = self.suspect_notes.get_mut(suspect_id) else {
            return Err(crate::GameError::UnknownSuspect(suspect_id.to_string()));
        };
        assessment.suspicion = suspicion.min(100);
        assessment.notes = notes.to_string();
        Ok(())
    }

    /// Replace the working conclusion for this round.
    pub fn set_conclusion(&mut self, text: &str) {
        self.current_conclusion = text.to_string();
    }

    /// Restore invariants after deserializing a save. The timer never
    /// resumes on its own and the RNG is reseeded.
    pub fn rehydrate(&mut self) {
        self.timer.running = false;
        if self.rng.is_none() {
            self.rng = Some(ChaCha20Rng::seed_from_u64(self.seed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_configs_match_design_table() {
        let easy = Difficulty::Easy.config();
        assert_eq!(
            (easy.timer_seconds, easy.swabs_per_round, easy.tests_per_round),
            (300, 6, 5)
        );
        let medium = Difficulty::Medium.config();
        assert_eq!(
            (
                medium.timer_seconds,
                medium.swabs_per_round,
                medium.tests_per_round
            ),
            (200, 4, 3)
        );
        let hard = Difficulty::Hard.config();
        assert_eq!(
            (hard.timer_seconds, hard.swabs_per_round, hard.tests_per_round),
            (120, 3, 2)
        );
    }

    #[test]
    fn difficulty_round_trips_through_str() {
        for d in Difficulty::ALL {
            assert_eq!(d.as_str().parse::<Difficulty>(), Ok(d));
        }
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn phase_round_trips_through_str() {
        for phase in [
            GamePhase::Title,
            GamePhase::Setup,
            GamePhase::Intro,
            GamePhase::Scene,
            GamePhase::Lab,
            GamePhase::CaseBoard,
            GamePhase::RoundEnd,
            GamePhase::Accusation,
            GamePhase::GameOver,
        ] {
            assert_eq!(phase.as_str().parse::<GamePhase>(), Ok(phase));
        }
    }

    #[test]
    fn reset_round_state_refills_resources_and_keeps_scores() {
        let mut state = GameState::new(7);
        state.difficulty = Difficulty::Easy;
        state.swabs_remaining = 0;
        state.tests_remaining = 0;
        state.total_score = 42;
        state.contamination_events = 2;
        state.round_scored = true;
        state.reset_round_state();
        assert_eq!(state.swabs_remaining, 6);
        assert_eq!(state.tests_remaining, 5);
        assert_eq!(state.total_score, 42);
        assert_eq!(state.contamination_events, 0);
        assert!(!state.round_scored);
        assert!(state.test_results.is_empty());
    }

    #[test]
    fn suspect_assessment_updates_and_clamps() {
        let mut state = GameState::new(2);
        state.suspect_notes.insert(
            "ted_bundy".to_string(),
            SuspectAssessment::default(),
        );
        state
            .update_suspect_assessment("ted_bundy", 200, "blood type matches")
            .unwrap();
        let assessment = &state.suspect_notes["ted_bundy"];
        assert_eq!(assessment.suspicion, 100);
        assert_eq!(assessment.notes, "blood type matches");
        assert!(state.update_suspect_assessment("nobody", 10, "").is_err());
    }

    #[test]
    fn reset_game_state_keeps_only_seed_and_rng() {
        let mut state = GameState::new(6);
        state.total_score = 42;
        state.game_over = true;
        state.accusation_made = true;
        state.round = 4;
        state.reset_game_state();
        assert_eq!(state.seed, 6);
        assert!(state.rng.is_some());
        assert_eq!(state.total_score, 0);
        assert!(!state.game_over);
        assert!(!state.accusation_made);
        assert_eq!(state.round, 1);
        assert_eq!(state.phase, GamePhase::Title);
    }

    #[test]
    fn take_rng_falls_back_to_seed() {
        let mut state = GameState::new(5);
        state.rng = None;
        let _rng = state.take_rng();
    }

    #[test]
    fn rehydrate_stops_timer_and_restores_rng() {
        let mut state = GameState::new(9);
        state.timer.running = true;
        state.rng = None;
        state.rehydrate();
        assert!(!state.timer.running);
        assert!(state.rng.is_some());
    }
}
