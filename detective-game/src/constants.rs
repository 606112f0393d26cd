//! Centralized balance and tuning constants for the investigation game.
//!
//! These values define the deterministic math for scene generation, lab
//! result synthesis, and scoring. Keeping them together ensures gameplay
//! can only be adjusted via code changes reviewed in version control.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_GAME_START: &str = "log.game-start";
pub(crate) const LOG_ROUND_START: &str = "log.round-start";
pub(crate) const LOG_CONTAMINATION: &str = "log.contamination";
pub(crate) const LOG_EVIDENCE_COLLECTED: &str = "log.evidence-collected";
pub(crate) const LOG_TEST_RUN: &str = "log.test-run";
pub(crate) const LOG_ROUND_SCORED: &str = "log.round-scored";
pub(crate) const LOG_TIMER_EXPIRED: &str = "log.timer-expired";
pub(crate) const LOG_SUSPECT_KILLED: &str = "log.suspect-killed";
pub(crate) const LOG_FORCED_ACCUSATION: &str = "log.forced-accusation";
pub(crate) const LOG_ACCUSATION_MADE: &str = "log.accusation-made";

// Round limits -------------------------------------------------------------
pub(crate) const MAX_ROUNDS: u32 = 10;

// Scene generation ---------------------------------------------------------
pub(crate) const SCENE_MIN_ITEMS: usize = 4;
pub(crate) const SCENE_ITEM_SPREAD: usize = 4;
pub(crate) const INNOCENT_TRACES_MIN: usize = 1;
pub(crate) const INNOCENT_TRACES_SPREAD: usize = 2;
pub(crate) const HARD_MIXED_WITH_KILLER_CHANCE: f64 = 0.3;

// Quality roulette thresholds per difficulty (pristine / degraded / mixed,
// remainder is trace)
pub(crate) const EASY_QUALITY_CUTS: [f64; 3] = [0.70, 0.90, 1.00];
pub(crate) const MEDIUM_QUALITY_CUTS: [f64; 3] = [0.30, 0.60, 0.90];
pub(crate) const HARD_QUALITY_CUTS: [f64; 3] = [0.10, 0.40, 0.75];

// Lab result degradation ---------------------------------------------------
pub(crate) const STR_DEGRADED_DROPOUT_CHANCE: f64 = 0.2;
pub(crate) const STR_TRACE_DROPOUT_CHANCE: f64 = 0.5;
pub(crate) const MTDNA_TRACE_FAILURE_CHANCE: f64 = 0.3;
pub(crate) const RFLP_TRACE_ENZYME_FAILURE_CHANCE: f64 = 0.4;
pub(crate) const RFLP_DEGRADED_BANDS_REMOVED_MIN: usize = 1;
pub(crate) const RFLP_DEGRADED_BANDS_REMOVED_SPREAD: usize = 2;

// Rubric caps --------------------------------------------------------------
pub(crate) const SAMPLE_HANDLING_MAX: i32 = 10;
pub(crate) const CHAIN_OF_CUSTODY_MAX: i32 = 10;
pub(crate) const TEST_SELECTION_MAX: i32 = 15;
pub(crate) const CONTROL_USAGE_MAX: i32 = 15;
pub(crate) const INTERPRETATION_MAX: i32 = 20;
pub(crate) const CONCLUSION_QUALITY_MAX: i32 = 20;
pub(crate) const CONTAMINATION_PENALTY_MIN: i32 = -15;
pub(crate) const EFFICIENCY_BONUS_MAX: i32 = 10;

// Per-event scoring --------------------------------------------------------
pub(crate) const CLEAN_SAMPLE_POINTS: i32 = 2;
pub(crate) const CONTAMINATED_SAMPLE_PENALTY: i32 = -3;
pub(crate) const CUSTODY_CORRECT_KIND_POINTS: i32 = 2;
pub(crate) const CUSTODY_NOTES_POINTS: i32 = 1;
pub(crate) const TEST_SUCCESS_POINTS: i32 = 5;
pub(crate) const TEST_INCOMPATIBLE_PENALTY: i32 = -3;
pub(crate) const CONTROL_INCLUDED_POINTS: i32 = 5;
pub(crate) const CONTROL_OMITTED_PENALTY: i32 = -2;
pub(crate) const CONTAMINATION_EVENT_PENALTY: i32 = -3;
pub(crate) const UNUSED_SWAB_BONUS: i32 = 2;
pub(crate) const UNUSED_TEST_BONUS: i32 = 2;

// Chain of custody labeling ------------------------------------------------
pub(crate) const CUSTODY_LABEL_MIN_LEN: usize = 5;
pub(crate) const CUSTODY_NOTES_MIN_LEN: usize = 3;

// Keyword evaluation -------------------------------------------------------
pub(crate) const GOOD_SCIENCE_POINTS: i32 = 3;
pub(crate) const CAUTIOUS_SCIENCE_POINTS: i32 = 2;
pub(crate) const INTERPRETATION_OVERCLAIM_PENALTY: i32 = -3;
pub(crate) const CONCLUSION_OVERCLAIM_PENALTY: i32 = -5;
pub(crate) const DENSITY_FULL_POINTS: i32 = 5;
pub(crate) const DENSITY_PARTIAL_POINTS: i32 = 2;
pub(crate) const DENSITY_FULL_THRESHOLD: usize = 2;
pub(crate) const CONCLUSION_LONG_LEN: usize = 200;
pub(crate) const CONCLUSION_LONG_BONUS: i32 = 3;
pub(crate) const CONCLUSION_MEDIUM_LEN: usize = 100;
pub(crate) const CONCLUSION_MEDIUM_BONUS: i32 = 1;

// Final score --------------------------------------------------------------
pub(crate) const CORRECT_ACCUSATION_BONUS: i32 = 20;
pub(crate) const CONTROLLED_TESTS_BONUS: i32 = 10;
pub(crate) const CONTROLLED_TESTS_THRESHOLD: u32 = 3;
pub(crate) const WRONG_ACCUSATION_PENALTY: i32 = -10;
pub(crate) const ACCUSATION_MAX_BONUS: i32 = 30;

// Letter grade thresholds as percentage of maximum -------------------------
pub(crate) const GRADE_A_PCT: f64 = 90.0;
pub(crate) const GRADE_B_PCT: f64 = 80.0;
pub(crate) const GRADE_C_PCT: f64 = 70.0;
pub(crate) const GRADE_D_PCT: f64 = 60.0;

// Methodology review thresholds (per completed round) ----------------------
pub(crate) const REVIEW_HANDLING_PER_ROUND: i32 = 5;
pub(crate) const REVIEW_CUSTODY_PER_ROUND: i32 = 5;
pub(crate) const REVIEW_TEST_SELECTION_PER_ROUND: i32 = 7;
pub(crate) const REVIEW_CONTROL_USAGE_PER_ROUND: i32 = 7;
pub(crate) const REVIEW_INTERPRETATION_PER_ROUND: i32 = 10;
pub(crate) const REVIEW_CONCLUSION_PER_ROUND: i32 = 10;
