//! Scoring engine.
//!
//! The rubric rewards scientific rigor over lucky guessing: careful
//! handling, matched tests, controls, and measured language all earn
//! points, while overclaiming and contamination cost them.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ACCUSATION_MAX_BONUS, CAUTIOUS_SCIENCE_POINTS, CHAIN_OF_CUSTODY_MAX, CLEAN_SAMPLE_POINTS,
    CONCLUSION_LONG_BONUS, CONCLUSION_LONG_LEN, CONCLUSION_MEDIUM_BONUS, CONCLUSION_MEDIUM_LEN,
    CONCLUSION_OVERCLAIM_PENALTY, CONCLUSION_QUALITY_MAX, CONTAMINATED_SAMPLE_PENALTY,
    CONTAMINATION_EVENT_PENALTY, CONTAMINATION_PENALTY_MIN, CONTROL_INCLUDED_POINTS,
    CONTROL_OMITTED_PENALTY, CONTROL_USAGE_MAX, CONTROLLED_TESTS_BONUS, CONTROLLED_TESTS_THRESHOLD,
    CORRECT_ACCUSATION_BONUS, CUSTODY_CORRECT_KIND_POINTS, CUSTODY_NOTES_MIN_LEN,
    CUSTODY_NOTES_POINTS, DENSITY_FULL_POINTS, DENSITY_FULL_THRESHOLD, DENSITY_PARTIAL_POINTS,
    EFFICIENCY_BONUS_MAX, GOOD_SCIENCE_POINTS, GRADE_A_PCT, GRADE_B_PCT, GRADE_C_PCT, GRADE_D_PCT,
    INTERPRETATION_MAX, INTERPRETATION_OVERCLAIM_PENALTY, REVIEW_CONCLUSION_PER_ROUND,
    REVIEW_CONTROL_USAGE_PER_ROUND, REVIEW_CUSTODY_PER_ROUND, REVIEW_HANDLING_PER_ROUND,
    REVIEW_INTERPRETATION_PER_ROUND, REVIEW_TEST_SELECTION_PER_ROUND, SAMPLE_HANDLING_MAX,
    TEST_INCOMPATIBLE_PENALTY, TEST_SELECTION_MAX, TEST_SUCCESS_POINTS, UNUSED_SWAB_BONUS,
    UNUSED_TEST_BONUS, WRONG_ACCUSATION_PENALTY,
};
use crate::lab::TestData;
use crate::state::GameState;

pub(crate) const GOOD_SCIENCE_KEYWORDS: [&str; 8] = [
    "consistent with",
    "match",
    "exclude",
    "pattern",
    "supports",
    "indicates",
    "correlates",
    "compatible",
];

pub(crate) const CAUTIOUS_SCIENCE_KEYWORDS: [&str; 8] = [
    "inconclusive",
    "further testing",
    "partial",
    "degraded",
    "insufficient",
    "cannot determine",
    "limited",
    "possible",
];

pub(crate) const OVERCLAIMING_KEYWORDS: [&str; 10] = [
    "definitely",
    "proves",
    "100%",
    "certainly",
    "without a doubt",
    "guaranteed",
    "absolute",
    "undeniable",
    "no question",
    "obviously",
];

pub(crate) const EVIDENCE_REFERENCE_KEYWORDS: [&str; 16] = [
    "sample",
    "blood",
    "dna",
    "hair",
    "saliva",
    "fiber",
    "fragment",
    "locus",
    "loci",
    "allele",
    "band",
    "haplotype",
    "type",
    "profile",
    "result",
    "test",
];

pub(crate) const REASONING_KEYWORDS: [&str; 12] = [
    "because",
    "therefore",
    "however",
    "although",
    "suggests",
    "indicates",
    "based on",
    "given that",
    "considering",
    "while",
    "since",
    "combined with",
];

pub(crate) const UNCERTAINTY_KEYWORDS: [&str; 11] = [
    "likely",
    "unlikely",
    "probable",
    "possible",
    "may",
    "might",
    "could",
    "suggests",
    "consistent with",
    "cannot exclude",
    "appears to",
];

fn count_matches(lower_text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| lower_text.contains(*k)).count()
}

const fn density_points(count: usize) -> i32 {
    if count >= DENSITY_FULL_THRESHOLD {
        DENSITY_FULL_POINTS
    } else if count == 1 {
        DENSITY_PARTIAL_POINTS
    } else {
        0
    }
}

const fn clamp_score(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Language quality evaluation for one interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretationEval {
    pub score: i32,
    pub good_terms: usize,
    pub cautious_terms: usize,
    pub overclaim_terms: usize,
}

/// Score a single interpretation string. Matching is lower-cased
/// substring search; the score never goes below zero.
#[must_use]
pub fn evaluate_interpretation(text: &str) -> InterpretationEval {
    if text.is_empty() {
        return InterpretationEval {
            score: 0,
            good_terms: 0,
            cautious_terms: 0,
            overclaim_terms: 0,
        };
    }
    let lower = text.to_lowercase();
    let good_terms = count_matches(&lower, &GOOD_SCIENCE_KEYWORDS);
    let cautious_terms = count_matches(&lower, &CAUTIOUS_SCIENCE_KEYWORDS);
    let overclaim_terms = count_matches(&lower, &OVERCLAIMING_KEYWORDS);
    let score = good_terms as i32 * GOOD_SCIENCE_POINTS
        + cautious_terms as i32 * CAUTIOUS_SCIENCE_POINTS
        + overclaim_terms as i32 * INTERPRETATION_OVERCLAIM_PENALTY;
    InterpretationEval {
        score: score.max(0),
        good_terms,
        cautious_terms,
        overclaim_terms,
    }
}

/// Language quality evaluation for the round conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConclusionEval {
    pub score: i32,
    pub is_overclaiming: bool,
    pub evidence_refs: usize,
    pub uncertainty_terms: usize,
    pub reasoning_terms: usize,
}

/// Score the written conclusion: evidence references, uncertainty
/// language, and reasoning connectives each earn a tiered bonus; any
/// absolute statement costs a flat penalty.
#[must_use]
pub fn evaluate_conclusion(text: &str) -> ConclusionEval {
    if text.is_empty() {
        return ConclusionEval {
            score: 0,
            is_overclaiming: false,
            evidence_refs: 0,
            uncertainty_terms: 0,
            reasoning_terms: 0,
        };
    }
    let lower = text.to_lowercase();
    let evidence_refs = count_matches(&lower, &EVIDENCE_REFERENCE_KEYWORDS);
    let uncertainty_terms = count_matches(&lower, &UNCERTAINTY_KEYWORDS);
    let reasoning_terms = count_matches(&lower, &REASONING_KEYWORDS);
    let is_overclaiming = count_matches(&lower, &OVERCLAIMING_KEYWORDS) > 0;

    let mut score = density_points(evidence_refs)
        + density_points(uncertainty_terms)
        + density_points(reasoning_terms);
    if is_overclaiming {
        score += CONCLUSION_OVERCLAIM_PENALTY;
    }
    let char_count = text.chars().count();
    if char_count > CONCLUSION_LONG_LEN {
        score += CONCLUSION_LONG_BONUS;
    } else if char_count > CONCLUSION_MEDIUM_LEN {
        score += CONCLUSION_MEDIUM_BONUS;
    }
    ConclusionEval {
        score: score.max(0),
        is_overclaiming,
        evidence_refs,
        uncertainty_terms,
        reasoning_terms,
    }
}

/// Per-round rubric breakdown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundScore {
    pub sample_handling: i32,
    pub chain_of_custody: i32,
    pub test_selection: i32,
    pub control_usage: i32,
    pub interpretation: i32,
    pub conclusion_quality: i32,
    pub contamination_penalty: i32,
    pub efficiency_bonus: i32,
    pub total: i32,
    pub max_possible: i32,
}

fn is_incompatible(data: &TestData) -> bool {
    matches!(data, TestData::Error { message } if message.contains("Incompatible"))
}

/// Evaluate the player's work this round against the eight-part rubric.
#[must_use]
pub fn calculate_round_score(state: &GameState) -> RoundScore {
    let mut score = RoundScore::default();

    for sample in &state.collected_samples {
        if sample.contaminated {
            score.sample_handling += CONTAMINATED_SAMPLE_PENALTY;
        } else {
            score.sample_handling += CLEAN_SAMPLE_POINTS;
        }
        if sample.declared_kind == sample.actual_kind {
            score.chain_of_custody += CUSTODY_CORRECT_KIND_POINTS;
        }
        if sample.location_notes.len() > CUSTODY_NOTES_MIN_LEN {
            score.chain_of_custody += CUSTODY_NOTES_POINTS;
        }
    }
    score.sample_handling = clamp_score(score.sample_handling, 0, SAMPLE_HANDLING_MAX);
    score.chain_of_custody = clamp_score(score.chain_of_custody, 0, CHAIN_OF_CUSTODY_MAX);

    let mut interpretation_total = 0;
    for result in &state.test_results {
        if result.success {
            score.test_selection += TEST_SUCCESS_POINTS;
        } else if is_incompatible(&result.data) {
            score.test_selection += TEST_INCOMPATIBLE_PENALTY;
        }
        if result.control_included {
            score.control_usage += CONTROL_INCLUDED_POINTS;
        } else {
            score.control_usage += CONTROL_OMITTED_PENALTY;
        }
        if !result.interpretation.is_empty() {
            interpretation_total += evaluate_interpretation(&result.interpretation).score;
        }
    }
    score.test_selection = clamp_score(score.test_selection, 0, TEST_SELECTION_MAX);
    score.control_usage = clamp_score(score.control_usage, 0, CONTROL_USAGE_MAX);
    score.interpretation = clamp_score(interpretation_total, 0, INTERPRETATION_MAX);

    score.conclusion_quality = clamp_score(
        evaluate_conclusion(&state.current_conclusion).score,
        0,
        CONCLUSION_QUALITY_MAX,
    );

    score.contamination_penalty = clamp_score(
        state.contamination_events as i32 * CONTAMINATION_EVENT_PENALTY,
        CONTAMINATION_PENALTY_MIN,
        0,
    );

    score.efficiency_bonus = clamp_score(
        state.swabs_remaining as i32 * UNUSED_SWAB_BONUS
            + state.tests_remaining as i32 * UNUSED_TEST_BONUS,
        0,
        EFFICIENCY_BONUS_MAX,
    );

    score.total = score.sample_handling
        + score.chain_of_custody
        + score.test_selection
        + score.control_usage
        + score.interpretation
        + score.conclusion_quality
        + score.contamination_penalty
        + score.efficiency_bonus;
    score.max_possible = SAMPLE_HANDLING_MAX
        + CHAIN_OF_CUSTODY_MAX
        + TEST_SELECTION_MAX
        + CONTROL_USAGE_MAX
        + INTERPRETATION_MAX
        + CONCLUSION_QUALITY_MAX
        + EFFICIENCY_BONUS_MAX;
    score
}

/// End-of-game totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub round_total: i32,
    pub accusation_bonus: i32,
    pub total: i32,
    pub max_possible: i32,
    pub correct_accusation: bool,
}

/// Sum the round scores and apply the accusation bonus or penalty.
///
/// A correct accusation earns a flat bonus, plus extra when at least
/// three tests across the game were run with controls.
#[must_use]
pub fn calculate_final_score(state: &GameState) -> FinalScore {
    let round_total: i32 = state.round_scores.iter().map(|s| s.total).sum();
    let round_max: i32 = state.round_scores.iter().map(|s| s.max_possible).sum();

    let mut accusation_bonus = 0;
    let mut correct = false;
    if state.accusation_made
        && let (Some(accused), Some(killer)) = (&state.accused_id, &state.killer_id)
    {
        correct = accused == killer;
        if correct {
            accusation_bonus = CORRECT_ACCUSATION_BONUS;
            if state.control_tests_total >= CONTROLLED_TESTS_THRESHOLD {
                accusation_bonus += CONTROLLED_TESTS_BONUS;
            }
        } else {
            accusation_bonus = WRONG_ACCUSATION_PENALTY;
        }
    }

    FinalScore {
        round_total,
        accusation_bonus,
        total: round_total + accusation_bonus,
        max_possible: round_max + ACCUSATION_MAX_BONUS,
        correct_accusation: correct,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

/// Letter grade from percentage of maximum. A non-positive maximum is
/// an automatic F.
#[must_use]
pub fn letter_grade(total: i32, max_possible: i32) -> Grade {
    if max_possible <= 0 {
        return Grade::F;
    }
    let pct = f64::from(total) / f64::from(max_possible) * 100.0;
    if pct >= GRADE_A_PCT {
        Grade::A
    } else if pct >= GRADE_B_PCT {
        Grade::B
    } else if pct >= GRADE_C_PCT {
        Grade::C
    } else if pct >= GRADE_D_PCT {
        Grade::D
    } else {
        Grade::F
    }
}

/// Rubric areas called out in the end-of-game methodology review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodologyArea {
    SampleHandling,
    ChainOfCustody,
    TestSelection,
    ControlUsage,
    Interpretation,
    ConclusionQuality,
    Contamination,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodologyReview {
    pub strengths: Vec<MethodologyArea>,
    pub improvements: Vec<MethodologyArea>,
}

/// Sort each rubric area into strengths or improvements by comparing
/// cumulative scores to a per-round par.
#[must_use]
pub fn methodology_review(state: &GameState) -> MethodologyReview {
    let mut review = MethodologyReview::default();
    let rounds = state.round_history.len() as i32;
    if rounds == 0 {
        return review;
    }

    let mut handling = 0;
    let mut custody = 0;
    let mut selection = 0;
    let mut controls = 0;
    let mut interpretation = 0;
    let mut conclusion = 0;
    let mut contamination = 0;
    for rs in &state.round_scores {
        handling += rs.sample_handling;
        custody += rs.chain_of_custody;
        selection += rs.test_selection;
        controls += rs.control_usage;
        interpretation += rs.interpretation;
        conclusion += rs.conclusion_quality;
        contamination += rs.contamination_penalty;
    }

    let mut sort = |area, value, par| {
        if value > par {
            review.strengths.push(area);
        } else {
            review.improvements.push(area);
        }
    };
    sort(
        MethodologyArea::SampleHandling,
        handling,
        rounds * REVIEW_HANDLING_PER_ROUND,
    );
    sort(
        MethodologyArea::ChainOfCustody,
        custody,
        rounds * REVIEW_CUSTODY_PER_ROUND,
    );
    sort(
        MethodologyArea::TestSelection,
        selection,
        rounds * REVIEW_TEST_SELECTION_PER_ROUND,
    );
    sort(
        MethodologyArea::ControlUsage,
        controls,
        rounds * REVIEW_CONTROL_USAGE_PER_ROUND,
    );
    sort(
        MethodologyArea::Interpretation,
        interpretation,
        rounds * REVIEW_INTERPRETATION_PER_ROUND,
    );
    sort(
        MethodologyArea::ConclusionQuality,
        conclusion,
        rounds * REVIEW_CONCLUSION_PER_ROUND,
    );
    if contamination < 0 {
        review.improvements.push(MethodologyArea::Contamination);
    }
    review
}
