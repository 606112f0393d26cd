//! Forensic test simulations.
//!
//! Each test reads the ground-truth markers of a sample's source
//! character and degrades them according to sample quality. Mixed
//! samples blend in the second contributor's markers so the player has
//! to untangle them on the case board.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::GameError;
use crate::characters::{Character, Enzyme, Locus, rh_negative};
use crate::constants::{
    LOG_TEST_RUN, MTDNA_TRACE_FAILURE_CHANCE, RFLP_DEGRADED_BANDS_REMOVED_MIN,
    RFLP_DEGRADED_BANDS_REMOVED_SPREAD, RFLP_TRACE_ENZYME_FAILURE_CHANCE,
    STR_DEGRADED_DROPOUT_CHANCE, STR_TRACE_DROPOUT_CHANCE,
};
use crate::scene::{EvidenceKind, EvidenceQuality, Sample};
use crate::state::GameState;

pub type Fragments = SmallVec<[u16; 8]>;
pub type Alleles = SmallVec<[u8; 4]>;

/// The five available forensic tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    BloodType,
    Rflp,
    Str,
    #[serde(rename = "mtdna")]
    MtDna,
    Restriction,
}

impl TestKind {
    pub const ALL: [Self; 5] = [
        Self::BloodType,
        Self::Rflp,
        Self::Str,
        Self::MtDna,
        Self::Restriction,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BloodType => "blood_type",
            Self::Rflp => "rflp",
            Self::Str => "str",
            Self::MtDna => "mtdna",
            Self::Restriction => "restriction",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BloodType => "Blood Typing (ABO/Rh)",
            Self::Rflp => "RFLP Analysis",
            Self::Str => "PCR/STR Profiling",
            Self::MtDna => "Mitochondrial DNA",
            Self::Restriction => "Restriction Enzyme Digest",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::BloodType => "Determines blood group using antibody reactions",
            Self::Rflp => {
                "Restriction Fragment Length Polymorphism - cuts DNA with enzymes and separates by size on a gel"
            }
            Self::Str => {
                "Short Tandem Repeat analysis - amplifies and measures repeat regions at specific loci"
            }
            Self::MtDna => {
                "Analyzes maternally inherited mtDNA - useful for degraded samples and hair without roots"
            }
            Self::Restriction => "Cuts DNA with a specific enzyme and analyzes the fragment pattern",
        }
    }

    /// Evidence kinds this test can process.
    #[must_use]
    pub const fn sample_kinds(self) -> &'static [EvidenceKind] {
        match self {
            Self::BloodType => &[EvidenceKind::Blood],
            Self::Rflp | Self::Restriction => &[
                EvidenceKind::Blood,
                EvidenceKind::TouchDna,
                EvidenceKind::Saliva,
            ],
            Self::Str => &[
                EvidenceKind::Blood,
                EvidenceKind::TouchDna,
                EvidenceKind::Saliva,
                EvidenceKind::Hair,
            ],
            Self::MtDna => &[
                EvidenceKind::Hair,
                EvidenceKind::TouchDna,
                EvidenceKind::Blood,
            ],
        }
    }

    /// In-fiction turnaround time, shown on the lab bench.
    #[must_use]
    pub const fn time_minutes(self) -> u32 {
        match self {
            Self::BloodType => 5,
            Self::Rflp => 15,
            Self::Str => 20,
            Self::MtDna => 25,
            Self::Restriction => 10,
        }
    }

    #[must_use]
    pub fn compatible_with(self, kind: EvidenceKind) -> bool {
        self.sample_kinds().contains(&kind)
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blood_type" => Ok(Self::BloodType),
            "rflp" => Ok(Self::Rflp),
            "str" => Ok(Self::Str),
            "mtdna" => Ok(Self::MtDna),
            "restriction" => Ok(Self::Restriction),
            _ => Err(()),
        }
    }
}

/// Agglutination reactions in the ABO/Rh card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agglutination {
    pub anti_a: bool,
    pub anti_b: bool,
    pub anti_d: bool,
}

/// Test-specific result payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestData {
    BloodType {
        blood_type: String,
        /// `None` when the sample was too thin to react.
        agglutination: Option<Agglutination>,
    },
    Rflp {
        enzymes: BTreeMap<Enzyme, Fragments>,
    },
    Str {
        /// Empty allele list means the locus dropped out.
        loci: BTreeMap<Locus, Alleles>,
    },
    MtDna {
        haplotype: String,
        degraded: bool,
    },
    Restriction {
        enzyme: Enzyme,
        fragments: Fragments,
        note: Option<String>,
    },
    Error {
        message: String,
    },
}

/// Player-facing confidence attached to an interpreted result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertaintyLevel {
    Definitive,
    Strong,
    Partial,
    Inconclusive,
    Exclusion,
    Mixture,
}

impl CertaintyLevel {
    pub const ALL: [Self; 6] = [
        Self::Definitive,
        Self::Strong,
        Self::Partial,
        Self::Inconclusive,
        Self::Exclusion,
        Self::Mixture,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Definitive => "Definitive Match",
            Self::Strong => "Strong Match",
            Self::Partial => "Partial Match",
            Self::Inconclusive => "Inconclusive",
            Self::Exclusion => "Exclusion",
            Self::Mixture => "Mixture Detected",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Definitive => "All markers match with statistical certainty",
            Self::Strong => "Multiple markers match, high confidence",
            Self::Partial => "Some markers match, further testing needed",
            Self::Inconclusive => "Results do not support a conclusion",
            Self::Exclusion => "Profile does not match this individual",
            Self::Mixture => "Multiple contributors present in sample",
        }
    }
}

/// One completed lab run, including the player's later annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub sample_id: String,
    pub test: TestKind,
    pub test_name: String,
    pub sample_quality: EvidenceQuality,
    pub contaminated: bool,
    pub control_included: bool,
    pub control_note: Option<String>,
    pub reliable: bool,
    pub success: bool,
    pub data: TestData,
    pub interpretation: String,
    pub certainty: Option<CertaintyLevel>,
}

const CONTROL_PASSED_NOTE: &str = "Positive and negative controls behaved as expected";

fn blood_type_data(sample: &Sample, source: Option<&Character>) -> TestData {
    if sample.quality == EvidenceQuality::Trace {
        return TestData::BloodType {
            blood_type: "Indeterminate".to_string(),
            agglutination: None,
        };
    }
    let Some(character) = source else {
        return TestData::Error {
            message: "Unknown source".to_string(),
        };
    };
    let rh_positive = !rh_negative(&character.id);
    let bt = character.blood_type;
    TestData::BloodType {
        blood_type: format!("{}{}", bt, if rh_positive { "+" } else { "-" }),
        agglutination: Some(Agglutination {
            anti_a: bt.reacts_anti_a(),
            anti_b: bt.reacts_anti_b(),
            anti_d: rh_positive,
        }),
    }
}

fn degrade_bands(fragments: &mut Fragments, count: usize, rng: &mut impl Rng) {
    for _ in 0..count {
        if fragments.len() <= 1 {
            break;
        }
        let index = rng.random_range(0..fragments.len());
        fragments.remove(index);
    }
}

fn merge_sorted_unique(fragments: &mut Fragments, extras: &[u16]) {
    fragments.extend_from_slice(extras);
    fragments.sort_unstable();
    fragments.dedup();
}

fn rflp_data(
    sample: &Sample,
    source: &Character,
    mixed: Option<&Character>,
    rng: &mut impl Rng,
) -> TestData {
    let mut enzymes = BTreeMap::new();
    for enzyme in Enzyme::ALL {
        let mut fragments: Fragments = source
            .rflp_fragments
            .get(&enzyme)
            .map(|f| f.iter().copied().collect())
            .unwrap_or_default();

        if matches!(
            sample.quality,
            EvidenceQuality::Degraded | EvidenceQuality::Trace
        ) {
            let to_remove = RFLP_DEGRADED_BANDS_REMOVED_MIN
                + rng.random_range(0..RFLP_DEGRADED_BANDS_REMOVED_SPREAD);
            degrade_bands(&mut fragments, to_remove, rng);
        }
        if sample.quality == EvidenceQuality::Trace
            && rng.random::<f64>() < RFLP_TRACE_ENZYME_FAILURE_CHANCE
        {
            fragments.clear();
        }
        if sample.quality == EvidenceQuality::Mixed
            && let Some(mixed) = mixed
            && let Some(extras) = mixed.rflp_fragments.get(&enzyme)
        {
            merge_sorted_unique(&mut fragments, extras);
        }
        fragments.sort_unstable();
        enzymes.insert(enzyme, fragments);
    }
    TestData::Rflp { enzymes }
}

fn str_data(
    sample: &Sample,
    source: &Character,
    mixed: Option<&Character>,
    rng: &mut impl Rng,
) -> TestData {
    let mut loci = BTreeMap::new();
    for locus in Locus::ALL {
        let mut alleles: Alleles = source
            .str_profile
            .get(&locus)
            .map(|pair| pair.iter().copied().collect())
            .unwrap_or_default();

        let dropout = match sample.quality {
            EvidenceQuality::Degraded => rng.random::<f64>() < STR_DEGRADED_DROPOUT_CHANCE,
            EvidenceQuality::Trace => rng.random::<f64>() < STR_TRACE_DROPOUT_CHANCE,
            _ => false,
        };
        if dropout {
            loci.insert(locus, Alleles::new());
            continue;
        }
        if sample.quality == EvidenceQuality::Mixed
            && let Some(mixed) = mixed
            && let Some(extra) = mixed.str_profile.get(&locus)
        {
            alleles.extend_from_slice(extra);
            alleles.sort_unstable();
            alleles.dedup();
        }
        alleles.sort_unstable();
        loci.insert(locus, alleles);
    }
    TestData::Str { loci }
}

fn mtdna_data(sample: &Sample, source: Option<&Character>, rng: &mut impl Rng) -> TestData {
    if sample.quality == EvidenceQuality::Trace
        && rng.random::<f64>() < MTDNA_TRACE_FAILURE_CHANCE
    {
        return TestData::MtDna {
            haplotype: "Indeterminate".to_string(),
            degraded: true,
        };
    }
    let Some(character) = source else {
        return TestData::Error {
            message: "Unknown source".to_string(),
        };
    };
    // Mixed samples show the primary contributor only; a single hair
    // carries one maternal lineage.
    TestData::MtDna {
        haplotype: character.mt_dna_haplotype.clone(),
        degraded: false,
    }
}

fn restriction_data(
    sample: &Sample,
    source: &Character,
    mixed: Option<&Character>,
    enzyme: Enzyme,
    rng: &mut impl Rng,
) -> TestData {
    let mut fragments: Fragments = source
        .rflp_fragments
        .get(&enzyme)
        .map(|f| f.iter().copied().collect())
        .unwrap_or_default();

    if matches!(
        sample.quality,
        EvidenceQuality::Degraded | EvidenceQuality::Trace
    ) {
        degrade_bands(&mut fragments, 1, rng);
    }
    if sample.quality == EvidenceQuality::Trace
        && rng.random::<f64>() < RFLP_TRACE_ENZYME_FAILURE_CHANCE
    {
        return TestData::Restriction {
            enzyme,
            fragments: Fragments::new(),
            note: Some("Insufficient DNA".to_string()),
        };
    }
    if sample.quality == EvidenceQuality::Mixed
        && let Some(mixed) = mixed
        && let Some(extras) = mixed.rflp_fragments.get(&enzyme)
    {
        merge_sorted_unique(&mut fragments, extras);
    }
    fragments.sort_unstable();
    TestData::Restriction {
        enzyme,
        fragments,
        note: None,
    }
}

impl GameState {
    /// Run a forensic test on a collected sample and append the result.
    ///
    /// An incompatible sample kind still consumes a test slot and
    /// produces a failed result rather than an error; misusing the lab
    /// is a scoring matter, not a rules violation. Returns the index of
    /// the new result.
    ///
    /// # Errors
    ///
    /// Fails when the sample index is out of range or no test slots
    /// remain this round.
    pub fn run_test(
        &mut self,
        sample_index: usize,
        test: TestKind,
        include_control: bool,
    ) -> Result<usize, GameError> {
        let sample = self
            .collected_samples
            .get(sample_index)
            .ok_or(GameError::InvalidSampleIndex(sample_index))?
            .clone();
        if self.tests_remaining == 0 {
            return Err(GameError::NoTestsRemaining);
        }

        let source = self.character_by_id(&sample.source_id).cloned();
        let mixed = sample
            .mixed_with
            .as_deref()
            .and_then(|id| self.character_by_id(id))
            .cloned();

        let mut rng = self.take_rng();
        let (data, success) = if !test.compatible_with(sample.actual_kind) {
            (
                TestData::Error {
                    message: "Incompatible sample type for this test".to_string(),
                },
                false,
            )
        } else {
            match (&test, &source) {
                (TestKind::BloodType, _) => {
                    let data = blood_type_data(&sample, source.as_ref());
                    let success = !matches!(data, TestData::Error { .. });
                    (data, success)
                }
                (TestKind::MtDna, _) => {
                    let data = mtdna_data(&sample, source.as_ref(), &mut rng);
                    let success = !matches!(data, TestData::Error { .. });
                    (data, success)
                }
                (_, None) => (
                    TestData::Error {
                        message: "Unknown source".to_string(),
                    },
                    false,
                ),
                (TestKind::Rflp, Some(source)) => {
                    (rflp_data(&sample, source, mixed.as_ref(), &mut rng), true)
                }
                (TestKind::Str, Some(source)) => {
                    (str_data(&sample, source, mixed.as_ref(), &mut rng), true)
                }
                (TestKind::Restriction, Some(source)) => (
                    restriction_data(&sample, source, mixed.as_ref(), Enzyme::EcoRI, &mut rng),
                    true,
                ),
            }
        };
        self.rng = Some(rng);

        let result = TestResult {
            sample_id: sample.id.clone(),
            test,
            test_name: test.name().to_string(),
            sample_quality: sample.quality,
            contaminated: sample.contaminated,
            control_included: include_control,
            control_note: include_control.then(|| CONTROL_PASSED_NOTE.to_string()),
            reliable: !sample.contaminated,
            success,
            data,
            interpretation: String::new(),
            certainty: None,
        };

        self.tests_remaining -= 1;
        if include_control {
            self.control_tests_total += 1;
        }
        self.test_results.push(result);
        self.logs.push(String::from(LOG_TEST_RUN));
        Ok(self.test_results.len() - 1)
    }

    /// Attach the player's written interpretation to a result, once.
    ///
    /// # Errors
    ///
    /// Fails on a bad index, an empty interpretation, or a result that
    /// already has one.
    pub fn submit_interpretation(
        &mut self,
        result_index: usize,
        interpretation: &str,
    ) -> Result<(), GameError> {
        let result = self
            .test_results
            .get_mut(result_index)
            .ok_or(GameError::InvalidResultIndex(result_index))?;
        if interpretation.trim().is_empty() {
            return Err(GameError::EmptyInterpretation);
        }
        if !result.interpretation.is_empty() {
            return Err(GameError::InterpretationAlreadySet(result_index));
        }
        result.interpretation = interpretation.to_string();
        Ok(())
    }

    /// Set or replace the certainty level on an interpreted result.
    ///
    /// # Errors
    ///
    /// Fails on a bad index.
    pub fn set_certainty(
        &mut self,
        result_index: usize,
        certainty: CertaintyLevel,
    ) -> Result<(), GameError> {
        let result = self
            .test_results
            .get_mut(result_index)
            .ok_or(GameError::InvalidResultIndex(result_index))?;
        result.certainty = Some(certainty);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::{initialize_characters, pool_character, victim_template};
    use crate::state::Difficulty;

    fn sample_from(id: &str, kind: EvidenceKind, quality: EvidenceQuality) -> Sample {
        Sample {
            id: "EVD-1-5555".to_string(),
            label: "bench sample".to_string(),
            declared_kind: kind,
            actual_kind: kind,
            location_notes: "from the bench".to_string(),
            location: "on the desk".to_string(),
            quality,
            contaminated: false,
            custody: 3,
            source_id: id.to_string(),
            mixed_with: None,
            collected_round: 1,
        }
    }

    fn lab_state() -> GameState {
        let mut state = GameState::new(21);
        state.difficulty = Difficulty::Easy;
        initialize_characters(
            &mut state,
            &["ted_bundy", "jack_the_ripper", "charles_manson", "aileen_wuornos"],
        )
        .unwrap();
        state.reset_round_state();
        state
    }

    #[test]
    fn trace_blood_typing_is_indeterminate_but_successful() {
        let mut state = lab_state();
        state
            .collected_samples
            .push(sample_from("ted_bundy", EvidenceKind::Blood, EvidenceQuality::Trace));
        let index = state.run_test(0, TestKind::BloodType, false).unwrap();
        let result = &state.test_results[index];
        assert!(result.success);
        assert_eq!(
            result.data,
            TestData::BloodType {
                blood_type: "Indeterminate".to_string(),
                agglutination: None,
            }
        );
    }

    #[test]
    fn blood_typing_reports_abo_and_rh() {
        let mut state = lab_state();
        state.collected_samples.push(sample_from(
            "aileen_wuornos",
            EvidenceKind::Blood,
            EvidenceQuality::Pristine,
        ));
        let index = state.run_test(0, TestKind::BloodType, true).unwrap();
        let result = &state.test_results[index];
        assert!(result.control_included);
        assert_eq!(state.control_tests_total, 1);
        assert_eq!(
            result.data,
            TestData::BloodType {
                blood_type: "AB-".to_string(),
                agglutination: Some(Agglutination {
                    anti_a: true,
                    anti_b: true,
                    anti_d: false,
                }),
            }
        );
    }

    #[test]
    fn incompatible_sample_fails_but_consumes_a_slot() {
        let mut state = lab_state();
        state.collected_samples.push(sample_from(
            "ted_bundy",
            EvidenceKind::Fiber,
            EvidenceQuality::Pristine,
        ));
        let before = state.tests_remaining;
        let index = state.run_test(0, TestKind::Str, false).unwrap();
        let result = &state.test_results[index];
        assert!(!result.success);
        assert!(matches!(result.data, TestData::Error { .. }));
        assert_eq!(state.tests_remaining, before - 1);
    }

    #[test]
    fn pristine_str_matches_source_profile_exactly() {
        let mut state = lab_state();
        state.collected_samples.push(sample_from(
            "charles_manson",
            EvidenceKind::Blood,
            EvidenceQuality::Pristine,
        ));
        let index = state.run_test(0, TestKind::Str, false).unwrap();
        let TestData::Str { loci } = &state.test_results[index].data else {
            panic!("expected STR data");
        };
        let profile = &pool_character("charles_manson").unwrap().str_profile;
        assert_eq!(loci.len(), 8);
        for (locus, alleles) in loci {
            assert_eq!(alleles.as_slice(), &profile[locus][..]);
        }
    }

    #[test]
    fn mixed_str_shows_allele_union() {
        let mut state = lab_state();
        let mut sample = sample_from("ted_bundy", EvidenceKind::Blood, EvidenceQuality::Mixed);
        sample.mixed_with = Some("jack_the_ripper".to_string());
        state.collected_samples.push(sample);
        let index = state.run_test(0, TestKind::Str, false).unwrap();
        let TestData::Str { loci } = &state.test_results[index].data else {
            panic!("expected STR data");
        };
        let a = &pool_character("ted_bundy").unwrap().str_profile;
        let b = &pool_character("jack_the_ripper").unwrap().str_profile;
        for (locus, alleles) in loci {
            let mut expected: Vec<u8> = a[locus].iter().chain(b[locus].iter()).copied().collect();
            expected.sort_unstable();
            expected.dedup();
            assert_eq!(alleles.as_slice(), expected.as_slice());
        }
    }

    #[test]
    fn pristine_rflp_reports_all_bands_sorted() {
        let mut state = lab_state();
        state.collected_samples.push(sample_from(
            "victor_graves",
            EvidenceKind::Blood,
            EvidenceQuality::Pristine,
        ));
        let index = state.run_test(0, TestKind::Rflp, false).unwrap();
        let TestData::Rflp { enzymes } = &state.test_results[index].data else {
            panic!("expected RFLP data");
        };
        let truth = &victim_template().rflp_fragments;
        for enzyme in Enzyme::ALL {
            assert_eq!(enzymes[&enzyme].as_slice(), truth[&enzyme].as_slice());
            assert!(enzymes[&enzyme].windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn degraded_restriction_loses_exactly_one_band() {
        let mut state = lab_state();
        state.collected_samples.push(sample_from(
            "ted_bundy",
            EvidenceKind::Saliva,
            EvidenceQuality::Degraded,
        ));
        let index = state.run_test(0, TestKind::Restriction, false).unwrap();
        let TestData::Restriction { enzyme, fragments, note } = &state.test_results[index].data
        else {
            panic!("expected digest data");
        };
        assert_eq!(*enzyme, Enzyme::EcoRI);
        assert!(note.is_none());
        let full = &pool_character("ted_bundy").unwrap().rflp_fragments[&Enzyme::EcoRI];
        assert_eq!(fragments.len(), full.len() - 1);
    }

    #[test]
    fn contaminated_sample_is_flagged_unreliable() {
        let mut state = lab_state();
        let mut sample = sample_from("ted_bundy", EvidenceKind::Blood, EvidenceQuality::Pristine);
        sample.contaminated = true;
        state.collected_samples.push(sample);
        let index = state.run_test(0, TestKind::BloodType, false).unwrap();
        let result = &state.test_results[index];
        assert!(!result.reliable);
        assert!(result.success);
    }

    #[test]
    fn mtdna_reports_haplotype_of_primary_contributor() {
        let mut state = GameState::new(3);
        state.difficulty = Difficulty::Easy;
        initialize_characters(
            &mut state,
            &["john_wayne_gacy", "ted_bundy", "jeffrey_dahmer", "aileen_wuornos"],
        )
        .unwrap();
        state.reset_round_state();
        let mut sample = sample_from("john_wayne_gacy", EvidenceKind::Hair, EvidenceQuality::Mixed);
        sample.mixed_with = Some("ted_bundy".to_string());
        state.collected_samples.push(sample);
        let index = state.run_test(0, TestKind::MtDna, false).unwrap();
        assert_eq!(
            state.test_results[index].data,
            TestData::MtDna {
                haplotype: "K1a1".to_string(),
                degraded: false,
            }
        );
    }

    #[test]
    fn test_slots_run_out() {
        let mut state = lab_state();
        state.collected_samples.push(sample_from(
            "ted_bundy",
            EvidenceKind::Blood,
            EvidenceQuality::Pristine,
        ));
        state.tests_remaining = 1;
        state.run_test(0, TestKind::BloodType, false).unwrap();
        assert!(matches!(
            state.run_test(0, TestKind::BloodType, false),
            Err(GameError::NoTestsRemaining)
        ));
        assert!(matches!(
            state.run_test(42, TestKind::BloodType, false),
            Err(GameError::InvalidSampleIndex(42))
        ));
    }

    #[test]
    fn interpretation_attaches_once() {
        let mut state = lab_state();
        state.collected_samples.push(sample_from(
            "ted_bundy",
            EvidenceKind::Blood,
            EvidenceQuality::Pristine,
        ));
        let index = state.run_test(0, TestKind::BloodType, false).unwrap();
        assert!(matches!(
            state.submit_interpretation(index, "   "),
            Err(GameError::EmptyInterpretation)
        ));
        state
            .submit_interpretation(index, "Type O consistent with one suspect")
            .unwrap();
        assert!(matches!(
            state.submit_interpretation(index, "changed my mind"),
            Err(GameError::InterpretationAlreadySet(_))
        ));
        state.set_certainty(index, CertaintyLevel::Strong).unwrap();
        assert_eq!(state.test_results[index].certainty, Some(CertaintyLevel::Strong));
    }
}
