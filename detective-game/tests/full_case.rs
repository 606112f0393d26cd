//! End-to-end walkthrough of a full case on a fixed seed.

use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use detective_game::{
    Difficulty, EvidenceKind, GameEngine, GamePhase, GameStorage, TestKind, letter_grade,
};

#[derive(Default, Clone)]
struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl GameStorage for MemoryStore {
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

fn compatible_test(kind: EvidenceKind) -> Option<TestKind> {
    TestKind::ALL.into_iter().find(|t| t.compatible_with(kind))
}

#[test]
fn seeded_case_from_title_to_verdict() {
    let engine = GameEngine::new(MemoryStore::default());
    let mut state = engine.new_game(2024);

    state
        .start_case(
            &[
                "ted_bundy",
                "john_wayne_gacy",
                "jack_the_ripper",
                "charles_manson",
                "aileen_wuornos",
            ],
            Difficulty::Easy,
        )
        .unwrap();
    assert_eq!(state.phase, GamePhase::Intro);
    assert_eq!(state.suspects.len(), 5);
    let killer_id = state.killer_id.clone().expect("killer assigned");

    state.enter_scene();
    assert_eq!(state.phase, GamePhase::Scene);
    assert!(state.timer.running);
    assert_eq!(state.timer.seconds, 300);
    let scene = state.scene.clone().expect("scene generated");
    assert_eq!(scene.room_name, "The Library");

    // Collect two testable traces, properly gloved and labeled.
    state.put_on_gloves();
    let testable: Vec<usize> = scene
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| compatible_test(item.kind).is_some())
        .map(|(i, _)| i)
        .take(2)
        .collect();
    assert!(!testable.is_empty());
    for &index in &testable {
        let kind = scene.items[index].kind;
        state
            .collect_evidence(index, "scene swab A", kind, "photographed in place first")
            .unwrap();
    }
    assert_eq!(state.contamination_events, 0);
    assert!(state.collected_samples.iter().all(|s| s.custody == 3));

    state.enter_lab().unwrap();
    for sample_index in 0..state.collected_samples.len() {
        let kind = state.collected_samples[sample_index].actual_kind;
        let test = compatible_test(kind).expect("testable sample");
        let result_index = state.run_test(sample_index, test, true).unwrap();
        assert!(state.test_results[result_index].success);
        state
            .submit_interpretation(
                result_index,
                "The profile is consistent with one guest and appears to exclude the others, \
                 but the degraded markers mean further testing is possible.",
            )
            .unwrap();
    }
    assert_eq!(state.control_tests_total as usize, testable.len());

    state.enter_case_board();
    state
        .update_suspect_assessment(&killer_id, 85, "trace places them at the scene")
        .unwrap();
    state.set_conclusion(
        "The blood sample and dna profile are consistent with a single guest, and the test \
         results therefore suggest that guest is likely the killer. However, the evidence \
         cannot exclude a mixture, so further testing of the remaining samples is possible.",
    );

    // A mid-case save must restore the same investigation.
    engine.save_game(&state).unwrap();
    let restored = engine.load_game().unwrap().expect("save present");
    assert_eq!(restored.killer_id, state.killer_id);
    assert_eq!(restored.collected_samples, state.collected_samples);
    assert_eq!(restored.test_results, state.test_results);
    assert_eq!(restored.current_conclusion, state.current_conclusion);
    assert!(!restored.timer.running);

    state.end_round();
    assert_eq!(state.phase, GamePhase::RoundEnd);
    assert_eq!(state.round_scores.len(), 1);
    let round_score = state.round_scores[0];
    assert!(round_score.total > 0);
    assert_eq!(round_score.contamination_penalty, 0);

    state.advance_to_next_round().unwrap();
    assert_eq!(state.round, 2);
    assert_eq!(state.phase, GamePhase::Scene);
    assert_ne!(state.scene.as_ref().unwrap().room_name, "The Library");
    assert!(state.collected_samples.is_empty());
    assert_eq!(state.round_scores.len(), 1);

    // Let the clock run out once; the killer strikes and the case moves on.
    state.timer.seconds = 1;
    let expiry = state.tick_second().expect("expiry outcome");
    assert!(!expiry.forced_accusation);
    assert_eq!(state.round, 3);
    assert_eq!(state.dead_order.len(), 2);

    let final_score = state.make_accusation(&killer_id).unwrap();
    assert!(final_score.correct_accusation);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.game_over);
    assert_eq!(state.total_score, final_score.total);
    assert_eq!(final_score.round_total + final_score.accusation_bonus, final_score.total);

    // Three scored rounds plus the accusation bonus headroom.
    assert_eq!(state.round_scores.len(), 3);
    assert_eq!(final_score.max_possible, 330);
    assert_ne!(letter_grade(0, final_score.max_possible), letter_grade(330, final_score.max_possible));
}
