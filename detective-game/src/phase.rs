//! Phase transitions and the round lifecycle.
//!
//! The timer is a side effect of phase entry: it starts when the
//! investigation hits the scene and stops on the reflective screens.
//! Re-entering the current phase is a no-op, so a stray double
//! transition can never restart the clock.

use rand::seq::IndexedRandom;

use crate::GameError;
use crate::characters::initialize_characters;
use crate::constants::{
    LOG_ACCUSATION_MADE, LOG_FORCED_ACCUSATION, LOG_ROUND_SCORED, LOG_ROUND_START,
    LOG_SUSPECT_KILLED, LOG_TIMER_EXPIRED,
};
use crate::scene::generate_scene;
use crate::scoring::{FinalScore, calculate_final_score, calculate_round_score};
use crate::state::{Difficulty, GamePhase, GameState, RoundRecord};
use crate::timer::TimerTick;

/// What happened when the round clock ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerExpiry {
    /// Suspect killed by the murderer while time ran out, if any
    /// innocent was left to kill.
    pub victim_id: Option<String>,
    pub remaining_alive: usize,
    /// The pool is too thin to continue; the player must accuse now.
    pub forced_accusation: bool,
}

impl GameState {
    /// Move to `phase`, applying timer side effects. Idempotent.
    pub fn transition_to(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        match phase {
            GamePhase::Scene => {
                if !self.timer.running {
                    self.timer.start(self.difficulty.config().timer_seconds);
                }
            }
            GamePhase::RoundEnd | GamePhase::Accusation | GamePhase::GameOver => {
                self.timer.stop();
            }
            _ => {}
        }
        self.phase = phase;
    }

    /// Start a new case with the chosen guests and difficulty. Any
    /// previous game is wiped first; only the seed and RNG stream carry
    /// over.
    ///
    /// # Errors
    ///
    /// Propagates roster validation failures.
    pub fn start_case(
        &mut self,
        selected_ids: &[&str],
        difficulty: Difficulty,
    ) -> Result<(), GameError> {
        self.reset_game_state();
        self.difficulty = difficulty;
        initialize_characters(self, selected_ids)?;
        self.game_started = true;
        self.round = 1;
        self.reset_round_state();
        let scene = generate_scene(self);
        self.scene = Some(scene);
        self.logs.push(String::from(LOG_ROUND_START));
        self.transition_to(GamePhase::Intro);
        Ok(())
    }

    pub fn enter_scene(&mut self) {
        self.transition_to(GamePhase::Scene);
    }

    /// Move to the lab bench.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::NoSamples`] before anything is collected.
    pub fn enter_lab(&mut self) -> Result<(), GameError> {
        if self.collected_samples.is_empty() {
            return Err(GameError::NoSamples);
        }
        self.transition_to(GamePhase::Lab);
        Ok(())
    }

    pub fn enter_case_board(&mut self) {
        self.transition_to(GamePhase::CaseBoard);
    }

    fn score_round(&mut self) {
        let score = calculate_round_score(self);
        self.total_score += score.total;
        self.round_scores.push(score);
        self.round_history.push(RoundRecord {
            round: self.round,
            room: self
                .scene
                .as_ref()
                .map(|s| s.room_name.clone())
                .unwrap_or_default(),
            total: score.total,
            max_possible: score.max_possible,
            samples_collected: self.collected_samples.len(),
            tests_run: self.test_results.len(),
        });
        self.round_scored = true;
        self.logs.push(String::from(LOG_ROUND_SCORED));
    }

    /// Close out the round: score it and show the recap screen.
    pub fn end_round(&mut self) {
        if !self.round_scored {
            self.score_round();
        }
        self.transition_to(GamePhase::RoundEnd);
    }

    /// Whether the suspect pool is still deep enough for another round.
    #[must_use]
    pub fn can_advance_round(&self) -> bool {
        self.alive_suspects().len() > 2 && self.round < self.max_rounds
    }

    fn advance_round_unchecked(&mut self) {
        if !self.round_scored {
            self.score_round();
        }
        self.round += 1;
        self.reset_round_state();
        let scene = generate_scene(self);
        self.scene = Some(scene);
        self.logs.push(String::from(LOG_ROUND_START));
        // A fresh round always restarts the clock, even when the scene
        // phase was never left.
        self.timer.start(self.difficulty.config().timer_seconds);
        self.phase = GamePhase::Scene;
    }

    /// Advance to the next round's crime scene.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::AccusationRequired`] once two or fewer
    /// suspects remain alive or the round limit is reached.
    pub fn advance_to_next_round(&mut self) -> Result<(), GameError> {
        if !self.can_advance_round() {
            return Err(GameError::AccusationRequired);
        }
        self.advance_round_unchecked();
        Ok(())
    }

    /// Accuse a suspect and end the game.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::UnknownSuspect`] for an id not on the
    /// roster.
    pub fn make_accusation(&mut self, suspect_id: &str) -> Result<FinalScore, GameError> {
        if !self.suspects.iter().any(|s| s.id == suspect_id) {
            return Err(GameError::UnknownSuspect(suspect_id.to_string()));
        }
        if !self.round_scored {
            self.score_round();
        }
        self.accusation_made = true;
        self.accused_id = Some(suspect_id.to_string());
        self.logs.push(String::from(LOG_ACCUSATION_MADE));
        let final_score = calculate_final_score(self);
        self.total_score = final_score.total;
        self.game_over = true;
        self.transition_to(GamePhase::GameOver);
        Ok(final_score)
    }

    /// Handle the round clock reaching zero: the killer claims another
    /// victim and the investigation either moves on or is forced to an
    /// accusation when too few suspects remain.
    pub fn handle_timer_expired(&mut self) -> TimerExpiry {
        self.logs.push(String::from(LOG_TIMER_EXPIRED));

        let candidates: Vec<String> = self
            .suspects
            .iter()
            .filter(|s| s.alive && !s.is_killer)
            .map(|s| s.id.clone())
            .collect();
        let mut rng = self.take_rng();
        let victim_id = candidates.choose(&mut rng).cloned();
        self.rng = Some(rng);

        if let Some(id) = &victim_id {
            if let Some(victim) = self.suspects.iter_mut().find(|s| &s.id == id) {
                victim.alive = false;
            }
            self.dead_order.push(id.clone());
            self.logs.push(String::from(LOG_SUSPECT_KILLED));
        }

        let remaining_alive = self.alive_suspects().len();
        let forced = remaining_alive <= 1 || self.round >= self.max_rounds;
        if forced {
            self.logs.push(String::from(LOG_FORCED_ACCUSATION));
            self.transition_to(GamePhase::Accusation);
        } else {
            self.advance_round_unchecked();
        }
        TimerExpiry {
            victim_id,
            remaining_alive,
            forced_accusation: forced,
        }
    }

    /// Drive the countdown by one second. Returns the expiry outcome on
    /// the tick that hits zero.
    pub fn tick_second(&mut self) -> Option<TimerExpiry> {
        match self.timer.tick_second() {
            TimerTick::Expired => Some(self.handle_timer_expired()),
            TimerTick::Idle | TimerTick::Running(_) => None,
        }
    }
}
