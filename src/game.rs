use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackEvent, FeedbackSink};
use crate::round::{Round, RoundSource};
use crate::runtime::TICKS_PER_SECOND;

/// Countdown seconds that get an audible tick
const COUNTDOWN_WARNING_SECS: u32 = 3;

/// Delay before a feedback state auto-advances into a fresh round
const ADVANCE_DELAY_TICKS: u32 = 2 * TICKS_PER_SECOND;

/// Current state of the session's state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Playing,
    Correct,
    Wrong,
    Timeout,
    GameOver,
}

/// What a miss or a timeout does to the session. The game has shipped
/// with both behaviors; this makes the choice explicit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FailurePolicy {
    /// Any miss or timeout ends the session
    Terminal,
    /// Misses and timeouts are transient feedback; play resumes after a delay
    Recoverable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub choice_count: usize,
    pub round_secs: u32,
    pub failure_policy: FailurePolicy,
    /// Keep the target visible during the round (practice aid)
    pub peek: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            choice_count: 3,
            round_secs: 10,
            failure_policy: FailurePolicy::Terminal,
            peek: false,
        }
    }
}

/// One play session: the current round plus score, clock, and phase.
/// All mutation happens synchronously inside `on_tick`, `select`, and
/// `restart`; the two pieces of scheduled work (the per-second countdown
/// and the auto-advance delay) are owned optional counters, so replacing
/// or resetting them cancels any pending work outright.
pub struct Game {
    pub config: GameConfig,
    pub round: Round,
    pub score: u32,
    pub round_number: u32,
    /// Whole seconds remaining; never goes below zero
    pub clock: u32,
    pub phase: Phase,
    pub selected: Option<usize>,
    pub reveal_target: bool,
    rounds: Box<dyn RoundSource>,
    feedback: Box<dyn FeedbackSink>,
    /// Ticks accumulated toward the next clock second; live only while Playing
    subsecond: u32,
    /// Pending auto-advance, in ticks; None means nothing scheduled
    pending_advance: Option<u32>,
}

impl Game {
    pub fn new(
        config: GameConfig,
        mut rounds: Box<dyn RoundSource>,
        feedback: Box<dyn FeedbackSink>,
    ) -> Self {
        let round = rounds.next_round();
        Self {
            round,
            score: 0,
            round_number: 1,
            clock: config.round_secs,
            phase: Phase::Playing,
            selected: None,
            reveal_target: config.peek,
            rounds,
            feedback,
            subsecond: 0,
            pending_advance: None,
            config,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Advance time by one runtime tick. While Playing this drives the
    /// countdown; in a feedback state it drives the auto-advance delay.
    pub fn on_tick(&mut self) {
        match self.phase {
            Phase::Playing => {
                self.subsecond += 1;
                if self.subsecond < TICKS_PER_SECOND {
                    return;
                }
                self.subsecond = 0;
                self.clock = self.clock.saturating_sub(1);
                if self.clock == 0 {
                    self.time_out();
                } else if self.clock <= COUNTDOWN_WARNING_SECS {
                    self.feedback.notify(FeedbackEvent::CountdownTick(self.clock));
                }
            }
            Phase::Correct | Phase::Wrong | Phase::Timeout => {
                // take() empties the handle; re-arm only if time remains
                if let Some(remaining) = self.pending_advance.take() {
                    if remaining > 1 {
                        self.pending_advance = Some(remaining - 1);
                    } else {
                        self.next_round();
                    }
                }
            }
            Phase::GameOver => {}
        }
    }

    /// Handle a card pick. Ignored outside Playing and for out-of-range
    /// indices; malformed input is not an error.
    pub fn select(&mut self, index: usize) {
        if self.phase != Phase::Playing || index >= self.round.choices.len() {
            return;
        }

        self.selected = Some(index);
        self.feedback.notify(FeedbackEvent::CardSelected);

        if self.round.is_correct(index) {
            self.phase = Phase::Correct;
            self.score += 1;
            self.reveal_target = true;
            self.feedback.notify(FeedbackEvent::CorrectAnswer);
            self.schedule_advance();
        } else {
            self.feedback.notify(FeedbackEvent::WrongAnswer);
            match self.config.failure_policy {
                FailurePolicy::Terminal => self.end_session(),
                FailurePolicy::Recoverable => {
                    self.phase = Phase::Wrong;
                    self.schedule_advance();
                }
            }
        }
    }

    /// Tear the session down and start over from initial defaults,
    /// cancelling any pending countdown or auto-advance work.
    pub fn restart(&mut self) {
        self.score = 0;
        self.round_number = 1;
        self.round = self.rounds.next_round();
        self.reset_round_state();
    }

    fn time_out(&mut self) {
        match self.config.failure_policy {
            FailurePolicy::Terminal => self.end_session(),
            FailurePolicy::Recoverable => {
                self.phase = Phase::Timeout;
                self.feedback.notify(FeedbackEvent::WrongAnswer);
                self.schedule_advance();
            }
        }
    }

    fn end_session(&mut self) {
        self.phase = Phase::GameOver;
        self.pending_advance = None;
        self.feedback.notify(FeedbackEvent::GameOver);
    }

    fn schedule_advance(&mut self) {
        // assignment supersedes any previously scheduled advance
        self.pending_advance = Some(ADVANCE_DELAY_TICKS);
    }

    fn next_round(&mut self) {
        self.round = self.rounds.next_round();
        self.round_number += 1;
        self.reset_round_state();
    }

    fn reset_round_state(&mut self) {
        self.clock = self.config.round_secs;
        self.phase = Phase::Playing;
        self.selected = None;
        self.reveal_target = self.config.peek;
        self.subsecond = 0;
        self.pending_advance = None;
    }
}
