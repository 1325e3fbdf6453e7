use std::sync::mpsc;
use std::time::Duration;

use assert_matches::assert_matches;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use intuit::feedback::{FeedbackEvent, NullFeedback, RecordingFeedback};
use intuit::game::{FailurePolicy, Game, GameConfig, Phase};
use intuit::round::{Round, ScriptedRounds};
use intuit::runtime::{AppEvent, FixedTicker, Runner, TestEventSource, TICKS_PER_SECOND};

// Headless integration using the internal runtime + Game without a TTY.
// Keys are mapped to selections the same way the binary maps them.

fn fixed_round() -> Round {
    Round {
        target: 42,
        choices: vec![17, 42, 5],
        correct_index: 1,
    }
}

fn scripted_game(policy: FailurePolicy) -> Game {
    let config = GameConfig {
        choice_count: 3,
        round_secs: 10,
        failure_policy: policy,
        peek: false,
    };
    Game::new(
        config,
        Box::new(ScriptedRounds::new(vec![fixed_round()])),
        Box::new(NullFeedback),
    )
}

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

/// Drive the game through the runner for a bounded number of steps,
/// handling events the way the binary's loop does.
fn drive<F: FnMut(&Game) -> bool>(
    game: &mut Game,
    runner: &Runner<TestEventSource, FixedTicker>,
    max_steps: u32,
    mut done: F,
) {
    for _ in 0..max_steps {
        match runner.step() {
            AppEvent::Tick => game.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => match key.code {
                KeyCode::Char('r') => game.restart(),
                KeyCode::Char(c @ '1'..='9') => game.select(c as usize - '1' as usize),
                _ => {}
            },
        }
        if done(game) {
            return;
        }
    }
    panic!("scenario did not complete within {max_steps} steps");
}

fn runner(rx: mpsc::Receiver<AppEvent>) -> Runner<TestEventSource, FixedTicker> {
    Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(2)),
    )
}

#[test]
fn headless_correct_pick_advances_to_next_round() {
    let mut game = scripted_game(FailurePolicy::Terminal);
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);

    // card 2 holds the target
    tx.send(key('2')).unwrap();

    drive(&mut game, &runner, 200, |g| {
        g.round_number == 2 && g.phase == Phase::Playing
    });

    assert_eq!(game.score, 1);
    assert_eq!(game.clock, 10);
    assert_eq!(game.selected, None);
}

#[test]
fn headless_timeout_ends_terminal_session() {
    let mut game = scripted_game(FailurePolicy::Terminal);
    let (_tx, rx) = mpsc::channel();
    let runner = runner(rx);

    drive(&mut game, &runner, 20 * TICKS_PER_SECOND, Game::is_over);

    assert_matches!(game.phase, Phase::GameOver);
    assert_eq!(game.score, 0);
    assert_eq!(game.clock, 0);
}

#[test]
fn headless_wrong_pick_is_fatal_under_terminal_policy() {
    let mut game = scripted_game(FailurePolicy::Terminal);
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);

    tx.send(key('1')).unwrap();

    drive(&mut game, &runner, 50, Game::is_over);

    assert_eq!(game.score, 0);
    assert_eq!(game.round_number, 1);
}

#[test]
fn headless_wrong_pick_recovers_under_recoverable_policy() {
    let mut game = scripted_game(FailurePolicy::Recoverable);
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);

    tx.send(key('1')).unwrap();

    drive(&mut game, &runner, 200, |g| {
        g.round_number == 2 && g.phase == Phase::Playing
    });

    assert_eq!(game.score, 0);
    assert!(!game.is_over());
}

#[test]
fn headless_restart_cancels_pending_advance() {
    let mut game = scripted_game(FailurePolicy::Terminal);
    let (tx, rx) = mpsc::channel();
    let runner = runner(rx);

    // correct pick schedules the auto-advance, restart must cancel it
    tx.send(key('2')).unwrap();
    tx.send(key('r')).unwrap();

    // run well past the advance delay; the round counter only moves if a
    // stale advance fires against the fresh session
    drive(&mut game, &runner, 10 * TICKS_PER_SECOND, |g| g.clock <= 6);

    assert_eq!(game.round_number, 1);
    assert_eq!(game.score, 0);
    assert_matches!(game.phase, Phase::Playing);
}

#[test]
fn headless_full_countdown_emits_warning_ticks_then_game_over() {
    let recorder = RecordingFeedback::new();
    let config = GameConfig {
        choice_count: 3,
        round_secs: 10,
        failure_policy: FailurePolicy::Terminal,
        peek: false,
    };
    let mut game = Game::new(
        config,
        Box::new(ScriptedRounds::new(vec![fixed_round()])),
        Box::new(recorder.clone()),
    );
    let (_tx, rx) = mpsc::channel();
    let runner = runner(rx);

    drive(&mut game, &runner, 20 * TICKS_PER_SECOND, Game::is_over);

    assert_eq!(
        recorder.events(),
        vec![
            FeedbackEvent::CountdownTick(3),
            FeedbackEvent::CountdownTick(2),
            FeedbackEvent::CountdownTick(1),
            FeedbackEvent::GameOver,
        ]
    );
}
