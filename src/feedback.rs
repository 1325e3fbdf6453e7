use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Fire-and-forget notifications the state machine emits for the
/// presentation layer (audio, speech). The core never waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackEvent {
    /// A card was picked (any card, before resolution)
    CardSelected,
    /// The pick matched the target
    CorrectAnswer,
    /// The pick missed, or the round timed out under the recoverable policy
    WrongAnswer,
    /// One of the final seconds of the countdown; carries seconds remaining
    CountdownTick(u32),
    /// The session ended
    GameOver,
}

/// Consumer of feedback events. Implementations must be infallible:
/// playback problems stay on the presentation side and never reach the
/// state machine.
pub trait FeedbackSink {
    fn notify(&mut self, event: FeedbackEvent);
}

/// Discards everything; used when sound is off
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn notify(&mut self, _event: FeedbackEvent) {}
}

/// Terminal-bell degrade of the game's sound design. A richer sink would
/// synthesize [`tone_sequence`] instead.
pub struct BellFeedback;

impl FeedbackSink for BellFeedback {
    fn notify(&mut self, _event: FeedbackEvent) {
        // write failures are swallowed; the bell is best-effort
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07").and_then(|()| stdout.flush());
    }
}

/// Records events for inspection in tests. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingFeedback {
    events: Rc<RefCell<Vec<FeedbackEvent>>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.borrow().clone()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn notify(&mut self, event: FeedbackEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// One note of a feedback sound: frequency, length, and when it starts
/// relative to the event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_secs: f32,
    pub offset_secs: f32,
    pub waveform: Waveform,
}

/// Tone data for each event kind, for sinks that can synthesize audio:
/// a short click on selection, an ascending C-E-G chord on a correct
/// pick, a low triangle buzz on a miss, a high tick for the countdown,
/// and three descending notes when the session ends.
pub fn tone_sequence(event: FeedbackEvent) -> &'static [Tone] {
    match event {
        FeedbackEvent::CardSelected => &[Tone {
            frequency_hz: 800.0,
            duration_secs: 0.1,
            offset_secs: 0.0,
            waveform: Waveform::Sine,
        }],
        FeedbackEvent::CorrectAnswer => &[
            Tone {
                frequency_hz: 523.0,
                duration_secs: 0.3,
                offset_secs: 0.0,
                waveform: Waveform::Sine,
            },
            Tone {
                frequency_hz: 659.0,
                duration_secs: 0.3,
                offset_secs: 0.1,
                waveform: Waveform::Sine,
            },
            Tone {
                frequency_hz: 784.0,
                duration_secs: 0.5,
                offset_secs: 0.2,
                waveform: Waveform::Sine,
            },
        ],
        FeedbackEvent::WrongAnswer => &[Tone {
            frequency_hz: 200.0,
            duration_secs: 0.5,
            offset_secs: 0.0,
            waveform: Waveform::Triangle,
        }],
        FeedbackEvent::CountdownTick(_) => &[Tone {
            frequency_hz: 1000.0,
            duration_secs: 0.05,
            offset_secs: 0.0,
            waveform: Waveform::Square,
        }],
        FeedbackEvent::GameOver => &[
            Tone {
                frequency_hz: 400.0,
                duration_secs: 0.3,
                offset_secs: 0.0,
                waveform: Waveform::Sine,
            },
            Tone {
                frequency_hz: 350.0,
                duration_secs: 0.3,
                offset_secs: 0.15,
                waveform: Waveform::Sine,
            },
            Tone {
                frequency_hz: 300.0,
                duration_secs: 0.5,
                offset_secs: 0.3,
                waveform: Waveform::Sine,
            },
        ],
    }
}
