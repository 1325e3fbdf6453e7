use rand::Rng;

/// Inclusive bounds for every number that appears on a card
pub const MIN_VALUE: u32 = 1;
pub const MAX_VALUE: u32 = 100;

/// Safety bound on decoy redraws; a fair RNG collides with the target
/// roughly once per hundred draws, so this is never reached in practice.
const MAX_REDRAWS: u32 = 100;

/// One round of play: a target number and the cards offered for it.
/// Exactly one choice equals the target; decoys may duplicate each other
/// but never the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub target: u32,
    pub choices: Vec<u32>,
    pub correct_index: usize,
}

impl Round {
    /// Whether picking `index` would be the matching card
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Source of fresh rounds. Production play uses [`RandomRounds`]; tests
/// drive the state machine with [`ScriptedRounds`].
pub trait RoundSource {
    fn next_round(&mut self) -> Round;
}

/// Uniform random generation: target and correct slot drawn uniformly,
/// decoys redrawn on collision with the target only.
#[derive(Debug, Clone, Copy)]
pub struct RandomRounds {
    choice_count: usize,
}

impl RandomRounds {
    pub fn new(choice_count: usize) -> Self {
        Self {
            choice_count: choice_count.clamp(2, 3),
        }
    }
}

impl RoundSource for RandomRounds {
    fn next_round(&mut self) -> Round {
        let mut rng = rand::thread_rng();

        let target = rng.gen_range(MIN_VALUE..=MAX_VALUE);
        let correct_index = rng.gen_range(0..self.choice_count);
        let choices = (0..self.choice_count)
            .map(|slot| {
                if slot == correct_index {
                    target
                } else {
                    draw_decoy(&mut rng, target)
                }
            })
            .collect();

        Round {
            target,
            choices,
            correct_index,
        }
    }
}

fn draw_decoy(rng: &mut impl Rng, target: u32) -> u32 {
    for _ in 0..MAX_REDRAWS {
        let candidate = rng.gen_range(MIN_VALUE..=MAX_VALUE);
        if candidate != target {
            return candidate;
        }
    }
    // RNG is misbehaving; substitute a neighbour that cannot collide
    (target % MAX_VALUE) + 1
}

/// Replays a fixed list of rounds, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRounds {
    rounds: Vec<Round>,
    next: usize,
}

impl ScriptedRounds {
    /// `rounds` must be non-empty
    pub fn new(rounds: Vec<Round>) -> Self {
        assert!(!rounds.is_empty(), "scripted rounds need at least one round");
        Self { rounds, next: 0 }
    }
}

impl RoundSource for ScriptedRounds {
    fn next_round(&mut self) -> Round {
        let round = self.rounds[self.next % self.rounds.len()].clone();
        self.next += 1;
        round
    }
}
