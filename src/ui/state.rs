use rand::Rng;

use super::progression::{FIRST_DIFFICULTY, FIRST_STEP, StepDifficulty, difficulty_for_step};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Showing,
    AwaitingInput,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not accepting input right now.
    Ignored,
    /// Correct so far, more cells expected.
    Accepted,
    Won,
    Lost,
}

/// Difficulty progress that survives from round to round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    pub step: u32,
    pub difficulty: StepDifficulty,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            step: FIRST_STEP,
            difficulty: FIRST_DIFFICULTY,
        }
    }
}

impl Session {
    pub fn grid_size(&self) -> usize {
        self.difficulty.grid_size
    }

    pub fn sequence_length(&self) -> usize {
        self.difficulty.sequence_length
    }

    pub fn cell_count(&self) -> usize {
        self.difficulty.cell_count()
    }

    pub fn advance(&mut self) {
        self.step = self.step.saturating_add(1);
        // step >= 2 here, always inside the table.
        if let Ok(difficulty) = difficulty_for_step(self.step) {
            self.difficulty = difficulty;
        }
    }
}

/// State scoped to a single round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Round {
    pub sequence: Vec<usize>,
    pub player_sequence: Vec<usize>,
}

impl Round {
    /// Independent uniform draws over the grid; repeats are allowed.
    pub fn generate<R: Rng + ?Sized>(difficulty: StepDifficulty, rng: &mut R) -> Self {
        let cells = difficulty.cell_count();
        let sequence = (0..difficulty.sequence_length)
            .map(|_| rng.random_range(0..cells))
            .collect();
        Round {
            sequence,
            player_sequence: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_sequence(sequence: Vec<usize>) -> Self {
        Round {
            sequence,
            player_sequence: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.sequence.clear();
        self.player_sequence.clear();
    }

    /// Records a click and judges it against the same position of the
    /// sequence.
    pub fn record(&mut self, index: usize) -> InputOutcome {
        self.player_sequence.push(index);
        let position = self.player_sequence.len() - 1;
        if self.sequence.get(position) != Some(&index) {
            InputOutcome::Lost
        } else if self.player_sequence.len() == self.sequence.len() {
            InputOutcome::Won
        } else {
            InputOutcome::Accepted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn session_starts_at_first_step() {
        let session = Session::default();
        assert_eq!(session.step, 1);
        assert_eq!(session.difficulty, difficulty_for_step(1).unwrap());
    }

    #[test]
    fn advancing_follows_the_progression() {
        let mut session = Session::default();
        for step in 2..12 {
            session.advance();
            assert_eq!(session.step, step);
            assert_eq!(session.difficulty, difficulty_for_step(step).unwrap());
        }
    }

    #[test]
    fn generated_sequences_fit_the_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        for step in 1..20 {
            let difficulty = difficulty_for_step(step).unwrap();
            for _ in 0..50 {
                let round = Round::generate(difficulty, &mut rng);
                assert_eq!(round.sequence.len(), difficulty.sequence_length);
                assert!(round.sequence.iter().all(|&i| i < difficulty.cell_count()));
                assert!(round.player_sequence.is_empty());
            }
        }
    }

    #[test]
    fn repeated_cells_are_judged_by_position() {
        let mut round = Round::with_sequence(vec![4, 4, 1]);
        assert_eq!(round.record(4), InputOutcome::Accepted);
        assert_eq!(round.record(4), InputOutcome::Accepted);
        assert_eq!(round.record(1), InputOutcome::Won);
    }

    #[test]
    fn first_wrong_cell_loses() {
        let mut round = Round::with_sequence(vec![2, 0, 5, 1]);
        assert_eq!(round.record(2), InputOutcome::Accepted);
        assert_eq!(round.record(3), InputOutcome::Lost);
    }
}
