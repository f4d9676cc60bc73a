use super::error::GameError;

pub const FIRST_STEP: u32 = 1;
pub const FIRST_DIFFICULTY: StepDifficulty = StepDifficulty {
    grid_size: 3,
    sequence_length: 4,
};
const MAX_GRID_SIZE: usize = 5;
const LAST_TABLE_STEP: u32 = 7;
const LAST_TABLE_LENGTH: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepDifficulty {
    pub grid_size: usize,
    pub sequence_length: usize,
}

impl StepDifficulty {
    pub fn cell_count(self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn grid_label(self) -> String {
        format!("{}x{}", self.grid_size, self.grid_size)
    }
}

/// Grid size and sequence length for a given step. Steps start at 1; the
/// grid stops growing at 5x5 and from step 7 on only the sequence grows.
pub fn difficulty_for_step(step: u32) -> Result<StepDifficulty, GameError> {
    let (grid_size, sequence_length) = match step {
        0 => return Err(GameError::InvalidStep { step }),
        FIRST_STEP => return Ok(FIRST_DIFFICULTY),
        2 => (4, 4),
        3 => (4, 5),
        4 => (4, 6),
        5 => (5, 5),
        6 => (5, 6),
        7 => (5, 7),
        _ => (
            MAX_GRID_SIZE,
            LAST_TABLE_LENGTH + (step - LAST_TABLE_STEP) as usize,
        ),
    };
    Ok(StepDifficulty {
        grid_size,
        sequence_length,
    })
}
