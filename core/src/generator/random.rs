use super::*;

/// Generation strategy that deals every non-void cell an independent uniform value in `1..=9`.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self) -> Board {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut values: ValueGrid = Default::default();
        for value in values.iter_mut().flatten() {
            *value = rng.random_range(MIN_VALUE..=MAX_VALUE);
        }

        log::debug!("dealt board from seed {:#018x}", self.seed);
        Board::from_values(&values).expect("generated values should be in range")
    }
}
