use core::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::*;

/// Best completion time in whole seconds for each difficulty tier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestTimes {
    pub beginner: Option<u32>,
    pub intermediate: Option<u32>,
    pub expert: Option<u32>,
}

impl BestTimes {
    pub fn get(&self, tier: DifficultyTier) -> Option<u32> {
        match tier {
            DifficultyTier::Beginner => self.beginner,
            DifficultyTier::Intermediate => self.intermediate,
            DifficultyTier::Expert => self.expert,
        }
    }

    /// Stores `seconds` if there is no record yet or it beats the current one.
    pub fn record(&mut self, tier: DifficultyTier, seconds: u32) -> bool {
        let slot = match tier {
            DifficultyTier::Beginner => &mut self.beginner,
            DifficultyTier::Intermediate => &mut self.intermediate,
            DifficultyTier::Expert => &mut self.expert,
        };
        match *slot {
            Some(best) if best <= seconds => false,
            _ => {
                *slot = Some(seconds);
                true
            }
        }
    }
}

/// Persistence for [`BestTimes`], provided by the embedding application.
pub trait BestTimeStore {
    type Error;

    fn load(&self) -> core::result::Result<BestTimes, Self::Error>;

    fn save(&mut self, times: &BestTimes) -> core::result::Result<(), Self::Error>;
}

/// Reads the stored records, applies `seconds` for `tier` and writes back only on improvement.
pub fn submit_time<S: BestTimeStore + ?Sized>(
    store: &mut S,
    tier: DifficultyTier,
    seconds: u32,
) -> core::result::Result<bool, S::Error> {
    let mut times = store.load()?;
    let improved = times.record(tier, seconds);
    if improved {
        log::info!("New best time for {}: {}s", tier, seconds);
        store.save(&times)?;
    }
    Ok(improved)
}

/// Store that keeps records for the lifetime of the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    times: BestTimes,
    saves: usize,
}

impl MemoryStore {
    pub fn new(times: BestTimes) -> Self {
        Self { times, saves: 0 }
    }

    pub fn times(&self) -> BestTimes {
        self.times
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl BestTimeStore for MemoryStore {
    type Error = Infallible;

    fn load(&self) -> core::result::Result<BestTimes, Self::Error> {
        Ok(self.times)
    }

    fn save(&mut self, times: &BestTimes) -> core::result::Result<(), Self::Error> {
        self.times = *times;
        self.saves += 1;
        Ok(())
    }
}
