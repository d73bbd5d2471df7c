use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{ProgressionError, ProgressionResult};
use super::record::{LevelProgress, ProgressionRecord, XpGain};
use super::rewards::battle_xp_reward;
use super::store::ProgressionStore;
use crate::combat::types::{EncounterResult, EncounterState, PlayerBattleStats};

/// What committing a finished encounter changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterOutcome {
    pub result: EncounterResult,
    pub xp_awarded: u64,
    /// Present only for wins.
    pub gain: Option<XpGain>,
}

/// A player's progression bound to its store.
///
/// Every write goes through the store before it is visible here, so a failed
/// save leaves the in-memory record untouched.
#[derive(Debug)]
pub struct PlayerProgression<S: ProgressionStore> {
    store: S,
    record: ProgressionRecord,
}

impl<S: ProgressionStore> PlayerProgression<S> {
    /// Loads the record, creating and saving a fresh one on first use.
    pub fn open(mut store: S) -> ProgressionResult<Self> {
        let record = match store.load()? {
            Some(record) => record,
            None => {
                let record = ProgressionRecord::new(chrono::Utc::now().timestamp());
                store.save(&record)?;
                info!(profile_id = %record.profile_id, "created progression record");
                record
            }
        };
        Ok(Self { store, record })
    }

    pub fn record(&self) -> &ProgressionRecord {
        &self.record
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_player_battle_stats(&self) -> PlayerBattleStats {
        self.record.battle_stats()
    }

    pub fn get_level_progress(&self) -> LevelProgress {
        self.record.level_progress()
    }

    pub fn add_xp(&mut self, amount: u64) -> ProgressionResult<XpGain> {
        self.update(|record| record.apply_xp(amount))
    }

    pub fn record_win(&mut self) -> ProgressionResult<()> {
        self.update(|record| record.wins += 1)
    }

    pub fn record_loss(&mut self) -> ProgressionResult<()> {
        self.update(|record| record.losses += 1)
    }

    pub fn record_flee(&mut self) -> ProgressionResult<()> {
        self.update(|record| record.flees += 1)
    }

    /// Folds a finished encounter into the record with a single save: bumps
    /// the matching counter and, on a win, credits the battle XP reward.
    pub fn commit_encounter(
        &mut self,
        state: &EncounterState,
    ) -> ProgressionResult<EncounterOutcome> {
        let result = state.result.ok_or(ProgressionError::EncounterInProgress)?;
        let creature_level = state.creature.level;

        let outcome = self.update(|record| match result {
            EncounterResult::Win => {
                record.wins += 1;
                let xp = battle_xp_reward(creature_level, record.level);
                EncounterOutcome {
                    result,
                    xp_awarded: xp,
                    gain: Some(record.apply_xp(xp)),
                }
            }
            EncounterResult::Lose => {
                record.losses += 1;
                EncounterOutcome {
                    result,
                    xp_awarded: 0,
                    gain: None,
                }
            }
            EncounterResult::Flee => {
                record.flees += 1;
                EncounterOutcome {
                    result,
                    xp_awarded: 0,
                    gain: None,
                }
            }
        })?;

        debug!(%result, xp = outcome.xp_awarded, "encounter committed");
        Ok(outcome)
    }

    /// Applies `change` to a copy, saves it, then swaps it in.
    fn update<T>(
        &mut self,
        change: impl FnOnce(&mut ProgressionRecord) -> T,
    ) -> ProgressionResult<T> {
        let mut next = self.record.clone();
        let value = change(&mut next);
        next.updated_at = chrono::Utc::now().timestamp().max(next.updated_at);
        self.store.save(&next)?;

        if next.level > self.record.level {
            info!(from = self.record.level, to = next.level, "player leveled up");
        }
        self.record = next;
        Ok(value)
    }
}
