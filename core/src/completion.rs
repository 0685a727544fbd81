use hashbrown::HashMap;

use crate::*;

/// Single pass check for two values summing to [`TARGET_SUM`].
///
/// Keeps a multiset of values still needed to complete a pair with something
/// already seen, so the scan stops at the first complement found.
pub fn has_playable_pair(values: impl IntoIterator<Item = CellValue>) -> bool {
    let mut needed: HashMap<CellValue, CellCount> = HashMap::new();

    for value in values {
        if needed.get(&value).is_some_and(|&count| count > 0) {
            return true;
        }
        if let Some(complement) = TARGET_SUM.checked_sub(value) {
            *needed.entry(complement).or_default() += 1;
        }
    }

    false
}

/// Interaction state that must be quiet before a board can be declared complete.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CompletionGate {
    pub status: GameStatus,
    pub pick_in_progress: bool,
    pub resolving: bool,
}

impl CompletionGate {
    pub const fn is_quiet(self) -> bool {
        matches!(self.status, GameStatus::Playing) && !self.pick_in_progress && !self.resolving
    }
}

impl Board {
    pub fn has_playable_pair(&self) -> bool {
        has_playable_pair(self.revealed_values())
    }

    /// Whether the game should end as completed given the current interaction state.
    pub fn is_exhausted(&self, gate: CompletionGate) -> bool {
        gate.is_quiet() && !self.has_playable_pair()
    }
}
