//! Move-type vs creature-type effectiveness table.

use serde::{Deserialize, Serialize};

use super::types::ElementType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    SuperEffective,
    Neutral,
    NotVeryEffective,
}

impl Effectiveness {
    pub fn multiplier(self) -> f64 {
        match self {
            Effectiveness::SuperEffective => 2.0,
            Effectiveness::Neutral => 1.0,
            Effectiveness::NotVeryEffective => 0.5,
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Effectiveness::Neutral
    }
}

use Effectiveness::{Neutral as N, NotVeryEffective as R, SuperEffective as S};

/// Rows: attacking move type. Columns: defending type. Both in
/// `ElementType::all()` order (Fire, Water, Grass, Beast, Flying, Bug, Aquatic, Normal).
const TYPE_CHART: [[Effectiveness; 8]; 8] = [
    /* Fire    */ [R, R, S, N, N, S, R, N],
    /* Water   */ [S, R, R, N, N, N, R, N],
    /* Grass   */ [R, S, R, N, R, R, S, N],
    /* Beast   */ [N, N, N, N, R, S, N, S],
    /* Flying  */ [N, N, S, N, N, S, N, N],
    /* Bug     */ [R, N, S, N, R, N, N, N],
    /* Aquatic */ [S, N, R, N, R, N, R, N],
    /* Normal  */ [N, N, N, N, N, N, N, N],
];

fn index(element: ElementType) -> usize {
    match element {
        ElementType::Fire => 0,
        ElementType::Water => 1,
        ElementType::Grass => 2,
        ElementType::Beast => 3,
        ElementType::Flying => 4,
        ElementType::Bug => 5,
        ElementType::Aquatic => 6,
        ElementType::Normal => 7,
    }
}

/// Effectiveness of a `move_type` attack against a `defender` type.
/// A defender without a type (the player) always takes neutral damage.
pub fn effectiveness(move_type: ElementType, defender: Option<ElementType>) -> Effectiveness {
    match defender {
        Some(defender) => TYPE_CHART[index(move_type)][index(defender)],
        None => Effectiveness::Neutral,
    }
}
