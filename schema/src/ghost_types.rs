use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GhostType {
    Fire,
    Water,
    Grass,
    Electric,
    Ghost,
    Normal,
}

/// Attack type (row) against defense type (column), in declaration order.
/// Every pairing is spelled out; there is no fallback multiplier.
const EFFECTIVENESS_CHART: [[f64; 6]; 6] = [
    //            Fire  Water Grass Elec  Ghost Normal
    /* Fire     */ [0.5, 0.5, 2.0, 1.0, 1.0, 1.0],
    /* Water    */ [2.0, 0.5, 0.5, 1.0, 1.0, 1.0],
    /* Grass    */ [0.5, 2.0, 0.5, 1.0, 1.0, 1.0],
    /* Electric */ [1.0, 2.0, 0.5, 0.5, 1.0, 1.0],
    /* Ghost    */ [1.0, 1.0, 1.0, 1.0, 2.0, 0.0],
    /* Normal   */ [1.0, 1.0, 1.0, 1.0, 0.0, 1.0],
];

impl GhostType {
    pub const ALL: [GhostType; 6] = [
        GhostType::Fire,
        GhostType::Water,
        GhostType::Grass,
        GhostType::Electric,
        GhostType::Ghost,
        GhostType::Normal,
    ];

    fn chart_index(self) -> usize {
        match self {
            GhostType::Fire => 0,
            GhostType::Water => 1,
            GhostType::Grass => 2,
            GhostType::Electric => 3,
            GhostType::Ghost => 4,
            GhostType::Normal => 5,
        }
    }

    /// Calculate type effectiveness multiplier for attacking type vs defending type
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn type_effectiveness(attacking: GhostType, defending: GhostType) -> f64 {
        EFFECTIVENESS_CHART[attacking.chart_index()][defending.chart_index()]
    }

    pub fn is_immune(attacking: GhostType, defending: GhostType) -> bool {
        Self::type_effectiveness(attacking, defending) == 0.0
    }
}
