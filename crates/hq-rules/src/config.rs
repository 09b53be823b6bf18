//! Tunable rule constants.

use hq_core::{FactionId, FREE_AGENT_FACTION};
use serde::{Deserialize, Serialize};

/// Knobs of the composition rules. The default reproduces the printed rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleConfig {
    /// Bulky items a single model may carry.
    pub max_bulky_per_model: u32,
    /// Faction whose lineages every campaign may field.
    pub free_agent_faction: FactionId,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_bulky_per_model: 1,
            free_agent_faction: FactionId::from(FREE_AGENT_FACTION),
        }
    }
}
