//! Faction variant resolution.

use crate::{FactionId, FactionVariant};

/// Cost, rarity and Street Cred requirement after variant resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantTerms {
    pub cost: u32,
    pub rarity: u32,
    pub req_street_cred: u32,
}

impl From<&FactionVariant> for VariantTerms {
    fn from(v: &FactionVariant) -> Self {
        Self {
            cost: v.cost,
            rarity: v.rarity,
            req_street_cred: v.req_street_cred,
        }
    }
}

/// Pick the variant that applies to `faction`.
///
/// Precedence: exact faction match, then the `"universal"` entry, then the
/// first entry. Returns `None` only for an empty list.
pub fn resolve_variant<'a>(
    variants: &'a [FactionVariant],
    faction: Option<&FactionId>,
) -> Option<&'a FactionVariant> {
    faction
        .and_then(|f| variants.iter().find(|v| &v.faction_id == f))
        .or_else(|| variants.iter().find(|v| v.faction_id.is_universal()))
        .or_else(|| variants.first())
}
