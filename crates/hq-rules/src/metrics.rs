//! Campaign-wide Street Cred and Influence.

use hq_core::{Campaign, Catalog, CatalogIndex, ModelType, Skill};

/// Sum of every roster entry's rank level plus completed objective bonuses.
pub fn street_cred(campaign: &Campaign, index: &CatalogIndex<'_>) -> u32 {
    let ranks = campaign
        .hq_roster
        .iter()
        .filter_map(|r| index.profile(&r.current_profile_id).ok())
        .map(|p| p.level);
    let bonuses = campaign
        .completed_objectives
        .iter()
        .filter_map(|id| index.item(id).ok())
        .map(|item| item.grants_street_cred_bonus);
    ranks.chain(bonuses).fold(0, u32::saturating_add)
}

/// Sum of the Influence skill across Leader and Character roster entries.
pub fn influence(campaign: &Campaign, index: &CatalogIndex<'_>) -> u32 {
    campaign
        .hq_roster
        .iter()
        .filter_map(|r| {
            let lineage = index.lineage(&r.lineage_id).ok()?;
            if !matches!(lineage.model_type, ModelType::Leader | ModelType::Character) {
                return None;
            }
            index.profile(&r.current_profile_id).ok()
        })
        .map(|p| p.skill(Skill::Influence))
        .fold(0, u32::saturating_add)
}

/// [`street_cred`] over an unindexed catalog.
pub fn calculate_campaign_street_cred(campaign: &Campaign, catalog: &Catalog) -> u32 {
    street_cred(campaign, &catalog.index())
}

/// [`influence`] over an unindexed catalog.
pub fn calculate_campaign_influence(campaign: &Campaign, catalog: &Catalog) -> u32 {
    influence(campaign, &catalog.index())
}
