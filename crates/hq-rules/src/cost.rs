//! Team cost: recruitment plus roster-level equipment.

use crate::selected_recruits;
use hq_core::{Campaign, Catalog, CatalogIndex, FactionId, MatchTeam, RecruitedModel};

/// Cost of one roster entry as seen by a campaign of `faction`.
///
/// The profile cost scales with `quantity`; equipped items are charged once
/// per entry regardless of quantity. Unresolved references cost nothing.
pub fn recruit_cost(recruit: &RecruitedModel, faction: &FactionId, index: &CatalogIndex<'_>) -> u32 {
    let models = index
        .profile(&recruit.current_profile_id)
        .map(|p| p.cost_eb.saturating_mul(recruit.quantity))
        .unwrap_or(0);
    let gear = recruit
        .equipped_item_ids
        .iter()
        .filter_map(|item| index.priced(item, faction).ok())
        .map(|(_, terms)| terms.cost)
        .fold(0, u32::saturating_add);
    models.saturating_add(gear)
}

/// Total cost of the selected recruits. Match-level attachments are not
/// charged; they were paid for when bought into the stash.
pub fn team_cost(team: &MatchTeam, campaign: &Campaign, index: &CatalogIndex<'_>) -> u32 {
    selected_recruits(team, campaign)
        .into_iter()
        .map(|r| recruit_cost(r, &campaign.faction_id, index))
        .fold(0, u32::saturating_add)
}

/// [`team_cost`] over an unindexed catalog.
pub fn calculate_team_cost(team: &MatchTeam, campaign: &Campaign, catalog: &Catalog) -> u32 {
    team_cost(team, campaign, &catalog.index())
}
