//! One-shot summary for a deployment screen.

use crate::{check_roster, influence, selected_recruits, street_cred, team_cost, RuleConfig, Violation};
use hq_core::{Campaign, Catalog, LookupError, MatchTeam};
use std::collections::BTreeSet;

/// Cost, metrics and violations of a team, plus any dangling references
/// that were skipped while computing them.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterReport {
    pub cost: u32,
    pub target_eb: u32,
    pub street_cred: u32,
    pub influence: u32,
    pub violations: Vec<Violation>,
    pub unresolved: Vec<LookupError>,
}

impl RosterReport {
    pub fn is_legal(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// References the rules had to skip, sorted and de-duplicated.
///
/// Covers the campaign's home faction, the whole roster (it feeds the
/// campaign metrics), completed objectives, and the team's selection and
/// match-level attachments.
pub fn unresolved_references(
    team: &MatchTeam,
    campaign: &Campaign,
    catalog: &Catalog,
) -> Vec<LookupError> {
    let index = catalog.index();
    let mut missing = BTreeSet::new();

    missing.extend(index.faction(&campaign.faction_id).err());
    for recruit in &campaign.hq_roster {
        missing.extend(index.lineage(&recruit.lineage_id).err());
        missing.extend(index.profile(&recruit.current_profile_id).err());
    }
    for objective in &campaign.completed_objectives {
        missing.extend(index.item(objective).err());
    }
    for id in &team.selected_recruit_ids {
        if campaign.recruit(id).is_none() {
            missing.insert(LookupError::Recruit(id.clone()));
        }
    }
    for recruit in selected_recruits(team, campaign) {
        for item in &recruit.equipped_item_ids {
            missing.extend(index.item(&item.item_id).err());
        }
        for key in team.attachments(&recruit.id) {
            missing.extend(index.item(&key.item_id).err());
        }
    }
    missing.into_iter().collect()
}

/// Build a full [`RosterReport`].
pub fn report(
    team: &MatchTeam,
    campaign: &Campaign,
    catalog: &Catalog,
    config: &RuleConfig,
) -> RosterReport {
    let index = catalog.index();
    RosterReport {
        cost: team_cost(team, campaign, &index),
        target_eb: team.target_eb,
        street_cred: street_cred(campaign, &index),
        influence: influence(campaign, &index),
        violations: check_roster(team, campaign, &index, config),
        unresolved: unresolved_references(team, campaign, catalog),
    }
}
