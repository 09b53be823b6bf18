#![deny(warnings)]

//! Roster rules for Combat Zone HQ: campaign metrics, team cost and the
//! composition validator.
//!
//! Every function here is a pure reduction over borrowed snapshots of the
//! catalog, campaign and match team. Dangling references never fail a call;
//! they simply contribute nothing. Use [`report::unresolved_references`] to
//! surface them separately.

pub mod config;
pub mod cost;
pub mod metrics;
pub mod report;
pub mod validate;
pub mod violation;

pub use config::RuleConfig;
pub use cost::{calculate_team_cost, recruit_cost, team_cost};
pub use metrics::{
    calculate_campaign_influence, calculate_campaign_street_cred, influence, street_cred,
};
pub use report::{report, unresolved_references, RosterReport};
pub use validate::{check_roster, validate_roster, validate_roster_with};
pub use violation::Violation;

use hq_core::{Campaign, MatchTeam, RecruitedModel};
use std::collections::HashMap;

/// Selected roster entries in selection order. Ids missing from the roster
/// are dropped; a duplicated roster id resolves to its first entry, like
/// [`Campaign::recruit`].
pub(crate) fn selected_recruits<'c>(
    team: &MatchTeam,
    campaign: &'c Campaign,
) -> Vec<&'c RecruitedModel> {
    let mut roster: HashMap<&str, &RecruitedModel> = HashMap::new();
    for r in &campaign.hq_roster {
        roster.entry(r.id.as_str()).or_insert(r);
    }
    team.selected_recruit_ids
        .iter()
        .filter_map(|id| roster.get(id.as_str()).copied())
        .collect()
}
