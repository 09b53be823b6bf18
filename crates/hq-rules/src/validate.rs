//! Team composition validator.
//!
//! Checks run in a fixed order and never short-circuit each other:
//! leader quota, Gonk quota, budget, Street Cred gating, rarity, Bulky limit,
//! Cybergear gating, program gating, faction purity. Limits are exceeded only
//! by a strictly greater value.

use crate::{
    cost::team_cost,
    metrics::{influence, street_cred},
    selected_recruits, RuleConfig, Violation,
};
use hq_core::{
    keywords, Campaign, Catalog, CatalogIndex, ItemCard, ItemCategory, ItemId, MatchTeam,
    ModelLineage, ModelType, RecruitedModel, Skill,
};
use std::collections::BTreeMap;
use tracing::debug;

fn count<I: Iterator>(it: I) -> u32 {
    it.fold(0, |n, _| n.saturating_add(1))
}

/// Everything a check needs, resolved once per call.
struct Context<'a, 'c> {
    team: &'c MatchTeam,
    campaign: &'c Campaign,
    index: &'c CatalogIndex<'a>,
    config: &'c RuleConfig,
    recruits: Vec<&'c RecruitedModel>,
}

impl<'a, 'c> Context<'a, 'c> {
    fn lineage(&self, recruit: &RecruitedModel) -> Option<&'a ModelLineage> {
        self.index.lineage(&recruit.lineage_id).ok()
    }

    fn is_type(&self, recruit: &RecruitedModel, model_type: ModelType) -> bool {
        self.lineage(recruit)
            .is_some_and(|l| l.model_type == model_type)
    }

    /// Resolved roster-level equipment of one recruit.
    fn gear<'s>(
        &'s self,
        recruit: &'s RecruitedModel,
    ) -> impl Iterator<Item = &'a ItemCard> + 's {
        recruit
            .equipped_item_ids
            .iter()
            .filter_map(|item| self.index.item(&item.item_id).ok())
    }

    fn leader_quota(&self) -> Option<Violation> {
        let leaders = count(
            self.recruits
                .iter()
                .filter(|r| self.is_type(r, ModelType::Leader)),
        );
        match leaders {
            0 => Some(Violation::MissingLeader),
            1 => None,
            count => Some(Violation::TooManyLeaders { count }),
        }
    }

    fn gonk_quota(&self) -> Option<Violation> {
        let gonks = self
            .recruits
            .iter()
            .filter(|r| self.is_type(r, ModelType::Gonk))
            .map(|r| r.quantity)
            .fold(0, u32::saturating_add);
        let allowed = influence(self.campaign, self.index);
        (gonks > allowed).then_some(Violation::TooManyGonks { gonks, allowed })
    }

    fn budget(&self) -> Option<Violation> {
        let cost = team_cost(self.team, self.campaign, self.index);
        let target = self.team.target_eb;
        (cost > target).then_some(Violation::BudgetExceeded { cost, target })
    }

    fn street_cred_gating(&self) -> Vec<Violation> {
        let current = street_cred(self.campaign, self.index);
        let mut required: BTreeMap<&ItemId, (&str, u32)> = BTreeMap::new();
        for recruit in &self.recruits {
            for item in &recruit.equipped_item_ids {
                let Ok((card, terms)) = self.index.priced(item, &self.campaign.faction_id) else {
                    continue;
                };
                let entry = required.entry(&card.id).or_insert((card.name.as_str(), 0));
                entry.1 = entry.1.max(terms.req_street_cred);
            }
        }
        required
            .into_values()
            .filter(|&(_, req)| req > current)
            .map(|(name, req)| Violation::StreetCredTooLow {
                item: name.to_string(),
                required: req,
                current,
            })
            .collect()
    }

    fn rarity(&self) -> Vec<Violation> {
        let mut copies: BTreeMap<&ItemId, (&str, u32, u32)> = BTreeMap::new();
        for recruit in &self.recruits {
            for item in &recruit.equipped_item_ids {
                let Ok((card, terms)) = self.index.priced(item, &self.campaign.faction_id) else {
                    continue;
                };
                let entry = copies
                    .entry(&card.id)
                    .or_insert((card.name.as_str(), 0, terms.rarity));
                entry.1 = entry.1.saturating_add(1);
                entry.2 = entry.2.min(terms.rarity);
            }
        }
        copies
            .into_values()
            .filter(|&(_, count, limit)| count > limit)
            .map(|(name, count, limit)| Violation::RarityExceeded {
                item: name.to_string(),
                count,
                limit,
            })
            .collect()
    }

    fn bulky_limit(&self) -> Vec<Violation> {
        let limit = self.config.max_bulky_per_model;
        self.recruits
            .iter()
            .filter_map(|r| {
                let lineage = self.lineage(r)?;
                let count = count(self.gear(r).filter(|c| c.has_keyword(keywords::BULKY)));
                (count > limit).then(|| Violation::TooManyBulky {
                    model: lineage.name.clone(),
                    count,
                    limit,
                })
            })
            .collect()
    }

    fn cybergear_gating(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        for recruit in &self.recruits {
            let (Some(lineage), Ok(profile)) = (
                self.lineage(recruit),
                self.index.profile(&recruit.current_profile_id),
            ) else {
                continue;
            };
            if profile.has_keyword(keywords::CYBER_CHARACTER) {
                continue;
            }
            out.extend(
                self.gear(recruit)
                    .filter(|c| c.has_keyword(keywords::CYBERGEAR))
                    .map(|c| Violation::CybergearWithoutCyberCharacter {
                        model: lineage.name.clone(),
                        item: c.name.clone(),
                    }),
            );
        }
        out
    }

    fn program_gating(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        for recruit in &self.recruits {
            let (Some(lineage), Ok(profile)) = (
                self.lineage(recruit),
                self.index.profile(&recruit.current_profile_id),
            ) else {
                continue;
            };
            let attachments = self.team.attachments(&recruit.id);
            let programs = count(attachments.iter().filter(|k| k.is_program())).saturating_add(
                count(
                    self.gear(recruit)
                        .filter(|c| c.category == ItemCategory::Program),
                ),
            );
            if programs == 0 {
                continue;
            }
            let wired = attachments
                .iter()
                .filter(|k| !k.is_program())
                .filter_map(|k| self.index.item(&k.item_id).ok())
                .any(|c| c.grants_netrunner);
            if !(profile.has_keyword(keywords::NETRUNNER) || wired) {
                out.push(Violation::ProgramsWithoutNetrunner {
                    model: lineage.name.clone(),
                    programs,
                });
                continue;
            }
            let tech = profile.skill(Skill::Tech);
            if programs > tech {
                out.push(Violation::TooManyPrograms {
                    model: lineage.name.clone(),
                    programs,
                    tech,
                });
            }
        }
        out
    }

    fn faction_purity(&self) -> Vec<Violation> {
        let home = &self.campaign.faction_id;
        let free_agents = &self.config.free_agent_faction;
        self.recruits
            .iter()
            .filter_map(|r| self.lineage(r))
            .filter(|l| !l.recruitable_by(home, free_agents))
            .map(|l| Violation::WrongFaction {
                model: l.name.clone(),
            })
            .collect()
    }
}

/// Every rule the team breaks, in check order. Empty means deployable.
pub fn check_roster(
    team: &MatchTeam,
    campaign: &Campaign,
    index: &CatalogIndex<'_>,
    config: &RuleConfig,
) -> Vec<Violation> {
    let ctx = Context {
        team,
        campaign,
        index,
        config,
        recruits: selected_recruits(team, campaign),
    };
    let mut violations = Vec::new();
    violations.extend(ctx.leader_quota());
    violations.extend(ctx.gonk_quota());
    violations.extend(ctx.budget());
    violations.extend(ctx.street_cred_gating());
    violations.extend(ctx.rarity());
    violations.extend(ctx.bulky_limit());
    violations.extend(ctx.cybergear_gating());
    violations.extend(ctx.program_gating());
    violations.extend(ctx.faction_purity());
    debug!(
        team = %team.id,
        recruits = ctx.recruits.len(),
        violations = violations.len(),
        "roster checked"
    );
    violations
}

/// Player-facing violation messages under the standard rules.
pub fn validate_roster(team: &MatchTeam, campaign: &Campaign, catalog: &Catalog) -> Vec<String> {
    validate_roster_with(team, campaign, catalog, &RuleConfig::default())
}

/// Player-facing violation messages under `config`.
pub fn validate_roster_with(
    team: &MatchTeam,
    campaign: &Campaign,
    catalog: &Catalog,
    config: &RuleConfig,
) -> Vec<String> {
    check_roster(team, campaign, &catalog.index(), config)
        .iter()
        .map(ToString::to_string)
        .collect()
}
