#![deny(warnings)]

//! Campaign bookkeeping: recruiting, buying, equipping, dismissing and
//! promoting, with the EB bank debited as the HQ spends.
//!
//! Every operation validates fully before it mutates, so a failed call
//! leaves the campaign untouched.

use hq_core::{
    Campaign, CampaignId, CatalogIndex, FactionId, ItemCategory, ItemId, ItemRef, LineageId,
    LookupError, RecruitId, RecruitedModel, FREE_AGENT_FACTION,
};
use thiserror::Error;
use tracing::info;

/// Errors produced by ledger operations.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// Not enough EB in the bank.
    #[error("insufficient funds: need {needed} EB, have {available} EB")]
    InsufficientFunds { needed: u32, available: u32 },
    #[error("recruit not on roster: {0}")]
    UnknownRecruit(RecruitId),
    #[error("{0} is not in the stash")]
    NotInStash(ItemRef),
    #[error("{item} is not equipped on {recruit}")]
    NotEquipped { recruit: RecruitId, item: ItemRef },
    #[error("lineage {lineage} cannot be recruited by faction {faction}")]
    FactionMismatch {
        lineage: LineageId,
        faction: FactionId,
    },
    #[error("no rank above level {level} for lineage {lineage}")]
    NoFurtherRank { lineage: LineageId, level: u32 },
    #[error("lineage {0} has no base rank profile")]
    NoBaseRank(LineageId),
    #[error("{0} is not an objective")]
    NotAnObjective(ItemId),
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Start a play-through with a starting EB grant and nothing else.
pub fn new_campaign(
    id: impl Into<String>,
    name: impl Into<String>,
    faction: FactionId,
    starting_eb: u32,
) -> Campaign {
    Campaign {
        id: CampaignId::new(id),
        name: name.into(),
        faction_id: faction,
        eb_bank: starting_eb,
        hq_roster: vec![],
        hq_stash: vec![],
        completed_objectives: vec![],
    }
}

/// Mutating view over one campaign and the catalog it plays against.
#[derive(Debug)]
pub struct Ledger<'c, 'a> {
    campaign: &'c mut Campaign,
    index: &'c CatalogIndex<'a>,
    free_agent_faction: FactionId,
}

impl<'c, 'a> Ledger<'c, 'a> {
    pub fn new(campaign: &'c mut Campaign, index: &'c CatalogIndex<'a>) -> Self {
        Self {
            campaign,
            index,
            free_agent_faction: FactionId::from(FREE_AGENT_FACTION),
        }
    }

    /// Override the faction whose lineages any campaign may hire. Pass the
    /// same faction the validator's rule config uses.
    pub fn with_free_agent_faction(mut self, faction: FactionId) -> Self {
        self.free_agent_faction = faction;
        self
    }

    pub fn campaign(&self) -> &Campaign {
        self.campaign
    }

    fn debit(&mut self, amount: u32) -> LedgerResult<()> {
        let available = self.campaign.eb_bank;
        if amount > available {
            return Err(LedgerError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        self.campaign.eb_bank = available - amount;
        Ok(())
    }

    fn next_recruit_id(&self, lineage: &LineageId) -> RecruitId {
        (1..)
            .map(|n| RecruitId::new(format!("{lineage}-{n}")))
            .find(|id| self.campaign.recruit(id).is_none())
            .unwrap_or_else(|| RecruitId::new(lineage.as_str()))
    }

    fn recruit_entry(&mut self, id: &RecruitId) -> LedgerResult<&mut RecruitedModel> {
        self.campaign
            .recruit_mut(id)
            .ok_or_else(|| LedgerError::UnknownRecruit(id.clone()))
    }

    /// Hire `quantity` models of a lineage at its base rank.
    pub fn recruit(&mut self, lineage_id: &LineageId, quantity: u32) -> LedgerResult<RecruitId> {
        if quantity == 0 {
            return Err(LedgerError::ZeroQuantity);
        }
        let lineage = self.index.lineage(lineage_id)?;
        let faction = &self.campaign.faction_id;
        if !lineage.recruitable_by(faction, &self.free_agent_faction) {
            return Err(LedgerError::FactionMismatch {
                lineage: lineage_id.clone(),
                faction: faction.clone(),
            });
        }
        let profile = self
            .index
            .profile_at_level(lineage_id, 0)
            .ok_or_else(|| LedgerError::NoBaseRank(lineage_id.clone()))?;
        self.debit(profile.cost_eb.saturating_mul(quantity))?;
        let id = self.next_recruit_id(lineage_id);
        self.campaign.hq_roster.push(RecruitedModel {
            id: id.clone(),
            lineage_id: lineage_id.clone(),
            current_profile_id: profile.id.clone(),
            equipped_item_ids: vec![],
            has_major_injury: false,
            quantity,
        });
        info!(recruit = %id, lineage = %lineage.name, quantity, bank = self.campaign.eb_bank, "recruited");
        Ok(id)
    }

    /// Buy an item into the stash at the variant price for this campaign.
    pub fn purchase(&mut self, item: ItemRef) -> LedgerResult<u32> {
        let (card, terms) = self.index.priced(&item, &self.campaign.faction_id)?;
        self.debit(terms.cost)?;
        info!(item = %item, name = %card.name, cost = terms.cost, bank = self.campaign.eb_bank, "purchased");
        self.campaign.hq_stash.push(item);
        Ok(terms.cost)
    }

    /// Move an item from the stash onto a recruit.
    pub fn equip(&mut self, recruit: &RecruitId, item: ItemRef) -> LedgerResult<()> {
        let slot = self
            .campaign
            .hq_stash
            .iter()
            .position(|s| s == &item)
            .ok_or_else(|| LedgerError::NotInStash(item.clone()))?;
        self.recruit_entry(recruit)?;
        self.campaign.hq_stash.remove(slot);
        self.recruit_entry(recruit)?.equipped_item_ids.push(item.clone());
        info!(recruit = %recruit, item = %item, "equipped");
        Ok(())
    }

    /// Move an item from a recruit back into the stash.
    pub fn unequip(&mut self, recruit: &RecruitId, item: ItemRef) -> LedgerResult<()> {
        let entry = self.recruit_entry(recruit)?;
        let slot = entry
            .equipped_item_ids
            .iter()
            .position(|e| e == &item)
            .ok_or_else(|| LedgerError::NotEquipped {
                recruit: recruit.clone(),
                item: item.clone(),
            })?;
        entry.equipped_item_ids.remove(slot);
        info!(recruit = %recruit, item = %item, "unequipped");
        self.campaign.hq_stash.push(item);
        Ok(())
    }

    /// Remove a recruit; its equipment goes back to the stash. No refund.
    pub fn dismiss(&mut self, recruit: &RecruitId) -> LedgerResult<RecruitedModel> {
        let pos = self
            .campaign
            .hq_roster
            .iter()
            .position(|r| &r.id == recruit)
            .ok_or_else(|| LedgerError::UnknownRecruit(recruit.clone()))?;
        let mut gone = self.campaign.hq_roster.remove(pos);
        self.campaign
            .hq_stash
            .extend(gone.equipped_item_ids.drain(..));
        info!(recruit = %recruit, "dismissed");
        Ok(gone)
    }

    /// Advance a recruit to the next rank of its lineage.
    pub fn promote(&mut self, recruit: &RecruitId) -> LedgerResult<u32> {
        let index = self.index;
        let entry = self.recruit_entry(recruit)?;
        let current = index.profile(&entry.current_profile_id)?;
        let next = current
            .level
            .checked_add(1)
            .and_then(|level| index.profile_at_level(&entry.lineage_id, level))
            .ok_or_else(|| LedgerError::NoFurtherRank {
                lineage: entry.lineage_id.clone(),
                level: current.level,
            })?;
        entry.current_profile_id = next.id.clone();
        info!(recruit = %recruit, level = next.level, "promoted");
        Ok(next.level)
    }

    /// Record an objective as completed. Completing twice is a no-op.
    pub fn complete_objective(&mut self, item: &ItemId) -> LedgerResult<()> {
        let card = self.index.item(item)?;
        if card.category != ItemCategory::Objective {
            return Err(LedgerError::NotAnObjective(item.clone()));
        }
        if !self.campaign.completed_objectives.contains(item) {
            self.campaign.completed_objectives.push(item.clone());
            info!(objective = %card.name, bonus = card.grants_street_cred_bonus, "objective completed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hq_core::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn profile(id: &str, lineage: &str, level: u32, cost: u32) -> ModelProfile {
        ModelProfile {
            id: ProfileId::from(id),
            lineage_id: LineageId::from(lineage),
            level,
            cost_eb: cost,
            action_tokens: ActionTokens::default(),
            skills: BTreeMap::new(),
            armor: 0,
            keywords: vec![],
            passive_rules: vec![],
        }
    }

    fn item(id: &str, category: ItemCategory, cost: u32) -> ItemCard {
        ItemCard {
            id: ItemId::from(id),
            name: id.to_string(),
            category,
            cost_eb: cost,
            req_street_cred: 0,
            rarity: UNLIMITED_RARITY,
            keywords: vec![],
            faction_variants: vec![],
            grants_street_cred_bonus: 2,
            grants_netrunner: false,
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            factions: vec![],
            lineages: vec![
                ModelLineage {
                    id: LineageId::from("gonk"),
                    name: "Gonk".into(),
                    faction_ids: vec![FactionId::from("fac-1")],
                    model_type: ModelType::Gonk,
                    is_merc: false,
                },
                ModelLineage {
                    id: LineageId::from("rival"),
                    name: "Rival".into(),
                    faction_ids: vec![FactionId::from("fac-2")],
                    model_type: ModelType::Leader,
                    is_merc: false,
                },
            ],
            profiles: vec![
                profile("gonk-0", "gonk", 0, 10),
                profile("gonk-1", "gonk", 1, 15),
                profile("rival-0", "rival", 0, 30),
            ],
            items: vec![
                item("w-pipe", ItemCategory::Weapon, 5),
                item("obj-data", ItemCategory::Objective, 0),
            ],
        }
    }

    #[test]
    fn recruit_debits_bank_and_assigns_ids() {
        let cat = catalog();
        let idx = cat.index();
        let mut c = new_campaign("c", "Test", FactionId::from("fac-1"), 100);
        let mut ledger = Ledger::new(&mut c, &idx);
        let a = ledger.recruit(&LineageId::from("gonk"), 3).unwrap();
        let b = ledger.recruit(&LineageId::from("gonk"), 1).unwrap();
        assert_eq!(a.as_str(), "gonk-1");
        assert_eq!(b.as_str(), "gonk-2");
        assert_eq!(ledger.campaign().eb_bank, 60);
        assert_eq!(c.hq_roster[0].quantity, 3);
    }

    #[test]
    fn recruit_rejects_other_factions_and_zero() {
        let cat = catalog();
        let idx = cat.index();
        let mut c = new_campaign("c", "Test", FactionId::from("fac-1"), 100);
        let mut ledger = Ledger::new(&mut c, &idx);
        assert!(matches!(
            ledger.recruit(&LineageId::from("rival"), 1),
            Err(LedgerError::FactionMismatch { .. })
        ));
        assert_eq!(
            ledger.recruit(&LineageId::from("gonk"), 0),
            Err(LedgerError::ZeroQuantity)
        );
        assert_eq!(
            ledger.recruit(&LineageId::from("ghost"), 1),
            Err(LedgerError::Lookup(LookupError::Lineage(LineageId::from("ghost"))))
        );
    }

    #[test]
    fn failed_purchase_leaves_campaign_untouched() {
        let cat = catalog();
        let idx = cat.index();
        let mut c = new_campaign("c", "Test", FactionId::from("fac-1"), 4);
        let before = c.clone();
        let mut ledger = Ledger::new(&mut c, &idx);
        assert_eq!(
            ledger.purchase(ItemRef::new("w-pipe")),
            Err(LedgerError::InsufficientFunds {
                needed: 5,
                available: 4
            })
        );
        assert_eq!(c, before);
    }

    #[test]
    fn equip_unequip_and_dismiss_move_items() {
        let cat = catalog();
        let idx = cat.index();
        let mut c = new_campaign("c", "Test", FactionId::from("fac-1"), 100);
        let mut ledger = Ledger::new(&mut c, &idx);
        let g = ledger.recruit(&LineageId::from("gonk"), 1).unwrap();
        ledger.purchase(ItemRef::new("w-pipe")).unwrap();
        ledger.purchase(ItemRef::new("w-pipe")).unwrap();

        ledger.equip(&g, ItemRef::new("w-pipe")).unwrap();
        ledger.equip(&g, ItemRef::new("w-pipe")).unwrap();
        assert!(matches!(
            ledger.equip(&g, ItemRef::new("w-pipe")),
            Err(LedgerError::NotInStash(_))
        ));
        ledger.unequip(&g, ItemRef::new("w-pipe")).unwrap();
        assert_eq!(ledger.campaign().hq_stash.len(), 1);

        let gone = ledger.dismiss(&g).unwrap();
        assert!(gone.equipped_item_ids.is_empty());
        assert_eq!(ledger.campaign().hq_stash.len(), 2);
        assert!(ledger.campaign().hq_roster.is_empty());
        assert_eq!(ledger.campaign().eb_bank, 100 - 10 - 5 - 5);
    }

    #[test]
    fn promote_walks_ranks_until_the_top() {
        let cat = catalog();
        let idx = cat.index();
        let mut c = new_campaign("c", "Test", FactionId::from("fac-1"), 100);
        let mut ledger = Ledger::new(&mut c, &idx);
        let g = ledger.recruit(&LineageId::from("gonk"), 1).unwrap();
        assert_eq!(ledger.promote(&g), Ok(1));
        assert!(matches!(
            ledger.promote(&g),
            Err(LedgerError::NoFurtherRank { level: 1, .. })
        ));
        assert_eq!(c.hq_roster[0].current_profile_id.as_str(), "gonk-1");
    }

    #[test]
    fn objectives_are_recorded_once() {
        let cat = catalog();
        let idx = cat.index();
        let mut c = new_campaign("c", "Test", FactionId::from("fac-1"), 0);
        let mut ledger = Ledger::new(&mut c, &idx);
        ledger.complete_objective(&ItemId::from("obj-data")).unwrap();
        ledger.complete_objective(&ItemId::from("obj-data")).unwrap();
        assert_eq!(
            ledger.complete_objective(&ItemId::from("w-pipe")),
            Err(LedgerError::NotAnObjective(ItemId::from("w-pipe")))
        );
        assert_eq!(c.completed_objectives, vec![ItemId::from("obj-data")]);
    }

    #[test]
    fn free_agents_can_join_any_campaign() {
        let mut cat = catalog();
        cat.lineages[1].faction_ids.push(FactionId::from("edgerunners"));
        let idx = cat.index();
        let mut c = new_campaign("c", "Test", FactionId::from("fac-1"), 100);
        let mut ledger = Ledger::new(&mut c, &idx);
        assert!(ledger.recruit(&LineageId::from("rival"), 1).is_ok());
    }

    #[test]
    fn house_free_agent_faction_and_unaligned_lineages() {
        let mut cat = catalog();
        cat.lineages[1].faction_ids = vec![FactionId::from("nomads")];
        cat.lineages.push(ModelLineage {
            id: LineageId::from("drifter"),
            name: "Drifter".into(),
            faction_ids: vec![],
            model_type: ModelType::Specialist,
            is_merc: false,
        });
        cat.profiles.push(profile("drifter-0", "drifter", 0, 5));
        let idx = cat.index();
        let mut c = new_campaign("c", "Test", FactionId::from("fac-1"), 100);
        let mut ledger = Ledger::new(&mut c, &idx);
        assert!(matches!(
            ledger.recruit(&LineageId::from("rival"), 1),
            Err(LedgerError::FactionMismatch { .. })
        ));
        assert!(matches!(
            ledger.recruit(&LineageId::from("drifter"), 1),
            Err(LedgerError::FactionMismatch { .. })
        ));
        let mut ledger = ledger.with_free_agent_faction(FactionId::from("nomads"));
        assert!(ledger.recruit(&LineageId::from("rival"), 1).is_ok());
    }

    #[test]
    fn lineage_without_base_rank_cannot_be_recruited() {
        let mut cat = catalog();
        cat.profiles.retain(|p| p.id.as_str() != "gonk-0");
        let idx = cat.index();
        let mut c = new_campaign("c", "Test", FactionId::from("fac-1"), 100);
        let mut ledger = Ledger::new(&mut c, &idx);
        assert_eq!(
            ledger.recruit(&LineageId::from("gonk"), 1),
            Err(LedgerError::NoBaseRank(LineageId::from("gonk")))
        );
        assert_eq!(ledger.campaign().eb_bank, 100);
    }

    #[test]
    fn promote_at_the_highest_level_is_an_error() {
        let mut cat = catalog();
        cat.profiles.push(profile("gonk-max", "gonk", u32::MAX, 0));
        let idx = cat.index();
        let mut c = new_campaign("c", "Test", FactionId::from("fac-1"), 0);
        c.hq_roster.push(RecruitedModel {
            id: RecruitId::from("g"),
            lineage_id: LineageId::from("gonk"),
            current_profile_id: ProfileId::from("gonk-max"),
            equipped_item_ids: vec![],
            has_major_injury: false,
            quantity: 1,
        });
        let mut ledger = Ledger::new(&mut c, &idx);
        assert_eq!(
            ledger.promote(&RecruitId::from("g")),
            Err(LedgerError::NoFurtherRank {
                lineage: LineageId::from("gonk"),
                level: u32::MAX
            })
        );
    }

    proptest! {
        #[test]
        fn bank_never_goes_negative(start in 0u32..200, buys in 0usize..50) {
            let cat = catalog();
            let idx = cat.index();
            let mut c = new_campaign("c", "Test", FactionId::from("fac-1"), start);
            let mut ledger = Ledger::new(&mut c, &idx);
            let mut spent = 0;
            for _ in 0..buys {
                if let Ok(cost) = ledger.purchase(ItemRef::new("w-pipe")) {
                    spent += cost;
                }
            }
            prop_assert_eq!(ledger.campaign().eb_bank + spent, start);
            prop_assert!(ledger.campaign().eb_bank < 5 || buys * 5 <= start as usize);
        }
    }
}
