#![deny(warnings)]

//! Core data contracts for the Combat Zone HQ companion.
//!
//! This crate defines the serializable catalog, campaign and match-team
//! records consumed by the roster rules, plus a read-only lookup index and
//! the faction variant resolver. Nothing here mutates or persists data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod index;
pub mod keys;
pub mod variant;

pub use index::{CatalogIndex, LookupError};
pub use keys::{EquipmentKey, EquipmentKind, ItemRef, KeyParseError};
pub use variant::{resolve_variant, VariantTerms};

/// Faction id that acts as the universal pricing fallback for variants.
pub const UNIVERSAL_FACTION: &str = "universal";

/// Default faction whose lineages every campaign may hire.
pub const FREE_AGENT_FACTION: &str = "edgerunners";

/// Rarity sentinel meaning "no practical copy limit".
pub const UNLIMITED_RARITY: u32 = 99;

/// Well-known keyword tags found on profiles and items.
pub mod keywords {
    pub const BULKY: &str = "Bulky";
    pub const CYBERGEAR: &str = "Cybergear";
    pub const CYBER_CHARACTER: &str = "Cyber-Character";
    pub const NETRUNNER: &str = "Netrunner";
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a faction, e.g. "maelstrom".
    FactionId
);
string_id!(
    /// Identifier of a recruitable lineage.
    LineageId
);
string_id!(
    /// Identifier of a single rank profile.
    ProfileId
);
string_id!(
    /// Identifier of any item card (weapon, gear, program, loot, objective).
    ItemId
);
string_id!(
    /// Instance identity of a roster entry.
    RecruitId
);
string_id!(CampaignId);
string_id!(TeamId);

impl FactionId {
    /// The `"universal"` fallback faction.
    pub fn universal() -> Self {
        Self::new(UNIVERSAL_FACTION)
    }

    pub fn is_universal(&self) -> bool {
        self.0 == UNIVERSAL_FACTION
    }
}

fn keyword_match(tags: &[String], keyword: &str) -> bool {
    tags.iter().any(|t| t.eq_ignore_ascii_case(keyword))
}

/// Identity-only faction record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Unit archetype; drives every composition rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelType {
    Leader,
    Character,
    Gonk,
    Specialist,
    Drone,
}

/// A recruitable unit type, independent of rank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelLineage {
    pub id: LineageId,
    pub name: String,
    /// Factions allowed to recruit this lineage.
    #[serde(default)]
    pub faction_ids: Vec<FactionId>,
    #[serde(rename = "type")]
    pub model_type: ModelType,
    /// Mercenaries may be recruited by anyone.
    #[serde(default)]
    pub is_merc: bool,
}

impl ModelLineage {
    pub fn belongs_to(&self, faction: &FactionId) -> bool {
        self.faction_ids.iter().any(|f| f == faction)
    }

    /// Whether a campaign of faction `home` may field this lineage.
    ///
    /// Mercs and lineages of the `free_agents` faction are open to everyone.
    pub fn recruitable_by(&self, home: &FactionId, free_agents: &FactionId) -> bool {
        self.is_merc || self.belongs_to(free_agents) || self.belongs_to(home)
    }
}

/// The six skills printed on a profile card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Reflexes,
    Ranged,
    Melee,
    Medical,
    Tech,
    Influence,
}

/// Three-tier action token capacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTokens {
    pub green: u8,
    pub yellow: u8,
    pub red: u8,
}

/// One experience-rank stat block of a lineage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProfile {
    pub id: ProfileId,
    pub lineage_id: LineageId,
    /// 0 for base rank, 1+ for veteran ranks.
    pub level: u32,
    #[serde(rename = "costEB")]
    pub cost_eb: u32,
    #[serde(default)]
    pub action_tokens: ActionTokens,
    #[serde(default)]
    pub skills: BTreeMap<Skill, u32>,
    #[serde(default)]
    pub armor: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub passive_rules: Vec<String>,
}

impl ModelProfile {
    /// Skill value, 0 when the card does not list it.
    pub fn skill(&self, skill: Skill) -> u32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        keyword_match(&self.keywords, keyword)
    }
}

/// Kind of item card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Gear,
    Program,
    Loot,
    Objective,
}

/// Faction-specific cost/rarity/reputation override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionVariant {
    pub faction_id: FactionId,
    pub cost: u32,
    #[serde(default = "unlimited_rarity")]
    pub rarity: u32,
    #[serde(default)]
    pub req_street_cred: u32,
}

fn unlimited_rarity() -> u32 {
    UNLIMITED_RARITY
}

fn one() -> u32 {
    1
}

/// Weapon, gear, program, loot or objective card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCard {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    #[serde(default, rename = "costEB")]
    pub cost_eb: u32,
    /// Minimum campaign Street Cred needed to equip.
    #[serde(default)]
    pub req_street_cred: u32,
    /// Maximum identical copies per team.
    #[serde(default = "unlimited_rarity")]
    pub rarity: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub faction_variants: Vec<FactionVariant>,
    /// Street Cred awarded once the objective is completed.
    #[serde(default)]
    pub grants_street_cred_bonus: u32,
    /// Weapons that let the wielder run programs.
    #[serde(default)]
    pub grants_netrunner: bool,
}

impl ItemCard {
    pub fn has_keyword(&self, keyword: &str) -> bool {
        keyword_match(&self.keywords, keyword)
    }

    /// Cost, rarity and requirement as seen by `faction`.
    ///
    /// Cards without variants use their base figures.
    pub fn terms(&self, faction: Option<&FactionId>) -> VariantTerms {
        match resolve_variant(&self.faction_variants, faction) {
            Some(v) => VariantTerms::from(v),
            None => VariantTerms {
                cost: self.cost_eb,
                rarity: self.rarity,
                req_street_cred: self.req_street_cred,
            },
        }
    }
}

/// Read-only reference data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub factions: Vec<Faction>,
    #[serde(default)]
    pub lineages: Vec<ModelLineage>,
    #[serde(default)]
    pub profiles: Vec<ModelProfile>,
    #[serde(default)]
    pub items: Vec<ItemCard>,
}

impl Catalog {
    /// Build the id index used by every rule.
    pub fn index(&self) -> CatalogIndex<'_> {
        CatalogIndex::new(self)
    }
}

/// Roster entry: one or more physical models of a lineage at a given rank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitedModel {
    /// Unique within the campaign roster.
    pub id: RecruitId,
    /// Lineage the models were hired from.
    pub lineage_id: LineageId,
    /// Rank profile the models currently play at.
    pub current_profile_id: ProfileId,
    /// Roster-level equipment, each entry optionally pinned to a variant.
    #[serde(default)]
    pub equipped_item_ids: Vec<ItemRef>,
    /// Carried over between matches; has no effect on the rules.
    #[serde(default)]
    pub has_major_injury: bool,
    /// Grouped unit count. Multiplies recruitment cost only.
    #[serde(default = "one")]
    pub quantity: u32,
}

/// A player's persistent play-through state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    /// Display name chosen by the player.
    pub name: String,
    /// Home faction; drives variant pricing and faction purity.
    pub faction_id: FactionId,
    /// Unspent currency.
    pub eb_bank: u32,
    /// Every model the HQ has hired.
    #[serde(default)]
    pub hq_roster: Vec<RecruitedModel>,
    /// Owned but unequipped items.
    #[serde(default)]
    pub hq_stash: Vec<ItemRef>,
    /// Objective cards already achieved; each grants its Street Cred bonus.
    #[serde(default)]
    pub completed_objectives: Vec<ItemId>,
}

impl Campaign {
    /// First roster entry with this id.
    pub fn recruit(&self, id: &RecruitId) -> Option<&RecruitedModel> {
        self.hq_roster.iter().find(|r| &r.id == id)
    }

    pub fn recruit_mut(&mut self, id: &RecruitId) -> Option<&mut RecruitedModel> {
        self.hq_roster.iter_mut().find(|r| &r.id == id)
    }
}

/// Ephemeral deployment selected from a campaign roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTeam {
    pub id: TeamId,
    /// Campaign whose roster the selection draws from.
    pub campaign_id: CampaignId,
    /// Budget ceiling.
    #[serde(rename = "targetEB")]
    pub target_eb: u32,
    /// Roster entries fielded for this match, in selection order.
    #[serde(default)]
    pub selected_recruit_ids: Vec<RecruitId>,
    /// Match-level weapon/program attachments, independent of roster equipment.
    #[serde(default)]
    pub equipment_map: BTreeMap<RecruitId, Vec<EquipmentKey>>,
}

impl MatchTeam {
    /// Match-level attachments of one recruit.
    pub fn attachments(&self, recruit: &RecruitId) -> &[EquipmentKey] {
        self.equipment_map
            .get(recruit)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
