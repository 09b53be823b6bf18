//! Read-only id index over a [`Catalog`].

use crate::{
    Catalog, Faction, FactionId, ItemCard, ItemId, ItemRef, LineageId, ModelLineage,
    ModelProfile, ProfileId, RecruitId, VariantTerms,
};
use std::collections::HashMap;
use thiserror::Error;

/// A reference that does not resolve against the catalog or roster.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LookupError {
    #[error("unknown faction: {0}")]
    Faction(FactionId),
    #[error("unknown lineage: {0}")]
    Lineage(LineageId),
    #[error("unknown profile: {0}")]
    Profile(ProfileId),
    #[error("unknown item: {0}")]
    Item(ItemId),
    #[error("recruit not on roster: {0}")]
    Recruit(RecruitId),
}

/// O(1) lookups by id. Later duplicates shadow earlier entries.
#[derive(Debug, Clone)]
pub struct CatalogIndex<'a> {
    factions: HashMap<&'a str, &'a Faction>,
    lineages: HashMap<&'a str, &'a ModelLineage>,
    profiles: HashMap<&'a str, &'a ModelProfile>,
    items: HashMap<&'a str, &'a ItemCard>,
}

fn by_id<'a, T>(entries: &'a [T], id: impl Fn(&'a T) -> &'a str) -> HashMap<&'a str, &'a T> {
    entries.iter().map(|e| (id(e), e)).collect()
}

impl<'a> CatalogIndex<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            factions: by_id(&catalog.factions, |f| f.id.as_str()),
            lineages: by_id(&catalog.lineages, |l| l.id.as_str()),
            profiles: by_id(&catalog.profiles, |p| p.id.as_str()),
            items: by_id(&catalog.items, |i| i.id.as_str()),
        }
    }

    pub fn faction(&self, id: &FactionId) -> Result<&'a Faction, LookupError> {
        self.factions
            .get(id.as_str())
            .copied()
            .ok_or_else(|| LookupError::Faction(id.clone()))
    }

    pub fn lineage(&self, id: &LineageId) -> Result<&'a ModelLineage, LookupError> {
        self.lineages
            .get(id.as_str())
            .copied()
            .ok_or_else(|| LookupError::Lineage(id.clone()))
    }

    pub fn profile(&self, id: &ProfileId) -> Result<&'a ModelProfile, LookupError> {
        self.profiles
            .get(id.as_str())
            .copied()
            .ok_or_else(|| LookupError::Profile(id.clone()))
    }

    pub fn item(&self, id: &ItemId) -> Result<&'a ItemCard, LookupError> {
        self.items
            .get(id.as_str())
            .copied()
            .ok_or_else(|| LookupError::Item(id.clone()))
    }

    /// Resolve an owned item and the terms it was priced at.
    ///
    /// The reference's pinned variant wins; otherwise `buyer` picks the variant.
    pub fn priced(
        &self,
        item: &ItemRef,
        buyer: &FactionId,
    ) -> Result<(&'a ItemCard, VariantTerms), LookupError> {
        let card = self.item(&item.item_id)?;
        let faction = item.variant_faction.as_ref().unwrap_or(buyer);
        Ok((card, card.terms(Some(faction))))
    }

    /// The profile of `lineage` at exactly `level`, if the catalog has one.
    pub fn profile_at_level(&self, lineage: &LineageId, level: u32) -> Option<&'a ModelProfile> {
        self.profiles
            .values()
            .copied()
            .find(|p| &p.lineage_id == lineage && p.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemCategory, ModelType};

    fn catalog() -> Catalog {
        Catalog {
            factions: vec![Faction {
                id: FactionId::from("fac-1"),
                name: "Bozos".into(),
                image_url: None,
            }],
            lineages: vec![ModelLineage {
                id: LineageId::from("l-1"),
                name: "Clown".into(),
                faction_ids: vec![FactionId::from("fac-1")],
                model_type: ModelType::Gonk,
                is_merc: false,
            }],
            profiles: (0..3)
                .map(|level| ModelProfile {
                    id: ProfileId::new(format!("p-{level}")),
                    lineage_id: LineageId::from("l-1"),
                    level,
                    cost_eb: 10 + level * 5,
                    action_tokens: Default::default(),
                    skills: Default::default(),
                    armor: 0,
                    keywords: vec![],
                    passive_rules: vec![],
                })
                .collect(),
            items: vec![ItemCard {
                id: ItemId::from("i-1"),
                name: "Hammer".into(),
                category: ItemCategory::Weapon,
                cost_eb: 5,
                req_street_cred: 0,
                rarity: 99,
                keywords: vec![],
                faction_variants: vec![],
                grants_street_cred_bonus: 0,
                grants_netrunner: false,
            }],
        }
    }

    #[test]
    fn resolves_known_ids() {
        let cat = catalog();
        let idx = cat.index();
        assert_eq!(idx.faction(&FactionId::from("fac-1")).unwrap().name, "Bozos");
        assert_eq!(idx.lineage(&LineageId::from("l-1")).unwrap().name, "Clown");
        assert_eq!(idx.profile(&ProfileId::from("p-2")).unwrap().cost_eb, 20);
        assert_eq!(idx.item(&ItemId::from("i-1")).unwrap().cost_eb, 5);
    }

    #[test]
    fn unknown_ids_are_errors_not_panics() {
        let cat = catalog();
        let idx = cat.index();
        assert_eq!(
            idx.item(&ItemId::from("gone")),
            Err(LookupError::Item(ItemId::from("gone")))
        );
        assert_eq!(
            idx.profile(&ProfileId::from("gone")).unwrap_err().to_string(),
            "unknown profile: gone"
        );
    }

    #[test]
    fn priced_uses_pinned_variant_or_buyer() {
        let mut cat = catalog();
        cat.items[0].faction_variants = vec![
            crate::FactionVariant {
                faction_id: FactionId::from("fac-1"),
                cost: 3,
                rarity: 1,
                req_street_cred: 0,
            },
            crate::FactionVariant {
                faction_id: FactionId::universal(),
                cost: 7,
                rarity: 2,
                req_street_cred: 1,
            },
        ];
        let idx = cat.index();
        let (_, t) = idx.priced(&ItemRef::new("i-1"), &FactionId::from("fac-1")).unwrap();
        assert_eq!(t.cost, 3);
        let pinned = ItemRef::with_variant("i-1", "universal");
        let (_, t) = idx.priced(&pinned, &FactionId::from("fac-1")).unwrap();
        assert_eq!(t.cost, 7);
    }

    #[test]
    fn finds_profile_by_level() {
        let cat = catalog();
        let idx = cat.index();
        let p = idx.profile_at_level(&LineageId::from("l-1"), 1).unwrap();
        assert_eq!(p.id.as_str(), "p-1");
        assert!(idx.profile_at_level(&LineageId::from("l-1"), 3).is_none());
    }
}
