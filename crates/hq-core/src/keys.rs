//! Composite item references.
//!
//! Stored data encodes these as strings: stash and roster entries as
//! `"<itemId>"` or `"<itemId>@<factionId>"`, match-level attachments as
//! `"<kind>-<itemId>[@<factionId>][#<copy>]"`. The string form only exists at
//! the serde boundary; everything else works on the structured values.
//!
//! A `#` suffix that is not a number stays part of the item id, so the key
//! still loads and shows up as an unresolved item. Keys with no item id,
//! an empty faction after `@` or an unknown kind prefix are rejected, and
//! with them the whole document.

use crate::{FactionId, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when decoding a composite key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("empty item id in key {0:?}")]
    EmptyItemId(String),
    #[error("empty faction after '@' in key {0:?}")]
    EmptyFaction(String),
    #[error("key {0:?} must start with \"weapon-\" or \"program-\"")]
    UnknownKind(String),
}

fn split_faction(raw: &str, body: &str) -> Result<(ItemId, Option<FactionId>), KeyParseError> {
    let (item, faction) = match body.split_once('@') {
        Some((item, faction)) => {
            if faction.is_empty() {
                return Err(KeyParseError::EmptyFaction(raw.to_string()));
            }
            (item, Some(FactionId::from(faction)))
        }
        None => (body, None),
    };
    if item.is_empty() {
        return Err(KeyParseError::EmptyItemId(raw.to_string()));
    }
    Ok((ItemId::from(item), faction))
}

/// An owned item, optionally pinned to the faction variant it was bought at.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemRef {
    pub item_id: ItemId,
    pub variant_faction: Option<FactionId>,
}

impl ItemRef {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: ItemId::new(item_id),
            variant_faction: None,
        }
    }

    pub fn with_variant(item_id: impl Into<String>, faction: impl Into<String>) -> Self {
        Self {
            item_id: ItemId::new(item_id),
            variant_faction: Some(FactionId::new(faction)),
        }
    }
}

impl FromStr for ItemRef {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item_id, variant_faction) = split_faction(s, s)?;
        Ok(Self {
            item_id,
            variant_faction,
        })
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.item_id)?;
        if let Some(faction) = &self.variant_faction {
            write!(f, "@{faction}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for ItemRef {
    type Error = KeyParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ItemRef> for String {
    fn from(r: ItemRef) -> Self {
        r.to_string()
    }
}

/// Whether a match-level attachment is a weapon or a program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EquipmentKind {
    Weapon,
    Program,
}

impl EquipmentKind {
    fn prefix(self) -> &'static str {
        match self {
            EquipmentKind::Weapon => "weapon-",
            EquipmentKind::Program => "program-",
        }
    }
}

/// A match-level weapon or program attachment.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EquipmentKey {
    pub kind: EquipmentKind,
    pub item_id: ItemId,
    pub variant_faction: Option<FactionId>,
    /// Distinguishes several copies of the same card on one model.
    pub copy_index: Option<u32>,
}

impl EquipmentKey {
    pub fn weapon(item_id: impl Into<String>) -> Self {
        Self {
            kind: EquipmentKind::Weapon,
            item_id: ItemId::new(item_id),
            variant_faction: None,
            copy_index: None,
        }
    }

    pub fn program(item_id: impl Into<String>) -> Self {
        Self {
            kind: EquipmentKind::Program,
            ..Self::weapon(item_id)
        }
    }

    pub fn is_program(&self) -> bool {
        self.kind == EquipmentKind::Program
    }
}

impl FromStr for EquipmentKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = [EquipmentKind::Weapon, EquipmentKind::Program]
            .into_iter()
            .find_map(|k| s.strip_prefix(k.prefix()).map(|rest| (k, rest)))
            .ok_or_else(|| KeyParseError::UnknownKind(s.to_string()))?;
        let (body, copy_index) = rest
            .rsplit_once('#')
            .and_then(|(body, copy)| copy.parse::<u32>().ok().map(|copy| (body, Some(copy))))
            .unwrap_or((rest, None));
        let (item_id, variant_faction) = split_faction(s, body)?;
        Ok(Self {
            kind,
            item_id,
            variant_faction,
            copy_index,
        })
    }
}

impl fmt::Display for EquipmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.item_id)?;
        if let Some(faction) = &self.variant_faction {
            write!(f, "@{faction}")?;
        }
        if let Some(copy) = self.copy_index {
            write!(f, "#{copy}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for EquipmentKey {
    type Error = KeyParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EquipmentKey> for String {
    fn from(k: EquipmentKey) -> Self {
        k.to_string()
    }
}
