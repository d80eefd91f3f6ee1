use serde::{Deserialize, Serialize};

const ENTITY_PREFIX: &str = "entity:";
const NPC_PREFIX: &str = "npc:";
const MOB_PREFIX: &str = "mob:";
const ITEM_PREFIX: &str = "item:";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum DropKind {
    Item,
    Entity,
}

/// A drop identifier split into what should be spawned and its id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct DropId {
    pub kind: DropKind,
    pub id: String,
}

impl DropId {
    pub fn new(kind: DropKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// Parses a raw drop string such as `Rock_Stone`, `item:Rock_Stone` or
    /// `entity:Boar`. Prefixes are matched case-insensitively. Blank input
    /// yields an empty item id.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        for (prefix, kind) in [
            (ENTITY_PREFIX, DropKind::Entity),
            (NPC_PREFIX, DropKind::Entity),
            (MOB_PREFIX, DropKind::Entity),
            (ITEM_PREFIX, DropKind::Item),
        ] {
            if let Some(head) = trimmed.get(..prefix.len()) {
                if head.eq_ignore_ascii_case(prefix) {
                    return Self::new(kind, trimmed[prefix.len()..].trim());
                }
            }
        }

        Self::new(DropKind::Item, trimmed)
    }

    /// Builds the canonical drop string for an entity reward.
    pub fn entity_drop_id(entity_id: &str) -> Option<String> {
        let trimmed = entity_id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(format!("{}{}", ENTITY_PREFIX, trimmed))
        }
    }

    pub fn is_entity(&self) -> bool {
        self.kind == DropKind::Entity
    }

    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_item() {
        let drop = DropId::parse("Rock_Stone");
        assert_eq!(drop.kind, DropKind::Item);
        assert_eq!(drop.id, "Rock_Stone");
    }

    #[test]
    fn test_parse_entity_prefixes() {
        for raw in ["entity:Boar", "npc:Boar", "MOB: Boar ", "Entity:Boar"] {
            let drop = DropId::parse(raw);
            assert!(drop.is_entity(), "{} should be an entity", raw);
            assert_eq!(drop.id, "Boar");
        }
    }

    #[test]
    fn test_parse_item_prefix() {
        let drop = DropId::parse("item:Ore_Iron");
        assert_eq!(drop, DropId::new(DropKind::Item, "Ore_Iron"));
    }

    #[test]
    fn test_parse_blank() {
        let drop = DropId::parse("   ");
        assert_eq!(drop.kind, DropKind::Item);
        assert!(!drop.is_valid());

        assert!(!DropId::parse("entity:").is_valid());
    }

    #[test]
    fn test_entity_drop_id() {
        assert_eq!(
            DropId::entity_drop_id(" Spider "),
            Some(String::from("entity:Spider"))
        );
        assert_eq!(DropId::entity_drop_id(""), None);
    }
}
