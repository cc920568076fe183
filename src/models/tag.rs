//! Tag identity and names.

use crate::validation::{object, string, Schema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub fn tag_id() -> Schema {
    string().uuid().into()
}

pub fn tag_name() -> Schema {
    string().min(1).max(255).into()
}

pub fn tag_entity() -> Schema {
    object().field("id", tag_id()).field("name", tag_name()).into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagEntity {
    pub id: Uuid,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tag_id_requires_uuid() {
        assert!(tag_id().is_valid(&json!("123e4567-e89b-12d3-a456-426614174000")));
        assert!(!tag_id().is_valid(&json!("invalid")));
    }

    #[test]
    fn tag_name_bounds() {
        assert!(tag_name().is_valid(&json!("tag")));
        assert!(!tag_name().is_valid(&json!("a".repeat(256))));
    }

    #[test]
    fn tag_entity_shape() {
        let tag: TagEntity = tag_entity()
            .parse(json!({ "id": "123e4567-e89b-12d3-a456-426614174000", "name": "tag" }))
            .unwrap();
        assert_eq!(tag.name, "tag");
        assert!(!tag_entity().is_valid(&json!({ "id": "invalid", "name": "tag" })));
    }
}
