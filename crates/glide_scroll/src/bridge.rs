//! Property delegation table
//!
//! External callers read current scroll state off the orchestrator without
//! reaching into the engine. The bridge is a fixed, enumerated mapping
//! from public key to engine field — no open-ended property bag, no
//! caching, no transformation.

use crate::engine::EngineField;

/// The fixed delegation table installed on every live surface
pub const DELEGATED_FIELDS: [(&str, EngineField); 8] = [
    ("x", EngineField::X),
    ("y", EngineField::Y),
    ("max_scroll_x", EngineField::MaxScrollX),
    ("max_scroll_y", EngineField::MaxScrollY),
    ("moving_direction_x", EngineField::MovingDirectionX),
    ("moving_direction_y", EngineField::MovingDirectionY),
    ("direction_x", EngineField::DirectionX),
    ("direction_y", EngineField::DirectionY),
];

/// Maps public property keys to engine fields
#[derive(Debug, Clone)]
pub struct PropertyBridge {
    table: &'static [(&'static str, EngineField)],
}

impl PropertyBridge {
    /// The standard delegation table
    pub fn standard() -> Self {
        Self {
            table: &DELEGATED_FIELDS,
        }
    }

    /// The engine field behind a public key
    pub fn field_for(&self, key: &str) -> Option<EngineField> {
        self.table
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, field)| *field)
    }

    /// All delegated public keys
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.iter().map(|(k, _)| *k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_lookup() {
        let bridge = PropertyBridge::standard();
        assert_eq!(bridge.field_for("x"), Some(EngineField::X));
        assert_eq!(bridge.field_for("max_scroll_y"), Some(EngineField::MaxScrollY));
        assert_eq!(bridge.field_for("velocity"), None);
    }

    #[test]
    fn test_keys_cover_table() {
        let bridge = PropertyBridge::standard();
        let keys: Vec<_> = bridge.keys().collect();
        assert_eq!(keys.len(), DELEGATED_FIELDS.len());
        assert!(keys.contains(&"direction_x"));
    }
}
