//! The relations the wrapper can expose.

use crate::types::ColumnType;

/// Maximum number of columns a relation can have.
pub const MAX_RELATION_COLUMNS: usize = 7;

/// A relation shape: a name and the ordered column types a foreign table
/// must declare to represent it.
///
/// Every identifier column is additionally checked to be exactly as long as
/// the hex encoding of a node ID configured for the server.
#[derive(Debug, PartialEq, Eq)]
pub struct RelationDescriptor {
    pub name: &'static str,
    pub columns: &'static [ColumnType],
}

/// Supported relations.
pub static RELATIONS: &[RelationDescriptor] = &[RelationDescriptor {
    name: "edges",
    // node, parent_node
    columns: &[ColumnType::Varchar, ColumnType::Varchar],
}];

/// Find a supported relation by exact name.
pub fn lookup(name: &str) -> Option<&'static RelationDescriptor> {
    RELATIONS.iter().find(|rel| rel.name == name)
}

/// Names of all supported relations, in registry order.
pub fn names() -> impl Iterator<Item = &'static str> {
    RELATIONS.iter().map(|rel| rel.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_edges() {
        let rel = lookup("edges").unwrap();
        assert_eq!(rel.name, "edges");
        assert_eq!(rel.columns, &[ColumnType::Varchar, ColumnType::Varchar]);
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("nodes").is_none());
        assert!(lookup("Edges").is_none());
        assert!(lookup("edges ").is_none());
    }

    #[test]
    fn test_lookup_returns_registry_entry() {
        let rel = lookup("edges").unwrap();
        assert!(std::ptr::eq(rel, &RELATIONS[0]));
    }

    #[test]
    fn test_registry_well_formed() {
        let all: Vec<&str> = names().collect();
        for (i, rel) in RELATIONS.iter().enumerate() {
            assert!(!rel.name.is_empty());
            assert!(!rel.columns.is_empty());
            assert!(rel.columns.len() <= MAX_RELATION_COLUMNS);
            assert!(!all[..i].contains(&rel.name), "duplicate relation {}", rel.name);
        }
    }
}
