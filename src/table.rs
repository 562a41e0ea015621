//! Foreign table configuration and structural validation.

use tracing::debug;

use crate::error::ValidationError;
use crate::options::{OptionDescriptor, OptionSchema, RawOption};
use crate::relation::RelationDescriptor;
use crate::server::{self, ServerConfig};
use crate::types::ColumnType;
use crate::value::OptionKind;

/// Name of the relation a foreign table represents.
pub const RELATION: &str = "relation";

/// Options accepted by `CREATE FOREIGN TABLE`.
pub const TABLE_OPTIONS: OptionSchema =
    OptionSchema::new(&[OptionDescriptor::required(RELATION, OptionKind::RelationName)]);

/// Resolved table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    server: ServerConfig,
    relation: &'static RelationDescriptor,
}

impl TableConfig {
    pub fn new(server: ServerConfig, relation: &'static RelationDescriptor) -> Self {
        Self { server, relation }
    }

    pub fn builder(server: ServerConfig) -> TableConfigBuilder {
        TableConfigBuilder {
            server,
            relation: None,
        }
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn relation(&self) -> &'static RelationDescriptor {
        self.relation
    }
}

/// Collects table fields on top of an already resolved server.
#[derive(Debug)]
pub struct TableConfigBuilder {
    server: ServerConfig,
    relation: Option<&'static RelationDescriptor>,
}

impl TableConfigBuilder {
    #[must_use]
    pub fn relation(mut self, relation: &'static RelationDescriptor) -> Self {
        self.relation = Some(relation);
        self
    }

    pub fn build(self) -> Result<TableConfig, ValidationError> {
        let relation = self.relation.ok_or_else(|| ValidationError::MissingRequiredOption {
            option: RELATION.to_string(),
        })?;
        Ok(TableConfig {
            server: self.server,
            relation,
        })
    }
}

/// A column of the foreign table as declared in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalColumn {
    pub name: String,
    pub typ: ColumnType,
    /// The declared type modifier; for `varchar(n)` this is `n` plus the
    /// varlena header.
    pub declared_max_length: Option<u32>,
}

impl PhysicalColumn {
    pub fn new(name: impl Into<String>, typ: ColumnType, declared_max_length: Option<u32>) -> Self {
        Self {
            name: name.into(),
            typ,
            declared_max_length,
        }
    }
}

/// Resolve a table's configuration from its options. The server must be
/// resolved first.
pub fn resolve_table(raws: &[RawOption], server: ServerConfig) -> Result<TableConfig, ValidationError> {
    let parsed = TABLE_OPTIONS.apply(raws)?;

    let mut builder = TableConfig::builder(server);
    if let Some(relation) = parsed.relation(RELATION) {
        builder = builder.relation(relation);
    }
    let table = builder.build()?;

    debug!(relation = table.relation.name, "resolved table options");
    Ok(table)
}

/// Check the declared columns against the relation's expected shape.
///
/// Columns are matched by position. Stops at the first mismatch; the
/// column count is checked after every paired column passed.
pub fn validate(table: &TableConfig, columns: &[PhysicalColumn]) -> Result<(), ValidationError> {
    let relation = table.relation;

    for (index, (&expected, column)) in relation.columns.iter().zip(columns).enumerate() {
        if column.typ != expected {
            return Err(ValidationError::ColumnTypeMismatch {
                relation: relation.name.to_string(),
                index,
                column: column.name.clone(),
                expected,
                actual: column.typ,
            });
        }

        if expected.is_identifier() {
            let wanted = table.server.identifier_typmod();
            if column.declared_max_length.map(u64::from) != Some(wanted) {
                return Err(ValidationError::ColumnLengthMismatch {
                    relation: relation.name.to_string(),
                    index,
                    column: column.name.clone(),
                    typ: expected,
                    expected: wanted,
                    actual: column.declared_max_length,
                });
            }
        }
    }

    if relation.columns.len() != columns.len() {
        return Err(ValidationError::ColumnCountMismatch {
            relation: relation.name.to_string(),
            expected: relation.columns.len(),
            actual: columns.len(),
        });
    }

    debug!(relation = relation.name, columns = columns.len(), "table structure validated");
    Ok(())
}

/// Resolve the server, then the table, then validate the table's columns.
pub fn load_table(
    server_options: &[RawOption],
    table_options: &[RawOption],
    columns: &[PhysicalColumn],
) -> Result<TableConfig, ValidationError> {
    let server = server::resolve_server(server_options)?;
    let table = resolve_table(table_options, server)?;
    validate(&table, columns)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation;
    use crate::types::VARHDRSZ;

    fn server16() -> ServerConfig {
        server::resolve_server(&[RawOption::new("node_id_len", "16")]).unwrap()
    }

    fn edges16() -> TableConfig {
        resolve_table(&[RawOption::new("relation", "edges")], server16()).unwrap()
    }

    fn id_column(name: &str, length: u32) -> PhysicalColumn {
        PhysicalColumn::new(name, ColumnType::Varchar, Some(length))
    }

    const ID_TYPMOD: u32 = 2 * 16 + VARHDRSZ;

    #[test]
    fn test_resolve_table() {
        let table = edges16();
        assert_eq!(table.relation().name, "edges");
        assert_eq!(table.server().node_id_len(), 16);
        assert!(std::ptr::eq(table.relation(), relation::lookup("edges").unwrap()));
    }

    #[test]
    fn test_resolve_table_unsupported() {
        let err = resolve_table(&[RawOption::new("relation", "nodes")], server16()).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedRelationName { .. }));
    }

    #[test]
    fn test_resolve_table_missing() {
        let err = resolve_table(&[], server16()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingRequiredOption {
                option: "relation".into()
            }
        );
    }

    #[test]
    fn test_resolve_table_rejects_server_option() {
        let err =
            resolve_table(&[RawOption::new("node_id_len", "16")], server16()).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownOption { .. }));
    }

    #[test]
    fn test_validate_ok() {
        let columns = [id_column("node", ID_TYPMOD), id_column("parent", ID_TYPMOD)];
        assert_eq!(validate(&edges16(), &columns), Ok(()));
    }

    #[test]
    fn test_validate_length_mismatch() {
        let columns = [id_column("node", ID_TYPMOD), id_column("parent", ID_TYPMOD - 1)];
        let err = validate(&edges16(), &columns).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ColumnLengthMismatch {
                relation: "edges".into(),
                index: 1,
                column: "parent".into(),
                typ: ColumnType::Varchar,
                expected: 36,
                actual: Some(35),
            }
        );
    }

    #[test]
    fn test_validate_unbounded_length() {
        let columns = [
            PhysicalColumn::new("node", ColumnType::Varchar, None),
            id_column("parent", ID_TYPMOD),
        ];
        let err = validate(&edges16(), &columns).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ColumnLengthMismatch {
                index: 0,
                actual: None,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_too_few_columns() {
        let columns = [id_column("node", ID_TYPMOD)];
        let err = validate(&edges16(), &columns).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ColumnCountMismatch {
                relation: "edges".into(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_validate_too_many_columns() {
        let columns = [
            id_column("node", ID_TYPMOD),
            id_column("parent", ID_TYPMOD),
            PhysicalColumn::new("weight", ColumnType::Int4, None),
        ];
        let err = validate(&edges16(), &columns).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ColumnCountMismatch {
                relation: "edges".into(),
                expected: 2,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_validate_no_columns() {
        let err = validate(&edges16(), &[]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ColumnCountMismatch { expected: 2, actual: 0, .. }
        ));
    }

    #[test]
    fn test_validate_type_mismatch() {
        let columns = [
            id_column("node", ID_TYPMOD),
            PhysicalColumn::new("parent", ColumnType::Int4, None),
        ];
        let err = validate(&edges16(), &columns).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ColumnTypeMismatch {
                relation: "edges".into(),
                index: 1,
                column: "parent".into(),
                expected: ColumnType::Varchar,
                actual: ColumnType::Int4,
            }
        );
    }

    #[test]
    fn test_type_checked_before_count() {
        let columns = [PhysicalColumn::new("node", ColumnType::Int8, None)];
        let err = validate(&edges16(), &columns).unwrap_err();
        assert!(matches!(err, ValidationError::ColumnTypeMismatch { index: 0, .. }));
    }

    #[test]
    fn test_load_table() {
        let columns = [id_column("node", 12), id_column("parent", 12)];
        let table = load_table(
            &[RawOption::new("node_id_len", "4")],
            &[RawOption::new("relation", "edges")],
            &columns,
        )
        .unwrap();
        assert_eq!(table.server().node_id_len(), 4);

        let err = load_table(&[], &[RawOption::new("relation", "edges")], &columns).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingRequiredOption { ref option } if option == "node_id_len"
        ));
    }

    #[test]
    fn test_builder_requires_relation() {
        let err = TableConfig::builder(server16()).build().unwrap_err();
        assert!(matches!(err, ValidationError::MissingRequiredOption { .. }));

        let rel = relation::lookup("edges").unwrap();
        let table = TableConfig::builder(server16()).relation(rel).build().unwrap();
        assert_eq!(table, TableConfig::new(server16(), rel));
    }
}
