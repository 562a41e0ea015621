//! Checking a parsed catalog the way the server would on `CREATE` and on
//! first use of each foreign table.

use tracing::{info, warn};

use crate::ast::{Catalog, Column, Table};
use crate::error::{SYNTAX_ERROR, ValidationError};
use crate::server::ServerConfig;
use crate::suggest::{self, OPTION_MAX_DISTANCE};
use crate::table::{PhysicalColumn, TableConfig};
use crate::types::{self, ColumnType};
use crate::validator::{self, ObjectKind};

/// SQLSTATE `42704`: undefined_object.
pub const UNDEFINED_OBJECT: &str = "42704";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("server \"{server}\" does not exist")]
    UnknownServer {
        server: String,
        suggestion: Option<String>,
    },
    #[error("type \"{type_name}\" of column \"{column}\" does not exist")]
    UnknownColumnType { column: String, type_name: String },
    #[error("type modifier is not allowed for type \"{}\" of column \"{column}\"", sql_type_name(.typ))]
    UnexpectedLength { column: String, typ: ColumnType },
    #[error("length {length} of column \"{column}\" is too large")]
    LengthOutOfRange { column: String, length: u32 },
}

fn sql_type_name(typ: &ColumnType) -> &'static str {
    typ.name()
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.code(),
            Self::UnknownServer { .. } | Self::UnknownColumnType { .. } => UNDEFINED_OBJECT,
            Self::UnexpectedLength { .. } | Self::LengthOutOfRange { .. } => SYNTAX_ERROR,
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Validation(err) => err.hint(),
            Self::UnknownServer {
                suggestion: Some(s),
                ..
            } => Some(format!("Perhaps you meant \"{s}\".")),
            _ => None,
        }
    }
}

/// What an accepted object resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Accepted,
    Server(ServerConfig),
    Table(TableConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectReport {
    pub kind: ObjectKind,
    pub name: String,
    pub outcome: Result<Resolved, CatalogError>,
}

/// The outcome of checking every object of a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReport {
    pub objects: Vec<ObjectReport>,
}

impl CatalogReport {
    /// Check every object independently, in the order wrappers, servers,
    /// tables, user mappings.
    pub fn check(catalog: &Catalog) -> Self {
        let mut objects = Vec::new();

        for wrapper in &catalog.wrappers {
            let outcome = validator::validate_options(ObjectKind::Wrapper, &wrapper.options)
                .map(|()| Resolved::Accepted)
                .map_err(CatalogError::from);
            objects.push(record(ObjectKind::Wrapper, &wrapper.name, outcome));
        }

        for server in &catalog.servers {
            let outcome = crate::server::resolve_server(&server.options)
                .map(Resolved::Server)
                .map_err(CatalogError::from);
            objects.push(record(ObjectKind::Server, &server.name, outcome));
        }

        for table in &catalog.tables {
            let outcome = check_table(catalog, table).map(Resolved::Table);
            objects.push(record(ObjectKind::Table, &table.name, outcome));
        }

        for mapping in &catalog.mappings {
            let outcome = validator::validate_options(ObjectKind::UserMapping, &mapping.options)
                .map(|()| Resolved::Accepted)
                .map_err(CatalogError::from);
            let name = format!("for {}", mapping.server);
            objects.push(record(ObjectKind::UserMapping, &name, outcome));
        }

        Self { objects }
    }

    pub fn is_ok(&self) -> bool {
        self.objects.iter().all(|o| o.outcome.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ObjectReport> {
        self.objects.iter().filter(|o| o.outcome.is_err())
    }
}

fn record(kind: ObjectKind, name: &str, outcome: Result<Resolved, CatalogError>) -> ObjectReport {
    match &outcome {
        Ok(_) => info!(%kind, object = name, "object accepted"),
        Err(err) => warn!(%kind, object = name, code = err.code(), error = %err, "object rejected"),
    }
    ObjectReport {
        kind,
        name: name.to_string(),
        outcome,
    }
}

/// Validate the table's own options, then resolve it against its server
/// and check its columns.
fn check_table(catalog: &Catalog, table: &Table) -> Result<TableConfig, CatalogError> {
    validator::validate_options(ObjectKind::Table, &table.options)?;

    let server = catalog
        .servers
        .iter()
        .find(|s| s.name == table.server)
        .ok_or_else(|| {
            let names = catalog.servers.iter().map(|s| s.name.as_str());
            CatalogError::UnknownServer {
                server: table.server.clone(),
                suggestion: suggest::closest(&table.server, names, OPTION_MAX_DISTANCE)
                    .map(str::to_string),
            }
        })?;

    let columns = table
        .columns
        .iter()
        .map(physical_column)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(crate::table::load_table(&server.options, &table.options, &columns)?)
}

/// Map a declared column to its catalog form; `varchar(n)` declares a type
/// modifier of `n` plus the varlena header.
pub fn physical_column(column: &Column) -> Result<PhysicalColumn, CatalogError> {
    let typ = ColumnType::from_sql_name(&column.typ).ok_or_else(|| {
        CatalogError::UnknownColumnType {
            column: column.name.clone(),
            type_name: column.typ.clone(),
        }
    })?;

    let declared_max_length = match column.length {
        None => None,
        Some(_) if !typ.takes_length() => {
            return Err(CatalogError::UnexpectedLength {
                column: column.name.clone(),
                typ,
            });
        }
        Some(length) => Some(types::length_typmod(length).ok_or_else(|| {
            CatalogError::LengthOutOfRange {
                column: column.name.clone(),
                length,
            }
        })?),
    };

    Ok(PhysicalColumn::new(&column.name, typ, declared_max_length))
}
