//! Option validation for every kind of object created with the wrapper.

use std::fmt;

use crate::error::ValidationError;
use crate::options::{OptionSchema, RawOption};
use crate::server::{self, SERVER_OPTIONS};
use crate::table::TABLE_OPTIONS;

/// The catalog an option list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Wrapper,
    Server,
    Table,
    UserMapping,
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Wrapper => "foreign-data wrapper",
            Self::Server => "server",
            Self::Table => "foreign table",
            Self::UserMapping => "user mapping",
        }
    }

    /// The schema options of this kind are checked against, if the kind
    /// can be created at all.
    pub fn schema(self) -> Option<OptionSchema> {
        match self {
            Self::Wrapper => Some(OptionSchema::EMPTY),
            Self::Server => Some(SERVER_OPTIONS),
            Self::Table => Some(TABLE_OPTIONS),
            Self::UserMapping => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validate the options given to an object when it is created or altered.
///
/// Values are parsed and discarded; table options are checked without
/// reference to any server.
pub fn validate_options(kind: ObjectKind, raws: &[RawOption]) -> Result<(), ValidationError> {
    match kind {
        ObjectKind::Server => server::resolve_server(raws).map(drop),
        _ => {
            let schema = kind
                .schema()
                .ok_or(ValidationError::UnsupportedObject { kind: kind.name() })?;
            schema.apply(raws).map(drop)
        }
    }
}
