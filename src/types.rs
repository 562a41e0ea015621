//! Physical column types recognized by the wrapper.

use std::fmt;

/// Size of the varlena header preceding variable-length values.
pub const VARHDRSZ: u32 = 4;

/// A PostgreSQL column type, identified by its built-in type OID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Bool,
    Bytea,
    Int8,
    Int2,
    Int4,
    Text,
    Json,
    Float4,
    Float8,
    Bpchar,
    Varchar,
    Date,
    Timestamp,
    Timestamptz,
    Numeric,
    Uuid,
    Jsonb,
}

impl ColumnType {
    /// The type's OID in `pg_type`.
    pub fn oid(self) -> u32 {
        match self {
            Self::Bool => 16,
            Self::Bytea => 17,
            Self::Int8 => 20,
            Self::Int2 => 21,
            Self::Int4 => 23,
            Self::Text => 25,
            Self::Json => 114,
            Self::Float4 => 700,
            Self::Float8 => 701,
            Self::Bpchar => 1042,
            Self::Varchar => 1043,
            Self::Date => 1082,
            Self::Timestamp => 1114,
            Self::Timestamptz => 1184,
            Self::Numeric => 1700,
            Self::Uuid => 2950,
            Self::Jsonb => 3802,
        }
    }

    /// Canonical type name, as `format_type` prints it.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Bytea => "bytea",
            Self::Int8 => "bigint",
            Self::Int2 => "smallint",
            Self::Int4 => "integer",
            Self::Text => "text",
            Self::Json => "json",
            Self::Float4 => "real",
            Self::Float8 => "double precision",
            Self::Bpchar => "character",
            Self::Varchar => "character varying",
            Self::Date => "date",
            Self::Timestamp => "timestamp without time zone",
            Self::Timestamptz => "timestamp with time zone",
            Self::Numeric => "numeric",
            Self::Uuid => "uuid",
            Self::Jsonb => "jsonb",
        }
    }

    /// Look up a type by SQL name or alias, case-insensitively.
    pub fn from_sql_name(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let typ = match lower.as_str() {
            "bool" | "boolean" => Self::Bool,
            "bytea" => Self::Bytea,
            "int8" | "bigint" => Self::Int8,
            "int2" | "smallint" => Self::Int2,
            "int" | "int4" | "integer" => Self::Int4,
            "text" => Self::Text,
            "json" => Self::Json,
            "float4" | "real" => Self::Float4,
            "float8" => Self::Float8,
            "char" | "bpchar" | "character" => Self::Bpchar,
            "varchar" => Self::Varchar,
            "date" => Self::Date,
            "timestamp" => Self::Timestamp,
            "timestamptz" => Self::Timestamptz,
            "decimal" | "numeric" => Self::Numeric,
            "uuid" => Self::Uuid,
            "jsonb" => Self::Jsonb,
            _ => return None,
        };
        Some(typ)
    }

    /// True for types declared with a length, such as `varchar(n)`.
    pub fn takes_length(self) -> bool {
        matches!(self, Self::Bpchar | Self::Varchar)
    }

    /// True for the variable-length string type holding hex-encoded node IDs.
    ///
    /// Columns of this type must be declared exactly as long as the encoded
    /// identifier.
    pub fn is_identifier(self) -> bool {
        self == Self::Varchar
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.oid())
    }
}

/// Type modifier of a length-limited string column holding `len` characters.
pub fn length_typmod(len: u32) -> Option<u32> {
    len.checked_add(VARHDRSZ)
}
