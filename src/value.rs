//! Option value parsing.

use crate::relation::{self, RelationDescriptor};

/// How an option's textual value is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// A base-10 integer greater than zero.
    PositiveInt,
    /// The name of a supported relation.
    RelationName,
}

/// A parsed option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue {
    PositiveInt(u32),
    Relation(&'static RelationDescriptor),
}

impl OptionValue {
    pub fn as_positive_int(&self) -> Option<u32> {
        match self {
            Self::PositiveInt(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_relation(&self) -> Option<&'static RelationDescriptor> {
        match self {
            Self::Relation(rel) => Some(*rel),
            _ => None,
        }
    }
}

/// Why a value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    InvalidValue,
    UnsupportedRelation,
}

impl OptionKind {
    pub fn parse(self, raw: &str) -> Result<OptionValue, ParseFailure> {
        match self {
            Self::PositiveInt => parse_positive_int(raw).map(OptionValue::PositiveInt),
            Self::RelationName => parse_relation_name(raw).map(OptionValue::Relation),
        }
    }
}

/// Parse a positive `int`. The whole string must be the number.
pub fn parse_positive_int(raw: &str) -> Result<u32, ParseFailure> {
    match raw.parse::<i32>() {
        Ok(n) if n > 0 => Ok(n.unsigned_abs()),
        _ => Err(ParseFailure::InvalidValue),
    }
}

/// Resolve a relation name against the registry, case-sensitively.
pub fn parse_relation_name(raw: &str) -> Result<&'static RelationDescriptor, ParseFailure> {
    relation::lookup(raw).ok_or(ParseFailure::UnsupportedRelation)
}
