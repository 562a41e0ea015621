use crate::types::ColumnType;

/// SQLSTATE `HV00D`: fdw_invalid_option_name.
pub const FDW_INVALID_OPTION_NAME: &str = "HV00D";
/// SQLSTATE `HV00J`: fdw_option_name_not_found.
pub const FDW_OPTION_NAME_NOT_FOUND: &str = "HV00J";
/// SQLSTATE `HV000`: fdw_error.
pub const FDW_ERROR: &str = "HV000";
/// SQLSTATE `42601`: syntax_error.
pub const SYNTAX_ERROR: &str = "42601";

/// A rejected option set or table definition.
///
/// Each variant carries the identifiers and values needed to render the
/// message, its SQLSTATE and its hint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No options are accepted in this context")]
    NoOptionsAccepted,

    #[error("invalid value for option {option}: \"{value}\"")]
    InvalidOptionValue { option: String, value: String },

    #[error("unknown option \"{option}\"")]
    UnknownOption {
        option: String,
        suggestion: Option<String>,
    },

    #[error("No value for required option {option}")]
    MissingRequiredOption { option: String },

    #[error("unsupported relation name for option {option}: \"{value}\"")]
    UnsupportedRelationName {
        option: String,
        value: String,
        suggestion: Option<String>,
    },

    #[error(
        "relation {relation}: invalid type of column #{index} \"{column}\": {actual}, expecting {expected}"
    )]
    ColumnTypeMismatch {
        relation: String,
        index: usize,
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },

    #[error(
        "relation {relation}: the {typ} column #{index} \"{column}\" length {} doesn't match the length of node ID representation ({expected})",
        display_length(.actual)
    )]
    ColumnLengthMismatch {
        relation: String,
        index: usize,
        column: String,
        typ: ColumnType,
        expected: u64,
        actual: Option<u32>,
    },

    #[error("relation {relation}: invalid number of columns: {actual}, expecting {expected}")]
    ColumnCountMismatch {
        relation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Creating {kind} objects not supported")]
    UnsupportedObject { kind: &'static str },
}

fn display_length(length: &Option<u32>) -> String {
    match length {
        Some(n) => n.to_string(),
        None => "(none)".to_string(),
    }
}

impl ValidationError {
    /// The SQLSTATE reported for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoOptionsAccepted | Self::UnknownOption { .. } => FDW_INVALID_OPTION_NAME,
            Self::InvalidOptionValue { .. } | Self::UnsupportedRelationName { .. } => SYNTAX_ERROR,
            Self::MissingRequiredOption { .. } => FDW_OPTION_NAME_NOT_FOUND,
            Self::ColumnTypeMismatch { .. }
            | Self::ColumnLengthMismatch { .. }
            | Self::ColumnCountMismatch { .. }
            | Self::UnsupportedObject { .. } => FDW_ERROR,
        }
    }

    /// An optional hint to show alongside the message.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::UnknownOption {
                suggestion: Some(s),
                ..
            }
            | Self::UnsupportedRelationName {
                suggestion: Some(s),
                ..
            } => Some(format!("Perhaps you meant \"{s}\".")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_option_message_and_hint() {
        let err = ValidationError::UnknownOption {
            option: "noide_id_len".into(),
            suggestion: Some("node_id_len".into()),
        };
        assert_eq!(err.to_string(), "unknown option \"noide_id_len\"");
        assert_eq!(err.hint().as_deref(), Some("Perhaps you meant \"node_id_len\"."));
        assert_eq!(err.code(), FDW_INVALID_OPTION_NAME);
    }

    #[test]
    fn test_no_hint_without_suggestion() {
        let err = ValidationError::UnknownOption {
            option: "zzzzzzzzzz".into(),
            suggestion: None,
        };
        assert_eq!(err.hint(), None);
        assert_eq!(ValidationError::NoOptionsAccepted.hint(), None);
    }

    #[test]
    fn test_codes() {
        let invalid = ValidationError::InvalidOptionValue {
            option: "node_id_len".into(),
            value: "-5".into(),
        };
        assert_eq!(invalid.code(), SYNTAX_ERROR);
        assert_eq!(invalid.to_string(), "invalid value for option node_id_len: \"-5\"");

        let missing = ValidationError::MissingRequiredOption {
            option: "relation".into(),
        };
        assert_eq!(missing.code(), FDW_OPTION_NAME_NOT_FOUND);
        assert_eq!(missing.to_string(), "No value for required option relation");
    }

    #[test]
    fn test_column_messages() {
        let err = ValidationError::ColumnLengthMismatch {
            relation: "edges".into(),
            index: 1,
            column: "parent".into(),
            typ: ColumnType::Varchar,
            expected: 36,
            actual: None,
        };
        assert_eq!(
            err.to_string(),
            "relation edges: the character varying (1043) column #1 \"parent\" length (none) \
             doesn't match the length of node ID representation (36)"
        );
        assert_eq!(err.code(), FDW_ERROR);

        let err = ValidationError::ColumnCountMismatch {
            relation: "edges".into(),
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "relation edges: invalid number of columns: 3, expecting 2"
        );
    }

    #[test]
    fn test_unsupported_object() {
        let err = ValidationError::UnsupportedObject { kind: "user mapping" };
        assert_eq!(err.to_string(), "Creating user mapping objects not supported");
    }
}
