//! Option schemas and the rules for applying them to user-supplied options.
//!
//! A schema is a fixed list of recognized option names, each with a
//! required flag and an [`OptionKind`] describing how its value is parsed.
//! Applying a schema is fail-fast: the first problem found is returned.

use crate::error::ValidationError;
use crate::relation;
use crate::suggest::{self, OPTION_MAX_DISTANCE};
use crate::value::{OptionKind, OptionValue, ParseFailure};

/// One `name = value` pair from a definition's `OPTIONS` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOption {
    pub name: String,
    pub value: String,
}

impl RawOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A recognized option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor {
    pub name: &'static str,
    pub required: bool,
    pub kind: OptionKind,
}

impl OptionDescriptor {
    pub const fn required(name: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            required: true,
            kind,
        }
    }

    pub const fn optional(name: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            required: false,
            kind,
        }
    }
}

/// An ordered set of option descriptors with unique names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSchema {
    descriptors: &'static [OptionDescriptor],
}

/// Per-descriptor state while applying a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Unseen,
    Seen(OptionValue),
}

/// The values a schema accepted, indexed like its descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOptions {
    schema: OptionSchema,
    slots: Vec<Slot>,
}

impl OptionSchema {
    /// A schema accepting no options at all.
    pub const EMPTY: Self = Self::new(&[]);

    pub const fn new(descriptors: &'static [OptionDescriptor]) -> Self {
        Self { descriptors }
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + use<> {
        let descriptors = self.descriptors;
        descriptors.iter().map(|d| d.name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.descriptors.iter().position(|d| d.name == name)
    }

    fn has_unique_names(&self) -> bool {
        self.descriptors
            .iter()
            .enumerate()
            .all(|(i, d)| self.descriptors[..i].iter().all(|prev| prev.name != d.name))
    }

    /// Check `raws` against the schema and collect the parsed values.
    ///
    /// Options are processed in the order supplied; an option given twice
    /// keeps its last value. After all options parse, the first required
    /// descriptor (in schema order) that was never supplied is reported.
    pub fn apply(&self, raws: &[RawOption]) -> Result<ParsedOptions, ValidationError> {
        debug_assert!(self.has_unique_names(), "duplicate option names in schema");

        if self.is_empty() && !raws.is_empty() {
            return Err(ValidationError::NoOptionsAccepted);
        }

        let mut slots = vec![Slot::Unseen; self.descriptors.len()];

        for raw in raws {
            let Some(index) = self.position(&raw.name) else {
                let suggestion = suggest::closest(&raw.name, self.names(), OPTION_MAX_DISTANCE);
                return Err(ValidationError::UnknownOption {
                    option: raw.name.clone(),
                    suggestion: suggestion.map(str::to_string),
                });
            };

            let value = self.descriptors[index]
                .kind
                .parse(&raw.value)
                .map_err(|failure| value_error(raw, failure))?;
            slots[index] = Slot::Seen(value);
        }

        let missing = self
            .descriptors
            .iter()
            .zip(&slots)
            .find(|(d, slot)| d.required && **slot == Slot::Unseen);
        if let Some((descriptor, _)) = missing {
            return Err(ValidationError::MissingRequiredOption {
                option: descriptor.name.to_string(),
            });
        }

        Ok(ParsedOptions {
            schema: *self,
            slots,
        })
    }
}

fn value_error(raw: &RawOption, failure: ParseFailure) -> ValidationError {
    match failure {
        ParseFailure::InvalidValue => ValidationError::InvalidOptionValue {
            option: raw.name.clone(),
            value: raw.value.clone(),
        },
        ParseFailure::UnsupportedRelation => ValidationError::UnsupportedRelationName {
            option: raw.name.clone(),
            value: raw.value.clone(),
            suggestion: suggest::closest(&raw.value, relation::names(), OPTION_MAX_DISTANCE)
                .map(str::to_string),
        },
    }
}

impl ParsedOptions {
    /// The parsed value of `name`, if it was supplied.
    pub fn get(&self, name: &str) -> Option<OptionValue> {
        match self.slots.get(self.schema.position(name)?)? {
            Slot::Seen(value) => Some(*value),
            Slot::Unseen => None,
        }
    }

    pub fn is_seen(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn positive_int(&self, name: &str) -> Option<u32> {
        self.get(name)?.as_positive_int()
    }

    pub fn relation(&self, name: &str) -> Option<&'static relation::RelationDescriptor> {
        self.get(name)?.as_relation()
    }
}
