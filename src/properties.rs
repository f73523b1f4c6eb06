//! Registry of the standard EditorConfig property types
//!
//! Used to normalize values while loading documents, to validate files and
//! to supply completion candidates for property names and values.

/// Value every property except `root` accepts to clear an inherited setting.
pub const UNSET: &str = "unset";

/// Shape of the values a property accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// One of a fixed set of lowercase keywords
    Enum(&'static [&'static str]),
    /// A positive integer
    PositiveInt,
    /// A positive integer or one of the given keywords
    PositiveIntOr(&'static [&'static str]),
}

impl ValueKind {
    fn accepts(&self, value: &str) -> bool {
        match self {
            ValueKind::Enum(values) => values.contains(&value),
            ValueKind::PositiveInt => is_positive_int(value),
            ValueKind::PositiveIntOr(values) => is_positive_int(value) || values.contains(&value),
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ValueKind::Enum(values) | ValueKind::PositiveIntOr(values) => values,
            ValueKind::PositiveInt => &[],
        }
    }

    fn describe(&self) -> String {
        match self {
            ValueKind::Enum(values) => format!("one of {}", values.join(", ")),
            ValueKind::PositiveInt => "a positive integer".to_string(),
            ValueKind::PositiveIntOr(values) => {
                format!("a positive integer or {}", values.join(", "))
            }
        }
    }
}

fn is_positive_int(value: &str) -> bool {
    value.parse::<u32>().is_ok_and(|n| n > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyType {
    pub name: &'static str,
    pub description: &'static str,
    pub values: ValueKind,
    /// Whether `unset` is accepted
    pub unsettable: bool,
}

const BOOLEAN: &[&str] = &["true", "false"];

const STANDARD: &[PropertyType] = &[
    PropertyType {
        name: "indent_style",
        description: "Use hard tabs or soft tabs for indentation",
        values: ValueKind::Enum(&["tab", "space"]),
        unsettable: true,
    },
    PropertyType {
        name: "indent_size",
        description: "Number of columns per indentation level",
        values: ValueKind::PositiveIntOr(&["tab"]),
        unsettable: true,
    },
    PropertyType {
        name: "tab_width",
        description: "Number of columns used to represent a tab character",
        values: ValueKind::PositiveInt,
        unsettable: true,
    },
    PropertyType {
        name: "end_of_line",
        description: "Line ending file format",
        values: ValueKind::Enum(&["lf", "cr", "crlf"]),
        unsettable: true,
    },
    PropertyType {
        name: "charset",
        description: "File character encoding",
        values: ValueKind::Enum(&["latin1", "utf-8", "utf-8-bom", "utf-16be", "utf-16le"]),
        unsettable: true,
    },
    PropertyType {
        name: "trim_trailing_whitespace",
        description: "Remove whitespace characters preceding newline characters",
        values: ValueKind::Enum(BOOLEAN),
        unsettable: true,
    },
    PropertyType {
        name: "insert_final_newline",
        description: "Ensure the file ends with a newline",
        values: ValueKind::Enum(BOOLEAN),
        unsettable: true,
    },
    PropertyType {
        name: "max_line_length",
        description: "Forces hard line wrapping after the given number of characters",
        values: ValueKind::PositiveIntOr(&["off"]),
        unsettable: true,
    },
    PropertyType {
        name: "root",
        description: "Stop searching for .editorconfig files above this one",
        values: ValueKind::Enum(BOOLEAN),
        unsettable: false,
    },
];

/// Lookup table of known property types.
#[derive(Debug, Clone)]
pub struct PropertyTypeRegistry {
    types: Vec<PropertyType>,
}

impl Default for PropertyTypeRegistry {
    fn default() -> Self {
        Self {
            types: STANDARD.to_vec(),
        }
    }
}

impl PropertyTypeRegistry {
    /// Registry with no known properties; everything is passed through.
    pub fn empty() -> Self {
        Self { types: Vec::new() }
    }

    /// Add or replace a property type.
    pub fn register(&mut self, property: PropertyType) {
        match self.types.iter_mut().find(|t| t.name == property.name) {
            Some(existing) => *existing = property,
            None => self.types.push(property),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Property names in registration order, for name completion.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.iter().map(|t| t.name)
    }

    /// Legal keyword values of `name`, for value completion.
    ///
    /// Integer-valued properties only offer their keywords.
    pub fn value_candidates(&self, name: &str) -> Vec<&'static str> {
        let Some(property) = self.get(name) else {
            return Vec::new();
        };
        let mut values = property.values.keywords().to_vec();
        if property.unsettable {
            values.push(UNSET);
        }
        values
    }

    /// Check `value` against the type of `name`.
    ///
    /// Unknown properties always pass; the caller decides whether an
    /// unknown name is itself a problem.
    pub fn validate(&self, name: &str, value: &str) -> Result<(), String> {
        let Some(property) = self.get(name) else {
            return Ok(());
        };
        let value = value.to_lowercase();
        if property.unsettable && value == UNSET {
            return Ok(());
        }
        if property.values.accepts(&value) {
            Ok(())
        } else {
            Err(format!(
                "invalid value '{value}' for '{name}', expected {}",
                property.values.describe()
            ))
        }
    }

    /// Values of known properties are case-insensitive and stored lowercased.
    pub fn normalize_value(&self, name: &str, value: &str) -> String {
        if self.get(name).is_some() {
            value.to_lowercase()
        } else {
            value.to_string()
        }
    }
}
