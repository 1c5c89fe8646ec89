use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// How an owning type's name is turned into a label.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    /// Module paths stripped from every path segment: `Widget`, `Cache<Entry>`.
    #[default]
    Short,
    /// The full path reported by the compiler: `my_app::modules::Widget`.
    Qualified,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown name style '{0}'; expected short/qualified")]
pub struct ParseNameStyleError(String);

impl FromStr for NameStyle {
    type Err = ParseNameStyleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(NameStyle::Short),
            "qualified" => Ok(NameStyle::Qualified),
            _ => Err(ParseNameStyleError(value.to_string())),
        }
    }
}

/// Formatting policy shared by every logger a registry binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFormat {
    separator: String,
    name_style: NameStyle,
}

impl LabelFormat {
    pub const DEFAULT_SEPARATOR: &'static str = ": ";

    pub fn new(separator: impl Into<String>, name_style: NameStyle) -> Self {
        Self {
            separator: separator.into(),
            name_style,
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn name_style(&self) -> NameStyle {
        self.name_style
    }

    /// Label for `T` under this policy.
    pub fn label_for<T: ?Sized>(&self) -> String {
        self.label_of(std::any::type_name::<T>())
    }

    /// Label for a type name as reported by [`std::any::type_name`].
    pub fn label_of(&self, type_name: &str) -> String {
        match self.name_style {
            NameStyle::Short => strip_paths(type_name),
            NameStyle::Qualified => type_name.to_string(),
        }
    }

    /// `label`, separator, then `message`.
    pub fn render(&self, label: &str, message: impl Display) -> String {
        format!("{label}{}{message}", self.separator)
    }
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEPARATOR, NameStyle::default())
    }
}

/// Drops the module path in front of every identifier, keeping generic
/// arguments and punctuation intact.
fn strip_paths(type_name: &str) -> String {
    let mut out = String::with_capacity(type_name.len());
    let mut segment_start = 0;
    let mut chars = type_name.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.truncate(segment_start);
            }
            c if c.is_alphanumeric() || c == '_' => out.push(c),
            c => {
                out.push(c);
                segment_start = out.len();
            }
        }
    }

    out
}
