//! Checker configuration.

use rustc_hash::FxHashMap;

use crate::HandlerKind;

/// Tunable offsets for the indentation check.
///
/// Every offset is a column count. The defaults give the common
/// four-space style with tabs every eight columns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct IndentConfig {
    /// Indent of a child relative to its enclosing construct.
    pub basic_offset: u32,
    /// Extra indent of braces relative to their construct.
    pub brace_adjustment: u32,
    /// Indent of `case` relative to its `switch`.
    pub case_indent: u32,
    /// Indent of a wrapped `throws` clause.
    pub throws_indent: u32,
    /// Indent of array initializer elements.
    pub array_init_indent: u32,
    /// Minimum indent of continuation lines.
    pub line_wrapping_indentation: u32,
    /// Width of a tab stop.
    pub tab_width: u32,
    /// Which handlers demand exact continuation columns.
    pub strict: StrictPolicy,
}

impl Default for IndentConfig {
    fn default() -> Self {
        IndentConfig {
            basic_offset: 4,
            brace_adjustment: 0,
            case_indent: 4,
            throws_indent: 4,
            array_init_indent: 4,
            line_wrapping_indentation: 4,
            tab_width: 8,
            strict: StrictPolicy::default(),
        }
    }
}

impl IndentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_basic_offset(mut self, offset: u32) -> Self {
        self.basic_offset = offset;
        self
    }

    #[must_use]
    pub fn with_brace_adjustment(mut self, adjustment: u32) -> Self {
        self.brace_adjustment = adjustment;
        self
    }

    #[must_use]
    pub fn with_case_indent(mut self, indent: u32) -> Self {
        self.case_indent = indent;
        self
    }

    #[must_use]
    pub fn with_throws_indent(mut self, indent: u32) -> Self {
        self.throws_indent = indent;
        self
    }

    #[must_use]
    pub fn with_array_init_indent(mut self, indent: u32) -> Self {
        self.array_init_indent = indent;
        self
    }

    #[must_use]
    pub fn with_line_wrapping_indentation(mut self, indent: u32) -> Self {
        self.line_wrapping_indentation = indent;
        self
    }

    #[must_use]
    pub fn with_tab_width(mut self, width: u32) -> Self {
        self.tab_width = width;
        self
    }

    /// Make every handler strict (or lenient) unless overridden per kind.
    #[must_use]
    pub fn with_force_strict(mut self, strict: bool) -> Self {
        self.strict.default = strict;
        self
    }

    /// Override strictness for one handler kind.
    #[must_use]
    pub fn with_strict_for(mut self, kind: HandlerKind, strict: bool) -> Self {
        self.strict.overrides.insert(kind, strict);
        self
    }

    /// Whether `kind` demands exact continuation columns.
    pub fn is_force_strict(&self, kind: HandlerKind) -> bool {
        self.strict
            .overrides
            .get(&kind)
            .copied()
            .unwrap_or(self.strict.default)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_width == 0 {
            return Err(ConfigError::ZeroTabWidth);
        }
        Ok(())
    }
}

/// Strict-condition policy.
///
/// Lenient handlers accept any continuation column at or beyond the
/// expected one; strict handlers accept only the expected column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StrictPolicy {
    pub default: bool,
    pub overrides: FxHashMap<HandlerKind, bool>,
}

/// Configuration rejected by [`IndentConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("tab width must be at least 1")]
    ZeroTabWidth,
}
