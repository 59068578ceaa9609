use std::fmt;

use thiserror::Error;

/// Which symbol table a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Constant,
    Type,
    Entity,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SymbolKind::Constant => "const",
            SymbolKind::Type => "type",
            SymbolKind::Entity => "entity",
        })
    }
}

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("line {line}: cannot parse `{text}`")]
    ParseMismatch { line: usize, text: String },
    #[error("failed to parse `{0}` into an integer")]
    IntegerParse(String),
    #[error("`{0}` is not a boolean value (expected true/false or 0/1)")]
    BoolParse(String),
    #[error("{kind} `{name}` has already been defined")]
    DoubleDefinition { kind: SymbolKind, name: String },
    #[error("`{0}` is not a known type family")]
    UnknownFamily(String),
    #[error("{family} needs {expected} parameters but {given} were given")]
    ParameterArity {
        family: &'static str,
        expected: usize,
        given: usize,
    },
    #[error("{family}: parameter {param} = `{value}` must be a {category} type, found {found}")]
    CategoryMismatch {
        family: &'static str,
        param: &'static str,
        value: String,
        category: &'static str,
        found: String,
    },
    #[error("{kind} `{name}` has not been declared")]
    NameNotFound { kind: SymbolKind, name: String },
    #[error("index {index} is out of the valid range [{}:0] of `{entity}`", .size - 1)]
    IndexOutOfRange {
        entity: String,
        index: i64,
        size: i64,
    },
    #[error("entity `{name}` must have at least one instance, got {size}")]
    InvalidSize { name: String, size: i64 },
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<CoreError>,
    },
    #[error("failed to render generated code")]
    Emit(#[from] fmt::Error),
    #[error("{} statement(s) rejected", .0.len())]
    Rejected(Vec<CoreError>),
}

impl CoreError {
    pub fn at_line(self, line: usize) -> Self {
        match self {
            err @ (CoreError::ParseMismatch { .. } | CoreError::AtLine { .. }) => err,
            other => CoreError::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// Strips any line context and returns the underlying error.
    pub fn root(&self) -> &CoreError {
        match self {
            CoreError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_semantic_errors_with_line_once() {
        let err = CoreError::UnknownFamily("Foo".to_string())
            .at_line(3)
            .at_line(9);
        assert_eq!(err.to_string(), "line 3: `Foo` is not a known type family");
        assert!(matches!(err.root(), CoreError::UnknownFamily(_)));
    }

    #[test]
    fn parse_mismatch_keeps_its_own_line() {
        let err = CoreError::ParseMismatch {
            line: 4,
            text: "bogus".to_string(),
        }
        .at_line(7);
        assert!(matches!(err, CoreError::ParseMismatch { line: 4, .. }));
    }

    #[test]
    fn index_out_of_range_reports_valid_span() {
        let err = CoreError::IndexOutOfRange {
            entity: "l1".to_string(),
            index: 9,
            size: 8,
        };
        assert_eq!(
            err.to_string(),
            "index 9 is out of the valid range [7:0] of `l1`"
        );
    }
}
