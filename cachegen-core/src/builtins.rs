//! Symbols that exist before the first line is read.
//!
//! The boolean aliases live in the constant table, so any place that takes
//! an integer also accepts them. The predefined types can be referenced
//! like any declared type but never produce an alias line of their own.

use crate::types::Family;

/// A constant that is bound in every fresh context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinConstant {
    pub name: &'static str,
    pub value: i64,
}

/// A type that is registered in every fresh context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinType {
    pub name: &'static str,
    pub family: Family,
}

pub const BOOL_LITERALS: &[BuiltinConstant] = &[
    BuiltinConstant { name: "true", value: 1 },
    BuiltinConstant { name: "TRUE", value: 1 },
    BuiltinConstant { name: "false", value: 0 },
    BuiltinConstant { name: "FALSE", value: 0 },
];

pub const BUILTIN_TYPES: &[BuiltinType] = &[BuiltinType {
    name: "Data64B",
    family: Family::Data64B,
}];

/// Look up one of the boolean aliases.
pub fn find_bool_literal(name: &str) -> Option<bool> {
    BOOL_LITERALS
        .iter()
        .find(|b| b.name == name)
        .map(|b| b.value != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_all_bool_spellings() {
        assert_eq!(find_bool_literal("true"), Some(true));
        assert_eq!(find_bool_literal("TRUE"), Some(true));
        assert_eq!(find_bool_literal("false"), Some(false));
        assert_eq!(find_bool_literal("FALSE"), Some(false));
        assert_eq!(find_bool_literal("True"), None);
        assert_eq!(find_bool_literal("1"), None);
    }
}
