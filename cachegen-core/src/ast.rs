/// One decoded DSL statement.
///
/// Tokens are kept as written. Resolving them against constants and
/// declared names is left to the semantic layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Blank line, comment-only line or lone `;`.
    Empty,
    Namespace(String),
    Const {
        name: String,
        value: String,
    },
    Type {
        name: String,
        family: String,
        args: Vec<String>,
    },
    Create {
        name: String,
        type_name: String,
        size: Option<String>,
    },
    Connect(ConnectStatement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectStatement {
    pub client: String,
    /// `[HI:LO]` or `[N]`; `None` means the whole client array.
    pub range: Option<IndexRange>,
    pub manager: String,
    pub index: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRange {
    pub start: String,
    pub end: Option<String>,
}

impl Statement {
    pub fn is_empty(&self) -> bool {
        matches!(self, Statement::Empty)
    }
}
