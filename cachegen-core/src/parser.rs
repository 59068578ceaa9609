use regex::{Captures, Regex};
use tracing::debug;

use crate::ast::{ConnectStatement, IndexRange, Statement};
use crate::error::CoreError;
use crate::grammar::{self, split_args};

/// Statement forms in the order they are tried against a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementForm {
    Blank,
    Comment,
    Namespace,
    Const,
    Type,
    Create,
    Connect,
}

impl StatementForm {
    pub const ALL: [StatementForm; 7] = [
        StatementForm::Blank,
        StatementForm::Comment,
        StatementForm::Namespace,
        StatementForm::Const,
        StatementForm::Type,
        StatementForm::Create,
        StatementForm::Connect,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            StatementForm::Blank => &grammar::BLANK,
            StatementForm::Comment => &grammar::COMMENT,
            StatementForm::Namespace => &grammar::NAMESPACE,
            StatementForm::Const => &grammar::CONST,
            StatementForm::Type => &grammar::TYPE,
            StatementForm::Create => &grammar::CREATE,
            StatementForm::Connect => &grammar::CONNECT,
        }
    }

    fn decode(self, caps: &Captures<'_>) -> Statement {
        let text = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        let required = |name: &str| text(name).unwrap_or_default();
        match self {
            StatementForm::Blank | StatementForm::Comment => Statement::Empty,
            StatementForm::Namespace => Statement::Namespace(required("name")),
            StatementForm::Const => Statement::Const {
                name: required("name"),
                value: required("value"),
            },
            StatementForm::Type => Statement::Type {
                name: required("name"),
                family: required("family"),
                args: split_args(&required("args")),
            },
            StatementForm::Create => Statement::Create {
                name: required("name"),
                type_name: required("type"),
                size: text("size"),
            },
            StatementForm::Connect => Statement::Connect(ConnectStatement {
                client: required("client"),
                range: text("start").map(|start| IndexRange {
                    start,
                    end: text("end"),
                }),
                manager: required("manager"),
                index: text("index"),
            }),
        }
    }
}

/// Decodes a single line. The first matching form owns the line; a line no
/// form accepts is a [`CoreError::ParseMismatch`].
pub fn parse_line(line_no: usize, line: &str, trace: bool) -> Result<Statement, CoreError> {
    for form in StatementForm::ALL {
        if let Some(caps) = form.pattern().captures(line) {
            if trace {
                let groups: Vec<(&str, &str)> = form
                    .pattern()
                    .capture_names()
                    .flatten()
                    .filter_map(|name| caps.name(name).map(|m| (name, m.as_str())))
                    .collect();
                debug!(line = line_no, ?form, ?groups, text = line, "statement matched");
            }
            return Ok(form.decode(&caps));
        }
    }
    Err(CoreError::ParseMismatch {
        line: line_no,
        text: line.to_string(),
    })
}

/// Decodes a whole source, skipping empty statements. Line numbers are
/// 1-based.
pub fn parse(source: &str) -> Result<Vec<(usize, Statement)>, CoreError> {
    let mut statements = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let statement = parse_line(idx + 1, line, false)?;
        if !statement.is_empty() {
            statements.push((idx + 1, statement));
        }
    }
    Ok(statements)
}
