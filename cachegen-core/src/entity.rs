//! Entities (named instance arrays) and the edges that wire them.

use std::fmt::{self, Write};

use crate::types::Family;

/// A `create` statement after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub type_name: String,
    /// Family of the bound type, used to find the connection facets.
    pub family: Family,
    pub size: usize,
}

impl Entity {
    /// Accessor suffix addressing this entity toward its manager.
    pub fn outer(&self) -> &'static str {
        self.family.outer_facet()
    }

    /// Accessor suffix addressing this entity toward its clients.
    pub fn inner(&self) -> &'static str {
        self.family.inner_facet()
    }

    /// Writes the array declaration: an `extern` in the header pass, the
    /// sized definition otherwise.
    pub fn emit_declaration(&self, out: &mut impl Write, declarations_pass: bool) -> fmt::Result {
        if declarations_pass {
            writeln!(
                out,
                "extern std::vector<{} *> {}; // {} instance(s)",
                self.type_name, self.name, self.size
            )
        } else {
            writeln!(
                out,
                "std::vector<{} *> {}({});",
                self.type_name, self.name, self.size
            )
        }
    }

    pub fn emit_initialization(&self, out: &mut impl Write) -> fmt::Result {
        for i in 0..self.size {
            writeln!(out, "  {}[{}] = new {}();", self.name, i, self.type_name)?;
        }
        Ok(())
    }
}

/// One wiring edge: `client[client_index] -> manager[manager_index]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub client: String,
    pub client_index: usize,
    pub manager: String,
    pub manager_index: usize,
}

impl Connection {
    pub fn new(client: &str, client_index: usize, manager: &str, manager_index: usize) -> Self {
        Connection {
            client: client.to_string(),
            client_index,
            manager: manager.to_string(),
            manager_index,
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] -> {}[{}]",
            self.client, self.client_index, self.manager, self.manager_index
        )
    }
}
