//! C++ backend.
//!
//! Two passes over a finished [`Context`]: the declarations pass produces the
//! header (includes, type aliases, `extern` entity arrays) and the
//! initialization pass produces the source file holding `init()`, which
//! constructs every instance and then wires the connections. Neither pass
//! validates anything; the context is assumed consistent.

use std::fmt::{self, Write};

use crate::context::Context;
use crate::entity::Connection;

/// Writes the header file.
pub fn emit_declarations(ctx: &Context, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "#include <vector>")?;
    writeln!(out)?;
    for header in ctx.dependencies() {
        writeln!(out, "#include \"{header}\"")?;
    }
    writeln!(out)?;
    open_namespace(ctx, out)?;
    for line in ctx.types().filter_map(|ty| ty.alias_line()) {
        writeln!(out, "{line}")?;
    }
    for entity in ctx.entities() {
        entity.emit_declaration(out, true)?;
    }
    close_namespace(ctx, out)
}

/// Writes the source file; `header_name` is the file it includes.
pub fn emit_initialization(ctx: &Context, header_name: &str, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "#include \"{header_name}\"")?;
    open_namespace(ctx, out)?;
    for entity in ctx.entities() {
        entity.emit_declaration(out, false)?;
    }
    writeln!(out)?;
    writeln!(out, "void init() {{")?;
    writeln!(out)?;
    writeln!(out, "  // initialize entities")?;
    for entity in ctx.entities() {
        entity.emit_initialization(out)?;
    }
    writeln!(out)?;
    writeln!(out, "  // connect entities")?;
    for edge in ctx.connections() {
        emit_handshake(ctx, edge, out)?;
    }
    writeln!(out)?;
    writeln!(out, "}}")?;
    close_namespace(ctx, out)
}

/// `client->connect(manager, manager->connect(client))`: the manager
/// registers the client first and hands its result back.
fn emit_handshake(ctx: &Context, edge: &Connection, out: &mut impl Write) -> fmt::Result {
    let outer = ctx
        .lookup_entity(&edge.client)
        .map_or("", |e| e.outer());
    let inner = ctx
        .lookup_entity(&edge.manager)
        .map_or("", |e| e.inner());
    let client = format!("{}[{}]{}", edge.client, edge.client_index, outer);
    let manager = format!("{}[{}]{}", edge.manager, edge.manager_index, inner);
    writeln!(
        out,
        "  {client}->connect({manager}, {manager}->connect({client}));"
    )
}

fn open_namespace(ctx: &Context, out: &mut impl Write) -> fmt::Result {
    match ctx.namespace() {
        Some(space) => writeln!(out, "namespace {space} {{\n"),
        None => Ok(()),
    }
}

fn close_namespace(ctx: &Context, out: &mut impl Write) -> fmt::Result {
    match ctx.namespace() {
        Some(_) => writeln!(out, "\n}}"),
        None => Ok(()),
    }
}
