//! Resolution of `create` and `connect` statements.
//!
//! Both functions only read the context. They return what should be
//! committed, so a statement that fails any check leaves no trace.

use crate::ast::ConnectStatement;
use crate::context::Context;
use crate::entity::{Connection, Entity};
use crate::error::{CoreError, SymbolKind};

/// Resolves `create NAME = TYPE[SIZE];`. A missing size means one instance.
pub fn resolve_create(
    ctx: &Context,
    name: &str,
    type_name: &str,
    size: Option<&str>,
) -> Result<Entity, CoreError> {
    let ty = ctx
        .lookup_type(type_name)
        .ok_or_else(|| CoreError::NameNotFound {
            kind: SymbolKind::Type,
            name: type_name.to_string(),
        })?;
    let size = match size {
        Some(token) => ctx.resolve_int(token)?,
        None => 1,
    };
    if size < 1 {
        return Err(CoreError::InvalidSize {
            name: name.to_string(),
            size,
        });
    }
    Ok(Entity {
        name: name.to_string(),
        type_name: type_name.to_string(),
        family: ty.family,
        size: size as usize,
    })
}

/// Expands a `connect` statement into its edges, lowest client index first.
///
/// Without a range the whole client array is swept. `[HI:LO]` must satisfy
/// `size > HI >= LO >= 0`; `[N]` connects a single instance. The manager
/// index defaults to 0.
pub fn resolve_connect(
    ctx: &Context,
    stmt: &ConnectStatement,
) -> Result<Vec<Connection>, CoreError> {
    let client = find_entity(ctx, &stmt.client)?;
    let manager = find_entity(ctx, &stmt.manager)?;
    let client_size = client.size as i64;
    let manager_size = manager.size as i64;

    let out_of_range = |entity: &Entity, index: i64| CoreError::IndexOutOfRange {
        entity: entity.name.clone(),
        index,
        size: entity.size as i64,
    };

    let (start, end) = match &stmt.range {
        Some(range) => {
            let start = ctx.resolve_int(&range.start)?;
            if start < 0 || start >= client_size {
                return Err(out_of_range(client, start));
            }
            let end = match &range.end {
                Some(token) => {
                    let end = ctx.resolve_int(token)?;
                    if start < end || end < 0 || end >= client_size {
                        return Err(out_of_range(client, end));
                    }
                    end
                }
                None => start,
            };
            (start, end)
        }
        None => (client_size - 1, 0),
    };

    let manager_index = match &stmt.index {
        Some(token) => ctx.resolve_int(token)?,
        None => 0,
    };
    if manager_index < 0 || manager_index >= manager_size {
        return Err(out_of_range(manager, manager_index));
    }

    Ok((end..=start)
        .map(|i| Connection::new(&client.name, i as usize, &manager.name, manager_index as usize))
        .collect())
}

fn find_entity<'a>(ctx: &'a Context, name: &str) -> Result<&'a Entity, CoreError> {
    ctx.lookup_entity(name).ok_or_else(|| CoreError::NameNotFound {
        kind: SymbolKind::Entity,
        name: name.to_string(),
    })
}
