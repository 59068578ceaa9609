//! Symbol tables shared by every stage of one compilation.
//!
//! A [`Context`] is an ordinary value: each compilation builds its own and
//! nothing is global. All tables are append-only and keep insertion order,
//! which is the order the emitter writes them in.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::builtins::{BOOL_LITERALS, BUILTIN_TYPES, find_bool_literal};
use crate::entity::{Connection, Entity};
use crate::error::{CoreError, SymbolKind};
use crate::types::TypeDescriptor;

#[derive(Debug, Clone)]
pub struct Context {
    constants: IndexMap<String, i64>,
    types: IndexMap<String, TypeDescriptor>,
    entities: IndexMap<String, Entity>,
    connections: Vec<Connection>,
    namespace: Option<String>,
    dependencies: IndexSet<String>,
    pub debug: bool,
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}

impl Context {
    /// A fresh context with the boolean aliases and predefined types bound.
    pub fn new() -> Self {
        let mut ctx = Context {
            constants: IndexMap::new(),
            types: IndexMap::new(),
            entities: IndexMap::new(),
            connections: Vec::new(),
            namespace: None,
            dependencies: IndexSet::new(),
            debug: false,
        };
        for literal in BOOL_LITERALS {
            ctx.constants.insert(literal.name.to_string(), literal.value);
        }
        for builtin in BUILTIN_TYPES {
            let descriptor = TypeDescriptor::builtin(builtin.name, builtin.family);
            ctx.add_dependency(descriptor.header());
            ctx.types.insert(builtin.name.to_string(), descriptor);
        }
        ctx
    }

    pub fn resolve_int(&self, token: &str) -> Result<i64, CoreError> {
        if let Some(value) = self.constants.get(token) {
            return Ok(*value);
        }
        token
            .parse::<i64>()
            .map_err(|_| CoreError::IntegerParse(token.to_string()))
    }

    pub fn is_bool_literal(&self, token: &str) -> bool {
        find_bool_literal(token).is_some()
    }

    /// Resolves a truth value. Besides the boolean aliases, any constant or
    /// literal that resolves to 0 or 1 is accepted.
    pub fn resolve_bool(&self, token: &str) -> Result<bool, CoreError> {
        if let Some(value) = find_bool_literal(token) {
            return Ok(value);
        }
        match self.resolve_int(token)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(CoreError::BoolParse(token.to_string())),
        }
    }

    pub fn declare_constant(&mut self, name: &str, value: i64) -> Result<(), CoreError> {
        if self.constants.contains_key(name) {
            return Err(CoreError::DoubleDefinition {
                kind: SymbolKind::Constant,
                name: name.to_string(),
            });
        }
        debug!(name, value, "const declared");
        self.constants.insert(name.to_string(), value);
        Ok(())
    }

    pub fn declare_type(&mut self, descriptor: TypeDescriptor) -> Result<(), CoreError> {
        if self.types.contains_key(&descriptor.name) {
            return Err(CoreError::DoubleDefinition {
                kind: SymbolKind::Type,
                name: descriptor.name,
            });
        }
        debug!(name = %descriptor.name, family = %descriptor.family, "type declared");
        self.add_dependency(descriptor.header());
        self.types.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    pub fn declare_entity(&mut self, entity: Entity) -> Result<(), CoreError> {
        if self.entities.contains_key(&entity.name) {
            return Err(CoreError::DoubleDefinition {
                kind: SymbolKind::Entity,
                name: entity.name,
            });
        }
        debug!(name = %entity.name, ty = %entity.type_name, size = entity.size, "entity created");
        self.entities.insert(entity.name.clone(), entity);
        Ok(())
    }

    pub fn add_connections(&mut self, edges: impl IntoIterator<Item = Connection>) {
        for edge in edges {
            debug!(edge = %edge, "connection added");
            self.connections.push(edge);
        }
    }

    pub fn add_dependency(&mut self, path: &str) {
        if !self.dependencies.contains(path) {
            self.dependencies.insert(path.to_string());
        }
    }

    pub fn set_namespace(&mut self, name: &str) {
        self.namespace = Some(name.to_string());
    }

    pub fn constant(&self, name: &str) -> Option<i64> {
        self.constants.get(name).copied()
    }

    pub fn lookup_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn lookup_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Declared types in declaration order, predefined ones first.
    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(String::as_str)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}
