use std::fmt;

use tracing::{info, warn};

use crate::ast::Statement;
use crate::codegen_cpp::{emit_declarations, emit_initialization};
use crate::connect::{resolve_connect, resolve_create};
use crate::context::Context;
use crate::error::CoreError;
use crate::parser::parse_line;
use crate::typecheck::check_type;

/// What to do when a statement is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first rejected statement.
    #[default]
    FailFast,
    /// Report every rejected statement, then fail.
    CollectAll,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Log every matched statement with its captures.
    pub debug: bool,
    pub policy: ErrorPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationArtifact {
    /// Declarations: includes, type aliases and entity arrays.
    pub header: String,
    /// Entity definitions and the `init()` routine.
    pub source: String,
}

/// Single-pass compiler over DSL lines.
///
/// Lines are applied to the context as they arrive; a statement that fails
/// validation commits nothing.
#[derive(Debug)]
pub struct Compiler {
    ctx: Context,
    options: CompileOptions,
    rejected: Vec<CoreError>,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        let mut ctx = Context::new();
        ctx.debug = options.debug;
        Compiler {
            ctx,
            options,
            rejected: Vec::new(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Parses and applies one line. A grammar mismatch is always returned;
    /// other failures are returned under [`ErrorPolicy::FailFast`] and
    /// only logged under [`ErrorPolicy::CollectAll`]. Either way the
    /// rejection is recorded, so [`Compiler::finish`] refuses to emit.
    pub fn process_line(&mut self, line_no: usize, line: &str) -> Result<(), CoreError> {
        let statement = match parse_line(line_no, line, self.ctx.debug) {
            Ok(statement) => statement,
            Err(err) => {
                self.rejected.push(err.clone());
                return Err(err);
            }
        };
        let Err(err) = apply(&mut self.ctx, statement) else {
            return Ok(());
        };
        let err = err.at_line(line_no);
        self.rejected.push(err.clone());
        match self.options.policy {
            ErrorPolicy::FailFast => Err(err),
            ErrorPolicy::CollectAll => {
                warn!(line = line_no, text = line, error = %err, "statement rejected");
                Ok(())
            }
        }
    }

    /// Emits both output files, or fails if any statement was rejected.
    pub fn finish(self, header_name: &str) -> Result<CompilationArtifact, CoreError> {
        if !self.rejected.is_empty() {
            return Err(CoreError::Rejected(self.rejected));
        }
        let artifact = emit(&self.ctx, header_name)?;
        info!(
            types = self.ctx.types().filter(|t| !t.builtin).count(),
            entities = self.ctx.entities().count(),
            connections = self.ctx.connections().len(),
            "compilation finished"
        );
        Ok(artifact)
    }
}

/// Commits one statement to the context.
pub fn apply(ctx: &mut Context, statement: Statement) -> Result<(), CoreError> {
    match statement {
        Statement::Empty => Ok(()),
        Statement::Namespace(name) => {
            ctx.set_namespace(&name);
            Ok(())
        }
        Statement::Const { name, value } => {
            let value = ctx.resolve_int(&value)?;
            ctx.declare_constant(&name, value)
        }
        Statement::Type { name, family, args } => {
            let descriptor = check_type(ctx, &name, &family, &args)?;
            ctx.declare_type(descriptor)
        }
        Statement::Create {
            name,
            type_name,
            size,
        } => {
            let entity = resolve_create(ctx, &name, &type_name, size.as_deref())?;
            ctx.declare_entity(entity)
        }
        Statement::Connect(connect) => {
            let edges = resolve_connect(ctx, &connect)?;
            ctx.add_connections(edges);
            Ok(())
        }
    }
}

/// Renders a finished context. Pure: the same context always yields the
/// same artifact.
pub fn emit(ctx: &Context, header_name: &str) -> Result<CompilationArtifact, fmt::Error> {
    let mut header = String::new();
    let mut source = String::new();
    emit_declarations(ctx, &mut header)?;
    emit_initialization(ctx, header_name, &mut source)?;
    Ok(CompilationArtifact { header, source })
}

/// Compiles a whole DSL source. `header_name` is what the generated source
/// file uses to include the generated header.
pub fn compile(
    source: &str,
    header_name: &str,
    options: &CompileOptions,
) -> Result<CompilationArtifact, CoreError> {
    let mut compiler = Compiler::new(*options);
    for (idx, line) in source.lines().enumerate() {
        compiler.process_line(idx + 1, line)?;
    }
    compiler.finish(header_name)
}
