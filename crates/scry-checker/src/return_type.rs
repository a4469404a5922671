//! Return type analysis over function bodies.
//!
//! The walk is state-free: it owns no scopes and types no expressions
//! itself. Everything that needs analysis state goes through the
//! [`ExpressionTyper`] callbacks, so the same walk serves the checker (which
//! binds declarations as the walk passes them) and standalone callers.
//!
//! The walk never descends into nested function, arrow, method or class
//! bodies: their `return` statements belong to them.

use scry_ast::{CatchClause, Node};
use scry_solver::{TypeId, TypeInterner, types_equal};
use tracing::trace;

/// Callbacks the return walk uses to type expressions and keep the caller's
/// scope state in step with the statements it visits.
pub trait ExpressionTyper {
    /// Type of an expression at the current point of the walk.
    fn type_of(&mut self, expr: &Node) -> TypeId;

    /// A statement is about to be walked. Declarations bind here, and
    /// expression statements, conditions and `throw` arguments get typed.
    fn visit_statement(&mut self, _stmt: &Node) {}

    /// Entering the body of a block, loop or `switch`.
    fn enter_block(&mut self, _owner: &Node) {}

    /// Entering a `catch` clause.
    fn enter_catch(&mut self, _clause: &CatchClause) {}

    /// Leaving the scope opened by `enter_block` or `enter_catch`.
    fn exit_block(&mut self) {}
}

/// Returns collected from a body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReturnAnalysis {
    /// Distinct return types in first-seen order. A bare `return` counts as
    /// `undefined`.
    pub return_types: Vec<TypeId>,
    /// Whether some path reaches the end of the body without a `return`.
    pub falls_through: bool,
}

impl ReturnAnalysis {
    /// The function's return type: `void` without returns, the single
    /// distinct type, or the union of all of them. A single return type wins
    /// even when another path falls through.
    pub fn result_type(&self, interner: &TypeInterner) -> TypeId {
        match self.return_types.as_slice() {
            [] => TypeId::VOID,
            [single] => *single,
            types => interner.union(types.to_vec()),
        }
    }

    fn record(&mut self, interner: &TypeInterner, type_id: TypeId) {
        let seen = self
            .return_types
            .iter()
            .any(|&existing| existing == type_id || types_equal(interner, existing, type_id));
        if !seen {
            self.return_types.push(type_id);
        }
    }
}

/// Return type of a function body. An expression body is its own result.
pub fn analyze_return_type(
    interner: &TypeInterner,
    body: &Node,
    is_expression_body: bool,
    typer: &mut dyn ExpressionTyper,
) -> TypeId {
    if is_expression_body {
        return typer.type_of(body);
    }
    let statements = match body {
        Node::BlockStatement(block) => block.body.as_slice(),
        other => std::slice::from_ref(other),
    };
    collect_returns(interner, statements, typer).result_type(interner)
}

/// Walk a statement list and collect its returns.
pub fn collect_returns(
    interner: &TypeInterner,
    statements: &[Node],
    typer: &mut dyn ExpressionTyper,
) -> ReturnAnalysis {
    let mut walker = ReturnWalker {
        interner,
        typer,
        analysis: ReturnAnalysis::default(),
    };
    let completes = walker.walk_list(statements);
    walker.analysis.falls_through = completes;
    trace!(
        returns = walker.analysis.return_types.len(),
        falls_through = completes,
        "collected returns"
    );
    walker.analysis
}

struct ReturnWalker<'a, 't> {
    interner: &'a TypeInterner,
    typer: &'t mut dyn ExpressionTyper,
    analysis: ReturnAnalysis,
}

impl ReturnWalker<'_, '_> {
    /// Walk statements in order. Returns whether the list can complete
    /// normally; statements after one that cannot are unreachable and are
    /// skipped.
    fn walk_list(&mut self, statements: &[Node]) -> bool {
        for stmt in statements {
            if !self.walk(stmt) {
                return false;
            }
        }
        true
    }

    fn walk(&mut self, stmt: &Node) -> bool {
        self.typer.visit_statement(stmt);
        match stmt {
            Node::ReturnStatement(ret) => {
                let type_id = match &ret.argument {
                    Some(argument) => self.typer.type_of(argument),
                    None => TypeId::UNDEFINED,
                };
                self.analysis.record(self.interner, type_id);
                false
            }
            Node::ThrowStatement(_) => false,
            Node::BlockStatement(block) => {
                self.typer.enter_block(stmt);
                let completes = self.walk_list(&block.body);
                self.typer.exit_block();
                completes
            }
            Node::IfStatement(if_stmt) => {
                let then_completes = self.walk(&if_stmt.consequent);
                let else_completes = match &if_stmt.alternate {
                    Some(alternate) => self.walk(alternate),
                    None => true,
                };
                then_completes || else_completes
            }
            Node::ForStatement(for_stmt) => {
                self.typer.enter_block(stmt);
                self.walk(&for_stmt.body);
                self.typer.exit_block();
                true
            }
            Node::ForInStatement(each) | Node::ForOfStatement(each) => {
                self.typer.enter_block(stmt);
                self.walk(&each.body);
                self.typer.exit_block();
                true
            }
            Node::WhileStatement(loop_stmt) | Node::DoWhileStatement(loop_stmt) => {
                self.walk(&loop_stmt.body);
                true
            }
            Node::TryStatement(try_stmt) => {
                let block_completes = self.walk_block(&try_stmt.block.body, stmt);
                let handler_completes = match &try_stmt.handler {
                    Some(handler) => {
                        self.typer.enter_catch(handler);
                        let completes = self.walk_list(&handler.body.body);
                        self.typer.exit_block();
                        completes
                    }
                    None => false,
                };
                let finalizer_completes = match &try_stmt.finalizer {
                    Some(finalizer) => self.walk_block(&finalizer.body, stmt),
                    None => true,
                };
                (block_completes || handler_completes) && finalizer_completes
            }
            Node::SwitchStatement(switch) => {
                self.typer.enter_block(stmt);
                for case in &switch.cases {
                    self.walk_list(&case.consequent);
                }
                self.typer.exit_block();
                true
            }
            Node::LabeledStatement(labeled) => {
                self.walk(&labeled.body);
                true
            }
            _ => true,
        }
    }

    /// A `try`/`finally` block: the owner is the `try` statement, whose
    /// block bodies are plain statement lists rather than nodes.
    fn walk_block(&mut self, statements: &[Node], owner: &Node) -> bool {
        self.typer.enter_block(owner);
        let completes = self.walk_list(statements);
        self.typer.exit_block();
        completes
    }
}

#[cfg(test)]
#[path = "../tests/return_type_tests.rs"]
mod tests;
