//! Plain statement checking: variable declarations, control flow, and the
//! unreachable-code warning — everything [`crate::decl::check_any_stmt`]
//! doesn't special-case as a declaration.

use zena_ast::{NodeArena, NodeId, NodeKind};
use zena_common::diagnostics::codes;
use zena_types::TypeId;

use crate::checker::Checker;
use crate::context::{BindingKind, ScopeKind};

impl<'a> Checker<'a> {
    /// Entry point used where a function/method body is checked while
    /// collecting its `return` expression types — a thin
    /// alias over [`Self::check_any_stmt`], since declarations can't appear
    /// where a return-collecting body is expected but are handled
    /// identically either way.
    pub(crate) fn check_stmt_with_returns(&mut self, stmt: NodeId, expected_return: Option<TypeId>, collected: &mut Vec<TypeId>, arena: &NodeArena) {
        self.check_any_stmt(stmt, expected_return, collected, arena);
    }

    pub(crate) fn check_plain_stmt(&mut self, stmt: NodeId, expected_return: Option<TypeId>, collected: &mut Vec<TypeId>, arena: &NodeArena) {
        match arena.kind(stmt).clone() {
            NodeKind::VariableDecl { pattern, is_var, type_ann, init, is_exported } => {
                self.check_variable_decl(stmt, pattern, is_var, type_ann, init, is_exported, arena);
            }
            NodeKind::Block { statements } => {
                self.push_scope(ScopeKind::Block);
                self.check_block_body(&statements, expected_return, collected, arena);
                self.pop_scope();
            }
            NodeKind::If { cond, then_branch, else_branch } => {
                let cond_ty = self.check_expr(cond, arena);
                if !zena_types::is_assignable(&self.shared.interner, cond_ty, TypeId::BOOL) {
                    self.diagnostics.error(codes::TYPE_MISMATCH, "'if' condition must be a bool", arena.span(cond));
                }
                self.check_any_stmt(then_branch, expected_return, collected, arena);
                if let Some(else_branch) = else_branch {
                    self.check_any_stmt(else_branch, expected_return, collected, arena);
                }
            }
            NodeKind::While { cond, body } => {
                let cond_ty = self.check_expr(cond, arena);
                if !zena_types::is_assignable(&self.shared.interner, cond_ty, TypeId::BOOL) {
                    self.diagnostics.error(codes::TYPE_MISMATCH, "'while' condition must be a bool", arena.span(cond));
                }
                self.loop_depth += 1;
                self.check_any_stmt(body, expected_return, collected, arena);
                self.loop_depth -= 1;
            }
            NodeKind::For { init, cond, update, body } => {
                self.push_scope(ScopeKind::Block);
                if let Some(init) = init {
                    self.check_any_stmt(init, expected_return, collected, arena);
                }
                if let Some(cond) = cond {
                    let cond_ty = self.check_expr(cond, arena);
                    if !zena_types::is_assignable(&self.shared.interner, cond_ty, TypeId::BOOL) {
                        self.diagnostics.error(codes::TYPE_MISMATCH, "'for' condition must be a bool", arena.span(cond));
                    }
                }
                if let Some(update) = update {
                    self.check_expr(update, arena);
                }
                self.loop_depth += 1;
                self.check_any_stmt(body, expected_return, collected, arena);
                self.loop_depth -= 1;
                self.pop_scope();
            }
            NodeKind::Return { value } => {
                if self.function_depth == 0 {
                    self.diagnostics.error(codes::RETURN_OUTSIDE_FUNCTION, "'return' used outside a function", arena.span(stmt));
                }
                let ty = value.map(|v| self.check_expr(v, arena)).unwrap_or(TypeId::VOID);
                if let Some(expected) = expected_return {
                    if !zena_types::is_assignable(&self.shared.interner, ty, expected) {
                        self.diagnostics.error(codes::TYPE_MISMATCH, "returned value is not assignable to the function's return type", arena.span(stmt));
                    }
                }
                collected.push(ty);
            }
            NodeKind::Break => {
                if self.loop_depth == 0 {
                    self.diagnostics.error(codes::BREAK_OUTSIDE_LOOP, "'break' used outside a loop", arena.span(stmt));
                }
            }
            NodeKind::Continue => {
                if self.loop_depth == 0 {
                    self.diagnostics.error(codes::CONTINUE_OUTSIDE_LOOP, "'continue' used outside a loop", arena.span(stmt));
                }
            }
            NodeKind::Throw { value } => {
                self.check_expr(value, arena);
            }
            NodeKind::Try { block, catch_param, catch_body, finally_body } => {
                self.push_scope(ScopeKind::Block);
                self.check_any_stmt(block, expected_return, collected, arena);
                self.pop_scope();
                if let Some(catch_body) = catch_body {
                    self.push_scope(ScopeKind::Block);
                    if let Some(catch_param) = catch_param {
                        if let NodeKind::Param { pattern, type_ann, .. } = arena.kind(catch_param).clone() {
                            let ty = type_ann.map(|t| self.resolve_type_ann(t, arena)).unwrap_or(TypeId::ANY);
                            self.bind_pattern(pattern, ty, BindingKind::ValueLet, arena);
                        }
                    }
                    self.check_any_stmt(catch_body, expected_return, collected, arena);
                    self.pop_scope();
                }
                if let Some(finally_body) = finally_body {
                    self.check_any_stmt(finally_body, expected_return, collected, arena);
                }
            }
            NodeKind::ExprStmt { expr } => {
                self.check_expr(expr, arena);
            }
            _ => {}
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn check_variable_decl(
        &mut self,
        stmt: NodeId,
        pattern: NodeId,
        is_var: bool,
        type_ann: Option<NodeId>,
        init: Option<NodeId>,
        is_exported: bool,
        arena: &NodeArena,
    ) {
        let declared = type_ann.map(|t| self.resolve_type_ann(t, arena));
        let init_ty = init.map(|i| self.check_expr(i, arena));
        if let (Some(declared), Some(init_ty)) = (declared, init_ty) {
            if !zena_types::is_assignable(&self.shared.interner, init_ty, declared) {
                self.diagnostics.error(codes::TYPE_MISMATCH, "initializer is not assignable to the declared type", arena.span(stmt));
            }
        }
        let ty = declared.or(init_ty).unwrap_or(TypeId::ANY);
        let kind = if is_var { BindingKind::ValueVar } else { BindingKind::ValueLet };
        self.bind_pattern(pattern, ty, kind, arena);

        // A module-level export binds by its own identifier only — a
        // destructuring pattern has no single name to re-export under, and
        // the bundler (not the checker) is where that surfaces as
        // `TopLevelDestructuringUnsupported` once it tries to rename the
        // export across module boundaries.
        if is_exported {
            if let NodeKind::IdentPattern(name) = arena.kind(pattern) {
                if let Some((binding, _)) = self.resolve(*name) {
                    self.export(*name, binding);
                }
            }
        }
    }

    /// Checks a block's statements in order, emitting a single
    /// `UNREACHABLE_CODE` warning the first time a statement follows one
    /// that always exits (`return`/`break`/`continue`/`throw`, or an `if`
    /// whose every branch always exits).
    pub(crate) fn check_block_body(&mut self, statements: &zena_ast::NodeList, expected_return: Option<TypeId>, collected: &mut Vec<TypeId>, arena: &NodeArena) {
        let mut exited = false;
        let mut warned = false;
        for &stmt in statements {
            if exited && !warned {
                self.diagnostics.warning(codes::UNREACHABLE_CODE, "unreachable code", arena.span(stmt));
                warned = true;
            }
            self.check_any_stmt(stmt, expected_return, collected, arena);
            if self.stmt_always_exits(stmt, arena) {
                exited = true;
            }
        }
    }

    fn stmt_always_exits(&self, stmt: NodeId, arena: &NodeArena) -> bool {
        match arena.kind(stmt) {
            NodeKind::Return { .. } | NodeKind::Break | NodeKind::Continue | NodeKind::Throw { .. } => true,
            NodeKind::If { then_branch, else_branch: Some(else_branch), .. } => {
                self.stmt_always_exits(*then_branch, arena) && self.stmt_always_exits(*else_branch, arena)
            }
            NodeKind::Block { statements } => statements.last().is_some_and(|&last| self.stmt_always_exits(last, arena)),
            _ => false,
        }
    }
}
