//! The structural deep-clone-and-rename pass.
//!
//! One [`NodeKind`] arm per variant, mirroring [`zena_ast::Node::children`]
//! rather than a dynamic walk (same rationale as that function: the
//! compiler proves no kind is missed). Every name a node introduces is
//! classified once, here, as exactly one of:
//!
//! - a top-level declaration's own name — looked up in the global symbol
//!   map and replaced with its `m<k>_`-prefixed unique name;
//! - a local binding (function/method param, `let`, `catch` param, a
//!   match arm's pattern, a type parameter) — left as written, but pushed
//!   onto a scope stack so later identifier references resolve to it
//!   instead of being mistaken for a same-named top-level export;
//! - a reference (an `Identifier` expression, a `NamedType`'s name, a
//!   `ClassPattern`'s `class_name`) — resolved against the scope stack,
//!   then the module's import map, then the global symbol map, in that
//!   order;
//! - a pure label (a `Member`/`ClassPatternField`'s field name, a record
//!   key, a decorator's own name) — copied through untouched.

use rustc_hash::{FxHashMap, FxHashSet};
use zena_ast::{NodeArena, NodeId, NodeKind, NodeList, RecordKey};
use zena_common::Atom;

use crate::collect::GlobalSymbols;

pub(crate) struct RewriteCtx<'a> {
    pub module_path: &'a str,
    pub is_entry: bool,
    pub global_symbols: &'a GlobalSymbols,
    pub import_map: FxHashMap<Atom, Atom>,
    pub exports: FxHashMap<Atom, Atom>,
    scopes: Vec<FxHashSet<Atom>>,
}

impl<'a> RewriteCtx<'a> {
    pub fn new(module_path: &'a str, is_entry: bool, global_symbols: &'a GlobalSymbols, import_map: FxHashMap<Atom, Atom>) -> Self {
        RewriteCtx { module_path, is_entry, global_symbols, import_map, exports: FxHashMap::default(), scopes: Vec::new() }
    }

    fn push_scope(&mut self) {
        self.scopes.push(FxHashSet::default());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn bind_local(&mut self, name: Atom) {
        self.scopes.last_mut().expect("a local binding is only ever produced inside a pushed scope").insert(name);
    }

    /// Scope stack → import map → global symbol map → unchanged.
    fn resolve_ident(&self, name: Atom) -> Atom {
        for scope in self.scopes.iter().rev() {
            if scope.contains(&name) {
                return name;
            }
        }
        if let Some(&renamed) = self.import_map.get(&name) {
            return renamed;
        }
        if let Some(&renamed) = self.global_symbols.get(&(self.module_path.to_string(), name)) {
            return renamed;
        }
        name
    }

    fn record_export(&mut self, original: Atom, renamed: Atom, is_exported: bool) {
        if is_exported && self.is_entry {
            self.exports.insert(original, renamed);
        }
    }
}

fn rewrite_list(ctx: &mut RewriteCtx, old_arena: &NodeArena, list: &NodeList, new_arena: &mut NodeArena) -> NodeList {
    list.iter().map(|&id| rewrite_node(ctx, old_arena, id, new_arena, false)).collect()
}

/// Top-level entry: `stmt` must be one of the declaration kinds `collect`
/// recognizes (a top-level `let`/`var` is guaranteed to bind a single
/// identifier — destructuring ones were filtered out by the caller).
pub(crate) fn rewrite_top_level(ctx: &mut RewriteCtx, old_arena: &NodeArena, stmt: NodeId, new_arena: &mut NodeArena) -> NodeId {
    rewrite_node(ctx, old_arena, stmt, new_arena, true)
}

#[allow(clippy::too_many_lines)]
fn rewrite_node(ctx: &mut RewriteCtx, old_arena: &NodeArena, id: NodeId, new_arena: &mut NodeArena, at_top_level: bool) -> NodeId {
    let span = old_arena.span(id);
    match old_arena.kind(id).clone() {
        NodeKind::Program { .. } => unreachable!("Program is only ever a module root, never a rewritten node"),

        NodeKind::VariableDecl { pattern, is_var, type_ann, init, is_exported } => {
            let type_ann = type_ann.map(|t| rewrite_node(ctx, old_arena, t, new_arena, false));
            let init = init.map(|i| rewrite_node(ctx, old_arena, i, new_arena, false));
            let pattern = if at_top_level {
                let NodeKind::IdentPattern(name) = *old_arena.kind(pattern) else {
                    unreachable!("top-level destructuring is rejected before the rewrite pass runs");
                };
                let renamed = ctx.resolve_ident(name);
                ctx.record_export(name, renamed, is_exported);
                new_arena.alloc(NodeKind::IdentPattern(renamed), old_arena.span(pattern))
            } else {
                rewrite_pattern(ctx, old_arena, pattern, new_arena)
            };
            new_arena.alloc(NodeKind::VariableDecl { pattern, is_var, type_ann, init, is_exported }, span)
        }
        NodeKind::FunctionDecl { name, type_params, params, return_type, body, is_body_block, decorators, is_exported } => {
            let renamed = ctx.resolve_ident(name);
            ctx.push_scope();
            let type_params = rewrite_list(ctx, old_arena, &type_params, new_arena);
            let params = rewrite_list(ctx, old_arena, &params, new_arena);
            let return_type = return_type.map(|r| rewrite_node(ctx, old_arena, r, new_arena, false));
            let body = body.map(|b| rewrite_node(ctx, old_arena, b, new_arena, false));
            ctx.pop_scope();
            let decorators = rewrite_list(ctx, old_arena, &decorators, new_arena);
            ctx.record_export(name, renamed, is_exported);
            new_arena.alloc(
                NodeKind::FunctionDecl { name: renamed, type_params, params, return_type, body, is_body_block, decorators, is_exported },
                span,
            )
        }
        NodeKind::DeclareFunctionDecl { name, type_params, params, return_type, decorators, is_exported } => {
            let renamed = ctx.resolve_ident(name);
            ctx.push_scope();
            let type_params = rewrite_list(ctx, old_arena, &type_params, new_arena);
            let params = rewrite_list(ctx, old_arena, &params, new_arena);
            let return_type = return_type.map(|r| rewrite_node(ctx, old_arena, r, new_arena, false));
            ctx.pop_scope();
            let decorators = rewrite_list(ctx, old_arena, &decorators, new_arena);
            ctx.record_export(name, renamed, is_exported);
            new_arena.alloc(NodeKind::DeclareFunctionDecl { name: renamed, type_params, params, return_type, decorators, is_exported }, span)
        }
        NodeKind::ClassDecl { name, type_params, superclass, implements, mixins, members, is_final, is_abstract, is_extension, on_type, is_exported } => {
            let renamed = ctx.resolve_ident(name);
            ctx.push_scope();
            let type_params = rewrite_list(ctx, old_arena, &type_params, new_arena);
            let superclass = superclass.map(|s| rewrite_node(ctx, old_arena, s, new_arena, false));
            let implements = rewrite_list(ctx, old_arena, &implements, new_arena);
            let mixins = rewrite_list(ctx, old_arena, &mixins, new_arena);
            let on_type = on_type.map(|t| rewrite_node(ctx, old_arena, t, new_arena, false));
            let members = members.iter().map(|&m| rewrite_class_member(ctx, old_arena, m, new_arena)).collect();
            ctx.pop_scope();
            ctx.record_export(name, renamed, is_exported);
            new_arena.alloc(
                NodeKind::ClassDecl {
                    name: renamed,
                    type_params,
                    superclass,
                    implements,
                    mixins,
                    members,
                    is_final,
                    is_abstract,
                    is_extension,
                    on_type,
                    is_exported,
                },
                span,
            )
        }
        NodeKind::InterfaceDecl { name, type_params, extends, members, is_exported } => {
            let renamed = ctx.resolve_ident(name);
            ctx.push_scope();
            let type_params = rewrite_list(ctx, old_arena, &type_params, new_arena);
            let extends = rewrite_list(ctx, old_arena, &extends, new_arena);
            let members = members.iter().map(|&m| rewrite_class_member(ctx, old_arena, m, new_arena)).collect();
            ctx.pop_scope();
            ctx.record_export(name, renamed, is_exported);
            new_arena.alloc(NodeKind::InterfaceDecl { name: renamed, type_params, extends, members, is_exported }, span)
        }
        NodeKind::MixinDecl { name, type_params, on_constraint, members, is_exported } => {
            let renamed = ctx.resolve_ident(name);
            ctx.push_scope();
            let type_params = rewrite_list(ctx, old_arena, &type_params, new_arena);
            let on_constraint = on_constraint.map(|t| rewrite_node(ctx, old_arena, t, new_arena, false));
            let members = members.iter().map(|&m| rewrite_class_member(ctx, old_arena, m, new_arena)).collect();
            ctx.pop_scope();
            ctx.record_export(name, renamed, is_exported);
            new_arena.alloc(NodeKind::MixinDecl { name: renamed, type_params, on_constraint, members, is_exported }, span)
        }
        NodeKind::TypeAliasDecl { name, type_params, type_ann, is_exported } => {
            let renamed = ctx.resolve_ident(name);
            ctx.push_scope();
            let type_params = rewrite_list(ctx, old_arena, &type_params, new_arena);
            let type_ann = rewrite_node(ctx, old_arena, type_ann, new_arena, false);
            ctx.pop_scope();
            ctx.record_export(name, renamed, is_exported);
            new_arena.alloc(NodeKind::TypeAliasDecl { name: renamed, type_params, type_ann, is_exported }, span)
        }
        NodeKind::SymbolDecl { name, is_exported } => {
            let renamed = ctx.resolve_ident(name);
            ctx.record_export(name, renamed, is_exported);
            new_arena.alloc(NodeKind::SymbolDecl { name: renamed, is_exported }, span)
        }
        NodeKind::ImportDecl { .. } | NodeKind::ImportSpecifier { .. } => {
            unreachable!("import declarations are dropped by the caller before the rewrite pass runs")
        }

        NodeKind::Param { pattern, type_ann, default, is_rest } => {
            let type_ann = type_ann.map(|t| rewrite_node(ctx, old_arena, t, new_arena, false));
            let default = default.map(|d| rewrite_node(ctx, old_arena, d, new_arena, false));
            let pattern = rewrite_pattern(ctx, old_arena, pattern, new_arena);
            new_arena.alloc(NodeKind::Param { pattern, type_ann, default, is_rest }, span)
        }
        NodeKind::TypeParamDecl { name, constraint, default } => {
            let constraint = constraint.map(|c| rewrite_node(ctx, old_arena, c, new_arena, false));
            let default = default.map(|d| rewrite_node(ctx, old_arena, d, new_arena, false));
            ctx.bind_local(name);
            new_arena.alloc(NodeKind::TypeParamDecl { name, constraint, default }, span)
        }
        NodeKind::Decorator { name, args } => {
            let args = rewrite_list(ctx, old_arena, &args, new_arena);
            new_arena.alloc(NodeKind::Decorator { name, args }, span)
        }

        NodeKind::Block { statements } => {
            ctx.push_scope();
            let statements = rewrite_list(ctx, old_arena, &statements, new_arena);
            ctx.pop_scope();
            new_arena.alloc(NodeKind::Block { statements }, span)
        }
        NodeKind::If { cond, then_branch, else_branch } => {
            let cond = rewrite_node(ctx, old_arena, cond, new_arena, false);
            let then_branch = rewrite_node(ctx, old_arena, then_branch, new_arena, false);
            let else_branch = else_branch.map(|e| rewrite_node(ctx, old_arena, e, new_arena, false));
            new_arena.alloc(NodeKind::If { cond, then_branch, else_branch }, span)
        }
        NodeKind::While { cond, body } => {
            let cond = rewrite_node(ctx, old_arena, cond, new_arena, false);
            let body = rewrite_node(ctx, old_arena, body, new_arena, false);
            new_arena.alloc(NodeKind::While { cond, body }, span)
        }
        NodeKind::For { init, cond, update, body } => {
            ctx.push_scope();
            let init = init.map(|i| rewrite_node(ctx, old_arena, i, new_arena, false));
            let cond = cond.map(|c| rewrite_node(ctx, old_arena, c, new_arena, false));
            let update = update.map(|u| rewrite_node(ctx, old_arena, u, new_arena, false));
            let body = rewrite_node(ctx, old_arena, body, new_arena, false);
            ctx.pop_scope();
            new_arena.alloc(NodeKind::For { init, cond, update, body }, span)
        }
        NodeKind::Return { value } => {
            let value = value.map(|v| rewrite_node(ctx, old_arena, v, new_arena, false));
            new_arena.alloc(NodeKind::Return { value }, span)
        }
        NodeKind::Break => new_arena.alloc(NodeKind::Break, span),
        NodeKind::Continue => new_arena.alloc(NodeKind::Continue, span),
        NodeKind::Throw { value } => {
            let value = rewrite_node(ctx, old_arena, value, new_arena, false);
            new_arena.alloc(NodeKind::Throw { value }, span)
        }
        NodeKind::Try { block, catch_param, catch_body, finally_body } => {
            let block = rewrite_node(ctx, old_arena, block, new_arena, false);
            let (catch_param, catch_body) = if let Some(catch_body) = catch_body {
                ctx.push_scope();
                let catch_param = catch_param.map(|p| rewrite_node(ctx, old_arena, p, new_arena, false));
                let catch_body = Some(rewrite_node(ctx, old_arena, catch_body, new_arena, false));
                ctx.pop_scope();
                (catch_param, catch_body)
            } else {
                (None, None)
            };
            let finally_body = finally_body.map(|f| rewrite_node(ctx, old_arena, f, new_arena, false));
            new_arena.alloc(NodeKind::Try { block, catch_param, catch_body, finally_body }, span)
        }
        NodeKind::ExprStmt { expr } => {
            let expr = rewrite_node(ctx, old_arena, expr, new_arena, false);
            new_arena.alloc(NodeKind::ExprStmt { expr }, span)
        }

        NodeKind::NumberLit(n) => new_arena.alloc(NodeKind::NumberLit(n), span),
        NodeKind::StringLit(s) => new_arena.alloc(NodeKind::StringLit(s), span),
        NodeKind::BoolLit(b) => new_arena.alloc(NodeKind::BoolLit(b), span),
        NodeKind::NullLit => new_arena.alloc(NodeKind::NullLit, span),
        NodeKind::Identifier(name) => new_arena.alloc(NodeKind::Identifier(ctx.resolve_ident(name)), span),
        NodeKind::ThisExpr => new_arena.alloc(NodeKind::ThisExpr, span),
        NodeKind::SuperExpr => new_arena.alloc(NodeKind::SuperExpr, span),
        NodeKind::Binary { op, left, right } => {
            let left = rewrite_node(ctx, old_arena, left, new_arena, false);
            let right = rewrite_node(ctx, old_arena, right, new_arena, false);
            new_arena.alloc(NodeKind::Binary { op, left, right }, span)
        }
        NodeKind::Unary { op, operand } => {
            let operand = rewrite_node(ctx, old_arena, operand, new_arena, false);
            new_arena.alloc(NodeKind::Unary { op, operand }, span)
        }
        NodeKind::Assign { op, target, value } => {
            let target = rewrite_node(ctx, old_arena, target, new_arena, false);
            let value = rewrite_node(ctx, old_arena, value, new_arena, false);
            new_arena.alloc(NodeKind::Assign { op, target, value }, span)
        }
        NodeKind::Call { callee, type_args, args } => {
            let callee = rewrite_node(ctx, old_arena, callee, new_arena, false);
            let type_args = rewrite_list(ctx, old_arena, &type_args, new_arena);
            let args = rewrite_list(ctx, old_arena, &args, new_arena);
            new_arena.alloc(NodeKind::Call { callee, type_args, args }, span)
        }
        NodeKind::New { callee, type_args, args } => {
            let callee = rewrite_node(ctx, old_arena, callee, new_arena, false);
            let type_args = rewrite_list(ctx, old_arena, &type_args, new_arena);
            let args = rewrite_list(ctx, old_arena, &args, new_arena);
            new_arena.alloc(NodeKind::New { callee, type_args, args }, span)
        }
        NodeKind::Member { object, name, is_optional, is_private } => {
            let object = rewrite_node(ctx, old_arena, object, new_arena, false);
            new_arena.alloc(NodeKind::Member { object, name, is_optional, is_private }, span)
        }
        NodeKind::Index { object, index, is_optional } => {
            let object = rewrite_node(ctx, old_arena, object, new_arena, false);
            let index = rewrite_node(ctx, old_arena, index, new_arena, false);
            new_arena.alloc(NodeKind::Index { object, index, is_optional }, span)
        }
        NodeKind::FunctionExpr { type_params, params, return_type, body, is_body_block } => {
            ctx.push_scope();
            let type_params = rewrite_list(ctx, old_arena, &type_params, new_arena);
            let params = rewrite_list(ctx, old_arena, &params, new_arena);
            let return_type = return_type.map(|r| rewrite_node(ctx, old_arena, r, new_arena, false));
            let body = rewrite_node(ctx, old_arena, body, new_arena, false);
            ctx.pop_scope();
            new_arena.alloc(NodeKind::FunctionExpr { type_params, params, return_type, body, is_body_block }, span)
        }
        NodeKind::Match { scrutinee, arms } => {
            let scrutinee = rewrite_node(ctx, old_arena, scrutinee, new_arena, false);
            let arms = rewrite_list(ctx, old_arena, &arms, new_arena);
            new_arena.alloc(NodeKind::Match { scrutinee, arms }, span)
        }
        NodeKind::MatchArm { pattern, guard, body } => {
            ctx.push_scope();
            let pattern = rewrite_pattern(ctx, old_arena, pattern, new_arena);
            let guard = guard.map(|g| rewrite_node(ctx, old_arena, g, new_arena, false));
            let body = rewrite_node(ctx, old_arena, body, new_arena, false);
            ctx.pop_scope();
            new_arena.alloc(NodeKind::MatchArm { pattern, guard, body }, span)
        }
        NodeKind::TemplateLiteral { quasis, substitutions } => {
            let substitutions = rewrite_list(ctx, old_arena, &substitutions, new_arena);
            new_arena.alloc(NodeKind::TemplateLiteral { quasis, substitutions }, span)
        }
        NodeKind::TaggedTemplate { tag, template } => {
            let tag = rewrite_node(ctx, old_arena, tag, new_arena, false);
            let template = rewrite_node(ctx, old_arena, template, new_arena, false);
            new_arena.alloc(NodeKind::TaggedTemplate { tag, template }, span)
        }
        NodeKind::Cast { expr, type_ann } => {
            let expr = rewrite_node(ctx, old_arena, expr, new_arena, false);
            let type_ann = rewrite_node(ctx, old_arena, type_ann, new_arena, false);
            new_arena.alloc(NodeKind::Cast { expr, type_ann }, span)
        }
        NodeKind::IsCheck { expr, type_ann } => {
            let expr = rewrite_node(ctx, old_arena, expr, new_arena, false);
            let type_ann = rewrite_node(ctx, old_arena, type_ann, new_arena, false);
            new_arena.alloc(NodeKind::IsCheck { expr, type_ann }, span)
        }
        NodeKind::RecordLit { fields } => {
            let fields = rewrite_list(ctx, old_arena, &fields, new_arena);
            new_arena.alloc(NodeKind::RecordLit { fields }, span)
        }
        NodeKind::RecordField { key, value, is_spread } => {
            let key = match key {
                RecordKey::Named(n) => RecordKey::Named(n),
                RecordKey::Computed(e) => RecordKey::Computed(rewrite_node(ctx, old_arena, e, new_arena, false)),
            };
            let value = match value {
                Some(v) => Some(rewrite_node(ctx, old_arena, v, new_arena, false)),
                // `{ x }` is shorthand for `{ x: x }` — expand it so the
                // implied reference still gets rewritten once `x`'s
                // declaration may have been renamed.
                None => match key {
                    RecordKey::Named(n) => Some(new_arena.alloc(NodeKind::Identifier(ctx.resolve_ident(n)), span)),
                    RecordKey::Computed(_) => None,
                },
            };
            new_arena.alloc(NodeKind::RecordField { key, value, is_spread }, span)
        }
        NodeKind::TupleLit { elements } => {
            let elements = rewrite_list(ctx, old_arena, &elements, new_arena);
            new_arena.alloc(NodeKind::TupleLit { elements }, span)
        }
        NodeKind::UnboxedTupleLit { elements } => {
            let elements = rewrite_list(ctx, old_arena, &elements, new_arena);
            new_arena.alloc(NodeKind::UnboxedTupleLit { elements }, span)
        }
        NodeKind::HoleExpr => new_arena.alloc(NodeKind::HoleExpr, span),

        NodeKind::IdentPattern(_)
        | NodeKind::WildcardPattern
        | NodeKind::LiteralPattern(_)
        | NodeKind::RecordPattern { .. }
        | NodeKind::RecordPatternField { .. }
        | NodeKind::TuplePattern { .. }
        | NodeKind::UnboxedTuplePattern { .. }
        | NodeKind::ClassPattern { .. }
        | NodeKind::ClassPatternField { .. }
        | NodeKind::AsPattern { .. } => unreachable!("patterns are rewritten via rewrite_pattern, never dispatched here"),

        NodeKind::NamedType { name, type_args } => {
            let name = ctx.resolve_ident(name);
            let type_args = rewrite_list(ctx, old_arena, &type_args, new_arena);
            new_arena.alloc(NodeKind::NamedType { name, type_args }, span)
        }
        NodeKind::PrimitiveType(k) => new_arena.alloc(NodeKind::PrimitiveType(k), span),
        NodeKind::UnionType { members } => {
            let members = rewrite_list(ctx, old_arena, &members, new_arena);
            new_arena.alloc(NodeKind::UnionType { members }, span)
        }
        NodeKind::RecordType { fields } => {
            let fields = rewrite_list(ctx, old_arena, &fields, new_arena);
            new_arena.alloc(NodeKind::RecordType { fields }, span)
        }
        NodeKind::RecordTypeField { name, type_ann, optional } => {
            let type_ann = rewrite_node(ctx, old_arena, type_ann, new_arena, false);
            new_arena.alloc(NodeKind::RecordTypeField { name, type_ann, optional }, span)
        }
        NodeKind::TupleType { elements } => {
            let elements = rewrite_list(ctx, old_arena, &elements, new_arena);
            new_arena.alloc(NodeKind::TupleType { elements }, span)
        }
        NodeKind::UnboxedTupleType { elements } => {
            let elements = rewrite_list(ctx, old_arena, &elements, new_arena);
            new_arena.alloc(NodeKind::UnboxedTupleType { elements }, span)
        }
        NodeKind::FunctionType { type_params, params, return_type } => {
            ctx.push_scope();
            let type_params = rewrite_list(ctx, old_arena, &type_params, new_arena);
            let params = rewrite_list(ctx, old_arena, &params, new_arena);
            let return_type = rewrite_node(ctx, old_arena, return_type, new_arena, false);
            ctx.pop_scope();
            new_arena.alloc(NodeKind::FunctionType { type_params, params, return_type }, span)
        }
        NodeKind::ThisType => new_arena.alloc(NodeKind::ThisType, span),
        NodeKind::ArrayType { element } => {
            let element = rewrite_node(ctx, old_arena, element, new_arena, false);
            new_arena.alloc(NodeKind::ArrayType { element }, span)
        }

        NodeKind::FieldMember { .. } | NodeKind::MethodMember { .. } | NodeKind::AccessorMember { .. } => {
            unreachable!("class/interface/mixin members are rewritten via rewrite_class_member, never dispatched here")
        }
    }
}

/// Clones a pattern structurally. A pattern never renames the names it
/// introduces — they're local bindings — but each one is pushed onto the
/// current scope so later identifier references resolve to it rather
/// than falling through to a same-named top-level export.
fn rewrite_pattern(ctx: &mut RewriteCtx, old_arena: &NodeArena, id: NodeId, new_arena: &mut NodeArena) -> NodeId {
    let span = old_arena.span(id);
    match old_arena.kind(id).clone() {
        NodeKind::IdentPattern(name) => {
            ctx.bind_local(name);
            new_arena.alloc(NodeKind::IdentPattern(name), span)
        }
        NodeKind::WildcardPattern => new_arena.alloc(NodeKind::WildcardPattern, span),
        NodeKind::LiteralPattern(lit) => {
            let lit = rewrite_node(ctx, old_arena, lit, new_arena, false);
            new_arena.alloc(NodeKind::LiteralPattern(lit), span)
        }
        NodeKind::RecordPattern { fields, has_rest } => {
            let fields = fields.iter().map(|&f| rewrite_record_pattern_field(ctx, old_arena, f, new_arena)).collect();
            new_arena.alloc(NodeKind::RecordPattern { fields, has_rest }, span)
        }
        NodeKind::TuplePattern { elements } => {
            let elements = elements.iter().map(|&e| rewrite_pattern(ctx, old_arena, e, new_arena)).collect();
            new_arena.alloc(NodeKind::TuplePattern { elements }, span)
        }
        NodeKind::UnboxedTuplePattern { elements } => {
            let elements = elements.iter().map(|&e| rewrite_pattern(ctx, old_arena, e, new_arena)).collect();
            new_arena.alloc(NodeKind::UnboxedTuplePattern { elements }, span)
        }
        NodeKind::ClassPattern { class_name, fields } => {
            let class_name = ctx.resolve_ident(class_name);
            let fields: NodeList = fields.iter().map(|&f| rewrite_class_pattern_field(ctx, old_arena, f, new_arena)).collect();
            new_arena.alloc(NodeKind::ClassPattern { class_name, fields }, span)
        }
        NodeKind::AsPattern { pattern, name } => {
            let pattern = rewrite_pattern(ctx, old_arena, pattern, new_arena);
            ctx.bind_local(name);
            new_arena.alloc(NodeKind::AsPattern { pattern, name }, span)
        }
        _ => unreachable!("not a pattern node"),
    }
}

fn rewrite_record_pattern_field(ctx: &mut RewriteCtx, old_arena: &NodeArena, id: NodeId, new_arena: &mut NodeArena) -> NodeId {
    let span = old_arena.span(id);
    let NodeKind::RecordPatternField { key, pattern, default } = old_arena.kind(id).clone() else {
        unreachable!("not a record pattern field")
    };
    let default = default.map(|d| rewrite_node(ctx, old_arena, d, new_arena, false));
    let pattern = match pattern {
        Some(p) => Some(rewrite_pattern(ctx, old_arena, p, new_arena)),
        None => {
            // `{ key }` shorthand — `key` itself is the bound local.
            ctx.bind_local(key);
            None
        }
    };
    new_arena.alloc(NodeKind::RecordPatternField { key, pattern, default }, span)
}

fn rewrite_class_pattern_field(ctx: &mut RewriteCtx, old_arena: &NodeArena, id: NodeId, new_arena: &mut NodeArena) -> NodeId {
    let span = old_arena.span(id);
    let NodeKind::ClassPatternField { field, local } = old_arena.kind(id).clone() else {
        unreachable!("not a class pattern field")
    };
    ctx.bind_local(local);
    new_arena.alloc(NodeKind::ClassPatternField { field, local }, span)
}

fn rewrite_class_member(ctx: &mut RewriteCtx, old_arena: &NodeArena, id: NodeId, new_arena: &mut NodeArena) -> NodeId {
    let span = old_arena.span(id);
    match old_arena.kind(id).clone() {
        NodeKind::FieldMember { name, type_ann, init, is_static, is_private } => {
            let type_ann = type_ann.map(|t| rewrite_node(ctx, old_arena, t, new_arena, false));
            let init = init.map(|i| rewrite_node(ctx, old_arena, i, new_arena, false));
            new_arena.alloc(NodeKind::FieldMember { name, type_ann, init, is_static, is_private }, span)
        }
        NodeKind::MethodMember { name, type_params, params, return_type, body, is_static, is_private, is_constructor, is_abstract } => {
            ctx.push_scope();
            let type_params = rewrite_list(ctx, old_arena, &type_params, new_arena);
            let params = rewrite_list(ctx, old_arena, &params, new_arena);
            let return_type = return_type.map(|r| rewrite_node(ctx, old_arena, r, new_arena, false));
            let body = body.map(|b| rewrite_node(ctx, old_arena, b, new_arena, false));
            ctx.pop_scope();
            new_arena.alloc(
                NodeKind::MethodMember { name, type_params, params, return_type, body, is_static, is_private, is_constructor, is_abstract },
                span,
            )
        }
        NodeKind::AccessorMember { name, type_ann, getter_body, setter_param, setter_body, is_static, is_final } => {
            let type_ann = type_ann.map(|t| rewrite_node(ctx, old_arena, t, new_arena, false));
            ctx.push_scope();
            let getter_body = getter_body.map(|b| rewrite_node(ctx, old_arena, b, new_arena, false));
            ctx.pop_scope();
            ctx.push_scope();
            let setter_param = setter_param.map(|p| rewrite_node(ctx, old_arena, p, new_arena, false));
            let setter_body = setter_body.map(|b| rewrite_node(ctx, old_arena, b, new_arena, false));
            ctx.pop_scope();
            new_arena.alloc(NodeKind::AccessorMember { name, type_ann, getter_body, setter_param, setter_body, is_static, is_final }, span)
        }
        _ => unreachable!("not a class/interface/mixin member node"),
    }
}

