//! `Node` / `NodeKind` — the AST's tagged-variant representation.
//!
//! Every node kind the language's grammar needs has a variant here. The
//! AST is immutable once parsed: rather than mutating an `inferredType`
//! field on the node, that and resolved bindings live in side-tables
//! keyed by `NodeId` (see `zena-checker::context`). A declaration's
//! `exported`/`exportName` pair is likewise kept off the node, in an
//! export table the bundler owns (see DESIGN.md).

use crate::node_id::{NodeId, NodeList};
use crate::operators::{AssignOp, BinaryOp, UnaryOp};
use smallvec::smallvec;
use zena_common::{Atom, Span};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKey {
    Named(Atom),
    Computed(NodeId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TemplateQuasi {
    pub cooked: String,
    pub raw: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Void,
    Never,
    Null,
    Any,
}

impl PrimitiveKind {
    pub fn from_name(name: &str) -> Option<PrimitiveKind> {
        Some(match name {
            "i32" => PrimitiveKind::I32,
            "i64" => PrimitiveKind::I64,
            "u32" => PrimitiveKind::U32,
            "u64" => PrimitiveKind::U64,
            "f32" => PrimitiveKind::F32,
            "f64" => PrimitiveKind::F64,
            "bool" => PrimitiveKind::Bool,
            "void" => PrimitiveKind::Void,
            "never" => PrimitiveKind::Never,
            "null" => PrimitiveKind::Null,
            "any" => PrimitiveKind::Any,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    // ── Program ────────────────────────────────────────────────────
    Program { statements: NodeList },

    // ── Declarations ───────────────────────────────────────────────
    VariableDecl {
        pattern: NodeId,
        is_var: bool,
        type_ann: Option<NodeId>,
        init: Option<NodeId>,
        is_exported: bool,
    },
    FunctionDecl {
        name: Atom,
        type_params: NodeList,
        params: NodeList,
        return_type: Option<NodeId>,
        body: Option<NodeId>,
        is_body_block: bool,
        decorators: NodeList,
        is_exported: bool,
    },
    ClassDecl {
        name: Atom,
        type_params: NodeList,
        superclass: Option<NodeId>,
        implements: NodeList,
        mixins: NodeList,
        members: NodeList,
        is_final: bool,
        is_abstract: bool,
        is_extension: bool,
        on_type: Option<NodeId>,
        is_exported: bool,
    },
    InterfaceDecl {
        name: Atom,
        type_params: NodeList,
        extends: NodeList,
        members: NodeList,
        is_exported: bool,
    },
    MixinDecl {
        name: Atom,
        type_params: NodeList,
        on_constraint: Option<NodeId>,
        members: NodeList,
        is_exported: bool,
    },
    TypeAliasDecl {
        name: Atom,
        type_params: NodeList,
        type_ann: NodeId,
        is_exported: bool,
    },
    SymbolDecl {
        name: Atom,
        is_exported: bool,
    },
    DeclareFunctionDecl {
        name: Atom,
        type_params: NodeList,
        params: NodeList,
        return_type: Option<NodeId>,
        decorators: NodeList,
        is_exported: bool,
    },
    ImportDecl {
        specifier: Atom,
        clauses: NodeList,
    },
    ImportSpecifier {
        imported: Atom,
        local: Atom,
    },

    // ── Class members ──────────────────────────────────────────────
    FieldMember {
        name: Atom,
        type_ann: Option<NodeId>,
        init: Option<NodeId>,
        is_static: bool,
        is_private: bool,
    },
    MethodMember {
        name: Atom,
        type_params: NodeList,
        params: NodeList,
        return_type: Option<NodeId>,
        body: Option<NodeId>,
        is_static: bool,
        is_private: bool,
        is_constructor: bool,
        is_abstract: bool,
    },
    AccessorMember {
        name: Atom,
        type_ann: Option<NodeId>,
        getter_body: Option<NodeId>,
        setter_param: Option<NodeId>,
        setter_body: Option<NodeId>,
        is_static: bool,
        is_final: bool,
    },

    Param {
        pattern: NodeId,
        type_ann: Option<NodeId>,
        default: Option<NodeId>,
        is_rest: bool,
    },
    TypeParamDecl {
        name: Atom,
        constraint: Option<NodeId>,
        default: Option<NodeId>,
    },
    Decorator {
        name: Atom,
        args: NodeList,
    },

    // ── Statements ─────────────────────────────────────────────────
    Block {
        statements: NodeList,
    },
    If {
        cond: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    While {
        cond: NodeId,
        body: NodeId,
    },
    For {
        init: Option<NodeId>,
        cond: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    Return {
        value: Option<NodeId>,
    },
    Break,
    Continue,
    Throw {
        value: NodeId,
    },
    Try {
        block: NodeId,
        catch_param: Option<NodeId>,
        catch_body: Option<NodeId>,
        finally_body: Option<NodeId>,
    },
    ExprStmt {
        expr: NodeId,
    },

    // ── Expressions ────────────────────────────────────────────────
    NumberLit(f64),
    StringLit(Atom),
    BoolLit(bool),
    NullLit,
    Identifier(Atom),
    ThisExpr,
    SuperExpr,
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Assign {
        op: AssignOp,
        target: NodeId,
        value: NodeId,
    },
    Call {
        callee: NodeId,
        type_args: NodeList,
        args: NodeList,
    },
    New {
        callee: NodeId,
        type_args: NodeList,
        args: NodeList,
    },
    Member {
        object: NodeId,
        name: Atom,
        is_optional: bool,
        is_private: bool,
    },
    Index {
        object: NodeId,
        index: NodeId,
        is_optional: bool,
    },
    FunctionExpr {
        type_params: NodeList,
        params: NodeList,
        return_type: Option<NodeId>,
        body: NodeId,
        is_body_block: bool,
    },
    Match {
        scrutinee: NodeId,
        arms: NodeList,
    },
    MatchArm {
        pattern: NodeId,
        guard: Option<NodeId>,
        body: NodeId,
    },
    TemplateLiteral {
        quasis: Vec<TemplateQuasi>,
        substitutions: NodeList,
    },
    TaggedTemplate {
        tag: NodeId,
        template: NodeId,
    },
    Cast {
        expr: NodeId,
        type_ann: NodeId,
    },
    IsCheck {
        expr: NodeId,
        type_ann: NodeId,
    },
    RecordLit {
        fields: NodeList,
    },
    RecordField {
        key: RecordKey,
        value: Option<NodeId>,
        is_spread: bool,
    },
    TupleLit {
        elements: NodeList,
    },
    UnboxedTupleLit {
        elements: NodeList,
    },
    HoleExpr,

    // ── Patterns ───────────────────────────────────────────────────
    IdentPattern(Atom),
    WildcardPattern,
    LiteralPattern(NodeId),
    RecordPattern {
        fields: NodeList,
        has_rest: bool,
    },
    RecordPatternField {
        key: Atom,
        pattern: Option<NodeId>,
        default: Option<NodeId>,
    },
    TuplePattern {
        elements: NodeList,
    },
    UnboxedTuplePattern {
        elements: NodeList,
    },
    ClassPattern {
        class_name: Atom,
        fields: NodeList,
    },
    ClassPatternField {
        field: Atom,
        local: Atom,
    },
    AsPattern {
        pattern: NodeId,
        name: Atom,
    },

    // ── Type annotations ───────────────────────────────────────────
    NamedType {
        name: Atom,
        type_args: NodeList,
    },
    PrimitiveType(PrimitiveKind),
    UnionType {
        members: NodeList,
    },
    RecordType {
        fields: NodeList,
    },
    RecordTypeField {
        name: Atom,
        type_ann: NodeId,
        optional: bool,
    },
    TupleType {
        elements: NodeList,
    },
    UnboxedTupleType {
        elements: NodeList,
    },
    FunctionType {
        type_params: NodeList,
        params: NodeList,
        return_type: NodeId,
    },
    ThisType,
    ArrayType {
        element: NodeId,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }

    /// The node's direct children, for generic tree walks (capture
    /// analysis, the bundler's rename-and-clone pass). An exhaustive match
    /// rather than a dynamic field walk, so the compiler proves every kind
    /// is handled.
    pub fn children(&self) -> NodeList {
        use NodeKind::*;
        match &self.kind {
            Program { statements } => statements.clone(),
            VariableDecl { pattern, type_ann, init, .. } => {
                let mut c: NodeList = smallvec![*pattern];
                c.extend(type_ann.iter().copied());
                c.extend(init.iter().copied());
                c
            }
            FunctionDecl { type_params, params, return_type, body, decorators, .. } => {
                let mut c = type_params.clone();
                c.extend(params.iter().copied());
                c.extend(return_type.iter().copied());
                c.extend(body.iter().copied());
                c.extend(decorators.iter().copied());
                c
            }
            ClassDecl { type_params, superclass, implements, mixins, members, on_type, .. } => {
                let mut c = type_params.clone();
                c.extend(superclass.iter().copied());
                c.extend(implements.iter().copied());
                c.extend(mixins.iter().copied());
                c.extend(members.iter().copied());
                c.extend(on_type.iter().copied());
                c
            }
            InterfaceDecl { type_params, extends, members, .. } => {
                let mut c = type_params.clone();
                c.extend(extends.iter().copied());
                c.extend(members.iter().copied());
                c
            }
            MixinDecl { type_params, on_constraint, members, .. } => {
                let mut c = type_params.clone();
                c.extend(on_constraint.iter().copied());
                c.extend(members.iter().copied());
                c
            }
            TypeAliasDecl { type_params, type_ann, .. } => {
                let mut c = type_params.clone();
                c.push(*type_ann);
                c
            }
            SymbolDecl { .. } => smallvec![],
            DeclareFunctionDecl { type_params, params, return_type, decorators, .. } => {
                let mut c = type_params.clone();
                c.extend(params.iter().copied());
                c.extend(return_type.iter().copied());
                c.extend(decorators.iter().copied());
                c
            }
            ImportDecl { clauses, .. } => clauses.clone(),
            ImportSpecifier { .. } => smallvec![],

            FieldMember { type_ann, init, .. } => {
                let mut c: NodeList = smallvec![];
                c.extend(type_ann.iter().copied());
                c.extend(init.iter().copied());
                c
            }
            MethodMember { type_params, params, return_type, body, .. } => {
                let mut c = type_params.clone();
                c.extend(params.iter().copied());
                c.extend(return_type.iter().copied());
                c.extend(body.iter().copied());
                c
            }
            AccessorMember { type_ann, getter_body, setter_param, setter_body, .. } => {
                let mut c: NodeList = smallvec![];
                c.extend(type_ann.iter().copied());
                c.extend(getter_body.iter().copied());
                c.extend(setter_param.iter().copied());
                c.extend(setter_body.iter().copied());
                c
            }
            Param { pattern, type_ann, default, .. } => {
                let mut c: NodeList = smallvec![*pattern];
                c.extend(type_ann.iter().copied());
                c.extend(default.iter().copied());
                c
            }
            TypeParamDecl { constraint, default, .. } => {
                let mut c: NodeList = smallvec![];
                c.extend(constraint.iter().copied());
                c.extend(default.iter().copied());
                c
            }
            Decorator { args, .. } => args.clone(),

            Block { statements } => statements.clone(),
            If { cond, then_branch, else_branch } => {
                let mut c: NodeList = smallvec![*cond, *then_branch];
                c.extend(else_branch.iter().copied());
                c
            }
            While { cond, body } => smallvec![*cond, *body],
            For { init, cond, update, body } => {
                let mut c: NodeList = smallvec![];
                c.extend(init.iter().copied());
                c.extend(cond.iter().copied());
                c.extend(update.iter().copied());
                c.push(*body);
                c
            }
            Return { value } => value.iter().copied().collect(),
            Break | Continue => smallvec![],
            Throw { value } => smallvec![*value],
            Try { block, catch_param, catch_body, finally_body } => {
                let mut c: NodeList = smallvec![*block];
                c.extend(catch_param.iter().copied());
                c.extend(catch_body.iter().copied());
                c.extend(finally_body.iter().copied());
                c
            }
            ExprStmt { expr } => smallvec![*expr],

            NumberLit(_) | StringLit(_) | BoolLit(_) | NullLit => smallvec![],
            Identifier(_) | ThisExpr | SuperExpr => smallvec![],
            Binary { left, right, .. } => smallvec![*left, *right],
            Unary { operand, .. } => smallvec![*operand],
            Assign { target, value, .. } => smallvec![*target, *value],
            Call { callee, type_args, args } => {
                let mut c: NodeList = smallvec![*callee];
                c.extend(type_args.iter().copied());
                c.extend(args.iter().copied());
                c
            }
            New { callee, type_args, args } => {
                let mut c: NodeList = smallvec![*callee];
                c.extend(type_args.iter().copied());
                c.extend(args.iter().copied());
                c
            }
            Member { object, .. } => smallvec![*object],
            Index { object, index, .. } => smallvec![*object, *index],
            FunctionExpr { type_params, params, return_type, body, .. } => {
                let mut c = type_params.clone();
                c.extend(params.iter().copied());
                c.extend(return_type.iter().copied());
                c.push(*body);
                c
            }
            Match { scrutinee, arms } => {
                let mut c: NodeList = smallvec![*scrutinee];
                c.extend(arms.iter().copied());
                c
            }
            MatchArm { pattern, guard, body } => {
                let mut c: NodeList = smallvec![*pattern];
                c.extend(guard.iter().copied());
                c.push(*body);
                c
            }
            TemplateLiteral { substitutions, .. } => substitutions.clone(),
            TaggedTemplate { tag, template } => smallvec![*tag, *template],
            Cast { expr, type_ann } => smallvec![*expr, *type_ann],
            IsCheck { expr, type_ann } => smallvec![*expr, *type_ann],
            RecordLit { fields } => fields.clone(),
            RecordField { key, value, .. } => {
                let mut c: NodeList = smallvec![];
                if let RecordKey::Computed(id) = key {
                    c.push(*id);
                }
                c.extend(value.iter().copied());
                c
            }
            TupleLit { elements } | UnboxedTupleLit { elements } => elements.clone(),
            HoleExpr => smallvec![],

            IdentPattern(_) | WildcardPattern => smallvec![],
            LiteralPattern(lit) => smallvec![*lit],
            RecordPattern { fields, .. } => fields.clone(),
            RecordPatternField { pattern, default, .. } => {
                let mut c: NodeList = smallvec![];
                c.extend(pattern.iter().copied());
                c.extend(default.iter().copied());
                c
            }
            TuplePattern { elements } | UnboxedTuplePattern { elements } => elements.clone(),
            ClassPattern { fields, .. } => fields.clone(),
            ClassPatternField { .. } => smallvec![],
            AsPattern { pattern, .. } => smallvec![*pattern],

            NamedType { type_args, .. } => type_args.clone(),
            PrimitiveType(_) | ThisType => smallvec![],
            UnionType { members } => members.clone(),
            RecordType { fields } => fields.clone(),
            RecordTypeField { type_ann, .. } => smallvec![*type_ann],
            TupleType { elements } | UnboxedTupleType { elements } => elements.clone(),
            FunctionType { type_params, params, return_type } => {
                let mut c = type_params.clone();
                c.extend(params.iter().copied());
                c.push(*return_type);
                c
            }
            ArrayType { element } => smallvec![*element],
        }
    }
}
