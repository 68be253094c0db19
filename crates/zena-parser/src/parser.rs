//! The `Parser` struct: token cursor, arena, diagnostics, and the small
//! set of primitives every parsing function (`decl`, `stmt`, `expr`,
//! `pattern`, `type_ann`) builds on.
//!
//! The parser never throws on malformed input: on a syntax error it
//! records a diagnostic and recovers by skipping to the next statement
//! boundary, then continues parsing the rest of the module.

use zena_ast::{Node, NodeArena, NodeId, NodeKind};
use zena_common::diagnostics::codes;
use zena_common::{Atom, DiagnosticBag, Interner, Span};
use zena_scanner::{Lexer, SyntaxKind, Token};

pub struct Parser<'a, 'src> {
    pub(crate) src: &'src str,
    lexer: Lexer<'src>,
    pub(crate) current: Token,
    pub(crate) arena: NodeArena,
    pub(crate) diagnostics: DiagnosticBag,
    pub(crate) interner: &'a mut Interner,
    depth: usize,
}

impl<'a, 'src> Parser<'a, 'src> {
    pub fn new(src: &'src str, interner: &'a mut Interner) -> Self {
        let mut lexer = Lexer::new(src);
        let current = lexer.next_token();
        Parser {
            src,
            lexer,
            current,
            arena: NodeArena::new(),
            diagnostics: DiagnosticBag::new(),
            interner,
            depth: 0,
        }
    }

    // ── Token cursor primitives ────────────────────────────────────

    pub(crate) fn kind(&self) -> SyntaxKind {
        self.current.kind
    }

    pub(crate) fn span(&self) -> Span {
        self.current.span
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.at(SyntaxKind::Eof)
    }

    pub(crate) fn text(&self, span: Span) -> &'src str {
        span.slice(self.src)
    }

    pub(crate) fn current_text(&self) -> &'src str {
        self.text(self.current.span)
    }

    /// Replace `current` with the next token from the lexer, returning the
    /// token that was current before the bump.
    pub(crate) fn bump(&mut self) -> Token {
        let prev = self.current.clone();
        self.current = self.lexer.next_token();
        prev
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `current` if it matches `kind`; otherwise record
    /// `ExpectedToken` and leave the cursor where it is (so the caller's
    /// recovery logic, not this one, decides how far to skip).
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            let found = self.current_text();
            self.diagnostics.error(
                codes::EXPECTED_TOKEN,
                format!("'{kind:?}' expected, found '{found}'"),
                self.span(),
            );
            None
        }
    }

    pub(crate) fn error_unexpected(&mut self) {
        let found = self.current_text();
        self.diagnostics.error(
            codes::UNEXPECTED_TOKEN,
            format!("Unexpected token '{found}'"),
            self.span(),
        );
    }

    /// Recovery: skip tokens until a statement boundary (`;`, the start of
    /// a new declaration, or a closing brace) is reached. Consumes a
    /// trailing `;` if present.
    pub(crate) fn recover_to_statement_boundary(&mut self) {
        while !self.at_eof() && !self.at(SyntaxKind::Semicolon) && !self.at(SyntaxKind::CloseBrace) && !self.starts_declaration() {
            self.bump();
        }
        self.eat(SyntaxKind::Semicolon);
    }

    pub(crate) fn starts_declaration(&self) -> bool {
        matches!(
            self.kind(),
            SyntaxKind::LetKw
                | SyntaxKind::VarKw
                | SyntaxKind::FunctionKw
                | SyntaxKind::ClassKw
                | SyntaxKind::InterfaceKw
                | SyntaxKind::MixinKw
                | SyntaxKind::TypeKw
                | SyntaxKind::SymbolKw
                | SyntaxKind::DeclareKw
                | SyntaxKind::ExportKw
                | SyntaxKind::ImportKw
                | SyntaxKind::At
        )
    }

    pub(crate) fn intern(&mut self, s: &str) -> Atom {
        self.interner.intern(s)
    }

    pub(crate) fn intern_current(&mut self) -> Atom {
        let text = self.current_text().to_string();
        self.interner.intern(&text)
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.arena.alloc(kind, span)
    }

    /// Guards against pathological input recursing the parser stack past
    /// `MAX_EXPRESSION_DEPTH` — once hit, the remaining expression is
    /// abandoned via `UnexpectedToken` rather than overflowing.
    pub(crate) fn enter_expr(&mut self) -> bool {
        self.depth += 1;
        if self.depth > zena_common::limits::MAX_EXPRESSION_DEPTH {
            self.depth -= 1;
            self.error_unexpected();
            false
        } else {
            true
        }
    }

    pub(crate) fn exit_expr(&mut self) {
        self.depth -= 1;
    }

    /// Look at the token that follows `current`, without disturbing the
    /// main lexer's position. Cloning `Lexer` is a cheap `Copy` (a slice
    /// plus a `u32` cursor), so this just replays one `next_token` call on
    /// a throwaway copy.
    pub(crate) fn peek_next_kind(&self) -> SyntaxKind {
        let mut lookahead = self.lexer;
        lookahead.next_token().kind
    }

    /// Hand out a throwaway copy of the lexer positioned exactly where the
    /// main lexer is, for speculative multi-token scans (e.g. arrow-vs-
    /// grouping disambiguation) that must not disturb `current`/`lexer`.
    pub(crate) fn fork_lexer(&self) -> Lexer<'src> {
        self.lexer
    }

    /// Re-enter the lexer at the `}` that closes a `${...}` substitution,
    /// continuing to scan the next template part (`TemplateMiddle` or
    /// `TemplateTail`). Replaces `current` with that part and returns its
    /// cooked/raw text plus whether it was the tail.
    pub(crate) fn rescan_template_continuation(&mut self, brace_start: u32) -> (String, String, bool) {
        let token = self.lexer.rescan_template_part(brace_start);
        let is_tail = token.kind == SyntaxKind::TemplateTail;
        let (cooked, raw) = match &token.value {
            zena_scanner::TokenValue::Template { cooked, raw } => (cooked.clone(), raw.clone()),
            _ => (String::new(), String::new()),
        };
        self.current = token;
        (cooked, raw, is_tail)
    }

    /// Parse an identifier token into an `Identifier`/name `Atom`,
    /// recording `UnexpectedToken` and synthesizing an empty name if the
    /// current token isn't one.
    pub(crate) fn expect_identifier_name(&mut self) -> Atom {
        if self.at(SyntaxKind::Identifier) {
            let atom = self.intern_current();
            self.bump();
            atom
        } else {
            self.error_unexpected();
            self.intern("<error>")
        }
    }
}

/// Parse a single module's source text into a `Program` AST.
///
/// Given source text and a module path (used only to label diagnostics),
/// produce an AST plus the parser's diagnostics. Never panics on
/// malformed input.
pub fn parse_module(src: &str, interner: &mut Interner) -> (NodeArena, NodeId, DiagnosticBag) {
    let _span = tracing::debug_span!("parse_module").entered();
    let mut parser = Parser::new(src, interner);
    let program = crate::decl::parse_program(&mut parser);
    (parser.arena, program, parser.diagnostics)
}

pub(crate) fn node_span(node: &Node) -> Span {
    node.span
}
