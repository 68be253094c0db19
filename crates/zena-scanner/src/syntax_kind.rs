//! `SyntaxKind` — every kind of token the lexer can produce.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // ── Sentinels ──────────────────────────────────────────────────
    Eof,
    Unknown,

    // ── Literals ───────────────────────────────────────────────────
    NumericLiteral,
    StringLiteral,
    /// A complete backtick-template with no `${...}` substitutions.
    NoSubstitutionTemplate,
    /// `` `head${ `` — the part before the first substitution.
    TemplateHead,
    /// `` }middle${ `` — a part between two substitutions.
    TemplateMiddle,
    /// `` }tail` `` — the part after the last substitution.
    TemplateTail,

    // ── Identifiers ────────────────────────────────────────────────
    Identifier,
    /// The `_` hole pattern/literal.
    Hole,

    // ── Keywords ───────────────────────────────────────────────────
    LetKw,
    VarKw,
    FunctionKw,
    ClassKw,
    InterfaceKw,
    MixinKw,
    ExtendsKw,
    ImplementsKw,
    WithKw,
    OnKw,
    SymbolKw,
    DeclareKw,
    ExportKw,
    FinalKw,
    AbstractKw,
    ExtensionKw,
    NewKw,
    ThisKw,
    SuperKw,
    IfKw,
    ElseKw,
    WhileKw,
    ForKw,
    ReturnKw,
    BreakKw,
    ContinueKw,
    ThrowKw,
    TryKw,
    CatchKw,
    FinallyKw,
    MatchKw,
    TrueKw,
    FalseKw,
    NullKw,
    AsKw,
    GetKw,
    SetKw,
    VoidKw,
    IsKw,
    TypeKw,
    ImportKw,
    FromKw,
    StaticKw,

    // ── Punctuation / operators ───────────────────────────────────
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Semicolon,
    Comma,
    Dot,
    DotDotDot,
    Colon,
    Question,
    QuestionDot,
    Arrow,
    Hash,
    At,

    Eq,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,
    Caret,
    Tilde,
    Shl,
    Shr,
    Ushr,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
}

impl SyntaxKind {
    pub fn keyword_from_str(s: &str) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        Some(match s {
            "let" => LetKw,
            "var" => VarKw,
            "function" => FunctionKw,
            "class" => ClassKw,
            "interface" => InterfaceKw,
            "mixin" => MixinKw,
            "extends" => ExtendsKw,
            "implements" => ImplementsKw,
            "with" => WithKw,
            "on" => OnKw,
            "symbol" => SymbolKw,
            "declare" => DeclareKw,
            "export" => ExportKw,
            "final" => FinalKw,
            "abstract" => AbstractKw,
            "extension" => ExtensionKw,
            "new" => NewKw,
            "this" => ThisKw,
            "super" => SuperKw,
            "if" => IfKw,
            "else" => ElseKw,
            "while" => WhileKw,
            "for" => ForKw,
            "return" => ReturnKw,
            "break" => BreakKw,
            "continue" => ContinueKw,
            "throw" => ThrowKw,
            "try" => TryKw,
            "catch" => CatchKw,
            "finally" => FinallyKw,
            "match" => MatchKw,
            "true" => TrueKw,
            "false" => FalseKw,
            "null" => NullKw,
            "as" => AsKw,
            "get" => GetKw,
            "set" => SetKw,
            "void" => VoidKw,
            "is" => IsKw,
            "type" => TypeKw,
            "import" => ImportKw,
            "from" => FromKw,
            "static" => StaticKw,
            _ => return None,
        })
    }

    pub fn is_keyword(self) -> bool {
        (SyntaxKind::LetKw as u16..=SyntaxKind::StaticKw as u16).contains(&(self as u16))
    }
}
