//! AST node definitions.
//!
//! Every node is a tagged variant (a `kind` enum plus the span it was parsed
//! from); there are no back-references or cycles, so the tree is owned by
//! value end to end, rooted at [`Program`].

use homescript_util::span::Span;
use homescript_util::symbol::Symbol;

// ---------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

impl Type {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeKind {
    /// A named or built-in type: `null`, `int`, `float`, `bool`, `str`,
    /// `range`, or a user-defined name. `_` also parses to this variant.
    NameReference(Symbol),
    /// A `$`-prefixed singleton type name.
    SingletonReference(Symbol),
    List(Box<Type>),
    Option(Box<Type>),
    Object(ObjectType),
    Function(Vec<Type>, Box<Type>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectType {
    /// `{ ? }` — an object of unknown shape.
    Any,
    Fields(Vec<ObjectTypeField>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeField {
    pub name: Symbol,
    pub ty: Type,
}

// ---------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// `true` for the with-block expression class (block, if, match, try):
    /// a following statement terminator is optional after one of these.
    pub fn is_with_block(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Block(_) | ExprKind::If(_) | ExprKind::Match(_) | ExprKind::Try(_)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Ident(IdentExpr),
    Null,
    None_,
    Range(RangeExpr),
    List(Vec<Expr>),
    Object(ObjectExpr),
    FunctionLiteral(FunctionLiteral),
    Grouped(Box<Expr>),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    Assign(AssignExpr),
    Call(CallExpr),
    Index(IndexExpr),
    Member(MemberExpr),
    Cast(CastExpr),
    Block(Block),
    If(IfExpr),
    Match(MatchExpr),
    Try(TryExpr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct IdentExpr {
    pub name: Symbol,
    pub is_singleton: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RangeExpr {
    pub start: Box<Expr>,
    pub end: Box<Expr>,
    pub inclusive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectExpr {
    /// `new { ? }` — an any-typed object literal.
    Any,
    Fields(Vec<(Symbol, Expr)>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Symbol,
    pub ty: Option<Type>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: Block,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefixOp {
    Neg,
    Not,
    /// `?`, the error-propagation prefix operator.
    Try,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrefixExpr {
    pub op: PrefixOp,
    pub operand: Box<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Shl,
    Shr,
    BitOr,
    BitAnd,
    BitXor,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfixExpr {
    pub op: InfixOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    PowAssign,
    ShlAssign,
    ShrAssign,
    OrAssign,
    AndAssign,
    XorAssign,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignExpr {
    pub op: AssignOp,
    pub target: Box<Expr>,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub is_spawn: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IndexExpr {
    pub base: Box<Expr>,
    pub index: Box<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberOp {
    Dot,
    Arrow,
    TildeArrow,
}

/// `a.b.c` parses right-associatively as `a.(b.c)`: `member` is itself an
/// identifier expression, or — when the chain continues — a nested
/// [`ExprKind::Member`] holding the rest of the chain.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberExpr {
    pub base: Box<Expr>,
    pub member: Box<Expr>,
    pub op: MemberOp,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CastExpr {
    pub base: Box<Expr>,
    pub ty: Type,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub trailing: Option<Box<Expr>>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfExpr {
    pub cond: Box<Expr>,
    pub then_block: Block,
    /// `else { .. }` is `Some(Block(..))`; `else if .. { .. }` is wrapped in
    /// an implicit block whose trailing expression is the inner `If`, per
    /// the nested-else-if rule.
    pub else_branch: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    Default,
    Literal(PatternLiteral),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternLiteral {
    pub prefix: Option<PrefixOp>,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchArm {
    pub patterns: Vec<Pattern>,
    pub body: Box<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchExpr {
    pub subject: Box<Expr>,
    pub arms: Vec<MatchArm>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TryExpr {
    pub try_block: Block,
    pub catch_name: Option<Symbol>,
    pub catch_block: Block,
}

// ---------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Let(LetStmt),
    Return(Option<Expr>),
    Break,
    Continue,
    Loop(Block),
    While(WhileStmt),
    For(ForStmt),
    TypeDefinition(TypeDefinition),
    ExpressionStatement(Expr),
    Trigger(TriggerStmt),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LetStmt {
    pub name: Symbol,
    pub ty: Option<Type>,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForStmt {
    pub binding: Symbol,
    pub iterable: Expr,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeDefinition {
    pub name: Symbol,
    pub ty: Type,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerConnective {
    On,
    At,
    In,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TriggerStmt {
    pub fn_ident: Symbol,
    pub connective: TriggerConnective,
    pub source_ident: Symbol,
    pub args: Vec<Expr>,
}

// ---------------------------------------------------------------------
// Top-level items
// ---------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportKind {
    Type,
    Templ,
    Trigger,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportSpec {
    pub kind: Option<ImportKind>,
    pub name: Symbol,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportItem {
    pub items: Vec<ImportSpec>,
    pub from: Symbol,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FnModifier {
    None,
    Pub,
    Event,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationItem {
    Ident(Symbol),
    Trigger(AnnotationTrigger),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationTrigger {
    pub connective: TriggerConnective,
    pub source_ident: Symbol,
    pub args: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDefinition {
    pub modifier: FnModifier,
    pub name: Symbol,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: Block,
    pub annotations: Vec<AnnotationItem>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SingletonTypeDefinition {
    pub name: Symbol,
    pub ty: Type,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImplBlock {
    pub template: Option<Symbol>,
    pub capabilities: Vec<Symbol>,
    pub singleton: Symbol,
    pub methods: Vec<FunctionDefinition>,
    pub span: Span,
}

/// The parsed output of a single source file.
///
/// Each category preserves source order within itself, per the ordering
/// invariant; there is no single interleaved top-level item list because
/// the categories are consumed independently downstream (module resolution
/// needs `imports`, type checking needs `types`/`globals`, and so on).
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub imports: Vec<ImportItem>,
    pub singletons: Vec<SingletonTypeDefinition>,
    pub impl_blocks: Vec<ImplBlock>,
    pub types: Vec<TypeDefinition>,
    pub globals: Vec<LetStmt>,
    pub functions: Vec<FunctionDefinition>,
    pub filename: Symbol,
}

impl Program {
    pub fn new(filename: Symbol) -> Self {
        Self {
            imports: Vec::new(),
            singletons: Vec::new(),
            impl_blocks: Vec::new(),
            types: Vec::new(),
            globals: Vec::new(),
            functions: Vec::new(),
            filename,
        }
    }
}
