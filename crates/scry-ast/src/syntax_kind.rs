//! Closed set of node kinds the engine distinguishes.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Program,
    VariableDeclaration,
    FunctionDeclaration,
    ClassDeclaration,
    ReturnStatement,
    BlockStatement,
    ExpressionStatement,
    IfStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    WhileStatement,
    DoWhileStatement,
    TryStatement,
    SwitchStatement,
    ThrowStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    EmptyStatement,
    DebuggerStatement,
    Identifier,
    Literal,
    TemplateLiteral,
    TemplateElement,
    ArrayExpression,
    ObjectExpression,
    Property,
    FunctionExpression,
    ArrowFunction,
    ClassExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    BinaryExpression,
    LogicalExpression,
    UnaryExpression,
    UpdateExpression,
    AssignmentExpression,
    ConditionalExpression,
    SequenceExpression,
    AwaitExpression,
    YieldExpression,
    SpreadElement,
    ChainExpression,
    ThisExpression,
    Super,
    MethodDefinition,
    PropertyDefinition,
    ObjectPattern,
    ArrayPattern,
    AssignmentPattern,
    RestElement,
    Unknown,
}

impl SyntaxKind {
    /// Nodes that introduce their own function body (and their own `return` target).
    pub const fn is_function_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::FunctionDeclaration
                | SyntaxKind::FunctionExpression
                | SyntaxKind::ArrowFunction
                | SyntaxKind::MethodDefinition
        )
    }

    pub const fn is_class_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassDeclaration | SyntaxKind::ClassExpression
        )
    }

    /// Statements whose bodies may contain `return` statements of the
    /// enclosing function.
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::VariableDeclaration
                | SyntaxKind::FunctionDeclaration
                | SyntaxKind::ClassDeclaration
                | SyntaxKind::ReturnStatement
                | SyntaxKind::BlockStatement
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForInStatement
                | SyntaxKind::ForOfStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::DoWhileStatement
                | SyntaxKind::TryStatement
                | SyntaxKind::SwitchStatement
                | SyntaxKind::ThrowStatement
                | SyntaxKind::LabeledStatement
                | SyntaxKind::BreakStatement
                | SyntaxKind::ContinueStatement
                | SyntaxKind::EmptyStatement
                | SyntaxKind::DebuggerStatement
        )
    }

    pub const fn is_pattern(self) -> bool {
        matches!(
            self,
            SyntaxKind::Identifier
                | SyntaxKind::ObjectPattern
                | SyntaxKind::ArrayPattern
                | SyntaxKind::AssignmentPattern
                | SyntaxKind::RestElement
        )
    }
}
