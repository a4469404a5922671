//! ESTree node definitions.
//!
//! Every node carries `start`/`end` byte offsets. Field names follow the
//! ESTree JSON shape (camelCase), so acorn output deserializes directly.

use crate::syntax_kind::SyntaxKind;
use scry_common::TextRange;
use serde::Deserialize;
use serde::de::IgnoredAny;

/// A syntax tree node, tagged by its ESTree `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Program(Program),

    // Declarations and statements
    VariableDeclaration(VariableDeclaration),
    FunctionDeclaration(Function),
    ClassDeclaration(Class),
    ReturnStatement(ReturnStatement),
    BlockStatement(BlockStatement),
    ExpressionStatement(ExpressionStatement),
    IfStatement(IfStatement),
    ForStatement(ForStatement),
    ForInStatement(ForEachStatement),
    ForOfStatement(ForEachStatement),
    WhileStatement(WhileStatement),
    DoWhileStatement(WhileStatement),
    TryStatement(TryStatement),
    SwitchStatement(SwitchStatement),
    ThrowStatement(ThrowStatement),
    LabeledStatement(LabeledStatement),
    BreakStatement(Marker),
    ContinueStatement(Marker),
    EmptyStatement(Marker),
    DebuggerStatement(Marker),

    // Expressions
    Identifier(Identifier),
    Literal(Literal),
    TemplateLiteral(TemplateLiteral),
    TemplateElement(Marker),
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    Property(Property),
    FunctionExpression(Function),
    ArrowFunctionExpression(Function),
    ClassExpression(Class),
    CallExpression(CallExpression),
    NewExpression(CallExpression),
    MemberExpression(MemberExpression),
    BinaryExpression(BinaryExpression),
    LogicalExpression(BinaryExpression),
    UnaryExpression(UnaryExpression),
    UpdateExpression(UnaryExpression),
    AssignmentExpression(AssignmentExpression),
    ConditionalExpression(ConditionalExpression),
    SequenceExpression(SequenceExpression),
    AwaitExpression(AwaitExpression),
    YieldExpression(YieldExpression),
    SpreadElement(SpreadElement),
    ChainExpression(ChainExpression),
    ThisExpression(Marker),
    Super(Marker),

    // Class members
    MethodDefinition(MethodDefinition),
    PropertyDefinition(PropertyDefinition),

    // Patterns
    ObjectPattern(ObjectPattern),
    ArrayPattern(ArrayPattern),
    AssignmentPattern(AssignmentPattern),
    RestElement(SpreadElement),

    /// Any node type the engine does not model.
    #[serde(other)]
    Unknown,
}

/// Span-only payload for nodes without children.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Marker {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub body: Vec<Node>,
    #[serde(default)]
    pub source_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableDeclaration {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub kind: VariableKind,
    #[serde(default)]
    pub declarations: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableDeclarator {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub id: Box<Node>,
    #[serde(default)]
    pub init: Option<Box<Node>>,
}

/// Function declarations, function expressions and arrow functions.
#[derive(Debug, Clone, Deserialize)]
pub struct Function {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default)]
    pub params: Vec<Node>,
    pub body: Box<Node>,
    /// Set by ESTree for arrow functions with an expression body.
    #[serde(default)]
    pub expression: bool,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    #[serde(default, rename = "generator")]
    pub is_generator: bool,
}

impl Function {
    /// True when the body is an expression rather than a block.
    pub fn has_expression_body(&self) -> bool {
        self.expression || !matches!(*self.body, Node::BlockStatement(_))
    }

    pub fn name(&self) -> Option<&str> {
        self.id.as_ref().map(|id| id.name.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default)]
    pub super_class: Option<Box<Node>>,
    pub body: ClassBody,
}

impl Class {
    pub fn name(&self) -> Option<&str> {
        self.id.as_ref().map(|id| id.name.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassBody {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodDefinition {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub key: Box<Node>,
    /// Always a `FunctionExpression`.
    pub value: Box<Node>,
    pub kind: MethodKind,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub computed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDefinition {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub key: Box<Node>,
    #[serde(default)]
    pub value: Option<Box<Node>>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub computed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReturnStatement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub argument: Option<Box<Node>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockStatement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpressionStatement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub expression: Box<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IfStatement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    #[serde(default)]
    pub alternate: Option<Box<Node>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForStatement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub init: Option<Box<Node>>,
    #[serde(default)]
    pub test: Option<Box<Node>>,
    #[serde(default)]
    pub update: Option<Box<Node>>,
    pub body: Box<Node>,
}

/// `for (left in right)` and `for (left of right)`.
#[derive(Debug, Clone, Deserialize)]
pub struct ForEachStatement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhileStatement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub test: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TryStatement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub block: BlockStatement,
    #[serde(default)]
    pub handler: Option<CatchClause>,
    #[serde(default)]
    pub finalizer: Option<BlockStatement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatchClause {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub param: Option<Box<Node>>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwitchStatement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub discriminant: Box<Node>,
    #[serde(default)]
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwitchCase {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub test: Option<Box<Node>>,
    #[serde(default)]
    pub consequent: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThrowStatement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub argument: Box<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabeledStatement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub label: Identifier,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Identifier {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub name: String,
}

/// Literal payload as it appears in ESTree `value`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Boolean(bool),
    Number(f64),
    String(String),
    /// RegExp and BigInt literals carry a non-JSON `value`; see `regex`/`bigint`.
    Other(IgnoredAny),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Null,
    Boolean,
    Number,
    String,
    RegExp,
    BigInt,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegexLiteral {
    pub pattern: String,
    #[serde(default)]
    pub flags: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Literal {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub value: Option<LiteralValue>,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub regex: Option<RegexLiteral>,
    #[serde(default)]
    pub bigint: Option<String>,
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        if self.regex.is_some() {
            return LiteralKind::RegExp;
        }
        if self.bigint.is_some() {
            return LiteralKind::BigInt;
        }
        match &self.value {
            None => LiteralKind::Null,
            Some(LiteralValue::Boolean(_)) => LiteralKind::Boolean,
            Some(LiteralValue::Number(_)) => LiteralKind::Number,
            Some(LiteralValue::String(_)) => LiteralKind::String,
            Some(LiteralValue::Other(_)) => LiteralKind::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Some(LiteralValue::String(text)) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateLiteral {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub expressions: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArrayExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    /// Holes (`[1, , 2]`) are `None`.
    #[serde(default)]
    pub elements: Vec<Option<Node>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    /// `Property` or `SpreadElement` nodes.
    #[serde(default)]
    pub properties: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    #[default]
    Init,
    Get,
    Set,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub key: Box<Node>,
    pub value: Box<Node>,
    #[serde(default)]
    pub kind: PropertyKind,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub shorthand: bool,
    #[serde(default)]
    pub method: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub callee: Box<Node>,
    #[serde(default)]
    pub arguments: Vec<Node>,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub object: Box<Node>,
    pub property: Box<Node>,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub optional: bool,
}

impl MemberExpression {
    /// The property name for `obj.name` and `obj["name"]`.
    pub fn static_property_name(&self) -> Option<&str> {
        match (&*self.property, self.computed) {
            (Node::Identifier(ident), false) => Some(&ident.name),
            (Node::Literal(lit), true) => lit.as_str(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BinaryExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub operator: String,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

/// Unary (`!x`, `typeof x`) and update (`x++`) expressions.
#[derive(Debug, Clone, Deserialize)]
pub struct UnaryExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub operator: String,
    pub argument: Box<Node>,
    #[serde(default)]
    pub prefix: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub operator: String,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionalExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    pub alternate: Box<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SequenceExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub expressions: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AwaitExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub argument: Box<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YieldExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub argument: Option<Box<Node>>,
    #[serde(default)]
    pub delegate: bool,
}

/// `...argument` in calls, arrays and objects; also `RestElement` in patterns.
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadElement {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub argument: Box<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainExpression {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub expression: Box<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectPattern {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    /// `Property` or `RestElement` nodes.
    #[serde(default)]
    pub properties: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArrayPattern {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    #[serde(default)]
    pub elements: Vec<Option<Node>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentPattern {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub end: u32,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

impl Node {
    /// The closed syntax kind of this node.
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Node::Program(_) => SyntaxKind::Program,
            Node::VariableDeclaration(_) => SyntaxKind::VariableDeclaration,
            Node::FunctionDeclaration(_) => SyntaxKind::FunctionDeclaration,
            Node::ClassDeclaration(_) => SyntaxKind::ClassDeclaration,
            Node::ReturnStatement(_) => SyntaxKind::ReturnStatement,
            Node::BlockStatement(_) => SyntaxKind::BlockStatement,
            Node::ExpressionStatement(_) => SyntaxKind::ExpressionStatement,
            Node::IfStatement(_) => SyntaxKind::IfStatement,
            Node::ForStatement(_) => SyntaxKind::ForStatement,
            Node::ForInStatement(_) => SyntaxKind::ForInStatement,
            Node::ForOfStatement(_) => SyntaxKind::ForOfStatement,
            Node::WhileStatement(_) => SyntaxKind::WhileStatement,
            Node::DoWhileStatement(_) => SyntaxKind::DoWhileStatement,
            Node::TryStatement(_) => SyntaxKind::TryStatement,
            Node::SwitchStatement(_) => SyntaxKind::SwitchStatement,
            Node::ThrowStatement(_) => SyntaxKind::ThrowStatement,
            Node::LabeledStatement(_) => SyntaxKind::LabeledStatement,
            Node::BreakStatement(_) => SyntaxKind::BreakStatement,
            Node::ContinueStatement(_) => SyntaxKind::ContinueStatement,
            Node::EmptyStatement(_) => SyntaxKind::EmptyStatement,
            Node::DebuggerStatement(_) => SyntaxKind::DebuggerStatement,
            Node::Identifier(_) => SyntaxKind::Identifier,
            Node::Literal(_) => SyntaxKind::Literal,
            Node::TemplateLiteral(_) => SyntaxKind::TemplateLiteral,
            Node::TemplateElement(_) => SyntaxKind::TemplateElement,
            Node::ArrayExpression(_) => SyntaxKind::ArrayExpression,
            Node::ObjectExpression(_) => SyntaxKind::ObjectExpression,
            Node::Property(_) => SyntaxKind::Property,
            Node::FunctionExpression(_) => SyntaxKind::FunctionExpression,
            Node::ArrowFunctionExpression(_) => SyntaxKind::ArrowFunction,
            Node::ClassExpression(_) => SyntaxKind::ClassExpression,
            Node::CallExpression(_) => SyntaxKind::CallExpression,
            Node::NewExpression(_) => SyntaxKind::NewExpression,
            Node::MemberExpression(_) => SyntaxKind::MemberExpression,
            Node::BinaryExpression(_) => SyntaxKind::BinaryExpression,
            Node::LogicalExpression(_) => SyntaxKind::LogicalExpression,
            Node::UnaryExpression(_) => SyntaxKind::UnaryExpression,
            Node::UpdateExpression(_) => SyntaxKind::UpdateExpression,
            Node::AssignmentExpression(_) => SyntaxKind::AssignmentExpression,
            Node::ConditionalExpression(_) => SyntaxKind::ConditionalExpression,
            Node::SequenceExpression(_) => SyntaxKind::SequenceExpression,
            Node::AwaitExpression(_) => SyntaxKind::AwaitExpression,
            Node::YieldExpression(_) => SyntaxKind::YieldExpression,
            Node::SpreadElement(_) => SyntaxKind::SpreadElement,
            Node::ChainExpression(_) => SyntaxKind::ChainExpression,
            Node::ThisExpression(_) => SyntaxKind::ThisExpression,
            Node::Super(_) => SyntaxKind::Super,
            Node::MethodDefinition(_) => SyntaxKind::MethodDefinition,
            Node::PropertyDefinition(_) => SyntaxKind::PropertyDefinition,
            Node::ObjectPattern(_) => SyntaxKind::ObjectPattern,
            Node::ArrayPattern(_) => SyntaxKind::ArrayPattern,
            Node::AssignmentPattern(_) => SyntaxKind::AssignmentPattern,
            Node::RestElement(_) => SyntaxKind::RestElement,
            Node::Unknown => SyntaxKind::Unknown,
        }
    }

    /// Byte range of the node. `Unknown` nodes have an empty range at 0.
    pub fn range(&self) -> TextRange {
        let (start, end) = match self {
            Node::Program(n) => (n.start, n.end),
            Node::VariableDeclaration(n) => (n.start, n.end),
            Node::FunctionDeclaration(n)
            | Node::FunctionExpression(n)
            | Node::ArrowFunctionExpression(n) => (n.start, n.end),
            Node::ClassDeclaration(n) | Node::ClassExpression(n) => (n.start, n.end),
            Node::ReturnStatement(n) => (n.start, n.end),
            Node::BlockStatement(n) => (n.start, n.end),
            Node::ExpressionStatement(n) => (n.start, n.end),
            Node::IfStatement(n) => (n.start, n.end),
            Node::ForStatement(n) => (n.start, n.end),
            Node::ForInStatement(n) | Node::ForOfStatement(n) => (n.start, n.end),
            Node::WhileStatement(n) | Node::DoWhileStatement(n) => (n.start, n.end),
            Node::TryStatement(n) => (n.start, n.end),
            Node::SwitchStatement(n) => (n.start, n.end),
            Node::ThrowStatement(n) => (n.start, n.end),
            Node::LabeledStatement(n) => (n.start, n.end),
            Node::BreakStatement(n)
            | Node::ContinueStatement(n)
            | Node::EmptyStatement(n)
            | Node::DebuggerStatement(n)
            | Node::TemplateElement(n)
            | Node::ThisExpression(n)
            | Node::Super(n) => (n.start, n.end),
            Node::Identifier(n) => (n.start, n.end),
            Node::Literal(n) => (n.start, n.end),
            Node::TemplateLiteral(n) => (n.start, n.end),
            Node::ArrayExpression(n) => (n.start, n.end),
            Node::ObjectExpression(n) => (n.start, n.end),
            Node::Property(n) => (n.start, n.end),
            Node::CallExpression(n) | Node::NewExpression(n) => (n.start, n.end),
            Node::MemberExpression(n) => (n.start, n.end),
            Node::BinaryExpression(n) | Node::LogicalExpression(n) => (n.start, n.end),
            Node::UnaryExpression(n) | Node::UpdateExpression(n) => (n.start, n.end),
            Node::AssignmentExpression(n) => (n.start, n.end),
            Node::ConditionalExpression(n) => (n.start, n.end),
            Node::SequenceExpression(n) => (n.start, n.end),
            Node::AwaitExpression(n) => (n.start, n.end),
            Node::YieldExpression(n) => (n.start, n.end),
            Node::SpreadElement(n) | Node::RestElement(n) => (n.start, n.end),
            Node::ChainExpression(n) => (n.start, n.end),
            Node::MethodDefinition(n) => (n.start, n.end),
            Node::PropertyDefinition(n) => (n.start, n.end),
            Node::ObjectPattern(n) => (n.start, n.end),
            Node::ArrayPattern(n) => (n.start, n.end),
            Node::AssignmentPattern(n) => (n.start, n.end),
            Node::Unknown => (0, 0),
        };
        TextRange::new(start, end)
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Node::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Node::FunctionDeclaration(func)
            | Node::FunctionExpression(func)
            | Node::ArrowFunctionExpression(func) => Some(func),
            _ => None,
        }
    }

    /// Static name of a property/method key: identifiers and string/number literals.
    pub fn property_key_name(&self) -> Option<String> {
        match self {
            Node::Identifier(ident) => Some(ident.name.clone()),
            Node::Literal(lit) => match &lit.value {
                Some(LiteralValue::String(text)) => Some(text.clone()),
                Some(LiteralValue::Number(n)) => Some(format_number_key(*n)),
                _ => None,
            },
            _ => None,
        }
    }
}

fn format_number_key(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod tests;
