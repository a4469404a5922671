//! Expression type inference.
//!
//! Every expression form maps to a type; anything the checker does not
//! understand infers as `any`. Recursion is bounded by
//! `CheckerOptions::max_expression_depth`.

use crate::state::TypeChecker;
use scry_ast::{
    ArrayExpression, AssignmentExpression, BinaryExpression, CallExpression, Identifier, Literal,
    LiteralKind, MemberExpression, Node, ObjectExpression, PropertyKind, UnaryExpression,
};
use scry_binder::{ScopeKind, SymbolKind};
use scry_common::diagnostics::diagnostic_messages;
use scry_common::{Atom, Diagnostic, TextRange};
use scry_solver::{PropertyInfo, TypeData, TypeId, get_property_type, instantiate_generic_call};
use tracing::trace;

impl TypeChecker<'_> {
    /// Infer the type of `expr` in the current scope.
    pub(crate) fn infer(&mut self, expr: &Node) -> TypeId {
        if self.depth >= self.options.max_expression_depth {
            trace!(depth = self.depth, "expression nesting limit reached");
            return TypeId::ANY;
        }
        self.depth += 1;
        let type_id = self.compute_type(expr);
        self.depth -= 1;
        type_id
    }

    fn compute_type(&mut self, expr: &Node) -> TypeId {
        match expr {
            Node::Literal(literal) => self.literal_type(literal),
            Node::TemplateLiteral(template) => {
                for expr in &template.expressions {
                    self.infer(expr);
                }
                TypeId::STRING
            }
            Node::Identifier(ident) => self.identifier_type(ident),
            Node::ArrayExpression(array) => self.array_literal_type(array),
            Node::ObjectExpression(object) => self.object_literal_type(object),
            Node::FunctionExpression(func) => {
                self.check_function(func, ScopeKind::Function, None, &[])
            }
            Node::ArrowFunctionExpression(func) => {
                self.check_function(func, ScopeKind::Arrow, None, &[])
            }
            Node::ClassExpression(class) => self.check_class(class, false),
            Node::CallExpression(call) => self.check_call(call),
            Node::NewExpression(call) => self.check_new(call),
            Node::MemberExpression(member) => self.member_access_type(member),
            Node::BinaryExpression(binary) => {
                let left = self.infer(&binary.left);
                let right = self.infer(&binary.right);
                self.binary_type(&binary.operator, left, right)
            }
            Node::LogicalExpression(logical) => self.logical_type(logical),
            Node::UnaryExpression(unary) => self.unary_type(unary),
            Node::UpdateExpression(update) => {
                if self.infer(&update.argument) == TypeId::BIGINT {
                    TypeId::BIGINT
                } else {
                    TypeId::NUMBER
                }
            }
            Node::AssignmentExpression(assign) => self.assignment_type(assign),
            Node::ConditionalExpression(conditional) => {
                self.infer(&conditional.test);
                let consequent = self.infer(&conditional.consequent);
                let alternate = self.infer(&conditional.alternate);
                self.interner.union2(consequent, alternate)
            }
            Node::SequenceExpression(sequence) => {
                let mut last = TypeId::UNDEFINED;
                for expr in &sequence.expressions {
                    last = self.infer(expr);
                }
                last
            }
            Node::AwaitExpression(await_expr) => {
                let operand = self.infer(&await_expr.argument);
                self.awaited_type(operand)
            }
            Node::YieldExpression(yield_expr) => {
                if let Some(argument) = &yield_expr.argument {
                    self.infer(argument);
                }
                TypeId::ANY
            }
            Node::SpreadElement(spread) => self.infer(&spread.argument),
            Node::ChainExpression(chain) => self.infer(&chain.expression),
            Node::ThisExpression(_) => self.scopes.this_type().unwrap_or(TypeId::ANY),
            Node::Super(_) => self.super_instance_type(),
            _ => TypeId::ANY,
        }
    }

    fn literal_type(&self, literal: &Literal) -> TypeId {
        match literal.kind() {
            LiteralKind::Null => TypeId::NULL,
            LiteralKind::Boolean => TypeId::BOOLEAN,
            LiteralKind::Number => TypeId::NUMBER,
            LiteralKind::String => TypeId::STRING,
            LiteralKind::BigInt => TypeId::BIGINT,
            LiteralKind::RegExp => self
                .global_instance_type("RegExp")
                .unwrap_or_else(|| self.interner.object(Vec::new())),
        }
    }

    /// Instance type of a host class, if it is still seeded.
    fn global_instance_type(&self, name: &str) -> Option<TypeId> {
        let symbol = self.scopes.resolve_from(self.scopes.global(), name)?;
        let class_type = self.scopes.symbol(symbol)?.type_id;
        match self.interner.lookup(class_type)? {
            TypeData::Class(class) => Some(self.interner.instance_type(class)),
            _ => None,
        }
    }

    fn identifier_type(&mut self, ident: &Identifier) -> TypeId {
        match ident.name.as_str() {
            "undefined" => return TypeId::UNDEFINED,
            "arguments" if self.scopes.resolve("arguments").is_none() => return TypeId::ANY,
            _ => {}
        }
        match self.scopes.resolve_and_reference(&ident.name) {
            Some(id) => self.scopes.symbol(id).map_or(TypeId::ANY, |symbol| symbol.type_id),
            None => {
                self.report_unresolved(&ident.name, TextRange::new(ident.start, ident.end));
                TypeId::ANY
            }
        }
    }

    fn array_literal_type(&mut self, array: &ArrayExpression) -> TypeId {
        let mut elements = Vec::with_capacity(array.elements.len());
        for element in &array.elements {
            let type_id = match element {
                None => TypeId::UNDEFINED,
                Some(Node::SpreadElement(spread)) => {
                    let spread_type = self.infer(&spread.argument);
                    self.iterated_element_type(spread_type)
                }
                Some(element) => self.infer(element),
            };
            elements.push(type_id);
        }
        if elements.is_empty() {
            return self.interner.array(TypeId::ANY);
        }
        let element = self.interner.union(elements);
        self.interner.array(element)
    }

    fn object_literal_type(&mut self, object: &ObjectExpression) -> TypeId {
        let mut properties: Vec<PropertyInfo> = Vec::new();
        for property in &object.properties {
            match property {
                Node::Property(prop) => {
                    let name = match (&*prop.key, prop.computed) {
                        (key, false) | (key @ Node::Literal(_), true) => key.property_key_name(),
                        (key, true) => {
                            self.infer(key);
                            None
                        }
                    };
                    let Some(name) = name else {
                        self.infer(&prop.value);
                        continue;
                    };
                    let atom = self.interner.intern_string(&name);
                    let function = prop.value.as_function();
                    match (prop.kind, function) {
                        (PropertyKind::Get, Some(func)) => {
                            let shape = self.check_function_shape(func, ScopeKind::Method, None, None, &[]);
                            upsert_property(&mut properties, atom, shape.return_type);
                        }
                        (PropertyKind::Set, Some(func)) => {
                            let shape = self.check_function_shape(func, ScopeKind::Method, None, None, &[]);
                            if !properties.iter().any(|p| p.name == atom) {
                                let type_id = shape.params.first().map_or(TypeId::ANY, |p| p.type_id);
                                properties.push(PropertyInfo::new(atom, type_id));
                            }
                        }
                        (_, Some(func)) if prop.method => {
                            let type_id = self.check_function(func, ScopeKind::Method, None, &[]);
                            upsert_property(&mut properties, atom, type_id);
                        }
                        _ => {
                            let type_id = self.infer(&prop.value);
                            upsert_property(&mut properties, atom, type_id);
                        }
                    }
                }
                Node::SpreadElement(spread) => {
                    let spread_type = self.infer(&spread.argument);
                    if let Some(shape) = self.interner.object_shape(spread_type) {
                        for prop in &shape.properties {
                            upsert_property(&mut properties, prop.name, prop.type_id);
                        }
                    }
                }
                _ => {}
            }
        }
        self.interner.object(properties)
    }

    fn member_access_type(&mut self, member: &MemberExpression) -> TypeId {
        let object_type = self.infer(&member.object);
        let Some(name) = member.static_property_name() else {
            let index_type = self.infer(&member.property);
            return self.index_access_type(object_type, index_type);
        };
        let atom = self.interner.intern_string(name);
        match get_property_type(self.interner, object_type, atom) {
            Some(type_id) => type_id,
            None => {
                self.report_missing_property(name, object_type, member.property.range());
                TypeId::ANY
            }
        }
    }

    /// `object[index]` with a non-literal index.
    fn index_access_type(&self, object_type: TypeId, index_type: TypeId) -> TypeId {
        match self.interner.lookup(object_type) {
            Some(TypeData::Array(element)) if index_type != TypeId::STRING => element,
            _ if object_type == TypeId::STRING => TypeId::STRING,
            _ => TypeId::ANY,
        }
    }

    fn report_missing_property(&mut self, name: &str, object_type: TypeId, range: TextRange) {
        if !self.options.report_unresolved {
            return;
        }
        let known_shape = matches!(
            self.interner.lookup(object_type),
            Some(
                TypeData::Primitive(_)
                    | TypeData::Object(_)
                    | TypeData::Class(_)
                    | TypeData::Instance(_)
                    | TypeData::Array(_)
            )
        );
        if known_shape {
            let type_text = self.interner.display(object_type);
            self.diagnostics.push(Diagnostic::from_message(
                &diagnostic_messages::PROPERTY_DOES_NOT_EXIST,
                range.start,
                range.len(),
                &[name, &type_text],
            ));
        }
    }

    pub(crate) fn binary_type(&self, operator: &str, left: TypeId, right: TypeId) -> TypeId {
        let numeric = |t: TypeId| {
            matches!(
                t,
                TypeId::NUMBER | TypeId::BOOLEAN | TypeId::NULL | TypeId::UNDEFINED
            )
        };
        match operator {
            "+" => {
                if left == TypeId::STRING || right == TypeId::STRING {
                    TypeId::STRING
                } else if left == TypeId::BIGINT && right == TypeId::BIGINT {
                    TypeId::BIGINT
                } else if numeric(left) && numeric(right) {
                    TypeId::NUMBER
                } else if left == TypeId::ANY || right == TypeId::ANY {
                    TypeId::ANY
                } else {
                    self.interner.union2(TypeId::STRING, TypeId::NUMBER)
                }
            }
            "-" | "*" | "/" | "%" | "**" | "<<" | ">>" | ">>>" | "&" | "|" | "^" => {
                if left == TypeId::BIGINT && right == TypeId::BIGINT {
                    TypeId::BIGINT
                } else {
                    TypeId::NUMBER
                }
            }
            "==" | "!=" | "===" | "!==" | "<" | ">" | "<=" | ">=" | "instanceof" | "in" => {
                TypeId::BOOLEAN
            }
            _ => TypeId::ANY,
        }
    }

    fn logical_type(&mut self, logical: &BinaryExpression) -> TypeId {
        let left = self.infer(&logical.left);
        let right = self.infer(&logical.right);
        match logical.operator.as_str() {
            "&&" => right,
            _ => self.fallback_type(left, right),
        }
    }

    /// `left || right` and `left ?? right`: the non-nullish part of `left`
    /// or `right`.
    fn fallback_type(&self, left: TypeId, right: TypeId) -> TypeId {
        let present: Vec<TypeId> = self
            .interner
            .union_members(left)
            .into_iter()
            .filter(|&member| !matches!(member, TypeId::NULL | TypeId::UNDEFINED))
            .collect();
        if present.is_empty() {
            return right;
        }
        let present = self.interner.union(present);
        self.interner.union2(present, right)
    }

    fn unary_type(&mut self, unary: &UnaryExpression) -> TypeId {
        let argument = self.infer(&unary.argument);
        match unary.operator.as_str() {
            "typeof" => TypeId::STRING,
            "!" | "delete" => TypeId::BOOLEAN,
            "void" => TypeId::UNDEFINED,
            "-" | "~" if argument == TypeId::BIGINT => TypeId::BIGINT,
            "+" | "-" | "~" => TypeId::NUMBER,
            _ => TypeId::ANY,
        }
    }

    fn assignment_type(&mut self, assign: &AssignmentExpression) -> TypeId {
        let value = self.infer(&assign.right);
        let result = match assign.operator.as_str() {
            "=" => value,
            "&&=" => value,
            "||=" | "??=" => {
                let current = self.infer(&assign.left);
                self.fallback_type(current, value)
            }
            compound => {
                let current = self.infer(&assign.left);
                self.binary_type(compound.trim_end_matches('='), current, value)
            }
        };
        self.assign_to(&assign.left, result);
        result
    }

    /// Record what an assignment teaches about its target.
    fn assign_to(&mut self, target: &Node, value: TypeId) {
        match target {
            Node::Identifier(ident) => match self.scopes.resolve(&ident.name) {
                Some(id) => {
                    // Declared without an initializer: the first assignment
                    // gives the variable its type.
                    let widen = self.scopes.symbol(id).is_some_and(|symbol| {
                        symbol.type_id == TypeId::ANY
                            && !symbol.is_read_only()
                            && matches!(symbol.kind, SymbolKind::Variable)
                    });
                    if widen && value != TypeId::ANY {
                        self.scopes.set_symbol_type(id, value);
                    }
                }
                None => self.report_unresolved(&ident.name, target.range()),
            },
            Node::MemberExpression(member) => {
                if let Node::ThisExpression(_) = &*member.object
                    && let Some(name) = member.static_property_name()
                    && let Some(frame) = self.current_class()
                    && self.scopes.this_type() == Some(self.interner.instance_type(frame.class))
                {
                    self.declare_this_property(name, value);
                    return;
                }
                self.infer(&member.object);
                if member.computed {
                    self.infer(&member.property);
                }
            }
            _ => {}
        }
    }

    fn check_new(&mut self, call: &CallExpression) -> TypeId {
        let callee = self.infer(&call.callee);
        for argument in &call.arguments {
            self.infer(argument);
        }
        match self.interner.lookup(callee) {
            Some(TypeData::Class(class)) => self.interner.instance_type(class),
            _ => TypeId::ANY,
        }
    }

    /// `super` as a value: the base class instance of the enclosing class.
    fn super_instance_type(&self) -> TypeId {
        self.current_class()
            .and_then(|frame| self.interner.super_class(frame.class))
            .map_or(TypeId::ANY, |base| self.interner.instance_type(base))
    }

    /// Call an already-inferred callee.
    pub(crate) fn call_result_type(&self, callee: TypeId, arg_types: &[TypeId]) -> TypeId {
        if self.interner.function_shape(callee).is_none() {
            return TypeId::ANY;
        }
        instantiate_generic_call(self.interner, callee, arg_types)
    }
}

fn upsert_property(properties: &mut Vec<PropertyInfo>, name: Atom, type_id: TypeId) {
    match properties.iter_mut().find(|prop| prop.name == name) {
        Some(existing) => existing.type_id = type_id,
        None => properties.push(PropertyInfo::new(name, type_id)),
    }
}

#[cfg(test)]
#[path = "../tests/expr_tests.rs"]
mod tests;
