//! Class declarations and expressions.
//!
//! Members are declared in two passes. The first pass gives every method
//! and field a placeholder type so members can refer to each other through
//! `this`; the second pass analyses the constructor first (its `this.x = ...`
//! assignments declare instance fields) and then the remaining members.

use crate::state::{ClassFrame, TypeChecker};
use scry_ast::{Class, MethodDefinition, MethodKind, Node, PropertyDefinition};
use scry_binder::{ScopeKind, ScopeOptions, Symbol, SymbolFlags, SymbolId, SymbolKind, Visibility};
use scry_common::TextRange;
use scry_common::diagnostics::diagnostic_messages;
use scry_common::Diagnostic;
use scry_solver::{ClassId, ClassTypeBuilder, TypeData, TypeId};
use tracing::debug;

const ANONYMOUS_CLASS: &str = "(anonymous class)";

impl TypeChecker<'_> {
    /// Build the class and return its class type (`typeof C`). Declarations
    /// also bind the class name in the current scope.
    pub(crate) fn check_class(&mut self, class: &Class, is_declaration: bool) -> TypeId {
        let super_class = class
            .super_class
            .as_deref()
            .and_then(|node| self.resolve_base_class(node));
        let name = class.name().unwrap_or(ANONYMOUS_CLASS).to_string();

        let interner = self.interner;
        let builder = ClassTypeBuilder::declare(interner, &name, super_class);
        let class_id = builder.id();
        let class_type = builder.class_type();
        let instance_type = builder.instance_type();

        let range = TextRange::new(class.start, class.end);
        let class_symbol = Symbol::new(name.as_str(), SymbolKind::Class, class_type).with_declaration(range);
        let class_symbol = if is_declaration {
            self.scopes.define(class_symbol)
        } else {
            // Class expressions are only visible by name inside their body.
            self.scopes
                .enter_scope(ScopeKind::Block, ScopeOptions::with_range(range));
            self.scopes.define(class_symbol)
        };
        if class.name().is_some() {
            self.classes.insert(name.clone(), class_id);
        }

        self.scopes.enter_scope(
            ScopeKind::Class,
            ScopeOptions::with_range(range)
                .this_type(instance_type)
                .class_symbol(class_symbol),
        );
        self.class_stack.push(ClassFrame {
            class: class_id,
            in_constructor: false,
        });

        self.declare_member_placeholders(class, &builder);

        let members = &class.body.body;
        let mut has_constructor = false;
        for member in members {
            if let Node::MethodDefinition(method) = member
                && method.kind == MethodKind::Constructor
            {
                has_constructor = true;
                self.check_constructor(method, &builder, class_symbol);
            }
        }
        if !has_constructor {
            self.inherit_constructor(&builder, super_class);
        }
        for member in members {
            match member {
                Node::MethodDefinition(method) if method.kind != MethodKind::Constructor => {
                    self.check_method(method, &builder, class_symbol);
                }
                Node::PropertyDefinition(property) => {
                    self.check_property(property, &builder, class_symbol);
                }
                _ => {}
            }
        }

        self.class_stack.pop();
        self.scopes.exit_scope();
        if !is_declaration {
            self.scopes.exit_scope();
        }
        debug!(class = %name, id = class_id.0, "checked class");
        class_type
    }

    /// `extends` target: any expression whose type is a class.
    fn resolve_base_class(&mut self, node: &Node) -> Option<ClassId> {
        let base_type = self.infer(node);
        match self.interner.lookup(base_type) {
            Some(TypeData::Class(base)) => Some(base),
            _ => {
                // Unresolved names were already reported by `infer`.
                if base_type != TypeId::ANY && self.options.report_unresolved {
                    let range = node.range();
                    let text = match node {
                        Node::Identifier(ident) => ident.name.clone(),
                        _ => self.interner.display(base_type),
                    };
                    self.diagnostics.push(Diagnostic::from_message(
                        &diagnostic_messages::CANNOT_FIND_BASE_CLASS,
                        range.start,
                        range.len(),
                        &[&text],
                    ));
                }
                None
            }
        }
    }

    fn declare_member_placeholders(&mut self, class: &Class, builder: &ClassTypeBuilder<'_>) {
        for member in &class.body.body {
            match member {
                Node::MethodDefinition(method) if method.kind == MethodKind::Method => {
                    let (Some(name), Some(func)) = (member_name(&method.key, method.computed), method.value.as_function()) else {
                        continue;
                    };
                    let placeholder = self.placeholder_function_type(func);
                    if method.is_static {
                        builder.add_static(&name, placeholder);
                    } else {
                        builder.add_method(&name, placeholder);
                    }
                }
                Node::PropertyDefinition(property) => {
                    let Some(name) = member_name(&property.key, property.computed) else {
                        continue;
                    };
                    if property.is_static {
                        builder.add_static(&name, TypeId::ANY);
                    } else {
                        builder.add_property(&name, TypeId::ANY);
                    }
                }
                _ => {}
            }
        }
    }

    fn check_constructor(
        &mut self,
        method: &MethodDefinition,
        builder: &ClassTypeBuilder<'_>,
        class_symbol: SymbolId,
    ) {
        let Some(func) = method.value.as_function() else {
            return;
        };
        let symbol = self.scopes.add_member(
            class_symbol,
            Symbol::new("constructor", SymbolKind::Constructor, TypeId::ANY)
                .with_declaration(TextRange::new(method.start, method.end)),
        );

        if let Some(frame) = self.class_stack.last_mut() {
            frame.in_constructor = true;
        }
        let shape = self.check_function_shape(
            func,
            ScopeKind::Method,
            Some(builder.instance_type()),
            Some(symbol),
            &[],
        );
        if let Some(frame) = self.class_stack.last_mut() {
            frame.in_constructor = false;
        }

        let ctor = builder.set_constructor(shape.params);
        self.scopes.set_symbol_type(symbol, ctor);
    }

    /// A class without a constructor takes its base class's parameters.
    fn inherit_constructor(&mut self, builder: &ClassTypeBuilder<'_>, super_class: Option<ClassId>) {
        let params = super_class
            .and_then(|base| self.interner.class_def(base))
            .and_then(|def| def.constructor_type)
            .and_then(|ctor| self.interner.function_shape(ctor))
            .map(|shape| shape.params.clone())
            .unwrap_or_default();
        builder.set_constructor(params);
    }

    fn check_method(
        &mut self,
        method: &MethodDefinition,
        builder: &ClassTypeBuilder<'_>,
        class_symbol: SymbolId,
    ) {
        let (Some(name), Some(func)) = (member_name(&method.key, method.computed), method.value.as_function()) else {
            return;
        };
        let kind = match method.kind {
            MethodKind::Get => SymbolKind::Getter,
            MethodKind::Set => SymbolKind::Setter,
            _ => SymbolKind::Method,
        };
        let mut flags = crate::statements::function_flags(func);
        if method.is_static {
            flags |= SymbolFlags::STATIC;
        }
        let symbol = self.scopes.add_member(
            class_symbol,
            Symbol::new(name.as_str(), kind, TypeId::ANY)
                .with_flags(flags)
                .with_visibility(visibility_of(&name))
                .with_declaration(TextRange::new(method.start, method.end)),
        );

        let this_type = if method.is_static {
            builder.class_type()
        } else {
            builder.instance_type()
        };
        let shape = self.check_function_shape(func, ScopeKind::Method, Some(this_type), Some(symbol), &[]);

        let member_type = match method.kind {
            MethodKind::Get => shape.return_type,
            MethodKind::Set => {
                let existing = if method.is_static {
                    self.interner.own_static_member(builder.id(), self.interner.intern_string(&name))
                } else {
                    self.interner.own_instance_member(builder.id(), self.interner.intern_string(&name))
                };
                // A getter already fixed the property type.
                match existing {
                    Some(type_id) if type_id != TypeId::ANY => type_id,
                    _ => shape.params.first().map_or(TypeId::ANY, |param| param.type_id),
                }
            }
            _ => self.interner.function(shape),
        };
        if method.is_static {
            builder.add_static(&name, member_type);
        } else {
            builder.add_method(&name, member_type);
        }
        self.scopes.set_symbol_type(symbol, member_type);
    }

    fn check_property(
        &mut self,
        property: &PropertyDefinition,
        builder: &ClassTypeBuilder<'_>,
        class_symbol: SymbolId,
    ) {
        let Some(name) = member_name(&property.key, property.computed) else {
            return;
        };
        let this_type = if property.is_static {
            builder.class_type()
        } else {
            builder.instance_type()
        };
        let type_id = match &property.value {
            Some(value) => {
                // Initializers see the instance (or the class, for statics) as `this`.
                self.scopes.enter_scope(
                    ScopeKind::Method,
                    ScopeOptions::with_range(value.range()).this_type(this_type),
                );
                let type_id = self.infer(value);
                self.scopes.exit_scope();
                type_id
            }
            // Keeps a type the constructor assigned.
            None => {
                let atom = self.interner.intern_string(&name);
                let existing = if property.is_static {
                    self.interner.own_static_member(builder.id(), atom)
                } else {
                    self.interner.own_instance_member(builder.id(), atom)
                };
                existing.unwrap_or(TypeId::ANY)
            }
        };

        let mut flags = SymbolFlags::empty();
        if property.is_static {
            flags |= SymbolFlags::STATIC;
            builder.add_static(&name, type_id);
        } else {
            builder.add_property(&name, type_id);
        }
        self.scopes.add_member(
            class_symbol,
            Symbol::new(name.as_str(), SymbolKind::Property, type_id)
                .with_flags(flags)
                .with_visibility(visibility_of(&name))
                .with_declaration(TextRange::new(property.start, property.end)),
        );
    }

    /// `this.name = value` inside a constructor declares an instance field.
    pub(crate) fn declare_this_property(&mut self, name: &str, type_id: TypeId) {
        let Some(frame) = self.current_class() else {
            return;
        };
        if !frame.in_constructor {
            return;
        }
        let builder = ClassTypeBuilder::resume(self.interner, frame.class);
        if builder.add_property_if_absent(name, type_id) {
            debug!(property = name, class = frame.class.0, "declared field from constructor");
            return;
        }
        // Fields declared without an initializer are refined by the first
        // assignment.
        let atom = self.interner.intern_string(name);
        if self.interner.own_instance_member(frame.class, atom) == Some(TypeId::ANY) {
            builder.add_property(name, type_id);
        }
    }
}

fn member_name(key: &Node, computed: bool) -> Option<String> {
    if computed && !matches!(key, Node::Literal(_)) {
        return None;
    }
    key.property_key_name()
}

fn visibility_of(name: &str) -> Visibility {
    if name.starts_with('#') {
        Visibility::Private
    } else {
        Visibility::Public
    }
}

#[cfg(test)]
#[path = "../tests/class_checker_tests.rs"]
mod tests;
