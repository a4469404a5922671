//! Type display.
//!
//! The display string is also the structural key for the instantiation and
//! call-site caches, so it must be deterministic for a given type.

use crate::TypeInterner;
use crate::types::*;
use std::fmt::Write;

pub struct TypeFormatter<'a> {
    interner: &'a TypeInterner,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        TypeFormatter { interner }
    }

    pub fn format(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, id);
        out
    }

    fn write_type(&self, out: &mut String, id: TypeId) {
        let Some(data) = self.interner.lookup(id) else {
            out.push_str("any");
            return;
        };
        match data {
            TypeData::Any => out.push_str("any"),
            TypeData::Unknown => out.push_str("unknown"),
            TypeData::Never => out.push_str("never"),
            TypeData::Void => out.push_str("void"),
            TypeData::Primitive(kind) => out.push_str(kind.name()),
            TypeData::Array(element) => {
                let wrap = matches!(
                    self.interner.kind(element),
                    TypeKind::Union | TypeKind::Function | TypeKind::Generic
                );
                if wrap {
                    out.push('(');
                    self.write_type(out, element);
                    out.push(')');
                } else {
                    self.write_type(out, element);
                }
                out.push_str("[]");
            }
            TypeData::Object(shape) => self.write_object(out, &shape),
            TypeData::Function(shape) => self.write_function(out, &shape),
            TypeData::Class(class) => {
                out.push_str("typeof ");
                self.write_class_name(out, class);
            }
            TypeData::Instance(class) => self.write_class_name(out, class),
            TypeData::Union(members) => {
                for (i, &member) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    // Function members would otherwise swallow the rest of the union.
                    if self.interner.kind(member) == TypeKind::Function {
                        out.push('(');
                        self.write_type(out, member);
                        out.push(')');
                    } else {
                        self.write_type(out, member);
                    }
                }
            }
            TypeData::TypeVariable(info) => {
                out.push_str(&self.interner.resolve_atom(info.name));
            }
            TypeData::Generic(generic) => {
                out.push('<');
                for (i, &param) in generic.type_params.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, param);
                    if let Some(constraint) =
                        self.interner.type_var_info(param).and_then(|v| v.constraint)
                    {
                        out.push_str(" extends ");
                        self.write_type(out, constraint);
                    }
                }
                out.push('>');
                self.write_type(out, generic.base);
            }
        }
    }

    fn write_object(&self, out: &mut String, shape: &ObjectShape) {
        if shape.properties.is_empty() {
            out.push_str("{}");
            return;
        }
        out.push_str("{ ");
        for (i, prop) in shape.properties.iter().enumerate() {
            if i > 0 {
                out.push_str("; ");
            }
            out.push_str(&self.interner.resolve_atom(prop.name));
            if prop.optional {
                out.push('?');
            }
            out.push_str(": ");
            self.write_type(out, prop.type_id);
        }
        out.push_str(" }");
    }

    fn write_function(&self, out: &mut String, shape: &FunctionShape) {
        out.push('(');
        for (i, param) in shape.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if param.rest {
                out.push_str("...");
            }
            out.push_str(&self.interner.resolve_atom(param.name));
            if param.optional {
                out.push('?');
            }
            out.push_str(": ");
            self.write_type(out, param.type_id);
        }
        out.push_str(") => ");
        self.write_type(out, shape.return_type);
    }

    fn write_class_name(&self, out: &mut String, class: ClassId) {
        match self.interner.class_name(class) {
            Some(name) if !name.is_empty() => out.push_str(&name),
            _ => {
                let _ = write!(out, "<anonymous class {}>", class.0);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
