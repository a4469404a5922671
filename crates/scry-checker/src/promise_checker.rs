//! `async` results and `await`.
//!
//! There is no generic class model, so `Promise<T>` is a synthetic subclass
//! of the host `Promise` class whose `then` callback receives `T`. One such
//! class is created per payload type and reused. `await` reads the payload
//! back out of `then`, so any promise-like instance with a typed `then`
//! callback unwraps the same way.

use crate::state::TypeChecker;
use scry_solver::class_hierarchy::find_instance_member;
use scry_solver::{ClassId, ClassTypeBuilder, FunctionShape, ParamInfo, TypeData, TypeId, is_derived_from};
use tracing::trace;

impl TypeChecker<'_> {
    /// The host `Promise` class, if the global scope still has it.
    pub(crate) fn promise_class(&self) -> Option<ClassId> {
        let global = self.scopes.global();
        let symbol = self.scopes.resolve_from(global, "Promise")?;
        let type_id = self.scopes.symbol(symbol)?.type_id;
        match self.interner.lookup(type_id)? {
            TypeData::Class(class) => Some(class),
            _ => None,
        }
    }

    fn is_promise_instance(&self, type_id: TypeId) -> bool {
        let (Some(promise), Some(TypeData::Instance(class))) =
            (self.promise_class(), self.interner.lookup(type_id))
        else {
            return false;
        };
        class == promise || is_derived_from(self.interner, class, promise)
    }

    /// `Promise<payload>`. A payload that is already a promise is returned
    /// unchanged, as `async` functions do not nest promises.
    pub(crate) fn promise_of(&mut self, payload: TypeId) -> TypeId {
        if self.is_promise_instance(payload) {
            return payload;
        }
        if let Some(&cached) = self.promise_types.get(&payload) {
            return cached;
        }
        let Some(promise) = self.promise_class() else {
            return TypeId::ANY;
        };

        let interner = self.interner;
        let name = format!("Promise<{}>", interner.display(payload));
        let builder = ClassTypeBuilder::declare(interner, &name, Some(promise));
        let instance = builder.instance_type();

        let value = interner.intern_string("value");
        let reason = interner.intern_string("reason");
        let on_fulfilled = interner.function(FunctionShape::new(
            vec![ParamInfo::required(value, payload)],
            TypeId::ANY,
        ));
        let on_rejected = interner.function(FunctionShape::new(
            vec![ParamInfo::required(reason, TypeId::ANY)],
            TypeId::ANY,
        ));
        let then = interner.function(FunctionShape::new(
            vec![
                ParamInfo::optional(interner.intern_string("onfulfilled"), on_fulfilled),
                ParamInfo::optional(interner.intern_string("onrejected"), on_rejected),
            ],
            interner.instance_type(promise),
        ));
        builder.add_method("then", then);

        trace!(payload = payload.0, promise = instance.0, "created promise type");
        self.promise_types.insert(payload, instance);
        instance
    }

    /// Type of `await operand`: the payload of a typed promise, `any` for an
    /// untyped one, the operand itself otherwise. Unions unwrap per member.
    pub(crate) fn awaited_type(&self, operand: TypeId) -> TypeId {
        match self.interner.lookup(operand) {
            Some(TypeData::Union(members)) => {
                let awaited = members.iter().map(|&member| self.awaited_type(member)).collect();
                self.interner.union(awaited)
            }
            Some(TypeData::Instance(class)) if self.is_promise_instance(operand) => {
                self.then_payload(class).unwrap_or(TypeId::ANY)
            }
            _ => operand,
        }
    }

    /// The first parameter type of the `then` fulfilment callback.
    fn then_payload(&self, class: ClassId) -> Option<TypeId> {
        let then = find_instance_member(self.interner, class, self.interner.intern_string("then"))?;
        let shape = self.interner.function_shape(then)?;
        let callback = self.interner.function_shape(shape.params.first()?.type_id)?;
        callback.params.first().map(|param| param.type_id)
    }
}

#[cfg(test)]
#[path = "../tests/promise_checker_tests.rs"]
mod tests;
