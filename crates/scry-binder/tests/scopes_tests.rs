use super::*;

#[test]
fn test_new_arena_has_global_scope() {
    let arena = ScopeArena::new();
    let global = arena.get(ScopeId::GLOBAL).expect("global scope");
    assert_eq!(global.kind, ScopeKind::Global);
    assert!(global.parent.is_none());
    assert!(global.range.is_unbounded());
    assert_eq!(arena.len(), 1);
}

#[test]
fn test_alloc_links_parent_and_child() {
    let mut arena = ScopeArena::new();
    let func = arena.alloc(ScopeKind::Function, ScopeId::GLOBAL, ScopeOptions::default());
    let block = arena.alloc(ScopeKind::Block, func, ScopeOptions::default());
    assert_eq!(arena.get(block).and_then(|s| s.parent), Some(func));
    assert_eq!(arena.get(func).map(|s| s.children.clone()), Some(vec![block]));
    assert_eq!(arena.chain(block), vec![block, func, ScopeId::GLOBAL]);
}

#[test]
fn test_resolve_from_walks_chain() {
    let mut arena = ScopeArena::new();
    let inner = arena.alloc(ScopeKind::Block, ScopeId::GLOBAL, ScopeOptions::default());
    if let Some(global) = arena.get_mut(ScopeId::GLOBAL) {
        global.symbols.insert("x".to_string(), SymbolId(1));
    }
    assert_eq!(arena.resolve_from(inner, "x"), Some(SymbolId(1)));

    if let Some(scope) = arena.get_mut(inner) {
        scope.symbols.insert("x".to_string(), SymbolId(2));
    }
    assert_eq!(arena.resolve_from(inner, "x"), Some(SymbolId(2)));
    assert_eq!(arena.resolve_from(ScopeId::GLOBAL, "x"), Some(SymbolId(1)));
    assert_eq!(arena.resolve_from(inner, "y"), None);
}

#[test]
fn test_this_type_inheritance() {
    let mut arena = ScopeArena::new();
    let class = arena.alloc(
        ScopeKind::Class,
        ScopeId::GLOBAL,
        ScopeOptions::default().this_type(TypeId::STRING),
    );
    let method = arena.alloc(
        ScopeKind::Method,
        class,
        ScopeOptions::default().this_type(TypeId::STRING),
    );
    let arrow = arena.alloc(ScopeKind::Arrow, method, ScopeOptions::default());
    let block = arena.alloc(ScopeKind::Block, arrow, ScopeOptions::default());
    let plain = arena.alloc(ScopeKind::Function, block, ScopeOptions::default());

    assert_eq!(arena.this_type_at(arrow), Some(TypeId::STRING));
    assert_eq!(arena.this_type_at(block), Some(TypeId::STRING));
    // A plain function introduces its own (unknown) `this`.
    assert_eq!(arena.this_type_at(plain), None);
    assert_eq!(arena.this_type_at(ScopeId::GLOBAL), None);
}

#[test]
fn test_remove_subtree_detaches_and_keeps_siblings() {
    let mut arena = ScopeArena::new();
    let func = arena.alloc(ScopeKind::Function, ScopeId::GLOBAL, ScopeOptions::default());
    let first = arena.alloc(ScopeKind::Block, func, ScopeOptions::default());
    let nested = arena.alloc(ScopeKind::Block, first, ScopeOptions::default());
    let sibling = arena.alloc(ScopeKind::Block, func, ScopeOptions::default());

    let removed = arena.remove_subtree(first);
    assert_eq!(removed, vec![first, nested]);
    assert!(!arena.contains(first));
    assert!(!arena.contains(nested));
    assert!(arena.contains(sibling));
    assert_eq!(arena.get(func).map(|s| s.children.clone()), Some(vec![sibling]));
    // Surviving ids are stable.
    assert_eq!(arena.get(sibling).map(|s| s.id), Some(sibling));
}

#[test]
fn test_global_scope_cannot_be_removed() {
    let mut arena = ScopeArena::new();
    assert!(arena.remove_subtree(ScopeId::GLOBAL).is_empty());
    assert!(arena.contains(ScopeId::GLOBAL));
}

#[test]
fn test_visible_symbols_dedupe_innermost_first() {
    let mut arena = ScopeArena::new();
    let inner = arena.alloc(ScopeKind::Block, ScopeId::GLOBAL, ScopeOptions::default());
    if let Some(global) = arena.get_mut(ScopeId::GLOBAL) {
        global.symbols.insert("a".to_string(), SymbolId(1));
        global.symbols.insert("b".to_string(), SymbolId(2));
    }
    if let Some(scope) = arena.get_mut(inner) {
        scope.symbols.insert("a".to_string(), SymbolId(3));
    }
    assert_eq!(
        arena.visible_symbols(inner),
        vec![SymbolId(3), SymbolId(2)]
    );
}

#[test]
fn test_scope_kind_capabilities() {
    assert!(!ScopeKind::Arrow.binds_this());
    assert!(ScopeKind::Class.binds_this());
    assert!(ScopeKind::Arrow.is_var_scope());
    assert!(!ScopeKind::Block.is_var_scope());
    assert!(ScopeKind::Method.is_function_like());
    assert_eq!(ScopeKind::Catch.as_str(), "catch");
}
