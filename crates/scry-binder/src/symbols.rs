//! Symbols and their completion projection.

use bitflags::bitflags;
use indexmap::IndexMap;
use scry_common::TextRange;
use scry_solver::{TypeId, TypeInterner};
use serde::Serialize;

/// Handle to a symbol in a [`SymbolArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Constant,
    Function,
    Class,
    Method,
    Property,
    Parameter,
    Getter,
    Setter,
    Constructor,
    Enum,
    EnumMember,
    Module,
    Import,
    Export,
    Label,
    Builtin,
    Unknown,
}

impl SymbolKind {
    /// Symbols whose value can be called.
    pub const fn is_callable(self) -> bool {
        matches!(
            self,
            SymbolKind::Function | SymbolKind::Method | SymbolKind::Constructor
        )
    }

    /// Symbols that name a type as well as a value.
    pub const fn is_type_like(self) -> bool {
        matches!(self, SymbolKind::Class | SymbolKind::Enum)
    }

    /// Members declared inside a class or object body.
    pub const fn is_member(self) -> bool {
        matches!(
            self,
            SymbolKind::Method
                | SymbolKind::Property
                | SymbolKind::Getter
                | SymbolKind::Setter
                | SymbolKind::Constructor
                | SymbolKind::EnumMember
        )
    }

    /// Symbols that carry a member map.
    pub const fn has_members(self) -> bool {
        matches!(
            self,
            SymbolKind::Class | SymbolKind::Module | SymbolKind::Enum
        )
    }

    /// Accessors read like properties.
    pub const fn is_accessor(self) -> bool {
        matches!(self, SymbolKind::Getter | SymbolKind::Setter)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::Function => "function",
            SymbolKind::Class => "class",
            SymbolKind::Method => "method",
            SymbolKind::Property => "property",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Getter => "getter",
            SymbolKind::Setter => "setter",
            SymbolKind::Constructor => "constructor",
            SymbolKind::Enum => "enum",
            SymbolKind::EnumMember => "enum_member",
            SymbolKind::Module => "module",
            SymbolKind::Import => "import",
            SymbolKind::Export => "export",
            SymbolKind::Label => "label",
            SymbolKind::Builtin => "builtin",
            SymbolKind::Unknown => "unknown",
        }
    }

    /// The kind shown in the editor's completion list.
    pub const fn completion_kind(self) -> CompletionKind {
        match self {
            SymbolKind::Variable | SymbolKind::Parameter => CompletionKind::Variable,
            SymbolKind::Constant => CompletionKind::Constant,
            SymbolKind::Function => CompletionKind::Function,
            SymbolKind::Method | SymbolKind::Constructor => CompletionKind::Method,
            SymbolKind::Class => CompletionKind::Class,
            SymbolKind::Property | SymbolKind::Getter | SymbolKind::Setter => {
                CompletionKind::Property
            }
            SymbolKind::Enum => CompletionKind::Enum,
            SymbolKind::EnumMember => CompletionKind::EnumMember,
            SymbolKind::Module | SymbolKind::Import | SymbolKind::Export => CompletionKind::Module,
            SymbolKind::Builtin => CompletionKind::Builtin,
            SymbolKind::Label | SymbolKind::Unknown => CompletionKind::Text,
        }
    }
}

/// The declaring keyword of a variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u32 {
        const READONLY = 1 << 0;
        const STATIC = 1 << 1;
        const OPTIONAL = 1 << 2;
        const ASYNC = 1 << 3;
        const GENERATOR = 1 << 4;
        /// Function declarations visible before their statement.
        const HOISTED = 1 << 5;
        /// Seeded by the host environment rather than declared in source.
        const HOST = 1 << 6;
    }
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub type_id: TypeId,
    pub declaration_kind: Option<DeclarationKind>,
    pub flags: SymbolFlags,
    pub visibility: Visibility,
    /// Ordered members of class and module symbols.
    pub members: IndexMap<String, SymbolId>,
    pub parent: Option<SymbolId>,
    /// Number of resolved references.
    pub references: u32,
    pub declaration: Option<TextRange>,
    pub documentation: Option<String>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, type_id: TypeId) -> Self {
        Symbol {
            name: name.into(),
            kind,
            type_id,
            declaration_kind: None,
            flags: SymbolFlags::empty(),
            visibility: Visibility::Public,
            members: IndexMap::new(),
            parent: None,
            references: 0,
            declaration: None,
            documentation: None,
        }
    }

    /// A `var`/`let`/`const` binding. `const` bindings are read-only constants.
    pub fn variable(name: impl Into<String>, declaration_kind: DeclarationKind, type_id: TypeId) -> Self {
        let kind = if declaration_kind == DeclarationKind::Const {
            SymbolKind::Constant
        } else {
            SymbolKind::Variable
        };
        let mut symbol = Symbol::new(name, kind, type_id).with_declaration_kind(declaration_kind);
        if declaration_kind == DeclarationKind::Const {
            symbol.flags |= SymbolFlags::READONLY;
        }
        symbol
    }

    #[must_use]
    pub fn with_declaration_kind(mut self, declaration_kind: DeclarationKind) -> Self {
        self.declaration_kind = Some(declaration_kind);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: SymbolFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_declaration(mut self, range: TextRange) -> Self {
        self.declaration = Some(range);
        self
    }

    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.flags.contains(SymbolFlags::READONLY)
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(SymbolFlags::STATIC)
    }

    /// Project the symbol into a completion entry. `detail` is the display
    /// of the symbol's type.
    pub fn to_completion_item(&self, interner: &TypeInterner) -> CompletionItem {
        CompletionItem {
            label: self.name.clone(),
            kind: self.kind.completion_kind(),
            detail: interner.display(self.type_id),
            documentation: self.documentation.clone(),
            insert_text: self.name.clone(),
            is_static: self.is_static(),
            is_read_only: self.is_read_only(),
        }
    }
}

/// Completion kinds understood by the editor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionKind {
    Variable,
    Constant,
    Function,
    Method,
    Class,
    Interface,
    Property,
    Enum,
    EnumMember,
    Module,
    Builtin,
    Text,
}

impl CompletionKind {
    /// Wire name, identical to the serialised form.
    pub const fn as_str(self) -> &'static str {
        match self {
            CompletionKind::Variable => "variable",
            CompletionKind::Constant => "constant",
            CompletionKind::Function => "function",
            CompletionKind::Method => "method",
            CompletionKind::Class => "class",
            CompletionKind::Interface => "interface",
            CompletionKind::Property => "property",
            CompletionKind::Enum => "enum",
            CompletionKind::EnumMember => "enumMember",
            CompletionKind::Module => "module",
            CompletionKind::Builtin => "builtin",
            CompletionKind::Text => "text",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: String,
    pub documentation: Option<String>,
    pub insert_text: String,
    pub is_static: bool,
    pub is_read_only: bool,
}

/// Owning storage for symbols. Ids stay valid for the arena's lifetime.
#[derive(Clone, Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        SymbolArena {
            symbols: Vec::new(),
        }
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Add `member` to `owner`'s member map and link it back to the owner.
    /// A member with the same name replaces the earlier entry.
    pub fn add_member(&mut self, owner: SymbolId, mut member: Symbol) -> SymbolId {
        member.parent = Some(owner);
        let name = member.name.clone();
        let id = self.alloc(member);
        if let Some(owner) = self.get_mut(owner) {
            owner.members.insert(name, id);
        }
        id
    }

    /// Ordered members of a symbol.
    pub fn members(&self, owner: SymbolId) -> Vec<SymbolId> {
        self.get(owner)
            .map(|symbol| symbol.members.values().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../tests/symbols_tests.rs"]
mod tests;
