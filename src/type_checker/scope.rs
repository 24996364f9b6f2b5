use indexmap::IndexMap;

use crate::{
    ast::{ast::Function, types::DataType},
    errors::errors::{Error, ErrorImpl},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Argument,
}

/// A named entity visible in some scope.
#[derive(Debug, Clone)]
pub struct Symbol<'a> {
    pub name: String,
    /// Declared type; the return type for functions.
    pub data_type: DataType,
    pub kind: SymbolKind,
    /// Zero-based position in the parameter list, arguments only.
    pub arg_index: Option<usize>,
    /// The declaration a function symbol refers to: the definition once one
    /// has been seen, otherwise the prototype.
    pub function: Option<&'a Function>,
    pub position: Position,
}

impl<'a> Symbol<'a> {
    pub fn variable(name: &str, data_type: DataType, position: Position) -> Self {
        Symbol {
            name: name.to_string(),
            data_type,
            kind: SymbolKind::Variable,
            arg_index: None,
            function: None,
            position,
        }
    }

    pub fn argument(name: &str, data_type: DataType, index: usize, position: Position) -> Self {
        Symbol {
            name: name.to_string(),
            data_type,
            kind: SymbolKind::Argument,
            arg_index: Some(index),
            function: None,
            position,
        }
    }

    pub fn function(function: &'a Function) -> Self {
        Symbol {
            name: function.name.clone(),
            data_type: function.return_type.clone(),
            kind: SymbolKind::Function,
            arg_index: None,
            function: Some(function),
            position: function.position.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Function,
    Block,
}

/// One level of the scope chain. Symbols keep their declaration order.
#[derive(Debug)]
pub struct Scope<'a> {
    pub kind: ScopeKind,
    symbols: IndexMap<String, Symbol<'a>>,
}

impl<'a> Scope<'a> {
    pub fn new(kind: ScopeKind) -> Self {
        Scope {
            kind,
            symbols: IndexMap::new(),
        }
    }

    pub fn declare(&mut self, symbol: Symbol<'a>) -> Result<(), Error> {
        if self.symbols.contains_key(&symbol.name) {
            Err(Error::new(
                ErrorImpl::SymbolAlreadyDeclared {
                    symbol: symbol.name,
                },
                symbol.position,
            ))
        } else {
            self.symbols.insert(symbol.name.clone(), symbol);
            Ok(())
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol<'a>> {
        self.symbols.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol<'a>> {
        self.symbols.get_mut(name)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol<'a>> {
        self.symbols.values()
    }
}

/// The stack of open scopes. The module scope sits at the bottom and is
/// never popped.
#[derive(Debug)]
pub struct ScopeChain<'a> {
    scopes: Vec<Scope<'a>>,
}

impl<'a> Default for ScopeChain<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ScopeChain<'a> {
    pub fn new() -> Self {
        ScopeChain {
            scopes: vec![Scope::new(ScopeKind::Module)],
        }
    }

    pub fn push(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope::new(kind));
    }

    pub fn pop(&mut self) -> Option<Scope<'a>> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Declares `symbol` in the innermost scope.
    pub fn declare(&mut self, symbol: Symbol<'a>) -> Result<(), Error> {
        self.current_mut().declare(symbol)
    }

    /// Innermost-outward lookup; the first match wins.
    pub fn lookup(&self, name: &str) -> Option<&Symbol<'a>> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn current(&self) -> &Scope<'a> {
        // the module scope is never popped
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Scope<'a> {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    pub fn module(&self) -> &Scope<'a> {
        &self.scopes[0]
    }

    pub fn module_mut(&mut self) -> &mut Scope<'a> {
        &mut self.scopes[0]
    }
}
