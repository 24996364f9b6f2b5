//! Type system definitions for the AST.
//!
//! A [`DataType`] is a small tree: a family tag plus, for pointers and arrays,
//! one nested type. Equality is structural. The rendered name is computed at
//! most once per node and cached.
//!
//! These operations are also the contract with the code generator, which
//! only ever calls [`DataType::size_of`], [`DataType::name`] and `==`.

use std::fmt::Display;

use once_cell::unsync::OnceCell;

use crate::config::Target;

#[derive(Debug, Clone)]
pub enum TypeKind {
    Int,
    Float,
    Char,
    Bool,
    Void,
    Pointer(Box<DataType>),
    Array(Box<DataType>, usize),
    /// Stands in for a type that could not be derived.
    Unknown,
}

#[derive(Debug, Clone)]
pub struct DataType {
    kind: TypeKind,
    name: OnceCell<String>,
}

impl DataType {
    pub fn new(kind: TypeKind) -> Self {
        DataType {
            kind,
            name: OnceCell::new(),
        }
    }

    pub fn int() -> Self {
        DataType::new(TypeKind::Int)
    }

    pub fn float() -> Self {
        DataType::new(TypeKind::Float)
    }

    pub fn char() -> Self {
        DataType::new(TypeKind::Char)
    }

    pub fn bool() -> Self {
        DataType::new(TypeKind::Bool)
    }

    pub fn void() -> Self {
        DataType::new(TypeKind::Void)
    }

    pub fn unknown() -> Self {
        DataType::new(TypeKind::Unknown)
    }

    pub fn pointer(pointee: DataType) -> Self {
        DataType::new(TypeKind::Pointer(Box::new(pointee)))
    }

    pub fn array(element: DataType, length: usize) -> Self {
        DataType::new(TypeKind::Array(Box::new(element), length))
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Pointee of a pointer or element of an array.
    pub fn nested(&self) -> Option<&DataType> {
        match &self.kind {
            TypeKind::Pointer(nested) | TypeKind::Array(nested, _) => Some(nested),
            _ => None,
        }
    }

    /// Array length; zero for every other family.
    pub fn length(&self) -> usize {
        match self.kind {
            TypeKind::Array(_, length) => length,
            _ => 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.kind, TypeKind::Unknown)
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind, TypeKind::Void)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.kind, TypeKind::Bool)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.kind, TypeKind::Int | TypeKind::Char)
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer(_))
    }

    /// Bytes occupied by a value of this type. Saturates at `usize::MAX`.
    pub fn size_of(&self, target: &Target) -> usize {
        match &self.kind {
            TypeKind::Int | TypeKind::Float | TypeKind::Pointer(_) => target.word_size,
            TypeKind::Char | TypeKind::Bool => 1,
            TypeKind::Void | TypeKind::Unknown => 0,
            TypeKind::Array(element, length) => element.size_of(target).saturating_mul(*length),
        }
    }

    /// Renders the type, e.g. `int`, `char*`, `int[4]`.
    ///
    /// The string is built on the first call and reused afterwards.
    pub fn name(&self) -> &str {
        self.name.get_or_init(|| match &self.kind {
            TypeKind::Int => String::from("int"),
            TypeKind::Float => String::from("float"),
            TypeKind::Char => String::from("char"),
            TypeKind::Bool => String::from("bool"),
            TypeKind::Void => String::from("void"),
            TypeKind::Unknown => String::from("<unknown>"),
            TypeKind::Pointer(pointee) => format!("{}*", pointee.name()),
            TypeKind::Array(element, length) => format!("{}[{}]", element.name(), length),
        })
    }
}

// Structural: `unknown` never compares equal, not even to itself.
impl PartialEq for DataType {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (TypeKind::Int, TypeKind::Int)
            | (TypeKind::Float, TypeKind::Float)
            | (TypeKind::Char, TypeKind::Char)
            | (TypeKind::Bool, TypeKind::Bool)
            | (TypeKind::Void, TypeKind::Void) => true,
            (TypeKind::Pointer(a), TypeKind::Pointer(b)) => a == b,
            (TypeKind::Array(a, len_a), TypeKind::Array(b, len_b)) => len_a == len_b && a == b,
            _ => false,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
