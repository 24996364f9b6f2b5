use crate::Position;

use super::{
    statements::{Stmt, VarDecl},
    types::DataType,
};

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub data_type: DataType,
    pub position: Position,
}

/// A function definition, or a prototype when `body` is `None`.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub return_type: DataType,
    pub parameters: Vec<Parameter>,
    pub body: Option<Vec<Stmt>>,
    pub position: Position,
}

impl Function {
    pub fn is_definition(&self) -> bool {
        self.body.is_some()
    }

    /// Same name, return type and parameter types.
    pub fn same_signature(&self, other: &Function) -> bool {
        self.name == other.name
            && self.return_type == other.return_type
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(other.parameters.iter())
                .all(|(a, b)| a.data_type == b.data_type)
    }

    /// Renders the signature as `int(int, char*)`.
    pub fn signature(&self) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(|p| p.data_type.name())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.return_type, parameters)
    }
}

/// The root of a parsed translation unit.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub globals: Vec<VarDecl>,
    pub functions: Vec<Function>,
}

impl Module {
    /// The definition of `name` if there is one, otherwise its first prototype.
    pub fn find_function(&self, name: &str) -> Option<&Function> {
        self.functions
            .iter()
            .find(|f| f.name == name && f.is_definition())
            .or_else(|| self.functions.iter().find(|f| f.name == name))
    }
}
