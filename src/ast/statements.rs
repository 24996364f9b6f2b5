use crate::Position;

use super::{expressions::Expr, types::DataType};

/// A variable declaration, global or local.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub data_type: DataType,
    pub initializer: Option<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Block(Vec<Stmt>),
    VarDecl(VarDecl),
    If {
        condition: Expr,
        body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    Continue,
    Break,
    Return(Option<Expr>),
    Expression(Expr),
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub position: Position,
}

impl Stmt {
    pub fn new(kind: StmtKind, position: Position) -> Self {
        Stmt { kind, position }
    }
}
