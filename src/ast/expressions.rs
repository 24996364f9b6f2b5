use once_cell::unsync::OnceCell;

use crate::Position;

use super::types::DataType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Plus,
    LogicalNot,
    BitwiseNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    AddressOf,
    Dereference,
    Sizeof,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Plus => "+",
            UnaryOp::LogicalNot => "!",
            UnaryOp::BitwiseNot => "~",
            UnaryOp::PreIncrement | UnaryOp::PostIncrement => "++",
            UnaryOp::PreDecrement | UnaryOp::PostDecrement => "--",
            UnaryOp::AddressOf => "&",
            UnaryOp::Dereference => "*",
            UnaryOp::Sizeof => "sizeof",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Multiply,
    Divide,
    Modulo,
    Add,
    Subtract,
    ShiftLeft,
    ShiftRight,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LogicalAnd,
    LogicalOr,
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    Comma,
    Subscript,
    Member,
    PointerMember,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::Less => "<",
            BinaryOp::LessEquals => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::BitwiseAnd => "&",
            BinaryOp::BitwiseOr => "|",
            BinaryOp::BitwiseXor => "^",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::Assign => "=",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubtractAssign => "-=",
            BinaryOp::MultiplyAssign => "*=",
            BinaryOp::DivideAssign => "/=",
            BinaryOp::ModuloAssign => "%=",
            BinaryOp::AndAssign => "&=",
            BinaryOp::OrAssign => "|=",
            BinaryOp::XorAssign => "^=",
            BinaryOp::ShiftLeftAssign => "<<=",
            BinaryOp::ShiftRightAssign => ">>=",
            BinaryOp::Comma => ",",
            BinaryOp::Subscript => "[]",
            BinaryOp::Member => ".",
            BinaryOp::PointerMember => "->",
        }
    }

    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            BinaryOp::Assign
                | BinaryOp::AddAssign
                | BinaryOp::SubtractAssign
                | BinaryOp::MultiplyAssign
                | BinaryOp::DivideAssign
                | BinaryOp::ModuloAssign
                | BinaryOp::AndAssign
                | BinaryOp::OrAssign
                | BinaryOp::XorAssign
                | BinaryOp::ShiftLeftAssign
                | BinaryOp::ShiftRightAssign
        )
    }
}

/// Expression shapes. The variant fixes how many children a node has.
#[derive(Debug, Clone)]
pub enum ExprKind {
    Symbol(String),
    Number(i64),
    Float(f64),
    Char(u8),
    Str(String),
    Bool(bool),
    /// `sizeof(type)`
    SizeofType(DataType),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Cast {
        target: DataType,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `args` is a right-leaning chain of `Comma` nodes, or absent for `f()`.
    Call {
        callee: Box<Expr>,
        args: Option<Box<Expr>>,
    },
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub position: Position,
    /// Written once by the type checker.
    resolved_type: OnceCell<DataType>,
}

impl Expr {
    pub fn new(kind: ExprKind, position: Position) -> Self {
        Expr {
            kind,
            position,
            resolved_type: OnceCell::new(),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr, position: Position) -> Self {
        Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            position,
        )
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr, position: Position) -> Self {
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            position,
        )
    }

    /// The type recorded by the type checker, if it has run.
    pub fn resolved_type(&self) -> Option<&DataType> {
        self.resolved_type.get()
    }

    /// Stores `data_type` unless a type was already recorded, and returns
    /// whichever type ends up in the slot.
    pub fn resolve_type(&self, data_type: DataType) -> &DataType {
        self.resolved_type.get_or_init(|| data_type)
    }

    /// Flattens a right-leaning comma chain into its elements, left to right.
    pub fn flatten_comma(&self) -> Vec<&Expr> {
        let mut items = vec![];
        let mut current = self;
        while let ExprKind::Binary {
            op: BinaryOp::Comma,
            left,
            right,
        } = &current.kind
        {
            items.push(left.as_ref());
            current = right;
        }
        items.push(current);
        items
    }

    /// Call arguments in order; empty for a call without arguments or a
    /// non-call expression.
    pub fn call_arguments(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Call {
                args: Some(args), ..
            } => args.flatten_comma(),
            _ => vec![],
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Symbol(name) => Some(name),
            _ => None,
        }
    }
}

/// Fully parenthesized rendering, used for debugging and tests.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExprKind::Symbol(name) => write!(f, "{}", name),
            ExprKind::Number(value) => write!(f, "{}", value),
            ExprKind::Float(value) => write!(f, "{:?}", value),
            ExprKind::Char(value) => write!(f, "{:?}", *value as char),
            ExprKind::Str(value) => write!(f, "{:?}", value),
            ExprKind::Bool(value) => write!(f, "{}", value),
            ExprKind::SizeofType(data_type) => write!(f, "sizeof({})", data_type),
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::PostIncrement | UnaryOp::PostDecrement => {
                    write!(f, "({}{})", operand, op.symbol())
                }
                UnaryOp::Sizeof => write!(f, "(sizeof {})", operand),
                _ => write!(f, "({}{})", op.symbol(), operand),
            },
            ExprKind::Cast { target, operand } => write!(f, "(({}) {})", target, operand),
            ExprKind::Binary { op, left, right } => match op {
                BinaryOp::Subscript => write!(f, "{}[{}]", left, right),
                BinaryOp::Member | BinaryOp::PointerMember => {
                    write!(f, "{}{}{}", left, op.symbol(), right)
                }
                BinaryOp::Comma => write!(f, "{}, {}", left, right),
                _ => write!(f, "({} {} {})", left, op.symbol(), right),
            },
            ExprKind::Call { callee, args } => match args {
                Some(args) => write!(f, "{}({})", callee, args),
                None => write!(f, "{}()", callee),
            },
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => write!(f, "({} ? {} : {})", condition, then_expr, else_expr),
        }
    }
}
