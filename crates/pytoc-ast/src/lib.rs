#![forbid(unsafe_code)]
#![deny(unused_must_use)]

pub mod ast {
    use serde::Serialize;

    /// A whole source file: the statements of the single global frame.
    #[derive(Debug, Default, Serialize)]
    pub struct Program {
        pub body: Vec<Stmt>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub enum Stmt {
        Assign {
            target: String,
            value: Expr,
        },
        If {
            cond: Expr,
            then_body: Vec<Stmt>,
            /// `elif` arms, in source order.
            elifs: Vec<ElifArm>,
            else_body: Option<Vec<Stmt>>,
        },
        While {
            cond: Expr,
            body: Vec<Stmt>,
        },
        Break,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct ElifArm {
        pub cond: Expr,
        pub body: Vec<Stmt>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub enum Expr {
        Lit(Lit),
        Var(String),
        Unary {
            op: UnOp,
            expr: Box<Expr>,
        },
        Binary {
            lhs: Box<Expr>,
            op: BinOp,
            rhs: Box<Expr>,
        },
        /// Explicitly parenthesized sub-expression; kept so the emitter
        /// reproduces the parentheses verbatim.
        Paren(Box<Expr>),
    }

    #[derive(Debug, Clone, Copy, Serialize)]
    pub enum UnOp {
        Not,
        Neg,
    }

    #[derive(Debug, Clone, Serialize)]
    pub enum Lit {
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum BinOp {
        // logical
        Or,
        And,
        // equality
        Eq,
        Ne,
        // relational
        Lt,
        Le,
        Gt,
        Ge,
        // arithmetic
        Add,
        Sub,
        Mul,
        Div,
    }

    impl BinOp {
        /// True for the non-associative comparison layer.
        pub fn is_comparison(self) -> bool {
            matches!(
                self,
                BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
            )
        }
    }
}
