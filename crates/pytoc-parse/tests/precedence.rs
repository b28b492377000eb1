use pytoc_ast::ast::{BinOp, Expr, Lit, Stmt, UnOp};
use pytoc_parse::{parse_str, DiagKind};

/// Helper: parse `v = <src>` and return the value expression.
/// Literal-only sources keep the symbol table out of the picture.
fn val(src: &str) -> Expr {
    let out = parse_str(&format!("v = {src}\n")).expect("parse ok");
    assert_eq!(out.diagnostics.error_count(), 0);
    let Stmt::Assign { value, .. } = &out.program.body[0] else {
        panic!("expected Assign");
    };
    value.clone()
}

#[test]
fn arithmetic_relational_logical_layers() {
    // ((1 + 2*3 == 7) and (4 < 5)) or (0 == 1)
    let e = val("1 + 2*3 == 7 and 4 < 5 or 0 == 1");
    let Expr::Binary {
        op: BinOp::Or,
        lhs,
        rhs,
    } = e
    else {
        panic!("top should be Or");
    };
    assert!(matches!(*lhs, Expr::Binary { op: BinOp::And, .. }));
    assert!(matches!(*rhs, Expr::Binary { op: BinOp::Eq, .. }));
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let e = val("1 + 2 * 3");
    let Expr::Binary {
        op: BinOp::Add,
        rhs,
        ..
    } = e
    else {
        panic!("top should be Add");
    };
    assert!(matches!(*rhs, Expr::Binary { op: BinOp::Mul, .. }));
}

#[test]
fn addition_is_left_associative() {
    let e = val("1 - 2 + 3");
    let Expr::Binary {
        op: BinOp::Add,
        lhs,
        ..
    } = e
    else {
        panic!("top should be Add");
    };
    assert!(matches!(*lhs, Expr::Binary { op: BinOp::Sub, .. }));
}

#[test]
fn not_binds_looser_than_comparison() {
    // not (1 == 2), never (not 1) == 2
    let e = val("not 1 == 2");
    let Expr::Unary {
        op: UnOp::Not,
        expr,
    } = e
    else {
        panic!("top should be Not");
    };
    assert!(matches!(*expr, Expr::Binary { op: BinOp::Eq, .. }));
}

#[test]
fn not_binds_tighter_than_and() {
    // (not True) and False
    let e = val("not True and False");
    let Expr::Binary {
        op: BinOp::And,
        lhs,
        ..
    } = e
    else {
        panic!("top should be And");
    };
    assert!(matches!(*lhs, Expr::Unary { op: UnOp::Not, .. }));
}

#[test]
fn double_negation_is_right_associative() {
    let e = val("not not True");
    let Expr::Unary {
        op: UnOp::Not,
        expr,
    } = e
    else {
        panic!("top should be Not");
    };
    assert!(matches!(*expr, Expr::Unary { op: UnOp::Not, .. }));
}

#[test]
fn unary_minus_binds_tightest() {
    // (-2) + 3, never -(2 + 3)
    let e = val("-2 + 3");
    let Expr::Binary {
        op: BinOp::Add,
        lhs,
        ..
    } = e
    else {
        panic!("top should be Add");
    };
    assert!(matches!(*lhs, Expr::Unary { op: UnOp::Neg, .. }));
}

#[test]
fn unary_minus_in_subtraction() {
    let e = val("1 - -2");
    let Expr::Binary {
        op: BinOp::Sub,
        rhs,
        ..
    } = e
    else {
        panic!("top should be Sub");
    };
    assert!(matches!(*rhs, Expr::Unary { op: UnOp::Neg, .. }));
}

#[test]
fn parentheses_override_precedence() {
    let e = val("(1 + 2) * 3");
    let Expr::Binary {
        op: BinOp::Mul,
        lhs,
        ..
    } = e
    else {
        panic!("top should be Mul");
    };
    let Expr::Paren(inner) = *lhs else {
        panic!("lhs should be parenthesized");
    };
    assert!(matches!(*inner, Expr::Binary { op: BinOp::Add, .. }));
}

#[test]
fn comparison_layers_are_non_associative() {
    let out = parse_str("v = 1 < 2 < 3\n").expect("parse ok");
    let syntax_errors = out
        .diagnostics
        .iter()
        .filter(|d| matches!(d.kind, DiagKind::SyntaxError(_)))
        .count();
    assert_eq!(syntax_errors, 1);
    // recovered: nothing was produced for the malformed line
    assert!(out.program.body.is_empty());
}

#[test]
fn mixed_comparison_chain_is_rejected() {
    let out = parse_str("v = 1 == 2 != 3\n").expect("parse ok");
    assert!(out
        .diagnostics
        .iter()
        .any(|d| matches!(d.kind, DiagKind::SyntaxError(_))));
}

#[test]
fn relational_operators_parse() {
    for (src, op) in [
        ("1 < 2", BinOp::Lt),
        ("1 <= 2", BinOp::Le),
        ("1 > 2", BinOp::Gt),
        ("1 >= 2", BinOp::Ge),
        ("1 == 2", BinOp::Eq),
        ("1 != 2", BinOp::Ne),
    ] {
        let e = val(src);
        assert!(
            matches!(e, Expr::Binary { op: got, .. } if got == op),
            "source {src:?} should parse as {op:?}"
        );
    }
}

#[test]
fn boolean_literals() {
    assert!(matches!(val("True"), Expr::Lit(Lit::Bool(true))));
    assert!(matches!(val("False"), Expr::Lit(Lit::Bool(false))));
}
