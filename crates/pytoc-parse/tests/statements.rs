use pytoc_ast::ast::{Expr, Lit, Stmt};
use pytoc_parse::{parse_str, DiagKind, ParseOutput};

/// Helper: parse and require a clean run.
fn parse_clean(src: &str) -> ParseOutput {
    let out = parse_str(src).expect("parse ok");
    assert_eq!(
        out.diagnostics.error_count(),
        0,
        "unexpected diagnostics: {:?}",
        out.diagnostics.iter().collect::<Vec<_>>()
    );
    out
}

#[test]
fn assignment_statement() {
    let out = parse_clean("x = 1\n");
    assert_eq!(out.program.body.len(), 1);
    let Stmt::Assign { target, value } = &out.program.body[0] else {
        panic!("expected Assign");
    };
    assert_eq!(target, "x");
    assert!(matches!(value, Expr::Lit(Lit::Int(1))));
    assert_eq!(out.symbols.names(), ["x".to_string()]);
}

#[test]
fn if_block_with_assignment() {
    let out = parse_clean("x = 1\nif x > 0:\n    y = x + 2\n");
    assert_eq!(out.program.body.len(), 2);
    let Stmt::If {
        cond,
        then_body,
        elifs,
        else_body,
    } = &out.program.body[1]
    else {
        panic!("expected If");
    };
    assert!(matches!(cond, Expr::Binary { .. }));
    assert_eq!(then_body.len(), 1);
    assert!(matches!(&then_body[0], Stmt::Assign { target, .. } if target == "y"));
    assert!(elifs.is_empty());
    assert!(else_body.is_none());
    assert_eq!(out.symbols.names(), ["x".to_string(), "y".to_string()]);
}

#[test]
fn if_elif_else_chain() {
    let src = "\
x = 1
if x == 1:
    y = 1
elif x == 2:
    y = 2
elif x == 3:
    y = 3
else:
    y = 4
";
    let out = parse_clean(src);
    let Stmt::If {
        elifs, else_body, ..
    } = &out.program.body[1]
    else {
        panic!("expected If");
    };
    assert_eq!(elifs.len(), 2);
    assert!(matches!(&elifs[1].cond, Expr::Binary { .. }));
    assert_eq!(else_body.as_ref().map(Vec::len), Some(1));
}

#[test]
fn while_with_break() {
    let src = "\
x = 0
while x < 10:
    x = x + 1
    if x == 5:
        break
";
    let out = parse_clean(src);
    let Stmt::While { cond, body } = &out.program.body[1] else {
        panic!("expected While");
    };
    assert!(matches!(cond, Expr::Binary { .. }));
    assert_eq!(body.len(), 2);
    let Stmt::If { then_body, .. } = &body[1] else {
        panic!("expected If inside While");
    };
    assert!(matches!(then_body[0], Stmt::Break));
}

#[test]
fn nested_blocks() {
    let src = "\
a = 1
if a:
    if a:
        if a:
            b = 2
";
    let out = parse_clean(src);
    let Stmt::If { then_body, .. } = &out.program.body[1] else {
        panic!("expected If");
    };
    let Stmt::If { then_body, .. } = &then_body[0] else {
        panic!("expected nested If");
    };
    let Stmt::If { then_body, .. } = &then_body[0] else {
        panic!("expected doubly nested If");
    };
    assert!(matches!(&then_body[0], Stmt::Assign { target, .. } if target == "b"));
}

#[test]
fn declaration_order_is_first_assignment_order() {
    let out = parse_clean("b = 1\na = 2\nb = 3\nc = a\n");
    assert_eq!(
        out.symbols.names(),
        ["b".to_string(), "a".to_string(), "c".to_string()]
    );
}

#[test]
fn reassignment_does_not_duplicate_declaration() {
    let out = parse_clean("x = 1\nx = 2\nx = 3\n");
    assert_eq!(out.symbols.len(), 1);
}

#[test]
fn comment_only_file_is_empty_and_clean() {
    let out = parse_clean("# just a comment\n\n   # another\n");
    assert!(out.program.body.is_empty());
    assert!(out.symbols.is_empty());
}

#[test]
fn stray_indent_is_reported_and_skipped() {
    let out = parse_str("    x = 1\n").expect("parse ok");
    let strays = out
        .diagnostics
        .iter()
        .filter(|d| matches!(d.kind, DiagKind::StrayIndent))
        .count();
    assert_eq!(strays, 1);
    // the statement after the stray indent still parses
    assert_eq!(out.program.body.len(), 1);
    assert!(out.symbols.is_declared("x"));
}
