// Expression parsing tests
// Precedence, associativity and line stamping of operator nodes

use bang_parser::{parse_program, BinaryOperator, Node, NodeKind};

// Helper function to extract the expression printed by the first statement
fn extract_printed_expression(program: &Node) -> &Node {
    match &program.statements()[0].kind {
        NodeKind::Print(expression) => expression,
        other => panic!("Expected print statement, got: {other:?}"),
    }
}

// Helper function to extract a binary operation from an expression
fn extract_binary(expr: &Node) -> (BinaryOperator, &Node, &Node) {
    match &expr.kind {
        NodeKind::Binary {
            operator,
            left,
            right,
        } => (*operator, left, right),
        other => panic!("Expected binary operation, got: {other:?}"),
    }
}

fn assert_int(expr: &Node, expected: i64) {
    match &expr.kind {
        NodeKind::IntLiteral(value) => assert_eq!(*value, expected),
        other => panic!("Expected integer literal {expected}, got: {other:?}"),
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    // Should parse as: 1 + (2 * 3)
    let program = parse_program("print 1 + 2 * 3").unwrap();
    let (operator, left, right) = extract_binary(extract_printed_expression(&program));

    assert_eq!(operator, BinaryOperator::Plus);
    assert_int(left, 1);

    let (inner, inner_left, inner_right) = extract_binary(right);
    assert_eq!(inner, BinaryOperator::Times);
    assert_int(inner_left, 2);
    assert_int(inner_right, 3);
}

#[test]
fn test_subtraction_is_left_associative() {
    // Should parse as: (10 - 4) - 3
    let program = parse_program("print 10 - 4 - 3").unwrap();
    let (operator, left, right) = extract_binary(extract_printed_expression(&program));

    assert_eq!(operator, BinaryOperator::Minus);
    assert_int(right, 3);

    let (inner, inner_left, inner_right) = extract_binary(left);
    assert_eq!(inner, BinaryOperator::Minus);
    assert_int(inner_left, 10);
    assert_int(inner_right, 4);
}

#[test]
fn test_division_is_left_associative() {
    // Should parse as: (8 / 4) / 2
    let program = parse_program("print 8 / 4 / 2").unwrap();
    let (operator, left, _) = extract_binary(extract_printed_expression(&program));

    assert_eq!(operator, BinaryOperator::Divide);
    assert!(matches!(
        left.kind,
        NodeKind::Binary {
            operator: BinaryOperator::Divide,
            ..
        }
    ));
}

#[test]
fn test_parentheses_override_precedence() {
    // Should parse as: (1 + 2) * 3
    let program = parse_program("print (1 + 2) * 3").unwrap();
    let (operator, left, right) = extract_binary(extract_printed_expression(&program));

    assert_eq!(operator, BinaryOperator::Times);
    assert_int(right, 3);
    assert_eq!(extract_binary(left).0, BinaryOperator::Plus);
}

#[test]
fn test_bang_binds_to_factor() {
    // Should parse as: (!12) + 3
    let program = parse_program("print !12 + 3").unwrap();
    let (operator, left, right) = extract_binary(extract_printed_expression(&program));

    assert_eq!(operator, BinaryOperator::Plus);
    assert_int(right, 3);
    match &left.kind {
        NodeKind::Bang(operand) => assert_int(operand, 12),
        other => panic!("Expected bang, got: {other:?}"),
    }
}

#[test]
fn test_nested_bang() {
    let program = parse_program("print !!\"abc\"").unwrap();
    let expression = extract_printed_expression(&program);

    match &expression.kind {
        NodeKind::Bang(inner) => match &inner.kind {
            NodeKind::Bang(operand) => {
                assert_eq!(operand.kind, NodeKind::StringLiteral("abc".to_string()))
            }
            other => panic!("Expected inner bang, got: {other:?}"),
        },
        other => panic!("Expected bang, got: {other:?}"),
    }
}

#[test]
fn test_operator_nodes_carry_operator_line() {
    let program = parse_program("print 1\n+\n2").unwrap();
    let expression = extract_printed_expression(&program);

    assert_eq!(expression.line, 2);
    assert_eq!(program.statements()[0].line, 1);
}

#[test]
fn test_identifier_operands() {
    let program = parse_program("print a * b").unwrap();
    let (_, left, right) = extract_binary(extract_printed_expression(&program));

    assert_eq!(left.kind, NodeKind::Identifier("a".to_string()));
    assert_eq!(right.kind, NodeKind::Identifier("b".to_string()));
}
