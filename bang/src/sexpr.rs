// S-expression formatter for the Bang AST
// Renders a parsed program as readable Lisp-like text for `bang parse`

use bang_parser::{Node, NodeKind};

pub fn format_program_as_sexpr(program: &Node) -> String {
    let statements = format_statements(program, 2);
    match statements.as_slice() {
        [] => "(program)".to_string(),
        [single] => format!("(program {single})"),
        many => format!("(program{})", indented(many, 2)),
    }
}

fn format_statements(list: &Node, indent: usize) -> Vec<String> {
    list.statements()
        .into_iter()
        .map(|statement| format_node_with_indent(statement, indent))
        .collect()
}

fn indented(items: &[String], indent: usize) -> String {
    let pad = " ".repeat(indent);
    items.iter().map(|item| format!("\n{pad}{item}")).collect()
}

fn format_node_with_indent(node: &Node, indent: usize) -> String {
    match &node.kind {
        // Spines reached through `format_statements` are already flattened;
        // this covers a list formatted on its own
        NodeKind::StatementList { .. } => {
            format!("(block{})", indented(&format_statements(node, indent + 2), indent + 2))
        }
        NodeKind::Let {
            identifier,
            expression,
        } => format!(
            "(let {identifier} {})",
            format_node_with_indent(expression, indent + 2)
        ),
        NodeKind::Print(expression) => {
            format!("(print {})", format_node_with_indent(expression, indent + 2))
        }
        NodeKind::If { condition, body } => format_block("if", condition, body, indent),
        NodeKind::Loop { condition, body } => format_block("loop", condition, body, indent),
        NodeKind::Binary {
            operator,
            left,
            right,
        } => {
            let left = format_node_with_indent(left, indent + 2);
            let right = format_node_with_indent(right, indent + 2);

            // Simple expressions on one line
            if !left.contains('\n') && !right.contains('\n') && left.len() + right.len() < 50 {
                format!("({operator} {left} {right})")
            } else {
                let pad = " ".repeat(indent + 2);
                format!("({operator}\n{pad}{left}\n{pad}{right})")
            }
        }
        NodeKind::Bang(operand) => format!("(! {})", format_node_with_indent(operand, indent + 2)),
        NodeKind::IntLiteral(value) => format!("(integer {value})"),
        NodeKind::StringLiteral(text) => format_string(text),
        NodeKind::Identifier(name) => name.clone(),
    }
}

fn format_block(keyword: &str, condition: &Node, body: &Node, indent: usize) -> String {
    let condition = format_node_with_indent(condition, indent + 2);
    let body = format_statements(body, indent + 2);
    format!("({keyword} {condition}{})", indented(&body, indent + 2))
}

fn format_string(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}
