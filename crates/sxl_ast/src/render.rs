//! Depth-indented, tag-bracketed rendering of the AST.
//!
//! Each node is printed as `<Tag>…</Tag>`: leaves carry their text inline,
//! interior nodes print their children indented one tab deeper. This is a
//! debugging and inspection format, not a round-trippable serialization.

use crate::ast::*;
use std::fmt::{Display, Formatter};

/// Renders the whole tree. Pure: the same tree always yields the same bytes.
pub fn render(program: &Program) -> String {
    let mut out = String::new();
    interior(&mut out, 0, "Program", |out| {
        for statement in &program.0 {
            write_statement(out, 1, statement);
        }
    });
    out
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render(self))
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

fn leaf(out: &mut String, depth: usize, tag: &str, text: &str) {
    indent(out, depth);
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(text);
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}

fn interior(out: &mut String, depth: usize, tag: &str, body: impl FnOnce(&mut String)) {
    indent(out, depth);
    out.push('<');
    out.push_str(tag);
    out.push_str(">\n");
    body(out);
    indent(out, depth);
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}

fn write_statement(out: &mut String, depth: usize, statement: &Statement) {
    match statement {
        Statement::FunctionDecl(decl) => interior(out, depth, "FunctionDecl", |out| {
            write_identifier(out, depth + 1, &decl.name);
            write_params(out, depth + 1, &decl.params);
            write_type(out, depth + 1, &decl.return_type);
            write_block(out, depth + 1, &decl.body);
        }),
        Statement::Assign(assign) => interior(out, depth, "Assignment", |out| {
            write_identifier(out, depth + 1, &assign.target);
            write_expression(out, depth + 1, &assign.value);
        }),
        Statement::Expr(expression) => write_expression(out, depth, expression),
        Statement::VariableDecl(decl) => interior(out, depth, "VariableDecl", |out| {
            write_identifier(out, depth + 1, &decl.name);
            write_type(out, depth + 1, &decl.ty);
            write_expression(out, depth + 1, &decl.value);
            if let Some(body) = &decl.body {
                write_block(out, depth + 1, body);
            }
        }),
        Statement::Read(target) => interior(out, depth, "Read", |out| {
            write_identifier(out, depth + 1, target);
        }),
        Statement::Write(source) => interior(out, depth, "Write", |out| {
            write_identifier(out, depth + 1, source);
        }),
        Statement::If(if_stmt) => interior(out, depth, "If", |out| {
            write_expression(out, depth + 1, &if_stmt.condition);
            write_statement(out, depth + 1, &if_stmt.then_branch);
            if let Some(else_branch) = &if_stmt.else_branch {
                write_statement(out, depth + 1, else_branch);
            }
        }),
        Statement::While(while_stmt) => interior(out, depth, "While", |out| {
            write_expression(out, depth + 1, &while_stmt.condition);
            write_statement(out, depth + 1, &while_stmt.body);
        }),
        Statement::Halt(halt) => interior(out, depth, "Halt", |out| match &halt.0 {
            Some(HaltCode::Integer(text)) => leaf(out, depth + 1, "IntegerLiteral", text),
            Some(HaltCode::Variable(name)) => write_identifier(out, depth + 1, name),
            None => {}
        }),
        Statement::Block(block) => write_block(out, depth, block),
    }
}

fn write_block(out: &mut String, depth: usize, block: &Block) {
    interior(out, depth, "Block", |out| {
        for statement in &block.0 {
            write_statement(out, depth + 1, statement);
        }
    });
}

fn write_params(out: &mut String, depth: usize, params: &Params) {
    interior(out, depth, "Params", |out| {
        for param in &params.0 {
            interior(out, depth + 1, "Param", |out| {
                write_identifier(out, depth + 2, &param.name);
                write_type(out, depth + 2, &param.ty);
            });
        }
    });
}

fn write_expression(out: &mut String, depth: usize, expression: &Expression) {
    interior(out, depth, "Expression", |out| {
        write_expr(out, depth + 1, &expression.0);
    });
}

fn write_expr(out: &mut String, depth: usize, expr: &Expr) {
    match expr {
        Expr::Literal(literal) => leaf(out, depth, literal_tag(literal.kind), &literal.text),
        Expr::Identifier(identifier) => write_identifier(out, depth, identifier),
        Expr::Binary(binary) => interior(out, depth, binary_tag(binary.op), |out| {
            write_expr(out, depth + 1, &binary.left);
            write_expr(out, depth + 1, &binary.right);
        }),
        Expr::Unary(unary) => interior(out, depth, "Unary", |out| {
            leaf(out, depth + 1, "UnaryOp", unary.op.spelling());
            write_expression(out, depth + 1, &unary.operand);
        }),
        Expr::Call(call) => interior(out, depth, "FunctionCall", |out| {
            write_identifier(out, depth + 1, &call.name);
            interior(out, depth + 1, "Args", |out| {
                for arg in &call.args.0 {
                    write_expression(out, depth + 2, arg);
                }
            });
        }),
        Expr::Cast(cast) => interior(out, depth, "TypeCast", |out| {
            write_type(out, depth + 1, &cast.ty);
            write_expression(out, depth + 1, &cast.operand);
        }),
        Expr::Sub(expression) => write_expression(out, depth, expression),
    }
}

fn write_identifier(out: &mut String, depth: usize, identifier: &Identifier) {
    leaf(out, depth, "Identifier", &identifier.0);
}

fn write_type(out: &mut String, depth: usize, ty: &TypeName) {
    leaf(out, depth, "Type", ty.spelling());
}

fn literal_tag(kind: LiteralKind) -> &'static str {
    match kind {
        LiteralKind::Integer => "IntegerLiteral",
        LiteralKind::Real => "RealLiteral",
        LiteralKind::Char => "CharLiteral",
        LiteralKind::Str => "StringLiteral",
        LiteralKind::Boolean => "BooleanLiteral",
        LiteralKind::Unit => "UnitLiteral",
    }
}

fn binary_tag(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "Add",
        BinaryOp::Subt => "Subt",
        BinaryOp::Mult => "Mult",
        BinaryOp::Div => "Div",
        BinaryOp::Or => "Or",
        BinaryOp::And => "And",
        BinaryOp::Greater => "Greater",
        BinaryOp::Lesser => "Lesser",
        BinaryOp::Equals => "Equals",
        BinaryOp::NotEquals => "NotEquals",
        BinaryOp::GreaterEquals => "GreaterEquals",
        BinaryOp::LesserEquals => "LesserEquals",
    }
}
