//! Expression-level grammar rules.
//!
//! Both the additive and the multiplicative levels recurse on the right, so
//! chains of operators at the same level associate to the right. Factors are
//! an ordered choice; a bare identifier wins over anything longer that
//! starts with one.

use crate::parser::error::{ErrorKind, ParseResult, SyntaxError};
use crate::parser::Parser;
use sxl_ast::{
    Args, Binary, BinaryOp, Call, Cast, Expr, Expression, Identifier, Literal, LiteralKind,
    TypeName, Unary, UnaryOp,
};
use sxl_tokens::{Token, TokenKind};

pub(super) fn parse_expression(p: &mut Parser) -> ParseResult<Expression> {
    let left = parse_simple_expression(p)?;
    if let Some(op_token) = p.consume_if_kind(TokenKind::RelOp) {
        let op = rel_op(&op_token)?;
        let right = parse_simple_expression(p)?;
        return Ok(Expression(Box::new(Expr::Binary(Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }))));
    }
    Ok(Expression(Box::new(left)))
}

fn parse_simple_expression(p: &mut Parser) -> ParseResult<Expr> {
    let left = parse_term(p)?;
    if let Some(op_token) = p.consume_if_kind(TokenKind::AddOp) {
        let op = add_op(&op_token)?;
        let right = parse_simple_expression(p)?;
        return Ok(Expr::Binary(Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }));
    }
    Ok(left)
}

fn parse_term(p: &mut Parser) -> ParseResult<Expr> {
    let left = parse_factor(p)?;
    if let Some(op_token) = p.consume_if_kind(TokenKind::MultOp) {
        let op = mult_op(&op_token)?;
        let right = parse_term(p)?;
        return Ok(Expr::Binary(Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }));
    }
    Ok(left)
}

fn parse_factor(p: &mut Parser) -> ParseResult<Expr> {
    if let Ok(literal) = p.attempt(parse_literal) {
        return Ok(Expr::Literal(literal));
    }
    if let Ok(identifier) = p.attempt(parse_identifier) {
        return Ok(Expr::Identifier(identifier));
    }
    if let Ok(call) = p.attempt(parse_function_call) {
        return Ok(Expr::Call(call));
    }
    if let Ok(cast) = p.attempt(parse_type_cast) {
        return Ok(Expr::Cast(cast));
    }
    if let Ok(sub) = p.attempt(parse_sub_expression) {
        return Ok(Expr::Sub(sub));
    }
    if let Ok(unary) = p.attempt(parse_unary) {
        return Ok(Expr::Unary(unary));
    }
    let found = p.current().clone();
    let position = found.position();
    Err(SyntaxError::new(
        ErrorKind::expected(
            ["literal", "identifier", "\"(\"", "unary operator"],
            found,
        ),
        position,
    ))
}

fn parse_literal(p: &mut Parser) -> ParseResult<Literal> {
    let kind = match p.current().kind() {
        TokenKind::IntegerLiteral => LiteralKind::Integer,
        TokenKind::RealLiteral => LiteralKind::Real,
        TokenKind::CharLiteral => LiteralKind::Char,
        TokenKind::StringLiteral => LiteralKind::Str,
        TokenKind::BooleanLiteral => LiteralKind::Boolean,
        TokenKind::UnitLiteral => LiteralKind::Unit,
        _ => {
            let found = p.current().clone();
            let position = found.position();
            return Err(SyntaxError::new(
                ErrorKind::expected(["literal"], found),
                position,
            ));
        }
    };
    let token = p.next_token();
    Ok(Literal {
        kind,
        text: token.image().to_string(),
    })
}

fn parse_function_call(p: &mut Parser) -> ParseResult<Call> {
    let name = parse_identifier(p)?;
    p.expect(TokenKind::OpenParen, "\"(\"")?;
    let args = p.attempt(parse_args).unwrap_or_default();
    p.expect(TokenKind::CloseParen, "\")\"")?;
    Ok(Call { name, args })
}

fn parse_args(p: &mut Parser) -> ParseResult<Args> {
    let mut args = vec![parse_expression(p)?];
    while p.consume_if_kind(TokenKind::Comma).is_some() {
        args.push(parse_expression(p)?);
    }
    Ok(Args(args))
}

fn parse_type_cast(p: &mut Parser) -> ParseResult<Cast> {
    p.expect(TokenKind::OpenParen, "\"(\"")?;
    let ty = parse_type(p)?;
    p.expect(TokenKind::CloseParen, "\")\"")?;
    let operand = parse_expression(p)?;
    Ok(Cast { ty, operand })
}

fn parse_sub_expression(p: &mut Parser) -> ParseResult<Expression> {
    p.expect(TokenKind::OpenParen, "\"(\"")?;
    let inner = parse_expression(p)?;
    p.expect(TokenKind::CloseParen, "\")\"")?;
    Ok(inner)
}

fn parse_unary(p: &mut Parser) -> ParseResult<Unary> {
    let op = parse_unary_op(p)?;
    let operand = parse_expression(p)?;
    Ok(Unary { op, operand })
}

fn parse_unary_op(p: &mut Parser) -> ParseResult<UnaryOp> {
    let found = p.current().clone();
    let op = match (found.kind(), found.image()) {
        (TokenKind::AddOp, "+") => UnaryOp::Plus,
        (TokenKind::AddOp, "-") => UnaryOp::Minus,
        (TokenKind::Keyword, "not") => UnaryOp::Not,
        _ => {
            let position = found.position();
            return Err(SyntaxError::new(
                ErrorKind::expected(["unary operator"], found),
                position,
            ));
        }
    };
    p.next_token();
    Ok(op)
}

pub(super) fn parse_identifier(p: &mut Parser) -> ParseResult<Identifier> {
    let token = p.expect(TokenKind::Identifier, "identifier")?;
    Ok(Identifier(token.image().to_string()))
}

pub(super) fn parse_type(p: &mut Parser) -> ParseResult<TypeName> {
    let found = p.current().clone();
    if found.kind() == &TokenKind::Keyword {
        if let Some(ty) = TypeName::from_keyword(found.image()) {
            p.next_token();
            return Ok(ty);
        }
    }
    let position = found.position();
    Err(SyntaxError::new(
        ErrorKind::expected(["type name"], found),
        position,
    ))
}

fn rel_op(token: &Token) -> ParseResult<BinaryOp> {
    let op = match token.image() {
        ">" => BinaryOp::Greater,
        "<" => BinaryOp::Lesser,
        "==" => BinaryOp::Equals,
        "!=" => BinaryOp::NotEquals,
        ">=" => BinaryOp::GreaterEquals,
        "<=" => BinaryOp::LesserEquals,
        _ => {
            let position = token.position();
            return Err(SyntaxError::new(
                ErrorKind::expected(["relational operator"], token.clone()),
                position,
            ));
        }
    };
    Ok(op)
}

fn add_op(token: &Token) -> ParseResult<BinaryOp> {
    let op = match token.image() {
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Subt,
        "or" => BinaryOp::Or,
        _ => {
            let position = token.position();
            return Err(SyntaxError::new(
                ErrorKind::expected(["additive operator"], token.clone()),
                position,
            ));
        }
    };
    Ok(op)
}

fn mult_op(token: &Token) -> ParseResult<BinaryOp> {
    let op = match token.image() {
        "*" => BinaryOp::Mult,
        "/" => BinaryOp::Div,
        "and" => BinaryOp::And,
        _ => {
            let position = token.position();
            return Err(SyntaxError::new(
                ErrorKind::expected(["multiplicative operator"], token.clone()),
                position,
            ));
        }
    };
    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_source;
    use crate::Lexer;
    use std::path::Path;
    use sxl_ast::Statement;
    use test_log::test;

    /// Parses `src ;` as an expression statement and unwraps the expression
    fn expr(src: &str) -> Expr {
        let source = format!("{src} ;");
        let program =
            parse_source(Path::new("<test>"), source.as_bytes()).expect("should parse");
        match program.0.into_iter().next() {
            Some(Statement::Expr(expression)) => *expression.0,
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    fn parser_for(src: &str) -> Parser {
        let tokens = Lexer::new(Path::new("<test>"), src.as_bytes())
            .tokenize()
            .expect("should tokenize");
        Parser::new(tokens)
    }

    fn binary(expression: Expr) -> Binary {
        match expression {
            Expr::Binary(binary) => binary,
            other => panic!("expected a binary node, got {other:?}"),
        }
    }

    fn integer(text: &str) -> Expr {
        Expr::Literal(Literal {
            kind: LiteralKind::Integer,
            text: text.to_string(),
        })
    }

    fn variable(name: &str) -> Expr {
        Expr::Identifier(Identifier(name.to_string()))
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let top = binary(expr("1 + 2 * 3"));
        assert_eq!(top.op, BinaryOp::Add);
        assert_eq!(*top.left, integer("1"));
        let right = binary(*top.right);
        assert_eq!(right.op, BinaryOp::Mult);
    }

    #[test]
    fn test_additive_chain_associates_to_the_right() {
        // a - b - c is a - (b - c)
        let top = binary(expr("a - b - c"));
        assert_eq!(top.op, BinaryOp::Subt);
        assert_eq!(*top.left, variable("a"));
        let right = binary(*top.right);
        assert_eq!(right.op, BinaryOp::Subt);
        assert_eq!(*right.left, variable("b"));
        assert_eq!(*right.right, variable("c"));
    }

    #[test]
    fn test_multiplicative_chain_associates_to_the_right() {
        let top = binary(expr("a / b / c"));
        assert_eq!(top.op, BinaryOp::Div);
        assert_eq!(*top.left, variable("a"));
        assert_eq!(binary(*top.right).op, BinaryOp::Div);
    }

    #[test]
    fn test_relational_expression() {
        let top = binary(expr("x < 10"));
        assert_eq!(top.op, BinaryOp::Lesser);
        assert_eq!(*top.left, variable("x"));
        assert_eq!(*top.right, integer("10"));
    }

    #[test]
    fn test_logical_operators_share_arithmetic_levels() {
        // `or` is additive, `and` is multiplicative
        let top = binary(expr("a or b and c"));
        assert_eq!(top.op, BinaryOp::Or);
        assert_eq!(binary(*top.right).op, BinaryOp::And);
    }

    #[test]
    fn test_parenthesized_sub_expression() {
        let top = binary(expr("( a + 1 ) * 2"));
        assert_eq!(top.op, BinaryOp::Mult);
        assert!(matches!(*top.left, Expr::Sub(_)));
    }

    #[test]
    fn test_type_cast() {
        let Expr::Cast(cast) = expr("( int ) x") else {
            panic!("expected a cast");
        };
        assert_eq!(cast.ty, TypeName::Int);
        assert_eq!(*cast.operand.0, variable("x"));
    }

    #[test]
    fn test_cast_does_not_shadow_sub_expression() {
        assert!(matches!(expr("( x )"), Expr::Sub(_)));
    }

    #[test]
    fn test_unary_not() {
        let Expr::Unary(unary) = expr("not true") else {
            panic!("expected a unary node");
        };
        assert_eq!(unary.op, UnaryOp::Not);
    }

    #[test]
    fn test_unary_minus_takes_the_rest_of_the_expression() {
        let Expr::Unary(unary) = expr("- a + b") else {
            panic!("expected a unary node");
        };
        assert_eq!(unary.op, UnaryOp::Minus);
        assert_eq!(binary(*unary.operand.0).op, BinaryOp::Add);
    }

    #[test]
    fn test_identifier_shadows_function_call() {
        // a bare identifier wins the factor choice, so `f ( 2 )` never
        // reaches the call rule and the trailing `(` fails the statement
        let result = parse_source(Path::new("<test>"), "f ( 2 ) ;".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_function_call_rule() {
        let mut parser = parser_for("f ( 2 , x )");
        let call = parse_function_call(&mut parser).expect("should parse a call");
        assert_eq!(call.name, Identifier("f".to_string()));
        assert_eq!(call.args.0.len(), 2);
    }

    #[test]
    fn test_function_call_rule_without_args() {
        let mut parser = parser_for("f ( )");
        let call = parse_function_call(&mut parser).expect("should parse a call");
        assert_eq!(call.args.0.len(), 0);
    }

    #[test]
    fn test_factor_error_lists_alternatives() {
        let mut parser = parser_for("*");
        let error = parse_factor(&mut parser).expect_err("should fail");
        assert!(
            error
                .to_string()
                .contains("expected literal or identifier or \"(\" or unary operator"),
            "{error}"
        );
    }
}
