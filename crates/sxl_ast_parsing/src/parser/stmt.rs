//! Statement-level grammar rules.
//!
//! `parse_statement` is an ordered choice: alternatives are attempted
//! top to bottom and the first to succeed wins, so earlier rules shadow
//! later ones on any shared prefix.

use crate::parser::error::{ErrorKind, ParseResult, SyntaxError};
use crate::parser::expr::{parse_expression, parse_identifier, parse_type};
use crate::parser::Parser;
use sxl_ast::{
    Assign, Block, FunctionDecl, Halt, HaltCode, If, Param, Params, Program, Statement,
    VariableDecl, While,
};
use sxl_tokens::TokenKind;
use tracing::trace;

pub(super) fn parse_program(p: &mut Parser) -> ParseResult<Program> {
    let mut statements = Vec::new();
    while p.current().kind() != &TokenKind::Eof {
        trace!("parsing top-level statement at {}", p.current().position());
        statements.push(parse_statement(p)?);
    }
    Ok(Program(statements))
}

pub(super) fn parse_statement(p: &mut Parser) -> ParseResult<Statement> {
    if let Ok(decl) = p.attempt(parse_function_decl) {
        return Ok(Statement::FunctionDecl(decl));
    }
    if let Ok(assign) = p.attempt(parse_assign) {
        return Ok(Statement::Assign(assign));
    }
    if let Ok(statement) = p.attempt(parse_expr_statement) {
        return Ok(statement);
    }
    if let Ok(decl) = p.attempt(parse_variable_decl) {
        return Ok(Statement::VariableDecl(decl));
    }
    if let Ok(target) = p.attempt(parse_read) {
        return Ok(Statement::Read(target));
    }
    if let Ok(source) = p.attempt(parse_write) {
        return Ok(Statement::Write(source));
    }
    if let Ok(if_statement) = p.attempt(parse_if) {
        return Ok(Statement::If(if_statement));
    }
    if let Ok(while_statement) = p.attempt(parse_while) {
        return Ok(Statement::While(while_statement));
    }
    if let Ok(halt) = p.attempt(parse_halt) {
        return Ok(Statement::Halt(halt));
    }
    if let Ok(block) = p.attempt(parse_block) {
        return Ok(Statement::Block(block));
    }
    let found = p.current().clone();
    let position = found.position();
    Err(SyntaxError::new(
        ErrorKind::UnexpectedToken(found),
        position,
    ))
}

fn parse_function_decl(p: &mut Parser) -> ParseResult<FunctionDecl> {
    p.expect_keyword("function")?;
    let name = parse_identifier(p)?;
    p.expect(TokenKind::OpenParen, "\"(\"")?;
    // an empty parameter list is the `(` immediately closed
    let params = p.attempt(parse_formal_params).unwrap_or_default();
    p.expect(TokenKind::CloseParen, "\")\"")?;
    p.expect(TokenKind::Colon, "\":\"")?;
    let return_type = parse_type(p)?;
    let body = parse_block(p)?;
    Ok(FunctionDecl {
        name,
        params,
        return_type,
        body,
    })
}

fn parse_formal_params(p: &mut Parser) -> ParseResult<Params> {
    let mut params = vec![parse_param(p)?];
    while p.consume_if_kind(TokenKind::Comma).is_some() {
        params.push(parse_param(p)?);
    }
    Ok(Params(params))
}

fn parse_param(p: &mut Parser) -> ParseResult<Param> {
    let name = parse_identifier(p)?;
    p.expect(TokenKind::Colon, "\":\"")?;
    let ty = parse_type(p)?;
    Ok(Param { name, ty })
}

fn parse_assign(p: &mut Parser) -> ParseResult<Assign> {
    p.expect_keyword("set")?;
    let target = parse_identifier(p)?;
    p.expect(TokenKind::AssignOp, "\"<-\"")?;
    let value = parse_expression(p)?;
    p.expect(TokenKind::Semicolon, "\";\"")?;
    Ok(Assign { target, value })
}

fn parse_expr_statement(p: &mut Parser) -> ParseResult<Statement> {
    let expression = parse_expression(p)?;
    p.expect(TokenKind::Semicolon, "\";\"")?;
    Ok(Statement::Expr(expression))
}

fn parse_variable_decl(p: &mut Parser) -> ParseResult<VariableDecl> {
    p.expect_keyword("let")?;
    let name = parse_identifier(p)?;
    p.expect(TokenKind::Colon, "\":\"")?;
    let ty = parse_type(p)?;
    p.expect(TokenKind::EqualsOp, "\"=\"")?;
    let value = parse_expression(p)?;
    let body = if p.consume_if_kind(TokenKind::Semicolon).is_some() {
        None
    } else {
        p.expect_keyword("in")?;
        Some(parse_block(p)?)
    };
    Ok(VariableDecl {
        name,
        ty,
        value,
        body,
    })
}

fn parse_read(p: &mut Parser) -> ParseResult<sxl_ast::Identifier> {
    p.expect_keyword("read")?;
    let target = parse_identifier(p)?;
    p.expect(TokenKind::Semicolon, "\";\"")?;
    Ok(target)
}

fn parse_write(p: &mut Parser) -> ParseResult<sxl_ast::Identifier> {
    p.expect_keyword("write")?;
    let source = parse_identifier(p)?;
    p.expect(TokenKind::Semicolon, "\";\"")?;
    Ok(source)
}

fn parse_if(p: &mut Parser) -> ParseResult<If> {
    p.expect_keyword("if")?;
    p.expect(TokenKind::OpenParen, "\"(\"")?;
    let condition = parse_expression(p)?;
    p.expect(TokenKind::CloseParen, "\")\"")?;
    let then_branch = Box::new(parse_statement(p)?);
    // `else` is not a reserved word, so it arrives as an identifier token
    let has_else = p
        .consume_if(|token| {
            matches!(token.kind(), TokenKind::Keyword | TokenKind::Identifier)
                && token.image() == "else"
        })
        .is_some();
    let else_branch = if has_else {
        Some(Box::new(parse_statement(p)?))
    } else {
        None
    };
    Ok(If {
        condition,
        then_branch,
        else_branch,
    })
}

fn parse_while(p: &mut Parser) -> ParseResult<While> {
    p.expect_keyword("while")?;
    p.expect(TokenKind::OpenParen, "\"(\"")?;
    let condition = parse_expression(p)?;
    p.expect(TokenKind::CloseParen, "\")\"")?;
    let body = Box::new(parse_statement(p)?);
    Ok(While { condition, body })
}

fn parse_halt(p: &mut Parser) -> ParseResult<Halt> {
    p.expect_keyword("halt")?;
    let code = if let Some(token) = p.consume_if_kind(TokenKind::IntegerLiteral) {
        Some(HaltCode::Integer(token.image().to_string()))
    } else {
        p.consume_if_kind(TokenKind::Identifier)
            .map(|token| HaltCode::Variable(sxl_ast::Identifier(token.image().to_string())))
    };
    p.expect(TokenKind::Semicolon, "\";\"")?;
    Ok(Halt(code))
}

pub(super) fn parse_block(p: &mut Parser) -> ParseResult<Block> {
    p.expect(TokenKind::OpenBlock, "\"{\"")?;
    let mut statements = Vec::new();
    while let Ok(statement) = p.attempt(parse_statement) {
        statements.push(statement);
    }
    p.expect(TokenKind::CloseBlock, "\"}\"")?;
    Ok(Block(statements))
}
