//! Pratt-style recursive-descent parser.
//!
//! The parser never aborts on a malformed construct: it records a diagnostic in
//! [`Parser::errors`] and keeps going, so that a single REPL line with multiple
//! mistakes reports all of them at once.

mod precedence;

pub use precedence::Precedence;

use log::{debug, trace};

use crate::ast::{
    expression::{
        ArrayLiteral, BooleanLiteral, CallExpression, FunctionLiteral, HashLiteral, IfExpression,
        IndexExpression, InfixExpression, IntegerLiteral, PrefixExpression, StringLiteral,
    },
    statement::{BlockStatement, LetStatement, ReturnStatement},
    Expression, Identifier, Program, Statement,
};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Consumes a token stream and builds a [`Program`], accumulating human-readable
/// error messages rather than failing fast.
pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<String>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Self {
            lexer,
            cur_token,
            peek_token,
            errors: vec![],
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn next_token(&mut self) {
        std::mem::swap(&mut self.cur_token, &mut self.peek_token);
        self.peek_token = self.lexer.next_token();
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Advance past `kind` if it's next, recording an error (and leaving the
    /// cursor in place) otherwise.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenKind) {
        let msg = format!(
            "expected next token to be {expected}, got {} instead",
            self.peek_token.kind
        );
        debug!("parse error: {msg}");
        self.errors.push(msg);
    }

    fn no_prefix_parse_fn_error(&mut self, kind: TokenKind) {
        let msg = format!("no prefix parse function for {kind}");
        debug!("parse error: {msg}");
        self.errors.push(msg);
    }

    /// Parse the whole input into a [`Program`]. Always terminates: each loop
    /// iteration either appends a statement or records an error, and always
    /// advances the cursor.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.cur_is(TokenKind::Eof) {
            match self.parse_statement() {
                Some(stmt) => program.statements.push(stmt),
                None => {}
            }
            self.next_token();
        }

        program
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        trace!("parse_statement at {:?}", self.cur_token.kind);
        match self.cur_token.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expression),
        }
    }

    fn parse_let_statement(&mut self) -> Option<LetStatement> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier {
            value: self.cur_token.literal.clone(),
        };

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(LetStatement { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ReturnStatement> {
        self.next_token();

        if self.cur_is(TokenKind::Semicolon) || self.cur_is(TokenKind::Eof) {
            return Some(ReturnStatement { value: None });
        }

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(ReturnStatement { value: Some(value) })
    }

    fn parse_expression_statement(&mut self) -> Option<Expression> {
        let expr = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(expr)
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let mut block = BlockStatement::default();
        self.next_token();

        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                block.statements.push(stmt);
            }
            self.next_token();
        }

        block
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < Precedence::of(self.peek_token.kind)
        {
            left = match self.peek_token.kind {
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Slash
                | TokenKind::Asterisk
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt => {
                    self.next_token();
                    self.parse_infix_expression(left)?
                }
                TokenKind::LParen => {
                    self.next_token();
                    self.parse_call_expression(left)?
                }
                TokenKind::LBracket => {
                    self.next_token();
                    self.parse_index_expression(left)?
                }
                _ => return Some(left),
            };
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur_token.kind {
            TokenKind::Ident => Some(Expression::Identifier(Identifier {
                value: self.cur_token.literal.clone(),
            })),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Str => Some(Expression::StringLit(StringLiteral {
                value: self.cur_token.literal.clone(),
            })),
            TokenKind::True | TokenKind::False => Some(Expression::Boolean(BooleanLiteral {
                value: self.cur_is(TokenKind::True),
            })),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            kind => {
                self.no_prefix_parse_fn_error(kind);
                None
            }
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.cur_token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer(IntegerLiteral { value })),
            Err(_) => {
                let msg = format!("could not parse {:?} as integer", self.cur_token.literal);
                self.errors.push(msg);
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = self.cur_token.literal.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix(PrefixExpression {
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = self.cur_token.literal.clone();
        let precedence = Precedence::of(self.cur_token.kind);
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix(InfixExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If(IfExpression {
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let params = self.parse_function_params()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::Function(FunctionLiteral { params, body }))
    }

    fn parse_function_params(&mut self) -> Option<Vec<Identifier>> {
        let mut params = vec![];

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(params);
        }

        self.next_token();
        params.push(Identifier {
            value: self.cur_token.literal.clone(),
        });

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            params.push(Identifier {
                value: self.cur_token.literal.clone(),
            });
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(params)
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
        let args = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expression::Call(CallExpression {
            callee: Box::new(callee),
            args,
        }))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }

        Some(Expression::Index(IndexExpression {
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expression::Array(ArrayLiteral { elements }))
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = vec![];

        if self.peek_is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let mut pairs = vec![];

        while !self.peek_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) && !self.expect_peek(TokenKind::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }

        Some(Expression::Hash(HashLiteral { pairs }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> (Program, Vec<String>) {
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        (program, parser.errors().to_vec())
    }

    #[test]
    fn parses_let_statements() {
        let (program, errors) = parse("let x = 5; let y = true; let foobar = y;");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(program.statements.len(), 3);
        assert_eq!(program.statements[0].to_string(), "let x = 5;");
    }

    #[test]
    fn parses_return_statements() {
        let (program, errors) = parse("return 5; return; return add(1);");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(program.statements.len(), 3);
        assert_eq!(program.statements[1].to_string(), "return;");
    }

    #[test]
    fn reports_missing_assign_and_keeps_parsing() {
        let (program, errors) = parse("let x 5; let y = 10;");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("expected next token to be ="));
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn operator_precedence_matches_left_associativity() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a + b * c", "(a + (b * c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
        ];

        for (input, expected) in cases {
            let (program, errors) = parse(input);
            assert!(errors.is_empty(), "{input}: {errors:?}");
            assert_eq!(program.statements[0].to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn parses_if_else_expression() {
        let (program, errors) = parse("if (x < y) { x } else { y }");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Statement::Expression(Expression::If(if_expr)) => {
                assert_eq!(if_expr.condition.to_string(), "(x < y)");
                assert!(if_expr.alternative.is_some());
            }
            other => panic!("expected if expression, got {other:?}"),
        }
    }

    #[test]
    fn parses_function_literal_params() {
        let (program, errors) = parse("fn(x, y) { x + y; }");
        assert!(errors.is_empty(), "{errors:?}");
        match &program.statements[0] {
            Statement::Expression(Expression::Function(f)) => {
                assert_eq!(f.params.len(), 2);
                assert_eq!(f.params[0].value, "x");
            }
            other => panic!("expected function literal, got {other:?}"),
        }
    }

    #[test]
    fn parses_call_expression_arguments() {
        let (program, errors) = parse("add(1, 2 * 3, 4 + 5);");
        assert!(errors.is_empty(), "{errors:?}");
        match &program.statements[0] {
            Statement::Expression(Expression::Call(call)) => {
                assert_eq!(call.args.len(), 3);
            }
            other => panic!("expected call expression, got {other:?}"),
        }
    }

    #[test]
    fn parses_array_and_index() {
        let (program, errors) = parse("[1, 2 * 2, 3 + 3][1 + 1]");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            program.statements[0].to_string(),
            "([1, (2 * 2), (3 + 3)][(1 + 1)])"
        );
    }

    #[test]
    fn parses_hash_literal() {
        let (program, errors) = parse(r#"{"one": 1, "two": 2}"#);
        assert!(errors.is_empty(), "{errors:?}");
        match &program.statements[0] {
            Statement::Expression(Expression::Hash(hash)) => {
                assert_eq!(hash.pairs.len(), 2);
            }
            other => panic!("expected hash literal, got {other:?}"),
        }
    }

    #[test]
    fn integer_overflow_is_a_parse_error() {
        let (_program, errors) = parse("99999999999999999999999999999;");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("could not parse"));
    }

    #[test]
    fn no_prefix_parse_fn_is_reported() {
        let (_program, errors) = parse(")");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("no prefix parse function for )"));
    }
}
