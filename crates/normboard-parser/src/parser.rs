//! Recursive-descent parser over the token stream.

use std::collections::HashSet;

use normboard_core::constants::DEFAULT_PROGRAM_NAME;
use normboard_core::models::{
    ConditionGoal, Consequence, DeadlineSpec, Literal, Norm, NormativeProgram, Term,
};

use crate::duration::parse_duration;
use crate::lexer::{tokenize, Failure, Token, TokenKind};

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub(crate) fn new(src: &str) -> Result<Self, Failure> {
        Ok(Self {
            tokens: tokenize(src)?,
            pos: 0,
        })
    }

    fn peek(&self) -> &Token {
        // `tokenize` always ends with Eof, and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind_at(&self, offset: usize) -> &TokenKind {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn fail_here(&self, message: impl Into<String>) -> Failure {
        let t = self.peek();
        Failure::new(t.line, t.column, message)
    }

    fn unexpected(&self, wanted: &str) -> Failure {
        let found = self.peek().kind.describe();
        self.fail_here(format!("expected {wanted}, found {found}"))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, Failure> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.describe()))
        }
    }

    fn expect_ident(&mut self, wanted: &str) -> Result<String, Failure> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(wanted)),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), Failure> {
        match &self.peek().kind {
            TokenKind::Ident(name) if name == keyword => {
                self.advance();
                Ok(())
            }
            _ => Err(self.unexpected(&format!("`{keyword}`"))),
        }
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(name) if name == keyword)
    }

    // ── Terms and literals ─────────────────────────────────────────────

    fn term(&mut self) -> Result<Term, Failure> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Var(name) => {
                self.advance();
                Ok(Term::Var(name))
            }
            TokenKind::Int(v) => {
                self.advance();
                Ok(Term::Int(v))
            }
            TokenKind::Str(text) => {
                self.advance();
                Ok(Term::Str(text))
            }
            TokenKind::Ident(_) => Ok(Term::from(self.literal()?)),
            _ => Err(self.unexpected("a term")),
        }
    }

    fn literal(&mut self) -> Result<Literal, Failure> {
        let name = self.expect_ident("a predicate name")?;
        if self.peek().kind != TokenKind::LParen {
            return Ok(Literal::atom(name));
        }
        self.advance();
        let mut args = vec![self.term()?];
        while self.peek().kind == TokenKind::Comma {
            self.advance();
            args.push(self.term()?);
        }
        self.expect(TokenKind::RParen)?;
        Ok(Literal::new(name, args))
    }

    /// A single literal, optionally followed by `.`, and nothing else.
    pub(crate) fn literal_only(&mut self) -> Result<Literal, Failure> {
        let literal = self.literal()?;
        if self.peek().kind == TokenKind::Dot {
            self.advance();
        }
        if self.peek().kind != TokenKind::Eof {
            return Err(self.unexpected("end of input"));
        }
        Ok(literal)
    }

    // ── Programs ───────────────────────────────────────────────────────

    pub(crate) fn program(&mut self) -> Result<NormativeProgram, Failure> {
        let wrapped = self.at_keyword("np");
        let name = if wrapped {
            self.advance();
            let name = self.expect_ident("a program name")?;
            self.expect(TokenKind::LBrace)?;
            name
        } else {
            DEFAULT_PROGRAM_NAME.to_string()
        };

        let closing = if wrapped { TokenKind::RBrace } else { TokenKind::Eof };
        let mut norms = Vec::new();
        let mut seen = HashSet::new();
        while self.peek().kind != closing {
            let start = self.peek().clone();
            let norm = self.norm()?;
            if !seen.insert(norm.id.clone()) {
                return Err(Failure::new(
                    start.line,
                    start.column,
                    format!("duplicate norm id `{}`", norm.id),
                ));
            }
            norms.push(norm);
        }
        if wrapped {
            self.advance();
            self.expect(TokenKind::Eof)?;
        }
        Ok(NormativeProgram::new(name, norms))
    }

    fn norm(&mut self) -> Result<Norm, Failure> {
        self.expect_keyword("norm")?;
        let id = self.expect_ident("a norm id")?;
        self.expect(TokenKind::Colon)?;
        let condition = self.condition()?;
        self.expect(TokenKind::Arrow)?;
        let consequence = self.consequence()?;
        self.expect(TokenKind::Dot)?;
        Ok(Norm {
            id,
            condition,
            consequence,
        })
    }

    fn condition(&mut self) -> Result<Vec<ConditionGoal>, Failure> {
        let mut goals = Vec::new();
        loop {
            if let Some(goal) = self.condition_goal()? {
                goals.push(goal);
            }
            if self.peek().kind != TokenKind::Amp {
                return Ok(goals);
            }
            self.advance();
        }
    }

    fn condition_goal(&mut self) -> Result<Option<ConditionGoal>, Failure> {
        let bare_keyword = *self.peek_kind_at(1) != TokenKind::LParen;
        if self.at_keyword("true") && bare_keyword {
            self.advance();
            return Ok(None);
        }
        if self.at_keyword("not") {
            self.advance();
            let literal = if self.peek().kind == TokenKind::LParen {
                self.advance();
                let inner = self.literal()?;
                self.expect(TokenKind::RParen)?;
                inner
            } else {
                self.literal()?
            };
            return Ok(Some(ConditionGoal::NotHolds(literal)));
        }
        Ok(Some(ConditionGoal::Holds(self.literal()?)))
    }

    fn consequence(&mut self) -> Result<Consequence, Failure> {
        if self.at_keyword("fail") {
            self.advance();
            self.expect(TokenKind::LParen)?;
            let reason = self.term()?;
            self.expect(TokenKind::RParen)?;
            return Ok(Consequence::Fail { reason });
        }
        self.expect_keyword("obligation")?;
        self.expect(TokenKind::LParen)?;
        let bearer = self.term()?;
        self.expect(TokenKind::Comma)?;
        let reason = self.term()?;
        self.expect(TokenKind::Comma)?;
        let goal_token = self.peek().clone();
        let goal = self.term()?;
        if matches!(goal, Term::Int(_) | Term::Str(_)) {
            return Err(Failure::new(
                goal_token.line,
                goal_token.column,
                "obligation goal must be a literal",
            ));
        }
        self.expect(TokenKind::Comma)?;
        let deadline = self.deadline()?;
        self.expect(TokenKind::RParen)?;
        Ok(Consequence::Obligation {
            bearer,
            reason,
            goal,
            deadline,
        })
    }

    fn deadline(&mut self) -> Result<DeadlineSpec, Failure> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Int(millis) if millis >= 0 => {
                self.advance();
                Ok(DeadlineSpec::Relative { millis })
            }
            TokenKind::Int(_) => Err(self.fail_here("deadline must not be negative")),
            TokenKind::Duration(text) => {
                let millis = parse_duration(&text)
                    .map_err(|message| Failure::new(token.line, token.column, message))?;
                self.advance();
                Ok(DeadlineSpec::Relative { millis })
            }
            TokenKind::Var(_) => Ok(DeadlineSpec::Absolute(self.term()?)),
            _ => Err(self.unexpected("a deadline")),
        }
    }
}
