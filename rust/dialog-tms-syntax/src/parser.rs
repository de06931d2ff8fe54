//! Parser for the fact and rule language.
//!
//! Converts the per-line token streams from [`crate::tokenizer`] into
//! [`Command`]s.
//!
//! ```text
//! command   = 'fact:' statement
//!           | 'rule:' rule
//!           | 'ask:' item
//!           | 'retract:' statement
//!           | 'explain:' ('fact:' statement | 'rule:' rule)
//! item      = rule | statement
//! rule      = '(' statement* ')' '->' statement
//! statement = '(' symbol term* ')'
//! term      = symbol | variable
//! ```

use dialog_tms::{Fact, Item, Rule, Statement, Term};

use crate::ast::{Command, Document, Located};
use crate::error::ParseError;
use crate::tokenizer::{Keyword, Line, Token};

const END_OF_LINE: &str = "end of line";

/// A token-stream parser over a single line.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    line: usize,
}

impl Parser {
    fn new(line: Line) -> Self {
        Self {
            tokens: line.tokens,
            pos: 0,
            line: line.number,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_second(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expected(&self, expected: &str) -> ParseError {
        ParseError::Expected {
            line: self.line,
            expected: expected.into(),
            found: self
                .peek()
                .map(|token| token.to_string())
                .unwrap_or_else(|| END_OF_LINE.into()),
        }
    }

    fn unterminated(&self, construct: &'static str) -> ParseError {
        ParseError::Unterminated {
            line: self.line,
            construct,
        }
    }

    fn expect(&mut self, token: Token, expected: &str) -> Result<(), ParseError> {
        if self.peek() == Some(&token) {
            self.advance();
            Ok(())
        } else {
            Err(self.expected(expected))
        }
    }

    // --- Statements ---

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        match self.peek() {
            Some(Token::Symbol(_) | Token::Variable(_)) => {}
            _ => return Err(self.expected("term")),
        }
        match self.advance() {
            Some(Token::Variable(name)) => Ok(Term::var(name)),
            Some(Token::Symbol(symbol)) => Ok(Term::constant(symbol)),
            _ => unreachable!(),
        }
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(Token::LeftParen, "'('")?;

        let predicate = match self.peek() {
            Some(Token::Symbol(_)) => match self.advance() {
                Some(Token::Symbol(symbol)) => symbol,
                _ => unreachable!(),
            },
            Some(Token::RightParen) => {
                return Err(ParseError::EmptyStatement { line: self.line });
            }
            None => return Err(self.unterminated("statement")),
            Some(_) => return Err(self.expected("predicate")),
        };

        let mut terms = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RightParen) => {
                    self.advance();
                    break;
                }
                None => return Err(self.unterminated("statement")),
                Some(_) => terms.push(self.parse_term()?),
            }
        }

        Ok(Statement::new(predicate, terms))
    }

    // --- Rules ---

    fn parse_rule(&mut self) -> Result<Rule, ParseError> {
        self.expect(Token::LeftParen, "'('")?;

        let mut lhs = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RightParen) => {
                    self.advance();
                    break;
                }
                Some(Token::LeftParen) => lhs.push(self.parse_statement()?),
                None => return Err(self.unterminated("rule")),
                Some(_) => return Err(self.expected("'(' or ')'")),
            }
        }

        self.expect(Token::Arrow, "'->'")?;
        let rhs = self.parse_statement()?;
        Ok(Rule::new(lhs, rhs))
    }

    /// A rule's antecedent list opens with `((` or `()`, a statement with
    /// `(` and a predicate.
    fn at_rule(&self) -> bool {
        self.peek() == Some(&Token::LeftParen)
            && matches!(
                self.peek_second(),
                Some(Token::LeftParen) | Some(Token::RightParen)
            )
    }

    fn parse_item(&mut self) -> Result<Item, ParseError> {
        if self.at_rule() {
            Ok(Item::Rule(self.parse_rule()?))
        } else {
            Ok(Item::Fact(Fact::new(self.parse_statement()?)))
        }
    }

    fn parse_tagged_item(&mut self) -> Result<Item, ParseError> {
        match self.peek() {
            Some(Token::Keyword(Keyword::Fact)) => {
                self.advance();
                Ok(Item::Fact(Fact::new(self.parse_statement()?)))
            }
            Some(Token::Keyword(Keyword::Rule)) => {
                self.advance();
                Ok(Item::Rule(self.parse_rule()?))
            }
            _ => Err(self.expected("'fact:' or 'rule:'")),
        }
    }

    // --- Commands ---

    fn parse_command(&mut self) -> Result<Command, ParseError> {
        let command = match self.peek() {
            Some(Token::Keyword(Keyword::Fact | Keyword::Rule)) => {
                Command::Assert(self.parse_tagged_item()?)
            }
            Some(Token::Keyword(Keyword::Ask)) => {
                self.advance();
                Command::Ask(self.parse_item()?)
            }
            Some(Token::Keyword(Keyword::Retract)) => {
                self.advance();
                Command::Retract(self.parse_statement()?)
            }
            Some(Token::Keyword(Keyword::Explain)) => {
                self.advance();
                Command::Explain(self.parse_tagged_item()?)
            }
            _ => return Err(self.expected("command")),
        };

        if self.peek().is_some() {
            return Err(self.expected(END_OF_LINE));
        }
        Ok(command)
    }
}

/// Parse a script into a [`Document`].
///
/// Each non-blank line holds one command; `#` starts a comment. Lines can be:
/// - Facts: `fact: (isa cube block)`
/// - Rules: `rule: ((isa ?x block) (on ?x ?y)) -> (covered ?y)`
/// - Queries: `ask: (isa ?x block)`
/// - Retractions: `retract: (isa cube block)`
/// - Explanations: `explain: fact: (isa cube block)`
///
/// # Example
///
/// ```
/// use dialog_tms_syntax::parse;
///
/// let doc = parse("fact: (isa cube block)\nask: (isa ?x block)").unwrap();
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.facts().count(), 1);
/// ```
pub fn parse(input: &str) -> Result<Document, ParseError> {
    let mut commands = Vec::new();
    for line in crate::tokenizer::tokenize(input)? {
        let number = line.number;
        let mut parser = Parser::new(line);
        commands.push(Located {
            line: number,
            command: parser.parse_command()?,
        });
    }
    Ok(Document::new(commands))
}

/// Parse a single command. Errors report line 1.
///
/// # Example
///
/// ```
/// use dialog_tms_syntax::{parse_command, Command};
///
/// let command = parse_command("retract: (on pyramid1 cube1)").unwrap();
/// assert!(matches!(command, Command::Retract(_)));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let tokens = crate::tokenizer::tokenize_line(1, input)?;
    let mut parser = Parser::new(Line { number: 1, tokens });
    parser.parse_command()
}
