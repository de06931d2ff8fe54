//! Tokenizer for the fact and rule language.
//!
//! Input is line oriented: every non-blank line that is not a comment holds
//! exactly one command, so tokens are produced per line together with the
//! line number.
//!
//! Token types:
//! - **Keyword**: `fact:`, `rule:`, `ask:`, `retract:`, `explain:`
//! - **Symbol**: a constant or predicate name (e.g. `isa`, `cube1`)
//! - **Variable**: `?` followed by a name (e.g. `?x`)
//! - **LeftParen** / **RightParen**: `(` and `)`
//! - **Arrow**: `->`
//!
//! Commas are accepted as separators and dropped. `#` starts a comment that
//! runs to the end of the line.

use std::fmt;

use dialog_tms::term::VARIABLE_PREFIX;

use crate::error::ParseError;

const COMMENT: char = '#';

/// Command keywords. In source they are written followed by a colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Fact,
    Rule,
    Ask,
    Retract,
    Explain,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "fact" => Some(Keyword::Fact),
            "rule" => Some(Keyword::Rule),
            "ask" => Some(Keyword::Ask),
            "retract" => Some(Keyword::Retract),
            "explain" => Some(Keyword::Explain),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Fact => "fact",
            Keyword::Rule => "rule",
            Keyword::Ask => "ask",
            Keyword::Retract => "retract",
            Keyword::Explain => "explain",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.as_str())
    }
}

/// A classified token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A command keyword.
    Keyword(Keyword),
    /// A constant or predicate symbol.
    Symbol(String),
    /// A variable, stored without its `?`.
    Variable(String),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `->`
    Arrow,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(keyword) => write!(f, "'{keyword}'"),
            Token::Symbol(symbol) => write!(f, "'{symbol}'"),
            Token::Variable(name) => write!(f, "'{VARIABLE_PREFIX}{name}'"),
            Token::LeftParen => write!(f, "'('"),
            Token::RightParen => write!(f, "')'"),
            Token::Arrow => write!(f, "'->'"),
        }
    }
}

/// The tokens of one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    pub tokens: Vec<Token>,
}

fn is_symbol_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, '(' | ')' | ',' | ':' | COMMENT | VARIABLE_PREFIX)
}

/// Tokenize a single line. `number` is only used for error reporting.
pub fn tokenize_line(number: usize, input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        let ch = chars[i];

        if ch.is_whitespace() || ch == ',' {
            i += 1;
            continue;
        }

        if ch == COMMENT {
            break;
        }

        if ch == '(' {
            tokens.push(Token::LeftParen);
            i += 1;
            continue;
        }

        if ch == ')' {
            tokens.push(Token::RightParen);
            i += 1;
            continue;
        }

        if ch == '-' && chars.get(i + 1) == Some(&'>') {
            tokens.push(Token::Arrow);
            i += 2;
            continue;
        }

        if ch == VARIABLE_PREFIX {
            i += 1;
            let start = i;
            while i < len && is_symbol_char(chars[i]) && !starts_arrow(&chars, i) {
                i += 1;
            }
            if start == i {
                return Err(ParseError::EmptyVariable { line: number });
            }
            tokens.push(Token::Variable(chars[start..i].iter().collect()));
            continue;
        }

        if is_symbol_char(ch) {
            let start = i;
            while i < len && is_symbol_char(chars[i]) && !starts_arrow(&chars, i) {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            // `word:` is a keyword
            if chars.get(i) == Some(&':') {
                let keyword = Keyword::from_word(&word).ok_or_else(|| {
                    ParseError::UnknownCommand {
                        line: number,
                        keyword: word.clone(),
                    }
                })?;
                tokens.push(Token::Keyword(keyword));
                i += 1;
                continue;
            }

            tokens.push(Token::Symbol(word));
            continue;
        }

        return Err(ParseError::UnexpectedCharacter {
            line: number,
            character: ch,
        });
    }

    Ok(tokens)
}

fn starts_arrow(chars: &[char], i: usize) -> bool {
    chars[i] == '-' && chars.get(i + 1) == Some(&'>')
}

/// Tokenize a whole script. Blank and comment-only lines produce no [`Line`].
pub fn tokenize(input: &str) -> Result<Vec<Line>, ParseError> {
    let mut lines = Vec::new();
    for (idx, text) in input.lines().enumerate() {
        let number = idx + 1;
        let tokens = tokenize_line(number, text)?;
        if !tokens.is_empty() {
            lines.push(Line { number, tokens });
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn symbol(text: &str) -> Token {
        Token::Symbol(text.into())
    }

    #[test]
    fn test_tokenize_fact() {
        let tokens = tokenize_line(1, "fact: (isa cube1 block)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Keyword(Keyword::Fact),
                Token::LeftParen,
                symbol("isa"),
                symbol("cube1"),
                symbol("block"),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_rule_without_spaces() {
        let tokens = tokenize_line(1, "rule: ((on ?x ?y))->(covered ?y)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Keyword(Keyword::Rule),
                Token::LeftParen,
                Token::LeftParen,
                symbol("on"),
                Token::Variable("x".into()),
                Token::Variable("y".into()),
                Token::RightParen,
                Token::RightParen,
                Token::Arrow,
                Token::LeftParen,
                symbol("covered"),
                Token::Variable("y".into()),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_hyphenated_symbols_are_single_tokens() {
        let tokens = tokenize_line(1, "(has-living-descendant eve)").unwrap();
        assert_eq!(tokens[1], symbol("has-living-descendant"));
    }

    #[test]
    fn test_commas_and_comments_are_dropped() {
        let tokens = tokenize_line(1, "((a ?x), (b ?x)) # trailing note").unwrap();
        assert_eq!(tokens.len(), 10);
        assert!(!tokens.contains(&symbol("#")));
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let lines = tokenize("# header\n\nfact: (a one)\n   \nask: (a ?x)").unwrap();
        let numbers: Vec<usize> = lines.iter().map(|line| line.number).collect();
        assert_eq!(numbers, vec![3, 5]);
    }

    #[test]
    fn test_unknown_command_reports_line() {
        let error = tokenize("fact: (a one)\nassume: (b two)").unwrap_err();
        assert_eq!(
            error,
            ParseError::UnknownCommand {
                line: 2,
                keyword: "assume".into()
            }
        );
    }

    #[test]
    fn test_bare_question_mark_is_rejected() {
        let error = tokenize_line(4, "ask: (a ?)").unwrap_err();
        assert_eq!(error, ParseError::EmptyVariable { line: 4 });
    }

    #[test]
    fn test_stray_colon_is_rejected() {
        let error = tokenize_line(2, "fact: (a :b)").unwrap_err();
        assert_eq!(
            error,
            ParseError::UnexpectedCharacter {
                line: 2,
                character: ':'
            }
        );
    }
}
