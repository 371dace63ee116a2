//! Episode query expressions.
//!
//! A query is a boolean expression over episodes:
//!
//! ```text
//! expr    := and ("or" and)*
//! and     := unary (["and"] unary)*
//! unary   := "not" unary | primary
//! primary := "(" expr ")" | keyword | word | "quoted words"
//! keyword := new | old | downloaded | deleted
//! ```
//!
//! Words match case-insensitively against the episode title and the podcast
//! title. Operators and keywords are case-insensitive too; quoting a keyword
//! turns it back into a plain word.

use crate::{
    errors::{LibraryError, Result},
    types::{Episode, EpisodeState, Podcast},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    New,
    Old,
    Downloaded,
    Deleted,
    Word(String),
    Not(Box<Query>),
    And(Box<Query>, Box<Query>),
    Or(Box<Query>, Box<Query>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Bare(String),
    Quoted(String),
}

impl Query {
    /// Parses a query given as separate command-line arguments.
    ///
    /// The shell has already removed the quotes around each argument, so an
    /// argument holding whitespace is read back as one quoted phrase. Arguments
    /// that carry their own quotes or parentheses are taken as expressions.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Query`] when the joined expression does not parse.
    pub fn from_words(words: &[String]) -> Result<Query> {
        let expr = words
            .iter()
            .map(|word| {
                let is_phrase = word.contains(char::is_whitespace)
                    && !word.contains(['"', '(', ')']);
                if is_phrase {
                    format!("\"{}\"", word)
                } else {
                    word.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        Query::parse(&expr)
    }

    pub fn parse(expr: &str) -> Result<Query> {
        let tokens = tokenize(expr)?;
        if tokens.is_empty() {
            return Err(syntax("empty query"));
        }

        let mut parser = Parser { tokens, pos: 0 };
        let query = parser.or()?;
        if let Some(token) = parser.peek() {
            return Err(syntax(&format!("unexpected {}", describe(token))));
        }
        Ok(query)
    }

    pub fn matches(&self, podcast: &Podcast, episode: &Episode) -> bool {
        match self {
            Query::New => episode.is_new && episode.state == EpisodeState::Normal,
            Query::Old => !episode.is_new,
            Query::Downloaded => episode.state == EpisodeState::Downloaded,
            Query::Deleted => episode.state == EpisodeState::Deleted,
            Query::Word(word) => {
                let word = word.to_lowercase();
                episode.title.to_lowercase().contains(&word)
                    || podcast.title.to_lowercase().contains(&word)
            }
            Query::Not(inner) => !inner.matches(podcast, episode),
            Query::And(a, b) => a.matches(podcast, episode) && b.matches(podcast, episode),
            Query::Or(a, b) => a.matches(podcast, episode) || b.matches(podcast, episode),
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_operator(&self, op: &str) -> bool {
        matches!(self.peek(), Some(Token::Bare(w)) if w.eq_ignore_ascii_case(op))
    }

    fn or(&mut self) -> Result<Query> {
        let mut left = self.and()?;
        while self.peek_operator("or") {
            self.pos += 1;
            let right = self.and()?;
            left = Query::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Query> {
        let mut left = self.unary()?;
        loop {
            if self.peek_operator("and") {
                self.pos += 1;
            } else if self.peek().is_none()
                || self.peek_operator("or")
                || self.peek() == Some(&Token::Close)
            {
                break;
            }
            let right = self.unary()?;
            left = Query::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Query> {
        if self.peek_operator("not") {
            self.pos += 1;
            return Ok(Query::Not(Box::new(self.unary()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Query> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| syntax("unexpected end of query"))?;
        self.pos += 1;

        match token {
            Token::Open => {
                let inner = self.or()?;
                if self.peek() != Some(&Token::Close) {
                    return Err(syntax("missing ')'"));
                }
                self.pos += 1;
                Ok(inner)
            }
            Token::Close => Err(syntax("unexpected ')'")),
            Token::Quoted(word) => Ok(Query::Word(word)),
            Token::Bare(word) => match word.to_lowercase().as_str() {
                "new" => Ok(Query::New),
                "old" => Ok(Query::Old),
                "downloaded" => Ok(Query::Downloaded),
                "deleted" => Ok(Query::Deleted),
                "and" | "or" | "not" => Err(syntax(&format!("unexpected '{}'", word))),
                _ => Ok(Query::Word(word)),
            },
        }
    }
}

fn tokenize(expr: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '"' => {
                chars.next();
                let mut word = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => word.push(c),
                        None => return Err(syntax("unterminated quote")),
                    }
                }
                tokens.push(Token::Quoted(word));
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' || c == '"' {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(Token::Bare(word));
            }
        }
    }

    Ok(tokens)
}

fn describe(token: &Token) -> String {
    match token {
        Token::Open => "'('".to_string(),
        Token::Close => "')'".to_string(),
        Token::Bare(w) | Token::Quoted(w) => format!("'{}'", w),
    }
}

fn syntax(reason: &str) -> LibraryError {
    LibraryError::Query {
        reason: reason.to_string(),
    }
}
