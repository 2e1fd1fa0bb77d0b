use logos::Logos;

use crate::{
    error::LexError,
    interpreter::token::{CommandWords, Literal, Token, TokenKind},
};

/// Raw token produced by logos, before keyword classification and literal
/// extraction.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
enum RawToken {
    /// Numeric literal tokens, such as `3.14` or `42`.
    ///
    /// A trailing `.` without digits is not part of the number: `12.` lexes
    /// as `12` followed by `.`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    /// A complete string literal. Newlines inside it count towards the line.
    #[regex(r#""[^"]*""#, count_lines, allow_greedy = true)]
    String,
    /// A string literal that runs to the end of input.
    #[regex(r#""[^"]*"#, count_lines, allow_greedy = true)]
    UnterminatedString,
    /// Identifiers, keywords, command words and boolean literals.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token(";")]
    Semicolon,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("|")]
    Pipe,
    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token("$")]
    Dollar,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("&")]
    Ampersand,
    #[token("~")]
    Tilde,
    #[token("`")]
    Backtick,
    #[token("'")]
    Quote,
    #[token("\\")]
    Backslash,
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEqual,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// The output of a scan: every token that could be produced, terminated by
/// an [`TokenKind::Eof`] sentinel, plus every error found on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    /// Tokens in source order. The last one is always `Eof`.
    pub tokens: Vec<Token>,
    /// Lexical errors in source order.
    pub errors: Vec<LexError>,
}

/// Scans `source` into tokens.
///
/// The scan is a single left-to-right pass that never aborts: unexpected
/// characters are recorded and skipped, and an unterminated string is
/// recorded at the line the scan reached at end of input. Each call starts
/// from line 1 with no state carried over from earlier calls.
///
/// Words in `commands` become [`TokenKind::Command`] tokens; other words are
/// matched case-insensitively against the keyword table.
///
/// # Example
/// ```
/// use clara::interpreter::{
///     lexer::lex,
///     token::{CommandWords, TokenKind},
/// };
///
/// let lexed = lex("var x = 1;", &CommandWords::default());
/// let kinds: Vec<TokenKind> = lexed.tokens.iter().map(|t| t.kind).collect();
///
/// assert!(lexed.errors.is_empty());
/// assert_eq!(kinds,
///            vec![TokenKind::Var,
///                 TokenKind::Identifier,
///                 TokenKind::Equal,
///                 TokenKind::Number,
///                 TokenKind::Semicolon,
///                 TokenKind::Eof]);
/// ```
#[must_use]
pub fn lex(source: &str, commands: &CommandWords) -> Lexed {
    let mut lexer = RawToken::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    while let Some(raw) = lexer.next() {
        let line = lexer.extras.line;
        let slice = lexer.slice();

        match raw {
            Ok(RawToken::UnterminatedString) => {
                errors.push(LexError::UnterminatedString { line });
            },
            Ok(raw) => tokens.push(to_token(raw, slice, line, commands)),
            Err(()) => {
                let character = slice.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                errors.push(LexError::UnexpectedCharacter { character, line });
            },
        }
    }

    tokens.push(Token::eof(lexer.extras.line));
    Lexed { tokens, errors }
}

/// Builds the final token for a raw logos token.
fn to_token(raw: RawToken, slice: &str, line: usize, commands: &CommandWords) -> Token {
    let (kind, literal) = match raw {
        RawToken::Number(n) => (TokenKind::Number, Some(Literal::Number(n))),
        RawToken::String => {
            let contents = slice.strip_prefix('"')
                                .and_then(|s| s.strip_suffix('"'))
                                .unwrap_or(slice);
            (TokenKind::String, Some(Literal::Str(contents.to_string())))
        },
        RawToken::Word => classify_word(slice, commands),
        other => (punctuation_kind(other), None),
    };

    Token { kind,
            lexeme: slice.to_string(),
            literal,
            line }
}

/// Classifies a word as a literal, command, keyword or identifier.
///
/// Boolean and `null` literals are matched exactly. Command words take
/// precedence over keywords.
fn classify_word(word: &str, commands: &CommandWords) -> (TokenKind, Option<Literal>) {
    match word {
        "true" => (TokenKind::True, Some(Literal::Bool(true))),
        "false" => (TokenKind::False, Some(Literal::Bool(false))),
        "null" => (TokenKind::Null, Some(Literal::Null)),
        _ if commands.contains(word) => (TokenKind::Command, None),
        _ => (TokenKind::keyword(word).unwrap_or(TokenKind::Identifier), None),
    }
}

/// Maps the payload-free raw tokens to their final kind.
fn punctuation_kind(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::LeftParen => TokenKind::LeftParen,
        RawToken::RightParen => TokenKind::RightParen,
        RawToken::LeftBrace => TokenKind::LeftBrace,
        RawToken::RightBrace => TokenKind::RightBrace,
        RawToken::LeftBracket => TokenKind::LeftBracket,
        RawToken::RightBracket => TokenKind::RightBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Question => TokenKind::Question,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::At => TokenKind::At,
        RawToken::Hash => TokenKind::Hash,
        RawToken::Dollar => TokenKind::Dollar,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Ampersand => TokenKind::Ampersand,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Backtick => TokenKind::Backtick,
        RawToken::Quote => TokenKind::Quote,
        RawToken::Backslash => TokenKind::Backslash,
        RawToken::Bang => TokenKind::Bang,
        RawToken::BangEqual => TokenKind::BangEqual,
        RawToken::Equal => TokenKind::Equal,
        RawToken::EqualEqual => TokenKind::EqualEqual,
        RawToken::Less => TokenKind::Less,
        RawToken::LessEqual => TokenKind::LessEqual,
        RawToken::Greater => TokenKind::Greater,
        RawToken::GreaterEqual => TokenKind::GreaterEqual,
        RawToken::Number(_)
        | RawToken::String
        | RawToken::UnterminatedString
        | RawToken::Word
        | RawToken::Comment
        | RawToken::NewLine => unreachable!("not a punctuation token"),
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the slice is not a valid number.
fn parse_number(lex: &logos::Lexer<RawToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Advances the line counter past the newlines inside a string literal.
fn count_lines(lex: &mut logos::Lexer<RawToken>) {
    lex.extras.line += lex.slice().chars().filter(|&c| c == '\n').count();
}
