use std::collections::HashSet;

/// The kind of a lexical token.
///
/// Kinds carry no payload: the raw text lives in [`Token::lexeme`] and any
/// typed value in [`Token::literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `;`
    Semicolon,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `:`
    Colon,
    /// `?`
    Question,
    /// `|`
    Pipe,
    /// `@`
    At,
    /// `#`
    Hash,
    /// `$`
    Dollar,
    /// `%`
    Percent,
    /// `^`
    Caret,
    /// `&`
    Ampersand,
    /// `~`
    Tilde,
    /// `` ` ``
    Backtick,
    /// `'`
    Quote,
    /// `\`
    Backslash,
    /// `!`
    Bang,
    /// `!=`
    BangEqual,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// A double-quoted string literal.
    String,
    /// A numeric literal.
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// Variable, function, flag or parameter names.
    Identifier,
    /// `and`
    And,
    /// `or`
    Or,
    /// `var` or `let`
    Var,
    /// `const`
    Const,
    /// `fun`, `func` or `def`
    Fun,
    /// `print` or `echo`
    Print,
    /// `return`
    Return,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `for`
    For,
    /// A word found in the command-word set.
    Command,
    /// End of input sentinel.
    Eof,
}

impl TokenKind {
    /// Looks up a keyword, ignoring ASCII case.
    #[must_use]
    pub fn keyword(word: &str) -> Option<Self> {
        let kind = match word.to_ascii_lowercase().as_str() {
            "var" | "let" => Self::Var,
            "const" => Self::Const,
            "fun" | "func" | "def" => Self::Fun,
            "print" | "echo" => Self::Print,
            "return" => Self::Return,
            "if" => Self::If,
            "else" => Self::Else,
            "while" => Self::While,
            "for" => Self::For,
            "and" => Self::And,
            "or" => Self::Or,
            _ => return None,
        };
        Some(kind)
    }
}

/// A typed value attached to literal tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A numeric literal. All numbers share one floating-point kind.
    Number(f64),
    /// The contents of a string literal, without the quotes.
    Str(String),
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// A single lexical unit.
///
/// Tokens are produced once by the lexer and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The raw source text of the token.
    pub lexeme:  String,
    /// The typed value for literal tokens.
    pub literal: Option<Literal>,
    /// The source line the token ends on.
    pub line:    usize,
}

impl Token {
    /// Creates a token without a literal value.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self { kind,
               lexeme: lexeme.into(),
               literal: None,
               line }
    }

    /// Creates the end-of-input sentinel for the given line.
    #[must_use]
    pub const fn eof(line: usize) -> Self {
        Self { kind: TokenKind::Eof,
               lexeme: String::new(),
               literal: None,
               line }
    }
}

/// The words the lexer tags as [`TokenKind::Command`].
///
/// Stored lower-cased; lookups ignore ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandWords {
    words: HashSet<String>,
}

/// Command words known without any module registered.
pub const BUILTIN_COMMANDS: &[&str] = &["help", "create", "start", "end", "finish", "begin",
                                        "react", "reaction", "scheme", "open", "close",
                                        "command", "exit"];

impl Default for CommandWords {
    fn default() -> Self {
        Self { words: BUILTIN_COMMANDS.iter().map(|w| (*w).to_string()).collect() }
    }
}

impl CommandWords {
    /// Creates an empty set. Nothing will lex as a command.
    #[must_use]
    pub fn empty() -> Self {
        Self { words: HashSet::new() }
    }

    /// Adds a word to the set.
    pub fn insert(&mut self, word: &str) {
        self.words.insert(word.to_ascii_lowercase());
    }

    /// Whether `word` is a command word.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_lowercase())
    }

    /// All command words in sorted order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}
