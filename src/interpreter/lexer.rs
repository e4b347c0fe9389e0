use std::fmt;

use logos::Logos;

/// The closed set of token kinds recognised by the scanner.
///
/// Keywords are matched as exact tokens and win over the identifier pattern
/// when the whole word matches, so `var` is [`TokenKind::Var`] while
/// `variable` is an [`TokenKind::Identifier`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(extras = LexerExtras)]
pub enum TokenKind {
    /// `var`
    #[token("var")]
    Var,
    /// `function`
    #[token("function")]
    Function,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `elif`
    #[token("elif")]
    Elif,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `run`
    #[token("run")]
    Run,
    /// `print`
    #[token("print")]
    Print,
    /// `input`
    #[token("input")]
    Input,
    /// Integer literal tokens, such as `42`. The text is converted by the
    /// parser.
    #[regex(r"[0-9]+")]
    Integer,
    /// Identifier tokens; variable or function names such as `total`.
    #[regex(r"\p{Alphabetic}+")]
    Identifier,
    /// `<-`
    #[token("<-")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Mod,
    /// `<`
    #[token("<")]
    Lt,
    /// `>`
    #[token(">")]
    Gt,
    /// `<=`
    #[token("<=")]
    Le,
    /// `>=`
    #[token(">=")]
    Ge,
    /// `=`
    #[token("=")]
    Eq,
    /// `~`
    #[token("~")]
    Neq,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `-- line comments.` Kept in the token stream; the parser skips them.
    #[regex(r"--[^\r\n]*", allow_greedy = true)]
    Comment,
    /// End of input. Never produced by the scanner itself; [`tokenize`]
    /// appends it.
    Eof,

    /// Line breaks, counted for diagnostics. Skipped by the scanner and
    /// never emitted.
    #[doc(hidden)]
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds. Skipped by the scanner and
    /// never emitted.
    #[doc(hidden)]
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl TokenKind {
    /// Returns the upper-case name used in token dumps, e.g. `ASSIGN`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Var => "VAR",
            Self::Function => "FUNCTION",
            Self::Return => "RETURN",
            Self::If => "IF",
            Self::Elif => "ELIF",
            Self::Else => "ELSE",
            Self::While => "WHILE",
            Self::Run => "RUN",
            Self::Print => "PRINT",
            Self::Input => "INPUT",
            Self::Integer => "INTEGER",
            Self::Identifier => "IDENTIFIER",
            Self::Assign => "ASSIGN",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Star => "STAR",
            Self::Slash => "SLASH",
            Self::Mod => "MOD",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Le => "LE",
            Self::Ge => "GE",
            Self::Eq => "EQ",
            Self::Neq => "NEQ",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::Comma => "COMMA",
            Self::Semicolon => "SEMICOLON",
            Self::Comment => "COMMENT",
            Self::Eof => "EOF",
            Self::NewLine => "NEWLINE",
            Self::Ignored => "IGNORED",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting.
#[derive(Debug)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// A token: its kind, the exact source text it was scanned from, and the
/// line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of the token.
    pub kind:   TokenKind,
    /// The literal source text.
    pub lexeme: String,
    /// 1-based source line, used in diagnostics only.
    pub line:   usize,
}

impl Token {
    /// Creates a token.
    ///
    /// # Example
    /// ```
    /// use sprola::interpreter::lexer::{Token, TokenKind};
    ///
    /// let token = Token::new(TokenKind::Assign, "<-", 3);
    /// assert_eq!(token.to_string(), r#"Token(ASSIGN, "<-")"#);
    /// ```
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self { kind,
               lexeme: lexeme.into(),
               line }
    }

    /// Creates the end-of-input sentinel for the given line.
    #[must_use]
    pub const fn eof(line: usize) -> Self {
        Self { kind: TokenKind::Eof,
               lexeme: String::new(),
               line }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, \"{}\")", self.kind, self.lexeme)
    }
}

/// Scans `source` into tokens, terminated by exactly one [`TokenKind::Eof`].
///
/// Whitespace is skipped. Characters that start no token are dropped without
/// a diagnostic, so `x # y` scans the same as `x y`.
///
/// # Example
/// ```
/// use sprola::interpreter::lexer::{TokenKind, tokenize};
///
/// let kinds: Vec<_> = tokenize("x <- 1;").into_iter().map(|t| t.kind).collect();
/// assert_eq!(kinds,
///            [TokenKind::Identifier,
///             TokenKind::Assign,
///             TokenKind::Integer,
///             TokenKind::Semicolon,
///             TokenKind::Eof]);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        if let Ok(kind) = result {
            tokens.push(Token::new(kind, lexer.slice(), lexer.extras.line));
        }
    }

    tokens.push(Token::eof(lexer.extras.line));
    tokens
}

/// Renders a token list the way the command line dumps it:
/// `[Token(VAR, "var"), Token(IDENTIFIER, "x"), ...]`.
#[must_use]
pub fn render_tokens(tokens: &[Token]) -> String {
    let items = tokens.iter()
                      .map(ToString::to_string)
                      .collect::<Vec<_>>()
                      .join(", ");
    format!("[{items}]")
}
