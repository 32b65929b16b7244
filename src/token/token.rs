use std::fmt;


#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    /// Unclassified atom text; see Primitive::classify.
    Atom(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub token: TokenKind,
    pub line: usize,
    pub col: usize,
}


impl Token {
    pub fn is_left_paren(&self) -> bool {
        self.token == TokenKind::LeftParen
    }

    pub fn is_right_paren(&self) -> bool {
        self.token == TokenKind::RightParen
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Atom(atom) => write!(f, "{}", atom),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ ({}, {})", self.token, self.line, self.col)
    }
}
