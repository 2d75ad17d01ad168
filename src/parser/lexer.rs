type Pos = u32;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Number,
    Color,
    Ident,
    Error,
}

#[derive(Debug)]
pub struct Lexeme {
    pub token: Token,
    pub text: String,

    /// The line the lexeme starts on, counting from one.
    pub line: u32,
}

#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    /// Byte offset just past the last consumed character.
    offset: Pos,
    line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            offset: 0,
            line: 1,
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        self.chars.next().map(|(off, c)| {
            self.offset = (off + c.len_utf8()) as Pos;
            if c == '\n' {
                self.line += 1;
            }
            c
        })
    }

    fn consume(&mut self) {
        self.next_char();
    }

    fn consume_if<P: FnOnce(char) -> bool>(&mut self, pred: P) -> Option<char> {
        self.chars.next_if(|(_, c)| pred(*c)).map(|(ix, c)| {
            self.offset = (ix + c.len_utf8()) as Pos;
            c
        })
    }

    fn consume_while<P: FnMut(char) -> bool>(&mut self, mut pred: P) -> usize {
        let mut count = 0;

        while let Some((ix, c)) = self.chars.next_if(|(_, c)| pred(*c)) {
            self.offset = (ix + c.len_utf8()) as Pos;
            count += 1;
        }

        count
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek_char() {
            match c {
                ';' => self.skip_line(),
                c if c.is_whitespace() => self.consume(),
                _ => break,
            }
        }
    }

    fn pos(&self) -> Pos {
        self.offset
    }

    /// Skip to the next line.
    fn skip_line(&mut self) {
        while self.consume_if(|c| c != '\n').is_some() {}
    }

    /// Consume the tail of an identifier.
    fn consume_ident(&mut self) {
        self.consume_while(|c| c.is_ascii_alphanumeric() || "-_!?".contains(c));
    }

    /// Consume the digits of a number, allowing a single decimal point unless `dot` says one was
    /// already seen.
    fn consume_number(&mut self, mut dot: bool) -> usize {
        self.consume_while(|c| {
            if !dot && c == '.' {
                dot = true;
                return true;
            }

            c.is_ascii_digit()
        })
    }

    fn consume_color(&mut self) -> bool {
        self.consume_while(|c| c.is_ascii_hexdigit()) > 0
    }

    fn text(&self, start: Pos, end: Pos) -> String {
        self.input
            .get(start as usize..end as usize)
            .map(String::from)
            .unwrap_or_default()
    }

    /// Construct a lexeme.
    fn lexeme(&self, start: Pos, line: u32, token: Token) -> Lexeme {
        let end = self.offset;
        Lexeme {
            token,
            text: self.text(start, end),
            line,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let c = self.next_char()?;
        let start = self.pos() - c.len_utf8() as Pos;
        let tok = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '#' => {
                if self.consume_color() {
                    Token::Color
                } else {
                    Token::Error
                }
            }

            '-' | '.' => {
                if self.consume_number(c == '.') > 0 {
                    Token::Number
                } else {
                    Token::Error
                }
            }

            _ if c.is_ascii_digit() => {
                self.consume_number(false);
                Token::Number
            }

            _ if c.is_ascii_alphabetic() => {
                self.consume_ident();
                Token::Ident
            }

            _ => Token::Error,
        };
        Some(self.lexeme(start, line, tok))
    }
}

#[cfg(test)]
macro_rules! lexer_next {
    ($lexer:ident, $token:expr, $text:expr) => {
        let result = $lexer.next();
        assert!(result.is_some());

        let result = result.unwrap();
        assert_eq!($token, result.token);
        assert_eq!($text, result.text);
    };
}

#[test]
fn test_lex_basic() {
    let input = "(sphere (1 -0.5 .25) 1.0 #6600ff))";
    let mut lexer = Lexer::new(input);
    lexer_next!(lexer, Token::LParen, "(");
    lexer_next!(lexer, Token::Ident, "sphere");
    lexer_next!(lexer, Token::LParen, "(");
    lexer_next!(lexer, Token::Number, "1");
    lexer_next!(lexer, Token::Number, "-0.5");
    lexer_next!(lexer, Token::Number, ".25");
    lexer_next!(lexer, Token::RParen, ")");
    lexer_next!(lexer, Token::Number, "1.0");
    lexer_next!(lexer, Token::Color, "#6600ff");
    lexer_next!(lexer, Token::RParen, ")");
    lexer_next!(lexer, Token::RParen, ")");
    assert!(lexer.next().is_none());
}

#[test]
fn test_lex_ident_with_dash() {
    let input = "max-distance blue_2";
    let mut lexer = Lexer::new(input);
    lexer_next!(lexer, Token::Ident, "max-distance");
    lexer_next!(lexer, Token::Ident, "blue_2");
}

#[test]
fn test_lex_errors() {
    let input = "# - @";
    let mut lexer = Lexer::new(input);
    lexer_next!(lexer, Token::Error, "#");
    lexer_next!(lexer, Token::Error, "-");
    lexer_next!(lexer, Token::Error, "@");
}

#[test]
fn test_lex_leading_comment() {
    let input = "    ;; foo comment\n     light";
    let mut lexer = Lexer::new(input);
    let lexeme = lexer.next().expect("lexeme");
    assert_eq!(Token::Ident, lexeme.token);
    assert_eq!(2, lexeme.line);
}

#[test]
fn test_lex_trailing_space() {
    let input = "light   ";
    let mut lexer = Lexer::new(input);
    lexer_next!(lexer, Token::Ident, "light");
    assert!(lexer.next().is_none());
}
