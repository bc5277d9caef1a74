use super::ExprError;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum TokenKind {
    Number(f64),
    Str(String),
    Ident(String),
    LParen,
    RParen,
    Dot,
    Question,
    Colon,
    Bang,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub pos: usize,
}

pub(super) fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let kind = match ch {
            '0'..='9' => {
                let mut end = pos;
                let mut seen_dot = false;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_digit() {
                        end = i + c.len_utf8();
                        chars.next();
                    } else if c == '.' && !seen_dot && next_is_digit(source, i) {
                        seen_dot = true;
                        end = i + 1;
                        chars.next();
                    } else {
                        break;
                    }
                }
                let text = &source[pos..end];
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ExprError::new(pos, format!("invalid number {text:?}")))?;
                TokenKind::Number(value)
            }
            '\'' | '"' => {
                chars.next();
                TokenKind::Str(read_string(&mut chars, ch, pos)?)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                TokenKind::Ident(ident)
            }
            _ => {
                let rest = &source[pos..];
                let (kind, width) = if rest.starts_with("===") {
                    (TokenKind::EqEq, 3)
                } else if rest.starts_with("!==") {
                    (TokenKind::NotEq, 3)
                } else if rest.starts_with("==") {
                    (TokenKind::EqEq, 2)
                } else if rest.starts_with("!=") {
                    (TokenKind::NotEq, 2)
                } else if rest.starts_with("<=") {
                    (TokenKind::Le, 2)
                } else if rest.starts_with(">=") {
                    (TokenKind::Ge, 2)
                } else if rest.starts_with("&&") {
                    (TokenKind::AndAnd, 2)
                } else if rest.starts_with("||") {
                    (TokenKind::OrOr, 2)
                } else {
                    let kind = match ch {
                        '(' => TokenKind::LParen,
                        ')' => TokenKind::RParen,
                        '.' => TokenKind::Dot,
                        '?' => TokenKind::Question,
                        ':' => TokenKind::Colon,
                        '!' => TokenKind::Bang,
                        '+' => TokenKind::Plus,
                        '-' => TokenKind::Minus,
                        '*' => TokenKind::Star,
                        '/' => TokenKind::Slash,
                        '%' => TokenKind::Percent,
                        '<' => TokenKind::Lt,
                        '>' => TokenKind::Gt,
                        _ => return Err(ExprError::new(pos, format!("unexpected character {ch:?}"))),
                    };
                    (kind, 1)
                };
                for _ in 0..width {
                    chars.next();
                }
                kind
            }
        };

        tokens.push(Token { kind, pos });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        pos: source.len(),
    });
    Ok(tokens)
}

fn next_is_digit(source: &str, dot: usize) -> bool {
    source[dot + 1..].chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn read_string(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    quote: char,
    start: usize,
) -> Result<String, ExprError> {
    let mut out = String::new();
    while let Some((pos, c)) = chars.next() {
        match c {
            c if c == quote => return Ok(out),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, c @ ('\\' | '\'' | '"'))) => out.push(c),
                Some((_, other)) => {
                    return Err(ExprError::new(pos, format!("unknown escape \\{other}")));
                }
                None => break,
            },
            c => out.push(c),
        }
    }
    Err(ExprError::new(start, "unterminated string"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("a<=b && c!==d"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Le,
                TokenKind::Ident("b".into()),
                TokenKind::AndAnd,
                TokenKind::Ident("c".into()),
                TokenKind::NotEq,
                TokenKind::Ident("d".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers_and_paths() {
        assert_eq!(
            kinds("1.5 a.b"),
            vec![
                TokenKind::Number(1.5),
                TokenKind::Ident("a".into()),
                TokenKind::Dot,
                TokenKind::Ident("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#"'it\'s' "q\"""#),
            vec![
                TokenKind::Str("it's".into()),
                TokenKind::Str("q\"".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_single_equals_rejected() {
        let err = tokenize("a = b").unwrap_err();
        assert_eq!(err.position, 2);
    }
}
