use common::err::{DbError, DbResult};

use crate::sql::token::Token;

/// Splits one command's source text into tokens (§6.2). Identifiers match
/// `[A-Za-z_][A-Za-z0-9_]*`; combined two-character operators (`<=`, `>=`,
/// `!=`) are assembled here so the parser never has to look ahead across
/// tokens for them.
pub fn tokenize(input: &str) -> DbResult<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '\'' || c == '"' {
            let quote = c;
            let mut s = String::new();
            i += 1;
            let mut closed = false;
            while i < chars.len() {
                if chars[i] == quote {
                    closed = true;
                    i += 1;
                    break;
                }
                s.push(chars[i]);
                i += 1;
            }
            if !closed {
                return Err(DbError::SyntaxError(format!("unterminated string literal: {}", s)));
            }
            tokens.push(Token::StringLiteral(s));
            continue;
        }

        if c.is_ascii_digit() || (c == '-' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) {
            let start = i;
            i += 1;
            let mut is_float = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    is_float = true;
                }
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            if is_float {
                let v = text.parse::<f64>().map_err(|e| DbError::SyntaxError(e.to_string()))?;
                tokens.push(Token::FloatLiteral(v));
            } else {
                let v = text.parse::<i64>().map_err(|e| DbError::SyntaxError(e.to_string()))?;
                tokens.push(Token::IntLiteral(v));
            }
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            tokens.push(Token::Identifier(word));
            continue;
        }

        match c {
            '<' | '>' | '!' | '=' => {
                let mut op = c.to_string();
                if let Some(&next) = chars.get(i + 1) {
                    if next == '=' && (c == '<' || c == '>' || c == '!') {
                        op.push(next);
                        i += 1;
                    } else if c == '<' && next == '>' {
                        op.push(next);
                        i += 1;
                    }
                }
                tokens.push(Token::Operator(op));
                i += 1;
            }
            ',' | '.' | '(' | ')' | ';' | '*' => {
                tokens.push(Token::Operator(c.to_string()));
                i += 1;
            }
            other => return Err(DbError::SyntaxError(format!("unexpected character: {}", other))),
        }
    }

    Ok(tokens)
}
