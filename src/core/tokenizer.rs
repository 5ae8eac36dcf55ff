use std::fmt;

/// Failure to split a line into tokens. The line is reported and skipped;
/// tokenizing never aborts the surrounding loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    UnclosedQuote(char),
    TrailingEscape,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::UnclosedQuote(quote) => {
                write!(f, "no closing quotation: {}", quote)
            }
            SyntaxError::TrailingEscape => write!(f, "no character after escape"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    SingleQuote,
    DoubleQuote,
}

/// Splits a command line into tokens with shell quoting rules.
///
/// Whitespace outside quotes separates tokens. Single-quoted runs are
/// literal. Inside double quotes a backslash escapes `"` and `\`; outside
/// quotes it escapes any character. Quote characters are stripped, and
/// adjacent quoted/unquoted fragments join into a single token, so
/// `a'b c'd` yields the one token `ab cd` and `""` yields an empty token.
pub fn tokenize(line: &str) -> Result<Vec<String>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut state = State::Normal;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match state {
            State::Normal => match ch {
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                '\'' => {
                    state = State::SingleQuote;
                    in_token = true;
                }
                '"' => {
                    state = State::DoubleQuote;
                    in_token = true;
                }
                '\\' => match chars.next() {
                    Some(c) => {
                        current.push(c);
                        in_token = true;
                    }
                    None => return Err(SyntaxError::TrailingEscape),
                },
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
            State::SingleQuote => match ch {
                '\'' => state = State::Normal,
                c => current.push(c),
            },
            State::DoubleQuote => match ch {
                '"' => state = State::Normal,
                '\\' => match chars.next() {
                    Some(c @ ('"' | '\\')) => current.push(c),
                    Some(c) => {
                        current.push('\\');
                        current.push(c);
                    }
                    None => return Err(SyntaxError::TrailingEscape),
                },
                c => current.push(c),
            },
        }
    }

    match state {
        State::SingleQuote => Err(SyntaxError::UnclosedQuote('\'')),
        State::DoubleQuote => Err(SyntaxError::UnclosedQuote('"')),
        State::Normal => {
            if in_token {
                tokens.push(current);
            }
            Ok(tokens)
        }
    }
}
