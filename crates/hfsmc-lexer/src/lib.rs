//! Turns DSL source text into a stream of tokens delivered to a [`TokenSink`].
//!
//! The lexer never stops early: on an unrecognized character it reports a
//! single-character lexical error and keeps going, so the parser always
//! eventually receives a full token stream (terminated, by convention, with
//! a synthetic `EOF` the host dispatches itself).

mod token;

pub use token::{Token, TokenKind};

use hfsmc_common::Loc;

/// Destination for tokens produced while scanning. Implemented by the
/// parser's adapter, and by small test collectors.
pub trait TokenSink {
    fn open_brace(&mut self, line: i64, pos: i64);
    fn close_brace(&mut self, line: i64, pos: i64);
    fn open_paren(&mut self, line: i64, pos: i64);
    fn close_paren(&mut self, line: i64, pos: i64);
    fn open_angle(&mut self, line: i64, pos: i64);
    fn close_angle(&mut self, line: i64, pos: i64);
    fn star(&mut self, line: i64, pos: i64);
    fn colon(&mut self, line: i64, pos: i64);
    fn name(&mut self, name: &str, line: i64, pos: i64);
    fn error(&mut self, line: i64, pos: i64);
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scans `source` and reports every token to `sink`, line by line.
///
/// Line numbers are 1-based and increment once per `\n`. Token positions are
/// the 0-based column of the token's first character, except the position
/// reported to [`TokenSink::error`], which is 1-based — that off-by-one is
/// inherited from the reference implementation and preserved deliberately.
pub fn lex(source: &str, sink: &mut dyn TokenSink) {
    for (line_idx, line) in source.split('\n').enumerate() {
        lex_line(line, (line_idx + 1) as i64, sink);
    }
}

fn lex_line(line: &str, line_no: i64, sink: &mut dyn TokenSink) {
    let chars: Vec<char> = line.chars().collect();
    let mut pos = 0usize;
    let len = chars.len();

    while pos < len {
        let c = chars[pos];

        // Line comment: `//` runs to the end of the line.
        if c == '/' && pos + 1 < len && chars[pos + 1] == '/' {
            break;
        }

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        match c {
            '{' => {
                sink.open_brace(line_no, pos as i64);
                pos += 1;
            }
            '}' => {
                sink.close_brace(line_no, pos as i64);
                pos += 1;
            }
            '(' => {
                sink.open_paren(line_no, pos as i64);
                pos += 1;
            }
            ')' => {
                sink.close_paren(line_no, pos as i64);
                pos += 1;
            }
            '<' => {
                sink.open_angle(line_no, pos as i64);
                pos += 1;
            }
            '>' => {
                sink.close_angle(line_no, pos as i64);
                pos += 1;
            }
            '*' => {
                sink.star(line_no, pos as i64);
                pos += 1;
            }
            ':' => {
                sink.colon(line_no, pos as i64);
                pos += 1;
            }
            _ if is_name_char(c) => {
                let start = pos;
                while pos < len && is_name_char(chars[pos]) {
                    pos += 1;
                }
                let name: String = chars[start..pos].iter().collect();
                sink.name(&name, line_no, start as i64);
            }
            _ => {
                sink.error(line_no, (pos + 1) as i64);
                pos += 1;
            }
        }
    }
}

/// Position of the synthetic end-of-input event the host dispatches after
/// the last line has been scanned.
pub fn eof_loc() -> Loc {
    Loc::EOF
}
