#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    parser::parser::Parser,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into a named source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Parses `source` into a [`Program`], or fails with the first syntax error.
///
/// A source with no statements at all (empty, or only whitespace and
/// comments) is accepted and yields an empty body rather than an error.
pub fn parse(source: &str) -> Result<Program, Error> {
    parse_with_file(source, "shell")
}

/// Same as [`parse`], but error positions carry the given file name.
pub fn parse_with_file(source: &str, file: &str) -> Result<Program, Error> {
    let mut parser = Parser::new(Some(String::from(file)));
    parser.parse(source)
}

/// Finds the line containing the byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset of
/// `position` within that line. Offsets past the end point at the last line.
pub fn get_line_at_position(content: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(content.len());

    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        last = (line_number, line.to_string(), line.len());
        start = end;
        line_number += 1;
    }

    if content.ends_with('\n') || content.is_empty() {
        return (line_number, String::new(), 0);
    }

    last
}


/// Renders an error as a caret diagnostic against the in-memory source.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        error: message
        -> final.lt
           |
        20 | let a = #;
           | --------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.1));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!(
        "{} | {}\n",
        line_string,
        line_text_removed.trim_end()
    ));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));
    out
}

/// Prints [`render_error`] output to stderr.
pub fn display_error(error: &Error, source: &str) {
    eprintln!("{}", render_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
