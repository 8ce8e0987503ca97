//! Bracket-list dialect.
//!
//! Grammar, scanned left to right over one line:
//!
//! ```text
//! token := [ count " x " ] "[" name "]"
//! count := digit+
//! name  := any characters except "]" and newline
//! ```
//!
//! Every token becomes its own single-reagent alternative, including `[]`,
//! whose name is empty. A missing, zero or unparsable count means one item.
//! Text between tokens is ignored.

use profcost_core::model::{AlternativeGroup, Reagent, RequirementSet};

/// Scanner state. Offsets are byte positions into the line.
#[derive(Debug, Clone, Copy)]
enum State<'a> {
    /// Outside any token.
    Text,
    /// Inside a run of digits that started at the given offset.
    Count(usize),
    /// Digits followed by a space.
    CountSpace(&'a str),
    /// Digits, space, `x`.
    CountX(&'a str),
    /// Digits, space, `x`, space: only `[` continues the token.
    CountXSpace(&'a str),
    /// After `[`: name starts at the given offset.
    Name(Option<&'a str>, usize),
}

/// A matched `count x [name]` token before normalisation.
struct RawToken<'a> {
    count: Option<&'a str>,
    name: &'a str,
}

fn scan(line: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    let mut state = State::Text;

    for (i, c) in line.char_indices() {
        state = match state {
            State::Name(count, start) => match c {
                ']' => {
                    tokens.push(RawToken {
                        count,
                        name: &line[start..i],
                    });
                    State::Text
                }
                // A name never spans lines; nothing before the break can match.
                '\n' => State::Text,
                _ => State::Name(count, start),
            },
            State::Count(start) if c.is_ascii_digit() => State::Count(start),
            State::Count(start) if c == ' ' => State::CountSpace(&line[start..i]),
            State::CountSpace(digits) if c == 'x' => State::CountX(digits),
            State::CountX(digits) if c == ' ' => State::CountXSpace(digits),
            State::CountXSpace(digits) if c == '[' => State::Name(Some(digits), i + 1),
            // Any other character restarts the token at this position.
            _ => match c {
                '[' => State::Name(None, i + 1),
                d if d.is_ascii_digit() => State::Count(i),
                _ => State::Text,
            },
        };
    }

    tokens
}

fn parse_count(digits: Option<&str>) -> u32 {
    match digits.and_then(|d| d.parse::<u32>().ok()) {
        Some(0) | None => 1,
        Some(n) => n,
    }
}

/// Parse a bracket-list line into one alternative per token.
pub fn parse(line: &str) -> RequirementSet {
    scan(line)
        .into_iter()
        .map(|token| {
            AlternativeGroup::single(Reagent::new(
                token.name.trim(),
                parse_count(token.count),
            ))
        })
        .collect()
}
