//! Stack-count dialect.
//!
//! Grammar, matched within a single line:
//!
//! ```text
//! line   := ... stacks " stacks" ... "following: " list
//! stacks := ( digit | "." )+
//! list   := ( ... "[" name "]" )*
//! ```
//!
//! The first run of digits and dots directly followed by ` stacks` is the
//! stack count; the list starts after the last `following: ` on that line.
//! Each listed item is its own alternative, needed in
//! `ceil(stacks * ITEMS_PER_STACK)` units.

use profcost_core::model::{AlternativeGroup, ITEMS_PER_STACK, Reagent, RequirementSet};

const STACKS_WORD: &str = " stacks";
const LIST_MARKER: &str = "following: ";

/// The stack-count text and the item list text of a header line.
#[derive(Debug, PartialEq, Eq)]
struct Header<'a> {
    stacks: &'a str,
    list: &'a str,
}

fn is_stack_char(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.'
}

/// Find the header in one line (no newlines).
fn scan_header(line: &str) -> Option<Header<'_>> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !is_stack_char(bytes[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && is_stack_char(bytes[i]) {
            i += 1;
        }
        let rest = &line[i..];
        if let Some(after) = rest.strip_prefix(STACKS_WORD)
            && let Some(marker) = after.rfind(LIST_MARKER)
        {
            return Some(Header {
                stacks: &line[start..i],
                list: &after[marker + LIST_MARKER.len()..],
            });
        }
    }
    None
}

/// Bracketed names in order. Names are taken verbatim.
fn scan_names(list: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = list;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        match after.find(']') {
            Some(close) => {
                names.push(&after[..close]);
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    names
}

/// Units needed for a fractional number of stacks, rounded up.
///
/// Quantities beyond `u32::MAX` saturate to `u32::MAX`.
pub fn stack_quantity(stacks: f64) -> u32 {
    (stacks * f64::from(ITEMS_PER_STACK)).ceil() as u32
}

/// Parse a stack-count line. Malformed input yields an empty set.
pub fn parse(line: &str) -> RequirementSet {
    let Some(header) = line.lines().find_map(scan_header) else {
        return RequirementSet::empty();
    };

    let stacks = match header.stacks.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => {
            tracing::debug!(stacks = header.stacks, "malformed stack count");
            return RequirementSet::empty();
        }
    };
    let quantity = stack_quantity(stacks);

    scan_names(header.list)
        .into_iter()
        .map(|name| AlternativeGroup::single(Reagent::new(name, quantity)))
        .collect()
}
