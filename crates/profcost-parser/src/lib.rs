//! Parsing of leveling guide text into reagent requirements.
//!
//! Two line dialects are supported, selected per profession:
//!
//! - [`generic`]: `60 x [Blackened Dragonscale]` tokens, each one its own
//!   alternative.
//! - [`stack`]: `2.5 stacks of the following: [A][B]`, every listed item
//!   needed in stack quantities.
//!
//! [`guide`] turns a downloaded guide page into its list of step lines.
//! None of the parsers fail: unrecognised input yields an empty
//! [`RequirementSet`].

pub mod generic;
pub mod guide;
pub mod stack;

use profcost_core::model::{Dialect, RequirementSet};

/// Parse one guide step line with the given dialect.
pub fn parse_line(dialect: Dialect, line: &str) -> RequirementSet {
    match dialect {
        Dialect::Generic => generic::parse(line),
        Dialect::StackCount => stack::parse(line),
    }
}
