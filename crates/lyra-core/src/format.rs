//! Output formatting.
//!
//! A routed decision becomes exactly one line, `<prefix> <route>\n`. The
//! "no route" decision writes nothing at all, not even a newline, so the
//! host's context stays untouched.

use std::io::{self, Write};

use lyra_types::routing::Decision;

use crate::rules::RuleTable;

/// Renders decisions as hook output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormatter {
    prefix: String,
}

impl OutputFormatter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The suggestion line without its trailing newline, or `None`.
    ///
    /// A category missing from `table` also renders as `None`; the
    /// classifier validates redirect targets up front, so this only guards
    /// hand-built decisions.
    pub fn render(&self, decision: &Decision, table: &RuleTable) -> Option<String> {
        let id = decision.category.as_deref()?;
        let route = table.route_for(id)?;
        if self.prefix.is_empty() {
            Some(route.to_string())
        } else {
            Some(format!("{} {route}", self.prefix))
        }
    }

    /// Write the rendered line plus `\n` to `out`, or nothing.
    pub fn write<W: Write>(
        &self,
        decision: &Decision,
        table: &RuleTable,
        out: &mut W,
    ) -> io::Result<()> {
        if let Some(line) = self.render(decision, table) {
            writeln!(out, "{line}")?;
            out.flush()?;
        }
        Ok(())
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new("Lyra ->")
    }
}
