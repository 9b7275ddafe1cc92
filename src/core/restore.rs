//! Puts parked tokens back once a line has converged.

use std::collections::HashMap;

use super::resolver::SideTables;

/// Replace every token in `tables` with its literal content.
///
/// Escaped braces go first, then skipped regions. A skipped region can
/// itself carry tokens parked before it was skipped, so the escaped braces
/// are drained once more afterwards. Both tables are empty on return.
pub fn restore(line: String, tables: &mut SideTables) -> String {
    let line = drain(line, &mut tables.escaped_braces);
    let line = drain(line, &mut tables.skipped_regions);
    let line = drain(line, &mut tables.escaped_braces);

    // Tokens that never reached the final text (their region was replaced
    // by something else) have nothing left to restore.
    tables.escaped_braces.clear();
    tables.skipped_regions.clear();
    line
}

/// Restore every pending token found in `line`, repeating while a pass
/// still makes progress, since a restored region may contain other tokens.
///
/// Restored tokens are removed from `pending`.
fn drain(mut line: String, pending: &mut HashMap<String, String>) -> String {
    loop {
        let found: Vec<String> = pending
            .keys()
            .filter(|token| line.contains(token.as_str()))
            .cloned()
            .collect();

        if found.is_empty() {
            return line;
        }

        for token in found {
            if let Some(content) = pending.remove(&token) {
                line = line.replace(&token, &content);
            }
        }

        if pending.is_empty() {
            return line;
        }
    }
}
