use uuid::Uuid;

/// Sentinel for tokens standing in for an escaped `\}` inside a value.
pub const ESCAPED_BRACE_SENTINEL: &str = "__REPLACE__";

/// Sentinel for tokens standing in for a filtered-out placeholder.
pub const SKIPPED_REGION_SENTINEL: &str = "__SKIPPED__";

/// Generate a token that does not occur anywhere in `line`.
///
/// Tokens are `<sentinel><uuid v4>`; the check against `line` only matters if
/// the input already contains a token-looking string.
pub fn fresh_token(sentinel: &str, line: &str) -> String {
    loop {
        let token = format!("{}{}", sentinel, Uuid::new_v4().simple());
        if !line.contains(&token) {
            return token;
        }
    }
}
