/// Splits a command line into arguments.
///
/// Whitespace separates tokens unless it sits between double quotes. The
/// quotes themselves are dropped, and an unterminated quote simply runs to
/// the end of the line. Tokens are only emitted when non-empty, so `""`
/// contributes nothing.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if !in_quotes && c.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
