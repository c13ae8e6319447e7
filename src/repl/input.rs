//! Quote-aware splitting of an input line.

/// Split on spaces, honouring single and double quotes.
///
/// Quotes group words and are dropped; a quote of the other kind inside a
/// quoted run is kept literally. An unterminated quote runs to end of line.
pub fn parse_input_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match (c, quote) {
            ('"' | '\'', None) => quote = Some(c),
            (c, Some(q)) if c == q => quote = None,
            (' ', None) => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            (c, _) => current.push(c),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }
    args
}

/// Byte offset where the word under the cursor starts, and the word itself.
///
/// A trailing space means a new, empty word at `line.len()`.
pub fn current_word(line: &str) -> (usize, &str) {
    match line.rfind(' ') {
        Some(idx) => (idx + 1, &line[idx + 1..]),
        None => (0, line),
    }
}
