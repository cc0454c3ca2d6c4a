/// Split one line into fields on `delimiter`.
///
/// Double quotes toggle an "inside quotes" state and are not copied into the
/// field; a doubled quote inside a quoted section is a literal `"`. Fields are
/// never trimmed and the text after the last delimiter is always emitted.
pub fn tokenize(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if c == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    fields.push(current);
    fields
}

/// Split text into non-blank lines, dropping a leading BOM and trailing `\r`.
pub fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.strip_prefix('\u{feff}')
        .unwrap_or(text)
        .split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Guess the delimiter by counting candidates on the first line.
pub fn detect_delimiter(first_line: &str) -> char {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs && semicolons > 0 {
        ';'
    } else if tabs > commas {
        '\t'
    } else {
        ','
    }
}
