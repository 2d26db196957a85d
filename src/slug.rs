//! Slug helpers for document ids.

/// Convert an identifier to kebab-case.
///
/// Splits on non-alphanumeric characters, lower-to-upper transitions,
/// acronym boundaries and letter/digit transitions:
/// `listCaseDocuments` -> `list-case-documents`, `getHTTPStatus` ->
/// `get-http-status`, `resolve_1` -> `resolve-1`.
pub fn kebab_case(ident: &str) -> String {
    words(ident)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Convert display text to a URL-safe slug.
///
/// Lowercases, maps whitespace, dashes and underscores to single dashes and
/// drops other punctuation. Case changes are not word breaks here:
/// `DocuDevs API` -> `docudevs-api`.
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

fn words(ident: &str) -> Vec<String> {
    let chars: Vec<char> = ident.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() && c.is_numeric())
                || (prev.is_numeric() && c.is_alphabetic())
                // "HTTPStatus": the S starts a new word
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(|n| n.is_lowercase()));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}
