// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Portal cells carry the odd entity (`&nbsp;`, `&deg;`). We don't decode them:
/// the `&` goes and the `;` becomes `_`, so the token stays one word.
pub fn flatten_entities(s: &str) -> String {
    s.replace('&', "").replace(';', "_")
}
