// src/core/html.rs
// Line-level HTML string helpers. No parser: the portal page is line-oriented
// and hand-written, so tags are handled as plain text.
// Tag and pattern matching is case-insensitive on ASCII only, which keeps
// byte offsets in the lowered copy identical to the input.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

pub fn contains_ci(s: &str, pat: &str) -> bool {
    to_lower(s).contains(&to_lower(pat))
}

/// Replace every case-insensitive occurrence of `pat` with `with`.
pub fn replace_ci(s: &str, pat: &str, with: &str) -> String {
    let lc = to_lower(s);
    let pl = to_lower(pat);
    if pl.is_empty() {
        return s!(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut i = 0usize;
    while let Some(rel) = lc[i..].find(&pl) {
        out.push_str(&s[i..i + rel]);
        out.push_str(with);
        i += rel + pl.len();
    }
    out.push_str(&s[i..]);
    out
}

/// True if `s` holds an opening or closing `tag` (`<tag>`, `<tag attr=…>`, `</tag>`, `<tag/>`).
/// `<th` does not match `<thead>`.
pub fn has_tag(s: &str, tag: &str) -> bool {
    let lc = to_lower(s);
    let tag = to_lower(tag);
    let mut from = 0usize;
    while let Some(rel) = lc[from..].find('<') {
        let lt = from + rel;
        if tag_name_at(&lc, lt, &tag).is_some() {
            return true;
        }
        from = lt + 1;
    }
    false
}

/// Replace each opening `<tag …>` with `open_with` and each `</tag>` with `close_with`.
/// Attributes on the opening tag go with it. Other tags are left untouched.
pub fn replace_tag(s: &str, tag: &str, open_with: &str, close_with: &str) -> String {
    let lc = to_lower(s);
    let tag = to_lower(tag);

    let mut out = String::with_capacity(s.len());
    let mut i = 0usize;
    while let Some(rel) = lc[i..].find('<') {
        let lt = i + rel;
        out.push_str(&s[i..lt]);

        if let Some(closing) = tag_name_at(&lc, lt, &tag) {
            if let Some(gt_rel) = lc[lt..].find('>') {
                out.push_str(if closing { close_with } else { open_with });
                i = lt + gt_rel + 1;
                continue;
            }
        }
        out.push('<');
        i = lt + 1;
    }
    out.push_str(&s[i..]);
    out
}

/// Remove all `<...>` tags, keeping everything else byte for byte.
pub fn drop_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

// `lc[lt]` is '<'. Some(is_closing) when the tag there is `tag`.
fn tag_name_at(lc: &str, lt: usize, tag: &str) -> Option<bool> {
    let after = &lc[lt + 1..];
    let (closing, name) = match after.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, after),
    };
    let tail = name.strip_prefix(tag)?;
    let boundary = tail.starts_with(|c: char| c == '>' || c == '/' || c.is_ascii_whitespace());
    boundary.then_some(closing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_ci_ignores_case() {
        assert_eq!(replace_ci("a<TD></td>b", "<td></td>", "    "), "a    b");
        assert_eq!(replace_ci("nothing here", "<td></td>", "x"), "nothing here");
    }

    #[test]
    fn replace_tag_handles_attributes_and_close() {
        let s = r#"<TH colspan="2" align="middle">RA</th>"#;
        assert_eq!(replace_tag(s, "th", " ", " "), " RA ");
    }

    #[test]
    fn replace_tag_respects_name_boundary() {
        // <b> must not eat <br>, and <a> must not eat <abbr>
        assert_eq!(replace_tag("<b>x</b><br>", "b", "", ""), "x<br>");
        assert_eq!(replace_tag("<abbr>y</abbr>", "a", "", ""), "<abbr>y</abbr>");
        assert_eq!(replace_tag("A<br/>B<BR >C", "br", ":", ":"), "A:B:C");
    }

    #[test]
    fn has_tag_matches_open_and_close_only() {
        assert!(has_tag("<th>Name", "th"));
        assert!(has_tag("end</FORM>", "form"));
        assert!(!has_tag("<thead>", "th"));
        assert!(!has_tag("information", "form"));
    }

    #[test]
    fn drop_tags_keeps_spacing() {
        assert_eq!(drop_tags("<i>a</i>  b<br/>"), "a  b");
    }
}
