//! Whether the cursor sits inside math
//!
//! Math is a `$$ ... $$` display block, a ```` ```math ```` or
//! ```` ```{math} ```` fence, or inline `$ ... $` on the cursor line. Any
//! other fenced block is code and never math.

/// Kind of math environment around the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathEnvironment {
    None,
    Display,
    Inline,
}

impl MathEnvironment {
    pub fn is_math(self) -> bool {
        !matches!(self, MathEnvironment::None)
    }
}

#[derive(Debug, Clone, Copy)]
struct Fence {
    marker: char,
    len: usize,
    math: bool,
}

/// Classify the cursor position.
///
/// `preceding_lines` are the document lines above the cursor line and
/// `before` is the cursor line up to the cursor.
pub fn math_environment<'a>(preceding_lines: impl IntoIterator<Item = &'a str>, before: &str) -> MathEnvironment {
    let mut fence: Option<Fence> = None;
    let mut in_display = false;

    for line in preceding_lines {
        match fence {
            Some(open) => {
                if closes_fence(line, open) {
                    fence = None;
                }
            }
            None => {
                if let Some(open) = opens_fence(line) {
                    fence = Some(open);
                } else if count_display_delimiters(line) % 2 == 1 {
                    in_display = !in_display;
                }
            }
        }
    }

    if let Some(open) = fence {
        return if open.math { MathEnvironment::Display } else { MathEnvironment::None };
    }

    if count_display_delimiters(before) % 2 == 1 {
        in_display = !in_display;
    }
    if in_display {
        return MathEnvironment::Display;
    }

    if count_inline_delimiters(before) % 2 == 1 {
        MathEnvironment::Inline
    } else {
        MathEnvironment::None
    }
}

fn fence_indent_ok(line: &str) -> Option<&str> {
    let trimmed = line.trim_start_matches(' ');
    (line.len() - trimmed.len() <= 3).then_some(trimmed)
}

fn opens_fence(line: &str) -> Option<Fence> {
    let trimmed = fence_indent_ok(line)?;
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    if len < 3 {
        return None;
    }

    let info = trimmed[len..].trim();
    let math = info == "math" || info.starts_with("math ") || info.starts_with("{math}");
    Some(Fence { marker, len, math })
}

fn closes_fence(line: &str, open: Fence) -> bool {
    let Some(trimmed) = fence_indent_ok(line) else {
        return false;
    };
    let len = trimmed.chars().take_while(|c| *c == open.marker).count();
    len >= open.len && trimmed[len..].trim().is_empty()
}

/// Number of unescaped `$$` pairs
fn count_display_delimiters(text: &str) -> usize {
    dollar_runs(text).filter(|run| *run >= 2).map(|run| run / 2).sum()
}

/// Number of unescaped lone `$`
fn count_inline_delimiters(text: &str) -> usize {
    dollar_runs(text).filter(|run| *run == 1).count()
}

/// Lengths of the unescaped runs of `$` in `text`
fn dollar_runs(text: &str) -> impl Iterator<Item = usize> + '_ {
    let bytes = text.as_bytes();
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'$' => {
                    let start = i;
                    while i < bytes.len() && bytes[i] == b'$' {
                        i += 1;
                    }
                    return Some(i - start);
                }
                _ => i += 1,
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn env_at_end(doc: &str) -> MathEnvironment {
        let lines: Vec<&str> = doc.lines().collect();
        let (last, preceding) = lines.split_last().unwrap();
        math_environment(preceding.iter().copied(), last)
    }

    #[test]
    fn test_inline_math() {
        assert_eq!(math_environment([], "Let $x = \\"), MathEnvironment::Inline);
        assert_eq!(math_environment([], "Let $x$ and \\"), MathEnvironment::None);
        assert_eq!(math_environment([], "Costs \\$5 and \\"), MathEnvironment::None);
    }

    #[test]
    fn test_display_block() {
        let doc = indoc! {"
            Text
            $$
            x + \\
        "};
        assert_eq!(env_at_end(doc), MathEnvironment::Display);

        let closed = indoc! {"
            $$
            x
            $$
            after \\
        "};
        assert_eq!(env_at_end(closed), MathEnvironment::None);

        assert_eq!(math_environment([], "$$ \\frac"), MathEnvironment::Display);
    }

    #[test]
    fn test_math_fences() {
        let doc = indoc! {"
            ```{math}
            :label: eq
            E = \\
        "};
        assert_eq!(env_at_end(doc), MathEnvironment::Display);

        let plain = indoc! {"
            ```math
            \\al
        "};
        assert_eq!(env_at_end(plain), MathEnvironment::Display);
    }

    #[test]
    fn test_code_fence_is_never_math() {
        let doc = indoc! {"
            ```python
            s = \"$x\" + \\
        "};
        assert_eq!(env_at_end(doc), MathEnvironment::None);

        let dollars_in_code = indoc! {"
            ~~~~
            $$
            ~~~~
            after \\
        "};
        assert_eq!(env_at_end(dollars_in_code), MathEnvironment::None);
    }

    #[test]
    fn test_fence_needs_matching_close() {
        let doc = indoc! {"
            ````{math}
            ```
            \\
        "};
        assert_eq!(env_at_end(doc), MathEnvironment::Display);
    }
}
