//! Every `[X]` key label a screen draws must also be tappable.
//!
//! Screens build their text with `ClickableList`. A label such as `[H]` or
//! `[Esc]` that goes through a plain `push()` shows up but registers no
//! click target, so it is dead on a phone. This walks the renderers
//! (`src/games/**/render.rs` and the title menu), reads the string literals
//! passed to every `push(...)` call, including calls spread over several
//! lines, and reports any key label it finds there.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq)]
struct Violation {
    file: String,
    line: usize,
    label: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{} draws {} with push(), so it cannot be tapped",
            self.file, self.line, self.label
        )
    }
}

/// A `push(...)` call site.
struct PushCall {
    /// 1-based line of the `push` token.
    line: usize,
    literals: Vec<String>,
}

/// Key labels like `[H]`, `[1]`, `[?]`, `[Esc]` or a `[{}]` format hole:
/// one to three non-space characters between brackets.
fn key_labels(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        rest = &rest[open + 1..];
        let Some(close) = rest.find(']') else {
            break;
        };
        let inner = &rest[..close];
        let len = inner.chars().count();
        if (1..=3).contains(&len) && !inner.contains(|c: char| c.is_whitespace() || c == '[') {
            found.push(format!("[{}]", inner));
        }
    }
    found
}

/// String literals inside the argument list that opens `src`.
fn literals_in_call(src: &str) -> Vec<String> {
    let mut literals = Vec::new();
    let mut depth = 0usize;
    let mut chars = src.chars();
    while let Some(c) = chars.next() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            '"' => {
                let mut literal = String::new();
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            chars.next();
                        }
                        '"' => break,
                        _ => literal.push(c),
                    }
                }
                literals.push(literal);
            }
            _ => {}
        }
    }
    literals
}

/// Plain `push(` calls outside line comments. `push_clickable(` and other
/// helpers are different identifiers and never match.
fn push_calls(source: &str) -> Vec<PushCall> {
    const TOKEN: &str = "push(";
    let mut calls = Vec::new();
    let mut from = 0;
    while let Some(offset) = source[from..].find(TOKEN) {
        let start = from + offset;
        from = start + TOKEN.len();

        let joined_to_ident = source[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        let line_start = source[..start].rfind('\n').map_or(0, |n| n + 1);
        if joined_to_ident || source[line_start..start].contains("//") {
            continue;
        }
        calls.push(PushCall {
            line: source[..start].matches('\n').count() + 1,
            literals: literals_in_call(&source[start + TOKEN.len() - 1..]),
        });
    }
    calls
}

fn violations_in(file: &str, source: &str) -> Vec<Violation> {
    let mut out = Vec::new();
    for call in push_calls(source) {
        for literal in &call.literals {
            for label in key_labels(literal) {
                out.push(Violation {
                    file: file.to_string(),
                    line: call.line,
                    label,
                });
            }
        }
    }
    out
}

fn renderer_files(root: &Path) -> Vec<PathBuf> {
    let mut files = vec![root.join("src/menu.rs")];
    let mut dirs = vec![root.join("src/games")];
    while let Some(dir) = dirs.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                dirs.push(path);
            } else if path.file_name().is_some_and(|n| n == "render.rs") {
                files.push(path);
            }
        }
    }
    files
}

#[test]
fn key_labels_are_tappable() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let files = renderer_files(root);
    assert!(files.len() >= 2, "no render.rs found under {}", root.display());

    let mut found = Vec::new();
    for path in &files {
        let source = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("cannot read {}: {}", path.display(), e));
        let name = path.strip_prefix(root).unwrap_or(path).display().to_string();
        found.extend(violations_in(&name, &source));
    }

    let report: Vec<String> = found.iter().map(ToString::to_string).collect();
    assert!(
        report.is_empty(),
        "register these with push_clickable() or a helper built on it:\n  {}",
        report.join("\n  ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_a_label_spread_over_lines() {
        let source = "cl.push(Line::from(Span::styled(\n    \" [H] Walk left\",\n    style,\n)));";
        let found = violations_in("render.rs", source);
        assert_eq!(
            found,
            vec![Violation {
                file: "render.rs".into(),
                line: 1,
                label: "[H]".into(),
            }]
        );
    }

    #[test]
    fn clickable_helpers_pass() {
        let source = r#"
            cl.push_clickable(Line::from(" [Esc] Back"), BACK);
            push_choice(&mut cl, 0, "[1] Open the panel".into());
        "#;
        assert!(violations_in("render.rs", source).is_empty());
    }

    #[test]
    fn indexing_outside_literals_is_not_a_label() {
        let source = r#"spans.push(bit(read(wire.inputs[0])));"#;
        assert!(violations_in("render.rs", source).is_empty());
    }

    #[test]
    fn commented_out_push_is_skipped() {
        let source = r#"// cl.push(Line::from(" [R] Back to menu"));"#;
        assert!(violations_in("render.rs", source).is_empty());
    }

    #[test]
    fn parens_inside_strings_do_not_end_the_call() {
        let source = r#"cl.push(Line::from(vec![Span::raw(") → "), Span::raw(" [0] Back")]));"#;
        assert_eq!(violations_in("render.rs", source).len(), 1);
    }

    #[test]
    fn label_shapes() {
        assert_eq!(key_labels(" [?] Hint  [Esc] Back"), vec!["[?]", "[Esc]"]);
        assert_eq!(key_labels(" {} [{}] "), vec!["[{}]"]);
        assert!(key_labels("look at [line 2]").is_empty());
        assert!(key_labels("[] [Enter]").is_empty());
    }
}
