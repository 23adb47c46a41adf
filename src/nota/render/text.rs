//! Rich-text decoration and indentation helpers.
//!
//! Decoration is markdown-flavored: annotation flags become marker pairs
//! around the run's space-trimmed core, so whitespace between adjacent
//! runs survives untouched. Terminal color goes innermost, right around
//! the core, via the `colored` crate.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::model::{Color, RichText, RichTextKind};

/// Visible width of one indentation level.
pub const INDENT_WIDTH: usize = 2;

/// Insert `n` spaces after every embedded line break.
fn pad_linebreaks(s: &str, n: usize) -> String {
    if !s.contains('\n') {
        return s.to_owned();
    }
    s.replace('\n', &format!("\n{}", " ".repeat(n)))
}

/// Indent a (possibly multi-line) fragment by `level` levels.
pub fn indent(s: &str, level: usize) -> String {
    let pad = " ".repeat(level * INDENT_WIDTH);
    format!("{pad}{}", pad_linebreaks(s, level * INDENT_WIDTH))
}

/// Indented single line with trailing newline.
pub fn line(s: &str, level: usize) -> String {
    let mut out = indent(s, level);
    out.push('\n');
    out
}

fn terminal_color(color: Color) -> Option<colored::Color> {
    match color {
        Color::Red => Some(colored::Color::Red),
        Color::Green => Some(colored::Color::Green),
        Color::Blue => Some(colored::Color::Blue),
        Color::Yellow => Some(colored::Color::Yellow),
        Color::Purple => Some(colored::Color::Magenta),
        Color::Pink => Some(colored::Color::BrightMagenta),
        Color::Gray => Some(colored::Color::BrightBlack),
        Color::Default | Color::Brown | Color::Orange | Color::Other => None,
    }
}

/// Decorate one run. Marker order is fixed: bold, italic, strikethrough,
/// inline code, underline, then color innermost.
pub fn decorate(run: &RichText) -> String {
    match run.kind {
        RichTextKind::Equation => format!("$ {} $", run.plain_text),
        RichTextKind::Mention | RichTextKind::Other => run.plain_text.clone(),
        RichTextKind::Text => {
            let trimmed = run.plain_text.trim_matches(' ');
            if trimmed.is_empty() {
                return run.plain_text.clone();
            }

            let a = &run.annotations;
            let mut prefix = String::new();
            let mut suffix = String::new();
            if a.bold {
                prefix.push_str("**");
                suffix.insert_str(0, "**");
            }
            if a.italic {
                prefix.push('*');
                suffix.insert(0, '*');
            }
            if a.strikethrough {
                prefix.push_str("~~");
                suffix.insert_str(0, "~~");
            }
            if a.code {
                prefix.push('`');
                suffix.insert(0, '`');
            }
            if a.underline {
                prefix.push_str("<span style=\"text-decoration: underline;\">");
                suffix.insert_str(0, "</span>");
            }

            let core = match terminal_color(a.color) {
                Some(c) => trimmed.color(c).to_string(),
                None => trimmed.to_owned(),
            };
            run.plain_text
                .replace(trimmed, &format!("{prefix}{core}{suffix}"))
        }
    }
}

/// Render a sequence of runs as one indented line (plus any embedded line
/// breaks, which are re-indented to align under the prefix marker).
///
/// Empty `runs` still produce the bare prefix line, so an empty to-do or
/// heading keeps its marker. `style` colors the whole line.
pub fn render_rich_text(
    runs: &[RichText],
    prefix: &str,
    level: usize,
    style: Option<colored::Color>,
) -> String {
    let body = if runs.is_empty() {
        indent(prefix, level)
    } else {
        let mut plain = String::from(prefix);
        for run in runs {
            plain.push_str(&decorate(run));
        }
        indent(&pad_linebreaks(&plain, prefix.width()), level)
    };

    let mut out = match style {
        Some(c) => body.color(c).to_string(),
        None => body,
    };
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Annotations;

    fn run_with(text: &str, annotations: Annotations) -> RichText {
        RichText {
            plain_text: text.into(),
            annotations,
            ..RichText::default()
        }
    }

    #[test]
    fn unannotated_runs_pass_through_unmodified() {
        let runs = vec![RichText::text("hello "), RichText::text("world")];
        assert_eq!(render_rich_text(&runs, "* ", 0, None), "* hello world\n");
    }

    #[test]
    fn bold_wraps_trimmed_core_and_keeps_whitespace() {
        let run = run_with(
            "  hello world ",
            Annotations {
                bold: true,
                ..Annotations::default()
            },
        );
        assert_eq!(decorate(&run), "  **hello world** ");
    }

    #[test]
    fn marker_order_is_fixed() {
        let run = run_with(
            "x",
            Annotations {
                bold: true,
                italic: true,
                strikethrough: true,
                code: true,
                ..Annotations::default()
            },
        );
        assert_eq!(decorate(&run), "***~~`x`~~***");
    }

    #[test]
    fn underline_uses_span_markers() {
        let run = run_with(
            "u",
            Annotations {
                underline: true,
                ..Annotations::default()
            },
        );
        assert_eq!(
            decorate(&run),
            "<span style=\"text-decoration: underline;\">u</span>"
        );
    }

    #[test]
    fn equation_run_is_dollar_wrapped() {
        let run = RichText {
            kind: RichTextKind::Equation,
            plain_text: "E = mc^2".into(),
            ..RichText::default()
        };
        assert_eq!(decorate(&run), "$ E = mc^2 $");
    }

    #[test]
    fn whitespace_only_run_is_untouched() {
        let run = run_with(
            "   ",
            Annotations {
                bold: true,
                ..Annotations::default()
            },
        );
        assert_eq!(decorate(&run), "   ");
    }

    #[test]
    fn empty_runs_still_emit_prefix_line() {
        assert_eq!(render_rich_text(&[], "[ ] ", 1, None), "  [ ] \n");
    }

    #[test]
    fn embedded_newlines_align_under_prefix() {
        let runs = vec![RichText::text("first\nsecond")];
        // 1 level of indent + 4 columns of prefix after the break
        assert_eq!(
            render_rich_text(&runs, ">>> ", 1, None),
            "  >>> first\n      second\n"
        );
    }
}
