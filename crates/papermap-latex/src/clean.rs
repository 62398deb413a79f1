//! LaTeX-to-plain-text normalization
//!
//! Normalization is an ordered table of named steps, [`LATEX_CLEAN_STEPS`].
//! Each step documents what it expects from earlier steps. The table ends with
//! the shared tail from [`papermap_core::text::finish_plain_text`]
//! (whitespace collapse, truncation, HTML escape), which must stay last so no
//! rewrite here ever sees escaped text.
//!
//! No step fails: constructs a step cannot resolve are left as literal text.

use crate::braces::replace_command_args;
use papermap_core::text::finish_plain_text;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// -- Text cleaning patterns --
static RE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|[^\\])%.*$").expect("valid comment regex"));
static RE_CITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\\(cite|citep|citet|citealp|citeauthor|ref|eqref|autoref|cref|Cref)\*?(?:\s*\[[^\]]*\])*\s*\{([^{}]*)\}",
    )
    .expect("valid cite regex")
});
static RE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\label\s*\{[^{}]*\}").expect("valid label regex"));
static RE_ENV_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:begin|end)\s*\{[^{}]*\}(?:\[[^\]]*\])?").expect("valid env marker regex")
});
static RE_DISPLAY_DOLLARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$(.+?)\$\$").expect("valid display math regex"));
static RE_DISPLAY_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\[(.+?)\\\]").expect("valid bracket math regex"));
static RE_INLINE_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\((.+?)\\\)").expect("valid paren math regex"));
static RE_INLINE_DOLLAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^\\])\$([^$]+?)\$").expect("valid inline math regex"));
static RE_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:tnoteref|corref|fnref)\s*\{[^{}]*\}").expect("valid annotation regex")
});
static RE_SIMPLE_CMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+\*?").expect("valid simple cmd regex"));
static RE_SIMPLE_BRACES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(^|[^\\])\{((?:[^{}\\]|\\.)*)\}").expect("valid braces regex")
});
static RE_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\\\\*?(?:\[\s*-?[0-9.]+\s*[a-z]{2}\s*\])?").expect("valid line break regex")
});
static RE_EMPTY_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\]").expect("valid empty brackets regex"));
static RE_TIE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^\\])~").expect("valid tie regex"));
static RE_ESCAPED_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([%&$#_{}~^])").expect("valid escaped punctuation regex"));
static RE_SPACING_CMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[,;:! ]").expect("valid spacing regex"));

/// Formatting commands whose argument is kept as plain text.
const UNWRAP_COMMANDS: &[&str] = &[
    "textbf", "textit", "emph", "texttt", "underline", "textsc", "textrm", "textsf", "mbox",
];

/// One named rewrite in the normalization pipeline.
#[derive(Debug, Clone, Copy)]
pub struct CleanStep {
    /// Stable identifier, used in logs and tests.
    pub name: &'static str,
    /// The rewrite itself.
    pub apply: fn(&str) -> String,
}

/// The LaTeX normalization pipeline, in execution order.
pub static LATEX_CLEAN_STEPS: &[CleanStep] = &[
    CleanStep { name: "strip_comments", apply: strip_comments },
    CleanStep { name: "break_lines", apply: break_lines },
    CleanStep { name: "rewrite_citations", apply: rewrite_citations },
    CleanStep { name: "drop_labels", apply: drop_labels },
    CleanStep { name: "drop_environment_markers", apply: drop_environment_markers },
    CleanStep { name: "bracket_math", apply: bracket_math },
    CleanStep { name: "inline_footnotes", apply: inline_footnotes },
    CleanStep { name: "unwrap_formatting", apply: unwrap_formatting },
    CleanStep { name: "strip_commands", apply: strip_commands },
    CleanStep { name: "strip_simple_braces", apply: strip_simple_braces },
    CleanStep { name: "drop_empty_brackets", apply: drop_empty_brackets },
    CleanStep { name: "strip_escapes", apply: strip_escapes },
];

/// Normalize a LaTeX fragment into HTML-safe plain text.
///
/// With `max_chars`, the collapsed text is truncated to that many characters
/// and suffixed with `...` before escaping.
#[must_use]
pub fn clean_latex(text: &str, max_chars: Option<usize>) -> String {
    let mut result = text.to_string();
    for step in LATEX_CLEAN_STEPS {
        result = (step.apply)(&result);
    }
    finish_plain_text(&result, max_chars)
}

/// Remove `%` line comments. An escaped `\%` is literal and kept.
fn strip_comments(text: &str) -> String {
    RE_COMMENT.replace_all(text, "${1}").into_owned()
}

/// `\\`, `\\*` and `\\[2pt]` line breaks become a space.
///
/// Runs before every command-matching step: in `Foo\\Bar` the second
/// backslash would otherwise start a `\Bar` command.
fn break_lines(text: &str) -> String {
    RE_LINE_BREAK.replace_all(text, " ").into_owned()
}

/// `\cite{a,b}` becomes `[citation: a,b]`, `\ref{x}` becomes `[ref: x]`.
///
/// Runs before the catch-all in [`strip_commands`], which would otherwise
/// discard the command name and leave a bare key.
fn rewrite_citations(text: &str) -> String {
    RE_CITE
        .replace_all(text, |caps: &Captures| {
            let label = if caps[1].starts_with("cite") {
                "citation"
            } else {
                "ref"
            };
            format!("[{label}: {}]", caps[2].trim())
        })
        .into_owned()
}

/// `\label{...}` has no display value.
fn drop_labels(text: &str) -> String {
    RE_LABEL.replace_all(text, "").into_owned()
}

/// `\begin{env}` / `\end{env}` markers go; the environment body stays.
fn drop_environment_markers(text: &str) -> String {
    RE_ENV_MARKER.replace_all(text, " ").into_owned()
}

/// Math delimiters become square brackets around the unchanged body.
///
/// `$$` is handled before `$` so display math is not read as two empty
/// inline formulas. A `\$` is a literal dollar and never opens math.
fn bracket_math(text: &str) -> String {
    let text = RE_DISPLAY_DOLLARS.replace_all(text, "[${1}]");
    let text = RE_DISPLAY_BRACKETS.replace_all(&text, "[${1}]");
    let text = RE_INLINE_PARENS.replace_all(&text, "[${1}]");
    RE_INLINE_DOLLAR.replace_all(&text, "${1}[${2}]").into_owned()
}

/// `\footnote{...}` becomes `(note: ...)`; annotation-only references vanish.
fn inline_footnotes(text: &str) -> String {
    let text = RE_ANNOTATION.replace_all(text, "");
    replace_command_args(&text, &["footnote"], |_, arg| {
        format!(" (note: {})", inline_footnotes(arg).trim())
    })
}

/// Formatting commands are replaced by their bare argument.
fn unwrap_formatting(text: &str) -> String {
    replace_command_args(text, UNWRAP_COMMANDS, |_, arg| unwrap_formatting(arg))
}

/// Catch-all: drop every remaining `\command` / `\command*`, keeping any
/// argument text. Must follow every argument-aware step.
fn strip_commands(text: &str) -> String {
    RE_SIMPLE_CMD.replace_all(text, " ").into_owned()
}

/// Remove `{...}` grouping from the innermost level outwards. Unbalanced
/// braces survive as literal text, and escaped `\{` `\}` are left for
/// [`strip_escapes`].
fn strip_simple_braces(text: &str) -> String {
    let mut result = text.to_string();
    while RE_SIMPLE_BRACES.is_match(&result) {
        result = RE_SIMPLE_BRACES.replace_all(&result, "${1}${2}").into_owned();
    }
    result
}

/// Math made only of dropped commands (`$\alpha$`) leaves `[ ]` behind.
fn drop_empty_brackets(text: &str) -> String {
    RE_EMPTY_BRACKETS.replace_all(text, "").into_owned()
}

/// `~` and spacing commands (`\,` `\;`) become spaces; `\&`, `\%`, `\{`,
/// `\_`... lose their backslash.
fn strip_escapes(text: &str) -> String {
    let text = RE_SPACING_CMD.replace_all(text, " ");
    let text = RE_TIE.replace_all(&text, "${1} ");
    RE_ESCAPED_PUNCT.replace_all(&text, "${1}").into_owned()
}
