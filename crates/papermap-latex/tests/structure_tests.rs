//! End-to-end LaTeX parsing on paper-shaped input.

use papermap_core::{PaperFormat, INLINE_SOURCE};
use papermap_latex::LatexBackend;

const PAPER: &str = r"\documentclass{article}
\usepackage{amsmath}
% \title{Draft title}
\title{Attention Is {All} You Need}
\author{Ashish Vaswani\thanks{Google Brain} \and Noam Shazeer}

\begin{document}
\maketitle

\begin{abstract}
The dominant sequence transduction models are based on complex recurrent networks.
\end{abstract}

\section{Introduction}\label{sec:intro}
Recurrent neural networks~\cite{hochreiter97} have been established.

\section{Background}
\subsection{Self-Attention}
Self-attention relates positions $i$ and $j$.
\subsubsection{Scaled Dot-Product}
We compute $\mathrm{softmax}(QK^T)$.

\section{Model Architecture}
\paragraph{Encoder} Stack of $N=6$ layers.

\section*{Conclusion}
In this work, we presented the \textbf{Transformer}.
\end{document}
";

#[test]
fn test_parse_full_paper() {
    let doc = LatexBackend::new().parse(PAPER, "attention.tex");

    assert_eq!(doc.source, "attention.tex");
    assert_eq!(doc.format, PaperFormat::Latex);
    assert_eq!(doc.title, "Attention Is All You Need");
    assert_eq!(
        doc.author.as_deref(),
        Some("Ashish Vaswani Google Brain, Noam Shazeer")
    );
    assert_eq!(
        doc.abstract_text.as_deref(),
        Some("The dominant sequence transduction models are based on complex recurrent networks.")
    );

    let top: Vec<&str> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
    assert_eq!(
        top,
        vec!["Introduction", "Background", "Model Architecture", "Conclusion"]
    );
}

#[test]
fn test_full_paper_nesting() {
    let doc = LatexBackend::new().parse(PAPER, INLINE_SOURCE);

    let background = &doc.sections[1];
    assert_eq!(background.children.len(), 1);
    let attention = &background.children[0];
    assert_eq!(attention.heading, "Self-Attention");
    assert_eq!(attention.level, 2);
    assert_eq!(attention.children[0].heading, "Scaled Dot-Product");
    assert_eq!(attention.children[0].level, 3);

    let model = &doc.sections[2];
    assert_eq!(model.children[0].heading, "Encoder");
    assert_eq!(model.children[0].level, 4);
    assert!(model.children[0]
        .text_excerpt
        .starts_with("Stack of [N=6] layers."));
}

#[test]
fn test_full_paper_excerpts() {
    let doc = LatexBackend::new().parse(PAPER, INLINE_SOURCE);

    let intro = &doc.sections[0];
    assert!(intro
        .text_excerpt
        .starts_with("Recurrent neural networks [citation: hochreiter97] have been established."));

    let conclusion = &doc.sections[3];
    assert!(conclusion
        .text_excerpt
        .starts_with("In this work, we presented the Transformer."));
    assert!(!conclusion.text_excerpt.contains('\\'));
}

#[test]
fn test_every_excerpt_fits_budget() {
    let doc = LatexBackend::new().parse(PAPER, INLINE_SOURCE);
    for (_, heading) in doc.walk() {
        let chars = heading.text_excerpt.chars().count();
        assert!(chars <= 153, "{} has {chars} chars", heading.heading);
    }
}

#[test]
fn test_serialized_keys() {
    let doc = LatexBackend::new().parse(PAPER, INLINE_SOURCE);
    let json = serde_json::to_value(doc.into_report()).unwrap();
    assert_eq!(json["section_count"], 4);
    assert_eq!(json["format"], "latex");
    assert_eq!(json["sections"][1]["children"][0]["heading"], "Self-Attention");
    assert!(json["abstract"].is_string());
}
