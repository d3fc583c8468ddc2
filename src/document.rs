//! The incremental document model. Each line parses independently, so an
//! edit reparses only the lines it touched; analysis is the one whole-
//! document pass and is re-run explicitly.

use std::sync::Arc;

use tracing::debug;

use crate::analysis;
use crate::analysis::state::{ScriptState, Site};
use crate::analysis::types::Candidate;
use crate::diagnostics::Diagnostic;
use crate::grammar::{parse_line, ParsedLine};
use crate::queries;
use crate::queries::{OutlineNode, SignatureInfo};
use crate::registry::LanguageDef;

#[derive(Debug, Clone)]
pub struct Line {
    pub text: String,
    pub parsed: ParsedLine,
}

impl Line {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            parsed: parse_line(text),
        }
    }
}

/// One host edit: the inclusive line range it replaces and the replacement
/// text. `resulting_line_count` is the host's post-edit line total, kept as
/// a cross-check.
#[derive(Debug, Clone)]
pub struct EditDelta {
    pub start_line: usize,
    pub end_line: usize,
    pub inserted_text: String,
    pub resulting_line_count: usize,
}

pub struct Document {
    lang: Arc<LanguageDef>,
    lines: Vec<Line>,
    diagnostics: Vec<Diagnostic>,
    state: ScriptState,
}

impl Document {
    pub fn new(lang: Arc<LanguageDef>, text: &str) -> Self {
        let lines = text.split('\n').map(Line::new).collect();
        let mut doc = Self {
            lang,
            lines,
            diagnostics: Vec::new(),
            state: ScriptState::new(),
        };
        doc.analyze();
        doc
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// The diagnostics of the most recent [`Self::analyze`] pass.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Replace one line's text and reparse it. Does not re-analyze.
    pub fn set_line(&mut self, index: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            *line = Line::new(text);
        }
    }

    /// Splice the edit's lines over its line range. Only the inserted lines
    /// are parsed; everything after the range keeps its parse results and
    /// shifts by the line-count delta.
    #[tracing::instrument(skip(self, delta), fields(start = delta.start_line, end = delta.end_line))]
    pub fn apply_edit(&mut self, delta: &EditDelta) {
        let inserted = delta.inserted_text.split('\n').map(Line::new);
        let start = delta.start_line.min(self.lines.len());
        let stop = delta.end_line.saturating_add(1).min(self.lines.len());
        self.lines.splice(start..stop.max(start), inserted);

        if self.lines.len() != delta.resulting_line_count {
            debug!(
                have = self.lines.len(),
                host = delta.resulting_line_count,
                "line count drifted from the host's"
            );
        }
    }

    /// Run a full analysis pass, replacing diagnostics and script state
    /// wholesale.
    pub fn analyze(&mut self) {
        let analysis = analysis::analyze(&self.lang, self.lines.iter().map(|l| &l.parsed));
        self.diagnostics = analysis.diagnostics;
        self.state = analysis.state;
    }

    pub fn completions(&self, line: usize, column: usize) -> Vec<Candidate> {
        match self.lines.get(line) {
            Some(l) => queries::completions(&self.lang, &self.state, &l.parsed, column),
            None => Vec::new(),
        }
    }

    pub fn signature_help(&self, line: usize, column: usize) -> Option<SignatureInfo> {
        let l = self.lines.get(line)?;
        queries::signature_help(&self.lang, &self.state, &l.parsed, column)
    }

    pub fn hover(&self, line: usize, column: usize) -> Option<String> {
        let l = self.lines.get(line)?;
        queries::hover(&self.lang, &l.parsed, column)
    }

    /// Usage sites of the flag, timer, action point or party under the
    /// position, per the most recent analysis pass.
    pub fn references(&self, line: usize, column: usize) -> Vec<Site> {
        match self.lines.get(line).and_then(|l| l.parsed.root.as_ref()) {
            Some(node) => queries::references(&self.lang, &self.state, node, column),
            None => Vec::new(),
        }
    }

    pub fn outline(&self) -> Vec<OutlineNode> {
        queries::outline(&self.lang, self.lines.iter().map(|l| &l.parsed))
    }

    /// Reconstructs the full text, newline separated.
    pub fn text(&self) -> String {
        let texts: Vec<&str> = self.lines.iter().map(|l| l.text.as_str()).collect();
        texts.join("\n")
    }
}
