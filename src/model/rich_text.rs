// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structured text as handed over by the editing widget: blocks of inline runs.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineRun {
    pub text: String,
}

impl InlineRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    runs: Vec<InlineRun>,
}

impl Block {
    pub fn new(runs: Vec<InlineRun>) -> Self {
        Self { runs }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self { runs: vec![InlineRun::new(text)] }
    }

    pub fn runs(&self) -> &[InlineRun] {
        &self.runs
    }

    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichText {
    blocks: Vec<Block>,
}

impl Default for RichText {
    /// A single empty paragraph, like a freshly opened editor.
    fn default() -> Self {
        Self::from_plain("")
    }
}

impl RichText {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Wraps the whole text in one paragraph.
    pub fn from_plain(text: impl Into<String>) -> Self {
        Self { blocks: vec![Block::paragraph(text)] }
    }

    /// Splits on `\n`, one paragraph per line.
    pub fn from_lines(text: &str) -> Self {
        Self { blocks: text.split('\n').map(Block::paragraph).collect() }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Block strings joined with `\n`; this is the document's raw text.
    pub fn plain_text(&self) -> String {
        self.blocks.iter().map(Block::plain_text).collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, InlineRun, RichText};

    #[test]
    fn plain_text_joins_runs_and_blocks() {
        let text = RichText::new(vec![
            Block::new(vec![InlineRun::new("Once upon "), InlineRun::new("a time")]),
            Block::paragraph("the end"),
        ]);
        assert_eq!(text.plain_text(), "Once upon a time\nthe end");
    }

    #[test]
    fn from_lines_preserves_plain_text() {
        let raw = "one\n\nthree";
        assert_eq!(RichText::from_lines(raw).plain_text(), raw);
        assert_eq!(RichText::from_lines(raw).blocks().len(), 3);
    }

    #[test]
    fn default_is_one_empty_paragraph() {
        let text = RichText::default();
        assert_eq!(text.blocks().len(), 1);
        assert_eq!(text.plain_text(), "");
    }
}
