//! The shared markdown-preprocessing fragment.
//!
//! Every markdown-capable variant embeds the same fragment value through the
//! reserved `markdown.fragment` slot, so a change to the stage order here
//! propagates to every artifact of a run without per-variant drift.

/// One transform stage of the markdown-preprocessing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStage {
    /// Assign slugs to headings and pages
    SlugAssignment,
    /// Expand `:emoji:` shortcodes
    EmojiExpansion,
    /// Compute reading-time metadata
    ReadingTime,
    /// Resolve relative image references
    RelativeImages,
    /// Auto-link headings
    HeadingAutolink,
    /// Annotate external links (target/rel)
    ExternalLinks,
}

/// Which plugin phase a stage runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePhase {
    Remark,
    Rehype,
}

impl TransformStage {
    /// Default stage order.
    pub const DEFAULT_ORDER: [TransformStage; 6] = [
        TransformStage::SlugAssignment,
        TransformStage::EmojiExpansion,
        TransformStage::ReadingTime,
        TransformStage::RelativeImages,
        TransformStage::HeadingAutolink,
        TransformStage::ExternalLinks,
    ];

    pub fn phase(&self) -> StagePhase {
        match self {
            TransformStage::SlugAssignment
            | TransformStage::EmojiExpansion
            | TransformStage::ReadingTime
            | TransformStage::RelativeImages => StagePhase::Remark,
            TransformStage::HeadingAutolink | TransformStage::ExternalLinks => StagePhase::Rehype,
        }
    }

    /// The plugin expression for this stage in the emitted config.
    pub fn plugin_expr(&self) -> &'static str {
        match self {
            TransformStage::SlugAssignment => "remarkSlug",
            TransformStage::EmojiExpansion => "emoji",
            TransformStage::ReadingTime => "readingTime()",
            TransformStage::RelativeImages => "relativeImages",
            TransformStage::HeadingAutolink => "[rehypeAutolinkHeadings, { behavior: 'wrap' }]",
            TransformStage::ExternalLinks => {
                "[rehypeExternalLinks, { target: '_blank', rel: ['noopener', 'noreferrer'] }]"
            }
        }
    }
}

/// The markdown-preprocessing configuration shared by all variants of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFragment {
    stages: Vec<TransformStage>,
    extensions: Vec<String>,
}

impl SharedFragment {
    /// Build a fragment with an explicit stage order and extension set.
    pub fn new(stages: Vec<TransformStage>, extensions: Vec<String>) -> Self {
        Self { stages, extensions }
    }

    /// Replace the recognized source-file extensions.
    ///
    /// The composition pipeline uses this to specialize the fragment with the
    /// manifest's extension list before any variant is substituted.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Ordered transform stages.
    pub fn stages(&self) -> &[TransformStage] {
        &self.stages
    }

    /// Recognized source-file extensions.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Render the fragment as the body of the preprocessor config object.
    ///
    /// Stage order in the output follows `self.stages` within each phase;
    /// remark stages run before rehype stages, as the underlying pipeline
    /// demands.
    pub fn render(&self) -> String {
        let remark: Vec<&str> = self
            .stages
            .iter()
            .filter(|s| s.phase() == StagePhase::Remark)
            .map(|s| s.plugin_expr())
            .collect();
        let rehype: Vec<&str> = self
            .stages
            .iter()
            .filter(|s| s.phase() == StagePhase::Rehype)
            .map(|s| s.plugin_expr())
            .collect();

        let mut out = String::new();
        out.push_str(&format!("\textensions: {},\n", render_string_list(&self.extensions)));
        out.push_str("\tsmartypants: {\n\t\tdashes: 'oldschool'\n\t},\n");
        out.push_str(&format!("\tremarkPlugins: [{}],\n", remark.join(", ")));
        out.push_str("\trehypePlugins: [\n");
        for (i, expr) in rehype.iter().enumerate() {
            let comma = if i + 1 < rehype.len() { "," } else { "" };
            out.push_str(&format!("\t\t{expr}{comma}\n"));
        }
        out.push_str("\t]");
        out
    }
}

impl Default for SharedFragment {
    fn default() -> Self {
        Self {
            stages: TransformStage::DEFAULT_ORDER.to_vec(),
            extensions: vec![
                ".svelte.md".to_string(),
                ".md".to_string(),
                ".svx".to_string(),
            ],
        }
    }
}

/// Render a list of strings as a single-quoted JS array literal.
pub fn render_string_list(items: &[String]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|s| format!("'{}'", s.replace('\'', "\\'")))
        .collect();
    format!("[{}]", quoted.join(", "))
}
