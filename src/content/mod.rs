pub mod html;
pub mod sanitizer;
pub mod boilerplate;
pub mod truncate;
pub mod image;

pub use boilerplate::{strip_boilerplate, BoilerplateRules, WidgetSignature};
pub use image::featured_image;
pub use sanitizer::{sanitize, SanitizePolicy};
pub use truncate::{truncate_html, Preview, ELLIPSIS};

pub const DEFAULT_PREVIEW_WORDS: usize = 150;

/// Settings for the content stages, handed to every call explicitly.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub sanitize: SanitizePolicy,
    pub boilerplate: BoilerplateRules,
    pub preview_words: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            sanitize: SanitizePolicy::default(),
            boilerplate: BoilerplateRules::default(),
            preview_words: DEFAULT_PREVIEW_WORDS,
        }
    }
}

impl PipelineOptions {
    pub fn with_preview_words(mut self, preview_words: usize) -> Self {
        self.preview_words = preview_words;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedContent {
    /// Sanitized body with boilerplate removed.
    pub html: String,
    pub preview: Preview,
}

/// Sanitize, then strip boilerplate, then build the preview. Stripping only
/// ever sees sanitized markup.
pub fn process_content(raw_html: &str, options: &PipelineOptions) -> ProcessedContent {
    let sanitized = sanitize(raw_html, &options.sanitize);
    let html = strip_boilerplate(&sanitized, &options.boilerplate);
    let preview = truncate_html(&html, options.preview_words);

    ProcessedContent { html, preview }
}
