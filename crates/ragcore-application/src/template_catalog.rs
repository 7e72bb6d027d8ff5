//! Localized prompt-fragment catalog (§4.6).
//!
//! A language-indexed map of template strings with fallback to a default
//! language. Substitution uses named placeholders rendered with
//! `handlebars`; a template referencing a placeholder that isn't supplied
//! at build time is a configuration bug, surfaced eagerly rather than
//! silently rendering an empty string.

use handlebars::Handlebars;
use ragcore_domain::error::{Error, Result};
use ragcore_domain::value_objects::Language;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Keys the NLP controller looks up (§4.4).
pub mod keys {
    /// The system prompt prefacing every answer-generation request.
    pub const RAG_SYSTEM_PROMPT: &str = "rag_system_prompt";
    /// Per-document template, placeholders `{{doc_num}}` and `{{chunk_text}}`.
    pub const RAG_DOCUMENT_TEMPLATE: &str = "rag_document_template";
    /// Footer appended after all documents, placeholder `{{query}}`.
    pub const RAG_FOOTER: &str = "rag_footer";
}

/// Language-indexed map of `{key -> template string}`.
pub struct TemplateCatalog {
    templates: HashMap<Language, HashMap<String, String>>,
    default_language: Language,
    renderer: Handlebars<'static>,
}

/// Dry-run placeholder values per known key (§4.6), used to validate every
/// template at construction time. A key outside [`keys`] is validated
/// against an empty context, so any placeholder it references must be
/// optional (Handlebars renders unresolved variables as empty under
/// non-strict mode) — the controller never looks one up, so that's the
/// extent of validation it needs.
fn validation_context(key: &str) -> Value {
    match key {
        keys::RAG_DOCUMENT_TEMPLATE => json!({"doc_num": 0, "chunk_text": ""}),
        keys::RAG_FOOTER => json!({"query": ""}),
        _ => json!({}),
    }
}

impl TemplateCatalog {
    /// Build a catalog from an explicit table, validating every template
    /// against a dry-run render in strict mode so a reference to a
    /// placeholder [`validation_context`] doesn't supply fails here, at
    /// build time, rather than silently rendering empty at request time.
    pub fn new(templates: HashMap<Language, HashMap<String, String>>, default_language: Language) -> Result<Self> {
        let mut renderer = Handlebars::new();
        renderer.set_strict_mode(true);

        for table in templates.values() {
            for (key, template) in table {
                renderer.render_template(template, &validation_context(key)).map_err(|source| {
                    Error::config(format!("template {key:?} failed dry-run validation: {source}"))
                })?;
            }
        }

        Ok(Self {
            templates,
            default_language,
            renderer,
        })
    }

    /// The built-in catalog shipped with the service: English plus a
    /// handful of localized fragments, covering the three keys the NLP
    /// controller needs. Panics if the built-in templates fail their own
    /// dry-run validation — that would be a defect in this file, not in
    /// caller-supplied configuration.
    #[must_use]
    pub fn built_in(default_language: Language) -> Self {
        let mut templates = HashMap::new();
        templates.insert(Language::English, english_templates());
        templates.insert(Language::Arabic, arabic_templates());
        Self::new(templates, default_language).expect("built-in templates must pass dry-run validation")
    }

    /// Look up `key` for `language`, falling back to the default language,
    /// then to an empty string if neither has it.
    fn lookup(&self, language: Language, key: &str) -> String {
        self.templates
            .get(&language)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.templates
                    .get(&self.default_language)
                    .and_then(|table| table.get(key))
            })
            .cloned()
            .unwrap_or_default()
    }

    /// Render the system prompt fragment for `language`.
    #[must_use]
    pub fn system_prompt(&self, language: Language) -> String {
        self.lookup(language, keys::RAG_SYSTEM_PROMPT)
    }

    /// Render the per-document fragment for `language`.
    pub fn document_fragment(&self, language: Language, doc_num: usize, chunk_text: &str) -> Result<String> {
        let template = self.lookup(language, keys::RAG_DOCUMENT_TEMPLATE);
        self.renderer
            .render_template(&template, &json!({"doc_num": doc_num, "chunk_text": chunk_text}))
            .map_err(|source| Error::internal(format!("document template render failed: {source}")))
    }

    /// Render the footer fragment for `language`.
    pub fn footer(&self, language: Language, query: &str) -> Result<String> {
        let template = self.lookup(language, keys::RAG_FOOTER);
        self.renderer
            .render_template(&template, &json!({"query": query}))
            .map_err(|source| Error::internal(format!("footer template render failed: {source}")))
    }
}

fn english_templates() -> HashMap<String, String> {
    HashMap::from([
        (
            keys::RAG_SYSTEM_PROMPT.to_string(),
            "You are an assistant that answers questions strictly from the \
             documents provided below. If the documents do not contain the \
             answer, say you don't know."
                .to_string(),
        ),
        (
            keys::RAG_DOCUMENT_TEMPLATE.to_string(),
            "## Document No. {{doc_num}}\n{{chunk_text}}".to_string(),
        ),
        (
            keys::RAG_FOOTER.to_string(),
            "Based only on the documents above, answer the following question:\n{{query}}"
                .to_string(),
        ),
    ])
}

fn arabic_templates() -> HashMap<String, String> {
    HashMap::from([
        (
            keys::RAG_SYSTEM_PROMPT.to_string(),
            "أنت مساعد يجيب على الأسئلة بالاعتماد فقط على المستندات أدناه. \
             إذا لم تحتوِ المستندات على الإجابة، قل إنك لا تعرف."
                .to_string(),
        ),
        (
            keys::RAG_DOCUMENT_TEMPLATE.to_string(),
            "## المستند رقم {{doc_num}}\n{{chunk_text}}".to_string(),
        ),
        (
            keys::RAG_FOOTER.to_string(),
            "بالاعتماد فقط على المستندات أعلاه، أجب عن السؤال التالي:\n{{query}}".to_string(),
        ),
    ])
}
