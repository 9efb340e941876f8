//! Message catalogs and template rendering.
//!
//! Each adapter owns a [`Catalog`]: a build-time mapping from message type
//! to template. A type with no entry means the adapter ignores that message
//! entirely, which is the normal way for a channel to opt out.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use thiserror::Error;

use fundflow_core::message_type::MessageType;
use fundflow_core::submission::FundingStage;

use crate::context::MessageContext;

/// Placeholder value for a lead slot nobody holds.
pub const UNASSIGNED: &str = "Unassigned";

/// Values a [`Template::Text`] is rendered against.
pub type TemplateValues = BTreeMap<&'static str, String>;

/// Programmatic renderer for messages that need more than substitution.
/// Returning `None` suppresses the message for this adapter.
pub type RenderFn = Box<dyn Fn(&MessageContext) -> Option<String> + Send + Sync>;

/// A renderable message for one (adapter, message type) pair.
pub enum Template {
    /// Format string with `{key}` placeholders, rendered against the
    /// context values.
    Text(&'static str),
    /// Closure bound at adapter construction.
    Render(RenderFn),
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Template::Render(_) => f.write_str("Render(..)"),
        }
    }
}

/// Mapping from message type to template for a single adapter.
#[derive(Debug, Default)]
pub struct Catalog {
    templates: HashMap<MessageType, Template>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, replacing any previous entry for the type.
    pub fn insert(&mut self, message_type: MessageType, template: Template) {
        self.templates.insert(message_type, template);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, message_type: MessageType, template: Template) -> Self {
        self.insert(message_type, template);
        self
    }

    /// Template for a message type. `None` means the adapter no-ops.
    pub fn template_for(&self, message_type: MessageType) -> Option<&Template> {
        self.templates.get(&message_type)
    }
}

/// Error from rendering a text template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The template names a key the context did not provide.
    #[error("no value for template key {{{0}}}")]
    MissingValue(String),

    /// The template has a `{` with no matching `}`.
    #[error("unterminated placeholder in template")]
    Unterminated,
}

/// Substitute `{key}` placeholders in `template` from `values`.
///
/// There is no escaping: templates are crate-internal literals and never
/// contain literal braces.
pub fn render_str(template: &str, values: &TemplateValues) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or(RenderError::Unterminated)?;
        let key = &after[..end];
        match values.get(key) {
            Some(value) => out.push_str(value),
            None => return Err(RenderError::MissingValue(key.to_string())),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Shared template values every adapter renders with.
///
/// Optional context entries only contribute keys when present, so templates
/// that name them fail rendering (and the adapter skips the message) when a
/// call site forgot to supply them. The one exception is `old_lead`, which
/// falls back to [`UNASSIGNED`]: a previously unheld lead slot is a real
/// state, not a caller mistake.
pub fn context_values(ctx: &MessageContext) -> TemplateValues {
    let mut values = TemplateValues::new();
    values.insert("user", ctx.actor.name.clone());
    values.insert("submission", ctx.submission.title.clone());
    values.insert("lead", ctx.submission.lead.name.clone());
    values.insert("phase", ctx.submission.phase.clone());
    values.insert(
        "old_lead",
        ctx.old_lead
            .as_ref()
            .map(|lead| lead.name.clone())
            .unwrap_or_else(|| UNASSIGNED.to_string()),
    );
    if let Some(old_phase) = &ctx.old_phase {
        values.insert("old_phase", old_phase.clone());
    }
    if let Some(determination) = &ctx.determination {
        values.insert("outcome", determination.outcome.to_string());
    }
    if let Some(project) = &ctx.project {
        values.insert("project", project.name.clone());
        values.insert(
            "project_lead",
            project
                .lead
                .as_ref()
                .map(|lead| lead.name.clone())
                .unwrap_or_else(|| UNASSIGNED.to_string()),
        );
    }
    values
}

/// Deployment-supplied determination texts, keyed by funding stage.
///
/// When a stage has an entry, the email adapter sends that text for
/// determination messages instead of the decision maker's own message.
#[derive(Debug, Clone, Default)]
pub struct DeterminationMessages {
    overrides: HashMap<FundingStage, String>,
}

impl DeterminationMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text for one stage.
    pub fn set(&mut self, stage: FundingStage, text: impl Into<String>) {
        self.overrides.insert(stage, text.into());
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, stage: FundingStage, text: impl Into<String>) -> Self {
        self.set(stage, text);
        self
    }

    /// Text for a stage, when configured.
    pub fn for_stage(&self, stage: FundingStage) -> Option<&str> {
        self.overrides.get(&stage).map(String::as_str)
    }
}
