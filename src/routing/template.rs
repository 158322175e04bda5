//! Path templates for downstream routes.
//!
//! # Responsibilities
//! - Parse configured paths such as `/interactions/{interaction_id}/feedback`
//! - Render a template onto a base URL with per-request values
//!
//! # Design Decisions
//! - Placeholders must span a whole segment
//! - Only placeholders the gateway can fill are accepted
//! - Values are percent-encoded as a single segment, so `/` cannot escape it

use thiserror::Error;
use url::Url;

/// A value the gateway can substitute into a downstream path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathParam {
    InteractionId,
}

impl PathParam {
    pub fn name(&self) -> &'static str {
        match self {
            PathParam::InteractionId => "interaction_id",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "interaction_id" => Some(PathParam::InteractionId),
            _ => None,
        }
    }
}

/// Errors found while parsing a path template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("path '{0}' must start with '/'")]
    NotAbsolute(String),

    #[error("unknown placeholder '{{{0}}}'")]
    UnknownPlaceholder(String),

    #[error("placeholder in segment '{0}' must span the whole segment")]
    PartialPlaceholder(String),
}

/// Errors raised while rendering a template for a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("no value supplied for '{{{}}}'", .0.name())]
    MissingValue(PathParam),

    #[error("'{{{}}}' cannot be '.' or '..'", .0.name())]
    DotSegment(PathParam),

    #[error("base URL cannot carry a path")]
    NotABase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(PathParam),
}

/// A parsed downstream path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| TemplateError::NotAbsolute(raw.to_string()))?;

        let mut segments = Vec::new();
        for segment in rest.split('/') {
            if let Some(name) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                let param = PathParam::from_name(name)
                    .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_string()))?;
                segments.push(Segment::Param(param));
            } else if segment.contains('{') || segment.contains('}') {
                return Err(TemplateError::PartialPlaceholder(segment.to_string()));
            } else {
                segments.push(Segment::Literal(segment.to_string()));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The template as written in configuration.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if the template substitutes `param`.
    pub fn contains(&self, param: PathParam) -> bool {
        self.segments.iter().any(|s| *s == Segment::Param(param))
    }

    /// Placeholders used by this template.
    pub fn params(&self) -> impl Iterator<Item = PathParam> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(p) => Some(*p),
            Segment::Literal(_) => None,
        })
    }

    /// Append the rendered template to `base`'s path.
    pub fn render(&self, base: &Url, values: &PathParams) -> Result<Url, RenderError> {
        let mut url = base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| RenderError::NotABase)?;
            path.pop_if_empty();
            for segment in &self.segments {
                match segment {
                    Segment::Literal(s) => {
                        path.push(s);
                    }
                    Segment::Param(p) => {
                        let value = values.get(*p).ok_or(RenderError::MissingValue(*p))?;
                        // The url crate drops these segments instead of encoding them.
                        if matches!(value, "." | "..") {
                            return Err(RenderError::DotSegment(*p));
                        }
                        path.push(value);
                    }
                }
            }
        }
        Ok(url)
    }
}

/// Per-request values for template placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    interaction_id: Option<String>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interaction_id(mut self, id: impl Into<String>) -> Self {
        self.interaction_id = Some(id.into());
        self
    }

    pub fn get(&self, param: PathParam) -> Option<&str> {
        match param {
            PathParam::InteractionId => self.interaction_id.as_deref(),
        }
    }
}
