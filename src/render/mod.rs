// render/mod.rs

//! # Render Module
//!
//! Turns a template structure plus variable values into HTML email markup.
//!
//! The pipeline is:
//!
//! 1. reject a root that is not a JSON object (the only hard failure),
//! 2. resolve `{{variable|fallback}}` tokens,
//! 3. decode the structure leniently,
//! 4. render each present section in document order,
//! 5. compose the rows into a document or fragment.
//!
//! Rendering is pure and synchronous. A [`Renderer`] captures a single instant
//! at construction, so every countdown and the footer's copyright year agree.

pub mod calc;
pub mod composer;
pub mod html;
pub mod sections;
pub mod theme;
pub mod visual;

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use log::{debug, warn};
use serde_json::Value;

use crate::render::composer::{compose, DocumentOptions};
use crate::render::html::non_blank;
use crate::render::sections::ImageWidth;
use crate::render::theme::Palette;
use crate::template::structure::{Hero, SectionKind, TemplateStructure};
use crate::template::{scanner, MissingPolicy, Resolver, TemplateResult, VariableValues};

pub use composer::DocumentMode;

/// Maximum width of the email content column, in pixels.
pub const CONTENT_WIDTH: u32 = 600;

/// Something worth telling the template author that did not stop the render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A hero image width that had no fixed-pixel mapping
    UnmappedImageWidth(String),
    /// A token with neither a value nor a fallback
    UnresolvedVariable(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::UnmappedImageWidth(raw) => write!(
                f,
                "Hero image width '{}' has no fixed-pixel equivalent; using {}px",
                raw,
                sections::DEFAULT_IMAGE_WIDTH
            ),
            Notice::UnresolvedVariable(name) => {
                write!(f, "Variable '{}' has no value and no fallback", name)
            }
        }
    }
}

/// Output of a render.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub html: String,
    pub notices: Vec<Notice>,
}

/// Renders templates against a fixed instant.
#[derive(Debug, Clone)]
pub struct Renderer {
    now: DateTime<Utc>,
    mode: DocumentMode,
    missing: MissingPolicy,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Creates a renderer for the current instant, producing full documents.
    pub fn new() -> Self {
        Self {
            now: Utc::now(),
            mode: DocumentMode::default(),
            missing: MissingPolicy::default(),
        }
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_mode(mut self, mode: DocumentMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_missing_policy(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Resolves and renders a raw template.
    ///
    /// # Errors
    /// Returns `TemplateError::InvalidStructure` when `template` is not a JSON
    /// object. Nothing inside the template can make this fail.
    pub fn render(&self, template: &Value, values: &VariableValues) -> TemplateResult<RenderedEmail> {
        let resolved = Resolver::new(values)
            .with_policy(self.missing)
            .resolve_value(template);
        let structure = TemplateStructure::from_value(&resolved)?;

        let mut notices: Vec<Notice> = scanner::unresolved(template, values)
            .into_iter()
            .map(|token| Notice::UnresolvedVariable(token.name))
            .collect();
        for notice in &notices {
            warn!("{}", notice);
        }

        let mut rendered = self.render_structure(&structure);
        notices.append(&mut rendered.notices);
        rendered.notices = notices;
        Ok(rendered)
    }

    /// Renders an already resolved structure.
    pub fn render_structure(&self, structure: &TemplateStructure) -> RenderedEmail {
        let palette = Palette::from_theme(&structure.theme);
        let mut notices = Vec::new();

        if let Some(Hero::Image { image_url, image_width, .. }) = &structure.hero {
            let shown = non_blank(image_url.as_ref()).is_some();
            if let (true, ImageWidth::Flagged(raw)) = (shown, ImageWidth::parse(image_width.as_deref())) {
                let notice = Notice::UnmappedImageWidth(raw);
                warn!("{}", notice);
                notices.push(notice);
            }
        }

        let fragments: Vec<String> = SectionKind::ALL
            .into_iter()
            .map(|kind| self.render_section(kind, structure, &palette))
            .filter(|fragment| !fragment.is_empty())
            .collect();
        debug!(
            "Rendered {} of {} present sections",
            fragments.len(),
            structure.present_sections().len()
        );

        let options = DocumentOptions {
            mode: self.mode,
            title: structure.title.as_ref().and_then(|t| non_blank(t.text.as_ref())),
            preheader: non_blank(structure.preheader.as_ref()),
        };
        RenderedEmail {
            html: compose(&fragments, &palette, &options),
            notices,
        }
    }

    /// Renders one section's row, or an empty string when it is absent.
    pub fn render_section(&self, kind: SectionKind, structure: &TemplateStructure, palette: &Palette) -> String {
        match kind {
            SectionKind::Header => structure
                .header
                .as_ref()
                .map(|s| sections::header(s, palette))
                .unwrap_or_default(),
            SectionKind::Hero => structure
                .hero
                .as_ref()
                .map(|s| sections::hero(s, palette))
                .unwrap_or_default(),
            SectionKind::Title => structure
                .title
                .as_ref()
                .map(|s| sections::title(s, palette))
                .unwrap_or_default(),
            SectionKind::Body => structure
                .body
                .as_ref()
                .map(|s| sections::body(s, palette))
                .unwrap_or_default(),
            SectionKind::Snapshot => structure
                .snapshot
                .as_ref()
                .map(|s| sections::snapshot(s, palette))
                .unwrap_or_default(),
            SectionKind::Visual => structure
                .visual
                .as_ref()
                .map(|s| visual::visual(s, palette, self.now))
                .unwrap_or_default(),
            SectionKind::Actions => structure
                .actions
                .as_ref()
                .map(|s| sections::actions(s, palette))
                .unwrap_or_default(),
            SectionKind::Support => structure
                .support
                .as_ref()
                .map(|s| sections::support(s, palette))
                .unwrap_or_default(),
            SectionKind::Footer => structure
                .footer
                .as_ref()
                .map(|s| sections::footer(s, palette, self.now.year()))
                .unwrap_or_default(),
        }
    }
}
