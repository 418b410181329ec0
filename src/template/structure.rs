// template/structure.rs

//! # Template Structure Module
//!
//! The typed schema of an email template: an optional block per section plus a
//! global theme. Structures arrive as JSON from the editor or from storage and
//! are decoded leniently: a malformed field reads as absent, and a section that
//! cannot be decoded at all (for example a `hero` with an unknown `type`) is
//! omitted, leaving the other sections untouched.
//!
//! Wire names are camelCase, e.g. `logoUrl`, `progressBars`, `targetDate`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::template::lenient;
use crate::template::{json_type_name, TemplateError, TemplateResult};

/// The sections of an email, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    Hero,
    Title,
    Body,
    Snapshot,
    Visual,
    Actions,
    Support,
    Footer,
}

impl SectionKind {
    /// Every section in document order.
    pub const ALL: [SectionKind; 9] = [
        SectionKind::Header,
        SectionKind::Hero,
        SectionKind::Title,
        SectionKind::Body,
        SectionKind::Snapshot,
        SectionKind::Visual,
        SectionKind::Actions,
        SectionKind::Support,
        SectionKind::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Hero => "hero",
            SectionKind::Title => "title",
            SectionKind::Body => "body",
            SectionKind::Snapshot => "snapshot",
            SectionKind::Visual => "visual",
            SectionKind::Actions => "actions",
            SectionKind::Support => "support",
            SectionKind::Footer => "footer",
        }
    }
}

/// Root of a template. Absent sections are not rendered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStructure {
    /// Hidden inbox preview text
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub preheader: Option<String>,

    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderSection>,

    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
    pub hero: Option<Hero>,

    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleSection>,

    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
    pub body: Option<BodySection>,

    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotSection>,

    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
    pub visual: Option<Visual>,

    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionsSection>,

    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportSection>,

    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterSection>,

    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Theme::is_default")]
    pub theme: Theme,
}

impl TemplateStructure {
    /// Decodes a structure from a JSON value.
    ///
    /// # Errors
    /// Returns `TemplateError::InvalidStructure` when the root is not an object.
    /// Problems inside sections never fail; they decode as absent fields.
    pub fn from_value(value: &Value) -> TemplateResult<Self> {
        if !value.is_object() {
            return Err(TemplateError::InvalidStructure(format!(
                "expected a JSON object at the template root, found {}",
                json_type_name(value)
            )));
        }
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Serializes the structure back into its wire form.
    pub fn to_value(&self) -> TemplateResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Whether the given section is present in this structure.
    pub fn has_section(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Header => self.header.is_some(),
            SectionKind::Hero => self.hero.is_some(),
            SectionKind::Title => self.title.is_some(),
            SectionKind::Body => self.body.is_some(),
            SectionKind::Snapshot => self.snapshot.is_some(),
            SectionKind::Visual => self.visual.is_some(),
            SectionKind::Actions => self.actions.is_some(),
            SectionKind::Support => self.support.is_some(),
            SectionKind::Footer => self.footer.is_some(),
        }
    }

    /// Present sections in document order.
    pub fn present_sections(&self) -> Vec<SectionKind> {
        SectionKind::ALL
            .into_iter()
            .filter(|kind| self.has_section(*kind))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSection {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub logo_alt: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub logo_width: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
}

/// Hero block, selected by its `type` tag.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Hero {
    None,
    Icon {
        #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
        icon_size: Option<String>,
    },
    Image {
        #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
        #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
        image_alt: Option<String>,
        #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
        image_width: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSection {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySection {
    #[serde(default, deserialize_with = "lenient::strings", skip_serializing_if = "Vec::is_empty")]
    pub paragraphs: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
}

/// Presentation of the facts table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotStyle {
    #[default]
    Table,
    Striped,
    #[serde(alias = "cards", alias = "boxed")]
    Card,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSection {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::seq", skip_serializing_if = "Vec::is_empty")]
    pub facts: Vec<Fact>,
    #[serde(default, deserialize_with = "lenient::lenient")]
    pub style: SnapshotStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Fact {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Visual block, selected by its `type` tag.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Visual {
    None,
    Progress {
        #[serde(default, deserialize_with = "lenient::seq", skip_serializing_if = "Vec::is_empty")]
        progress_bars: Vec<ProgressBar>,
    },
    Countdown {
        #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
        countdown: Option<Countdown>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBar {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    #[serde(default, alias = "total", deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Explicit percentage; derived from `current`/`max` when absent
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub show_days: Option<bool>,
    #[serde(default, deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub show_hours: Option<bool>,
    #[serde(default, deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub show_minutes: Option<bool>,
    #[serde(default, deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub show_seconds: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub expired_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ActionsSection {
    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
    pub primary: Option<Action>,
    #[serde(default, deserialize_with = "lenient::lenient", skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SupportSection {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::seq", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Link {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SocialLink {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterSection {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "lenient::seq", skip_serializing_if = "Vec::is_empty")]
    pub social_links: Vec<SocialLink>,
    #[serde(default, deserialize_with = "lenient::seq", skip_serializing_if = "Vec::is_empty")]
    pub legal_links: Vec<Link>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Global style defaults. Every field is optional; section renderers consult the
/// section-local value first, then the theme, then a hard default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub heading_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub content_background_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub muted_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub link_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title_size: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title_weight: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title_align: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub primary_button_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub primary_button_text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub secondary_button_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub secondary_button_text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub dark_background_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub dark_text_color: Option<String>,
}

impl Theme {
    pub fn is_default(&self) -> bool {
        *self == Theme::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_object_root() {
        let result = TemplateStructure::from_value(&json!(["header"]));
        match result {
            Err(TemplateError::InvalidStructure(msg)) => assert!(msg.contains("array")),
            _ => panic!("Expected InvalidStructure error"),
        }
    }

    #[test]
    fn test_empty_object_has_no_sections() {
        let structure = TemplateStructure::from_value(&json!({})).unwrap();
        assert!(structure.present_sections().is_empty());
        assert!(structure.theme.is_default());
    }

    #[test]
    fn test_decodes_tagged_hero_and_visual() {
        let structure = TemplateStructure::from_value(&json!({
            "hero": { "type": "image", "imageUrl": "https://cdn.test/a.png", "imageWidth": 320 },
            "visual": {
                "type": "progress",
                "progressBars": [{ "label": "Storage", "current": "80", "total": 100 }]
            }
        }))
        .unwrap();

        assert_eq!(
            structure.hero,
            Some(Hero::Image {
                image_url: Some("https://cdn.test/a.png".to_string()),
                image_alt: None,
                image_width: Some("320".to_string()),
            })
        );
        match structure.visual {
            Some(Visual::Progress { progress_bars }) => {
                assert_eq!(progress_bars.len(), 1);
                assert_eq!(progress_bars[0].current, Some(80.0));
                assert_eq!(progress_bars[0].max, Some(100.0));
            }
            other => panic!("Expected progress visual, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_section_does_not_affect_others() {
        let structure = TemplateStructure::from_value(&json!({
            "hero": { "type": "carousel" },
            "snapshot": "not an object",
            "title": { "text": "Welcome", "size": 32 }
        }))
        .unwrap();

        assert!(structure.hero.is_none());
        assert!(structure.snapshot.is_none());
        let title = structure.title.unwrap();
        assert_eq!(title.text.as_deref(), Some("Welcome"));
        assert_eq!(title.size.as_deref(), Some("32"));
    }

    #[test]
    fn test_snapshot_style_and_bad_facts() {
        let structure = TemplateStructure::from_value(&json!({
            "snapshot": {
                "style": "cards",
                "facts": [{ "label": "Order", "value": 1042 }, "garbage", { "label": "Total", "value": "$12" }]
            }
        }))
        .unwrap();

        let snapshot = structure.snapshot.unwrap();
        assert_eq!(snapshot.style, SnapshotStyle::Card);
        assert_eq!(snapshot.facts.len(), 2);
        assert_eq!(snapshot.facts[0].value.as_deref(), Some("1042"));
    }

    #[test]
    fn test_unknown_snapshot_style_falls_back_to_table() {
        let structure = TemplateStructure::from_value(&json!({
            "snapshot": { "style": "mosaic", "facts": [] }
        }))
        .unwrap();
        assert_eq!(structure.snapshot.unwrap().style, SnapshotStyle::Table);
    }

    #[test]
    fn test_present_sections_in_document_order() {
        let structure = TemplateStructure::from_value(&json!({
            "footer": {},
            "title": { "text": "Hi" },
            "header": {}
        }))
        .unwrap();
        assert_eq!(
            structure.present_sections(),
            vec![SectionKind::Header, SectionKind::Title, SectionKind::Footer]
        );
    }

    #[test]
    fn test_to_value_uses_wire_names() {
        let structure = TemplateStructure::from_value(&json!({
            "header": { "logoUrl": "https://cdn.test/logo.png" },
            "theme": { "primaryButtonColor": "#ff0000", "darkMode": true }
        }))
        .unwrap();

        let value = structure.to_value().unwrap();
        assert_eq!(value["header"]["logoUrl"], "https://cdn.test/logo.png");
        assert_eq!(value["theme"]["primaryButtonColor"], "#ff0000");
        assert_eq!(value["theme"]["darkMode"], true);
        assert!(value.get("hero").is_none());
    }
}
