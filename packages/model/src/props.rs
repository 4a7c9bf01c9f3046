//! # Typed block properties
//!
//! Every block type owns its own property struct. On the wire (snapshots,
//! palette payloads, property patches) props travel as a flat JSON object
//! with camelCase keys; in memory they are a tagged union keyed by type.
//!
//! Absent keys take the type's defaults. Unknown keys and ill-typed values
//! are rejected, so a `Props` value is always renderable without fallbacks
//! for missing fields.

use crate::{BlockType, ModelError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flat JSON object form of a prop set or a partial patch
pub type PropMap = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    #[default]
    Button,
    Submit,
    Reset,
}

impl ButtonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonKind::Button => "button",
            ButtonKind::Submit => "submit",
            ButtonKind::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Tel,
    Url,
    Search,
    Date,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Password => "password",
            InputKind::Number => "number",
            InputKind::Tel => "tel",
            InputKind::Url => "url",
            InputKind::Search => "search",
            InputKind::Date => "date",
        }
    }
}

/// Props shared by the layout blocks (section, container, form, card, list)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct HeadingProps {
    pub text: String,
    /// 1..=6
    pub level: u8,
    pub align: Align,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Default for HeadingProps {
    fn default() -> Self {
        Self {
            text: "Section Heading".to_string(),
            level: 2,
            align: Align::Left,
            class_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ParagraphProps {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Default for ParagraphProps {
    fn default() -> Self {
        Self {
            text: "Lorem ipsum".to_string(),
            class_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ButtonProps {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ButtonKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            text: "Click me".to_string(),
            kind: ButtonKind::Button,
            class_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: "/a-placeholder-image.png".to_string(),
            alt: "Image".to_string(),
            class_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct InputProps {
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Default for InputProps {
    fn default() -> Self {
        Self {
            kind: InputKind::Text,
            placeholder: "Type here".to_string(),
            class_name: None,
        }
    }
}

/// Props of a block, one variant per [`BlockType`]
#[derive(Debug, Clone, PartialEq)]
pub enum Props {
    Section(LayoutProps),
    Container(LayoutProps),
    Heading(HeadingProps),
    Paragraph(ParagraphProps),
    Button(ButtonProps),
    Image(ImageProps),
    Input(InputProps),
    Form(LayoutProps),
    Card(LayoutProps),
    List(LayoutProps),
}

impl Props {
    /// Default property template for a freshly inserted block
    pub fn defaults(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Section => Props::Section(LayoutProps::default()),
            BlockType::Container => Props::Container(LayoutProps::default()),
            BlockType::Heading => Props::Heading(HeadingProps::default()),
            BlockType::Paragraph => Props::Paragraph(ParagraphProps::default()),
            BlockType::Button => Props::Button(ButtonProps::default()),
            BlockType::Image => Props::Image(ImageProps::default()),
            BlockType::Input => Props::Input(InputProps::default()),
            BlockType::Form => Props::Form(LayoutProps::default()),
            BlockType::Card => Props::Card(LayoutProps::default()),
            BlockType::List => Props::List(LayoutProps::default()),
        }
    }

    /// The type's defaults with `overrides` merged on top
    pub fn from_overrides(block_type: BlockType, overrides: &PropMap) -> Result<Self, ModelError> {
        Props::defaults(block_type).merge(overrides)
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            Props::Section(_) => BlockType::Section,
            Props::Container(_) => BlockType::Container,
            Props::Heading(_) => BlockType::Heading,
            Props::Paragraph(_) => BlockType::Paragraph,
            Props::Button(_) => BlockType::Button,
            Props::Image(_) => BlockType::Image,
            Props::Input(_) => BlockType::Input,
            Props::Form(_) => BlockType::Form,
            Props::Card(_) => BlockType::Card,
            Props::List(_) => BlockType::List,
        }
    }

    /// Shallow merge of `patch` into these props.
    ///
    /// Keys missing from the patch keep their value, `null` clears an
    /// optional key. The result is validated for the block type.
    pub fn merge(&self, patch: &PropMap) -> Result<Self, ModelError> {
        let ty = self.block_type();
        let merged = match self {
            Props::Section(p) => Props::Section(merge_typed(ty, p, patch)?),
            Props::Container(p) => Props::Container(merge_typed(ty, p, patch)?),
            Props::Heading(p) => Props::Heading(merge_typed(ty, p, patch)?),
            Props::Paragraph(p) => Props::Paragraph(merge_typed(ty, p, patch)?),
            Props::Button(p) => Props::Button(merge_typed(ty, p, patch)?),
            Props::Image(p) => Props::Image(merge_typed(ty, p, patch)?),
            Props::Input(p) => Props::Input(merge_typed(ty, p, patch)?),
            Props::Form(p) => Props::Form(merge_typed(ty, p, patch)?),
            Props::Card(p) => Props::Card(merge_typed(ty, p, patch)?),
            Props::List(p) => Props::List(merge_typed(ty, p, patch)?),
        };
        merged.validate()?;
        Ok(merged)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if let Props::Heading(heading) = self {
            if !(1..=6).contains(&heading.level) {
                return Err(ModelError::invalid_props(
                    BlockType::Heading,
                    format!("level must be between 1 and 6, got {}", heading.level),
                ));
            }
        }
        Ok(())
    }

    /// Flat JSON form, with every field of the variant present
    pub fn to_map(&self) -> PropMap {
        let value = match self {
            Props::Section(p) | Props::Container(p) | Props::Form(p) | Props::Card(p) | Props::List(p) => {
                serde_json::to_value(p)
            }
            Props::Heading(p) => serde_json::to_value(p),
            Props::Paragraph(p) => serde_json::to_value(p),
            Props::Button(p) => serde_json::to_value(p),
            Props::Image(p) => serde_json::to_value(p),
            Props::Input(p) => serde_json::to_value(p),
        };

        match value {
            Ok(Value::Object(map)) => map,
            _ => PropMap::new(),
        }
    }

    /// Value of a single wire key, if the variant has it set
    pub fn get(&self, key: &str) -> Option<Value> {
        self.to_map().remove(key)
    }

    pub fn class_name(&self) -> Option<&str> {
        let class_name = match self {
            Props::Section(p) | Props::Container(p) | Props::Form(p) | Props::Card(p) | Props::List(p) => {
                &p.class_name
            }
            Props::Heading(p) => &p.class_name,
            Props::Paragraph(p) => &p.class_name,
            Props::Button(p) => &p.class_name,
            Props::Image(p) => &p.class_name,
            Props::Input(p) => &p.class_name,
        };
        class_name.as_deref()
    }

    /// The `text` prop of text-bearing blocks
    pub fn text(&self) -> Option<&str> {
        match self {
            Props::Heading(p) => Some(&p.text),
            Props::Paragraph(p) => Some(&p.text),
            Props::Button(p) => Some(&p.text),
            _ => None,
        }
    }

    /// First text-like prop: `text`, then an image's `alt`, then an input's
    /// `placeholder`. Empty strings count as absent.
    pub fn text_like(&self) -> Option<&str> {
        let candidate = match self {
            Props::Image(p) => Some(p.alt.as_str()),
            Props::Input(p) => Some(p.placeholder.as_str()),
            _ => self.text(),
        };
        candidate.filter(|s| !s.is_empty())
    }
}

fn merge_typed<T>(block_type: BlockType, current: &T, patch: &PropMap) -> Result<T, ModelError>
where
    T: Serialize + DeserializeOwned,
{
    let mut map = match serde_json::to_value(current) {
        Ok(Value::Object(map)) => map,
        Ok(_) => PropMap::new(),
        Err(e) => return Err(ModelError::invalid_props(block_type, e)),
    };

    for (key, value) in patch {
        map.insert(key.clone(), value.clone());
    }

    serde_json::from_value(Value::Object(map)).map_err(|e| ModelError::invalid_props(block_type, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch(value: Value) -> PropMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("patch must be an object"),
        }
    }

    #[test]
    fn test_heading_defaults() {
        let props = Props::defaults(BlockType::Heading);
        let map = props.to_map();

        assert_eq!(map.get("text"), Some(&json!("Section Heading")));
        assert_eq!(map.get("level"), Some(&json!(2)));
        assert_eq!(map.get("align"), Some(&json!("left")));
        assert!(!map.contains_key("className"));
    }

    #[test]
    fn test_overrides_merge_onto_defaults() {
        let props = Props::from_overrides(BlockType::Heading, &patch(json!({ "text": "Hi" }))).unwrap();

        match props {
            Props::Heading(h) => {
                assert_eq!(h.text, "Hi");
                assert_eq!(h.level, 2);
                assert_eq!(h.align, Align::Left);
            }
            other => panic!("Expected heading props, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_keeps_untouched_keys() {
        let button = Props::from_overrides(
            BlockType::Button,
            &patch(json!({ "text": "Go", "className": "btn" })),
        )
        .unwrap();

        let updated = button.merge(&patch(json!({ "text": "Stop" }))).unwrap();
        assert_eq!(updated.text(), Some("Stop"));
        assert_eq!(updated.class_name(), Some("btn"));
    }

    #[test]
    fn test_null_clears_optional_key() {
        let card = Props::from_overrides(BlockType::Card, &patch(json!({ "className": "p-6" }))).unwrap();
        let cleared = card.merge(&patch(json!({ "className": null }))).unwrap();
        assert_eq!(cleared.class_name(), None);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Props::from_overrides(BlockType::Paragraph, &patch(json!({ "src": "/x.png" })))
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidProps { block_type: BlockType::Paragraph, .. }));
    }

    #[test]
    fn test_ill_typed_value_is_rejected() {
        let err = Props::from_overrides(BlockType::Heading, &patch(json!({ "level": "big" })))
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidProps { .. }));
    }

    #[test]
    fn test_heading_level_range() {
        assert!(Props::from_overrides(BlockType::Heading, &patch(json!({ "level": 6 }))).is_ok());
        assert!(Props::from_overrides(BlockType::Heading, &patch(json!({ "level": 0 }))).is_err());
        assert!(Props::from_overrides(BlockType::Heading, &patch(json!({ "level": 7 }))).is_err());
    }

    #[test]
    fn test_wire_type_key_for_button_and_input() {
        let input = Props::from_overrides(BlockType::Input, &patch(json!({ "type": "email" }))).unwrap();
        assert_eq!(input.get("type"), Some(json!("email")));

        let button = Props::defaults(BlockType::Button);
        assert_eq!(button.get("type"), Some(json!("button")));
    }

    #[test]
    fn test_text_like_order() {
        assert_eq!(Props::defaults(BlockType::Paragraph).text_like(), Some("Lorem ipsum"));
        assert_eq!(Props::defaults(BlockType::Image).text_like(), Some("Image"));
        assert_eq!(Props::defaults(BlockType::Input).text_like(), Some("Type here"));
        assert_eq!(Props::defaults(BlockType::Card).text_like(), None);

        let empty = Props::from_overrides(BlockType::Paragraph, &patch(json!({ "text": "" }))).unwrap();
        assert_eq!(empty.text_like(), None);
    }

    #[test]
    fn test_map_round_trip() {
        for ty in BlockType::ALL {
            let props = Props::defaults(ty);
            let back = Props::from_overrides(ty, &props.to_map()).unwrap();
            assert_eq!(props, back);
        }
    }
}
