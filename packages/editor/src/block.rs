//! # Content Blocks
//!
//! A block is the atomic unit of page content: a typed, ordered record with
//! a type-specific payload and optional style overrides.
//!
//! The editor only ever touches the envelope (id, order, timestamps). The
//! payload structs below name the fields the marketing site commonly uses,
//! but every payload keeps unrecognised keys in `extra` so that data written
//! by newer renderers survives a load/save cycle untouched. Named fields are
//! optional and tolerant: a `null` or a value of another shape leaves the
//! field `None` and the raw value rides along in `extra`.
//!
//! ## Wire format
//!
//! ```text
//! { "id": "...", "type": "hero", "order": 0,
//!   "data": { ... }, "styles": { ... } | null,
//!   "created_at": "...", "updated_at": "..." }
//! ```

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;
use uuid::Uuid;

use crate::document::de_id;

/// Prefix for block ids generated on the client
pub const LOCAL_BLOCK_PREFIX: &str = "block_";

/// Closed set of block type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Text,
    Image,
    Video,
    Button,
    Hero,
    Card,
    Testimonial,
    Features,
    Pricing,
    Faq,
    Cta,
    Stats,
    Gallery,
    Contact,
    Team,
    Spacer,
    Divider,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::Button => "button",
            BlockType::Hero => "hero",
            BlockType::Card => "card",
            BlockType::Testimonial => "testimonial",
            BlockType::Features => "features",
            BlockType::Pricing => "pricing",
            BlockType::Faq => "faq",
            BlockType::Cta => "cta",
            BlockType::Stats => "stats",
            BlockType::Gallery => "gallery",
            BlockType::Contact => "contact",
            BlockType::Team => "team",
            BlockType::Spacer => "spacer",
            BlockType::Divider => "divider",
        }
    }

}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload field accessor shared by every payload struct
trait Payload: DeserializeOwned + Serialize {
    fn extra_mut(&mut self) -> &mut Map<String, Value>;
}

macro_rules! payload {
    ($($name:ident),* $(,)?) => {
        $(impl Payload for $name {
            fn extra_mut(&mut self) -> &mut Map<String, Value> {
                &mut self.extra
            }
        })*
    };
}

/// Named fields decode to `None` on `null` or a mismatched type; the raw
/// value is kept in `extra` by [`decode_payload`].
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode a payload object so that it re-serializes to the same keys and
/// values. Keys the typed view could not hold move into `extra`.
fn decode_payload<T: Payload>(raw: Map<String, Value>) -> Result<T, serde_json::Error> {
    let mut payload: T = serde_json::from_value(Value::Object(raw.clone()))?;
    let typed = match serde_json::to_value(&payload)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in raw {
        if !typed.contains_key(&key) {
            payload.extra_mut().insert(key, value);
        }
    }
    Ok(payload)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoPayload {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonPayload {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroPayload {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cta_href: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardPayload {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonialPayload {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Star rating, integral or fractional
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub rating: Option<Number>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shared payload shape for marketing sections (features, pricing, faq, ...)
///
/// Sections are lists of items under an optional heading; the item shape is
/// up to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionPayload {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

payload!(
    TextPayload,
    ImagePayload,
    VideoPayload,
    ButtonPayload,
    HeroPayload,
    CardPayload,
    TestimonialPayload,
    SectionPayload,
    BlockStyles,
);

/// Type-tagged block payload
///
/// Serializes as the bare payload object; the tag travels separately as the
/// block's `type` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlockData {
    Text(TextPayload),
    Image(ImagePayload),
    Video(VideoPayload),
    Button(ButtonPayload),
    Hero(HeroPayload),
    Card(CardPayload),
    Testimonial(TestimonialPayload),
    Features(SectionPayload),
    Pricing(SectionPayload),
    Faq(SectionPayload),
    Cta(SectionPayload),
    Stats(SectionPayload),
    Gallery(SectionPayload),
    Contact(SectionPayload),
    Team(SectionPayload),
    Spacer(SectionPayload),
    Divider(SectionPayload),
}

impl BlockData {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockData::Text(_) => BlockType::Text,
            BlockData::Image(_) => BlockType::Image,
            BlockData::Video(_) => BlockType::Video,
            BlockData::Button(_) => BlockType::Button,
            BlockData::Hero(_) => BlockType::Hero,
            BlockData::Card(_) => BlockType::Card,
            BlockData::Testimonial(_) => BlockType::Testimonial,
            BlockData::Features(_) => BlockType::Features,
            BlockData::Pricing(_) => BlockType::Pricing,
            BlockData::Faq(_) => BlockType::Faq,
            BlockData::Cta(_) => BlockType::Cta,
            BlockData::Stats(_) => BlockType::Stats,
            BlockData::Gallery(_) => BlockType::Gallery,
            BlockData::Contact(_) => BlockType::Contact,
            BlockData::Team(_) => BlockType::Team,
            BlockData::Spacer(_) => BlockType::Spacer,
            BlockData::Divider(_) => BlockType::Divider,
        }
    }

    /// Empty payload for a block type (what the palette inserts)
    pub fn empty(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Text => BlockData::Text(TextPayload::default()),
            BlockType::Image => BlockData::Image(ImagePayload::default()),
            BlockType::Video => BlockData::Video(VideoPayload::default()),
            BlockType::Button => BlockData::Button(ButtonPayload::default()),
            BlockType::Hero => BlockData::Hero(HeroPayload::default()),
            BlockType::Card => BlockData::Card(CardPayload::default()),
            BlockType::Testimonial => BlockData::Testimonial(TestimonialPayload::default()),
            BlockType::Features => BlockData::Features(SectionPayload::default()),
            BlockType::Pricing => BlockData::Pricing(SectionPayload::default()),
            BlockType::Faq => BlockData::Faq(SectionPayload::default()),
            BlockType::Cta => BlockData::Cta(SectionPayload::default()),
            BlockType::Stats => BlockData::Stats(SectionPayload::default()),
            BlockType::Gallery => BlockData::Gallery(SectionPayload::default()),
            BlockType::Contact => BlockData::Contact(SectionPayload::default()),
            BlockType::Team => BlockData::Team(SectionPayload::default()),
            BlockType::Spacer => BlockData::Spacer(SectionPayload::default()),
            BlockType::Divider => BlockData::Divider(SectionPayload::default()),
        }
    }

    /// Text block with the given content
    pub fn text(content: impl Into<String>) -> Self {
        BlockData::Text(TextPayload {
            content: Some(content.into()),
            extra: Map::new(),
        })
    }

    /// Image block pointing at `src`
    pub fn image(src: impl Into<String>) -> Self {
        BlockData::Image(ImagePayload {
            src: Some(src.into()),
            ..Default::default()
        })
    }

    /// Decode a payload for the given tag. `null` decodes as an empty payload.
    ///
    /// Any JSON object is accepted; fields that do not fit the typed view
    /// are carried in `extra` and written back unchanged.
    pub fn from_parts(block_type: BlockType, data: Value) -> Result<Self, serde_json::Error> {
        let raw = match data {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(serde::de::Error::custom(format!(
                    "block data must be an object, got {}",
                    other
                )))
            }
        };

        Ok(match block_type {
            BlockType::Text => BlockData::Text(decode_payload(raw)?),
            BlockType::Image => BlockData::Image(decode_payload(raw)?),
            BlockType::Video => BlockData::Video(decode_payload(raw)?),
            BlockType::Button => BlockData::Button(decode_payload(raw)?),
            BlockType::Hero => BlockData::Hero(decode_payload(raw)?),
            BlockType::Card => BlockData::Card(decode_payload(raw)?),
            BlockType::Testimonial => BlockData::Testimonial(decode_payload(raw)?),
            BlockType::Features => BlockData::Features(decode_payload(raw)?),
            BlockType::Pricing => BlockData::Pricing(decode_payload(raw)?),
            BlockType::Faq => BlockData::Faq(decode_payload(raw)?),
            BlockType::Cta => BlockData::Cta(decode_payload(raw)?),
            BlockType::Stats => BlockData::Stats(decode_payload(raw)?),
            BlockType::Gallery => BlockData::Gallery(decode_payload(raw)?),
            BlockType::Contact => BlockData::Contact(decode_payload(raw)?),
            BlockType::Team => BlockData::Team(decode_payload(raw)?),
            BlockType::Spacer => BlockData::Spacer(decode_payload(raw)?),
            BlockType::Divider => BlockData::Divider(decode_payload(raw)?),
        })
    }
}

/// Optional per-block style overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockStyles {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single block of page content
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "BlockRecord")]
pub struct Block {
    pub id: String,

    /// Position among siblings (0-based, contiguous)
    pub order: usize,

    /// Payload; its variant is the block's immutable type
    pub data: BlockData,

    pub styles: Option<BlockStyles>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Block {
    /// Create a new block with a locally generated id
    pub fn new(data: BlockData, styles: Option<BlockStyles>) -> Self {
        let now = Utc::now();
        Self {
            id: new_block_id(),
            order: 0,
            data,
            styles,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.data.block_type()
    }

    /// Copy of this block under a fresh id and timestamps
    pub fn duplicate(&self, id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            order: self.order,
            data: self.data.clone(),
            styles: self.styles.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the id was generated on this client
    pub fn is_local(&self) -> bool {
        self.id.starts_with(LOCAL_BLOCK_PREFIX)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

pub fn new_block_id() -> String {
    format!("{}{}", LOCAL_BLOCK_PREFIX, Uuid::new_v4().simple())
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Envelope<'a> {
            id: &'a str,
            #[serde(rename = "type")]
            block_type: BlockType,
            order: usize,
            data: &'a BlockData,
            styles: &'a Option<BlockStyles>,
            created_at: &'a DateTime<Utc>,
            updated_at: &'a DateTime<Utc>,
        }

        Envelope {
            id: &self.id,
            block_type: self.block_type(),
            order: self.order,
            data: &self.data,
            styles: &self.styles,
            created_at: &self.created_at,
            updated_at: &self.updated_at,
        }
        .serialize(serializer)
    }
}

/// Block as it arrives over the wire, before the payload is decoded
#[derive(Debug, Deserialize)]
struct BlockRecord {
    #[serde(deserialize_with = "de_id")]
    id: String,

    #[serde(rename = "type")]
    block_type: BlockType,

    #[serde(default)]
    order: usize,

    #[serde(default)]
    data: Value,

    #[serde(default)]
    styles: Value,

    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

impl TryFrom<BlockRecord> for Block {
    type Error = serde_json::Error;

    fn try_from(record: BlockRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            order: record.order,
            data: BlockData::from_parts(record.block_type, record.data)?,
            styles: match record.styles {
                Value::Object(map) => Some(decode_payload(map)?),
                _ => None,
            },
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
