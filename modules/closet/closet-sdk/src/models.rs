//! Public models for the closet module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the closet module and its consumers. The string forms produced by
//! `Display` (`top`, `light-red`, `sleeve:3/4`) are the canonical spelling used
//! by storage backends and the command line.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

/// A model value could not be parsed from its string form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseModelError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseModelError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Declares a fieldless enum with a fixed lowercase spelling per variant.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ParseModelError::new($kind, s))
            }
        }
    };
}

string_enum! {
    /// Top-level garment category.
    pub enum Category as "category" {
        Top => "top",
        Bottom => "bottom",
        Dress => "dress",
    }
}

string_enum! {
    /// Category-dependent garment type.
    pub enum SubType as "sub type" {
        Shirt => "shirt",
        Sweater => "sweater",
        Hoodie => "hoodie",
        Jacket => "jacket",
        Pants => "pants",
        Skirts => "skirts",
    }
}

impl SubType {
    /// The category this subtype belongs to.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Shirt | Self::Sweater | Self::Hoodie | Self::Jacket => Category::Top,
            Self::Pants | Self::Skirts => Category::Bottom,
        }
    }
}

string_enum! {
    /// Kind of pants, only meaningful for `Bottom` / `Pants`.
    pub enum PantsType as "pants type" {
        Jeans => "jeans",
        Tights => "tights",
        Sweats => "sweats",
        Business => "business",
        Khakis => "khakis",
        Cargo => "cargo",
    }
}

string_enum! {
    /// Group an attribute tag belongs to.
    pub enum TagGroup as "tag group" {
        Sleeve => "sleeve",
        Material => "material",
        JacketType => "jacket",
        Length => "length",
        Rise => "rise",
        Fit => "fit",
    }
}

string_enum! {
    /// The fixed, ordered color palette.
    pub enum BaseColor as "color" {
        Red => "red",
        Orange => "orange",
        Yellow => "yellow",
        Green => "green",
        Blue => "blue",
        Purple => "purple",
        Pink => "pink",
        Brown => "brown",
        Gray => "gray",
        Denim => "denim",
        White => "white",
        Black => "black",
    }
}

impl BaseColor {
    /// White and black have no light/dark variants.
    #[must_use]
    pub const fn has_shades(self) -> bool {
        !matches!(self, Self::White | Self::Black)
    }
}

string_enum! {
    /// Shade prefix of a color token.
    pub enum Shade as "shade" {
        Light => "light",
        Dark => "dark",
    }
}

/// A selectable color: a base color or one of its `light-`/`dark-` variants.
///
/// Ordering follows the palette, with the plain base color before its shades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorToken {
    base: BaseColor,
    shade: Option<Shade>,
}

impl ColorToken {
    #[must_use]
    pub const fn base(color: BaseColor) -> Self {
        Self {
            base: color,
            shade: None,
        }
    }

    /// Shade variant of `color`.
    ///
    /// # Errors
    /// Returns `ParseModelError` when the color has no shade variants.
    pub fn shaded(color: BaseColor, shade: Shade) -> Result<Self, ParseModelError> {
        if !color.has_shades() {
            return Err(ParseModelError::new(
                "color",
                &format!("{shade}-{color}"),
            ));
        }
        Ok(Self {
            base: color,
            shade: Some(shade),
        })
    }

    #[must_use]
    pub const fn base_color(self) -> BaseColor {
        self.base
    }

    #[must_use]
    pub const fn shade(self) -> Option<Shade> {
        self.shade
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shade {
            Some(shade) => write!(f, "{shade}-{}", self.base),
            None => write!(f, "{}", self.base),
        }
    }
}

impl FromStr for ColorToken {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((prefix, rest)) = trimmed.split_once('-') else {
            return trimmed.parse().map(Self::base);
        };
        let shade: Shade = prefix
            .parse()
            .map_err(|_| ParseModelError::new("color", s))?;
        let base: BaseColor = rest
            .parse()
            .map_err(|_| ParseModelError::new("color", s))?;
        Self::shaded(base, shade)
    }
}

/// Descriptive attribute tag such as `sleeve:3/4` or `material:silk`.
///
/// Tags are qualified by their group so that identical labels in different
/// groups (short sleeves, short length) stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeTag {
    group: TagGroup,
    value: String,
}

impl AttributeTag {
    #[must_use]
    pub fn new(group: TagGroup, value: impl Into<String>) -> Self {
        Self {
            group,
            value: value.into().trim().to_ascii_lowercase(),
        }
    }

    #[must_use]
    pub const fn group(&self) -> TagGroup {
        self.group
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for AttributeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.value)
    }
}

impl FromStr for AttributeTag {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (group, value) = s
            .split_once(':')
            .ok_or_else(|| ParseModelError::new("attribute tag", s))?;
        if value.trim().is_empty() {
            return Err(ParseModelError::new("attribute tag", s));
        }
        Ok(Self::new(group.parse()?, value))
    }
}

/// Raw image held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Bytes,
    pub content_type: mime::Mime,
    pub file_name: Option<String>,
}

impl ImagePayload {
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>, content_type: mime::Mime) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
            file_name: None,
        }
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type.essence_str())
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}

/// Fully classified item, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub category: Category,
    pub sub_type: Option<SubType>,
    pub pants_type: Option<PantsType>,
    pub attribute_tags: BTreeSet<AttributeTag>,
    pub colors: BTreeSet<ColorToken>,
}

/// What the intake wizard hands over on submit: the record and its image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSubmission {
    pub item: NewItem,
    pub image: ImagePayload,
}

/// Stored wardrobe item. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedItem {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub image_url: Url,
    pub category: Category,
    pub sub_type: Option<SubType>,
    pub pants_type: Option<PantsType>,
    pub attribute_tags: BTreeSet<AttributeTag>,
    pub colors: BTreeSet<ColorToken>,
    pub created_at: DateTime<Utc>,
}

/// A saved top + bottom combination, referencing items by image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitPair {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub top_url: Url,
    pub bottom_url: Url,
    pub created_at: DateTime<Utc>,
}

/// Optional narrowing for item listings. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub category: Option<Category>,
    pub sub_type: Option<SubType>,
    pub color: Option<ColorToken>,
}

impl ItemFilter {
    #[must_use]
    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn matches(&self, item: &PersistedItem) -> bool {
        self.category.is_none_or(|c| item.category == c)
            && self.sub_type.is_none_or(|s| item.sub_type == Some(s))
            && self.color.is_none_or(|c| item.colors.contains(&c))
    }
}

/// Signed-in user on whose behalf closet operations run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: Uuid,
    email: String,
    display_name: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            display_name: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_tokens_round_trip_through_strings() {
        let dark_blue: ColorToken = "dark-blue".parse().unwrap();
        assert_eq!(dark_blue.base_color(), BaseColor::Blue);
        assert_eq!(dark_blue.shade(), Some(Shade::Dark));
        assert_eq!(dark_blue.to_string(), "dark-blue");
        assert_eq!("Red".parse::<ColorToken>().unwrap().to_string(), "red");
    }

    #[test]
    fn white_and_black_have_no_shades() {
        assert!("light-white".parse::<ColorToken>().is_err());
        assert!("dark-black".parse::<ColorToken>().is_err());
        assert!(ColorToken::shaded(BaseColor::Black, Shade::Light).is_err());
        assert!("white".parse::<ColorToken>().is_ok());
    }

    #[test]
    fn unknown_values_are_rejected() {
        let err = "teal".parse::<ColorToken>().unwrap_err();
        assert_eq!(err.kind, "color");
        assert!("medium-red".parse::<ColorToken>().is_err());
        assert!("scarf".parse::<Category>().is_err());
        assert!("sleeve".parse::<AttributeTag>().is_err());
        assert!("sleeve:".parse::<AttributeTag>().is_err());
    }

    #[test]
    fn color_ordering_follows_palette() {
        let mut tokens: Vec<ColorToken> = ["dark-blue", "red", "light-red", "black"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        tokens.sort();
        let spelled: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        assert_eq!(spelled, ["red", "light-red", "dark-blue", "black"]);
    }

    #[test]
    fn attribute_tags_are_group_qualified() {
        let tag: AttributeTag = "sleeve:3/4".parse().unwrap();
        assert_eq!(tag.group(), TagGroup::Sleeve);
        assert_eq!(tag.value(), "3/4");
        assert_eq!(tag.to_string(), "sleeve:3/4");
        assert_ne!(
            AttributeTag::new(TagGroup::Sleeve, "short"),
            AttributeTag::new(TagGroup::Length, "short")
        );
    }

    #[test]
    fn subtypes_know_their_category() {
        assert_eq!(SubType::Jacket.category(), Category::Top);
        assert_eq!(SubType::Skirts.category(), Category::Bottom);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let item = PersistedItem {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            image_url: Url::parse("memory://blobs/a.png").unwrap(),
            category: Category::Top,
            sub_type: Some(SubType::Shirt),
            pants_type: None,
            attribute_tags: BTreeSet::new(),
            colors: BTreeSet::from([ColorToken::base(BaseColor::Red)]),
            created_at: Utc::now(),
        };
        assert!(ItemFilter::default().matches(&item));
        assert!(ItemFilter::category(Category::Top).matches(&item));
        assert!(!ItemFilter::category(Category::Dress).matches(&item));
        let by_color = ItemFilter {
            color: Some("dark-red".parse().unwrap()),
            ..ItemFilter::default()
        };
        assert!(!by_color.matches(&item));
    }
}
