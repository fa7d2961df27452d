//! In-progress item assembled by the intake wizard.

use std::collections::BTreeSet;

use closet_sdk::models::{
    AttributeTag, Category, ColorToken, ImagePayload, ItemSubmission, NewItem, PantsType, SubType,
};

use super::error::DomainError;
use super::fields::ClosetFields;
use super::taxonomy;

pub const IMAGE_REQUIRED: &str = "Please upload an image.";
pub const CATEGORY_REQUIRED: &str = "Please select a category.";
pub const SUB_TYPE_REQUIRED: &str = "Please complete the type selection for the chosen category.";
pub const PANTS_TYPE_REQUIRED: &str = "Please select the type of pants for the Bottom category.";
pub const COLORS_REQUIRED: &str = "Please select at least one color.";

/// Mutable, wizard-local draft.
///
/// Every setter keeps the draft consistent with the taxonomy: fields that no
/// longer apply after a change are cleared immediately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftItem {
    image: Option<ImagePayload>,
    category: Option<Category>,
    sub_type: Option<SubType>,
    pants_type: Option<PantsType>,
    attribute_tags: BTreeSet<AttributeTag>,
    colors: BTreeSet<ColorToken>,
}

impl DraftItem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns `DomainError::Validation` if the payload is empty, not an image,
    /// or larger than `max_bytes`. The previous image is kept in that case.
    pub fn set_image(&mut self, image: ImagePayload, max_bytes: usize) -> Result<(), DomainError> {
        validate_image(&image, max_bytes)?;
        self.image = Some(image);
        Ok(())
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Select a category. Choosing a different category clears the subtype,
    /// the pants type and every attribute tag.
    pub fn set_category(&mut self, category: Category) {
        if self.category == Some(category) {
            return;
        }
        self.category = Some(category);
        self.sub_type = None;
        self.pants_type = None;
        self.attribute_tags.clear();
    }

    /// # Errors
    /// Returns `DomainError::Validation` if no category is selected or the
    /// subtype does not belong to it.
    pub fn set_sub_type(&mut self, sub_type: SubType) -> Result<(), DomainError> {
        let category = self.require_category()?;
        if !taxonomy::offers_sub_type(category, sub_type) {
            return Err(DomainError::validation(
                ClosetFields::SUB_TYPE,
                format!("'{sub_type}' is not a type of {category}."),
            ));
        }
        if self.sub_type == Some(sub_type) {
            return Ok(());
        }
        self.sub_type = Some(sub_type);
        if !taxonomy::requires_pants_type(category, self.sub_type) {
            self.pants_type = None;
        }
        self.prune_tags();
        Ok(())
    }

    /// # Errors
    /// Returns `DomainError::Validation` unless the draft is `Bottom` / `Pants`.
    pub fn set_pants_type(&mut self, pants_type: PantsType) -> Result<(), DomainError> {
        let category = self.require_category()?;
        if !taxonomy::offers_pants_type(category, self.sub_type, pants_type) {
            return Err(DomainError::validation(
                ClosetFields::PANTS_TYPE,
                "A pants type only applies to Bottom items of type Pants.",
            ));
        }
        self.pants_type = Some(pants_type);
        self.prune_tags();
        Ok(())
    }

    /// Flip membership of `tag`. Returns whether the tag is now selected.
    ///
    /// # Errors
    /// Returns `DomainError::Validation` if the tag is not offered for the
    /// current selection.
    pub fn toggle_tag(&mut self, tag: AttributeTag) -> Result<bool, DomainError> {
        let category = self.require_category()?;
        if !taxonomy::offers_tag(category, self.sub_type, self.pants_type, &tag) {
            return Err(DomainError::validation(
                ClosetFields::ATTRIBUTE_TAGS,
                format!("'{tag}' does not apply to this item."),
            ));
        }
        if self.attribute_tags.remove(&tag) {
            return Ok(false);
        }
        self.attribute_tags.insert(tag);
        Ok(true)
    }

    /// Flip membership of `token`. Only that exact token is affected; base
    /// colors and their shades never imply each other.
    pub fn toggle_color(&mut self, token: ColorToken) -> bool {
        if self.colors.remove(&token) {
            return false;
        }
        self.colors.insert(token);
        true
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    #[must_use]
    pub fn sub_type(&self) -> Option<SubType> {
        self.sub_type
    }

    #[must_use]
    pub fn pants_type(&self) -> Option<PantsType> {
        self.pants_type
    }

    #[must_use]
    pub fn attribute_tags(&self) -> &BTreeSet<AttributeTag> {
        &self.attribute_tags
    }

    #[must_use]
    pub fn colors(&self) -> &BTreeSet<ColorToken> {
        &self.colors
    }

    /// # Errors
    /// Returns `DomainError::Validation` when no image is set.
    pub fn check_image(&self) -> Result<(), DomainError> {
        if self.image.is_none() {
            return Err(DomainError::validation(ClosetFields::IMAGE, IMAGE_REQUIRED));
        }
        Ok(())
    }

    /// # Errors
    /// Returns `DomainError::Validation` when no category is set.
    pub fn check_category(&self) -> Result<(), DomainError> {
        self.require_category().map(|_| ())
    }

    /// # Errors
    /// Returns `DomainError::Validation` when a required subtype or pants type
    /// is missing.
    pub fn check_details(&self) -> Result<(), DomainError> {
        let category = self.require_category()?;
        check_details(category, self.sub_type, self.pants_type)
    }

    /// # Errors
    /// Returns `DomainError::Validation` when no color is selected.
    pub fn check_colors(&self) -> Result<(), DomainError> {
        if self.colors.is_empty() {
            return Err(DomainError::validation(ClosetFields::COLORS, COLORS_REQUIRED));
        }
        Ok(())
    }

    /// Runs every step predicate in wizard order.
    ///
    /// # Errors
    /// Returns the first failing predicate's `DomainError::Validation`.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.check_image()?;
        self.check_category()?;
        self.check_details()?;
        self.check_colors()
    }

    /// Snapshot the draft as a submission.
    ///
    /// # Errors
    /// Returns `DomainError::Validation` if the draft is incomplete.
    pub fn to_submission(&self) -> Result<ItemSubmission, DomainError> {
        self.validate()?;
        let (Some(image), Some(category)) = (self.image.clone(), self.category) else {
            return Err(DomainError::validation(ClosetFields::IMAGE, IMAGE_REQUIRED));
        };
        Ok(ItemSubmission {
            item: NewItem {
                category,
                sub_type: self.sub_type,
                pants_type: self.pants_type,
                attribute_tags: self.attribute_tags.clone(),
                colors: self.colors.clone(),
            },
            image,
        })
    }

    fn require_category(&self) -> Result<Category, DomainError> {
        self.category
            .ok_or_else(|| DomainError::validation(ClosetFields::CATEGORY, CATEGORY_REQUIRED))
    }

    fn prune_tags(&mut self) {
        let Some(category) = self.category else {
            self.attribute_tags.clear();
            return;
        };
        let (sub_type, pants_type) = (self.sub_type, self.pants_type);
        self.attribute_tags
            .retain(|tag| taxonomy::offers_tag(category, sub_type, pants_type, tag));
    }
}

fn check_details(
    category: Category,
    sub_type: Option<SubType>,
    pants_type: Option<PantsType>,
) -> Result<(), DomainError> {
    if taxonomy::requires_sub_type(category) && sub_type.is_none() {
        return Err(DomainError::validation(ClosetFields::SUB_TYPE, SUB_TYPE_REQUIRED));
    }
    if taxonomy::requires_pants_type(category, sub_type) && pants_type.is_none() {
        return Err(DomainError::validation(
            ClosetFields::PANTS_TYPE,
            PANTS_TYPE_REQUIRED,
        ));
    }
    Ok(())
}

/// # Errors
/// Returns `DomainError::Validation` if the payload is empty, not an
/// `image/*` type, or larger than `max_bytes`.
pub fn validate_image(image: &ImagePayload, max_bytes: usize) -> Result<(), DomainError> {
    if image.is_empty() {
        return Err(DomainError::validation(
            ClosetFields::IMAGE,
            "The selected image is empty.",
        ));
    }
    if image.content_type.type_() != mime::IMAGE {
        return Err(DomainError::validation(
            ClosetFields::IMAGE,
            "Please choose an image file.",
        ));
    }
    if image.len() > max_bytes {
        return Err(DomainError::validation(
            ClosetFields::IMAGE,
            format!("The image exceeds the {max_bytes} byte limit."),
        ));
    }
    Ok(())
}

/// Checks a record coming from outside the wizard against the same rules the
/// wizard enforces step by step.
///
/// # Errors
/// Returns `DomainError::Validation` naming the first inconsistent field.
pub fn validate_new_item(item: &NewItem) -> Result<(), DomainError> {
    if let Some(sub_type) = item.sub_type
        && !taxonomy::offers_sub_type(item.category, sub_type)
    {
        return Err(DomainError::validation(
            ClosetFields::SUB_TYPE,
            format!("'{sub_type}' is not a type of {}.", item.category),
        ));
    }
    if let Some(pants_type) = item.pants_type
        && !taxonomy::offers_pants_type(item.category, item.sub_type, pants_type)
    {
        return Err(DomainError::validation(
            ClosetFields::PANTS_TYPE,
            "A pants type only applies to Bottom items of type Pants.",
        ));
    }
    check_details(item.category, item.sub_type, item.pants_type)?;
    if let Some(tag) = item
        .attribute_tags
        .iter()
        .find(|t| !taxonomy::offers_tag(item.category, item.sub_type, item.pants_type, t))
    {
        return Err(DomainError::validation(
            ClosetFields::ATTRIBUTE_TAGS,
            format!("'{tag}' does not apply to this item."),
        ));
    }
    if item.colors.is_empty() {
        return Err(DomainError::validation(ClosetFields::COLORS, COLORS_REQUIRED));
    }
    Ok(())
}
