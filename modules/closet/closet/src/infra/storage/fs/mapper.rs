use anyhow::Context;
use closet_sdk::models::{
    AttributeTag, Category, ColorToken, OutfitPair, PantsType, PersistedItem, SubType,
};

use super::entity::{ItemEntity, PairEntity};

impl From<&PersistedItem> for ItemEntity {
    fn from(item: &PersistedItem) -> Self {
        Self {
            id: item.id,
            owner_id: item.owner_id,
            image_url: item.image_url.clone(),
            category: item.category.to_string(),
            sub_type: item.sub_type.as_ref().map(ToString::to_string),
            pants_type: item.pants_type.as_ref().map(ToString::to_string),
            attribute_tags: item.attribute_tags.iter().map(ToString::to_string).collect(),
            colors: item.colors.iter().map(ToString::to_string).collect(),
            created_at: item.created_at,
        }
    }
}

impl TryFrom<ItemEntity> for PersistedItem {
    type Error = anyhow::Error;

    fn try_from(entity: ItemEntity) -> Result<Self, Self::Error> {
        let id = entity.id;
        let parse = || -> anyhow::Result<Self> {
            Ok(Self {
                id,
                owner_id: entity.owner_id,
                image_url: entity.image_url,
                category: entity.category.parse::<Category>()?,
                sub_type: entity
                    .sub_type
                    .as_deref()
                    .map(str::parse::<SubType>)
                    .transpose()?,
                pants_type: entity
                    .pants_type
                    .as_deref()
                    .map(str::parse::<PantsType>)
                    .transpose()?,
                attribute_tags: entity
                    .attribute_tags
                    .iter()
                    .map(|t| t.parse::<AttributeTag>())
                    .collect::<Result<_, _>>()?,
                colors: entity
                    .colors
                    .iter()
                    .map(|c| c.parse::<ColorToken>())
                    .collect::<Result<_, _>>()?,
                created_at: entity.created_at,
            })
        };
        parse().with_context(|| format!("corrupt item record {id}"))
    }
}

impl From<&OutfitPair> for PairEntity {
    fn from(pair: &OutfitPair) -> Self {
        Self {
            id: pair.id,
            owner_id: pair.owner_id,
            top_url: pair.top_url.clone(),
            bottom_url: pair.bottom_url.clone(),
            created_at: pair.created_at,
        }
    }
}

impl From<PairEntity> for OutfitPair {
    fn from(entity: PairEntity) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            top_url: entity.top_url,
            bottom_url: entity.bottom_url,
            created_at: entity.created_at,
        }
    }
}
