//! Category -> subtype -> tag-group decision table.
//!
//! The whole garment vocabulary lives in the static tables below. The draft
//! and the wizard only ever ask this module which fields apply; they never
//! branch on concrete categories themselves.

use closet_sdk::models::{AttributeTag, Category, PantsType, SubType, TagGroup};

/// One selectable tag: the stored value and the label shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// A titled multi-select group of tags.
#[derive(Debug, PartialEq, Eq)]
pub struct TagGroupSpec {
    pub group: TagGroup,
    pub title: &'static str,
    pub options: &'static [TagOption],
}

impl TagGroupSpec {
    #[must_use]
    pub fn find(&self, value: &str) -> Option<&'static TagOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Fully qualified tags for every option of the group.
    pub fn tags(&self) -> impl Iterator<Item = AttributeTag> + '_ {
        self.options
            .iter()
            .map(|o| AttributeTag::new(self.group, o.value))
    }
}

struct CategoryEntry {
    category: Category,
    groups: &'static [&'static TagGroupSpec],
    sub_types: &'static [SubTypeEntry],
}

struct SubTypeEntry {
    sub_type: SubType,
    groups: &'static [&'static TagGroupSpec],
    pants_types: &'static [PantsEntry],
}

struct PantsEntry {
    pants_type: PantsType,
    groups: &'static [&'static TagGroupSpec],
}

const NO_GROUPS: &[&TagGroupSpec] = &[];
const NO_PANTS: &[PantsEntry] = &[];

const fn opt(value: &'static str, label: &'static str) -> TagOption {
    TagOption { value, label }
}

static SHIRT_SLEEVE: TagGroupSpec = TagGroupSpec {
    group: TagGroup::Sleeve,
    title: "Sleeve Length",
    options: &[
        opt("sleeveless", "Sleeveless/Tube"),
        opt("spaghetti", "Spaghetti"),
        opt("tank", "Tank"),
        opt("short", "Short"),
        opt("half", "Half"),
        opt("3/4", "3/4"),
        opt("full", "Full"),
    ],
};

static SHIRT_MATERIAL: TagGroupSpec = TagGroupSpec {
    group: TagGroup::Material,
    title: "Material",
    options: &[
        opt("cotton", "Cotton"),
        opt("lace", "Lace"),
        opt("silk", "Silk"),
        opt("linen", "Linen"),
    ],
};

static SWEATER_SLEEVE: TagGroupSpec = TagGroupSpec {
    group: TagGroup::Sleeve,
    title: "Sleeve Length",
    options: &[
        opt("vest", "Vest"),
        opt("short", "Short"),
        opt("half", "Half"),
        opt("3/4", "3/4"),
        opt("full", "Full"),
    ],
};

static JACKET_TYPE: TagGroupSpec = TagGroupSpec {
    group: TagGroup::JacketType,
    title: "Type of Jacket",
    options: &[
        opt("denim", "Denim"),
        opt("rain", "Rain"),
        opt("leather", "Leather"),
        opt("winter", "Winter"),
        opt("zip", "Zip"),
        opt("flannel", "Flannel"),
    ],
};

static JEANS_FIT: TagGroupSpec = TagGroupSpec {
    group: TagGroup::Fit,
    title: "Fit of Jeans",
    options: &[
        opt("straight", "Straight/normal"),
        opt("flare", "Flare/bootcut"),
        opt("baggy", "Baggy"),
    ],
};

static PANTS_LENGTH: TagGroupSpec = TagGroupSpec {
    group: TagGroup::Length,
    title: "Length",
    options: &[
        opt("shorts", "Shorts"),
        opt("knee", "Knee"),
        opt("3/4", "3/4"),
        opt("full", "Full"),
    ],
};

static PANTS_RISE: TagGroupSpec = TagGroupSpec {
    group: TagGroup::Rise,
    title: "Rise",
    options: &[
        opt("high", "High"),
        opt("normal", "Normal"),
        opt("low", "Low"),
    ],
};

static SKIRT_LENGTH: TagGroupSpec = TagGroupSpec {
    group: TagGroup::Length,
    title: "Length of Skirt",
    options: &LONG_LENGTHS,
};

static DRESS_LENGTH: TagGroupSpec = TagGroupSpec {
    group: TagGroup::Length,
    title: "Length of Dress",
    options: &LONG_LENGTHS,
};

static DRESS_SLEEVE: TagGroupSpec = TagGroupSpec {
    group: TagGroup::Sleeve,
    title: "Sleeve Length",
    options: &[
        opt("sleeveless", "Sleeveless"),
        opt("spaghetti", "Spaghetti"),
        opt("tank", "Tank"),
        opt("short", "Short"),
        opt("half", "Half"),
        opt("3/4", "3/4"),
        opt("full", "Full"),
    ],
};

const LONG_LENGTHS: [TagOption; 8] = [
    opt("mini", "Mini"),
    opt("short", "Short"),
    opt("above-knee", "Above knee"),
    opt("knee", "Knee"),
    opt("below-knee", "Below knee"),
    opt("calf", "At calf"),
    opt("ankle", "Ankle"),
    opt("floor", "Floor"),
];

const fn pants(pants_type: PantsType) -> PantsEntry {
    PantsEntry {
        pants_type,
        groups: &[],
    }
}

static TAXONOMY: [CategoryEntry; 3] = [
    CategoryEntry {
        category: Category::Top,
        groups: &[],
        sub_types: &[
            SubTypeEntry {
                sub_type: SubType::Shirt,
                groups: &[&SHIRT_SLEEVE, &SHIRT_MATERIAL],
                pants_types: &[],
            },
            SubTypeEntry {
                sub_type: SubType::Sweater,
                groups: &[&SWEATER_SLEEVE],
                pants_types: &[],
            },
            SubTypeEntry {
                sub_type: SubType::Hoodie,
                groups: &[],
                pants_types: &[],
            },
            SubTypeEntry {
                sub_type: SubType::Jacket,
                groups: &[&JACKET_TYPE],
                pants_types: &[],
            },
        ],
    },
    CategoryEntry {
        category: Category::Bottom,
        groups: &[],
        sub_types: &[
            SubTypeEntry {
                sub_type: SubType::Pants,
                groups: &[&PANTS_LENGTH, &PANTS_RISE],
                pants_types: &[
                    PantsEntry {
                        pants_type: PantsType::Jeans,
                        groups: &[&JEANS_FIT],
                    },
                    pants(PantsType::Tights),
                    pants(PantsType::Sweats),
                    pants(PantsType::Business),
                    pants(PantsType::Khakis),
                    pants(PantsType::Cargo),
                ],
            },
            SubTypeEntry {
                sub_type: SubType::Skirts,
                groups: &[&SKIRT_LENGTH],
                pants_types: &[],
            },
        ],
    },
    CategoryEntry {
        category: Category::Dress,
        groups: &[&DRESS_LENGTH, &DRESS_SLEEVE],
        sub_types: &[],
    },
];

fn category_entry(category: Category) -> &'static CategoryEntry {
    // Every category has exactly one row; the table is indexed in declaration order.
    match category {
        Category::Top => &TAXONOMY[0],
        Category::Bottom => &TAXONOMY[1],
        Category::Dress => &TAXONOMY[2],
    }
}

fn sub_type_entry(category: Category, sub_type: SubType) -> Option<&'static SubTypeEntry> {
    category_entry(category)
        .sub_types
        .iter()
        .find(|e| e.sub_type == sub_type)
}

/// Categories in display order.
pub fn categories() -> impl Iterator<Item = Category> {
    TAXONOMY.iter().map(|e| e.category)
}

/// Subtypes offered for `category`, in display order. Empty for `Dress`.
pub fn sub_types(category: Category) -> impl Iterator<Item = SubType> {
    category_entry(category).sub_types.iter().map(|e| e.sub_type)
}

/// Pants types offered for the given selection, in display order.
pub fn pants_types(
    category: Category,
    sub_type: Option<SubType>,
) -> impl Iterator<Item = PantsType> {
    sub_type
        .and_then(|s| sub_type_entry(category, s))
        .map_or(NO_PANTS, |e| e.pants_types)
        .iter()
        .map(|p| p.pants_type)
}

#[must_use]
pub fn offers_sub_type(category: Category, sub_type: SubType) -> bool {
    sub_type_entry(category, sub_type).is_some()
}

#[must_use]
pub fn offers_pants_type(
    category: Category,
    sub_type: Option<SubType>,
    pants_type: PantsType,
) -> bool {
    pants_types(category, sub_type).any(|p| p == pants_type)
}

/// Whether a subtype must be chosen before leaving the details step.
#[must_use]
pub fn requires_sub_type(category: Category) -> bool {
    !category_entry(category).sub_types.is_empty()
}

/// Whether a pants type must be chosen before leaving the details step.
#[must_use]
pub fn requires_pants_type(category: Category, sub_type: Option<SubType>) -> bool {
    pants_types(category, sub_type).next().is_some()
}

/// Tag groups that apply to the selection, in display order.
///
/// Pants-type groups come first, then subtype groups, then category groups.
#[must_use]
pub fn tag_groups(
    category: Category,
    sub_type: Option<SubType>,
    pants_type: Option<PantsType>,
) -> Vec<&'static TagGroupSpec> {
    let entry = category_entry(category);
    let sub_entry = sub_type.and_then(|s| sub_type_entry(category, s));
    let pants_groups = sub_entry
        .zip(pants_type)
        .and_then(|(e, p)| e.pants_types.iter().find(|x| x.pants_type == p))
        .map_or(NO_GROUPS, |p| p.groups);
    let sub_groups = sub_entry.map_or(NO_GROUPS, |e| e.groups);

    pants_groups
        .iter()
        .chain(sub_groups)
        .chain(entry.groups)
        .copied()
        .collect()
}

/// Whether `tag` is selectable for the given selection.
#[must_use]
pub fn offers_tag(
    category: Category,
    sub_type: Option<SubType>,
    pants_type: Option<PantsType>,
    tag: &AttributeTag,
) -> bool {
    tag_groups(category, sub_type, pants_type)
        .iter()
        .any(|g| g.group == tag.group() && g.find(tag.value()).is_some())
}

/// Human readable label for a tag, if the tag exists anywhere in the table.
#[must_use]
pub fn label_for(tag: &AttributeTag) -> Option<&'static str> {
    all_groups()
        .filter(|g| g.group == tag.group())
        .find_map(|g| g.find(tag.value()))
        .map(|o| o.label)
}

fn all_groups() -> impl Iterator<Item = &'static TagGroupSpec> {
    TAXONOMY.iter().flat_map(|c| {
        c.groups.iter().copied().chain(c.sub_types.iter().flat_map(|s| {
            s.groups
                .iter()
                .copied()
                .chain(s.pants_types.iter().flat_map(|p| p.groups.iter().copied()))
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(groups: &[&TagGroupSpec], group: TagGroup) -> Vec<&'static str> {
        groups
            .iter()
            .filter(|g| g.group == group)
            .flat_map(|g| g.options.iter().map(|o| o.value))
            .collect()
    }

    #[test]
    fn table_rows_line_up_with_categories() {
        let listed: Vec<Category> = categories().collect();
        assert_eq!(listed, Category::ALL);
        for category in Category::ALL {
            assert_eq!(category_entry(*category).category, *category);
        }
    }

    #[test]
    fn top_offers_four_subtypes() {
        let subs: Vec<SubType> = sub_types(Category::Top).collect();
        assert_eq!(
            subs,
            [SubType::Shirt, SubType::Sweater, SubType::Hoodie, SubType::Jacket]
        );
        assert!(requires_sub_type(Category::Top));
        assert!(!requires_pants_type(Category::Top, Some(SubType::Shirt)));
    }

    #[test]
    fn bottom_offers_pants_and_skirts() {
        let subs: Vec<SubType> = sub_types(Category::Bottom).collect();
        assert_eq!(subs, [SubType::Pants, SubType::Skirts]);
        assert!(requires_pants_type(Category::Bottom, Some(SubType::Pants)));
        assert!(!requires_pants_type(Category::Bottom, Some(SubType::Skirts)));
        assert!(!requires_pants_type(Category::Bottom, None));
        assert_eq!(pants_types(Category::Bottom, Some(SubType::Pants)).count(), 6);
    }

    #[test]
    fn dress_has_no_subtypes_but_length_and_sleeve() {
        assert_eq!(sub_types(Category::Dress).count(), 0);
        assert!(!requires_sub_type(Category::Dress));
        let groups = tag_groups(Category::Dress, None, None);
        assert_eq!(values(&groups, TagGroup::Length).len(), 8);
        assert_eq!(
            values(&groups, TagGroup::Sleeve),
            ["sleeveless", "spaghetti", "tank", "short", "half", "3/4", "full"]
        );
    }

    #[test]
    fn shirt_has_sleeve_and_material() {
        let groups = tag_groups(Category::Top, Some(SubType::Shirt), None);
        assert_eq!(values(&groups, TagGroup::Sleeve).len(), 7);
        assert_eq!(
            values(&groups, TagGroup::Material),
            ["cotton", "lace", "silk", "linen"]
        );
        assert_eq!(SHIRT_SLEEVE.options[0].label, "Sleeveless/Tube");
    }

    #[test]
    fn sweater_jacket_and_hoodie_groups() {
        let sweater = tag_groups(Category::Top, Some(SubType::Sweater), None);
        assert_eq!(
            values(&sweater, TagGroup::Sleeve),
            ["vest", "short", "half", "3/4", "full"]
        );
        let jacket = tag_groups(Category::Top, Some(SubType::Jacket), None);
        assert_eq!(
            values(&jacket, TagGroup::JacketType),
            ["denim", "rain", "leather", "winter", "zip", "flannel"]
        );
        assert!(tag_groups(Category::Top, Some(SubType::Hoodie), None).is_empty());
    }

    #[test]
    fn jeans_add_fit_ahead_of_length_and_rise() {
        let jeans = tag_groups(Category::Bottom, Some(SubType::Pants), Some(PantsType::Jeans));
        let order: Vec<TagGroup> = jeans.iter().map(|g| g.group).collect();
        assert_eq!(order, [TagGroup::Fit, TagGroup::Length, TagGroup::Rise]);
        assert_eq!(values(&jeans, TagGroup::Length), ["shorts", "knee", "3/4", "full"]);
        assert_eq!(values(&jeans, TagGroup::Rise), ["high", "normal", "low"]);

        let cargo = tag_groups(Category::Bottom, Some(SubType::Pants), Some(PantsType::Cargo));
        assert!(values(&cargo, TagGroup::Fit).is_empty());
    }

    #[test]
    fn skirts_use_long_lengths() {
        let skirts = tag_groups(Category::Bottom, Some(SubType::Skirts), None);
        assert_eq!(
            values(&skirts, TagGroup::Length),
            ["mini", "short", "above-knee", "knee", "below-knee", "calf", "ankle", "floor"]
        );
    }

    #[test]
    fn subtypes_are_scoped_to_their_category() {
        assert!(offers_sub_type(Category::Top, SubType::Hoodie));
        assert!(!offers_sub_type(Category::Top, SubType::Pants));
        assert!(!offers_sub_type(Category::Dress, SubType::Skirts));
        assert!(!offers_pants_type(Category::Bottom, Some(SubType::Skirts), PantsType::Jeans));
    }

    #[test]
    fn tag_offers_respect_group() {
        let silk = AttributeTag::new(TagGroup::Material, "silk");
        assert!(offers_tag(Category::Top, Some(SubType::Shirt), None, &silk));
        assert!(!offers_tag(Category::Top, Some(SubType::Sweater), None, &silk));

        let vest = AttributeTag::new(TagGroup::Sleeve, "vest");
        assert!(!offers_tag(Category::Top, Some(SubType::Shirt), None, &vest));
        assert!(offers_tag(Category::Top, Some(SubType::Sweater), None, &vest));
    }

    #[test]
    fn labels_resolve_across_the_table() {
        assert_eq!(
            label_for(&AttributeTag::new(TagGroup::Fit, "flare")),
            Some("Flare/bootcut")
        );
        assert_eq!(
            label_for(&AttributeTag::new(TagGroup::Length, "calf")),
            Some("At calf")
        );
        assert_eq!(label_for(&AttributeTag::new(TagGroup::Rise, "sky")), None);
    }
}
