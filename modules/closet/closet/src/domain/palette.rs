//! The fixed color palette and its selectable tokens.

use closet_sdk::models::{BaseColor, ColorToken, Shade};

/// One palette row: the base color followed by its shade variants, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub base: BaseColor,
    pub tokens: Vec<ColorToken>,
}

/// Palette rows in display order.
pub fn entries() -> impl Iterator<Item = PaletteEntry> {
    BaseColor::ALL.iter().map(|&base| PaletteEntry {
        base,
        tokens: tokens_for(base).collect(),
    })
}

/// Every token selectable for `base`: the base itself, then light, then dark.
pub fn tokens_for(base: BaseColor) -> impl Iterator<Item = ColorToken> {
    let shades: &[Shade] = if base.has_shades() { Shade::ALL } else { &[] };
    std::iter::once(ColorToken::base(base)).chain(
        shades
            .iter()
            .filter_map(move |&shade| ColorToken::shaded(base, shade).ok()),
    )
}

/// Every selectable token in palette order.
pub fn all_tokens() -> impl Iterator<Item = ColorToken> {
    BaseColor::ALL.iter().flat_map(|&base| tokens_for(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_twelve_ordered_rows() {
        let bases: Vec<String> = entries().map(|e| e.base.to_string()).collect();
        assert_eq!(
            bases,
            [
                "red", "orange", "yellow", "green", "blue", "purple", "pink", "brown", "gray",
                "denim", "white", "black"
            ]
        );
    }

    #[test]
    fn only_white_and_black_lack_shades() {
        for entry in entries() {
            let expected = match entry.base {
                BaseColor::White | BaseColor::Black => 1,
                _ => 3,
            };
            assert_eq!(entry.tokens.len(), expected, "{}", entry.base);
        }
        assert_eq!(all_tokens().count(), 10 * 3 + 2);
    }

    #[test]
    fn shades_follow_their_base() {
        let reds: Vec<String> = tokens_for(BaseColor::Red).map(|t| t.to_string()).collect();
        assert_eq!(reds, ["red", "light-red", "dark-red"]);
    }
}
