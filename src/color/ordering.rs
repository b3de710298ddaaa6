//! Palette display orderings.
//!
//! Hue mode compares colors pairwise with a hue-family tolerance, which is
//! not a strict weak ordering: `a ~ b` and `b ~ c` does not imply `a ~ c`.
//! The standard library sorts may panic on such comparators, so both modes
//! run through a stable insertion sort driven by a "comes before" predicate.

use serde::{Deserialize, Serialize};

use crate::color::Swatch;
use crate::color::codec::Hsb;
use crate::constants::{GRAY_SATURATION_THRESHOLD, HUE_FAMILY_DEGREES};

/// How colors within a palette are ordered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Lightest first, by relative luminance
    #[default]
    Brightness,
    /// Chromatic colors by hue family, then grays
    Hue,
}

impl SortMode {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Brightness => "Brightness",
            SortMode::Hue => "Hue",
        }
    }

    /// The other mode.
    pub fn toggle(self) -> Self {
        match self {
            SortMode::Brightness => SortMode::Hue,
            SortMode::Hue => SortMode::Brightness,
        }
    }

    /// Parse a mode name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "brightness" => Some(SortMode::Brightness),
            "hue" => Some(SortMode::Hue),
            _ => None,
        }
    }
}

/// Return `colors` in the order given by `mode`. Equal keys keep their input order.
pub fn sort_colors<T: Swatch + Clone>(colors: &[T], mode: SortMode) -> Vec<T> {
    match mode {
        SortMode::Brightness => {
            let keyed: Vec<(f64, &T)> = colors
                .iter()
                .map(|c| (c.hex().luminance(), c))
                .collect();
            insertion_sort(keyed, |a, b| a > b)
        }
        SortMode::Hue => {
            let keyed: Vec<(Hsb, &T)> = colors.iter().map(|c| (c.hex().hsb(), c)).collect();
            insertion_sort(keyed, hue_before)
        }
    }
}

/// Pairwise hue-mode comparator: does `a` come strictly before `b`?
pub fn hue_before(a: &Hsb, b: &Hsb) -> bool {
    let gray_a = a.saturation < GRAY_SATURATION_THRESHOLD;
    let gray_b = b.saturation < GRAY_SATURATION_THRESHOLD;

    if gray_a != gray_b {
        return gray_b;
    }
    if gray_a {
        return a.brightness > b.brightness;
    }
    if (a.hue - b.hue).abs() > HUE_FAMILY_DEGREES {
        return a.hue < b.hue;
    }
    a.brightness > b.brightness
}

/// Stable insertion sort: an element moves left only past neighbours it
/// strictly comes before.
fn insertion_sort<K, T: Clone>(
    mut items: Vec<(K, &T)>,
    before: impl Fn(&K, &K) -> bool,
) -> Vec<T> {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && before(&items[j].0, &items[j - 1].0) {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
    items.into_iter().map(|(_, item)| item.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::codec::{HexColor, normalize};

    fn hexes(list: &[&str]) -> Vec<HexColor> {
        list.iter().map(|s| normalize(s).unwrap()).collect()
    }

    fn strs(list: &[HexColor]) -> Vec<&str> {
        list.iter().map(|h| h.as_str()).collect()
    }

    #[test]
    fn test_brightness_mode_descending() {
        let colors = hexes(&["#000000", "#FFFFFF", "#808080", "#FF0000"]);
        let sorted = sort_colors(&colors, SortMode::Brightness);
        assert_eq!(
            strs(&sorted),
            vec!["#FFFFFF", "#808080", "#FF0000", "#000000"]
        );
    }

    #[test]
    fn test_brightness_mode_is_stable() {
        let colors = vec![
            ("first", normalize("#123456").unwrap()),
            ("second", normalize("#123456").unwrap()),
        ];
        #[derive(Clone)]
        struct Named(&'static str, HexColor);
        impl Swatch for Named {
            fn hex(&self) -> &HexColor {
                &self.1
            }
        }
        let named: Vec<Named> = colors.into_iter().map(|(n, h)| Named(n, h)).collect();
        let sorted = sort_colors(&named, SortMode::Brightness);
        assert_eq!(sorted[0].0, "first");
        assert_eq!(sorted[1].0, "second");
    }

    #[test]
    fn test_hue_mode_groups_families_and_puts_grays_last() {
        let colors = hexes(&["#808080", "#0000FF", "#FF0500", "#FF0000"]);
        let sorted = sort_colors(&colors, SortMode::Hue);
        let order = strs(&sorted);

        let red = order.iter().position(|h| *h == "#FF0000").unwrap();
        let near_red = order.iter().position(|h| *h == "#FF0500").unwrap();
        let blue = order.iter().position(|h| *h == "#0000FF").unwrap();

        assert_eq!(red.abs_diff(near_red), 1);
        assert!(blue > red.max(near_red));
        assert_eq!(order[3], "#808080");
    }

    #[test]
    fn test_hue_mode_grays_by_brightness() {
        let colors = hexes(&["#333333", "#EEEEEE", "#00FF00", "#999999"]);
        let sorted = sort_colors(&colors, SortMode::Hue);
        assert_eq!(
            strs(&sorted),
            vec!["#00FF00", "#EEEEEE", "#999999", "#333333"]
        );
    }

    #[test]
    fn test_same_family_orders_by_brightness() {
        let dark = normalize("#800000").unwrap().hsb();
        let light = normalize("#FF0300").unwrap().hsb();
        assert!(hue_before(&light, &dark));
        assert!(!hue_before(&dark, &light));
    }

    #[test]
    fn test_sort_mode_toggle_and_names() {
        assert_eq!(SortMode::Brightness.toggle(), SortMode::Hue);
        assert_eq!(SortMode::Hue.toggle(), SortMode::Brightness);
        assert_eq!(SortMode::from_name("HUE"), Some(SortMode::Hue));
        assert_eq!(SortMode::from_name("rainbow"), None);
        assert_eq!(SortMode::default(), SortMode::Brightness);
    }

    #[test]
    fn test_empty_input() {
        let sorted = sort_colors::<HexColor>(&[], SortMode::Hue);
        assert!(sorted.is_empty());
    }
}
