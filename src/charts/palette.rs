//! Category colours
//! Assigns each disaster type a fixed colour for the whole session.

use egui::ecolor::Hsva;
use egui::Color32;
use std::collections::HashMap;

/// Fallback for types outside the category set
pub const UNKNOWN_COLOR: Color32 = Color32::from_rgb(96, 125, 139); // Blue Grey

/// Colour lookup built once from the sorted category set.
///
/// Hues are spaced evenly around the wheel in category order, so the
/// assignment depends only on the category set, never on the year shown.
#[derive(Debug, Clone, Default)]
pub struct CategoryPalette {
    colors: HashMap<String, Color32>,
}

impl CategoryPalette {
    pub fn new(categories: &[String]) -> Self {
        let n = categories.len().max(1) as f32;
        let colors = categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let hue = i as f32 / n;
                (category.clone(), Color32::from(Hsva::new(hue, 0.75, 0.9, 1.0)))
            })
            .collect();
        Self { colors }
    }

    pub fn color(&self, category: &str) -> Color32 {
        self.colors.get(category).copied().unwrap_or(UNKNOWN_COLOR)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.colors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn categories() -> Vec<String> {
        ["Drought", "Earthquake", "Flood", "Storm"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn each_category_gets_a_distinct_color() {
        let palette = CategoryPalette::new(&categories());
        assert_eq!(palette.len(), 4);
        let seen: HashSet<Color32> = categories().iter().map(|c| palette.color(c)).collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn same_category_set_gives_same_colors() {
        let a = CategoryPalette::new(&categories());
        let b = CategoryPalette::new(&categories());
        for c in categories() {
            assert_eq!(a.color(&c), b.color(&c));
        }
    }

    #[test]
    fn unknown_category_uses_fallback() {
        let palette = CategoryPalette::new(&categories());
        assert_eq!(palette.color("Volcano"), UNKNOWN_COLOR);
    }
}
