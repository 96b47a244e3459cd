use std::collections::HashMap;

use tracing::warn;

/// Set3 (12 colours) followed by Tableau10 (10 colours).
/// Categories beyond the 22nd wrap around to the start.
pub const PALETTE: [&str; 22] = [
    // Set3
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
    // Tableau10
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Fill used for a category that was never assigned.
pub const UNKNOWN_COLOR: &str = "#cccccc";

pub fn palette_color(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

/// Category name to fill colour, in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct CategoryColorMap {
    entries: Vec<(String, &'static str)>,
    index: HashMap<String, usize>,
}

impl CategoryColorMap {
    pub fn assign<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = CategoryColorMap::default();
        for c in categories {
            let c = c.as_ref();
            if map.index.contains_key(c) {
                continue;
            }
            let i = map.entries.len();
            map.entries.push((c.to_string(), palette_color(i)));
            map.index.insert(c.to_string(), i);
        }
        if map.entries.len() > PALETTE.len() {
            warn!(
                categories = map.entries.len(),
                palette = PALETTE.len(),
                "more categories than palette colours; colours repeat"
            );
        }
        map
    }

    pub fn get(&self, category: &str) -> Option<&'static str> {
        self.index.get(category).map(|i| self.entries[*i].1)
    }

    pub fn color_or_default(&self, category: &str) -> &'static str {
        self.get(category).unwrap_or(UNKNOWN_COLOR)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.entries.iter().map(|(c, col)| (c.as_str(), *col))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_order_and_duplicates() {
        let m = CategoryColorMap::assign(["b", "a", "b", "c"]);
        let cats: Vec<_> = m.categories().collect();
        assert_eq!(cats, ["b", "a", "c"]);
        assert_eq!(m.get("b"), Some("#8dd3c7"));
        assert_eq!(m.get("a"), Some("#ffffb3"));
        assert_eq!(m.get("c"), Some("#bebada"));
    }

    #[test]
    fn palette_continues_into_tableau() {
        let cats: Vec<String> = (0..13).map(|i| format!("c{i}")).collect();
        let m = CategoryColorMap::assign(&cats);
        assert_eq!(m.get("c11"), Some("#ffed6f"));
        assert_eq!(m.get("c12"), Some("#4e79a7"));
    }

    #[test]
    fn wraps_after_palette_is_exhausted() {
        let cats: Vec<String> = (0..25).map(|i| format!("c{i}")).collect();
        let m = CategoryColorMap::assign(&cats);
        assert_eq!(m.len(), 25);
        assert_eq!(m.get("c22"), m.get("c0"));
        assert_eq!(m.get("c24"), m.get("c2"));
    }

    #[test]
    fn unknown_and_empty() {
        let m = CategoryColorMap::assign(Vec::<String>::new());
        assert!(m.is_empty());
        assert_eq!(m.get("x"), None);
        assert_eq!(m.color_or_default("x"), UNKNOWN_COLOR);
    }

    #[test]
    fn palette_entries_are_distinct() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in &PALETTE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
