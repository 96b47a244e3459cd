//! Fixed table of the datasets a page offers, and the title/description pair
//! shown for each.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dataset {
    /// Container element id; also the menu's `data-chart` key.
    pub chart_id: &'static str,
    pub url: &'static str,
    /// Same file served next to the page, tried when `url` fails.
    pub fallback: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageText {
    pub title: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_CHART: &str = "kickstarter-chart";

pub const DEFAULT_TEXT: PageText = PageText {
    title: "TreeMap Diagrams",
    description: "Select a chart to view its description.",
};

pub static DATASETS: [Dataset; 3] = [
    Dataset {
        chart_id: "kickstarter-chart",
        url: "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/kickstarter-funding-data.json",
        fallback: "data/kickstarter-funding-data.json",
        title: "KickStarter Project Sales",
        description: "This chart visualizes Kickstarter funding data, highlighting the funding received by different projects in various categories.",
    },
    Dataset {
        chart_id: "videoGame-chart",
        url: "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/video-game-sales-data.json",
        fallback: "data/video-game-sales-data.json",
        title: "Video Game Sales",
        description: "This chart displays video game sales data, showing how different games have performed in terms of sales across various categories.",
    },
    Dataset {
        chart_id: "movie-chart",
        url: "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/movie-data.json",
        fallback: "data/movie-data.json",
        title: "Movie Sales",
        description: "This chart represents movie sales data, illustrating how different movies have performed in terms of sales across multiple categories.",
    },
];

pub fn dataset(chart_id: &str) -> Option<&'static Dataset> {
    DATASETS.iter().find(|d| d.chart_id == chart_id)
}

/// Title and description for a chart id; unknown ids get the generic pair.
pub fn page_text(chart_id: &str) -> PageText {
    dataset(chart_id)
        .map(|d| PageText {
            title: d.title,
            description: d.description,
        })
        .unwrap_or(DEFAULT_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_charts_have_their_own_text() {
        assert_eq!(page_text("movie-chart").title, "Movie Sales");
        assert_eq!(page_text("videoGame-chart").title, "Video Game Sales");
        assert_eq!(page_text(DEFAULT_CHART).title, "KickStarter Project Sales");
    }

    #[test]
    fn unknown_chart_falls_back() {
        assert_eq!(page_text("pie-chart"), DEFAULT_TEXT);
        assert_eq!(page_text(""), DEFAULT_TEXT);
        assert!(dataset("pie-chart").is_none());
    }

    #[test]
    fn ids_are_unique() {
        for (i, a) in DATASETS.iter().enumerate() {
            for b in &DATASETS[i + 1..] {
                assert_ne!(a.chart_id, b.chart_id);
            }
        }
    }
}
