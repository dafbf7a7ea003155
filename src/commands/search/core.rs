use std::{fmt, path::Path};

use rand::Rng;
use tracing::{info, warn};

use crate::{
    errors::ResourceReadError,
    utils::{
        text::capitalize,
        words::{load_lines, WordList},
    },
};

#[derive(PartialEq, Debug, Copy, Clone, Hash, Eq, PartialOrd, Ord)]
pub enum Category {
    Modifiers,
    Attributes,
    Items,
    Locations,
}

impl Category {
    pub const ALL: [Self; 4] = [
        Self::Modifiers,
        Self::Attributes,
        Self::Items,
        Self::Locations,
    ];

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Modifiers => "SearchModifiers.txt",
            Self::Attributes => "SearchAttributes.txt",
            Self::Items => "SearchItems.txt",
            Self::Locations => "SearchLocations.txt",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Modifiers => "modifiers",
            Self::Attributes => "attributes",
            Self::Items => "items",
            Self::Locations => "locations",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four word lists `/search` draws from. Loaded once, read-only after.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchLists {
    modifiers: WordList,
    attributes: WordList,
    items: WordList,
    locations: WordList,
}

impl SearchLists {
    pub fn new(
        modifiers: WordList,
        attributes: WordList,
        items: WordList,
        locations: WordList,
    ) -> Self {
        Self {
            modifiers,
            attributes,
            items,
            locations,
        }
    }

    /// Reads every category's file from `dir`. Any unreadable file fails the whole load.
    #[tracing::instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load(dir: &Path) -> Result<Self, ResourceReadError> {
        let mut lists = Self::default();

        for category in Category::ALL {
            let words = load_lines(dir.join(category.file_name()))?;

            if words.is_empty() {
                warn!(%category, "word list is empty, searches will have gaps");
            } else {
                info!(count = words.len(), "{} loaded", capitalize(category.name()));
            }

            *lists.get_mut(category) = words;
        }

        Ok(lists)
    }

    pub const fn get(&self, category: Category) -> &WordList {
        match category {
            Category::Modifiers => &self.modifiers,
            Category::Attributes => &self.attributes,
            Category::Items => &self.items,
            Category::Locations => &self.locations,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut WordList {
        match category {
            Category::Modifiers => &mut self.modifiers,
            Category::Attributes => &mut self.attributes,
            Category::Items => &mut self.items,
            Category::Locations => &mut self.locations,
        }
    }

    /// Draws one word per category and builds the search sentence.
    ///
    /// An empty list contributes an empty string.
    pub fn roll(&self, rng: &mut impl Rng) -> String {
        let mut pick = |category| self.get(category).pick(rng).unwrap_or_default();

        let modifier = pick(Category::Modifiers);
        let attribute = pick(Category::Attributes);
        let item = pick(Category::Items);
        let location = pick(Category::Locations);

        format_search_result(modifier, attribute, item, location)
    }
}

/// Fills in the search sentence template.
///
/// A missing attribute also drops the modifier, but keeps both spaces around
/// them, e.g. `"...find a   potion under a rock."`.
pub fn format_search_result(modifier: &str, attribute: &str, item: &str, location: &str) -> String {
    let modifier = if attribute.is_empty() { "" } else { modifier };

    format!("You search around and find a {modifier} {attribute} {item} {location}.")
}
