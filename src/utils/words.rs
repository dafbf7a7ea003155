use std::{fs, ops::Deref, path::Path};

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, instrument};

use super::text::is_blank;
use crate::errors::ResourceReadError;

/// An immutable list of words, one per line of the file it was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList(Vec<String>);

impl WordList {
    pub fn new(words: Vec<String>) -> Self {
        Self(words)
    }

    pub fn parse(content: &str) -> Self {
        Self::new(split_lines(content))
    }

    /// Picks one word uniformly at random, or `None` if the list is empty.
    pub fn pick(&self, rng: &mut impl Rng) -> Option<&str> {
        pick_random(&self.0, rng).map(String::as_str)
    }
}

impl Deref for WordList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for WordList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Splits `content` on `\n`, `\r\n` and lone `\r`, dropping blank lines.
///
/// Lines that are kept come back exactly as written.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .flat_map(|line| line.split('\r'))
        .filter(|line| !is_blank(line))
        .map(str::to_owned)
        .collect()
}

#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_lines(path: impl AsRef<Path>) -> Result<WordList, ResourceReadError> {
    let path = path.as_ref();

    let content =
        fs::read_to_string(path).map_err(|source| ResourceReadError::new(path, source))?;
    let words = WordList::parse(&content);

    debug!(count = words.len(), "loaded word list");

    Ok(words)
}

pub fn pick_random<'a, T>(items: &'a [T], rng: &mut impl Rng) -> Option<&'a T> {
    items.choose(rng)
}
