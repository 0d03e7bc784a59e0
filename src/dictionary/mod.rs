use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{ImagesSettings, WordsSettings};
use crate::error::Error;

/// The pool of candidate words, filtered once at load time so picking a word never retries.
#[derive(Debug)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    pub const MINIMUM_WORD_LENGTH: usize = 5;

    /// Fetches the word list once. `location` is either an http(s) URL or a file path.
    pub async fn load(settings: &WordsSettings) -> Result<Self, Error> {
        let location = settings.location.as_str();
        let text = if Dictionary::is_remote(location) {
            Dictionary::fetch(location).await?
        } else {
            tokio::fs::read_to_string(location).await.map_err(|error| {
                Error::WordSource(format!(
                    "Could not read the words file. File: '{location}', Error: '{error}'."
                ))
            })?
        };

        let dictionary = Dictionary::parse(&text, settings.minimum_length)?;
        log::info!(
            "Words loaded. Location: '{location}', Words: '{}'.",
            dictionary.len()
        );
        Ok(dictionary)
    }

    pub fn parse(text: &str, minimum_length: usize) -> Result<Self, Error> {
        Dictionary::from_words(text.lines().map(str::to_string).collect(), minimum_length)
    }

    pub fn from_words(words: Vec<String>, minimum_length: usize) -> Result<Self, Error> {
        let minimum_length = minimum_length.max(Dictionary::MINIMUM_WORD_LENGTH);
        let words: Vec<String> = words
            .into_iter()
            .map(|word| word.trim().to_string())
            .filter(|word| word.chars().count() >= minimum_length)
            .collect();

        if words.is_empty() {
            return Err(Error::WordSource(format!(
                "The word list has no word with at least {minimum_length} letters."
            )));
        }
        Ok(Dictionary { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn random_word(&self, rng: &mut impl Rng) -> Option<&str> {
        self.words.choose(rng).map(String::as_str)
    }

    fn is_remote(location: &str) -> bool {
        location.starts_with("http://") || location.starts_with("https://")
    }

    async fn fetch(url: &str) -> Result<String, Error> {
        let response = reqwest::get(url)
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| {
                Error::WordSource(format!(
                    "Could not fetch the word list. Url: '{url}', Error: '{error}'."
                ))
            })?;

        response.text().await.map_err(|error| {
            Error::WordSource(format!(
                "Could not read the word list. Url: '{url}', Error: '{error}'."
            ))
        })
    }
}

/// Images shown when a round is won or lost.
#[derive(Clone, Debug, Default)]
pub struct OutcomeImages {
    correct: Vec<String>,
    incorrect: Vec<String>,
}

impl OutcomeImages {
    pub fn new(settings: &ImagesSettings) -> Self {
        OutcomeImages {
            correct: settings.correct.clone(),
            incorrect: settings.incorrect.clone(),
        }
    }

    pub fn random_correct(&self, rng: &mut impl Rng) -> Option<String> {
        self.correct.choose(rng).cloned()
    }

    pub fn random_incorrect(&self, rng: &mut impl Rng) -> Option<String> {
        self.incorrect.choose(rng).cloned()
    }
}
