use serde::Serialize;

use crate::fold::{fold, fold_char};
use crate::game::outcome::{Rejection, RevealedLetter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Reveal {
    Hidden,
    /// Not a letter (hyphen, apostrophe...), shown from the start.
    Given,
    Guessed,
    /// Shown only because the round was lost.
    OnLoss,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Letter {
    pub display: char,
    pub folded: char,
    pub reveal: Reveal,
}

impl Letter {
    fn new(display: char) -> Self {
        let folded = fold_char(display);
        Letter {
            display,
            folded,
            reveal: if folded.is_alphabetic() {
                Reveal::Hidden
            } else {
                Reveal::Given
            },
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.reveal == Reveal::Hidden
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    letters: Vec<Letter>,
    folded: String,
    pub is_solved: bool,
}

impl Word {
    pub fn new(text: &str) -> Self {
        let letters: Vec<Letter> = text.trim().chars().map(Letter::new).collect();
        let folded = letters.iter().map(|letter| letter.folded).collect();
        Word {
            letters,
            folded,
            is_solved: false,
        }
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn text(&self) -> String {
        self.letters.iter().map(|letter| letter.display).collect()
    }

    pub fn folded(&self) -> &str {
        &self.folded
    }

    fn hidden_count(&self) -> usize {
        self.letters.iter().filter(|letter| letter.is_hidden()).count()
    }

    fn occurrences(&self, folded: char) -> usize {
        self.letters
            .iter()
            .filter(|letter| letter.folded == folded)
            .count()
    }

    fn reveal_matching(
        &mut self,
        word_index: usize,
        reveal: Reveal,
        matches: impl Fn(&Letter) -> bool,
    ) -> Vec<RevealedLetter> {
        self.letters
            .iter_mut()
            .enumerate()
            .filter(|(_, letter)| letter.is_hidden() && matches(&**letter))
            .map(|(position, letter)| {
                letter.reveal = reveal;
                RevealedLetter {
                    word: word_index,
                    position,
                    letter: letter.display,
                }
            })
            .collect()
    }
}

#[derive(Debug, PartialEq)]
pub struct LetterGuess {
    pub occurrences: usize,
    pub revealed: Vec<RevealedLetter>,
}

#[derive(Debug, PartialEq)]
pub struct WordGuess {
    pub solved: Vec<usize>,
    pub revealed: Vec<RevealedLetter>,
}

/// Once this few letters remain hidden only whole words may be guessed.
pub const FORCED_WORD_MODE_THRESHOLD: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    words: Vec<Word>,
    total_letters: usize,
    revealed_letters: usize,
    solved_words: usize,
    attempted_letters: Vec<char>,
    indicator_visible: bool,
}

impl Round {
    pub fn new(words: &[String]) -> Self {
        let words: Vec<Word> = words.iter().map(|word| Word::new(word)).collect();
        let total_letters = words.iter().map(Word::len).sum();
        let hidden_letters: usize = words.iter().map(Word::hidden_count).sum();
        Round {
            words,
            total_letters,
            revealed_letters: total_letters - hidden_letters,
            solved_words: 0,
            attempted_letters: Vec::default(),
            indicator_visible: false,
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn revealed_letters(&self) -> usize {
        self.revealed_letters
    }

    pub fn hidden_letters(&self) -> usize {
        self.total_letters - self.revealed_letters
    }

    pub fn solved_words(&self) -> usize {
        self.solved_words
    }

    pub fn attempted_letters(&self) -> &[char] {
        &self.attempted_letters
    }

    pub fn indicator_visible(&self) -> bool {
        self.indicator_visible
    }

    pub fn all_solved(&self) -> bool {
        self.solved_words >= self.words.len()
    }

    pub fn is_forced_word_mode(&self) -> bool {
        self.hidden_letters() <= FORCED_WORD_MODE_THRESHOLD
    }

    pub fn matches_unsolved_length(&self, length: usize) -> bool {
        self.words
            .iter()
            .any(|word| !word.is_solved && word.len() == length)
    }

    pub fn matches_last_word_length(&self, length: usize) -> bool {
        self.words.last().is_some_and(|word| word.len() == length)
    }

    /// Makes the chance indicator visible. Returns true when it was hidden until now.
    pub fn show_indicator(&mut self) -> bool {
        !std::mem::replace(&mut self.indicator_visible, true)
    }

    pub fn guess_letter(&mut self, letter: char) -> Result<LetterGuess, Rejection> {
        let letter = fold_char(letter);
        if self.attempted_letters.contains(&letter) {
            return Err(Rejection::AlreadyAttempted);
        }
        self.attempted_letters.push(letter);

        let occurrences = self.words.iter().map(|word| word.occurrences(letter)).sum();
        let revealed: Vec<RevealedLetter> = self
            .words
            .iter_mut()
            .enumerate()
            .flat_map(|(index, word)| {
                word.reveal_matching(index, Reveal::Guessed, |hidden| hidden.folded == letter)
            })
            .collect();
        self.revealed_letters += revealed.len();

        Ok(LetterGuess {
            occurrences,
            revealed,
        })
    }

    /// Solves every unsolved word equal to the guess. An empty `solved` list is a miss.
    pub fn guess_word(&mut self, guess: &str) -> Result<WordGuess, Rejection> {
        let guess = fold(guess);
        let mut solved = Vec::new();
        let mut revealed = Vec::new();
        let mut matches_solved_word = false;

        for (index, word) in self.words.iter_mut().enumerate() {
            if word.folded() != guess {
                continue;
            }
            if word.is_solved {
                matches_solved_word = true;
                continue;
            }
            word.is_solved = true;
            revealed.extend(word.reveal_matching(index, Reveal::Guessed, |_| true));
            solved.push(index);
        }

        if solved.is_empty() && matches_solved_word {
            return Err(Rejection::AlreadySolved);
        }
        self.solved_words += solved.len();
        self.revealed_letters += revealed.len();

        Ok(WordGuess { solved, revealed })
    }

    pub fn reveal_remaining(&mut self) -> Vec<RevealedLetter> {
        let revealed: Vec<RevealedLetter> = self
            .words
            .iter_mut()
            .enumerate()
            .flat_map(|(index, word)| word.reveal_matching(index, Reveal::OnLoss, |_| true))
            .collect();
        self.revealed_letters += revealed.len();
        revealed
    }
}
