/// Word rotation for the hero title.
#[derive(Clone, Debug, PartialEq)]
pub struct Typewriter {
    words: Vec<String>,
    index: usize,
}

impl Typewriter {
    /// Trims the declared words and drops blanks. Falls back to `fallback`
    /// so there is always something to show.
    pub fn new<I, S>(words: I, fallback: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            words.push(fallback.to_string());
        }
        Self { words, index: 0 }
    }

    pub fn current(&self) -> &str {
        &self.words[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// A lone word is shown once and never rotated.
    pub fn rotates(&self) -> bool {
        self.words.len() > 1
    }

    /// Moves to the next word, wrapping at the end.
    pub fn advance(&mut self) -> &str {
        if self.rotates() {
            self.index = (self.index + 1) % self.words.len();
        }
        self.current()
    }
}
