// File: ./src/model/matcher.rs
use crate::model::Task;

impl Task {
    /// Search used by the list filter. Every whitespace-separated word must
    /// match: `@ctx` and `+proj` words match tags exactly, other words are
    /// case-insensitive substrings of the text, and `-word` negates. An empty
    /// term matches all.
    pub fn matches_search(&self, term: &str) -> bool {
        let text_lower = self.text().to_lowercase();
        term.split_whitespace().all(|word| match word.strip_prefix('-') {
            Some(negated) if !negated.is_empty() => !self.matches_word(negated, &text_lower),
            _ => self.matches_word(word, &text_lower),
        })
    }

    fn matches_word(&self, word: &str, text_lower: &str) -> bool {
        match word.chars().next() {
            Some('@') if word.len() > 1 => self.contexts().contains(word),
            Some('+') if word.len() > 1 => self.projects().contains(word),
            _ => text_lower.contains(&word.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::Task;

    #[test]
    fn words_must_all_match() {
        let t = Task::new(1, "Buy Milk @store +errands");
        assert!(t.matches_search(""));
        assert!(t.matches_search("milk"));
        assert!(t.matches_search("buy MILK"));
        assert!(!t.matches_search("milk bread"));
    }

    #[test]
    fn tag_words_match_exactly() {
        let t = Task::new(1, "Buy Milk @store +errands");
        assert!(t.matches_search("@store"));
        assert!(t.matches_search("+errands milk"));
        assert!(!t.matches_search("@sto"));
        assert!(!t.matches_search("+store"));
    }

    #[test]
    fn dash_negates_a_word() {
        let t = Task::new(1, "Buy Milk @store +errands");
        assert!(t.matches_search("-bread"));
        assert!(!t.matches_search("-milk"));
        assert!(!t.matches_search("milk -@store"));
        assert!(Task::new(2, "re-pot plants").matches_search("-"));
    }
}
