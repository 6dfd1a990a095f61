//! Encouragement shown after an entry is logged.

use crate::kv::{load_json_or_default, KeyValueStore, QUOTE_KEY};
use crate::{Error, Result};
use rand::rngs::ThreadRng;
use rand::Rng;

pub const QUOTES: [&str; 30] = [
    "Great job feeding yourself! Your body thanks you. 🌈",
    "Nourishment logged! You're painting a beautiful mosaic today. 🎨",
    "Another color on the canvas. You're doing amazing! ✨",
    "Your body is doing incredible things with that fuel right now. 💪",
    "Feeding yourself is an act of self-care. Well done! 🌻",
    "Look at all those colors! Your day is shaping up beautifully. 🌈",
    "You showed up for yourself today. That matters. 💛",
    "Every meal is a chance to nourish, and you just took it! 🌟",
    "Fueled and fabulous. Keep going! 🚀",
    "Your rainbow is growing! Each color is a gift to your body. 🎁",
    "Eating is not a performance, it's a kindness. You're doing great. 🤗",
    "No perfect days, just nourished ones. This counts! 🌿",
    "You listened to your body. That's the whole point. 👏",
    "Another step in taking care of yourself. Proud of you! 🌸",
    "Balance isn't about perfection, it's about showing up. And you did! ⭐",
    "Your body needed that. Thank you for listening to it. 💜",
    "One more color in today's mosaic. Beautiful! 🎨",
    "Nourishing yourself is never wasted time. 🕊️",
    "Food is fuel, food is joy, food is care. You chose all three. 🌈",
    "That's a win! Every meal logged is awareness in action. 🧠",
    "You're building something beautiful, one meal at a time. 🏗️",
    "Rest, eat, hydrate, repeat. You've got this! 💧",
    "Your future self is thanking you for this meal right now. 🙏",
    "Colors on the board! Today is a good day. 🎯",
    "Eating well isn't about rules, it's about respect for yourself. 💐",
    "Another brick in the foundation of feeling good. Nice work! 🧱",
    "You didn't skip this one. That consistency matters more than you think. 📈",
    "Variety is the spice of life, and your mosaic proves it! 🌶️",
    "Nourished body, nourished mind. You're investing in both. 🧘",
    "This meal? It counts. You count. Everything counts. 💫",
];

/// Random quote selector that never repeats the previous pick
pub struct QuotePicker<R: Rng = ThreadRng> {
    quotes: Vec<String>,
    last: Option<usize>,
    rng: R,
}

impl QuotePicker<ThreadRng> {
    /// Picker over the built-in quotes using the thread RNG
    pub fn new() -> Self {
        Self {
            quotes: QUOTES.iter().map(|q| q.to_string()).collect(),
            last: None,
            rng: rand::rng(),
        }
    }
}

impl Default for QuotePicker<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuotePicker<R> {
    /// Picker over a custom pool with an explicit random source
    pub fn with_rng(quotes: Vec<String>, rng: R) -> Result<Self> {
        if quotes.is_empty() {
            return Err(Error::Validation("Quote pool is empty".into()));
        }
        Ok(Self {
            quotes,
            last: None,
            rng,
        })
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Index of the most recent pick
    pub fn last_index(&self) -> Option<usize> {
        self.last
    }

    pub fn next_quote(&mut self) -> &str {
        let index = self.pick();
        &self.quotes[index]
    }

    /// Like [`next_quote`](Self::next_quote), but the previous pick is read
    /// from and written back to `store`, so separate runs never repeat.
    pub fn next_quote_in<S: KeyValueStore>(&mut self, store: &mut S) -> Result<&str> {
        if let Some(last) = load_json_or_default::<S, usize>(store, QUOTE_KEY) {
            if last < self.quotes.len() {
                self.last = Some(last);
            }
        }

        let index = self.pick();
        store.set(QUOTE_KEY, &index.to_string())?;
        Ok(&self.quotes[index])
    }

    fn pick(&mut self) -> usize {
        let mut index = self.rng.random_range(0..self.quotes.len());
        while self.quotes.len() > 1 && Some(index) == self.last {
            index = self.rng.random_range(0..self.quotes.len());
        }
        self.last = Some(index);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn builtin(seed: u64) -> QuotePicker<StdRng> {
        let pool = QUOTES.iter().map(|q| q.to_string()).collect();
        QuotePicker::with_rng(pool, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_no_adjacent_repeats() {
        let mut picker = builtin(7);
        assert_eq!(picker.len(), 30);

        let mut previous = picker.next_quote().to_string();
        for _ in 0..1000 {
            let current = picker.next_quote().to_string();
            assert_ne!(current, previous);
            previous = current;
        }
    }

    #[test]
    fn test_covers_the_pool() {
        let mut picker = builtin(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(picker.next_quote().to_string());
        }
        assert_eq!(seen.len(), QUOTES.len());
    }

    #[test]
    fn test_single_quote_pool_repeats() {
        let mut picker =
            QuotePicker::with_rng(vec!["only one".into()], StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(picker.next_quote(), "only one");
        assert_eq!(picker.next_quote(), "only one");
    }

    #[test]
    fn test_two_quote_pool_alternates() {
        let mut picker = QuotePicker::with_rng(
            vec!["a".into(), "b".into()],
            StdRng::seed_from_u64(3),
        )
        .unwrap();
        let first = picker.next_quote().to_string();
        for i in 1..20 {
            let expected = if (i % 2 == 0) == (first == "a") { "a" } else { "b" };
            assert_eq!(picker.next_quote(), expected);
        }
    }

    #[test]
    fn test_empty_pool_rejected() {
        let result = QuotePicker::with_rng(Vec::new(), StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_last_pick_survives_across_pickers() {
        let mut backend = MemoryStore::new();
        let pool: Vec<String> = vec!["a".into(), "b".into()];

        // Fresh pickers each time, as separate CLI runs would have
        let mut previous: Option<String> = None;
        for seed in 0..20 {
            let mut picker = QuotePicker::with_rng(pool.clone(), StdRng::seed_from_u64(seed)).unwrap();
            let quote = picker.next_quote_in(&mut backend).unwrap().to_string();
            if let Some(previous) = &previous {
                assert_ne!(&quote, previous);
            }
            let stored = backend.get(QUOTE_KEY).unwrap().unwrap();
            assert_eq!(Some(stored.parse::<usize>().unwrap()), picker.last_index());
            previous = Some(quote);
        }
    }

    #[test]
    fn test_unusable_stored_pick_is_ignored() {
        crate::logging::init_test();
        let mut backend = MemoryStore::new();
        backend.set(QUOTE_KEY, "99").unwrap();

        let mut picker = builtin(5);
        let quote = picker.next_quote_in(&mut backend).unwrap().to_string();
        assert!(QUOTES.contains(&quote.as_str()));

        backend.set(QUOTE_KEY, "not a number").unwrap();
        assert!(picker.next_quote_in(&mut backend).is_ok());
    }

    #[test]
    fn test_default_picker_uses_builtin_quotes() {
        let mut picker = QuotePicker::new();
        let quote = picker.next_quote().to_string();
        assert!(QUOTES.contains(&quote.as_str()));
    }
}
