//! Word-picking source used to decorate creative replies.

use rand::Rng;
use rand::seq::SliceRandom;

/// Chooses one word from a fixed list.
///
/// Production code picks at random; tests swap in a deterministic picker so
/// they can assert on exact output.
pub trait WordPicker {
    fn pick(&mut self, words: &[&'static str]) -> &'static str;
}

/// Uniform random choice backed by any [`Rng`].
pub struct RandomPicker<R> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> WordPicker for RandomPicker<R> {
    fn pick(&mut self, words: &[&'static str]) -> &'static str {
        words.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

/// Always returns the first word of the list.
#[cfg(test)]
pub(crate) struct FirstWordPicker;

#[cfg(test)]
impl WordPicker for FirstWordPicker {
    fn pick(&mut self, words: &[&'static str]) -> &'static str {
        words.first().copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const WORDS: &[&str] = &["alpha", "beta", "gamma"];

    #[test]
    fn random_picker_stays_in_list() {
        let mut picker = RandomPicker::new(StdRng::seed_from_u64(7));
        for _ in 0..50 {
            assert!(WORDS.contains(&picker.pick(WORDS)));
        }
    }

    #[test]
    fn empty_list_yields_empty_word() {
        let mut picker = RandomPicker::new(StdRng::seed_from_u64(7));
        assert_eq!(picker.pick(&[]), "");
        assert_eq!(FirstWordPicker.pick(&[]), "");
    }
}
