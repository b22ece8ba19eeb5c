//! Creative replies built around the themes found in the user's message.

use super::words::WordPicker;
use crate::util::capitalize;

const POSITIVE: &[&str] = &["exciting", "innovative", "inspiring", "creative", "dynamic"];
const THOUGHTFUL: &[&str] = &["interesting", "complex", "nuanced", "detailed", "profound"];
const PRACTICAL: &[&str] = &["useful", "effective", "efficient", "practical", "valuable"];

/// Lower-cased words longer than three characters, in message order.
pub fn themes(message: &str) -> Vec<String> {
    message
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .map(str::to_lowercase)
        .collect()
}

pub fn respond(message: &str, words: &mut dyn WordPicker) -> String {
    let themes = themes(message);
    let mut out = format!(
        "🌟 Creative Exploration: \"{message}\" 🌟\n\n\
         Let's explore this {} topic together!\n\n\
         🎯 Key Themes:\n",
        words.pick(POSITIVE)
    );
    for theme in &themes {
        out.push_str(&format!(
            "* {}: A {} perspective\n  - Exploring the boundaries\n  - Innovative approaches\n  - Unique interpretations\n",
            capitalize(theme),
            words.pick(THOUGHTFUL)
        ));
    }

    out.push_str(&format!(
        "\n\n💡 Creative Directions:\n\
         1. {} Approach\n   - Breaking conventional patterns\n   - Exploring new possibilities\n   - Combining different elements\n\n\
         2. {} Perspective\n   - Deep analysis\n   - Hidden connections\n   - Alternative viewpoints\n\n\
         3. {} Applications\n   - Real-world implementation\n   - Practical benefits\n   - Measurable outcomes\n\n\
         🔍 Detailed Exploration:\n",
        capitalize(words.pick(POSITIVE)),
        capitalize(words.pick(THOUGHTFUL)),
        capitalize(words.pick(PRACTICAL)),
    ));
    let detailed: Vec<String> = themes
        .iter()
        .enumerate()
        .map(|(index, theme)| detailed_block(index + 1, theme))
        .collect();
    out.push_str(&detailed.join("\n"));

    out.push_str("\n\nWhich aspect would you like to explore further?");
    out
}

fn detailed_block(number: usize, theme: &str) -> String {
    format!(
        "\n{number}. {}\n   \
         - Unique aspects to consider\n     * Novel interpretations\n     * Unexpected connections\n     * Fresh perspectives\n   \
         - Creative possibilities\n     * Innovative applications\n     * Cross-disciplinary approaches\n     * Future potential\n   \
         - Practical applications\n     * Real-world usage\n     * Implementation ideas\n     * Success metrics",
        capitalize(theme)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::words::FirstWordPicker;

    fn section<'a>(reply: &'a str, start: &str, end: &str) -> &'a str {
        let from = reply.find(start).unwrap() + start.len();
        let to = reply[from..].find(end).unwrap() + from;
        &reply[from..to]
    }

    #[test]
    fn themes_keep_long_words_in_order() {
        assert_eq!(
            themes("Write a Poem about the OCEAN  and stars"),
            vec!["write", "poem", "about", "ocean", "stars"]
        );
        assert!(themes("a bit of fun").is_empty());
    }

    #[test]
    fn one_detailed_block_per_theme() {
        let reply = respond("painting music dance", &mut FirstWordPicker);
        let detailed = section(&reply, "🔍 Detailed Exploration:\n", "\n\nWhich aspect");
        assert_eq!(detailed.matches("- Unique aspects to consider").count(), 3);
        assert!(detailed.contains("1. Painting"));
        assert!(detailed.contains("2. Music"));
        assert!(detailed.contains("3. Dance"));

        let key_themes = section(&reply, "🎯 Key Themes:\n", "💡 Creative Directions:");
        assert_eq!(key_themes.matches("* ").count(), 3);
        assert!(key_themes.contains("* Painting: A interesting perspective"));
    }

    #[test]
    fn short_words_leave_theme_sections_empty() {
        let reply = respond("a cat on a mat", &mut FirstWordPicker);
        assert_eq!(section(&reply, "🎯 Key Themes:\n", "💡"), "\n\n");
        assert_eq!(section(&reply, "🔍 Detailed Exploration:\n", "Which aspect"), "\n\n");
    }

    #[test]
    fn directions_use_picked_words() {
        let reply = respond("anything", &mut FirstWordPicker);
        assert!(reply.contains("Let's explore this exciting topic together!"));
        assert!(reply.contains("1. Exciting Approach"));
        assert!(reply.contains("2. Interesting Perspective"));
        assert!(reply.contains("3. Useful Applications"));
    }
}
