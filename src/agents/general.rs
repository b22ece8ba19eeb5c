//! General-purpose replies: definitions, how-to guides, and reasoning outlines.

use std::sync::LazyLock;

use regex::Regex;

use super::compile_regex;
use super::definitions::definition_for;

static WHAT_QUESTION: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"(?i)^what(?:\s+is|\s+are)?\s+(.+?)\??$"));
static HOW_QUESTION: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"(?i)^how|how to|how do"));
static WHY_QUESTION: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"(?i)^why|why is|why do"));

/// Which template a message falls into. First match wins.
#[derive(Debug, PartialEq, Eq)]
enum Question<'a> {
    What(&'a str),
    How,
    Why,
    Other,
}

fn classify(message: &str) -> Question<'_> {
    if let Some(topic) = WHAT_QUESTION.captures(message).and_then(|caps| caps.get(1)) {
        return Question::What(topic.as_str().trim());
    }
    if HOW_QUESTION.is_match(message) {
        return Question::How;
    }
    if WHY_QUESTION.is_match(message) {
        return Question::Why;
    }
    Question::Other
}

pub fn respond(message: &str) -> String {
    match classify(message) {
        Question::What(topic) => what_reply(topic),
        Question::How => how_reply(message),
        Question::Why => why_reply(message),
        Question::Other => overview_reply(message),
    }
}

fn what_reply(topic: &str) -> String {
    let definition = definition_for(topic);
    format!(
        "{definition}

Would you like to know more about:
1. Practical applications
2. Real-world examples
3. Latest developments
4. Getting started with {topic}"
    )
}

fn how_reply(message: &str) -> String {
    format!(
        r#"I'll help you understand how to do this.

Here's a step-by-step guide for "{message}":

1. First, let's understand the goal
   - Define your objectives
   - Identify requirements
   - Set clear expectations

2. Here are the steps needed
   - Break down the process
   - Gather necessary resources
   - Follow best practices

3. Important considerations
   - Common challenges
   - Required prerequisites
   - Time and resource requirements

4. Common pitfalls to avoid
   - Typical mistakes
   - Solutions to problems
   - Optimization tips

Would you like me to explain any step in more detail?"#
    )
}

fn why_reply(message: &str) -> String {
    format!(
        r#"I'll explain the reasoning behind this.

Regarding "{message}":

1. Background Context
   - Historical perspective
   - Current situation
   - Relevant factors

2. Main Reasons
   - Primary factors
   - Key motivations
   - Core benefits

3. Supporting Evidence
   - Research findings
   - Expert opinions
   - Case studies

4. Practical Implications
   - Real-world impact
   - Future considerations
   - Action items

Would you like me to expand on any of these points?"#
    )
}

fn overview_reply(message: &str) -> String {
    format!(
        r#"I understand you're interested in "{message}". Let me help you with that:

1. Key Information
   - Core concepts
   - Important principles
   - Fundamental aspects

2. Relevant Details
   - Specific examples
   - Implementation details
   - Best practices

3. Next Steps
   - Practical applications
   - Learning resources
   - Further exploration

What specific aspect would you like to know more about?"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::definitions::lookup;

    fn follow_up_items(reply: &str) -> Vec<&str> {
        reply
            .lines()
            .filter(|line| {
                ["1. ", "2. ", "3. ", "4. "]
                    .iter()
                    .any(|prefix| line.starts_with(prefix))
            })
            .collect()
    }

    #[test]
    fn classifies_in_priority_order() {
        assert_eq!(classify("What is Rust?"), Question::What("Rust"));
        assert_eq!(classify("what are closures"), Question::What("closures"));
        assert_eq!(classify("what lifetimes?"), Question::What("lifetimes"));
        assert_eq!(classify("How does this work"), Question::How);
        assert_eq!(classify("tell me how to cook"), Question::How);
        assert_eq!(classify("why is the sky blue"), Question::Why);
        assert_eq!(classify("so, why do birds sing"), Question::Why);
        assert_eq!(classify("tell me a story"), Question::Other);
        // "what" questions are checked before "how".
        assert_eq!(classify("what is how to"), Question::What("how to"));
    }

    #[test]
    fn what_reply_contains_topic_and_menu() {
        let reply = respond("what are Borrow Checkers?");
        assert!(reply.contains("Borrow Checkers"));
        let items = follow_up_items(&reply);
        assert_eq!(items.len(), 4);
        assert_eq!(items[3], "4. Getting started with Borrow Checkers");
    }

    #[test]
    fn machine_learning_starts_with_stored_definition() {
        let reply = respond("What is machine learning?");
        let definition = lookup("machine learning").unwrap();
        assert!(reply.starts_with(definition));
        assert!(reply.ends_with("4. Getting started with machine learning"));
    }

    #[test]
    fn how_and_why_embed_verbatim_message() {
        let how = respond("how do I bake bread");
        assert!(how.contains("Here's a step-by-step guide for \"how do I bake bread\":"));
        assert!(how.contains("4. Common pitfalls to avoid"));

        let why = respond("Why is bread tasty");
        assert!(why.contains("Regarding \"Why is bread tasty\":"));
        assert!(why.contains("4. Practical Implications"));
    }

    #[test]
    fn fallback_has_three_sections() {
        let reply = respond("bread");
        assert!(reply.starts_with("I understand you're interested in \"bread\"."));
        assert!(reply.contains("1. Key Information"));
        assert!(reply.contains("3. Next Steps"));
        assert!(!reply.contains("4. "));
    }
}
