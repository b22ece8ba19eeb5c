//! Prewritten explanations for "what is X" questions.

const MACHINE_LEARNING: &str = "Machine learning is a branch of artificial intelligence (AI) that enables computers to learn and improve from experience without being explicitly programmed. It focuses on developing computer programs that can access data and use it to learn for themselves.

Key aspects include:
- Automated learning from data
- Pattern recognition
- Making decisions with minimal human intervention
- Continuous improvement over time";

const ARTIFICIAL_INTELLIGENCE: &str = "Artificial Intelligence (AI) is the simulation of human intelligence by machines, particularly computer systems. It encompasses:
- Problem solving
- Learning from experience
- Understanding natural language
- Recognizing patterns and objects
- Making decisions based on data";

const DEEP_LEARNING: &str = "Deep learning is a subset of machine learning based on artificial neural networks. It uses multiple layers of processing to:
- Extract higher-level features from raw input
- Learn complex patterns in large amounts of data
- Perform human-like tasks with high accuracy";

const NEURAL_NETWORK: &str = "A neural network is a computing system inspired by biological brains. It consists of:
- Interconnected nodes (neurons)
- Multiple processing layers
- Ability to learn from training data
- Pattern recognition capabilities";

/// Look up the stored explanation for an exact (normalized) topic.
pub fn lookup(topic: &str) -> Option<&'static str> {
    match topic.trim().to_lowercase().as_str() {
        "machine learning" => Some(MACHINE_LEARNING),
        "artificial intelligence" => Some(ARTIFICIAL_INTELLIGENCE),
        "deep learning" => Some(DEEP_LEARNING),
        "neural network" => Some(NEURAL_NETWORK),
        _ => None,
    }
}

/// Explanation for `topic`, or a generic invitation that echoes it.
pub fn definition_for(topic: &str) -> String {
    match lookup(topic) {
        Some(text) => text.to_string(),
        None => format!(
            "Let me explain {topic}. This is a complex topic that involves multiple aspects \
             and practical applications. Would you like me to elaborate on any specific aspect?"
        ),
    }
}
