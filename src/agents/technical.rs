//! Technical replies: code-flavoured analysis with an illustrative snippet.

use std::sync::LazyLock;

use regex::Regex;

use super::compile_regex;

static CODE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        r"(?i)code|programming|javascript|python|react|api|function|component|database|algorithm",
    )
});

/// Whether the message touches on programming at all.
pub fn is_code_related(message: &str) -> bool {
    CODE_KEYWORDS.is_match(message)
}

pub fn respond(message: &str) -> String {
    if is_code_related(message) {
        code_reply(message)
    } else {
        analysis_reply(message)
    }
}

fn code_reply(message: &str) -> String {
    format!(
        r#"# Technical Analysis

## Understanding Your Query
"{message}"

## Key Components
1. Technical Requirements
   - System dependencies
   - Environment setup
   - Required libraries

2. Implementation Approach
   - Architecture overview
   - Design patterns
   - Best practices

3. Code Example
   - Sample implementation
   - Key functions
   - Error handling

## Sample Implementation
```javascript
// Here's a practical example
function demonstration() {{
  try {{
    // Implementation details based on your query
    const result = processQuery("{message}");
    return result;
  }} catch (error) {{
    console.error("Error:", error);
    throw new Error("Failed to process query");
  }}
}}

// Helper function
function processQuery(query) {{
  // Query processing logic
  return `Processed: ${{query}}`;
}}
```

## Best Practices
1. Code Organization
   - Modular structure
   - Clean architecture
   - Documentation

2. Performance Considerations
   - Optimization techniques
   - Resource management
   - Scalability

3. Error Handling
   - Exception management
   - Logging
   - Recovery strategies

4. Testing Approach
   - Unit tests
   - Integration tests
   - Performance testing

Would you like me to elaborate on any of these aspects?"#
    )
}

fn analysis_reply(message: &str) -> String {
    format!(
        r#"# Technical Perspective

## Analysis of "{message}"

1. System Architecture Considerations
   - Performance implications
     * Resource usage
     * Scalability factors
     * Response times
   - Security considerations
     * Data protection
     * Access control
     * Vulnerability prevention

2. Implementation Strategy
   - Recommended approach
     * Technology stack
     * Design patterns
     * Best practices
   - Alternative solutions
     * Pros and cons
     * Trade-offs
     * Cost considerations

3. Next Steps
   - Implementation plan
     * Phase 1: Setup
     * Phase 2: Development
     * Phase 3: Testing
   - Deployment strategy
     * Environment setup
     * CI/CD pipeline
     * Monitoring

Which aspect would you like me to explain in more detail?"#
    )
}
