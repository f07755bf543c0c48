//! Prompt templates and response parsing for structured generation.
//!
//! The structured endpoints ask the provider for a single JSON document.
//! That is a best-effort contract with a non-deterministic system: the
//! parser tolerates markdown code-fence wrapping and validates required
//! fields before anything is forwarded to the caller.

use serde::{Deserialize, Serialize};

use crate::error::AiError;

/// Default system instruction for the streaming format endpoint, used
/// when the caller supplies none.
pub const DEFAULT_FORMAT_INSTRUCTION: &str = "\
You are an expert technical blog writer and editor. Your task is to take the provided raw text \
(which may be a copy-paste from a website, documentation, or chat) and REWRITE it into a \
high-quality, engaging, and structured blog post.\n\n\
Rules for Rewriting:\n\
1. **Structure**: Create a clear hierarchy with a catchy Title (H1), Introduction, Body Sections \
(H2, H3), and Conclusion.\n\
2. **Code Blocks**: Identify any code snippets in the raw text. Format them strictly using \
Markdown code blocks with the correct language identifier (e.g., ```javascript). Do NOT modify \
the code logic itself, just the formatting.\n\
3. **Tone**: logical, helpful, friendly, and professional.\n\
4. **Clarity**: Fix grammar, improve flow, and remove irrelevant copy-paste artifacts (like \
'Copy code', 'View raw', timestamps, etc.).\n\
5. **Content**: If the raw text is just code and brief notes, expand on it slightly to explain \
what the code does, but don't hallucinate features.\n\
6. **Output**: Return ONLY the Markdown content. Do not add conversational filler like 'Here is \
your rewritten post'.";

/// System instruction for blog-post generation.
pub const GENERATE_POST_SYSTEM: &str = "\
You are an expert technical blog writer. Your task is to generate a complete blog post structure \
based on the user's prompt.\n\n\
You MUST respond with ONLY a valid JSON object (no markdown, no explanation, no code fences). \
The JSON structure must be:\n\n\
{\n\
  \"title\": \"Catchy blog post title\",\n\
  \"excerpt\": \"A compelling 1-2 sentence summary/excerpt for SEO and preview cards\",\n\
  \"content\": \"Full blog post content in Markdown format. Include proper headings (##, ###), \
code blocks with language identifiers, bullet points, and a conclusion. Minimum 500 words.\",\n\
  \"category\": \"Single category name (e.g., React, Next.js, DevOps, CSS, JavaScript, Tutorial)\",\n\
  \"tags\": \"Comma-separated tags relevant to the content (e.g., react, hooks, useState)\",\n\
  \"featuredImage\": \"A relevant Unsplash URL in format: \
https://images.unsplash.com/photo-[ID]?w=1200&h=630&fit=crop\"\n\
}\n\n\
Rules:\n\
1. Write comprehensive, high-quality content (500-1000 words).\n\
2. Use proper Markdown formatting with headings, code blocks, and lists.\n\
3. Include practical code examples where appropriate.\n\
4. Make the title catchy and SEO-friendly.\n\
5. The excerpt should be compelling and under 160 characters.\n\
6. Return ONLY the JSON object, nothing else.";

/// System instruction for tutorial generation.
pub const GENERATE_TUTORIAL_SYSTEM: &str = "\
You are an expert technical tutorial writer. Your task is to generate a complete mini tutorial \
structure based on the user's prompt.\n\n\
You MUST respond with ONLY a valid JSON object (no markdown, no explanation, no code fences). \
The JSON structure must be:\n\n\
{\n\
  \"title\": \"Tutorial title\",\n\
  \"description\": \"A brief 1-2 sentence description of what this tutorial covers\",\n\
  \"category\": \"Category name (e.g., React, Next.js, DevOps, CSS, JavaScript)\",\n\
  \"difficulty\": \"beginner\" or \"intermediate\" or \"advanced\",\n\
  \"estimated_time\": \"X min\" (estimate reading/completion time),\n\
  \"steps\": [\n\
    {\n\
      \"title\": \"Step title\",\n\
      \"content\": \"Step content in Markdown format. Include code blocks with proper language \
identifiers. Be detailed and helpful.\"\n\
    }\n\
  ]\n\
}\n\n\
Rules:\n\
1. Generate 3-6 steps depending on complexity.\n\
2. Each step content should be 100-300 words with proper Markdown formatting.\n\
3. Include code examples where appropriate.\n\
4. Make the tutorial practical and actionable.\n\
5. Return ONLY the JSON object, nothing else.";

/// User turn for blog-post generation.
pub fn post_user_prompt(topic: &str) -> String {
    format!("Write a complete blog post about: {topic}")
}

/// User turn for tutorial generation.
pub fn tutorial_user_prompt(topic: &str) -> String {
    format!("Write a complete tutorial about: {topic}")
}

/// A generated blog post draft.
#[derive(Debug, Deserialize, Serialize)]
pub struct GeneratedPost {
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Comma-separated tag list, as prompted.
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default, rename = "featuredImage")]
    pub featured_image: Option<String>,
}

/// One generated tutorial step.
#[derive(Debug, Deserialize, Serialize)]
pub struct GeneratedStep {
    pub title: String,
    pub content: String,
}

/// A generated tutorial draft.
#[derive(Debug, Deserialize, Serialize)]
pub struct GeneratedTutorial {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub estimated_time: Option<String>,
    pub steps: Vec<GeneratedStep>,
}

/// Strip an optional markdown code-fence wrapper from a provider
/// response. Providers are told not to fence the JSON; some do anyway.
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Parse a generated blog post, validating required fields.
pub fn parse_generated_post(raw: &str) -> Result<GeneratedPost, AiError> {
    let post: GeneratedPost = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| AiError::InvalidResponse(format!("could not parse post structure: {e}")))?;

    if post.title.trim().is_empty() || post.content.trim().is_empty() {
        return Err(AiError::InvalidResponse(
            "post structure is missing a title or content".into(),
        ));
    }

    Ok(post)
}

/// Parse a generated tutorial, validating required fields.
pub fn parse_generated_tutorial(raw: &str) -> Result<GeneratedTutorial, AiError> {
    let tutorial: GeneratedTutorial = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| AiError::InvalidResponse(format!("could not parse tutorial structure: {e}")))?;

    if tutorial.title.trim().is_empty() || tutorial.steps.is_empty() {
        return Err(AiError::InvalidResponse(
            "tutorial structure is missing a title or steps".into(),
        ));
    }

    Ok(tutorial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const POST_JSON: &str = r###"{
        "title": "Understanding Async Rust",
        "excerpt": "A tour of futures and executors.",
        "content": "## Futures\n\nRust futures are lazy...",
        "category": "Rust",
        "tags": "rust, async, tokio",
        "featuredImage": "https://images.unsplash.com/photo-1?w=1200&h=630&fit=crop"
    }"###;

    #[test]
    fn fenced_and_unfenced_responses_parse_identically() {
        let plain = parse_generated_post(POST_JSON).unwrap();
        let fenced = parse_generated_post(&format!("```json\n{POST_JSON}\n```")).unwrap();
        let bare_fence = parse_generated_post(&format!("```\n{POST_JSON}\n```")).unwrap();

        assert_eq!(plain.title, fenced.title);
        assert_eq!(plain.content, fenced.content);
        assert_eq!(plain.title, bare_fence.title);
    }

    #[test]
    fn missing_title_is_invalid_even_when_json_is_valid() {
        let raw = r#"{"content": "body text"}"#;
        assert_matches!(parse_generated_post(raw), Err(AiError::InvalidResponse(_)));
    }

    #[test]
    fn empty_title_is_invalid() {
        let raw = r#"{"title": "  ", "content": "body text"}"#;
        assert_matches!(parse_generated_post(raw), Err(AiError::InvalidResponse(_)));
    }

    #[test]
    fn non_json_is_invalid() {
        assert_matches!(
            parse_generated_post("Sorry, I can't help with that."),
            Err(AiError::InvalidResponse(_))
        );
    }

    #[test]
    fn optional_post_fields_may_be_absent() {
        let raw = r#"{"title": "T", "content": "C"}"#;
        let post = parse_generated_post(raw).unwrap();
        assert!(post.excerpt.is_none());
        assert!(post.featured_image.is_none());
    }

    #[test]
    fn tutorial_requires_steps() {
        let raw = r#"{"title": "T", "steps": []}"#;
        assert_matches!(
            parse_generated_tutorial(raw),
            Err(AiError::InvalidResponse(_))
        );
    }

    #[test]
    fn tutorial_with_steps_parses() {
        let raw = r#"{
            "title": "Deploying Axum",
            "description": "Ship an axum app.",
            "difficulty": "intermediate",
            "estimated_time": "15 min",
            "steps": [
                {"title": "Build", "content": "cargo build --release"},
                {"title": "Run", "content": "./target/release/app"}
            ]
        }"#;
        let tutorial = parse_generated_tutorial(raw).unwrap();
        assert_eq!(tutorial.steps.len(), 2);
        assert_eq!(tutorial.steps[0].title, "Build");
    }
}
