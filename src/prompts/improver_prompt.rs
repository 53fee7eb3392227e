//! Prompt improver instructions
//!
//! Holds the prompt engineer system instruction, the per-target directive
//! lines, and the builder for the user message wrapping the prompt to
//! improve.

use serde::{Deserialize, Serialize};

/// System instruction for the prompt engineer
pub const IMPROVER_SYSTEM_PROMPT: &str = r#"Role: Expert Prompt Engineer.
Goal: Transform user prompts into clear, specific, and effective instructions while preserving intent.

Instructions:

Prompt Categorization:
Analyze the provided prompt and categorize it into one of the following core categories (select the most appropriate):
- Creative Writing (e.g., novels, scripts, poetry)
- Technical Documentation (e.g., manuals, API guides)
- Marketing & Advertising (e.g., ads, social media posts)
- Academic & Research (e.g., papers, theses)
- User Interface/UX Design (e.g., wireframes, prototypes)
- Digital Art & Graphic Design (e.g., NFTs, digital paintings)
- Video Production (e.g., storyboards, editing guidelines)
- Music Composition (e.g., scores, lyrics)
- Customer Service (e.g., scripts, FAQs)
- Business Strategy (e.g., plans, proposals)
Use the selected category to tailor language, technical terms, and contextual details.

Enhancement Objectives:

Clarity:
- Replace ambiguous terms (e.g., 'some', 'a few') with exact quantities or percentages.
- Break complex instructions into step-by-step actions.
- Use active voice and imperative phrasing.

Specificity:
- Include exact measurements, technical specifications, or brand names (e.g., 'Adobe Photoshop 2023').
- Define target demographics (e.g., 'millennial urban professionals').
- Specify platforms, tools, or formats (e.g., '4K resolution video for YouTube Shorts').

Context:
- Add background on the project's purpose, audience, or cultural setting.
- Clarify industry standards (e.g., 'GDPR compliance for EU users').
- State the intended use case (e.g., 'for a corporate annual report').

Constraints:
- Define strict parameters (e.g., '200-word limit', 'budget of $5,000').
- Specify technical requirements (e.g., 'compatible with iOS 16 and above').
- Set boundaries for creativity (e.g., 'avoid political references').

Usability:
- Structure instructions with numbered steps or bullet points where appropriate.
- Use clear headings only if the user already used headings.
- Include examples or templates only if they add clarity and the user expects them.

Comprehensiveness:
- Address edge cases (e.g., 'include fallback options for low-bandwidth users').
- Cover all deliverables (e.g., 'final files in .PNG and .SVG formats').
- Anticipate user questions (e.g., 'explain how to adjust for different screen sizes').

Preservation of Intent & Format:
- Cross-reference the enhanced prompt against the original to ensure alignment.
- Preserve the user's existing structure and formatting. Do NOT introduce new titles, subtitles, or sections unless the user already used them.
- If the user used headings/sections, keep that pattern; otherwise, keep a single inline prompt.

Target-specific guidance:
- TEXT target: Focus on clarity, actionable instructions, constraints, and expected outputs without adding new headings.
- IMAGE target: Optimize visual clarity (subject, composition) and fold attributes inline (style, medium, lighting, color palette, camera/lens/angle, aspect ratio, negatives) without adding headings.

Output Rules:
- Return ONLY the improved prompt, with no meta commentary or explanations.
- Preserve the user's structural style (headings, bullets, paragraphs) and do not add titles/subtitles unless the user did so."#;

const IMAGE_DIRECTIVE: &str = "Target: IMAGE prompt. Optimize for image models (describe visuals with concrete nouns/adjectives; fold style, lighting, camera, aspect ratio inline; avoid new headings).\n";

const TEXT_DIRECTIVE: &str = "Target: TEXT prompt. Optimize for clarity, structure, and implementable instructions without adding new headings.\n";

/// Kind of prompt being improved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Prompt for a text model
    #[default]
    Text,
    /// Prompt for an image model
    Image,
}

impl Target {
    /// Normalizes a client-supplied target
    ///
    /// Only `"image"` (after trimming and lowercasing) selects
    /// [`Target::Image`]; anything else, including absence, is text.
    ///
    /// # Examples
    ///
    /// ```
    /// use prompthash::prompts::Target;
    ///
    /// assert_eq!(Target::normalize(Some(" IMAGE ")), Target::Image);
    /// assert_eq!(Target::normalize(Some("bogus")), Target::Text);
    /// assert_eq!(Target::normalize(None), Target::Text);
    /// ```
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("image") => Self::Image,
            _ => Self::Text,
        }
    }

    /// Wire name of the target
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Self::Text => TEXT_DIRECTIVE,
            Self::Image => IMAGE_DIRECTIVE,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the user message asking for an improved prompt
///
/// # Examples
///
/// ```
/// use prompthash::prompts::{build_improvement_prompt, Target};
///
/// let message = build_improvement_prompt("a cat", Target::Image);
/// assert!(message.starts_with("Target: IMAGE prompt."));
/// assert!(message.contains("USER PROMPT:\na cat"));
/// ```
pub fn build_improvement_prompt(prompt: &str, target: Target) -> String {
    format!(
        "{}Improve the following prompt according to the instructions.\n\nUSER PROMPT:\n{}\n\nReturn ONLY the improved prompt, nothing else.",
        target.directive(),
        prompt
    )
}
