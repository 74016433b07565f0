//! LLM prompt construction for field extraction

/// Fields the model is asked to fill
pub const FIELDS: [&str; 4] = ["name", "age", "city", "major"];

/// System instruction sent with every extraction request
pub const SYSTEM_INSTRUCTION: &str = "You are a JSON generator.\n\
You must output valid strict JSON only.\n\
Do not include markdown, comments, or extra text.";

/// Builds the user prompt for one extraction request
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder for `text`
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete user prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str("Extract the following fields from the text.\n");
        prompt.push_str("Return JSON only.\n\n");

        prompt.push_str("Fields:\n");
        for field in FIELDS {
            prompt.push_str(&format!("- {}\n", field));
        }
        prompt.push('\n');

        prompt.push_str("Text:\n");
        prompt.push_str(self.text);
        prompt.push('\n');

        prompt
    }
}
