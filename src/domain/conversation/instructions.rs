//! Fixed system instructions sent ahead of every chat completion.

/// Persona and style guide for the dissertation assistant.
pub const DISSERTATION_PERSONA: &str = "\
You are a dissertation assistant that helps students plan and draft dissertations in clear, plain English.
Your tasks include:
- Asking the user for their **research topic**, **number of pages**, and **country**.
- Once these details are provided, generate a clear and concise **dissertation proposal**.
- After the proposal, generate **three strong research questions** that match the topic.
- Wait for the user to confirm the research questions. If they agree, proceed to draft the **dissertation**.
- The dissertation should be formatted with:
  - **Harvard referencing style** (in-text citations)
  - A mix of **local references** (from the user's country) and **international references**.
- The writing must be original, in **plain English**, and must **not use dashes** in the text.
- The tone should sound natural and conversational, but maintain academic formality where appropriate.
Ask the user:
1. What is your **research topic**?
2. How many **pages** do you need?
3. Which **country** are you from (for references)?

Once you have this information, proceed step-by-step:
1. Generate the **proposal**.
2. Generate **three research questions**.
3. Wait for user confirmation.
4. If the user agrees, draft the **full dissertation**, in plain English, with in-text citations, Harvard style, using local and foreign sources based on the country.
";

/// Extra instruction used when image generation is enabled.
pub const IMAGE_DIRECTIVE_INSTRUCTION: &str = "\
When a figure, diagram or illustration would help the reader, describe it in one sentence \
wrapped in double curly braces, for example {{a bar chart comparing renewable energy adoption \
in Kenya and Germany}}. Use at most one such description per reply and do not explain the braces.";

/// Ordered system messages placed at the start of every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInstructions {
    messages: Vec<String>,
}

impl SystemInstructions {
    /// Builds instructions from explicit messages.
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    /// The dissertation persona on its own.
    pub fn dissertation() -> Self {
        Self::new(vec![DISSERTATION_PERSONA.to_string()])
    }

    /// Appends the image directive instruction.
    pub fn with_image_directives(mut self) -> Self {
        self.messages.push(IMAGE_DIRECTIVE_INSTRUCTION.to_string());
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for SystemInstructions {
    fn default() -> Self {
        Self::dissertation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dissertation_has_single_persona_message() {
        let instructions = SystemInstructions::dissertation();
        assert_eq!(instructions.len(), 1);
        assert!(instructions.messages()[0].contains("Harvard referencing style"));
    }

    #[test]
    fn image_directives_add_second_message() {
        let instructions = SystemInstructions::dissertation().with_image_directives();
        assert_eq!(instructions.len(), 2);
        assert!(instructions.messages()[1].contains("{{"));
    }
}
