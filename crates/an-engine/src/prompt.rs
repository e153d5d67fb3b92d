use an_core::{CommentStyle, Language, Message};

const SYSTEM_PROMPT: &str = "You are a code documentation expert. Generate concise, accurate comments for code blocks.
Rules:
- Be brief but informative
- Focus on the \"why\" not the \"what\"
- Use the specified comment style
- Return ONLY the comment text, no code
- Do not include comment delimiters (like // or /* */)
- Maximum 1-2 sentences for simple functions
- Maximum 3-4 sentences for complex logic";

/// Everything the provider is told about one unit.
#[derive(Debug, Clone)]
pub struct CommentTarget<'a> {
    pub language: Language,
    pub file_name: &'a str,
    pub code: &'a str,
    pub context: &'a str,
    pub imports: &'a str,
    pub style: CommentStyle,
}

/// Build the two-message conversation asking for a comment on `target`.
pub fn build_comment_prompt(target: &CommentTarget<'_>) -> Vec<Message> {
    let mut user = format!(
        "Language: {}\nFile: {}\nComment Style: {}\n",
        target.language.name(),
        target.file_name,
        target.style,
    );
    if !target.imports.is_empty() {
        user.push_str(&format!("\nImports:\n{}\n", target.imports));
    }
    user.push_str(&format!(
        "\nContext:\n{}\n\nTarget Code:\n{}\n\nGenerate a comment for the target code:",
        target.context, target.code,
    ));

    vec![Message::system(SYSTEM_PROMPT), Message::user(user)]
}
