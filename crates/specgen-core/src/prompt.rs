use crate::types::GenerationRequest;

const PREAMBLE: &str = "You are a product manager and engineering lead. Based on the following \
feature idea, generate a comprehensive list of user stories and engineering tasks. Return the \
result as a JSON object with exactly two keys: \"userStories\" and \"engineeringTasks\". Each is \
an array of objects with a \"title\" string field and a \"description\" string field.";

const CLOSING: &str = "Return ONLY valid JSON, no markdown formatting or code blocks.";

/// Build the single instruction sent upstream. Fields are embedded verbatim.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut out = String::with_capacity(PREAMBLE.len() + CLOSING.len() + 256);
    out.push_str(PREAMBLE);
    out.push_str("\n\nFeature Idea:\n");
    out.push_str(&format!("Goal: {}\n", request.goal));
    out.push_str(&format!("Users: {}\n", request.users));
    out.push_str(&format!("Constraints: {}\n", request.constraints));
    if let Some(risks) = request.risks() {
        out.push_str(&format!("Risks: {risks}\n"));
    }
    out.push('\n');
    out.push_str(CLOSING);
    out
}
