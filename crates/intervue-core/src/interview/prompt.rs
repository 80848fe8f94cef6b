//! Prompt builder for the mock-interview orchestrator.
//!
//! Assembles the full prompt sequence sent to the LLM: a system instruction
//! synthesized from the session context, the conversation history, the new
//! user turn, and up to two synthetic turns carrying the problem details
//! and the candidate's current code.

use intervue_types::chat::{ChatMessage, InterviewContext, QuestionContext};
use intervue_types::llm::PromptMessage;

/// How many worked examples the synthetic problem-context turn includes.
/// The system instruction references only the first one.
const PROMPT_EXAMPLE_LIMIT: usize = 2;

/// Builds the prompt sequence for one interviewer exchange.
///
/// Layout:
/// ```text
/// [system]    interviewer persona + session context + problem summary
/// [history]   prior session messages, in order, roles preserved
/// [user]      the new user message
/// [user]      "Problem context: ..." (only when a question is supplied)
/// [user]      "Current code I'm working on: ..." (only when code is supplied)
/// ```
pub struct InterviewPromptBuilder;

impl InterviewPromptBuilder {
    /// Build the complete prompt sequence for a generation request.
    ///
    /// `history` is the session's message list BEFORE the new user turn was
    /// appended, so every turn appears exactly once.
    pub fn build(
        context: &InterviewContext,
        history: &[ChatMessage],
        user_text: &str,
        question: Option<&QuestionContext>,
        code: Option<&str>,
    ) -> Vec<PromptMessage> {
        let mut messages = Vec::with_capacity(history.len() + 4);

        messages.push(PromptMessage::system(Self::system_prompt(context, question)));

        for msg in history {
            messages.push(PromptMessage {
                role: msg.role,
                content: msg.content.clone(),
            });
        }

        messages.push(PromptMessage::user(user_text));

        if let Some(question) = question {
            if let Some(details) = Self::problem_context_turn(question) {
                messages.push(PromptMessage::user(details));
            }
        }

        if let Some(code) = code {
            messages.push(PromptMessage::user(Self::code_context_turn(
                code,
                &context.programming_language,
            )));
        }

        messages
    }

    /// Synthesize the system instruction from the session context.
    ///
    /// When a question is present the instruction carries a short problem
    /// summary: title and difficulty, category if set, the number of
    /// examples with the first one spelled out as a sample, and the
    /// constraint and hint counts. The full enumerations travel in the
    /// separate problem-context turn.
    pub fn system_prompt(context: &InterviewContext, question: Option<&QuestionContext>) -> String {
        let mut prompt = format!(
            "You are an experienced technical interviewer conducting a mock interview.\n\
             \n\
             Current context:\n\
             - Question {} of {}\n\
             - Programming language: {}\n\
             - Interview type: {}",
            context.question_number,
            context.total_questions,
            context.programming_language,
            context.interview_type,
        );

        if let Some(question) = question {
            prompt.push_str(&format!(
                "\n\nCurrent Problem: {} ({})",
                question.title, question.difficulty
            ));

            if let Some(category) = &question.category {
                prompt.push_str(&format!("\n- Category: {category}"));
            }

            if let Some(examples) = question.examples.as_deref().filter(|e| !e.is_empty()) {
                prompt.push_str(&format!(
                    "\n- Examples available: {} test cases",
                    examples.len()
                ));
                let first = &examples[0];
                prompt.push_str(&format!(
                    "\n- Sample: Input {} → Output {}",
                    first.input, first.output
                ));
            }

            if let Some(constraints) = question.constraints.as_deref().filter(|c| !c.is_empty()) {
                prompt.push_str(&format!(
                    "\n- Key constraints: {} requirements to consider",
                    constraints.len()
                ));
            }

            if let Some(hints) = question.hints.as_deref().filter(|h| !h.is_empty()) {
                prompt.push_str(&format!(
                    "\n- Available hints: {} strategic hints (use sparingly when stuck)",
                    hints.len()
                ));
            }
        }

        prompt.push_str(
            "\n\nYour role:\n\
             1. Ask clarifying questions about the problem\n\
             2. Guide the candidate through their thought process\n\
             3. Reference specific examples and constraints when relevant\n\
             4. Provide hints if they're stuck (but don't give away the solution)\n\
             5. Comment on their approach and suggest improvements\n\
             6. Ask about time/space complexity\n\
             7. Be encouraging but honest about their performance\n\
             \n\
             Communication style:\n\
             - Be conversational and supportive\n\
             - Ask one question at a time\n\
             - Keep responses concise (2-3 sentences typically)\n\
             - Reference specific examples when helpful (\"Looking at the example where...\")\n\
             - Mention constraints when relevant (\"Remember the constraint that...\")\n\
             - Use problem category to guide suggestions (e.g., \"This is an Arrays problem - consider...\")\n\
             - If they're coding, focus on their approach and logic\n\
             - If it's a behavioral question, use the STAR method for evaluation\n\
             \n\
             Remember: You're helping them practice, so be constructive and educational. \
             Use the problem's examples, constraints, and hints strategically to provide \
             targeted guidance.",
        );

        prompt
    }

    /// Build the synthetic "problem context" turn.
    ///
    /// Enumerates up to the first two examples, every constraint, and every
    /// hint. Returns `None` when the question carries none of those, so the
    /// caller skips the turn entirely.
    pub fn problem_context_turn(question: &QuestionContext) -> Option<String> {
        let mut details: Vec<String> = Vec::new();

        if let Some(examples) = question.examples.as_deref().filter(|e| !e.is_empty()) {
            details.push("Problem examples:".to_string());
            for (i, example) in examples.iter().take(PROMPT_EXAMPLE_LIMIT).enumerate() {
                details.push(format!(
                    "Example {}: Input {} → Output {}",
                    i + 1,
                    example.input,
                    example.output
                ));
                if let Some(explanation) = &example.explanation {
                    details.push(format!("Explanation: {explanation}"));
                }
            }
        }

        if let Some(constraints) = question.constraints.as_deref().filter(|c| !c.is_empty()) {
            details.push("Constraints:".to_string());
            for constraint in constraints {
                details.push(format!("- {constraint}"));
            }
        }

        if let Some(hints) = question.hints.as_deref().filter(|h| !h.is_empty()) {
            details.push("Available hints (use strategically):".to_string());
            for (i, hint) in hints.iter().enumerate() {
                details.push(format!("Hint {}: {hint}", i + 1));
            }
        }

        if details.is_empty() {
            return None;
        }

        Some(format!("Problem context:\n{}", details.join("\n")))
    }

    /// Build the synthetic turn embedding the candidate's current code,
    /// fenced and tagged with the session's programming language.
    pub fn code_context_turn(code: &str, language: &str) -> String {
        format!("Current code I'm working on:\n```{language}\n{code}\n```")
    }
}
