use crate::model::step::{Action, Step};

/// Builds the prompts sent to the oracle.
/// This struct only formats text: no parsing, no networking.
pub struct PromptBuilder;

/// Worked examples embedded in the breakdown prompt.
const BREAKDOWN_EXAMPLES: &[(&str, &[(Action, &str)])] = &[
    (
        "Add 5 and 3, then translate 'hello' to German",
        &[
            (Action::Calculate, "add 5 and 3"),
            (Action::Translate, "hello"),
        ],
    ),
    (
        "Translate 'Good Morning' to Japanese",
        &[(Action::TranslateTo, "Good Morning to Japanese")],
    ),
    (
        "What is the capital of France?",
        &[(Action::Answer, "What is the capital of France?")],
    ),
    (
        "Multiply 4 and 6, then add 10 and 20",
        &[
            (Action::Calculate, "multiply 4 and 6"),
            (Action::Calculate, "add 10 and 20"),
        ],
    ),
    (
        "Translate 'Hello' to Spanish and add 5 and 3",
        &[
            (Action::TranslateTo, "Hello to Spanish"),
            (Action::Calculate, "add 5 and 3"),
        ],
    ),
];

impl PromptBuilder {
    pub fn build_breakdown(user_input: &str) -> String {
        let mut prompt = String::new();

        push_planner_rules(&mut prompt);
        push_action_types(&mut prompt);

        prompt.push_str(&format!("User input: \"{}\"\n\n", user_input));

        push_format_section(&mut prompt);
        push_examples(&mut prompt);

        prompt.push_str("Please break down the user's request into steps:");
        prompt
    }

    pub fn build_translation(text: &str, target_language: &str) -> String {
        format!(
            "Translate the following English text to {lang}.\n\
Provide only the {lang} translation, nothing else.\n\n\
English: \"{text}\"\n\
{lang}:",
            lang = target_language,
            text = text,
        )
    }
}

/// One line of the step grammar: `Step <n>: action: <action>, content: <content>`.
pub fn step_line(index: usize, action: Action, content: &str) -> String {
    format!("Step {}: action: {}, content: {}", index, action.label(), content)
}

/// Render steps in the grammar the parser accepts, one per line.
pub fn render_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| step_line(i + 1, step.action, &step.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_planner_rules(prompt: &mut String) {
    prompt.push_str(
        "You are an AI task planner. Your job is to break down the user's request into specific steps that can be executed by different tools.\n\n\
IMPORTANT: You should NOT execute the steps yourself. Only classify and break down the tasks.\n\n",
    );
}

fn push_action_types(prompt: &mut String) {
    prompt.push_str("Available action types:\n");
    for action in Action::ALL {
        prompt.push_str(&format!("- {}: {}\n", action.label(), action.description()));
    }
    prompt.push('\n');
}

fn push_format_section(prompt: &mut String) {
    prompt.push_str("Break this down into steps using the following format:\n");
    prompt.push_str("Step 1: action: <action_type>, content: <task or content>\n");
    prompt.push_str("Step 2: action: <action_type>, content: <task or content>\n");
    prompt.push_str("...\n\n");
}

fn push_examples(prompt: &mut String) {
    prompt.push_str("Examples:\n");
    for (request, steps) in BREAKDOWN_EXAMPLES {
        prompt.push_str(&format!("- For \"{}\":\n", request));
        for (i, (action, content)) in steps.iter().enumerate() {
            prompt.push_str("  ");
            prompt.push_str(&step_line(i + 1, *action, content));
            prompt.push('\n');
        }
        prompt.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_embeds_input_and_vocabulary() {
        let prompt = PromptBuilder::build_breakdown("Add 2 and 2");

        assert!(prompt.contains("User input: \"Add 2 and 2\""));
        for action in Action::ALL {
            assert!(prompt.contains(&format!("- {}: ", action.label())));
        }
        assert!(prompt.contains("should NOT execute the steps yourself"));
    }

    #[test]
    fn breakdown_carries_five_examples() {
        let prompt = PromptBuilder::build_breakdown("x");
        assert_eq!(prompt.matches("- For \"").count(), 5);
        assert!(prompt.contains("Step 1: action: translate_to, content: Good Morning to Japanese"));
    }

    #[test]
    fn translation_prompt_asks_for_translation_only() {
        let prompt = PromptBuilder::build_translation("Hello", "Spanish");
        assert!(prompt.contains("to Spanish"));
        assert!(prompt.contains("only the Spanish translation"));
        assert!(prompt.contains("English: \"Hello\""));
    }

    #[test]
    fn render_numbers_steps_from_one() {
        let steps = vec![
            Step::new(Action::Calculate, "add 1 and 2"),
            Step::new(Action::Answer, "why?"),
        ];
        assert_eq!(
            render_steps(&steps),
            "Step 1: action: calculate, content: add 1 and 2\nStep 2: action: answer, content: why?"
        );
    }
}
