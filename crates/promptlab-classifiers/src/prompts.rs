//! Prompt templates
//!
//! Every builder is a pure function of its inputs. The classification-style
//! builders all ask for the same JSON answer: a `Sentiment` drawn from the
//! caller's categories, a `Confidence` between 0 and 1 and an `Explanation`.

use crate::classifier::Categories;

/// Response format shared by the comparison strategies
const JSON_RESPONSE_FORMAT: &str = r#"Respond in JSON format with the keys:
    "Sentiment": one of the provided categories,
    "Confidence": a decimal number between 0 and 1,
    "Explanation": a brief explanation of your reasoning."#;

/// Worked examples prepended by the few-shot strategy: (text, sentiment, confidence, explanation)
const FEW_SHOT_EXAMPLES: [(&str, &str, &str, &str); 3] = [
    (
        "The service was excellent and the food was delightful.",
        "Positive",
        "0.95",
        "The words 'excellent' and 'delightful' indicate a strong positive sentiment.",
    ),
    (
        "I was disappointed by the long wait and poor service.",
        "Negative",
        "0.90",
        "The words 'disappointed' and 'poor service' convey dissatisfaction.",
    ),
    (
        "The experience was okay, nothing too special.",
        "Neutral",
        "0.75",
        "The phrase 'nothing too special' suggests an average or neutral sentiment.",
    ),
];

/// Minimal instruction followed by the response format
pub fn basic_prompt(text: &str, categories: &Categories) -> String {
    format!(
        "\nClassify the following text into one of these categories: {categories}.\n\n\
         {JSON_RESPONSE_FORMAT}\n\nText: {text}\n"
    )
}

/// Same contract as [`basic_prompt`] with a more formal instruction
pub fn structured_prompt(text: &str, categories: &Categories) -> String {
    format!(
        "\nPlease classify the text below into one of the following categories: {categories}.\n\n\
         {JSON_RESPONSE_FORMAT}\n\nText: {text}\n"
    )
}

/// Three worked examples, then the instruction for the quoted input
pub fn few_shot_prompt(text: &str, categories: &Categories) -> String {
    let mut prompt = String::from("\nBelow are some examples of text classification:\n");

    for (i, (example, sentiment, confidence, explanation)) in
        FEW_SHOT_EXAMPLES.iter().enumerate()
    {
        prompt.push_str(&format!(
            "\nExample {}:\nText: \"{example}\"\nResponse: {{\n    \
             \"Sentiment\": \"{sentiment}\",\n    \
             \"Confidence\": {confidence},\n    \"Explanation\": \"{explanation}\"\n}}\n",
            i + 1
        ));
    }

    prompt.push_str(&format!(
        "\nNow, classify the following text into one of these categories: {categories}.\n\n\
         Text: \"{text}\"\n\n{JSON_RESPONSE_FORMAT}\n"
    ));

    prompt
}

/// Prompt used by the gated classifier; spells out the exact JSON object
pub fn classification_prompt(text: &str, categories: &Categories) -> String {
    format!(
        "\nClassify the following text into exactly one of these categories: {categories}.\n\
         Respond in the following JSON format exactly:\n\n\
         {{\n    \"Sentiment\": \"[one of: {categories}]\",\n    \
         \"Confidence\": [a decimal number between 0 and 1],\n    \
         \"Explanation\": \"[A brief explanation]\"\n}}\n\n\
         Text to classify:\n{text}\n"
    )
}

/// Free-form content analysis report answering `question` about `text`
pub fn content_analysis_prompt(text: &str, question: &str) -> String {
    format!(
        "\n# Detailed Content Analysis Report\n\n\
         ## Task\n\
         Your role is to perform content analysis and classification.\n\
         Your task is to carefully evaluate the input text, determine its underlying intent,\n\
         and assign it to the most appropriate category as prompted by the question.\n\n\
         ## Input Text\n{text}\n\n\
         ## Question\n{question}\n\n\
         ## Response Format\n\
         Classification: [The appropriate category or classification]\n\
         Explanation: [A brief explanation of your reasoning]\n\n\
         ## Analysis\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Categories {
        Categories::new(["Spam", "Ham"]).unwrap()
    }

    fn asks_for_json_answer(prompt: &str) {
        assert!(prompt.contains("\"Sentiment\""));
        assert!(prompt.contains("\"Confidence\""));
        assert!(prompt.contains("\"Explanation\""));
        assert!(prompt.contains("between 0 and 1"));
    }

    #[test]
    fn test_basic_prompt() {
        let prompt = basic_prompt("Win a free cruise", &categories());
        assert!(prompt.contains("one of these categories: Spam, Ham."));
        assert!(prompt.contains("Text: Win a free cruise\n"));
        asks_for_json_answer(&prompt);
    }

    #[test]
    fn test_structured_prompt_is_more_formal() {
        let prompt = structured_prompt("Lunch at noon?", &categories());
        assert!(prompt.starts_with("\nPlease classify the text below"));
        assert!(prompt.contains("Spam, Ham"));
        assert_ne!(prompt, basic_prompt("Lunch at noon?", &categories()));
        asks_for_json_answer(&prompt);
    }

    #[test]
    fn test_few_shot_prompt_has_examples_before_task() {
        let prompt = few_shot_prompt("Meh.", &categories());

        for n in 1..=3 {
            assert!(prompt.contains(&format!("Example {n}:")));
        }
        assert!(prompt.contains("\"Confidence\": 0.90"));

        let last_example = prompt.find("Example 3:").unwrap();
        let task = prompt.find("Text: \"Meh.\"").unwrap();
        assert!(last_example < task);
        assert!(prompt.contains("Spam, Ham"));
        asks_for_json_answer(&prompt);
    }

    #[test]
    fn test_classification_prompt_lists_labels_in_template() {
        let prompt = classification_prompt("", &Categories::sentiment());
        assert!(prompt.contains("exactly one of these categories: Positive, Negative, Neutral."));
        assert!(prompt.contains("\"Sentiment\": \"[one of: Positive, Negative, Neutral]\""));
        assert!(prompt.ends_with("Text to classify:\n\n"));
    }

    #[test]
    fn test_content_analysis_prompt_sections() {
        let prompt = content_analysis_prompt("Refund my order now!", "What is the intent?");
        let sections = [
            "# Detailed Content Analysis Report",
            "## Task",
            "## Input Text\nRefund my order now!",
            "## Question\nWhat is the intent?",
            "## Response Format",
            "## Analysis",
        ];

        let mut last = 0;
        for section in sections {
            let pos = prompt.find(section).unwrap();
            assert!(pos >= last, "{section} out of order");
            last = pos;
        }
        assert!(prompt.contains("Classification: ["));
    }
}
