//! Forgiving normalization of raw form input.

use crate::bank::QuestionBank;
use crate::model::{AnswerMap, OptionLabel};

/// Keep the answers that normalize to a valid label, drop everything else.
///
/// Values are trimmed and uppercased. Fields that are not bank ids, or whose
/// value is not exactly one of `A`–`D` afterwards, are omitted; callers
/// detect incompleteness by comparing the result's length to
/// [`QuestionBank::question_count`].
pub fn sanitize<'a, I>(raw_form: I, bank: &QuestionBank) -> AnswerMap
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let raw: Vec<(&str, &str)> = raw_form.into_iter().collect();
    let mut sanitized = AnswerMap::new();

    for id in bank.ids() {
        // last occurrence wins when a field repeats
        let Some((_, value)) = raw.iter().rev().find(|(key, _)| *key == id) else {
            continue;
        };
        let answer = value.trim().to_uppercase();
        if let Ok(label) = answer.parse::<OptionLabel>() {
            sanitized.insert(id, label.as_str());
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn pairs(map: &HashMap<String, String>) -> impl Iterator<Item = (&str, &str)> {
        map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[test]
    fn drops_invalid_and_unknown_fields() {
        let form: HashMap<String, String> = [("q1", " b "), ("q2", "Z"), ("csrftoken", "xyz")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let bank = QuestionBank::builtin();
        let answers = sanitize(pairs(&form), bank);

        let expected: AnswerMap = [("q1", "B")].into_iter().collect();
        assert_eq!(answers, expected);
        assert_ne!(answers.len(), bank.question_count());
    }

    #[test]
    fn output_follows_bank_order() {
        let form = [("q3", "c"), ("q1", "a"), ("q2", "D")];
        let answers = sanitize(form, QuestionBank::builtin());
        let ids: Vec<&str> = answers.ids().collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
        assert_eq!(answers.get("q1"), Some("A"));
    }

    #[test]
    fn rejects_multi_char_and_empty_values() {
        let form = [("q1", "AB"), ("q2", ""), ("q3", "   "), ("q4", "\td\n")];
        let answers = sanitize(form, QuestionBank::builtin());
        let expected: AnswerMap = [("q4", "D")].into_iter().collect();
        assert_eq!(answers, expected);
    }

    #[test]
    fn complete_form_covers_bank() {
        let bank = QuestionBank::builtin();
        let form: Vec<(&str, &str)> = bank.ids().map(|id| (id, "a")).collect();
        let answers = sanitize(form, bank);
        assert_eq!(answers.len(), bank.question_count());
    }
}
