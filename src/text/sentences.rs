//! Sentence boundary detection for extractive summaries.
//!
//! Punkt-style heuristics without a trained model:
//! 1. A run of `.`, `!` or `?` (plus closing quotes/brackets) followed by
//!    whitespace is a candidate boundary
//! 2. A single `.` after a title-like abbreviation ("Dr.", "e.g.") is not a
//!    boundary
//! 3. A single `.` after an abbreviation that may close a sentence ("etc.",
//!    "no.") is a boundary only when an uppercase letter follows
//! 4. Any other single `.` followed by a lowercase word is not a boundary
//!
//! Sentences are returned as trimmed slices of the input.

/// Abbreviations that precede a name, number or example and never end a sentence.
const NON_TERMINAL_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "vs", "e.g", "i.e", "cf", "fig", "figs", "vol",
    "pp", "ch", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov",
    "dec",
];

/// Abbreviations that often end a sentence as well as sitting inside one.
const SENTENCE_FINAL_ABBREVIATIONS: &[&str] = &[
    "etc", "no", "co", "al", "est", "sec", "st", "inc", "ltd", "corp", "approx", "dept", "u.s",
];

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

/// Split `text` into sentences, preserving their original wording.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        if !is_terminal(chars[i].1) {
            i += 1;
            continue;
        }

        let punct_start = i;
        let mut j = i;
        while j < chars.len() && is_terminal(chars[j].1) {
            j += 1;
        }
        let single_period = j - punct_start == 1 && chars[punct_start].1 == '.';
        while j < chars.len() && is_closing(chars[j].1) {
            j += 1;
        }

        // End of input: the remainder is flushed below.
        if j >= chars.len() {
            break;
        }
        if !chars[j].1.is_whitespace() {
            i = j;
            continue;
        }

        if single_period && !period_ends_sentence(text, start, chars[punct_start].0, &chars[j..])
        {
            i = j;
            continue;
        }

        let end = chars[j].0;
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = end;
        i = j;
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

/// Decide whether a lone period at byte `period_at` closes the sentence that
/// began at byte `start`. `following` starts at the whitespace after it.
fn period_ends_sentence(text: &str, start: usize, period_at: usize, following: &[(usize, char)]) -> bool {
    let word = text[start..period_at]
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    if NON_TERMINAL_ABBREVIATIONS.contains(&word.as_str()) {
        return false;
    }

    let next = following.iter().map(|&(_, c)| c).find(|c| !c.is_whitespace());
    if SENTENCE_FINAL_ABBREVIATIONS.contains(&word.as_str()) {
        return next.is_some_and(char::is_uppercase);
    }
    match next {
        Some(next) => !next.is_lowercase(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_basic_sentences() {
        let s = split_sentences("The system uses X. Method Y improves results. We conclude Z.");
        assert_eq!(
            s,
            vec![
                "The system uses X.",
                "Method Y improves results.",
                "We conclude Z."
            ]
        );
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("  \n\t ").is_empty());
    }

    #[test]
    fn test_no_terminal_punctuation() {
        assert_eq!(
            split_sentences("a heading without a period"),
            vec!["a heading without a period"]
        );
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let s = split_sentences("Dr. Smith reviewed it, e.g. the appendix. It passed.");
        assert_eq!(
            s,
            vec!["Dr. Smith reviewed it, e.g. the appendix.", "It passed."]
        );
    }

    #[test]
    fn test_sentence_final_abbreviation_splits_before_capital() {
        let s = split_sentences("Bring snacks, drinks, etc. The trip is long. Leave early.");
        assert_eq!(
            s,
            vec!["Bring snacks, drinks, etc.", "The trip is long.", "Leave early."]
        );
        let s = split_sentences("The answer is no. We move on.");
        assert_eq!(s, vec!["The answer is no.", "We move on."]);
    }

    #[test]
    fn test_sentence_final_abbreviation_inside_sentence() {
        assert_eq!(
            split_sentences("See no. 5 for details."),
            vec!["See no. 5 for details."]
        );
        assert_eq!(
            split_sentences("Smith et al. (2020) agree. Others do not."),
            vec!["Smith et al. (2020) agree.", "Others do not."]
        );
        assert_eq!(
            split_sentences("Pens, paper, etc. are provided."),
            vec!["Pens, paper, etc. are provided."]
        );
    }

    #[test]
    fn test_title_abbreviations_never_split() {
        let s = split_sentences("We met Mr. Brown and Prof. Lee. Fig. Two shows it.");
        assert_eq!(s, vec!["We met Mr. Brown and Prof. Lee.", "Fig. Two shows it."]);
    }

    #[test]
    fn test_lowercase_continuation_does_not_split() {
        let s = split_sentences("Results were fine. but not great. Overall ok.");
        assert_eq!(s, vec!["Results were fine. but not great.", "Overall ok."]);
    }

    #[test]
    fn test_decimals_and_question_marks() {
        let s = split_sentences("Is 3.14 enough? Yes! Use it.");
        assert_eq!(s, vec!["Is 3.14 enough?", "Yes!", "Use it."]);
    }

    #[test]
    fn test_closing_quotes_stay_with_sentence() {
        let s = split_sentences("He said \"stop.\" Then he left.");
        assert_eq!(s, vec!["He said \"stop.\"", "Then he left."]);
    }

    #[test]
    fn test_newlines_inside_sentence_are_kept() {
        let s = split_sentences("First line\ncontinues here. Next one.");
        assert_eq!(s, vec!["First line\ncontinues here.", "Next one."]);
    }
}
