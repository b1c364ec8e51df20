//! Authored question text parsing.
//!
//! Questions are written as numbered blocks, each closed by an answer line:
//!
//! ```text
//! 1. What is 2+2?
//! Answer: 4
//!
//! 2. Which planet is known as
//! the red planet?
//! Answer: Mars
//! ```
//!
//! The parser is a best-effort extractor. Malformed input degrades to partial
//! structure (leading noise dropped, missing answers left empty) instead of
//! failing. Checking that every question is complete is left to whoever
//! saves the drafts, see [`crate::RoundDraft::validate`].

use crate::types::QuestionDraft;

/// Keyword that closes a question block. Matched case-insensitively.
const ANSWER_KEYWORD: &str = "answer:";

/// Return the rest of the line if it starts with `<digits>.`.
fn strip_question_number(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix('.')
}

/// Return the rest of the line if it starts with `Answer:` in any case.
fn strip_answer_keyword(line: &str) -> Option<&str> {
    let head = line.get(..ANSWER_KEYWORD.len())?;
    if head.eq_ignore_ascii_case(ANSWER_KEYWORD) {
        Some(&line[ANSWER_KEYWORD.len()..])
    } else {
        None
    }
}

/// A question block that has not seen its answer line yet.
#[derive(Debug, Default)]
struct OpenBlock {
    lines: Vec<String>,
}

impl OpenBlock {
    fn start(first: &str) -> Self {
        Self {
            lines: vec![first.to_string()],
        }
    }

    fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// Close the block. Blank lines at either end of the text are dropped,
    /// blank lines in between are kept.
    fn finish(self, answer: &str) -> QuestionDraft {
        let text = self.lines.join("\n");
        QuestionDraft::new(text.trim(), answer)
    }
}

/// Converts authored text into question drafts and back.
#[derive(Debug, Clone, Default)]
pub struct QuestionTextParser;

impl QuestionTextParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse authored text into drafts, in document order.
    ///
    /// Every returned draft is marked as new; persistence identity is assigned
    /// by the data repository when the drafts are saved.
    pub fn parse(&self, text: &str) -> Vec<QuestionDraft> {
        let mut drafts = Vec::new();
        let mut open: Option<OpenBlock> = None;

        for raw in text.lines() {
            // Markers count only at the very start of a line, so indented
            // continuation lines stay question text.
            let raw = raw.trim_end();
            let line = raw.trim_start();

            if let Some(rest) = strip_question_number(raw) {
                if let Some(block) = open.take() {
                    log::trace!("question {} closed without an answer", drafts.len() + 1);
                    drafts.push(block.finish(""));
                }
                open = Some(OpenBlock::start(rest.trim()));
                continue;
            }

            // Outside a block everything is noise.
            if open.is_none() {
                continue;
            }

            if let Some(answer) = strip_answer_keyword(raw) {
                if let Some(block) = open.take() {
                    drafts.push(block.finish(answer.trim()));
                }
            } else if let Some(block) = open.as_mut() {
                block.push(line);
            }
        }

        if let Some(block) = open.take() {
            log::trace!("question {} closed by end of input", drafts.len() + 1);
            drafts.push(block.finish(""));
        }

        log::debug!("parsed {} question drafts", drafts.len());
        drafts
    }

    /// Serialize drafts to canonical authored text.
    ///
    /// Questions are renumbered from 1 and separated by a blank line.
    /// Continuation lines of a question are indented by one space so a line
    /// such as `2. Earth` inside the text is not read back as a new question.
    ///
    /// # Example output
    /// ```text
    /// 1. What is 2+2?
    /// Answer: 4
    ///
    /// 2. Rank by size:
    ///  1. Jupiter
    ///  2. Earth
    /// Answer: Jupiter, Earth
    /// ```
    pub fn serialize(&self, drafts: &[QuestionDraft]) -> String {
        drafts
            .iter()
            .enumerate()
            .map(|(i, draft)| {
                format!(
                    "{}. {}\nAnswer: {}",
                    i + 1,
                    draft.text.replace('\n', "\n "),
                    draft.answer
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Serialize drafts, adding a trailing newline when there is any output.
    pub fn serialize_with_newline(&self, drafts: &[QuestionDraft]) -> String {
        let text = self.serialize(drafts);
        if text.is_empty() {
            text
        } else {
            format!("{}\n", text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(drafts: &[QuestionDraft]) -> Vec<(&str, &str)> {
        drafts
            .iter()
            .map(|d| (d.text.as_str(), d.answer.as_str()))
            .collect()
    }

    #[test]
    fn test_parse_single_question() {
        let parser = QuestionTextParser::new();
        let drafts = parser.parse("1. What is 2+2?\nAnswer: 4");

        assert_eq!(pairs(&drafts), vec![("What is 2+2?", "4")]);
        assert!(drafts[0].is_new);
        assert_eq!(drafts[0].id, None);
    }

    #[test]
    fn test_parse_orphan_question_has_empty_answer() {
        let parser = QuestionTextParser::new();
        let drafts = parser.parse("1. Orphan question");

        assert_eq!(pairs(&drafts), vec![("Orphan question", "")]);
    }

    #[test]
    fn test_parse_multiline_question() {
        let parser = QuestionTextParser::new();
        let text = "1. Which planet is known as\n   the red planet?  \nAnswer:  Mars ";
        let drafts = parser.parse(text);

        assert_eq!(
            pairs(&drafts),
            vec![("Which planet is known as\nthe red planet?", "Mars")]
        );
    }

    #[test]
    fn test_parse_ignores_leading_noise() {
        let parser = QuestionTextParser::new();
        let text = "Round 3: Geography\nSome notes for the host\n\n1. Capital of Peru?\nAnswer: Lima";
        let drafts = parser.parse(text);

        assert_eq!(pairs(&drafts), vec![("Capital of Peru?", "Lima")]);
    }

    #[test]
    fn test_parse_answer_keyword_is_case_insensitive() {
        let parser = QuestionTextParser::new();
        let text = "1. One\nANSWER: a\n2. Two\nanswer:b\n3. Three\nAnSwEr: c";
        let drafts = parser.parse(text);

        assert_eq!(pairs(&drafts), vec![("One", "a"), ("Two", "b"), ("Three", "c")]);
    }

    #[test]
    fn test_parse_multiple_choice_lines_stay_in_text() {
        let parser = QuestionTextParser::new();
        let text = "1. Capital of France?\nA) Paris\nB) Lyon\nAnswer: A";
        let drafts = parser.parse(text);

        assert_eq!(
            pairs(&drafts),
            vec![("Capital of France?\nA) Paris\nB) Lyon", "A")]
        );
    }

    #[test]
    fn test_parse_numbered_line_closes_open_block() {
        let parser = QuestionTextParser::new();
        let drafts = parser.parse("1. First\n2. Second\nAnswer: two");

        assert_eq!(pairs(&drafts), vec![("First", ""), ("Second", "two")]);
    }

    #[test]
    fn test_parse_ignores_lines_between_blocks() {
        let parser = QuestionTextParser::new();
        let text = "1. First\nAnswer: one\nstray commentary\n\n2. Second\nAnswer: two";
        let drafts = parser.parse(text);

        assert_eq!(pairs(&drafts), vec![("First", "one"), ("Second", "two")]);
    }

    #[test]
    fn test_parse_answer_outside_block_is_ignored() {
        let parser = QuestionTextParser::new();
        let drafts = parser.parse("Answer: nothing\n1. Q\nAnswer: A");

        assert_eq!(pairs(&drafts), vec![("Q", "A")]);
    }

    #[test]
    fn test_parse_keeps_inner_blank_lines_and_drops_outer_ones() {
        let parser = QuestionTextParser::new();
        let drafts = parser.parse("1.\nFirst part\n\nSecond part\n\nAnswer: x");

        assert_eq!(pairs(&drafts), vec![("First part\n\nSecond part", "x")]);
    }

    #[test]
    fn test_parse_handles_crlf_and_multi_digit_numbers() {
        let parser = QuestionTextParser::new();
        let drafts = parser.parse("12. Twelve?\r\nAnswer: yes\r\n");

        assert_eq!(pairs(&drafts), vec![("Twelve?", "yes")]);
    }

    #[test]
    fn test_parse_empty_input() {
        let parser = QuestionTextParser::new();

        assert!(parser.parse("").is_empty());
        assert!(parser.parse("no numbered lines at all").is_empty());
    }

    #[test]
    fn test_serialize_renumbers_from_one() {
        let parser = QuestionTextParser::new();
        let drafts = vec![
            QuestionDraft::new("What is 2+2?", "4"),
            QuestionDraft::new("Capital of France?", "Paris"),
        ];

        assert_eq!(
            parser.serialize(&drafts),
            "1. What is 2+2?\nAnswer: 4\n\n2. Capital of France?\nAnswer: Paris"
        );
    }

    #[test]
    fn test_serialize_empty() {
        let parser = QuestionTextParser::new();

        assert_eq!(parser.serialize(&[]), "");
        assert_eq!(parser.serialize_with_newline(&[]), "");
    }

    #[test]
    fn test_serialize_with_trailing_newline() {
        let parser = QuestionTextParser::new();
        let result = parser.serialize_with_newline(&[QuestionDraft::new("Q", "A")]);

        assert_eq!(result, "1. Q\nAnswer: A\n");
    }

    #[test]
    fn test_round_trip_preserves_pairs() {
        let parser = QuestionTextParser::new();
        let drafts = vec![
            QuestionDraft::existing("q-1", "Which planet is known as\nthe red planet?", "Mars"),
            QuestionDraft::new("Capital of France? A) Paris B) Lyon", "A) Paris"),
            QuestionDraft::new("Name three primary colours.", "Red, yellow, blue"),
        ];

        let reparsed = parser.parse(&parser.serialize(&drafts));

        assert_eq!(pairs(&reparsed), pairs(&drafts));
    }

    #[test]
    fn test_round_trip_keeps_numbered_lines_in_text() {
        let parser = QuestionTextParser::new();
        let drafts = vec![
            QuestionDraft::new("Rank by size:\n1. Jupiter\n2. Earth", "Jupiter, Earth"),
            QuestionDraft::new("Complete the line:\nAnswer: the question", "42"),
        ];

        let text = parser.serialize(&drafts);
        assert!(text.starts_with("1. Rank by size:\n 1. Jupiter\n 2. Earth\nAnswer: Jupiter, Earth"));

        assert_eq!(pairs(&parser.parse(&text)), pairs(&drafts));
    }

    #[test]
    fn test_parse_indented_markers_are_text() {
        let parser = QuestionTextParser::new();
        let drafts = parser.parse("1. Order these:\n  2. second\n  Answer: not yet\nAnswer: done");

        assert_eq!(
            pairs(&drafts),
            vec![("Order these:\n2. second\nAnswer: not yet", "done")]
        );
    }

    #[test]
    fn test_round_trip_ignores_original_numbering() {
        let parser = QuestionTextParser::new();
        let authored = "7. Seventh\nAnswer: 7\n\n3. Third\nAnswer: 3";

        let canonical = parser.serialize(&parser.parse(authored));

        assert_eq!(canonical, "1. Seventh\nAnswer: 7\n\n2. Third\nAnswer: 3");
        assert_eq!(
            pairs(&parser.parse(&canonical)),
            vec![("Seventh", "7"), ("Third", "3")]
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// One line of question text, sometimes shaped like a marker.
        fn text_line_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                "[a-zA-Z][a-zA-Z0-9 ,?]{0,20}[a-zA-Z?]",
                "[0-9]{1,3}\\. [a-zA-Z]{1,10}",
                "[aA]nswer: [a-zA-Z0-9]{1,8}",
            ]
        }

        fn draft_strategy() -> impl Strategy<Value = QuestionDraft> {
            (
                prop::collection::vec(text_line_strategy(), 1..4),
                "[a-zA-Z0-9][a-zA-Z0-9 ,]{0,12}[a-zA-Z0-9]",
            )
                .prop_map(|(lines, answer)| QuestionDraft::new(lines.join("\n"), answer))
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_serialize_then_parse_preserves_pairs(
                drafts in prop::collection::vec(draft_strategy(), 0..6)
            ) {
                let parser = QuestionTextParser::new();
                let reparsed = parser.parse(&parser.serialize(&drafts));

                prop_assert_eq!(pairs(&reparsed), pairs(&drafts));
            }
        }
    }
}
