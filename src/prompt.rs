//! Question and answer collaborator used by the walkthrough.

use crate::error::Result;

use dialoguer::{Confirm, Input};
use rust_decimal::Decimal;
use std::{fmt, ops::RangeInclusive};

/// Asks the user for values.
pub trait Prompter {
    /// Free text answer.
    fn text(&mut self, prompt: &str) -> Result<String>;
    /// Whole number inside `range`.
    fn integer(&mut self, prompt: &str, range: RangeInclusive<i32>) -> Result<i32>;
    /// Decimal number inside `range`.
    fn decimal(&mut self, prompt: &str, range: RangeInclusive<Decimal>) -> Result<Decimal>;
    /// Yes or no.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

fn check_range<T: PartialOrd + fmt::Display>(
    value: &T,
    range: &RangeInclusive<T>,
) -> std::result::Result<(), String> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(format!(
            "enter a value between {} and {}",
            range.start(),
            range.end()
        ))
    }
}

/// Prompts on the terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn text(&mut self, prompt: &str) -> Result<String> {
        let answer = Input::<String>::new().with_prompt(prompt).interact_text()?;
        Ok(answer)
    }

    fn integer(&mut self, prompt: &str, range: RangeInclusive<i32>) -> Result<i32> {
        let answer = Input::<i32>::new()
            .with_prompt(format!("{prompt} ({}-{})", range.start(), range.end()))
            .validate_with(|value: &i32| check_range(value, &range))
            .interact_text()?;
        Ok(answer)
    }

    fn decimal(&mut self, prompt: &str, range: RangeInclusive<Decimal>) -> Result<Decimal> {
        let answer = Input::<Decimal>::new()
            .with_prompt(format!("{prompt} ({}-{})", range.start(), range.end()))
            .validate_with(|value: &Decimal| check_range(value, &range))
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}

/// Replays canned answers.
#[cfg(test)]
pub(crate) mod scripted {
    use super::*;

    use std::collections::VecDeque;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Answer {
        Text(&'static str),
        Integer(i32),
        Decimal(Decimal),
        Confirm(bool),
    }

    #[derive(Debug, Default)]
    pub(crate) struct ScriptedPrompter {
        answers: VecDeque<Answer>,
        pub(crate) asked: Vec<String>,
    }

    impl ScriptedPrompter {
        pub(crate) fn new(answers: Vec<Answer>) -> Self {
            Self {
                answers: answers.into(),
                asked: Vec::new(),
            }
        }

        pub(crate) fn is_exhausted(&self) -> bool {
            self.answers.is_empty()
        }

        fn next(&mut self, prompt: &str) -> Answer {
            self.asked.push(prompt.to_string());
            self.answers
                .pop_front()
                .unwrap_or_else(|| panic!("no answer left for {prompt:?}"))
        }
    }

    impl Prompter for ScriptedPrompter {
        fn text(&mut self, prompt: &str) -> Result<String> {
            match self.next(prompt) {
                Answer::Text(text) => Ok(text.to_string()),
                other => panic!("{prompt:?} expects text, scripted {other:?}"),
            }
        }

        fn integer(&mut self, prompt: &str, range: RangeInclusive<i32>) -> Result<i32> {
            match self.next(prompt) {
                Answer::Integer(value) if range.contains(&value) => Ok(value),
                other => panic!("{prompt:?} expects an integer in {range:?}, scripted {other:?}"),
            }
        }

        fn decimal(&mut self, prompt: &str, range: RangeInclusive<Decimal>) -> Result<Decimal> {
            match self.next(prompt) {
                Answer::Decimal(value) if range.contains(&value) => Ok(value),
                other => panic!("{prompt:?} expects a decimal in {range:?}, scripted {other:?}"),
            }
        }

        fn confirm(&mut self, prompt: &str) -> Result<bool> {
            match self.next(prompt) {
                Answer::Confirm(value) => Ok(value),
                other => panic!("{prompt:?} expects a confirmation, scripted {other:?}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::inside(2015, true)]
    #[case::lower_bound(2010, true)]
    #[case::upper_bound(2020, true)]
    #[case::below(2009, false)]
    #[case::above(2021, false)]
    fn test_check_range(#[case] value: i32, #[case] accepted: bool) {
        assert_eq!(check_range(&value, &(2010..=2020)).is_ok(), accepted);
    }

    #[test]
    fn test_check_range_message() {
        let err = check_range(&Decimal::new(11, 0), &(Decimal::ONE..=Decimal::TEN)).unwrap_err();
        assert_eq!(err, "enter a value between 1 and 10");
    }
}
