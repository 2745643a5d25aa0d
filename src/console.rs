//! Operator console: prompts on one stream, answers from another.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::error::ConsoleError;

/// Owns the input and output handles for an interactive session.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Read one line without its line terminator.
    pub fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Eof);
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Print `\t<label>: ` and read the answer.
    pub fn prompt(&mut self, label: &str) -> Result<String, ConsoleError> {
        write!(self.output, "\t{}: ", label)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt for a value that must not be blank. Surrounding whitespace is dropped.
    pub fn prompt_required(&mut self, field: &str, label: &str) -> Result<String, ConsoleError> {
        let answer = self.prompt(label)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ConsoleError::Invalid {
                field: field.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(answer.to_string())
    }

    /// Prompt and parse the answer as `T`.
    pub fn prompt_parsed<T>(&mut self, field: &str, label: &str) -> Result<T, ConsoleError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let answer = self.prompt(label)?;
        let answer = answer.trim();
        answer.parse::<T>().map_err(|e| ConsoleError::Invalid {
            field: field.to_string(),
            reason: format!("'{}' ({})", answer, e),
        })
    }

    /// Prompt for a whole number that is zero or more.
    pub fn prompt_count(&mut self, field: &str, label: &str) -> Result<i32, ConsoleError> {
        let value = self.prompt_parsed::<i32>(field, label)?;
        if value < 0 {
            return Err(ConsoleError::Invalid {
                field: field.to_string(),
                reason: format!("{} is negative", value),
            });
        }
        Ok(value)
    }

    /// Ask for a menu selection until an integer is entered.
    ///
    /// Non-integer answers, including lines that are not UTF-8, are reported
    /// and do not count as a selection.
    pub fn read_choice(&mut self) -> Result<i64, ConsoleError> {
        loop {
            write!(self.output, "Please make your choice: ")?;
            self.output.flush()?;

            let line = match self.read_line() {
                Ok(line) => line,
                // The offending bytes are already consumed
                Err(ConsoleError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                    writeln!(self.output, "Your input is invalid!")?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            match line.trim().parse::<i64>() {
                Ok(choice) => return Ok(choice),
                Err(_) => writeln!(self.output, "Your input is invalid!")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(console: &mut Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.output().clone()).unwrap()
    }

    #[test]
    fn test_read_line_strips_terminators() {
        let mut c = console("Boeing\r\n737\n");
        assert_eq!(c.read_line().unwrap(), "Boeing");
        assert_eq!(c.read_line().unwrap(), "737");
        assert!(matches!(c.read_line(), Err(ConsoleError::Eof)));
    }

    #[test]
    fn test_prompt_writes_label() {
        let mut c = console("Boeing\n");
        assert_eq!(c.prompt("Please enter the airplane make").unwrap(), "Boeing");
        assert_eq!(written(&mut c), "\tPlease enter the airplane make: ");
    }

    #[test]
    fn test_prompt_required_rejects_blank() {
        let mut c = console("   \n");
        let err = c.prompt_required("fullname", "Name").unwrap_err();
        assert!(matches!(err, ConsoleError::Invalid { ref field, .. } if field == "fullname"));
    }

    #[test]
    fn test_prompt_parsed_reports_bad_value() {
        let mut c = console("abc\n");
        let err = c.prompt_parsed::<i32>("age", "Age").unwrap_err();
        assert!(err.to_string().starts_with("Invalid value for age: 'abc'"));
    }

    #[test]
    fn test_prompt_parsed_reads_dates() {
        let mut c = console(" 2024-05-01 \n");
        let date = c.prompt_parsed::<chrono::NaiveDate>("departure date", "Date").unwrap();
        assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_prompt_count_rejects_negative() {
        let mut c = console("-4\n");
        assert!(c.prompt_count("seats", "Seats").is_err());
    }

    #[test]
    fn test_read_choice_reprompts_after_invalid_input() {
        let mut c = console("abc\n\n7\n");
        assert_eq!(c.read_choice().unwrap(), 7);

        let out = written(&mut c);
        assert_eq!(out.matches("Your input is invalid!").count(), 2);
        assert_eq!(out.matches("Please make your choice: ").count(), 3);
    }

    #[test]
    fn test_read_choice_reprompts_after_non_utf8_line() {
        let mut c = Console::new(Cursor::new(b"\xff\xfe\n7\n".to_vec()), Vec::new());
        assert_eq!(c.read_choice().unwrap(), 7);

        let out = written(&mut c);
        assert_eq!(out.matches("Your input is invalid!").count(), 1);
        assert_eq!(out.matches("Please make your choice: ").count(), 2);
    }

    #[test]
    fn test_read_choice_at_end_of_input() {
        let mut c = console("");
        assert!(matches!(c.read_choice(), Err(ConsoleError::Eof)));
    }
}
