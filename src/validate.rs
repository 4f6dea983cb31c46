use crate::data::{Count, Error, DATE_FORMAT};
use chrono::NaiveDate;
use std::io::{BufRead, ErrorKind, Write};
use tracing::debug;

/// Parses a `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, Error> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| Error::InvalidDate(input.to_owned()))
}

/// Parses a whole, non-negative number, accepting the same range as the
/// store's columns. Fractions are rejected rather than truncated.
pub(crate) fn parse_count(input: &str) -> Result<Count, Error> {
    let input = input.trim();
    if let Ok(value) = input.parse::<Count>() {
        return Ok(value);
    }
    match input.strip_prefix('-') {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            if digits.bytes().all(|b| b == b'0') {
                Ok(0)
            } else {
                Err(Error::Negative(input.to_owned()))
            }
        }
        _ => Err(Error::InvalidNumber(input.to_owned())),
    }
}

/// Reads one line from `input`, or `None` once the input is exhausted.
pub(crate) fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}

/// Asks `prompt` until `parse` accepts the answer. Rejected answers print
/// the validation message and ask again, there's no limit on attempts.
/// Running out of input is reported as `UnexpectedEof`.
pub(crate) fn prompt_until<R, W, T>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, Error>,
) -> std::io::Result<T>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Err(ErrorKind::UnexpectedEof.into());
        };
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!("rejected input: {e}");
                writeln!(output, "{e}")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        data::Error,
        validate::{parse_count, parse_date, prompt_until},
    };
    use chrono::NaiveDate;
    use std::io::ErrorKind;

    #[test]
    fn dates() {
        assert_eq!(
            parse_date("2024-02-29"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert_eq!(
            parse_date(" 2024-03-01\n"),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(
            parse_date("2023-02-29"),
            Err(Error::InvalidDate("2023-02-29".to_owned()))
        );
        assert_eq!(
            parse_date("01/02/2024"),
            Err(Error::InvalidDate("01/02/2024".to_owned()))
        );
        assert!(parse_date("").is_err());
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count("0"), Ok(0));
        assert_eq!(parse_count(" 12000 "), Ok(12000));
        assert_eq!(parse_count("-1"), Err(Error::Negative("-1".to_owned())));
        assert_eq!(parse_count("-0"), Ok(0));
        assert_eq!(parse_count("18446744073709551615"), Ok(u64::MAX));
        assert_eq!(
            parse_count("18446744073709551616"),
            Err(Error::InvalidNumber("18446744073709551616".to_owned()))
        );
        assert_eq!(
            parse_count("-99999999999999999999"),
            Err(Error::Negative("-99999999999999999999".to_owned()))
        );
        assert_eq!(parse_count("-x"), Err(Error::InvalidNumber("-x".to_owned())));
        assert_eq!(parse_count("2.5"), Err(Error::InvalidNumber("2.5".to_owned())));
        assert_eq!(parse_count("ten"), Err(Error::InvalidNumber("ten".to_owned())));
    }

    #[test]
    fn reprompts_until_valid() {
        let mut input = &b"abc\n-3\n1.5\n42\n"[..];
        let mut output = Vec::new();
        let value = prompt_until(&mut input, &mut output, "Steps: ", parse_count).unwrap();
        assert_eq!(value, 42);
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Steps: ").count(), 4);
        assert_eq!(output.matches("Invalid input").count(), 3);
    }

    #[test]
    fn eof_while_prompting() {
        let mut input = &b"nope\n"[..];
        let mut output = Vec::new();
        let err = prompt_until(&mut input, &mut output, "Date: ", parse_date).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }
}
