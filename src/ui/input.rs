/// Console input reader.
///
/// Reads stdin (or any `BufRead`) as a stream of whitespace-separated
/// pieces rather than whole lines:
///   - Commands are single non-whitespace characters, so `pq` on one
///     line runs `p` and then `q`.
///   - An answer is four integers, which may span several lines.
///   - Whatever follows an answer on its line stays buffered and is read
///     as the next command(s).
///
/// Malformed answers are reported to the caller; the reader never
/// retries on its own.

use std::io::{self, BufRead};

use crate::domain::round::{Answer, QUESTION_LEN};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadAnswer {
    Complete(Answer),
    /// First token that did not parse as an integer.
    Malformed(String),
    /// Input ended before four integers arrived.
    Eof,
}

pub struct InputReader<R> {
    reader: R,
    /// Raw bytes of the current line; invalid UTF-8 is decoded lossily.
    bytes: Vec<u8>,
    /// Current line, including its newline.
    line: String,
    /// Byte offset of the first unread character in `line`.
    pos: usize,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(reader: R) -> Self {
        InputReader {
            reader,
            bytes: Vec::with_capacity(64),
            line: String::with_capacity(64),
            pos: 0,
        }
    }

    /// Next command character, or `None` at end of input.
    pub fn next_command(&mut self) -> io::Result<Option<char>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }
        let ch = self.line[self.pos..].chars().next();
        if let Some(c) = ch {
            self.pos += c.len_utf8();
        }
        Ok(ch)
    }

    /// Read four integers.
    pub fn next_answer(&mut self) -> io::Result<ReadAnswer> {
        let mut answer: Answer = [0; QUESTION_LEN];
        for slot in answer.iter_mut() {
            let token = match self.next_token()? {
                Some(t) => t,
                None => return Ok(ReadAnswer::Eof),
            };
            match token.parse::<i32>() {
                Ok(v) => *slot = v,
                Err(_) => return Ok(ReadAnswer::Malformed(token)),
            }
        }
        Ok(ReadAnswer::Complete(answer))
    }

    /// Drop whatever is left of the current line.
    pub fn discard_line(&mut self) {
        self.pos = self.line.len();
    }

    // ── Internal ──

    fn next_token(&mut self) -> io::Result<Option<String>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }
        let rest = &self.line[self.pos..];
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = rest[..len].to_string();
        self.pos += len;
        Ok(Some(token))
    }

    /// Advance past whitespace, pulling new lines as needed.
    /// Returns false at end of input.
    fn skip_whitespace(&mut self) -> io::Result<bool> {
        loop {
            let rest = &self.line[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if !trimmed.is_empty() {
                return Ok(true);
            }
            if !self.fill()? {
                return Ok(false);
            }
        }
    }

    fn fill(&mut self) -> io::Result<bool> {
        self.bytes.clear();
        self.pos = 0;
        let n = self.reader.read_until(b'\n', &mut self.bytes)?;
        self.line = String::from_utf8_lossy(&self.bytes).into_owned();
        Ok(n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(text: &str) -> InputReader<&[u8]> {
        InputReader::new(text.as_bytes())
    }

    #[test]
    fn commands_are_single_characters() {
        let mut r = reader("pq\n  s\n\nm");
        assert_eq!(r.next_command().unwrap(), Some('p'));
        assert_eq!(r.next_command().unwrap(), Some('q'));
        assert_eq!(r.next_command().unwrap(), Some('s'));
        assert_eq!(r.next_command().unwrap(), Some('m'));
        assert_eq!(r.next_command().unwrap(), None);
    }

    #[test]
    fn empty_input_is_eof() {
        let mut r = reader("");
        assert_eq!(r.next_command().unwrap(), None);
        assert_eq!(r.next_answer().unwrap(), ReadAnswer::Eof);
    }

    #[test]
    fn answer_on_one_line() {
        let mut r = reader("-3 0 7 12\n");
        assert_eq!(r.next_answer().unwrap(), ReadAnswer::Complete([-3, 0, 7, 12]));
    }

    #[test]
    fn answer_across_lines() {
        let mut r = reader("1 2\n\n3\n   4\n");
        assert_eq!(r.next_answer().unwrap(), ReadAnswer::Complete([1, 2, 3, 4]));
    }

    #[test]
    fn answer_after_command_on_same_line() {
        let mut r = reader("p 4 5 6 7 s\n");
        assert_eq!(r.next_command().unwrap(), Some('p'));
        assert_eq!(r.next_answer().unwrap(), ReadAnswer::Complete([4, 5, 6, 7]));
        assert_eq!(r.next_command().unwrap(), Some('s'));
    }

    #[test]
    fn malformed_token_is_reported() {
        let mut r = reader("1 two 3 4\nq\n");
        assert_eq!(r.next_answer().unwrap(), ReadAnswer::Malformed("two".into()));
        r.discard_line();
        assert_eq!(r.next_command().unwrap(), Some('q'));
    }

    #[test]
    fn comma_separated_answer_is_malformed() {
        let mut r = reader("1, 2, 3, 4\n");
        assert_eq!(r.next_answer().unwrap(), ReadAnswer::Malformed("1,".into()));
    }

    #[test]
    fn invalid_utf8_becomes_a_replacement_char() {
        let mut r = InputReader::new(&b"\xff\nq\n"[..]);
        assert_eq!(r.next_command().unwrap(), Some(char::REPLACEMENT_CHARACTER));
        assert_eq!(r.next_command().unwrap(), Some('q'));
    }

    #[test]
    fn invalid_utf8_in_answer_is_malformed() {
        let mut r = InputReader::new(&b"1 2 \xfe 4\n"[..]);
        assert_eq!(r.next_answer().unwrap(), ReadAnswer::Malformed("\u{fffd}".into()));
    }

    #[test]
    fn short_answer_hits_eof() {
        let mut r = reader("1 2 3");
        assert_eq!(r.next_answer().unwrap(), ReadAnswer::Eof);
    }
}
