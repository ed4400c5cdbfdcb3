//! Line-oriented console I/O for the interactive session

use std::io::{self, BufRead, Write};

pub trait Console {
    /// Print `prompt` and read one line without its line ending.
    /// `None` means input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn write_line(&mut self, text: &str);
}

/// Console reading lines from `input` (stdin by default) and printing to stdout
pub struct StdConsole<R = io::StdinLock<'static>> {
    input: R,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> StdConsole<R> {
    #[cfg(test)]
    pub fn from_reader(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Console for StdConsole<R> {
    /// Bytes that are not valid UTF-8 are replaced rather than failing the read.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&line);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write_line(&mut self, text: &str) {
        println!("{text}");
    }
}


#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn lines_are_read_without_their_endings() {
        let mut console = StdConsole::from_reader(Cursor::new(b"1, 2\r\nclear\n".to_vec()));
        assert_eq!(console.read_line("").unwrap().as_deref(), Some("1, 2"));
        assert_eq!(console.read_line("").unwrap().as_deref(), Some("clear"));
        assert_eq!(console.read_line("").unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_an_error() {
        let mut console = StdConsole::from_reader(Cursor::new(b"\xff\xfe2\n3\n".to_vec()));
        assert_eq!(
            console.read_line("").unwrap().as_deref(),
            Some("\u{FFFD}\u{FFFD}2")
        );
        assert_eq!(console.read_line("").unwrap().as_deref(), Some("3"));
    }
}
