// report.rs - Human-readable rendering of a match result.
//
//   pattern: ab#
//              ^ 2
//   data:    abx
//              ^ mismatch 2
//
// Non-printable bytes are shown escaped; long data is cut to a window
// around the marked position.

use std::fmt;

use crate::lexexec::LexResult;

/// Widest data excerpt shown.
const WINDOW: usize = 64;

/// A result together with the pattern and data it was computed from.
#[derive(Clone, Copy, Debug)]
pub struct Report<'a> {
    pattern: &'a [u8],
    data: &'a [u8],
    result: LexResult,
}

impl<'a> Report<'a> {
    pub fn new(pattern: &'a [u8], data: &'a [u8], result: LexResult) -> Self {
        Report {
            pattern,
            data,
            result,
        }
    }

    pub fn result(&self) -> LexResult {
        self.result
    }
}

fn excerpt(bytes: &[u8], at: usize) -> (usize, usize) {
    if bytes.len() <= WINDOW {
        return (0, bytes.len());
    }
    let start = at.saturating_sub(WINDOW / 2).min(bytes.len() - WINDOW);
    (start, start + WINDOW)
}

/// Writes `bytes` under `label` and a caret line pointing at `at`.
fn write_marked(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    bytes: &[u8],
    at: usize,
    note: fmt::Arguments<'_>,
) -> fmt::Result {
    let at = at.min(bytes.len());
    let (start, end) = excerpt(bytes, at);
    let lead = if start > 0 { "..." } else { "" };
    let tail = if end < bytes.len() { "..." } else { "" };
    let prefix = format!("{:<9}{}", format!("{}:", label), lead);
    let column = prefix.len() + bytes[start..at].escape_ascii().to_string().len();
    writeln!(f, "{}{}{}", prefix, bytes[start..end].escape_ascii(), tail)?;
    write!(f, "{:width$}^ {}", "", note, width = column)
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pn = self.result.pn;
        write_marked(f, "pattern", self.pattern, pn, format_args!("{}", pn))?;
        writeln!(f)?;
        match self.result.mismatch_at() {
            Some(at) => write_marked(f, "data", self.data, at, format_args!("mismatch {}", at)),
            None => {
                let end = self.result.data_end().unwrap_or(0);
                write_marked(f, "data", self.data, end, format_args!("end {}", end))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexexec::lex_match;

    #[test]
    fn mismatch_report() {
        let result = lex_match(b"ab#", 0, b"abx", 0);
        let report = Report::new(b"ab#", b"abx", result);
        assert_eq!(
            report.to_string(),
            "pattern: ab#\n           ^ 2\ndata:    abx\n           ^ mismatch 2"
        );
    }

    #[test]
    fn match_report() {
        let result = lex_match(b"####", 0, b"1950", 0);
        let report = Report::new(b"####", b"1950", result);
        assert_eq!(
            report.to_string(),
            "pattern: ####\n             ^ 4\ndata:    1950\n             ^ end 4"
        );
    }

    #[test]
    fn escaped_bytes_keep_caret_aligned() {
        let result = LexResult::mismatched(1, 1);
        let report = Report::new(b"\\t", b"\tx", result);
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "data:    \\tx");
        assert_eq!(lines[3].find('^'), Some(11));
    }

    #[test]
    fn long_data_is_windowed() {
        let mut data = vec![b'a'; 200];
        data[150] = b'b';
        let result = lex_match(b"a+", 0, &data, 0);
        assert_eq!(result.data_end(), Some(150));
        let text = Report::new(b"a+", &data, result).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[2].starts_with("data:    ..."));
        assert!(lines[2].ends_with("..."));
        assert_eq!(lines[2].len(), 9 + 3 + WINDOW + 3);
        // window starts at 150 - 32
        assert_eq!(lines[3].find('^'), Some(9 + 3 + 32));
        assert!(lines[3].ends_with("^ end 150"));
    }
}
