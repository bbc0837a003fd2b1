/*!
 * Signal Reports
 * Ordered key/value lines produced by the event decoder
 *
 * A report never allocates. It is built, formatted and written from inside a
 * signal handler, so rendering goes through a stack buffer and write(2).
 */

use crate::core::limits::{MAX_REPORT_LINES, REPORT_LINE_BUFFER};
use nix::unistd::write;
use std::fmt::{self, Write as _};
use std::os::fd::BorrowedFd;

/// Rendered value of one report field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Uint(u64),
    Ptr(usize),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Uint(v) => write!(f, "{}", v),
            // glibc's %p
            FieldValue::Ptr(0) => f.write_str("(nil)"),
            FieldValue::Ptr(v) => write!(f, "{:#x}", v),
        }
    }
}

/// One `key = value` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLine {
    pub key: &'static str,
    pub value: FieldValue,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

const EMPTY_LINE: ReportLine = ReportLine {
    key: "",
    value: FieldValue::Int(0),
};

/// Fixed-capacity ordered list of report lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    lines: [ReportLine; MAX_REPORT_LINES],
    len: usize,
}

impl Report {
    pub(crate) fn new() -> Self {
        Self {
            lines: [EMPTY_LINE; MAX_REPORT_LINES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, key: &'static str, value: FieldValue) {
        debug_assert!(self.len < MAX_REPORT_LINES, "report overflow at {key}");
        if let Some(slot) = self.lines.get_mut(self.len) {
            *slot = ReportLine { key, value };
            self.len += 1;
        }
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Keys in emission order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.lines().iter().map(|line| line.key)
    }

    /// Value of the first line with `key`
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        self.lines()
            .iter()
            .find(|line| line.key == key)
            .map(|line| line.value)
    }

    /// Write every line followed by a newline. Async-signal-safe.
    pub fn write_to(&self, fd: BorrowedFd<'_>) {
        for line in self.lines() {
            let mut buf = LineBuffer::new();
            if writeln!(buf, "{}", line).is_ok() {
                write_all(fd, buf.as_bytes());
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Stack buffer that fails instead of growing
struct LineBuffer {
    bytes: [u8; REPORT_LINE_BUFFER],
    len: usize,
}

impl LineBuffer {
    fn new() -> Self {
        Self {
            bytes: [0; REPORT_LINE_BUFFER],
            len: 0,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl fmt::Write for LineBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let dst = self.bytes.get_mut(self.len..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

fn write_all(fd: BorrowedFd<'_>, mut bytes: &[u8]) {
    while !bytes.is_empty() {
        match write(fd, bytes) {
            Ok(0) => return,
            Ok(n) => bytes = &bytes[n..],
            Err(nix::errno::Errno::EINTR) => continue,
            Err(_) => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_formatting() {
        assert_eq!(FieldValue::Ptr(0x42).to_string(), "0x42");
        assert_eq!(FieldValue::Ptr(0).to_string(), "(nil)");
        assert_eq!(FieldValue::Int(-1).to_string(), "-1");
        assert_eq!(FieldValue::Uint(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn test_report_preserves_order() {
        let mut report = Report::new();
        report.push("signo", FieldValue::Int(11));
        report.push("errno", FieldValue::Int(0));
        report.push("code", FieldValue::Int(1));
        report.push("addr", FieldValue::Ptr(0x42));

        assert_eq!(report.keys().collect::<Vec<_>>(), ["signo", "errno", "code", "addr"]);
        assert_eq!(
            report.to_string(),
            "signo = 11\nerrno = 0\ncode = 1\naddr = 0x42\n"
        );
        assert_eq!(report.get("addr"), Some(FieldValue::Ptr(0x42)));
        assert_eq!(report.get("fd"), None);
    }

    #[test]
    fn test_line_buffer_holds_widest_line() {
        let mut buf = LineBuffer::new();
        let widest = ReportLine {
            key: "status",
            value: FieldValue::Uint(u64::MAX),
        };
        assert!(writeln!(buf, "{}", widest).is_ok());
        assert_eq!(buf.as_bytes(), b"status = 18446744073709551615\n");
    }

    #[test]
    fn test_line_buffer_rejects_overflow() {
        let mut buf = LineBuffer::new();
        let long = "x".repeat(REPORT_LINE_BUFFER + 1);
        assert!(buf.write_str(&long).is_err());
        assert!(buf.as_bytes().is_empty());
    }
}
