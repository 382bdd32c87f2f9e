//! The user-facing side of the callback: one of two fixed notices.

use std::{
    fmt,
    io::{self, Write},
    sync::Mutex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Verified,
    Error,
}

impl Notice {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Verified => "User is verified",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Shows a notice to the user.
///
/// Implementations must block until the notice has been delivered; the
/// callback returns only after `notify` does.
pub trait Notifier {
    /// # Errors
    /// Returns an error if the notice could not be delivered.
    fn notify(&self, notice: Notice) -> io::Result<()>;
}

/// Writes each notice as a single line and flushes before returning.
pub struct ConsoleNotifier<W: Write> {
    out: Mutex<W>,
}

impl ConsoleNotifier<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// # Errors
    /// Returns an error if the writer lock was poisoned.
    pub fn into_inner(self) -> io::Result<W> {
        self.out
            .into_inner()
            .map_err(|_| io::Error::other("notifier writer poisoned"))
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn notify(&self, notice: Notice) -> io::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| io::Error::other("notifier writer poisoned"))?;
        writeln!(out, "{notice}")?;
        out.flush()
    }
}

impl<W: Write> fmt::Debug for ConsoleNotifier<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleNotifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(Notice::Verified.message(), "User is verified");
        assert_eq!(Notice::Error.message(), "Error");
        assert_eq!(Notice::Verified.to_string(), "User is verified");
    }

    #[test]
    fn test_console_notifier_writes_one_line() {
        let notifier = ConsoleNotifier::new(Vec::new());
        notifier.notify(Notice::Verified).unwrap();
        let out = notifier.into_inner().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "User is verified\n");
    }

    #[test]
    fn test_console_notifier_error_notice() {
        let notifier = ConsoleNotifier::new(Vec::new());
        notifier.notify(Notice::Error).unwrap();
        let out = notifier.into_inner().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Error\n");
    }

    #[test]
    fn test_console_notifier_write_failure() {
        let notifier = ConsoleNotifier::new(BrokenPipe);
        let err = notifier.notify(Notice::Error).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
