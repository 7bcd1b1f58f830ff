//! Log Buffer: the append-only history of every ingested line.
//!
//! Lines are stored exactly as read, in arrival order, for the lifetime of the
//! process. Appends take the write lock; full scans by the renderer take the
//! read lock for the duration of a single pass.

use parking_lot::RwLock;

/// Append-only, ordered store of raw input lines
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: RwLock<Vec<String>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and return the buffer length after the append
    pub fn append(&self, line: impl Into<String>) -> usize {
        let mut lines = self.lines.write();
        lines.push(line.into());
        lines.len()
    }

    pub fn len(&self) -> usize {
        self.lines.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.read().is_empty()
    }

    /// Run `scan` over every line in arrival order while holding the read lock.
    ///
    /// Appends wait until `scan` returns, so it must not block or try to
    /// append to this buffer.
    pub fn with_lines<R>(&self, scan: impl FnOnce(&[String]) -> R) -> R {
        let lines = self.lines.read();
        scan(&lines)
    }

    /// Owned copy of the current contents
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_append_preserves_arrival_order() {
        let buffer = LogBuffer::new();
        assert!(buffer.is_empty());

        assert_eq!(buffer.append("first"), 1);
        assert_eq!(buffer.append(String::from("second")), 2);
        assert_eq!(buffer.append(""), 3);

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.snapshot(), vec!["first", "second", ""]);
    }

    #[test]
    fn test_with_lines_sees_everything_appended_before() {
        let buffer = LogBuffer::new();
        buffer.append("a");
        buffer.append("b");

        let joined = buffer.with_lines(|lines| lines.join(","));
        assert_eq!(joined, "a,b");
    }

    #[test]
    fn test_concurrent_appends_are_all_retained() {
        let buffer = Arc::new(LogBuffer::new());
        let writers: Vec<_> = (0..4)
            .map(|writer| {
                let buffer = Arc::clone(&buffer);
                std::thread::spawn(move || {
                    for n in 0..250 {
                        buffer.append(format!("w{writer}-{n}"));
                    }
                })
            })
            .collect();

        for handle in writers {
            handle.join().unwrap();
        }

        assert_eq!(buffer.len(), 1000);
        // Each writer's lines keep their relative order
        let lines = buffer.snapshot();
        let from_first: Vec<&String> = lines.iter().filter(|l| l.starts_with("w0-")).collect();
        let expected: Vec<String> = (0..250).map(|n| format!("w0-{n}")).collect();
        assert_eq!(from_first.len(), expected.len());
        assert!(from_first.iter().zip(expected.iter()).all(|(a, b)| *a == b));
    }
}
