//! Fenced code block tracking.
//!
//! Directive lines inside ``` or ~~~ fences are literal text and must not be
//! rendered.

/// Line-by-line code fence state.
///
/// A fence opens with three or more backticks or tildes and closes with a
/// line of at least as many of the same character and nothing else.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the last line seen was inside a fence (or opened one).
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` for opening and closing fence lines.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let Some((ch, len)) = fence_run(trimmed) else {
            return false;
        };

        match self.open {
            None => {
                self.open = Some((ch, len));
                true
            }
            Some((open_ch, open_len))
                if ch == open_ch
                    && len >= open_len
                    && trimmed[len..].chars().all(char::is_whitespace) =>
            {
                self.open = None;
                true
            }
            Some(_) => false,
        }
    }
}

/// Leading run of three or more backticks or tildes.
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next().filter(|&c| c == '`' || c == '~')?;
    let len = trimmed.chars().take_while(|&c| c == first).count();
    (len >= 3).then_some((first, len))
}
