//! The coder-managed block inside an OpenSSH client config.
//!
//! Pure functions only, with no I/O and no async. Everything
//! outside the two marker lines is opaque and preserved byte for byte.

use crate::domain::error::ConfigSshError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const START_MARKER: &str = "# ------------START-CODER-----------";
pub const END_MARKER: &str = "# ------------END-CODER------------";
pub const HEADER: &str = "# This was generated by \"coder config-ssh\".
#
# To remove this blob, run:
#
#    coder config-ssh --remove
#
# You should not hand-edit this section, unless you are deleting it.";

// ── Block state ──────────────────────────────────────────────────────────────

/// One of the two marker lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    End,
}

/// What `SshConfigDocument::parse` found in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// Neither marker is present.
    Absent,
    /// Only one marker is present. The file is treated as unmanaged and a
    /// fresh block is appended on the next write.
    Orphaned(Marker),
    /// Both markers are present, start before end.
    Present,
}

// ── Document ─────────────────────────────────────────────────────────────────

/// An SSH config split around its managed block.
///
/// `render()` of a freshly parsed document reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SshConfigDocument {
    before: String,
    /// Block text including the newline that separated it from `before`.
    managed: Option<String>,
    after: String,
    orphan: Option<Marker>,
}

impl SshConfigDocument {
    /// Split `text` around the first start marker and the first end marker.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigSshError::MalformedBlock`] if both markers are present
    /// but the end marker comes first.
    pub fn parse(text: &str) -> Result<Self, ConfigSshError> {
        match (text.find(START_MARKER), text.find(END_MARKER)) {
            (Some(start), Some(end)) => {
                if end < start {
                    return Err(ConfigSshError::MalformedBlock { start, end });
                }
                let cut = if text[..start].ends_with('\n') {
                    start - 1
                } else {
                    start
                };
                let block_end = end + END_MARKER.len();
                Ok(Self {
                    before: text[..cut].to_string(),
                    managed: Some(text[cut..block_end].to_string()),
                    after: text[block_end..].to_string(),
                    orphan: None,
                })
            }
            (start, end) => Ok(Self {
                before: text.to_string(),
                managed: None,
                after: String::new(),
                orphan: start
                    .map(|_| Marker::Start)
                    .or_else(|| end.map(|_| Marker::End)),
            }),
        }
    }

    #[must_use]
    pub fn state(&self) -> BlockState {
        match (&self.managed, self.orphan) {
            (Some(_), _) => BlockState::Present,
            (None, Some(marker)) => BlockState::Orphaned(marker),
            (None, None) => BlockState::Absent,
        }
    }

    /// The managed block from its start marker through its end marker.
    #[must_use]
    pub fn managed_block(&self) -> Option<&str> {
        self.managed
            .as_deref()
            .map(|block| block.strip_prefix('\n').unwrap_or(block))
    }

    /// Everything outside the managed block.
    #[must_use]
    pub fn unmanaged(&self) -> String {
        format!("{}{}", self.before, self.after)
    }

    /// Drop the managed block. Returns `false` if there was none.
    pub fn remove_managed(&mut self) -> bool {
        if self.managed.take().is_none() {
            return false;
        }
        self.before.push_str(&self.after);
        self.after.clear();
        true
    }

    /// Replace any existing managed block with one wrapping `stanzas`,
    /// appended after all unmanaged content.
    pub fn replace_managed(&mut self, stanzas: &str) {
        self.remove_managed();
        self.managed = Some(format!("\n{}", render_block(stanzas)));
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            self.before.len() + self.after.len() + self.managed.as_ref().map_or(0, String::len),
        );
        out.push_str(&self.before);
        if let Some(block) = &self.managed {
            out.push_str(block);
        }
        out.push_str(&self.after);
        out
    }
}

/// Wrap rendered stanzas in the marker lines and the generated-by header.
#[must_use]
pub fn render_block(stanzas: &str) -> String {
    format!("{START_MARKER}\n{HEADER}\n\n{stanzas}\n{END_MARKER}")
}

/// Return `text` with its managed block removed, or unchanged if there is no
/// complete block.
///
/// # Errors
///
/// Returns [`ConfigSshError::MalformedBlock`] if the markers are out of order.
pub fn excise_managed_block(text: &str) -> Result<String, ConfigSshError> {
    Ok(SshConfigDocument::parse(text)?.unmanaged())
}

/// Returns `true` if `line` could be confused with a marker.
#[must_use]
pub fn contains_marker(line: &str) -> bool {
    line.contains(START_MARKER) || line.contains(END_MARKER)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
