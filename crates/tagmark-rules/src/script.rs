//! Subprocess-backed rule transforms.
//!
//! A rule-definition unit is an executable script; its shebang decides the
//! interpreter. Enclosing content travels over stdin, the replacement
//! fragment comes back on stdout. Executing operator-supplied units as
//! trusted code is an accepted trust boundary of the design — the rules
//! directory is operator-controlled.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::TransformError;
use crate::rule::Transform;

/// Transform that runs a rule-definition unit as a child process.
///
/// The child runs to completion on every application; there is no pooling or
/// reuse. Documents are short-to-medium, so spawn cost per tag is acceptable.
pub struct ScriptTransform {
    program: PathBuf,
}

impl ScriptTransform {
    /// Create a transform backed by the executable at `program`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Path of the backing executable.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Transform for ScriptTransform {
    fn apply(&self, content: Option<&str>) -> Result<String, TransformError> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(content) = content
            && let Some(mut stdin) = child.stdin.take()
        {
            stdin.write_all(content.as_bytes())?;
        }
        // Dropping stdin closes the pipe so the child sees EOF.

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(TransformError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let mut text =
            String::from_utf8(output.stdout).map_err(|_| TransformError::InvalidUtf8)?;
        // Scripts almost always emit a trailing newline; strip a single one so
        // the fragment substitutes inline.
        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        Ok(text)
    }
}
