//! Execution results surfaced to the read loop.

/// Outcome of dispatching one command line.
///
/// Builtins put their output here; externals inherit the terminal and only
/// report a code. `err` carries user-facing failure messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecResult {
    /// Exit code; 0 is success.
    pub code: i32,
    pub out: String,
    pub err: String,
}

impl ExecResult {
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: 0,
            out: out.into(),
            err: String::new(),
        }
    }

    pub fn failure(code: i32, err: impl Into<String>) -> Self {
        Self {
            code,
            out: String::new(),
            err: err.into(),
        }
    }

    pub fn code(code: i32) -> Self {
        Self {
            code,
            ..Default::default()
        }
    }

    pub fn ok(&self) -> bool {
        self.code == 0
    }
}
