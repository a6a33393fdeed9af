//! Parser configuration.

/// Default bound on nesting of expressions and types. Each level costs
/// several parser frames, so this must stay low enough for an unoptimized
/// build on a 2 MiB thread stack.
pub const DEFAULT_MAX_RECURSION_DEPTH: u32 = 64;

/// Options that control a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest nesting of expressions and types accepted before the parse
    /// fails with a recursion error.
    pub max_recursion_depth: u32,
    /// Recognize a `#!` line at the start of a unit.
    pub allow_shebang: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            allow_shebang: true,
        }
    }
}

impl ParseOptions {
    pub fn with_max_recursion_depth(mut self, depth: u32) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    pub fn with_shebang(mut self, allow: bool) -> Self {
        self.allow_shebang = allow;
        self
    }
}
