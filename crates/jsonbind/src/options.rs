/// Configuration options for the tokenizing parser.
///
/// The defaults accept the full relaxed dialect; each toggle tightens one
/// rule back towards strict JSON.
///
/// # Examples
///
/// ```rust
/// use jsonbind::{Parser, ParserOptions, TreeBuilder};
///
/// let parser = Parser::new(ParserOptions {
///     allow_bare_keys: false,
///     ..ParserOptions::default()
/// });
/// let mut builder = TreeBuilder::new();
/// assert!(parser.parse("{a: 1}", &mut builder).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Whether object keys may appear unquoted, terminated by whitespace or
    /// `:`.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_bare_keys: bool,

    /// Whether keys and string values may be delimited by single quotes.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_single_quotes: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_bare_keys: true,
            allow_single_quotes: true,
        }
    }
}
