use crate::compdb::Template;
use serde_derive::Deserialize;

/// Pattern headers are matched against when nothing else is configured.
pub const DEFAULT_PATTERN: &str = "*.hh";

/// Optional overrides read from a TOML file.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Compiler to invoke.
    pub compiler: Option<String>,
    /// Flags preceding the header name.
    pub flags: Option<Vec<String>>,
    /// Glob pattern matched against file names.
    pub pattern: Option<String>,
}

impl Config {
    /// Resolve the compile template, preferring `compiler` when given.
    pub fn template(&self, compiler: Option<&str>) -> Template {
        let mut t = Template::default();
        if let Some(c) = compiler.or(self.compiler.as_deref()) {
            t.compiler = c.to_owned();
        }
        if let Some(flags) = &self.flags {
            t.flags = flags.clone();
        }
        t
    }

    /// Resolve the header pattern, preferring `pattern` when given.
    pub fn pattern<'a>(&'a self, pattern: Option<&'a str>) -> &'a str {
        pattern
            .or(self.pattern.as_deref())
            .unwrap_or(DEFAULT_PATTERN)
    }
}
