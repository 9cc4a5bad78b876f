use rayon::prelude::*;
use serde_derive::{Deserialize, Serialize};
use std::io::{Result, Write};
use std::path::Path;

/// Compiler used when nothing else is configured.
pub const DEFAULT_COMPILER: &str = "/usr/bin/g++";

/// Flags placed between the compiler and the header name.
pub const DEFAULT_FLAGS: [&str; 4] = ["-std=c++0x", "-g", "-O0", "-Wall"];

/// Build the compile command for a single header.
pub fn compile_command(
    compiler: &str,
    flags: &[String],
    base_name: &str,
) -> String {
    let mut parts = Vec::with_capacity(flags.len() + 3);
    parts.push(compiler);
    parts.extend(flags.iter().map(String::as_str));
    parts.push(base_name);
    parts.push("-c");
    parts.join(" ")
}

/// The compiler invocation every header is compiled with.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Path to the compiler.
    pub compiler: String,
    /// Flags preceding the file name.
    pub flags: Vec<String>,
}

impl Default for Template {
    fn default() -> Self {
        Template {
            compiler: DEFAULT_COMPILER.to_owned(),
            flags: DEFAULT_FLAGS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Template {
    /// Command line for the given header.
    pub fn command(&self, base_name: &str) -> String {
        compile_command(&self.compiler, &self.flags, base_name)
    }
}

/// A single entry of a compilation database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileCommand {
    /// Absolute working directory of the compile.
    pub directory: String,
    /// Full compiler invocation.
    pub command: String,
    /// Header path relative to `directory`.
    pub file: String,
}

impl CompileCommand {
    pub fn new(directory: &str, template: &Template, base_name: &str) -> Self {
        CompileCommand {
            directory: directory.to_owned(),
            command: template.command(base_name),
            file: format!("./{}", base_name),
        }
    }

    /// Emit this entry as a JSON object, without a trailing newline.
    fn emit(&self) -> String {
        format!(
            "{{\n  \"directory\": {},\n  \"command\": {},\n  \"file\": {}\n}}",
            quote(&self.directory),
            quote(&self.command),
            quote(&self.file),
        )
    }
}

/// JSON string literal for `s`.
fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

/// A compilation database: one compile command per header.
#[derive(Debug, Default)]
pub struct Database {
    pub commands: Vec<CompileCommand>,
}

impl Database {
    /// Create a database with one entry per header, in the order given.
    pub fn from_headers(
        directory: &str,
        template: &Template,
        headers: &[String],
    ) -> Database {
        Database {
            commands: headers
                .par_iter()
                .map(|h| CompileCommand::new(directory, template, h))
                .collect(),
        }
    }

    /// Emit this database as a JSON array in text form.
    pub fn emit(&self) -> String {
        let mut s = String::from("[\n");
        if !self.commands.is_empty() {
            s += &self
                .commands
                .iter()
                .map(CompileCommand::emit)
                .collect::<Vec<String>>()
                .join(",\n");
            s.push('\n');
        }
        s.push_str("]\n");
        s
    }

    /// Emit this database to standard output.
    pub fn emit_stdout(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        out.write_all(self.emit().as_bytes())?;
        out.flush()
    }

    /// Emit this database to the file at `path`.
    pub fn emit_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.emit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn default_command() {
        assert_eq!(
            Template::default().command("a.hh"),
            "/usr/bin/g++ -std=c++0x -g -O0 -Wall a.hh -c"
        );
    }

    #[test]
    fn command_without_flags() {
        assert_eq!(compile_command("cc", &[], "x.hh"), "cc x.hh -c");
    }

    #[test]
    fn empty_database() {
        let db = Database::from_headers("/abs", &Template::default(), &[]);
        assert_eq!(db.emit(), "[\n]\n");
        let parsed: Vec<CompileCommand> =
            serde_json::from_str(&db.emit()).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn two_headers_layout() {
        let db = Database::from_headers(
            "/abs/path",
            &Template::default(),
            &headers(&["a.hh", "b.hh"]),
        );
        let expected = r#"[
{
  "directory": "/abs/path",
  "command": "/usr/bin/g++ -std=c++0x -g -O0 -Wall a.hh -c",
  "file": "./a.hh"
},
{
  "directory": "/abs/path",
  "command": "/usr/bin/g++ -std=c++0x -g -O0 -Wall b.hh -c",
  "file": "./b.hh"
}
]
"#;
        assert_eq!(db.emit(), expected);
    }

    #[test]
    fn separators_and_fields() {
        let names = headers(&["a.hh", "b.hh", "c.hh", "d.hh", "e.hh"]);
        let db = Database::from_headers("/d", &Template::default(), &names);
        let out = db.emit();
        assert_eq!(out.matches("},\n").count(), names.len() - 1);

        let parsed: Vec<CompileCommand> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), names.len());
        for (cmd, name) in parsed.iter().zip(&names) {
            assert_eq!(cmd.file, format!("./{}", name));
            let tokens: Vec<&str> = cmd.command.split(' ').collect();
            assert_eq!(tokens[tokens.len() - 2], name);
            assert_eq!(tokens[tokens.len() - 1], "-c");
        }
    }

    #[test]
    fn escapes_awkward_names() {
        let db = Database::from_headers(
            "/dir \"quoted\"",
            &Template::default(),
            &headers(&["back\\slash.hh"]),
        );
        let parsed: Vec<CompileCommand> =
            serde_json::from_str(&db.emit()).unwrap();
        assert_eq!(parsed[0].directory, "/dir \"quoted\"");
        assert_eq!(parsed[0].file, "./back\\slash.hh");
    }
}
