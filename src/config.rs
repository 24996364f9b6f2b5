//! Compilation options.
//!
//! The front end itself has very few knobs: the target word size (needed by
//! `DataType::size_of`), token tracing for debugging the parser, and whether
//! diagnostics are echoed to stderr as they are recorded.

use std::path::PathBuf;

pub const USAGE: &str = "usage: minic <file> [--trace] [--echo] [--word-size N]";

/// Describes the machine the program is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Width in bytes of `int`, `float` and pointers.
    pub word_size: usize,
}

impl Target {
    pub fn x86() -> Self {
        Target { word_size: 4 }
    }

    pub fn x86_64() -> Self {
        Target { word_size: 8 }
    }
}

impl Default for Target {
    fn default() -> Self {
        Target::x86_64()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub target: Target,
    /// Print every token consumed by the parser.
    pub trace_tokens: bool,
    /// Write each diagnostic to stderr as soon as it is recorded.
    pub echo_diagnostics: bool,
}

impl CompileOptions {
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_trace(mut self, trace_tokens: bool) -> Self {
        self.trace_tokens = trace_tokens;
        self
    }

    pub fn with_echo(mut self, echo_diagnostics: bool) -> Self {
        self.echo_diagnostics = echo_diagnostics;
        self
    }
}

/// Reads the driver's command line (program name already removed) into the
/// source path and the options it selects.
pub fn parse_args(args: &[String]) -> Result<(PathBuf, CompileOptions), String> {
    let mut path = None;
    let mut options = CompileOptions::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--trace" => options = options.with_trace(true),
            "--echo" => options = options.with_echo(true),
            "--word-size" => {
                let value = args
                    .next()
                    .ok_or_else(|| String::from("--word-size needs a value"))?;
                let word_size = value
                    .parse::<usize>()
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| format!("invalid word size '{}'", value))?;
                options.target = Target { word_size };
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            file => {
                if path.is_some() {
                    return Err(String::from("only one source file may be given"));
                }
                path = Some(PathBuf::from(file));
            }
        }
    }

    path.map(|path| (path, options))
        .ok_or_else(|| String::from("no source file given"))
}

#[cfg(test)]
mod tests {
    use super::{parse_args, Target};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let (path, options) = parse_args(&args(&["main.c"])).unwrap();

        assert_eq!(path.to_str(), Some("main.c"));
        assert_eq!(options.target, Target::x86_64());
        assert!(!options.trace_tokens);
        assert!(!options.echo_diagnostics);
    }

    #[test]
    fn test_flags() {
        let (_, options) = parse_args(&args(&["--trace", "main.c", "--word-size", "4"])).unwrap();

        assert!(options.trace_tokens);
        assert!(!options.echo_diagnostics);
        assert_eq!(options.target, Target::x86());

        let (_, options) = parse_args(&args(&["--echo", "main.c"])).unwrap();
        assert!(options.echo_diagnostics);
        assert!(!options.trace_tokens);
    }

    #[test]
    fn test_rejected_command_lines() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["a.c", "b.c"])).is_err());
        assert!(parse_args(&args(&["a.c", "--word-size"])).is_err());
        assert_eq!(
            parse_args(&args(&["a.c", "--word-size", "0"])).unwrap_err(),
            "invalid word size '0'"
        );
        assert_eq!(
            parse_args(&args(&["a.c", "--verbose"])).unwrap_err(),
            "unknown option '--verbose'"
        );
    }
}
