use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dl1x")]
#[command(version)]
#[command(about = "List and extract DL1 archives", long_about = None)]
#[command(after_help = "Examples:\n  \
  dl1x -l SG.DL1                 list entries of SG.DL1\n  \
  dl1x -x SG.DL1                 extract everything into SG.DL1.d\n  \
  dl1x SG.DL1 '*.BMP' -d out     extract bitmaps into out\n  \
  dl1x -p SG.DL1 SCRIPT.TXT      print one entry to stdout")]
pub struct Cli {
    /// DL1 archive path
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Entries to extract, names or `*`/`?` patterns (default: all)
    #[arg(value_name = "ENTRIES")]
    pub entries: Vec<String>,

    /// List entries (short format)
    #[arg(short = 'l', conflicts_with = "extract")]
    pub list: bool,

    /// List verbosely, with offsets and compression info
    #[arg(short = 'v', conflicts_with = "extract")]
    pub verbose: bool,

    /// Extract entries (default when not listing)
    #[arg(short = 'x')]
    pub extract: bool,

    /// Extract entries to pipe, no messages
    #[arg(short = 'p')]
    pub pipe: bool,

    /// Extract entries into DIR (default: <FILE>.d)
    #[arg(short = 'd', value_name = "DIR")]
    pub extract_dir: Option<PathBuf>,

    /// Overwrite existing files instead of skipping them
    #[arg(short = 'o')]
    pub overwrite: bool,

    /// Write entries exactly as stored, without LZ decompression
    #[arg(long)]
    pub raw: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_listing(&self) -> bool {
        self.list || self.verbose
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0 || self.pipe
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    /// Directory entries are extracted into: `-d`, or `<FILE>.d`
    pub fn output_dir(&self) -> PathBuf {
        match &self.extract_dir {
            Some(dir) => dir.clone(),
            None => {
                let mut dir = self.file.clone().into_os_string();
                dir.push(".d");
                PathBuf::from(dir)
            }
        }
    }

    /// Default tracing filter for this invocation; `RUST_LOG` overrides it
    pub fn log_directive(&self) -> &'static str {
        if self.is_very_quiet() {
            "error"
        } else if self.is_quiet() {
            "warn"
        } else {
            "info"
        }
    }

    /// Whether `name` is selected by the positional entry patterns
    pub fn selects(&self, name: &str) -> bool {
        self.entries.is_empty()
            || self.entries.iter().any(|pattern| {
                let pattern = pattern.trim_start_matches('/').to_uppercase();
                if has_glob_chars(&pattern) {
                    glob_match(&pattern, name)
                } else {
                    pattern == name
                }
            })
    }
}

fn has_glob_chars(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Glob matching supporting `*` (zero or more characters) and `?` (exactly one)
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let text_chars: Vec<char> = text.chars().collect();

    fn do_match(pattern: &[char], text: &[char]) -> bool {
        match (pattern.first(), text.first()) {
            (None, None) => true,
            (Some('*'), _) => {
                do_match(&pattern[1..], text) || (!text.is_empty() && do_match(pattern, &text[1..]))
            }
            (Some('?'), Some(_)) => do_match(&pattern[1..], &text[1..]),
            (Some(p), Some(t)) if p == t => do_match(&pattern[1..], &text[1..]),
            _ => false,
        }
    }

    do_match(&pattern_chars, &text_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dl1x").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_output_dir() {
        let cli = parse(&["-x", "data/SG.DL1"]);
        assert_eq!(cli.output_dir(), PathBuf::from("data/SG.DL1.d"));
        assert!(!cli.is_listing());

        let cli = parse(&["data/SG.DL1", "-d", "out"]);
        assert_eq!(cli.output_dir(), PathBuf::from("out"));
    }

    #[test]
    fn test_list_conflicts_with_extract() {
        assert!(Cli::try_parse_from(["dl1x", "-l", "-x", "A.DL1"]).is_err());
    }

    #[test]
    fn test_selects() {
        let cli = parse(&["A.DL1", "*.bmp", "script.txt"]);
        assert!(cli.selects("BG01.BMP"));
        assert!(cli.selects("SCRIPT.TXT"));
        assert!(!cli.selects("SCRIPT.DAT"));

        let all = parse(&["A.DL1"]);
        assert!(all.selects("ANYTHING"));
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("*.TXT", "README.TXT"));
        assert!(glob_match("FILE?.DAT", "FILE1.DAT"));
        assert!(!glob_match("*.TXT", "README.MD"));
        assert!(!glob_match("?", ""));
    }

    #[test]
    fn test_quiet_levels() {
        assert_eq!(parse(&["A.DL1"]).log_directive(), "info");
        assert_eq!(parse(&["-q", "A.DL1"]).log_directive(), "warn");
        assert_eq!(parse(&["-qq", "A.DL1"]).log_directive(), "error");
        assert!(parse(&["-p", "A.DL1"]).is_quiet());
    }
}
