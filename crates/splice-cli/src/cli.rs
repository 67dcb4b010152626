//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use splice_blocks::{BlockOptions, DelimiterPair, ScanMode};

/// keysplice - replace key-anchored blocks in object-literal files
#[derive(Parser, Debug)]
#[command(name = "keysplice")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Writes are serialized through an advisory lock file, \
    <document>.lock, created next to each edited document and left in place \
    afterwards. Add '*.lock' to your ignore rules to keep them out of version control.")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip fsync before renaming written files into place
    #[arg(long, global = true)]
    pub no_fsync: bool,

    /// How long to wait for a document's write lock (<document>.lock), in
    /// milliseconds
    #[arg(long, global = true, default_value_t = 5000, env = "KEYSPLICE_LOCK_TIMEOUT_MS")]
    pub lock_timeout_ms: u64,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Options that control how a block is found and delimited
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BlockArgs {
    /// Delimiter pair: '{}', '[]', '()' or braces/brackets/parens
    #[arg(short, long, default_value = "{}")]
    pub delimiters: DelimiterPair,

    /// Ignore delimiters inside quoted strings
    #[arg(long)]
    pub string_aware: bool,
}

impl BlockArgs {
    pub fn options(&self) -> BlockOptions {
        let scan = if self.string_aware {
            ScanMode::StringAware
        } else {
            ScanMode::Naive
        };
        BlockOptions::default()
            .with_delimiters(self.delimiters)
            .with_scan(scan)
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Replace one key's block in each of the given files
    ///
    /// Examples:
    ///   keysplice replace hero src/i18n/en.ts --with 'hero: {}'
    ///   keysplice replace bigramNarrative src/i18n/*.ts -f snippet.ts --dry-run
    Replace {
        /// Key whose block is replaced
        key: String,

        /// Documents to edit
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Replacement text
        #[arg(
            long = "with",
            value_name = "TEXT",
            conflicts_with = "replacement_file",
            required_unless_present = "replacement_file"
        )]
        replacement: Option<String>,

        /// File holding the replacement text
        #[arg(short = 'f', long, value_name = "PATH")]
        replacement_file: Option<PathBuf>,

        #[command(flatten)]
        block: BlockArgs,

        /// Convert the replacement's line breaks to each document's convention
        #[arg(long)]
        match_line_endings: bool,

        /// Preview changes without writing
        #[arg(long)]
        dry_run: bool,

        /// Process files on separate threads
        #[arg(long)]
        parallel: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Apply every edit listed in a manifest (.toml, .json, .yaml)
    Apply {
        /// Manifest file
        manifest: PathBuf,

        /// Preview changes without writing
        #[arg(long)]
        dry_run: bool,

        /// Process documents on separate threads
        #[arg(long)]
        parallel: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show where a key's block sits in each file, without editing
    Locate {
        /// Key to look for
        key: String,

        /// Documents to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        block: BlockArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn replace_requires_a_replacement() {
        let parsed = Cli::try_parse_from(["keysplice", "replace", "a", "en.ts"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn replace_rejects_both_replacement_sources() {
        let parsed = Cli::try_parse_from([
            "keysplice", "replace", "a", "en.ts", "--with", "a: {}", "-f", "x.ts",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn help_mentions_lock_files() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("<document>.lock"));
        assert!(help.contains("left in place"));
    }

    #[test]
    fn parses_delimiter_names() {
        let cli = Cli::try_parse_from([
            "keysplice", "locate", "items", "a.ts", "-d", "brackets", "--string-aware",
        ])
        .unwrap();
        match cli.command {
            Commands::Locate { block, .. } => {
                let options = block.options();
                assert_eq!(options.delimiters, DelimiterPair::BRACKETS);
                assert_eq!(options.scan, ScanMode::StringAware);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
