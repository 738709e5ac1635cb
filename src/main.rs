//! pedigree: recover a 5-generation pedigree from an indented ASCII tree.
//!
//! Two modes, like most text filters:
//!
//! - **stdin mode**: `pedigree < tree.txt` prints the preview to stdout
//! - **file mode**: `pedigree -f json -o out/ trees/*.txt` writes one file per input

use anyhow::{Context, Result};
use clap::Parser;
use pedigree_tree::render::{self, Renderer};
use pedigree_tree::subject::YearRange;
use pedigree_tree::{ParsedPedigree, ParserConfig, PedigreeParser};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "pedigree",
    about = "Recover a 5-generation animal pedigree from an indented ASCII tree"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory. Without it, results go to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: text (default), fields, json
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Columns per tab stop
    #[arg(long, default_value_t = 4, value_parser = positive)]
    tab_width: usize,

    /// Columns per generation. Inferred from the tree when omitted.
    #[arg(long, value_parser = positive)]
    step: Option<usize>,

    /// Refuse inputs with more lines than this
    #[arg(long, default_value_t = 5000)]
    max_lines: usize,

    /// Earliest accepted birth year in the subject annotation
    #[arg(long, default_value_t = YearRange::default().min)]
    min_year: u16,

    /// Latest accepted birth year in the subject annotation
    #[arg(long, default_value_t = YearRange::default().max)]
    max_year: u16,
}

fn positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    if cli.min_year > cli.max_year {
        anyhow::bail!(
            "--min-year {} is after --max-year {}",
            cli.min_year,
            cli.max_year
        );
    }

    let parser = PedigreeParser::new(ParserConfig {
        tab_width: cli.tab_width,
        generation_step: cli.step,
        years: YearRange {
            min: cli.min_year,
            max: cli.max_year,
        },
    });
    let renderer = render::create_renderer(&cli.format)?;

    if cli.files.is_empty() {
        return stdin_mode(&cli, &parser, renderer.as_ref());
    }

    file_mode(&cli, &parser, renderer.as_ref())
}

/// stdin mode: read one tree from stdin, write the rendering to stdout.
fn stdin_mode(cli: &Cli, parser: &PedigreeParser, renderer: &dyn Renderer) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let pedigree = analyze(parser, &input, cli.max_lines)?;
    print!("{}", renderer.render(&pedigree)?);
    Ok(())
}

/// file mode: analyze every input, keep going past failures, fail at the end
/// if any input could not be analyzed.
fn file_mode(cli: &Cli, parser: &PedigreeParser, renderer: &dyn Renderer) -> Result<()> {
    let input_files = expand_globs(&cli.files)?;
    if input_files.is_empty() {
        anyhow::bail!("no input files matched");
    }

    if let Some(ref dir) = cli.output {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    let mut failed = 0;
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let pedigree = match analyze(parser, &content, cli.max_lines) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("skipping {}: {:#}", path.display(), e);
                failed += 1;
                continue;
            }
        };
        let rendered = renderer.render(&pedigree)?;

        match cli.output {
            Some(ref dir) => {
                let out_path = dir.join(format!(
                    "{}.{}",
                    derive_output_name(path),
                    renderer.file_extension()
                ));
                fs::write(&out_path, &rendered)
                    .with_context(|| format!("failed to write {}", out_path.display()))?;
            }
            None if input_files.len() > 1 => {
                println!("==> {} <==", path.display());
                print!("{}", rendered);
            }
            None => print!("{}", rendered),
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} inputs could not be analyzed", failed, input_files.len());
    }
    Ok(())
}

/// Run the engine behind the line-count guard.
fn analyze(parser: &PedigreeParser, input: &str, max_lines: usize) -> Result<ParsedPedigree> {
    let lines = input.lines().count();
    if lines > max_lines {
        anyhow::bail!("input has {} lines, more than the limit of {}", lines, max_lines);
    }
    parser.parse(input).context(
        "could not analyze the pedigree tree; check that the subject line carries \
         its (breed, sex, year) annotation",
    )
}

/// Expand glob patterns into a list of real file paths.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            log::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Derive the output file name (without extension) from an input path.
/// "trees/lascaux.txt" → "lascaux"
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "pedigree".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_from_txt() {
        assert_eq!(derive_output_name(Path::new("trees/lascaux.txt")), "lascaux");
        assert_eq!(derive_output_name(Path::new("lascaux")), "lascaux");
    }

    #[test]
    fn positive_rejects_zero() {
        assert_eq!(positive("4"), Ok(4));
        assert!(positive("0").is_err());
        assert!(positive("four").is_err());
    }

    #[test]
    fn line_cap_is_enforced() {
        let parser = PedigreeParser::default();
        let text = "ROOT (Poitou, Male, 2020)\n    SIRE\n    DAM\n";
        assert!(analyze(&parser, text, 3).is_ok());
        let err = analyze(&parser, text, 2).unwrap_err();
        assert!(err.to_string().contains("more than the limit of 2"));
    }

    #[test]
    fn failure_mentions_the_annotation() {
        let err = analyze(&PedigreeParser::default(), "ROOT\n    SIRE\n", 100).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("(breed, sex, year) annotation"));
        assert!(message.contains("no line carries"));
    }
}
