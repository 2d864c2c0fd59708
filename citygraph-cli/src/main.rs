//! citygraph CLI - find cities reachable from two headquarters.
//!
//! Features:
//! - Reads the city graph from a text file (`cities.txt` by default)
//! - Prompts for K1, K2 and L when they are not given as flags
//! - Plain (`3 4` / `-1`) or JSON output
//! - Optional query trace and Graphviz DOT rendering

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use citygraph_core::{
    generate_dot, init_structured_logging, init_verbose_logging, load_config, load_graph,
    print_json, print_plain, render_matrix, CityGraphConfig, MatrixLimits, Query, QueryTrace,
    ReachabilityAnalyzer, Tee, TracingObserver, DEFAULT_GRAPH_FILE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find cities reachable from two headquarters within L intermediate cities")]
pub struct Cli {
    /// Graph file: city count followed by the adjacency matrix
    #[arg(default_value = DEFAULT_GRAPH_FILE)]
    path: String,

    /// First headquarters (1-based)
    #[arg(long, allow_negative_numbers = true)]
    k1: Option<i64>,

    /// Second headquarters (1-based)
    #[arg(long, allow_negative_numbers = true)]
    k2: Option<i64>,

    /// Maximum number of intermediate cities (L)
    #[arg(long, short = 'l', allow_negative_numbers = true)]
    hops: Option<i64>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Show the reachable sets behind the answer
    #[arg(long)]
    trace: bool,

    /// Human-readable debug logging on stderr
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Print the loaded adjacency matrix before answering
    #[arg(long)]
    show_matrix: bool,

    /// Generate Graphviz DOT output for the graph and the answer
    #[arg(long)]
    dot: bool,

    /// Write DOT output to a specified file instead of stdout
    #[arg(long)]
    dot_file: Option<String>,

    /// Run both traversals concurrently
    #[arg(long)]
    parallel: bool,

    /// Largest accepted city count (overrides citygraph.toml)
    #[arg(long)]
    max_cities: Option<usize>,

    /// Directory holding citygraph.toml
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,
}

/// Security: Validates output file paths to prevent path traversal attacks.
///
/// Rejects:
/// - Absolute paths (must be relative to current directory)
/// - Paths containing `..` (parent directory traversal)
/// - Paths with null bytes (injection attacks)
fn validate_output_path(path: &str) -> Result<PathBuf> {
    if path.contains('\0') {
        return Err(anyhow!("Output path contains null bytes"));
    }

    let p = PathBuf::from(path);

    if p.is_absolute() {
        return Err(anyhow!(
            "Output path must be relative, not absolute: {}",
            path
        ));
    }

    for component in p.components() {
        if matches!(component, std::path::Component::ParentDir) {
            return Err(anyhow!(
                "Path traversal (..) not allowed in output paths: {}",
                path
            ));
        }
    }

    Ok(p)
}

/// Query parameters, from flags or from the prompt.
struct QueryInput {
    k1: i64,
    k2: i64,
    hops: i64,
}

/// Integer token stream over interactive input.
///
/// Tokens left over from one line answer the next request, so `1 5 2`
/// on a single line supplies K1, K2 and L.
struct IntegerReader<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> IntegerReader<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// True when `count` tokens are already buffered.
    fn has_buffered(&self, count: usize) -> bool {
        self.pending.len() >= count
    }

    /// Takes the next `count` integers, reading more lines as needed.
    fn next_integers(&mut self, count: usize) -> Result<Vec<i64>> {
        let mut line = String::new();
        while self.pending.len() < count {
            line.clear();
            if self.input.read_line(&mut line).context("Failed to read input")? == 0 {
                bail!("Input ended before {} value(s) were read", count);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
        self.pending
            .drain(..count)
            .map(|token| {
                token
                    .parse::<i64>()
                    .with_context(|| format!("Input error: '{}' is not an integer", token))
            })
            .collect()
    }
}

/// Fills in whatever the flags left out by prompting on stderr.
fn resolve_query_input(
    cli: &Cli,
    city_count: usize,
    input: impl BufRead,
    prompt: &mut impl Write,
) -> Result<QueryInput> {
    let mut reader = IntegerReader::new(input);

    let (k1, k2) = match (cli.k1, cli.k2) {
        (Some(k1), Some(k2)) => (k1, k2),
        _ => {
            write!(
                prompt,
                "Enter headquarters cities K1 and K2 (1-{}): ",
                city_count
            )?;
            prompt.flush()?;
            let values = reader.next_integers(2)?;
            (values[0], values[1])
        }
    };

    let hops = match cli.hops {
        Some(hops) => hops,
        None => {
            if !reader.has_buffered(1) {
                write!(prompt, "Enter the maximum number of intermediate cities L: ")?;
                prompt.flush()?;
            }
            reader.next_integers(1)?[0]
        }
    };

    Ok(QueryInput { k1, k2, hops })
}

fn matrix_limits(cli: &Cli, config: &CityGraphConfig) -> Result<MatrixLimits> {
    match cli.max_cities {
        Some(max) => MatrixLimits::new(max).context("Invalid --max-cities"),
        None => config.matrix_limits(),
    }
}

fn write_dot(cli: &Cli, dot: &str) -> Result<()> {
    match &cli.dot_file {
        Some(file) => {
            let path = validate_output_path(file)?;
            fs::write(&path, dot)
                .with_context(|| format!("Failed to write DOT file: {}", path.display()))?;
            eprintln!("DOT graph written to {}", path.display());
        }
        None => print!("{}", dot),
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(&cli.config_dir)?.unwrap_or_default();
    let limits = matrix_limits(cli, &config)?;
    let json = cli.json || config.json_output();

    let graph_path = Path::new(&cli.path);
    let matrix = load_graph(graph_path, &limits)
        .with_context(|| format!("Failed to load graph from: {}", cli.path))?;

    if cli.show_matrix {
        eprint!("{}", render_matrix(&matrix));
    }

    let stdin = io::stdin();
    let input = resolve_query_input(cli, matrix.size(), stdin.lock(), &mut io::stderr())?;

    let analyzer = ReachabilityAnalyzer::new(&matrix).parallel(cli.parallel || config.parallel());
    let query = Query::validate(input.k1, input.k2, input.hops, analyzer.city_count())?;

    let mut trace = QueryTrace::new();
    let mut logger = TracingObserver;
    let common = analyzer.run(&query, &mut Tee(&mut trace, &mut logger))?;

    if json {
        print_json(&query, &common, cli.trace.then_some(&trace));
    } else {
        if cli.trace {
            for line in trace.lines() {
                eprintln!("{}", line);
            }
        }
        print_plain(&common);
    }

    if cli.dot || cli.dot_file.is_some() {
        write_dot(cli, &generate_dot(&matrix, &query, &common))?;
    }

    Ok(())
}

fn main() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] citygraph internal error: {}", info);
    }));

    let cli = Cli::parse();

    if cli.verbose {
        init_verbose_logging();
    } else {
        init_structured_logging();
    }

    if let Err(e) = run(&cli) {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["citygraph"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_defaults() {
        let c = cli(&[]);
        assert_eq!(c.path, "cities.txt");
        assert!(c.k1.is_none());
        assert!(!c.json);
    }

    #[test]
    fn test_negative_values_parse() {
        let c = cli(&["graph.txt", "--k1", "1", "--k2", "3", "--hops", "-1"]);
        assert_eq!(c.hops, Some(-1));
        assert_eq!(c.path, "graph.txt");
    }

    #[test]
    fn test_flags_skip_prompt() {
        let c = cli(&["--k1", "2", "--k2", "4", "-l", "1"]);
        let mut input = io::Cursor::new(Vec::new());
        let mut prompt = Vec::new();
        let q = resolve_query_input(&c, 5, &mut input, &mut prompt).unwrap();
        assert_eq!((q.k1, q.k2, q.hops), (2, 4, 1));
        assert!(prompt.is_empty());
    }

    #[test]
    fn test_prompt_reads_values() {
        let c = cli(&[]);
        let mut input = io::Cursor::new(b"1 5\n\n2\n".to_vec());
        let mut prompt = Vec::new();
        let q = resolve_query_input(&c, 5, &mut input, &mut prompt).unwrap();
        assert_eq!((q.k1, q.k2, q.hops), (1, 5, 2));
        let shown = String::from_utf8(prompt).unwrap();
        assert!(shown.contains("(1-5)"));
    }

    #[test]
    fn test_prompt_accepts_all_values_on_one_line() {
        let c = cli(&[]);
        let mut input = io::Cursor::new(b"1 5 2\n".to_vec());
        let mut prompt = Vec::new();
        let q = resolve_query_input(&c, 5, &mut input, &mut prompt).unwrap();
        assert_eq!((q.k1, q.k2, q.hops), (1, 5, 2));
        let shown = String::from_utf8(prompt).unwrap();
        assert!(!shown.contains("intermediate cities"));
    }

    #[test]
    fn test_prompt_splits_values_across_lines() {
        let c = cli(&[]);
        let mut input = io::Cursor::new(b"3\n4 0\n".to_vec());
        let mut prompt = Vec::new();
        let q = resolve_query_input(&c, 5, &mut input, &mut prompt).unwrap();
        assert_eq!((q.k1, q.k2, q.hops), (3, 4, 0));
    }

    #[test]
    fn test_prompt_rejects_garbage() {
        let c = cli(&["--hops", "0"]);
        let mut input = io::Cursor::new(b"1 x\n".to_vec());
        let mut prompt = Vec::new();
        let err = resolve_query_input(&c, 5, &mut input, &mut prompt).err().unwrap();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_prompt_rejects_eof() {
        let c = cli(&[]);
        let mut input = io::Cursor::new(b"1\n".to_vec());
        let mut prompt = Vec::new();
        assert!(resolve_query_input(&c, 5, &mut input, &mut prompt).is_err());
    }

    #[test]
    fn test_validate_output_path() {
        assert!(validate_output_path("graph.dot").is_ok());
        assert!(validate_output_path("out/graph.dot").is_ok());
        assert!(validate_output_path("/tmp/graph.dot").is_err());
        assert!(validate_output_path("../graph.dot").is_err());
        assert!(validate_output_path("a\0b").is_err());
    }

    #[test]
    fn test_max_cities_flag_overrides_config() {
        let c = cli(&["--max-cities", "10"]);
        let limits = matrix_limits(&c, &CityGraphConfig::default()).unwrap();
        assert_eq!(limits.max_cities, 10);

        let c = cli(&["--max-cities", "0"]);
        assert!(matrix_limits(&c, &CityGraphConfig::default()).is_err());
    }
}
