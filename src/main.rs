use std::ffi::OsString;
use std::io::{self, Write};

use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use memprobe::error::{allocation_error, validation_error, MemprobeError};
use memprobe::registry::{Selection, BENCHMARKS, RUN_ALL};
use memprobe::{elements_for_mb, DEFAULT_SIZE_MB, MAX_SIZE_MB};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    benchmark: String,
    size_mb: usize,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Run(CliOptions),
}

fn main() {
    init_logging();

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let exit_code = run(std::env::args_os(), &mut stdout, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn run<I, W, E>(args: I, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let options = match parse_args(args) {
        Ok(Command::Help) => {
            return if write_usage(out).is_ok() { 0 } else { 1 };
        }
        Ok(Command::Run(options)) => options,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            let _ = write_usage(err);
            return 1;
        }
    };

    let selection = match Selection::parse(&options.benchmark) {
        Ok(selection) => selection,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            let _ = write_usage(err);
            return 1;
        }
    };

    let Some(n) = elements_for_mb(options.size_mb) else {
        let _ = writeln!(
            err,
            "Error: {} MB does not fit in the address space",
            options.size_mb
        );
        return 1;
    };
    let _ = writeln!(out, "Allocating {} MB array...", options.size_mb);
    let mut buffer = match allocate(n) {
        Ok(buffer) => buffer,
        Err(e) => {
            let _ = writeln!(err, "Failed to allocate {} MB: {e}", options.size_mb);
            return 1;
        }
    };

    for entry in selection.entries() {
        let _ = writeln!(out, "Initializing array...");
        initialize(&mut buffer);
        tracing::info!(benchmark = entry.cli_name, n, "running");

        let result = (entry.run)(&mut buffer);
        if writeln!(out, "\n{result}").is_err() {
            return 1;
        }
    }
    0
}

fn parse_args<I>(args: I) -> Result<Command, MemprobeError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter().skip(1);

    let benchmark = match args.next() {
        Some(arg) => arg
            .into_string()
            .map_err(|_| validation_error("benchmark name is not valid UTF-8"))?,
        None => return Err(validation_error("missing benchmark type")),
    };
    if benchmark == "-h" || benchmark == "--help" {
        return Ok(Command::Help);
    }

    let size_mb = match args.next() {
        Some(arg) => parse_size(&arg.to_string_lossy())?,
        None => DEFAULT_SIZE_MB,
    };

    if let Some(extra) = args.next() {
        return Err(validation_error(format!(
            "unexpected argument '{}'",
            extra.to_string_lossy()
        )));
    }

    Ok(Command::Run(CliOptions { benchmark, size_mb }))
}

fn parse_size(raw: &str) -> Result<usize, MemprobeError> {
    match raw.trim().parse::<usize>() {
        Ok(mb) if (1..=MAX_SIZE_MB).contains(&mb) && elements_for_mb(mb).is_some() => {
            Ok(mb)
        }
        _ => Err(validation_error(format!(
            "Array size must be between 1 and {MAX_SIZE_MB} MB (got '{raw}')"
        ))),
    }
}

fn allocate(n: usize) -> Result<Vec<u64>, MemprobeError> {
    let mut buffer: Vec<u64> = Vec::new();
    buffer
        .try_reserve_exact(n)
        .map_err(|e| allocation_error(n, std::mem::size_of::<u64>(), e.to_string()))?;
    buffer.resize(n, 0);
    Ok(buffer)
}

fn initialize(buffer: &mut [u64]) {
    buffer
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, slot)| *slot = i as u64);
}

fn write_usage<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "Usage: memprobe <benchmark_type> [array_size_mb]")?;
    writeln!(w)?;
    writeln!(w, "Benchmark types:")?;
    for entry in BENCHMARKS {
        writeln!(w, "  {:<16} - {}", entry.cli_name, entry.description)?;
    }
    writeln!(w, "  {:<16} - {}", RUN_ALL, "Run every benchmark above in order")?;
    writeln!(w)?;
    writeln!(w, "Optional:")?;
    writeln!(
        w,
        "  array_size_mb - Size of array in MB (default: {DEFAULT_SIZE_MB}, max: {MAX_SIZE_MB})"
    )?;
    writeln!(w)?;
    writeln!(w, "Example: memprobe seq 256")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        std::iter::once("memprobe")
            .chain(list.iter().copied())
            .map(OsString::from)
            .collect()
    }

    fn run_capture(list: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args(list), &mut out, &mut err);
        (
            code,
            String::from_utf8_lossy(&out).into_owned(),
            String::from_utf8_lossy(&err).into_owned(),
        )
    }

    #[test]
    fn default_size_applies() {
        let parsed = parse_args(args(&["seq"])).unwrap();
        assert_eq!(
            parsed,
            Command::Run(CliOptions {
                benchmark: "seq".into(),
                size_mb: DEFAULT_SIZE_MB
            })
        );
    }

    #[test]
    fn explicit_size_is_range_checked() {
        assert!(parse_args(args(&["seq", "1"])).is_ok());
        assert!(parse_args(args(&["seq", "4096"])).is_ok());
        assert!(parse_args(args(&["seq", "0"])).is_err());
        assert!(parse_args(args(&["seq", "4097"])).is_err());
        assert!(parse_args(args(&["seq", "abc"])).is_err());
        assert!(parse_args(args(&["seq", "-5"])).is_err());
        assert!(parse_args(args(&["seq", "18446744073709551615"])).is_err());
    }

    #[test]
    fn missing_benchmark_exits_one() {
        let (code, out, err) = run_capture(&[]);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.contains("missing benchmark type"));
        assert!(err.contains("Usage: memprobe"));
    }

    #[test]
    fn unknown_benchmark_exits_one_before_allocating() {
        let (code, out, err) = run_capture(&["nope"]);
        assert_eq!(code, 1);
        assert!(!out.contains("Allocating"));
        assert!(err.contains("Unknown benchmark type 'nope'"));
    }

    #[test]
    fn out_of_range_size_exits_one() {
        let (code, _, err) = run_capture(&["seq", "5000"]);
        assert_eq!(code, 1);
        assert!(err.contains("between 1 and 4096"));
    }

    #[test]
    fn help_lists_every_benchmark() {
        let (code, out, _) = run_capture(&["--help"]);
        assert_eq!(code, 0);
        for entry in BENCHMARKS {
            assert!(out.contains(entry.cli_name), "{} missing", entry.cli_name);
        }
        assert!(out.contains("all"));
    }

    #[test]
    fn runs_a_reduction_end_to_end() {
        let (code, out, err) = run_capture(&["red_naive", "1"]);
        assert_eq!(code, 0, "stderr: {err}");
        let n = elements_for_mb(1).unwrap() as u64;
        let expected = n * (n - 1) / 2;
        assert!(out.contains("=== Reduction Naive (1 accumulator) ==="));
        assert!(out.contains(&format!("Sum:             {expected}")));
        assert!(out.contains(&format!("Iterations:      {n}")));
    }

    #[test]
    fn initialize_writes_indices() {
        let mut buffer = vec![7u64; 1000];
        initialize(&mut buffer);
        assert!(buffer.iter().enumerate().all(|(i, &v)| v == i as u64));
    }
}
