use dag_fdw::catalog::CatalogReport;
use dag_fdw::parser::Parser;
use dag_fdw::report;
use std::env;
use std::fs;
use std::process;

#[derive(Debug, PartialEq)]
struct Args {
    input_path: String,
    output_path: Option<String>,
    quiet: bool,
}

/// Parse everything after the program name.
fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                match args.get(i) {
                    Some(path) => output_path = Some(path.clone()),
                    None => return Err(format!("Missing file name after {}", args[i - 1])),
                }
            }
            "-q" | "--quiet" => quiet = true,
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(Args {
        input_path: args[0].clone(),
        output_path,
        quiet,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <catalog.fdw> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -o, --output <file>   Write the report to a file (default: stdout)");
        eprintln!("  -q, --quiet           Print nothing; report through the exit status");
        process::exit(1);
    }

    let args = match parse_args(&args[1..]) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    let input_path = &args.input_path;

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let mut parser = match Parser::new(&input) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let catalog = match parser.parse() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            process::exit(1);
        }
    };

    let report = CatalogReport::check(&catalog);

    if !args.quiet {
        let text = report::render(&report);
        match args.output_path {
            Some(path) => {
                if let Err(e) = fs::write(&path, &text) {
                    eprintln!("Failed to write {}: {}", path, e);
                    process::exit(1);
                }
            }
            None => print!("{}", text),
        }
    }

    if !report.is_ok() {
        process::exit(1);
    }
}
