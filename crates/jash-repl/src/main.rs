//! jash CLI entry point.
//!
//! Usage:
//!   jash                       # Interactive shell
//!   jash -c <command>          # Execute command and exit
//!   jash script.sh             # Run a script

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        None => {
            // No args: interactive shell
            jash_repl::run()?;
            Ok(ExitCode::SUCCESS)
        }

        Some("--help" | "-h") => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }

        Some("--version" | "-V") => {
            println!("jash {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }

        Some("-c") => {
            let cmd = args.get(2).context("-c requires a command argument")?;
            let code = jash_repl::run_command(cmd)?;
            Ok(exit_code_from(code))
        }

        Some(path) if !path.starts_with('-') => {
            // Treat as script file
            let code = jash_repl::run_script(path)?;
            Ok(exit_code_from(code))
        }

        Some(unknown) => {
            eprintln!("Unknown option: {unknown}");
            eprintln!("Run 'jash --help' for usage.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn exit_code_from(code: i32) -> ExitCode {
    if code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(code as u8)
    }
}

fn print_help() {
    println!(
        r#"jash v{}

Usage:
  jash                         Interactive shell
  jash -c <command>            Execute command and exit
  jash <script>                Run a script file

Options:
  -c <command>                 Execute command string and exit
  -h, --help                   Show this help
  -V, --version                Show version

Builtins:
  pwd                          Print working directory
  cd [path | - | ~]            Change directory (- for previous, ~ for HOME)
  echo [args...]               Print arguments after $VAR expansion
  export NAME=value            Set an environment variable
  jobs                         List background jobs
  kill <pid | %jobid>          Terminate a running background job
  exit                         Exit the shell

Everything else is searched in PATH and run as an external process.
Pipelines (a | b | c), redirection (< file, > file, >> file) and
background execution (cmd &) are supported.

Examples:
  jash -c 'echo hello > /tmp/x.txt'
  jash -c 'cat /etc/passwd | sort | head -3'
  jash deploy.sh
"#,
        env!("CARGO_PKG_VERSION")
    );
}
