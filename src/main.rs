//! Dotling CLI: run scripts, evaluate snippets, or walk a module through
//! the load sequence by hand.

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use colored::Colorize;

use dotling::error::{DotlingError, RuntimeError};
use dotling::interpreter::Interpreter;
use dotling::module::ModuleName;
use dotling::span::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI command to execute.
enum Command {
    /// Run a script file
    Run { file: String },
    /// Evaluate a string
    Eval { code: String },
    /// Drive the module load sequence by hand and report each step
    Load {
        name: String,
        root: Option<String>,
        call: Option<String>,
    },
}

fn print_usage() {
    eprintln!("Dotling {} - dotted-import demo language", VERSION);
    eprintln!();
    eprintln!("Usage: dotling <script.dtl>");
    eprintln!("       dotling -e <code>");
    eprintln!("       dotling load <dotted.name> [--root DIR] [--call NAME]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  <script.dtl>    Run a script; imports resolve next to the script");
    eprintln!("  -e <code>       Evaluate code from the command line");
    eprintln!("  load <name>     Locate, execute, register and bind a module step");
    eprintln!("                  by step, printing what the loader does");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --root DIR      Module search root for 'load' (default: cwd)");
    eprintln!("  --call NAME     Call a zero-argument function from the loaded module");
    eprintln!("  --help, -h      Show this help message");
}

fn parse_args() -> Command {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None => {
            print_usage();
            process::exit(64);
        }
        Some("--help") | Some("-h") => {
            print_usage();
            process::exit(0);
        }
        Some("-e") => {
            let code = args.get(1).unwrap_or_else(|| {
                eprintln!("Error: -e requires a code argument");
                process::exit(64);
            });
            Command::Eval { code: code.clone() }
        }
        Some("load") => parse_load_args(&args[1..]),
        Some(file) => {
            if args.len() > 1 {
                eprintln!("Error: unexpected arguments after '{}'", file);
                process::exit(64);
            }
            Command::Run {
                file: file.to_string(),
            }
        }
    }
}

fn parse_load_args(args: &[String]) -> Command {
    let mut name = None;
    let mut root = None;
    let mut call = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--root" => match iter.next() {
                Some(dir) => root = Some(dir.clone()),
                None => {
                    eprintln!("Error: --root requires a directory");
                    process::exit(64);
                }
            },
            "--call" => match iter.next() {
                Some(func) => call = Some(func.clone()),
                None => {
                    eprintln!("Error: --call requires a function name");
                    process::exit(64);
                }
            },
            other if name.is_none() => name = Some(other.to_string()),
            other => {
                eprintln!("Error: unexpected argument '{}'", other);
                process::exit(64);
            }
        }
    }

    match name {
        Some(name) => Command::Load { name, root, call },
        None => {
            eprintln!("Error: load requires a dotted module name");
            process::exit(64);
        }
    }
}

fn main() {
    match parse_args() {
        Command::Run { file } => run_file(&file),
        Command::Eval { code } => run_eval(&code),
        Command::Load { name, root, call } => run_load(&name, root.as_deref(), call.as_deref()),
    }
}

fn report(error: &DotlingError) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), error);
    process::exit(70);
}

fn run_file(path: &str) {
    if let Err(e) = dotling::run_file(Path::new(path)) {
        report(&e);
    }
}

fn run_eval(code: &str) {
    if let Err(e) = dotling::run(code) {
        report(&e);
    }
}

fn run_load(dotted: &str, root: Option<&str>, call: Option<&str>) {
    let root_dir = match root {
        Some(dir) => PathBuf::from(dir),
        None => env::current_dir().unwrap_or_else(|e| {
            eprintln!("Error: cannot determine current directory: {}", e);
            process::exit(70);
        }),
    };

    let mut interpreter = Interpreter::with_search_paths(vec![root_dir]);
    if let Err(e) = hand_load(&mut interpreter, dotted, call) {
        report(&e);
    }
}

/// The load sequence spelled out: locate, instantiate, execute, register,
/// bind to parent. The `import` statement does exactly this internally; here
/// each step is visible.
fn hand_load(
    interpreter: &mut Interpreter,
    dotted: &str,
    call: Option<&str>,
) -> Result<(), DotlingError> {
    let name = ModuleName::parse(dotted)?;

    // Parent packages first, so there is a namespace to bind onto.
    let parent = match name.parent() {
        Some(parent_name) => Some(interpreter.import_module(&parent_name)?),
        None => None,
    };

    let origin = interpreter.loader().locate(&name)?;
    println!("located    {} at {}", name, origin);

    let module = interpreter.instantiate_module(&name, &origin);
    println!("instantiated {}", name);

    interpreter.execute_module(&module, &origin)?;
    println!("executed   {}", origin);

    interpreter.loader_mut().register(&name, &module);
    println!("registered {}", name);

    if let Some(parent) = &parent {
        interpreter
            .loader()
            .bind_to_parent(parent, name.last(), &module)?;
        println!(
            "bound      {} onto {}",
            name.last(),
            parent.borrow().name()
        );
    }

    if let Some(func) = call {
        let callee = module.borrow().get(func).ok_or_else(|| {
            RuntimeError::no_such_property(format!("module '{}'", name), func, Span::dummy())
        })?;
        interpreter.call_value(&callee, Vec::new(), Span::dummy())?;
    }

    Ok(())
}
