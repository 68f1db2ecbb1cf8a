use drac_compiler::config::RuntimeConfig;
use drac_compiler::{logging, pipeline};
use std::env;

/// Command line options after the input path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    dump_tokens: bool,
    json: bool,
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runtime_config = RuntimeConfig::default();
    logging::config::init_runtime_preferences(runtime_config.logging.clone())?;

    // Initialize global logging system
    logging::init_global_logging()?;

    // Validate pipeline configuration
    pipeline::validate_pipeline()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <input.drac> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let file_path = &args[1];
    let options = parse_options(&args[2..]);

    let succeeded = if options.dump_tokens {
        run_token_dump(file_path, &options)?
    } else {
        run_syntax_check(file_path, &options, &runtime_config)?
    };

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("Drac Compiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenizer and LL(1) syntax checker for Drac source files");
    println!();
    println!("USAGE:");
    println!("    {} <input.drac> [options]", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help      Show this help message");
    println!("    --tokens    Print the token stream instead of checking syntax");
    println!("    --json      Emit results and errors as JSON");
    println!("    --quiet     Print nothing on success");
    println!();
    println!("OUTPUT:");
    println!("    Success: 'Syntax OK' (exit status 0)");
    println!("    Failure: the first syntax or file error (exit status 1)");
    println!();
    println!("ENVIRONMENT:");
    println!("    DRAC_REQUIRE_DRAC_EXTENSION      Reject files without .drac extension");
    println!("    DRAC_LEXICAL_WARN_ILLEGAL_CHARS  Log illegal characters as warnings");
    println!("    DRAC_LOGGING_ENABLE_CONSOLE      Write log events to stderr");
    println!("    DRAC_LOGGING_USE_STRUCTURED      Write log events as JSON");
    println!("    DRAC_LOGGING_MIN_LEVEL           error | warning | info | debug");
    println!();
    println!("BUILD:");
    println!("    {}", drac_compiler::config::build_info::source_info());
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--tokens" => options.dump_tokens = true,
            "--json" => options.json = true,
            "--quiet" => options.quiet = true,
            _ => eprintln!("Warning: Unknown option '{}'", arg),
        }
    }

    options
}

fn run_token_dump(
    file_path: &str,
    options: &CliOptions,
) -> Result<bool, Box<dyn std::error::Error>> {
    match pipeline::dump_tokens(file_path) {
        Ok(tokens) => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                for token in &tokens {
                    println!("{}", token);
                }
            }
            Ok(true)
        }
        Err(error) => {
            report_failure(file_path, &Err(error), options)?;
            Ok(false)
        }
    }
}

fn run_syntax_check(
    file_path: &str,
    options: &CliOptions,
    runtime_config: &RuntimeConfig,
) -> Result<bool, Box<dyn std::error::Error>> {
    let result = pipeline::process_file_with_preferences(
        file_path,
        &runtime_config.file_processor,
        runtime_config.lexical.clone(),
    );

    if result.is_err() {
        report_failure(file_path, &result, options)?;
        return Ok(false);
    }

    if options.json {
        let output = pipeline::PipelineOutput::from_result(file_path, &result);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !options.quiet {
        println!("Syntax OK");
    }

    Ok(true)
}

fn report_failure(
    file_path: &str,
    result: &Result<pipeline::PipelineResult, pipeline::PipelineError>,
    options: &CliOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let Err(error) = result else {
        return Ok(());
    };

    if options.json {
        let output = pipeline::PipelineOutput::from_result(file_path, result);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match error.as_syntax_error() {
        Some(syntax_error) => eprintln!("{}", syntax_error),
        None => eprintln!("{}", error),
    }

    Ok(())
}
