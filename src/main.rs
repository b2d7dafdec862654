use std::process;

use spirv_emit::cli::{parse_args, ParseArgsResult};

fn main() {
    env_logger::init();
    run();
}

fn run() {
    let args: Vec<String> = std::env::args().collect();

    match parse_args(&args) {
        Ok(ParseArgsResult::Help) => {
            print!("{}", spirv_emit::cli::help_text());
            process::exit(0);
        }
        Ok(ParseArgsResult::Version) => {
            print!("{}", spirv_emit::cli::version_text());
            process::exit(0);
        }
        Ok(ParseArgsResult::Args(cli)) => {
            match spirv_emit::normalize_file(&cli.path, cli.emit, &cli.options, cli.dump_after.as_deref()) {
                Ok(output) => {
                    if let Some(out_path) = cli.output {
                        if let Err(e) = std::fs::write(&out_path, &output) {
                            eprintln!("error: cannot write '{}': {}", out_path.display(), e);
                            process::exit(1);
                        }
                    } else {
                        print!("{}", output);
                    }
                }
                Err(e) => {
                    eprintln!("error[{}]: {}", e.diagnostic_code(), e);
                    process::exit(1);
                }
            }
        }
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("{}", spirv_emit::cli::help_text());
            process::exit(1);
        }
    }
}
