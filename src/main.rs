use std::{env, fs::read_to_string, process, time::Instant};

use minic::{
    compile,
    config::{parse_args, USAGE},
    display_error,
};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let (path, options) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let source = match read_to_string(&path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("failed to read {}: {}", path.display(), error);
            process::exit(1);
        }
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let start = Instant::now();
    let unit = compile(&source, &file_name, &options);

    for (phase, elapsed) in &unit.timings {
        println!("{} in {:?}", phase, elapsed);
    }

    // echoed diagnostics were already written as they were recorded
    if !options.echo_diagnostics {
        for error in unit.diagnostics.errors() {
            eprint!("{}", display_error(error, &source));
        }
    }

    if !unit.succeeded() {
        eprintln!("{} error(s) in {}", unit.error_count(), file_name);
        process::exit(1);
    }

    println!(
        "{} lines, {} globals ({} bytes), {} functions",
        unit.lines,
        unit.module.globals.len(),
        unit.global_data_size(),
        unit.module.functions.len()
    );
    println!("Total time: {:?}", start.elapsed());
}
