//! Extract unique 10-digit roll numbers from a free-form text file and write
//! them one per line.

use clap::Parser;
use rollno_dl::cli::ExtractArgs;
use rollno_dl::identifiers::extract_roll_numbers;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = ExtractArgs::parse();
    match run(&args) {
        Ok(count) => {
            tracing::info!(count, output = %args.output.display(), "Roll numbers written");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &ExtractArgs) -> rollno_dl::Result<usize> {
    let text = std::fs::read_to_string(&args.input)?;
    let numbers = extract_roll_numbers(&text);

    if let Some(parent) = args.output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut content = String::with_capacity(numbers.len() * 11);
    for number in &numbers {
        content.push_str(number);
        content.push('\n');
    }
    std::fs::write(&args.output, content)?;

    Ok(numbers.len())
}
