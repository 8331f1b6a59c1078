use clap::{Parser, Subcommand};
use iban_check::batch::{check_csv, BatchReport};
use iban_check::corrupt::corrupt_csv;
use iban_check::generator::{generate_ibans, GeneratorConfig};
use iban_check::models::{CountryRecord, IbanRecord};
use iban_check::util::parse_country_list;
use iban_check::{countries, logging, validate_iban};
use rand::Rng;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "iban-check")]
#[command(about = "IBAN validation against the ISO 13616 registry", long_about = None)]
struct Cli {
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Validate(ValidateArgs),
    Check(CheckArgs),
    Countries(CountriesArgs),
    Generate(GenerateArgs),
    Corrupt(CorruptArgs),
}

#[derive(Parser)]
struct ValidateArgs {
    #[arg(required = true)]
    ibans: Vec<String>,
}

#[derive(Parser)]
struct CheckArgs {
    #[arg(long, default_value = "data/ibans.csv")]
    input: PathBuf,
    #[arg(long, default_value = "iban")]
    column: String,
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct CountriesArgs {
    #[arg(long, default_value_t = false)]
    sepa_only: bool,
}

#[derive(Parser)]
struct GenerateArgs {
    #[arg(long, default_value = "all")]
    countries: String,
    #[arg(long, default_value_t = 1)]
    count: usize,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct CorruptArgs {
    #[arg(long, default_value = "data/ibans.csv")]
    input: PathBuf,
    #[arg(long, default_value = "data/ibans_corrupted.csv")]
    output: PathBuf,
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        logging::level_from_env()
    };
    logging::init_logging(level)?;
    match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Check(args) => run_check(args),
        Command::Countries(args) => run_countries(args),
        Command::Generate(args) => run_generate(args),
        Command::Corrupt(args) => run_corrupt(args),
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut invalid = 0usize;
    for value in &args.ibans {
        match validate_iban(value) {
            Ok(iban) => println!("{}\tvalid\t{}", value, iban),
            Err(rejection) => {
                invalid += 1;
                println!("{}\tinvalid\t{}", value, rejection);
            }
        }
    }
    if invalid > 0 {
        return Err(format!("{} of {} value(s) invalid", invalid, args.ibans.len()));
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    if let Some(output) = args.output.as_deref() {
        ensure_parent(output)?;
    }
    let start = Instant::now();
    let report = check_csv(&args.input, &args.column, args.output.as_deref())?;
    let elapsed = start.elapsed();

    log_batch_report(&report);
    emit_info_line(&format!("Check time: {} ms", elapsed.as_millis()));
    if let Some(output) = &args.output {
        emit_info_line(&format!("Report written to {}", output.display()));
    }
    Ok(())
}

fn run_countries(args: CountriesArgs) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for spec in countries().filter(|spec| spec.sepa || !args.sepa_only) {
        let record = CountryRecord {
            code: spec.code.to_string(),
            length: spec.total_length,
            bban_format: spec.bban_pattern.to_string(),
            national_checksum: spec.national_checksum.map(|checksum| checksum.name().to_string()),
            sepa: spec.sepa,
            iban_registry: spec.iban_registry,
        };
        writer.serialize(record).map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let seed = args.seed.unwrap_or_else(random_seed);
    let countries = if args.countries.trim().eq_ignore_ascii_case("all") {
        countries().map(|spec| spec.code.to_string()).collect()
    } else {
        parse_country_list(&args.countries)?
    };
    let config = GeneratorConfig {
        countries,
        per_country: args.count,
    };

    log::info!(
        "Generating {} IBAN(s) for {} countries (seed {})",
        config.per_country * config.countries.len(),
        config.countries.len(),
        seed
    );
    let start = Instant::now();
    let ibans = generate_ibans(&config, seed)?;
    let elapsed = start.elapsed();

    match &args.output {
        Some(output) => {
            ensure_parent(output)?;
            let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
            for iban in &ibans {
                writer
                    .serialize(IbanRecord {
                        iban: iban.to_string(),
                    })
                    .map_err(|err| err.to_string())?;
            }
            writer.flush().map_err(|err| err.to_string())?;
            emit_info_line(&format!(
                "Generated {} IBAN(s) to {}",
                ibans.len(),
                output.display()
            ));
        }
        None => {
            for iban in &ibans {
                println!("{}", iban);
            }
        }
    }
    emit_info_line(&format!("Generation time: {} ms", elapsed.as_millis()));
    Ok(())
}

fn run_corrupt(args: CorruptArgs) -> Result<(), String> {
    let seed = args.seed.unwrap_or_else(random_seed);
    ensure_parent(&args.output)?;
    let summary = corrupt_csv(&args.input, &args.output, seed)?;

    emit_info_line(&format!(
        "Corrupt: input={} output={} seed={}",
        args.input.display(),
        args.output.display(),
        seed
    ));
    for (mutation, count) in &summary.by_mutation {
        emit_info_line(&format!("Corrupt mutations: {} = {}", mutation, count));
    }
    if summary.still_valid > 0 {
        log::warn!(
            "{} of {} corrupted value(s) are still valid IBANs",
            summary.still_valid,
            summary.total_records
        );
    }
    Ok(())
}

fn log_batch_report(report: &BatchReport) {
    emit_info_line(&format!(
        "Checked {} record(s): valid={} invalid={}",
        report.total_records, report.valid_records, report.invalid_records
    ));

    let mut items: Vec<(&str, usize)> = report
        .rejections
        .iter()
        .map(|(label, count)| (*label, *count))
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    for (label, count) in items {
        emit_info_line(&format!("Rejected: {} = {}", label, count));
    }
}

fn ensure_parent(path: &Path) -> Result<(), String> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            create_dir_all(parent).map_err(|err| err.to_string())
        }
        _ => Ok(()),
    }
}

fn random_seed() -> u64 {
    let mut rng = rand::rngs::OsRng;
    rng.gen()
}

fn emit_info_line(message: &str) {
    if log::log_enabled!(log::Level::Info) {
        log::info!("{}", message);
    } else {
        eprintln!("{message}");
    }
}
