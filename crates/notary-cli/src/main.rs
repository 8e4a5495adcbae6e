mod args;

use clap::Parser;
use log::debug;
use notary_adapters::{ImageSource, SourceConfig, SourceError, TabularSource, TextSource};
use notary_chain::EvmNotarizationClient;
use notary_classifier::{ClassifierConfig, CompositeClassifier};
use notary_core::{fingerprint, AnomalyClassifier, PipelineError, Record, RetryPolicy};
use notaryflow::report::{connection_line, exit_code_for, pipeline_error_exit_code, status_lines, EXIT_INPUT_ERROR,
                         EXIT_OK, EXIT_REJECTED};
use notaryflow::{AppConfig, IndustrialAgent};
use std::time::Duration;

use args::{Cli, Commands, Input};

fn load(input: &Input, sources: &SourceConfig) -> Result<(String, Record), SourceError> {
    match input {
        Input::Csv { path, columns } => {
            let columns = if columns.is_empty() { sources.columns.clone() } else { columns.clone() };
            Ok((format!("cnc:{}", path.display()), TabularSource::new(columns).load(path)?))
        }
        Input::Image { path } => Ok((format!("image:{}", path.display()), ImageSource::load(path)?)),
        Input::Text { line } => Ok(("log".to_string(), TextSource::from_line(line.as_str()))),
    }
}

fn cmd_fingerprint(record: &Record) -> i32 {
    match fingerprint(record) {
        Ok(fp) => {
            println!("{fp}");
            EXIT_OK
        }
        Err(e) => {
            eprintln!("No se puede calcular el fingerprint: {e}");
            EXIT_INPUT_ERROR
        }
    }
}

fn cmd_classify(record: &Record, config: &ClassifierConfig) -> i32 {
    let classifier = CompositeClassifier::from_config(config);
    match classifier.classify(record) {
        Ok(verdict) => {
            let label = if verdict.is_valid { "válido" } else { "anómalo" };
            match &verdict.reason {
                Some(reason) => println!("{label} (score {:.6}): {reason}", verdict.score),
                None => println!("{label} (score {:.6})", verdict.score),
            }
            if verdict.is_valid { EXIT_OK } else { EXIT_REJECTED }
        }
        Err(e) => {
            eprintln!("{e}");
            pipeline_error_exit_code(&PipelineError::from(e))
        }
    }
}

fn cmd_run(label: &str, record: &Record, config: &AppConfig, retry: RetryPolicy, as_json: bool) -> i32 {
    let mut agent = IndustrialAgent::from_config(config).with_retry(retry);
    let result = agent.process(record);
    if let Ok(report) = &result {
        debug!("run finished after {} attempt(s)", report.attempts);
    }
    let result = result.map(|report| report.outcome);
    match &result {
        Ok(outcome) if as_json => match serde_json::to_string_pretty(outcome) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("No se pudo serializar el resultado: {e}"),
        },
        Ok(outcome) => status_lines(label, outcome).iter().for_each(|l| println!("{l}")),
        Err(e) => eprintln!("[{label}] {e}"),
    }
    exit_code_for(&result)
}

fn cmd_check(config: &AppConfig) -> i32 {
    match config.chain.validate() {
        Ok(creds) => println!("Configuración válida: emisor {}, contrato {}", creds.signer.address(), creds.contract),
        Err(e) => {
            eprintln!("Configuración inválida: {e}");
            return EXIT_INPUT_ERROR;
        }
    }
    let client = EvmNotarizationClient::from_config(config.chain.clone());
    let result = client.check_connection();
    println!("{}", connection_line(&result));
    if result.is_ok() { EXIT_OK } else { EXIT_INPUT_ERROR }
}

fn run(cli: Cli) -> i32 {
    let config = AppConfig::from_env();
    let input = match &cli.command {
        Commands::Fingerprint { input } | Commands::Classify { input } | Commands::Run { input, .. } => Some(input),
        Commands::Check => None,
    };
    let loaded = match input.map(|i| load(i, &config.sources)).transpose() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("No se pudo leer la entrada: {e}");
            return EXIT_INPUT_ERROR;
        }
    };

    match (cli.command, loaded) {
        (Commands::Fingerprint { .. }, Some((_, record))) => cmd_fingerprint(&record),
        (Commands::Classify { .. }, Some((_, record))) => cmd_classify(&record, &config.classifier),
        (Commands::Run { retries,
                         backoff_secs,
                         json,
                         .. },
         Some((label, record))) => {
            cmd_run(&label,
                    &record,
                    &config,
                    retry_policy(retries, backoff_secs),
                    json)
        }
        (Commands::Check, _) => cmd_check(&config),
        (_, None) => EXIT_INPUT_ERROR,
    }
}

/// `--retries N` son N intentos además del primero.
fn retry_policy(retries: u32, backoff_secs: u64) -> RetryPolicy {
    RetryPolicy::new(retries.saturating_add(1), Duration::from_secs(backoff_secs))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    std::process::exit(run(cli));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_flags_before_input() {
        let cli = Cli::try_parse_from(["notary", "run", "--retries", "3", "--json", "text", "STATUS=OK"]).unwrap();
        match cli.command {
            Commands::Run { retries, json, input: Input::Text { line }, .. } => {
                assert_eq!(retries, 3);
                assert!(json);
                assert_eq!(line, "STATUS=OK");
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn retries_count_on_top_of_the_first_attempt() {
        let cli = Cli::try_parse_from(["notary", "run", "text", "STATUS=OK"]).unwrap();
        let Commands::Run { retries, backoff_secs, .. } = cli.command else { panic!("expected run") };
        assert_eq!(retry_policy(retries, backoff_secs).max_attempts, 1);

        let cli = Cli::try_parse_from(["notary", "run", "--retries", "1", "text", "STATUS=OK"]).unwrap();
        let Commands::Run { retries, backoff_secs, .. } = cli.command else { panic!("expected run") };
        assert_eq!(retry_policy(retries, backoff_secs).max_attempts, 2);
        assert_eq!(retry_policy(u32::MAX, 0).max_attempts, u32::MAX);
    }

    #[test]
    fn csv_columns_are_comma_separated() {
        let cli = Cli::try_parse_from(["notary", "fingerprint", "csv", "data/mill.csv", "--columns", "a,b"]).unwrap();
        let Commands::Fingerprint { input: Input::Csv { columns, .. } } = cli.command else { panic!("expected csv") };
        assert_eq!(columns, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn text_input_fingerprints_raw_bytes() {
        let (label, record) = load(&Input::Text { line: "STATUS=OK".into() }, &SourceConfig::default()).unwrap();
        assert_eq!(label, "log");
        assert_eq!(cmd_fingerprint(&record), EXIT_OK);
        assert_eq!(cmd_fingerprint(&Record::Text(String::new())), EXIT_INPUT_ERROR);
    }

    #[test]
    fn classify_exit_codes() {
        let cfg = ClassifierConfig::default();
        assert_eq!(cmd_classify(&Record::Text("STATUS=OK".into()), &cfg), EXIT_OK);
        assert_eq!(cmd_classify(&Record::Text("ERROR".into()), &cfg), EXIT_REJECTED);
        assert_eq!(cmd_classify(&Record::Numeric(vec![1.0, 2.0]), &cfg),
                   notaryflow::report::EXIT_CLASSIFIER_UNAVAILABLE);
    }
}
