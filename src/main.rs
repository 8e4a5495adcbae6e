use notaryflow::report::{app_error_exit_code, connection_line, outcome_exit_code, status_lines, EXIT_OK};
use notaryflow::{load_records, AppConfig, AppError, IndustrialAgent, LabeledRecord};

/// Demo del agente: el CSV de sensores y, si se configuró, el frame de
/// imagen se notarizan como ejecuciones independientes.
fn run(config: &AppConfig) -> i32 {
    let records = match load_records(&config.sources) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("No se pudieron cargar los datos. {e}");
            return app_error_exit_code(&e);
        }
    };

    let mut agent = IndustrialAgent::from_config(config);
    println!("{}", connection_line(&agent.notary().check_connection().map_err(AppError::from)));

    let mut exit = EXIT_OK;
    for LabeledRecord { label, record } in &records {
        println!("\n--- Iniciando pipeline del agente: {label} ---");
        let code = match agent.process(record).map_err(AppError::from) {
            Ok(report) => {
                status_lines(label, &report.outcome).iter().for_each(|l| println!("{l}"));
                outcome_exit_code(&report.outcome)
            }
            Err(e) => {
                eprintln!("[{label}] {e}");
                app_error_exit_code(&e)
            }
        };
        exit = exit.max(code);
    }
    exit
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = AppConfig::from_env();
    std::process::exit(run(&config));
}
