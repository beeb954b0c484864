use anyhow::Context;
use symreg::{ConfigManager, CsvConnector, EvolutionEngine, RunResult};

const USAGE: &str = "usage: symreg [CONFIG.toml] [--report] [--auto]";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config_path = None;
    let mut report = false;
    let mut auto = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--report" => report = true,
            "--auto" => auto = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            flag if flag.starts_with('-') => anyhow::bail!("unknown flag {}\n{}", flag, USAGE),
            path => config_path = Some(path.to_string()),
        }
    }

    let manager = ConfigManager::new();
    match &config_path {
        Some(path) => manager
            .load_from_file(path)
            .with_context(|| format!("loading {}", path))?,
        None => manager.load_from_env()?,
    }
    let config = manager.get()?;

    let (xs, ys) = match &config.data.csv_path {
        Some(path) => {
            let dataset =
                CsvConnector::load_dataset(path, &config.data.x_column, &config.data.y_column)
                    .with_context(|| format!("reading {}", path.display()))?;
            (dataset.xs().to_vec(), dataset.ys().to_vec())
        }
        None => {
            let xs: Vec<f64> = (-3..=6).map(f64::from).collect();
            let ys = xs.iter().map(|x| (x - 1.0) * (x - 1.0)).collect();
            (xs, ys)
        }
    };

    let mut engine = EvolutionEngine::new(config.evolution)?;
    let result = if auto {
        engine.auto_fit(&xs, &ys)?
    } else if report {
        engine.fit_with_report(&xs, &ys)?
    } else {
        engine.fit(&xs, &ys)?
    };

    print_result(&result);
    if report && !auto {
        println!("Report: {}", engine.config().output_path.display());
    }
    Ok(())
}

fn print_result(result: &RunResult) {
    println!("Formula:     {}", result.best_formula);
    if result.is_valid() {
        println!("MSE:         {:.6}", result.mse);
    } else {
        println!("MSE:         invalid");
    }
    println!("Size:        {}", result.size);
    println!("Generations: {}", result.generations);
    println!("Time:        {:.2?}", result.training_time);
}
