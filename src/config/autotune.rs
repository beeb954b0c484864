use super::evolution::EvolutionConfig;
use crate::data::Dataset;
use crate::functions::Operator;
use log::info;

/// y-variance above which search pressure is raised.
const HIGH_VARIANCE: f64 = 1000.0;

/// Size class of a regression problem, judged from the y-range and sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemRegime {
    Small,
    Medium,
    Large,
}

impl ProblemRegime {
    pub fn classify(dataset: &Dataset) -> Self {
        let (y_min, y_max) = dataset.y_range();
        let y_range = y_max - y_min;
        let n = dataset.len();

        if y_range < 10.0 && n < 20 {
            ProblemRegime::Small
        } else if y_range > 100.0 || n > 50 {
            ProblemRegime::Large
        } else {
            ProblemRegime::Medium
        }
    }
}

/// Derives a run configuration from simple statistics of the data.
pub fn auto_tune(dataset: &Dataset) -> EvolutionConfig {
    let mut config = EvolutionConfig::default();
    let regime = ProblemRegime::classify(dataset);

    match regime {
        ProblemRegime::Small => {
            config.population_size = 1000;
            config.max_generations = 200;
            config.max_depth = 3;
            config.functions = ["+", "-", "*", "protectedDiv", "sqrt", "abs"]
                .iter()
                .filter_map(|tag| Operator::from_name(tag))
                .collect();
        }
        ProblemRegime::Large => {
            config.population_size = 3000;
            config.max_generations = 800;
            config.max_depth = 6;
            config.parsimony_coefficient = 0.001;
        }
        ProblemRegime::Medium => {
            config.population_size = 2000;
            config.max_generations = 500;
            config.max_depth = 4;
        }
    }

    if dataset.y_variance() > HIGH_VARIANCE {
        config.mutation_rate = 0.95;
        config.crossover_rate = 0.85;
    }

    info!(
        "Auto-tuned ({:?}): population_size={}, max_generations={}, max_depth={}",
        regime, config.population_size, config.max_generations, config.max_depth
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::traits::ConfigSection;

    #[test]
    fn test_small_regime() {
        let xs: Vec<f64> = (-3..=6).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x * 0.5).collect();
        let dataset = Dataset::new(xs, ys).unwrap();

        let config = auto_tune(&dataset);
        assert_eq!(ProblemRegime::classify(&dataset), ProblemRegime::Small);
        assert_eq!(config.population_size, 1000);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.functions.len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_medium_regime_for_sample_problem() {
        // y = (x - 1)^2 on -3..=6 spans 0..25
        let xs: Vec<f64> = (-3..=6).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| (x - 1.0).powi(2)).collect();
        let dataset = Dataset::new(xs, ys).unwrap();

        let config = auto_tune(&dataset);
        assert_eq!(ProblemRegime::classify(&dataset), ProblemRegime::Medium);
        assert_eq!(config.population_size, 2000);
        assert_eq!(config.mutation_rate, 0.9);
    }

    #[test]
    fn test_large_regime_with_high_variance() {
        let xs: Vec<f64> = (0..60).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
        let dataset = Dataset::new(xs, ys).unwrap();

        let config = auto_tune(&dataset);
        assert_eq!(ProblemRegime::classify(&dataset), ProblemRegime::Large);
        assert_eq!(config.population_size, 3000);
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.parsimony_coefficient, 0.001);
        assert_eq!(config.mutation_rate, 0.95);
        assert_eq!(config.crossover_rate, 0.85);
    }
}
