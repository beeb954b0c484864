use super::evolution_engine::ProgressCallback;
use super::individual::Individual;
use log::info;
use std::sync::mpsc::Sender;

/// Ignores all progress events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, _best: &Individual) {}
}

/// Logs the best formula of every generation at `info` level.
///
/// With `parsimony_coefficient` set, also logs the fitness breakdown
/// `MSE + λ·size = fitness`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleProgressCallback {
    parsimony_coefficient: Option<f64>,
}

impl ConsoleProgressCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_breakdown(parsimony_coefficient: f64) -> Self {
        Self {
            parsimony_coefficient: Some(parsimony_coefficient),
        }
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, generation: usize, best: &Individual) {
        match self.parsimony_coefficient {
            Some(lambda) => {
                info!("=== Generation {} ===", generation);
                info!("Best formula: {}", best.tree);
                info!(
                    "Fitness = MSE + λ*Size = {:.6} + {}*{} = {:.6}",
                    best.mse, lambda, best.size, best.fitness
                );
            }
            None => info!(
                "Generation {}: MSE = {:.6}, formula = {}",
                generation, best.mse, best.tree
            ),
        }
    }
}

// For handing progress to another thread
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete {
        generation: usize,
        best_mse: f64,
        best_fitness: f64,
        best_formula: String,
    },
}

pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, best: &Individual) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_mse: best.mse,
            best_fitness: best.fitness,
            best_formula: best.formula(),
        });
    }
}
