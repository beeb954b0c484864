//! Static HTML report of a report-mode run.
//!
//! Every tracked solution gets a Chart.js scatter plot of the training points
//! against the formula's predictions. Predictions are computed in the browser by
//! evaluating the rendered formula against a JavaScript copy of the protected
//! math table, so the rendering and the helpers below must stay in sync with
//! `functions::primitives`.

use crate::config::EvolutionConfig;
use crate::data::Dataset;
use crate::engines::generation::snapshot::GenerationSnapshot;
use crate::error::Result;
use chrono::Local;
use serde::Serialize;
use std::path::Path;

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Spacing of the x samples used to draw each prediction curve.
const PREDICTION_STEP: f64 = 0.1;

const COLORS: [&str; 9] = [
    "rgb(255, 99, 132)",
    "rgb(54, 162, 235)",
    "rgb(255, 205, 86)",
    "rgb(75, 192, 192)",
    "rgb(153, 102, 255)",
    "rgb(255, 159, 64)",
    "rgb(201, 203, 207)",
    "rgb(255, 99, 255)",
    "rgb(99, 255, 132)",
];

const STYLE: &str = r#"        body { font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }
        .generation { background: white; margin: 20px 0; padding: 20px; border-radius: 10px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }
        .generation h2 { color: #333; border-bottom: 2px solid #007acc; padding-bottom: 10px; }
        .solutions { display: flex; flex-wrap: wrap; gap: 20px; }
        .solution { flex: 1; min-width: 300px; background: #f9f9f9; padding: 15px; border-radius: 5px; }
        .solution h3 { margin-top: 0; color: #007acc; font-family: monospace; }
        .chart-container { position: relative; height: 300px; margin-top: 15px; }
        .stats { background: #e8f4fc; padding: 10px; border-radius: 5px; margin: 10px 0; }
"#;

// Mirrors functions::primitives.
const JS_HELPERS: &str = r#"        function add(a, b) { return a + b; }
        function sub(a, b) { return a - b; }
        function mul(a, b) { return a * b; }
        function div(a, b) { return Math.abs(b) < 1e-9 ? 1.0 : a / b; }
        function pow(a, b) {
            if (a < 0 && Math.abs(b - Math.round(b)) > 1e-9) return 0.0;
            const r = Math.pow(a, b);
            return isFinite(r) ? r : 0.0;
        }
        function sin(x) { return Math.sin(x); }
        function cos(x) { return Math.cos(x); }
        function tan(x) {
            const c = Math.cos(x);
            return Math.abs(c) < 1e-9 ? 0.0 : Math.sin(x) / c;
        }
        function asin(x) { return Math.asin(Math.max(-1, Math.min(1, x))); }
        function acos(x) { return Math.acos(Math.max(-1, Math.min(1, x))); }
        function atan(x) { return Math.atan(x); }
        function sinh(x) { return Math.sinh(x); }
        function cosh(x) { return Math.cosh(x); }
        function tanh(x) { return Math.tanh(x); }
        function log(x) { return x <= 0 ? -10.0 : Math.log(x); }
        function log10(x) { return x <= 0 ? -10.0 : Math.log10(x); }
        function sqrt(x) { return x < 0 ? 0.0 : Math.sqrt(x); }
        function abs(x) { return Math.abs(x); }
        function exp(x) { return Math.exp(x); }
        function min(a, b) { return Math.min(a, b); }
        function max(a, b) { return Math.max(a, b); }

        function generatePredictionData(formula) {
            const data = [];
            let f;
            try {
                f = new Function('x', 'return ' + formula + ';');
            } catch (e) {
                return data;
            }
            for (let i = 0; X_MIN + i * STEP <= X_MAX + 1e-9; i++) {
                const x = X_MIN + i * STEP;
                const y = f(x);
                if (isFinite(y)) {
                    data.push({x: x, y: y});
                }
            }
            return data;
        }
"#;

#[derive(Serialize)]
struct Point {
    x: f64,
    y: f64,
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escapes text for a single-quoted JavaScript string literal.
pub fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

pub struct HtmlReport<'a> {
    history: &'a [GenerationSnapshot],
    dataset: &'a Dataset,
    config: &'a EvolutionConfig,
}

impl<'a> HtmlReport<'a> {
    pub fn new(
        history: &'a [GenerationSnapshot],
        dataset: &'a Dataset,
        config: &'a EvolutionConfig,
    ) -> Self {
        Self {
            history,
            dataset,
            config,
        }
    }

    pub fn render(&self) -> Result<String> {
        let mut output = String::new();

        output.push_str("<!DOCTYPE html>\n<html lang='en'>\n<head>\n");
        output.push_str("    <meta charset='UTF-8'>\n");
        output.push_str(
            "    <meta name='viewport' content='width=device-width, initial-scale=1.0'>\n",
        );
        output.push_str("    <title>Symbolic Regression Report</title>\n");
        output.push_str(&format!("    <script src='{}'></script>\n", CHART_JS_URL));
        output.push_str("    <style>\n");
        output.push_str(STYLE);
        output.push_str("    </style>\n</head>\n<body>\n");

        self.render_summary(&mut output);
        for snapshot in self.history {
            render_generation(&mut output, snapshot);
        }
        self.render_script(&mut output)?;

        output.push_str("</body>\n</html>\n");
        Ok(output)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.render()?)?;
        Ok(())
    }

    fn render_summary(&self, output: &mut String) {
        let join = |values: &[f64]| {
            values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let best_mse = self
            .history
            .last()
            .and_then(|s| s.best())
            .map(|best| format!("{:.6}", best.mse))
            .unwrap_or_else(|| "n/a".to_string());

        output.push_str("    <h1>Symbolic Regression Report</h1>\n");
        output.push_str("    <div class='stats'>\n");
        output.push_str(&format!(
            "        <strong>Generated:</strong> {}<br>\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        output.push_str(&format!(
            "        <strong>Data:</strong> x = [{}], y = [{}]<br>\n",
            join(self.dataset.xs()),
            join(self.dataset.ys())
        ));
        output.push_str(&format!(
            "        <strong>Population:</strong> {}, <strong>Generations:</strong> {}<br>\n",
            self.config.population_size,
            self.history.len()
        ));
        output.push_str(&format!("        <strong>Best MSE:</strong> {}\n", best_mse));
        output.push_str("    </div>\n");
    }

    fn render_script(&self, output: &mut String) -> Result<()> {
        let (x_min, x_max) = self.dataset.x_range();
        let points: Vec<Point> = self.dataset.pairs().map(|(x, y)| Point { x, y }).collect();

        output.push_str("    <script>\n");
        output.push_str(&format!(
            "        const X_MIN = {:?};\n        const X_MAX = {:?};\n        const STEP = {:?};\n",
            x_min, x_max, PREDICTION_STEP
        ));
        output.push_str(JS_HELPERS);
        output.push_str(&format!(
            "        const originalDataPoints = {};\n",
            serde_json::to_string(&points)?
        ));
        output.push_str(&format!(
            "        const colors = {};\n",
            serde_json::to_string(&COLORS)?
        ));

        output.push_str("        function initializeCharts() {\n");
        for snapshot in self.history {
            for (i, solution) in snapshot.solutions.iter().enumerate() {
                render_chart(output, snapshot.generation, i, &solution.formula());
            }
        }
        output.push_str("        }\n");
        output.push_str("        document.addEventListener('DOMContentLoaded', initializeCharts);\n");
        output.push_str("    </script>\n");
        Ok(())
    }
}

fn render_generation(output: &mut String, snapshot: &GenerationSnapshot) {
    let generation = snapshot.generation;
    output.push_str(&format!(
        "    <div class='generation' id='gen-{}'>\n",
        generation
    ));
    output.push_str(&format!("        <h2>Generation {}</h2>\n", generation));
    if let Some(best) = snapshot.best() {
        output.push_str(&format!(
            "        <div class='stats'>Best fitness: {:.6}, best MSE: {:.6}</div>\n",
            best.fitness, best.mse
        ));
    }

    output.push_str("        <div class='solutions'>\n");
    for (i, solution) in snapshot.summaries().iter().enumerate() {
        output.push_str("            <div class='solution'>\n");
        output.push_str(&format!(
            "                <h3>#{}: {}</h3>\n",
            i + 1,
            escape_html(&solution.formula)
        ));
        output.push_str(&format!(
            "                <div class='stats'><strong>MSE:</strong> {:.6}<br><strong>Size:</strong> {}<br><strong>Fitness:</strong> {:.6}</div>\n",
            solution.mse, solution.size, solution.fitness
        ));
        output.push_str(&format!(
            "                <div class='chart-container'><canvas id='chart-gen{}-sol{}'></canvas></div>\n",
            generation, i
        ));
        output.push_str("            </div>\n");
    }
    output.push_str("        </div>\n    </div>\n");
}

fn render_chart(output: &mut String, generation: usize, index: usize, formula: &str) {
    let color = index % COLORS.len();
    output.push_str(&format!(
        "            new Chart(document.getElementById('chart-gen{g}-sol{i}').getContext('2d'), {{\n\
         \x20               type: 'scatter',\n\
         \x20               data: {{ datasets: [\n\
         \x20                   {{ label: 'Data', data: originalDataPoints, backgroundColor: 'rgb(0, 0, 0)', pointRadius: 6 }},\n\
         \x20                   {{ label: 'Solution #{n}', data: generatePredictionData('{f}'), borderColor: colors[{c}], backgroundColor: colors[{c}], pointRadius: 2, showLine: true, borderWidth: 1, fill: false }}\n\
         \x20               ] }},\n\
         \x20               options: {{ responsive: true, maintainAspectRatio: false, scales: {{ x: {{ type: 'linear', title: {{ display: true, text: 'x' }} }}, y: {{ type: 'linear', title: {{ display: true, text: 'y' }} }} }} }}\n\
         \x20           }});\n",
        g = generation,
        i = index,
        n = index + 1,
        f = escape_js(formula),
        c = color,
    ));
}
