use mlp_forgetting::classifier::MlpClassifier;
use mlp_forgetting::config::{load_config, ExperimentConfig};
use mlp_forgetting::data::{class_name, task1_dataset, task2_dataset};
use mlp_forgetting::experiment::{run_forgetting_experiment, ForgettingReport, TaskEvaluation};
use std::process;

// Sequential two-task training on the four-class point dataset.
// Usage: forgetting_demo [config.json]

// Experiment settings: defaults, or the JSON file named by the first argument.
fn config_from_args(args: &[String]) -> Result<ExperimentConfig, String> {
    match args.get(1) {
        Some(path) => load_config(path).map_err(|e| format!("Could not load config {}: {}", path, e)),
        None => Ok(ExperimentConfig::default()),
    }
}

fn print_evaluation(title: &str, evaluation: &TaskEvaluation) {
    println!("\n=== {} ===", title);
    println!("  Loss: {:.4}", evaluation.metrics.loss);
    println!("  Accuracy: {:.1}%", evaluation.metrics.accuracy * 100.0);
    println!("  Hidden weights magnitude: {:.3}", evaluation.weights.hidden);
    println!("  Output weights magnitude: {:.3}", evaluation.weights.output);
    for (label, metrics) in &evaluation.per_class {
        println!(
            "  {} (Class {}): {:.1}%",
            class_name(*label),
            label,
            metrics.accuracy * 100.0
        );
    }
}

fn print_report(report: &ForgettingReport) {
    print_evaluation("Task 1 after Task 1 training", &report.task1_before);
    print_evaluation("Task 2 after Task 2 training", &report.task2);
    print_evaluation("Task 1 after Task 2 training", &report.task1_after);
    print_evaluation("All classes", &report.all_classes);

    println!("\n=== Catastrophic Forgetting Summary ===");
    println!(
        "Task 1 accuracy BEFORE Task 2: {:.1}%",
        report.task1_before.metrics.accuracy * 100.0
    );
    println!(
        "Task 1 accuracy AFTER Task 2:  {:.1}%",
        report.task1_after.metrics.accuracy * 100.0
    );
    println!(
        "Task 2 accuracy:               {:.1}%",
        report.task2.metrics.accuracy * 100.0
    );
    println!(
        "Drop in Task 1 performance: {:.1}% ({})",
        report.accuracy_drop * 100.0,
        report.severity
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = match config_from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    };

    let mut model = match MlpClassifier::new(config.classifier.clone()) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Could not build classifier: {}", e);
            process::exit(1);
        }
    };

    println!("Task 1: Red (Class 0) and Green (Class 1)");
    println!("Task 2: Blue (Class 2) and Yellow (Class 3)");

    match run_forgetting_experiment(&mut model, &task1_dataset(), &task2_dataset(), &config) {
        Ok(report) => print_report(&report),
        Err(e) => {
            eprintln!("Experiment failed: {}", e);
            process::exit(1);
        }
    }
}
