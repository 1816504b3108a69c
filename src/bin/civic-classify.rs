//! Headless client for the classification service.

use std::path::PathBuf;

use civic_classifier::backend::{ClassifierBackend, HttpBackend};
use civic_classifier::config;
use civic_classifier::egui_app::view_model::{
    self, CLASSIFICATION_FALLBACK_ERROR, ClassificationView, TRAINING_FALLBACK_ERROR,
    TrainingResultView,
};
use civic_classifier::logging::{self, ConsoleTarget};
use civic_classifier::training::TrainingForm;
use civic_classifier::upload::{self, UploadRequest};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = logging::init_with(ConsoleTarget::Stderr) {
        eprintln!("Logging disabled: {err}");
    }
    let mut settings =
        config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
    if let Some(server) = options.server {
        settings.server.base_url = server;
    }
    let backend = HttpBackend::new(&settings.server).map_err(|err| err.to_string())?;

    match options.command {
        Command::Classify { image } => classify(&backend, image),
        Command::Train {
            dataset_path,
            epochs,
            batch_size,
        } => {
            let mut form = TrainingForm::with_defaults(
                dataset_path,
                settings.training.epochs,
                settings.training.batch_size,
            );
            if let Some(epochs) = epochs {
                form.epochs = epochs;
            }
            if let Some(batch_size) = batch_size {
                form.batch_size = batch_size;
            }
            train(&backend, &form)
        }
    }
}

fn classify(backend: &dyn ClassifierBackend, image: PathBuf) -> Result<(), String> {
    let selected = upload::select_file(&image).map_err(|err| err.to_string())?;
    let request = UploadRequest::read(&selected).map_err(|err| err.to_string())?;
    let body = backend.classify(&request).map_err(|err| err.to_string())?;
    if !body.success {
        return Err(view_model::failure_text(
            body.error.as_deref(),
            CLASSIFICATION_FALLBACK_ERROR,
        ));
    }
    let view = ClassificationView::from_result(&body);
    println!("Prediction: {}", view.label);
    println!("Confidence: {}", view.confidence_text);
    println!("Severity: {}", view.severity);
    println!("Priority: {}", view.priority);
    Ok(())
}

fn train(backend: &dyn ClassifierBackend, form: &TrainingForm) -> Result<(), String> {
    let request = form.to_request().map_err(|err| err.to_string())?;
    let body = backend.train(&request).map_err(|err| err.to_string())?;
    if !body.success {
        return Err(view_model::failure_text(
            body.error.as_deref(),
            TRAINING_FALLBACK_ERROR,
        ));
    }
    let view = TrainingResultView::from_result(&body);
    println!("{}", view.headline);
    println!("{}", view.message_line());
    println!("{}", view.note_line());
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Classify {
        image: PathBuf,
    },
    Train {
        dataset_path: String,
        epochs: Option<String>,
        batch_size: Option<String>,
    },
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    command: Command,
    server: Option<String>,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut positional = Vec::new();
    let mut server = None;
    let mut epochs = None;
    let mut batch_size = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--server" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--server requires a value".to_string())?;
                server = Some(value.to_string());
            }
            "--epochs" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--epochs requires a value".to_string())?;
                epochs = Some(value.to_string());
            }
            "--batch-size" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--batch-size requires a value".to_string())?;
                batch_size = Some(value.to_string());
            }
            unknown if unknown.starts_with("--") => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
            value => positional.push(value.to_string()),
        }
        idx += 1;
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        Some("classify") => {
            let image = positional
                .next()
                .ok_or_else(|| "classify requires an image path".to_string())?;
            if epochs.is_some() || batch_size.is_some() {
                return Err("--epochs and --batch-size only apply to train".to_string());
            }
            Command::Classify {
                image: PathBuf::from(image),
            }
        }
        Some("train") => {
            let dataset_path = positional
                .next()
                .ok_or_else(|| "train requires a dataset path".to_string())?;
            Command::Train {
                dataset_path,
                epochs,
                batch_size,
            }
        }
        Some(other) => return Err(format!("Unknown command: {other}\n\n{}", help_text())),
        None => return Err(help_text()),
    };
    if let Some(extra) = positional.next() {
        return Err(format!("Unexpected argument: {extra}"));
    }
    Ok(Some(Options { command, server }))
}

fn help_text() -> String {
    [
        "civic-classify",
        "",
        "Classifies civic issue photos or starts a training run on the service.",
        "",
        "Usage:",
        "  civic-classify classify <image> [--server <url>]",
        "  civic-classify train <dataset_path> [--epochs <n>] [--batch-size <n>] [--server <url>]",
        "",
        "Options:",
        "  --server <url>       Service base URL (defaults to config.toml).",
        "  --epochs <n>         Training epochs (defaults to config.toml).",
        "  --batch-size <n>     Training batch size (defaults to config.toml).",
    ]
    .join("\n")
}
