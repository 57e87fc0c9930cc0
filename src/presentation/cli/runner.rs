//! Command execution

use crate::application::dto::ValidationOptions;
use crate::application::{ValidateUploadUseCase, list_supported_types};
use crate::domain::entities::FileType;
use crate::domain::services::SignatureRegistry;
use crate::infrastructure::{FileLoader, LoadedFile, TypeHint, load_options};
use crate::presentation::cli::report::{FileReport, Outcome, sha256_hex};
use crate::presentation::cli::Commands;
use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Exit code for a config file that cannot be read or parsed
const CONFIG_ERROR_EXIT: u8 = 2;

/// Settings for the `check` command after flag parsing
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub paths: Vec<PathBuf>,
    pub file_type: Option<String>,
    pub options: ValidationOptions,
    pub json: bool,
}

/// Runs a parsed command and returns the process exit code
pub fn run(command: Commands) -> Result<u8> {
    match command {
        Commands::Check {
            paths,
            file_type,
            max_size,
            no_content,
            whitelist,
            config,
            json,
        } => {
            let mut options = match config {
                Some(path) => match load_options(&path) {
                    Ok(options) => options,
                    Err(e) => {
                        // No file is checked without the options the caller asked for
                        tracing::debug!(path = %path.display(), "config rejected: {:?}", e);
                        eprintln!("Error: cannot load options from {}: {}", path.display(), e);
                        return Ok(CONFIG_ERROR_EXIT);
                    }
                },
                None => ValidationOptions::default(),
            };
            if let Some(bytes) = max_size {
                options = options.with_max_size(bytes);
            }
            if no_content {
                options = options.with_content_check(false);
            }
            options = options.with_whitelist(whitelist);

            let request = CheckRequest {
                paths,
                file_type,
                options,
                json,
            };
            let reports = check_files(&request);
            print_reports(&reports, request.json)?;
            Ok(reports.iter().map(FileReport::exit_code).max().unwrap_or(0))
        }
        Commands::ListTypes => {
            print_types();
            Ok(0)
        }
    }
}

/// Validates every requested file in parallel, preserving input order
pub fn check_files(request: &CheckRequest) -> Vec<FileReport> {
    let mut loader = FileLoader::new().with_read_limit(request.options.max_size_bytes);
    if let Some(file_type) = &request.file_type {
        loader = loader.with_declared_type(file_type.clone());
    }
    let use_case = ValidateUploadUseCase::with_default_signatures();

    request
        .paths
        .par_iter()
        .map(|path| check_file(&loader, &use_case, path, &request.options))
        .collect()
}

fn check_file(
    loader: &FileLoader,
    use_case: &ValidateUploadUseCase<'_>,
    path: &Path,
    options: &ValidationOptions,
) -> FileReport {
    let shown = path.display().to_string();
    let loaded = match loader.load(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::warn!(path = %shown, "cannot load upload: {}", e);
            return FileReport::error(shown, e);
        }
    };

    if !fully_read(&loaded) {
        if let Some(verdict) = use_case.check_declared_size(loaded.size_on_disk(), options) {
            return FileReport {
                path: shown,
                size_bytes: Some(loaded.size_on_disk()),
                sha256: None,
                file_type: None,
                outcome: Outcome::Checked(verdict),
            };
        }
    }

    let sha256 = fully_read(&loaded).then(|| sha256_hex(loaded.data()));
    let data = loaded.data();

    let (file_type, outcome) = match loaded.hint() {
        TypeHint::Explicit(name) | TypeHint::Extension(name) => {
            match use_case.execute(data, name, options) {
                Ok(verdict) => (Some(name.clone()), Outcome::Checked(verdict)),
                Err(e) => (Some(name.clone()), Outcome::Error { error: e.to_string() }),
            }
        }
        TypeHint::Detected(file_type) => (
            Some(file_type.type_name().to_string()),
            Outcome::Checked(use_case.execute_as(data, *file_type, options)),
        ),
        TypeHint::Unknown => (
            None,
            Outcome::Error {
                error: "Cannot infer file type: no extension and no known signature".to_string(),
            },
        ),
    };

    FileReport {
        path: shown,
        size_bytes: Some(loaded.size_on_disk()),
        sha256,
        file_type,
        outcome,
    }
}

fn fully_read(loaded: &LoadedFile) -> bool {
    loaded.data().len() as u64 == loaded.size_on_disk()
}

fn print_reports(reports: &[FileReport], json: bool) -> Result<()> {
    for report in reports {
        if json {
            println!("{}", serde_json::to_string(report)?);
        } else {
            print!("{}", report.render());
        }
    }
    Ok(())
}

fn print_types() {
    let registry = SignatureRegistry::global();
    println!("{:<6} {:<14} SIGNATURES", "TYPE", "NAME");
    println!("{}", "-".repeat(60));
    for name in list_supported_types() {
        let Ok(file_type) = name.parse::<FileType>() else {
            continue;
        };
        let signatures: Vec<String> = registry
            .get_signatures(file_type)
            .iter()
            .map(|sig| format!("{} [{}]", hex::encode_upper(sig.header()), sig.variant()))
            .collect();
        println!("{:<6} {:<14} {}", name, file_type.name(), signatures.join(", "));
    }
}
