use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use specgen_common::{FileSystem, Generator, RealFileSystem};
use specgen_php::PhpGenerator;
use specgen_printer::PrinterConfig;
use specgen_spec::Spec;
use specgen_typescript::TypeScriptGenerator;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Target language (php, ts)
    pub lang: String,

    /// Directory containing spec files (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Output directory (overrides config and spec)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Columns per indent level (overrides config)
    #[arg(long)]
    pub indent_size: Option<usize>,
}

/// Generator registered for `lang`
pub fn generator_for(lang: &str) -> Result<Box<dyn Generator>> {
    match lang {
        "php" => Ok(Box::new(PhpGenerator::new())),
        "ts" | "typescript" => Ok(Box::new(TypeScriptGenerator::new())),
        other => Err(anyhow!("Unknown language: {} (expected php or ts)", other)),
    }
}

pub fn generate(args: GenerateArgs, cwd: &str) -> Result<()> {
    let generator = generator_for(&args.lang)?;
    let config = Config::load(cwd)?;
    let printer_config = config.printer_config(args.indent_size);

    let spec_dir = PathBuf::from(cwd).join(&args.path);
    if !spec_dir.is_dir() {
        return Err(anyhow!("Spec directory does not exist: {:?}", spec_dir));
    }

    let spec_files = find_spec_files(&spec_dir);
    if spec_files.is_empty() {
        println!("{}", "⚠️  No spec files found".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("🔨 Generating {} code...", generator.language()).bright_blue().bold()
    );
    println!("Found {} specs", spec_files.len());

    let override_dir = args
        .out_dir
        .as_ref()
        .or(config.out_dir.as_ref())
        .map(|dir| PathBuf::from(cwd).join(dir));
    let target = if args.stdout {
        Target::Stdout
    } else {
        Target::Files {
            override_dir,
            fs: &RealFileSystem,
        }
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for spec_file in &spec_files {
        let relative_path = spec_file.strip_prefix(&spec_dir).unwrap_or(spec_file);
        match emit_spec(spec_file, generator.as_ref(), &printer_config, &target) {
            Ok(output) => {
                success_count += 1;
                println!("  {} {} → {}", "✓".green(), relative_path.display(), output);
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    format!("{:#}", e).red()
                );
            }
        }
    }

    println!();
    if error_count == 0 {
        println!("{} Generated {} files successfully", "✅".green(), success_count);
        Ok(())
    } else {
        println!(
            "{} Generated {} files, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow!("{} of {} specs failed", error_count, spec_files.len()))
    }
}

/// Where generated code goes.
pub enum Target<'f> {
    Stdout,
    Files {
        /// Replaces the spec's `outDir` when set
        override_dir: Option<PathBuf>,
        fs: &'f dyn FileSystem,
    },
}

/// Every `*.json` spec below `dir` except the config file, sorted by path
pub fn find_spec_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .filter(|path| path.file_name().and_then(|s| s.to_str()) != Some(DEFAULT_CONFIG_NAME))
        .collect();
    files.sort();
    files
}

/// Output directory for a spec: the override if any, else the spec's
/// `outDir` relative to the spec file's directory.
pub fn resolve_out_dir(spec_file: &Path, spec: &Spec, override_dir: Option<&Path>) -> PathBuf {
    match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => spec_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&spec.out_dir),
    }
}

/// Generate one spec and deliver it to `target`. Returns a description of
/// where the output went.
pub fn emit_spec(
    spec_file: &Path,
    generator: &dyn Generator,
    printer_config: &PrinterConfig,
    target: &Target<'_>,
) -> Result<String> {
    let spec = Spec::from_file(spec_file)
        .with_context(|| format!("Failed to load {}", spec_file.display()))?;
    let output = generator.generate(&spec, printer_config)?;

    match target {
        Target::Stdout => {
            println!("{}", output);
            Ok("stdout".to_string())
        }
        Target::Files { override_dir, fs } => {
            let out_dir = resolve_out_dir(spec_file, &spec, override_dir.as_deref());
            if !fs.is_dir(&out_dir) {
                println!(
                    "  {} creating output directory {}",
                    "⚠️".yellow(),
                    out_dir.display()
                );
                fs.create_dir_all(&out_dir)?;
            }

            let output_file = out_dir.join(generator.file_name(&spec)?);
            fs.write(&output_file, &output)?;
            info!(spec = %spec_file.display(), output = %output_file.display(), "generated");
            debug!(bytes = output.len(), "wrote generated file");

            Ok(output_file.display().to_string())
        }
    }
}
