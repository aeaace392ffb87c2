use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pypack_core::{
    clone_project, create_archive, ArchiveReport, CleanSummary, DependencyScanner, JunkFilter,
    JunkItem, ProjectCleaner, ProjectInspector, StdlibRegistry, WriteOutcome,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

mod console;
use console::{format_size, Console};

#[derive(Parser)]
#[command(name = "pypack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Clean, inspect, and package Python projects for distribution")]
#[command(long_about = "Creates a timestamped working copy of a Python project, optionally \
    generates missing requirements.txt (seeded by static import scanning) and README.md, \
    removes junk artifacts (caches, virtual environments, build byproducts), and archives \
    the result into a single zip file. The original project is never modified.")]
pub struct Args {
    /// Path to the Python project (prompted for when omitted)
    pub path: Option<PathBuf>,

    /// Create requirements.txt from detected imports without asking
    #[arg(long)]
    pub req: bool,

    /// Create README.md if missing without asking
    #[arg(long)]
    pub readme: bool,

    /// Full cleanup only: skip requirements.txt and README generation
    #[arg(long)]
    pub full: bool,

    /// Assume yes for every confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Report junk in the original project without cloning or deleting
    #[arg(long)]
    pub dry_run: bool,

    /// Emit a machine-readable JSON report instead of the summary lines
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Serialize)]
struct DryRunReport {
    project: PathBuf,
    items: Vec<JunkItem>,
    total_bytes: u64,
}

#[derive(Serialize)]
struct RunReport {
    project: PathBuf,
    working_copy: PathBuf,
    requirements_written: Option<usize>,
    readme_written: bool,
    clean: CleanSummary,
    archive: ArchiveReport,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut console = Console::new(!args.no_color);

    let project = match args.path.clone() {
        Some(path) => path,
        None => {
            if args.yes {
                bail!("a project path is required with --yes");
            }
            PathBuf::from(console.ask_input("Enter project path")?)
        }
    };

    let project = project
        .canonicalize()
        .with_context(|| format!("path does not exist: {}", project.display()))?;
    if !project.is_dir() {
        bail!("path is not a directory: {}", project.display());
    }

    let filter = JunkFilter::new()?;

    if args.dry_run {
        return dry_run(&args, &mut console, &project, &filter);
    }

    if !args.json {
        console.banner()?;
        console.info(&format!("Project: {}", project.display()))?;
    }

    // Everything below operates on the working copy, never the original.
    let working_copy = clone_project(&project)?;
    if !args.json {
        console.info(&format!("Working copy: {}", working_copy.display()))?;
    }

    let inspector = ProjectInspector::new(&working_copy);
    let mut requirements_written = None;
    let mut readme_written = false;

    if !args.full {
        if args.req || !inspector.has_requirements() {
            let confirmed = args.req
                || args.yes
                || console.confirm("Create requirements.txt from detected imports?")?;
            if confirmed {
                let scanner = DependencyScanner::new(&working_copy, StdlibRegistry::python());
                let deps = scanner.discover_dependencies()?;
                match inspector.write_requirements(&deps)? {
                    WriteOutcome::Created(count) => {
                        requirements_written = Some(count);
                        if !args.json {
                            console.success(&format!(
                                "Created requirements.txt with {} packages",
                                count
                            ))?;
                        }
                    }
                    WriteOutcome::AlreadyExists => {
                        if !args.json {
                            console.info("requirements.txt already exists")?;
                        }
                    }
                }
            }
        }

        if args.readme || !inspector.has_readme() {
            let confirmed =
                args.readme || args.yes || console.confirm("Create README.md if missing?")?;
            if confirmed {
                match inspector.write_readme()? {
                    WriteOutcome::Created(_) => {
                        readme_written = true;
                        if !args.json {
                            console.success("Created README.md")?;
                        }
                    }
                    WriteOutcome::AlreadyExists => {
                        if !args.json {
                            console.info("README.md already exists")?;
                        }
                    }
                }
            }
        }
    }

    let clean = ProjectCleaner::new(&working_copy, &filter).clean();
    if !args.json {
        if clean.is_empty() {
            console.info("No junk files found. Project is already clean!")?;
        } else {
            for item in &clean.removed {
                console.success(&format!("Removed {}", item.path.display()))?;
            }
            for failure in &clean.failures {
                console.warn(&format!(
                    "Failed to remove {}: {}",
                    failure.path.display(),
                    failure.reason
                ))?;
            }
            console.success(&format!(
                "Cleaned {} items ({} freed)",
                clean.removed.len(),
                format_size(clean.bytes_freed)
            ))?;
        }
    }

    let spinner = if !args.json {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Creating zip file...");
        Some(pb)
    } else {
        None
    };

    let archive = create_archive(&working_copy, &filter)?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if args.json {
        let report = RunReport {
            project,
            working_copy,
            requirements_written,
            readme_written,
            clean,
            archive,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        console.success(&format!(
            "Created {} ({}, {} files)",
            archive.path.display(),
            format_size(archive.bytes),
            archive.files
        ))?;
        console.success("All done!")?;
    }

    Ok(())
}

/// Scan the original project and report what a real run would remove.
fn dry_run(
    args: &Args,
    console: &mut Console,
    project: &PathBuf,
    filter: &JunkFilter,
) -> anyhow::Result<()> {
    let items = ProjectCleaner::new(project, filter).scan();
    let total_bytes: u64 = items.iter().map(|i| i.size).sum();

    if args.json {
        let report = DryRunReport {
            project: project.clone(),
            items,
            total_bytes,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    console.banner()?;
    console.info(&format!("Project: {}", project.display()))?;
    if items.is_empty() {
        console.info("No junk files found. Project is already clean!")?;
    } else {
        for item in &items {
            console.info(&format!(
                "Would remove {} ({})",
                item.path.display(),
                format_size(item.size)
            ))?;
        }
        console.info(&format!(
            "{} items, {} reclaimable",
            items.len(),
            format_size(total_bytes)
        ))?;
    }

    Ok(())
}
