use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ksplit::{download, orchestrator, CliError, OsFilesystem, Project};
use ksplit_core::RefactoringPlan;

#[derive(Parser)]
#[command(name = "ksplit")]
#[command(
    about = "Partition a Kubernetes OpenAPI document into per-package swagger files and GVK identities",
    long_about = None
)]
struct Cli {
    /// The swagger file to process
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Fetch the swagger file of the specified Kubernetes version
    #[arg(long)]
    kube_version: Option<String>,

    /// The root directory where the files will be generated
    #[arg(short, long, default_value = "./k8s-objects")]
    output: PathBuf,

    /// The repository where the generated files are going to be published
    #[arg(long, default_value = "github.com/kubewarden/k8s-objects")]
    repo: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::TRACE
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(cli.debug)
        .init();

    let (swagger_bytes, kubernetes_version) = match (&cli.file, &cli.kube_version) {
        (Some(_), Some(_)) => return Err(CliError::ConflictingInputFlags.into()),
        (None, None) => return Err(CliError::MissingInputFlag.into()),
        (Some(path), None) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("cannot read swagger file {}", path.display()))?;
            (bytes, "unknown".to_string())
        }
        (None, Some(version)) => {
            let data = download::download_swagger(version)?;
            (data.bytes, data.kubernetes_version)
        }
    };

    let output_dir = cli
        .output
        .canonicalize()
        .or_else(|_| -> std::io::Result<PathBuf> {
            std::fs::create_dir_all(&cli.output)?;
            cli.output.canonicalize()
        })
        .with_context(|| format!("cannot resolve output directory {}", cli.output.display()))?;

    let filesystem = Arc::new(OsFilesystem);
    let project = Project::new(output_dir, cli.repo.clone(), filesystem);

    info!("initializing target directory");
    project.init(&swagger_bytes, &kubernetes_version)?;

    let document = serde_json::from_slice(&swagger_bytes).map_err(|source| {
        CliError::ParseSwagger {
            path: project.swagger_file(),
            source,
        }
    })?;
    let plan = RefactoringPlan::build(&document)?;

    let template_dir = tempfile::tempdir().context("cannot create scratch directory for go-swagger templates")?;
    project.extract_swagger_templates(template_dir.path())?;

    orchestrator::generate_swagger_files(&project, &plan, template_dir.path())?;
    orchestrator::generate_gvk_files(&project, &plan)?;

    project
        .run_go_mod_tidy()
        .context("error running go mod tidy")?;

    Ok(())
}
