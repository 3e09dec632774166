//! Project layout and the ambient, non-core parts of orchestration: the
//! generated tree's scaffolding files and the subprocess calls into the
//! external model generator and `go mod tidy`.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use include_dir::{include_dir, Dir};
use tracing::{error, info};

use crate::error::{CliError, Result};
use crate::filesystem::Filesystem;

static STATIC_TREE: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

const GO_MOD_TEMPLATE: &str = r#"
module {repository}

go 1.17

replace github.com/go-openapi/strfmt => github.com/kubewarden/strfmt v0.1.2
"#;

/// Kubernetes kind name prefixes go-swagger's casing heuristics otherwise
/// mangle (`Hpa` instead of `HPA`, etc).
const ADDITIONAL_INITIALISMS: &[&str] = &[
    "HPA", "AWS", "CSI", "FS", "FC", "GCE", "GRPC", "ISCSI", "NFS", "OS", "RBD", "SE", "IO",
    "CIDR",
];

pub struct Project {
    pub output_dir: PathBuf,
    pub git_repo: String,
    pub root: PathBuf,
    filesystem: Arc<dyn Filesystem>,
}

impl Project {
    pub fn new(output_dir: PathBuf, git_repo: String, filesystem: Arc<dyn Filesystem>) -> Self {
        let root = output_dir.join("src").join(&git_repo);
        Project {
            output_dir,
            git_repo,
            root,
            filesystem,
        }
    }

    pub fn swagger_file(&self) -> PathBuf {
        self.root.join("swagger.json")
    }

    /// Lay down the generated tree's root-level scaffolding: `go.mod`,
    /// the input `swagger.json`, `KUBERNETES_VERSION`, `LICENSE`,
    /// `.gitignore`.
    pub fn init(&self, swagger_bytes: &[u8], kubernetes_version: &str) -> Result<()> {
        self.filesystem
            .mkdir_all(&self.root)
            .map_err(|source| CliError::CreateDir {
                path: self.root.clone(),
                source,
            })?;

        let go_mod = GO_MOD_TEMPLATE.replace("{repository}", &self.git_repo);
        self.write(self.root.join("go.mod"), go_mod.as_bytes())?;
        self.write(self.swagger_file(), swagger_bytes)?;
        self.write(
            self.root.join("KUBERNETES_VERSION"),
            kubernetes_version.as_bytes(),
        )?;

        let license = STATIC_TREE
            .get_file("LICENSE")
            .expect("embedded LICENSE file is missing")
            .contents();
        self.write(self.root.join("LICENSE"), license)?;

        let gitignore = STATIC_TREE
            .get_file("gitignore.tmpl")
            .expect("embedded gitignore.tmpl file is missing")
            .contents();
        self.write(self.root.join(".gitignore"), gitignore)?;

        Ok(())
    }

    fn write(&self, path: PathBuf, bytes: &[u8]) -> Result<()> {
        self.filesystem
            .write_file(&path, bytes, 0o600)
            .map_err(|source| CliError::WriteFile { path, source })
    }

    /// Copy the embedded static-content tree (everything except the
    /// go-swagger template overrides, which are copied separately into a
    /// scratch directory) into the project root, directories first.
    pub fn copy_static_files(&self) -> Result<()> {
        self.copy_dir_entries(&STATIC_TREE)
    }

    fn copy_dir_entries(&self, dir: &Dir<'_>) -> Result<()> {
        for entry in dir.dirs() {
            if entry.path().starts_with("swagger_templates") {
                continue;
            }
            let target = self.root.join(entry.path());
            self.filesystem
                .mkdir_all(&target)
                .map_err(|source| CliError::CreateDir {
                    path: target,
                    source,
                })?;
            self.copy_dir_entries(entry)?;
        }

        for file in dir.files() {
            let rel = file.path();
            if rel == Path::new("LICENSE") || rel == Path::new("gitignore.tmpl") {
                continue;
            }
            if rel.starts_with("swagger_templates") {
                continue;
            }

            if let Some(parent) = rel.parent() {
                if !parent.as_os_str().is_empty() {
                    let target_parent = self.root.join(parent);
                    self.filesystem.mkdir_all(&target_parent).map_err(|source| {
                        CliError::CreateDir {
                            path: target_parent,
                            source,
                        }
                    })?;
                }
            }

            self.write(self.root.join(rel), file.contents())?;
        }

        Ok(())
    }

    /// Extract the embedded go-swagger template overrides into a scratch
    /// directory on the real filesystem, since `swagger generate model`
    /// needs an OS path to `--template-dir`, not a virtual tree.
    pub fn extract_swagger_templates(&self, scratch_dir: &Path) -> Result<()> {
        let Some(templates) = STATIC_TREE.get_dir("swagger_templates") else {
            return Ok(());
        };

        for file in templates.files() {
            let relative = file
                .path()
                .strip_prefix("swagger_templates")
                .unwrap_or(file.path());
            let target = scratch_dir.join(relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|source| CliError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            std::fs::write(&target, file.contents()).map_err(|source| CliError::WriteFile {
                path: target,
                source,
            })?;
        }

        Ok(())
    }

    /// Write one package's rendered swagger envelope through the
    /// filesystem port, creating its directory first.
    pub fn write_package_swagger(&self, package_name: &str, json_text: &str) -> Result<()> {
        let package_dir = self.root.join(package_name);
        self.filesystem
            .mkdir_all(&package_dir)
            .map_err(|source| CliError::CreateDir {
                path: package_dir.clone(),
                source,
            })?;
        self.write(package_dir.join("swagger.json"), json_text.as_bytes())
    }

    /// Write one GVK-related file (an identity file or `group_info.go`)
    /// into a package directory through the filesystem port.
    pub fn write_package_file(&self, package_name: &str, file_name: &str, contents: &str) -> Result<()> {
        self.write(self.root.join(package_name).join(file_name), contents.as_bytes())
    }

    pub fn run_go_mod_tidy(&self) -> Result<()> {
        self.run_go(&["mod", "tidy"], "go mod tidy")
    }

    fn run_go(&self, args: &[&str], description: &str) -> Result<()> {
        let mut command = Command::new("go");
        command
            .args(args)
            .current_dir(&self.root)
            .env("GOPATH", &self.output_dir);

        run_logged(command, description, &self.git_repo)
    }

    /// Invoke the external `swagger generate model` tool for one
    /// package, writing generated Go sources alongside that package's
    /// `swagger.json`.
    pub fn invoke_swagger_model_generator(
        &self,
        package_name: &str,
        template_dir: &Path,
    ) -> Result<()> {
        let chunks: Vec<&str> = package_name.split('/').collect();
        if chunks.len() < 2 {
            return Err(CliError::PackageNameTooShort(package_name.to_string()));
        }

        let (namespace, module_name) = chunks.split_at(chunks.len() - 1);
        let target_dir = self.root.join(namespace.join("/"));
        let module_name = module_name[0];
        let swagger_file = target_dir.join(module_name).join("swagger.json");

        let mut args: Vec<String> = vec!["generate".to_string(), "model".to_string()];
        for abbr in ADDITIONAL_INITIALISMS {
            args.push(format!("--additional-initialism={abbr}"));
        }
        args.push("--template-dir".to_string());
        args.push(template_dir.display().to_string());
        args.push("--allow-template-override".to_string());
        args.push("-f".to_string());
        args.push(swagger_file.display().to_string());
        args.push("-t".to_string());
        args.push(target_dir.display().to_string());
        args.push("-m".to_string());
        args.push(module_name.to_string());

        let mut command = Command::new("swagger");
        command.args(&args).env("GOPATH", &self.output_dir);

        run_logged(command, "swagger generate model", package_name)
    }
}

fn run_logged(mut command: Command, description: &str, context: &str) -> Result<()> {
    info!(package = context, "running {description}");

    let output = command
        .output()
        .map_err(|source| CliError::SubprocessFailed {
            command: description.to_string(),
            package: context.to_string(),
            detail: source.to_string(),
        })?;

    if !output.status.success() {
        error!(
            package = context,
            stdout = %String::from_utf8_lossy(&output.stdout),
            stderr = %String::from_utf8_lossy(&output.stderr),
            "{description} failed"
        );
        return Err(CliError::SubprocessFailed {
            command: description.to_string(),
            package: context.to_string(),
            detail: format!("exit status {:?}", output.status.code()),
        });
    }

    Ok(())
}
