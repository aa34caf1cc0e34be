use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};

use super::templates::{
    render_file, AppJsTemplateData, DockerComposeTemplateData, DockerfileTemplateData,
    EnvTemplateData, GitignoreTemplate, ModelTemplateData, ModelsIndexTemplateData,
    NpmDependency, PackageJsonTemplateData, RouteTemplateData, ServerJsTemplateData,
};
use super::views::{field_view, lacks_id, reference_view};
use crate::config::{DumperConfig, SslStyle};
use crate::naming::{
    escape_js_string, kebab_case, model_name, model_variable_name, unique_file_stem,
};
use crate::schema::{load_schema, SchemaDescription, TableSchema};

const BASE_DEPENDENCIES: &[(&str, &str)] = &[
    ("dotenv", "~16.4.5"),
    ("express", "~4.19.2"),
    ("morgan", "~1.10.0"),
];
const SEQUELIZE_VERSION: &str = "~6.37.3";

/// Parts of the project that can be (re)generated independently
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GenerationPart {
    /// `models/<table>.js`
    Models,
    /// `routes/<table>.js`
    Routes,
    /// `models/index.js`
    Index,
    /// `.env`
    Env,
    /// `package.json`, `app.js`, `server.js`, Docker files, `.gitignore`
    Scaffolding,
}

/// Selection of the parts a [`Dumper`] renders
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GenerationScope {
    pub models: bool,
    pub routes: bool,
    pub index: bool,
    pub env: bool,
    pub scaffolding: bool,
}

impl GenerationScope {
    pub fn all() -> Self {
        Self {
            models: true,
            routes: true,
            index: true,
            env: true,
            scaffolding: true,
        }
    }

    pub fn none() -> Self {
        Self {
            models: false,
            routes: false,
            index: false,
            env: false,
            scaffolding: false,
        }
    }

    /// Enable only the listed parts.
    pub fn only(parts: &[GenerationPart]) -> Self {
        let mut scope = Self::none();
        for part in parts {
            match part {
                GenerationPart::Models => scope.models = true,
                GenerationPart::Routes => scope.routes = true,
                GenerationPart::Index => scope.index = true,
                GenerationPart::Env => scope.env = true,
                GenerationPart::Scaffolding => scope.scaffolding = true,
            }
        }
        scope
    }
}

impl Default for GenerationScope {
    fn default() -> Self {
        Self::all()
    }
}

/// What a generated file is, used for logging and filtering
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileKind {
    Model,
    Route,
    ModelsIndex,
    Env,
    Scaffolding,
}

/// A rendered file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: PathBuf,
    pub kind: FileKind,
    pub contents: String,
}

/// Outcome of [`Dumper::dump`]; paths include the output directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpReport {
    pub written: Vec<PathBuf>,
    /// Existing files left untouched because `force` was off
    pub skipped: Vec<PathBuf>,
    /// Files a dry run would have written
    pub planned: Vec<PathBuf>,
}

/// Generates a Sequelize/Express backend from a schema description
///
/// ```rust,ignore
/// use ormforge::{Dumper, DumperConfig};
///
/// let mut config = DumperConfig::new("my-backend");
/// config.db_connection_url = Some("postgres://localhost:5432/shop".into());
/// let report = Dumper::new(config).force(true).dump(&schema)?;
/// ```
#[derive(Debug, Clone)]
pub struct Dumper {
    config: DumperConfig,
    scope: GenerationScope,
    force: bool,
    dry_run: bool,
}

impl Dumper {
    pub fn new(config: DumperConfig) -> Self {
        Self {
            config,
            scope: GenerationScope::all(),
            force: false,
            dry_run: false,
        }
    }

    pub fn with_scope(mut self, scope: GenerationScope) -> Self {
        self.scope = scope;
        self
    }

    /// Overwrite files that already exist
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Report what would be written without touching the filesystem
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &DumperConfig {
        &self.config
    }

    /// Directory every generated path is relative to
    pub fn output_dir(&self) -> &Path {
        Path::new(&self.config.app_name)
    }

    /// Load a schema description from `schema_path` and dump it.
    ///
    /// # Errors
    ///
    /// See [`load_schema`] and [`Dumper::dump`].
    pub fn dump_file(&self, schema_path: &Path) -> anyhow::Result<DumpReport> {
        let schema = load_schema(schema_path)?;
        self.dump(&schema)
    }

    /// Render the project and write it below [`Dumper::output_dir`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the schema is invalid, if a
    /// template fails to render, or if a directory or file cannot be written.
    /// Files written before the failure are left in place.
    pub fn dump(&self, schema: &SchemaDescription) -> anyhow::Result<DumpReport> {
        let files = self.render(schema)?;
        let base = self.output_dir();
        let mut report = DumpReport::default();

        for file in files {
            let path = base.join(&file.path);
            if self.dry_run {
                debug!(path = %path.display(), kind = ?file.kind, "would generate file");
                report.planned.push(path);
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            if !write_file(&path, &file.contents, self.force)? {
                warn!(path = %path.display(), "skipping existing file (enable force to overwrite)");
                report.skipped.push(path);
                continue;
            }
            info!(path = %path.display(), kind = ?file.kind, "generated file");
            report.written.push(path);
        }

        info!(
            output = %base.display(),
            written = report.written.len(),
            skipped = report.skipped.len(),
            planned = report.planned.len(),
            "dump complete"
        );
        Ok(report)
    }

    /// Render every file in scope, in a stable order, without writing anything.
    ///
    /// # Errors
    ///
    /// Returns the [`crate::error::ConfigError`] or [`crate::error::SchemaError`]
    /// found by validation, or a template rendering error.
    pub fn render(&self, schema: &SchemaDescription) -> anyhow::Result<Vec<GeneratedFile>> {
        self.config.validate()?;
        if self.config.db {
            schema.validate()?;
        }

        let mut files = Vec::new();
        if self.config.db {
            let stems = file_stems(schema);
            if self.scope.models {
                for ((table_name, table), stem) in schema.tables.iter().zip(&stems) {
                    files.push(GeneratedFile {
                        path: Path::new("models").join(format!("{stem}.js")),
                        kind: FileKind::Model,
                        contents: self.render_model(table_name, table)?,
                    });
                }
            }
            if self.scope.routes {
                for (table_name, stem) in schema.tables.keys().zip(&stems) {
                    files.push(GeneratedFile {
                        path: Path::new("routes").join(format!("{stem}.js")),
                        kind: FileKind::Route,
                        contents: self.render_route(table_name, stem)?,
                    });
                }
            }
            if self.scope.index {
                files.push(GeneratedFile {
                    path: Path::new("models").join("index.js"),
                    kind: FileKind::ModelsIndex,
                    contents: self.render_models_index()?,
                });
            }
        }
        if self.scope.env {
            files.push(GeneratedFile {
                path: PathBuf::from(".env"),
                kind: FileKind::Env,
                contents: self.render_env()?,
            });
        }
        if self.scope.scaffolding {
            files.extend(self.render_scaffolding()?);
        }

        debug!(files = files.len(), "rendered project");
        Ok(files)
    }

    /// Render the model definition of one table.
    pub fn render_model(&self, table_name: &str, table: &TableSchema) -> anyhow::Result<String> {
        let underscored = table.options.underscored;
        let data = ModelTemplateData {
            table: escape_js_string(table_name),
            model_name: model_name(table_name),
            model_variable_name: model_variable_name(table_name),
            fields: table
                .fields
                .iter()
                .map(|f| field_view(f, underscored))
                .collect(),
            references: table.references.iter().map(reference_view).collect(),
            underscored,
            timestamps_disabled: !table.options.timestamps,
            has_schema: self.has_schema(),
            no_id: lacks_id(table),
        };
        render_file(&data).with_context(|| format!("Failed to render model of table '{table_name}'"))
    }

    /// Render the router of one table, mounted under `/<route_path>`.
    pub fn render_route(&self, table_name: &str, route_path: &str) -> anyhow::Result<String> {
        let data = RouteTemplateData {
            table: escape_js_string(table_name),
            model_name: model_name(table_name),
            route_path: route_path.to_string(),
        };
        render_file(&data).with_context(|| format!("Failed to render route of table '{table_name}'"))
    }

    pub fn render_models_index(&self) -> anyhow::Result<String> {
        let dialect = self.config.db_dialect;
        let data = ModelsIndexTemplateData {
            dialect: dialect.to_string(),
            encrypt_ssl: dialect.ssl_style() == SslStyle::Encrypt,
            standard_ssl: dialect.ssl_style() == SslStyle::Standard,
        };
        render_file(&data).context("Failed to render models/index.js")
    }

    pub fn render_env(&self) -> anyhow::Result<String> {
        let config = &self.config;
        let data = EnvTemplateData {
            port: config.app_port,
            application_url: config.application_url(),
            with_database: config.db,
            database_url: config.database_url().to_string(),
            has_docker_database_url: config.db && !config.target_os().is_linux(),
            docker_database_url: config.docker_database_url(),
            has_schema: self.has_schema(),
            schema: config.db_schema.clone().unwrap_or_default(),
            ssl: config.ssl,
            application_secret: config.application_secret.clone().unwrap_or_default(),
        };
        render_file(&data).context("Failed to render .env")
    }

    fn render_scaffolding(&self) -> anyhow::Result<Vec<GeneratedFile>> {
        let config = &self.config;
        let package_name = self.package_name();
        let is_linux = config.target_os().is_linux();

        let mut dependencies: Vec<NpmDependency> = BASE_DEPENDENCIES
            .iter()
            .map(|(name, version)| npm_dependency(name, version))
            .collect();
        if config.db {
            let (driver, version) = config.db_dialect.driver_package();
            dependencies.push(npm_dependency(driver, version));
            dependencies.push(npm_dependency("sequelize", SEQUELIZE_VERSION));
        }
        dependencies.sort();

        let scaffold = |path: &str, contents: String| GeneratedFile {
            path: PathBuf::from(path),
            kind: FileKind::Scaffolding,
            contents,
        };

        Ok(vec![
            scaffold(
                "package.json",
                render_file(&PackageJsonTemplateData {
                    package_name: package_name.clone(),
                    dependencies,
                })?,
            ),
            scaffold(
                "app.js",
                render_file(&AppJsTemplateData {
                    with_routes: config.db,
                })?,
            ),
            scaffold(
                "server.js",
                render_file(&ServerJsTemplateData {
                    hostname: config.app_hostname.clone(),
                    port: config.app_port,
                })?,
            ),
            scaffold(
                "Dockerfile",
                render_file(&DockerfileTemplateData {
                    port: config.app_port,
                })?,
            ),
            scaffold(
                "docker-compose.yml",
                render_file(&DockerComposeTemplateData {
                    container_name: package_name,
                    port: config.app_port,
                    host_network: is_linux,
                    use_docker_database_url: config.db && !is_linux,
                })?,
            ),
            scaffold(".gitignore", render_file(&GitignoreTemplate)?),
        ])
    }

    fn has_schema(&self) -> bool {
        self.config
            .db_schema
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// npm package name: the kebab-cased last component of the output directory
    fn package_name(&self) -> String {
        self.output_dir()
            .file_name()
            .and_then(|n| n.to_str())
            .map(kebab_case)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "backend".to_string())
    }
}

fn npm_dependency(name: &str, version: &str) -> NpmDependency {
    NpmDependency {
        name: name.to_string(),
        version: version.to_string(),
    }
}

/// Write `contents` to `path`, returning `false` when the file already exists
/// and `force` is off. Without `force` the file is created with `create_new`,
/// so a file that appears after rendering is never clobbered.
pub(super) fn write_file(path: &Path, contents: &str, force: bool) -> anyhow::Result<bool> {
    if force {
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(true);
    }
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create {}", path.display()));
        }
    };
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

/// File stems of every table, in table order
fn file_stems(schema: &SchemaDescription) -> Vec<String> {
    let mut seen = HashSet::new();
    schema
        .tables
        .keys()
        .map(|table| unique_file_stem(&mut seen, table))
        .collect()
}

/// Remove a generated output directory. A missing directory is not an error.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be removed.
pub fn clean_output(dir: &Path) -> anyhow::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            info!(output = %dir.display(), "cleaned output directory");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e)
            .with_context(|| format!("Failed to clean output directory {}", dir.display())),
    }
}
