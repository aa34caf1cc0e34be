use askama::Template;

use super::views::{FieldView, ReferenceView};

/// Template data for a Sequelize model definition
#[derive(Template)]
#[template(path = "model.js.txt", escape = "none")]
pub struct ModelTemplateData {
    /// Table name as stored in the database, escaped for a single-quoted string
    pub table: String,
    /// Sequelize model name (safe camelCase)
    pub model_name: String,
    /// Local variable holding the model (safe PascalCase)
    pub model_variable_name: String,
    pub fields: Vec<FieldView>,
    pub references: Vec<ReferenceView>,
    pub underscored: bool,
    pub timestamps_disabled: bool,
    /// Emits `schema: process.env.DATABASE_SCHEMA`
    pub has_schema: bool,
    /// Emits `removeAttribute('id')`
    pub no_id: bool,
}

/// Template data for an Express CRUD router
#[derive(Template)]
#[template(path = "route.js.txt", escape = "none")]
pub struct RouteTemplateData {
    /// Escaped table name
    pub table: String,
    /// Key of the model in the models object
    pub model_name: String,
    /// Path segment the routes are mounted under
    pub route_path: String,
}

/// Template data for `models/index.js`
#[derive(Template)]
#[template(path = "models_index.js.txt", escape = "none")]
pub struct ModelsIndexTemplateData {
    pub dialect: String,
    /// `dialectOptions.options.encrypt` (mssql)
    pub encrypt_ssl: bool,
    /// `dialectOptions.ssl`
    pub standard_ssl: bool,
}

/// Template data for `.env`
#[derive(Template)]
#[template(path = "env.txt", escape = "none")]
pub struct EnvTemplateData {
    pub port: u16,
    pub application_url: String,
    pub with_database: bool,
    pub database_url: String,
    /// Only outside Linux, where containers cannot share the host network
    pub has_docker_database_url: bool,
    pub docker_database_url: String,
    pub has_schema: bool,
    pub schema: String,
    pub ssl: bool,
    pub application_secret: String,
}

/// npm dependency listed in `package.json`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NpmDependency {
    pub name: String,
    pub version: String,
}

/// Template data for `package.json`
#[derive(Template)]
#[template(path = "package.json.txt", escape = "none")]
pub struct PackageJsonTemplateData {
    pub package_name: String,
    /// Sorted by name
    pub dependencies: Vec<NpmDependency>,
}

/// Template data for `app.js`
#[derive(Template)]
#[template(path = "app.js.txt", escape = "none")]
pub struct AppJsTemplateData {
    /// Mounts every router found in `routes/`
    pub with_routes: bool,
}

/// Template data for `server.js`
#[derive(Template)]
#[template(path = "server.js.txt", escape = "none")]
pub struct ServerJsTemplateData {
    pub hostname: String,
    pub port: u16,
}

/// Template data for `Dockerfile`
#[derive(Template)]
#[template(path = "Dockerfile.txt", escape = "none")]
pub struct DockerfileTemplateData {
    pub port: u16,
}

/// Template data for `docker-compose.yml`
#[derive(Template)]
#[template(path = "docker-compose.yml.txt", escape = "none")]
pub struct DockerComposeTemplateData {
    pub container_name: String,
    pub port: u16,
    /// `network_mode: host`, Linux only
    pub host_network: bool,
    /// Points the container at `DOCKER_DATABASE_URL`
    pub use_docker_database_url: bool,
}

/// Template for `.gitignore`
#[derive(Template)]
#[template(path = "gitignore.txt", escape = "none")]
pub struct GitignoreTemplate;

/// Render a template as the content of a text file.
///
/// The output always ends with a newline, whether or not the engine kept the
/// final newline of the template source.
pub fn render_file<T: Template>(template: &T) -> anyhow::Result<String> {
    let mut rendered = template.render()?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}
