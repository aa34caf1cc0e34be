//! # ormforge
//!
//! **ormforge** generates the source of a Sequelize/Express backend from the
//! description of an existing relational database.
//!
//! ## Overview
//!
//! A schema analysis step inspects a live database and produces a description
//! of its tables: columns, types, defaults, primary keys and associations.
//! ormforge turns that description into a runnable Node.js project with one
//! Sequelize model and one CRUD router per table, plus the files needed to
//! start it locally or in Docker.
//!
//! ## Architecture
//!
//! - **[`schema`]** - Schema description types, JSON/YAML loading and validation
//! - **[`naming`]** - Case conversions and JavaScript-safe identifiers
//! - **[`config`]** - Generator settings (`DumperConfig`), TOML loading and env overrides
//! - **[`dumper`]** - Rendering of models, routes, index, `.env` and scaffolding
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`error`]** - Validation error types
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant Schema as schema::load_schema
//!     participant Dumper as dumper::Dumper
//!     participant Views as dumper::views
//!     participant Templates as askama templates
//!     participant FS as File System
//!
//!     User->>Schema: load_schema("schema.json")
//!     Schema-->>User: SchemaDescription
//!     User->>Dumper: Dumper::new(config).dump(&schema)
//!     Dumper->>Dumper: validate config and schema
//!     Dumper->>Views: field_view / reference_view per table
//!     Views-->>Dumper: FieldView, ReferenceView
//!     Dumper->>Templates: render model, route, index, .env, scaffolding
//!     Templates-->>Dumper: Vec<GeneratedFile>
//!     Dumper->>FS: create directories, write files (skip existing unless forced)
//!     Dumper-->>User: DumpReport
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use ormforge::{load_schema, Dumper, DumperConfig};
//! use std::path::Path;
//!
//! let schema = load_schema(Path::new("schema.json")).expect("Failed to load schema");
//!
//! let mut config = DumperConfig::new("my-backend");
//! config.db_connection_url = Some("postgres://localhost:5432/shop".to_string());
//! config.db_schema = Some("public".to_string());
//!
//! let report = Dumper::new(config).dump(&schema).expect("Failed to generate project");
//! println!("{} files written", report.written.len());
//! ```
//!
//! ## Naming Rules
//!
//! - Models are named after the camelCased table name; reserved JavaScript
//!   words and names starting with a digit get a `model` prefix
//!   (`export` → `modelExport`).
//! - Attributes are emitted with an explicit `field:` only when the column
//!   name cannot be derived from the attribute name.
//! - Columns whose name contains parentheses (computed columns of views) are
//!   keyed by their quoted column name.
//!
//! ## Target OS
//!
//! Docker on Linux shares the host network; elsewhere containers reach the
//! database through `host.docker.internal`. The generated `.env` and
//! `docker-compose.yml` follow the OS detected at runtime, or the one pinned
//! in the `targetOs` setting of [`DumperConfig`].

pub mod config;
pub mod dumper;
pub mod error;
pub mod logging;
pub mod naming;
pub mod schema;

pub use config::{load_config, Dialect, DumperConfig, TargetOs};
pub use dumper::{clean_output, DumpReport, Dumper, GeneratedFile, GenerationScope};
pub use error::{ConfigError, SchemaError};
pub use schema::{load_schema, SchemaDescription};
