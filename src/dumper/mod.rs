//! # Dumper Module
//!
//! Turns a [`SchemaDescription`](crate::schema::SchemaDescription) into the
//! source tree of a Sequelize/Express backend.
//!
//! ## Output
//!
//! ```text
//! <appName>/
//! ├── models/
//! │   ├── index.js          # connection, model loading, associations
//! │   └── <table>.js        # one Sequelize model per table
//! ├── routes/
//! │   └── <table>.js        # one CRUD router per table
//! ├── .env                  # differs between Linux and other systems
//! ├── package.json
//! ├── app.js
//! ├── server.js
//! ├── Dockerfile
//! ├── docker-compose.yml
//! └── .gitignore
//! ```
//!
//! File stems are the kebab-cased table names, suffixed `-1`, `-2`, ... when
//! two tables map to the same stem.
//!
//! ## Rendering
//!
//! Each file is an askama template under `templates/`. The schema is first
//! converted into view structs ([`views`]) so that the templates only test
//! booleans and print strings.
//!
//! ## Writing
//!
//! [`Dumper::render`] is pure. [`Dumper::dump`] writes the rendered files and
//! leaves existing ones alone unless `force` is set; `dry_run` only reports.

mod project;
mod templates;
pub mod views;


pub use project::{
    clean_output, DumpReport, Dumper, FileKind, GeneratedFile, GenerationPart, GenerationScope,
};
