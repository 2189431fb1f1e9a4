//! # Validate, Check & Types Subcommands
//!
//! `labcfg validate` runs every selected configuration type through the
//! same pipeline: load the document, validate it against its sub-schema,
//! then run the security rules. A missing document is skipped; a document
//! that does not parse is recorded as invalid; anything else that goes
//! wrong aborts the run.
//!
//! Returns exit code: 0 when every processed document is valid, 1 when any
//! is not. Operational failures surface as `Err` and map to 2 in `main`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use labcfg_core::{ConfigType, LabcfgError, ValidationResult};
use labcfg_report::{JsonReporter, ReportAggregator, Reporter, RunOutcome, TracingReporter};
use labcfg_schema::{load_config, render_errors, SchemaStore, SchemaValidator};
use labcfg_security::SecurityRuleEngine;

use crate::layout::Layout;
use crate::settings::{OutputFormat, Overrides, Settings};

/// Flags shared by every subcommand that reads a configuration tree.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Base directory holding `templates/` and `validation/` [env: LABCFG_BASE_DIR].
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Schema document path [env: LABCFG_SCHEMA_PATH].
    #[arg(long = "schema", value_name = "PATH")]
    pub schema_path: Option<PathBuf>,
}

/// Arguments for `labcfg validate`.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only validate this type. Repeatable; defaults to all types.
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<ConfigType>,

    /// Report format [env: LABCFG_FORMAT].
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for `labcfg check`.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Document to validate. A relative path is looked up in the current
    /// directory first, then under the base directory.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Configuration type of the document.
    #[arg(long = "type", value_name = "TYPE")]
    pub config_type: ConfigType,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Report format [env: LABCFG_FORMAT].
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for `labcfg types`.
#[derive(Args, Debug, Clone, Default)]
pub struct TypesArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Schema validation followed by security checks, for one document at a time.
#[derive(Debug)]
pub struct Pipeline {
    validator: SchemaValidator,
    security: SecurityRuleEngine,
}

impl Pipeline {
    /// Load the schema document at `schema_path` and compile the
    /// definitions for `types`. Definitions of other types are not compiled.
    pub fn load(schema_path: &Path, types: &[ConfigType]) -> Result<Self, LabcfgError> {
        let store = SchemaStore::load(schema_path)?;
        Self::from_store(&store, types)
    }

    pub fn from_store(store: &SchemaStore, types: &[ConfigType]) -> Result<Self, LabcfgError> {
        Ok(Self {
            validator: SchemaValidator::for_types(store, types)?,
            security: SecurityRuleEngine::new(),
        })
    }

    /// Validate the document at `path` as `config_type`.
    ///
    /// A document that fails to parse comes back as an invalid result.
    ///
    /// # Errors
    ///
    /// [`LabcfgError::ConfigNotFound`] if the file is missing, and any
    /// fatal error from loading or validation.
    pub fn check_document(
        &self,
        config_type: ConfigType,
        path: &Path,
    ) -> Result<ValidationResult, LabcfgError> {
        let mut result = ValidationResult::new(config_type, path.display().to_string());

        let document = match load_config(path) {
            Ok(document) => document,
            Err(LabcfgError::ConfigParse { reason, .. }) => {
                result.add_error(format!("Failed to parse configuration: {reason}"));
                return Ok(result);
            }
            Err(e) => return Err(e),
        };

        let violations = self.validator.validate(config_type, &document)?;
        for error in render_errors(&violations) {
            result.add_error(error);
        }
        for warning in self.security.check(config_type, &document) {
            result.add_security_warning(warning);
        }
        result.mark_as_valid();

        tracing::debug!(
            %config_type,
            path = %path.display(),
            errors = result.errors().len(),
            warnings = result.security_warnings().len(),
            "document checked"
        );
        Ok(result)
    }

    /// Process `types` in order, feeding results into `aggregator`.
    ///
    /// # Errors
    ///
    /// Stops at the first fatal error; missing documents are skipped.
    pub fn run<R: Reporter>(
        &self,
        layout: &Layout,
        types: &[ConfigType],
        aggregator: &mut ReportAggregator<R>,
    ) -> Result<(), LabcfgError> {
        for &config_type in types {
            let path = layout.config_path(config_type);
            aggregator.begin(config_type, &path);
            match self.check_document(config_type, &path) {
                Ok(result) => aggregator.record(result),
                Err(e) if e.is_skippable() => aggregator.skip(config_type, &path, e.to_string()),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Execute `labcfg validate`.
pub fn run_validate(args: &ValidateArgs, env: Settings) -> Result<u8> {
    let settings = env.with_overrides(Overrides {
        base_dir: args.source.base_dir.clone(),
        schema_path: args.source.schema_path.clone(),
        types: args.types.clone(),
        format: args.format,
    });
    let layout = settings.layout();
    let types = settings.selected_types();

    tracing::debug!(
        base_dir = %layout.base_dir().display(),
        schema = %layout.schema_path().display(),
        ?types,
        "starting validation run"
    );

    let pipeline =
        Pipeline::load(layout.schema_path(), &types).context("failed to load schema")?;

    let outcome = match settings.format {
        OutputFormat::Text => validate_tree(&pipeline, &layout, &types, TracingReporter)?,
        OutputFormat::Json => {
            validate_tree(&pipeline, &layout, &types, JsonReporter::new(io::stdout().lock()))?
        }
    };
    Ok(outcome.exit_code())
}

/// Run the pipeline over a whole tree with the given reporter.
pub fn validate_tree<R: Reporter>(
    pipeline: &Pipeline,
    layout: &Layout,
    types: &[ConfigType],
    reporter: R,
) -> Result<RunOutcome> {
    let mut aggregator = ReportAggregator::new(reporter);
    pipeline
        .run(layout, types, &mut aggregator)
        .context("validation aborted")?;
    aggregator.finish().context("failed to write report")
}

/// Execute `labcfg check`.
pub fn run_check(args: &CheckArgs, env: Settings) -> Result<u8> {
    let settings = env.with_overrides(Overrides {
        base_dir: args.source.base_dir.clone(),
        schema_path: args.source.schema_path.clone(),
        types: Vec::new(),
        format: args.format,
    });
    let layout = settings.layout();
    let path = layout.resolve(&args.path);

    let pipeline = Pipeline::load(layout.schema_path(), &[args.config_type])
        .context("failed to load schema")?;

    let outcome = match settings.format {
        OutputFormat::Text => check_file(&pipeline, args.config_type, &path, TracingReporter)?,
        OutputFormat::Json => check_file(
            &pipeline,
            args.config_type,
            &path,
            JsonReporter::new(io::stdout().lock()),
        )?,
    };
    Ok(outcome.exit_code())
}

/// Check one document. Unlike a tree run, a missing file is an error.
pub fn check_file<R: Reporter>(
    pipeline: &Pipeline,
    config_type: ConfigType,
    path: &Path,
    reporter: R,
) -> Result<RunOutcome> {
    let mut aggregator = ReportAggregator::new(reporter);
    aggregator.begin(config_type, path);
    let result = pipeline
        .check_document(config_type, path)
        .with_context(|| format!("failed to check {}", path.display()))?;
    aggregator.record(result);
    aggregator.finish().context("failed to write report")
}

/// Execute `labcfg types`.
pub fn run_types(args: &TypesArgs, env: Settings) -> Result<u8> {
    let settings = env.with_overrides(Overrides {
        base_dir: args.source.base_dir.clone(),
        schema_path: args.source.schema_path.clone(),
        ..Overrides::default()
    });
    let layout = settings.layout();
    let store = SchemaStore::load(layout.schema_path()).context("failed to load schema")?;
    list_types(&store, &layout, &mut io::stdout().lock())?;
    Ok(0)
}

/// Print one line per type: name, whether the schema defines it, rule
/// count, and the expected document path.
pub fn list_types(store: &SchemaStore, layout: &Layout, out: &mut impl Write) -> Result<()> {
    let defined = store.defined_types();
    let security = SecurityRuleEngine::new();
    for &config_type in ConfigType::all() {
        let status = if defined.contains(&config_type) {
            "defined"
        } else {
            "missing"
        };
        writeln!(
            out,
            "{:<8} {:<8} {} rule(s)  {}",
            config_type.as_str(),
            status,
            security.rules_for(config_type).len(),
            layout.config_path(config_type).display()
        )?;
    }
    Ok(())
}
