//! Generate command - render or inject module documentation.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info, warn};

use specdoc_inject::Injector;
use specdoc_runner::{
    CommandSource, FileSource, ModuleRef, RawFormat, SourceError, SpecSource,
};
use specdoc_spec::{Document, SpecNormalizer};
use specdoc_templates::{
    AnsibleDoc, ArgSpecDump, OutputFormat, Renderer, StructuredDump, TemplateError,
    TemplatedRender,
};

use crate::config::SpecdocConfig;
use crate::error::CliError;

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Read the module source from stdin
    #[arg(short, long, requires = "module_name", conflicts_with = "input_file")]
    pub stdin: bool,

    /// Module name (default: input file stem)
    #[arg(short = 'n', long, alias = "module_name")]
    pub module_name: Option<String>,

    /// Module source file, or a .json/.yaml/.yml spec data file
    #[arg(short, long, alias = "input_file", value_name = "PATH")]
    pub input_file: Option<PathBuf>,

    /// Read the raw spec from this data file instead of the provider
    #[arg(long, alias = "spec_file", value_name = "PATH")]
    pub spec_file: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long, alias = "output_file", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Output format: yaml, json, template or argspec
    #[arg(short = 'f', long, alias = "output_format", value_parser = parse_output_format)]
    pub output_format: Option<OutputFormat>,

    /// Inject DOCUMENTATION, RETURN and EXAMPLES into the input file
    #[arg(
        short = 'j',
        long,
        requires = "input_file",
        conflicts_with_all = ["output_format", "stdin", "output_file"]
    )]
    pub inject: bool,

    /// Handlebars template for the template format
    #[arg(short, long, alias = "template_file", value_name = "PATH")]
    pub template_file: Option<PathBuf>,

    /// With --inject, empty the injected fields instead
    #[arg(short, long, alias = "clear_injected_fields", requires = "inject")]
    pub clear_injected_fields: bool,
}

fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: TemplateError| e.to_string())
}

pub fn execute(args: GenerateArgs, config: &SpecdocConfig) -> Result<()> {
    if args.clear_injected_fields {
        return clear(&args, config);
    }

    let module = module_ref(&args)?;
    let source = select_source(&args, config, &module)?;
    info!("Loading spec for {} from {}", module.name, source.describe());

    let document = load_document(source.as_ref(), &module)?;

    if args.inject {
        let path = input_path(&args)?;
        if is_spec_data(path) {
            return Err(CliError::InvalidArgs(
                "--inject needs a module source file, not spec data".to_string(),
            )
            .into());
        }
        inject(path, config, &document)
    } else {
        let output = render_document(&args, config, &document)?;
        write_output(args.output_file.as_deref(), &output)
    }
}

/// Load and normalize the document of one module.
pub fn load_document(source: &dyn SpecSource, module: &ModuleRef) -> Result<Document> {
    let raw = source.load(module)?;
    let document = SpecNormalizer::normalize(&module.name, &raw)
        .with_context(|| format!("Invalid spec for module {}", module.name))?;
    debug!(
        "Normalized {} with {} option(s)",
        document.module,
        document.options.len()
    );
    Ok(document)
}

/// Render a document in the requested format.
pub fn render_document(
    args: &GenerateArgs,
    config: &SpecdocConfig,
    document: &Document,
) -> Result<String> {
    let format = match args.output_format {
        Some(format) => format,
        None => config.output_format()?.unwrap_or(OutputFormat::Yaml),
    };

    if args.template_file.is_some() && format != OutputFormat::Template {
        warn!("--template-file is ignored for the {} format", format);
    }

    let renderer: Box<dyn Renderer> = match format {
        OutputFormat::Yaml => Box::new(StructuredDump::Yaml),
        OutputFormat::Json => Box::new(StructuredDump::Json),
        OutputFormat::ArgSpec => Box::new(ArgSpecDump),
        OutputFormat::Template => {
            let path = args
                .template_file
                .clone()
                .or_else(|| config.template_path())
                .ok_or(TemplateError::MissingTemplate)?;
            Box::new(TemplatedRender::from_file(path)?)
        }
    };

    debug!("Rendering {} as {}", document.module, format);
    Ok(renderer.render(document)?)
}

fn module_ref(args: &GenerateArgs) -> Result<ModuleRef> {
    if args.stdin {
        let name = args
            .module_name
            .clone()
            .ok_or_else(|| CliError::InvalidArgs("--stdin requires --module-name".to_string()))?;
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read module source from stdin")?;
        return Ok(ModuleRef::new(name).with_content(content));
    }

    if let Some(path) = &args.input_file {
        if !path.exists() {
            return Err(SourceError::NotFound(path.clone()).into());
        }
        let path = fs::canonicalize(path).map_err(SourceError::Io)?;
        return Ok(ModuleRef::from_path(path, args.module_name.clone()));
    }

    if let Some(spec) = &args.spec_file {
        let name = args.module_name.clone().unwrap_or_else(|| {
            spec.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        return Ok(ModuleRef::new(name));
    }

    Err(CliError::InvalidArgs(
        "one of --input-file, --stdin or --spec-file is required".to_string(),
    )
    .into())
}

fn select_source(
    args: &GenerateArgs,
    config: &SpecdocConfig,
    module: &ModuleRef,
) -> Result<Box<dyn SpecSource>> {
    if let Some(spec) = &args.spec_file {
        return Ok(Box::new(FileSource::new(spec)?));
    }

    if let Some(input) = args.input_file.as_deref().filter(|p| is_spec_data(p)) {
        return Ok(Box::new(FileSource::new(input)?));
    }

    if config.provider.is_configured() {
        return Ok(Box::new(CommandSource::new(config.provider.clone())));
    }

    Err(SourceError::ProviderNotConfigured(module.name.clone()).into())
}

fn is_spec_data(path: &Path) -> bool {
    RawFormat::from_path(path).is_some()
}

fn input_path(args: &GenerateArgs) -> Result<&Path> {
    args.input_file
        .as_deref()
        .ok_or_else(|| CliError::InvalidArgs("--inject requires --input-file".to_string()).into())
}

fn inject(path: &Path, config: &SpecdocConfig, document: &Document) -> Result<()> {
    let sections = config.inject.sections(AnsibleDoc::render(document)?);

    if Injector::inject_file(path, &sections)? {
        info!("Injected documentation into {:?}", path);
    }
    Ok(())
}

fn clear(args: &GenerateArgs, config: &SpecdocConfig) -> Result<()> {
    let path = input_path(args)?;
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()).into());
    }

    if Injector::inject_file(path, &config.inject.clear_sections())? {
        info!("Cleared injected fields in {:?}", path);
    }
    Ok(())
}

fn write_output(path: Option<&Path>, output: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write output to {:?}", path))?;
            info!("Wrote {:?}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
