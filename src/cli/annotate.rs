//! Annotate command - run annotation models over a guide table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::OutputFormat;
use crate::core::params::{EncodingContext, ParameterPack};
use crate::core::record::OffTargetRecord;
use crate::core::types::Enzyme;
use crate::parsing::guides::{read_guides, read_guides_file};
use crate::scoring::bed::BED_ANNOTATOR_NAME;
use crate::scoring::registry::{build_model, ModelOptions};
use crate::scoring::{run_models, ScoreModel};

/// Placeholder written for an annotation column a record has no values for
pub const MISSING_VALUE: &str = "NONE";

/// Arguments for the annotate command
#[derive(Args)]
pub struct AnnotateArgs {
    /// Guide table (TSV with contig, position, strand and target columns)
    /// Use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// BED sources as comma-separated name:path pairs
    /// (e.g. exons:exons.bed,repeats:rmsk.bed.gz)
    #[arg(long)]
    pub bed: Option<String>,

    /// Remap file (original_contig, offset_start, offset_stop, new_contig)
    /// used to move guides off renamed working contigs before annotation
    #[arg(long)]
    pub remap: Option<PathBuf>,

    /// Models to run, in order
    #[arg(long = "model", value_delimiter = ',', default_value = BED_ANNOTATOR_NAME)]
    pub models: Vec<String>,

    /// Enzyme the guides were designed for
    #[arg(long, value_enum, default_value = "sp-cas9")]
    pub enzyme: Enzyme,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the annotate command
///
/// # Errors
///
/// Returns an error if a model cannot be configured, the guide table cannot
/// be read, or annotation or output fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let params = ParameterPack::for_enzyme(args.enzyme);
    let encoding = EncodingContext::from_params(&params);

    // Configure every model before touching the input so bad options fail fast
    let options = ModelOptions {
        bed_sources: args.bed.clone(),
        remap: args.remap.clone(),
    };
    let models = args
        .models
        .iter()
        .map(|name| {
            build_model(name, &options).with_context(|| format!("configuring model '{name}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut records = if args.input.as_os_str() == "-" {
        read_guides(std::io::stdin().lock())?
    } else {
        read_guides_file(&args.input)
            .with_context(|| format!("reading guide table {}", args.input.display()))?
    };
    info!("Read {} guide records", records.len());

    if verbose {
        for model in &models {
            eprintln!("Model {}: {}", model.identity(), model.description());
        }
    }

    run_models(&models, &mut records, &params, &encoding)?;

    let columns = header_columns(&models);
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    match format {
        OutputFormat::Text => write_text(&mut out, &records, &columns)?,
        OutputFormat::Json => write_json(&mut out, &records, &columns)?,
        OutputFormat::Tsv => write_tsv(&mut out, &records, &columns)?,
    }
    out.flush()?;

    if verbose {
        let annotated = records
            .iter()
            .filter(|r| columns.iter().any(|c| r.annotations.contains(c)))
            .count();
        eprintln!("Annotated {annotated} of {} guides", records.len());
    }

    Ok(())
}

/// Output columns of all models, in model order
fn header_columns(models: &[Box<dyn ScoreModel>]) -> Vec<String> {
    models.iter().flat_map(|m| m.header_columns()).collect()
}

fn format_values(record: &OffTargetRecord, column: &str) -> String {
    record
        .annotations
        .get(column)
        .map_or_else(|| MISSING_VALUE.to_string(), |values| values.join(","))
}

fn write_tsv<W: Write>(
    out: &mut W,
    records: &[OffTargetRecord],
    columns: &[String],
) -> anyhow::Result<()> {
    let mut header = vec!["contig", "position", "strand", "target", "context"];
    header.extend(columns.iter().map(String::as_str));
    writeln!(out, "{}", header.join("\t"))?;

    for record in records {
        let site = &record.target;
        write!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            site.contig,
            site.position,
            site.strand,
            site.bases,
            site.context.as_deref().unwrap_or(MISSING_VALUE),
        )?;
        for column in columns {
            write!(out, "\t{}", format_values(record, column))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_json<W: Write>(
    out: &mut W,
    records: &[OffTargetRecord],
    columns: &[String],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "columns": columns,
        "records": records,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn write_text<W: Write>(
    out: &mut W,
    records: &[OffTargetRecord],
    columns: &[String],
) -> anyhow::Result<()> {
    for record in records {
        let site = &record.target;
        writeln!(
            out,
            "{}:{} ({}) {}",
            site.contig, site.position, site.strand, site.bases
        )?;
        for column in columns {
            if record.annotations.contains(column) {
                writeln!(out, "   {column}: {}", format_values(record, column))?;
            }
        }
    }
    Ok(())
}
