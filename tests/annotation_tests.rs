//! End-to-end annotation through the public library API.
//!
//! These tests configure BED annotators from real files on disk and check
//! the annotations and coordinates records come out with.

use std::io::Write;
use std::path::Path;

use guide_annotate::parsing::remap::OLD_CONTIG_KEY;
use guide_annotate::scoring::registry::{build_model, ModelOptions};
use guide_annotate::scoring::{run_models, ConfigError, ScoreModel};
use guide_annotate::{
    BedAnnotator, EncodingContext, GenomicSite, OffTargetRecord, ParameterPack, Strand,
};
use tempfile::{NamedTempFile, TempDir};

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create fixture");
    file.write_all(content.as_bytes())
        .expect("Failed to write fixture");
    path
}

fn guide(contig: &str, position: u64) -> OffTargetRecord {
    OffTargetRecord::new(GenomicSite::new(
        contig,
        position,
        Strand::Forward,
        "GACGCATAAAGATGAGACGCTGG",
    ))
}

/// Scaffold guides are moved to chromosome coordinates and then annotated
#[test]
fn test_remap_then_annotate_batch() {
    let dir = TempDir::new().unwrap();
    let exons = write_file(
        dir.path(),
        "exons.bed",
        "chrX\t1030\t1045\tGENE1_exon1\nchrX\t1040\t1100\tGENE1_exon2\nchr2\t10\t20\tGENE2_exon1\n",
    );
    let repeats = write_file(dir.path(), "repeats.bed", "chr2\t0\t1000\tL1MA\n");
    let remap = write_file(
        dir.path(),
        "scaffolds.txt",
        "chrX\t1000\t5000\tscaffold_7\nchr2\t0\t900\tscaffold_8\n",
    );

    let mut annotator = BedAnnotator::new(
        format!("exons:{},repeats:{}", exons.display(), repeats.display()),
        Some(remap),
    );
    annotator.configure().unwrap();

    let mut records = vec![guide("scaffold_7", 42), guide("scaffold_8", 16), guide("chr5", 100)];
    let encoding = EncodingContext::from_params(&ParameterPack::default());
    annotator.annotate(&mut records, &encoding).unwrap();

    // scaffold_7:42 -> chrX:1041, inside both exons
    assert_eq!(records[0].target.contig, "chrX");
    assert_eq!(records[0].target.position, 1041);
    assert_eq!(
        records[0].annotations.get("exons").unwrap(),
        &["GENE1_exon1".to_string(), "GENE1_exon2".to_string()]
    );
    assert!(!records[0].annotations.contains("repeats"));

    // scaffold_8:16 -> chr2:15
    assert_eq!(records[1].target.contig, "chr2");
    assert_eq!(records[1].target.position, 15);
    assert_eq!(
        records[1].annotations.get("exons").unwrap(),
        &["GENE2_exon1".to_string()]
    );
    assert_eq!(
        records[1].annotations.get("repeats").unwrap(),
        &["L1MA".to_string()]
    );
    assert_eq!(
        records[1].annotations.get(OLD_CONTIG_KEY).unwrap(),
        &["scaffold_8".to_string()]
    );

    // chr5 has no mapping and no features
    assert_eq!(records[2], guide("chr5", 100));

    assert_eq!(
        annotator.header_columns(),
        vec!["exons", "repeats", OLD_CONTIG_KEY]
    );
}

/// Annotating the same batch twice appends a second round of values
#[test]
fn test_repeated_annotation_appends() {
    let dir = TempDir::new().unwrap();
    let bed = write_file(dir.path(), "features.bed", "chr1\t0\t100\tfeat\n");

    let mut annotator = BedAnnotator::new(format!("f:{}", bed.display()), None);
    annotator.configure().unwrap();

    let mut records = vec![guide("chr1", 50)];
    let encoding = EncodingContext::from_params(&ParameterPack::default());
    annotator.annotate(&mut records, &encoding).unwrap();
    annotator.annotate(&mut records, &encoding).unwrap();

    assert_eq!(records[0].annotations.get("f").unwrap().len(), 2);
}

#[test]
fn test_registry_driven_pipeline() {
    let mut bed = NamedTempFile::with_suffix(".bed").unwrap();
    writeln!(bed, "chr1\t100\t200\tpromoter").unwrap();
    bed.flush().unwrap();

    let options = ModelOptions {
        bed_sources: Some(format!("regulatory:{}", bed.path().display())),
        remap: None,
    };
    let models: Vec<Box<dyn ScoreModel>> = vec![build_model("bedannotator", &options).unwrap()];

    let params = ParameterPack::default();
    let encoding = EncodingContext::from_params(&params);
    let mut records = vec![guide("chr1", 100), guide("chr1", 200)];
    run_models(&models, &mut records, &params, &encoding).unwrap();

    assert!(records[0].annotations.contains("regulatory"));
    assert!(!records[1].annotations.contains("regulatory"));
}

#[test]
fn test_configuration_errors_surface_before_annotation() {
    let mut annotator = BedAnnotator::new("onlyname", None);
    assert!(matches!(
        annotator.configure(),
        Err(ConfigError::MalformedBedSpec(_))
    ));

    let dir = TempDir::new().unwrap();
    let bed = write_file(dir.path(), "a.bed", "");
    let bad_remap = write_file(dir.path(), "remap.txt", "chrX\tnot_a_number\t5000\tscaffold_7\n");
    let mut annotator = BedAnnotator::new(format!("a:{}", bed.display()), Some(bad_remap));
    assert!(matches!(annotator.configure(), Err(ConfigError::Remap(_))));
}
