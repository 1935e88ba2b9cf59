mod fixtures;

use rstest::rstest;

use fixtures::{catalog, catalog_service, resolver, InMemoryCatalog, InMemoryResolver, TWO_SETS};
use geneset_batch::catalog::CatalogSnapshot;
use geneset_batch::record::{GeneType, ResolvedRecord};
use geneset_batch::{BatchConfig, BatchReader, BatchWriter, Error};

fn read(
    service: &InMemoryCatalog,
    resolver: &InMemoryResolver,
    catalog: &CatalogSnapshot,
    text: &str,
) -> Vec<ResolvedRecord> {
    let mut reader = BatchReader::new(service, resolver, catalog, BatchConfig::default());
    let records = reader.parse_str(text).unwrap().to_vec();
    assert!(reader.errors().is_empty(), "{:?}", reader.errors());
    records
}

fn summary(records: &[ResolvedRecord]) -> Vec<(String, String, Option<i64>, Option<GeneType>, Vec<(String, f64)>)> {
    records
        .iter()
        .map(|r| {
            (
                r.draft.abbreviation.clone(),
                r.draft.name.clone(),
                r.draft.species,
                r.draft.gene_type,
                r.values.iter().map(|v| (v.reference.clone(), v.score)).collect(),
            )
        })
        .collect()
}

#[rstest]
fn test_written_file_reads_back(
    catalog_service: InMemoryCatalog,
    resolver: InMemoryResolver,
    catalog: CatalogSnapshot,
) {
    let text = format!(
        "{}\n@ Homo sapiens\n% Symbol\n: HUMAN\n= Human genes\n+ d\nTNF\t0.1\n",
        TWO_SETS
    );
    let original = read(&catalog_service, &resolver, &catalog, &text);

    let written = BatchWriter::new(&catalog, BatchConfig::default())
        .serialize(&original)
        .unwrap();
    let reread = read(&catalog_service, &resolver, &catalog, &written);

    assert_eq!(summary(&reread), summary(&original));
    assert_eq!(reread[1].draft.threshold, original[1].draft.threshold);
    assert_eq!(reread[0].draft.description, original[0].draft.description);
}

#[rstest]
fn test_platform_gene_sets_read_back(
    catalog_service: InMemoryCatalog,
    resolver: InMemoryResolver,
    catalog: CatalogSnapshot,
) {
    let text = "\
! 0.40 < Correlation < 0.50
@ Mus musculus
% microarray Affymetrix GeneChip Mouse Genome 430 2.0 Array
: P1
= Probe set
+ probes
1415670_at\t0.45
";
    let original = read(&catalog_service, &resolver, &catalog, text);
    let written = BatchWriter::new(&catalog, BatchConfig::default())
        .serialize(&original)
        .unwrap();

    assert!(written.contains("\n% microarray Affymetrix GeneChip Mouse Genome 430 2.0 Array\n"));
    assert!(written.contains("\n! 0.40 < Correlation < 0.50\n"));
    let reread = read(&catalog_service, &resolver, &catalog, &written);
    assert_eq!(summary(&reread), summary(&original));
}

#[rstest]
fn test_rejected_output_leaves_no_file(
    catalog_service: InMemoryCatalog,
    resolver: InMemoryResolver,
    catalog: CatalogSnapshot,
) {
    let mut records = read(&catalog_service, &resolver, &catalog, TWO_SETS);
    records[1].draft.description.clear();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bgf");
    let result = BatchWriter::new(&catalog, BatchConfig::default()).write_path(&records, &path);

    match result {
        Err(Error::Rejected { errors }) => {
            assert_eq!(errors, vec!["CORTEX input gene set is missing description".to_string()])
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(!path.exists());
}

#[rstest]
fn test_write_path(catalog_service: InMemoryCatalog, resolver: InMemoryResolver, catalog: CatalogSnapshot) {
    let records = read(&catalog_service, &resolver, &catalog, TWO_SETS);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bgf");

    BatchWriter::new(&catalog, BatchConfig::default())
        .write_path(&records, &path)
        .unwrap();

    let mut reader = BatchReader::new(&catalog_service, &resolver, &catalog, BatchConfig::default());
    let reread = reader.parse_path(&path).unwrap().to_vec();
    assert_eq!(summary(&reread), summary(&records));
}

#[rstest]
fn test_dev_fields_read_back(catalog_service: InMemoryCatalog, resolver: InMemoryResolver, catalog: CatalogSnapshot) {
    let text = TWO_SETS.replace(": HIPPO", "A Private\nT 2\nU 17\nD CTD\n: HIPPO");
    let original = read(&catalog_service, &resolver, &catalog, &text);

    let config = BatchConfig {
        dev_fields: true,
        ..BatchConfig::default()
    };
    let written = BatchWriter::new(&catalog, config).serialize(&original).unwrap();
    let reread = read(&catalog_service, &resolver, &catalog, &written);

    assert_eq!(reread[0].draft.tier, Some(2));
    assert_eq!(reread[0].draft.user_id, Some(17));
    assert_eq!(reread[0].draft.groups, vec![-1]);
    assert_eq!(reread[1].attribution_id, original[1].attribution_id);
}
