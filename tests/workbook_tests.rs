use anyhow::Result;
use lab_catalog::core::Pipeline;
use lab_catalog::utils::error::Stage;
use lab_catalog::{
    EtlEngine, EtlError, LabPipeline, LabRecord, LocalStorage, MissingValuePolicy, RunConfig,
};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;
use tempfile::TempDir;

fn write_rows(sheet: &mut Worksheet, first_row: u32, rows: &[(&str, &str)]) -> Result<()> {
    sheet.write_string(first_row, 0, "LABORATOIRE")?;
    sheet.write_string(first_row, 1, "PRODUIT")?;
    for (offset, (lab, product)) in rows.iter().enumerate() {
        let row = first_row + 1 + offset as u32;
        sheet.write_string(row, 0, *lab)?;
        sheet.write_string(row, 1, *product)?;
    }
    Ok(())
}

/// `cccc.xlsx` with the catalogue on the first sheet and an older export on "Archive".
fn write_catalogue(dir: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let catalogue = workbook.add_worksheet();
    catalogue.set_name("Catalogue")?;
    write_rows(
        catalogue,
        0,
        &[
            ("LabA ", "Aspirin"),
            ("LabA ", " Aspirin"),
            ("LabA ", "Ibuprofen"),
            ("Sérvier", "Daflon"),
        ],
    )?;
    catalogue.write_string(5, 0, "Pfizer")?;
    catalogue.write_number(5, 1, 1234.0)?;

    let archive = workbook.add_worksheet();
    archive.set_name("Archive")?;
    write_rows(archive, 0, &[("Bayer", "Aspegic")])?;

    workbook.save(dir.join("cccc.xlsx"))?;
    Ok(())
}

fn engine_for(dir: &Path, config: RunConfig) -> EtlEngine<LabPipeline<LocalStorage, RunConfig>> {
    let storage = LocalStorage::new(dir.to_str().unwrap());
    EtlEngine::new(LabPipeline::new(storage, config))
}

fn read_records(path: &Path) -> Result<Vec<LabRecord>> {
    Ok(serde_json::from_slice(&std::fs::read(path)?)?)
}

#[test]
fn test_default_run_reads_first_sheet() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_catalogue(temp_dir.path())?;

    let summary = engine_for(temp_dir.path(), RunConfig::default()).run()?;

    assert_eq!(summary.output_path, "labs.json");
    assert_eq!(summary.rows_read, 5);
    let records = read_records(&temp_dir.path().join("labs.json"))?;
    assert_eq!(
        records,
        vec![
            LabRecord {
                lab: "LabA".to_string(),
                products: vec![
                    "Aspirin".to_string(),
                    "Aspirin".to_string(),
                    "Ibuprofen".to_string()
                ],
            },
            LabRecord {
                lab: "Pfizer".to_string(),
                products: vec!["1234".to_string()],
            },
            LabRecord {
                lab: "Sérvier".to_string(),
                products: vec!["Daflon".to_string()],
            },
        ]
    );
    Ok(())
}

#[test]
fn test_named_sheet_is_selected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_catalogue(temp_dir.path())?;

    let mut config = RunConfig::default();
    config.sheet = Some("Archive".to_string());
    engine_for(temp_dir.path(), config).run()?;

    let records = read_records(&temp_dir.path().join("labs.json"))?;
    assert_eq!(
        records,
        vec![LabRecord {
            lab: "Bayer".to_string(),
            products: vec!["Aspegic".to_string()],
        }]
    );
    Ok(())
}

#[test]
fn test_missing_sheet_fails_without_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_catalogue(temp_dir.path())?;

    let mut config = RunConfig::default();
    config.sheet = Some("Nope".to_string());
    let err = engine_for(temp_dir.path(), config).run().unwrap_err();

    match &err {
        EtlError::SheetNotFoundError { sheet, .. } => assert_eq!(sheet, "Nope"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.stage(), Stage::Load);
    assert!(!temp_dir.path().join("labs.json").exists());
    Ok(())
}

#[test]
fn test_header_below_blank_rows_keeps_sheet_line_numbers() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    // Rows 1-2 are left empty; the header sits on sheet line 3.
    write_rows(sheet, 2, &[("LabA", "Aspirin")])?;
    sheet.write_string(4, 0, "LabB")?;
    workbook.save(temp_dir.path().join("cccc.xlsx"))?;

    let pipeline = LabPipeline::new(
        LocalStorage::new(temp_dir.path().to_str().unwrap()),
        RunConfig {
            missing_values: MissingValuePolicy::Fail,
            ..RunConfig::default()
        },
    );

    let table = pipeline.extract()?;
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].line, 4);
    assert_eq!(table.rows[1].product, None);

    let err = pipeline.transform(table).unwrap_err();
    assert!(matches!(err, EtlError::MissingValueError { line: 5, .. }));
    Ok(())
}
