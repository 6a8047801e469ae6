use calamine::{open_workbook_auto, Reader};
use comin_adapters::{CalamineSheetSource, MessageTemplate, XlsxWorkbookWriter};
use comin_core::{DataSourceError, ReportLayout, SheetSource, WorkbookWriter};
use comin_domain::{CellValue, LineItem, ReportGroup, Row};
use std::path::PathBuf;

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("comin-adapters-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn row(code: f64, desc: &str, comissao: f64) -> Row {
    [("COD", CellValue::Number(code)),
     ("CL. DESC", CellValue::from(desc)),
     ("COMISSÃO", CellValue::Number(comissao))].into_iter()
                                               .map(|(k, v)| (k.to_string(), v))
                                               .collect()
}

fn group() -> ReportGroup {
    let items = vec![LineItem::from_row(row(101.0, "Areia", 12.5)).unwrap(),
                     LineItem::from_row(row(101.0, "Brita", -3.0)).unwrap()];
    ReportGroup::new("101", items, vec!["v@x.com".into()]).unwrap()
}

#[test]
fn written_report_reads_back_with_subtotal_formula() {
    let dir = temp_dir();
    let path = dir.join("comissao_101_2025-06-04.xlsx");
    let layout = ReportLayout::for_group(&group());
    XlsxWorkbookWriter.write(&layout, &path).unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Vendedor_101".to_string()]);
    let formulas = workbook.worksheet_formula("Vendedor_101").unwrap();
    let formula = formulas.get_value((0, 5)).cloned().unwrap_or_default();
    assert_eq!(formula.trim_start_matches('='), "SUBTOTAL(109,C2:C3)");

    // la hoja escrita es legible por el propio adaptador de lectura
    let rows = CalamineSheetSource.read_sheet(&path, "Vendedor_101").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["CL. DESC"], CellValue::from("Areia"));
    assert_eq!(rows[1]["COMISSÃO"], CellValue::Number(-3.0));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_sheet_is_distinguished_from_missing_file() {
    let dir = temp_dir();
    let path = dir.join("upload.xlsx");
    XlsxWorkbookWriter.write(&ReportLayout::for_group(&group()), &path).unwrap();
    let err = CalamineSheetSource.read_sheet(&path, "apibase").unwrap_err();
    assert!(matches!(err, DataSourceError::MissingSheet { ref sheet, .. } if sheet == "apibase"));
    let err = CalamineSheetSource.read_sheet(&dir.join("nada.xlsx"), "apibase").unwrap_err();
    assert!(matches!(err, DataSourceError::FileNotFound(_)));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn template_survives_save_and_load() {
    let dir = temp_dir();
    let path = dir.join("config").join("message.json");
    let template = MessageTemplate::new("Comissão <pmes>", "Segue a planilha de <pmes>/<ano>.");
    template.save(&path).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"assunto\""));
    assert_eq!(MessageTemplate::load(&path).unwrap(), template);
    assert!(MessageTemplate::load(&dir.join("nada.json")).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
