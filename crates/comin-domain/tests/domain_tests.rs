use comin_domain::{CellValue, DomainError, LineItem, ReportGroup, Row, SalespersonRecord};

fn item(code: &str, desc: &str) -> LineItem {
    let row: Row = [("COD".to_string(), CellValue::from(code)),
                    ("CL. DESC".to_string(), CellValue::from(desc)),
                    ("COMISSÃO".to_string(), CellValue::Number(10.0))].into_iter()
                                                                      .collect();
    LineItem::from_row(row).unwrap()
}

#[test]
fn test_report_group_requires_items() {
    let err = ReportGroup::new("101", vec![], vec!["a@x.com".into()]).unwrap_err();
    assert_eq!(err, DomainError::EmptyGroup("101".into()));
}

#[test]
fn test_report_group_requires_recipients() {
    let err = ReportGroup::new("101", vec![item("101", "a")], vec![]).unwrap_err();
    assert_eq!(err, DomainError::NoRecipients("101".into()));
}

#[test]
fn test_report_group_headers_come_from_first_item() {
    let group = ReportGroup::new("101", vec![item("101", "b"), item("101", "a")], vec!["a@x.com".into()]).unwrap();
    assert_eq!(group.headers(), vec!["COD", "CL. DESC", "COMISSÃO"]);
    assert_eq!(group.items().len(), 2);
    assert_eq!(group.code(), "101");
}

#[test]
fn test_recipients_resolution_with_null_and_blank_fields() {
    // PRINCIPAL="A@x.com", ALTERNATIVO="", REGIONAL="a@X.com", CONTROLADORIA=null
    let row: Row = [("COD", CellValue::from("101")),
                    ("PRINCIPAL", CellValue::from("A@x.com")),
                    ("ALTERNATIVO", CellValue::from("")),
                    ("REGIONAL", CellValue::from("a@X.com")),
                    ("CONTROLADORIA", CellValue::Empty)].into_iter()
                                                        .map(|(k, v)| (k.to_string(), v))
                                                        .collect();
    let record = SalespersonRecord::from_row(&row).unwrap();
    assert_eq!(record.recipients(), vec!["a@x.com".to_string()]);
}
