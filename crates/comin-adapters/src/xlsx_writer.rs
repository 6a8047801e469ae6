//! Escritura de informes con rust_xlsxwriter.
//!
//! Traduce un `ReportLayout` celda a celda. No decide nada de estilo: todo
//! viene resuelto en el layout, así que dos layouts iguales producen el mismo
//! contenido de hoja.

use comin_core::report::{CellStyle, LayoutValue, ReportLayout};
use comin_core::{ReportWriteError, WorkbookWriter};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxWorkbookWriter;

impl XlsxWorkbookWriter {
    pub fn new() -> Self {
        Self
    }
}

fn to_format(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if let Some(fill) = style.fill {
        format = format.set_background_color(Color::RGB(fill));
    }
    if let Some(color) = style.font_color {
        format = format.set_font_color(Color::RGB(color));
    }
    if style.centered {
        format = format.set_align(FormatAlign::Center).set_align(FormatAlign::VerticalCenter);
    }
    if style.border {
        format = format.set_border(FormatBorder::Thin);
    }
    if let Some(num_format) = &style.number_format {
        format = format.set_num_format(num_format);
    }
    format
}

fn render(layout: &ReportLayout) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&layout.sheet_name)?;

    for cell in &layout.cells {
        let format = to_format(&cell.style);
        match &cell.value {
            LayoutValue::Empty => worksheet.write_blank(cell.row, cell.col, &format)?,
            LayoutValue::Text(s) => worksheet.write_string_with_format(cell.row, cell.col, s, &format)?,
            LayoutValue::Number(n) => worksheet.write_number_with_format(cell.row, cell.col, *n, &format)?,
            LayoutValue::Bool(b) => worksheet.write_boolean_with_format(cell.row, cell.col, *b, &format)?,
            LayoutValue::Formula(f) => worksheet.write_formula_with_format(cell.row, cell.col, f.as_str(), &format)?,
        };
    }
    for (col, width) in &layout.column_widths {
        worksheet.set_column_width(*col, *width)?;
    }
    Ok(workbook)
}

impl WorkbookWriter for XlsxWorkbookWriter {
    fn write(&self, layout: &ReportLayout, path: &Path) -> Result<(), ReportWriteError> {
        let code = layout.sheet_name.trim_start_matches("Vendedor_").to_string();
        let mut workbook = render(layout).map_err(|e| ReportWriteError::Render { code,
                                                                                  reason: e.to_string() })?;
        workbook.save(path).map_err(|e| ReportWriteError::Save { path: path.to_path_buf(),
                                                                 reason: e.to_string() })?;
        log::debug!("planilha guardada en {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_sheet_name_is_a_render_error() {
        let layout = ReportLayout { sheet_name: "Vendedor_[1]".into(),
                                    headers: vec![],
                                    cells: vec![],
                                    column_widths: Default::default(),
                                    subtotal: None };
        let err = XlsxWorkbookWriter.write(&layout, Path::new("nunca.xlsx")).unwrap_err();
        assert!(matches!(err, ReportWriteError::Render { ref code, .. } if code == "[1]"));
    }
}
