use contracts::usecases::u501_import_employees::{EMPLOYEE_IMPORT_COLUMNS, TEMPLATE_SAMPLE_ROWS};

/// CSV-шаблон импорта: заголовок в порядке колонок и примерные строки
pub fn render_template() -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EMPLOYEE_IMPORT_COLUMNS.iter().map(|c| c.name))?;
    for row in TEMPLATE_SAMPLE_ROWS {
        writer.write_record(row.iter())?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish template: {}", e))
}
