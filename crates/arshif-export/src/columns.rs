//! The shared ten-column projection used by every export format.

use chrono::{DateTime, Local, Utc};

use arshif_core::ArchiveRecord;

/// Column headers, in export order.
pub const EXPORT_HEADERS: [&str; 10] = [
    "نوع الملف",    // file type
    "تاريخ الأرشفة", // archive date
    "اسم المؤرشف",   // archiver name
    "الجهة المصدرة", // issuing entity
    "تاريخ الكتاب",  // document date
    "رقم الكتاب",    // document number
    "العنوان",       // title
    "الملاحظات",     // notes
    "نوع المرفق",    // attachment kind
    "اسم المرفق",    // attachment name
];

/// Archive dates are rendered in the user's local calendar.
fn format_archive_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Project one record onto the ten export columns. Optional fields render
/// as empty strings so both formats stay rectangular.
pub fn record_row(record: &ArchiveRecord) -> [String; 10] {
    let (kind_label, attachment_name) = match &record.attached_file {
        Some(attachment) => (
            attachment.kind.display_label().to_string(),
            attachment.name.clone(),
        ),
        None => (String::new(), String::new()),
    };

    [
        record.file_type.display_label().to_string(),
        format_archive_date(record.archive_date),
        record.archiver_name.clone(),
        record.issuing_entity.clone(),
        record.document_date.clone().unwrap_or_default(),
        record.document_number.clone(),
        record.title.clone(),
        record.notes.clone(),
        kind_label,
        attachment_name,
    ]
}
