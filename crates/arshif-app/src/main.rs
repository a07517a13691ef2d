//! arshif - correspondence archive command-line interface

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use arshif_app::{AppConfig, ArchiveController, ExtractionStatus};
use arshif_core::{ArchiveRecord, Direction, FilterSpec, IncomingFile, RecordDraft};
use arshif_extract::ExtractorSet;
use arshif_store::JsonFileStore;

#[derive(Parser)]
#[command(name = "arshif", about = "Archive incoming and outgoing correspondence", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Archive a new record, optionally attaching a PDF or image
    Add {
        /// incoming or outgoing
        #[arg(long, value_parser = parse_direction)]
        direction: Direction,
        /// Name of the person archiving the document
        #[arg(long)]
        archiver: String,
        /// Entity that issued the document
        #[arg(long)]
        entity: String,
        /// Document number
        #[arg(long)]
        number: String,
        /// Document title
        #[arg(long)]
        title: String,
        /// Date written on the document itself (free-form)
        #[arg(long)]
        doc_date: Option<String>,
        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Path to a PDF or image attachment
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List records, optionally filtered
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Emit the matching records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing record; unspecified fields are kept as-is
    Edit {
        /// Record id
        id: String,
        #[arg(long, value_parser = parse_direction)]
        direction: Option<Direction>,
        #[arg(long)]
        archiver: Option<String>,
        #[arg(long)]
        entity: Option<String>,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// New document date; pass an empty string to clear it
        #[arg(long)]
        doc_date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Replacement attachment (re-runs text extraction)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Delete a record permanently
    Delete {
        /// Record id
        id: String,
    },
    /// Export records to a spreadsheet or CSV file
    Export {
        /// Output format: xlsx or csv
        #[arg(long, default_value = "xlsx")]
        format: String,
        /// Base name of the output file; the extension is appended
        #[arg(long, default_value = "archive-records")]
        out: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Write a record's attachment to disk
    SaveAttachment {
        /// Record id
        id: String,
        /// Output path; defaults to the stored file name
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Keep only incoming or outgoing records
    #[arg(long, value_parser = parse_direction)]
    direction: Option<Direction>,
    /// Earliest archive date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Latest archive date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Case-insensitive search across metadata and extracted text
    #[arg(long)]
    search: Option<String>,
}

impl From<FilterArgs> for FilterSpec {
    fn from(args: FilterArgs) -> Self {
        FilterSpec {
            direction: args.direction,
            date_from: args.from,
            date_to: args.to,
            search_term: args.search,
        }
    }
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    match s.to_lowercase().as_str() {
        "incoming" | "in" => Ok(Direction::Incoming),
        "outgoing" | "out" => Ok(Direction::Outgoing),
        other => Err(format!("'{other}' is not a direction (incoming|outgoing)")),
    }
}

/// A supplied flag wins, even when empty (the draft normalizes an empty
/// value to absent, so `--doc-date ""` clears the stored date); an omitted
/// flag keeps the stored value.
fn merge_document_date(flag: Option<String>, existing: Option<String>) -> Option<String> {
    match flag {
        Some(value) => Some(value),
        None => existing,
    }
}

fn read_incoming_file(path: &PathBuf) -> anyhow::Result<IncomingFile> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read attachment: {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());
    Ok(IncomingFile { name, bytes })
}

fn report_extraction(status: ExtractionStatus) {
    match status {
        ExtractionStatus::NoAttachment => {}
        ExtractionStatus::Extracted => println!("Text extracted from attachment."),
        ExtractionStatus::Empty => println!("Attachment contained no extractable text."),
        ExtractionStatus::Failed => {
            println!("Warning: text extraction failed; record saved without extracted text.")
        }
    }
}

fn print_record_line(record: &ArchiveRecord) {
    let attachment = record
        .attached_file
        .as_ref()
        .map(|a| a.name.as_str())
        .unwrap_or("-");
    println!(
        "{}  {:8}  {}  #{:<10}  {}  [{}]",
        record.id,
        record.file_type.display_label(),
        record.archive_date.format("%Y-%m-%d %H:%M"),
        record.document_number,
        record.title,
        attachment,
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    info!(data_dir = %config.data_dir.display(), "starting");

    let store = Arc::new(JsonFileStore::new(&config.data_dir));
    let extractors = ExtractorSet::with_defaults(&config.ocr_language);
    let mut controller =
        ArchiveController::new(store, extractors, config.max_upload_size_bytes).await?;

    match cli.command {
        Command::Add {
            direction,
            archiver,
            entity,
            number,
            title,
            doc_date,
            notes,
            file,
        } => {
            let draft = RecordDraft {
                file_type: direction,
                archiver_name: archiver,
                issuing_entity: entity,
                document_number: number,
                title,
                document_date: doc_date,
                notes,
            };
            let incoming = file.as_ref().map(read_incoming_file).transpose()?;
            let outcome = controller.submit_new(draft, incoming).await?;
            println!("Archived record {}", outcome.record.id);
            report_extraction(outcome.extraction);
        }
        Command::List { filter, json } => {
            let spec = FilterSpec::from(filter);
            let matches = controller.view(&spec);
            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else if matches.is_empty() {
                println!("No records match.");
            } else {
                for record in &matches {
                    print_record_line(record);
                }
                println!("{} record(s)", matches.len());
            }
        }
        Command::Edit {
            id,
            direction,
            archiver,
            entity,
            number,
            title,
            doc_date,
            notes,
            file,
        } => {
            let existing = controller
                .records()
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .with_context(|| format!("record not found: {id}"))?;
            let draft = RecordDraft {
                file_type: direction.unwrap_or(existing.file_type),
                archiver_name: archiver.unwrap_or(existing.archiver_name),
                issuing_entity: entity.unwrap_or(existing.issuing_entity),
                document_number: number.unwrap_or(existing.document_number),
                title: title.unwrap_or(existing.title),
                document_date: merge_document_date(doc_date, existing.document_date),
                notes: notes.unwrap_or(existing.notes),
            };
            let incoming = file.as_ref().map(read_incoming_file).transpose()?;
            let outcome = controller.submit_edit(&id, draft, incoming).await?;
            println!("Updated record {}", outcome.record.id);
            report_extraction(outcome.extraction);
        }
        Command::Delete { id } => {
            controller.remove(&id).await?;
            println!("Deleted record {id}");
        }
        Command::Export { format, out, filter } => {
            let spec = FilterSpec::from(filter);
            let matches: Vec<ArchiveRecord> =
                controller.view(&spec).into_iter().cloned().collect();
            let path = match format.as_str() {
                "xlsx" => {
                    let bytes = arshif_export::to_xlsx(&matches)?;
                    let path = format!("{out}.xlsx");
                    std::fs::write(&path, bytes)?;
                    path
                }
                "csv" => {
                    let csv = arshif_export::to_csv(&matches);
                    let path = format!("{out}.csv");
                    std::fs::write(&path, csv)?;
                    path
                }
                other => bail!("unknown export format '{other}' (expected xlsx or csv)"),
            };
            println!("Exported {} record(s) to {path}", matches.len());
        }
        Command::SaveAttachment { id, out } => {
            let (name, bytes) = controller.attachment_bytes(&id)?;
            let path = out.unwrap_or_else(|| PathBuf::from(&name));
            std::fs::write(&path, bytes)?;
            println!("Saved attachment to {}", path.display());
        }
    }

    Ok(())
}
