use calamine::{open_workbook_auto, Reader};
use std::env;

use hurricane_track_cleaner::track::{classify_record, RowKind, TrackLoader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let file_path = if args.len() > 1 {
        args[1].as_str()
    } else {
        "data/Hurricane Dataset.xlsx"
    };

    // Allow specifying how many rows to show
    let max_rows: usize = if args.len() > 2 { args[2].parse()? } else { 40 };

    println!("Opening track file: {file_path}");

    if !file_path.to_ascii_lowercase().ends_with(".csv") {
        let workbook = open_workbook_auto(file_path)?;
        println!("\nSheet names:");
        for (i, name) in workbook.sheet_names().iter().enumerate() {
            println!("  {i}: {name}");
        }
    }

    let table = TrackLoader::new(file_path).load()?;
    let layout = table.layout();

    println!("\n\nExamining sheet: {}", table.sheet_name);
    println!("{}", "=".repeat(100));
    println!(
        "Dimensions: {} data rows x {} columns",
        table.len(),
        table.columns().len()
    );
    println!("Columns: {:?}", table.columns());

    println!("\nFirst {max_rows} rows ([H] = storm header, [O] = observation):");
    println!("{}", "=".repeat(100));

    let mut headers = 0;
    for record in table.records().iter().take(max_rows) {
        // Only print rows with data
        if record.is_blank() {
            continue;
        }

        let tag = match classify_record(record, &layout) {
            RowKind::Header => {
                headers += 1;
                "H"
            }
            RowKind::Observation => "O",
        };

        print!("Row {:4} [{tag}]: ", record.row_number);
        for cell in record.cells().iter().take(10) {
            if cell.is_empty() {
                print!("[empty] ");
            } else {
                print!("[{cell}] ");
            }
        }
        println!();
    }

    println!("\n{}", "=".repeat(100));
    println!(
        "{headers} header rows among the first {} rows",
        table.len().min(max_rows)
    );

    Ok(())
}
