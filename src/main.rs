//! Card-Pager CLI
//! Previews sheet layouts and paginates resource text with a monospace
//! measurer. The browser host goes through the WASM bindings instead.

use card_pager::print::in_to_mm;
use card_pager::{
    CardDimensions, CardPagerError, ContentBox, FontMetrics, Orientation, PaperSpec, PaperType,
    PrintConfig, PrintLayout, PrintSession, ResourceId, ResourceText, Result, TextBoxMeasurer,
};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "card-pager")]
#[command(about = "Paginate resource cards and lay them out on print sheets")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the card grid, padding and crop marks for a paper size
    Layout(LayoutArgs),
    /// Paginate resources from a JSON file and print the sheet plan
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Paper type (a3, a4, a5, letter, legal, tabloid)
    #[arg(short, long, default_value = "a4")]
    paper: PaperType,

    /// Paper orientation (portrait or landscape)
    #[arg(short, long, default_value = "portrait")]
    orientation: Orientation,

    /// Card size in inches as WIDTHxHEIGHT
    #[arg(short, long, default_value = "2.5x3.5")]
    card: CardDimensions,

    /// Crop mark tick length in inches
    #[arg(long, default_value_t = 0.125)]
    mark_length: f64,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// JSON array of `{ "id": number, "text": string }`
    resources: PathBuf,

    /// Print configuration JSON (defaults: A4 portrait, 2.5x3.5 cards)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Font size in points for the monospace measurer
    #[arg(long, default_value_t = 9.0)]
    font_size: f32,

    /// Inset between the card edge and its text, in inches
    #[arg(long, default_value_t = 0.125)]
    inset: f64,
}

#[derive(Debug, Deserialize)]
struct ResourceEntry {
    id: u64,
    text: String,
}

fn print_layout(layout: &PrintLayout) {
    println!(
        "paper      {:.2} x {:.2} in ({:.0} x {:.0} mm)",
        layout.paper_width,
        layout.paper_height,
        in_to_mm(layout.paper_width),
        in_to_mm(layout.paper_height)
    );
    println!(
        "card       {:.2} x {:.2} in",
        layout.card.width, layout.card.height
    );
    println!(
        "grid       {} x {} ({} per sheet)",
        layout.columns, layout.rows, layout.cards_per_sheet
    );
    println!(
        "padding    {:.3} x {:.3} in",
        layout.padding_x, layout.padding_y
    );
}

fn run_layout(args: LayoutArgs) -> Result<()> {
    let config = PrintConfig {
        paper: PaperSpec::new(args.paper, args.orientation),
        card: args.card,
        crop_mark_length: args.mark_length,
        ..PrintConfig::default()
    };
    let session = PrintSession::new(config)?;
    let layout = session.layout();
    print_layout(layout);

    if layout.is_degenerate() {
        println!("card does not fit on {} paper", args.paper);
        return Ok(());
    }

    let marks = session.crop_marks();
    println!("crop marks {}", marks.len());
    for mark in &marks {
        println!(
            "  {:?}: ({:.3}, {:.3}) -> ({:.3}, {:.3})",
            mark.edge, mark.start.x, mark.start.y, mark.end.x, mark.end.y
        );
    }
    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => PrintConfig::from_path(path)?,
        None => PrintConfig::default(),
    };
    let json = std::fs::read_to_string(&args.resources)?;
    let entries: Vec<ResourceEntry> = serde_json::from_str(&json)?;
    log::info!("previewing {} resources", entries.len());

    if !args.font_size.is_finite() || args.font_size <= 0.0 {
        return Err(CardPagerError::InvalidDimension {
            name: "font size",
            value: f64::from(args.font_size),
        });
    }

    let mut measurer = TextBoxMeasurer::new(
        ContentBox::for_card(&config.card, args.inset),
        FontMetrics::monospace(args.font_size),
    );
    let mut session = PrintSession::new(config)?;
    for entry in &entries {
        session.mount(ResourceId(entry.id), ResourceText::from_raw(&entry.text));
    }
    session.run_all(&mut measurer);

    print_layout(session.layout());
    println!();
    for entry in &entries {
        let id = ResourceId(entry.id);
        let pages = session.page_count(id).known().unwrap_or(0);
        println!("{:<10} {pages} page(s)", id.to_string());
    }
    println!();
    println!("total sheets {}", session.total_sheets());
    for sheet in session.sheets() {
        println!("sheet {}", sheet.index + 1);
        for slot in &sheet.slots {
            println!(
                "  [{}, {}] {} page {} at ({:.3}, {:.3})",
                slot.column,
                slot.row,
                slot.resource,
                slot.page_index + 1,
                slot.origin.x,
                slot.origin.y
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let app = App::parse();

    let result = match app.command {
        Commands::Layout(args) => run_layout(args),
        Commands::Preview(args) => run_preview(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
