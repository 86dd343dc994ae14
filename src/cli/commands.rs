use crate::analyzers::{AnalysisSelection, DatasetOverview, Explorer};
use crate::cli::args::{Cli, Commands};
use crate::error::{Result, TrackerError};
use crate::processors::{CsvMerger, DataCleaner, MergeInputs};
use crate::readers::TableReader;
use crate::reporter::{self, Console, Session};
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use crate::writers::ChartRenderer;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{error, info};

pub fn run(cli: Cli, settings: &Settings) -> Result<()> {
    match cli.command {
        Commands::Merge => merge(settings),
        Commands::Explore { choice } => explore(settings, choice),
        Commands::Report => report(settings),
    }
}

fn merge(settings: &Settings) -> Result<()> {
    let progress = ProgressReporter::new_spinner("Reading input files...", false);
    merge_with(settings, &progress, &mut io::stdout())
}

fn merge_with<W: Write>(settings: &Settings, progress: &ProgressReporter, out: &mut W) -> Result<()> {
    writeln!(out, "Loading CSV files...")?;

    let merger = CsvMerger::new(MergeInputs::in_dir(&settings.data_dir));
    match merger.merge_to(&settings.combined_path(), progress) {
        Ok(summary) => {
            writeln!(out, "{}", summary.summary())?;
            Ok(())
        }
        Err(e) => {
            writeln!(out, "Error combining CSV files: {}", e)?;
            writeln!(out, "Failed to combine CSV files.")?;
            Err(e)
        }
    }
}

fn explore(settings: &Settings, choice: Option<u8>) -> Result<()> {
    let charts =
        ChartRenderer::new(settings.output_path()).with_font(settings.font_file().as_deref());
    if charts.ensure_output_dir()? {
        println!("Created output directory: {}", charts.output_dir().display());
    } else {
        println!("Output directory already exists: {}", charts.output_dir().display());
    }

    let input = settings.combined_path();
    if !input.exists() {
        println!("Error: {} not found.", input.display());
        return Err(TrackerError::MissingInput { path: input });
    }
    println!("Loading data from {}...", input.display());

    let mut console = Console::stdio();
    let mut stdout = io::stdout();
    if let Err(e) = analyze(&input, Explorer::new(charts), choice, &mut console, &mut stdout) {
        error!("Analysis stopped: {}", e);
        println!("Error during analysis: {}", e);
    }
    Ok(())
}

/// Understanding, cleaning, then the analysis passes picked from the menu
fn analyze<R: BufRead, W: Write, O: Write>(
    input: &Path,
    explorer: Explorer,
    choice: Option<u8>,
    console: &mut Console<R, W>,
    out: &mut O,
) -> Result<()> {
    let mut table = TableReader::new().read_table(input)?;
    println!(
        "Successfully loaded data with {} rows and {} columns.",
        table.row_count(),
        table.column_count()
    );

    println!("\n=== DATA UNDERSTANDING ===");
    let overview = DatasetOverview::new(&table);
    println!("\n1. Data Structure:\n\n{}", overview.structure());
    println!("\n2. Missing Values:\n{}", overview.missing_summary());
    println!("\n3. Variable Summary:\n\n{}", overview.variable_summary());

    println!("\n=== DATA CLEANING ===");
    let report = DataCleaner::new().clean(&mut table)?;
    println!("\n{}", report.summary());

    println!("\n=== EXPLORATORY ANALYSIS ===");
    let selection: AnalysisSelection = match choice {
        Some(choice) => choice.to_string().parse()?,
        None => {
            console.say(format!("\n{}", AnalysisSelection::MENU))?;
            console.ask("Enter your choice (0-5): ")?.parse()?
        }
    };
    info!("Running {} analysis", selection);

    explorer.run(&table, selection, out)?;
    println!("\nAnalysis complete!");
    Ok(())
}

fn report(settings: &Settings) -> Result<()> {
    let session = Session::open(settings)?;
    let mut console = Console::stdio();
    reporter::run(&session, &mut console)
}
