//! Frentes CLI - service-front dashboard
//!
//! ```bash
//! frentes serve                         # Start HTTP server (port 3000)
//! frentes parse dados.csv               # Decoded records as JSON
//! frentes options dados.csv             # Dropdown values as JSON
//! frentes report dados.csv --contrato C1 --format html
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use frentes::{
    build_view, load_dataset, populate_options, render_table_html, write_table_csv, DataSource,
    DashboardView, FilterSelection, ServerConfig,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "frentes")]
#[command(about = "Service-front dashboard: CSV filters, KPIs and per-front table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (env FRENTES_PORT, default 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// CSV file path or http(s) URL (env FRENTES_DATA, default dados.csv)
        #[arg(short, long)]
        data: Option<String>,

        /// Directory of the built frontend (env FRENTES_STATIC_DIR)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Decode a CSV file and output its records as JSON
    Parse {
        /// CSV file path or http(s) URL
        input: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the values offered by each filter
    Options {
        /// CSV file path or http(s) URL
        input: String,
    },

    /// KPIs and front table for a filter selection
    Report {
        /// CSV file path or http(s) URL
        input: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Contract
    #[arg(long)]
    contrato: Option<String>,

    /// Coordination unit
    #[arg(long)]
    coordenacao: Option<String>,

    /// Work type (Linear or Localizada)
    #[arg(long)]
    tipo: Option<String>,

    /// Planned-start period, YYYY-MM
    #[arg(long)]
    inicio: Option<String>,
}

impl From<FilterArgs> for FilterSelection {
    fn from(args: FilterArgs) -> Self {
        FilterSelection {
            contract: args.contrato,
            coordination: args.coordenacao,
            work_type: args.tipo,
            period: args.inicio,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
    Html,
    Csv,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            port,
            data,
            static_dir,
        } => cmd_serve(port, data.as_deref(), static_dir).await,

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()).await,

        Commands::Options { input } => cmd_options(&input).await,

        Commands::Report {
            input,
            filters,
            format,
            output,
        } => cmd_report(&input, filters.into(), format, output.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(
    port: Option<u16>,
    data: Option<&str>,
    static_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env().with_overrides(port, data, static_dir);
    frentes::server::start_server(config).await?;
    Ok(())
}

async fn cmd_parse(input: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(&DataSource::parse(input)).await?;
    eprintln!("   Columns: {}", dataset.info.headers.join(", "));

    let json = serde_json::to_string_pretty(&dataset.records)?;
    write_output(&json, output)
}

async fn cmd_options(input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(&DataSource::parse(input)).await?;
    let options = populate_options(&dataset.records);
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

async fn cmd_report(
    input: &str,
    selection: FilterSelection,
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(&DataSource::parse(input)).await?;
    let view = build_view(&dataset, &selection);
    eprintln!(
        "📊 {} of {} records match",
        view.filtered_records, view.total_records
    );

    let content = match format {
        ReportFormat::Text => render_text(&view),
        ReportFormat::Json => serde_json::to_string_pretty(&view)?,
        ReportFormat::Html => render_table_html(&view.rows)?,
        ReportFormat::Csv => {
            let mut buf = Vec::new();
            write_table_csv(&view.rows, &mut buf)?;
            String::from_utf8(buf)?
        }
    };
    write_output(&content, output)
}

fn render_text(view: &DashboardView) -> String {
    let kpis = &view.kpi_display;
    let mut out = String::new();
    out.push_str(&format!("Frentes:              {}\n", kpis.unique_fronts));
    out.push_str(&format!("Extensão edital (m):  {}\n", kpis.edital_length));
    out.push_str(&format!("Extensão executivo:   {}\n", kpis.executive_length));
    out.push_str(&format!("Diferença (m):        {}\n", kpis.difference));
    out.push_str(&format!("Obras localizadas:    {}\n", kpis.localized_count));
    out.push('\n');
    for row in &view.rows {
        out.push_str(&format!(
            "{} | {} | {} | {} | {}\n",
            row.contract, row.coordination, row.front, row.work_type, row.planned_start
        ));
    }
    out
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
