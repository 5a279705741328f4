use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};

use grant_tracker::config::Config;
use grant_tracker::constants::RELEVANCE_SCORE;
use grant_tracker::domain::RecordTable;
use grant_tracker::ingest::{DelimitedTextSource, GrantSource, PastedTextSource};
use grant_tracker::logging;
use grant_tracker::pipeline::score::ScoringCriteria;
use grant_tracker::pipeline::{display_columns, run_pipeline, PipelineOutput};

#[derive(Parser)]
#[command(name = "grant_tracker")]
#[command(about = "Non-profit grant tracker: normalize, rank, and remind")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a CSV file of grant records
    Process {
        /// Path to the grant CSV file
        #[arg(long)]
        file: String,
        #[command(flatten)]
        criteria: CriteriaArgs,
    },
    /// Process free-form pasted grant details (placeholder extraction)
    Paste {
        /// The pasted grant details
        #[arg(long)]
        text: String,
        #[command(flatten)]
        criteria: CriteriaArgs,
    },
}

#[derive(Args)]
struct CriteriaArgs {
    /// Filter by issue area (e.g. sport, health)
    #[arg(long)]
    issue_area: Option<String>,
    /// Minimum funding quantum (0 means no minimum)
    #[arg(long)]
    min_funding: Option<f64>,
    /// Maximum funding quantum (0 means no maximum)
    #[arg(long)]
    max_funding: Option<f64>,
}

impl CriteriaArgs {
    /// CLI flags override config.toml values, which override the defaults.
    fn resolve(self, config: &Config) -> ScoringCriteria {
        let base = &config.criteria;
        ScoringCriteria {
            issue_area: self.issue_area.or_else(|| base.issue_area.clone()),
            min_funding: self.min_funding.unwrap_or(base.min_funding),
            max_funding: self.max_funding.unwrap_or(base.max_funding),
        }
    }
}

fn render_table(table: &RecordTable, columns: &[&str]) {
    println!("   {}", columns.join(" | "));
    for record in table {
        let row: Vec<String> = columns
            .iter()
            .map(|column| {
                if *column == RELEVANCE_SCORE {
                    record.relevance_score.to_string()
                } else {
                    record
                        .get(column)
                        .map(|value| value.as_text_lossy())
                        .unwrap_or_default()
                }
            })
            .collect();
        println!("   {}", row.join(" | "));
    }
}

fn render_output(output: &PipelineOutput) {
    println!("\n📋 Structured Grant Info ({} records):", output.normalized.len());
    let all_columns: Vec<&str> = {
        let mut seen: Vec<&str> = Vec::new();
        for record in &output.normalized {
            for name in record.fields.keys() {
                if !seen.contains(&name.as_str()) {
                    seen.push(name.as_str());
                }
            }
        }
        seen
    };
    render_table(&output.normalized, &all_columns);

    println!("\n📊 Grants Ranked by Relevance:");
    render_table(&output.ranked, &display_columns(&output.ranked));

    println!("\n⏰ Upcoming Deadlines:");
    if output.alerts.is_empty() {
        println!("   No upcoming deadlines within 7 days!");
    } else {
        for alert in &output.alerts.alerts {
            println!("   ⚠️  {}", alert);
        }
    }
    if !output.alerts.errors.is_empty() {
        warn!("{} records could not be alerted on", output.alerts.errors.len());
        for problem in &output.alerts.errors {
            println!("   ❗ {}", problem);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    let (source, criteria): (Box<dyn GrantSource>, ScoringCriteria) = match cli.command {
        Commands::Process { file, criteria } => {
            info!(file = %file, "processing grant CSV");
            (
                Box::new(DelimitedTextSource::from_path(&file)?),
                criteria.resolve(&config),
            )
        }
        Commands::Paste { text, criteria } => {
            info!("processing pasted grant text");
            (Box::new(PastedTextSource::new(text)), criteria.resolve(&config))
        }
    };

    let records = match source.load() {
        Ok(records) => records,
        Err(e) => {
            error!("failed to load grant data: {}", e);
            println!("❌ Error reading grant data: {}", e);
            return Err(e.into());
        }
    };

    let output = run_pipeline(records, &criteria, Utc::now());
    render_output(&output);

    Ok(())
}
