use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use fp_core::{FourPillarsChart, Pillar, simple_relationship, simple_score};
use fp_store::Store;

#[derive(Parser)]
#[command(name = "fp", about = "Four-pillars compatibility and fortune engine CLI")]
struct Cli {
    /// Override the database path
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register or replace a person's birth chart
    Chart {
        person: String,

        /// Year pillar as stem-branch, e.g. jia-zi
        #[arg(long)]
        year: String,

        /// Month pillar
        #[arg(long)]
        month: String,

        /// Day pillar
        #[arg(long)]
        day: String,

        /// Hour pillar
        #[arg(long)]
        hour: String,
    },

    /// Record a person's body-strength classification
    Strength {
        person: String,

        /// strong, weak, or neutral
        classification: String,
    },

    /// Record the day pillar for a calendar date
    Day {
        /// Calendar date, e.g. 2026-08-07
        date: String,

        /// Pillar as stem-branch, e.g. ren-zi
        pillar: String,
    },

    /// Print a stored chart
    Show { person: String },

    /// Daily fortune for a person on a date
    Fortune {
        person: String,
        date: String,

        /// Emit the reading as JSON
        #[arg(long)]
        json: bool,
    },

    /// Enhanced compatibility between two people (get-or-create)
    Match {
        person_a: String,
        person_b: String,

        /// Emit the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Quick randomized compatibility from day-master elements
    Quick { person_a: String, person_b: String },

    /// Rank team members by daily fortune on a date
    Rank {
        date: String,

        #[arg(required = true)]
        persons: Vec<String>,
    },
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

fn default_db_path() -> PathBuf {
    let base = std::env::var("FP_DATA_DIR")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".fourpillars"));
    base.join("fortune.db")
}

fn open_store(cli: &Cli) -> Result<Store> {
    let path = cli.db.clone().unwrap_or_else(default_db_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Store::open(&path).context("failed to open store")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Chart {
            person,
            year,
            month,
            day,
            hour,
        } => cmd_chart(&cli, person, year, month, day, hour),
        Commands::Strength {
            person,
            classification,
        } => cmd_strength(&cli, person, classification),
        Commands::Day { date, pillar } => cmd_day(&cli, date, pillar),
        Commands::Show { person } => cmd_show(&cli, person),
        Commands::Fortune { person, date, json } => cmd_fortune(&cli, person, date, *json),
        Commands::Match {
            person_a,
            person_b,
            json,
        } => cmd_match(&cli, person_a, person_b, *json),
        Commands::Quick { person_a, person_b } => cmd_quick(&cli, person_a, person_b),
        Commands::Rank { date, persons } => cmd_rank(&cli, date, persons),
    }
}

fn parse_pillar(text: &str, which: &str) -> Result<Pillar> {
    text.parse::<Pillar>()
        .with_context(|| format!("invalid {which} pillar '{text}'"))
}

fn cmd_chart(
    cli: &Cli,
    person: &str,
    year: &str,
    month: &str,
    day: &str,
    hour: &str,
) -> Result<()> {
    let chart = FourPillarsChart::new(
        parse_pillar(year, "year")?,
        parse_pillar(month, "month")?,
        parse_pillar(day, "day")?,
        parse_pillar(hour, "hour")?,
    );

    let store = open_store(cli)?;
    store
        .save_chart(person, &chart)
        .context("failed to save chart")?;

    println!(
        "saved chart for {person}: day master {} ({})",
        chart.day_master(),
        chart.day_master().element()
    );
    Ok(())
}

fn cmd_strength(cli: &Cli, person: &str, classification: &str) -> Result<()> {
    let strength = classification
        .parse()
        .with_context(|| format!("invalid classification '{classification}'"))?;

    let store = open_store(cli)?;
    store
        .set_strength(person, strength)
        .context("failed to save strength")?;

    println!("recorded {person} as {strength}");
    Ok(())
}

fn cmd_day(cli: &Cli, date: &str, pillar: &str) -> Result<()> {
    let pillar = parse_pillar(pillar, "day")?;

    let store = open_store(cli)?;
    store
        .set_day_pillar(date, pillar)
        .context("failed to save day pillar")?;

    println!("recorded {date} as {pillar}");
    Ok(())
}

fn cmd_show(cli: &Cli, person: &str) -> Result<()> {
    let store = open_store(cli)?;
    let chart = store
        .chart(person)
        .with_context(|| format!("no usable chart for {person}"))?;
    let strength = store
        .strength(person)
        .context("failed to load strength")?;

    println!("chart for {person}:");
    println!("  year:   {}", chart.year);
    println!("  month:  {}", chart.month);
    println!("  day:    {}", chart.day);
    println!("  hour:   {}", chart.hour);
    println!(
        "  day master: {} ({} {})",
        chart.day_master(),
        chart.day_master().polarity(),
        chart.day_master().element()
    );
    println!("  strength:   {strength}");
    Ok(())
}

fn cmd_fortune(cli: &Cli, person: &str, date: &str, json: bool) -> Result<()> {
    let store = open_store(cli)?;
    let reading = store
        .daily_fortune(person, date)
        .with_context(|| format!("failed to read fortune for {person} on {date}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
    } else {
        println!(
            "fortune for {person} on {date}: {} ({})",
            reading.score, reading.grade
        );
        println!(
            "day elements: stem={}, branch={}",
            reading.stem_element, reading.branch_element
        );
    }
    Ok(())
}

fn cmd_match(cli: &Cli, person_a: &str, person_b: &str, json: bool) -> Result<()> {
    let store = open_store(cli)?;
    let record = store
        .get_or_create_compatibility(person_a, person_b)
        .with_context(|| format!("failed to score {person_a} × {person_b}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!(
            "{} × {}: {} ({})",
            record.subject_a, record.subject_b, record.score, record.category
        );
        println!("  day branches:     {}", record.branch_relation);
        println!("  yin-yang:         {}", record.breakdown.yin_yang);
        println!("  strength:         {}", record.breakdown.strength);
        println!("  day branch:       {}", record.breakdown.day_branch);
        println!("  useful god:       {}", record.breakdown.useful_god);
        println!("  stem combination: {}", record.breakdown.stem_combination);
    }
    Ok(())
}

fn cmd_quick(cli: &Cli, person_a: &str, person_b: &str) -> Result<()> {
    let store = open_store(cli)?;
    let element_a = store
        .chart(person_a)
        .with_context(|| format!("no usable chart for {person_a}"))?
        .day_master()
        .element();
    let element_b = store
        .chart(person_b)
        .with_context(|| format!("no usable chart for {person_b}"))?
        .day_master()
        .element();

    let relationship = simple_relationship(element_a, element_b);
    let mut rng = SmallRng::from_os_rng();
    let score = simple_score(relationship, &mut rng);

    println!("{person_a} ({element_a}) × {person_b} ({element_b}): {score} ({relationship})");
    Ok(())
}

fn cmd_rank(cli: &Cli, date: &str, persons: &[String]) -> Result<()> {
    let store = open_store(cli)?;

    let mut rankings = Vec::with_capacity(persons.len());
    for person in persons {
        let reading = store
            .daily_fortune(person, date)
            .with_context(|| format!("failed to read fortune for {person} on {date}"))?;
        rankings.push((person.as_str(), reading));
    }

    // Highest score first; ties break alphabetically for stable output.
    rankings.sort_by(|a, b| b.1.score.cmp(&a.1.score).then(a.0.cmp(b.0)));

    println!("fortune ranking for {date}:");
    for (rank, (person, reading)) in rankings.iter().enumerate() {
        println!(
            "  {}. {person}  {} ({})",
            rank + 1,
            reading.score,
            reading.grade
        );
    }
    Ok(())
}
