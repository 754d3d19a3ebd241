//! Range field command-line interface

mod output;

use anyhow::{Context, Result};
use chrono::FixedOffset;
use clap::{Parser, Subcommand};
use rangefield::eval::InMemoryQueryFactory;
use rangefield::{
    IndexSettings, QueryBounds, QueryContext, Range, RangeDomain, RangeFieldTypeBuilder, RangeInput,
    RangeRelation,
};
use serde::Serialize;

/// Range field command-line tool
#[derive(Parser)]
#[command(name = "rangefield")]
#[command(author, version, about = "Range field normalization and query tools", long_about = None)]
struct Cli {
    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pretty: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported range types
    Domains,
    /// Parse a field value and print its canonical range
    Normalize {
        /// Range type, e.g. long_range
        domain: String,
        /// Field value, e.g. '{"gte": 1, "lt": 10}'
        value: String,
        /// Reject fractional values instead of truncating them
        #[arg(long)]
        strict: bool,
    },
    /// Build a relation query and test stored ranges against it
    Query {
        /// Range type, e.g. date_range
        domain: String,
        /// Query bounds, e.g. '{"gte": "now-1d", "lt": "now"}'
        bounds: String,
        /// Relation (intersects, within, contains)
        #[arg(short, long, default_value = "intersects")]
        relation: String,
        /// Reference time for `now`, in epoch milliseconds
        #[arg(long)]
        now: Option<i64>,
        /// Offset for dates without one, e.g. +02:00
        #[arg(long)]
        zone: Option<String>,
        /// Canonical ranges to test, e.g. "[1 : 5]"
        #[arg(long = "stored")]
        stored: Vec<String>,
    },
}

#[derive(Serialize)]
struct DomainInfo {
    name: &'static str,
    min: String,
    max: String,
    relations: Vec<&'static str>,
}

#[derive(Serialize)]
struct Normalized {
    canonical: String,
    range: Range,
}

#[derive(Serialize)]
struct StoredMatch {
    range: String,
    matches: bool,
}

#[derive(Serialize)]
struct QueryReport {
    bounds: QueryBounds,
    stored: Vec<StoredMatch>,
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    output::setup_colors(&cli.color);

    if let Err(err) = run(cli) {
        eprintln!("{}", output::format_error(&err));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Domains => {
            let relations = [
                RangeRelation::Intersects,
                RangeRelation::Within,
                RangeRelation::Contains,
                RangeRelation::Disjoint,
            ];
            let domains: Vec<DomainInfo> = RangeDomain::all()
                .iter()
                .map(|domain| DomainInfo {
                    name: domain.name(),
                    min: domain.min_value().to_string(),
                    max: domain.max_value().to_string(),
                    relations: relations
                        .iter()
                        .filter(|relation| domain.supports(**relation))
                        .map(|relation| relation.name())
                        .collect(),
                })
                .collect();
            output::print_json(&domains, cli.pretty)
        }
        Commands::Normalize { domain, value, strict } => {
            let domain: RangeDomain = domain.parse()?;
            let value: serde_json::Value =
                serde_json::from_str(&value).context("field value is not valid JSON")?;
            let field = RangeFieldTypeBuilder::new("value", domain)
                .coerce(!strict)
                .build(&IndexSettings::default())?;
            let range = field
                .parse_value(&value)
                .with_context(|| format!("cannot parse [{}] value", domain))?;
            output::print_json(
                &Normalized {
                    canonical: range.to_string(),
                    range,
                },
                cli.pretty,
            )
        }
        Commands::Query {
            domain,
            bounds,
            relation,
            now,
            zone,
            stored,
        } => {
            let domain: RangeDomain = domain.parse()?;
            let relation: RangeRelation = relation.parse()?;
            let bounds: serde_json::Value =
                serde_json::from_str(&bounds).context("query bounds are not valid JSON")?;
            let input = RangeInput::from_json("query", &bounds)?;

            let mut query = QueryContext::new();
            if let Some(now) = now {
                query = query.with_now(now);
            }
            if let Some(zone) = zone {
                let offset: FixedOffset = zone
                    .parse()
                    .with_context(|| format!("invalid zone offset [{}]", zone))?;
                query = query.with_zone(offset);
            }

            let field = RangeFieldTypeBuilder::new("query", domain).build(&IndexSettings::default())?;
            let (from, include_from) = input.lower();
            let (to, include_to) = input.upper();
            let bounds = field.range_query(from, to, include_from, include_to, relation, &query)?;
            let predicate = bounds.apply(&InMemoryQueryFactory)?;

            let stored = stored
                .into_iter()
                .map(|text| {
                    let range = Range::parse_canonical(domain, &text)
                        .with_context(|| format!("invalid stored range [{}]", text))?;
                    Ok(StoredMatch {
                        matches: predicate.matches(&range),
                        range: text,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            output::print_json(&QueryReport { bounds, stored }, cli.pretty)
        }
    }
}
