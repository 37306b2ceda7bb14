//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use hillfog_core::{Frequency, QueryParams, SortDirection};

#[derive(Parser, Debug)]
#[command(
    name = "hillfog",
    version,
    about = "Query and maintain Hillfog scorecards, KPIs and OKRs from the command line"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend URL (overrides config/hillfog and HILLFOG_BASE_URL)
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Log in with this account before running the command
    #[arg(long, env = "HILLFOG_ACCOUNT", global = true)]
    pub account: Option<String>,

    /// Password for --account
    #[arg(long, env = "HILLFOG_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Output format for results
    #[arg(long, value_enum, default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Debug-level logging for the hillfog crates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format (pretty for humans, json for machine parsing)
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List one page of records
    List(ListArgs),

    /// Fetch a single record by id
    Get {
        #[arg(value_enum)]
        entity: EntityKind,
        id: String,
    },

    /// Delete a record by id
    Delete {
        #[arg(value_enum)]
        entity: EntityKind,
        id: String,
    },

    /// Measure data of one KPI for a period
    Measures(MeasureArgs),

    /// Show the user behind the current session
    Whoami,

    /// End the session and forget the stored profile
    Logout,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub entity: EntityKind,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size (defaults to the configured page size)
    #[arg(long)]
    pub size: Option<u32>,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long = "sort-field")]
    pub sort_field: Option<String>,

    #[arg(long = "sort-order", value_enum, default_value = "asc")]
    pub sort_order: SortOrderArg,
}

impl ListArgs {
    pub fn query(&self, default_page_size: u32) -> QueryParams {
        let mut params = QueryParams::new()
            .page(self.page)
            .page_size(self.size.unwrap_or(default_page_size));
        if let Some(search) = &self.search {
            params = params.search(search.clone());
        }
        if let Some(field) = &self.sort_field {
            params = params.sort_by(field.clone(), self.sort_order.into());
        }
        params
    }
}

#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// KPI oid
    #[arg(long)]
    pub kpi: String,

    /// Period date, e.g. 2024-05-01
    #[arg(long)]
    pub date: String,

    /// Frequency code (D/W/M/Q/H/Y) or label
    #[arg(long, default_value = "M", value_parser = parse_frequency)]
    pub frequency: Frequency,

    #[arg(long)]
    pub employee: Option<String>,

    #[arg(long)]
    pub organization: Option<String>,
}

fn parse_frequency(s: &str) -> Result<Frequency, String> {
    s.parse::<Frequency>().map_err(|e| e.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Scorecard,
    Kpi,
    Employee,
    Objective,
    Organization,
    Pdca,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortOrderArg {
    Asc,
    Desc,
}

impl From<SortOrderArg> for SortDirection {
    fn from(value: SortOrderArg) -> Self {
        match value {
            SortOrderArg::Asc => SortDirection::Asc,
            SortOrderArg::Desc => SortDirection::Desc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
