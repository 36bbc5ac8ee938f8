use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use forecast_core::{
    BlockName, Config, Field, Parameter, SeriesBuilder, TimeConverter, TimeSeries, Units,
    WeatherDocument, WeatherRequest, daily_min_max_temperature, fetcher_from_config, project,
};

use crate::{configure, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather series for an address")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, default address and display preferences.
    Configure,

    /// Show forecast series for an address.
    Forecast {
        /// Address or place name. Falls back to the configured default.
        address: Option<String>,

        #[command(flatten)]
        output: SeriesArgs,
    },

    /// Show observed series for an address at a past date.
    TimeMachine {
        /// Address or place name. Falls back to the configured default.
        address: Option<String>,

        /// YYYY-MM-DD (midnight UTC) or an RFC 3339 timestamp.
        #[arg(long)]
        time: String,

        #[command(flatten)]
        output: SeriesArgs,
    },
}

#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Named series: hourly-temperature, hourly-apparent-temperature,
    /// daily-min-temperature, daily-max-temperature or daily-min-max.
    #[arg(long, default_value = "hourly-temperature", conflicts_with_all = ["block", "field"])]
    series: String,

    /// Project an arbitrary field from this block (minutely, hourly, daily).
    #[arg(long, requires = "field")]
    block: Option<String>,

    /// Provider field name to project, e.g. humidity or precipProbability.
    #[arg(long, requires = "block")]
    field: Option<String>,

    /// Temperature units for output: fahrenheit or celsius.
    #[arg(long)]
    units: Option<String>,

    /// Display timestamps at this offset, e.g. -08:00 or UTC.
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

/// What to project out of the document.
#[derive(Debug, Clone, PartialEq)]
enum Selection {
    Named(Parameter),
    DailyMinMax,
    Custom { block: BlockName, field: String },
}

impl Selection {
    fn block(&self) -> BlockName {
        match self {
            Selection::Named(p) => p.block(),
            Selection::DailyMinMax => BlockName::Daily,
            Selection::Custom { block, .. } => *block,
        }
    }

    fn is_temperature(&self) -> bool {
        match self {
            Selection::Named(_) | Selection::DailyMinMax => true,
            Selection::Custom { field, .. } => {
                Field::try_from(field.as_str()).is_ok_and(|f| f.is_temperature())
            }
        }
    }

    fn build(&self, doc: &WeatherDocument, builder: &SeriesBuilder) -> Result<Vec<TimeSeries>> {
        let series = match self {
            Selection::Named(p) => vec![p.series(doc, builder)?],
            Selection::DailyMinMax => {
                let (min, max) = daily_min_max_temperature(doc, builder)?;
                vec![min, max]
            }
            Selection::Custom { block, field } => {
                let label = format!("{} {field}", capitalize(block.as_str()));
                vec![project(doc, builder, *block, field, &label)?]
            }
        };
        Ok(series)
    }
}

impl SeriesArgs {
    fn selection(&self) -> Result<Selection> {
        if let (Some(block), Some(field)) = (&self.block, &self.field) {
            let block = BlockName::try_from(block.as_str())?;
            let field = Field::try_from(field.as_str())
                .map(|f| f.as_str().to_string())
                .unwrap_or_else(|_| field.clone());
            return Ok(Selection::Custom { block, field });
        }

        if self.series.eq_ignore_ascii_case("daily-min-max") {
            return Ok(Selection::DailyMinMax);
        }

        Ok(Selection::Named(Parameter::try_from(self.series.as_str())?))
    }

    fn units(&self, config: &Config) -> Result<Units> {
        match &self.units {
            Some(units) => Units::try_from(units.as_str()),
            None => Ok(config.units),
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure::run(),
            Command::Forecast { address, output } => show(address, None, output).await,
            Command::TimeMachine {
                address,
                time,
                output,
            } => {
                let when = parse_when(&time)?;
                show(address, Some(when), output).await
            }
        }
    }
}

async fn show(address: Option<String>, when: Option<DateTime<Utc>>, args: SeriesArgs) -> Result<()> {
    // Reject bad arguments before touching config or the network.
    let selection = args.selection()?;
    if let Some(units) = &args.units {
        Units::try_from(units.as_str())?;
    }
    if let Some(offset) = &args.utc_offset {
        TimeConverter::parse_offset(offset)?;
    }

    let config = Config::load()?;
    let units = args.units(&config)?;
    let request = WeatherRequest {
        address: config.resolve_address(address)?,
        when,
    };

    let fetcher = fetcher_from_config(&config)?;
    let (location, doc) = fetcher
        .fetch(&request)
        .await
        .with_context(|| format!("Failed to fetch weather for '{}'", request.address))?;

    let clock = config.time_converter(args.utc_offset.as_deref(), &doc)?;
    let builder = SeriesBuilder::new(clock);

    let mut series = selection.build(&doc, &builder)?;
    if selection.is_temperature() {
        series = series.iter().map(|s| s.map_values(|v| units.convert(v))).collect();
    }

    if args.json {
        render::print_json(&location, when, &series)
    } else {
        render::print_header(&location, when, &doc, selection.block(), units);
        render::print_series(&series);
        Ok(())
    }
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or RFC 3339.
fn parse_when(text: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            anyhow!("Invalid date '{text}'. Expected YYYY-MM-DD or an RFC 3339 timestamp.")
        })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn args(series: &str) -> SeriesArgs {
        SeriesArgs {
            series: series.to_string(),
            block: None,
            field: None,
            units: None,
            utc_offset: None,
            json: false,
        }
    }

    #[test]
    fn parse_when_accepts_plain_dates() {
        let when = parse_when("2021-01-01").unwrap();
        assert_eq!(when, Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_when_accepts_rfc3339() {
        let when = parse_when("2021-01-01T08:00:00-08:00").unwrap();
        assert_eq!(when, Utc.with_ymd_and_hms(2021, 1, 1, 16, 0, 0).unwrap());
    }

    #[test]
    fn parse_when_rejects_garbage() {
        let err = parse_when("yesterday").unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn default_selection_is_hourly_temperature() {
        let selection = args("hourly-temperature").selection().unwrap();
        assert_eq!(selection, Selection::Named(Parameter::HourlyTemperature));
        assert_eq!(selection.block(), BlockName::Hourly);
    }

    #[test]
    fn daily_min_max_selection() {
        let selection = args("Daily-Min-Max").selection().unwrap();
        assert_eq!(selection, Selection::DailyMinMax);
        assert!(selection.is_temperature());
    }

    #[test]
    fn custom_selection_canonicalizes_known_fields() {
        let mut a = args("hourly-temperature");
        a.block = Some("hourly".into());
        a.field = Some("dewpoint".into());

        let selection = a.selection().unwrap();
        assert_eq!(
            selection,
            Selection::Custom {
                block: BlockName::Hourly,
                field: "dewPoint".into()
            }
        );
        assert!(selection.is_temperature());
    }

    #[test]
    fn custom_selection_keeps_unknown_fields_and_skips_conversion() {
        let mut a = args("hourly-temperature");
        a.block = Some("minutely".into());
        a.field = Some("precipType".into());

        let selection = a.selection().unwrap();
        assert!(!selection.is_temperature());
    }

    #[test]
    fn currently_block_is_rejected() {
        let mut a = args("hourly-temperature");
        a.block = Some("currently".into());
        a.field = Some("temperature".into());

        let err = a.selection().unwrap_err();
        assert!(err.to_string().contains("unsupported block"));
    }

    #[test]
    fn units_flag_overrides_config() {
        let mut a = args("hourly-temperature");
        let cfg = Config::default();
        assert_eq!(a.units(&cfg).unwrap(), Units::Fahrenheit);

        a.units = Some("celsius".into());
        assert_eq!(a.units(&cfg).unwrap(), Units::Celsius);
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("hourly"), "Hourly");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn cli_parses_time_machine() {
        let cli = Cli::try_parse_from([
            "forecast",
            "time-machine",
            "Vancouver",
            "--time",
            "2021-01-01",
            "--utc-offset",
            "-08:00",
        ])
        .unwrap();

        match cli.command {
            Command::TimeMachine { address, time, output } => {
                assert_eq!(address.as_deref(), Some("Vancouver"));
                assert_eq!(time, "2021-01-01");
                assert_eq!(output.utc_offset.as_deref(), Some("-08:00"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_series_with_block() {
        let res = Cli::try_parse_from([
            "forecast",
            "forecast",
            "--series",
            "daily-min-max",
            "--block",
            "hourly",
            "--field",
            "humidity",
        ]);
        assert!(res.is_err());
    }
}
