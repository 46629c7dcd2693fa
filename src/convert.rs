//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use hwmid_climatology::ClimatologyConfig;
use hwmid_events::EventConfig;
use hwmid_io::{Compression, ReaderConfig, TimeDecoding, WriterConfig};
use hwmid_pipeline::PipelineConfig;

use crate::config::*;

/// Parses a time decoding mode name.
pub fn parse_time_decoding(s: &str) -> Result<TimeDecoding> {
    match s.to_lowercase().as_str() {
        "units" => Ok(TimeDecoding::Units),
        "filename" => Ok(TimeDecoding::Filename),
        other => bail!("unknown time decoding: {other:?} (expected \"units\" or \"filename\")"),
    }
}

/// Parses a compression algorithm name.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match Compression::parse(s) {
        Some(c) => Ok(c),
        None => bail!("unknown compression: {s:?}"),
    }
}

/// Builds a [`ReaderConfig`] from the TOML input configuration.
pub fn build_reader_config(input: &InputToml) -> Result<ReaderConfig> {
    let cfg = ReaderConfig::default()
        .with_variable(&input.variable)
        .with_time_var(&input.time_var)
        .with_time_decoding(parse_time_decoding(&input.time_decoding)?);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`ClimatologyConfig`] from the TOML climatology configuration.
pub fn build_climatology_config(c: &ClimatologyToml) -> Result<ClimatologyConfig> {
    let cfg = ClimatologyConfig::new()
        .with_window_radius(c.window_radius)
        .with_daily_quantile(c.daily_quantile)
        .with_low_quantile(c.low_quantile)
        .with_high_quantile(c.high_quantile)
        .with_reference_years(c.first_year, c.last_year);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds an [`EventConfig`] from the TOML events configuration.
pub fn build_event_config(e: &EventsToml) -> Result<EventConfig> {
    let cfg = EventConfig::new().with_min_run_length(e.min_run_length);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds the [`PipelineConfig`]; `force` comes from the command line.
pub fn build_pipeline_config(config: &HwmidConfig, force: bool) -> Result<PipelineConfig> {
    Ok(PipelineConfig::new()
        .with_climatology(build_climatology_config(&config.climatology)?)
        .with_events(build_event_config(&config.events)?)
        .with_force_recompute(force))
}

/// Builds a [`WriterConfig`] from the TOML output configuration.
pub fn build_writer_config(output: &OutputToml) -> Result<WriterConfig> {
    let cfg = WriterConfig::default()
        .with_compression(parse_compression(&output.compression)?)
        .with_row_group_size(output.row_group_size);
    cfg.validate()?;
    Ok(cfg)
}

/// Restricts `configured` identifiers to `requested` (all when empty).
///
/// Requested identifiers that are not configured are an error.
pub fn select_ids<'a>(configured: &'a [String], requested: &[String]) -> Result<Vec<&'a str>> {
    if let Some(unknown) = requested.iter().find(|r| !configured.contains(*r)) {
        bail!("identifier {unknown:?} is not configured (known: {configured:?})");
    }
    Ok(configured
        .iter()
        .filter(|id| requested.is_empty() || requested.contains(*id))
        .map(String::as_str)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn select_all_when_nothing_requested() {
        let configured = ids(&["a", "b"]);
        assert_eq!(select_ids(&configured, &[]).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn select_subset_in_configured_order() {
        let configured = ids(&["a", "b", "c"]);
        assert_eq!(
            select_ids(&configured, &ids(&["c", "a"])).unwrap(),
            vec!["a", "c"]
        );
    }

    #[test]
    fn unknown_request_is_an_error() {
        let configured = ids(&["a"]);
        assert!(select_ids(&configured, &ids(&["z"])).is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse_time_decoding("calendar").is_err());
        assert!(parse_compression("gzip").is_err());
        let bad = ClimatologyToml {
            low_quantile: 0.8,
            ..ClimatologyToml::default()
        };
        assert!(build_climatology_config(&bad).is_err());
        assert!(build_event_config(&EventsToml { min_run_length: 0 }).is_err());
    }
}
