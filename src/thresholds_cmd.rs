//! Thresholds command: compute or load reference thresholds and write them.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use hwmid_io::{FileCache, write_thresholds};
use hwmid_pipeline::{RunReport, resolve_thresholds};

use crate::cli::ThresholdsArgs;
use crate::{config, convert, input};

pub fn run(args: ThresholdsArgs) -> Result<()> {
    let _cmd = info_span!("thresholds").entered();
    let args = args.common;
    let config = config::load(&args.config)?;
    crate::init_thread_pool(args.threads.or(config.threads))?;

    let reader_cfg = convert::build_reader_config(&config.input)?;
    let pipeline_cfg = convert::build_pipeline_config(&config, args.force)?;
    let writer_cfg = convert::build_writer_config(&config.output)?;
    let ids = convert::select_ids(&config.references.ids, &args.references)?;

    let out_dir = args.output.unwrap_or_else(|| config.output.dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;
    let cache = FileCache::new(&config.cache.dir);

    for id in ids {
        let _span = info_span!("reference", id).entered();
        let (bundle, origin) = resolve_thresholds(id, &cache, &pipeline_cfg, || {
            input::load_grid(
                &config.references.dir,
                id,
                &reader_cfg,
                config.references.max_start_year,
            )
        })
        .with_context(|| format!("failed to obtain thresholds for {id}"))?;

        let table = out_dir.join(format!("{id}_thresholds.parquet"));
        write_thresholds(&table, &bundle, &writer_cfg)
            .with_context(|| format!("failed to write {}", table.display()))?;

        let report_path = out_dir.join(format!("{id}_thresholds_report.json"));
        RunReport::for_thresholds(&bundle, origin)
            .with_output(&table)
            .write_json(&report_path)?;

        info!(
            n_cells = bundle.cells().len(),
            n_skipped = bundle.skipped().len(),
            ?origin,
            "reference done"
        );
    }
    Ok(())
}
