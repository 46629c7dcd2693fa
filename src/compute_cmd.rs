//! Compute command: HWMId of each target against each reference.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use hwmid_io::{DailyGrid, FileCache, write_events, write_hwmid};
use hwmid_pipeline::{RunReport, compute_grid_hwmid, resolve_thresholds};

use crate::cli::ComputeArgs;
use crate::config::TargetToml;
use crate::{config, convert, input};

pub fn run(args: ComputeArgs) -> Result<()> {
    let _cmd = info_span!("compute").entered();
    let ComputeArgs { common, targets } = args;
    let config = config::load(&common.config)?;
    crate::init_thread_pool(common.threads.or(config.threads))?;

    if config.targets.is_empty() {
        bail!("no targets configured: add [[targets]] entries to the config");
    }
    let target_ids: Vec<String> = config.targets.iter().map(|t| t.id.clone()).collect();
    let selected_targets = convert::select_ids(&target_ids, &targets)?;
    let reference_ids = convert::select_ids(&config.references.ids, &common.references)?;

    let reader_cfg = convert::build_reader_config(&config.input)?;
    let pipeline_cfg = convert::build_pipeline_config(&config, common.force)?;
    let writer_cfg = convert::build_writer_config(&config.output)?;

    let out_dir = common.output.unwrap_or_else(|| config.output.dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;
    let cache = FileCache::new(&config.cache.dir);

    let mut plan = Vec::new();
    for target in config
        .targets
        .iter()
        .filter(|t| selected_targets.contains(&t.id.as_str()))
    {
        let refs = target_references(target, &config.references.ids, &reference_ids)?;
        if refs.is_empty() {
            info!(target = %target.id, "no selected references for target");
            continue;
        }
        plan.push((target, refs));
    }

    // Each reference is resolved once per run, so `--force` recomputes it
    // once no matter how many targets use it.
    let mut thresholds = BTreeMap::new();
    for reference in references_to_resolve(&plan, &reference_ids) {
        let _span = info_span!("reference", id = reference).entered();
        let resolved = resolve_thresholds(reference, &cache, &pipeline_cfg, || {
            input::load_grid(
                &config.references.dir,
                reference,
                &reader_cfg,
                config.references.max_start_year,
            )
        })
        .with_context(|| format!("failed to obtain thresholds for {reference}"))?;
        thresholds.insert(reference, resolved);
    }

    for (target, refs) in &plan {
        let _span = info_span!("target", id = %target.id).entered();
        let grid: DailyGrid =
            input::load_grid(&target.dir, &target.id, &reader_cfg, target.max_start_year)
                .with_context(|| format!("failed to read target {}", target.id))?;

        for &reference in refs {
            let _ref_span = info_span!("reference", id = reference).entered();
            let Some((bundle, origin)) = thresholds.get(reference) else {
                bail!("thresholds for {reference} were not resolved");
            };

            let result = compute_grid_hwmid(&grid, bundle, &pipeline_cfg)
                .with_context(|| format!("HWMId failed for {} against {reference}", target.id))?;

            let table = out_dir.join(format!("{}_{reference}_hwmid.parquet", target.id));
            write_hwmid(&table, result.cells(), &writer_cfg)
                .with_context(|| format!("failed to write {}", table.display()))?;

            let events = out_dir.join(format!("{}_{reference}_events.parquet", target.id));
            write_events(&events, result.cells(), &writer_cfg)
                .with_context(|| format!("failed to write {}", events.display()))?;

            let report_path = out_dir.join(format!("{}_{reference}_report.json", target.id));
            RunReport::for_hwmid(&target.id, &result, *origin)
                .with_output(&table)
                .with_output(&events)
                .write_json(&report_path)?;

            info!(
                n_cells = result.cells().len(),
                n_skipped = result.skipped().len(),
                "target done"
            );
        }
    }
    Ok(())
}

/// Distinct references used by `plan`, in selection order.
fn references_to_resolve<'a>(
    plan: &[(&TargetToml, Vec<&'a str>)],
    selected: &[&'a str],
) -> Vec<&'a str> {
    selected
        .iter()
        .copied()
        .filter(|s| plan.iter().any(|(_, refs)| refs.contains(s)))
        .collect()
}

/// References to evaluate `target` against, in configured order.
fn target_references<'a>(
    target: &'a TargetToml,
    configured: &[String],
    selected: &[&'a str],
) -> Result<Vec<&'a str>> {
    let Some(own) = &target.references else {
        return Ok(selected.to_vec());
    };
    if let Some(unknown) = own.iter().find(|r| !configured.contains(*r)) {
        bail!(
            "target {} lists unknown reference {unknown:?}",
            target.id
        );
    }
    Ok(selected
        .iter()
        .copied()
        .filter(|s| own.iter().any(|r| r == s))
        .collect())
}
