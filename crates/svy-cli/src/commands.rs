//! Command implementations.

use anyhow::{Context, Result};
use tracing::info_span;

use svy_core::{LabeledFrame, load_survey};
use svy_report::{weighted_freq, weighted_stats};

use crate::cli::{LoadArgs, TabulateArgs};
use crate::summary::{print_freq, print_overview, print_stats};

fn load(args: &LoadArgs) -> Result<LabeledFrame> {
    let span = info_span!("load", data = %args.data.display());
    let _guard = span.enter();
    load_survey(&args.data, &args.metadata)
}

pub fn run_inspect(args: &LoadArgs) -> Result<()> {
    let frame = load(args)?;
    print_overview(&frame);
    Ok(())
}

pub fn run_freq(args: &TabulateArgs) -> Result<()> {
    let frame = load(&args.load)?;
    let labels = frame.value_labels(&args.variable);
    let freq = weighted_freq(&frame.data, &args.variable, &args.weight, labels)
        .with_context(|| format!("frequency table for '{}'", args.variable))?;
    print_freq(&frame, &args.variable, &freq);
    Ok(())
}

pub fn run_stats(args: &TabulateArgs) -> Result<()> {
    let frame = load(&args.load)?;
    let stats = weighted_stats(&frame.data, &args.variable, &args.weight)
        .with_context(|| format!("descriptive statistics for '{}'", args.variable))?;
    print_stats(&frame, &args.variable, &stats);
    Ok(())
}
