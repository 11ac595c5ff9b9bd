use anyhow::Result;
use pathmeta::lens::combinator::{CombineArgs, CombinatorLens, RawPathMetadata};
use pathmeta::lens::utils::OutputFormat;

use super::print_output;

pub fn run(args: CombineArgs, output_format: OutputFormat) -> Result<()> {
    let CombineArgs { file, per_as } = args;

    let lens = CombinatorLens::new();
    let solutions = lens.load_solutions(&file)?;

    if !per_as {
        let paths = lens.metadata_batch(&solutions);
        return print_output(&lens.format_metadata(&paths, &output_format));
    }

    let breakdowns: Vec<RawPathMetadata> = solutions.iter().map(|s| lens.combine(s)).collect();
    match output_format {
        OutputFormat::Json => print_output(&serde_json::to_string(&breakdowns)?),
        OutputFormat::JsonPretty => print_output(&serde_json::to_string_pretty(&breakdowns)?),
        _ => {
            for (idx, raw) in breakdowns.iter().enumerate() {
                if breakdowns.len() > 1 && output_format.is_table() {
                    print_output(&format!("path {}:", idx))?;
                }
                print_output(&lens.format_breakdown(raw, &output_format))?;
            }
            Ok(())
        }
    }
}
