use crate::reports;
use clap::Args;
use softkeys::config::Settings;
use softkeys::error::SkResult;
use softkeys::geometry::resolve;
use softkeys::layouts::LayoutSet;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub settings: Settings,

    /// Print the resolved layout as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Inspect every layout of the set, not just the first.
    #[arg(short, long, default_value_t = false)]
    pub all: bool,
}

pub fn run(args: InspectArgs, settings: &Settings, layouts: &LayoutSet) -> SkResult<()> {
    let count = if args.all { layouts.len() } else { 1 };

    for index in 0..count {
        let Some((name, def)) = layouts.get(index) else {
            break;
        };
        let resolved = resolve(def, &settings.layout)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&resolved)?);
            continue;
        }

        reports::print_layout_summary(name, &resolved);
        reports::print_key_table(&resolved);
        reports::print_warnings(&resolved.warnings);
    }
    Ok(())
}
