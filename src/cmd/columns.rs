use crate::reports;
use binforge::classifier::ObjectClassifier;
use binforge::config::ClassificationSettings;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub settings: ClassificationSettings,

    /// Emit the manifest as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ColumnsArgs, classifier: &ObjectClassifier) -> binforge::BfResult<()> {
    let columns = classifier.measurement_columns();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&columns)?);
    } else {
        reports::print_columns(&columns);
    }
    Ok(())
}
