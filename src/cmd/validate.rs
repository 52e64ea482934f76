use crate::reports;
use binforge::classifier::ObjectClassifier;
use binforge::config::ClassificationSettings;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub settings: ClassificationSettings,
}

pub fn run(classifier: &ObjectClassifier) {
    println!("\n🔎 === CLASSIFICATION AUDIT === 🔎");
    reports::print_bin_layout(classifier);
    println!("✅ {} classification(s) valid.", classifier.specs().len());
}
