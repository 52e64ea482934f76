use binforge::binning::{BinSpacing, BinSpec, ThresholdSource};
use binforge::classifier::{ClassificationOutcome, ObjectClassifier};
use binforge::manifest::FeatureColumn;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn describe_threshold(source: &ThresholdSource) -> String {
    match source {
        ThresholdSource::Fixed(v) => format!("{}", v),
        ThresholdSource::Image(feature) => format!("image:{}", feature),
    }
}

fn describe_edges(spec: &BinSpec) -> String {
    let mut parts = Vec::new();
    if spec.wants_low_bin {
        parts.push("-inf".to_string());
    }
    match spec.spacing {
        BinSpacing::Even => parts.push(format!(
            "{} .. {} / {}",
            describe_threshold(&spec.low_threshold),
            describe_threshold(&spec.high_threshold),
            spec.bin_count
        )),
        BinSpacing::Custom => parts.extend(spec.custom_thresholds.iter().map(|t| t.to_string())),
    }
    if spec.wants_high_bin {
        parts.push("inf".to_string());
    }
    parts.join(", ")
}

pub fn print_bin_layout(classifier: &ObjectClassifier) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Objects"),
        Cell::new("Measurement"),
        Cell::new("Spacing"),
        Cell::new("Edges"),
        Cell::new("Bins").fg(Color::Cyan),
        Cell::new("Names"),
        Cell::new("Image"),
    ]);

    for (i, (spec, names)) in classifier
        .specs()
        .iter()
        .zip(classifier.feature_names())
        .enumerate()
    {
        table.add_row(vec![
            Cell::new(i + 1).add_attribute(Attribute::Bold),
            Cell::new(&spec.object_name),
            Cell::new(&spec.measurement),
            Cell::new(spec.spacing),
            Cell::new(describe_edges(spec)),
            Cell::new(spec.number_of_bins()).fg(Color::Cyan),
            Cell::new(names.join("\n")),
            Cell::new(spec.image_name.as_deref().unwrap_or("-")),
        ]);
    }

    if let Some(col) = table.column_mut(5) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("\n{}", table);
}

pub fn print_columns(columns: &[FeatureColumn]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Entity").add_attribute(Attribute::Bold),
        Cell::new("Feature"),
        Cell::new("Type"),
    ]);
    for column in columns {
        table.add_row(vec![
            Cell::new(&column.entity).add_attribute(Attribute::Bold),
            Cell::new(&column.feature),
            Cell::new(column.column_type),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_outcome(outcome: &ClassificationOutcome) {
    let result = &outcome.result;
    println!(
        "\n📊 {} by {} ({} objects, {} unclassified)",
        outcome.object_name,
        outcome.measurement,
        result.num_objects(),
        result.num_objects() - result.classified()
    );

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Bin").add_attribute(Attribute::Bold),
        Cell::new("Range"),
        Cell::new("Count").fg(Color::Cyan),
        Cell::new("Pct").fg(Color::Green),
    ]);

    for (b, name) in outcome.bin_names.iter().enumerate() {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(format!("({}, {}]", outcome.edges[b], outcome.edges[b + 1])),
            Cell::new(result.counts()[b]).fg(Color::Cyan),
            Cell::new(format!("{:.2}", result.percentages()[b])).fg(Color::Green),
        ]);
    }

    for i in 2..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{}", table);
}
