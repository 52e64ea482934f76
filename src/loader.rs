use crate::error::{BfResult, BinForgeError};
use crate::host::{LabelImage, MeasurementStore, MeasurementWriter, Measurements};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Empty cells and `nan` are missing measurements.
fn parse_value(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

/// Reads one object set's measurements: a header row of feature names,
/// then one row per object. Returns the number of objects.
pub fn load_object_measurements<R: Read>(
    reader: R,
    object_name: &str,
    measurements: &mut Measurements,
) -> BfResult<usize> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let features: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); features.len()];

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        for (col, column) in columns.iter_mut().enumerate() {
            let cell = record.get(col).unwrap_or("");
            let value = parse_value(cell).ok_or_else(|| {
                BinForgeError::Config(format!(
                    "Object {} of '{}': '{}' is not a number (feature {})",
                    row + 1,
                    object_name,
                    cell,
                    features[col]
                ))
            })?;
            column.push(value);
        }
    }

    let count = columns.first().map_or(0, Vec::len);
    for (feature, column) in features.iter().zip(columns) {
        measurements.put_object(object_name, feature, column);
    }

    debug!(
        "Loaded {} objects x {} features for '{}'",
        count,
        features.len(),
        object_name
    );
    Ok(count)
}

pub fn load_object_measurements_file<P: AsRef<Path>>(
    path: P,
    object_name: &str,
    measurements: &mut Measurements,
) -> BfResult<usize> {
    let path = path.as_ref();
    info!("📂 Loading {} measurements: {}", object_name, path.display());
    load_object_measurements(File::open(path)?, object_name, measurements)
}

/// Reads `Feature,Value` rows of whole-image measurements.
pub fn load_image_measurements<R: Read>(reader: R, measurements: &mut Measurements) -> BfResult<usize> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut count = 0;
    for record in rdr.records() {
        let record = record?;
        if record.len() < 2 {
            continue;
        }
        let feature = &record[0];
        let value = parse_value(&record[1]).ok_or_else(|| {
            BinForgeError::Config(format!(
                "Image measurement '{}': '{}' is not a number",
                feature, &record[1]
            ))
        })?;
        measurements.put_image(feature, value);
        count += 1;
    }
    Ok(count)
}

pub fn load_image_measurements_file<P: AsRef<Path>>(
    path: P,
    measurements: &mut Measurements,
) -> BfResult<usize> {
    let path = path.as_ref();
    info!("📂 Loading image measurements: {}", path.display());
    load_image_measurements(File::open(path)?, measurements)
}

/// Reads a headerless grid of integer object labels, 0 for background.
pub fn load_label_image<R: Read>(reader: R) -> BfResult<LabelImage> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut labels = Vec::new();
    let mut width = None;
    let mut height = 0;

    for record in rdr.records() {
        let record = record?;
        match width {
            None => width = Some(record.len()),
            Some(w) if w != record.len() => {
                return Err(BinForgeError::Config(format!(
                    "Label row {} has {} columns, expected {}",
                    height + 1,
                    record.len(),
                    w
                )))
            }
            Some(_) => {}
        }
        for cell in record.iter() {
            let label = cell.parse::<u32>().map_err(|_| {
                BinForgeError::Config(format!(
                    "Label row {}: '{}' is not an object label",
                    height + 1,
                    cell
                ))
            })?;
            labels.push(label);
        }
        height += 1;
    }

    Ok(LabelImage::new(width.unwrap_or(0), height, labels))
}

pub fn load_label_image_file<P: AsRef<Path>>(path: P) -> BfResult<LabelImage> {
    load_label_image(File::open(path)?)
}

/// Writes the given per-object features, one row per object.
pub fn write_object_measurements<W: Write>(
    writer: W,
    measurements: &Measurements,
    object_name: &str,
    features: &[String],
) -> BfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(features)?;

    let columns: Vec<&[f64]> = features
        .iter()
        .map(|feature| {
            measurements
                .get(object_name, feature)
                .ok_or_else(|| BinForgeError::MissingMeasurement {
                    entity: object_name.to_string(),
                    feature: feature.clone(),
                })
        })
        .collect::<BfResult<_>>()?;

    let rows = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    for o in 0..rows {
        wtr.write_record(
            columns
                .iter()
                .map(|c| c.get(o).map_or_else(String::new, |v| v.to_string())),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_image_measurements<W: Write>(writer: W, measurements: &Measurements) -> BfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Feature", "Value"])?;
    for (feature, value) in measurements.image_features() {
        wtr.write_record([feature.to_string(), value.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
