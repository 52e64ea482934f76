use crate::reports;
use binforge::binning::naming::object_feature;
use binforge::classifier::ObjectClassifier;
use binforge::config::ClassificationSettings;
use binforge::error::{BfResult, BinForgeError};
use binforge::host::{ImageSet, Measurements, ObjectSets, Objects, RgbImage};
use binforge::loader;
use binforge::palette::JetPalette;
use clap::Args;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub settings: ClassificationSettings,

    /// Per-object measurements as NAME=CSV. Repeat for each object set.
    #[arg(long = "objects", required = true)]
    pub objects: Vec<String>,

    /// Label matrices as NAME=CSV, needed for retained images.
    #[arg(long = "labels")]
    pub labels: Vec<String>,

    /// Whole-image measurements (`Feature,Value` CSV).
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Directory for membership columns, image measurements and images.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn split_named_path(arg: &str) -> BfResult<(String, PathBuf)> {
    match arg.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
            Ok((name.trim().to_string(), PathBuf::from(path.trim())))
        }
        _ => Err(BinForgeError::Config(format!(
            "Expected NAME=PATH, got '{}'",
            arg
        ))),
    }
}

pub fn run(args: ClassifyArgs, classifier: &ObjectClassifier) -> BfResult<()> {
    let mut measurements = Measurements::default();
    let mut counts = HashMap::new();

    for arg in &args.objects {
        let (name, path) = split_named_path(arg)?;
        let n = loader::load_object_measurements_file(&path, &name, &mut measurements)?;
        counts.insert(name, n);
    }

    if let Some(path) = &args.image {
        loader::load_image_measurements_file(path, &mut measurements)?;
    }

    let mut segmented = HashMap::new();
    for arg in &args.labels {
        let (name, path) = split_named_path(arg)?;
        segmented.insert(name, loader::load_label_image_file(path)?);
    }

    let mut object_sets = ObjectSets::default();
    for (name, count) in counts {
        let labels = segmented.remove(&name);
        object_sets.insert(
            name,
            Objects {
                count,
                segmented: labels,
            },
        );
    }

    let mut images = ImageSet::default();
    let outcomes = classifier.run(&object_sets, &mut measurements, &mut images, &JetPalette)?;

    for outcome in &outcomes {
        reports::print_outcome(outcome);
    }

    if let Some(dir) = &args.output {
        write_outputs(dir, classifier, &measurements, &images)?;
    }
    Ok(())
}

fn write_outputs(
    dir: &Path,
    classifier: &ObjectClassifier,
    measurements: &Measurements,
    images: &ImageSet,
) -> BfResult<()> {
    fs::create_dir_all(dir)?;

    // Membership columns grouped per object set, in declaration order.
    let mut per_object: Vec<(String, Vec<String>)> = Vec::new();
    for (spec, names) in classifier.specs().iter().zip(classifier.feature_names()) {
        let features = names.iter().map(|n| object_feature(n));
        match per_object.iter().position(|(o, _)| *o == spec.object_name) {
            Some(i) => per_object[i].1.extend(features),
            None => per_object.push((spec.object_name.clone(), features.collect())),
        }
    }

    for (object_name, features) in &per_object {
        let path = dir.join(format!("{}_classes.csv", object_name));
        loader::write_object_measurements(File::create(&path)?, measurements, object_name, features)?;
        info!("💾 Wrote {}", path.display());
    }

    let path = dir.join("image_measurements.csv");
    loader::write_image_measurements(File::create(&path)?, measurements)?;
    info!("💾 Wrote {}", path.display());

    for (name, image) in images.iter() {
        let path = dir.join(format!("{}.ppm", name));
        write_ppm(&path, image)?;
        info!("🖼️  Wrote {}", path.display());
    }
    Ok(())
}

fn write_ppm(path: &Path, image: &RgbImage) -> BfResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P6\n{} {}\n255\n", image.width, image.height)?;
    for pixel in &image.pixels {
        out.write_all(pixel)?;
    }
    out.flush()?;
    Ok(())
}
