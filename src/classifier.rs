use crate::binning::naming::{count_feature, object_feature, percent_feature};
use crate::binning::{
    build_thresholds, classify, run_feature_names, validate_all, BinSpec, ClassificationResult,
};
use crate::config::PipelineConfig;
use crate::error::{BfResult, BinForgeError, ValidationError};
use crate::host::{ImageSink, MeasurementStore, MeasurementWriter, ObjectSet, Palette};
use crate::manifest::{self, FeatureColumn};
use crate::render::paint_labels;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// One classification applied to the current image.
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    pub object_name: String,
    pub measurement: String,
    pub bin_names: Vec<String>,
    pub edges: Vec<f64>,
    pub result: ClassificationResult,
}

/// Runs every configured classification against one image's measurements.
#[derive(Debug, Clone)]
pub struct ObjectClassifier {
    specs: Vec<BinSpec>,
    names: Vec<Vec<String>>,
}

impl ObjectClassifier {
    /// Validates the pipeline. Any failure aborts setup.
    pub fn new(config: &PipelineConfig) -> Result<Self, ValidationError> {
        let specs = validate_all(&config.classifications)?;
        Ok(Self::from_specs(specs))
    }

    pub fn from_specs(specs: Vec<BinSpec>) -> Self {
        let names = run_feature_names(&specs);
        Self { specs, names }
    }

    pub fn specs(&self) -> &[BinSpec] {
        &self.specs
    }

    /// Bin feature names, one list per spec.
    pub fn feature_names(&self) -> &[Vec<String>] {
        &self.names
    }

    pub fn measurement_columns(&self) -> Vec<FeatureColumn> {
        manifest::measurement_columns(&self.specs, &self.names)
    }

    pub fn categories(&self, object_name: &str) -> Vec<&'static str> {
        manifest::categories(&self.specs, object_name)
    }

    pub fn measurements(&self, object_name: &str, category: &str) -> Vec<String> {
        manifest::measurements(&self.specs, &self.names, object_name, category)
    }

    /// Classifies the objects of spec `index` without recording anything.
    pub fn classify_spec<O, S>(
        &self,
        index: usize,
        objects: &O,
        store: &S,
    ) -> BfResult<ClassificationOutcome>
    where
        O: ObjectSet + ?Sized,
        S: MeasurementStore + ?Sized,
    {
        let spec = &self.specs[index];
        let values = store.get(&spec.object_name, &spec.measurement).ok_or_else(|| {
            BinForgeError::MissingMeasurement {
                entity: spec.object_name.clone(),
                feature: spec.measurement.clone(),
            }
        })?;

        if let Some(set) = objects.get_objects(&spec.object_name) {
            if set.count != values.len() {
                return Err(BinForgeError::ObjectCountMismatch {
                    object_name: spec.object_name.clone(),
                    expected: set.count,
                    actual: values.len(),
                });
            }
        }

        let (low, high) = spec.resolve_thresholds(store)?;
        let edges = build_thresholds(spec, low, high);
        let result = classify(values, &edges);

        debug!(
            "{}.{}: {} objects, {} classified into {} bins",
            spec.object_name,
            spec.measurement,
            result.num_objects(),
            result.classified(),
            result.num_bins()
        );

        Ok(ClassificationOutcome {
            object_name: spec.object_name.clone(),
            measurement: spec.measurement.clone(),
            bin_names: self.names[index].clone(),
            edges,
            result,
        })
    }

    /// Classifies every spec, records the per-object flags and per-image
    /// counts and percentages, and retains the requested label images.
    pub fn run<O, M, I, P>(
        &self,
        objects: &O,
        measurements: &mut M,
        images: &mut I,
        palette: &P,
    ) -> BfResult<Vec<ClassificationOutcome>>
    where
        O: ObjectSet + Sync + ?Sized,
        M: MeasurementStore + MeasurementWriter + Sync,
        I: ImageSink + ?Sized,
        P: Palette + ?Sized,
    {
        // Specs only read shared state, so they classify independently.
        let store: &M = measurements;
        let outcomes = (0..self.specs.len())
            .into_par_iter()
            .map(|i| self.classify_spec(i, objects, store))
            .collect::<BfResult<Vec<_>>>()?;

        for (spec, outcome) in self.specs.iter().zip(&outcomes) {
            record(measurements, outcome);

            if let Some(image_name) = &spec.image_name {
                let segmented = objects
                    .get_objects(&spec.object_name)
                    .and_then(|set| set.segmented.as_ref());
                match segmented {
                    Some(segmented) => {
                        let colors = palette.colors(outcome.result.num_bins());
                        let image =
                            paint_labels(segmented, &outcome.result.object_labels(), &colors);
                        images.add_image(image_name, image);
                    }
                    None => warn!(
                        "No label image for '{}'; skipping image '{}'",
                        spec.object_name, image_name
                    ),
                }
            }
        }

        info!("Classified {} measurement(s)", outcomes.len());
        Ok(outcomes)
    }
}

fn record<M: MeasurementWriter + ?Sized>(measurements: &mut M, outcome: &ClassificationOutcome) {
    let result = &outcome.result;
    for (b, name) in outcome.bin_names.iter().enumerate() {
        let column = result.column(b).into_iter().map(f64::from).collect();
        measurements.put_object(&outcome.object_name, &object_feature(name), column);
        measurements.put_image(&count_feature(name), result.counts()[b] as f64);
        measurements.put_image(&percent_feature(name), result.percentages()[b]);
    }
}
