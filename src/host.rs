//! Collaborators the classifier consumes: segmented objects, the measurement
//! store it reads from and writes to, a color palette and an image sink.
//! In-memory implementations back the CLI and the tests.

use std::collections::{BTreeMap, HashMap};

/// Entity name for whole-image measurements.
pub const IMAGE: &str = "Image";

/// RGBA color with channels in `0.0..=1.0`.
pub type Rgba = [f32; 4];

/// Per-pixel object labels, row-major. 0 is background, `n` is object `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelImage {
    pub width: usize,
    pub height: usize,
    pub labels: Vec<u32>,
}

impl LabelImage {
    pub fn new(width: usize, height: usize, labels: Vec<u32>) -> Self {
        debug_assert_eq!(labels.len(), width * height);
        Self {
            width,
            height,
            labels,
        }
    }

    /// Highest label present, which is the object count for a dense labeling.
    pub fn max_label(&self) -> u32 {
        self.labels.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[u8; 3]>,
}

/// A named set of segmented objects.
#[derive(Debug, Clone, Default)]
pub struct Objects {
    pub count: usize,
    pub segmented: Option<LabelImage>,
}

pub trait ObjectSet {
    fn get_objects(&self, object_name: &str) -> Option<&Objects>;
}

pub trait MeasurementStore {
    /// Per-object values, NaN where the measurement is missing.
    fn get(&self, object_name: &str, feature: &str) -> Option<&[f64]>;
    fn get_image(&self, feature: &str) -> Option<f64>;
}

pub trait MeasurementWriter {
    fn put_object(&mut self, object_name: &str, feature: &str, values: Vec<f64>);
    fn put_image(&mut self, feature: &str, value: f64);
}

pub trait Palette {
    /// `n + 1` colors; index 0 is the unclassified/background color.
    fn colors(&self, n: usize) -> Vec<Rgba>;
}

pub trait ImageSink {
    fn add_image(&mut self, name: &str, image: RgbImage);
}

#[derive(Debug, Clone, Default)]
pub struct ObjectSets {
    sets: HashMap<String, Objects>,
}

impl ObjectSets {
    pub fn insert(&mut self, object_name: impl Into<String>, objects: Objects) {
        self.sets.insert(object_name.into(), objects);
    }
}

impl ObjectSet for ObjectSets {
    fn get_objects(&self, object_name: &str) -> Option<&Objects> {
        self.sets.get(object_name)
    }
}

/// Object and image measurements for the current image.
#[derive(Debug, Clone, Default)]
pub struct Measurements {
    objects: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
    image: BTreeMap<String, f64>,
}

impl Measurements {
    pub fn object_features(&self, object_name: &str) -> Vec<&str> {
        self.objects
            .get(object_name)
            .map(|features| features.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn image_features(&self) -> impl Iterator<Item = (&str, f64)> {
        self.image.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of objects recorded for `object_name`, taken from its longest column.
    pub fn object_count(&self, object_name: &str) -> usize {
        self.objects
            .get(object_name)
            .and_then(|features| features.values().map(Vec::len).max())
            .unwrap_or(0)
    }
}

impl MeasurementStore for Measurements {
    fn get(&self, object_name: &str, feature: &str) -> Option<&[f64]> {
        self.objects
            .get(object_name)?
            .get(feature)
            .map(Vec::as_slice)
    }

    fn get_image(&self, feature: &str) -> Option<f64> {
        self.image.get(feature).copied()
    }
}

impl MeasurementWriter for Measurements {
    fn put_object(&mut self, object_name: &str, feature: &str, values: Vec<f64>) {
        self.objects
            .entry(object_name.to_string())
            .or_default()
            .insert(feature.to_string(), values);
    }

    fn put_image(&mut self, feature: &str, value: f64) {
        self.image.insert(feature.to_string(), value);
    }
}

/// Images produced during a run, by name.
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    images: BTreeMap<String, RgbImage>,
}

impl ImageSet {
    pub fn get(&self, name: &str) -> Option<&RgbImage> {
        self.images.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RgbImage)> {
        self.images.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageSink for ImageSet {
    fn add_image(&mut self, name: &str, image: RgbImage) {
        self.images.insert(name.to_string(), image);
    }
}
