/// Grid cell edge, in pixels, used to quantize detections into identity keys.
pub const DEFAULT_CELL_SIZE: i32 = 50;

/// Samples retained per identity history.
pub const DEFAULT_BUFFER_SIZE: usize = 8;

/// Classifier confidence that must be strictly exceeded for admission.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

/// Detections below this score are ignored.
pub const DEFAULT_MIN_FACE_CONFIDENCE: f64 = 0.7;

/// Run the classifier every Nth frame (1 = every frame).
pub const DEFAULT_PREDICTION_INTERVAL: usize = 2;

/// Fraction one gender must exceed before it overrides the raw sample.
pub const DEFAULT_GENDER_CONSENSUS: f64 = 0.6;

/// Admitted samples needed before age smoothing kicks in.
pub const AGE_SMOOTHING_MIN_SAMPLES: usize = 3;

/// Most recent samples considered by the age mode.
pub const AGE_WINDOW: usize = 5;

/// Admitted samples needed before gender consensus kicks in.
pub const GENDER_SMOOTHING_MIN_SAMPLES: usize = 5;

/// Horizontal padding around a detection, as a fraction of its width.
pub const DEFAULT_PAD_WIDTH_RATIO: f64 = 0.2;

/// Vertical padding around a detection, as a fraction of its height.
pub const DEFAULT_PAD_HEIGHT_RATIO: f64 = 0.3;

/// Padded crops this size or smaller (either axis) are not classified or tracked.
pub const MIN_FACE_CROP_SIZE: i32 = 20;

/// Classifier input edge in pixels.
pub const CLASSIFIER_INPUT_SIZE: usize = 227;

/// Per-channel BGR mean subtracted before classification.
pub const CLASSIFIER_MEAN_BGR: [f32; 3] = [78.426_34, 87.768_91, 114.895_85];
