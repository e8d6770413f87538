use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;

use crate::classification::domain::face_classifier::FaceClassifier;
use crate::detection::domain::face_cropper::FaceCropper;
use crate::detection::domain::face_detector::FaceDetector;
use crate::identity::domain::identity_assigner::{GridIdentityAssigner, IdentityAssigner};
use crate::identity::domain::identity_key::IdentityKey;
use crate::labeling::domain::confidence_gate::ConfidenceGate;
use crate::labeling::domain::identity_store::IdentityStore;
use crate::labeling::domain::temporal_smoother::{LabelSmoother, TemporalSmoother};
use crate::pipeline::face_renderer::{FaceRenderer, RenderedFace};
use crate::pipeline::labeling_config::{ConfigError, LabelingConfig};
use crate::pipeline::operator_control::{OperatorCommand, OperatorControl};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::prediction_schedule::PredictionSchedule;
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::video::domain::frame_source::FrameSource;

/// Counters for one labeling run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LabelingStats {
    pub frames: usize,
    pub faces: usize,
    pub predictions: usize,
    pub admitted: usize,
    pub rejected: usize,
    pub classifier_errors: usize,
    pub resets: usize,
}

/// Per-frame loop: detect, assign identities, classify on scheduled frames,
/// gate, smooth, commit, and report each face with its committed label.
///
/// Owns the identity store for the lifetime of one run. Everything happens
/// on the caller's thread, one frame at a time.
pub struct LabelFacesUseCase {
    detector: Box<dyn FaceDetector>,
    classifier: Box<dyn FaceClassifier>,
    assigner: Box<dyn IdentityAssigner>,
    smoother: Box<dyn LabelSmoother>,
    cropper: FaceCropper,
    gate: ConfidenceGate,
    schedule: PredictionSchedule,
    store: IdentityStore,
    logger: Box<dyn PipelineLogger>,
    stats: LabelingStats,
}

impl LabelFacesUseCase {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        classifier: Box<dyn FaceClassifier>,
        config: &LabelingConfig,
        logger: Box<dyn PipelineLogger>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let assigner =
            GridIdentityAssigner::new(config.cell_size).map_err(|reason| ConfigError::Invalid {
                field: "cell_size",
                reason: reason.to_string(),
            })?;
        let schedule = PredictionSchedule::new(config.prediction_interval).map_err(|reason| {
            ConfigError::Invalid {
                field: "prediction_interval",
                reason: reason.to_string(),
            }
        })?;

        Ok(Self {
            detector,
            classifier,
            assigner: Box::new(assigner),
            smoother: Box::new(TemporalSmoother::new(
                config.gender_consensus,
                config.no_consensus,
            )),
            cropper: FaceCropper::new(
                config.pad_width_ratio,
                config.pad_height_ratio,
                config.min_face_confidence,
            ),
            gate: ConfidenceGate::new(config.min_confidence),
            schedule,
            store: IdentityStore::new(config.buffer_size),
            logger,
            stats: LabelingStats::default(),
        })
    }

    /// Replaces the grid assigner, e.g. with a real tracker.
    pub fn with_assigner(mut self, assigner: Box<dyn IdentityAssigner>) -> Self {
        self.assigner = assigner;
        self
    }

    pub fn store(&self) -> &IdentityStore {
        &self.store
    }

    pub fn stats(&self) -> &LabelingStats {
        &self.stats
    }

    /// Forgets every identity. The next detection anywhere starts fresh.
    pub fn reset_tracking(&mut self) {
        self.store.reset_all();
        self.stats.resets += 1;
    }

    /// Processes one frame and returns every face to draw.
    ///
    /// Detector failures are treated as an empty frame. A classifier failure
    /// skips that face's sample; the face is still reported with whatever
    /// label its identity already had.
    pub fn process_frame(&mut self, frame: &Frame) -> Vec<RenderedFace> {
        let predict = self.schedule.tick();
        self.stats.frames += 1;

        let started = Instant::now();
        let detections = match self.detector.detect(frame) {
            Ok(regions) => regions,
            Err(e) => {
                log::warn!("Detection failed on frame {}: {e}", frame.index());
                Vec::new()
            }
        };
        self.logger.timing("detect", elapsed_ms(started));

        let mut faces = Vec::with_capacity(detections.len());
        let mut predicted = HashSet::new();
        for detection in &detections {
            let Some(crop_box) = self.cropper.prepare(detection, frame.width(), frame.height())
            else {
                continue;
            };
            let key = self.assigner.assign(crop_box.x, crop_box.y);
            self.store.get_or_create(key);

            // At most one sample per identity per frame.
            if predict && predicted.insert(key) {
                self.predict(frame, detection, &crop_box, key);
            }

            faces.push(RenderedFace {
                label: self.store.render(&key),
                region: crop_box,
                key,
            });
        }

        self.stats.faces += faces.len();
        self.logger.metric("faces", faces.len() as f64);
        self.logger.metric("identities", self.store.len() as f64);
        self.logger.progress(self.stats.frames);
        faces
    }

    fn predict(&mut self, frame: &Frame, detection: &Region, crop_box: &Region, key: IdentityKey) {
        let crop = frame.crop(crop_box);
        let started = Instant::now();
        let result = self.classifier.classify(&crop, detection);
        self.logger.timing("classify", elapsed_ms(started));
        self.stats.predictions += 1;

        let sample = match result {
            Ok(sample) => sample,
            Err(e) => {
                self.stats.classifier_errors += 1;
                log::warn!("Skipping sample for identity {key}: {e}");
                return;
            }
        };

        let state = self.store.get_or_create(key);
        if !self.gate.should_admit(&sample, state.has_stable_label()) {
            self.stats.rejected += 1;
            log::debug!(
                "Rejected sample for {key} (age {:.2}, gender {:.2})",
                sample.age_confidence,
                sample.gender_confidence
            );
            return;
        }

        let (age, gender) = self.smoother.update(state, sample.age, sample.gender);
        self.store.commit(key, age, gender, sample.mean_confidence());
        self.stats.admitted += 1;
    }

    /// Drives `source` to exhaustion (or until the operator quits), rendering
    /// each frame and polling the operator after it.
    ///
    /// A frame read error ends the run early without failing it; renderer
    /// errors are propagated.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        renderer: &mut dyn FaceRenderer,
        control: &mut dyn OperatorControl,
    ) -> Result<LabelingStats, Box<dyn std::error::Error>> {
        self.logger.info("Labeling started");
        for frame in source.frames() {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Failed to read frame: {e}");
                    break;
                }
            };

            let faces = self.process_frame(&frame);
            renderer.render(&frame, &faces)?;

            match control.poll(frame.index()) {
                Some(OperatorCommand::Reset) => self.reset_tracking(),
                Some(OperatorCommand::Quit) => {
                    self.logger.info("Quit requested");
                    break;
                }
                None => {}
            }
        }
        source.close();
        self.logger.summary();
        Ok(self.stats.clone())
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
