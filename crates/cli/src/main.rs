use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use omnisight_core::classification::domain::face_classifier::FaceClassifier;
use omnisight_core::classification::infrastructure::onnx_age_gender_classifier::OnnxAgeGenderClassifier;
use omnisight_core::classification::infrastructure::replay_face_classifier::ReplayFaceClassifier;
use omnisight_core::labeling::domain::temporal_smoother::NoConsensusPolicy;
use omnisight_core::pipeline::face_renderer::{FaceRenderer, RenderedFace};
use omnisight_core::pipeline::infrastructure::trace::{Trace, TraceReplay};
use omnisight_core::pipeline::label_faces_use_case::LabelFacesUseCase;
use omnisight_core::pipeline::labeling_config::LabelingConfig;
use omnisight_core::pipeline::pipeline_logger::LogPipelineLogger;
use omnisight_core::shared::frame::Frame;
use omnisight_core::video::domain::frame_source::FrameSource;
use omnisight_core::video::infrastructure::blank_frame_source::BlankFrameSource;
use omnisight_core::video::infrastructure::image_sequence_frame_source::ImageSequenceFrameSource;

/// Replays a recorded face trace through the age/gender labeling pipeline.
#[derive(Parser)]
#[command(name = "omnisight")]
struct Cli {
    /// Trace file (JSON) with per-frame detections and classifier outputs.
    trace: PathBuf,

    /// Labeling config file (JSON). Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of frame images, sorted by name, matched to trace frames by
    /// position. Without it frames are blank.
    #[arg(long)]
    frames: Option<PathBuf>,

    /// ONNX age model. With --gender-model, crops are classified instead of
    /// replaying recorded classifier outputs.
    #[arg(long, requires_all = ["gender_model", "frames"])]
    age_model: Option<PathBuf>,

    /// ONNX gender model.
    #[arg(long, requires = "age_model")]
    gender_model: Option<PathBuf>,

    /// Identity grid cell size in pixels.
    #[arg(long)]
    cell_size: Option<i32>,

    /// Samples kept per identity.
    #[arg(long)]
    buffer_size: Option<usize>,

    /// Classifier confidence required once a face is labeled (0.0-1.0).
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long)]
    min_face_confidence: Option<f64>,

    /// Classify every Nth frame (1 = every frame).
    #[arg(long)]
    prediction_interval: Option<usize>,

    /// Keep the previous gender when the history has no consensus.
    #[arg(long)]
    hold_gender: bool,

    /// Emit one JSON object per frame instead of text.
    #[arg(long)]
    json: bool,

    /// Log progress every N frames.
    #[arg(long, default_value = "30")]
    progress_every: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    log::info!("Loading trace {}", cli.trace.display());
    let TraceReplay {
        source,
        detector,
        classifier,
        mut control,
    } = Trace::load(&cli.trace)?.into_replay();
    let mut source = build_source(&cli, source)?;
    let classifier = build_classifier(&cli, classifier)?;

    let mut use_case = LabelFacesUseCase::new(
        Box::new(detector),
        classifier,
        &config,
        Box::new(LogPipelineLogger::new(cli.progress_every)),
    )?;

    let stdout = io::stdout();
    let stats = if cli.json {
        let mut renderer = JsonRenderer { out: stdout.lock() };
        use_case.run(source.as_mut(), &mut renderer, &mut control)?
    } else {
        let mut renderer = TextRenderer { out: stdout.lock() };
        use_case.run(source.as_mut(), &mut renderer, &mut control)?
    };

    log::info!(
        "Done: {} frames, {} predictions ({} admitted, {} rejected, {} failed), {} resets",
        stats.frames,
        stats.predictions,
        stats.admitted,
        stats.rejected,
        stats.classifier_errors,
        stats.resets
    );
    Ok(())
}

fn build_config(cli: &Cli) -> Result<LabelingConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => LabelingConfig::load(path)?,
        None => LabelingConfig::default(),
    };
    if let Some(v) = cli.cell_size {
        config.cell_size = v;
    }
    if let Some(v) = cli.buffer_size {
        config.buffer_size = v;
    }
    if let Some(v) = cli.min_confidence {
        config.min_confidence = v;
    }
    if let Some(v) = cli.min_face_confidence {
        config.min_face_confidence = v;
    }
    if let Some(v) = cli.prediction_interval {
        config.prediction_interval = v;
    }
    if cli.hold_gender {
        config.no_consensus = NoConsensusPolicy::HoldPrevious;
    }
    config.validate()?;
    Ok(config)
}

fn build_source(
    cli: &Cli,
    blank: BlankFrameSource,
) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    match &cli.frames {
        Some(dir) => Ok(Box::new(ImageSequenceFrameSource::from_dir(dir)?)),
        None => Ok(Box::new(blank)),
    }
}

fn build_classifier(
    cli: &Cli,
    recorded: ReplayFaceClassifier,
) -> Result<Box<dyn FaceClassifier>, Box<dyn std::error::Error>> {
    match (&cli.age_model, &cli.gender_model) {
        (Some(age), Some(gender)) => {
            log::info!("Classifying crops with ONNX models");
            Ok(Box::new(OnnxAgeGenderClassifier::new(age, gender)?))
        }
        _ => Ok(Box::new(recorded)),
    }
}

/// `frame 12: 2_3 Male | (25-32) [81%]`, one line per face.
struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> FaceRenderer for TextRenderer<W> {
    fn render(
        &mut self,
        frame: &Frame,
        faces: &[RenderedFace],
    ) -> Result<(), Box<dyn std::error::Error>> {
        for face in faces {
            match &face.label {
                Some(label) => writeln!(
                    self.out,
                    "frame {}: {} {}",
                    frame.index(),
                    face.key,
                    label.caption()
                )?,
                None => writeln!(self.out, "frame {}: {} -", frame.index(), face.key)?,
            }
        }
        Ok(())
    }
}

struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> FaceRenderer for JsonRenderer<W> {
    fn render(
        &mut self,
        frame: &Frame,
        faces: &[RenderedFace],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let line = serde_json::json!({
            "frame": frame.index(),
            "faces": faces,
        });
        writeln!(self.out, "{line}")?;
        Ok(())
    }
}
