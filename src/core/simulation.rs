use super::backend::{AudioBackend, RenderSink};
use super::config::Config;
use super::geometry::{Layout, PointerState, Region};
use super::mapper::{AudioTargets, ParameterMapper};
use super::motion::{self, EntityState};

/// Everything one frame reads and writes, owned in one place.
///
/// The shell feeds it pointer and layout snapshots and calls [`frame`] once
/// per display refresh.
///
/// [`frame`]: Simulation::frame
pub struct Simulation {
    config: Config,
    region: Region,
    pointer: PointerState,
    entity: EntityState,
    mapper: ParameterMapper,
    laid_out: bool,
}

impl Simulation {
    pub fn new(config: Config, region: Region) -> Self {
        let mapper = ParameterMapper::new(&config.mapping);
        Self {
            entity: EntityState::at(region.center()),
            laid_out: region.has_area(),
            config,
            region,
            pointer: None,
            mapper,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn entity(&self) -> &EntityState {
        &self.entity
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn targets(&self) -> &AudioTargets {
        self.mapper.last()
    }

    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    /// Take a new region (and entity size, if measured). The first layout
    /// with a non-empty region centers the entity; later ones re-clamp it.
    pub fn apply_layout(&mut self, layout: Layout) {
        if let Some(half) = layout.half_extent {
            self.config.motion.half_extent = half;
        }
        self.region = layout.region;
        if !self.region.has_area() {
            return;
        }
        if self.laid_out {
            let movable = self.region.movable(self.config.motion.margin());
            self.entity.position = movable.clamp(self.entity.position);
        } else {
            self.entity = EntityState::at(self.region.center());
            self.laid_out = true;
        }
    }

    /// Advance motion and mapping without touching any output.
    pub fn step(&mut self, dt_sec: f32) -> (EntityState, AudioTargets) {
        self.entity = motion::step(
            &self.entity,
            self.pointer,
            &self.region,
            dt_sec,
            &self.config.motion,
        );
        let targets = self.mapper.update(
            self.entity.velocity,
            self.entity.position,
            &self.region,
            &self.config.motion,
            &self.config.mapping,
        );
        (self.entity, targets)
    }

    /// One full frame: [`step`](Self::step), then render and audio.
    pub fn frame<B, R>(&mut self, dt_sec: f32, backend: &mut B, sink: &mut R) -> AudioTargets
    where
        B: AudioBackend + ?Sized,
        R: RenderSink + ?Sized,
    {
        let (entity, targets) = self.step(dt_sec);
        sink.render(entity.position);
        backend.resume_if_suspended();
        backend.apply_targets(&targets, dt_sec);
        targets
    }
}
