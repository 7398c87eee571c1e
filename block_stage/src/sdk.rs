//! SDK entry points and builder for composing the block stage app.

use bevy::prelude::*;
use chrono::NaiveDate;

use crate::camera::CameraSnapshot;
use crate::config::{self, StageConfig};
use crate::data::{spawn_day_loader, BlockSource, DataError, DayChannel, FixtureSource};
use crate::render::{setup_stage, BlockRenderer, PostChain, RendererResource, RingRenderer};
use crate::scene::{day_plugin, hex_color, hover_plugin, DaySceneState};
use crate::stage::{stage_plugin, Listener, StageController, StageSignal};
use crate::ui::hud_plugin;

/// Loads the block fixture (and hash-rate chart, if configured) named by the
/// environment.
pub fn fixture_source_from_env() -> Result<FixtureSource, DataError> {
    let source = FixtureSource::from_path(&config::blocks_fixture())?;
    match config::hash_rate_fixture() {
        Some(path) => source.with_hash_rate_path(&path),
        None => Ok(source),
    }
}

fn latest_day<S: BlockSource>(source: &S) -> Result<NaiveDate, DataError> {
    source.latest_block()?.day().ok_or(DataError::Empty)
}

/// An explicit start day wins; otherwise the source's latest day, with its
/// lookup error if it had none.
fn resolve_start_day(
    explicit: Option<NaiveDate>,
    latest: Option<Result<NaiveDate, DataError>>,
) -> Result<NaiveDate, DataError> {
    match (explicit, latest) {
        (Some(day), _) => Ok(day),
        (None, Some(latest)) => latest,
        (None, None) => Err(DataError::Empty),
    }
}

/// Builder for constructing an Orpheus app with customizable plugins.
pub struct StageBuilder {
    config: StageConfig,
    channel: Option<DayChannel>,
    latest_day: Option<Result<NaiveDate, DataError>>,
    start_day: Option<NaiveDate>,
    renderer: Option<Box<dyn BlockRenderer>>,
    post_chain: PostChain,
    listeners: Vec<Listener>,
    window_title: String,
    enable_hud: bool,
}

impl Default for StageBuilder {
    fn default() -> Self {
        Self {
            config: StageConfig::default(),
            channel: None,
            latest_day: None,
            start_day: None,
            renderer: None,
            post_chain: PostChain::default(),
            listeners: Vec::new(),
            window_title: "Orpheus".to_string(),
            enable_hud: true,
        }
    }
}

impl StageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: StageConfig) -> Self {
        self.config = config;
        self
    }

    /// Serve blocks from `source` on a background loader thread.
    pub fn source(mut self, source: impl BlockSource) -> Self {
        self.latest_day = Some(latest_day(&source));
        self.channel = Some(spawn_day_loader(source));
        self
    }

    /// Day shown first. Defaults to the day of the source's latest block.
    pub fn start_day(mut self, day: NaiveDate) -> Self {
        self.start_day = Some(day);
        self
    }

    /// Provide a custom block renderer implementation.
    pub fn renderer(mut self, renderer: impl BlockRenderer) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn post_chain(mut self, chain: PostChain) -> Self {
        self.post_chain = chain;
        self
    }

    /// Subscribe to stage signals before the first frame.
    pub fn on_signal(
        mut self,
        listener: impl FnMut(StageSignal, &CameraSnapshot) + Send + Sync + 'static,
    ) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    /// Build the Bevy app. Without an explicit source, blocks are read from
    /// the fixture named by the environment.
    pub fn build(self) -> Result<App, DataError> {
        let (channel, latest_day) = match self.channel {
            Some(channel) => (channel, self.latest_day),
            None => {
                let source = fixture_source_from_env()?;
                let latest_day = latest_day(&source);
                (spawn_day_loader(source), Some(latest_day))
            }
        };
        let start_day = resolve_start_day(self.start_day, latest_day)?;

        let mut controller = StageController::new(&self.config);
        for listener in self.listeners {
            controller.subscribe(listener);
        }
        let (_, origin_bucket) = controller.depth_buckets();

        let renderer = self
            .renderer
            .unwrap_or_else(|| Box::new(RingRenderer::default()));

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: (self.config.viewport[0], self.config.viewport[1]).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(hex_color(self.config.background)))
        .insert_resource(self.post_chain)
        .insert_resource(controller)
        .insert_resource(channel)
        .insert_resource(DaySceneState::new(start_day, origin_bucket))
        .insert_resource(self.config)
        .add_plugins(stage_plugin)
        .add_systems(Startup, setup_stage)
        .add_plugins(day_plugin)
        .add_plugins(hover_plugin);

        renderer.setup(&mut app);
        app.insert_resource(RendererResource(renderer));

        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }

        info!("stage opening on {start_day}");
        Ok(app)
    }
}
