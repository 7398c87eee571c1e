//! The stage controller: one owned struct holding every piece of per-frame
//! camera state, ticked explicitly by the caller.

use std::time::Duration;

use bevy::prelude::*;

use crate::camera::{
    depth_bucket, CameraSnapshot, CameraState, DepthGate, DriftBounds, MouseState, Viewport,
};
use crate::config::StageConfig;
use crate::stage::deferred::DeferredQueue;
use crate::stage::signals::{ListenerId, SignalBus, StageSignal};

/// Work the controller defers to a later tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageAction {
    EmitCameraMove,
}

/// What a single tick produced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    pub frame: u64,
    pub camera: CameraSnapshot,
    /// Camera-move signals fired during this tick.
    pub camera_moves: u32,
}

#[derive(Resource)]
pub struct StageController {
    camera: CameraState,
    mouse: MouseState,
    viewport: Viewport,
    pending_aspect: Option<f32>,
    move_step: f32,
    bucket_depth: f32,
    debounce: Duration,
    depth_gate: DepthGate,
    deferred: DeferredQueue<StageAction>,
    signals: SignalBus,
    frame: u64,
}

impl StageController {
    pub fn new(config: &StageConfig) -> Self {
        let bounds = DriftBounds::new(config.drift_min.into(), config.drift_max.into());
        let viewport = Viewport::from_size(config.viewport[0], config.viewport[1]);
        Self {
            camera: CameraState::new(
                config.camera_position.into(),
                config.look_at.into(),
                bounds,
                config.lerp_speed,
            ),
            mouse: MouseState::default(),
            viewport,
            pending_aspect: Some(viewport.aspect()),
            move_step: config.move_step,
            bucket_depth: config.bucket_depth,
            debounce: Duration::from_millis(config.debounce_ms),
            depth_gate: DepthGate::default(),
            deferred: DeferredQueue::new(),
            signals: SignalBus::default(),
            frame: 0,
        }
    }

    /// Advances the stage by one frame at stage time `now`.
    ///
    /// Due camera-move emissions fire first, then `PreUpdate`, the mouse and
    /// camera smoothing, the depth check and `PostUpdate`.
    pub fn tick(&mut self, now: Duration) -> TickReport {
        let mut camera_moves = 0;
        for action in self.deferred.drain_due(now) {
            match action {
                StageAction::EmitCameraMove => {
                    self.depth_gate.release();
                    self.signals
                        .emit(StageSignal::CameraMove, &self.camera.snapshot());
                    camera_moves += 1;
                }
            }
        }

        self.signals
            .emit(StageSignal::PreUpdate, &self.camera.snapshot());

        self.mouse.smooth(self.camera.lerp_speed);
        self.camera.follow(self.mouse.position);

        let (current, target) = self.depth_buckets();
        if self.depth_gate.try_arm(current, target) {
            debug!("stage: depth bucket {current} -> {target}, camera move scheduled");
            self.deferred
                .schedule(now + self.debounce, StageAction::EmitCameraMove);
        }

        let snapshot = self.camera.snapshot();
        self.signals.emit(StageSignal::PostUpdate, &snapshot);
        self.frame += 1;

        TickReport {
            frame: self.frame,
            camera: snapshot,
            camera_moves,
        }
    }

    /// Ticks every `frame` starting at `start` until `stop` returns true.
    /// Returns the stage time after the last tick.
    pub fn run(
        &mut self,
        start: Duration,
        frame: Duration,
        mut stop: impl FnMut(&TickReport) -> bool,
    ) -> Duration {
        let mut now = start;
        loop {
            let report = self.tick(now);
            if stop(&report) {
                return now;
            }
            now += frame;
        }
    }

    /// Records new viewport dimensions. Repeating the current size changes
    /// nothing; a real change leaves an aspect update for the renderer.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if self.viewport.same_size(width, height) {
            return false;
        }
        self.viewport.width = width;
        self.viewport.height = height;
        self.pending_aspect = Some(self.viewport.aspect());
        true
    }

    /// Aspect ratio to push into the projection, once per resize.
    pub fn take_projection_update(&mut self) -> Option<f32> {
        self.pending_aspect.take()
    }

    /// Pointer position in viewport pixels; last call before a tick wins.
    pub fn pointer_moved(&mut self, client: Vec2) {
        self.mouse.set_target(self.viewport.normalize(client));
    }

    /// Moves the target `steps` move-steps forward (towards -z).
    pub fn advance(&mut self, steps: i32) {
        self.camera.target_position.z -= self.move_step * steps as f32;
    }

    pub fn set_look_at_target(&mut self, look_at: Vec3) {
        self.camera.target_look_at = look_at;
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(StageSignal, &CameraSnapshot) + Send + Sync + 'static,
    ) -> ListenerId {
        self.signals.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.signals.unsubscribe(id)
    }

    /// `(current, target)` depth buckets of the camera.
    pub fn depth_buckets(&self) -> (i64, i64) {
        (
            depth_bucket(self.camera.position.z, self.bucket_depth),
            depth_bucket(self.camera.target_position.z, self.bucket_depth),
        )
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn bucket_depth(&self) -> f32 {
        self.bucket_depth
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn camera_move_pending(&self) -> bool {
        self.depth_gate.is_pending()
    }
}
