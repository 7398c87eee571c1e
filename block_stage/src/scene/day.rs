//! Day scene: which day's blocks are on stage, swapping them when the camera
//! moves into another depth bucket.

use chrono::{Days, NaiveDate};

use bevy::prelude::*;

use crate::data::DayChannel;
use crate::render::RendererResource;
use crate::stage::{CameraMoved, StageController};
use crate::ui::HudState;

/// Radians per second the day ring turns about Y.
const RING_SPIN: f32 = 0.006;

/// Root entity of a rendered day.
#[derive(Component)]
pub struct DayRing {
    pub day: NaiveDate,
}

/// Marker + data for block entities.
#[derive(Component)]
pub struct BlockSlab {
    pub hash: String,
    pub height: u64,
    pub n_tx: u32,
    pub fee: u64,
}

/// Tracks the day on stage and the one being loaded.
#[derive(Resource)]
pub struct DaySceneState {
    pub start_day: NaiveDate,
    /// Target depth bucket of the camera when the stage opened.
    pub origin_bucket: i64,
    pub shown: Option<NaiveDate>,
    requested: Option<(NaiveDate, i64)>,
    ring: Option<Entity>,
}

impl DaySceneState {
    pub fn new(start_day: NaiveDate, origin_bucket: i64) -> Self {
        Self {
            start_day,
            origin_bucket,
            shown: None,
            requested: None,
            ring: None,
        }
    }

    /// Each bucket further forward (lower) is one day later.
    pub fn day_for_bucket(&self, bucket: i64) -> Option<NaiveDate> {
        let offset = self.origin_bucket - bucket;
        let days = Days::new(offset.unsigned_abs());
        if offset >= 0 {
            self.start_day.checked_add_days(days)
        } else {
            self.start_day.checked_sub_days(days)
        }
    }

    /// Ring centre for a day shown at `bucket`, keeping it as far ahead of
    /// the camera as the first day was.
    pub fn ring_origin(&self, bucket: i64, bucket_depth: f32) -> Vec3 {
        Vec3::new(0.0, 0.0, (bucket - self.origin_bucket) as f32 * bucket_depth)
    }

    pub fn wants(&self, day: NaiveDate) -> bool {
        self.shown != Some(day) && self.requested.map(|(d, _)| d) != Some(day)
    }

    pub fn requested(&self) -> Option<NaiveDate> {
        self.requested.map(|(day, _)| day)
    }

    fn mark_requested(&mut self, day: NaiveDate, bucket: i64) {
        self.requested = Some((day, bucket));
    }

    /// Bucket the day was requested for, clearing the request.
    /// `None` for a day nobody is waiting on any more.
    fn accept(&mut self, day: NaiveDate) -> Option<i64> {
        match self.requested {
            Some((wanted, bucket)) if wanted == day => {
                self.requested = None;
                Some(bucket)
            }
            _ => None,
        }
    }
}

pub fn day_plugin(app: &mut App) {
    app.add_systems(Startup, request_start_day).add_systems(
        Update,
        (request_day_on_camera_move, ingest_day, spin_rings).chain(),
    );
}

fn request_start_day(mut state: ResMut<DaySceneState>, channel: Res<DayChannel>) {
    let (day, bucket) = (state.start_day, state.origin_bucket);
    if channel.request(day) {
        state.mark_requested(day, bucket);
    }
}

fn request_day_on_camera_move(
    mut moved: EventReader<CameraMoved>,
    controller: Res<StageController>,
    mut state: ResMut<DaySceneState>,
    channel: Res<DayChannel>,
) {
    if moved.read().count() == 0 {
        return;
    }
    let (_, bucket) = controller.depth_buckets();
    let Some(day) = state.day_for_bucket(bucket) else {
        return;
    };
    if state.wants(day) && channel.request(day) {
        info!("stage moved to bucket {bucket}, loading {day}");
        state.mark_requested(day, bucket);
    }
}

#[allow(clippy::too_many_arguments)]
fn ingest_day(
    mut commands: Commands,
    channel: Res<DayChannel>,
    renderer: Res<RendererResource>,
    controller: Res<StageController>,
    mut state: ResMut<DaySceneState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    hud: Option<ResMut<HudState>>,
) {
    let mut hud = hud;
    while let Some(day) = channel.try_recv() {
        let Some(bucket) = state.accept(day.day) else {
            debug!("dropping stale day {}", day.day);
            continue;
        };

        if let Some(old) = state.ring.take() {
            commands.entity(old).despawn_recursive();
        }

        let origin = state.ring_origin(bucket, controller.bucket_depth());
        let ring = renderer
            .0
            .spawn_day(&mut commands, &mut meshes, &mut materials, &day, origin);
        state.ring = Some(ring);
        state.shown = Some(day.day);

        if let Some(ref mut hud) = hud {
            hud.update_from_day(&day);
        }
    }
}

fn spin_rings(time: Res<Time>, mut rings: Query<&mut Transform, With<DayRing>>) {
    let angle = RING_SPIN * time.delta_secs();
    for mut transform in &mut rings {
        transform.rotate_y(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oct(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 10, day).unwrap()
    }

    #[test]
    fn forward_buckets_are_later_days() {
        let state = DaySceneState::new(oct(10), 3);
        assert_eq!(state.day_for_bucket(3), Some(oct(10)));
        assert_eq!(state.day_for_bucket(2), Some(oct(11)));
        assert_eq!(state.day_for_bucket(0), Some(oct(13)));
        assert_eq!(state.day_for_bucket(5), Some(oct(8)));
    }

    #[test]
    fn ring_follows_the_bucket() {
        let state = DaySceneState::new(oct(10), 3);
        assert_eq!(state.ring_origin(3, 1000.0), Vec3::ZERO);
        assert_eq!(state.ring_origin(2, 1000.0), Vec3::new(0.0, 0.0, -1000.0));
    }

    #[test]
    fn only_the_latest_request_is_accepted() {
        let mut state = DaySceneState::new(oct(10), 3);
        state.mark_requested(oct(11), 2);
        state.mark_requested(oct(12), 1);

        assert!(!state.wants(oct(12)));
        assert_eq!(state.accept(oct(11)), None);
        assert_eq!(state.accept(oct(12)), Some(1));
        assert_eq!(state.requested(), None);
    }

    #[test]
    fn shown_day_is_not_wanted_again() {
        let mut state = DaySceneState::new(oct(10), 3);
        state.shown = Some(oct(10));
        assert!(!state.wants(oct(10)));
        assert!(state.wants(oct(11)));
    }
}
