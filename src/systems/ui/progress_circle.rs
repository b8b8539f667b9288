use std::f32::consts::TAU;

use bevy::{color::Alpha, prelude::*};

use super::{
    common::{label, BODY_FONT_SIZE},
    layer::HudContext,
};
use crate::{
    data::{
        callbacks::{CallbackEndpoint, HostCallback},
        commands::CircleSpec,
        config::HudConfig,
        session::HudKind,
    },
    systems::{
        colors::DIM_SEGMENT_ALPHA,
        countdown::{Countdown, CountdownFinished, CountdownOutcome},
        HudSystem,
    },
};

const TIMER_FONT_SIZE: f32 = 28.0;

pub struct ProgressCirclePlugin;
impl Plugin for ProgressCirclePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            ProgressCircle::complete
                .in_set(HudSystem::Expire)
                .run_if(on_event::<CountdownFinished>),
        )
        .add_systems(
            Update,
            ProgressCircle::sync_ring
                .in_set(HudSystem::Present)
                .run_if(any_with_component::<ProgressCircle>),
        );
    }
}

/// Radial countdown. It cannot be cancelled; it always runs to zero.
#[derive(Component)]
pub struct ProgressCircle;

/// Disc behind the ring, painted with the configured track colour.
#[derive(Component)]
pub struct CircleDial;

#[derive(Component, Debug, Clone, Copy)]
pub struct ArcSegment {
    pub owner: Entity,
    pub index: usize,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct CircleTimerText {
    pub owner: Entity,
}

impl ProgressCircle {
    fn complete(
        mut finished: EventReader<CountdownFinished>,
        mut hud: HudContext,
        circles: Query<(), With<ProgressCircle>>,
    ) {
        for event in finished.read() {
            if event.outcome != CountdownOutcome::Completed || !circles.contains(event.entity) {
                continue;
            }
            hud.session.vacate_if(HudKind::ProgressCircle, event.entity);
            let fade = hud.config.fades.progress_circle();
            hud.fade_out(
                event.entity,
                fade,
                Some(HostCallback::empty(CallbackEndpoint::CircleEnd)),
            );
        }
    }

    fn sync_ring(
        config: Res<HudConfig>,
        countdowns: Query<&Countdown, With<ProgressCircle>>,
        mut segments: Query<(&ArcSegment, &mut BackgroundColor)>,
        mut timers: Query<(&CircleTimerText, &mut Text)>,
    ) {
        let segment_count = config.progress_circle.segments;
        let lit = config.palette.accent;
        let dim = lit.with_alpha(DIM_SEGMENT_ALPHA);

        for (segment, mut background) in segments.iter_mut() {
            let Ok(countdown) = countdowns.get(segment.owner) else {
                continue;
            };
            let colour = if segment_lit(segment.index, segment_count, countdown.fraction_remaining())
            {
                lit
            } else {
                dim
            };
            if background.0 != colour {
                background.0 = colour;
            }
        }

        for (timer, mut text) in timers.iter_mut() {
            let Ok(countdown) = countdowns.get(timer.owner) else {
                continue;
            };
            let seconds = countdown.remaining_whole_secs().to_string();
            if text.0 != seconds {
                text.0 = seconds;
            }
        }
    }
}

/// Whether segment `index` (clockwise from 12 o'clock) is still part of the
/// lit sweep. The sweep shrinks clockwise, so the leading segments go dark
/// first.
pub fn segment_lit(index: usize, segments: usize, fraction_remaining: f32) -> bool {
    if segments == 0 {
        return false;
    }
    let midpoint = (index as f32 + 0.5) / segments as f32;
    midpoint >= 1.0 - fraction_remaining
}

/// Top-left offset of segment `index` inside a ring box of side `size`.
pub fn segment_position(index: usize, segments: usize, size: f32, radius: f32, segment_size: f32) -> Vec2 {
    let angle = TAU * index as f32 / segments.max(1) as f32;
    let centre = size / 2.0;
    Vec2::new(
        centre + radius * angle.sin() - segment_size / 2.0,
        centre - radius * angle.cos() - segment_size / 2.0,
    )
}

pub fn show(hud: &mut HudContext, spec: &CircleSpec) -> Entity {
    if hud.session.is_live(HudKind::ProgressCircle) {
        info!("progress circle superseded; the old one ends without `circle_end`");
    }

    let ring = hud.config.progress_circle;
    let palette = &hud.config.palette;
    let (accent, text, track) = (palette.accent, palette.text, palette.circle_track);

    let circle = hud.spawn_on_root((
        ProgressCircle,
        Countdown::from_secs(spec.duration, false),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            margin: UiRect {
                left: Val::Px(-ring.size / 2.0),
                top: Val::Px(-ring.size / 2.0),
                ..default()
            },
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(6.0),
            ..default()
        },
        BackgroundColor(Color::NONE),
    ));

    let dial = hud
        .commands
        .spawn((
            Node {
                width: Val::Px(ring.size),
                height: Val::Px(ring.size),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            CircleDial,
            BackgroundColor(track),
            BorderRadius::MAX,
            ChildOf(circle),
        ))
        .id();

    for index in 0..ring.segments {
        let position = segment_position(index, ring.segments, ring.size, ring.radius, ring.segment_size);
        hud.commands.spawn((
            ArcSegment {
                owner: circle,
                index,
            },
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(position.x),
                top: Val::Px(position.y),
                width: Val::Px(ring.segment_size),
                height: Val::Px(ring.segment_size),
                ..default()
            },
            BackgroundColor(accent),
            BorderRadius::MAX,
            ChildOf(dial),
        ));
    }

    let seconds = spec.duration.max(0.0).ceil() as u64;
    hud.commands.spawn((
        CircleTimerText { owner: circle },
        label(seconds.to_string(), TIMER_FONT_SIZE, text),
        ChildOf(dial),
    ));
    hud.commands
        .spawn((label(&spec.message, BODY_FONT_SIZE, text), ChildOf(circle)));

    hud.install(HudKind::ProgressCircle, circle);
    circle
}
