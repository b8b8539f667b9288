use bevy::prelude::*;

use super::{
    common::{icon, label, spawn_fill_track, HEADER_FONT_SIZE},
    layer::HudContext,
};
use crate::{
    data::{callbacks::HostCallback, commands::ProgressBarSpec, session::HudKind},
    systems::{
        countdown::{Countdown, CountdownFinished, CountdownOutcome},
        interaction::ExitRequested,
        HudSystem,
    },
};

pub struct ProgressBarPlugin;
impl Plugin for ProgressBarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            ProgressBar::cancel_on_exit
                .in_set(HudSystem::React)
                .run_if(on_event::<ExitRequested>),
        )
        .add_systems(
            Update,
            ProgressBar::complete
                .in_set(HudSystem::Expire)
                .run_if(on_event::<CountdownFinished>),
        );
    }
}

/// Linear countdown the player can abort. The session slot holds a bar only
/// while it is running, so every bar in the slot still owes the host exactly
/// one `progressbar_end`.
#[derive(Component)]
pub struct ProgressBar;

pub type BarCountdowns<'w, 's> = Query<'w, 's, &'static mut Countdown, With<ProgressBar>>;

impl ProgressBar {
    fn cancel_on_exit(
        mut exits: EventReader<ExitRequested>,
        mut hud: HudContext,
        mut bars: BarCountdowns,
    ) {
        let exited = exits
            .read()
            .any(|exit| exit.0 == HudKind::ProgressBar);
        if exited {
            hide(&mut hud, &mut bars);
        }
    }

    fn complete(
        mut finished: EventReader<CountdownFinished>,
        mut hud: HudContext,
        bars: Query<(), With<ProgressBar>>,
    ) {
        for event in finished.read() {
            if event.outcome != CountdownOutcome::Completed || !bars.contains(event.entity) {
                continue;
            }
            if hud.session.vacate_if(HudKind::ProgressBar, event.entity) {
                hud.notify_host(HostCallback::progressbar_end(true));
                let fade = hud.config.fades.progress_bar();
                hud.fade_out(event.entity, fade, None);
            }
        }
    }
}

pub fn show(hud: &mut HudContext, bars: &mut BarCountdowns, spec: &ProgressBarSpec) -> Entity {
    if let Some(previous) = resolve_running(hud, bars) {
        info!("progress bar superseded before it finished");
        hud.commands.entity(previous).try_despawn();
    }

    let anchor = hud.config.layout.progress_bar;
    let palette = &hud.config.palette;
    let radius = hud.config.border_radius;
    let (accent, text, background, track) = (
        palette.accent,
        palette.text,
        palette.background,
        palette.secondary_background,
    );

    let bar = hud.spawn_on_root((
        ProgressBar,
        Countdown::from_millis(spec.duration, true),
        Node {
            width: Val::Vw(26.0),
            padding: UiRect::all(Val::Px(10.0)),
            ..anchor.node()
        },
        BackgroundColor(background),
        BorderRadius::all(Val::Px(radius)),
    ));

    let heading = hud
        .commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                ..default()
            },
            ChildOf(bar),
        ))
        .id();
    if !spec.icon.is_empty() {
        hud.commands
            .spawn((icon(spec.icon.clone(), accent), ChildOf(heading)));
    }
    hud.commands
        .spawn((label(&spec.header, HEADER_FONT_SIZE, text), ChildOf(heading)));
    spawn_fill_track(&mut hud.commands, bar, bar, accent, track, radius);

    hud.install(HudKind::ProgressBar, bar);
    bar
}

/// Force-hides the running bar, reporting failure.
pub fn hide(hud: &mut HudContext, bars: &mut BarCountdowns) {
    match resolve_running(hud, bars) {
        Some(bar) => {
            let fade = hud.config.fades.progress_bar();
            hud.fade_out(bar, fade, None);
        }
        None => debug!("no progress bar running"),
    }
}

/// Vacates the slot and reports `{success: false}` for the bar it held.
fn resolve_running(hud: &mut HudContext, bars: &mut BarCountdowns) -> Option<Entity> {
    let bar = hud.session.vacate(HudKind::ProgressBar)?;
    // A bar spawned earlier this frame has no countdown to query yet.
    let cancelled = bars.get_mut(bar).map_or(true, |mut countdown| countdown.cancel());
    if cancelled {
        hud.notify_host(HostCallback::progressbar_end(false));
    }
    Some(bar)
}
