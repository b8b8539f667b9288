use std::time::Duration;

use bevy::{color::Alpha, ecs::system::SystemParam, prelude::*};

use crate::{
    data::{
        callbacks::HostCallback,
        config::HudConfig,
        session::{HudKind, HudSession},
    },
    systems::HudSystem,
};

pub struct LayerPlugin;
impl Plugin for LayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud_root).add_systems(
            Update,
            FadeOut::fade
                .in_set(HudSystem::Present)
                .run_if(any_with_component::<FadeOut>),
        );
    }
}

/// Full-screen node every widget is attached to.
#[derive(Component)]
pub struct HudRoot;

fn spawn_hud_root(mut commands: Commands, mut session: ResMut<HudSession>) {
    let root = commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
        ))
        .id();
    session.set_root(root);
}

/// Everything a widget needs to mutate the overlay and talk to the host.
#[derive(SystemParam)]
pub struct HudContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub session: ResMut<'w, HudSession>,
    pub config: Res<'w, HudConfig>,
    pub callbacks: EventWriter<'w, HostCallback>,
}

impl HudContext<'_, '_> {
    pub fn spawn_on_root(&mut self, bundle: impl Bundle) -> Entity {
        let entity = self.commands.spawn(bundle).id();
        if let Some(root) = self.session.root() {
            self.commands.entity(root).add_child(entity);
        }
        entity
    }

    /// Makes `entity` the live instance of `kind` and despawns the one it replaces.
    pub fn install(&mut self, kind: HudKind, entity: Entity) {
        if let Some(previous) = self.session.occupy(kind, entity) {
            if previous != entity {
                self.commands.entity(previous).try_despawn();
            }
        }
    }

    pub fn notify_host(&mut self, callback: HostCallback) {
        self.callbacks.write(callback);
    }

    pub fn fade_out(&mut self, entity: Entity, duration: Duration, then: Option<HostCallback>) {
        self.commands
            .entity(entity)
            .try_insert(FadeOut::new(duration, then));
    }
}

/// Fades the entity's background and despawns it when the timer runs out,
/// optionally notifying the host afterwards.
#[derive(Component, Debug)]
pub struct FadeOut {
    timer: Timer,
    then: Option<HostCallback>,
    base_alpha: Option<f32>,
}

impl FadeOut {
    pub fn new(duration: Duration, then: Option<HostCallback>) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
            then,
            base_alpha: None,
        }
    }

    fn fade(
        mut commands: Commands,
        time: Res<Time>,
        mut query: Query<(Entity, &mut FadeOut, Option<&mut BackgroundColor>)>,
        mut callbacks: EventWriter<HostCallback>,
    ) {
        for (entity, mut fade, background) in query.iter_mut() {
            fade.timer.tick(time.delta());

            if let Some(mut background) = background {
                let base_alpha = *fade.base_alpha.get_or_insert(background.0.alpha());
                background
                    .0
                    .set_alpha(base_alpha * fade.timer.fraction_remaining());
            }

            if fade.timer.finished() {
                commands.entity(entity).try_despawn();
                if let Some(callback) = fade.then.take() {
                    callbacks.write(callback);
                }
            }
        }
    }
}
