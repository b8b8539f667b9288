use bevy::prelude::*;

use crate::systems::countdown::CountdownFill;

pub const HEADER_FONT_SIZE: f32 = 16.0;
pub const BODY_FONT_SIZE: f32 = 13.0;
pub const ICON_SIZE: f32 = 18.0;

/// Icon identifier supplied by the host (an icon-font class list). The glyph
/// itself is resolved by whatever icon atlas the host ships.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct IconGlyph(pub String);

/// Image source supplied by the host.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct HeaderImage(pub String);

#[derive(Component)]
pub struct FillTrack;

pub fn label(text: impl Into<String>, font_size: f32, colour: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(colour),
    )
}

pub fn icon(icon: impl Into<String>, colour: Color) -> impl Bundle {
    (
        IconGlyph(icon.into()),
        Text::new(""),
        TextFont {
            font_size: ICON_SIZE,
            ..default()
        },
        TextColor(colour),
        Node {
            min_width: Val::Px(ICON_SIZE),
            ..default()
        },
    )
}

pub fn image(source: impl Into<String>, width: f32, height: f32) -> impl Bundle {
    (
        HeaderImage(source.into()),
        Node {
            width: Val::Px(width),
            height: Val::Px(height),
            ..default()
        },
    )
}

/// Spawns a track under `parent` holding a fill that depletes with the
/// countdown on `owner`.
pub fn spawn_fill_track(
    commands: &mut Commands,
    parent: Entity,
    owner: Entity,
    fill: Color,
    track: Color,
    radius: f32,
) -> Entity {
    let track_entity = commands
        .spawn((
            FillTrack,
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(4.0),
                margin: UiRect::top(Val::Px(6.0)),
                overflow: Overflow::clip(),
                ..default()
            },
            BackgroundColor(track),
            BorderRadius::all(Val::Px(radius)),
            ChildOf(parent),
        ))
        .id();

    commands.spawn((
        CountdownFill { owner },
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(fill),
        ChildOf(track_entity),
    ));

    track_entity
}
