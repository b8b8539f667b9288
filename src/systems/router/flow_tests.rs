use std::time::Duration;

use bevy::{prelude::*, time::TimeUpdateStrategy};
use serde_json::{json, Value};

use crate::{
    data::{
        callbacks::{CallbackEndpoint, HostCallback},
        commands::HudCommand,
        config::HudConfig,
        dialogue::NodeId,
        session::{HudKind, HudSession},
    },
    systems::{
        clipboard::{testing::RecordingClipboard, HudClipboard},
        countdown::Countdown,
        interaction::HudClick,
        ui::{
            action_menu::{ActionEntry, ActionMenu, CenterButton, CenterControl, MenuColumn},
            context_menu::{ContextMenu, ContextRow},
            dialogue::{Dialogue, DialogueVignette},
            draw_text::DrawText,
            notify::{Notification, NotificationContainer},
            progress_bar::ProgressBar,
            progress_circle::{CircleDial, ProgressCircle},
        },
        HudPlugin,
    },
};

const FRAME: Duration = Duration::from_millis(100);

#[derive(Resource, Default)]
struct SentCallbacks(Vec<HostCallback>);

fn record_callbacks(mut callbacks: EventReader<HostCallback>, mut sent: ResMut<SentCallbacks>) {
    sent.0.extend(callbacks.read().cloned());
}

fn hud_app() -> (App, RecordingClipboard) {
    let clipboard = RecordingClipboard::default();
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(HudConfig::fallback())
        .insert_resource(HudClipboard::new(clipboard.clone()))
        .init_resource::<SentCallbacks>()
        .add_plugins(HudPlugin)
        .add_systems(Last, record_callbacks);
    app.update();
    (app, clipboard)
}

fn send(app: &mut App, command: Value) {
    let command = HudCommand::decode(&command.to_string()).expect("test command decodes");
    app.world_mut().send_event(command);
    app.update();
}

fn click(app: &mut App, click: HudClick) {
    app.world_mut().send_event(click);
    app.update();
}

fn press_exit(app: &mut App) {
    {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.press(KeyCode::Escape);
        input.release(KeyCode::Escape);
    }
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
}

fn advance(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn take_callbacks(app: &mut App) -> Vec<HostCallback> {
    std::mem::take(&mut app.world_mut().resource_mut::<SentCallbacks>().0)
}

fn endpoints(callbacks: &[HostCallback]) -> Vec<CallbackEndpoint> {
    callbacks.iter().map(|callback| callback.endpoint).collect()
}

fn count<T: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<T>>()
        .iter(app.world())
        .count()
}

fn single<T: Component + Clone>(app: &mut App) -> T {
    app.world_mut()
        .query::<&T>()
        .single(app.world())
        .expect("exactly one instance")
        .clone()
}

fn is_live(app: &App, kind: HudKind) -> bool {
    app.world().resource::<HudSession>().is_live(kind)
}

#[test]
fn progress_bar_reports_success_exactly_once() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({ "action": "show_progressbar", "header": "Connecting...", "icon": "fa-solid fa-computer", "duration": 300 }),
    );
    assert!(is_live(&app, HudKind::ProgressBar));

    advance(&mut app, 1);
    assert!(take_callbacks(&mut app).is_empty());

    advance(&mut app, 6);
    assert_eq!(take_callbacks(&mut app), vec![HostCallback::progressbar_end(true)]);
    assert!(!is_live(&app, HudKind::ProgressBar));

    advance(&mut app, 10);
    assert!(take_callbacks(&mut app).is_empty());
    assert_eq!(count::<ProgressBar>(&mut app), 0);
}

#[test]
fn exit_key_cancels_the_running_bar() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({ "action": "show_progressbar", "header": "Lockpicking", "icon": "", "duration": 5000 }),
    );
    press_exit(&mut app);

    assert_eq!(take_callbacks(&mut app), vec![HostCallback::progressbar_end(false)]);
    assert!(!is_live(&app, HudKind::ProgressBar));

    advance(&mut app, 60);
    assert!(take_callbacks(&mut app).is_empty());
}

#[test]
fn superseded_and_hidden_bars_report_failure() {
    let (mut app, _) = hud_app();
    let bar = json!({ "action": "show_progressbar", "header": "One", "icon": "", "duration": 5000 });
    send(&mut app, bar.clone());
    send(&mut app, bar);
    assert_eq!(take_callbacks(&mut app), vec![HostCallback::progressbar_end(false)]);
    assert_eq!(count::<ProgressBar>(&mut app), 1);

    send(&mut app, json!({ "action": "hide_progressbar" }));
    assert_eq!(take_callbacks(&mut app), vec![HostCallback::progressbar_end(false)]);

    send(&mut app, json!({ "action": "hide_progressbar" }));
    advance(&mut app, 60);
    assert!(take_callbacks(&mut app).is_empty());
}

#[test]
fn progress_circle_ignores_exit_and_reports_after_fading() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({ "action": "show_circle", "message": "Hacking...", "duration": 0.3 }),
    );
    let dial = app
        .world_mut()
        .query_filtered::<&BackgroundColor, With<CircleDial>>()
        .single(app.world())
        .expect("one dial")
        .0;
    assert_eq!(dial, HudConfig::fallback().palette.circle_track);

    press_exit(&mut app);
    assert!(take_callbacks(&mut app).is_empty());
    assert!(is_live(&app, HudKind::ProgressCircle));

    advance(&mut app, 20);
    assert_eq!(
        endpoints(&take_callbacks(&mut app)),
        vec![CallbackEndpoint::CircleEnd]
    );
    assert_eq!(count::<ProgressCircle>(&mut app), 0);
    assert!(!is_live(&app, HudKind::ProgressCircle));
}

#[test]
fn timed_notifications_expire_and_persistent_ones_stay() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({ "action": "notify", "type": "success", "message": "Saved", "duration": 0 }),
    );
    send(
        &mut app,
        json!({ "action": "notify", "type": "nonsense", "header": "Heads up", "message": "Soon gone", "duration": 300 }),
    );
    assert_eq!(count::<Notification>(&mut app), 2);
    assert_eq!(count::<NotificationContainer>(&mut app), 1);

    // The countdown starts on the frame the card appears; two frames later
    // 200ms of the 300ms have passed and the card must still be up.
    for _ in 0..2 {
        advance(&mut app, 1);
        assert_eq!(count::<Notification>(&mut app), 2);
        assert!(app
            .world_mut()
            .query_filtered::<&Countdown, With<Notification>>()
            .iter(app.world())
            .all(|countdown| countdown.fraction_remaining() > 0.0));
    }

    advance(&mut app, 100);
    assert_eq!(count::<Notification>(&mut app), 1);
    assert!(take_callbacks(&mut app).is_empty());
}

#[test]
fn action_menu_navigates_submenus_and_closes_from_the_root() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({
            "action": "create_action_menu",
            "menu": [
                {
                    "label": "Main Menu",
                    "icon": "fa-solid fa-bars",
                    "submenu": [
                        { "label": "Action 1", "action_type": "client_event", "action": "some_event", "params": {} }
                    ]
                },
                { "label": "Quick Action", "action_type": "client_event", "action": "quick_event" },
                { "label": "Third", "action_type": "server_event", "action": "third_event" }
            ]
        }),
    );

    let mut entries: Vec<ActionEntry> = app
        .world_mut()
        .query::<&ActionEntry>()
        .iter(app.world())
        .copied()
        .collect();
    entries.sort_by_key(|entry| entry.index);
    assert_eq!(entries.len(), 3);
    for entry in &entries {
        let expected = if entry.index % 2 == 0 {
            MenuColumn::Right
        } else {
            MenuColumn::Left
        };
        assert_eq!(entry.column, expected);
    }
    assert_eq!(single::<CenterButton>(&mut app).0, CenterControl::Close);

    click(&mut app, HudClick::ActionMenuEntry(0));
    assert_eq!(single::<ActionMenu>(&mut app).stack().depth(), 2);
    assert_eq!(single::<CenterButton>(&mut app).0, CenterControl::Back);
    assert_eq!(count::<ActionEntry>(&mut app), 1);

    click(&mut app, HudClick::ActionMenuEntry(0));
    let sent = take_callbacks(&mut app);
    assert_eq!(endpoints(&sent), vec![CallbackEndpoint::ActionMenuTrigger]);
    assert_eq!(
        sent[0].body,
        json!({ "action_type": "client_event", "action": "some_event", "params": {} })
    );
    assert!(is_live(&app, HudKind::ActionMenu));

    click(&mut app, HudClick::ActionMenuCenter);
    assert_eq!(single::<ActionMenu>(&mut app).stack().depth(), 1);
    assert_eq!(single::<CenterButton>(&mut app).0, CenterControl::Close);

    click(&mut app, HudClick::ActionMenuEntry(1));
    assert_eq!(
        endpoints(&take_callbacks(&mut app)),
        vec![
            CallbackEndpoint::ActionMenuTrigger,
            CallbackEndpoint::CloseActionMenu
        ]
    );
    assert!(!is_live(&app, HudKind::ActionMenu));
    assert_eq!(count::<ActionMenu>(&mut app), 0);
}

#[test]
fn exit_key_closes_the_most_recent_component_first() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({ "action": "create_action_menu", "menu": [{ "label": "Wave", "action": "wave" }] }),
    );
    send(
        &mut app,
        json!({
            "action": "create_dialogue",
            "dialogue": { "header": { "message": "Guard" }, "conversation": [{ "id": 1, "response": "Halt.", "options": [] }] }
        }),
    );

    press_exit(&mut app);
    assert_eq!(
        endpoints(&take_callbacks(&mut app)),
        vec![CallbackEndpoint::CloseDialogue]
    );
    assert!(is_live(&app, HudKind::ActionMenu));

    press_exit(&mut app);
    assert_eq!(
        endpoints(&take_callbacks(&mut app)),
        vec![CallbackEndpoint::CloseActionMenu]
    );

    press_exit(&mut app);
    assert!(take_callbacks(&mut app).is_empty());
}

#[test]
fn unresolved_dialogue_link_keeps_the_current_node() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({
            "action": "create_dialogue",
            "dialogue": { "header": {}, "conversation": [{ "id": 1, "options": [{ "next_id": 2, "should_end": false }] }] }
        }),
    );
    assert_eq!(count::<DialogueVignette>(&mut app), 1);

    click(&mut app, HudClick::DialogueOption(0));

    assert!(take_callbacks(&mut app).is_empty());
    assert_eq!(
        single::<Dialogue>(&mut app).tree().current_id(),
        &NodeId::Number(1)
    );
}

#[test]
fn dialogue_moves_then_ends_with_its_side_effect() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({
            "action": "create_dialogue",
            "dialogue": {
                "header": { "message": ["Quarry Employee"], "icon": "fa-solid fa-hard-hat" },
                "conversation": [
                    {
                        "id": 1,
                        "response": ["Hello, <b>welcome</b> to the quarry."],
                        "options": [{ "message": "Jobs?", "next_id": "jobs" }]
                    },
                    {
                        "id": "jobs",
                        "response": "Plenty.",
                        "options": [{
                            "message": "Goodbye!",
                            "next_id": null,
                            "should_end": true,
                            "action_type": "client",
                            "action": "test_event"
                        }]
                    }
                ]
            }
        }),
    );

    click(&mut app, HudClick::DialogueOption(0));
    assert_eq!(
        single::<Dialogue>(&mut app).tree().current_id(),
        &NodeId::Text(String::from("jobs"))
    );

    click(&mut app, HudClick::DialogueOption(0));
    let sent = take_callbacks(&mut app);
    assert_eq!(
        endpoints(&sent),
        vec![CallbackEndpoint::DialogueTrigger, CallbackEndpoint::CloseDialogue]
    );
    assert_eq!(
        sent[0].body,
        json!({ "action_type": "client", "action": "test_event", "params": {} })
    );
    assert_eq!(count::<Dialogue>(&mut app), 0);
    assert_eq!(count::<DialogueVignette>(&mut app), 0);
}

#[test]
fn empty_conversation_is_rejected() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({ "action": "create_dialogue", "dialogue": { "header": {}, "conversation": [] } }),
    );
    assert!(!is_live(&app, HudKind::Dialogue));
    assert_eq!(count::<Dialogue>(&mut app), 0);
}

#[test]
fn context_menu_with_empty_content_has_no_rows() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({ "action": "create_context_menu", "menu": { "header": { "title": "T" }, "content": [] } }),
    );
    assert!(is_live(&app, HudKind::ContextMenu));
    assert_eq!(count::<ContextMenu>(&mut app), 1);
    assert_eq!(count::<ContextRow>(&mut app), 0);
}

#[test]
fn context_menu_needs_header_and_content() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({ "action": "create_context_menu", "menu": { "content": [{ "label": "Orphan" }] } }),
    );
    send(
        &mut app,
        json!({ "action": "create_context_menu", "menu": { "header": { "title": "T" } } }),
    );
    send(&mut app, json!({ "action": "create_context_menu" }));
    assert!(!is_live(&app, HudKind::ContextMenu));
    assert_eq!(count::<ContextMenu>(&mut app), 0);
}

#[test]
fn context_menu_rows_trigger_and_close() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({
            "action": "create_context_menu",
            "menu": {
                "header": { "title": "New Context Menu", "subtitle": "Choose an option" },
                "content": [
                    { "label": "Enable Notifications", "action": { "type": "client_event", "name": "toggle_notifications" } },
                    { "label": "Disabled Option", "icon": "fa-solid fa-ban", "disabled": true },
                    { "label": "Open Profile", "action": { "type": "client_event", "name": "open_profile" }, "should_close": true }
                ]
            }
        }),
    );
    let inert = app
        .world_mut()
        .query_filtered::<&ContextRow, Without<Button>>()
        .iter(app.world())
        .map(|row| row.index)
        .collect::<Vec<_>>();
    assert_eq!(inert, vec![1]);

    click(&mut app, HudClick::ContextOption(1));
    assert!(take_callbacks(&mut app).is_empty());

    click(&mut app, HudClick::ContextOption(0));
    let sent = take_callbacks(&mut app);
    assert_eq!(endpoints(&sent), vec![CallbackEndpoint::ContextMenuTrigger]);
    assert_eq!(
        sent[0].body,
        json!({ "type": "client_event", "name": "toggle_notifications" })
    );
    assert!(is_live(&app, HudKind::ContextMenu));

    click(&mut app, HudClick::ContextOption(2));
    assert_eq!(
        endpoints(&take_callbacks(&mut app)),
        vec![
            CallbackEndpoint::ContextMenuTrigger,
            CallbackEndpoint::CloseContextMenu
        ]
    );
    assert!(!is_live(&app, HudKind::ContextMenu));

    advance(&mut app, 5);
    assert_eq!(count::<ContextRow>(&mut app), 0);
}

#[test]
fn draw_text_expires_unless_replaced() {
    let (mut app, _) = hud_app();
    send(
        &mut app,
        json!({ "action": "show_drawtext", "header": "Enter Building", "message": "Press the indicated key", "keypress": "e", "duration": 300 }),
    );
    advance(&mut app, 10);
    assert_eq!(
        endpoints(&take_callbacks(&mut app)),
        vec![CallbackEndpoint::HideDrawText]
    );

    send(
        &mut app,
        json!({ "action": "show_drawtext", "header": "A", "message": "timed", "duration": 300 }),
    );
    send(
        &mut app,
        json!({ "action": "show_drawtext", "header": "B", "message": "sticky", "duration": 0 }),
    );
    advance(&mut app, 20);
    assert!(take_callbacks(&mut app).is_empty());
    assert_eq!(count::<DrawText>(&mut app), 1);

    send(&mut app, json!({ "action": "hide_drawtext" }));
    advance(&mut app, 10);
    assert!(take_callbacks(&mut app).is_empty());
    assert_eq!(count::<DrawText>(&mut app), 0);
}

#[test]
fn clipboard_and_unknown_commands() {
    let (mut app, clipboard) = hud_app();
    send(&mut app, json!({ "action": "copy_to_clipboard", "content": "Copy me" }));
    send(&mut app, json!({ "action": "moonwalk", "speed": 11 }));
    send(&mut app, json!({ "action": "close_dialogue" }));
    send(&mut app, json!({ "action": "close_action_menu" }));

    assert_eq!(clipboard.copied(), vec![String::from("Copy me")]);
    assert!(take_callbacks(&mut app).is_empty());
}
